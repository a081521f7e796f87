use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::errors::{GetuiError, Result};

/// Maximum number of rich media attachments accepted by the provider
pub const MAX_MULTIMEDIA: usize = 3;

/// iOS alert dictionary
///
/// Field names follow the APNs payload key reference, including the
/// provider's `titile-loc-key` spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Alert {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(rename = "action-loc-key", skip_serializing_if = "Option::is_none")]
    pub action_loc_key: Option<String>,
    #[serde(rename = "loc-key", skip_serializing_if = "Option::is_none")]
    pub loc_key: Option<String>,
    #[serde(rename = "loc-args", skip_serializing_if = "Option::is_none")]
    pub loc_args: Option<String>,
    #[serde(rename = "launch-image", skip_serializing_if = "Option::is_none")]
    pub launch_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "titile-loc-key", skip_serializing_if = "Option::is_none")]
    pub title_loc_key: Option<String>,
    #[serde(rename = "title-loc-args", skip_serializing_if = "Option::is_none")]
    pub title_loc_args: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(rename = "subtitle-loc-key", skip_serializing_if = "Option::is_none")]
    pub subtitle_loc_key: Option<String>,
    #[serde(rename = "subtitle-loc-args", skip_serializing_if = "Option::is_none")]
    pub subtitle_loc_args: Option<String>,
}

impl Alert {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultimediaType {
    Image,
    Audio,
    Video,
}

impl MultimediaType {
    pub fn code(&self) -> u8 {
        match self {
            MultimediaType::Image => 1,
            MultimediaType::Audio => 2,
            MultimediaType::Video => 3,
        }
    }
}

impl Serialize for MultimediaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Rich media attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Multimedia {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: MultimediaType,
    /// Only load over wifi; otherwise the push degrades to a plain alert
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_wifi: Option<bool>,
}

impl Multimedia {
    pub fn new(url: impl Into<String>, kind: MultimediaType) -> Self {
        Self {
            url: url.into(),
            kind,
            only_wifi: None,
        }
    }
}

#[derive(Serialize)]
struct Aps<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    alert: Option<&'a Alert>,
    #[serde(rename = "autoBadge")]
    auto_badge: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sound: Option<&'a str>,
    #[serde(rename = "content-available")]
    content_available: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
}

/// iOS delivery metadata sent as `push_info`
#[derive(Debug, Clone, PartialEq)]
pub struct PushInfo {
    pub alert: Option<Alert>,
    /// Badge arithmetic such as `"+1"`, `"-1"` or `"1"`
    pub auto_badge: String,
    /// Sound file name; `com.gexin.ios.silence` for silent
    pub sound: Option<String>,
    /// 1 lets the push wake the app in the background
    pub content_available: u8,
    pub category: Option<String>,
    multimedia: Vec<Multimedia>,
    /// Custom APNs payload, merged at the top level of `push_info`
    pub custom_msg: Map<String, Value>,
}

impl Default for PushInfo {
    fn default() -> Self {
        Self {
            alert: None,
            auto_badge: "+1".to_string(),
            sound: None,
            content_available: 1,
            category: None,
            multimedia: Vec::new(),
            custom_msg: Map::new(),
        }
    }
}

impl PushInfo {
    pub fn with_alert(alert: Alert) -> Self {
        Self {
            alert: Some(alert),
            ..Default::default()
        }
    }

    pub fn multimedia(&self) -> &[Multimedia] {
        &self.multimedia
    }

    pub fn add_multimedia(&mut self, media: Multimedia) -> Result<()> {
        if self.multimedia.len() >= MAX_MULTIMEDIA {
            return Err(GetuiError::Validation(format!(
                "at most {} multimedia attachments are allowed",
                MAX_MULTIMEDIA
            )));
        }
        self.multimedia.push(media);
        Ok(())
    }

    /// Insert one custom payload field
    ///
    /// Values are sent verbatim, explicit `null`s included.
    pub fn insert_custom(&mut self, key: impl Into<String>, value: Value) {
        self.custom_msg.insert(key.into(), value);
    }

    /// Wire object: custom fields first, then `aps` and `multimedia`
    /// written over them.
    pub fn to_value(&self) -> Result<Value> {
        let aps = Aps {
            alert: self.alert.as_ref(),
            auto_badge: &self.auto_badge,
            sound: self.sound.as_deref(),
            content_available: self.content_available,
            category: self.category.as_deref(),
        };

        let mut object = self.custom_msg.clone();
        object.insert("aps".to_string(), serde_json::to_value(&aps)?);
        object.insert(
            "multimedia".to_string(),
            serde_json::to_value(&self.multimedia)?,
        );
        Ok(Value::Object(object))
    }
}

impl Serialize for PushInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_push_info() {
        let value = PushInfo::default().to_value().unwrap();
        assert_eq!(
            value,
            json!({
                "aps": {
                    "autoBadge": "+1",
                    "content-available": 1,
                },
                "multimedia": [],
            })
        );
    }

    #[test]
    fn test_alert_wire_names() {
        let alert = Alert {
            action_loc_key: Some("OPEN".to_string()),
            title_loc_key: Some("T_KEY".to_string()),
            subtitle: Some("sub".to_string()),
            ..Alert::new("T", "B")
        };

        let value = serde_json::to_value(&alert).unwrap();
        assert_eq!(
            value,
            json!({
                "body": "B",
                "action-loc-key": "OPEN",
                "title": "T",
                "titile-loc-key": "T_KEY",
                "subtitle": "sub",
            })
        );
    }

    #[test]
    fn test_multimedia_cap() {
        let mut info = PushInfo::default();
        for i in 0..MAX_MULTIMEDIA {
            info.add_multimedia(Multimedia::new(
                format!("https://cdn.example.com/{}.png", i),
                MultimediaType::Image,
            ))
            .unwrap();
        }

        let err = info
            .add_multimedia(Multimedia::new("https://x", MultimediaType::Video))
            .unwrap_err();
        assert!(matches!(err, GetuiError::Validation(_)));
        assert_eq!(info.multimedia().len(), MAX_MULTIMEDIA);
    }

    #[test]
    fn test_multimedia_serialization() {
        let mut info = PushInfo::default();
        let mut media = Multimedia::new("https://cdn.example.com/a.mp3", MultimediaType::Audio);
        media.only_wifi = Some(true);
        info.add_multimedia(media).unwrap();

        let value = info.to_value().unwrap();
        assert_eq!(
            value["multimedia"],
            json!([{ "url": "https://cdn.example.com/a.mp3", "type": 2, "only_wifi": true }])
        );
    }

    #[test]
    fn test_custom_payload_merged_and_reserved_keys_win() {
        let mut info = PushInfo::with_alert(Alert::new("T", "B"));
        info.sound = Some("default".to_string());
        info.insert_custom("payload", json!("{\"id\":1}"));
        info.insert_custom("aps", json!({ "sound": "hijacked" }));

        let value = info.to_value().unwrap();
        assert_eq!(value["payload"], "{\"id\":1}");
        assert_eq!(value["aps"]["sound"], "default");
        assert_eq!(value["aps"]["alert"]["title"], "T");
        assert_eq!(value["aps"]["autoBadge"], "+1");
    }
}
