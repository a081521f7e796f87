use serde::{Serialize, Serializer};

use crate::errors::Result;
use crate::style::Style;

/// Display window shared by every template
///
/// Both bounds use the provider format `yyyy-MM-dd HH:mm:ss`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayWindow {
    #[serde(rename = "duration_begin", skip_serializing_if = "Option::is_none")]
    pub begin: Option<String>,
    #[serde(rename = "duration_end", skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// Notification bar entry; tapping it launches the app
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotificationTemplate {
    #[serde(flatten)]
    pub window: DisplayWindow,
    /// Launch the app immediately on arrival (default: false)
    pub transmission_type: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

/// Notification bar entry; tapping it opens `url`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkTemplate {
    #[serde(flatten)]
    pub window: DisplayWindow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

/// Notification that pops a download dialog for an installable package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotyPopLoadTemplate {
    #[serde(flatten)]
    pub window: DisplayWindow,
    #[serde(rename = "notyicon", skip_serializing_if = "Option::is_none")]
    pub noty_icon: Option<String>,
    #[serde(rename = "notytitle", skip_serializing_if = "Option::is_none")]
    pub noty_title: Option<String>,
    #[serde(rename = "notycontent", skip_serializing_if = "Option::is_none")]
    pub noty_content: Option<String>,
    #[serde(rename = "poptitle", skip_serializing_if = "Option::is_none")]
    pub pop_title: Option<String>,
    #[serde(rename = "popcontent", skip_serializing_if = "Option::is_none")]
    pub pop_content: Option<String>,
    #[serde(rename = "popimage", skip_serializing_if = "Option::is_none")]
    pub pop_image: Option<String>,
    /// Left dialog button label
    #[serde(rename = "popbutton1", skip_serializing_if = "Option::is_none")]
    pub pop_button1: Option<String>,
    /// Right dialog button label
    #[serde(rename = "popbutton2", skip_serializing_if = "Option::is_none")]
    pub pop_button2: Option<String>,
    #[serde(rename = "loadicon", skip_serializing_if = "Option::is_none")]
    pub load_icon: Option<String>,
    #[serde(rename = "loadtitle", skip_serializing_if = "Option::is_none")]
    pub load_title: Option<String>,
    #[serde(rename = "loadurl", skip_serializing_if = "Option::is_none")]
    pub load_url: Option<String>,
    #[serde(rename = "is_autoinstall", skip_serializing_if = "Option::is_none")]
    pub is_auto_install: Option<bool>,
    #[serde(rename = "is_actived", skip_serializing_if = "Option::is_none")]
    pub is_actived: Option<bool>,
    #[serde(rename = "androidmark", skip_serializing_if = "Option::is_none")]
    pub android_mark: Option<String>,
    #[serde(rename = "symbianmark", skip_serializing_if = "Option::is_none")]
    pub symbian_mark: Option<String>,
    #[serde(rename = "iphonemark", skip_serializing_if = "Option::is_none")]
    pub iphone_mark: Option<String>,
}

/// Pass-through payload; the client app decides how to present it.
/// Also the template used for iOS pushes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransmissionTemplate {
    #[serde(flatten)]
    pub window: DisplayWindow,
    /// Launch the app immediately on arrival (default: false)
    pub transmission_type: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission_content: Option<String>,
}

impl TransmissionTemplate {
    /// Build a template whose content is `payload` encoded as a JSON string
    pub fn with_payload<T: Serialize>(payload: &T) -> Result<Self> {
        Ok(Self {
            transmission_content: Some(serde_json::to_string(payload)?),
            ..Default::default()
        })
    }
}

/// Wire name of a template, also used as the message `msgtype`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Notification,
    Link,
    NotyPopLoad,
    Transmission,
}

impl TemplateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Notification => "notification",
            TemplateKind::Link => "link",
            TemplateKind::NotyPopLoad => "notypopload",
            TemplateKind::Transmission => "transmission",
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TemplateKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Push template
///
/// Serializes to the variant's own object; the variant name travels
/// separately as `msgtype` and as the body key holding this object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    Notification(NotificationTemplate),
    Link(LinkTemplate),
    NotyPopLoad(NotyPopLoadTemplate),
    Transmission(TransmissionTemplate),
}

impl Template {
    pub fn kind(&self) -> TemplateKind {
        match self {
            Template::Notification(_) => TemplateKind::Notification,
            Template::Link(_) => TemplateKind::Link,
            Template::NotyPopLoad(_) => TemplateKind::NotyPopLoad,
            Template::Transmission(_) => TemplateKind::Transmission,
        }
    }

    pub fn window(&self) -> &DisplayWindow {
        match self {
            Template::Notification(t) => &t.window,
            Template::Link(t) => &t.window,
            Template::NotyPopLoad(t) => &t.window,
            Template::Transmission(t) => &t.window,
        }
    }

    /// Style attached to the template, if the variant supports one
    pub fn style(&self) -> Option<&Style> {
        match self {
            Template::Notification(t) => t.style.as_ref(),
            Template::Link(t) => t.style.as_ref(),
            Template::NotyPopLoad(_) | Template::Transmission(_) => None,
        }
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Template::Notification(t) => t.serialize(serializer),
            Template::Link(t) => t.serialize(serializer),
            Template::NotyPopLoad(t) => t.serialize(serializer),
            Template::Transmission(t) => t.serialize(serializer),
        }
    }
}

impl From<NotificationTemplate> for Template {
    fn from(template: NotificationTemplate) -> Self {
        Template::Notification(template)
    }
}

impl From<LinkTemplate> for Template {
    fn from(template: LinkTemplate) -> Self {
        Template::Link(template)
    }
}

impl From<NotyPopLoadTemplate> for Template {
    fn from(template: NotyPopLoadTemplate) -> Self {
        Template::NotyPopLoad(template)
    }
}

impl From<TransmissionTemplate> for Template {
    fn from(template: TransmissionTemplate) -> Self {
        Template::Transmission(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{ImageStyle, SystemStyle};
    use serde_json::json;

    #[test]
    fn test_kind_strings() {
        assert_eq!(TemplateKind::Notification.as_str(), "notification");
        assert_eq!(TemplateKind::Link.as_str(), "link");
        assert_eq!(TemplateKind::NotyPopLoad.as_str(), "notypopload");
        assert_eq!(TemplateKind::Transmission.as_str(), "transmission");
    }

    #[test]
    fn test_transmission_defaults() {
        let template = Template::from(TransmissionTemplate::default());
        let value = serde_json::to_value(&template).unwrap();
        assert_eq!(value, json!({ "transmission_type": false }));
    }

    #[test]
    fn test_transmission_with_payload() {
        let template = TransmissionTemplate::with_payload(&json!({ "message": "hi" })).unwrap();
        assert_eq!(
            template.transmission_content.as_deref(),
            Some(r#"{"message":"hi"}"#)
        );
    }

    #[test]
    fn test_notification_nests_style() {
        let template = Template::Notification(NotificationTemplate {
            window: DisplayWindow {
                begin: Some("2024-01-01 00:00:00".to_string()),
                end: None,
            },
            style: Some(
                SystemStyle {
                    title: Some("Sale".to_string()),
                    ..Default::default()
                }
                .into(),
            ),
            ..Default::default()
        });

        let value = serde_json::to_value(&template).unwrap();
        assert_eq!(value["duration_begin"], "2024-01-01 00:00:00");
        assert!(value.get("duration_end").is_none());
        assert!(template.window().end.is_none());
        assert_eq!(value["style"]["type"], 0);
        assert_eq!(value["style"]["title"], "Sale");
        assert!(template.style().is_some());
    }

    #[test]
    fn test_link_template() {
        let template = Template::Link(LinkTemplate {
            url: Some("https://example.com".to_string()),
            style: Some(ImageStyle::default().into()),
            ..Default::default()
        });

        let value = serde_json::to_value(&template).unwrap();
        assert_eq!(value["url"], "https://example.com");
        assert_eq!(value["style"]["type"], 4);
        assert_eq!(template.kind(), TemplateKind::Link);
    }

    #[test]
    fn test_notypopload_wire_names() {
        let template = Template::NotyPopLoad(NotyPopLoadTemplate {
            noty_title: Some("Update".to_string()),
            pop_button1: Some("Install".to_string()),
            load_url: Some("https://example.com/app.apk".to_string()),
            is_auto_install: Some(true),
            ..Default::default()
        });

        let value = serde_json::to_value(&template).unwrap();
        assert_eq!(
            value,
            json!({
                "notytitle": "Update",
                "popbutton1": "Install",
                "loadurl": "https://example.com/app.apk",
                "is_autoinstall": true,
            })
        );
        assert!(template.style().is_none());
    }
}
