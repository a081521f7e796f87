use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::condition::Condition;
use crate::errors::Result;
use crate::push_info::PushInfo;
use crate::template::{Template, TemplateKind};

/// Default offline retention: one minute
pub const DEFAULT_OFFLINE_EXPIRE_MS: u64 = 60 * 1000;

/// Network the device must be on to receive the push
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NetworkType {
    #[default]
    Any,
    Wifi,
    Cellular,
}

impl NetworkType {
    pub fn code(&self) -> u8 {
        match self {
            NetworkType::Any => 0,
            NetworkType::Wifi => 1,
            NetworkType::Cellular => 2,
        }
    }
}

impl Serialize for NetworkType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// The `message` object of a push body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub is_offline: bool,
    pub offline_expire_time: u64,
    pub push_network_type: NetworkType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msgtype: Option<TemplateKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appkey: Option<String>,
}

/// Push message: delivery options, a template and iOS metadata
///
/// `msgtype` is read off the current template, so it always matches
/// whatever template was assigned last.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Keep the message for offline devices (default: true)
    pub is_offline: bool,
    /// Offline retention in milliseconds
    pub offline_expire_time: u64,
    pub push_network_type: NetworkType,
    pub push_info: Option<PushInfo>,
    template: Option<Template>,
}

impl Default for Message {
    fn default() -> Self {
        Self {
            is_offline: true,
            offline_expire_time: DEFAULT_OFFLINE_EXPIRE_MS,
            push_network_type: NetworkType::Any,
            push_info: None,
            template: None,
        }
    }
}

/// Message pushed to one cid or alias
pub type SingleMessage = Message;

/// Message saved once and pushed to a cid/alias list
pub type ListMessage = Message;

impl Message {
    pub fn new(template: impl Into<Template>) -> Self {
        let mut message = Self::default();
        message.set_template(template);
        message
    }

    pub fn set_template(&mut self, template: impl Into<Template>) {
        self.template = Some(template.into());
    }

    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    pub fn msg_type(&self) -> Option<TemplateKind> {
        self.template.as_ref().map(Template::kind)
    }

    pub fn serialized_core(&self) -> MessageData {
        MessageData {
            is_offline: self.is_offline,
            offline_expire_time: self.offline_expire_time,
            push_network_type: self.push_network_type,
            msgtype: self.msg_type(),
            appkey: None,
        }
    }

    pub fn serialized_template(&self) -> Result<Option<Value>> {
        self.template
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(Into::into)
    }

    pub fn serialized_push_info(&self) -> Result<Option<Value>> {
        self.push_info.as_ref().map(PushInfo::to_value).transpose()
    }
}

/// Broadcast to every user of the app matching all conditions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppMessage {
    pub message: Message,
    pub conditions: Vec<Condition>,
}

impl AppMessage {
    pub fn new(message: Message, conditions: Vec<Condition>) -> Self {
        Self {
            message,
            conditions,
        }
    }

    pub fn serialized_conditions(&self) -> Result<Value> {
        Ok(serde_json::to_value(&self.conditions)?)
    }
}

/// Broadcast to every user carrying `tag`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagMessage {
    pub message: Message,
    pub tag: String,
}

impl TagMessage {
    pub fn new(message: Message, tag: impl Into<String>) -> Self {
        Self {
            message,
            tag: tag.into(),
        }
    }
}
