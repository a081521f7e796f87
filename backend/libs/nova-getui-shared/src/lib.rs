/// Nova Getui Shared Library
///
/// This library provides a Getui REST API (v1) client for sending push
/// notifications to Android and iOS devices across the Nova platform.
///
/// It handles:
/// - Auth token signing with scheduled refresh before expiry
/// - Message composition: templates, notification styles, iOS `push_info`
/// - Single, batch, broadcast, tag and list pushes
/// - Alias, tag, blacklist, badge and statistics endpoints
/// - Translating provider `result` codes into typed errors
pub mod client;
pub mod condition;
pub mod config;
pub mod errors;
pub mod message;
pub mod models;
pub mod push_info;
pub mod style;
pub mod target;
pub mod template;
pub mod transport;
pub mod util;

pub use client::GetuiClient;
pub use condition::{Condition, ConditionKey, OptType};
pub use config::GetuiConfig;
pub use errors::{GetuiError, Result};
pub use message::{AppMessage, ListMessage, Message, NetworkType, SingleMessage, TagMessage};
pub use models::{ApiResponse, BadgeRequest};
pub use push_info::{Alert, Multimedia, MultimediaType, PushInfo};
pub use style::{ExpandStyle, GetuiStyle, ImageStyle, Style, StyleBase, SystemStyle};
pub use target::{AliasBinding, BatchTask, Target, TargetList};
pub use template::{
    DisplayWindow, LinkTemplate, NotificationTemplate, NotyPopLoadTemplate, Template, TemplateKind,
    TransmissionTemplate,
};
pub use transport::{ApiRequest, HttpTransport, Method, Transport};
