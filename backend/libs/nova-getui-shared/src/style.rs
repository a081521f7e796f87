use serde::{Serialize, Serializer};

/// Presentation flags shared by every notification style
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleBase {
    /// Ring on arrival (default: true)
    pub is_ring: bool,
    /// Vibrate on arrival (default: true)
    pub is_vibrate: bool,
    /// Notification can be swiped away (default: true)
    pub is_clearable: bool,
    /// Icon name bundled with the client app, e.g. `push.png`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Default for StyleBase {
    fn default() -> Self {
        Self {
            is_ring: true,
            is_vibrate: true,
            is_clearable: true,
            logo: None,
        }
    }
}

/// Plain system notification (`type = 0`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SystemStyle {
    #[serde(flatten)]
    pub base: StyleBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Getui branded notification (`type = 1`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GetuiStyle {
    #[serde(flatten)]
    pub base: StyleBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "logourl", skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// Background image banner (`type = 4`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageStyle {
    #[serde(flatten)]
    pub base: StyleBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
}

/// Expandable notification (`type = 6`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpandStyle {
    #[serde(flatten)]
    pub base: StyleBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "logourl", skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Expand layout selector, one of `"1"`, `"2"`, `"3"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub big_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub big_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub big_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
}

/// Notification bar layout
///
/// The numeric `type` written on the wire is fixed per variant by the
/// provider schema and cannot be set by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Style {
    System(SystemStyle),
    Getui(GetuiStyle),
    Image(ImageStyle),
    Expand(ExpandStyle),
}

impl Style {
    pub fn discriminant(&self) -> u8 {
        match self {
            Style::System(_) => 0,
            Style::Getui(_) => 1,
            Style::Image(_) => 4,
            Style::Expand(_) => 6,
        }
    }

    pub fn base(&self) -> &StyleBase {
        match self {
            Style::System(s) => &s.base,
            Style::Getui(s) => &s.base,
            Style::Image(s) => &s.base,
            Style::Expand(s) => &s.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut StyleBase {
        match self {
            Style::System(s) => &mut s.base,
            Style::Getui(s) => &mut s.base,
            Style::Image(s) => &mut s.base,
            Style::Expand(s) => &mut s.base,
        }
    }
}

#[derive(Serialize)]
struct Tagged<'a, T> {
    #[serde(rename = "type")]
    kind: u8,
    #[serde(flatten)]
    inner: &'a T,
}

impl Serialize for Style {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.discriminant();
        match self {
            Style::System(inner) => Tagged { kind, inner }.serialize(serializer),
            Style::Getui(inner) => Tagged { kind, inner }.serialize(serializer),
            Style::Image(inner) => Tagged { kind, inner }.serialize(serializer),
            Style::Expand(inner) => Tagged { kind, inner }.serialize(serializer),
        }
    }
}

impl From<SystemStyle> for Style {
    fn from(style: SystemStyle) -> Self {
        Style::System(style)
    }
}

impl From<GetuiStyle> for Style {
    fn from(style: GetuiStyle) -> Self {
        Style::Getui(style)
    }
}

impl From<ImageStyle> for Style {
    fn from(style: ImageStyle) -> Self {
        Style::Image(style)
    }
}

impl From<ExpandStyle> for Style {
    fn from(style: ExpandStyle) -> Self {
        Style::Expand(style)
    }
}
