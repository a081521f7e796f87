use serde::{Serialize, Serializer};

/// Audience dimension a condition filters on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConditionKey {
    #[serde(rename = "phonetype")]
    PhoneType,
    #[serde(rename = "region")]
    Region,
    #[serde(rename = "tag")]
    Tag,
}

/// How the values of one condition combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptType {
    /// Union of values
    Or,
    /// Intersection of values
    And,
    /// Exclude every listed value
    NotIn,
}

impl OptType {
    pub fn code(&self) -> u8 {
        match self {
            OptType::Or => 0,
            OptType::And => 1,
            OptType::NotIn => 2,
        }
    }
}

impl Serialize for OptType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Broadcast audience filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub key: ConditionKey,
    pub values: Vec<String>,
    pub opt_type: OptType,
}

impl Condition {
    pub fn new<I, V>(key: ConditionKey, values: I, opt_type: OptType) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            key,
            values: values.into_iter().map(Into::into).collect(),
            opt_type,
        }
    }

    pub fn tag<I, V>(values: I, opt_type: OptType) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self::new(ConditionKey::Tag, values, opt_type)
    }
}
