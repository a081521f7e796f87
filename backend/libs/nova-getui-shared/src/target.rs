use serde::Serialize;

use crate::message::SingleMessage;

/// Single push recipient
///
/// Set either `cid` or `alias`. Exclusivity is not checked; when both are
/// set both are sent and the provider decides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Target {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Target {
    pub fn cid(cid: impl Into<String>) -> Self {
        Self {
            cid: Some(cid.into()),
            alias: None,
        }
    }

    pub fn alias(alias: impl Into<String>) -> Self {
        Self {
            cid: None,
            alias: Some(alias.into()),
        }
    }
}

/// Recipients of a list push: a cid list or an alias list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TargetList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<Vec<String>>,
}

impl TargetList {
    pub fn cids<I, V>(cids: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            cid: Some(cids.into_iter().map(Into::into).collect()),
            alias: None,
        }
    }

    pub fn aliases<I, V>(aliases: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            cid: None,
            alias: Some(aliases.into_iter().map(Into::into).collect()),
        }
    }
}

/// One entry of a single-batch push
#[derive(Debug, Clone)]
pub struct BatchTask {
    pub message: SingleMessage,
    pub target: Target,
}

/// cid to alias mapping used by `bind_alias`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasBinding {
    pub cid: String,
    pub alias: String,
}

impl AliasBinding {
    pub fn new(cid: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            cid: cid.into(),
            alias: alias.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_target_omits_unset_field() {
        assert_eq!(
            serde_json::to_value(Target::cid("abc")).unwrap(),
            json!({ "cid": "abc" })
        );
        assert_eq!(
            serde_json::to_value(Target::alias("user-1")).unwrap(),
            json!({ "alias": "user-1" })
        );
    }

    #[test]
    fn test_target_list() {
        let list = TargetList::cids(["a", "b"]);
        assert_eq!(
            serde_json::to_value(&list).unwrap(),
            json!({ "cid": ["a", "b"] })
        );
        assert!(TargetList::aliases(["x"]).cid.is_none());
    }
}
