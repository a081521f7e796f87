use serde_json::Value;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Length of the request id the provider accepts
pub const REQUEST_ID_LEN: usize = 30;

/// Lowercase hex SHA256 of `input`
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Fresh request id: a hyphen-free uuid cut to 30 characters
pub fn request_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(REQUEST_ID_LEN);
    id
}

/// Recursively remove object entries whose value is `null`
///
/// Array elements are cleaned but never removed, so positions stay stable.
/// Only applied to bodies the crate builds; caller payloads keep their nulls.
pub fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            for v in map.values_mut() {
                strip_nulls(v);
            }
        }
        Value::Array(items) => {
            for v in items.iter_mut() {
                strip_nulls(v);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex("hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
        assert_eq!(sha256_hex("abc"), sha256_hex("abc"));
    }

    #[test]
    fn test_request_id_shape() {
        let id = request_id();
        assert_eq!(id.len(), REQUEST_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, request_id());
    }

    #[test]
    fn test_strip_nulls_recursive() {
        let mut value = json!({
            "a": null,
            "b": { "c": null, "d": 1 },
            "e": [{ "f": null, "g": "x" }, null],
        });
        strip_nulls(&mut value);
        assert_eq!(
            value,
            json!({
                "b": { "d": 1 },
                "e": [{ "g": "x" }, null],
            })
        );
    }
}
