//! Serde helper for optional fields that are omitted when absent.
//!
//! Use with `#[serde(default, skip_serializing_if = "Option::is_none",
//! deserialize_with = "present")]`: a missing key reads as `None`, while a key that
//! is present must hold a real value. An explicit `null` is rejected so it cannot be
//! confused with absence.

use serde::{Deserialize, Deserializer};

pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Holder {
        #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
        value: Option<u32>,
    }

    #[test]
    fn missing_key_is_none() {
        let p: Holder = serde_json::from_str("{}").unwrap();
        assert_eq!(p, Holder { value: None });
    }

    #[test]
    fn explicit_null_is_rejected() {
        assert!(serde_json::from_str::<Holder>(r#"{"value":null}"#).is_err());
    }

    #[test]
    fn none_is_omitted() {
        assert_eq!(serde_json::to_string(&Holder { value: None }).unwrap(), "{}");
        assert_eq!(
            serde_json::to_string(&Holder { value: Some(3) }).unwrap(),
            r#"{"value":3}"#
        );
    }
}
