//! Work queue message body.

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::Result;

/// A single unit of fanned-out work: fetch the property with this id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertyMessage {
    #[serde(deserialize_with = "positive_id")]
    pub id: u64,
}

impl PropertyMessage {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    /// Encode as the JSON message body.
    pub fn to_body(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a JSON message body.
    pub fn from_body(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Listing ids are positive JSON integers.
pub fn positive_id<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match u64::deserialize(deserializer)? {
        0 => Err(de::Error::custom("listing id must be positive")),
        id => Ok(id),
    }
}

/// Like [`positive_id`], but also accepts the id as a numeric string, the
/// form it takes when it comes from a URL path parameter.
pub fn positive_id_or_string<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    let id = match RawId::deserialize(deserializer)? {
        RawId::Number(id) => id,
        RawId::Text(text) => text
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid listing id '{text}'")))?,
    };

    match id {
        0 => Err(de::Error::custom("listing id must be positive")),
        id => Ok(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_format() {
        assert_eq!(PropertyMessage::new(101).to_body().unwrap(), r#"{"id":101}"#);
        assert_eq!(
            PropertyMessage::from_body(r#"{"id":101}"#).unwrap(),
            PropertyMessage::new(101)
        );
    }

    #[test]
    fn test_rejects_malformed_body() {
        assert!(PropertyMessage::from_body(r#"{"id":"abc"}"#).is_err());
        assert!(PropertyMessage::from_body("not json").is_err());
    }

    #[test]
    fn test_rejects_non_positive_ids() {
        assert!(PropertyMessage::from_body(r#"{"id":0}"#).is_err());
        assert!(PropertyMessage::from_body(r#"{"id":-5}"#).is_err());
    }

    #[derive(Debug, Deserialize)]
    struct Lookup {
        #[serde(deserialize_with = "positive_id_or_string")]
        id: u64,
    }

    #[test]
    fn test_lookup_id_accepts_numeric_strings() {
        let from_number: Lookup = serde_json::from_str(r#"{"id":101}"#).unwrap();
        let from_text: Lookup = serde_json::from_str(r#"{"id":"101"}"#).unwrap();
        assert_eq!(from_number.id, 101);
        assert_eq!(from_text.id, 101);

        assert!(serde_json::from_str::<Lookup>(r#"{"id":"abc"}"#).is_err());
        assert!(serde_json::from_str::<Lookup>(r#"{"id":"0"}"#).is_err());
        assert!(serde_json::from_str::<Lookup>(r#"{"id":-5}"#).is_err());
    }
}
