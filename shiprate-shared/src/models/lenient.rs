//! Rate fields edited through the admin form arrive as strings (`"1500"`),
//! while seeded or API-written routes carry plain numbers. Both deserialize
//! into `Option<f64>`; an empty string is treated as "not configured".

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

pub fn option_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid rate value `{}`", text)))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Band {
        #[serde(default, deserialize_with = "super::option_f64")]
        rate: Option<f64>,
    }

    fn parse(json: &str) -> Result<Option<f64>, serde_json::Error> {
        serde_json::from_str::<Band>(json).map(|b| b.rate)
    }

    #[test]
    fn test_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse(r#"{"rate": 12.5}"#).unwrap(), Some(12.5));
        assert_eq!(parse(r#"{"rate": "12.5"}"#).unwrap(), Some(12.5));
        assert_eq!(parse(r#"{"rate": " 40 "}"#).unwrap(), Some(40.0));
    }

    #[test]
    fn test_blank_null_and_missing_are_absent() {
        assert_eq!(parse(r#"{"rate": ""}"#).unwrap(), None);
        assert_eq!(parse(r#"{"rate": null}"#).unwrap(), None);
        assert_eq!(parse(r#"{}"#).unwrap(), None);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse(r#"{"rate": "twelve"}"#).is_err());
    }
}
