//! Wire format of the inference endpoint.
//!
//! Request: `POST <endpoint>` with a multipart body holding one part named
//! [`FILE_FIELD`] (raw bytes, file name, declared MIME type).
//!
//! Response on 2xx:
//!
//! ```json
//! { "class": "Cat", "confidence": 97.42 }
//! ```
//!
//! Any other status is a failure and the body is never read.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RequestError, RequestResult};

/// Multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

/// Label returned by the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PetClass {
    Cat,
    Dog,
}

impl PetClass {
    pub fn emoji(&self) -> &'static str {
        match self {
            PetClass::Cat => "🐱",
            PetClass::Dog => "🐶",
        }
    }

    /// CSS class for the result card.
    pub fn css_class(&self) -> &'static str {
        match self {
            PetClass::Cat => "result-cat",
            PetClass::Dog => "result-dog",
        }
    }
}

impl fmt::Display for PetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PetClass::Cat => write!(f, "Cat"),
            PetClass::Dog => write!(f, "Dog"),
        }
    }
}

/// Successful classification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "class")]
    pub label: PetClass,
    /// Percentage in `0..=100`.
    pub confidence: f64,
}

impl Prediction {
    /// "This is a Cat!"
    pub fn headline(&self) -> String {
        format!("This is a {}!", self.label)
    }

    /// "Confidence: 97%"
    pub fn confidence_label(&self) -> String {
        format!("Confidence: {}%", self.confidence)
    }
}

/// Turn an HTTP status and body into a prediction.
///
/// Non-2xx statuses fail without looking at the body.
pub fn parse_response(status: u16, body: &str) -> RequestResult<Prediction> {
    if !(200..300).contains(&status) {
        return Err(RequestError::Status(status));
    }

    let prediction: Prediction =
        serde_json::from_str(body).map_err(|e| RequestError::Response(e.to_string()))?;

    if !prediction.confidence.is_finite() || !(0.0..=100.0).contains(&prediction.confidence) {
        return Err(RequestError::Response(format!(
            "confidence {} is outside 0-100",
            prediction.confidence
        )));
    }

    Ok(prediction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cat() {
        let prediction = parse_response(200, r#"{"class": "Cat", "confidence": 97}"#).unwrap();
        assert_eq!(prediction.label, PetClass::Cat);
        assert_eq!(prediction.headline(), "This is a Cat!");
        assert_eq!(prediction.confidence_label(), "Confidence: 97%");
    }

    #[test]
    fn test_parse_fractional_confidence() {
        let prediction = parse_response(200, r#"{"class": "Dog", "confidence": 74.25}"#).unwrap();
        assert_eq!(prediction.label.emoji(), "🐶");
        assert_eq!(prediction.confidence_label(), "Confidence: 74.25%");
    }

    #[test]
    fn test_status_is_checked_before_body() {
        let err = parse_response(500, r#"{"class": "Cat", "confidence": 97}"#).unwrap_err();
        assert_eq!(err, RequestError::Status(500));

        let err = parse_response(404, "not found").unwrap_err();
        assert_eq!(err, RequestError::Status(404));
    }

    #[test]
    fn test_malformed_bodies() {
        for body in [
            "<html>oops</html>",
            r#"{"class": "Bird", "confidence": 50}"#,
            r#"{"class": "Cat"}"#,
            r#"{"class": "Cat", "confidence": 140}"#,
            r#"{"class": "Dog", "confidence": -1}"#,
        ] {
            let err = parse_response(200, body).unwrap_err();
            assert!(matches!(err, RequestError::Response(_)), "body: {}", body);
        }
    }

    #[test]
    fn test_serializes_wire_names() {
        let prediction = Prediction {
            label: PetClass::Dog,
            confidence: 88.5,
        };
        let json = serde_json::to_value(&prediction).unwrap();
        assert_eq!(json["class"], "Dog");
        assert_eq!(json["confidence"], 88.5);
    }
}
