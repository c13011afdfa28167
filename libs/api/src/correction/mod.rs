use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod anthropic;
#[cfg(test)]
pub(crate) mod fake;
pub mod gateway;
pub mod openai;
pub mod prompt;
pub mod provider;
pub mod schema;

pub use gateway::{CheckError, Gateway};
pub use provider::{CorrectionProvider, ProviderError};

use prompt::PARAGRAPH_MARKER;

/// Normalized review of one submission, whichever provider produced it.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionResult {
    pub has_errors: bool,
    /// Full text with every correction applied. Equal to the submission
    /// when `has_errors` is false.
    pub corrected_text: String,
    /// In the order the provider reported them.
    pub errors: Vec<CorrectionError>,
    pub feedback: String,
}

/// One issue flagged by the provider.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct CorrectionError {
    pub original: String,
    /// May contain the paragraph marker where a new paragraph should begin.
    pub correction: String,
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub explanation: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Spelling,
    Grammar,
    Punctuation,
    Paragraph,
}

impl CorrectionResult {
    /// Removes paragraph errors raised on text that already contains a
    /// line break, along with the markers they put on existing breaks in
    /// `corrected_text`. Returns how many were removed.
    pub fn drop_existing_break_errors(&mut self) -> usize {
        let before = self.errors.len();
        self.errors.retain(|e| {
            !(e.kind == ErrorKind::Paragraph && has_line_break(&e.original))
        });
        let dropped = before - self.errors.len();

        if dropped > 0 {
            self.corrected_text = unmark_existing_breaks(&self.corrected_text);
            if self.errors.is_empty() {
                self.has_errors = false;
            }
        }

        dropped
    }
}

fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

/// A marker directly after a line break sits on a paragraph that already
/// exists.
fn unmark_existing_breaks(text: &str) -> String {
    ["\n", "\r"].iter().fold(text.to_string(), |text, line_break| {
        text.replace(
            &format!("{}{}", line_break, PARAGRAPH_MARKER),
            line_break,
        )
    })
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_provider_payload() {
        // Arrange
        let payload = json!({
            "hasErrors": true,
            "correctedText": "The cat sat.",
            "errors": [{
                "original": "teh",
                "correction": "the",
                "type": "spelling",
                "explanation": "Nice try! It's spelled 'the'."
            }],
            "feedback": "Great work!"
        });

        // Act
        let result = serde_json::from_value::<CorrectionResult>(payload);

        // Assert
        let result = result.unwrap();
        assert!(result.has_errors);
        assert_eq!(result.errors[0].kind, ErrorKind::Spelling);
        assert_eq!(result.errors[0].original, "teh");
    }

    #[test]
    fn test_serialize_uses_client_field_names() {
        let result = CorrectionResult {
            has_errors: false,
            corrected_text: "Hi.".to_string(),
            errors: vec![],
            feedback: "Good!".to_string(),
        };

        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(
            value,
            json!({
                "hasErrors": false,
                "correctedText": "Hi.",
                "errors": [],
                "feedback": "Good!"
            })
        );
    }

    #[test]
    fn test_unknown_error_type_is_rejected() {
        let payload = json!({
            "hasErrors": true,
            "correctedText": "x",
            "errors": [{
                "original": "x",
                "correction": "y",
                "type": "style",
                "explanation": "z"
            }],
            "feedback": ""
        });

        assert!(serde_json::from_value::<CorrectionResult>(payload).is_err());
    }

    #[test]
    fn test_drop_existing_break_errors_keeps_others() {
        let error = |original: &str, kind| CorrectionError {
            original: original.to_string(),
            correction: String::new(),
            kind,
            explanation: String::new(),
        };
        let mut result = CorrectionResult {
            has_errors: true,
            corrected_text: String::new(),
            errors: vec![
                error("I like dogs.\n\nMy school", ErrorKind::Paragraph),
                error("teh", ErrorKind::Spelling),
                error("fun.Yesterday", ErrorKind::Paragraph),
            ],
            feedback: String::new(),
        };

        let dropped = result.drop_existing_break_errors();

        assert_eq!(dropped, 1);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].original, "teh");
        assert_eq!(result.errors[1].original, "fun.Yesterday");
        assert!(result.has_errors);
    }

    #[test]
    fn test_drop_existing_break_errors_unmarks_corrected_text() {
        // Arrange
        let paragraph = |original: &str, correction: &str| CorrectionError {
            original: original.to_string(),
            correction: correction.to_string(),
            kind: ErrorKind::Paragraph,
            explanation: "New topic.".to_string(),
        };
        let mut result = CorrectionResult {
            has_errors: true,
            corrected_text: "I like dogs.\r\n\r\n¶My school is big.\r¶We play."
                .to_string(),
            errors: vec![
                paragraph("dogs.\r\n\r\nMy school", "dogs.\r\n\r\n¶My school"),
                paragraph("big.\rWe play", "big.\r¶We play"),
            ],
            feedback: "Great job!".to_string(),
        };

        // Act
        let dropped = result.drop_existing_break_errors();

        // Assert
        assert_eq!(dropped, 2);
        assert!(!result.has_errors);
        assert!(result.errors.is_empty());
        assert_eq!(
            result.corrected_text,
            "I like dogs.\r\n\r\nMy school is big.\rWe play."
        );
    }

    #[test]
    fn test_drop_existing_break_errors_keeps_inline_markers() {
        let mut result = CorrectionResult {
            has_errors: true,
            corrected_text: "I had fun. ¶Yesterday I ran.\n\n¶Bye.".to_string(),
            errors: vec![
                CorrectionError {
                    original: "fun. Yesterday".to_string(),
                    correction: "fun. ¶Yesterday".to_string(),
                    kind: ErrorKind::Paragraph,
                    explanation: "New time.".to_string(),
                },
                CorrectionError {
                    original: "ran.\n\nBye".to_string(),
                    correction: "ran.\n\n¶Bye".to_string(),
                    kind: ErrorKind::Paragraph,
                    explanation: "New topic.".to_string(),
                },
            ],
            feedback: String::new(),
        };

        let dropped = result.drop_existing_break_errors();

        assert_eq!(dropped, 1);
        assert!(result.has_errors);
        assert_eq!(result.errors[0].original, "fun. Yesterday");
        assert_eq!(result.corrected_text, "I had fun. ¶Yesterday I ran.\n\nBye.");
    }
}
