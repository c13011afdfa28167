use serde_json::{json, Value};

pub const FUNCTION_NAME: &str = "provide_corrections";

pub const FUNCTION_DESCRIPTION: &str =
    "Provide corrections and explanations for significant errors in the text";

/// JSON schema of `CorrectionResult`, used as function parameters.
pub fn correction_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "hasErrors": {
                "type": "boolean",
                "description": "Indicates whether the text contains any significant errors"
            },
            "correctedText": {
                "type": "string",
                "description": "The full text with all corrections applied. If no errors, this should be identical to the original text."
            },
            "errors": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "original": {
                            "type": "string",
                            "description": "The specific text segment containing the error"
                        },
                        "correction": {
                            "type": "string",
                            "description": "The corrected version"
                        },
                        "type": {
                            "type": "string",
                            "enum": ["spelling", "grammar", "punctuation", "paragraph"],
                            "description": "The type of error being corrected"
                        },
                        "explanation": {
                            "type": "string",
                            "description": "A brief, encouraging explanation of why this needs correction"
                        }
                    },
                    "required": ["original", "correction", "type", "explanation"]
                }
            },
            "feedback": {
                "type": "string",
                "description": "Brief, encouraging feedback about the writing"
            }
        },
        "required": ["hasErrors", "correctedText", "errors", "feedback"]
    })
}
