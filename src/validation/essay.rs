// src/validation/essay.rs

use crate::model::Essay;
use serde_json::{Value, json};
use tracing::debug;

#[derive(Debug, PartialEq, Eq)]
pub enum EssayValidationError {
    NotAnObject,
    MissingField(&'static str),
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    NonStringSection(usize),
}

impl EssayValidationError {
    pub fn hint(&self) -> (String, Option<Value>) {
        match self {
            EssayValidationError::NotAnObject => (
                "Response must be a JSON object.".to_string(),
                Some(json!({ "title": "...", "content": "...", "word_count": 0, "sections": [] })),
            ),
            EssayValidationError::MissingField(field) => (
                format!("Missing required field '{field}'."),
                Some(json!({ field.to_string(): "<required>" })),
            ),
            EssayValidationError::WrongType { field, expected } => (
                format!("Field '{field}' must be {expected}."),
                None,
            ),
            EssayValidationError::NonStringSection(index) => (
                format!("Section {index} is not a string."),
                Some(json!({ "sections": ["Introduction", "Conclusion"] })),
            ),
        }
    }
}

fn check_string(
    obj: &serde_json::Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<EssayValidationError>,
) {
    match obj.get(field) {
        None => errors.push(EssayValidationError::MissingField(field)),
        Some(v) if !v.is_string() => errors.push(EssayValidationError::WrongType {
            field,
            expected: "a string",
        }),
        Some(_) => {}
    }
}

/// Checks a raw payload against the essay schema. Extra fields are ignored.
pub fn validate_essay(value: &Value) -> Vec<EssayValidationError> {
    let mut errors = Vec::new();

    let Some(obj) = value.as_object() else {
        errors.push(EssayValidationError::NotAnObject);
        return errors;
    };

    check_string(obj, "title", &mut errors);
    check_string(obj, "content", &mut errors);

    match obj.get("word_count") {
        None => errors.push(EssayValidationError::MissingField("word_count")),
        Some(v) if v.as_u64().is_none() => errors.push(EssayValidationError::WrongType {
            field: "word_count",
            expected: "a non-negative integer",
        }),
        Some(_) => {}
    }

    match obj.get("sections") {
        None => errors.push(EssayValidationError::MissingField("sections")),
        Some(Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                if !item.is_string() {
                    errors.push(EssayValidationError::NonStringSection(index));
                }
            }
        }
        Some(_) => errors.push(EssayValidationError::WrongType {
            field: "sections",
            expected: "an array of strings",
        }),
    }

    errors
}

/// Validates then converts. On failure returns the joined hint messages.
pub fn essay_from_value(value: Value) -> Result<Essay, String> {
    let errors = validate_essay(&value);
    if !errors.is_empty() {
        for error in &errors {
            if let (msg, Some(example)) = error.hint() {
                debug!(%msg, %example, "essay schema mismatch");
            }
        }
        let messages = errors
            .iter()
            .map(|e| e.hint().0)
            .collect::<Vec<_>>()
            .join(" ");
        return Err(format!("Response does not match the essay schema: {messages}"));
    }
    serde_json::from_value(value).map_err(|e| format!("Failed to decode essay: {e}"))
}
