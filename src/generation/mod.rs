// src/generation/mod.rs

use crate::error::Result;
use crate::model::{Essay, Task};
use serde_json::{Value, json};

pub mod gemini;
pub use gemini::GeminiClient;

/// A single structured generation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
}

impl GenerationRequest {
    pub fn for_task(model: &str, task: &Task) -> Self {
        Self {
            model: model.to_string(),
            prompt: task.prompt(),
        }
    }
}

/// Something that can turn a prompt into an [`Essay`].
///
/// Every failure kind (transport, quota, schema mismatch) comes back as
/// `TodoError::Generation`; callers are not expected to tell them apart.
pub trait Generator {
    fn name(&self) -> &str;
    fn model(&self) -> &str;
    fn generate(&self, request: &GenerationRequest) -> Result<Essay>;
}

/// Response schema in the OpenAPI subset Gemini accepts.
pub fn essay_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "content": { "type": "STRING" },
            "word_count": { "type": "INTEGER" },
            "sections": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["title", "content", "word_count", "sections"],
        "propertyOrdering": ["title", "content", "word_count", "sections"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn request_uses_task_prompt() {
        let task = Task::new(
            "Photosynthesis",
            "Explain in 3 paragraphs",
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        );
        let req = GenerationRequest::for_task("gemini-2.0-flash", &task);
        assert_eq!(req.model, "gemini-2.0-flash");
        assert_eq!(
            req.prompt,
            "Topic: Photosynthesis\n\nInstructions: Explain in 3 paragraphs"
        );
    }

    #[test]
    fn schema_requires_all_essay_fields() {
        let schema = essay_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(required, ["title", "content", "word_count", "sections"]);
        assert_eq!(schema["properties"]["sections"]["items"]["type"], "STRING");
    }
}
