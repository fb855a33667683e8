use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::{Result, TemplateError};

pub const QUESTIONS_FILE: &str = "questions.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    #[default]
    Text,
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Question {
    #[serde(rename = "type", default)]
    pub kind: QuestionKind,
    pub message: Option<String>,
    pub default: Option<Value>,
}

impl Question {
    /// The default answer rendered as template text.
    #[must_use]
    pub fn default_answer(&self) -> String {
        match &self.default {
            Some(Value::String(value)) => value.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    #[must_use]
    pub fn prompt<'a>(&'a self, key: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(key)
    }
}

/// Questions keyed by variable name, in file order.
pub type Questions = IndexMap<String, Question>;

/// Reads `questions.json` from `template_dir`. A missing file means the
/// boilerplate has no variables.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_questions(template_dir: &Path) -> Result<Questions> {
    let path = template_dir.join(QUESTIONS_FILE);
    if !path.is_file() {
        tracing::info!(
            template = %template_dir.display(),
            "boilerplate has no questions, using defaults"
        );
        return Ok(Questions::new());
    }

    let content = std::fs::read_to_string(&path).map_err(|source| TemplateError::Read {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| TemplateError::Questions { path, source })
}
