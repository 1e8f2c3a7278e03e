//! Provenance records.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where one occurrence of a word came from.
///
/// Immutable once constructed. `original_form` keeps the spelling as it
/// appeared in the source, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSource {
    pub dict_name: String,
    pub dict_filepath: PathBuf,
    pub language: String,
    pub original_form: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
    pub category: String,
}

impl WordSource {
    pub fn new(
        dict_name: impl Into<String>,
        dict_filepath: impl Into<PathBuf>,
        language: impl Into<String>,
        original_form: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            dict_name: dict_name.into(),
            dict_filepath: dict_filepath.into(),
            language: language.into(),
            original_form: original_form.into(),
            line_number: None,
            category: category.into(),
        }
    }

    /// Attach the 1-based line number the occurrence was read from.
    pub fn with_line_number(mut self, line_number: usize) -> Self {
        self.line_number = Some(line_number);
        self
    }
}
