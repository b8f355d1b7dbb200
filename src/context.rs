use crate::error::DnsValidationError;
use serde::Serialize;

/// Result of a validation pass driven through a [`ValidationContext`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedValidationResult {
    pub is_valid: bool,
    pub errors: Vec<DnsValidationError>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// Collects structured errors during one validation pass while tracking
/// the field path being inspected.
///
/// Owned by the caller; concurrent passes need separate contexts.
#[derive(Debug, Default)]
pub struct ValidationContext {
    path: Vec<String>,
    errors: Vec<DnsValidationError>,
    warnings: Vec<String>,
    suggestions: Vec<String>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_field(&mut self, field: impl Into<String>) {
        self.path.push(field.into());
    }

    /// Pop the innermost field; a no-op at the root
    pub fn exit_field(&mut self) {
        self.path.pop();
    }

    pub fn add_error(&mut self, error: DnsValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn add_suggestion(&mut self, message: impl Into<String>) {
        self.suggestions.push(message.into());
    }

    /// Dot-joined field path, or `root` when no field is entered
    pub fn current_path(&self) -> String {
        if self.path.is_empty() {
            "root".to_string()
        } else {
            self.path.join(".")
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Snapshot of everything collected so far
    pub fn get_result(&self) -> DetailedValidationResult {
        DetailedValidationResult {
            is_valid: self.errors.is_empty(),
            errors: self.errors.clone(),
            warnings: self.warnings.clone(),
            suggestions: (!self.suggestions.is_empty()).then(|| self.suggestions.clone()),
        }
    }

    pub fn reset(&mut self) {
        self.path.clear();
        self.errors.clear();
        self.warnings.clear();
        self.suggestions.clear();
    }
}
