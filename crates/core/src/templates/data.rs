//! Render context passed to page templates.

use std::collections::BTreeMap;

use chrono::{Datelike, Utc};
use serde::Serialize;

use crate::store::Snippet;

/// Values available to every page template.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplateData {
    pub current_year: i32,
    pub snippet: Option<Snippet>,
    pub snippets: Vec<Snippet>,
    pub form: Option<FormState>,
}

impl TemplateData {
    /// Empty context stamped with the current UTC year.
    pub fn new() -> Self {
        Self { current_year: Utc::now().year(), ..Default::default() }
    }

    pub fn with_snippet(mut self, snippet: Snippet) -> Self {
        self.snippet = Some(snippet);
        self
    }

    pub fn with_snippets(mut self, snippets: Vec<Snippet>) -> Self {
        self.snippets = snippets;
        self
    }

    pub fn with_form(mut self, form: FormState) -> Self {
        self.form = Some(form);
        self
    }
}

/// Submitted values of the create form, echoed back alongside field errors.
#[derive(Debug, Clone, Serialize)]
pub struct FormState {
    pub title: String,
    pub content: String,
    pub expires: u32,
    pub field_errors: BTreeMap<String, String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self { title: String::new(), content: String::new(), expires: 365, field_errors: BTreeMap::new() }
    }
}

impl FormState {
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.field_errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }
}
