//! Request handlers.
//!
//! Each handler reads or writes through the snippet store and renders a page
//! from the shared template cache.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use snippety_core::{FormState, TemplateData};

use crate::app::AppState;
use crate::error::ServerError;

const MAX_TITLE_CHARS: usize = 100;
const PERMITTED_EXPIRES: [u32; 3] = [1, 7, 365];

/// `GET /`
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, ServerError> {
    let snippets = state.store.latest().await?;
    let data = TemplateData::new().with_snippets(snippets);
    Ok(Html(state.templates.render("home.tmpl.html", &data)?))
}

/// `GET /snippet/view/{id}`
///
/// Anything that isn't a positive integer id is treated as not found.
pub async fn snippet_view(State(state): State<AppState>, Path(id): Path<String>) -> Result<Html<String>, ServerError> {
    let id = id
        .parse::<i64>()
        .ok()
        .filter(|id| *id >= 1)
        .ok_or(ServerError::NotFound)?;

    let snippet = state.store.get(id).await?;
    let data = TemplateData::new().with_snippet(snippet);
    Ok(Html(state.templates.render("view.tmpl.html", &data)?))
}

/// `GET /snippet/create`
pub async fn snippet_create(State(state): State<AppState>) -> Result<Html<String>, ServerError> {
    let data = TemplateData::new().with_form(FormState::default());
    Ok(Html(state.templates.render("create.tmpl.html", &data)?))
}

/// Raw create-form body. Fields default to empty so that a missing field is
/// reported as a validation error rather than a rejected request.
#[derive(Debug, Default, Deserialize)]
pub struct CreateSnippetForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub expires: String,
}

impl CreateSnippetForm {
    pub fn validate(self) -> FormState {
        let expires = self.expires.trim().parse::<u32>().unwrap_or(0);
        let mut form = FormState { title: self.title, content: self.content, expires, ..Default::default() };

        if form.title.trim().is_empty() {
            form.add_error("title", "This field cannot be blank");
        } else if form.title.chars().count() > MAX_TITLE_CHARS {
            form.add_error("title", "This field cannot be more than 100 characters long");
        }

        if form.content.trim().is_empty() {
            form.add_error("content", "This field cannot be blank");
        }

        if !PERMITTED_EXPIRES.contains(&form.expires) {
            form.add_error("expires", "This field must equal 1, 7 or 365");
        }

        form
    }
}

/// `POST /snippet/create`
pub async fn snippet_create_post(
    State(state): State<AppState>, Form(input): Form<CreateSnippetForm>,
) -> Result<Response, ServerError> {
    let form = input.validate();
    if !form.is_valid() {
        let data = TemplateData::new().with_form(form);
        let html = state.templates.render("create.tmpl.html", &data)?;
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response());
    }

    let id = state
        .store
        .insert(&form.title, &form.content, form.expires)
        .await?;
    tracing::info!(id, expires_days = form.expires, "created snippet");

    Ok(Redirect::to(&format!("/snippet/view/{id}")).into_response())
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
