use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};

use crate::error::AppError;
use crate::forms::SnippetCreateForm;
use crate::handlers::Page;
use crate::middleware::FLASH_KEY;
use crate::state::AppState;

const CREATE_PAGE: &str = "create.html";

/// GET /snippet/create - empty form
pub async fn snippet_create(State(state): State<AppState>, page: Page) -> Result<Response, AppError> {
    let mut data = page.template_data().await?;
    data.form = Some(SnippetCreateForm::blank());

    state.templates.render(StatusCode::OK, CREATE_PAGE, &data)
}

/// POST /snippet/create - validate, insert, flash and redirect to the new snippet.
///
/// Invalid input re-renders the form with 422, keeping the submitted values.
pub async fn snippet_create_post(
    State(state): State<AppState>,
    page: Page,
    form: Result<Form<SnippetCreateForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(mut form) = form.map_err(|e| AppError::bad_request(e.body_text()))?;

    form.validate();
    if !form.valid() {
        let mut data = page.template_data().await?;
        data.form = Some(form);
        return state
            .templates
            .render(StatusCode::UNPROCESSABLE_ENTITY, CREATE_PAGE, &data);
    }

    let id = state
        .snippets
        .insert(&form.title, &form.content, form.expires)
        .await?;

    page.session()
        .insert(FLASH_KEY, "Snippet successfully created!")
        .await?;

    Ok(Redirect::to(&format!("/snippet/view/{}", id)).into_response())
}
