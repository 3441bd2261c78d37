// Request handlers for the landing page and lead submission

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Html,
    Form, Json,
};
use chrono::Datelike;

use super::error::ApiError;
use super::{page, AppState, SubmitResponse};
use crate::leads::LeadFields;
use crate::submission::{FormView, SUCCESS_MESSAGE};

fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// GET / - landing page with an empty form
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(page::render(
        &state.site,
        &FormView::default(),
        current_year(),
    ))
}

/// POST /leads - form post from the landing page
///
/// Always answers with the page. The status code mirrors the outcome so
/// scripted clients can tell them apart.
pub async fn submit_form(
    State(state): State<AppState>,
    Form(fields): Form<LeadFields>,
) -> (StatusCode, Html<String>) {
    let form = state.form();
    form.set_fields(fields);

    let status = match form.submit().await {
        Ok(_) => StatusCode::OK,
        Err(e) => ApiError::from(e).status(),
    };

    let html = page::render(&state.site, &form.view(), current_year());
    (status, Html(html))
}

/// POST /api/leads - JSON submission for script-driven forms
pub async fn submit_json(
    State(state): State<AppState>,
    payload: Result<Json<LeadFields>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let Json(fields) = payload?;
    let form = state.form();
    form.set_fields(fields);
    form.submit().await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse::success(SUCCESS_MESSAGE.to_string())),
    ))
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
