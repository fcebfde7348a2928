use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, Response};
use chrono::Utc;

use super::{FormPairs, create_failed, home_with, invalid_form};
use crate::forms::{FormData, ShowForm, ValidationErrors};
use crate::http_server::{error::AppError, state::AppState, views, views::Notice};

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let shows = state.shows().list().await?;
    Ok(Html(views::show::index(&shows)))
}

pub async fn create_form() -> Html<String> {
    Html(views::show::form(
        &ShowForm::starting_at(Utc::now()),
        &ValidationErrors::new(),
    ))
}

pub async fn create_submission(
    State(state): State<Arc<AppState>>,
    axum::Form(pairs): FormPairs,
) -> Response {
    let form = ShowForm::from_form_data(&FormData::from_pairs(pairs));
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            log::debug!("Rejected show form: {errors}");
            return invalid_form(views::show::form(&form, &errors));
        }
    };

    match state.shows().create(input).await {
        Ok(show) => home_with(
            StatusCode::OK,
            Notice::Success(format!(
                "Show successfully booked for {}!",
                views::format_datetime(show.start_time)
            )),
        ),
        Err(err) => create_failed(
            &err,
            "An error occurred. Show could not be listed.".to_string(),
        ),
    }
}
