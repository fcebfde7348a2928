use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::Utc;

use super::{FormPairs, create_failed, home_with, invalid_form, parse_id};
use crate::forms::{FormData, ValidationErrors, VenueForm};
use crate::http_server::{error::AppError, state::AppState, views, views::Notice};

const NEW_VENUE: &str = "List a new venue";
const EDIT_VENUE: &str = "Edit venue";

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let groups = state.venues().list_by_location(Utc::now()).await?;
    Ok(Html(views::venue::index(&groups)))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    axum::Form(pairs): FormPairs,
) -> Result<Html<String>, AppError> {
    let term = FormData::from_pairs(pairs).text("search_term");
    let results = state.venues().search(&term, Utc::now()).await?;
    Ok(Html(views::layout(
        "Venue search",
        None,
        &views::search_results("/venues", &results),
    )))
}

pub async fn detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let detail = state.venues().detail(id, Utc::now()).await?;
    Ok(Html(views::venue::detail(&detail)))
}

pub async fn create_form() -> Html<String> {
    Html(views::venue::form(
        NEW_VENUE,
        "/venues/create",
        &VenueForm::default(),
        &ValidationErrors::new(),
    ))
}

pub async fn create_submission(
    State(state): State<Arc<AppState>>,
    axum::Form(pairs): FormPairs,
) -> Response {
    let form = VenueForm::from_form_data(&FormData::from_pairs(pairs));
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            log::debug!("Rejected venue form: {errors}");
            return invalid_form(views::venue::form(NEW_VENUE, "/venues/create", &form, &errors));
        }
    };

    let name = input.name.clone();
    match state.venues().create(input).await {
        Ok(venue) => home_with(
            StatusCode::OK,
            Notice::Success(format!("Venue \"{}\" was successfully listed!", venue.name)),
        ),
        Err(err) => create_failed(
            &err,
            format!("An error occurred. Venue \"{name}\" could not be listed."),
        ),
    }
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let venue = state.venues().get(id).await?;
    Ok(Html(views::venue::form(
        EDIT_VENUE,
        &format!("/venues/{id}/edit"),
        &VenueForm::from_model(&venue),
        &ValidationErrors::new(),
    )))
}

pub async fn edit_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    axum::Form(pairs): FormPairs,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let venues = state.venues();
    venues.get(id).await?;

    let form = VenueForm::from_form_data(&FormData::from_pairs(pairs));
    match form.validate() {
        Ok(input) => {
            venues.update(id, input).await?;
            Ok(Redirect::to(&format!("/venues/{id}")).into_response())
        }
        Err(errors) => {
            log::debug!("Rejected edit of venue {id}: {errors}");
            Ok(invalid_form(views::venue::form(
                EDIT_VENUE,
                &format!("/venues/{id}/edit"),
                &form,
                &errors,
            )))
        }
    }
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state.venues().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
