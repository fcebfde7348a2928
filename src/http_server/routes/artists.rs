use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::Utc;

use super::{FormPairs, create_failed, home_with, invalid_form, parse_id};
use crate::forms::{ArtistForm, FormData, ValidationErrors};
use crate::http_server::{error::AppError, state::AppState, views, views::Notice};

const NEW_ARTIST: &str = "List a new artist";
const EDIT_ARTIST: &str = "Edit artist";

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let artists = state.artists().list().await?;
    Ok(Html(views::artist::index(&artists)))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    axum::Form(pairs): FormPairs,
) -> Result<Html<String>, AppError> {
    let term = FormData::from_pairs(pairs).text("search_term");
    let results = state.artists().search(&term, Utc::now()).await?;
    Ok(Html(views::layout(
        "Artist search",
        None,
        &views::search_results("/artists", &results),
    )))
}

pub async fn detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let detail = state.artists().detail(id, Utc::now()).await?;
    Ok(Html(views::artist::detail(&detail)))
}

pub async fn create_form() -> Html<String> {
    Html(views::artist::form(
        NEW_ARTIST,
        "/artists/create",
        &ArtistForm::default(),
        &ValidationErrors::new(),
    ))
}

pub async fn create_submission(
    State(state): State<Arc<AppState>>,
    axum::Form(pairs): FormPairs,
) -> Response {
    let form = ArtistForm::from_form_data(&FormData::from_pairs(pairs));
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            log::debug!("Rejected artist form: {errors}");
            return invalid_form(views::artist::form(
                NEW_ARTIST,
                "/artists/create",
                &form,
                &errors,
            ));
        }
    };

    let name = input.name.clone();
    match state.artists().create(input).await {
        Ok(artist) => home_with(
            StatusCode::OK,
            Notice::Success(format!("Artist {} was successfully listed!", artist.name)),
        ),
        Err(err) => create_failed(
            &err,
            format!("An error occurred. Artist {name} could not be listed."),
        ),
    }
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let artist = state.artists().get(id).await?;
    Ok(Html(views::artist::form(
        EDIT_ARTIST,
        &format!("/artists/{id}/edit"),
        &ArtistForm::from_model(&artist),
        &ValidationErrors::new(),
    )))
}

pub async fn edit_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    axum::Form(pairs): FormPairs,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let artists = state.artists();
    artists.get(id).await?;

    let form = ArtistForm::from_form_data(&FormData::from_pairs(pairs));
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            log::debug!("Rejected edit of artist {id}: {errors}");
            return Ok(invalid_form(views::artist::form(
                EDIT_ARTIST,
                &format!("/artists/{id}/edit"),
                &form,
                &errors,
            )));
        }
    };

    artists.update(id, input).await?;
    Ok(Redirect::to(&format!("/artists/{id}")).into_response())
}
