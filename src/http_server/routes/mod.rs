pub mod artists;
pub mod shows;
pub mod venues;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::http_server::error::{AppError, service_status};
use crate::http_server::views::{self, Notice};
use crate::services::ServiceError;

/// Raw urlencoded body, in submission order.
pub type FormPairs = axum::Form<Vec<(String, String)>>;

pub async fn home() -> Html<String> {
    Html(views::home::home(None))
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Ids come in as path text; anything that is not a positive integer cannot
/// name a row.
pub(crate) fn parse_id(raw: &str) -> Result<i64, AppError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::NotFound),
    }
}

/// Home page carrying a notice, with an explicit status.
pub(crate) fn home_with(status: StatusCode, notice: Notice) -> Response {
    (status, Html(views::home::home(Some(&notice)))).into_response()
}

/// Home page reporting a failed create.
pub(crate) fn create_failed(err: &ServiceError, message: String) -> Response {
    let status = service_status(err);
    if status.is_server_error() {
        log::error!("{message}: {err}");
    } else {
        log::warn!("{message}: {err}");
    }
    home_with(status, Notice::Error(message))
}

pub(crate) fn invalid_form(page: String) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response()
}
