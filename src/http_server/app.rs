use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use color_eyre::eyre::{Context, eyre};
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::{
    database::Database,
    http_server::{
        routes::{self, artists, shows, venues},
        state::AppState,
    },
};

pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/venues", get(venues::index))
        .route("/venues/search", post(venues::search))
        .route(
            "/venues/create",
            get(venues::create_form).post(venues::create_submission),
        )
        .route("/venues/{id}", get(venues::detail).delete(venues::delete))
        .route(
            "/venues/{id}/edit",
            get(venues::edit_form).post(venues::edit_submission),
        )
        .route("/artists", get(artists::index))
        .route("/artists/search", post(artists::search))
        .route(
            "/artists/create",
            get(artists::create_form).post(artists::create_submission),
        )
        .route("/artists/{id}", get(artists::detail))
        .route(
            "/artists/{id}/edit",
            get(artists::edit_form).post(artists::edit_submission),
        )
        .route("/shows", get(shows::index))
        .route(
            "/shows/create",
            get(shows::create_form).post(shows::create_submission),
        )
        .fallback(routes::not_found)
        .layer(
            ServiceBuilder::new().layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            ),
        )
        .with_state(app_state)
}

pub async fn start(config: HttpServerConfig, database: Arc<Database>) -> color_eyre::Result<()> {
    let app = router(Arc::new(AppState::new(database)));

    let address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .wrap_err_with(|| eyre!("Failed to bind to {}", address))?;
    log::info!("Listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Failed to start HTTP server")?;

    log::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{show, venue};
    use crate::test_utils::{at, insert_artist, insert_show, insert_venue, test_db};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use sea_orm::{EntityTrait, PaginatorTrait};
    use tower::ServiceExt; // for `oneshot`

    fn app(db: Arc<Database>) -> Router {
        router(Arc::new(AppState::new(db)))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_home_page() {
        let response = app(test_db().await).oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("<h1>Fyyur</h1>"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_404_page() {
        let response = app(test_db().await)
            .oneshot(get_request("/nowhere"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("<h1>404</h1>"));
    }

    #[tokio::test]
    async fn test_venues_page_groups_by_city() {
        let db = test_db().await;
        insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        insert_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;

        let response = app(db).oneshot(get_request("/venues")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("<h3>San Francisco, CA</h3>"));
        assert!(body.contains("<h3>New York, NY</h3>"));
        assert!(body.contains("0 upcoming show(s)"));
    }

    #[tokio::test]
    async fn test_venue_detail_and_unknown_id() {
        let db = test_db().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = insert_artist(&db, "Guns N Petals").await;
        insert_show(&db, venue.id, artist.id, at(2019, 5, 21, 21, 30)).await;
        let app = app(db);

        let response = app
            .clone()
            .oneshot(get_request(&format!("/venues/{}", venue.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("1 Past Shows"));
        assert!(body.contains("Tue 05, 21, 2019 9:30PM"));

        let missing = app.clone().oneshot(get_request("/venues/999")).await.unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let garbage = app.oneshot(get_request("/venues/abc")).await.unwrap();
        assert_eq!(garbage.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_venue_success_renders_notice() {
        let db = test_db().await;
        let body = "name=The+Musical+Hop&city=San+Francisco&state=CA\
                    &address=1015+Folsom+Street&genres=Jazz&genres=Swing&seeking_talent=y";

        let response = app(db.clone())
            .oneshot(form_request("/venues/create", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            body_text(response)
                .await
                .contains("Venue &quot;The Musical Hop&quot; was successfully listed!")
        );
        let venues = venue::Entity::find().all(&db.conn).await.unwrap();
        assert_eq!(venues.len(), 1);
        assert!(venues[0].seeking_talent);
        assert_eq!(venues[0].genres.0, vec!["Jazz".to_string(), "Swing".to_string()]);
    }

    #[tokio::test]
    async fn test_create_venue_missing_name_rerenders_form() {
        let db = test_db().await;
        let response = app(db.clone())
            .oneshot(form_request(
                "/venues/create",
                "city=San+Francisco&state=CA&address=1+Road&genres=Jazz",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_text(response).await;
        assert!(body.contains("This field is required."));
        assert!(body.contains(r#"value="San Francisco""#));
        assert_eq!(venue::Entity::find().count(&db.conn).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_edit_venue_redirects_and_clears_checkbox() {
        let db = test_db().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let app = app(db.clone());

        let form = app
            .clone()
            .oneshot(get_request(&format!("/venues/{}/edit", venue.id)))
            .await
            .unwrap();
        assert_eq!(form.status(), StatusCode::OK);
        assert!(body_text(form).await.contains(r#"value="The Musical Hop""#));

        let response = app
            .oneshot(form_request(
                &format!("/venues/{}/edit", venue.id),
                "name=The+Musical+Hop&city=Oakland&state=CA&address=1+Road&genres=Folk\
                 &website_link=https%3A%2F%2Fhop.example",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[header::LOCATION],
            format!("/venues/{}", venue.id)
        );
        let stored = venue::Entity::find_by_id(venue.id)
            .one(&db.conn)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.city, "Oakland");
        assert_eq!(stored.website, "https://hop.example");
        assert!(!stored.seeking_talent);
    }

    #[tokio::test]
    async fn test_delete_venue_statuses() {
        let db = test_db().await;
        let busy = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let empty = insert_venue(&db, "Empty Hall", "Austin", "TX").await;
        let artist = insert_artist(&db, "Guns N Petals").await;
        insert_show(&db, busy.id, artist.id, at(2035, 4, 1, 20, 0)).await;
        let app = app(db.clone());
        let delete = |id: i64| {
            Request::builder()
                .method("DELETE")
                .uri(format!("/venues/{id}"))
                .body(Body::empty())
                .unwrap()
        };

        let response = app.clone().oneshot(delete(busy.id)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(show::Entity::find().count(&db.conn).await.unwrap(), 1);

        let response = app.clone().oneshot(delete(empty.id)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.oneshot(delete(empty.id)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search_venues_and_artists() {
        let db = test_db().await;
        insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        insert_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
        insert_artist(&db, "Guns N Petals").await;
        let app = app(db);

        let response = app
            .clone()
            .oneshot(form_request("/venues/search", "search_term=Hop"))
            .await
            .unwrap();
        let body = body_text(response).await;
        assert!(body.contains(r#"for "Hop": 1"#));
        assert!(body.contains("The Musical Hop"));
        assert!(!body.contains("Park Square"));

        let response = app
            .oneshot(form_request("/artists/search", "search_term=petal"))
            .await
            .unwrap();
        assert!(body_text(response).await.contains("Guns N Petals"));
    }

    #[tokio::test]
    async fn test_create_artist_and_list() {
        let db = test_db().await;
        let app = app(db);

        let response = app
            .clone()
            .oneshot(form_request(
                "/artists/create",
                "name=Matt+Quevedo&city=New+York&state=NY&phone=300-400-5000&genres=Jazz",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            body_text(response)
                .await
                .contains("Artist Matt Quevedo was successfully listed!")
        );

        let response = app.oneshot(get_request("/artists")).await.unwrap();
        assert!(body_text(response).await.contains("Matt Quevedo"));
    }

    #[tokio::test]
    async fn test_create_show_with_unknown_artist_reports_failure() {
        let db = test_db().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;

        let response = app(db.clone())
            .oneshot(form_request(
                "/shows/create",
                &format!("artist_id=999&venue_id={}&start_time=2035-04-01+20%3A00%3A00", venue.id),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(
            body_text(response)
                .await
                .contains("An error occurred. Show could not be listed.")
        );
        assert_eq!(show::Entity::find().count(&db.conn).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_shows_page_lists_joined_names() {
        let db = test_db().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = insert_artist(&db, "Guns N Petals").await;
        let app = app(db);

        let response = app
            .clone()
            .oneshot(form_request(
                "/shows/create",
                &format!(
                    "artist_id={}&venue_id={}&start_time=2019-05-21T21%3A30",
                    artist.id, venue.id
                ),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get_request("/shows")).await.unwrap();
        let body = body_text(response).await;
        assert!(body.contains("Guns N Petals"));
        assert!(body.contains("The Musical Hop"));
        assert!(body.contains("Tue 05, 21, 2019 9:30PM"));
    }
}
