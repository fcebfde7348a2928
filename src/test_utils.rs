use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, ConnectOptions, Set};

use crate::database::Database;
use crate::entities::{self, Genres};

pub async fn test_db() -> Arc<Database> {
    // A single connection keeps every query on the same in-memory database
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect_with(opt)
        .await
        .unwrap_or_else(|e| panic!("Failed to create test database: {e:?}"));

    Arc::new(db)
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap()
}

pub async fn insert_venue(
    db: &Database,
    name: &str,
    city: &str,
    state: &str,
) -> entities::venue::Model {
    let venue = entities::venue::ActiveModel {
        name: Set(name.into()),
        city: Set(city.into()),
        state: Set(state.into()),
        address: Set("1 Main Street".into()),
        phone: Set(String::new()),
        image_link: Set(format!("https://img.example/{}", name.len())),
        facebook_link: Set(String::new()),
        website: Set(String::new()),
        description: Set(String::new()),
        genres: Set(Genres(vec!["Jazz".into()])),
        seeking_talent: Set(false),
        ..Default::default()
    };
    venue.insert(&db.conn).await.unwrap()
}

pub async fn insert_artist(db: &Database, name: &str) -> entities::artist::Model {
    let artist = entities::artist::ActiveModel {
        name: Set(name.into()),
        city: Set("San Francisco".into()),
        state: Set("CA".into()),
        phone: Set(String::new()),
        image_link: Set(format!("https://img.example/artist/{}", name.len())),
        facebook_link: Set(String::new()),
        website: Set(String::new()),
        seeking_description: Set(String::new()),
        genres: Set(Genres(vec!["Jazz".into()])),
        seeking_venue: Set(false),
        ..Default::default()
    };
    artist.insert(&db.conn).await.unwrap()
}

pub async fn insert_show(
    db: &Database,
    venue_id: i64,
    artist_id: i64,
    start_time: DateTime<Utc>,
) -> entities::show::Model {
    let show = entities::show::ActiveModel {
        venue_id: Set(venue_id),
        artist_id: Set(artist_id),
        start_time: Set(start_time),
        ..Default::default()
    };
    show.insert(&db.conn).await.unwrap()
}
