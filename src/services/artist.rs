use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::listing::{ArtistDetail, ArtistShow, SearchHit, SearchResults, partition_shows};
use super::{ServiceError, ServiceResult, query, show::upcoming_counts};
use crate::database::Database;
use crate::entities::{Genres, artist, show, venue};
use crate::forms::ArtistInput;

pub struct ArtistService {
    db: Arc<Database>,
}

impl ArtistService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// All artists by name.
    pub async fn list(&self) -> ServiceResult<Vec<artist::Model>> {
        let artists = artist::Entity::find()
            .order_by_asc(artist::Column::Name)
            .order_by_asc(artist::Column::Id)
            .all(&self.db.conn)
            .await?;
        Ok(artists)
    }

    pub async fn search(&self, term: &str, now: DateTime<Utc>) -> ServiceResult<SearchResults> {
        let artists = query::search_names::<artist::Entity, _>(
            &self.db.conn,
            artist::Column::Id,
            artist::Column::Name,
            term,
        )
        .await?;
        let counts = upcoming_counts(&self.db.conn, now, show::Column::ArtistId).await?;

        log::debug!("Artist search {:?} matched {} artist(s)", term, artists.len());

        Ok(SearchResults {
            term: term.to_string(),
            hits: artists
                .into_iter()
                .map(|(id, name)| SearchHit {
                    upcoming_show_count: counts.get(&id).copied().unwrap_or(0),
                    id,
                    name,
                })
                .collect(),
        })
    }

    pub async fn get(&self, id: i64) -> ServiceResult<artist::Model> {
        artist::Entity::find_by_id(id)
            .one(&self.db.conn)
            .await?
            .ok_or(ServiceError::not_found("artist", id))
    }

    pub async fn detail(&self, id: i64, now: DateTime<Utc>) -> ServiceResult<ArtistDetail> {
        let artist = self.get(id).await?;

        let rows = show::Entity::find()
            .filter(show::Column::ArtistId.eq(id))
            .find_also_related(venue::Entity)
            .all(&self.db.conn)
            .await?;

        let shows = rows.into_iter().filter_map(|(show, venue)| {
            let Some(venue) = venue else {
                log::warn!("Show {} references missing venue {}", show.id, show.venue_id);
                return None;
            };
            Some(ArtistShow {
                show_id: show.id,
                venue_id: venue.id,
                venue_name: venue.name,
                venue_image_link: venue.image_link,
                start_time: show.start_time,
            })
        });

        Ok(ArtistDetail {
            artist,
            shows: partition_shows(shows, now),
        })
    }

    pub async fn create(&self, input: ArtistInput) -> ServiceResult<artist::Model> {
        let mut artist: artist::ActiveModel = ActiveModelTrait::default();
        apply_input(&mut artist, input);

        let model = self
            .db
            .conn
            .transaction::<_, artist::Model, ServiceError>(move |txn| {
                Box::pin(async move { Ok(artist.insert(txn).await?) })
            })
            .await?;

        log::info!("Created artist {} ({})", model.id, model.name);
        Ok(model)
    }

    pub async fn update(&self, id: i64, input: ArtistInput) -> ServiceResult<artist::Model> {
        let model = self
            .db
            .conn
            .transaction::<_, artist::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let existing = artist::Entity::find_by_id(id)
                        .one(txn)
                        .await?
                        .ok_or(ServiceError::not_found("artist", id))?;

                    let mut artist: artist::ActiveModel = existing.into();
                    apply_input(&mut artist, input);
                    Ok(artist.update(txn).await?)
                })
            })
            .await?;

        log::info!("Updated artist {}", model.id);
        Ok(model)
    }
}

fn apply_input(artist: &mut artist::ActiveModel, input: ArtistInput) {
    artist.name = Set(input.name);
    artist.city = Set(input.city);
    artist.state = Set(input.state);
    artist.phone = Set(input.phone);
    artist.image_link = Set(input.image_link);
    artist.facebook_link = Set(input.facebook_link);
    artist.website = Set(input.website);
    artist.seeking_description = Set(input.seeking_description);
    artist.genres = Set(Genres(input.genres));
    artist.seeking_venue = Set(input.seeking_venue);
}
