use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set, TransactionTrait,
};

use super::listing::{
    LocationGroup, SearchHit, SearchResults, VenueDetail, VenueShow, VenueSummary,
    group_by_location, partition_shows,
};
use super::{ServiceError, ServiceResult, query, show::upcoming_counts};
use crate::database::Database;
use crate::entities::{Genres, artist, show, venue};
use crate::forms::VenueInput;

pub struct VenueService {
    db: Arc<Database>,
}

impl VenueService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Every venue grouped by location, each with its upcoming show count.
    pub async fn list_by_location(&self, now: DateTime<Utc>) -> ServiceResult<Vec<LocationGroup>> {
        let venues = venue::Entity::find().all(&self.db.conn).await?;
        let counts = upcoming_counts(&self.db.conn, now, show::Column::VenueId).await?;

        Ok(group_by_location(venues.into_iter().map(|venue| {
            let upcoming_show_count = counts.get(&venue.id).copied().unwrap_or(0);
            (
                venue.city,
                venue.state,
                VenueSummary {
                    id: venue.id,
                    name: venue.name,
                    upcoming_show_count,
                },
            )
        })))
    }

    pub async fn search(&self, term: &str, now: DateTime<Utc>) -> ServiceResult<SearchResults> {
        let venues = query::search_names::<venue::Entity, _>(
            &self.db.conn,
            venue::Column::Id,
            venue::Column::Name,
            term,
        )
        .await?;
        let counts = upcoming_counts(&self.db.conn, now, show::Column::VenueId).await?;

        log::debug!("Venue search {:?} matched {} venue(s)", term, venues.len());

        Ok(SearchResults {
            term: term.to_string(),
            hits: venues
                .into_iter()
                .map(|(id, name)| SearchHit {
                    upcoming_show_count: counts.get(&id).copied().unwrap_or(0),
                    id,
                    name,
                })
                .collect(),
        })
    }

    pub async fn get(&self, id: i64) -> ServiceResult<venue::Model> {
        venue::Entity::find_by_id(id)
            .one(&self.db.conn)
            .await?
            .ok_or(ServiceError::not_found("venue", id))
    }

    /// The venue with its shows split into past and upcoming around `now`.
    pub async fn detail(&self, id: i64, now: DateTime<Utc>) -> ServiceResult<VenueDetail> {
        let venue = self.get(id).await?;

        let rows = show::Entity::find()
            .filter(show::Column::VenueId.eq(id))
            .find_also_related(artist::Entity)
            .all(&self.db.conn)
            .await?;

        let shows = rows.into_iter().filter_map(|(show, artist)| match artist {
            Some(artist) => Some(VenueShow {
                show_id: show.id,
                artist_id: artist.id,
                artist_name: artist.name,
                artist_image_link: artist.image_link,
                start_time: show.start_time,
            }),
            None => {
                log::warn!("Show {} references missing artist {}", show.id, show.artist_id);
                None
            }
        });

        Ok(VenueDetail {
            venue,
            shows: partition_shows(shows, now),
        })
    }

    pub async fn create(&self, input: VenueInput) -> ServiceResult<venue::Model> {
        let mut venue: venue::ActiveModel = ActiveModelTrait::default();
        apply_input(&mut venue, input);

        let model = self
            .db
            .conn
            .transaction::<_, venue::Model, ServiceError>(move |txn| {
                Box::pin(async move { Ok(venue.insert(txn).await?) })
            })
            .await?;

        log::info!("Created venue {} ({})", model.id, model.name);
        Ok(model)
    }

    /// Overwrite every field of an existing venue.
    pub async fn update(&self, id: i64, input: VenueInput) -> ServiceResult<venue::Model> {
        let model = self
            .db
            .conn
            .transaction::<_, venue::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let existing = venue::Entity::find_by_id(id)
                        .one(txn)
                        .await?
                        .ok_or(ServiceError::not_found("venue", id))?;

                    let mut venue: venue::ActiveModel = existing.into();
                    apply_input(&mut venue, input);
                    Ok(venue.update(txn).await?)
                })
            })
            .await?;

        log::info!("Updated venue {}", model.id);
        Ok(model)
    }

    /// Delete a venue. Refused while any show still references it.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.db
            .conn
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    venue::Entity::find_by_id(id)
                        .one(txn)
                        .await?
                        .ok_or(ServiceError::not_found("venue", id))?;

                    let references = show::Entity::find()
                        .filter(show::Column::VenueId.eq(id))
                        .count(txn)
                        .await?;
                    if references > 0 {
                        return Err(ServiceError::InUse {
                            entity: "venue",
                            id,
                            references,
                        });
                    }

                    venue::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(())
                })
            })
            .await?;

        log::info!("Deleted venue {}", id);
        Ok(())
    }
}

fn apply_input(venue: &mut venue::ActiveModel, input: VenueInput) {
    venue.name = Set(input.name);
    venue.city = Set(input.city);
    venue.state = Set(input.state);
    venue.address = Set(input.address);
    venue.phone = Set(input.phone);
    venue.image_link = Set(input.image_link);
    venue.facebook_link = Set(input.facebook_link);
    venue.website = Set(input.website);
    venue.description = Set(input.description);
    venue.genres = Set(Genres(input.genres));
    venue.seeking_talent = Set(input.seeking_talent);
}
