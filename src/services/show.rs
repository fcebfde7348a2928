use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
    sea_query::{Expr, Func},
};

use super::listing::ShowListing;
use super::{ServiceError, ServiceResult};
use crate::database::Database;
use crate::entities::{artist, show, venue};
use crate::forms::ShowInput;

/// Upcoming shows per owner. `owner` is the venue or artist id column.
pub(crate) async fn upcoming_counts<C>(
    conn: &C,
    now: DateTime<Utc>,
    owner: show::Column,
) -> Result<HashMap<i64, usize>, DbErr>
where
    C: ConnectionTrait,
{
    let rows: Vec<(i64, i64)> = show::Entity::find()
        .select_only()
        .column(owner)
        .column_as(Expr::from(Func::count(Expr::col(show::Column::Id))), "upcoming")
        .filter(show::Column::StartTime.gt(now))
        .group_by(owner)
        .into_tuple()
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(id, count)| (id, count as usize))
        .collect())
}

pub struct ShowService {
    db: Arc<Database>,
}

impl ShowService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Every show with its venue and artist, ordered by start time.
    pub async fn list(&self) -> ServiceResult<Vec<ShowListing>> {
        let shows = show::Entity::find()
            .order_by_asc(show::Column::StartTime)
            .order_by_asc(show::Column::Id)
            .all(&self.db.conn)
            .await?;

        let venues: HashMap<i64, venue::Model> = venue::Entity::find()
            .all(&self.db.conn)
            .await?
            .into_iter()
            .map(|venue| (venue.id, venue))
            .collect();
        let artists: HashMap<i64, artist::Model> = artist::Entity::find()
            .all(&self.db.conn)
            .await?
            .into_iter()
            .map(|artist| (artist.id, artist))
            .collect();

        let listings = shows
            .into_iter()
            .filter_map(|show| {
                let (Some(venue), Some(artist)) =
                    (venues.get(&show.venue_id), artists.get(&show.artist_id))
                else {
                    log::warn!("Skipping show {} with a dangling reference", show.id);
                    return None;
                };
                Some(ShowListing {
                    show_id: show.id,
                    venue_id: venue.id,
                    venue_name: venue.name.clone(),
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: show.start_time,
                })
            })
            .collect();

        Ok(listings)
    }

    /// Book an artist at a venue. Both must exist when the transaction commits.
    pub async fn create(&self, input: ShowInput) -> ServiceResult<show::Model> {
        let model = self
            .db
            .conn
            .transaction::<_, show::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    if venue::Entity::find_by_id(input.venue_id)
                        .one(txn)
                        .await?
                        .is_none()
                    {
                        return Err(ServiceError::Integrity(format!(
                            "venue {} does not exist",
                            input.venue_id
                        )));
                    }
                    if artist::Entity::find_by_id(input.artist_id)
                        .one(txn)
                        .await?
                        .is_none()
                    {
                        return Err(ServiceError::Integrity(format!(
                            "artist {} does not exist",
                            input.artist_id
                        )));
                    }

                    let show = show::ActiveModel {
                        venue_id: Set(input.venue_id),
                        artist_id: Set(input.artist_id),
                        start_time: Set(input.start_time),
                        ..Default::default()
                    };
                    Ok(show.insert(txn).await?)
                })
            })
            .await?;

        log::info!(
            "Created show {} (artist {} at venue {})",
            model.id,
            model.artist_id,
            model.venue_id
        );
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{at, insert_artist, insert_show, insert_venue, test_db};
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn test_list_joins_names_in_start_order() {
        let db = test_db().await;
        let hop = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let park = insert_venue(&db, "Park Square", "San Francisco", "CA").await;
        let petals = insert_artist(&db, "Guns N Petals").await;
        let sax = insert_artist(&db, "The Wild Sax Band").await;
        insert_show(&db, park.id, sax.id, at(2035, 4, 1, 20, 0)).await;
        insert_show(&db, hop.id, petals.id, at(2019, 5, 21, 21, 30)).await;

        let listings = ShowService::new(db).list().await.unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].venue_name, "The Musical Hop");
        assert_eq!(listings[0].artist_name, "Guns N Petals");
        assert_eq!(listings[1].venue_name, "Park Square");
        assert_eq!(listings[1].artist_id, sax.id);
    }

    #[tokio::test]
    async fn test_create_show() {
        let db = test_db().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = insert_artist(&db, "Guns N Petals").await;

        let show = ShowService::new(db)
            .create(ShowInput {
                artist_id: artist.id,
                venue_id: venue.id,
                start_time: at(2035, 4, 1, 20, 0),
            })
            .await
            .unwrap();

        assert_eq!(show.venue_id, venue.id);
        assert_eq!(show.start_time, at(2035, 4, 1, 20, 0));
    }

    #[tokio::test]
    async fn test_create_show_with_unknown_artist_is_integrity_error() {
        let db = test_db().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;

        let err = ShowService::new(db.clone())
            .create(ShowInput {
                artist_id: 999,
                venue_id: venue.id,
                start_time: at(2035, 4, 1, 20, 0),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Integrity(_)));
        assert_eq!(show::Entity::find().count(&db.conn).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_foreign_key_violation_maps_to_integrity() {
        let db = test_db().await;
        let artist = insert_artist(&db, "Guns N Petals").await;

        let orphan = show::ActiveModel {
            venue_id: Set(404),
            artist_id: Set(artist.id),
            start_time: Set(at(2035, 4, 1, 20, 0)),
            ..Default::default()
        };
        let err: ServiceError = orphan.insert(&db.conn).await.unwrap_err().into();

        assert!(matches!(err, ServiceError::Integrity(_)));
    }

    #[tokio::test]
    async fn test_upcoming_counts_per_artist() {
        let db = test_db().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let petals = insert_artist(&db, "Guns N Petals").await;
        let sax = insert_artist(&db, "The Wild Sax Band").await;
        let now = at(2026, 6, 1, 12, 0);
        insert_show(&db, venue.id, petals.id, at(2035, 4, 1, 20, 0)).await;
        insert_show(&db, venue.id, petals.id, at(2035, 4, 8, 20, 0)).await;
        insert_show(&db, venue.id, sax.id, now).await;

        let counts = upcoming_counts(&db.conn, now, show::Column::ArtistId)
            .await
            .unwrap();

        assert_eq!(counts.get(&petals.id), Some(&2));
        assert_eq!(counts.get(&sax.id), None);

        let by_venue = upcoming_counts(&db.conn, now, show::Column::VenueId)
            .await
            .unwrap();
        assert_eq!(by_venue, HashMap::from([(venue.id, 2)]));
    }
}
