//! Demo listings for a fresh database.

use color_eyre::eyre::{Context, OptionExt, Result};
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, PaginatorTrait, Set, TransactionTrait};

use crate::database::Database;
use crate::entities::{Genres, artist, show, venue};
use crate::forms::show::parse_start_time;

struct SeedVenue {
    name: &'static str,
    city: &'static str,
    state: &'static str,
    address: &'static str,
    phone: &'static str,
    image_link: &'static str,
    facebook_link: &'static str,
    website: &'static str,
    description: &'static str,
    genres: &'static [&'static str],
    seeking_talent: bool,
}

struct SeedArtist {
    name: &'static str,
    city: &'static str,
    state: &'static str,
    phone: &'static str,
    image_link: &'static str,
    facebook_link: &'static str,
    website: &'static str,
    seeking_description: &'static str,
    genres: &'static [&'static str],
    seeking_venue: bool,
}

const VENUES: &[SeedVenue] = &[
    SeedVenue {
        name: "The Musical Hop",
        city: "San Francisco",
        state: "CA",
        address: "1015 Folsom Street",
        phone: "123-123-1234",
        image_link: "https://images.unsplash.com/photo-1543900694-133f37abaaa5?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=400&q=60",
        facebook_link: "https://www.facebook.com/TheMusicalHop",
        website: "https://www.themusicalhop.com",
        description: "We are on the lookout for a local artist to play every two weeks. Please call us.",
        genres: &["Jazz", "Reggae", "Swing", "Classical", "Folk"],
        seeking_talent: true,
    },
    SeedVenue {
        name: "The Dueling Pianos Bar",
        city: "New York",
        state: "NY",
        address: "335 Delancey Street",
        phone: "914-003-1132",
        image_link: "https://images.unsplash.com/photo-1497032205916-ac775f0649ae?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=750&q=80",
        facebook_link: "https://www.facebook.com/theduelingpianos",
        website: "https://www.theduelingpianos.com",
        description: "",
        genres: &["Classical", "R&B", "Hip-Hop"],
        seeking_talent: false,
    },
    SeedVenue {
        name: "Park Square Live Music & Coffee",
        city: "San Francisco",
        state: "CA",
        address: "34 Whiskey Moore Ave",
        phone: "415-000-1234",
        image_link: "https://images.unsplash.com/photo-1485686531765-ba63b07845a7?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=747&q=80",
        facebook_link: "https://www.facebook.com/ParkSquareLiveMusicAndCoffee",
        website: "https://www.parksquarelivemusicandcoffee.com",
        description: "",
        genres: &["Rock n Roll", "Jazz", "Classical", "Folk"],
        seeking_talent: false,
    },
];

const ARTISTS: &[SeedArtist] = &[
    SeedArtist {
        name: "Guns N Petals",
        city: "San Francisco",
        state: "CA",
        phone: "326-123-5000",
        image_link: "https://images.unsplash.com/photo-1549213783-8284d0336c4f?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=300&q=80",
        facebook_link: "https://www.facebook.com/GunsNPetals",
        website: "https://www.gunsnpetalsband.com",
        seeking_description: "Looking for shows to perform at in the San Francisco Bay Area!",
        genres: &["Rock n Roll"],
        seeking_venue: true,
    },
    SeedArtist {
        name: "Matt Quevedo",
        city: "New York",
        state: "NY",
        phone: "300-400-5000",
        image_link: "https://images.unsplash.com/photo-1495223153807-b916f75de8c5?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=334&q=80",
        facebook_link: "https://www.facebook.com/mattquevedo923251523",
        website: "",
        seeking_description: "",
        genres: &["Jazz"],
        seeking_venue: false,
    },
    SeedArtist {
        name: "The Wild Sax Band",
        city: "San Francisco",
        state: "CA",
        phone: "432-325-5432",
        image_link: "https://images.unsplash.com/photo-1558369981-f9ca78462e61?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=794&q=80",
        facebook_link: "",
        website: "",
        seeking_description: "",
        genres: &["Jazz", "Classical"],
        seeking_venue: false,
    },
];

/// (venue index, artist index, start time)
const SHOWS: &[(usize, usize, &str)] = &[
    (0, 0, "2019-05-21 21:30:00"),
    (2, 1, "2019-06-15 23:00:00"),
    (2, 2, "2035-04-01 20:00:00"),
    (2, 2, "2035-04-08 20:00:00"),
    (2, 2, "2035-04-18 20:00:00"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded {
        venues: usize,
        artists: usize,
        shows: usize,
    },
    /// The database already had listings; nothing was written.
    Skipped,
}

fn seed_genres(genres: &[&str]) -> Genres {
    Genres(genres.iter().map(|genre| genre.to_string()).collect())
}

/// Load the demo listings when the database has no venues, artists or shows.
pub async fn seed(db: &Database) -> Result<SeedOutcome> {
    let existing = venue::Entity::find().count(&db.conn).await?
        + artist::Entity::find().count(&db.conn).await?
        + show::Entity::find().count(&db.conn).await?;
    if existing > 0 {
        log::info!("Database already has {} listing(s), not seeding", existing);
        return Ok(SeedOutcome::Skipped);
    }

    let mut start_times = Vec::with_capacity(SHOWS.len());
    for (_, _, start_time) in SHOWS {
        start_times
            .push(parse_start_time(start_time).ok_or_eyre("Invalid seed show start time")?);
    }

    db.conn
        .transaction::<_, (), DbErr>(move |txn| {
            Box::pin(async move {
                let mut venue_ids = Vec::with_capacity(VENUES.len());
                for seed in VENUES {
                    let model = venue::ActiveModel {
                        name: Set(seed.name.into()),
                        city: Set(seed.city.into()),
                        state: Set(seed.state.into()),
                        address: Set(seed.address.into()),
                        phone: Set(seed.phone.into()),
                        image_link: Set(seed.image_link.into()),
                        facebook_link: Set(seed.facebook_link.into()),
                        website: Set(seed.website.into()),
                        description: Set(seed.description.into()),
                        genres: Set(seed_genres(seed.genres)),
                        seeking_talent: Set(seed.seeking_talent),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    venue_ids.push(model.id);
                }

                let mut artist_ids = Vec::with_capacity(ARTISTS.len());
                for seed in ARTISTS {
                    let model = artist::ActiveModel {
                        name: Set(seed.name.into()),
                        city: Set(seed.city.into()),
                        state: Set(seed.state.into()),
                        phone: Set(seed.phone.into()),
                        image_link: Set(seed.image_link.into()),
                        facebook_link: Set(seed.facebook_link.into()),
                        website: Set(seed.website.into()),
                        seeking_description: Set(seed.seeking_description.into()),
                        genres: Set(seed_genres(seed.genres)),
                        seeking_venue: Set(seed.seeking_venue),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    artist_ids.push(model.id);
                }

                for ((venue_index, artist_index, _), start_time) in SHOWS.iter().zip(start_times) {
                    show::ActiveModel {
                        venue_id: Set(venue_ids[*venue_index]),
                        artist_id: Set(artist_ids[*artist_index]),
                        start_time: Set(start_time),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                }

                Ok(())
            })
        })
        .await
        .wrap_err("Failed to seed demo listings")?;

    let outcome = SeedOutcome::Seeded {
        venues: VENUES.len(),
        artists: ARTISTS.len(),
        shows: SHOWS.len(),
    };
    log::info!("Seeded demo listings: {:?}", outcome);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{ArtistService, VenueService};
    use crate::test_utils::{at, insert_artist, test_db};

    #[tokio::test]
    async fn test_seed_empty_database() {
        let db = test_db().await;

        let outcome = seed(&db).await.unwrap();

        assert_eq!(
            outcome,
            SeedOutcome::Seeded {
                venues: 3,
                artists: 3,
                shows: 5,
            }
        );
        let now = at(2026, 6, 1, 12, 0);
        let groups = VenueService::new(db.clone())
            .list_by_location(now)
            .await
            .unwrap();
        assert_eq!(groups.len(), 2);
        let park = groups[0]
            .venues
            .iter()
            .find(|venue| venue.name == "Park Square Live Music & Coffee")
            .unwrap();
        assert_eq!(park.upcoming_show_count, 3);

        let hits = ArtistService::new(db).search("Sax", now).await.unwrap();
        assert_eq!(hits.hits[0].upcoming_show_count, 3);
    }

    #[tokio::test]
    async fn test_seed_skips_populated_database() {
        let db = test_db().await;
        insert_artist(&db, "Guns N Petals").await;

        assert_eq!(seed(&db).await.unwrap(), SeedOutcome::Skipped);
        assert_eq!(venue::Entity::find().count(&db.conn).await.unwrap(), 0);
    }
}
