//! Read models for listing and detail pages.
//!
//! Everything here is pure: services load rows, then hand them to
//! [`partition_shows`] and [`group_by_location`] together with the `now`
//! captured once for the request. A show starting exactly at `now` is past.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::entities::{artist, venue};

pub trait Scheduled {
    fn show_id(&self) -> i64;
    fn start_time(&self) -> DateTime<Utc>;
}

pub fn is_upcoming(start_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start_time > now
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowPartition<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T> Default for ShowPartition<T> {
    fn default() -> Self {
        Self {
            past: Vec::new(),
            upcoming: Vec::new(),
        }
    }
}

/// Split shows around `now`. Each bucket is ordered by start time, then show id.
pub fn partition_shows<T, I>(shows: I, now: DateTime<Utc>) -> ShowPartition<T>
where
    T: Scheduled,
    I: IntoIterator<Item = T>,
{
    let (mut upcoming, mut past): (Vec<T>, Vec<T>) = shows
        .into_iter()
        .partition(|show| is_upcoming(show.start_time(), now));

    let by_time = |a: &T, b: &T| {
        a.start_time()
            .cmp(&b.start_time())
            .then(a.show_id().cmp(&b.show_id()))
    };
    past.sort_by(by_time);
    upcoming.sort_by(by_time);

    ShowPartition { past, upcoming }
}

/// A show on a venue page, pointing at the performing artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueShow {
    pub show_id: i64,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: DateTime<Utc>,
}

impl Scheduled for VenueShow {
    fn show_id(&self) -> i64 {
        self.show_id
    }

    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

/// A show on an artist page, pointing at the hosting venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistShow {
    pub show_id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: DateTime<Utc>,
}

impl Scheduled for ArtistShow {
    fn show_id(&self) -> i64 {
        self.show_id
    }

    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueDetail {
    pub venue: venue::Model,
    pub shows: ShowPartition<VenueShow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistDetail {
    pub artist: artist::Model,
    pub shows: ShowPartition<ArtistShow>,
}

/// Row of the `/shows` page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowListing {
    pub show_id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub upcoming_show_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Search hit for either entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub id: i64,
    pub name: String,
    pub upcoming_show_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub term: String,
    pub hits: Vec<SearchHit>,
}

impl SearchResults {
    pub fn count(&self) -> usize {
        self.hits.len()
    }
}

/// Group venues by (state, city). Groups come out ordered by state then city;
/// venues inside a group by name, then id.
pub fn group_by_location<I>(venues: I) -> Vec<LocationGroup>
where
    I: IntoIterator<Item = (String, String, VenueSummary)>,
{
    let mut groups: BTreeMap<(String, String), Vec<VenueSummary>> = BTreeMap::new();
    for (city, state, summary) in venues {
        groups.entry((state, city)).or_default().push(summary);
    }

    groups
        .into_iter()
        .map(|((state, city), mut venues)| {
            venues.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            LocationGroup {
                city,
                state,
                venues,
            }
        })
        .collect()
}
