use super::{
    checkbox_field, escape, format_datetime, genre_tags, layout, select_field, text_field,
};
use crate::entities::artist;
use crate::forms::{ArtistForm, ValidationErrors, choices};
use crate::services::listing::{ArtistDetail, ArtistShow};

pub fn index(artists: &[artist::Model]) -> String {
    let items: String = artists
        .iter()
        .map(|artist| {
            format!(
                r#"<li><a href="/artists/{}">{}</a></li>"#,
                artist.id,
                escape(&artist.name)
            )
        })
        .collect();

    layout(
        "Artists",
        None,
        &format!("<h1>Artists</h1>\n<ul>{}</ul>", items),
    )
}

fn show_cards(heading: &str, shows: &[ArtistShow]) -> String {
    let cards: String = shows
        .iter()
        .map(|show| {
            format!(
                r#"<div class="show-card">
    <img src="{image}" alt="Venue image">
    <h5><a href="/venues/{venue_id}">{venue_name}</a></h5>
    <h6>{start}</h6>
</div>"#,
                image = escape(&show.venue_image_link),
                venue_id = show.venue_id,
                venue_name = escape(&show.venue_name),
                start = format_datetime(show.start_time),
            )
        })
        .collect();
    format!("<section>\n<h2>{} {}</h2>\n{}\n</section>", shows.len(), heading, cards)
}

pub fn detail(detail: &ArtistDetail) -> String {
    let artist = &detail.artist;
    let seeking = if artist.seeking_venue {
        format!(
            "<p><strong>Currently seeking performance venues</strong></p><p>{}</p>",
            escape(&artist.seeking_description)
        )
    } else {
        "<p>Not currently seeking performance venues</p>".to_string()
    };

    let content = format!(
        r#"<h1>{name}</h1>
<p class="subtitle">ID: {id}</p>
<div class="genres">{genres}</div>
<p>{city}, {state}</p>
<p>{phone}</p>
<p><a href="{website}">{website}</a></p>
<p><a href="{facebook}">{facebook}</a></p>
{seeking}
<img src="{image}" alt="Artist image">
<p><a href="/artists/{id}/edit">Edit</a></p>
{upcoming}
{past}"#,
        name = escape(&artist.name),
        id = artist.id,
        genres = genre_tags(&artist.genres.0),
        city = escape(&artist.city),
        state = escape(&artist.state),
        phone = escape(&artist.phone),
        website = escape(&artist.website),
        facebook = escape(&artist.facebook_link),
        seeking = seeking,
        image = escape(&artist.image_link),
        upcoming = show_cards("Upcoming Shows", &detail.shows.upcoming),
        past = show_cards("Past Shows", &detail.shows.past),
    );

    layout(&artist.name, None, &content)
}

pub fn form(heading: &str, action: &str, form: &ArtistForm, errors: &ValidationErrors) -> String {
    let fields = [
        text_field("name", "Name", &form.name, errors),
        text_field("city", "City", &form.city, errors),
        select_field(
            "state",
            "State",
            choices::STATES,
            std::slice::from_ref(&form.state),
            false,
            errors,
        ),
        text_field("phone", "Phone", &form.phone, errors),
        text_field("image_link", "Image Link", &form.image_link, errors),
        select_field("genres", "Genres", choices::GENRES, &form.genres, true, errors),
        text_field("facebook_link", "Facebook Link", &form.facebook_link, errors),
        text_field("website_link", "Website", &form.website_link, errors),
        checkbox_field("seeking_venue", "Looking for Venues", form.seeking_venue),
        text_field(
            "seeking_description",
            "Seeking Description",
            &form.seeking_description,
            errors,
        ),
    ]
    .concat();

    layout(
        heading,
        None,
        &format!(
            r#"<h1>{heading}</h1>
<form method="post" action="{action}">
{fields}
<input type="submit" value="Save artist">
</form>"#,
            heading = escape(heading),
            action = escape(action),
            fields = fields,
        ),
    )
}
