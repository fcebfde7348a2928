use super::{
    checkbox_field, escape, format_datetime, genre_tags, layout, select_field, text_field,
};
use crate::forms::{ValidationErrors, VenueForm, choices};
use crate::services::listing::{LocationGroup, ShowPartition, VenueDetail, VenueShow};

pub fn index(groups: &[LocationGroup]) -> String {
    let content: String = groups
        .iter()
        .map(|group| {
            let venues: String = group
                .venues
                .iter()
                .map(|venue| {
                    format!(
                        r#"<li><a href="/venues/{id}">{name}</a> <small>{count} upcoming show(s)</small></li>"#,
                        id = venue.id,
                        name = escape(&venue.name),
                        count = venue.upcoming_show_count,
                    )
                })
                .collect();
            format!(
                "<h3>{}, {}</h3>\n<ul>{}</ul>\n",
                escape(&group.city),
                escape(&group.state),
                venues
            )
        })
        .collect();

    layout("Venues", None, &format!("<h1>Venues</h1>\n{}", content))
}

fn show_cards(heading: &str, shows: &[VenueShow]) -> String {
    let cards: String = shows
        .iter()
        .map(|show| {
            format!(
                r#"<div class="show-card">
    <img src="{image}" alt="Artist image">
    <h5><a href="/artists/{artist_id}">{artist_name}</a></h5>
    <h6>{start}</h6>
</div>"#,
                image = escape(&show.artist_image_link),
                artist_id = show.artist_id,
                artist_name = escape(&show.artist_name),
                start = format_datetime(show.start_time),
            )
        })
        .collect();
    format!(
        "<section>\n<h2>{} {}</h2>\n{}\n</section>",
        shows.len(),
        heading,
        cards
    )
}

fn partition_sections(shows: &ShowPartition<VenueShow>) -> String {
    format!(
        "{}\n{}",
        show_cards("Upcoming Shows", &shows.upcoming),
        show_cards("Past Shows", &shows.past)
    )
}

pub fn detail(detail: &VenueDetail) -> String {
    let venue = &detail.venue;
    let seeking = if venue.seeking_talent {
        format!(
            "<p><strong>Currently seeking talent</strong></p><p>{}</p>",
            escape(&venue.description)
        )
    } else {
        "<p>Not currently seeking talent</p>".to_string()
    };

    let content = format!(
        r#"<h1>{name}</h1>
<p class="subtitle">ID: {id}</p>
<div class="genres">{genres}</div>
<p>{address}, {city}, {state}</p>
<p>{phone}</p>
<p><a href="{website}">{website}</a></p>
<p><a href="{facebook}">{facebook}</a></p>
{seeking}
<img src="{image}" alt="Venue image">
<p><a href="/venues/{id}/edit">Edit</a></p>
{shows}"#,
        name = escape(&venue.name),
        id = venue.id,
        genres = genre_tags(&venue.genres.0),
        address = escape(&venue.address),
        city = escape(&venue.city),
        state = escape(&venue.state),
        phone = escape(&venue.phone),
        website = escape(&venue.website),
        facebook = escape(&venue.facebook_link),
        seeking = seeking,
        image = escape(&venue.image_link),
        shows = partition_sections(&detail.shows),
    );

    layout(&venue.name, None, &content)
}

/// New and edit form. `action` is the submission path.
pub fn form(heading: &str, action: &str, form: &VenueForm, errors: &ValidationErrors) -> String {
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
        text_field("address", "Address", &form.address, errors),
        text_field("phone", "Phone", &form.phone, errors),
        text_field("image_link", "Image Link", &form.image_link, errors),
        select_field("genres", "Genres", choices::GENRES, &form.genres, true, errors),
        text_field("facebook_link", "Facebook Link", &form.facebook_link, errors),
        text_field("website_link", "Website", &form.website_link, errors),
        checkbox_field("seeking_talent", "Looking for Talent", form.seeking_talent),
        text_field(
            "seeking_description",
            "Seeking Description",
            &form.seeking_description,
            errors,
        ),
    ]
    .concat();

    let content = format!(
        r#"<h1>{heading}</h1>
<form method="post" action="{action}">
{fields}
<input type="submit" value="Save venue">
</form>"#,
        heading = escape(heading),
        action = escape(action),
        fields = fields,
    );

    layout(heading, None, &content)
}
