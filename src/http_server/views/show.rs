use super::{escape, format_datetime, layout, text_field};
use crate::forms::{ShowForm, ValidationErrors};
use crate::services::listing::ShowListing;

pub fn index(shows: &[ShowListing]) -> String {
    let cards: String = shows
        .iter()
        .map(|show| {
            format!(
                r#"<div class="show-card">
    <img src="{image}" alt="Artist image">
    <h4>{start}</h4>
    <h5><a href="/artists/{artist_id}">{artist_name}</a></h5>
    <p>playing at</p>
    <h5><a href="/venues/{venue_id}">{venue_name}</a></h5>
</div>"#,
                image = escape(&show.artist_image_link),
                start = format_datetime(show.start_time),
                artist_id = show.artist_id,
                artist_name = escape(&show.artist_name),
                venue_id = show.venue_id,
                venue_name = escape(&show.venue_name),
            )
        })
        .collect();

    layout("Shows", None, &format!("<h1>Shows</h1>\n{}", cards))
}

pub fn form(form: &ShowForm, errors: &ValidationErrors) -> String {
    let fields = [
        text_field("artist_id", "Artist ID", &form.artist_id, errors),
        text_field("venue_id", "Venue ID", &form.venue_id, errors),
        text_field("start_time", "Start Time", &form.start_time, errors),
    ]
    .concat();

    layout(
        "List a new show",
        None,
        &format!(
            r#"<h1>List a new show</h1>
<form method="post" action="/shows/create">
{}
<input type="submit" value="Create Show">
</form>"#,
            fields
        ),
    )
}
