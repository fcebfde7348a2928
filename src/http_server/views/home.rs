use super::{Notice, escape, layout};

pub fn home(notice: Option<&Notice>) -> String {
    layout(
        "Home",
        notice,
        r#"<h1>Fyyur</h1>
<p>Find venues, discover artists and book shows.</p>
<form method="post" action="/venues/search"><input type="search" name="search_term" placeholder="Find a venue"></form>
<form method="post" action="/artists/search"><input type="search" name="search_term" placeholder="Find an artist"></form>"#,
    )
}

pub fn not_found() -> String {
    layout(
        "Not Found",
        None,
        r#"<h1>404</h1><p>Not Found</p><p><a href="/">Back home</a></p>"#,
    )
}

pub fn conflict(message: &str) -> String {
    layout(
        "Conflict",
        None,
        &format!("<h1>409</h1><p>{}</p>", escape(message)),
    )
}

pub fn server_error() -> String {
    layout(
        "Server Error",
        None,
        "<h1>500</h1><p>Something went wrong. Please try again later.</p>",
    )
}
