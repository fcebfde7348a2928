//! Server-rendered HTML pages.
//!
//! Pages are plain `format!` templates. Every value that came from a user or
//! the database goes through [`escape`] before it is interpolated.

pub mod artist;
pub mod home;
pub mod show;
pub mod venue;

use chrono::{DateTime, Utc};

use crate::forms::ValidationErrors;
use crate::services::listing::SearchResults;

/// One-shot message shown above the page content after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    fn render(&self) -> String {
        let (class, message) = match self {
            Notice::Success(message) => ("notice success", message),
            Notice::Error(message) => ("notice error", message),
        };
        format!(r#"<div class="{}" role="alert">{}</div>"#, class, escape(message))
    }
}

pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `Tue 05, 21, 2019 9:30PM`
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%a %m, %d, %Y %-I:%M%p").to_string()
}

pub fn layout(title: &str, notice: Option<&Notice>, content: &str) -> String {
    let notice = notice.map(Notice::render).unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Fyyur</title>
    <style>
        body {{ font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 0; color: #222; }}
        nav {{ background: #2a2a2a; padding: 12px 20px; }}
        nav a {{ color: #e0e0e0; margin-right: 16px; text-decoration: none; }}
        main {{ padding: 20px; max-width: 960px; margin: 0 auto; }}
        .notice {{ padding: 10px 14px; border-radius: 4px; margin-bottom: 16px; }}
        .notice.success {{ background: #e3f6e5; border: 1px solid #7bc47f; }}
        .notice.error {{ background: #fbe4e4; border: 1px solid #d47a7a; }}
        .field {{ margin-bottom: 12px; }}
        .field label {{ display: block; font-weight: 600; }}
        .field-error {{ color: #b00020; font-size: 0.9em; }}
        .genre {{ display: inline-block; background: #eee; border-radius: 10px; padding: 2px 8px; margin-right: 4px; }}
        .show-card {{ display: inline-block; width: 220px; margin: 0 12px 12px 0; vertical-align: top; }}
        .show-card img {{ width: 100%; }}
    </style>
</head>
<body>
    <nav>
        <a href="/">Fyyur</a>
        <a href="/venues">Venues</a>
        <a href="/artists">Artists</a>
        <a href="/shows">Shows</a>
        <a href="/venues/create">Post a venue</a>
        <a href="/artists/create">Post an artist</a>
        <a href="/shows/create">Post a show</a>
    </nav>
    <main>
        {notice}
        {content}
    </main>
</body>
</html>
"#,
        title = escape(title),
        notice = notice,
        content = content,
    )
}

pub fn genre_tags(genres: &[String]) -> String {
    genres
        .iter()
        .map(|genre| format!(r#"<span class="genre">{}</span>"#, escape(genre)))
        .collect()
}

fn field_class(errors: &ValidationErrors, name: &str) -> &'static str {
    if errors.has(name) { "field has-error" } else { "field" }
}

fn field_errors(errors: &ValidationErrors, name: &str) -> String {
    errors
        .get(name)
        .iter()
        .map(|message| format!(r#"<div class="field-error">{}</div>"#, escape(message)))
        .collect()
}

pub fn text_field(name: &str, label: &str, value: &str, errors: &ValidationErrors) -> String {
    format!(
        r#"<div class="{class}">
    <label for="{name}">{label}</label>
    <input type="text" id="{name}" name="{name}" value="{value}">
    {errors}
</div>"#,
        class = field_class(errors, name),
        name = name,
        label = escape(label),
        value = escape(value),
        errors = field_errors(errors, name),
    )
}

/// `<select>` over fixed choices. `multiple` renders a multi-select list.
pub fn select_field(
    name: &str,
    label: &str,
    choices: &[&str],
    selected: &[String],
    multiple: bool,
    errors: &ValidationErrors,
) -> String {
    let options: String = choices
        .iter()
        .map(|choice| {
            let is_selected = selected.iter().any(|value| value == choice);
            format!(
                r#"<option value="{value}"{selected}>{value}</option>"#,
                value = escape(choice),
                selected = if is_selected { " selected" } else { "" },
            )
        })
        .collect();

    format!(
        r#"<div class="{class}">
    <label for="{name}">{label}</label>
    <select id="{name}" name="{name}"{multiple}>{options}</select>
    {errors}
</div>"#,
        class = field_class(errors, name),
        name = name,
        label = escape(label),
        multiple = if multiple { " multiple" } else { "" },
        options = options,
        errors = field_errors(errors, name),
    )
}

pub fn checkbox_field(name: &str, label: &str, checked: bool) -> String {
    format!(
        r#"<div class="field">
    <label><input type="checkbox" name="{name}" value="{on}"{checked}> {label}</label>
</div>"#,
        name = name,
        on = crate::forms::CHECKBOX_ON,
        checked = if checked { " checked" } else { "" },
        label = escape(label),
    )
}

/// Result list for `/venues/search` and `/artists/search`. `base` is the
/// listing path, e.g. `/venues`.
pub fn search_results(base: &str, results: &SearchResults) -> String {
    let items: String = results
        .hits
        .iter()
        .map(|hit| {
            format!(
                r#"<li><a href="{base}/{id}">{name}</a> <small>{count} upcoming show(s)</small></li>"#,
                base = base,
                id = hit.id,
                name = escape(&hit.name),
                count = hit.upcoming_show_count,
            )
        })
        .collect();

    format!(
        r#"<h1>Number of search results for "{term}": {count}</h1>
<ul class="search-results">{items}</ul>"#,
        term = escape(&results.term),
        count = results.count(),
        items = items,
    )
}
