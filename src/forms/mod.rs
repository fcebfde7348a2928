//! Submitted form payloads and their validation.
//!
//! Handlers receive the raw `application/x-www-form-urlencoded` body as
//! ordered `(name, value)` pairs. [`FormData`] groups the pairs by name, and the
//! per-entity forms read single-valued fields with [`FormData::scalar`] and
//! tag lists with [`FormData::list`]. Validation collects every failing field
//! before returning, so a form is never persisted partially valid.

pub mod artist;
pub mod choices;
pub mod show;
pub mod venue;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

pub use artist::{ArtistForm, ArtistInput};
pub use show::{ShowForm, ShowInput};
pub use venue::{VenueForm, VenueInput};

/// Value a checked checkbox submits.
pub const CHECKBOX_ON: &str = "y";

pub const REQUIRED: &str = "This field is required.";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}-[0-9]{3}-[0-9]{4}$").expect("valid phone regex"));

#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: HashMap<String, Vec<String>>,
}

impl FormData {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut fields: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in pairs {
            fields.entry(name).or_default().push(value);
        }
        Self { fields }
    }

    /// Single-valued field, trimmed. A one-element list flattens to its value;
    /// when a client repeats the field the first value wins.
    pub fn scalar(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(|value| value.trim())
    }

    /// Scalar with missing fields defaulted to the empty string.
    pub fn text(&self, name: &str) -> String {
        self.scalar(name).unwrap_or_default().to_string()
    }

    /// Multi-valued field. Never flattened, blank entries dropped.
    pub fn list(&self, name: &str) -> Vec<String> {
        self.fields
            .get(name)
            .map(|values| {
                values
                    .iter()
                    .map(|value| value.trim())
                    .filter(|value| !value.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Checkbox: on only when submitted with the value `"y"`.
    pub fn checkbox(&self, name: &str) -> bool {
        self.scalar(name) == Some(CHECKBOX_ON)
    }
}

/// Field-level validation failures, keyed by the form's field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (*field, messages.as_slice()))
    }

    /// `Ok(value)` when nothing failed.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self
            .iter()
            .map(|(field, messages)| format!("{} {}", field, messages.join("|")))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&summary)
    }
}

impl std::error::Error for ValidationErrors {}

pub(crate) fn require(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.add(field, REQUIRED);
    }
}

pub(crate) fn check_state(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.add(field, REQUIRED);
    } else if !choices::is_state(value) {
        errors.add(field, "Not a valid choice.");
    }
}

pub(crate) fn check_genres(errors: &mut ValidationErrors, field: &'static str, genres: &[String]) {
    if genres.is_empty() {
        errors.add(field, REQUIRED);
        return;
    }
    for genre in genres {
        if !choices::is_genre(genre) {
            errors.add(field, format!("'{}' is not a valid genre.", genre));
        }
    }
}

/// Optional field: only checked when filled in.
pub(crate) fn check_facebook_link(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
) {
    if value.is_empty() {
        return;
    }
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            let on_facebook = url
                .host_str()
                .is_some_and(|host| host == "facebook.com" || host.ends_with(".facebook.com"));
            if !on_facebook {
                errors.add(field, "Not a valid facebook link.");
            }
        }
        _ => errors.add(field, "Invalid URL."),
    }
}

pub(crate) fn check_phone(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    if !value.is_empty() && !PHONE_RE.is_match(value) {
        errors.add(field, "Invalid phone number.");
    }
}

#[cfg(test)]
pub(crate) fn pairs(items: &[(&str, &str)]) -> FormData {
    FormData::from_pairs(
        items
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_flattens_single_element_list() {
        let data = pairs(&[("name", "  The Musical Hop ")]);
        assert_eq!(data.scalar("name"), Some("The Musical Hop"));
        assert_eq!(data.scalar("missing"), None);
        assert_eq!(data.text("missing"), "");
    }

    #[test]
    fn test_scalar_takes_first_of_repeated_values() {
        let data = pairs(&[("city", "New York"), ("city", "Boston")]);
        assert_eq!(data.scalar("city"), Some("New York"));
    }

    #[test]
    fn test_list_keeps_single_genre_as_list() {
        let data = pairs(&[("genres", "Jazz")]);
        assert_eq!(data.list("genres"), vec!["Jazz".to_string()]);

        let data = pairs(&[("genres", "Jazz"), ("genres", ""), ("genres", "Folk")]);
        assert_eq!(data.list("genres"), vec!["Jazz".to_string(), "Folk".to_string()]);
        assert!(data.list("missing").is_empty());
    }

    #[test]
    fn test_checkbox_only_y_is_on() {
        assert!(pairs(&[("seeking_talent", "y")]).checkbox("seeking_talent"));
        assert!(!pairs(&[("seeking_talent", "on")]).checkbox("seeking_talent"));
        assert!(!pairs(&[("seeking_talent", "")]).checkbox("seeking_talent"));
        assert!(!pairs(&[]).checkbox("seeking_talent"));
    }

    #[test]
    fn test_validation_errors_collect_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("name", REQUIRED);
        errors.add("genres", "bad one");
        errors.add("genres", "bad two");

        assert!(errors.has("name"));
        assert_eq!(errors.get("genres").len(), 2);
        assert!(errors.get("city").is_empty());
        assert_eq!(
            errors.to_string(),
            "genres bad one|bad two; name This field is required."
        );
        assert!(errors.into_result(|| ()).is_err());
        assert_eq!(ValidationErrors::new().into_result(|| 7), Ok(7));
    }

    #[test]
    fn test_facebook_link_rules() {
        let mut errors = ValidationErrors::new();
        check_facebook_link(&mut errors, "facebook_link", "");
        check_facebook_link(
            &mut errors,
            "facebook_link",
            "https://www.facebook.com/TheMusicalHop",
        );
        assert!(errors.is_empty());

        check_facebook_link(
            &mut errors,
            "facebook_link",
            "https://example.com/facebook.com",
        );
        check_facebook_link(&mut errors, "facebook_link", "facebook.com/someone");
        assert_eq!(
            errors.get("facebook_link"),
            ["Not a valid facebook link.".to_string(), "Invalid URL.".to_string()]
        );
    }

    #[test]
    fn test_phone_rules() {
        let mut errors = ValidationErrors::new();
        check_phone(&mut errors, "phone", "326-123-5000");
        check_phone(&mut errors, "phone", "");
        assert!(errors.is_empty());

        check_phone(&mut errors, "phone", "3261235000");
        assert!(errors.has("phone"));
    }

    #[test]
    fn test_state_and_genre_choices() {
        let mut errors = ValidationErrors::new();
        check_state(&mut errors, "state", "CA");
        check_genres(&mut errors, "genres", &["Jazz".to_string(), "R&B".to_string()]);
        assert!(errors.is_empty());

        check_state(&mut errors, "state", "ZZ");
        check_genres(&mut errors, "genres", &["Polka".to_string()]);
        assert_eq!(errors.get("state"), ["Not a valid choice.".to_string()]);
        assert_eq!(errors.get("genres"), ["'Polka' is not a valid genre.".to_string()]);
    }
}
