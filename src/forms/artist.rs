use super::{FormData, ValidationErrors};
use crate::entities::artist;

/// The artist form; `website_link` is stored as `website`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_description: String,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
}

impl ArtistForm {
    pub fn from_form_data(data: &FormData) -> Self {
        Self {
            name: data.text("name"),
            city: data.text("city"),
            state: data.text("state"),
            phone: data.text("phone"),
            image_link: data.text("image_link"),
            genres: data.list("genres"),
            facebook_link: data.text("facebook_link"),
            website_link: data.text("website_link"),
            seeking_venue: data.checkbox("seeking_venue"),
            seeking_description: data.text("seeking_description"),
        }
    }

    pub fn from_model(model: &artist::Model) -> Self {
        Self {
            name: model.name.clone(),
            city: model.city.clone(),
            state: model.state.clone(),
            phone: model.phone.clone(),
            image_link: model.image_link.clone(),
            genres: model.genres.0.clone(),
            facebook_link: model.facebook_link.clone(),
            website_link: model.website.clone(),
            seeking_venue: model.seeking_venue,
            seeking_description: model.seeking_description.clone(),
        }
    }

    pub fn validate(&self) -> Result<ArtistInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        super::require(&mut errors, "name", &self.name);
        super::require(&mut errors, "city", &self.city);
        super::check_state(&mut errors, "state", &self.state);
        super::check_phone(&mut errors, "phone", &self.phone);
        super::check_genres(&mut errors, "genres", &self.genres);
        super::check_facebook_link(&mut errors, "facebook_link", &self.facebook_link);

        errors.into_result(|| ArtistInput {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone: self.phone.clone(),
            image_link: self.image_link.clone(),
            facebook_link: self.facebook_link.clone(),
            website: self.website_link.clone(),
            seeking_description: self.seeking_description.clone(),
            genres: self.genres.clone(),
            seeking_venue: self.seeking_venue,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::pairs;

    #[test]
    fn test_valid_artist_maps_website_link() {
        let form = ArtistForm::from_form_data(&pairs(&[
            ("name", "Guns N Petals"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("phone", "326-123-5000"),
            ("genres", "Rock n Roll"),
            ("website_link", "https://www.gunsnpetalsband.com"),
            ("seeking_venue", "y"),
        ]));

        let input = form.validate().unwrap();

        assert_eq!(input.website, "https://www.gunsnpetalsband.com");
        assert_eq!(input.genres, vec!["Rock n Roll".to_string()]);
        assert!(input.seeking_venue);
    }

    #[test]
    fn test_bad_phone_and_missing_state() {
        let errors = ArtistForm::from_form_data(&pairs(&[
            ("name", "Matt Quevedo"),
            ("city", "New York"),
            ("phone", "300 400 5000"),
            ("genres", "Jazz"),
        ]))
        .validate()
        .unwrap_err();

        assert!(errors.has("phone"));
        assert!(errors.has("state"));
        assert!(!errors.has("name"));
    }

    #[test]
    fn test_seeking_venue_absent_is_false() {
        let form = ArtistForm::from_form_data(&pairs(&[
            ("name", "The Wild Sax Band"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("genres", "Jazz"),
            ("genres", "Classical"),
        ]));

        assert!(!form.validate().unwrap().seeking_venue);
    }
}
