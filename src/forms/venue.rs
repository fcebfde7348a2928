use super::{FormData, ValidationErrors};
use crate::entities::venue;

/// The venue form in the vocabulary the HTML form uses. `website_link` and
/// `seeking_description` are stored as `website` and `description`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

/// A validated venue, in the persisted vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub description: String,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
}

impl VenueForm {
    pub fn from_form_data(data: &FormData) -> Self {
        Self {
            name: data.text("name"),
            city: data.text("city"),
            state: data.text("state"),
            address: data.text("address"),
            phone: data.text("phone"),
            image_link: data.text("image_link"),
            genres: data.list("genres"),
            facebook_link: data.text("facebook_link"),
            website_link: data.text("website_link"),
            seeking_talent: data.checkbox("seeking_talent"),
            seeking_description: data.text("seeking_description"),
        }
    }

    /// Prefill for the edit page.
    pub fn from_model(model: &venue::Model) -> Self {
        Self {
            name: model.name.clone(),
            city: model.city.clone(),
            state: model.state.clone(),
            address: model.address.clone(),
            phone: model.phone.clone(),
            image_link: model.image_link.clone(),
            genres: model.genres.0.clone(),
            facebook_link: model.facebook_link.clone(),
            website_link: model.website.clone(),
            seeking_talent: model.seeking_talent,
            seeking_description: model.description.clone(),
        }
    }

    pub fn validate(&self) -> Result<VenueInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        super::require(&mut errors, "name", &self.name);
        super::require(&mut errors, "city", &self.city);
        super::check_state(&mut errors, "state", &self.state);
        super::require(&mut errors, "address", &self.address);
        super::check_genres(&mut errors, "genres", &self.genres);
        super::check_facebook_link(&mut errors, "facebook_link", &self.facebook_link);

        errors.into_result(|| VenueInput {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            image_link: self.image_link.clone(),
            facebook_link: self.facebook_link.clone(),
            website: self.website_link.clone(),
            description: self.seeking_description.clone(),
            genres: self.genres.clone(),
            seeking_talent: self.seeking_talent,
        })
    }
}
