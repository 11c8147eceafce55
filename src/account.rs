use serde::Deserialize;

use crate::client::Client;
use crate::error::{Error, Result};
use crate::search::{Category, Purity, TopRange};
use crate::utils::{self, Data};

/// Browsing preferences of the authenticated user.
#[derive(Debug, PartialEq, Eq, Deserialize, Clone)]
pub struct UserSettings {
    pub thumb_size: String,
    #[serde(deserialize_with = "utils::lenient_u64")]
    pub per_page: u64,
    pub purity: Vec<Purity>,
    pub categories: Vec<Category>,
    #[serde(default)]
    pub resolutions: Vec<String>,
    #[serde(default)]
    pub aspect_ratios: Vec<String>,
    pub toplist_range: TopRange,
    #[serde(default)]
    pub tag_blacklist: Vec<String>,
    #[serde(default)]
    pub user_blacklist: Vec<String>,
}

impl Client {
    /// Returns the settings of the authenticated user. Fails with
    /// [`Error::InvalidApiKey`] before any request is made when the client
    /// has no API key.
    pub fn settings(&self) -> Result<UserSettings> {
        if !self.has_api_key() {
            return Err(Error::InvalidApiKey);
        }

        let url = self.endpoint(&["settings"]);
        Ok(self.get::<Data<UserSettings>>(&url, &[])?.data)
    }
}
