use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::client::Client;
use crate::error::Result;
use crate::search::Purity;
use crate::utils::{self, Data};

/// Tags are keywords used to describe a [`Wallpaper`][crate::wallpaper::Wallpaper].
#[derive(Debug, PartialEq, Eq, Deserialize, Clone)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    pub alias: String,
    pub category_id: u64,
    /// Display name of the tag's category, e.g. `"Anime & Manga"`.
    pub category: String,
    pub purity: Purity,
    #[serde(deserialize_with = "utils::api_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Returns the tag with the given ID.
    pub fn tag(&self, id: u64) -> Result<Tag> {
        let url = self.endpoint(&["tag", &id.to_string()]);
        Ok(self.get::<Data<Tag>>(&url, &[])?.data)
    }
}
