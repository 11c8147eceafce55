use serde::Deserialize;

use crate::client::Client;
use crate::error::{Error, Result};
use crate::search::SearchResults;
use crate::utils::{self, Data};

/// A user-curated set of wallpapers.
#[derive(Debug, PartialEq, Eq, Deserialize, Clone)]
pub struct Collection {
    pub id: u64,
    pub label: String,
    pub views: u64,
    // Served as 0/1.
    #[serde(deserialize_with = "utils::bool_from_int")]
    pub public: bool,
    pub count: u64,
}

impl Client {
    /// Returns the collections of the authenticated user, private ones
    /// included. Fails with [`Error::InvalidApiKey`] before any request is
    /// made when the client has no API key.
    pub fn my_collections(&self) -> Result<Vec<Collection>> {
        if !self.has_api_key() {
            return Err(Error::InvalidApiKey);
        }

        let url = self.endpoint(&["collections"]);
        Ok(self.get::<Data<Vec<Collection>>>(&url, &[])?.data)
    }

    /// Returns the public collections of the given user.
    pub fn user_collections(&self, username: &str) -> Result<Vec<Collection>> {
        let url = self.endpoint(&["collections", username]);
        Ok(self.get::<Data<Vec<Collection>>>(&url, &[])?.data)
    }

    /// Returns one page of the wallpapers in a user's collection. The
    /// listing shape matches [`Client::search`], pagination metadata
    /// included.
    pub fn collection_wallpapers(
        &self,
        username: &str,
        collection_id: u64,
        page: Option<u32>,
    ) -> Result<SearchResults> {
        let url = self.endpoint(&["collections", username, &collection_id.to_string()]);
        let params: Vec<(&str, String)> = match page {
            Some(page) => vec![("page", page.to_string())],
            None => Vec::new(),
        };
        self.get(&url, &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{mock, Matcher};

    fn test_client() -> Client {
        Client::builder()
            .base_url(mockito::server_url())
            .build()
            .unwrap()
    }

    #[test]
    fn my_collections_requires_api_key() {
        // No mock registered: if the guard were missing, the request would
        // reach the mock server and fail with a different error.
        let client = test_client();
        assert_eq!(client.my_collections().unwrap_err(), Error::InvalidApiKey);
    }

    #[test]
    fn my_collections_deserializes() {
        let client = Client::builder()
            .base_url(mockito::server_url())
            .api_key("sekret")
            .build()
            .unwrap();

        let _m = mock("GET", "/collections")
            .match_query(Matcher::UrlEncoded("apikey".into(), "sekret".into()))
            .with_body(
                r#"{
                    "data": [
                        {"id": 72, "label": "Default", "views": 0, "public": 0, "count": 54},
                        {"id": 73, "label": "Nature", "views": 12, "public": 1, "count": 8}
                    ]
                }"#,
            )
            .create();

        let collections = client.my_collections().unwrap();
        assert_eq!(collections.len(), 2);
        assert_eq!(collections[0].label, "Default");
        assert!(!collections[0].public);
        assert!(collections[1].public);
        assert_eq!(collections[1].count, 8);
    }

    #[test]
    fn user_collections_deserializes() {
        let client = test_client();

        let _m = mock("GET", "/collections/traxex")
            .with_body(
                r#"{"data": [{"id": 99, "label": "Skies", "views": 3, "public": 1, "count": 21}]}"#,
            )
            .create();

        let collections = client.user_collections("traxex").unwrap();
        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].id, 99);
    }

    #[test]
    fn collection_wallpapers_forwards_the_page() {
        let client = test_client();

        let _m = mock("GET", "/collections/traxex/72")
            .match_query(Matcher::UrlEncoded("page".into(), "3".into()))
            .with_body(r#"{"data": [], "meta": {"current_page": 3}}"#)
            .create();

        let listing = client
            .collection_wallpapers("traxex", 72, Some(3))
            .unwrap();
        assert!(listing.data.is_empty());
        assert_eq!(listing.meta.current_page, 3);
    }
}
