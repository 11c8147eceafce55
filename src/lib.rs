//! Wrapper crate for the [wallhaven.cc](https://wallhaven.cc) API v1.
//!
//! ## Usage
//!
//! First, create a [`Client`]. Most endpoints work anonymously; pass an API
//! key to access NSFW results, your settings and your private collections.
//!
//! ```no_run
//! # use wallhaven::client::Client;
//! # fn main() -> Result<(), wallhaven::error::Error> {
//! let client = Client::new()?;
//! // or: let client = Client::with_api_key("my-secret-key")?;
//! # Ok(()) }
//! ```
//!
//! Now it's ready to go! For example you can fetch wallpaper `94x38z` like
//! this:
//!
//! ```no_run
//! # use wallhaven::client::Client;
//! # fn main() -> Result<(), wallhaven::error::Error> {
//! # let client = Client::new()?;
//! let wallpaper = client.wallpaper("94x38z")?;
//!
//! assert_eq!(wallpaper.resolution, "6071x8598");
//! # Ok(()) }
//! ```
//!
//! Or you can make a search like on the website, using filters:
//!
//! ```no_run
//! # use wallhaven::client::Client;
//! # use wallhaven::search::{Category, Query, Sorting};
//! # fn main() -> Result<(), wallhaven::error::Error> {
//! # let client = Client::new()?;
//! let results = client.search(
//!     &Query::new()
//!         .q("landscape")
//!         .categories([Category::General])
//!         .sorting(Sorting::Favorites),
//! )?;
//!
//! for wallpaper in &results.data {
//!     println!("{} {}", wallpaper.id, wallpaper.path);
//! }
//! # Ok(()) }
//! ```
//!
//! Files download either to memory or straight to disk:
//!
//! ```no_run
//! # use wallhaven::client::Client;
//! # fn main() -> Result<(), wallhaven::error::Error> {
//! # let client = Client::new()?;
//! let saved = client.download_wallpaper_to("94x38z", "walls/94x38z.png")?;
//! # Ok(()) }
//! ```
//!
//! ## Rate limiting
//!
//! The API allows 45 requests per minute and answers 429 past that. The
//! client does not throttle itself; instead a bounded
//! [`RetryPolicy`][client::RetryPolicy] can be configured to re-attempt
//! rate-limited (and transport-failed) requests with a fixed delay between
//! attempts:
//!
//! ```no_run
//! # use wallhaven::client::{Client, RetryPolicy};
//! # use std::time::Duration;
//! # fn main() -> Result<(), wallhaven::error::Error> {
//! let client = Client::builder()
//!     .retry(RetryPolicy::new(3, Duration::from_secs(2)))
//!     .build()?;
//! # Ok(()) }
//! ```
//!
//! Once the budget is spent, [`Error::RateLimit`][error::Error::RateLimit]
//! is returned and backing off further is up to the caller.
//!
//! [`Client`]: client::Client

mod utils;

/// Account settings.
pub mod account;

/// Client related structures.
pub mod client;

/// Collection management.
pub mod collection;

/// Error management.
pub mod error;

/// Wallpaper search.
pub mod search;

/// Seed generation for reproducible random ordering.
pub mod seed;

/// Tag management.
pub mod tag;

/// Wallpaper management.
pub mod wallpaper;
