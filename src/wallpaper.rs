use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use crate::client::Client;
use crate::error::{Error, Result};
use crate::search::{Category, Purity};
use crate::tag::Tag;
use crate::utils::{self, Data};

/// Stream chunk size used when downloading wallpaper files.
const DOWNLOAD_CHUNK_SIZE: usize = 4096;

/// Image formats served by the API.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ImageType {
    Jpeg,
    Jpg,
    Png,
}

impl ImageType {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageType::Jpeg => "jpeg",
            ImageType::Jpg => "jpg",
            ImageType::Png => "png",
        }
    }

    /// Maps a `file_type` MIME value to the format it names.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(ImageType::Jpeg),
            "image/jpg" => Some(ImageType::Jpg),
            "image/png" => Some(ImageType::Png),
            _ => None,
        }
    }
}

/// Thumbnail URLs for a wallpaper.
#[derive(Debug, PartialEq, Eq, Deserialize, Clone)]
pub struct Thumbs {
    pub large: String,
    pub original: String,
    pub small: String,
}

/// The user who uploaded a wallpaper. Only present on single-wallpaper
/// lookups.
#[derive(Debug, PartialEq, Eq, Deserialize, Clone)]
pub struct Uploader {
    pub username: String,
    pub group: String,
    /// Avatar URLs keyed by size (`"200px"`, `"128px"`, ...).
    #[serde(default)]
    pub avatar: HashMap<String, String>,
}

/// Structure representing a wallpaper.
///
/// Search listings omit `uploader` and `tags`; the API only includes them
/// when fetching a single wallpaper by ID.
#[derive(Debug, PartialEq, Deserialize)]
pub struct Wallpaper {
    pub id: String,
    pub url: String,
    pub short_url: String,
    #[serde(default)]
    pub uploader: Option<Uploader>,
    pub views: u64,
    pub favorites: u64,
    pub source: String,
    pub purity: Purity,
    pub category: Category,
    pub dimension_x: u64,
    pub dimension_y: u64,
    pub resolution: String,
    pub ratio: String,
    pub file_size: u64,
    /// MIME type of the file, e.g. `image/png`.
    pub file_type: String,
    #[serde(deserialize_with = "utils::api_datetime")]
    pub created_at: DateTime<Utc>,
    pub colors: Vec<String>,
    /// URL of the full-size file.
    pub path: String,
    pub thumbs: Thumbs,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Wallpaper {
    /// The image format, derived from [`Self::file_type`].
    pub fn image_type(&self) -> Option<ImageType> {
        ImageType::from_mime(&self.file_type)
    }
}

impl Client {
    /// Returns the wallpaper with the given ID.
    ///
    /// ```no_run
    /// # use wallhaven::client::Client;
    /// # fn main() -> Result<(), wallhaven::error::Error> {
    /// let client = Client::new()?;
    /// let wallpaper = client.wallpaper("94x38z")?;
    ///
    /// assert_eq!(wallpaper.id, "94x38z");
    /// # Ok(()) }
    /// ```
    pub fn wallpaper(&self, id: &str) -> Result<Wallpaper> {
        let url = self.endpoint(&["w", id]);
        match self.get::<Data<Wallpaper>>(&url, &[]) {
            Ok(envelope) => Ok(envelope.data),
            Err(Error::Unhandled {
                status: Some(404), ..
            }) => Err(Error::WallpaperNotFound(id.to_owned())),
            Err(e) => Err(e),
        }
    }

    /// Whether a wallpaper with the given ID exists. Failures other than
    /// [`Error::WallpaperNotFound`] are not swallowed.
    pub fn wallpaper_exists(&self, id: &str) -> Result<bool> {
        match self.wallpaper(id) {
            Ok(_) => Ok(true),
            Err(Error::WallpaperNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Downloads the full-size file of the wallpaper with the given ID and
    /// returns its bytes.
    pub fn download_wallpaper(&self, id: &str) -> Result<Vec<u8>> {
        let wallpaper = self.wallpaper(id)?;
        let mut response = self.raw_get(&wallpaper.path)?;

        let mut bytes = Vec::new();
        copy_chunks(&mut response, &mut bytes)?;
        Ok(bytes)
    }

    /// Downloads the full-size file of the wallpaper with the given ID to
    /// `path`, creating parent directories as needed. Returns the absolute
    /// path written.
    ///
    /// ```no_run
    /// # use wallhaven::client::Client;
    /// # fn main() -> Result<(), wallhaven::error::Error> {
    /// let client = Client::new()?;
    /// let saved = client.download_wallpaper_to("94x38z", "walls/94x38z.png")?;
    /// println!("saved to {}", saved.display());
    /// # Ok(()) }
    /// ```
    pub fn download_wallpaper_to<P: AsRef<Path>>(&self, id: &str, path: P) -> Result<PathBuf> {
        let wallpaper = self.wallpaper(id)?;
        let mut response = self.raw_get(&wallpaper.path)?;

        let dest = std::path::absolute(path.as_ref())
            .map_err(|e| Error::unhandled(format!("could not resolve destination path: {e}"), None))?;
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::unhandled(format!("could not create {}: {e}", parent.display()), None)
            })?;
        }

        let mut file = File::create(&dest).map_err(|e| {
            Error::unhandled(format!("could not create {}: {e}", dest.display()), None)
        })?;
        copy_chunks(&mut response, &mut file)?;

        debug!(path = %dest.display(), "wallpaper saved");
        Ok(dest)
    }
}

/// Copies the response body in fixed-size chunks; a zero-length read ends
/// the stream.
fn copy_chunks<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> Result<()> {
    let mut chunk = [0u8; DOWNLOAD_CHUNK_SIZE];
    loop {
        let read = match reader.read(&mut chunk) {
            Ok(0) => return Ok(()),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::unhandled(format!("download stream failed: {e}"), None)),
        };
        writer
            .write_all(&chunk[..read])
            .map_err(|e| Error::unhandled(format!("could not write wallpaper data: {e}"), None))?;
    }
}
