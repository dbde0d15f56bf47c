//! Turn a raw command line argument into a fetchable [`Target`].
//!
//! Two shapes are recognized, tried in this order (first match wins):
//!
//! 1. album: `[http(s)://imgur.com/a/]<5 chars>` followed by the end of input or a `#` fragment.
//! 2. image: `[http(s)://][i.]imgur.com/<7 chars>`, trailing characters are ignored.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

regex!(ALBUM_REGEX, r"^(?:(?:https?://)?imgur\.com/a/)?([A-Za-z0-9]{5})(?:$|#)");
regex!(IMAGE_REGEX, r"^(?:https?://)?(?:(?:i\.)?imgur\.com/)?([A-Za-z0-9]{7})");

/// What a [`Target`] points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// A single image, identified by a 7 characters hash.
    Image,
    /// An album of images, identified by a 5 characters hash.
    Album,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => f.write_str("image"),
            Self::Album => f.write_str("album"),
        }
    }
}

/// A resolved, fetchable entity.
///
/// The `url` is always derived from the `hash` and the `kind`,
/// never taken verbatim from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    url: String,
    hash: String,
    kind: TargetKind,
    output_dir: PathBuf,
}

impl Target {
    fn image(hash: &str) -> Self {
        Self {
            url: format!("http://i.imgur.com/{hash}.jpg"),
            hash: hash.to_owned(),
            kind: TargetKind::Image,
            output_dir: PathBuf::new(),
        }
    }

    fn album(hash: &str) -> Self {
        Self {
            url: format!("http://imgur.com/a/{hash}"),
            hash: hash.to_owned(),
            kind: TargetKind::Album,
            output_dir: PathBuf::new(),
        }
    }

    /// The canonical URL to fetch.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The short identifier of the image or album.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Whether this is an image or an album.
    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    /// The directory saved files go to. Empty means the current directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Override the output directory, e.g. to point an album member into the album's directory.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// The path an image target is saved to: `<output_dir>/<hash>.jpg`.
    pub fn image_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.jpg", self.hash))
    }
}

/// Resolve an album or image from a short hash or an imgur URL.
///
/// # Example
///
/// ```
/// use imgur_dl::target::{resolve, TargetKind};
///
/// let target = resolve("imgur.com/a/aB3d5#foo")?;
/// assert_eq!(target.kind(), TargetKind::Album);
/// assert_eq!(target.url(), "http://imgur.com/a/aB3d5");
///
/// Ok::<(), imgur_dl::Error>(())
/// ```
///
/// # Errors
///
/// [`Error::UnrecognizedFormat`] if the input matches neither shape.
pub fn resolve(input: &str) -> Result<Target, Error> {
    if let Some(captures) = ALBUM_REGEX.captures(input) {
        return Ok(Target::album(&captures[1]));
    }
    resolve_image(input)
}

/// Like [`resolve`], but only accepts the image shape.
///
/// Album members are resolved through this path, they are always images.
pub fn resolve_image(input: &str) -> Result<Target, Error> {
    match IMAGE_REGEX.captures(input) {
        Some(captures) => Ok(Target::image(&captures[1])),
        None => Err(Error::UnrecognizedFormat {
            input: input.to_owned(),
        }),
    }
}
