//! Runtime configuration, filled in by [`crate::cli`] or by hand.

use std::path::PathBuf;

pub use validator::Validate;

use crate::fetch::USER_AGENT;
use crate::session::ErrorPolicy;

/// The longest accepted request timeout, one day. Keep in sync with the validator below.
pub const MAX_TIMEOUT_SECS: u64 = 24 * 60 * 60;

/// The settings of a download session.
///
/// Call [`Validate::validate`] before use.
#[non_exhaustive]
#[derive(Debug, Clone, Validate)]
pub struct Config {
    /// Base directory, empty means the current directory.
    pub download_dir: PathBuf,
    /// Request timeout in seconds, `0` means no timeout.
    #[validate(range(max = 86400, message = "timeout must not exceed one day"))]
    pub timeout: u64,
    /// The `User-Agent` header sent with every request.
    #[validate(length(min = 1, message = "user agent must not be empty"))]
    pub user_agent: String,
    /// What to do when one of the targets fails.
    pub policy: ErrorPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::new(),
            timeout: 0,
            user_agent: String::from(USER_AGENT),
            policy: ErrorPolicy::default(),
        }
    }
}
