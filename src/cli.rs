//! A core module for command line interface.
//!
//! See [`Cli`] for more information.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ArgAction, Command};
pub use clap::{CommandFactory, Parser};

use crate::config::{Config, Validate};
use crate::fetch::USER_AGENT;
use crate::session::ErrorPolicy;

/// [`clap`] command line interface.
///
/// Use [`Self::config`] to turn the flags into a validated [`Config`].
///
/// # Example
///
/// ```no_run
/// use imgur_dl::cli::{Cli, Parser as _};
///
/// let cli = Cli::parse();
/// ```
#[non_exhaustive]
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Albums or images to download: a short hash, or an imgur URL.
    ///
    /// e.g. `aB3d5`, `imgur.com/a/aB3d5`, `aB3dE5f`, `http://i.imgur.com/aB3dE5f`
    #[arg(value_name = "TARGET", required = true)]
    pub targets: Vec<String>,

    /// The directory to save into, defaults to the current directory.
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Request timeout in seconds, `0` for none.
    #[arg(short, long, value_name = "SECS", default_value_t = 0)]
    pub timeout: u64,

    /// The `User-Agent` header sent with every request.
    #[arg(long, value_name = "UA", default_value = USER_AGENT)]
    pub user_agent: String,

    /// Continue with the next target when one fails, instead of stopping.
    #[arg(short, long)]
    pub keep_going: bool,

    /// More logs on stderr, repeat for even more (`-vv`).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Build and validate the [`Config`] from the flags.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use imgur_dl::cli::{Cli, CommandFactory as _, Parser as _};
    ///
    /// let config = Cli::parse().config(&mut Cli::command())?;
    ///
    /// Ok::<(), clap::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// If the config is invalid, a [`ErrorKind::ValueValidation`] error is returned.
    pub fn config(&self, cmd: &mut Command) -> Result<Config, clap::Error> {
        let config = Config {
            download_dir: self.dir.clone().unwrap_or_default(),
            timeout: self.timeout,
            user_agent: self.user_agent.clone(),
            policy: if self.keep_going {
                ErrorPolicy::KeepGoing
            } else {
                ErrorPolicy::FailFast
            },
        };

        match config.validate() {
            Ok(_) => Ok(config),
            Err(err) => Err(cmd.error(ErrorKind::ValueValidation, err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["imgur-dl", "aB3d5", "aB3dE5f"]).unwrap();
        assert_eq!(cli.targets, ["aB3d5", "aB3dE5f"]);

        let config = cli.config(&mut Cli::command()).unwrap();
        assert_eq!(config.download_dir, PathBuf::new());
        assert_eq!(config.timeout, 0);
        assert_eq!(config.user_agent, USER_AGENT);
        assert_eq!(config.policy, ErrorPolicy::FailFast);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "imgur-dl", "-d", "out", "-t", "30", "-k", "-vv", "aB3d5",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);

        let config = cli.config(&mut Cli::command()).unwrap();
        assert_eq!(config.download_dir, PathBuf::from("out"));
        assert_eq!(config.timeout, 30);
        assert_eq!(config.policy, ErrorPolicy::KeepGoing);
    }

    #[test]
    fn test_targets_required() {
        let err = Cli::try_parse_from(["imgur-dl"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_invalid_config() {
        let cli = Cli::try_parse_from(["imgur-dl", "--user-agent", "", "aB3d5"]).unwrap();
        let err = cli.config(&mut Cli::command()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }
}
