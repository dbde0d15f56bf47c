//! The top-level run loop: resolve, fetch and save every argument, in order.
//!
//! See [`Session`] for more information.
//!
//! Following is the low-level module wrapped by this module:
//! - [`crate::target`]
//! - [`crate::fetch`]
//! - [`crate::save`]

use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use tokio::fs::create_dir_all;

use crate::error::Error;
use crate::fetch::Fetch;
use crate::save::{save_album, save_image};
use crate::target::{resolve, TargetKind};

/// What to do when a target fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop at the first error, the remaining targets are not attempted.
    #[default]
    FailFast,
    /// Record the error and move on to the next target.
    ///
    /// A failing member still aborts the rest of its album.
    KeepGoing,
}

/// The result of a single successful target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Saved {
    /// An image was written.
    Image {
        /// Where the image was written.
        path: PathBuf,
        /// The size of the image.
        bytes: u64,
    },
    /// The members of an album were written into its directory.
    Album {
        /// The album hash, also the name of its directory.
        hash: String,
        /// How many members were saved.
        members: usize,
    },
}

/// What happened to every target of a [`Session::run`].
#[derive(Debug, Default)]
pub struct Report {
    /// The successful targets, in order.
    pub saved: Vec<Saved>,
    /// The failed inputs with their error, in order. Always empty with [`ErrorPolicy::FailFast`].
    pub failed: Vec<(String, Error)>,
}

impl Report {
    /// `true` if nothing failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/** A download session over one [`Fetch`] implementation.

- Top-level targets are saved into `download_dir`, album members into `download_dir/<album hash>/`.
- Targets are processed strictly one after another, there is no concurrency.

# Example
```no_run
use imgur_dl::config::Config;
use imgur_dl::fetch::HttpFetcher;
use imgur_dl::session::{ErrorPolicy, Session};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let fetcher = HttpFetcher::build(&Config::default())?;

    let session = Session::build(fetcher, "downloads", ErrorPolicy::FailFast).await?;
    let report = session.run(["aB3d5", "https://i.imgur.com/aB3dE5f"]).await?;
    assert!(report.is_success());
    Ok(())
}
```
*/
pub struct Session<F> {
    fetcher: F,
    download_dir: PathBuf,
    policy: ErrorPolicy,
}

impl<F: Fetch> Session<F> {
    /// Create a new session.
    ///
    /// # Errors
    ///
    /// If the `download_dir` cannot be created, an error will be returned.
    pub async fn build(
        fetcher: F,
        download_dir: impl Into<PathBuf>,
        policy: ErrorPolicy,
    ) -> Result<Self, Error> {
        let download_dir = download_dir.into();
        // an empty path is the current directory
        if !download_dir.as_os_str().is_empty() {
            create_dir_all(&download_dir)
                .await
                .map_err(|err| Error::filesystem(&download_dir, err))?;
        }
        Ok(Self {
            fetcher,
            download_dir,
            policy,
        })
    }

    /// The directory top-level targets are saved into.
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Resolve, fetch and save a single input.
    ///
    /// # Errors
    ///
    /// The first error of any stage, see [`Error`].
    pub async fn download(&self, input: &str) -> Result<Saved, Error> {
        let target = resolve(input)?.with_output_dir(&self.download_dir);
        let response = self.fetcher.fetch(&target).await?;

        match target.kind() {
            TargetKind::Image => {
                let bytes = save_image(&target, response, &ProgressBar::hidden()).await?;
                Ok(Saved::Image {
                    path: target.image_path(),
                    bytes,
                })
            }
            TargetKind::Album => {
                let members = save_album(&self.fetcher, &target, response).await?;
                Ok(Saved::Album {
                    hash: target.hash().to_owned(),
                    members,
                })
            }
        }
    }

    /// Download every input in order, applying the session's [`ErrorPolicy`].
    ///
    /// # Errors
    ///
    /// With [`ErrorPolicy::FailFast`], the first error is returned and the remaining inputs are dropped.
    /// With [`ErrorPolicy::KeepGoing`], this never fails, errors are collected in [`Report::failed`].
    pub async fn run<I, S>(&self, inputs: I) -> Result<Report, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = Report::default();
        for input in inputs {
            let input = input.as_ref();
            match self.download(input).await {
                Ok(saved) => report.saved.push(saved),
                Err(err) => match self.policy {
                    ErrorPolicy::FailFast => return Err(err),
                    ErrorPolicy::KeepGoing => {
                        tracing::debug!(input, error = %err, "download failed, continuing");
                        report.failed.push((input.to_owned(), err));
                    }
                },
            }
        }
        Ok(report)
    }
}
