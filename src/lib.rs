#![warn(missing_docs)]

//! <div class="warning">
//!
//! Note: API is unstable, and may change in `0.x` versions.
//!
//! </div>
//!
//! # As a library
//!
//! As a library, usually you prefer to use [`session`] with [`fetch::HttpFetcher`]
//! to download albums and images from imgur.
//!
//! See [`session::Session#example`] for example.
//!
//! The lower-level stages are usable on their own:
//! [`target`] resolves the inputs, [`scrape`] reads album pages and [`save`] writes the files.
//!
//! # As a binary
//!
//! In addition to the above, you also need [`cli`] and [`logging`] (the `cli` feature).
//!
//! See `main.rs` to know how to assemble these modules as a binary.

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod logging;

pub mod fetch;
pub mod save;
pub mod scrape;
pub mod session;
pub mod target;

pub mod config;
pub mod error;

pub use error::Error;
