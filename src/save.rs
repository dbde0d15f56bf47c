//! Persist fetched responses to disk.
//!
//! - [`save_image`] streams an `image/jpeg` body into `<output_dir>/<hash>.jpg`.
//! - [`save_album`] scrapes the album page, then fetches and saves every member, one at a time.

use std::io::ErrorKind;
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressFinish, ProgressStyle};
use tokio::fs::{create_dir, File};
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::error::Error;
use crate::fetch::{Fetch, FetchResponse};
use crate::scrape::extract_member_hashes;
use crate::target::{resolve_image, Target};

/// The only accepted `Content-Type` for an image.
pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";
/// The only accepted `Content-Type` for an album page.
pub const ALBUM_CONTENT_TYPE: &str = "text/html; charset=utf-8";

const PB_FINISH_MODE: ProgressFinish = ProgressFinish::Abandon;

#[inline]
fn build_process_bar(len: u64) -> ProgressBar {
    // see: https://docs.rs/indicatif/latest/indicatif/#templates
    const PROCESS_CHARS: &str = "#>-";
    const TEMPLATE: &str = "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {human_pos}/{human_len} ({eta})";

    let style = ProgressStyle::with_template(TEMPLATE)
        .unwrap()
        .progress_chars(PROCESS_CHARS);

    ProgressBar::new(len)
        .with_style(style)
        .with_finish(PB_FINISH_MODE)
}

/// Fail with [`Error::UnexpectedContentType`] unless the response is of the `expected` type.
fn check_content_type(
    target: &Target,
    response: &impl FetchResponse,
    expected: &str,
) -> Result<(), Error> {
    let content_type = response.content_type().unwrap_or_default();
    if content_type == expected {
        Ok(())
    } else {
        Err(Error::UnexpectedContentType {
            content_type: content_type.to_owned(),
            url: target.url().to_owned(),
        })
    }
}

/// Save a single image to [`Target::image_path`], truncating any existing file.
///
/// The "saving" notice is printed with `progress` suspended,
/// pass [`ProgressBar::hidden`] when there is no bar to draw.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// - [`Error::UnexpectedContentType`] if the response is not `image/jpeg`, no file is created then.
/// - [`Error::Filesystem`] if the file cannot be created or written.
/// - [`Error::Network`] if reading the body fails. The partially written file is left in place.
pub async fn save_image<R: FetchResponse>(
    target: &Target,
    mut response: R,
    progress: &ProgressBar,
) -> Result<u64, Error> {
    check_content_type(target, &response, IMAGE_CONTENT_TYPE)?;

    let path = target.image_path();
    progress.suspend(|| println!("saving {}", path.display()));

    let file = File::create(&path)
        .await
        .map_err(|err| Error::filesystem(&path, err))?;
    let mut file_buf = BufWriter::new(file);

    let mut bytes_saved: u64 = 0;
    while let Some(mut chunk) = response
        .chunk()
        .await
        .map_err(|err| Error::network(target.url(), err))?
    {
        bytes_saved += u64::try_from(chunk.len()).expect("chunk is too large to `u64`");
        file_buf
            .write_all_buf(&mut chunk)
            .await
            .map_err(|err| Error::filesystem(&path, err))?;
    }

    file_buf
        .flush()
        .await
        .map_err(|err| Error::filesystem(&path, err))?;

    tracing::info!(path = %path.display(), bytes = bytes_saved, "image saved");
    Ok(bytes_saved)
}

/// Read the whole album page, then download every member image into `<output_dir>/<album hash>/`.
///
/// Members are resolved with [`resolve_image`]: scraped hashes which are not image hashes,
/// such as the album's own hash, are skipped.
///
/// Returns the number of members saved.
///
/// # Errors
///
/// - [`Error::UnexpectedContentType`] if the page is not `text/html; charset=utf-8`.
/// - [`Error::AlbumDataNotFound`] if the page has no album data.
/// - [`Error::Filesystem`] if the album directory cannot be created.
/// - Any error of [`Fetch::fetch`] or [`save_image`] for a member.
///   The first failing member aborts the album, already saved members stay on disk.
pub async fn save_album<F: Fetch>(
    fetcher: &F,
    target: &Target,
    mut response: F::Response,
) -> Result<usize, Error> {
    check_content_type(target, &response, ALBUM_CONTENT_TYPE)?;

    let mut page = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|err| Error::network(target.url(), err))?
    {
        page.extend_from_slice(&chunk);
    }
    // release the connection before downloading the members
    drop(response);

    let hashes = extract_member_hashes(&page)?;
    println!("detected album {}", target.hash());
    println!("hashes: {hashes:?}");

    let album_dir: PathBuf = target.output_dir().join(target.hash());
    match create_dir(&album_dir).await {
        Err(err) if err.kind() != ErrorKind::AlreadyExists => {
            return Err(Error::filesystem(album_dir, err));
        }
        _ => {}
    }

    let process_bar =
        build_process_bar(u64::try_from(hashes.len()).expect("too many members to `u64`"));
    let mut saved = 0;
    for hash in &hashes {
        let member = match resolve_image(hash) {
            Ok(member) => member.with_output_dir(&album_dir),
            Err(_) => {
                tracing::warn!(album = target.hash(), hash = %hash, "skipping non-image member");
                process_bar.inc(1);
                continue;
            }
        };

        let member_response = fetcher.fetch(&member).await?;
        save_image(&member, member_response, &process_bar).await?;
        saved += 1;
        process_bar.inc(1);
    }
    process_bar.finish();

    Ok(saved)
}
