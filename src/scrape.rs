//! Find the member images of an album in its HTML page.
//!
//! The page embeds the album metadata as a javascript object literal:
//!
//! ```html
//! <script type="text/javascript">
//!     var album = Imgur.Album.getInstance({"hash":"aB3d5","images":[{"hash":"m1a2b3c"}]});
//! </script>
//! ```
//!
//! Rather than parsing the literal, every `"hash":"..."` inside that block is collected.
//! Only [`extract_member_hashes`] knows about this, swapping it for a structured parse stays local.

use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::error::Error;

static ALBUM_DATA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<script type="text/javascript">\s*var album = \w+\.Album\.getInstance\((.*?)\);\s*</script>"#,
    )
    .unwrap()
});

// `\w` is unicode aware here, imgur hashes are plain ascii.
static HASH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""hash"\s*:\s*"([0-9A-Za-z_]{7}|[0-9A-Za-z_]{5})""#).unwrap()
});

/// Extract the `"hash"` values of the album data block, in page order.
///
/// Duplicates are kept and both 5 (album) and 7 (image) characters hashes are returned.
///
/// # Example
///
/// ```
/// use imgur_dl::scrape::extract_member_hashes;
///
/// let page = br#"<script type="text/javascript">var album = Imgur.Album.getInstance({"hash":"abc1234","ignored":1},{"hash":"defgh"});</script>"#;
/// assert_eq!(extract_member_hashes(page)?, ["abc1234", "defgh"]);
///
/// Ok::<(), imgur_dl::Error>(())
/// ```
///
/// # Errors
///
/// [`Error::AlbumDataNotFound`] if the page has no album data block.
pub fn extract_member_hashes(page: &[u8]) -> Result<Vec<String>, Error> {
    let album_data = ALBUM_DATA_REGEX
        .captures(page)
        .and_then(|captures| captures.get(1))
        .ok_or(Error::AlbumDataNotFound)?;

    let hashes = HASH_REGEX
        .captures_iter(album_data.as_bytes())
        // the capture group is ascii only, so this is lossless
        .map(|captures| String::from_utf8_lossy(&captures[1]).into_owned())
        .collect();
    Ok(hashes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html>
<head><title>album</title></head>
<body>
<script type="text/javascript">
    var album = Imgur.Album.getInstance({
        "hash": "aB3d5",
        "images": [
            {"hash" : "m1a2b3c", "ext": ".jpg"},
            {"hash":"m4d5e6f", "ext": ".jpg"},
            {"hash":"m1a2b3c", "ext": ".jpg"},
            {"hash":"toolonghash", "ext": ".jpg"}
        ]
    });
</script>
<script type="text/javascript">var other = {"hash":"zzzzzzz"};</script>
</body>
</html>"#;

    #[test]
    fn test_extract_inline() {
        let page = br#"<script type="text/javascript">var album = Imgur.Album.getInstance({"hash":"abc1234","ignored":1},{"hash":"defgh"});</script>"#;
        assert_eq!(extract_member_hashes(page).unwrap(), ["abc1234", "defgh"]);
    }

    #[test]
    fn test_extract_multiline_keeps_order_and_duplicates() {
        let hashes = extract_member_hashes(PAGE.as_bytes()).unwrap();
        assert_eq!(hashes, ["aB3d5", "m1a2b3c", "m4d5e6f", "m1a2b3c"]);
    }

    #[test]
    fn test_hashes_outside_the_block_are_ignored() {
        let page = r#"{"hash":"outside"}<script type="text/javascript">var album = Imgur.Album.getInstance({});</script>"#;
        assert_eq!(extract_member_hashes(page.as_bytes()).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_album_data_not_found() {
        let page = br#"<html><script type="text/javascript">var gallery = {"hash":"abc1234"};</script></html>"#;
        assert!(matches!(
            extract_member_hashes(page),
            Err(Error::AlbumDataNotFound)
        ));
        assert!(matches!(
            extract_member_hashes(b""),
            Err(Error::AlbumDataNotFound)
        ));
    }
}
