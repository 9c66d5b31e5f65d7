//! Public asset URLs and their mapping back onto the media root.

use std::path::{Path, PathBuf};

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::types::MediaKind;

pub const ASSETS_PREFIX: &str = "/assets";

// Everything but RFC 3986 unreserved characters.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Builds `/assets/<segment>/...`, percent-encoding each segment.
pub fn asset_url<'a, I: IntoIterator<Item = &'a str>>(segments: I) -> String {
    let mut url = String::from(ASSETS_PREFIX);
    for segment in segments {
        url.push('/');
        url.extend(utf8_percent_encode(segment, SEGMENT));
    }
    url
}

/// Maps the part of a request path after `/assets/` to a file under `root`.
///
/// Returns `None` for anything that could step outside `root` or reach a
/// hidden file: segments starting with `.`, empty segments, or encoded
/// separators.
pub fn resolve_asset_path(root: &Path, encoded_tail: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    for raw in encoded_tail.split('/') {
        let segment = percent_decode_str(raw).decode_utf8().ok()?;
        if segment.is_empty() || segment.starts_with('.') || segment.contains(['/', '\\', '\0']) {
            return None
        }
        path.push(&*segment);
    }
    Some(path)
}

pub fn category_file_url(kind: MediaKind, key: &str, name: &str) -> String {
    asset_url([kind.dir_name(), key, name])
}

pub fn root_file_url(kind: MediaKind, name: &str) -> String {
    asset_url([kind.dir_name(), name])
}
