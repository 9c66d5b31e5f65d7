use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

pub const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "wmv", "flv", "webm", "mkv"];

/// Category key given to video files found directly under the video root.
pub const UNCATEGORIZED_KEY: &str = "uncategorized";
pub const UNCATEGORIZED_DISPLAY_NAME: &str = "Uncategorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    pub const ALL: [MediaKind; 2] = [MediaKind::Photo, MediaKind::Video];

    /// Directory under the media root holding this kind's categories.
    pub fn dir_name(self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            MediaKind::Photo => PHOTO_EXTENSIONS,
            MediaKind::Video => VIDEO_EXTENSIONS,
        }
    }

    /// Whether `file_name` carries one of this kind's extensions, compared case-insensitively.
    pub fn accepts(self, file_name: &str) -> bool {
        match Path::new(file_name).extension().and_then(|ext| ext.to_str()) {
            Some(ext) => {
                let ext = ext.to_lowercase();
                self.extensions().contains(&ext.as_str())
            },
            None => false,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// A file kept by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub name: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Unique within one response only. Never use it as a stable key.
    pub id: String,
    pub name: String,
    pub url: String,
    pub size_bytes: u64,
    pub kind: MediaKind,
    pub category_key: String,
    pub category_display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cover {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub key: String,
    pub display_name: String,
    pub item_count: usize,
    pub cover: Option<Cover>,
}
