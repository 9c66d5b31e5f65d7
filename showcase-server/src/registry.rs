use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::{CatalogError, ConfigError}, types::{MediaKind, UNCATEGORIZED_KEY}};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDefinition {
    pub key: String,
    pub display_name: String,
}

impl CategoryDefinition {
    pub fn new(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
        }
    }
}

#[derive(Deserialize)]
struct CategoriesFile {
    #[serde(default)]
    photo: Vec<CategoryDefinition>,
    #[serde(default)]
    video: Vec<CategoryDefinition>,
}

/// Ordered, immutable category taxonomy for both media kinds.
///
/// Order is configuration order and is what every listing follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRegistry {
    photo: Vec<CategoryDefinition>,
    video: Vec<CategoryDefinition>,
}

impl CategoryRegistry {
    pub fn new(photo: Vec<CategoryDefinition>, video: Vec<CategoryDefinition>) -> Result<Self, ConfigError> {
        validate(MediaKind::Photo, &photo)?;
        validate(MediaKind::Video, &video)?;

        Ok(Self { photo, video })
    }

    pub fn builtin() -> Self {
        Self {
            photo: vec![
                CategoryDefinition::new("Documentary", "纪实"),
                CategoryDefinition::new("landscapes", "风景"),
                CategoryDefinition::new("Meeting", "会议"),
                CategoryDefinition::new("people", "人物"),
                CategoryDefinition::new("wedding", "婚礼"),
            ],
            video: vec![
                CategoryDefinition::new("activity", "活动"),
                CategoryDefinition::new("TVC", "宣传片"),
                CategoryDefinition::new("short_video", "短视频"),
            ],
        }
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        let file: CategoriesFile = serde_json::from_slice(bytes)?;
        Self::new(file.photo, file.video)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_slice(&bytes)
    }

    pub fn list_categories(&self, kind: MediaKind) -> &[CategoryDefinition] {
        match kind {
            MediaKind::Photo => &self.photo,
            MediaKind::Video => &self.video,
        }
    }

    pub fn find(&self, kind: MediaKind, key: &str) -> Option<&CategoryDefinition> {
        self.list_categories(kind).iter().find(|category| category.key == key)
    }

    pub fn is_valid_category(&self, kind: MediaKind, key: &str) -> bool {
        self.find(kind, key).is_some()
    }

    pub fn display_name_of(&self, kind: MediaKind, key: &str) -> Result<&str, CatalogError> {
        self.find(kind, key)
            .map(|category| category.display_name.as_str())
            .ok_or_else(|| CatalogError::CategoryNotFound { kind, key: key.to_string() })
    }

    pub fn keys(&self, kind: MediaKind) -> Vec<&str> {
        self.list_categories(kind).iter().map(|category| category.key.as_str()).collect()
    }
}

// Keys become directory names and URL segments.
fn validate(kind: MediaKind, categories: &[CategoryDefinition]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for category in categories {
        let key = category.key.as_str();
        let reason = if key.is_empty() {
            Some("key is empty")
        } else if key == "." || key == ".." {
            Some("key is a relative path component")
        } else if key.contains(['/', '\\', '\0']) {
            Some("key contains a path separator")
        } else if key == UNCATEGORIZED_KEY {
            Some("key is reserved")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(ConfigError::InvalidKey { kind, key: key.to_string(), reason });
        }
        if !seen.insert(key) {
            return Err(ConfigError::DuplicateKey { kind, key: key.to_string() });
        }
    }
    Ok(())
}
