use std::sync::Arc;

use futures_util::future::try_join_all;

use crate::{
    assets::{category_file_url, root_file_url},
    config::CatalogConfig,
    error::CatalogError,
    registry::{CategoryDefinition, CategoryRegistry},
    scanner::list_files,
    types::{CategorySummary, Cover, MediaItem, MediaKind, ScannedFile, UNCATEGORIZED_DISPLAY_NAME, UNCATEGORIZED_KEY},
};

/// Hands out ids that are unique within one response and nothing more.
#[derive(Debug)]
struct ItemIds {
    kind: MediaKind,
    next: u64,
}

impl ItemIds {
    fn new(kind: MediaKind) -> Self {
        Self { kind, next: 0 }
    }

    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.kind, self.next);
        self.next += 1;
        id
    }
}

/// Read-only views over the media tree. Cheap to clone; every call rescans.
#[derive(Debug, Clone)]
pub struct Catalog {
    config: Arc<CatalogConfig>,
}

impl Catalog {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn registry(&self) -> &CategoryRegistry {
        self.config.registry()
    }

    /// One summary per configured category, in configuration order, whether or not its directory exists.
    pub async fn category_summaries(&self, kind: MediaKind) -> Result<Vec<CategorySummary>, CatalogError> {
        let scans = self.scan_categories(kind).await?;

        Ok(scans.into_iter().map(|(category, files)| CategorySummary {
            key: category.key.clone(),
            display_name: category.display_name.clone(),
            item_count: files.len(),
            cover: files.into_iter().next().map(|file| Cover {
                url: category_file_url(kind, &category.key, &file.name),
                name: file.name,
            }),
        }).collect())
    }

    pub async fn category_items(&self, kind: MediaKind, key: &str) -> Result<Vec<MediaItem>, CatalogError> {
        let category = self.registry().find(kind, key)
            .ok_or_else(|| CatalogError::CategoryNotFound { kind, key: key.to_string() })?;
        let files = list_files(&self.config.category_dir(kind, &category.key), kind).await?;

        let mut ids = ItemIds::new(kind);
        Ok(files.into_iter().map(|file| categorized_item(&mut ids, kind, category, file)).collect())
    }

    /// Every category flattened in configuration order.
    ///
    /// Videos only: when no category holds anything, files sitting directly
    /// in the video root are listed as uncategorized.
    pub async fn all_items(&self, kind: MediaKind) -> Result<Vec<MediaItem>, CatalogError> {
        let scans = self.scan_categories(kind).await?;

        let mut ids = ItemIds::new(kind);
        let mut items = Vec::new();
        for (category, files) in scans {
            items.extend(files.into_iter().map(|file| categorized_item(&mut ids, kind, category, file)));
        }

        if items.is_empty() && kind == MediaKind::Video {
            let files = list_files(&self.config.kind_root(kind), kind).await?;
            items.extend(files.into_iter().map(|file| MediaItem {
                id: ids.next_id(),
                url: root_file_url(kind, &file.name),
                name: file.name,
                size_bytes: file.size_bytes,
                kind,
                category_key: UNCATEGORIZED_KEY.to_string(),
                category_display_name: UNCATEGORIZED_DISPLAY_NAME.to_string(),
            }));
        }

        Ok(items)
    }

    /// Photos then videos. Both scans run concurrently and either failing fails the whole call.
    pub async fn combined_media(&self) -> Result<Vec<MediaItem>, CatalogError> {
        let (mut photos, videos) = tokio::try_join!(
            self.all_items(MediaKind::Photo),
            self.all_items(MediaKind::Video)
        )?;
        photos.extend(videos);
        Ok(photos)
    }

    async fn scan_categories(&self, kind: MediaKind) -> Result<Vec<(&CategoryDefinition, Vec<ScannedFile>)>, CatalogError> {
        try_join_all(self.registry().list_categories(kind).iter().map(|category| async move {
            let files = list_files(&self.config.category_dir(kind, &category.key), kind).await?;
            Ok::<_, CatalogError>((category, files))
        })).await
    }
}

fn categorized_item(ids: &mut ItemIds, kind: MediaKind, category: &CategoryDefinition, file: ScannedFile) -> MediaItem {
    MediaItem {
        id: ids.next_id(),
        url: category_file_url(kind, &category.key, &file.name),
        name: file.name,
        size_bytes: file.size_bytes,
        kind,
        category_key: category.key.clone(),
        category_display_name: category.display_name.clone(),
    }
}
