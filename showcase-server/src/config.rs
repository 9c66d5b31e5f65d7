use std::path::{Path, PathBuf};

use log::info;

use crate::{registry::CategoryRegistry, types::MediaKind};

/// Everything the catalog needs, fixed at startup.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    media_root: PathBuf,
    registry: CategoryRegistry,
}

impl CatalogConfig {
    pub fn new<P: Into<PathBuf>>(media_root: P, registry: CategoryRegistry) -> Self {
        Self {
            media_root: media_root.into(),
            registry,
        }
    }

    pub fn media_root(&self) -> &Path {
        &self.media_root
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn kind_root(&self, kind: MediaKind) -> PathBuf {
        self.media_root.join(kind.dir_name())
    }

    pub fn category_dir(&self, kind: MediaKind, key: &str) -> PathBuf {
        self.kind_root(kind).join(key)
    }

    /// Creates the kind roots and every configured category directory.
    pub async fn init_layout(&self) -> Result<(), tokio::io::Error> {
        for kind in MediaKind::ALL {
            create_dir_logged(&self.kind_root(kind)).await?;
            for category in self.registry.list_categories(kind) {
                create_dir_logged(&self.category_dir(kind, &category.key)).await?;
            }
        }
        Ok(())
    }
}

async fn create_dir_logged(path: &Path) -> Result<(), tokio::io::Error> {
    if !(tokio::fs::try_exists(path).await?) {
        tokio::fs::create_dir_all(path).await?;
        info!("created directory {}", path.display());
    }
    Ok(())
}
