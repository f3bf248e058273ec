use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use oeuf_shapes::{ShapeCatalog, ShapeConfigError, ShapesConfig};

/// One consistent catalog plus the version it was published under.
#[derive(Clone, Debug)]
pub struct CatalogSnapshot {
    pub version: u64,
    pub catalog: Arc<ShapeCatalog>,
}

/// Versioned, wholesale-replaced shape catalog shared by all meshing workers.
///
/// Readers clone an `Arc` under a short read lock; a replacement is fully
/// built and validated before the write lock is taken.
#[derive(Debug)]
pub struct SharedCatalog {
    current: RwLock<CatalogSnapshot>,
    version: AtomicU64,
}

impl SharedCatalog {
    pub fn new(catalog: ShapeCatalog) -> Self {
        Self {
            current: RwLock::new(CatalogSnapshot {
                version: 0,
                catalog: Arc::new(catalog),
            }),
            version: AtomicU64::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(ShapeCatalog::empty())
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Publishes `catalog` and returns its version.
    pub fn install(&self, catalog: ShapeCatalog) -> u64 {
        let catalog = Arc::new(catalog);
        let mut cur = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let version = cur.version + 1;
        *cur = CatalogSnapshot { version, catalog };
        self.version.store(version, Ordering::Release);
        version
    }

    /// Validates and publishes a new catalog; on error the current one stays.
    pub fn replace(&self, cfg: &ShapesConfig) -> Result<u64, ShapeConfigError> {
        let catalog = ShapeCatalog::build(cfg)?;
        let variants = catalog.database.len();
        let version = self.install(catalog);
        log::info!("shape catalog v{} published ({} variants)", version, variants);
        Ok(version)
    }

    pub fn reload_from_path(&self, path: impl AsRef<Path>) -> Result<u64, ShapeConfigError> {
        let path = path.as_ref();
        match ShapesConfig::from_path(path).and_then(|cfg| self.replace(&cfg)) {
            Ok(v) => Ok(v),
            Err(e) => {
                log::warn!(
                    "keeping shape catalog v{}: {} failed to load: {}",
                    self.version(),
                    path.display(),
                    e
                );
                Err(e)
            }
        }
    }
}

impl Default for SharedCatalog {
    fn default() -> Self {
        Self::empty()
    }
}
