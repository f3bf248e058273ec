use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crossbeam_channel::{Receiver, Sender, bounded};
use oeuf_mesh_cpu::{AtlasLayout, VoxelMesher};

use crate::catalog::SharedCatalog;

/// A pooled mesher and the catalog version it currently holds.
struct PooledMesher {
    mesher: VoxelMesher,
    version: u64,
}

/// Pool of reusable `VoxelMesher`s, one per concurrently meshing worker.
///
/// Idle meshers travel through a bounded channel; only the atlas layout sits
/// behind a lock, taken briefly on each acquire.
///
/// Meshers are created lazily up to `max_meshers`; every acquire brings the
/// mesher up to date with the shared catalog and the pool's atlas layout.
pub struct MesherPool {
    available_tx: Sender<PooledMesher>,
    available_rx: Receiver<PooledMesher>,
    allocated: AtomicUsize,
    max_meshers: usize,
    catalog: Arc<SharedCatalog>,
    atlas: RwLock<AtlasLayout>,
}

impl MesherPool {
    pub fn new(catalog: Arc<SharedCatalog>, max_meshers: usize) -> Self {
        debug_assert!(max_meshers > 0);
        let max_meshers = max_meshers.max(1);
        let (tx, rx) = bounded(max_meshers);
        Self {
            available_tx: tx,
            available_rx: rx,
            allocated: AtomicUsize::new(0),
            max_meshers,
            catalog,
            atlas: RwLock::new(AtlasLayout::default()),
        }
    }

    pub fn with_capacity_from_workers(catalog: Arc<SharedCatalog>, worker_count: usize) -> Arc<Self> {
        Arc::new(Self::new(catalog, worker_count.max(1)))
    }

    #[inline]
    pub fn catalog(&self) -> &Arc<SharedCatalog> {
        &self.catalog
    }

    /// Meshers created so far.
    #[inline]
    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::Acquire)
    }

    /// Atlas size applied to every mesher on its next acquire; invalid sizes are ignored.
    pub fn set_texture_dimensions(&self, width: f32, height: f32) {
        match AtlasLayout::from_dimensions(width, height) {
            Some(layout) => {
                *self.atlas.write().unwrap_or_else(PoisonError::into_inner) = layout;
            }
            None => log::warn!("pool ignoring texture dimensions {}x{}", width, height),
        }
    }

    /// Acquire a mesher from the pool, creating a new one if under capacity.
    ///
    /// Blocks while all `max_meshers` meshers are checked out.
    pub fn acquire(&self) -> MesherGuard<'_> {
        if let Ok(mut slot) = self.available_rx.try_recv() {
            self.prepare(&mut slot);
            return MesherGuard {
                slot: Some(slot),
                pool: self,
            };
        }

        loop {
            let current = self.allocated.load(Ordering::Acquire);
            if current < self.max_meshers {
                let prev = self.allocated.fetch_add(1, Ordering::AcqRel);
                if prev < self.max_meshers {
                    let snap = self.catalog.snapshot();
                    let mut slot = PooledMesher {
                        mesher: VoxelMesher::with_catalog(snap.catalog),
                        version: snap.version,
                    };
                    self.prepare(&mut slot);
                    log::debug!("mesher pool grew to {}", prev + 1);
                    return MesherGuard {
                        slot: Some(slot),
                        pool: self,
                    };
                }
                self.allocated.fetch_sub(1, Ordering::AcqRel);
            }

            match self.available_rx.recv() {
                Ok(mut slot) => {
                    self.prepare(&mut slot);
                    return MesherGuard {
                        slot: Some(slot),
                        pool: self,
                    };
                }
                Err(_) => continue,
            }
        }
    }

    fn prepare(&self, slot: &mut PooledMesher) {
        if slot.version != self.catalog.version() {
            let snap = self.catalog.snapshot();
            slot.mesher.set_catalog(snap.catalog);
            slot.version = snap.version;
        }
        let atlas = *self.atlas.read().unwrap_or_else(PoisonError::into_inner);
        slot.mesher.set_atlas(atlas);
    }

    fn release(&self, slot: PooledMesher) {
        let _ = self.available_tx.send(slot);
    }
}

/// RAII handle to a pooled mesher; returns it to the pool on drop.
pub struct MesherGuard<'pool> {
    slot: Option<PooledMesher>,
    pool: &'pool MesherPool,
}

impl MesherGuard<'_> {
    /// Catalog version the mesher was refreshed to on acquire.
    pub fn catalog_version(&self) -> u64 {
        self.slot.as_ref().map_or(0, |s| s.version)
    }
}

impl Deref for MesherGuard<'_> {
    type Target = VoxelMesher;

    fn deref(&self) -> &Self::Target {
        &self.slot.as_ref().expect("mesher already released").mesher
    }
}

impl DerefMut for MesherGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.slot.as_mut().expect("mesher already released").mesher
    }
}

impl Drop for MesherGuard<'_> {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            self.pool.release(slot);
        }
    }
}
