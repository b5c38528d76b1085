//! Shared slot holding the current mesh, swapped atomically on
//! regeneration.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use knottube_curve::CurveParameters;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::tube::{SweepOptions, TubeMesh};

/// A generated mesh together with the parameters it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSnapshot {
    /// Parameters the mesh was generated from.
    pub params: CurveParameters,
    /// The generated buffers.
    pub mesh: TubeMesh,
}

/// Holds the mesh a renderer is currently drawing.
///
/// Readers take an [`Arc`] to a complete snapshot. Regeneration builds the
/// new mesh outside the read lock and only then swaps the pointer, so a
/// reader never sees a partially rebuilt buffer triple.
///
/// Regenerations run one at a time. When several callers regenerate
/// concurrently, each swap happens in the order the callers acquire the
/// rebuild lock, and each call returns the snapshot that was current when
/// it finished. The slot ends up holding the last caller's mesh.
#[derive(Debug)]
pub struct MeshSlot {
    options: SweepOptions,
    current: RwLock<Arc<MeshSnapshot>>,
    rebuild: Mutex<()>,
}

impl MeshSlot {
    /// Generate the initial mesh with default sweep options.
    pub fn new(params: CurveParameters) -> Result<Self> {
        Self::with_options(params, SweepOptions::default())
    }

    /// Generate the initial mesh with explicit sweep options.
    pub fn with_options(params: CurveParameters, options: SweepOptions) -> Result<Self> {
        let mesh = TubeMesh::generate_with(&params, &options)?;
        Ok(Self {
            options,
            current: RwLock::new(Arc::new(MeshSnapshot { params, mesh })),
            rebuild: Mutex::new(()),
        })
    }

    /// The current snapshot.
    pub fn current(&self) -> Arc<MeshSnapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Rebuild the mesh for `params` and swap it in.
    ///
    /// On error the previous snapshot stays in place. Regenerating with the
    /// current parameters returns the existing snapshot without rebuilding.
    #[instrument(skip(self))]
    pub fn regenerate(&self, params: CurveParameters) -> Result<Arc<MeshSnapshot>> {
        let _rebuild = self.rebuild.lock().unwrap_or_else(PoisonError::into_inner);
        let existing = self.current();
        if existing.params == params {
            debug!("parameters unchanged, keeping current mesh");
            return Ok(existing);
        }

        let mesh = TubeMesh::generate_with(&params, &self.options)?;
        let snapshot = Arc::new(MeshSnapshot { params, mesh });

        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&snapshot);
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SweepError;

    fn params(n: u32, m: u32) -> CurveParameters {
        CurveParameters {
            n,
            m,
            ..Default::default()
        }
    }

    #[test]
    fn test_regenerate_swaps() {
        let slot = MeshSlot::new(params(8, 4)).unwrap();
        let before = slot.current();
        assert_eq!(before.mesh.positions().len(), 32);

        let after = slot.regenerate(params(10, 6)).unwrap();
        assert_eq!(after.mesh.positions().len(), 60);
        assert_eq!(slot.current().params, params(10, 6));

        // Old readers keep their consistent snapshot
        assert_eq!(before.mesh.positions().len(), 32);
        assert_eq!(before.mesh.indices().len(), 8 * 10);
    }

    #[test]
    fn test_failed_regenerate_keeps_previous() {
        let slot = MeshSlot::new(params(8, 4)).unwrap();
        let result = slot.regenerate(params(2, 4));
        assert!(matches!(result, Err(SweepError::InvalidParameters(_))));
        assert_eq!(slot.current().params, params(8, 4));
        assert_eq!(slot.current().mesh.rings(), 8);
    }

    #[test]
    fn test_same_params_reuse_snapshot() {
        let slot = MeshSlot::new(params(8, 4)).unwrap();
        let a = slot.current();
        let b = slot.regenerate(params(8, 4)).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_concurrent_regenerations_are_serialized() {
        let slot = MeshSlot::new(params(8, 4)).unwrap();
        let requests: Vec<CurveParameters> = (0..6).map(|k| params(10 + k, 5)).collect();

        let results: Vec<Arc<MeshSnapshot>> = std::thread::scope(|scope| {
            let handles: Vec<_> = requests
                .iter()
                .map(|&p| {
                    let slot = &slot;
                    scope.spawn(move || slot.regenerate(p).unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        // Each caller gets the mesh it asked for
        for (request, snapshot) in requests.iter().zip(&results) {
            assert_eq!(&snapshot.params, request);
            assert_eq!(snapshot.mesh.rings(), request.n as usize);
        }

        // The slot holds exactly one of the returned snapshots
        let current = slot.current();
        assert!(results.iter().any(|s| Arc::ptr_eq(s, &current)));
    }

    #[test]
    fn test_new_rejects_invalid() {
        assert!(MeshSlot::new(params(8, 1)).is_err());
    }
}
