//! Tracking of which engine is bound to which surface.
//!
//! Exactly one engine may interact with a surface at a time. Instead of
//! stashing the engine on the surface object, bindings live in an explicit
//! process-wide registry: binding a surface that is already bound silently
//! displaces the previous engine (which then ignores all further input), and
//! entries are torn down on detach.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock};

use scenic_core::SurfaceId;

/// Identity of one engine instance within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineId(u64);

impl EngineId {
    /// Allocate the next engine ID.
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for EngineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "engine-{}", self.0)
    }
}

/// The process-wide surface-to-engine binding table.
#[derive(Debug, Default)]
pub struct BindingRegistry {
    bindings: Mutex<HashMap<SurfaceId, EngineId>>,
}

impl BindingRegistry {
    /// The process-wide registry, initialized on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        static REGISTRY: OnceLock<BindingRegistry> = OnceLock::new();
        REGISTRY.get_or_init(Self::default)
    }

    /// Bind an engine to a surface, returning the engine it displaced, if
    /// any.
    pub fn bind(&self, surface: SurfaceId, engine: EngineId) -> Option<EngineId> {
        self.lock().insert(surface, engine)
    }

    /// Remove the binding for a surface, but only if it still belongs to the
    /// given engine. Returns whether an entry was removed.
    pub fn release(&self, surface: SurfaceId, engine: EngineId) -> bool {
        let mut bindings = self.lock();
        if bindings.get(&surface) == Some(&engine) {
            bindings.remove(&surface);
            true
        } else {
            false
        }
    }

    /// The engine currently bound to a surface, if any.
    #[must_use]
    pub fn bound(&self, surface: SurfaceId) -> Option<EngineId> {
        self.lock().get(&surface).copied()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SurfaceId, EngineId>> {
        // Input delivery is single-threaded; a poisoned lock only means a
        // panicking test, so recover the inner map.
        self.bindings
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
