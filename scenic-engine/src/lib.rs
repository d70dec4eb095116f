//! # Scenic Engine
//!
//! The interaction engine for [`scenic_core`] scenes: binds to one raster
//! surface, owns one [`scenic_core::Scene`] and one
//! [`scenic_core::Viewport`], turns raw pointer/wheel input into high-level
//! engine events, and coalesces every mutation into at most one repaint per
//! frame.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               scenic-engine                 │
//! ├──────────────────────┬──────────────────────┤
//! │  Gesture machine     │  Repaint pipeline    │
//! │  - pan / drag        │  - frame coalescing  │
//! │  - tap select        │  - background + grid │
//! │  - rect/poly draw    │  - scene + pending   │
//! ├──────────────────────┼──────────────────────┤
//! │  Event bus           │  Binding registry    │
//! │  - typed pub/sub     │  - one engine per    │
//! │  - 4 event kinds     │    surface           │
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! All state transitions run synchronously inside the input handlers; the
//! only asynchrony is that [`Scenic::repaint`] schedules a paint for the
//! host's next [`Scenic::run_frame`] call instead of painting immediately.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bus;
pub mod engine;
pub mod error;
pub mod event;
pub mod registry;

pub use bus::EventBus;
pub use engine::{Scenic, ScenicConfig};
pub use error::{EngineError, EngineResult};
pub use event::{DrawingMode, EngineEvent, EventKind, PointerEvent, PointerPhase};
pub use registry::{BindingRegistry, EngineId};

/// Engine crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
