//! # Scenic Core
//!
//! Scene graph and value types for an interactive 2D drawing surface.
//!
//! A [`Scene`] is an ordered list of [`Layer`]s, each holding positioned
//! [`SceneElement`]s that paint themselves onto a raster [`Surface`] through
//! the [`Paintable`] trait. Array order is paint order (back to front), so
//! hit-testing walks the same arrays in reverse.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 scenic-core                 │
//! ├──────────────────────┬──────────────────────┤
//! │  Value types         │  Scene graph         │
//! │  - Point/Dimension   │  - Scene / Layer     │
//! │  - Bounds/Viewport   │  - SceneElement      │
//! │  - Color / Style     │  - Paintable trait   │
//! │  - Path              │  - built-in shapes   │
//! ├──────────────────────┴──────────────────────┤
//! │  Surface (raster seam, incl. recording      │
//! │  surface for headless use and tests)        │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod error;
pub mod geometry;
pub mod path;
pub mod scene;
pub mod shapes;
pub mod style;
pub mod surface;

pub use color::Color;
pub use error::{CoreError, CoreResult};
pub use geometry::{Bounds, Dimension, Point, Viewport};
pub use path::{Path, PathSegment};
pub use scene::{ElementId, Layer, Paintable, PositionedPaintable, Scene, SceneElement};
pub use shapes::{ImageRef, PathShape, Text};
pub use style::{LineCap, LineJoin, Style, TextAlign, TextDirection};
pub use surface::{RecordingSurface, Surface, SurfaceId, SurfaceOp};

/// Core crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
