//! Icosphere-based planet mesh generation
//!
//! A standalone library for building subdivided-icosahedron planet meshes,
//! deriving per-face topology and geometry, and saving planets with optional
//! simulation layers, suitable for any engine or simulation backend.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use icosphere_planet::*;
//!
//! // Generate a planet
//! let config = PlanetConfigBuilder::new()
//!     .name("Terra")
//!     .seed(42)
//!     .radius(6371.0).unwrap()
//!     .subdivisions(5).unwrap()
//!     .build().unwrap();
//!
//! let planet = Planet::generate(&config).unwrap();
//! println!("Generated {} faces", planet.mesh.face_count());
//!
//! // Check the topology and save it
//! assert!(planet.mesh.verify_pentagon_vertices());
//! planet.save("gamedata/planets/Terra").unwrap();
//! ```
//!
//! # Logging
//!
//! The crate emits `tracing` events and never installs a subscriber; the
//! application decides where they go.
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-face lookups using KD-tree

// Modules
pub mod error;
pub mod config;
pub mod generation;
pub mod mesh;
pub mod planet;
pub mod persistence;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{PlanetError, Result};
pub use config::{PlanetConfig, PlanetConfigBuilder, MAX_SUBDIVISIONS};
pub use generation::{AdjacencyMap, EdgeReport, FaceGeometry};
pub use mesh::{PlanetMesh, VertexFaceMap, validate_mesh, DistanceReport, GeometrySummary, ValidationReport};
pub use planet::{Planet, PLANET_FORMAT_VERSION};
pub use persistence::{load_planet, save_planet, PlanetMetadata};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec3 for convenience
pub use glam::DVec3;
