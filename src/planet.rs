//! Planet main structure
//!
//! A `Planet` wraps a generated mesh with its identity (name, seed,
//! generation time, format version) and optional per-face simulation layers.

use chrono::{SecondsFormat, Utc};
use tracing::info;

use crate::config::PlanetConfig;
use crate::error::{PlanetError, Result};
use crate::mesh::PlanetMesh;

/// Format version written with new planets and assumed for saves without one
pub const PLANET_FORMAT_VERSION: &str = "1.0";

/// A generated planet with optional simulation layers
///
/// Layers are `None` until attached. Elevation and craton layers hold one
/// value per face; biome tags are a free-form list.
///
/// # Examples
///
/// ```
/// use icosphere_planet::*;
///
/// let config = PlanetConfigBuilder::new()
///     .name("Terra")
///     .seed(42)
///     .subdivisions(2)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let planet = Planet::generate(&config).unwrap();
/// let elevation = vec![0.0; planet.mesh.face_count()];
/// let planet = planet.with_elevation(elevation).unwrap();
/// assert!(planet.elevation.is_some());
/// assert!(planet.cratons.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    /// Planet name
    pub name: String,

    /// Seed recorded for downstream simulation
    pub seed: u64,

    /// Surface mesh
    pub mesh: PlanetMesh,

    /// Per-face elevation
    pub elevation: Option<Vec<f64>>,

    /// Per-face craton (plate) IDs
    pub cratons: Option<Vec<i32>>,

    /// Biome tags
    pub biome_tags: Option<Vec<String>>,

    /// UTC generation time, ISO-8601
    pub generation_time: String,

    /// Persistence format version
    pub version: String,
}

impl Planet {
    /// Wrap a freshly generated mesh, stamping the current UTC time
    pub fn new(name: impl Into<String>, seed: u64, mesh: PlanetMesh) -> Self {
        Self {
            name: name.into(),
            seed,
            mesh,
            elevation: None,
            cratons: None,
            biome_tags: None,
            generation_time: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            version: PLANET_FORMAT_VERSION.to_string(),
        }
    }

    /// Generate the mesh described by `config` and wrap it
    pub fn generate(config: &PlanetConfig) -> Result<Self> {
        info!(
            name = %config.name,
            seed = config.seed,
            radius_km = config.radius,
            subdivisions = config.subdivisions,
            "Starting planet generation"
        );

        let mesh = PlanetMesh::from_config(config)?;
        info!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "Planet generation complete"
        );
        mesh.summary().log();

        Ok(Self::new(config.name.clone(), config.seed, mesh))
    }

    /// Attach a per-face elevation layer
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the layer length differs from the face count
    pub fn with_elevation(mut self, elevation: Vec<f64>) -> Result<Self> {
        self.check_face_layer("elevation", elevation.len())?;
        self.elevation = Some(elevation);
        Ok(self)
    }

    /// Attach a per-face craton ID layer
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the layer length differs from the face count
    pub fn with_cratons(mut self, cratons: Vec<i32>) -> Result<Self> {
        self.check_face_layer("cratons", cratons.len())?;
        self.cratons = Some(cratons);
        Ok(self)
    }

    /// Attach biome tags
    pub fn with_biome_tags(mut self, tags: Vec<String>) -> Self {
        self.biome_tags = Some(tags);
        self
    }

    fn check_face_layer(&self, layer: &str, len: usize) -> Result<()> {
        let expected = self.mesh.face_count();
        if len != expected {
            return Err(PlanetError::InvalidParameter(format!(
                "{} layer has {} values, mesh has {} faces",
                layer, len, expected
            )));
        }
        Ok(())
    }
}
