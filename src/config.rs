//! Planet Configuration and Builder
//!
//! This module provides configuration types for deterministic icosphere planet generation.

use serde::{Deserialize, Serialize};

use crate::error::{PlanetError, Result};

/// Default planet radius in kilometers (Earth-like)
pub const DEFAULT_RADIUS_KM: f64 = 6371.0;

/// Default number of icosahedron subdivisions
pub const DEFAULT_SUBDIVISIONS: u32 = 6;

/// Default tolerance for the on-sphere vertex distance check (kilometers)
pub const DEFAULT_VERTEX_TOLERANCE: f64 = 1e-3;

/// Default planet name
pub const DEFAULT_PLANET_NAME: &str = "UnnamedPlanet";

/// Highest accepted subdivision level
///
/// Level 10 already produces 20,971,520 faces; vertex indices are `u32`.
pub const MAX_SUBDIVISIONS: u32 = 10;

/// Configuration for deterministic planet generation
///
/// The same radius and subdivision level always produce the identical mesh,
/// with the same vertex and face index assignment.
///
/// # Example
///
/// ```rust
/// use icosphere_planet::*;
///
/// let config = PlanetConfigBuilder::new()
///     .name("Terra")
///     .seed(42)
///     .subdivisions(3)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: PlanetConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetConfig {
    /// Planet name, used as the identity stored in the metadata document
    pub name: String,

    /// Seed recorded with the planet for downstream simulation layers
    ///
    /// Mesh generation itself is fully determined by radius and subdivisions.
    pub seed: u64,

    /// Sphere radius in kilometers
    pub radius: f64,

    /// Number of recursive icosahedron subdivisions
    ///
    /// - 0: bare icosahedron (20 faces)
    /// - 4: 5,120 faces
    /// - 6: 81,920 faces (default)
    pub subdivisions: u32,

    /// Allowed deviation of a vertex from the sphere surface during validation
    pub vertex_tolerance: f64,
}

impl PlanetConfig {
    /// Number of faces the configured mesh will have
    ///
    /// `None` if `subdivisions` was set so high the count overflows `usize`.
    #[inline]
    pub fn face_count(&self) -> Option<usize> {
        crate::generation::face_count_for(self.subdivisions)
    }

    /// Number of vertices the configured mesh will have
    #[inline]
    pub fn vertex_count(&self) -> Option<usize> {
        crate::generation::vertex_count_for(self.subdivisions)
    }
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_PLANET_NAME.to_string(),
            seed: rand::random(),
            radius: DEFAULT_RADIUS_KM,
            subdivisions: DEFAULT_SUBDIVISIONS,
            vertex_tolerance: DEFAULT_VERTEX_TOLERANCE,
        }
    }
}

/// Builder for creating PlanetConfig with validation
///
/// # Example
///
/// ```rust
/// use icosphere_planet::*;
///
/// // Use defaults
/// let config = PlanetConfigBuilder::new().build().unwrap();
/// assert_eq!(config.radius, 6371.0);
///
/// // Customize
/// let config = PlanetConfigBuilder::new()
///     .seed(12345)
///     .radius(3389.5)
///     .unwrap()
///     .subdivisions(4)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(config.face_count(), Some(5_120));
/// ```
#[derive(Debug, Clone)]
pub struct PlanetConfigBuilder {
    name: String,
    seed: Option<u64>,
    radius: f64,
    subdivisions: u32,
    vertex_tolerance: f64,
}

impl PlanetConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - name: "UnnamedPlanet"
    /// - seed: Random (generated from thread_rng)
    /// - radius: 6371 km
    /// - subdivisions: 6
    /// - vertex_tolerance: 1e-3
    pub fn new() -> Self {
        Self {
            name: DEFAULT_PLANET_NAME.to_string(),
            seed: None,
            radius: DEFAULT_RADIUS_KM,
            subdivisions: DEFAULT_SUBDIVISIONS,
            vertex_tolerance: DEFAULT_VERTEX_TOLERANCE,
        }
    }

    /// Set the planet name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the planet seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the sphere radius in kilometers
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if radius is not a finite value > 0
    pub fn radius(mut self, radius: f64) -> Result<Self> {
        validate_radius(radius)?;
        self.radius = radius;
        Ok(self)
    }

    /// Set the subdivision level
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if subdivisions > `MAX_SUBDIVISIONS`
    pub fn subdivisions(mut self, subdivisions: u32) -> Result<Self> {
        validate_subdivisions(subdivisions)?;
        self.subdivisions = subdivisions;
        Ok(self)
    }

    /// Set the on-sphere tolerance used by vertex validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the tolerance is negative or not finite
    pub fn vertex_tolerance(mut self, tolerance: f64) -> Result<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(PlanetError::InvalidParameter(format!(
                "vertex tolerance must be >= 0 (got {})",
                tolerance
            )));
        }
        self.vertex_tolerance = tolerance;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<PlanetConfig> {
        Ok(PlanetConfig {
            name: self.name,
            seed: self.seed.unwrap_or_else(rand::random),
            radius: self.radius,
            subdivisions: self.subdivisions,
            vertex_tolerance: self.vertex_tolerance,
        })
    }
}

impl Default for PlanetConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn validate_radius(radius: f64) -> Result<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(PlanetError::InvalidParameter(format!(
            "radius must be a positive finite number (got {})",
            radius
        )));
    }
    Ok(())
}

pub(crate) fn validate_subdivisions(subdivisions: u32) -> Result<()> {
    if subdivisions > MAX_SUBDIVISIONS {
        return Err(PlanetError::InvalidParameter(format!(
            "subdivisions must be <= {} (got {})",
            MAX_SUBDIVISIONS, subdivisions
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = PlanetConfigBuilder::new().build().unwrap();
        assert_eq!(config.name, "UnnamedPlanet");
        assert_eq!(config.radius, 6371.0);
        assert_eq!(config.subdivisions, 6);
        assert_eq!(config.vertex_tolerance, 1e-3);
    }

    #[test]
    fn test_builder_custom() {
        let config = PlanetConfigBuilder::new()
            .name("Arrakis")
            .seed(42)
            .radius(1000.0)
            .unwrap()
            .subdivisions(2)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.name, "Arrakis");
        assert_eq!(config.seed, 42);
        assert_eq!(config.radius, 1000.0);
        assert_eq!(config.subdivisions, 2);
        assert_eq!(config.face_count(), Some(320));
        assert_eq!(config.vertex_count(), Some(162));
    }

    #[test]
    fn test_builder_invalid_radius() {
        assert!(PlanetConfigBuilder::new().radius(0.0).is_err());
        assert!(PlanetConfigBuilder::new().radius(-5.0).is_err());
        assert!(PlanetConfigBuilder::new().radius(f64::NAN).is_err());
        assert!(PlanetConfigBuilder::new().radius(f64::INFINITY).is_err());
    }

    #[test]
    fn test_builder_too_many_subdivisions() {
        assert!(PlanetConfigBuilder::new().subdivisions(MAX_SUBDIVISIONS).is_ok());
        assert!(PlanetConfigBuilder::new().subdivisions(MAX_SUBDIVISIONS + 1).is_err());
    }

    #[test]
    fn test_counts_for_out_of_range_level() {
        let mut config = PlanetConfigBuilder::new().build().unwrap();
        config.subdivisions = 40;
        assert_eq!(config.face_count(), None);
        assert_eq!(config.vertex_count(), None);
    }

    #[test]
    fn test_builder_invalid_tolerance() {
        assert!(PlanetConfigBuilder::new().vertex_tolerance(-1.0).is_err());
        assert!(PlanetConfigBuilder::new().vertex_tolerance(0.0).is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = PlanetConfigBuilder::new().seed(12345).build().unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: PlanetConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, restored);
    }
}
