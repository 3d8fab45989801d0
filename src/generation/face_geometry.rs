//! Per-face geometric attributes
//!
//! Computes, for each triangle, its centroid, unit normal, area, slope
//! against the local radial direction, and the latitude/longitude of its
//! centroid. All arrays are parallel to the face list.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Parallel per-face geometry arrays, indexed by face index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceGeometry {
    /// Centroid of the three vertices
    pub centers: Vec<DVec3>,
    /// Unit normal, or the zero vector for a degenerate face
    pub normals: Vec<DVec3>,
    /// Triangle area (half the cross product magnitude)
    pub areas: Vec<f64>,
    /// Angle in degrees between the normal and the radial direction at the centroid
    pub slopes: Vec<f64>,
    /// Latitude of the centroid in degrees
    pub latitudes: Vec<f64>,
    /// Longitude of the centroid in degrees
    pub longitudes: Vec<f64>,
}

impl FaceGeometry {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            centers: Vec::with_capacity(capacity),
            normals: Vec::with_capacity(capacity),
            areas: Vec::with_capacity(capacity),
            slopes: Vec::with_capacity(capacity),
            latitudes: Vec::with_capacity(capacity),
            longitudes: Vec::with_capacity(capacity),
        }
    }

    /// Number of faces described
    #[inline]
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    /// Check if no faces are described
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Sum of all face areas
    pub fn total_area(&self) -> f64 {
        self.areas.iter().sum()
    }
}

/// Compute geometry for every face
///
/// A degenerate (collinear) triangle gets a zero normal, zero area and zero
/// slope; it is not an error.
///
/// # Example
///
/// ```rust
/// use icosphere_planet::generation::{compute_face_geometry, generate_icosphere};
///
/// let (vertices, faces) = generate_icosphere(1.0, 3).unwrap();
/// let geometry = compute_face_geometry(&vertices, &faces);
/// assert_eq!(geometry.len(), faces.len());
/// ```
pub fn compute_face_geometry(vertices: &[DVec3], faces: &[[u32; 3]]) -> FaceGeometry {
    let mut geometry = FaceGeometry::with_capacity(faces.len());

    for &[i1, i2, i3] in faces {
        let v1 = vertices[i1 as usize];
        let v2 = vertices[i2 as usize];
        let v3 = vertices[i3 as usize];

        let center = (v1 + v2 + v3) / 3.0;
        let raw_normal = (v2 - v1).cross(v3 - v1);
        let length = raw_normal.length();

        if length == 0.0 {
            geometry.normals.push(DVec3::ZERO);
            geometry.areas.push(0.0);
            geometry.slopes.push(0.0);
        } else {
            let normal = raw_normal / length;
            geometry.normals.push(normal);
            geometry.areas.push(0.5 * length);
            geometry.slopes.push(slope_degrees(normal, center));
        }

        let (latitude, longitude) = lat_lon_degrees(center);
        geometry.centers.push(center);
        geometry.latitudes.push(latitude);
        geometry.longitudes.push(longitude);
    }

    geometry
}

/// Angle between a unit normal and the radial direction through `center`
fn slope_degrees(normal: DVec3, center: DVec3) -> f64 {
    let radial = center.normalize_or_zero();
    let cos_angle = normal.dot(radial).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Latitude/longitude in degrees of a point treated as lying on a sphere
/// centered at the origin
///
/// The origin itself maps to (0, 0).
pub fn lat_lon_degrees(point: DVec3) -> (f64, f64) {
    let r = point.length();
    if r == 0.0 {
        return (0.0, 0.0);
    }

    let latitude = (point.z / r).clamp(-1.0, 1.0).asin().to_degrees();
    let longitude = point.y.atan2(point.x).to_degrees();
    (latitude, longitude)
}

/// Point on a sphere of the given radius at latitude/longitude in degrees
///
/// Inverse of [`lat_lon_degrees`].
pub fn point_from_lat_lon(latitude: f64, longitude: f64, radius: f64) -> DVec3 {
    let lat = latitude.to_radians();
    let lon = longitude.to_radians();
    DVec3::new(
        radius * lat.cos() * lon.cos(),
        radius * lat.cos() * lon.sin(),
        radius * lat.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::generate_icosphere;
    use std::f64::consts::PI;

    #[test]
    fn test_degenerate_face_falls_back_to_zero() {
        let vertices = vec![
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(3.0, 0.0, 0.0),
        ];
        let geometry = compute_face_geometry(&vertices, &[[0, 1, 2]]);

        assert_eq!(geometry.normals[0], DVec3::ZERO);
        assert_eq!(geometry.areas[0], 0.0);
        assert_eq!(geometry.slopes[0], 0.0);
        assert_eq!(geometry.centers[0], DVec3::new(2.0, 0.0, 0.0));
        assert_eq!(geometry.latitudes[0], 0.0);
        assert_eq!(geometry.longitudes[0], 0.0);
    }

    #[test]
    fn test_single_triangle() {
        // Right triangle in the plane z = 1, facing +z
        let vertices = vec![
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(0.0, 1.0, 1.0),
        ];
        let geometry = compute_face_geometry(&vertices, &[[0, 1, 2]]);

        assert!((geometry.areas[0] - 0.5).abs() < 1e-12);
        assert!((geometry.normals[0] - DVec3::Z).length() < 1e-12);

        let center = geometry.centers[0];
        assert!((center - DVec3::new(1.0 / 3.0, 1.0 / 3.0, 1.0)).length() < 1e-12);

        let expected_slope = DVec3::Z.dot(center.normalize()).acos().to_degrees();
        assert!((geometry.slopes[0] - expected_slope).abs() < 1e-9);
        assert!((geometry.longitudes[0] - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_arrays_are_parallel() {
        let (vertices, faces) = generate_icosphere(5.0, 2).unwrap();
        let geometry = compute_face_geometry(&vertices, &faces);

        assert_eq!(geometry.centers.len(), faces.len());
        assert_eq!(geometry.normals.len(), faces.len());
        assert_eq!(geometry.areas.len(), faces.len());
        assert_eq!(geometry.slopes.len(), faces.len());
        assert_eq!(geometry.latitudes.len(), faces.len());
        assert_eq!(geometry.longitudes.len(), faces.len());
    }

    #[test]
    fn test_icosphere_normals_point_outward() {
        let (vertices, faces) = generate_icosphere(1.0, 3).unwrap();
        let geometry = compute_face_geometry(&vertices, &faces);

        for (i, normal) in geometry.normals.iter().enumerate() {
            assert!((normal.length() - 1.0).abs() < 1e-9);
            assert!(normal.dot(geometry.centers[i]) > 0.0, "face {} faces inward", i);
            // Facets on a fine sphere are nearly tangent
            assert!(geometry.slopes[i] < 10.0, "face {} slope {}", i, geometry.slopes[i]);
        }
    }

    #[test]
    fn test_surface_area_converges() {
        let radius = 6371.0;
        let ideal = 4.0 * PI * radius * radius;

        let mut previous_error = f64::MAX;
        for level in 0..=5 {
            let (vertices, faces) = generate_icosphere(radius, level).unwrap();
            let area = compute_face_geometry(&vertices, &faces).total_area();
            let error = (ideal - area).abs() / ideal;

            assert!(error < previous_error, "level {} did not improve", level);
            if level >= 4 {
                assert!(error < 0.01, "level {} area error {}", level, error);
            }
            previous_error = error;
        }
    }

    #[test]
    fn test_lat_lon_ranges() {
        let (vertices, faces) = generate_icosphere(1.0, 3).unwrap();
        let geometry = compute_face_geometry(&vertices, &faces);

        for i in 0..geometry.len() {
            assert!((-90.0..=90.0).contains(&geometry.latitudes[i]));
            assert!((-180.0..=180.0).contains(&geometry.longitudes[i]));
        }
    }

    #[test]
    fn test_lat_lon_round_trip() {
        let point = point_from_lat_lon(35.0, -120.0, 6371.0);
        assert!((point.length() - 6371.0).abs() < 1e-9);

        let (lat, lon) = lat_lon_degrees(point);
        assert!((lat - 35.0).abs() < 1e-9);
        assert!((lon + 120.0).abs() < 1e-9);

        assert_eq!(lat_lon_degrees(DVec3::ZERO), (0.0, 0.0));
    }
}
