//! Demonstration of PlanetMesh topology and spatial queries

use icosphere_planet::*;

fn main() -> Result<()> {
    println!("Generating mesh...");

    let mesh = PlanetMesh::generate(6371.0, 4)?;

    println!("Generated {} faces, {} vertices", mesh.face_count(), mesh.vertex_count());
    println!("Radius: {} km", mesh.radius());

    // Pentagon vertices and the faces around them
    println!("\nPentagon vertices valid: {}", mesh.verify_pentagon_vertices());
    for vertex in PlanetMesh::get_pentagon_vertices().iter().take(3) {
        let faces = mesh.get_faces_sharing_vertex(*vertex);
        println!("  Vertex {} is shared by faces {:?}", vertex, faces);
    }

    // Face rings
    let ring = mesh.get_face_ring(0);
    println!("\nFace ring around face 0: {:?}", ring);

    // Test spatial index if available
    #[cfg(feature = "spatial-index")]
    {
        let face = mesh
            .find_face_at_lat_lon(51.5, -0.13)
            .unwrap_or_default();
        let geometry = mesh.geometry();
        println!(
            "\nLat/lon (51.5, -0.13) is on face {} (center {:.2}°, {:.2}°, area {:.1} km², slope {:.3}°)",
            face,
            geometry.latitudes[face],
            geometry.longitudes[face],
            geometry.areas[face],
            geometry.slopes[face]
        );

        let nearby = mesh.faces_within_hops(face, 2);
        println!("Found {} faces within 2 hops of face {}", nearby.len(), face);
    }

    let summary = mesh.summary();
    println!(
        "\nMesh area {:.0} km² vs ideal sphere {:.0} km² ({:.3}% off)",
        summary.mesh_area,
        summary.sphere_area,
        summary.area_error() * 100.0
    );

    Ok(())
}
