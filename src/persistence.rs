//! Directory-based planet persistence
//!
//! A saved planet is a directory holding:
//!
//! | file            | content                              | required |
//! |-----------------|--------------------------------------|----------|
//! | `mesh.bin.lz4`  | bincode mesh, LZ4-compressed         | yes      |
//! | `metadata.json` | name, seed, generation time, version | yes      |
//! | `elevation.bin` | bincode `Vec<f64>`                   | no       |
//! | `cratons.bin`   | bincode `Vec<i32>`                   | no       |
//! | `biomes.json`   | JSON list of biome tags              | no       |
//!
//! An absent layer is represented by an absent file. The metadata document
//! is the single source of truth for planet identity.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{PlanetError, Result};
use crate::mesh::PlanetMesh;
use crate::planet::{Planet, PLANET_FORMAT_VERSION};

/// Compressed mesh artifact
pub const MESH_FILE: &str = "mesh.bin.lz4";
/// Planet identity document
pub const METADATA_FILE: &str = "metadata.json";
/// Per-face elevation layer
pub const ELEVATION_FILE: &str = "elevation.bin";
/// Per-face craton ID layer
pub const CRATONS_FILE: &str = "cratons.bin";
/// Biome tag list
pub const BIOMES_FILE: &str = "biomes.json";

/// Contents of `metadata.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetMetadata {
    pub name: String,
    pub seed: u64,
    pub generation_time: String,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    PLANET_FORMAT_VERSION.to_string()
}

impl Planet {
    /// Save this planet into `directory`, creating it if needed
    ///
    /// See [`save_planet`].
    pub fn save(&self, directory: impl AsRef<Path>) -> Result<()> {
        save_planet(self, directory.as_ref())
    }

    /// Load a planet previously written by [`Planet::save`]
    ///
    /// See [`load_planet`].
    pub fn load(directory: impl AsRef<Path>) -> Result<Self> {
        load_planet(directory.as_ref())
    }
}

/// Save a planet into a directory
///
/// Writes the mesh artifact, each present layer, then the metadata document.
/// Layer files left behind by an earlier save are removed when that layer is
/// now absent.
///
/// # Errors
///
/// Any filesystem or encoding failure, with the offending path.
///
/// # Example
///
/// ```no_run
/// use icosphere_planet::*;
///
/// let mesh = PlanetMesh::generate(6371.0, 3).unwrap();
/// let planet = Planet::new("Terra", 42, mesh);
/// save_planet(&planet, "gamedata/planets/Terra".as_ref()).unwrap();
/// ```
pub fn save_planet(planet: &Planet, directory: &Path) -> Result<()> {
    fs::create_dir_all(directory)
        .map_err(|e| PlanetError::io("create directory", directory, e))?;

    let mesh_path = directory.join(MESH_FILE);
    let encoded = bincode::serialize(&planet.mesh).map_err(|source| PlanetError::Encode {
        path: mesh_path.clone(),
        source,
    })?;
    write_file(&mesh_path, &lz4_flex::compress_prepend_size(&encoded))?;
    info!("Saved mesh to {}", mesh_path.display());

    save_layer(directory.join(ELEVATION_FILE), planet.elevation.as_ref(), "elevation")?;
    save_layer(directory.join(CRATONS_FILE), planet.cratons.as_ref(), "craton map")?;

    let biomes_path = directory.join(BIOMES_FILE);
    match &planet.biome_tags {
        Some(tags) => {
            write_json(&biomes_path, tags)?;
            info!("Saved biome tags to {}", biomes_path.display());
        }
        None => {
            remove_stale(&biomes_path)?;
            info!("No biome tags to save");
        }
    }

    let metadata = PlanetMetadata {
        name: planet.name.clone(),
        seed: planet.seed,
        generation_time: planet.generation_time.clone(),
        version: planet.version.clone(),
    };
    let metadata_path = directory.join(METADATA_FILE);
    write_json(&metadata_path, &metadata)?;
    info!("Saved metadata to {}", metadata_path.display());

    info!("Planet save complete: {}", directory.display());
    Ok(())
}

/// Load a planet from a directory
///
/// The mesh artifact and metadata document are required; each optional layer
/// is loaded independently and is `None` when its file is absent.
///
/// # Errors
///
/// `MissingArtifact` if the mesh or metadata file is absent; `InvalidLayer`
/// if an elevation or craton layer does not hold one value per face; any
/// other filesystem or decoding failure, with the offending path.
pub fn load_planet(directory: &Path) -> Result<Planet> {
    let mesh_path = directory.join(MESH_FILE);
    let compressed = read_required(&mesh_path)?;
    let encoded = lz4_flex::decompress_size_prepended(&compressed).map_err(|source| {
        PlanetError::Decompress {
            path: mesh_path.clone(),
            source,
        }
    })?;
    let mesh: PlanetMesh = bincode::deserialize(&encoded).map_err(|source| PlanetError::Decode {
        path: mesh_path.clone(),
        source,
    })?;
    info!("Loaded mesh from {}", mesh_path.display());

    let metadata_path = directory.join(METADATA_FILE);
    let metadata: PlanetMetadata = parse_json(&metadata_path, &read_required(&metadata_path)?)?;
    info!("Loaded metadata from {}", metadata_path.display());

    let faces = mesh.face_count();
    let elevation = load_layer::<f64>(directory.join(ELEVATION_FILE), faces, "elevation")?;
    let cratons = load_layer::<i32>(directory.join(CRATONS_FILE), faces, "craton map")?;

    let biomes_path = directory.join(BIOMES_FILE);
    let biome_tags: Option<Vec<String>> = match read_optional(&biomes_path)? {
        Some(bytes) => {
            info!("Loaded biome tags from {}", biomes_path.display());
            Some(parse_json(&biomes_path, &bytes)?)
        }
        None => {
            info!("No biome tags found");
            None
        }
    };

    info!("Planet load complete: {}", directory.display());

    Ok(Planet {
        name: metadata.name,
        seed: metadata.seed,
        mesh,
        elevation,
        cratons,
        biome_tags,
        generation_time: metadata.generation_time,
        version: metadata.version,
    })
}

fn save_layer<T: Serialize>(path: PathBuf, layer: Option<&Vec<T>>, label: &str) -> Result<()> {
    match layer {
        Some(values) => {
            let encoded = bincode::serialize(values).map_err(|source| PlanetError::Encode {
                path: path.clone(),
                source,
            })?;
            write_file(&path, &encoded)?;
            info!("Saved {} to {}", label, path.display());
        }
        None => {
            remove_stale(&path)?;
            info!("No {} to save", label);
        }
    }
    Ok(())
}

fn load_layer<T: DeserializeOwned>(
    path: PathBuf,
    faces: usize,
    label: &str,
) -> Result<Option<Vec<T>>> {
    match read_optional(&path)? {
        Some(bytes) => {
            let values: Vec<T> = bincode::deserialize(&bytes).map_err(|source| PlanetError::Decode {
                path: path.clone(),
                source,
            })?;
            if values.len() != faces {
                return Err(PlanetError::InvalidLayer {
                    path,
                    expected: faces,
                    found: values.len(),
                });
            }
            info!("Loaded {} from {}", label, path.display());
            Ok(Some(values))
        }
        None => {
            info!("No {} found", label);
            Ok(None)
        }
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|e| PlanetError::io("write", path, e))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_vec_pretty(value).map_err(|source| PlanetError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    write_file(path, &json)
}

fn parse_json<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|source| PlanetError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read_required(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(PlanetError::MissingArtifact {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(PlanetError::io("read", path, e)),
    }
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PlanetError::io("read", path, e)),
    }
}

/// Remove a layer file from an earlier save so absence keeps meaning "no layer"
fn remove_stale(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed stale {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(PlanetError::io("remove", path, e)),
    }
}
