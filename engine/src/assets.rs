//! Model loading and built-in primitives.
//!
//! Models are glTF/GLB files. Meshes are kept CPU-side here and uploaded by
//! the renderer the first time it sees them.

use std::collections::HashMap;
use std::f32::consts::{PI, TAU};
use std::path::{Path, PathBuf};

use glam::Vec3;
use thiserror::Error;

use crate::render::Vertex;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to import {path}: {source}")]
    Gltf {
        path: PathBuf,
        #[source]
        source: gltf::Error,
    },
    #[error("{0} contains no triangle geometry")]
    NoGeometry(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(usize);

impl MeshHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Unit cube centred on the origin.
    pub fn cube() -> Self {
        // (normal, tangent); the bitangent is normal x tangent so each face
        // winds counter-clockwise seen from outside.
        const FACES: [(Vec3, Vec3); 6] = [
            (Vec3::X, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z),
            (Vec3::Y, Vec3::Z),
            (Vec3::NEG_Y, Vec3::X),
            (Vec3::Z, Vec3::X),
            (Vec3::NEG_Z, Vec3::Y),
        ];
        let mut mesh = Self::default();
        for (normal, u) in FACES {
            let v = normal.cross(u);
            let base = mesh.vertices.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let p = (normal + u * su + v * sv) * 0.5;
                mesh.vertices.push(Vertex::new(p, normal));
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }

    /// UV sphere of radius 1 with its poles on the Z axis.
    pub fn sphere(stacks: u32, sectors: u32) -> Self {
        let stacks = stacks.max(2);
        let sectors = sectors.max(3);
        let mut mesh = Self::default();
        for i in 0..=stacks {
            let theta = PI * i as f32 / stacks as f32;
            for j in 0..=sectors {
                let phi = TAU * j as f32 / sectors as f32;
                let n = Vec3::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos());
                mesh.vertices.push(Vertex::new(n, n));
            }
        }
        let row = sectors + 1;
        for i in 0..stacks {
            for j in 0..sectors {
                let a = i * row + j;
                let b = a + row;
                mesh.indices.extend_from_slice(&[a, b, b + 1, a, b + 1, a + 1]);
            }
        }
        mesh
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Cube,
    Sphere,
}

/// Mesh store. Handles stay valid for the lifetime of the store.
#[derive(Debug, Default)]
pub struct Assets {
    meshes: Vec<MeshData>,
    by_path: HashMap<PathBuf, MeshHandle>,
    primitives: HashMap<Primitive, MeshHandle>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mesh: MeshData) -> MeshHandle {
        self.meshes.push(mesh);
        MeshHandle(self.meshes.len() - 1)
    }

    pub fn mesh(&self, handle: MeshHandle) -> &MeshData {
        &self.meshes[handle.0]
    }

    pub fn meshes(&self) -> &[MeshData] {
        &self.meshes
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn primitive(&mut self, primitive: Primitive) -> MeshHandle {
        if let Some(&handle) = self.primitives.get(&primitive) {
            return handle;
        }
        let mesh = match primitive {
            Primitive::Cube => MeshData::cube(),
            Primitive::Sphere => MeshData::sphere(16, 32),
        };
        let handle = self.insert(mesh);
        self.primitives.insert(primitive, handle);
        handle
    }

    /// Loads a glTF/GLB model. Repeated loads of the same path share a mesh.
    pub fn load_model(&mut self, path: impl AsRef<Path>) -> Result<MeshHandle, AssetError> {
        let path = path.as_ref();
        if let Some(&handle) = self.by_path.get(path) {
            return Ok(handle);
        }
        if !path.is_file() {
            return Err(AssetError::NotFound(path.to_path_buf()));
        }
        let mesh = import_gltf(path)?;
        log::info!(
            "Loaded model {}: {} vertices, {} triangles",
            path.display(),
            mesh.vertices.len(),
            mesh.triangle_count()
        );
        let handle = self.insert(mesh);
        self.by_path.insert(path.to_path_buf(), handle);
        Ok(handle)
    }
}

/// glTF is Y-up; the engine is Z-up. This is a proper rotation, so winding
/// is preserved.
fn y_up_to_z_up([x, y, z]: [f32; 3]) -> Vec3 {
    Vec3::new(x, -z, y)
}

/// Merges every triangle primitive of every mesh at its mesh-local
/// coordinates. Node transforms and scene hierarchy are ignored, so only
/// single-mesh models authored at the origin import faithfully.
fn import_gltf(path: &Path) -> Result<MeshData, AssetError> {
    let (document, buffers, _images) = gltf::import(path).map_err(|source| AssetError::Gltf {
        path: path.to_path_buf(),
        source,
    })?;

    let mut mesh = MeshData::default();
    for gmesh in document.meshes() {
        for primitive in gmesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                continue;
            }
            let reader = primitive.reader(|b| buffers.get(b.index()).map(|bb| bb.0.as_slice()));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let positions: Vec<[f32; 3]> = positions.collect();
            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .map(|n| n.collect())
                .unwrap_or_default();

            let base = mesh.vertices.len() as u32;
            for (i, p) in positions.iter().enumerate() {
                let n = normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]);
                mesh.vertices
                    .push(Vertex::new(y_up_to_z_up(*p), y_up_to_z_up(n)));
            }
            match reader.read_indices() {
                Some(indices) => mesh.indices.extend(indices.into_u32().map(|i| base + i)),
                None => mesh.indices.extend(base..base + positions.len() as u32),
            }
        }
    }

    if mesh.indices.is_empty() {
        return Err(AssetError::NoGeometry(path.to_path_buf()));
    }
    Ok(mesh)
}
