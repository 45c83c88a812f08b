use thiserror::Error;

use super::{GroupDescriptor, Header, Mesh, MeshGroup, Vertex};

/// Assembles a [`Mesh`] and derives every header field that follows from the
/// data: counts, name lengths, and the bounding box.
pub struct MeshBuilder {
    version: u8,
    unknown: (u8, u8),
    vertices: Vec<Vertex>,
    faces: Vec<[u16; 3]>,
    /// group name and the face count at the time the group was opened.
    groups: Vec<(String, usize)>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self {
            version: 1,
            unknown: (0, 0),
            vertices: Vec::new(),
            faces: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn set_version(&mut self, version: u8) -> &mut Self {
        self.version = version;
        self
    }

    /// Sets the two header bytes whose meaning is unknown; they are carried as-is.
    pub fn set_unknown_header_bytes(&mut self, unknown1: u8, unknown2: u8) -> &mut Self {
        self.unknown = (unknown1, unknown2);
        self
    }

    /// Adds a vertex with the given position and texture coordinate and returns its index.
    pub fn add_vertex(&mut self, position: [f32; 3], uv: [f32; 2]) -> usize {
        self.push_vertex(Vertex::new(position, uv))
    }

    pub fn push_vertex(&mut self, vertex: Vertex) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    pub fn add_face(&mut self, face: [u16; 3]) -> &mut Self {
        self.faces.push(face);
        self
    }

    /// Opens a group starting at the next face to be added.
    pub fn begin_group(&mut self, name: &str) -> &mut Self {
        self.groups.push((name.to_owned(), self.faces.len()));
        self
    }

    pub fn build(self) -> Result<Mesh, Err> {
        let Self { version, unknown, vertices, faces, groups } = self;

        if groups.len() > u8::MAX as usize {
            return Err(Err::TooManyGroups(groups.len()));
        }
        let vertex_count = u32::try_from(vertices.len())
            .map_err(|_| Err::TooManyVertices(vertices.len()))?;
        let index_count = u32::try_from(faces.len())
            .map_err(|_| Err::TooManyFaces(faces.len()))?;

        for (face_idx, face) in faces.iter().enumerate() {
            if let Some(&index) = face.iter().find(|&&i| i as usize >= vertices.len()) {
                return Err(Err::IndexOutOfRange { face: face_idx, index, vertex_count: vertices.len() });
            }
        }

        let groups = groups.into_iter()
            .map(|(name, face_offset)| {
                let name_length = u32::try_from(name.encode_utf16().count() * 2)
                    .map_err(|_| Err::NameTooLong(name.clone()))?;
                Ok(MeshGroup {
                    descriptor: GroupDescriptor { name_length, face_offset: face_offset as u32 },
                    name,
                })
            })
            .collect::<Result<Vec<_>, Err>>()?;

        let header = Header {
            version,
            index_count,
            vertex_count,
            unknown1: unknown.0,
            mesh_group_count: groups.len() as u8,
            unknown2: unknown.1,
            total_name_length: total_name_length(&groups),
            bounding_box: bounding_box(&vertices),
        };

        Ok(Mesh {
            header,
            groups,
            indices: faces.into_iter().flatten().collect(),
            vertices,
        })
    }
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn total_name_length(groups: &[MeshGroup]) -> u32 {
    groups.iter()
        .map(|g| g.descriptor.name_length)
        .fold(0_u32, u32::saturating_add)
}

/// `[min_x, min_y, min_z, max_x, max_y, max_z]`, or all zeros for an empty mesh.
pub(crate) fn bounding_box(vertices: &[Vertex]) -> [f32; 6] {
    if vertices.is_empty() {
        return [0.0; 6];
    }
    let mut bb = [f32::MAX, f32::MAX, f32::MAX, f32::MIN, f32::MIN, f32::MIN];
    for v in vertices {
        for i in 0..3 {
            bb[i] = bb[i].min(v.position[i]);
            bb[i + 3] = bb[i + 3].max(v.position[i]);
        }
    }
    bb
}

#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Err {
    #[error("Face {face} refers to vertex {index}, but the mesh has only {vertex_count} vertices")]
    IndexOutOfRange { face: usize, index: u16, vertex_count: usize },
    #[error("Group name {0:?} is too long to be stored")]
    NameTooLong(String),
    #[error("Too many faces: {0}")]
    TooManyFaces(usize),
    #[error("Too many mesh groups: {0} (at most 255)")]
    TooManyGroups(usize),
    #[error("Too many vertices: {0}")]
    TooManyVertices(usize),
}
