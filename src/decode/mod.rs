pub mod header;
pub mod group;
pub mod index;
pub mod vertex;

use crate::core::bit_coder::ByteReader;
use crate::core::mesh::{Mesh, MeshGroup};
use crate::core::shared::ConfigType;

/// Decodes an SMD stream into a [`Mesh`].
///
/// The stream is read once, front to back: header, descriptor table, names,
/// indices, vertices. The counts in the header are trusted. Any failure aborts
/// the decode; no partially decoded mesh is returned.
pub fn decode<W>(reader: &mut W, cfg: Config) -> Result<Mesh, Err>
where
    W: ByteReader,
{
    // Decode header
    let header = header::decode_header(reader)
        .map_err(Err::HeaderReadFailed)?;
    tracing::debug!(
        version = header.version,
        triangles = header.index_count,
        vertices = header.vertex_count,
        groups = header.mesh_group_count,
        total_name_length = header.total_name_length,
        "decoded SMD header"
    );

    // Decode the descriptor table, then the names in descriptor order
    let descriptors = group::decode_descriptors(reader, header.mesh_group_count)?;
    let mut groups = Vec::with_capacity(descriptors.len());
    for (idx, descriptor) in descriptors.into_iter().enumerate() {
        let name = group::decode_name(reader, descriptor.name_length, cfg.max_name_length)
            .map_err(|source| Err::StringReadFailed { group: idx, source })?;
        tracing::debug!(group = idx, face_offset = descriptor.face_offset, "mesh group {:?}", name);
        groups.push(MeshGroup { descriptor, name });
    }

    // Decode index buffer
    let indices = index::decode_indices(reader, header.index_count)?;

    // Decode vertex buffer
    let vertices = vertex::decode_vertices(reader, header.vertex_count)?;

    let mesh = Mesh { header, groups, indices, vertices };

    if !mesh.is_group_order_monotonic() {
        if cfg.strict_group_order {
            return Err(Err::GroupOrder);
        }
        tracing::warn!("mesh group face offsets are not in ascending order; some groups will not be emitted");
    }

    tracing::info!(
        "decoded SMD mesh: {} vertices, {} triangles, {} groups",
        mesh.vertices.len(),
        mesh.num_faces(),
        mesh.groups.len()
    );

    Ok(mesh)
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Reject meshes whose group face offsets decrease. When off, such meshes are
    /// decoded as-is and the out-of-order groups are skipped at emission.
    pub strict_group_order: bool,
    /// Largest accepted name length in bytes. Unlimited by default.
    pub max_name_length: u32,
}

impl ConfigType for Config {
    fn default() -> Self {
        Self {
            strict_group_order: false,
            max_name_length: u32::MAX,
        }
    }
}

#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Mesh group face offsets are not in ascending order")]
    GroupOrder,
    #[error("Mesh group descriptor read failed: {0}")]
    GroupReadFailed(#[from] group::Err),
    #[error("Header read failed: {0}")]
    HeaderReadFailed(#[from] header::Err),
    #[error("Index buffer read failed: {0}")]
    IndexReadFailed(#[from] index::Err),
    #[error("Name read failed for mesh group {group}: {source}")]
    StringReadFailed {
        group: usize,
        #[source]
        source: group::Err,
    },
    #[error("Vertex buffer read failed: {0}")]
    VertexReadFailed(#[from] vertex::Err),
}
