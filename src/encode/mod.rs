use thiserror::Error;

use crate::core::bit_coder::ByteWriter;
use crate::core::mesh::builder::{bounding_box, total_name_length};
use crate::core::mesh::{Header, Mesh, Vertex};
use crate::core::shared::ConfigType;

#[derive(Debug, Clone)]
pub struct Config {
    /// Recompute the bounding box and `total_name_length` from the mesh data instead of
    /// writing the stored header values back.
    pub compute_bounding_box: bool,
}

impl ConfigType for Config {
    fn default() -> Self {
        Self {
            compute_bounding_box: false,
        }
    }
}

#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Header declares {expected} {what}, but the mesh holds {actual}")]
    CountMismatch { what: &'static str, expected: usize, actual: usize },
    #[error("Mesh group {group} declares a {declared}-byte name, but {name:?} encodes to {actual} bytes")]
    NameLengthMismatch { group: usize, name: String, declared: u32, actual: usize },
}

/// Encodes the mesh into the SMD wire layout read by [`crate::decode::decode`].
pub fn encode<W>(mesh: &Mesh, writer: &mut W, cfg: Config) -> Result<(), Err>
where
    W: ByteWriter,
{
    check_counts(mesh)?;

    let mut header = mesh.header;
    if cfg.compute_bounding_box {
        header.bounding_box = bounding_box(&mesh.vertices);
        header.total_name_length = total_name_length(&mesh.groups);
    }
    encode_header(&header, writer);

    for group in &mesh.groups {
        writer.write_u32(group.descriptor.name_length);
        writer.write_u32(group.descriptor.face_offset);
    }
    for group in &mesh.groups {
        for unit in group.name.encode_utf16() {
            writer.write_u16(unit);
        }
    }

    for &index in &mesh.indices {
        writer.write_u16(index);
    }

    for vertex in &mesh.vertices {
        encode_vertex(vertex, writer);
    }

    tracing::debug!(
        "encoded SMD mesh: {} vertices, {} triangles, {} groups",
        mesh.vertices.len(),
        mesh.num_faces(),
        mesh.groups.len()
    );
    Ok(())
}

fn check_counts(mesh: &Mesh) -> Result<(), Err> {
    let header = &mesh.header;
    let counts = [
        ("vertices", header.vertex_count as usize, mesh.vertices.len()),
        ("indices", header.num_indices(), mesh.indices.len()),
        ("mesh groups", header.mesh_group_count as usize, mesh.groups.len()),
    ];
    if let Some(&(what, expected, actual)) = counts.iter().find(|(_, e, a)| e != a) {
        return Err(Err::CountMismatch { what, expected, actual });
    }

    for (idx, group) in mesh.groups.iter().enumerate() {
        let actual = group.name.encode_utf16().count() * 2;
        if actual != group.descriptor.name_length as usize {
            return Err(Err::NameLengthMismatch {
                group: idx,
                name: group.name.clone(),
                declared: group.descriptor.name_length,
                actual,
            });
        }
    }
    Ok(())
}

fn encode_header<W: ByteWriter>(header: &Header, writer: &mut W) {
    writer.write_u8(header.version);
    writer.write_u32(header.index_count);
    writer.write_u32(header.vertex_count);
    writer.write_u8(header.unknown1);
    writer.write_u8(header.mesh_group_count);
    writer.write_u8(header.unknown2);
    writer.write_u32(header.total_name_length);
    for corner in header.bounding_box {
        writer.write_f32(corner);
    }
}

fn encode_vertex<W: ByteWriter>(vertex: &Vertex, writer: &mut W) {
    for p in vertex.position {
        writer.write_f32(p);
    }
    for unk in vertex.unknown {
        writer.write_i16(unk);
    }
    writer.write_bytes(&vertex.u.to_le_bytes());
    writer.write_bytes(&vertex.v.to_le_bytes());
    writer.write_bytes(&vertex.bone_index);
    writer.write_bytes(&vertex.bone_weight);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mesh::builder::MeshBuilder;
    use crate::decode;

    fn sample() -> Mesh {
        let mut builder = MeshBuilder::new();
        builder.set_version(4);
        for i in 0..4 {
            builder.add_vertex([i as f32, -(i as f32), 0.5], [0.25 * i as f32, 1.0]);
        }
        builder.begin_group("Top").add_face([0, 1, 2]);
        builder.begin_group("Bottom").add_face([1, 2, 3]).add_face([3, 2, 0]);
        builder.build().unwrap()
    }

    #[test]
    fn wire_size() {
        let mesh = sample();
        let mut buffer: Vec<u8> = Vec::new();
        encode(&mesh, &mut buffer, Config::default()).unwrap();
        let names = (3 + 6) * 2;
        assert_eq!(buffer.len(), Header::SIZE + 2 * 8 + names + 3 * 3 * 2 + 4 * Vertex::SIZE);
    }

    #[test]
    fn decode_reproduces_encoded_mesh() {
        let mesh = sample();
        let mut buffer: Vec<u8> = Vec::new();
        encode(&mesh, &mut buffer, Config::default()).unwrap();
        let decoded = decode::decode(&mut buffer.into_iter(), decode::Config::default()).unwrap();
        assert_eq!(decoded, mesh);
    }

    #[test]
    fn recomputes_bounding_box() {
        let mut mesh = sample();
        mesh.header.bounding_box = [0.0; 6];
        mesh.header.total_name_length = 0;
        let mut buffer: Vec<u8> = Vec::new();
        encode(&mesh, &mut buffer, Config { compute_bounding_box: true }).unwrap();
        let decoded = decode::decode(&mut buffer.into_iter(), decode::Config::default()).unwrap();
        assert_eq!(decoded.get_header().bounding_box, [0.0, -3.0, 0.5, 3.0, 0.0, 0.5]);
        assert_eq!(decoded.get_header().total_name_length, 18);
    }

    #[test]
    fn rejects_inconsistent_mesh() {
        let mut mesh = sample();
        mesh.vertices.pop();
        assert_eq!(
            encode(&mesh, &mut Vec::<u8>::new(), Config::default()),
            Err(Err::CountMismatch { what: "vertices", expected: 4, actual: 3 })
        );

        let mut mesh = sample();
        mesh.groups[0].name = "Toppp".to_owned();
        assert!(matches!(
            encode(&mesh, &mut Vec::<u8>::new(), Config::default()),
            Err(Err::NameLengthMismatch { group: 0, declared: 6, actual: 10, .. })
        ));
    }
}
