use crate::core::bit_coder::{ByteReader, ReaderErr};
use crate::core::half::F16;
use crate::core::mesh::Vertex;

#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Not enough data: {0}")]
    NotEnoughData(#[from] ReaderErr),
    #[error("Vertex buffer of {0} vertices does not fit in memory")]
    TooLarge(u32),
}

/// Reads `vertex_count` 32-byte vertex records as one contiguous block.
///
/// The count in the header is authoritative: a negative U coordinate is data,
/// not an end-of-list marker.
pub fn decode_vertices<W>(reader: &mut W, vertex_count: u32) -> Result<Vec<Vertex>, Err>
where
    W: ByteReader,
{
    let num_bytes = (vertex_count as usize)
        .checked_mul(Vertex::SIZE)
        .ok_or(Err::TooLarge(vertex_count))?;
    let mut block = reader.read_bytes(num_bytes)?.into_iter();
    (0..vertex_count)
        .map(|_| decode_vertex(&mut block))
        .collect()
}

fn decode_vertex<W>(reader: &mut W) -> Result<Vertex, Err>
where
    W: ByteReader,
{
    let position = [reader.read_f32()?, reader.read_f32()?, reader.read_f32()?];
    let unknown = [reader.read_i16()?, reader.read_i16()?, reader.read_i16()?, reader.read_i16()?];
    let u = F16::from_le_bytes(reader.read_array()?);
    let v = F16::from_le_bytes(reader.read_array()?);
    let bone_index: [u8; 4] = reader.read_array()?;
    let bone_weight: [u8; 4] = reader.read_array()?;
    Ok(Vertex { position, unknown, u, v, bone_index, bone_weight })
}
