use crate::core::bit_coder::{ByteReader, ReaderErr};
use crate::core::mesh::Header;

#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Not enough data for the {size}-byte header: {0}", size = Header::SIZE)]
    NotEnoughData(#[from] ReaderErr),
}

/// Reads the 40-byte header field by field, little-endian.
pub fn decode_header<W>(reader: &mut W) -> Result<Header, Err>
where
    W: ByteReader,
{
    // Read the whole block first so that a short stream fails before any field is used.
    let mut block = reader.read_bytes(Header::SIZE)?.into_iter();

    let version = block.read_u8()?;
    let index_count = block.read_u32()?;
    let vertex_count = block.read_u32()?;
    let unknown1 = block.read_u8()?;
    let mesh_group_count = block.read_u8()?;
    let unknown2 = block.read_u8()?;
    let total_name_length = block.read_u32()?;

    let mut bounding_box = [0_f32; 6];
    for corner in bounding_box.iter_mut() {
        *corner = block.read_f32()?;
    }

    Ok(
        Header {
            version,
            index_count,
            vertex_count,
            unknown1,
            mesh_group_count,
            unknown2,
            total_name_length,
            bounding_box,
        }
    )
}
