use crate::core::bit_coder::{ByteReader, ReaderErr};

#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Not enough data: {0}")]
    NotEnoughData(#[from] ReaderErr),
    #[error("Index buffer of {0} triangles does not fit in memory")]
    TooLarge(u32),
}

/// Reads `3 * index_count` little-endian `u16` indices as one contiguous block.
pub fn decode_indices<W>(reader: &mut W, index_count: u32) -> Result<Vec<u16>, Err>
where
    W: ByteReader,
{
    let num_bytes = (index_count as usize)
        .checked_mul(3 * 2)
        .ok_or(Err::TooLarge(index_count))?;
    let block = reader.read_bytes(num_bytes)?;
    Ok(
        block.chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect()
    )
}
