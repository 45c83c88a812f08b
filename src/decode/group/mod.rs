use crate::core::bit_coder::{ByteReader, ReaderErr};
use crate::core::mesh::GroupDescriptor;

#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Name is not valid UTF-16")]
    InvalidUtf16,
    #[error("Name length {0} exceeds the configured limit of {1} bytes")]
    NameTooLong(u32, u32),
    #[error("Not enough data: {0}")]
    NotEnoughData(#[from] ReaderErr),
    #[error("Name length {0} is odd, but UTF-16 names consist of 2-byte code units")]
    OddNameLength(u32),
}

/// Reads the whole descriptor table. Names come after it.
pub fn decode_descriptors<W>(reader: &mut W, count: u8) -> Result<Vec<GroupDescriptor>, Err>
where
    W: ByteReader,
{
    let mut table = reader.read_bytes(count as usize * GroupDescriptor::SIZE)?.into_iter();
    (0..count)
        .map(|_| -> Result<GroupDescriptor, Err> {
            Ok(GroupDescriptor {
                name_length: table.read_u32()?,
                face_offset: table.read_u32()?,
            })
        })
        .collect()
}

/// Reads one UTF-16LE name of `name_length` bytes.
pub fn decode_name<W>(reader: &mut W, name_length: u32, max_name_length: u32) -> Result<String, Err>
where
    W: ByteReader,
{
    if name_length % 2 != 0 {
        return Err(Err::OddNameLength(name_length));
    }
    if name_length > max_name_length {
        return Err(Err::NameTooLong(name_length, max_name_length));
    }
    let raw = reader.read_bytes(name_length as usize)?;
    utf16_from_le_bytes(&raw)
}

/// Decodes little-endian UTF-16. `bytes` must have even length.
pub(crate) fn utf16_from_le_bytes(bytes: &[u8]) -> Result<String, Err> {
    let units = bytes.chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]));
    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|_| Err::InvalidUtf16)
}
