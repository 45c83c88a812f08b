use std::io::{self, Cursor, Read};

/// Leading bytes of a Brotli-wrapped SMD file.
pub const COMPRESSED_MAGIC: &[u8; 3] = b"CMP";

const BROTLI_BUFFER_SIZE: usize = 4096;

/// Wraps `reader` so that it yields the raw SMD stream.
///
/// A compressed file is `CMP`, a little-endian `u32` holding the decompressed length,
/// then a Brotli stream. Anything else is taken to be a plain SMD stream, and the
/// peeked bytes are replayed in front of it.
pub fn open_smd<'a, R>(mut reader: R) -> io::Result<Box<dyn Read + 'a>>
where
    R: Read + 'a,
{
    let mut magic = Vec::with_capacity(COMPRESSED_MAGIC.len());
    Read::take(&mut reader, COMPRESSED_MAGIC.len() as u64).read_to_end(&mut magic)?;

    if magic.as_slice() != COMPRESSED_MAGIC {
        tracing::debug!("no container magic, reading a plain SMD stream");
        return Ok(Box::new(Cursor::new(magic).chain(reader)));
    }

    let mut length = [0_u8; 4];
    reader.read_exact(&mut length)?;
    let length = u32::from_le_bytes(length);
    tracing::info!("compressed SMD, decompressed length {length} ({length:#x})");

    Ok(Box::new(brotli::Decompressor::new(reader, BROTLI_BUFFER_SIZE)))
}
