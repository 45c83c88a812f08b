use std::io::{self, Read};
use std::vec;

pub trait ByteWriter: Sized {
    fn write_u8(&mut self, value: u8);
    fn write_u16(&mut self, value: u16) {
        self.write_u8(value as u8);
        self.write_u8((value >> 8) as u8);
    }
    fn write_u32(&mut self, value: u32) {
        self.write_u16(value as u16);
        self.write_u16((value >> 16) as u16);
    }
    fn write_i16(&mut self, value: i16) {
        self.write_u16(value as u16);
    }
    fn write_f32(&mut self, value: f32) {
        self.write_u32(value.to_bits());
    }
    fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_u8(b);
        }
    }
}

impl ByteWriter for Vec<u8> {
    fn write_u8(&mut self, value: u8) {
        self.push(value);
    }

    fn write_u16(&mut self, value: u16) {
        self.extend_from_slice(&value.to_le_bytes());
    }

    fn write_u32(&mut self, value: u32) {
        self.extend_from_slice(&value.to_le_bytes());
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Forward-only little-endian reader. The decoder never seeks; every read either
/// returns exactly the requested number of bytes or fails with
/// [`ReaderErr::NotEnoughData`].
pub trait ByteReader {
    /// Reads exactly `n` bytes.
    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, ReaderErr>;

    /// Reads exactly `N` bytes into an array.
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ReaderErr> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0_u8; N];
        out.copy_from_slice(&bytes);
        Ok(out)
    }
    fn read_u8(&mut self) -> Result<u8, ReaderErr> {
        Ok(self.read_array::<1>()?[0])
    }
    fn read_u16(&mut self) -> Result<u16, ReaderErr> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }
    fn read_i16(&mut self) -> Result<i16, ReaderErr> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }
    fn read_u32(&mut self) -> Result<u32, ReaderErr> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }
    fn read_f32(&mut self) -> Result<f32, ReaderErr> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }
}

impl ByteReader for vec::IntoIter<u8> {
    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, ReaderErr> {
        let available = self.as_slice().len();
        if available < n {
            // consume the rest so that the reader is left in the same state as a failed stream read.
            self.by_ref().for_each(drop);
            return Err(ReaderErr::NotEnoughData { expected: n, available });
        }
        Ok(self.by_ref().take(n).collect())
    }
}

/// Adapts any [`io::Read`] (a file, or the output of a decompressor) into a
/// [`ByteReader`].
pub struct StreamReader<R> {
    inner: R,
    /// number of bytes consumed so far.
    pos: u64,
}

impl<R: io::Read> StreamReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }

    /// Returns the number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: io::Read> ByteReader for StreamReader<R> {
    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, ReaderErr> {
        let mut out = Vec::new();
        // 'take' keeps a corrupt count from reserving memory the stream can't back.
        let read = Read::take(&mut self.inner, n as u64)
            .read_to_end(&mut out)
            .map_err(|e| ReaderErr::Io(e.kind()))?;
        self.pos += read as u64;
        if read < n {
            return Err(ReaderErr::NotEnoughData { expected: n, available: read });
        }
        Ok(out)
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderErr {
    #[error("I/O error while reading: {0}")]
    Io(io::ErrorKind),
    #[error("Not enough data to read: expected {expected} bytes, but only {available} were available")]
    NotEnoughData { expected: usize, available: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn little_endian_round_trip() {
        let mut buffer: Vec<u8> = Vec::new();
        buffer.write_u8(200);
        buffer.write_u16(0xBEEF);
        buffer.write_i16(-2);
        buffer.write_u32(0xDEADBEEF);
        buffer.write_f32(1.5);
        assert_eq!(buffer.len(), 13);
        assert_eq!(&buffer[1..3], &[0xEF, 0xBE]);

        let mut reader = buffer.into_iter();
        assert_eq!(reader.read_u8().unwrap(), 200);
        assert_eq!(reader.read_u16().unwrap(), 0xBEEF);
        assert_eq!(reader.read_i16().unwrap(), -2);
        assert_eq!(reader.read_u32().unwrap(), 0xDEADBEEF);
        assert_eq!(reader.read_f32().unwrap(), 1.5);
        assert!(reader.next().is_none());
    }

    #[test]
    fn short_read_is_an_error() {
        let mut reader = vec![1_u8, 2, 3].into_iter();
        assert_eq!(
            reader.read_u32(),
            Err(ReaderErr::NotEnoughData { expected: 4, available: 3 })
        );
        // nothing is left after a failed read.
        assert_eq!(
            reader.read_u8(),
            Err(ReaderErr::NotEnoughData { expected: 1, available: 0 })
        );
    }

    #[test]
    fn stream_reader_counts_bytes() {
        let data: &[u8] = &[0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0xFF];
        let mut reader = StreamReader::new(data);
        assert_eq!(reader.read_u16().unwrap(), 1);
        assert_eq!(reader.read_u32().unwrap(), 2);
        assert_eq!(reader.position(), 6);
        assert_eq!(
            reader.read_bytes(4),
            Err(ReaderErr::NotEnoughData { expected: 4, available: 1 })
        );
        assert_eq!(reader.position(), 7);
    }

    #[test]
    fn zero_length_read() {
        let mut reader = Vec::<u8>::new().into_iter();
        assert_eq!(reader.read_bytes(0).unwrap(), Vec::<u8>::new());
    }
}
