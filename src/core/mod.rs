/// Forward-only byte reader and byte writer used by the decoder and the encoder.
pub mod bit_coder;

/// Half-precision floating point codec used for texture coordinates.
pub mod half;

/// The decoded mesh: header, mesh groups, index buffer and vertex buffer.
pub mod mesh;

pub mod shared;
