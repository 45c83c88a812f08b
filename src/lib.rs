// lib.rs

/// Contains the interface between `Mesh` object and text geometry files such as obj.
pub mod io;

/// Defines the SMD encoder.
pub mod encode;

/// Defines the SMD decoder.
pub mod decode;

/// Contains the mesh model, the half-float codec, and the byte reader/writer.
pub mod core;

pub use crate::core::mesh::{
    Mesh,
    builder::MeshBuilder,
};

/// Contains the most commonly used traits, types, and objects.
pub mod prelude {
    pub use crate::core::half::F16;
    pub use crate::core::mesh::{GroupDescriptor, Header, Mesh, MeshGroup, Vertex, builder::MeshBuilder};
    pub use crate::core::shared::ConfigType;
    pub use crate::core::bit_coder::{
        ByteReader,
        ByteWriter,
        ReaderErr,
        StreamReader,
    };
    pub use crate::decode::{self, decode};
    pub use crate::encode::{self, encode};
    pub use crate::io::obj::{self, save_obj, write_obj};
}
