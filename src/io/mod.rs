/// Writes a decoded [`crate::core::mesh::Mesh`] as Wavefront OBJ text.
pub mod obj;
