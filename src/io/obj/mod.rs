use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::core::mesh::Mesh;
use crate::core::shared::ConfigType;

#[derive(Debug, Clone)]
pub struct Config {
    /// Write positions as `(x, -z, y)`, converting the stored axes to OBJ's Y-up
    /// convention. When off, positions are written as stored.
    pub flip_axes: bool,
    /// Write a `g` statement where each mesh group starts.
    pub emit_groups: bool,
}

impl ConfigType for Config {
    fn default() -> Self {
        Self {
            flip_axes: true,
            emit_groups: true,
        }
    }
}

#[remain::sorted]
#[derive(Debug, thiserror::Error)]
pub enum Err {
    #[error("Failed to create {path:?}: {source}")]
    CreateFailed { path: PathBuf, source: io::Error },
    #[error("Failed to write OBJ output: {0}")]
    WriteFailed(#[from] io::Error),
}

/// Writes the mesh as OBJ text: one `v` line per vertex, one `vt` line per vertex,
/// then the faces with a `g` line wherever a mesh group starts.
///
/// The text is assembled in memory and handed to `writer` in a single `write_all`,
/// followed by a flush. If the sink fails, the error is returned as is.
pub fn write_obj<W>(mesh: &Mesh, writer: &mut W, cfg: Config) -> Result<(), Err>
where
    W: Write,
{
    let mut out: Vec<u8> = Vec::new();

    for vertex in mesh.get_vertices() {
        let [x, y, z] = vertex.position;
        if cfg.flip_axes {
            writeln!(out, "v {:.6} {:.6} {:.6}", x, -z, y)?;
        } else {
            writeln!(out, "v {:.6} {:.6} {:.6}", x, y, z)?;
        }
    }

    for vertex in mesh.get_vertices() {
        writeln!(out, "vt {} {}", vertex.u, vertex.v)?;
    }

    let groups = mesh.get_groups();
    let starts = mesh.group_starts();
    let num_groups = starts.len();
    let mut starts = starts.into_iter().peekable();
    for (face_idx, face) in mesh.get_faces().enumerate() {
        if let Some((_, group)) = starts.next_if(|&(start, _)| start == face_idx) {
            if cfg.emit_groups {
                writeln!(out, "g {}", groups[group].name)?;
            }
        }
        // OBJ indices are 1-based; each vertex has exactly one texture coordinate.
        let [a, b, c] = face.map(|i| i as u32 + 1);
        writeln!(out, "f {a}/{a} {b}/{b} {c}/{c}")?;
    }

    writer.write_all(&out)?;
    writer.flush()?;

    tracing::info!(
        "wrote OBJ: {} vertices, {} faces, {} groups, {} bytes",
        mesh.get_vertices().len(),
        mesh.num_faces(),
        num_groups,
        out.len()
    );
    Ok(())
}

/// Creates (or truncates) the file at `path` and writes the mesh into it.
pub fn save_obj<P: AsRef<Path>>(mesh: &Mesh, path: P, cfg: Config) -> Result<(), Err> {
    let path = path.as_ref();
    let mut file = File::create(path)
        .map_err(|source| Err::CreateFailed { path: path.to_owned(), source })?;
    write_obj(mesh, &mut file, cfg)
}
