pub mod builder;

use std::ops::Range;

use crate::core::half::F16;

/// Fixed 40-byte header at the start of every SMD stream.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Header {
    pub version: u8,
    /// number of triangles. The index buffer holds three times as many entries.
    pub index_count: u32,
    pub vertex_count: u32,
    pub unknown1: u8,
    pub mesh_group_count: u8,
    pub unknown2: u8,
    /// informational only, never used to drive parsing.
    pub total_name_length: u32,
    /// `[min_x, min_y, min_z, max_x, max_y, max_z]`
    pub bounding_box: [f32; 6],
}

impl Header {
    pub const SIZE: usize = 40;

    /// Length of the index buffer in `u16` entries.
    pub fn num_indices(&self) -> usize {
        self.index_count as usize * 3
    }
}

/// One entry of the descriptor table that follows the header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GroupDescriptor {
    /// length of the UTF-16 name in bytes, not in characters.
    pub name_length: u32,
    /// index of the first triangle of the group.
    pub face_offset: u32,
}

impl GroupDescriptor {
    pub const SIZE: usize = 8;
}

/// A named run of triangles: a descriptor together with its decoded name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshGroup {
    pub descriptor: GroupDescriptor,
    pub name: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub unknown: [i16; 4],
    pub u: F16,
    pub v: F16,
    pub bone_index: [u8; 4],
    pub bone_weight: [u8; 4],
}

impl Vertex {
    pub const SIZE: usize = 32;

    pub fn new(position: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            u: F16::from_f32(uv[0]),
            v: F16::from_f32(uv[1]),
            ..Default::default()
        }
    }

    pub fn uv(&self) -> [f32; 2] {
        [self.u.to_f32(), self.v.to_f32()]
    }
}

/// A decoded SMD mesh.
///
/// Owns everything read from one stream. Once built it is never mutated, so an
/// emitter holding `&Mesh` always sees a complete decode.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub(crate) header: Header,
    pub(crate) groups: Vec<MeshGroup>,
    pub(crate) indices: Vec<u16>,
    pub(crate) vertices: Vec<Vertex>,
}

impl Mesh {
    pub fn get_header(&self) -> &Header {
        &self.header
    }

    pub fn get_groups(&self) -> &[MeshGroup] {
        &self.groups
    }

    pub fn get_indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn get_vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Triangles as triples of 0-based vertex indices.
    pub fn get_faces(&self) -> impl Iterator<Item = [u16; 3]> + '_ {
        self.indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    pub fn num_faces(&self) -> usize {
        self.header.index_count as usize
    }

    /// Returns `(triangle, group)` pairs, one for each group that starts a run.
    ///
    /// A single cursor walks the group list while the triangles are visited in
    /// order: the current group starts at triangle `k` iff its `face_offset` is `k`,
    /// and only then does the cursor move on. With out-of-order offsets the cursor
    /// stalls on the first offset it can no longer reach, so the remaining groups
    /// never start.
    pub fn group_starts(&self) -> Vec<(usize, usize)> {
        let mut starts = Vec::new();
        let mut cursor = 0;
        for face in 0..self.num_faces() {
            if cursor < self.groups.len() && face == self.groups[cursor].descriptor.face_offset as usize {
                starts.push((face, cursor));
                cursor += 1;
            }
        }
        starts
    }

    /// Triangle range covered by each group that starts a run, as `(group, range)`.
    /// Triangles before the first start belong to no group.
    pub fn group_ranges(&self) -> Vec<(usize, Range<usize>)> {
        let starts = self.group_starts();
        starts.iter()
            .enumerate()
            .map(|(i, &(face, group))| {
                let end = starts.get(i + 1).map_or(self.num_faces(), |&(next, _)| next);
                (group, face..end)
            })
            .collect()
    }

    /// Whether the `face_offset`s never decrease in storage order.
    pub fn is_group_order_monotonic(&self) -> bool {
        self.groups.windows(2)
            .all(|w| w[0].descriptor.face_offset <= w[1].descriptor.face_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::builder::MeshBuilder;
    use super::*;

    fn quad_strip(num_faces: u16) -> MeshBuilder {
        let mut builder = MeshBuilder::new();
        for i in 0..num_faces + 2 {
            builder.add_vertex([i as f32, 0.0, 0.0], [0.0, 0.0]);
        }
        for i in 0..num_faces {
            builder.add_face([i, i + 1, i + 2]);
        }
        builder
    }

    fn with_offsets(offsets: &[u32]) -> Mesh {
        let mut mesh = quad_strip(4).build().unwrap();
        mesh.groups = offsets.iter()
            .enumerate()
            .map(|(i, &face_offset)| MeshGroup {
                descriptor: GroupDescriptor { name_length: 2, face_offset },
                name: format!("{}", i),
            })
            .collect();
        mesh
    }

    #[test]
    fn faces_are_triples() {
        let mesh = quad_strip(2).build().unwrap();
        assert_eq!(mesh.get_faces().collect::<Vec<_>>(), vec![[0, 1, 2], [1, 2, 3]]);
        assert_eq!(mesh.num_faces(), 2);
    }

    #[test]
    fn group_ranges_follow_offsets() {
        let mesh = with_offsets(&[0, 1, 3]);
        assert_eq!(mesh.group_starts(), vec![(0, 0), (1, 1), (3, 2)]);
        assert_eq!(mesh.group_ranges(), vec![(0, 0..1), (1, 1..3), (2, 3..4)]);
        assert!(mesh.is_group_order_monotonic());
    }

    #[test]
    fn faces_before_first_group_are_ungrouped() {
        let mesh = with_offsets(&[2]);
        assert_eq!(mesh.group_ranges(), vec![(0, 2..4)]);
    }

    #[test]
    fn out_of_order_offsets_stall_the_cursor() {
        let mesh = with_offsets(&[2, 1, 3]);
        assert!(!mesh.is_group_order_monotonic());
        // group 1 can never start, so group 2 is never reached either.
        assert_eq!(mesh.group_starts(), vec![(2, 0)]);
    }

    #[test]
    fn duplicate_offsets_start_one_group_per_triangle() {
        let mesh = with_offsets(&[1, 1, 2]);
        assert!(mesh.is_group_order_monotonic());
        assert_eq!(mesh.group_starts(), vec![(1, 0)]);
    }

    #[test]
    fn vertex_uv() {
        let v = Vertex::new([1.0, 2.0, 3.0], [0.5, -0.25]);
        assert_eq!(v.u.to_bits(), 0x3800);
        assert_eq!(v.uv(), [0.5, -0.25]);
        assert_eq!(v.bone_weight, [0; 4]);
    }
}
