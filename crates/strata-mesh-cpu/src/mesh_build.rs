use strata_geom::Vec3;

use crate::face::Face;

/// Floats per vertex: position, normal, colour.
pub const VERTEX_STRIDE: usize = 9;
pub const POSITION_OFFSET: usize = 0;
pub const NORMAL_OFFSET: usize = 3;
pub const COLOR_OFFSET: usize = 6;

/// Interleaved CPU-side mesh for one chunk.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshBuild {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshBuild {
    /// Clears all arrays but retains capacity for reuse across builds.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Pre-reserve capacity for approximately `n_quads` quads worth of data.
    #[inline]
    pub fn reserve_quads(&mut self, n_quads: usize) {
        self.vertices.reserve(n_quads * 4 * VERTEX_STRIDE);
        self.indices.reserve(n_quads * 6);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.indices.len() / 6
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Appends a quad (two triangles), flipping winding so it faces along `n`.
    pub fn add_quad(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3, n: Vec3, rgb: [f32; 3]) {
        let base = self.vertex_count() as u32;
        let mut vs = [a, b, c, d];
        let e1 = vs[1] - vs[0];
        let e2 = vs[2] - vs[0];
        let cross = Vec3::new(
            e1.y * e2.z - e1.z * e2.y,
            e1.z * e2.x - e1.x * e2.z,
            e1.x * e2.y - e1.y * e2.x,
        );
        if cross.dot(n) < 0.0 {
            vs.swap(1, 3);
        }
        for v in vs {
            self.vertices.extend_from_slice(&[
                v.x, v.y, v.z, n.x, n.y, n.z, rgb[0], rgb[1], rgb[2],
            ]);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Emits one face of the axis-aligned cube centred at `center` with half-extent `half`.
    pub fn add_cube_face(&mut self, face: Face, center: Vec3, half: f32, rgb: [f32; 3]) {
        let n = face.normal();
        let (u, v) = match face {
            Face::PosY | Face::NegY => (Vec3::new(half, 0.0, 0.0), Vec3::new(0.0, 0.0, half)),
            Face::PosX | Face::NegX => (Vec3::new(0.0, 0.0, half), Vec3::new(0.0, half, 0.0)),
            Face::PosZ | Face::NegZ => (Vec3::new(half, 0.0, 0.0), Vec3::new(0.0, half, 0.0)),
        };
        let fc = center + n * half;
        self.add_quad(fc - u - v, fc + u - v, fc + u + v, fc - u + v, n, rgb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri_normal(mb: &MeshBuild, i0: u32, i1: u32, i2: u32) -> Vec3 {
        let p = |i: u32| {
            let o = i as usize * VERTEX_STRIDE;
            Vec3::new(mb.vertices[o], mb.vertices[o + 1], mb.vertices[o + 2])
        };
        let (a, b, c) = (p(i0), p(i1), p(i2));
        let e1 = b - a;
        let e2 = c - a;
        Vec3::new(
            e1.y * e2.z - e1.z * e2.y,
            e1.z * e2.x - e1.x * e2.z,
            e1.x * e2.y - e1.y * e2.x,
        )
    }

    #[test]
    fn cube_faces_wind_outward() {
        for face in Face::ALL {
            let mut mb = MeshBuild::default();
            mb.add_cube_face(face, Vec3::new(3.0, 4.0, 5.0), 0.5, [1.0, 0.5, 0.25]);
            assert_eq!(mb.vertex_count(), 4);
            assert_eq!(mb.indices.len(), 6);
            let n = tri_normal(&mb, mb.indices[0], mb.indices[1], mb.indices[2]);
            assert!(n.dot(face.normal()) > 0.0, "{face:?} winds inward");
        }
    }

    #[test]
    fn face_plane_sits_at_half_extent() {
        let mut mb = MeshBuild::default();
        mb.add_cube_face(Face::PosX, Vec3::new(1.0, 0.0, 0.0), 2.0, [0.0; 3]);
        for v in 0..4 {
            assert_eq!(mb.vertices[v * VERTEX_STRIDE], 3.0);
            assert_eq!(mb.vertices[v * VERTEX_STRIDE + COLOR_OFFSET], 0.0);
        }
    }
}
