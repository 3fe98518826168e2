use strata_geom::{Vec2, Vec3};

/// One mesh vertex: world position, atlas texture coordinate, face normal.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub uv: Vec2,
    pub normal: Vec3,
}

/// A growable triangle list. Every three consecutive vertices form one
/// triangle; quads are decomposed with a fixed diagonal, so the buffer
/// needs no index data.
#[derive(Clone, Debug, Default)]
pub struct GeometryBuffer {
    vertices: Vec<Vertex>,
}

impl GeometryBuffer {
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Pre-reserve capacity for approximately `n_quads` quads.
    #[inline]
    pub fn reserve_quads(&mut self, n_quads: usize) {
        self.vertices.reserve(n_quads * 6);
    }

    pub fn push_triangle(&mut self, a: Vertex, b: Vertex, c: Vertex) {
        self.vertices.push(a);
        self.vertices.push(b);
        self.vertices.push(c);
    }

    /// Appends a quad as two triangles sharing the `b`-`d` diagonal.
    pub fn push_quad(&mut self, a: Vertex, b: Vertex, c: Vertex, d: Vertex) {
        self.push_triangle(a, b, d);
        self.push_triangle(b, c, d);
    }

    /// Order-preserving concatenation of another buffer's vertices.
    pub fn append(&mut self, other: &GeometryBuffer) {
        self.vertices.extend_from_slice(&other.vertices);
    }

    /// Rigid translation: adds `delta` to every vertex position. Used once
    /// per chunk to move a chunk-local mesh into world coordinates.
    pub fn translate(&mut self, delta: Vec3) {
        for v in &mut self.vertices {
            v.position += delta;
        }
    }
}
