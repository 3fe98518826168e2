use strata_mesh_cpu::Vertex;

/// Seam to the external graphics backend. The engine calls this exactly
/// twice per chunk build: one allocation sized to the finished vertex
/// count, one copy. Buffers are never resized; a rebuild allocates a
/// fresh buffer and drops the old one.
pub trait GpuDevice {
    type Buffer;

    /// Allocates a device-resident buffer holding up to `vertex_capacity`
    /// vertices.
    fn allocate(&mut self, vertex_capacity: usize) -> Self::Buffer;

    /// Copies vertex data into a buffer. Writing more vertices than the
    /// buffer's capacity is a sequencing bug upstream; implementations
    /// must not grow the buffer to hide it.
    fn upload(&mut self, buffer: &mut Self::Buffer, vertices: &[Vertex]);
}

/// In-memory device used by the demo binary and tests.
#[derive(Default)]
pub struct HeadlessDevice {
    allocations: usize,
}

impl HeadlessDevice {
    /// Buffers allocated over the device's lifetime.
    pub fn allocations(&self) -> usize {
        self.allocations
    }
}

pub struct HeadlessBuffer {
    capacity: usize,
    vertices: Vec<Vertex>,
}

impl HeadlessBuffer {
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

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
}

impl GpuDevice for HeadlessDevice {
    type Buffer = HeadlessBuffer;

    fn allocate(&mut self, vertex_capacity: usize) -> HeadlessBuffer {
        self.allocations += 1;
        HeadlessBuffer {
            capacity: vertex_capacity,
            vertices: Vec::with_capacity(vertex_capacity),
        }
    }

    fn upload(&mut self, buffer: &mut HeadlessBuffer, vertices: &[Vertex]) {
        debug_assert!(
            vertices.len() <= buffer.capacity,
            "upload of {} vertices into capacity {}",
            vertices.len(),
            buffer.capacity
        );
        let n = vertices.len().min(buffer.capacity);
        buffer.vertices.clear();
        buffer.vertices.extend_from_slice(&vertices[..n]);
    }
}
