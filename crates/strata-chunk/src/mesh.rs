/// Element type of a buffer handed to a [`MeshSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    Float,
    UnsignedInt,
}

/// Per-chunk mesh resource implemented by the rendering backend.
///
/// The engine only ever configures, draws and clears a sink; what sits behind
/// it (GPU buffers, a recording stub in tests) is opaque. `clear` must release
/// whatever the sink holds and leave it reusable.
pub trait MeshSink {
    fn configure_mesh(&mut self, vertices: &[f32], stride: usize, count: usize, element: ElementType);
    fn configure_index_buffer(&mut self, indices: &[u32], count: usize, element: ElementType);
    fn add_vertex_attribute(&mut self, index: u32, width: u32, offset: usize);
    fn draw(&mut self);
    fn clear(&mut self);
}
