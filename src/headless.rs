use std::cell::Cell;
use std::rc::Rc;

use strata_chunk::{ElementType, MeshSink};
use strata_runtime::MeshBackend;

/// Running totals shared by every headless mesh.
#[derive(Debug, Default)]
pub struct MeshStats {
    pub created: Cell<usize>,
    pub released: Cell<usize>,
    pub draws: Cell<usize>,
    pub vertices: Cell<usize>,
    pub indices: Cell<usize>,
}

impl MeshStats {
    pub fn live(&self) -> usize {
        self.created.get() - self.released.get()
    }
}

fn bump(c: &Cell<usize>, by: usize) {
    c.set(c.get() + by);
}

/// Mesh backend that keeps no GPU state, only counts.
#[derive(Clone, Debug, Default)]
pub struct HeadlessBackend {
    stats: Rc<MeshStats>,
}

impl HeadlessBackend {
    pub fn stats(&self) -> &MeshStats {
        &self.stats
    }
}

impl MeshBackend for HeadlessBackend {
    fn create_mesh(&mut self) -> Box<dyn MeshSink> {
        bump(&self.stats.created, 1);
        Box::new(HeadlessMesh {
            stats: self.stats.clone(),
            index_count: 0,
        })
    }
}

struct HeadlessMesh {
    stats: Rc<MeshStats>,
    index_count: usize,
}

impl MeshSink for HeadlessMesh {
    fn configure_mesh(&mut self, _vertices: &[f32], _stride: usize, count: usize, _element: ElementType) {
        bump(&self.stats.vertices, count);
    }

    fn configure_index_buffer(&mut self, _indices: &[u32], count: usize, _element: ElementType) {
        self.index_count = count;
        bump(&self.stats.indices, count);
    }

    fn add_vertex_attribute(&mut self, _index: u32, _width: u32, _offset: usize) {}

    fn draw(&mut self) {
        if self.index_count > 0 {
            bump(&self.stats.draws, 1);
        }
    }

    fn clear(&mut self) {
        self.index_count = 0;
        bump(&self.stats.released, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_follow_the_handle_lifecycle() {
        let mut backend = HeadlessBackend::default();
        let mut mesh = backend.create_mesh();
        mesh.configure_mesh(&[0.0; 18], 9, 2, ElementType::Float);
        mesh.configure_index_buffer(&[0, 1, 0], 3, ElementType::UnsignedInt);
        mesh.draw();
        assert_eq!(backend.stats().live(), 1);
        assert_eq!(backend.stats().draws.get(), 1);
        mesh.clear();
        mesh.draw();
        assert_eq!(backend.stats().live(), 0);
        assert_eq!(backend.stats().draws.get(), 1);
        assert_eq!(backend.stats().vertices.get(), 2);
    }
}
