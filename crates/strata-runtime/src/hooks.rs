use strata_chunk::{Chunk, MeshSink};
use strata_world::ChunkAddr;

/// Fills a freshly created, empty chunk.
pub trait ChunkGenerator {
    fn generate(&mut self, addr: ChunkAddr, chunk: &mut Chunk);
}

impl<F> ChunkGenerator for F
where
    F: FnMut(ChunkAddr, &mut Chunk),
{
    fn generate(&mut self, addr: ChunkAddr, chunk: &mut Chunk) {
        self(addr, chunk)
    }
}

/// Generator that leaves every chunk empty.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyGenerator;

impl ChunkGenerator for EmptyGenerator {
    fn generate(&mut self, _addr: ChunkAddr, _chunk: &mut Chunk) {}
}

/// Source of per-chunk mesh handles.
pub trait MeshBackend {
    fn create_mesh(&mut self) -> Box<dyn MeshSink>;
}
