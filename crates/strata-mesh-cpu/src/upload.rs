use strata_chunk::{ElementType, MeshSink};

use crate::mesh_build::{COLOR_OFFSET, MeshBuild, NORMAL_OFFSET, POSITION_OFFSET, VERTEX_STRIDE};

/// Hands a finished build to `sink`: vertex buffer (stride in floats), index
/// buffer, then position / normal / colour attributes at slots 0, 1, 2.
pub fn upload_mesh(build: &MeshBuild, sink: &mut dyn MeshSink) {
    sink.configure_mesh(
        &build.vertices,
        VERTEX_STRIDE,
        build.vertex_count(),
        ElementType::Float,
    );
    sink.configure_index_buffer(&build.indices, build.indices.len(), ElementType::UnsignedInt);
    sink.add_vertex_attribute(0, 3, POSITION_OFFSET);
    sink.add_vertex_attribute(1, 3, NORMAL_OFFSET);
    sink.add_vertex_attribute(2, 3, COLOR_OFFSET);
}
