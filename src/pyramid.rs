use crate::types::Vertex;

/// Triangle mesh of a stepped pyramid, normalized to the [-1, 1] cube.
pub struct PyramidMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

const LEFT: [f32; 3] = [-1.0, 0.0, 0.0];
const RIGHT: [f32; 3] = [1.0, 0.0, 0.0];
const UP: [f32; 3] = [0.0, 1.0, 0.0];
const DOWN: [f32; 3] = [0.0, -1.0, 0.0];
const BACK: [f32; 3] = [0.0, 0.0, -1.0];
const FRONT: [f32; 3] = [0.0, 0.0, 1.0];

/// Generate a stepped pyramid with the given number of layers (at least 1).
///
/// Each layer is a flattened box ring: 8 corners, each emitted once per
/// adjacent face (24 vertices) so every face gets a hard normal. Layers
/// shrink inward by one step width per level and are stitched together by
/// ring-shaped tread faces.
pub fn generate(layers: u32) -> PyramidMesh {
    let layers = layers.max(1) as usize;

    // One step is half the footprint shrink per side, so a pyramid with L
    // layers spans 2L - 1 steps across its base.
    let step = 2.0 / (layers as f32 * 2.0 - 1.0);

    PyramidMesh {
        vertices: vertices(layers, step),
        indices: indices(layers),
    }
}

fn vertices(layers: usize, step: f32) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(layers * 24);

    for i in 0..layers {
        let inset = i as f32 * step;
        let (lo, hi) = (-1.0 + inset, -1.0 + inset + step);
        let (near, far) = (-1.0 + inset, 1.0 - inset);

        // Layer 0's bottom ring is the pyramid base and faces down; every
        // other bottom ring is an exposed tread and faces up.
        let tread = if i == 0 { DOWN } else { UP };

        let corners = [
            [near, lo, near],
            [near, lo, far],
            [near, hi, near],
            [near, hi, far],
            [far, lo, near],
            [far, lo, far],
            [far, hi, near],
            [far, hi, far],
        ];

        let faces: [(usize, [f32; 3]); 24] = [
            (0, tread),
            (0, BACK),
            (0, LEFT),
            (1, tread),
            (1, LEFT),
            (1, FRONT),
            (2, BACK),
            (2, LEFT),
            (2, UP),
            (3, LEFT),
            (3, FRONT),
            (3, UP),
            (4, tread),
            (4, BACK),
            (4, RIGHT),
            (5, tread),
            (5, FRONT),
            (5, RIGHT),
            (6, BACK),
            (6, RIGHT),
            (6, UP),
            (7, FRONT),
            (7, RIGHT),
            (7, UP),
        ];

        for (corner, normal) in faces {
            out.push(Vertex::new(corners[corner], normal, [0.0, 0.0]));
        }
    }

    out
}

fn indices(layers: usize) -> Vec<u32> {
    let mut out = Vec::new();

    // Pyramid base.
    push_triangles(&mut out, 0, &[0, 12, 3, 3, 12, 15]);

    // Side walls of every non-top layer plus the tread ring stitching it to
    // the next layer up.
    for i in 0..layers - 1 {
        let o = (i * 24) as u32;
        push_triangles(&mut out, o, SIDE_WALLS);
        push_triangles(
            &mut out,
            o,
            &[
                8, 24, 20, 20, 24, 36, //
                8, 11, 24, 24, 11, 27, //
                11, 23, 27, 27, 23, 39, //
                23, 20, 39, 39, 20, 36,
            ],
        );
    }

    // Top layer: side walls and the cap.
    let o = ((layers - 1) * 24) as u32;
    push_triangles(&mut out, o, SIDE_WALLS);
    push_triangles(&mut out, o, &[11, 23, 8, 8, 23, 20]);

    out
}

const SIDE_WALLS: &[u32] = &[
    1, 6, 13, 13, 6, 18, //
    2, 4, 7, 7, 4, 9, //
    5, 16, 10, 10, 16, 21, //
    17, 14, 22, 22, 14, 19,
];

fn push_triangles(out: &mut Vec<u32>, offset: u32, relative: &[u32]) {
    out.extend(relative.iter().map(|i| offset + i));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_and_index_counts_scale_with_layers() {
        for layers in 1..6u32 {
            let mesh = generate(layers);
            assert_eq!(mesh.vertices.len(), layers as usize * 24);
            // base (2) + per lower layer (8 walls + 8 treads) + top (8 + 2)
            let triangles = 2 + (layers as usize - 1) * 16 + 10;
            assert_eq!(mesh.indices.len(), triangles * 3, "layers = {}", layers);
        }
    }

    #[test]
    fn test_indices_stay_in_range() {
        let mesh = generate(30);
        let max = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < max));
    }

    #[test]
    fn test_mesh_stays_inside_unit_cube() {
        let mesh = generate(4);
        for v in &mesh.vertices {
            for c in v.position {
                assert!((-1.0..=1.0).contains(&c));
            }
        }
    }

    #[test]
    fn test_degenerate_layer_count_is_clamped() {
        let mesh = generate(0);
        assert_eq!(mesh.vertices.len(), 24);
    }
}
