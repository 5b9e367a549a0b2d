use crystal::prelude::*;
use log::debug;
use serde::Deserialize;
use ve_format::mesh::Vertex;

/// Decides whether the interior angle at an ear candidate allows clipping it.
///
/// `Literal` keeps the historic check `angle <= 0 && angle >= 180`, which no
/// finite angle satisfies, so every candidate passes. `Strict` rejects
/// candidates whose corner is degenerate (`angle <= 0 || angle >= 180`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConvexityCheck {
    #[default]
    Literal,
    Strict,
}

impl ConvexityCheck {
    fn rejects(self, angle: f32) -> bool {
        match self {
            ConvexityCheck::Literal => angle <= 0.0 && angle >= 180.0,
            ConvexityCheck::Strict => angle <= 0.0 || angle >= 180.0,
        }
    }
}

/// Turns one polygonal face into triangles.
///
/// The returned indices point into `vertices`. Triangles keep the winding of
/// the polygon: corners come out as `(prev, cur, next)` around each clipped
/// ear, not sorted by face index. Faces with less than three vertices produce
/// nothing.
pub fn triangulate(vertices: &[Vertex], convexity: ConvexityCheck) -> Vec<u32> {
    let mut indices = Vec::new();

    match vertices.len() {
        0..=2 => return indices,
        3 => {
            indices.extend_from_slice(&[0, 1, 2]);
            return indices;
        }
        _ => {}
    }

    let position = |idx: usize| vertices[idx].position;

    // face indices of the vertices not clipped yet
    let mut polygon: Vec<usize> = (0..vertices.len()).collect();

    'clip: loop {
        let len = polygon.len();

        if len == 3 {
            push_triangle(&mut indices, polygon[2], polygon[0], polygon[1]);
            break;
        }

        if len == 4 {
            let (prev, cur, next, rest) = (polygon[3], polygon[0], polygon[1], polygon[2]);
            push_triangle(&mut indices, prev, cur, next);
            push_triangle(&mut indices, prev, next, rest);
            break;
        }

        for i in 0..len {
            let prev = polygon[(i + len - 1) % len];
            let cur = polygon[i];
            let next = polygon[(i + 1) % len];

            let (p_prev, p_cur, p_next) = (position(prev), position(cur), position(next));

            let angle = (p_prev - p_cur)
                .angle_between(&(p_next - p_cur))
                .to_degrees();
            if convexity.rejects(angle) {
                continue;
            }

            let contains_other = vertices.iter().enumerate().any(|(idx, vertex)| {
                idx != prev
                    && idx != cur
                    && idx != next
                    && in_triangle(vertex.position, p_prev, p_cur, p_next)
            });
            if contains_other {
                continue;
            }

            push_triangle(&mut indices, prev, cur, next);
            polygon.remove(i);
            continue 'clip;
        }

        debug!(
            "No ear left in polygon with {} vertices, stopping after {} triangles",
            len,
            indices.len() / 3
        );
        break;
    }

    indices
}

fn push_triangle(indices: &mut Vec<u32>, a: usize, b: usize, c: usize) {
    debug!("Create triangle between {}, {}, {}", a, b, c);
    indices.extend_from_slice(&[a as u32, b as u32, c as u32]);
}

// true if `p1` and `p2` lie strictly on the same side of the line through `a` and `b`
fn same_side(p1: Vec3, p2: Vec3, a: Vec3, b: Vec3) -> bool {
    let edge = b - a;
    let cp1 = edge.cross_product(&(p1 - a));
    let cp2 = edge.cross_product(&(p2 - a));
    cp1.dot_product(&cp2) > 0.0
}

fn in_triangle(point: Vec3, a: Vec3, b: Vec3, c: Vec3) -> bool {
    same_side(point, a, b, c) && same_side(point, b, a, c) && same_side(point, c, a, b)
}
