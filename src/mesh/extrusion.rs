use super::triangulation::{orientation, signed_area2, triangulate_outline};
use super::{Mesh, MeshBuilder};
use crate::geometry::ProjectedPoint;

/// Extrude a closed outline on the scene floor into a vertical prism
///
/// `cap` lists triangles as indices into `outline`, wound the same way as the
/// outline itself. Vertices are laid out as the bottom ring followed by the
/// top ring. Caps are flat; walls follow outline order.
///
/// An outline with positive [`signed_area2`] produces outward-facing walls, an
/// upward top and a downward bottom. The opposite winding yields the same
/// surface turned inside out; nothing here reorders the input.
pub fn extrude_prism(outline: &[ProjectedPoint], cap: &[u32], y_bottom: f32, y_top: f32) -> Mesh {
    let n = outline.len();
    if n < 3 || cap.len() < 3 {
        return Mesh::empty();
    }

    let mut builder = MeshBuilder::with_capacity(n * 2, cap.len() / 3 * 2 + n * 2);

    for p in outline {
        builder.add_vertex([p.x as f32, y_bottom, p.z as f32]);
    }
    for p in outline {
        builder.add_vertex([p.x as f32, y_top, p.z as f32]);
    }

    let top = n as u32;
    for tri in cap.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        // Positive (x, z) orientation faces down, so the top is flipped
        builder.add_triangle(top + a, top + c, top + b);
        builder.add_triangle(a, b, c);
    }

    for i in 0..n {
        let j = (i + 1) % n;
        let (b0, b1) = (i as u32, j as u32);
        let (t0, t1) = (top + b0, top + b1);
        builder.add_triangle(b0, t1, b1);
        builder.add_triangle(b0, t0, t1);
    }

    builder.finish()
}

/// Extrude an arbitrary simple polygon, triangulating the cap with earcut
///
/// Cap triangles are aligned with the outline's own winding so that caps and
/// walls agree. Returns `None` when the outline cannot be triangulated.
pub fn extrude_polygon(outline: &[ProjectedPoint], y_bottom: f32, y_top: f32) -> Option<Mesh> {
    if outline.len() < 3 {
        return None;
    }

    let mut cap = triangulate_outline(outline);
    if cap.is_empty() {
        return None;
    }

    let winding = signed_area2(outline);
    for tri in cap.chunks_exact_mut(3) {
        let o = orientation(
            outline[tri[0] as usize],
            outline[tri[1] as usize],
            outline[tri[2] as usize],
        );
        if o * winding < 0.0 {
            tri.swap(1, 2);
        }
    }

    Some(extrude_prism(outline, &cap, y_bottom, y_top))
}
