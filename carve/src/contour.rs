//! Boundary trace over a thresholded, edge-emphasized silhouette bitmap.
//!
//! Scans for a seed pixel, then walks 4-connected neighbors (right, down,
//! left, up) while emitting a vertex whenever the current pixel has both a
//! horizontal and a vertical `0xFF` neighbor.

use geo::{v2, Vec2};
use image::GrayImage;

const FOREGROUND: u8 = 0xFF;

/// Trace the single closed contour of a preprocessed silhouette bitmap.
///
/// `img` must already be thresholded and edge-emphasized (see
/// `crate::view::preprocess`). Returns an empty vector if the image has no
/// foreground pixel in its interior.
pub fn extract_contour(img: &GrayImage) -> Vec<Vec2> {
    let (w, h) = img.dimensions();
    let (w, h) = (i64::from(w), i64::from(h));

    let at = |x: i64, z: i64| -> u8 {
        if x < 0 || z < 0 || x >= w || z >= h {
            0
        } else {
            img.get_pixel(x as u32, z as u32).0[0]
        }
    };

    let seed = (1..h - 1).flat_map(|z| (1..w - 1).map(move |x| (x, z))).find(|&(x, z)| at(x, z) == FOREGROUND);

    let Some((ix, iz)) = seed else {
        return Vec::new();
    };

    const DIRS: [(i64, i64); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

    let (mut px, mut pz) = (ix, iz);
    let (mut cx, mut cz) = (ix, iz);
    let mut vertices = Vec::new();

    loop {
        let horz = at(cx - 1, cz) | at(cx + 1, cz);
        let vert = at(cx, cz - 1) | at(cx, cz + 1);
        if horz == FOREGROUND && vert == FOREGROUND {
            vertices.push(v2(cx as f32, -(cz as f32)));
        }

        let next = DIRS
            .iter()
            .map(|&(dx, dz)| (cx + dx, cz + dz))
            .find(|&(nx, nz)| at(nx, nz) == FOREGROUND && (nx, nz) != (px, pz));

        match next {
            Some((nx, nz)) => {
                px = cx;
                pz = cz;
                cx = nx;
                cz = nz;
            }
            None => break,
        }

        if (cx, cz) == (ix, iz) {
            break;
        }
    }

    center(vertices)
}

/// Translate vertices so that their axis-aligned bounding box is centered on
/// the origin.
fn center(mut vertices: Vec<Vec2>) -> Vec<Vec2> {
    let Some(first) = vertices.first().copied() else {
        return vertices;
    };

    let (mut min_x, mut max_x) = (first.x, first.x);
    let (mut min_y, mut max_y) = (first.y, first.y);
    for p in &vertices {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let offset = v2((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
    for p in &mut vertices {
        *p = *p - offset;
    }

    vertices
}
