//! Non-interactive SVG preview of a reconstructed `VoxelModel`.
//!
//! A pure consumer of `cubes`/`cube_dimensions`/`bounds`: no windowing or
//! GPU dependency, just a static projection of every cube edge to 2D,
//! written out as SVG polylines.

mod camera;

use std::fs::File;
use std::io::{self, BufWriter, Write};

use camera::Camera;
use carve::VoxelModel;
use geo::{v3, Vec3};

/// Settings controlling the rendered SVG, mirroring `l::SvgSettings`.
#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    pub width: f32,
    pub height: f32,
    pub stroke_width: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            width: 800.0,
            height: 800.0,
            stroke_width: 1.0,
        }
    }
}

/// The 12 edges of a unit cube, as pairs of corner indices.
const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

fn cube_corners(center: Vec3, half: Vec3) -> [Vec3; 8] {
    [
        center + v3(-half.x, -half.y, -half.z),
        center + v3(half.x, -half.y, -half.z),
        center + v3(half.x, half.y, -half.z),
        center + v3(-half.x, half.y, -half.z),
        center + v3(-half.x, -half.y, half.z),
        center + v3(half.x, -half.y, half.z),
        center + v3(half.x, half.y, half.z),
        center + v3(-half.x, half.y, half.z),
    ]
}

/// Renderer's own coordinate convention: swap Y and Z when placing cubes
/// on screen.
fn to_screen_space(p: Vec3) -> Vec3 {
    v3(p.x, p.z, p.y)
}

/// Render every retained voxel of `model` as a wireframe cube, viewed from
/// an isometric-ish camera framed by `model.bounds`, and write the result
/// to `path` as an SVG.
pub fn render_svg(model: &VoxelModel, path: &str, settings: RenderSettings) -> io::Result<()> {
    let [x_min, x_max, y_min, y_max, z_min, z_max] = model.bounds;
    let center = to_screen_space(v3(
        (x_min + x_max) / 2.0,
        (y_min + y_max) / 2.0,
        (z_min + z_max) / 2.0,
    ));
    let diag = ((x_max - x_min).powi(2) + (y_max - y_min).powi(2) + (z_max - z_min).powi(2)).sqrt();
    let eye = center + v3(diag, diag, diag).max(v3(1.0, 1.0, 1.0));

    let camera = Camera::look_at(eye, center, v3(0.0, 1.0, 0.0));
    let half = model.cube_dimensions * 0.5;

    let mut segments = Vec::new();
    for &cube in &model.cubes {
        let corners = cube_corners(to_screen_space(cube), to_screen_space(half));
        let projected: Vec<(f32, f32)> = corners.iter().map(|&c| camera.project(c)).collect();

        for &(a, b) in &CUBE_EDGES {
            segments.push((projected[a], projected[b]));
        }
    }

    dump_svg(path, &segments, settings)
}

fn dump_svg(path: &str, segments: &[((f32, f32), (f32, f32))], settings: RenderSettings) -> io::Result<()> {
    let f = File::create(path)?;
    let mut f = BufWriter::new(f);

    writeln!(
        f,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}">"#,
        settings.width, settings.height
    )?;

    if segments.is_empty() {
        return writeln!(f, "</svg>");
    }

    let (min, max) = bounds_2d(segments);
    let scale = ((settings.width - settings.stroke_width * 2.0) / (max.0 - min.0).max(1e-3))
        .min((settings.height - settings.stroke_width * 2.0) / (max.1 - min.1).max(1e-3));

    writeln!(
        f,
        r#"<rect x="0" y="0" width="{:.2}" height="{:.2}" stroke="none" fill="white"/>"#,
        settings.width, settings.height
    )?;
    writeln!(
        f,
        r#"<g stroke="black" stroke-width="{}" fill="none" >"#,
        settings.stroke_width
    )?;

    for &((ax, ay), (bx, by)) in segments {
        let (sx0, sy0) = to_canvas((ax, ay), min, scale, settings);
        let (sx1, sy1) = to_canvas((bx, by), min, scale, settings);
        writeln!(f, r#"<polyline points="{sx0:.2},{sy0:.2} {sx1:.2},{sy1:.2}" />"#)?;
    }

    writeln!(f, "</g>\n</svg>")
}

fn bounds_2d(segments: &[((f32, f32), (f32, f32))]) -> ((f32, f32), (f32, f32)) {
    let mut min = segments[0].0;
    let mut max = segments[0].0;
    for &(a, b) in segments {
        for p in [a, b] {
            min.0 = min.0.min(p.0);
            min.1 = min.1.min(p.1);
            max.0 = max.0.max(p.0);
            max.1 = max.1.max(p.1);
        }
    }
    (min, max)
}

fn to_canvas(p: (f32, f32), min: (f32, f32), scale: f32, settings: RenderSettings) -> (f32, f32) {
    (
        (p.0 - min.0) * scale + settings.stroke_width,
        settings.height - ((p.1 - min.1) * scale + settings.stroke_width),
    )
}
