//! One silhouette view: camera frame, contour polygon, and the
//! forward/inverse plane<->world maps.

use std::fs;
use std::path::Path;

use geo::{v3, Vec2, Vec3};
use image::{imageops, GrayImage, Luma};
use serde::Deserialize;

use crate::contour::extract_contour;
use crate::error::{GeometryError, GeometryResult, ViewError, ViewResult};
use crate::polygon;

/// The world-space plane a view's image plane is most parallel to.
///
/// Determined by the dominant component of the view's `vy` axis. Ties are
/// broken `YZ > XZ > XY`, because that ordering decides which world axes
/// the carving sweep scans vs. carves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    XY,
    XZ,
    YZ,
}

/// One view's camera frame plus the silhouette it was built from.
#[derive(Debug, Clone)]
pub struct View {
    pub name: String,
    pub origin: Vec3,
    pub vx: Vec3,
    pub vy: Vec3,
    pub vz: Vec3,
    polygon: Vec<Vec2>,
}

/// Structural schema of `camera.{json,toml}`. Serde validates the shape for
/// us: a missing key surfaces as a missing-field error, a non-string `name`
/// or non-numeric vector element as an invalid-type error, and a
/// wrong-length array as an invalid-length error — all fold into
/// `ViewError::BadSchema`. Unknown keys are ignored by default.
#[derive(Debug, Deserialize)]
struct CameraSchema {
    name: String,
    origin: [f32; 3],
    vx: [f32; 3],
    vy: [f32; 3],
    vz: [f32; 3],
}

impl View {
    /// Load a view from a directory containing `camera.json` (or
    /// `camera.toml`) and `plane.bmp`.
    pub fn load(dir: &Path) -> ViewResult<Self> {
        let json_path = dir.join("camera.json");
        let toml_path = dir.join("camera.toml");
        let plane_path = dir.join("plane.bmp");

        if !plane_path.is_file() || !(json_path.is_file() || toml_path.is_file()) {
            return Err(ViewError::MissingFiles);
        }

        let schema = if json_path.is_file() {
            parse_json(&json_path)?
        } else {
            parse_toml(&toml_path)?
        };

        let img = image::open(&plane_path)?.to_luma8();
        let img = preprocess(&img);
        let polygon = extract_contour(&img);

        Ok(View {
            name: schema.name,
            origin: v3(schema.origin[0], schema.origin[1], schema.origin[2]),
            vx: v3(schema.vx[0], schema.vx[1], schema.vx[2]),
            vy: v3(schema.vy[0], schema.vy[1], schema.vy[2]),
            vz: v3(schema.vz[0], schema.vz[1], schema.vz[2]),
            polygon,
        })
    }

    /// `origin + u*vx + v*vz`. Note `vy` is intentionally absent: only the
    /// in-plane basis participates in both directions.
    pub fn plane_to_real(&self, p: Vec2) -> Vec3 {
        self.origin + self.vx * p.x + self.vz * p.y
    }

    /// Invert `plane_to_real` by solving the overdetermined `[vx|vz]` system
    /// in the least-squares sense.
    pub fn real_to_plane(&self, p: Vec3) -> GeometryResult<Vec2> {
        geo::solve_3x2(self.vx, self.vz, p - self.origin).ok_or(GeometryError::Singular)
    }

    pub fn is_point_inside_contour(&self, p: Vec2) -> bool {
        polygon::contains(&self.polygon, p)
    }

    /// `(xmin, ymin, xmax, ymax)` of the contour polygon, all zeros if the
    /// polygon is empty.
    pub fn get_bounds(&self) -> (f32, f32, f32, f32) {
        polygon::bounds(&self.polygon)
    }

    pub fn polygon(&self) -> &[Vec2] {
        &self.polygon
    }

    /// The world plane this view's image plane is most nearly parallel to.
    pub fn get_direction(&self) -> Direction {
        let d_x = self.vy.dot(v3(1.0, 0.0, 0.0)).abs();
        let d_y = self.vy.dot(v3(0.0, 1.0, 0.0)).abs();
        let d_z = self.vy.dot(v3(0.0, 0.0, 1.0)).abs();

        if d_x >= d_y && d_x >= d_z {
            Direction::YZ
        } else if d_y >= d_x && d_y >= d_z {
            Direction::XZ
        } else {
            Direction::XY
        }
    }
}

fn parse_json(path: &Path) -> ViewResult<CameraSchema> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| ViewError::BadSchema(e.to_string()))
}

fn parse_toml(path: &Path) -> ViewResult<CameraSchema> {
    let text = fs::read_to_string(path)?;
    toml::from_str(&text).map_err(|e| ViewError::BadSchema(e.to_string()))
}

/// Inverse binary threshold at 254 followed by the canonical 3x3 Laplacian
/// edge-emphasis kernel (center 8, surround -1). Both lean on the `image`
/// crate: thresholding maps pixels through its own buffer, and the
/// convolution is `imageops::filter3x3`.
fn preprocess(img: &GrayImage) -> GrayImage {
    let mut thresholded = img.clone();
    for Luma([v]) in thresholded.pixels_mut() {
        *v = if *v <= 254 { 0xFF } else { 0x00 };
    }

    #[rustfmt::skip]
    let laplacian: [f32; 9] = [
        -1.0, -1.0, -1.0,
        -1.0,  8.0, -1.0,
        -1.0, -1.0, -1.0,
    ];

    imageops::filter3x3(&thresholded, &laplacian)
}


#[cfg(test)]
mod tests {
    use super::*;
    use geo::v2;
    use proptest::prelude::*;

    fn test_view(vx: Vec3, vy: Vec3, vz: Vec3) -> View {
        View {
            name: "test".into(),
            origin: v3(1.0, 2.0, 3.0),
            vx,
            vy,
            vz,
            polygon: vec![v2(-1.0, -1.0), v2(1.0, -1.0), v2(1.0, 1.0), v2(-1.0, 1.0)],
        }
    }

    #[test]
    fn test_direction_dominant_axis() {
        assert_eq!(
            test_view(v3(0.0, -5.0, 0.0), v3(-112.0, 0.0, 0.0), v3(0.0, 0.0, 11.0)).get_direction(),
            Direction::YZ
        );
        assert_eq!(
            test_view(v3(1.0, 0.0, 0.0), v3(0.0, -9.0, 0.0), v3(0.0, 0.0, 21.0)).get_direction(),
            Direction::XZ
        );
        assert_eq!(
            test_view(v3(1.0, 0.0, 0.0), v3(0.0, 0.0, -1.0), v3(0.0, -1.0, 0.0)).get_direction(),
            Direction::XY
        );
    }

    #[test]
    fn test_direction_ties_break_yz_then_xz() {
        // |vy| equal on all three axes: YZ wins.
        assert_eq!(test_view(Vec3::zero(), v3(1.0, 1.0, 1.0), Vec3::zero()).get_direction(), Direction::YZ);
        // equal on y and z only: XZ wins over XY.
        assert_eq!(test_view(Vec3::zero(), v3(0.0, 1.0, 1.0), Vec3::zero()).get_direction(), Direction::XZ);
    }

    #[test]
    fn test_plane_to_real_and_back_identity() {
        let v = test_view(v3(1.0, 0.0, 0.0), v3(0.0, 1.0, 0.0), v3(0.0, 0.0, 1.0));
        let p = v2(2.5, -3.5);
        let world = v.plane_to_real(p);
        let back = v.real_to_plane(world).unwrap();
        assert!((back.x - p.x).abs() < 1e-3);
        assert!((back.y - p.y).abs() < 1e-3);
    }

    #[test]
    fn test_real_to_plane_singular_basis() {
        let v = test_view(v3(1.0, 2.0, 3.0), v3(0.0, 1.0, 0.0), v3(2.0, 4.0, 6.0));
        assert!(matches!(v.real_to_plane(v3(0.0, 0.0, 0.0)), Err(GeometryError::Singular)));
    }

    proptest! {
        #[test]
        fn test_roundtrip_identity(
            ox in -50f32..50.0, oy in -50f32..50.0, oz in -50f32..50.0,
            u in -10f32..10.0, v in -10f32..10.0,
        ) {
            // a well-conditioned, non-degenerate basis
            let view = test_view(v3(1.0, 0.3, 0.0), v3(0.0, 0.0, 1.0), v3(0.0, 1.0, 0.7));
            let mut view = view;
            view.origin = v3(ox, oy, oz);

            let p = v2(u, v);
            let world = view.plane_to_real(p);
            let back = view.real_to_plane(world).expect("basis is full rank");

            prop_assert!((back.x - p.x).abs() < 1e-2);
            prop_assert!((back.y - p.y).abs() < 1e-2);
        }
    }
}
