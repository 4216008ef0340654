//! Voxel reconstruction engine: loads all views from a model directory,
//! computes world bounds, allocates a dense occupancy grid and carves it
//! against every view's silhouette.

use std::fs;
use std::path::{Path, PathBuf};

use geo::{v3, Vec3};

use crate::error::{ModelError, ModelResult};
use crate::report;
use crate::view::{Direction, View};

/// A reconstructed solid: an `R x R x R` boolean occupancy grid plus the
/// surviving cells expressed as world-space cube centers.
#[derive(Debug)]
pub struct VoxelModel {
    pub path: PathBuf,
    pub views: Vec<View>,
    pub resolution: usize,

    /// `space[(i*R + j)*R + k]`, indexed `[i, j, k]` via `Self::cell`.
    space: Vec<bool>,

    /// `[x_min, x_max, y_min, y_max, z_min, z_max]`.
    pub bounds: [f32; 6],
    pub cube_dimensions: Vec3,
    pub cubes: Vec<Vec3>,
}

impl VoxelModel {
    /// Load every view under `path`, carve the voxel grid against each of
    /// them and emit the surviving cubes. `resolution` must be positive.
    ///
    /// Per-view failures (missing files, bad schema, bad image) are logged
    /// to standard error and skipped; construction only fails if `path`
    /// doesn't exist or no usable view survives.
    pub fn load(path: impl AsRef<Path>, resolution: usize, print_info: bool) -> ModelResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_dir() {
            return Err(ModelError::NotAPath(path));
        }

        let views = load_views(&path)?;
        if views.is_empty() || views.iter().all(|v| v.polygon().is_empty()) {
            return Err(ModelError::NoValidViews(path));
        }

        for view in &views {
            println!("{}", report::view_report(view));
        }

        println!("[+] Starting initial reconstruction");
        let bounds = compute_bounds(&views);
        let mut space = vec![true; resolution * resolution * resolution];

        println!("[+] Refining model");
        for view in &views {
            println!("[+] Using {} to reconstruct.", view.name);
            project_view_to_voxels(&mut space, resolution, &bounds, view)?;
        }

        println!("[+] Generating surface");
        let (cube_dimensions, cubes) = generate_surface(&space, resolution, &bounds);

        let model = VoxelModel {
            path,
            views,
            resolution,
            space,
            bounds,
            cube_dimensions,
            cubes,
        };

        if print_info {
            println!("{}", report::model_info_block(&model));
        }

        Ok(model)
    }

    /// Whether voxel `(i, j, k)` is currently part of the solid.
    pub fn is_occupied(&self, i: usize, j: usize, k: usize) -> bool {
        self.space[cell(self.resolution, i, j, k)]
    }
}

fn load_views(path: &Path) -> ModelResult<Vec<View>> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();

    let mut views = Vec::with_capacity(dirs.len());
    for dir in dirs {
        match View::load(&dir) {
            Ok(view) => views.push(view),
            Err(e) => eprintln!("Invalid view: {}: {e}", dir.display()),
        }
    }

    Ok(views)
}

/// Seed model bounds from the first view, then union in every other view's
/// in-plane bounds; `z` always mirrors the final `y` extent. A deliberate
/// modeling assumption, not a bug: depth is never sampled directly, so it
/// borrows the vertical extent instead.
fn compute_bounds(views: &[View]) -> [f32; 6] {
    let (x0, y0, x1, y1) = views[0].get_bounds();
    let mut x_min = x0;
    let mut x_max = x1;
    let mut y_min = y0;
    let mut y_max = y1;

    for view in &views[1..] {
        let (xmin, ymin, xmax, ymax) = view.get_bounds();
        x_min = x_min.min(xmin);
        x_max = x_max.max(xmax);
        y_min = y_min.min(ymin);
        y_max = y_max.max(ymax);
    }

    [x_min, x_max, y_min, y_max, y_min, y_max]
}

/// Map a voxel index `i in [0, R)` to a world coordinate. Samples at cell
/// corners (both endpoints included), not cell centers.
fn interpolate(min: f32, max: f32, index: usize, resolution: usize) -> f32 {
    if resolution <= 1 {
        min
    } else {
        min + (index as f32) * (max - min) / (resolution as f32 - 1.0)
    }
}

fn cell(resolution: usize, i: usize, j: usize, k: usize) -> usize {
    (i * resolution + j) * resolution + k
}

fn project_view_to_voxels(
    space: &mut [bool],
    resolution: usize,
    bounds: &[f32; 6],
    view: &View,
) -> ModelResult<()> {
    let [x_min, x_max, y_min, y_max, z_min, z_max] = *bounds;
    let direction = view.get_direction();

    for i in 0..resolution {
        for j in 0..resolution {
            let world_point = match direction {
                Direction::XY => v3(
                    interpolate(x_min, x_max, i, resolution),
                    interpolate(y_min, y_max, j, resolution),
                    0.0,
                ),
                Direction::XZ => v3(
                    interpolate(x_min, x_max, i, resolution),
                    0.0,
                    interpolate(z_min, z_max, j, resolution),
                ),
                Direction::YZ => v3(
                    0.0,
                    interpolate(y_min, y_max, i, resolution),
                    interpolate(z_min, z_max, j, resolution),
                ),
            };

            let plane_point = view.real_to_plane(world_point)?;
            if view.is_point_inside_contour(plane_point) {
                continue;
            }

            for k in 0..resolution {
                let idx = match direction {
                    Direction::XY => cell(resolution, i, j, k),
                    Direction::XZ => cell(resolution, i, k, j),
                    Direction::YZ => cell(resolution, k, i, j),
                };
                space[idx] = false;
            }
        }
    }

    Ok(())
}

fn generate_surface(space: &[bool], resolution: usize, bounds: &[f32; 6]) -> (Vec3, Vec<Vec3>) {
    let [x_min, x_max, y_min, y_max, z_min, z_max] = *bounds;
    let r = resolution as f32;

    let cube_dimensions = v3((x_max - x_min) / r, (y_max - y_min) / r, (z_max - z_min) / r);

    let mut cubes = Vec::new();
    for x in 0..resolution {
        for y in 0..resolution {
            for z in 0..resolution {
                if !space[cell(resolution, x, y, z)] {
                    continue;
                }

                cubes.push(v3(
                    interpolate(x_min, x_max, x, resolution),
                    interpolate(y_min, y_max, y, resolution),
                    interpolate(z_min, z_max, z, resolution),
                ));
            }
        }
    }

    (cube_dimensions, cubes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::v2;

    fn square_view(name: &str, origin: Vec3, vx: Vec3, vy: Vec3, vz: Vec3) -> View {
        crate::view::test_support::view_with_polygon(
            name,
            origin,
            vx,
            vy,
            vz,
            vec![v2(-1.0, -1.0), v2(1.0, -1.0), v2(1.0, 1.0), v2(-1.0, 1.0)],
        )
    }

    #[test]
    fn test_compute_bounds_reuses_first_view_y_for_z() {
        let views = vec![
            square_view(
                "a",
                Vec3::zero(),
                v3(1.0, 0.0, 0.0),
                v3(0.0, 1.0, 0.0),
                v3(0.0, 0.0, 1.0),
            ),
            square_view(
                "b",
                Vec3::zero(),
                v3(1.0, 0.0, 0.0),
                v3(0.0, 1.0, 0.0),
                v3(0.0, 0.0, 1.0),
            ),
        ];

        let bounds = compute_bounds(&views);
        assert_eq!(bounds[4], bounds[2]);
        assert_eq!(bounds[5], bounds[3]);
    }

    #[test]
    fn test_interpolate_bounds_endpoints() {
        assert_eq!(interpolate(0.0, 10.0, 0, 5), 0.0);
        assert_eq!(interpolate(0.0, 10.0, 4, 5), 10.0);
        assert_eq!(interpolate(0.0, 10.0, 0, 1), 0.0);
    }

    #[test]
    fn test_full_square_on_all_views_retains_every_voxel() {
        let r = 8;
        let views = vec![
            square_view(
                "elevation",
                v3(123.0, 0.0, 0.0),
                v3(0.0, -5.0, 0.0),
                v3(-112.0, 0.0, 0.0),
                v3(0.0, 0.0, 11.0),
            ),
            square_view(
                "profile",
                v3(0.0, 40.0, 0.0),
                v3(1.0, 0.0, 0.0),
                v3(0.0, -9.0, 0.0),
                v3(0.0, 0.0, 21.0),
            ),
            square_view(
                "plan",
                v3(0.0, 0.0, 40.0),
                v3(1.0, 0.0, 0.0),
                v3(0.0, 0.0, -1.0),
                v3(0.0, -1.0, 0.0),
            ),
        ];

        let bounds = compute_bounds(&views);
        let mut space = vec![true; r * r * r];
        for view in &views {
            project_view_to_voxels(&mut space, r, &bounds, view).unwrap();
        }

        assert!(space.iter().all(|&occupied| occupied));
        assert_eq!(space.len(), 512);
    }

    #[test]
    fn test_carving_is_monotone() {
        let r = 6;
        let full = square_view(
            "full",
            Vec3::zero(),
            v3(1.0, 0.0, 0.0),
            v3(0.0, 0.0, 1.0),
            v3(0.0, 1.0, 0.0),
        );
        let empty = crate::view::test_support::view_with_polygon(
            "empty",
            Vec3::zero(),
            v3(1.0, 0.0, 0.0),
            v3(0.0, 0.0, 1.0),
            v3(0.0, 1.0, 0.0),
            vec![],
        );

        let bounds = compute_bounds(&[full.clone()]);

        let mut one_view = vec![true; r * r * r];
        project_view_to_voxels(&mut one_view, r, &bounds, &full).unwrap();
        let one_view_count = one_view.iter().filter(|&&b| b).count();

        let mut two_views = vec![true; r * r * r];
        project_view_to_voxels(&mut two_views, r, &bounds, &full).unwrap();
        project_view_to_voxels(&mut two_views, r, &bounds, &empty).unwrap();
        let two_view_count = two_views.iter().filter(|&&b| b).count();

        assert!(two_view_count <= one_view_count);
    }
}
