//! A minimal orthographic look-at camera: a cross-product basis
//! construction, projecting by dot products against that basis instead of
//! through a full 4x4 perspective matrix, since the renderer only needs a
//! static wireframe preview rather than a rasterizer.

use geo::Vec3;

#[derive(Debug)]
pub struct Camera {
    eye: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Camera {
    pub fn look_at(eye: Vec3, target: Vec3, vup: Vec3) -> Self {
        let forward = normalize(target - eye);
        let right = normalize(cross(forward, vup));
        let up = cross(right, forward);

        Camera { eye, right, up }
    }

    /// Project a world point to normalized 2D screen coordinates.
    pub fn project(&self, p: Vec3) -> (f32, f32) {
        let d = p - self.eye;
        (d.dot(self.right), d.dot(self.up))
    }
}

fn normalize(v: Vec3) -> Vec3 {
    let n = v.norm();
    if n == 0.0 {
        v
    } else {
        v / n
    }
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    geo::v3(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eye_projects_to_origin() {
        let cam = Camera::look_at(geo::v3(3.0, 3.0, 3.0), Vec3::zero(), geo::v3(0.0, 1.0, 0.0));
        let (x, y) = cam.project(geo::v3(3.0, 3.0, 3.0));
        assert!(x.abs() < 1e-5 && y.abs() < 1e-5);
    }
}
