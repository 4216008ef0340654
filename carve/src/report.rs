//! Human-readable view and model summaries for console output.

use geo::Vec3;

use crate::model::VoxelModel;
use crate::view::View;

fn vector_to_string(v: Vec3) -> String {
    format!("[{}, {}, {}]", v.x, v.y, v.z)
}

/// One view's camera frame as a labeled block of vectors.
pub fn view_report(view: &View) -> String {
    format!(
        "[{}]\norigin = {}\nvx = {}\nvy = {}\nvz = {}\n",
        view.name,
        vector_to_string(view.origin),
        vector_to_string(view.vx),
        vector_to_string(view.vy),
        vector_to_string(view.vz),
    )
}

/// The `[+] Model additional information:` block printed when a model is
/// loaded with `print_info` set.
pub fn model_info_block(model: &VoxelModel) -> String {
    let [x_min, x_max, y_min, y_max, z_min, z_max] = model.bounds;
    let r = model.resolution;

    format!(
        "[+] Model additional information:\n\
         [!] Model bounds: ({x_min}, {x_max}, {y_min}, {y_max}, {z_min}, {z_max})\n\
         [!] Number of voxels: {}\n\
         [!] Number of active voxels: {}",
        r * r * r,
        model.cubes.len(),
    )
}
