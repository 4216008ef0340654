//! Volume carving (shape-from-silhouette) reconstruction: load camera views
//! with their silhouettes from a model directory, carve a dense voxel grid
//! against every view and emit the surviving voxels as world-space cubes.

pub mod contour;
pub mod error;
pub mod model;
pub mod polygon;
pub mod report;
pub mod view;

pub use error::{GeometryError, ModelError, ViewError};
pub use model::VoxelModel;
pub use view::{Direction, View};
