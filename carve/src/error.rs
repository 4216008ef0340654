//! Error taxonomy for the core: a geometry-level error, a per-view error and
//! a model-level error — plain enums with `From` conversions rather than a
//! derive-macro error crate.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type returned by `geo`-level geometry operations on a `View`.
pub type GeometryResult<T> = std::result::Result<T, GeometryError>;

/// Possible errors while inverting a view's plane projection.
#[derive(Debug)]
pub enum GeometryError {
    /// The view's `(vx, vz)` basis is rank-deficient, so `real_to_plane`
    /// has no unique least-squares solution.
    Singular,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::Singular => write!(f, "view basis (vx, vz) is rank-deficient"),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Result type returned while constructing a single `View`.
pub type ViewResult<T> = std::result::Result<T, ViewError>;

/// Possible errors while loading one view directory. All of these are
/// recoverable at the model level: the offending view is skipped.
#[derive(Debug)]
pub enum ViewError {
    /// `camera.{json,toml}` or `plane.bmp` is missing from the view
    /// directory.
    MissingFiles,

    /// The camera metadata is malformed: either it failed to parse as
    /// JSON/TOML at all, or it parsed but failed schema validation
    /// (missing key, wrong type, wrong vector arity, ...).
    BadSchema(String),

    /// `plane.bmp` could not be decoded as an image.
    BadImage(image::ImageError),

    /// IO error while reading `camera.*` or `plane.bmp`.
    IoError(io::Error),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewError::MissingFiles => write!(f, "missing camera.{{json,toml}} or plane.bmp"),
            ViewError::BadSchema(msg) => write!(f, "malformed camera metadata: {msg}"),
            ViewError::BadImage(e) => write!(f, "could not decode plane.bmp: {e}"),
            ViewError::IoError(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for ViewError {}

impl From<io::Error> for ViewError {
    fn from(e: io::Error) -> Self {
        ViewError::IoError(e)
    }
}

impl From<image::ImageError> for ViewError {
    fn from(e: image::ImageError) -> Self {
        ViewError::BadImage(e)
    }
}

/// Result type returned by `VoxelModel::load`.
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Possible errors while constructing a `VoxelModel`. Both are fatal: they
/// abort construction and propagate to the caller.
#[derive(Debug)]
pub enum ModelError {
    /// The given model root does not exist.
    NotAPath(PathBuf),

    /// Every view directory failed to load, or every view that did load has
    /// an empty silhouette.
    NoValidViews(PathBuf),

    /// A view's basis was singular during carving. In practice this
    /// indicates a malformed camera that should have been caught earlier
    /// as `BadSchema`.
    Geometry(GeometryError),

    /// IO error while scanning the model directory.
    IoError(io::Error),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::NotAPath(p) => write!(f, "not a valid path: {}", p.display()),
            ModelError::NoValidViews(p) => write!(f, "no valid views found in: {}", p.display()),
            ModelError::Geometry(e) => write!(f, "geometry error during carving: {e}"),
            ModelError::IoError(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for ModelError {}

impl From<GeometryError> for ModelError {
    fn from(e: GeometryError) -> Self {
        ModelError::Geometry(e)
    }
}

impl From<io::Error> for ModelError {
    fn from(e: io::Error) -> Self {
        ModelError::IoError(e)
    }
}
