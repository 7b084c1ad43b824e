//! Error types for mesh construction and map configuration

use thiserror::Error;

/// Errors raised while building a [`DualMesh`](crate::mesh::DualMesh).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// Fewer points than a single triangle needs.
    #[error("need at least 3 points, got {0}")]
    TooFewPoints(usize),

    /// The triangle list is not a multiple of three or is empty.
    #[error("triangle index list has length {0}, expected a non-zero multiple of 3")]
    BadTriangleList(usize),

    /// A triangle refers to a point that does not exist.
    #[error("triangle {triangle} refers to point {point}, but only {num_points} points exist")]
    PointOutOfRange {
        /// Offending triangle.
        triangle: usize,
        /// Offending point index.
        point: usize,
        /// Number of points supplied.
        num_points: usize,
    },

    /// A point that no triangle uses.
    #[error("point {0} is not a corner of any triangle")]
    UnusedPoint(usize),

    /// A triangle uses the same point twice.
    #[error("triangle {0} is degenerate")]
    DegenerateTriangle(usize),

    /// A triangle is wound the other way from the first triangle.
    #[error("triangle {0} is wound inconsistently")]
    InconsistentWinding(usize),

    /// The same directed edge appears in two triangles.
    #[error("directed edge {begin} -> {end} appears more than once")]
    NonManifold {
        /// Begin point of the edge.
        begin: usize,
        /// End point of the edge.
        end: usize,
    },

    /// The unpaired sides do not form a single closed hull.
    #[error("hull is not a single cycle ({0})")]
    BrokenHull(&'static str),

    /// Map extent must be positive.
    #[error("map extent must be positive, got {width}x{height}")]
    BadExtent {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
}

/// Errors raised by unusable map options.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("shape.amplitudes must not be empty")]
    EmptyAmplitudes,

    #[error("shape.amplitudes must sum to a positive finite value, got {0}")]
    BadAmplitudeSum(f64),

    #[error("option {name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },

    #[error("mesh spacing must be positive, got {0}")]
    BadSpacing(f64),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top level error for map generation.
#[derive(Error, Debug)]
pub enum MapError {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
