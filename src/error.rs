use thiserror::Error;

/// Top-level error type for the geoprim crate.
#[derive(Debug, Error)]
pub enum GeoprimError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    /// A contract method was called on a destroyed primitive.
    #[error("primitive used after destroy")]
    UseAfterDestroy,
}

/// Structurally invalid caller input.
///
/// Raised synchronously by a setter or by the hierarchy flattener during
/// traversal. The previously stored configuration is left untouched.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("boundary loop has {count} points, at least 3 are required")]
    TooFewPoints { count: usize },
}

/// A required field is missing or invalid at tick time.
///
/// These are programmer errors: the primitive fails loudly instead of
/// silently skipping the frame.
#[derive(Debug, Error)]
pub enum InvariantViolation {
    #[error("no reference ellipsoid assigned")]
    MissingEllipsoid,

    #[error("no material assigned")]
    MissingMaterial,

    #[error("granularity must be positive, got {0}")]
    NonPositiveGranularity(f64),
}

/// Errors from geometry construction.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("degenerate boundary: {0}")]
    Degenerate(String),

    #[error("triangulation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`GeoprimError`].
pub type Result<T> = std::result::Result<T, GeoprimError>;
