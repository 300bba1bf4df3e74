use thiserror::Error;

/// Top-level error type for the confiner.
#[derive(Debug, Error)]
pub enum ConfinerError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to baking.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("bake cancelled after {generations} generation(s)")]
    Cancelled { generations: usize },
}

/// Errors raised while querying a baked table.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(
        "cannot interpolate between generations at {lower} ({lower_count} polygons) and \
         {upper} ({upper_count} polygons) for window size {window_size}"
    )]
    TopologyMismatch {
        lower: f64,
        upper: f64,
        lower_count: usize,
        upper_count: usize,
        window_size: f64,
    },
}

/// Convenience type alias for results using [`ConfinerError`].
pub type Result<T> = std::result::Result<T, ConfinerError>;
