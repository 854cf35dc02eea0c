use thiserror::Error;

/// Caller contract violations for the generator, evaluator and solver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TourError {
    #[error("at least one city is required")]
    NoCities,
    #[error("tour visits {actual} cities but the city set has {expected}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("city index {index} is out of range for {len} cities")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("city {0} appears more than once in the tour")]
    DuplicateCity(usize),
    #[error("bounds {width}x{height} leave no room inside a margin of {margin}")]
    BoundsTooSmall { width: f64, height: f64, margin: f64 },
}
