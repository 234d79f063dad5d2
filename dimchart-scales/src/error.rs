use crate::axis::AxisName;

/// Category of a failure, independent of the concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// A required accessor or range was never configured.
    Configuration,
    /// A numeric range or axis length is not usable.
    Range,
    /// An index is outside the configured bounds.
    Index,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DimScaleError {
    #[error("{axis} axis value accessor must be set before computing positions")]
    MissingValueAccessor { axis: AxisName },

    #[error("{axis} axis range must be set for numeric values")]
    MissingRange { axis: AxisName },

    #[error("Axis length ({0}) must be greater than 0")]
    InvalidAxisLength(f64),

    #[error("Range max ({max}) must be greater than range min ({min})")]
    InvalidRange { min: f64, max: f64 },
}

impl DimScaleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DimScaleError::MissingValueAccessor { .. } | DimScaleError::MissingRange { .. } => {
                ErrorKind::Configuration
            }
            DimScaleError::InvalidAxisLength(_) | DimScaleError::InvalidRange { .. } => {
                ErrorKind::Range
            }
        }
    }
}
