use dimchart_scales::error::{DimScaleError, ErrorKind};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DimChartError {
    #[error("Filter index {index} is out of bounds for {len} configured charts")]
    FilterIndexOutOfBounds { index: usize, len: usize },

    #[error("Scale error: `{0}`")]
    ScaleError(#[from] DimScaleError),
}

impl DimChartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DimChartError::FilterIndexOutOfBounds { .. } => ErrorKind::Index,
            DimChartError::ScaleError(err) => err.kind(),
        }
    }
}
