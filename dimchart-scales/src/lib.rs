pub mod axis;
pub mod coordinates;
pub mod error;
pub mod format;
pub mod stats;
pub mod ticks;

pub use axis::{AxisName, AxisRange, AxisTicks};
pub use coordinates::CoordinatesController;
pub use error::{DimScaleError, ErrorKind};
pub use ticks::{nice_ticks, NiceTicks, NiceTicksConfig};
