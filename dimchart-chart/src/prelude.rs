pub use crate::chart::ChartController;
pub use crate::config::ChartConfig;
pub use crate::dimensional::{ChartComponents, DimensionalController};
pub use crate::error::DimChartError;
pub use crate::filter::{FilterController, SelectionContext};
pub use crate::hotspot::HotspotController;
pub use crate::partition::{compute_partitions, descending_value, GroupBy, PartitionComparator};
pub use crate::reduce::{identity, reduce_count, reduce_sum, Reducer};
pub use crate::selection::SelectionController;
pub use dimchart_common::{AxisValue, Observable, Partition, PartitionValue, ValueAccessor};
pub use dimchart_scales::{AxisRange, CoordinatesController};
