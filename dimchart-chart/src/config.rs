use std::cmp::Ordering;
use std::rc::Rc;

use dimchart_common::Partition;
use uuid::Uuid;

use crate::partition::{descending_value, GroupBy, PartitionComparator};
use crate::reduce::Reducer;

/// Everything a chart needs to turn records into partitions.
pub struct ChartConfig<T> {
    /// Identifies the chart instance, a random UUID unless set explicitly
    pub chart_id: String,
    pub dimension: GroupBy<T>,
    pub reducer: Reducer<T>,
    pub sort_by: PartitionComparator,
}

impl<T: 'static> ChartConfig<T> {
    pub fn new(dimension: impl Fn(&T) -> String + 'static, reducer: Reducer<T>) -> Self {
        Self {
            chart_id: Uuid::new_v4().to_string(),
            dimension: Rc::new(dimension),
            reducer,
            sort_by: descending_value(),
        }
    }

    pub fn with_chart_id(mut self, chart_id: impl Into<String>) -> Self {
        self.chart_id = chart_id.into();
        self
    }

    pub fn with_sort_by(
        mut self,
        sort_by: impl Fn(&Partition, &Partition) -> Ordering + 'static,
    ) -> Self {
        self.sort_by = Rc::new(sort_by);
        self
    }
}

impl<T> Clone for ChartConfig<T> {
    fn clone(&self) -> Self {
        Self {
            chart_id: self.chart_id.clone(),
            dimension: self.dimension.clone(),
            reducer: self.reducer.clone(),
            sort_by: self.sort_by.clone(),
        }
    }
}

impl<T> std::fmt::Debug for ChartConfig<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartConfig")
            .field("chart_id", &self.chart_id)
            .finish_non_exhaustive()
    }
}
