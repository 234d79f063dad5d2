use std::cmp::Ordering;
use std::rc::Rc;

use dimchart_common::{Observable, Partition, ValueAccessor};

use crate::config::ChartConfig;
use crate::partition::{partition_data, GroupBy, PartitionComparator};
use crate::reduce::Reducer;

/// The data side of one chart: partitions computed from the records it is
/// fed, plus the accessors renderers use to read them.
///
/// Cloning yields another handle to the same chart.
pub struct ChartController<T> {
    chart_id: String,
    group_by: GroupBy<T>,
    reducer: Reducer<T>,
    sort_by: Observable<PartitionComparator>,
    partitions: Observable<Vec<Partition>>,
    x_axis_value_accessor: Observable<Option<ValueAccessor>>,
    y_axis_value_accessor: Observable<Option<ValueAccessor>>,
    size_value_accessor: Observable<Option<ValueAccessor>>,
}

impl<T: 'static> ChartController<T> {
    pub fn new(group_by: impl Fn(&T) -> String + 'static, reducer: Reducer<T>) -> Self {
        Self::from_config(ChartConfig::new(group_by, reducer))
    }

    pub fn from_config(config: ChartConfig<T>) -> Self {
        Self {
            chart_id: config.chart_id,
            group_by: config.dimension,
            reducer: config.reducer,
            sort_by: Observable::new(config.sort_by),
            partitions: Observable::new(Vec::new()),
            x_axis_value_accessor: Observable::new(None),
            y_axis_value_accessor: Observable::new(None),
            size_value_accessor: Observable::new(None),
        }
    }

    pub fn chart_id(&self) -> &str {
        &self.chart_id
    }

    pub fn group_by(&self) -> GroupBy<T> {
        self.group_by.clone()
    }

    /// Recomputes the partitions from `records` and publishes them.
    #[tracing::instrument(skip_all, fields(chart_id = %self.chart_id))]
    pub fn update_data(&self, records: &[T]) {
        let sort_by = self.sort_by.get();
        let partitions = partition_data(records, &self.group_by, &self.reducer, &sort_by);
        tracing::trace!(
            records = records.len(),
            partitions = partitions.len(),
            "partitioned chart data"
        );
        self.partitions.set(partitions);
    }

    pub fn partitions(&self) -> Vec<Partition> {
        self.partitions.get()
    }

    pub fn on_partitions_changed(&self, listener: impl Fn(&[Partition]) + 'static) {
        self.partitions.on_change(move |partitions| listener(partitions))
    }

    /// The current partition with `key`, if any.
    pub fn find(&self, key: &str) -> Option<Partition> {
        self.partitions
            .with(|partitions| partitions.iter().find(|p| p.key() == key).cloned())
    }

    /// Replaces the comparator. It is applied on the next [`update_data`](Self::update_data).
    pub fn set_sort(&self, sort_by: impl Fn(&Partition, &Partition) -> Ordering + 'static) {
        self.sort_by.set(Rc::new(sort_by))
    }

    pub fn sort(&self) -> PartitionComparator {
        self.sort_by.get()
    }

    pub fn on_sort_changed(&self, listener: impl Fn(&PartitionComparator) + 'static) {
        self.sort_by.on_change(listener)
    }

    pub fn set_x_axis_value_accessor(&self, accessor: ValueAccessor) {
        self.x_axis_value_accessor.set(Some(accessor))
    }

    pub fn x_axis_value_accessor(&self) -> Option<ValueAccessor> {
        self.x_axis_value_accessor.get()
    }

    pub fn set_y_axis_value_accessor(&self, accessor: ValueAccessor) {
        self.y_axis_value_accessor.set(Some(accessor))
    }

    pub fn y_axis_value_accessor(&self) -> Option<ValueAccessor> {
        self.y_axis_value_accessor.get()
    }

    pub fn set_size_value_accessor(&self, accessor: ValueAccessor) {
        self.size_value_accessor.set(Some(accessor))
    }

    pub fn size_value_accessor(&self) -> Option<ValueAccessor> {
        self.size_value_accessor.get()
    }
}

impl<T> Clone for ChartController<T> {
    fn clone(&self) -> Self {
        Self {
            chart_id: self.chart_id.clone(),
            group_by: self.group_by.clone(),
            reducer: self.reducer.clone(),
            sort_by: self.sort_by.clone(),
            partitions: self.partitions.clone(),
            x_axis_value_accessor: self.x_axis_value_accessor.clone(),
            y_axis_value_accessor: self.y_axis_value_accessor.clone(),
            size_value_accessor: self.size_value_accessor.clone(),
        }
    }
}
