use std::rc::Rc;

use dimchart_common::{AxisValue, Observable, Partition, ValueAccessor};
use indexmap::IndexMap;

use crate::axis::{axis_ticks, classify, AxisKind, AxisName, AxisRange, AxisTicks, Categories};
use crate::error::DimScaleError;

fn validate_axis_length(axis_length: f64) -> Result<(), DimScaleError> {
    // NaN fails here too
    if axis_length > 0.0 {
        Ok(())
    } else {
        Err(DimScaleError::InvalidAxisLength(axis_length))
    }
}

/// Position of `value` along an axis of `axis_length` pixels.
///
/// When every partition's accessor value is a finite number, `value` is
/// scaled linearly through `range`. Otherwise the axis is categorical and
/// `value` lands in the center of its band.
pub fn position_of(
    partitions: &[Partition],
    accessor: Option<&ValueAccessor>,
    range: Option<AxisRange>,
    value: &AxisValue,
    axis_length: f64,
    axis: AxisName,
) -> Result<f64, DimScaleError> {
    let accessor = accessor.ok_or(DimScaleError::MissingValueAccessor { axis })?;
    validate_axis_length(axis_length)?;

    let values: Vec<AxisValue> = partitions.iter().map(|p| accessor(p)).collect();
    match classify(&values) {
        AxisKind::Numeric => {
            let range = range.ok_or(DimScaleError::MissingRange { axis })?;
            range.position(value.as_number(), axis_length)
        }
        AxisKind::Categorical => Ok(Categories::from_values(&values).band_center(value, axis_length)),
    }
}

/// Position of every partition along an axis, keyed by partition key.
///
/// `None` when there are no partitions.
pub fn positions_of(
    partitions: &[Partition],
    accessor: Option<&ValueAccessor>,
    range: Option<AxisRange>,
    axis_length: f64,
    axis: AxisName,
) -> Result<Option<IndexMap<String, f64>>, DimScaleError> {
    let accessor = accessor.ok_or(DimScaleError::MissingValueAccessor { axis })?;
    validate_axis_length(axis_length)?;
    if partitions.is_empty() {
        return Ok(None);
    }

    let values: Vec<AxisValue> = partitions.iter().map(|p| accessor(p)).collect();
    let keyed = partitions.iter().map(Partition::key).zip(&values);
    let positions = match classify(&values) {
        AxisKind::Numeric => {
            let range = range.ok_or(DimScaleError::MissingRange { axis })?;
            range.validate()?;
            keyed
                .map(|(key, value)| {
                    Ok((key.to_string(), range.position(value.as_number(), axis_length)?))
                })
                .collect::<Result<IndexMap<_, _>, DimScaleError>>()?
        }
        AxisKind::Categorical => {
            let categories = Categories::from_values(&values);
            keyed
                .map(|(key, value)| (key.to_string(), categories.band_center(value, axis_length)))
                .collect()
        }
    };
    Ok(Some(positions))
}

#[derive(Clone)]
struct AxisState {
    name: AxisName,
    accessor: Observable<Option<ValueAccessor>>,
    range: Observable<Option<AxisRange>>,
}

impl AxisState {
    fn new(name: AxisName) -> Self {
        Self {
            name,
            accessor: Observable::new(None),
            range: Observable::new(None),
        }
    }

    fn setup(&self, accessor: ValueAccessor, range: Option<AxisRange>) {
        self.accessor.set(Some(accessor));
        self.range.set(range);
    }

    fn position(
        &self,
        partitions: &[Partition],
        value: &AxisValue,
        axis_length: f64,
    ) -> Result<f64, DimScaleError> {
        position_of(
            partitions,
            self.accessor.get().as_ref(),
            self.range.get(),
            value,
            axis_length,
            self.name,
        )
    }

    fn positions(
        &self,
        partitions: &[Partition],
        axis_length: f64,
    ) -> Result<Option<IndexMap<String, f64>>, DimScaleError> {
        positions_of(
            partitions,
            self.accessor.get().as_ref(),
            self.range.get(),
            axis_length,
            self.name,
        )
    }

    fn ticks(&self, partitions: &[Partition]) -> Result<AxisTicks, DimScaleError> {
        let accessor = self
            .accessor
            .get()
            .ok_or(DimScaleError::MissingValueAccessor { axis: self.name })?;
        axis_ticks(partitions, &accessor, self.range.get(), self.name)
    }
}

/// Per-axis value accessors and numeric ranges used to place partitions.
#[derive(Clone)]
pub struct CoordinatesController {
    x: AxisState,
    y: AxisState,
}

impl Default for CoordinatesController {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordinatesController {
    pub fn new() -> Self {
        Self {
            x: AxisState::new(AxisName::X),
            y: AxisState::new(AxisName::Y),
        }
    }

    pub fn setup_x(&self, accessor: ValueAccessor, range: Option<AxisRange>) {
        self.x.setup(accessor, range)
    }

    pub fn setup_y(&self, accessor: ValueAccessor, range: Option<AxisRange>) {
        self.y.setup(accessor, range)
    }

    pub fn x_axis_value_accessor(&self) -> Option<ValueAccessor> {
        self.x.accessor.get()
    }

    pub fn y_axis_value_accessor(&self) -> Option<ValueAccessor> {
        self.y.accessor.get()
    }

    pub fn x_range(&self) -> Option<AxisRange> {
        self.x.range.get()
    }

    pub fn y_range(&self) -> Option<AxisRange> {
        self.y.range.get()
    }

    pub fn set_x_range(&self, range: Option<AxisRange>) {
        self.x.range.set(range)
    }

    pub fn set_y_range(&self, range: Option<AxisRange>) {
        self.y.range.set(range)
    }

    pub fn on_x_range_changed(&self, listener: impl Fn(&Option<AxisRange>) + 'static) {
        self.x.range.on_change(listener)
    }

    pub fn on_y_range_changed(&self, listener: impl Fn(&Option<AxisRange>) + 'static) {
        self.y.range.on_change(listener)
    }

    /// Registers `listener` for range changes on either axis.
    pub fn on_any_range_changed(&self, listener: impl Fn(&Option<AxisRange>) + 'static) {
        let listener = Rc::new(listener);
        let for_x = listener.clone();
        self.x.range.on_change(move |range| for_x(range));
        self.y.range.on_change(move |range| listener(range));
    }

    pub fn x_axis_position(
        &self,
        partitions: &[Partition],
        value: &AxisValue,
        axis_length: f64,
    ) -> Result<f64, DimScaleError> {
        self.x.position(partitions, value, axis_length)
    }

    pub fn y_axis_position(
        &self,
        partitions: &[Partition],
        value: &AxisValue,
        axis_length: f64,
    ) -> Result<f64, DimScaleError> {
        self.y.position(partitions, value, axis_length)
    }

    pub fn x_axis_position_values(
        &self,
        partitions: &[Partition],
        axis_length: f64,
    ) -> Result<Option<IndexMap<String, f64>>, DimScaleError> {
        self.x.positions(partitions, axis_length)
    }

    pub fn y_axis_position_values(
        &self,
        partitions: &[Partition],
        axis_length: f64,
    ) -> Result<Option<IndexMap<String, f64>>, DimScaleError> {
        self.y.positions(partitions, axis_length)
    }

    pub fn x_axis_ticks(&self, partitions: &[Partition]) -> Result<AxisTicks, DimScaleError> {
        self.x.ticks(partitions)
    }

    pub fn y_axis_ticks(&self, partitions: &[Partition]) -> Result<AxisTicks, DimScaleError> {
        self.y.ticks(partitions)
    }
}
