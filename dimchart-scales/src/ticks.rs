use serde::{Deserialize, Serialize};

use crate::format::round_half_up;

/// Tuning for [`nice_ticks_with_config`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NiceTicksConfig {
    /// Upper bound on the number of major ticks across the range
    pub max_major_ticks: usize,
    /// Upper bound on the number of minor ticks per major interval
    pub max_minor_ticks: usize,
    /// Distance under which two tick values are considered the same
    pub tolerance: f64,
}

impl Default for NiceTicksConfig {
    fn default() -> Self {
        Self {
            max_major_ticks: 10,
            max_minor_ticks: 5,
            tolerance: 1e-10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NiceTicks {
    pub majors: Vec<f64>,
    pub minors: Vec<f64>,
}

/// Rounds `value` to a 1, 2, 5 or 10 multiple of its power of ten.
///
/// With `round` the closest nice fraction is chosen, otherwise the smallest
/// nice fraction that is not below the value's fraction.
pub fn nice_number(value: f64, round: bool) -> f64 {
    let exponent = value.log10().floor();
    let fraction = value / 10f64.powf(exponent);

    let nice_fraction = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice_fraction * 10f64.powf(exponent)
}

/// Human friendly major and minor ticks between `min` and `max`, using the
/// default [`NiceTicksConfig`].
pub fn nice_ticks(min: f64, max: f64) -> NiceTicks {
    nice_ticks_with_config(min, max, &NiceTicksConfig::default())
}

/// Human friendly major and minor ticks between `min` and `max`.
///
/// Majors are multiples of a nice step inside the range, plus `min` and
/// `max` themselves. Minors are multiples of a finer nice step that do not
/// coincide with a major.
///
/// A reversed range is swapped, `min == max` yields that single value as
/// the only major, and non-finite bounds yield no ticks.
pub fn nice_ticks_with_config(min: f64, max: f64, config: &NiceTicksConfig) -> NiceTicks {
    if !min.is_finite() || !max.is_finite() {
        return NiceTicks::default();
    }
    let (min, max) = if min > max { (max, min) } else { (min, max) };
    if min == max {
        return NiceTicks {
            majors: vec![min],
            minors: vec![],
        };
    }

    let tolerance = config.tolerance;
    let major_intervals = config.max_major_ticks.max(2) - 1;
    let minor_intervals = config.max_minor_ticks.max(2) - 1;

    let nice_range = nice_number(max - min, false);
    let major_step = nice_number(nice_range / major_intervals as f64, true);
    let minor_step = nice_number(major_step / minor_intervals as f64, true);

    let mut majors = sweep(min, max, major_step, tolerance);
    if !contains_close(&majors, min, tolerance) {
        majors.insert(0, min);
    }
    if !contains_close(&majors, max, tolerance) {
        majors.push(max);
    }

    // filtered after the bounds are in, a minor may sit on either bound
    let minors = sweep(min, max, minor_step, tolerance)
        .into_iter()
        .filter(|minor| !contains_close(&majors, *minor, tolerance))
        .collect();

    NiceTicks { majors, minors }
}

/// Multiples of `step` from the first one at or above `min` up to `max`.
fn sweep(min: f64, max: f64, step: f64, tolerance: f64) -> Vec<f64> {
    let mut ticks = Vec::new();
    let mut tick = (min / step).ceil() * step;
    while tick <= max + tolerance {
        ticks.push(round_to_precision(tick));
        let next = tick + step;
        if next == tick {
            // step is below the float resolution at this magnitude
            break;
        }
        tick = next;
    }
    ticks
}

/// Drops accumulated floating point drift past ten decimal places.
fn round_to_precision(value: f64) -> f64 {
    round_half_up(value * 1e10) / 1e10
}

fn contains_close(ticks: &[f64], value: f64, tolerance: f64) -> bool {
    ticks.iter().any(|tick| (tick - value).abs() < tolerance)
}

/// The closest tick below and above `value`.
///
/// Both are `None` when `value` is itself one of the ticks.
pub fn neighbor_ticks(ticks: &[f64], value: f64) -> (Option<f64>, Option<f64>) {
    if ticks.contains(&value) {
        return (None, None);
    }
    let lower = ticks
        .iter()
        .copied()
        .filter(|tick| *tick < value)
        .max_by(f64::total_cmp);
    let upper = ticks
        .iter()
        .copied()
        .filter(|tick| *tick > value)
        .min_by(f64::total_cmp);
    (lower, upper)
}
