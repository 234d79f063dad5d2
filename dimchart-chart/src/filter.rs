use std::collections::HashSet;
use std::iter;
use std::rc::{Rc, Weak};

use dimchart_common::observable::WeakObservable;
use dimchart_common::Observable;

use crate::error::DimChartError;
use crate::partition::GroupBy;

/// Selected keys of every chart, in chart order.
pub type SelectionContext = Vec<Vec<String>>;

/// A record predicate.
pub struct Filter<T> {
    predicate: Rc<dyn Fn(&T) -> bool>,
}

impl<T: 'static> Filter<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + 'static) -> Self {
        Self {
            predicate: Rc::new(predicate),
        }
    }

    /// A filter that keeps every record.
    pub fn pass_through() -> Self {
        Self::new(|_| true)
    }

    /// Keeps records whose key is one of `keys`.
    pub fn with_keys(key_extractor: GroupBy<T>, keys: &[String]) -> Self {
        let keys: HashSet<String> = keys.iter().cloned().collect();
        Self::new(move |record| keys.contains(&key_extractor(record)))
    }

    pub fn matches(&self, record: &T) -> bool {
        (self.predicate)(record)
    }
}

impl<T> Clone for Filter<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
        }
    }
}

/// A chain of one filter per chart. The filter of chart `i` keeps the
/// records selected in chart `i - 1`; the first chart is never filtered.
pub struct FilterController<T> {
    key_extractors: Rc<Vec<GroupBy<T>>>,
    filters: Observable<Vec<Filter<T>>>,
}

impl<T: 'static> FilterController<T> {
    pub fn new(key_extractors: Vec<GroupBy<T>>) -> Self {
        let filters = key_extractors.iter().map(|_| Filter::pass_through()).collect();
        Self {
            key_extractors: Rc::new(key_extractors),
            filters: Observable::new(filters),
        }
    }

    /// Number of charts the chain was built for.
    pub fn len(&self) -> usize {
        self.key_extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_extractors.is_empty()
    }

    pub fn filters(&self) -> Vec<Filter<T>> {
        self.filters.get()
    }

    pub fn on_filters_changed(&self, listener: impl Fn(&[Filter<T>]) + 'static) {
        self.filters.on_change(move |filters| listener(filters))
    }

    /// Rebuilds the chain from the selection of every chart and publishes it.
    pub fn update_filters(&self, selection_context: &[Vec<String>]) {
        let downstream = selection_context
            .iter()
            .zip(self.key_extractors.iter())
            .map(|(keys, key_extractor)| {
                if keys.is_empty() {
                    Filter::pass_through()
                } else {
                    Filter::with_keys(key_extractor.clone(), keys)
                }
            });
        let filters = iter::once(Filter::pass_through())
            .chain(downstream)
            .take(selection_context.len())
            .collect();
        self.filters.set(filters);
    }

    /// Applies the filters of charts `0..=index` to `records` in order.
    pub fn filter(&self, records: &[T], index: usize) -> Result<Vec<T>, DimChartError>
    where
        T: Clone,
    {
        if index >= self.len() {
            return Err(DimChartError::FilterIndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        Ok(self.filters.with(|filters| {
            let chain = &filters[..filters.len().min(index + 1)];
            records
                .iter()
                .filter(|record| chain.iter().all(|filter| filter.matches(record)))
                .cloned()
                .collect()
        }))
    }

    pub fn downgrade(&self) -> WeakFilterController<T> {
        WeakFilterController {
            key_extractors: Rc::downgrade(&self.key_extractors),
            filters: self.filters.downgrade(),
        }
    }
}

impl<T> Clone for FilterController<T> {
    fn clone(&self) -> Self {
        Self {
            key_extractors: self.key_extractors.clone(),
            filters: self.filters.clone(),
        }
    }
}

pub struct WeakFilterController<T> {
    key_extractors: Weak<Vec<GroupBy<T>>>,
    filters: WeakObservable<Vec<Filter<T>>>,
}

impl<T> WeakFilterController<T> {
    pub fn upgrade(&self) -> Option<FilterController<T>> {
        Some(FilterController {
            key_extractors: self.key_extractors.upgrade()?,
            filters: self.filters.upgrade()?,
        })
    }
}
