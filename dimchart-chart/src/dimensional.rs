use std::cell::Cell;
use std::rc::Rc;

use dimchart_common::{ListenerId, Observable};

use crate::chart::ChartController;
use crate::error::DimChartError;
use crate::filter::{FilterController, SelectionContext};
use crate::selection::{SelectionController, WeakSelectionController};

/// A chart together with the selection the user makes on it.
pub struct ChartComponents<T> {
    pub chart: ChartController<T>,
    pub selection: SelectionController,
}

impl<T> ChartComponents<T> {
    pub fn new(chart: ChartController<T>, selection: SelectionController) -> Self {
        Self { chart, selection }
    }
}

/// Keys of the currently selected partitions.
pub fn selected_keys(selection: &SelectionController) -> Vec<String> {
    selection.selected_keys()
}

/// Selection context as seen from a change in chart `current_index`: the
/// live selections up to and including that chart, empty ones after it.
pub fn evaluate_selections(
    selections: &[SelectionController],
    current_index: usize,
) -> SelectionContext {
    selections
        .iter()
        .enumerate()
        .map(|(i, selection)| {
            if i > current_index {
                Vec::new()
            } else {
                selected_keys(selection)
            }
        })
        .collect()
}

/// Clears the selections from `start_index` on. Earlier ones are kept.
pub fn clear_selections(selections: &[SelectionController], start_index: usize) {
    for selection in selections.iter().skip(start_index) {
        selection.clear_selection();
    }
}

fn upgrade_all(selections: &[WeakSelectionController]) -> Option<Vec<SelectionController>> {
    selections.iter().map(WeakSelectionController::upgrade).collect()
}

/// Links an ordered list of charts so that a selection in one chart filters
/// the records shown by every chart after it.
///
/// A selection change in chart `i` publishes a new [`SelectionContext`],
/// clears the selections of the charts after `i` and feeds every later chart
/// `j` the records that pass the filters of charts `0..=j`. Chart `i` and the
/// charts before it keep their data.
///
/// The wiring stays active for as long as the controller is alive. Dropping
/// it removes its listeners from the selections, which can then be wired
/// into a new controller.
pub struct DimensionalController<T> {
    records: Rc<Vec<T>>,
    charts: Vec<ChartController<T>>,
    selections: Vec<SelectionController>,
    selection_listeners: Vec<ListenerId>,
    selection_context: Observable<SelectionContext>,
    filters: FilterController<T>,
    last_selected_chart_index: Rc<Cell<Option<usize>>>,
}

impl<T: Clone + 'static> DimensionalController<T> {
    pub fn new(records: Vec<T>, components: Vec<ChartComponents<T>>) -> Self {
        let (charts, selections): (Vec<_>, Vec<_>) = components
            .into_iter()
            .map(|c| (c.chart, c.selection))
            .unzip();

        let records = Rc::new(records);
        let selection_context: Observable<SelectionContext> =
            Observable::new(selections.iter().map(selected_keys).collect());
        let filters =
            FilterController::new(charts.iter().map(ChartController::group_by).collect());
        let last_selected_chart_index: Rc<Cell<Option<usize>>> = Rc::new(Cell::new(None));

        let weak_selections = selections
            .iter()
            .map(SelectionController::downgrade)
            .collect::<Vec<_>>();
        let mut selection_listeners = Vec::with_capacity(selections.len());
        for (index, selection) in selections.iter().enumerate() {
            let weak_selections = weak_selections.clone();
            let context = selection_context.downgrade();
            let last_selected = last_selected_chart_index.clone();
            let id = selection.subscribe(move |_| {
                let (Some(context), Some(selections)) =
                    (context.upgrade(), upgrade_all(&weak_selections))
                else {
                    return;
                };
                let evaluated = evaluate_selections(&selections, index);
                // publish only when the context actually changes
                if context.with(|current| *current == evaluated) {
                    tracing::trace!(chart_index = index, "selection context unchanged");
                    return;
                }
                last_selected.set(Some(index));
                tracing::debug!(
                    chart_index = index,
                    context = ?evaluated,
                    "publishing selection context"
                );
                context.set(evaluated);
                clear_selections(&selections, index + 1);
            });
            selection_listeners.push(id);
        }

        let chain = filters.clone();
        selection_context.on_change(move |context| chain.update_filters(context));

        for (index, chart) in charts.iter().enumerate() {
            let chart = chart.clone();
            let chain = filters.downgrade();
            let records = records.clone();
            let last_selected = last_selected_chart_index.clone();
            filters.on_filters_changed(move |_| {
                if last_selected.get().is_some_and(|last| index <= last) {
                    return;
                }
                let Some(chain) = chain.upgrade() else {
                    return;
                };
                match chain.filter(&records, index) {
                    Ok(filtered) => {
                        tracing::debug!(
                            chart_index = index,
                            records = filtered.len(),
                            "updating downstream chart"
                        );
                        chart.update_data(&filtered);
                    }
                    Err(err) => tracing::warn!(chart_index = index, "{err}"),
                }
            });
        }

        Self {
            records,
            charts,
            selections,
            selection_listeners,
            selection_context,
            filters,
            last_selected_chart_index,
        }
    }

    /// Feeds every chart the records that pass its current filter chain.
    pub fn refresh(&self) -> Result<(), DimChartError> {
        for (index, chart) in self.charts.iter().enumerate() {
            chart.update_data(&self.filters.filter(&self.records, index)?);
        }
        Ok(())
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn charts(&self) -> &[ChartController<T>] {
        &self.charts
    }

    pub fn selections(&self) -> &[SelectionController] {
        &self.selections
    }

    pub fn filter_controller(&self) -> &FilterController<T> {
        &self.filters
    }

    pub fn selection_context(&self) -> SelectionContext {
        self.selection_context.get()
    }

    pub fn on_selection_context_changed(&self, listener: impl Fn(&[Vec<String>]) + 'static) {
        self.selection_context.on_change(move |context| listener(context))
    }

    /// Index of the chart whose selection change last published a context.
    pub fn last_selected_chart_index(&self) -> Option<usize> {
        self.last_selected_chart_index.get()
    }
}

impl<T> Drop for DimensionalController<T> {
    fn drop(&mut self) {
        for (selection, id) in self.selections.iter().zip(&self.selection_listeners) {
            selection.unsubscribe(*id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimchart_common::Partition;

    fn selections(n: usize) -> Vec<SelectionController> {
        (0..n).map(|_| SelectionController::new()).collect()
    }

    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_evaluate_selections() {
        let s = selections(3);
        let p1 = Partition::new("key1", 1);
        let p2 = Partition::new("key2", 2);
        let p3 = Partition::new("key3", 3);
        let p4 = Partition::new("key4", 4);

        assert_eq!(evaluate_selections(&s, 0), vec![keys(&[]), keys(&[]), keys(&[])]);

        s[0].select(&p1);
        for index in 0..3 {
            assert_eq!(
                evaluate_selections(&s, index),
                vec![keys(&["key1"]), keys(&[]), keys(&[])]
            );
        }

        s[1].select(&p2);
        s[1].select(&p3);
        s[2].select(&p4);
        assert_eq!(
            evaluate_selections(&s, 0),
            vec![keys(&["key1"]), keys(&[]), keys(&[])]
        );
        assert_eq!(
            evaluate_selections(&s, 1),
            vec![keys(&["key1"]), keys(&["key2", "key3"]), keys(&[])]
        );
        assert_eq!(
            evaluate_selections(&s, 2),
            vec![keys(&["key1"]), keys(&["key2", "key3"]), keys(&["key4"])]
        );

        s[0].clear_selection();
        assert_eq!(
            evaluate_selections(&s, 2),
            vec![keys(&[]), keys(&["key2", "key3"]), keys(&["key4"])]
        );
    }

    #[test]
    fn test_clear_selections() {
        let s = selections(3);
        clear_selections(&s, 0);
        assert!(s.iter().all(|s| s.selection().is_empty()));

        for (i, selection) in s.iter().enumerate() {
            selection.select(&Partition::new(format!("key{i}"), i as f64));
        }
        clear_selections(&s, 1);
        assert_eq!(s[0].selected_keys(), vec!["key0"]);
        assert!(s[1].selection().is_empty());
        assert!(s[2].selection().is_empty());

        clear_selections(&s, 0);
        assert!(s[0].selection().is_empty());

        // a start past the end clears nothing
        s[2].select(&Partition::new("key2", 2));
        clear_selections(&s, 5);
        assert_eq!(s[2].selected_keys(), vec!["key2"]);
    }

    #[test]
    fn test_selected_keys() {
        let s = SelectionController::new();
        assert!(selected_keys(&s).is_empty());

        s.select(&Partition::new("key1", 1));
        s.select(&Partition::new("key2", 2));
        assert_eq!(selected_keys(&s), vec!["key1", "key2"]);
    }
}
