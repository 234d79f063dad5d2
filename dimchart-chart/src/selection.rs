use dimchart_common::observable::WeakObservable;
use dimchart_common::{ListenerId, Observable, Partition};

/// Ordered set of selected partitions, unique by key.
#[derive(Clone, Default)]
pub struct SelectionController {
    selection: Observable<Vec<Partition>>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `partition` unless a partition with the same key is selected.
    pub fn select(&self, partition: &Partition) {
        if self.is_selected(partition) {
            return;
        }
        let mut selection = self.selection.get();
        selection.push(partition.clone());
        self.selection.set(selection);
    }

    /// Removes the selected partition with the same key as `partition`.
    ///
    /// An absent key leaves the selection as is and publishes nothing, the
    /// same as selecting a key twice.
    pub fn unselect(&self, partition: &Partition) {
        let mut selection = self.selection.get();
        let Some(index) = selection.iter().position(|p| p.key() == partition.key()) else {
            return;
        };
        selection.remove(index);
        self.selection.set(selection);
    }

    pub fn toggle(&self, partition: &Partition) {
        if self.is_selected(partition) {
            self.unselect(partition)
        } else {
            self.select(partition)
        }
    }

    pub fn is_selected(&self, partition: &Partition) -> bool {
        self.selection
            .with(|selection| selection.iter().any(|p| p.key() == partition.key()))
    }

    /// Empties the selection. Listeners are notified even when it was empty.
    pub fn clear_selection(&self) {
        self.selection.set(Vec::new())
    }

    pub fn selection(&self) -> Vec<Partition> {
        self.selection.get()
    }

    pub fn selected_keys(&self) -> Vec<String> {
        self.selection
            .with(|selection| selection.iter().map(|p| p.key().to_string()).collect())
    }

    pub fn on_selection_changed(&self, listener: impl Fn(&[Partition]) + 'static) {
        self.selection.on_change(move |selection| listener(selection))
    }

    /// Like [`on_selection_changed`](Self::on_selection_changed), returning
    /// an id for [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe(&self, listener: impl Fn(&[Partition]) + 'static) -> ListenerId {
        self.selection.subscribe(move |selection| listener(selection))
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.selection.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.selection.listener_count()
    }

    pub fn downgrade(&self) -> WeakSelectionController {
        WeakSelectionController {
            selection: self.selection.downgrade(),
        }
    }
}

#[derive(Clone)]
pub struct WeakSelectionController {
    selection: WeakObservable<Vec<Partition>>,
}

impl WeakSelectionController {
    pub fn upgrade(&self) -> Option<SelectionController> {
        self.selection
            .upgrade()
            .map(|selection| SelectionController { selection })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorded(selection: &SelectionController) -> Rc<RefCell<Vec<Vec<String>>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let captured = seen.clone();
        selection.on_selection_changed(move |partitions| {
            captured
                .borrow_mut()
                .push(partitions.iter().map(|p| p.key().to_string()).collect());
        });
        seen
    }

    #[test]
    fn test_select_is_idempotent() {
        let selection = SelectionController::new();
        let seen = recorded(&selection);
        let p = Partition::new("Milky Way", 2);

        selection.select(&p);
        selection.select(&p);
        selection.select(&Partition::new("Milky Way", 99));

        assert_eq!(selection.selection(), vec![p]);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_select_then_unselect_is_empty() {
        let selection = SelectionController::new();
        let seen = recorded(&selection);
        let p = Partition::new("Outer Rim", 1);

        selection.select(&p);
        selection.unselect(&Partition::new("Outer Rim", 7));
        assert!(selection.selection().is_empty());

        // nothing left to remove, nothing published
        selection.unselect(&p);
        assert_eq!(*seen.borrow(), vec![vec!["Outer Rim".to_string()], vec![]]);
    }

    #[test]
    fn test_order_toggle_and_keys() {
        let selection = SelectionController::new();
        let a = Partition::new("a", 1);
        let b = Partition::new("b", 2);
        let c = Partition::new("c", 3);

        selection.select(&b);
        selection.toggle(&a);
        selection.toggle(&c);
        selection.toggle(&b);

        assert_eq!(selection.selected_keys(), vec!["a", "c"]);
        assert!(selection.is_selected(&Partition::new("c", 0)));
        assert!(!selection.is_selected(&b));
    }

    #[test]
    fn test_clear_always_publishes() {
        let selection = SelectionController::new();
        let seen = recorded(&selection);

        selection.clear_selection();
        selection.select(&Partition::new("a", 1));
        selection.clear_selection();

        assert_eq!(seen.borrow().len(), 3);
        assert!(selection.selection().is_empty());
    }

    #[test]
    fn test_unsubscribe() {
        let selection = SelectionController::new();
        let seen = recorded(&selection);
        let calls = Rc::new(RefCell::new(0));
        let captured = calls.clone();
        let id = selection.subscribe(move |_| *captured.borrow_mut() += 1);
        assert_eq!(selection.listener_count(), 2);

        selection.select(&Partition::new("a", 1));
        assert!(selection.unsubscribe(id));
        selection.clear_selection();

        assert_eq!(*calls.borrow(), 1);
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(selection.listener_count(), 1);
    }

    #[test]
    fn test_weak_handle() {
        let selection = SelectionController::new();
        let weak = selection.downgrade();
        weak.upgrade().unwrap().select(&Partition::new("a", 1));
        assert_eq!(selection.selected_keys(), vec!["a"]);

        drop(selection);
        assert!(weak.upgrade().is_none());
    }
}
