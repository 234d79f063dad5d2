use dimchart_common::{Observable, Partition};

/// The partition currently under the pointer.
#[derive(Clone, Default)]
pub struct HotspotController {
    hotspot: Observable<Option<Partition>>,
}

impl HotspotController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hotspot(&self) -> Option<Partition> {
        self.hotspot.get()
    }

    /// Replaces the hotspot. Listeners fire on every call, also when the
    /// partition is unchanged.
    pub fn set_hotspot(&self, partition: Option<Partition>) {
        self.hotspot.set(partition)
    }

    pub fn on_hotspot_changed(&self, listener: impl Fn(Option<&Partition>) + 'static) {
        self.hotspot.on_change(move |hotspot| listener(hotspot.as_ref()))
    }
}
