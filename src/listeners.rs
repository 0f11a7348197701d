use fnv::FnvHashMap;
use lumitone_core::SubscriptionHandle;

/// Owned DOM listeners keyed by handle. Whatever is still registered at
/// teardown comes back out of [`ListenerRegistry::drain`] so it can be
/// detached before the closures drop.
pub struct ListenerRegistry<L> {
    next_id: u64,
    entries: FnvHashMap<SubscriptionHandle, L>,
}

impl<L> Default for ListenerRegistry<L> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: FnvHashMap::default(),
        }
    }
}

impl<L> ListenerRegistry<L> {
    pub fn insert(&mut self, listener: L) -> SubscriptionHandle {
        self.next_id += 1;
        let handle = SubscriptionHandle::from_raw(self.next_id);
        self.entries.insert(handle, listener);
        handle
    }

    pub fn remove(&mut self, handle: SubscriptionHandle) -> Option<L> {
        self.entries.remove(&handle)
    }

    /// Removes every entry, oldest first.
    pub fn drain(&mut self) -> Vec<(SubscriptionHandle, L)> {
        let mut all: Vec<_> = self.entries.drain().collect();
        all.sort_by_key(|(h, _)| *h);
        all
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
