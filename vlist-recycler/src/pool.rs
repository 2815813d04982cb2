use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::{Container, ItemRenderer, ListItem, SlotId};

/// Render pool counters, for diagnostics and tests.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolStats {
    /// Nodes currently bound to a position.
    pub bound: usize,
    /// Nodes parked in the pool, waiting for reuse.
    pub idle: usize,
    /// `render` calls so far.
    pub rendered: u64,
    /// `rebind` calls so far.
    pub rebound: u64,
    /// Acquisitions served from idle nodes instead of `render`.
    pub reused: u64,
}

impl PoolStats {
    /// Live nodes, bound or idle.
    pub fn nodes(&self) -> usize {
        self.bound + self.idle
    }
}

/// A node bound to a position, as seen from outside the pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding<K> {
    pub slot: SlotId,
    pub index: usize,
    pub key: K,
    pub offset: u64,
}

#[derive(Debug)]
struct Slot<N, T> {
    node: N,
    /// Position the node is bound to, `None` while idle.
    index: Option<usize>,
    /// Copy of the item last rendered into the node. `None` after a failed rebind.
    shown: Option<T>,
    offset: u64,
}

/// Live nodes, each bound to at most one position.
///
/// Idle nodes are kept in release order; the most recently released node is reused first.
#[derive(Debug)]
pub(crate) struct RenderPool<N, T> {
    slots: Vec<Option<Slot<N, T>>>,
    vacant: Vec<usize>,
    idle: Vec<SlotId>,
    bound: BTreeMap<usize, SlotId>,

    rendered: u64,
    rebound: u64,
    reused: u64,
}

impl<N, T: ListItem> RenderPool<N, T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
            idle: Vec::new(),
            bound: BTreeMap::new(),
            rendered: 0,
            rebound: 0,
            reused: 0,
        }
    }

    pub(crate) fn stats(&self) -> PoolStats {
        PoolStats {
            bound: self.bound.len(),
            idle: self.idle.len(),
            rendered: self.rendered,
            rebound: self.rebound,
            reused: self.reused,
        }
    }

    pub(crate) fn is_bound(&self, index: usize) -> bool {
        self.bound.contains_key(&index)
    }

    pub(crate) fn node_at(&self, index: usize) -> Option<&N> {
        let id = self.bound.get(&index)?;
        self.slot(*id).map(|slot| &slot.node)
    }

    /// Bound nodes in position order.
    pub(crate) fn bindings(&self) -> impl Iterator<Item = Binding<T::Key>> + '_ {
        self.bound.iter().filter_map(|(&index, &id)| {
            let slot = self.slot(id)?;
            Some(Binding {
                slot: id,
                index,
                key: slot.shown.as_ref()?.key(),
                offset: slot.offset,
            })
        })
    }

    /// Parks every bound node for which `keep(index, shown_item)` is false.
    ///
    /// Returns the number of released nodes.
    pub(crate) fn release_unless<C: Container<N>>(
        &mut self,
        container: &mut C,
        mut keep: impl FnMut(usize, &T) -> bool,
    ) -> usize {
        let stale: Vec<usize> = self
            .bound
            .iter()
            .filter(|&(&index, &id)| {
                !self
                    .slot(id)
                    .and_then(|slot| slot.shown.as_ref())
                    .is_some_and(|shown| keep(index, shown))
            })
            .map(|(&index, _)| index)
            .collect();

        for index in &stale {
            let Some(id) = self.bound.remove(index) else {
                continue;
            };
            if let Some(slot) = self.slot_mut(id) {
                debug_assert_eq!(slot.index, Some(*index), "pool binding out of sync");
                slot.index = None;
                container.park(id, &slot.node);
            }
            self.idle.push(id);
        }
        stale.len()
    }

    /// Binds a node showing `item` to `index` at `offset`.
    ///
    /// Preference order: an idle node that already shows an equal item (repositioned only),
    /// an idle node that showed an older version of the same key, the most recently released
    /// idle node (both rebound), a fresh node from `render`.
    ///
    /// On renderer failure nothing is bound; a node whose rebind failed returns to the idle
    /// list with unknown content.
    pub(crate) fn acquire<R, C>(
        &mut self,
        index: usize,
        offset: u64,
        item: &T,
        renderer: &mut R,
        container: &mut C,
    ) -> Result<SlotId, R::Error>
    where
        R: ItemRenderer<T, Node = N>,
        C: Container<N>,
    {
        if let Some(id) = self.take_idle(|shown| shown == item) {
            self.reused += 1;
            self.bind(id, index, offset, container);
            return Ok(id);
        }

        let key = item.key();
        let mut same_key = self.take_idle(|shown| shown.key() == key);
        while let Some(id) = same_key.take().or_else(|| self.idle.pop()) {
            let Some(slot) = self.slot_mut(id) else {
                vwarn!(slot = id.get(), "idle list referenced a vacant slot");
                continue;
            };
            slot.shown = None;
            if let Err(err) = renderer.rebind(&mut slot.node, item) {
                self.idle.push(id);
                return Err(err);
            }
            slot.shown = Some(item.clone());
            self.rebound += 1;
            self.reused += 1;
            self.bind(id, index, offset, container);
            return Ok(id);
        }

        let node = renderer.render(item)?;
        self.rendered += 1;
        let id = self.insert(Slot {
            node,
            index: None,
            shown: Some(item.clone()),
            offset,
        });
        if let Some(slot) = self.slot(id) {
            container.mount(id, &slot.node);
        }
        self.bind(id, index, offset, container);
        Ok(id)
    }

    /// Unmounts the oldest idle nodes until at most `capacity` nodes are live.
    ///
    /// Bound nodes are never removed. Returns the number of unmounted nodes.
    pub(crate) fn trim<C: Container<N>>(&mut self, capacity: usize, container: &mut C) -> usize {
        let live = self.bound.len() + self.idle.len();
        let excess = live.saturating_sub(capacity).min(self.idle.len());
        for id in self.idle.drain(..excess) {
            if let Some(slot) = self.slots.get_mut(id.0).and_then(Option::take) {
                self.vacant.push(id.0);
                container.unmount(id, slot.node);
            }
        }
        excess
    }

    /// Unmounts every node. Returns the number of unmounted nodes.
    pub(crate) fn drain<C: Container<N>>(&mut self, container: &mut C) -> usize {
        self.bound.clear();
        self.idle.clear();
        self.vacant.clear();
        let mut removed = 0;
        for (i, slot) in self.slots.drain(..).enumerate() {
            if let Some(slot) = slot {
                container.unmount(SlotId(i), slot.node);
                removed += 1;
            }
        }
        removed
    }

    fn bind<C: Container<N>>(&mut self, id: SlotId, index: usize, offset: u64, container: &mut C) {
        let Some(slot) = self.slot_mut(id) else {
            return;
        };
        slot.index = Some(index);
        slot.offset = offset;
        container.place(id, &slot.node, offset);
        self.bound.insert(index, id);
    }

    /// Removes and returns the most recently released idle node whose item matches.
    fn take_idle(&mut self, mut matches: impl FnMut(&T) -> bool) -> Option<SlotId> {
        let pos = self.idle.iter().rposition(|&id| {
            self.slot(id)
                .and_then(|slot| slot.shown.as_ref())
                .is_some_and(|shown| matches(shown))
        })?;
        Some(self.idle.remove(pos))
    }

    fn insert(&mut self, slot: Slot<N, T>) -> SlotId {
        if let Some(i) = self.vacant.pop() {
            self.slots[i] = Some(slot);
            return SlotId(i);
        }
        self.slots.push(Some(slot));
        SlotId(self.slots.len() - 1)
    }

    fn slot(&self, id: SlotId) -> Option<&Slot<N, T>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, id: SlotId) -> Option<&mut Slot<N, T>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }
}
