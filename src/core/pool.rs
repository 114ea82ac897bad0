//! Arena of reusable row/cell nodes.
//!
//! Slots live in a `Vec` and are addressed by [`SlotId`]; a map from bound
//! dataset index to slot gives O(1) reuse of a node that is already showing
//! the right entry. Each render pass:
//!
//! 1. [`NodePool::begin_pass`] marks every slot inactive and collects the
//!    slots bound outside the new range as recyclable.
//! 2. [`NodePool::acquire`] hands out a slot per visible index, preferring
//!    the one already bound to it, then a recyclable one, then a new one.
//! 3. [`NodePool::release_inactive`] detaches whatever was not acquired.
//!
//! The number of slots therefore never exceeds the largest range rendered,
//! regardless of dataset size.

use std::collections::HashMap;
use std::ops::Range;

use crate::core::error::MountError;
use crate::core::surface::Surface;

/// Stable identifier of one pooled node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub usize);

struct Slot<N> {
    node: N,
    index: Option<usize>,
    active: bool,
    attached: bool,
}

/// Result of [`NodePool::acquire`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Acquired {
    pub slot: SlotId,
    /// The node was (re)bound to a new index and must be refilled.
    pub rebound: bool,
}

pub struct NodePool<N> {
    slots: Vec<Slot<N>>,
    by_index: HashMap<usize, SlotId>,
    free: Vec<SlotId>,
}

impl<N> Default for NodePool<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> NodePool<N> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            by_index: HashMap::new(),
            free: Vec::new(),
        }
    }

    /// Start a render pass over `range`.
    pub fn begin_pass(&mut self, range: Range<usize>) {
        self.free.clear();
        for (id, slot) in self.slots.iter_mut().enumerate().rev() {
            slot.active = false;
            let keep = slot.index.is_some_and(|i| range.contains(&i));
            if !keep {
                self.free.push(SlotId(id));
            }
        }
    }

    /// Get a node for `index`, marking it active for this pass.
    ///
    /// Fails only when a new node is needed and the surface cannot create it.
    pub fn acquire<S>(&mut self, index: usize, surface: &mut S) -> Result<Acquired, MountError>
    where
        S: Surface<Node = N>,
    {
        if let Some(&slot) = self.by_index.get(&index) {
            self.slots[slot.0].active = true;
            return Ok(Acquired {
                slot,
                rebound: false,
            });
        }

        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                let slot = SlotId(self.slots.len());
                let node = surface.create_node(slot)?;
                self.slots.push(Slot {
                    node,
                    index: None,
                    active: false,
                    attached: false,
                });
                slot
            }
        };

        let entry = &mut self.slots[slot.0];
        if let Some(previous) = entry.index.replace(index) {
            self.by_index.remove(&previous);
        }
        entry.active = true;
        self.by_index.insert(index, slot);

        Ok(Acquired {
            slot,
            rebound: true,
        })
    }

    pub fn attach<S>(&mut self, slot: SlotId, surface: &mut S)
    where
        S: Surface<Node = N>,
    {
        let entry = &mut self.slots[slot.0];
        if !entry.attached {
            surface.attach_node(&entry.node);
            entry.attached = true;
        }
    }

    /// Detach every node not acquired during this pass. Returns the slots
    /// that were detached.
    pub fn release_inactive<S>(&mut self, surface: &mut S) -> Vec<SlotId>
    where
        S: Surface<Node = N>,
    {
        let mut released = Vec::new();
        for (id, slot) in self.slots.iter_mut().enumerate() {
            if !slot.active && slot.attached {
                surface.detach_node(&slot.node);
                slot.attached = false;
                released.push(SlotId(id));
            }
        }
        released
    }

    /// Detach and drop every node.
    pub fn dispose<S>(&mut self, surface: &mut S)
    where
        S: Surface<Node = N>,
    {
        for (id, slot) in self.slots.drain(..).enumerate() {
            if slot.attached {
                surface.detach_node(&slot.node);
            }
            surface.destroy_node(SlotId(id), slot.node);
        }
        self.by_index.clear();
        self.free.clear();
    }

    pub fn node(&self, slot: SlotId) -> &N {
        &self.slots[slot.0].node
    }

    pub fn bound_index(&self, slot: SlotId) -> Option<usize> {
        self.slots.get(slot.0).and_then(|s| s.index)
    }

    pub fn slot_for(&self, index: usize) -> Option<SlotId> {
        self.by_index.get(&index).copied()
    }

    /// Total nodes ever created and still pooled.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn attached_count(&self) -> usize {
        self.slots.iter().filter(|s| s.attached).count()
    }
}
