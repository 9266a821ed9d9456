use super::types::SlotRef;
use crate::items::ItemStack;
use std::collections::BTreeSet;

/// Host inventory, seen from the engine.
pub trait Inventory {
    fn slot_count(&self) -> usize;
    fn item_stack(&self, slot: SlotRef) -> Option<&ItemStack>;
    fn item_stack_mut(&mut self, slot: SlotRef) -> Option<&mut ItemStack>;
    /// Remove `count` units; an emptied slot becomes vacant.
    fn decrement_stack(&mut self, slot: SlotRef, count: u32);
    /// Flag the slot for sync to other observers.
    fn mark_dirty(&mut self, slot: SlotRef);
}

/// Fixed-size row of slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hotbar {
    slots: Vec<Option<ItemStack>>,
    dirty: BTreeSet<SlotRef>,
}

impl Hotbar {
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size],
            dirty: BTreeSet::new(),
        }
    }

    /// Put `stack` into `slot`, returning whatever was there.
    pub fn put(&mut self, slot: SlotRef, stack: ItemStack) -> Option<ItemStack> {
        self.slots.get_mut(slot).and_then(|s| s.replace(stack))
    }

    pub fn take(&mut self, slot: SlotRef) -> Option<ItemStack> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    pub fn dirty_slots(&self) -> Vec<SlotRef> {
        self.dirty.iter().copied().collect()
    }

    pub fn clear_dirty(&mut self) {
        self.dirty.clear();
    }
}

impl Inventory for Hotbar {
    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn item_stack(&self, slot: SlotRef) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn item_stack_mut(&mut self, slot: SlotRef) -> Option<&mut ItemStack> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    fn decrement_stack(&mut self, slot: SlotRef, count: u32) {
        let Some(entry) = self.slots.get_mut(slot) else {
            return;
        };
        let emptied = match entry {
            Some(stack) => {
                stack.quantity = stack.quantity.saturating_sub(count);
                stack.quantity == 0
            }
            None => false,
        };
        if emptied {
            *entry = None;
        }
    }

    fn mark_dirty(&mut self, slot: SlotRef) {
        if slot < self.slots.len() {
            self.dirty.insert(slot);
        }
    }
}
