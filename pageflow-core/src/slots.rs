//! Which page each recyclable slot currently displays.
//!
//! Every bind gets a fresh generation so work started for an earlier binding
//! of the same slot can be recognised and dropped.

use pageflow_model::{PageId, SlotId};
use std::collections::HashMap;

use crate::covers::DecodeTicket;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotBinding {
    pub page: PageId,
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct SlotTable {
    bindings: HashMap<SlotId, SlotBinding>,
    next_generation: u64,
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `slot` to `page`. Rebinding a slot to the page it already shows
    /// keeps the existing generation. Returns the ticket for work started on
    /// behalf of this binding and the page the slot showed before, if it was
    /// a different one.
    pub fn bind(&mut self, slot: SlotId, page: PageId) -> (DecodeTicket, Option<PageId>) {
        if let Some(existing) = self.bindings.get(&slot)
            && existing.page == page
        {
            return (DecodeTicket::new(slot, *existing), None);
        }

        self.next_generation += 1;
        let binding = SlotBinding {
            page,
            generation: self.next_generation,
        };
        let previous = self.bindings.insert(slot, binding).map(|b| b.page);
        (DecodeTicket::new(slot, binding), previous)
    }

    pub fn unbind(&mut self, slot: SlotId) -> Option<SlotBinding> {
        self.bindings.remove(&slot)
    }

    pub fn binding(&self, slot: SlotId) -> Option<SlotBinding> {
        self.bindings.get(&slot).copied()
    }

    pub fn page_for(&self, slot: SlotId) -> Option<PageId> {
        self.bindings.get(&slot).map(|b| b.page)
    }

    /// Any slot still showing `page`.
    pub fn slot_showing(&self, page: PageId) -> Option<SlotId> {
        self.bindings
            .iter()
            .find(|(_, b)| b.page == page)
            .map(|(slot, _)| *slot)
    }

    pub fn is_current(&self, ticket: &DecodeTicket) -> bool {
        self.bindings.get(&ticket.slot).is_some_and(|b| {
            b.page == ticket.page && b.generation == ticket.generation
        })
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebinding_invalidates_old_tickets() {
        let mut slots = SlotTable::new();
        let (a, b) = (PageId::new(), PageId::new());

        let (first, previous) = slots.bind(SlotId(0), a);
        assert_eq!(previous, None);
        assert!(slots.is_current(&first));

        let (second, previous) = slots.bind(SlotId(0), b);
        assert_eq!(previous, Some(a));
        assert!(!slots.is_current(&first));
        assert!(slots.is_current(&second));
    }

    #[test]
    fn same_page_keeps_generation() {
        let mut slots = SlotTable::new();
        let page = PageId::new();

        let (first, _) = slots.bind(SlotId(3), page);
        let (again, previous) = slots.bind(SlotId(3), page);

        assert_eq!(first, again);
        assert_eq!(previous, None);
    }

    #[test]
    fn unbound_slot_makes_ticket_stale() {
        let mut slots = SlotTable::new();
        let page = PageId::new();

        let (ticket, _) = slots.bind(SlotId(1), page);
        slots.unbind(SlotId(1));
        assert!(!slots.is_current(&ticket));

        // Rebinding the same page after an unbind is a new generation.
        let (fresh, _) = slots.bind(SlotId(1), page);
        assert_ne!(fresh.generation, ticket.generation);
        assert!(!slots.is_current(&ticket));
    }

    #[test]
    fn finds_other_slot_showing_page() {
        let mut slots = SlotTable::new();
        let page = PageId::new();
        slots.bind(SlotId(0), page);
        slots.bind(SlotId(1), page);

        slots.unbind(SlotId(0));
        assert_eq!(slots.slot_showing(page), Some(SlotId(1)));
        assert_eq!(slots.page_for(SlotId(0)), None);
    }
}
