//! Capped newest-first scenario queues backing the mail and messages apps.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxItem<T> {
    pub id: u64,
    pub scenario: T,
    pub read: bool,
}

/// Newest-first queue holding at most `capacity` items. Feeds check [`Inbox::accepts_more`]
/// before requesting another scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inbox<T> {
    items: VecDeque<InboxItem<T>>,
    capacity: usize,
    next_id: u64,
}

impl<T> Inbox<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            capacity,
            next_id: 1,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn accepts_more(&self) -> bool {
        self.items.len() < self.capacity
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|item| !item.read).count()
    }

    /// Adds `scenario` at the front. Returns the new item id, or `None` when the inbox is full.
    pub fn push(&mut self, scenario: T) -> Option<u64> {
        if !self.accepts_more() {
            return None;
        }
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.items.push_front(InboxItem {
            id,
            scenario,
            read: false,
        });
        Some(id)
    }

    pub fn get(&self, id: u64) -> Option<&InboxItem<T>> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Marks an item read; unknown ids are ignored.
    pub fn mark_read(&mut self, id: u64) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.read = true;
        }
    }

    pub fn remove(&mut self, id: u64) -> Option<InboxItem<T>> {
        let index = self.items.iter().position(|item| item.id == id)?;
        self.items.remove(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InboxItem<T>> {
        self.items.iter()
    }
}
