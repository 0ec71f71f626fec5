//! Recency list backed by `SlotArena`.
//!
//! Nodes live in a [`SlotArena`] and link to each other by [`SlotId`], so the
//! list never holds raw pointers and a node handle stays valid until the node
//! is removed. The LRU core keeps one node per cached key: the head is the
//! most recently used key and the tail is the eviction candidate.
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                 │
//!   ├────────┼────────────────────────────────────────────┤
//!   │ id_0   │ { value: C, prev: Some(id_2), next: None } │
//!   │ id_1   │ { value: A, prev: None, next: Some(id_2) } │
//!   │ id_2   │ { value: B, prev: Some(id_1), next: id_0 } │
//!   └────────┴────────────────────────────────────────────┘
//!
//!   head ─► [id_1] ◄──► [id_2] ◄──► [id_0] ◄── tail
//!            (MRU)                   (LRU)
//! ```
//!
//! | Operation       | Cost |
//! |-----------------|------|
//! | `push_front`    | O(1) |
//! | `move_to_front` | O(1) |
//! | `pop_back`      | O(1) |
//! | `remove`        | O(1) |
//! | `clear`         | O(n) |
//! | `iter`          | O(n) |
use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly linked list whose nodes are stored in a `SlotArena`.
#[derive(Debug)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with node storage reserved for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` refers to a live node.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Value at the head (most recent).
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Value at the tail (least recent).
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Iterates values from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    /// Iterates node handles from head to tail.
    pub fn iter_ids(&self) -> IdIter<'_, T> {
        IdIter {
            list: self,
            current: self.head,
        }
    }

    /// Links a new node at the head and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: None,
        });
        self.attach_front(id);
        id
    }

    /// Unlinks and returns the tail value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Unlinks node `id` and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Relinks `id` at the head. Returns `false` if `id` is not a live node.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.head != Some(id) {
            self.detach(id);
            self.attach_front(id);
        }
        true
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let node = self.arena.get_mut(id)?;
        let (prev, next) = (node.prev.take(), node.next.take());

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.arena.get_mut(prev_id) {
                    prev_node.next = next;
                }
            },
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.arena.get_mut(next_id) {
                    next_node.prev = prev;
                }
            },
            None => self.tail = prev,
        }

        Some(())
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head.and_then(|head| self.arena.get_mut(head)) {
            Some(head_node) => head_node.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    /// Walks the list and panics on broken links, cycles, or a length mismatch.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none() && self.tail.is_none());
            assert_eq!(self.len(), 0);
            return;
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self.arena.get(id).expect("linked node missing from arena");
            assert_eq!(node.prev, prev, "back link mismatch at {:?}", id);
            if node.next.is_none() {
                assert_eq!(self.tail, Some(id));
            }
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len(), "cycle in recency list");
        }
        assert_eq!(count, self.len());
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Head-to-tail value iterator.
pub struct Iter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.arena.get(self.current?)?;
        self.current = node.next;
        Some(&node.value)
    }
}

/// Head-to-tail handle iterator.
pub struct IdIter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<SlotId>,
}

impl<T> Iterator for IdIter<'_, T> {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.list.arena.get(id)?.next;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(list: &IntrusiveList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn push_front_orders_most_recent_first() {
        let mut list = IntrusiveList::new();
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);
        assert_eq!(values(&list), vec![3, 2, 1]);
        assert_eq!(list.front(), Some(&3));
        assert_eq!(list.back(), Some(&1));
        list.debug_validate_invariants();
    }

    #[test]
    fn move_to_front_from_tail_middle_and_head() {
        let mut list = IntrusiveList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");
        assert_eq!(values(&list), vec!["c", "b", "a"]);

        assert!(list.move_to_front(a));
        assert_eq!(values(&list), vec!["a", "c", "b"]);

        assert!(list.move_to_front(c));
        assert_eq!(values(&list), vec!["c", "a", "b"]);

        assert!(list.move_to_front(c));
        assert_eq!(values(&list), vec!["c", "a", "b"]);
        assert_eq!(list.back_id(), Some(b));
        list.debug_validate_invariants();
    }

    #[test]
    fn pop_back_drains_in_lru_order() {
        let mut list = IntrusiveList::new();
        for i in 0..4 {
            list.push_front(i);
        }
        assert_eq!(list.pop_back(), Some(0));
        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        list.debug_validate_invariants();
    }

    #[test]
    fn remove_middle_and_ends() {
        let mut list = IntrusiveList::new();
        let a = list.push_front('a');
        let b = list.push_front('b');
        let c = list.push_front('c');

        assert_eq!(list.remove(b), Some('b'));
        assert_eq!(values(&list), vec!['c', 'a']);

        assert_eq!(list.remove(c), Some('c'));
        assert_eq!(list.front(), Some(&'a'));
        assert_eq!(list.back(), Some(&'a'));

        assert_eq!(list.remove(a), Some('a'));
        assert_eq!(list.front_id(), None);
        assert_eq!(list.back_id(), None);
        list.debug_validate_invariants();
    }

    #[test]
    fn stale_handles_are_inert() {
        let mut list = IntrusiveList::new();
        let a = list.push_front(10);
        list.push_front(20);
        assert_eq!(list.remove(a), Some(10));

        assert!(!list.contains(a));
        assert!(!list.move_to_front(a));
        assert_eq!(list.remove(a), None);
        assert_eq!(values(&list), vec![20]);
    }

    #[test]
    fn clear_resets_head_and_tail() {
        let mut list = IntrusiveList::with_capacity(4);
        list.push_front(1);
        list.push_front(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.pop_back(), None);

        list.push_front(3);
        assert_eq!(values(&list), vec![3]);
        list.debug_validate_invariants();
    }

    #[test]
    fn iter_ids_matches_iter() {
        let mut list = IntrusiveList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        let ids: Vec<_> = list.iter_ids().collect();
        assert_eq!(ids, vec![b, a]);
        let by_id: Vec<_> = ids.iter().filter_map(|id| list.get(*id)).copied().collect();
        assert_eq!(by_id, values(&list));
    }
}
