//! An array-backed binary max-heap whose items know their own position.
//!
//! Items live in an arena owned by the caller (for the pathfinder, the cells of a
//! [Grid](crate::grid::Grid)) and are referred to by their index into it. The heap stores these
//! ids in its slot table and keeps the slot index recorded on each item in sync on every move,
//! which makes [contains](IndexedBinaryHeap::contains) a constant time check and allows an
//! item to be re-sifted after its priority has improved.
use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;

/// An element that can be stored in an [IndexedBinaryHeap].
pub trait HeapItem {
    /// The slot this item was last placed in. Only meaningful while it is queued.
    fn heap_index(&self) -> usize;
    fn set_heap_index(&mut self, index: usize);
    /// Orders items by priority: [Ordering::Greater] means `self` leaves the heap before `other`.
    fn priority_cmp(&self, other: &Self) -> Ordering;
}

pub struct IndexedBinaryHeap<T> {
    slots: Vec<usize>,
    capacity: usize,
    _items: PhantomData<fn(&T)>,
}

impl<T> Clone for IndexedBinaryHeap<T> {
    fn clone(&self) -> Self {
        IndexedBinaryHeap {
            slots: self.slots.clone(),
            capacity: self.capacity,
            _items: PhantomData,
        }
    }
}

impl<T> fmt::Debug for IndexedBinaryHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("IndexedBinaryHeap")
            .field("slots", &self.slots)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<T: HeapItem> IndexedBinaryHeap<T> {
    /// Creates an empty heap that can hold at most `capacity` items at once.
    pub fn new(capacity: usize) -> IndexedBinaryHeap<T> {
        IndexedBinaryHeap {
            slots: Vec::with_capacity(capacity),
            capacity,
            _items: PhantomData,
        }
    }
    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.capacity
    }
    /// Forgets all queued items. Slot indices stored on the items are left as they are, they
    /// can no longer match the (empty) slot table.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
    /// The id of the highest priority item, if any.
    pub fn peek(&self) -> Option<usize> {
        self.slots.first().copied()
    }

    /// Inserts the item with the given id and sifts it up to its place.
    ///
    /// # Panics
    /// Panics if the heap is already at capacity.
    pub fn push(&mut self, items: &mut [T], id: usize) {
        assert!(
            self.slots.len() < self.capacity,
            "indexed heap capacity of {} exceeded",
            self.capacity
        );
        let slot = self.slots.len();
        items[id].set_heap_index(slot);
        self.slots.push(id);
        self.sift_up(items, slot);
    }

    /// Removes the highest priority item and returns its id.
    pub fn pop(&mut self, items: &mut [T]) -> Option<usize> {
        if self.slots.is_empty() {
            return None;
        }
        let first = self.slots.swap_remove(0);
        if !self.slots.is_empty() {
            items[self.slots[0]].set_heap_index(0);
            self.sift_down(items, 0);
        }
        Some(first)
    }

    /// Checks whether the item with the given id is currently queued.
    pub fn contains(&self, items: &[T], id: usize) -> bool {
        let slot = items[id].heap_index();
        slot < self.slots.len() && self.slots[slot] == id
    }

    /// Restores the heap order after the priority of a queued item has increased.
    pub fn update(&mut self, items: &mut [T], id: usize) {
        debug_assert!(self.contains(items, id), "updated item {id} is not queued");
        let slot = items[id].heap_index();
        self.sift_up(items, slot);
    }

    /// Iterates over the queued ids in slot order (not priority order).
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().copied()
    }

    fn outranks(&self, items: &[T], a: usize, b: usize) -> bool {
        items[self.slots[a]].priority_cmp(&items[self.slots[b]]) == Ordering::Greater
    }

    fn swap(&mut self, items: &mut [T], a: usize, b: usize) {
        self.slots.swap(a, b);
        items[self.slots[a]].set_heap_index(a);
        items[self.slots[b]].set_heap_index(b);
    }

    fn sift_up(&mut self, items: &mut [T], mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.outranks(items, slot, parent) {
                break;
            }
            self.swap(items, slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, items: &mut [T], mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            if left >= self.slots.len() {
                return;
            }
            let right = left + 1;
            let child = if right < self.slots.len() && self.outranks(items, right, left) {
                right
            } else {
                left
            };
            if !self.outranks(items, child, slot) {
                return;
            }
            self.swap(items, slot, child);
            slot = child;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Item {
        key: i32,
        slot: usize,
    }

    impl HeapItem for Item {
        fn heap_index(&self) -> usize {
            self.slot
        }
        fn set_heap_index(&mut self, index: usize) {
            self.slot = index;
        }
        // Smaller keys come out first.
        fn priority_cmp(&self, other: &Self) -> Ordering {
            other.key.cmp(&self.key)
        }
    }

    fn items(keys: &[i32]) -> Vec<Item> {
        keys.iter().map(|&key| Item { key, slot: 0 }).collect()
    }

    fn assert_slots_in_sync(heap: &IndexedBinaryHeap<Item>, items: &[Item]) {
        for (slot, id) in heap.iter().enumerate() {
            assert_eq!(items[id].slot, slot);
        }
    }

    #[test]
    fn pops_in_priority_order() {
        let keys = [7, 3, 9, 1, 4, 4, 8, 0, 6];
        let mut items = items(&keys);
        let mut heap = IndexedBinaryHeap::<Item>::new(items.len());
        for id in 0..items.len() {
            heap.push(&mut items, id);
            assert_slots_in_sync(&heap, &items);
        }
        let mut popped = Vec::new();
        while let Some(id) = heap.pop(&mut items) {
            assert_slots_in_sync(&heap, &items);
            popped.push(items[id].key);
        }
        let mut sorted = keys.to_vec();
        sorted.sort();
        assert_eq!(popped, sorted);
    }

    #[test]
    fn contains_tracks_membership() {
        let mut items = items(&[5, 2, 8]);
        let mut heap = IndexedBinaryHeap::<Item>::new(3);
        heap.push(&mut items, 0);
        heap.push(&mut items, 2);
        assert!(heap.contains(&items, 0));
        assert!(!heap.contains(&items, 1));
        assert!(heap.contains(&items, 2));
        assert_eq!(heap.pop(&mut items), Some(0));
        assert!(!heap.contains(&items, 0));
        assert!(heap.contains(&items, 2));
    }

    /// Stale slot indices left on items from before a clear must not count as membership.
    #[test]
    fn clear_invalidates_stale_slots() {
        let mut items = items(&[1, 2]);
        let mut heap = IndexedBinaryHeap::<Item>::new(2);
        heap.push(&mut items, 0);
        heap.push(&mut items, 1);
        heap.clear();
        assert!(heap.is_empty());
        assert!(!heap.contains(&items, 0));
        assert!(!heap.contains(&items, 1));
        heap.push(&mut items, 1);
        assert!(!heap.contains(&items, 0));
        assert!(heap.contains(&items, 1));
    }

    #[test]
    fn update_moves_improved_item_to_front() {
        let mut items = items(&[3, 5, 7, 9]);
        let mut heap = IndexedBinaryHeap::<Item>::new(4);
        for id in 0..4 {
            heap.push(&mut items, id);
        }
        assert_eq!(heap.peek(), Some(0));
        items[3].key = 1;
        heap.update(&mut items, 3);
        assert_slots_in_sync(&heap, &items);
        assert_eq!(heap.pop(&mut items), Some(3));
        assert_eq!(heap.pop(&mut items), Some(0));
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn push_beyond_capacity_panics() {
        let mut items = items(&[1, 2]);
        let mut heap = IndexedBinaryHeap::<Item>::new(1);
        heap.push(&mut items, 0);
        heap.push(&mut items, 1);
    }

    #[test]
    fn pop_on_empty() {
        let mut items: Vec<Item> = Vec::new();
        let mut heap = IndexedBinaryHeap::<Item>::new(0);
        assert_eq!(heap.pop(&mut items), None);
        assert_eq!(heap.capacity(), 0);
    }
}
