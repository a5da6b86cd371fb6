use std::cmp::Ordering;

/// Marker for a payload that is not in the heap.
const NO_SLOT: usize = usize::MAX;

/// Search priority of an open cell: total cost `f = g + h`, ties broken by
/// the heuristic `h`.
///
/// The ordering is reversed so that the *cheaper* key compares *greater*
/// and is extracted first from a max-heap.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CostKey {
    pub f: i32,
    pub h: i32,
}

impl CostKey {
    #[inline]
    pub const fn new(g: i32, h: i32) -> Self {
        Self { f: g + h, h }
    }
}

impl Ord for CostKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f).then(other.h.cmp(&self.h))
    }
}

impl PartialOrd for CostKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Fixed-capacity binary max-heap of `(priority, payload)` pairs with a
/// reverse index from payload to slot.
///
/// Payloads are dense ids below the capacity (cell indices in practice).
/// The reverse index makes [`contains`](Self::contains) and
/// [`update_item`](Self::update_item) O(1) and O(log n) respectively.
#[derive(Clone, Debug)]
pub struct IndexedHeap<P> {
    items: Vec<(P, usize)>,
    slots: Vec<usize>,
}

impl<P: Ord + Copy> IndexedHeap<P> {
    /// An empty heap accepting payloads `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            slots: vec![NO_SLOT; capacity],
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert `payload` with the given priority.
    ///
    /// # Panics
    ///
    /// Panics if the heap is full or `payload` is not below the capacity.
    pub fn add(&mut self, payload: usize, priority: P) {
        assert!(
            payload < self.capacity(),
            "heap payload {payload} out of range (capacity {})",
            self.capacity()
        );
        assert!(
            self.items.len() < self.capacity(),
            "heap capacity {} exceeded",
            self.capacity()
        );
        debug_assert!(!self.contains(payload), "payload {payload} added twice");

        let slot = self.items.len();
        self.items.push((priority, payload));
        self.slots[payload] = slot;
        self.sift_up(slot);
    }

    /// Remove and return the highest-priority item.
    pub fn remove_first(&mut self) -> Option<(usize, P)> {
        if self.items.is_empty() {
            return None;
        }
        let (priority, payload) = self.items.swap_remove(0);
        self.slots[payload] = NO_SLOT;
        if let Some(&(_, moved)) = self.items.first() {
            self.slots[moved] = 0;
            self.sift_down(0);
        }
        Some((payload, priority))
    }

    /// The highest-priority item, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<(usize, P)> {
        self.items.first().map(|&(priority, payload)| (payload, priority))
    }

    /// Raise the priority of a payload already in the heap.
    ///
    /// Only improvements are supported: the item is sifted up, never down.
    ///
    /// # Panics
    ///
    /// Panics if `payload` is not in the heap.
    pub fn update_item(&mut self, payload: usize, priority: P) {
        assert!(self.contains(payload), "payload {payload} is not in the heap");
        let slot = self.slots[payload];
        debug_assert!(
            priority >= self.items[slot].0,
            "priority of payload {payload} got worse"
        );
        self.items[slot].0 = priority;
        self.sift_up(slot);
    }

    /// Whether `payload` is in the heap.
    ///
    /// Checks that the recorded slot is live and still holds `payload`.
    /// Removal clears the recorded slot, so this stays exact for the open-set
    /// pattern of add, update and remove_first.
    #[inline]
    pub fn contains(&self, payload: usize) -> bool {
        self.slots
            .get(payload)
            .is_some_and(|&slot| slot < self.items.len() && self.items[slot].1 == payload)
    }

    /// Remove every item, keeping the capacity.
    pub fn clear(&mut self) {
        for &(_, payload) in &self.items {
            self.slots[payload] = NO_SLOT;
        }
        self.items.clear();
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.items[i].0 <= self.items[parent].0 {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.items[right].0 > self.items[left].0 {
                right
            } else {
                left
            };
            if self.items[child].0 <= self.items[i].0 {
                break;
            }
            self.swap(i, child);
            i = child;
        }
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
        self.slots[self.items[a].1] = a;
        self.slots[self.items[b].1] = b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn assert_heap_property<P: Ord + Copy + std::fmt::Debug>(heap: &IndexedHeap<P>) {
        for i in 1..heap.items.len() {
            let parent = (i - 1) / 2;
            assert!(
                heap.items[parent].0 >= heap.items[i].0,
                "slot {i} outranks its parent"
            );
        }
        for (slot, &(_, payload)) in heap.items.iter().enumerate() {
            assert_eq!(heap.slots[payload], slot);
        }
    }

    #[test]
    fn cost_key_prefers_lower_f_then_lower_h() {
        assert!(CostKey { f: 3, h: 9 } > CostKey { f: 4, h: 0 });
        assert!(CostKey { f: 4, h: 1 } > CostKey { f: 4, h: 2 });
        assert_eq!(CostKey::new(2, 3), CostKey { f: 5, h: 3 });
    }

    #[test]
    fn contains_after_add() {
        let mut heap = IndexedHeap::with_capacity(8);
        heap.add(5, 10);
        assert!(heap.contains(5));
        assert!(!heap.contains(0));
        assert!(!heap.contains(99));
    }

    #[test]
    fn removed_items_are_no_longer_contained() {
        let mut heap = IndexedHeap::with_capacity(4);
        heap.add(0, 1);
        heap.add(1, 7);
        assert_eq!(heap.remove_first(), Some((1, 7)));
        assert!(!heap.contains(1));
        assert!(heap.contains(0));
        assert_eq!(heap.remove_first(), Some((0, 1)));
        assert!(!heap.contains(0));
        assert_eq!(heap.remove_first(), None);
    }

    #[test]
    fn extracts_in_priority_order() {
        let mut heap = IndexedHeap::with_capacity(10);
        for (payload, priority) in [4, 9, 1, 7, 3, 8, 0, 6, 2, 5].into_iter().enumerate() {
            heap.add(payload, priority);
        }
        assert_eq!(heap.peek(), Some((1, 9)));
        let order: Vec<_> = std::iter::from_fn(|| heap.remove_first().map(|(_, p)| p)).collect();
        assert_eq!(order, vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn update_item_moves_toward_the_root() {
        let mut heap = IndexedHeap::with_capacity(6);
        for payload in 0..6 {
            heap.add(payload, CostKey::new(10 + payload as i32, 0));
        }
        heap.update_item(5, CostKey::new(1, 0));
        assert_heap_property(&heap);
        assert_eq!(heap.peek(), Some((5, CostKey { f: 1, h: 0 })));
    }

    #[test]
    fn clear_resets_membership() {
        let mut heap = IndexedHeap::with_capacity(3);
        heap.add(0, 1);
        heap.add(2, 3);
        heap.clear();
        assert!(heap.is_empty());
        assert!(!heap.contains(0));
        assert!(!heap.contains(2));
        heap.add(2, 1);
        assert_eq!(heap.len(), 1);
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn add_beyond_capacity_panics() {
        let mut heap = IndexedHeap::with_capacity(1);
        heap.add(0, 1);
        heap.add(0, 2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn payload_outside_capacity_panics() {
        let mut heap = IndexedHeap::with_capacity(2);
        heap.add(2, 1);
    }

    #[test]
    fn heap_property_holds_under_random_operations() {
        let mut rng = StdRng::seed_from_u64(7);
        let cap = 64;
        let mut heap = IndexedHeap::with_capacity(cap);
        let mut live: Vec<(usize, CostKey)> = Vec::new();

        for _ in 0..2000 {
            match rng.random_range(0..3) {
                0 if live.len() < cap => {
                    let payload = (0..cap).find(|p| !heap.contains(*p)).unwrap();
                    let key = CostKey::new(rng.random_range(0..50), rng.random_range(0..20));
                    heap.add(payload, key);
                    live.push((payload, key));
                }
                1 if !live.is_empty() => {
                    let i = rng.random_range(0..live.len());
                    let (payload, key) = live[i];
                    let better = CostKey::new(key.f - key.h - rng.random_range(0..5), key.h);
                    heap.update_item(payload, better);
                    live[i].1 = better;
                }
                _ => {
                    let best = live.iter().map(|&(_, k)| k).max();
                    let popped = heap.remove_first();
                    assert_eq!(popped.map(|(_, k)| k), best);
                    if let Some((payload, _)) = popped {
                        live.retain(|&(p, _)| p != payload);
                        assert!(!heap.contains(payload));
                    }
                }
            }
            assert_heap_property(&heap);
            assert_eq!(heap.len(), live.len());
            for &(payload, _) in &live {
                assert!(heap.contains(payload));
            }
        }
    }
}
