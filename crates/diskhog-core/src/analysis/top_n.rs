/// Bounded "largest K" selection over an unbounded stream.
///
/// Keeps a min-heap of at most K entries whose root is the current weakest
/// survivor. Once full, an incoming item replaces the root only if it is
/// strictly larger; otherwise it is rejected in O(1). Each accepted item
/// costs O(log K), so the selector never holds more than K items regardless
/// of stream length.
///
/// Ties are stable: among equal sizes the item seen first ranks higher, and
/// a late arrival never displaces an earlier item of the same size.
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Anything with a size the selector can rank by.
pub trait Measured {
    fn size(&self) -> u64;
}

/// An item tagged with its arrival sequence number.
#[derive(Debug)]
struct Ranked<T> {
    size: u64,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Ranked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.seq == other.seq
    }
}

impl<T> Eq for Ranked<T> {}

impl<T> PartialOrd for Ranked<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Ranked<T> {
    /// Larger size ranks higher; for equal sizes the earlier arrival does.
    fn cmp(&self, other: &Self) -> Ordering {
        self.size
            .cmp(&other.size)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Keeps the K largest items pushed into it.
#[derive(Debug)]
pub struct TopNSelector<T> {
    capacity: usize,
    heap: BinaryHeap<Reverse<Ranked<T>>>,
    seen: u64,
}

impl<T: Measured> TopNSelector<T> {
    /// A selector that retains at most `capacity` items. A capacity of zero
    /// accepts nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            // Avoid reserving huge buffers for "unbounded" capacities.
            heap: BinaryHeap::with_capacity(capacity.min(1_024)),
            seen: 0,
        }
    }

    /// Offer one item.
    pub fn push(&mut self, item: T) {
        let ranked = Ranked {
            size: item.size(),
            seq: self.seen,
            item,
        };
        self.seen += 1;

        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(ranked));
            return;
        }
        if let Some(mut weakest) = self.heap.peek_mut() {
            if ranked > weakest.0 {
                *weakest = Reverse(ranked);
            }
        }
    }

    /// Current top items, largest first. Does not consume the selector.
    pub fn result(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut ranked: Vec<&Ranked<T>> = self.heap.iter().map(|r| &r.0).collect();
        ranked.sort_unstable_by(|a, b| b.cmp(a));
        ranked.into_iter().map(|r| r.item.clone()).collect()
    }

    /// Consume the selector, returning its items largest first.
    pub fn into_sorted(self) -> Vec<T> {
        // Ascending order of `Reverse<_>` is descending rank.
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|r| r.0.item)
            .collect()
    }

    /// Number of items currently retained.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total items offered so far, accepted or not.
    #[inline]
    pub fn seen(&self) -> u64 {
        self.seen
    }
}

impl<T: Measured> Extend<T> for TopNSelector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Item {
        name: &'static str,
        size: u64,
    }

    impl Measured for Item {
        fn size(&self) -> u64 {
            self.size
        }
    }

    fn item(name: &'static str, size: u64) -> Item {
        Item { name, size }
    }

    fn sizes(items: &[Item]) -> Vec<u64> {
        items.iter().map(|i| i.size).collect()
    }

    #[test]
    fn keeps_two_largest_of_five() {
        let mut sel = TopNSelector::new(2);
        for (name, size) in [("a", 5), ("b", 3), ("c", 9), ("d", 1), ("e", 7)] {
            sel.push(item(name, size));
        }
        assert_eq!(sizes(&sel.result()), [9, 7]);
        assert_eq!(sizes(&sel.into_sorted()), [9, 7]);
    }

    #[test]
    fn zero_capacity_accepts_nothing() {
        let mut sel = TopNSelector::new(0);
        sel.extend([item("a", 10), item("b", 20)]);
        assert!(sel.is_empty());
        assert_eq!(sel.seen(), 2);
        assert!(sel.into_sorted().is_empty());
    }

    #[test]
    fn empty_stream_yields_empty_result() {
        let sel: TopNSelector<Item> = TopNSelector::new(5);
        assert!(sel.result().is_empty());
    }

    #[test]
    fn fewer_than_capacity_returns_all_sorted() {
        let mut sel = TopNSelector::new(10);
        sel.extend([item("a", 1), item("b", 30), item("c", 20)]);
        assert_eq!(sizes(&sel.result()), [30, 20, 1]);
    }

    #[test]
    fn many_more_than_capacity() {
        let mut sel = TopNSelector::new(3);
        for size in 0..10_007u64 {
            sel.push(Item { name: "x", size: (size * 7_919) % 10_007 });
        }
        assert_eq!(sel.len(), 3);
        assert_eq!(sizes(&sel.result()), [10_006, 10_005, 10_004]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let mut sel = TopNSelector::new(3);
        sel.extend([
            item("first", 5),
            item("second", 5),
            item("big", 9),
            item("third", 5),
        ]);
        let names: Vec<_> = sel.result().iter().map(|i| i.name).collect();
        assert_eq!(names, ["big", "first", "second"]);
    }

    /// An equal-sized late arrival must not evict an earlier survivor.
    #[test]
    fn equal_size_does_not_displace_minimum() {
        let mut sel = TopNSelector::new(1);
        sel.extend([item("early", 4), item("late", 4)]);
        assert_eq!(sel.result()[0].name, "early");
    }

    #[test]
    fn permutations_select_same_sizes() {
        let base = [8u64, 3, 8, 1, 5, 5, 9, 2];
        let orders: [[usize; 8]; 3] = [
            [0, 1, 2, 3, 4, 5, 6, 7],
            [7, 6, 5, 4, 3, 2, 1, 0],
            [3, 6, 0, 5, 2, 7, 4, 1],
        ];
        for order in orders {
            let mut sel = TopNSelector::new(4);
            for idx in order {
                sel.push(item("p", base[idx]));
            }
            assert_eq!(sizes(&sel.result()), [9, 8, 8, 5]);
        }
    }
}
