// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A double-ended priority queue backed by an interval heap.
//!
//! A [`Depq`] gives access to both the smallest and the greatest of its items
//! at the same time, which a [`BinaryHeap`][bh] cannot do without a second
//! heap. Pushing an item and popping either extremum take `O(log n)` time;
//! inspecting either extremum takes `O(1)`. If only one end is ever needed,
//! `BinaryHeap` is the better choice.
//!
//! The ordering is either the natural order of the item type or a custom
//! comparator implementing [`compare::Compare`].
//!
//! [bh]: https://doc.rust-lang.org/stable/std/collections/struct.BinaryHeap.html

use std::fmt::{self, Debug};

use compare::{natural, Compare, Natural};

// The queue is a complete binary tree of nodes, each node holding a closed
// interval [lo, hi] with lo <= hi. Every node's interval nests inside its
// parent's, so the root's lo is the global minimum and the root's hi the
// global maximum. Equivalently, lo slots alone form a min-heap and hi slots
// alone form a max-heap.
//
// Storage is a flat Vec in node order: node k keeps its lo item at index 2k
// and its hi item at index 2k + 1; node k's parent is node (k - 1) / 2 and
// its children are nodes 2k + 1 and 2k + 2. When the item count is odd the
// last node is a "half node" holding a single item, which stands in for both
// of its slots. Layout of a tree with 9 items (5 nodes), numbers being item
// indices:
//
//            (0 1)
//           /     \
//      (2 3)       (4 5)
//      /    \
//   (6 7)  (8 --)
//
// Growth is left to Vec's amortized-doubling reallocation; callers needing
// hard latency bounds can pre-size with `with_capacity` or `reserve`.

/// A double-ended priority queue backed by an interval heap.
///
/// It is a logic error for an item to be modified in such a way that the
/// item's ordering relative to any other item, as determined by the queue's
/// comparator, changes while it is in the queue. This is normally only
/// possible through `Cell`, `RefCell`, global state, I/O, or unsafe code.
#[derive(Clone)]
pub struct Depq<T, C: Compare<T> = Natural<T>> {
    items: Vec<T>,
    cmp: C,
}

impl<T: Ord> Depq<T> {
    /// Returns an empty queue ordered according to the natural order of its
    /// items.
    ///
    /// # Examples
    ///
    /// ```
    /// use depq::Depq;
    ///
    /// let queue = Depq::<u32>::new();
    /// assert!(queue.is_empty());
    /// ```
    pub fn new() -> Depq<T> {
        Self::with_comparator(natural())
    }

    /// Returns an empty queue with the given capacity and ordered according
    /// to the natural order of its items.
    ///
    /// The queue will be able to hold exactly `capacity` items without
    /// reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use depq::Depq;
    ///
    /// let queue = Depq::<u32>::with_capacity(5);
    /// assert!(queue.is_empty());
    /// assert!(queue.capacity() >= 5);
    /// ```
    pub fn with_capacity(capacity: usize) -> Depq<T> {
        Self::with_capacity_and_comparator(capacity, natural())
    }
}

impl<T, C: Compare<T>> Depq<T, C> {
    /// Returns an empty queue ordered according to the given comparator.
    pub fn with_comparator(cmp: C) -> Depq<T, C> {
        Depq { items: vec![], cmp }
    }

    /// Returns an empty queue with the given capacity and ordered according
    /// to the given comparator.
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Depq<T, C> {
        Depq { items: Vec::with_capacity(capacity), cmp }
    }

    /// Pushes an item onto the queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use depq::Depq;
    ///
    /// let mut queue = Depq::new();
    /// queue.push(3);
    /// queue.push(1);
    /// queue.push(2);
    /// assert_eq!(queue.min_max(), Some((&1, &3)));
    /// ```
    pub fn push(&mut self, item: T) {
        debug_assert!(self.is_valid());
        self.items.push(item);
        let n = self.items.len();
        // The new item either opens a new half node (even old count) or
        // completes the old half node, in which case the two items may need
        // swapping to keep lo <= hi.
        let hi = n - 1;
        let lo = hi & !1;
        if lo < hi && self.cmp.compares_gt(&self.items[lo], &self.items[hi]) {
            self.items.swap(lo, hi);
        }
        if n > 2 {
            // The new item can undercut the parent's lo or exceed the
            // parent's hi, never both. Bubble up along the violated chain
            // only. For a half node, lo == hi == the lone item here.
            let node = hi / 2;
            let parent = (node - 1) / 2;
            let plo = 2 * parent;
            let phi = plo + 1;
            if self.cmp.compares_lt(&self.items[lo], &self.items[plo]) {
                self.bubble_up_lo(node);
            } else if self.cmp.compares_gt(&self.items[hi], &self.items[phi]) {
                self.bubble_up_hi(node);
            }
        }
        debug_assert!(self.is_valid());
    }

    /// Returns a reference to the smallest item in the queue.
    ///
    /// Returns `None` if the queue is empty.
    pub fn min(&self) -> Option<&T> {
        debug_assert!(self.is_valid());
        self.items.first()
    }

    /// Returns a reference to the greatest item in the queue.
    ///
    /// Returns `None` if the queue is empty.
    pub fn max(&self) -> Option<&T> {
        debug_assert!(self.is_valid());
        match self.items.len() {
            0 => None,
            1 => Some(&self.items[0]),
            _ => Some(&self.items[1]),
        }
    }

    /// Returns references to the smallest and greatest items in the queue.
    ///
    /// Returns `None` if the queue is empty. With a single item in the
    /// queue, both references point to it.
    pub fn min_max(&self) -> Option<(&T, &T)> {
        debug_assert!(self.is_valid());
        match self.items.len() {
            0 => None,
            1 => Some((&self.items[0], &self.items[0])),
            _ => Some((&self.items[0], &self.items[1])),
        }
    }

    /// Removes the smallest item from the queue and returns it.
    ///
    /// Returns `None` if the queue was empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use depq::Depq;
    ///
    /// let mut queue = Depq::new();
    /// queue.push(3);
    /// queue.push(1);
    /// assert_eq!(queue.pop_min(), Some(1));
    /// assert_eq!(queue.pop_min(), Some(3));
    /// assert_eq!(queue.pop_min(), None);
    /// ```
    pub fn pop_min(&mut self) -> Option<T> {
        debug_assert!(self.is_valid());
        let item = match self.items.len() {
            0 => None,
            1 | 2 => Some(self.items.swap_remove(0)),
            _ => {
                // The last item moved into the root's lo slot cannot exceed
                // the root's hi, which is the global maximum.
                let item = self.items.swap_remove(0);
                self.sift_down_lo();
                Some(item)
            }
        };
        debug_assert!(self.is_valid());
        item
    }

    /// Removes the greatest item from the queue and returns it.
    ///
    /// Returns `None` if the queue was empty.
    pub fn pop_max(&mut self) -> Option<T> {
        debug_assert!(self.is_valid());
        let item = match self.items.len() {
            0..=2 => self.items.pop(),
            _ => {
                let item = self.items.swap_remove(1);
                self.sift_down_hi();
                Some(item)
            }
        };
        debug_assert!(self.is_valid());
        item
    }

    /// Returns the number of items in the queue.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the queue contains no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes all items from the queue.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of items the queue can hold without reallocation.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Reserves capacity for at least `additional` more items to be pushed
    /// onto the queue.
    ///
    /// The queue may reserve more space to avoid frequent reallocations.
    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional);
    }

    /// Reserves the minimum capacity for exactly `additional` more items to
    /// be pushed onto the queue.
    ///
    /// Does nothing if the capacity is already sufficient.
    ///
    /// Note that the allocator may give the queue more space than it
    /// requests. Therefore capacity can not be relied upon to be precisely
    /// minimal. Prefer `reserve` if future pushes are expected.
    pub fn reserve_exact(&mut self, additional: usize) {
        self.items.reserve_exact(additional);
    }

    /// Discards as much additional capacity from the queue as possible.
    pub fn shrink_to_fit(&mut self) {
        self.items.shrink_to_fit();
    }

    /// Walks the lo chain from `node` toward the root, swapping lo slots
    /// while the parent's lo is the greater. A half node's lone item sits in
    /// its lo slot, so no special case is needed.
    fn bubble_up_lo(&mut self, mut node: usize) {
        let mut lo = 2 * node;
        while node > 0 {
            let parent = (node - 1) / 2;
            let plo = 2 * parent;
            if self.cmp.compares_lt(&self.items[lo], &self.items[plo]) {
                self.items.swap(lo, plo);
                node = parent;
                lo = plo;
            } else {
                break;
            }
        }
    }

    /// Walks the hi chain from `node` toward the root, swapping hi slots
    /// while the parent's hi is the smaller. A half node's lone item stands
    /// in for its hi slot; every parent on the chain is a full node.
    fn bubble_up_hi(&mut self, mut node: usize) {
        let mut hi = (2 * node + 1).min(self.items.len() - 1);
        while node > 0 {
            let parent = (node - 1) / 2;
            let phi = 2 * parent + 1;
            if self.cmp.compares_gt(&self.items[hi], &self.items[phi]) {
                self.items.swap(hi, phi);
                node = parent;
                hi = phi;
            } else {
                break;
            }
        }
    }

    /// The root's lo has been replaced with an arbitrary item no greater
    /// than the root's hi. Moves it down along lo slots until the heap order
    /// on the lo side holds again, repairing each visited node's interval
    /// locally.
    fn sift_down_lo(&mut self) {
        let mut node = 0;
        while let Some(child) = self.smaller_child(node) {
            let lo = 2 * node;
            let clo = 2 * child;
            if !self.cmp.compares_lt(&self.items[clo], &self.items[lo]) {
                break;
            }
            self.items.swap(clo, lo);
            // The item moved down may now exceed the child's hi.
            let chi = clo + 1;
            if chi < self.items.len()
                && self.cmp.compares_gt(&self.items[clo], &self.items[chi])
            {
                self.items.swap(clo, chi);
            }
            node = child;
        }
    }

    /// Mirror image of `sift_down_lo` for the hi side.
    fn sift_down_hi(&mut self) {
        let mut node = 0;
        while let Some(child) = self.greater_child(node) {
            let hi = 2 * node + 1;
            let chi = 2 * child + 1;
            if !self.cmp.compares_gt(&self.items[chi], &self.items[hi]) {
                break;
            }
            self.items.swap(chi, hi);
            // The item moved down may now undercut the child's lo.
            let clo = chi - 1;
            if self.cmp.compares_gt(&self.items[clo], &self.items[chi]) {
                self.items.swap(clo, chi);
            }
            node = child;
        }
    }

    /// Returns the child of `node` with the smaller lo, or `None` if `node`
    /// is a leaf.
    fn smaller_child(&self, node: usize) -> Option<usize> {
        let n = self.items.len();
        let c1 = 2 * node + 1;
        if 2 * c1 >= n {
            return None;
        }
        let c2 = c1 + 1;
        if 2 * c2 >= n || self.cmp.compares_lt(&self.items[2 * c1], &self.items[2 * c2]) {
            Some(c1)
        } else {
            Some(c2)
        }
    }

    /// Returns the child of `node` with the greater hi, or `None` if no
    /// child has a hi slot. A half-node child can be skipped here: its lone
    /// item is bounded by the hi that was removed from its own node, so it
    /// never needs to rise.
    fn greater_child(&self, node: usize) -> Option<usize> {
        let n = self.items.len();
        let c1 = 2 * node + 1;
        if 2 * c1 + 1 >= n {
            return None;
        }
        let c2 = c1 + 1;
        if 2 * c2 + 1 >= n
            || self.cmp.compares_gt(&self.items[2 * c1 + 1], &self.items[2 * c2 + 1])
        {
            Some(c1)
        } else {
            Some(c2)
        }
    }

    /// Checks that the layout is a valid interval heap:
    ///
    /// 1. Each full node's lo is less than or equal to its hi, AND
    /// 2. each non-root node's interval nests inside its parent's, a half
    ///    node's lone item standing in for both of its slots.
    fn is_valid(&self) -> bool {
        let n = self.items.len();
        if n < 2 {
            return true;
        }
        if self.cmp.compares_gt(&self.items[0], &self.items[1]) {
            return false;
        }
        for node in 1..(n + 1) / 2 {
            let lo = 2 * node;
            let hi = (lo + 1).min(n - 1);
            let parent = (node - 1) / 2;
            let plo = 2 * parent;
            let phi = plo + 1;
            if self.cmp.compares_gt(&self.items[lo], &self.items[hi])
                || self.cmp.compares_lt(&self.items[lo], &self.items[plo])
                || self.cmp.compares_gt(&self.items[hi], &self.items[phi])
            {
                return false;
            }
        }
        true
    }
}

impl<T, C: Compare<T> + Default> Default for Depq<T, C> {
    #[inline]
    fn default() -> Depq<T, C> {
        Self::with_comparator(C::default())
    }
}

impl<T: Debug, C: Compare<T>> Debug for Depq<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

#[cfg(test)]
mod test {
    use compare::{natural, Compare};
    use rand::{thread_rng, Rng};

    use super::Depq;

    fn filled(values: &[i32]) -> Depq<i32> {
        let mut queue = Depq::new();
        for &v in values {
            queue.push(v);
        }
        queue
    }

    #[test]
    fn test_push_pop_both_ends() {
        let mut queue = filled(&[5, 1, 9, 3]);
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.min(), Some(&1));
        assert_eq!(queue.max(), Some(&9));

        assert_eq!(queue.pop_min(), Some(1));
        assert_eq!(queue.min(), Some(&3));
        assert_eq!(queue.pop_max(), Some(9));
        assert_eq!(queue.max(), Some(&5));
        assert_eq!(queue.pop_min(), Some(3));
        assert_eq!(queue.pop_max(), Some(5));
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_single_item() {
        let mut queue = filled(&[7]);
        assert_eq!(queue.min(), Some(&7));
        assert_eq!(queue.max(), Some(&7));
        assert_eq!(queue.min_max(), Some((&7, &7)));
        assert_eq!(queue.pop_min(), Some(7));
        assert_eq!(queue.max(), None);
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = Depq::<i32>::new();
        assert!(queue.is_empty());
        assert_eq!(queue.min(), None);
        assert_eq!(queue.max(), None);
        assert_eq!(queue.min_max(), None);
        assert_eq!(queue.pop_min(), None);
        assert_eq!(queue.pop_max(), None);
    }

    #[test]
    fn test_peek_is_idempotent() {
        let queue = filled(&[4, 2, 8]);
        for _ in 0..5 {
            assert_eq!(queue.min(), Some(&2));
            assert_eq!(queue.max(), Some(&8));
        }
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_duplicates() {
        let mut queue = filled(&[3, 3, 1, 3, 1]);
        assert_eq!(queue.min_max(), Some((&1, &3)));
        assert_eq!(queue.pop_min(), Some(1));
        assert_eq!(queue.pop_min(), Some(1));
        assert_eq!(queue.pop_max(), Some(3));
        assert_eq!(queue.pop_max(), Some(3));
        assert_eq!(queue.min_max(), Some((&3, &3)));
    }

    #[test]
    fn test_clear() {
        let mut queue = filled(&[2, 6, 4]);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.min(), None);
        queue.push(5);
        assert_eq!(queue.min_max(), Some((&5, &5)));
    }

    #[test]
    fn test_custom_comparator() {
        let mut queue = Depq::with_comparator(natural().rev());
        for v in [5, 1, 9, 3] {
            queue.push(v);
        }
        // Reversed order: the "smallest" item is the greatest value.
        assert_eq!(queue.min(), Some(&9));
        assert_eq!(queue.max(), Some(&1));
        assert_eq!(queue.pop_min(), Some(9));
        assert_eq!(queue.pop_max(), Some(1));
    }

    #[test]
    fn test_is_valid() {
        fn raw(items: Vec<i32>) -> Depq<i32> {
            Depq { items, cmp: natural() }
        }

        assert!(raw(vec![]).is_valid());
        assert!(raw(vec![1]).is_valid());
        assert!(raw(vec![1, 1]).is_valid());
        assert!(raw(vec![1, 5]).is_valid());
        assert!(raw(vec![1, 5, 1]).is_valid());
        assert!(raw(vec![1, 5, 1, 1]).is_valid());
        assert!(raw(vec![1, 5, 5]).is_valid());
        assert!(raw(vec![1, 5, 5, 5]).is_valid());
        assert!(raw(vec![1, 5, 2, 4]).is_valid());
        assert!(raw(vec![1, 5, 2, 4, 3]).is_valid());
        assert!(raw(vec![1, 5, 2, 4, 3, 3]).is_valid());

        assert!(!raw(vec![2, 1]).is_valid()); // root lo > hi
        assert!(!raw(vec![1, 5, 4, 3]).is_valid()); // child lo > hi
        assert!(!raw(vec![1, 5, 0]).is_valid()); // half item below parent lo
        assert!(!raw(vec![1, 5, 0, 5]).is_valid()); // child lo below parent lo
        assert!(!raw(vec![1, 5, 6]).is_valid()); // half item above parent hi
        assert!(!raw(vec![1, 5, 1, 6]).is_valid()); // child hi above parent hi
        assert!(!raw(vec![1, 5, 0, 6]).is_valid()); // interval not nested
    }

    #[test]
    fn fuzz_pop_min_ascending() {
        let mut rng = thread_rng();
        for _ in 0..100 {
            let mut queue = Depq::new();
            for _ in 0..100 {
                queue.push(rng.gen::<u32>());
            }
            let mut prev = None;
            while let Some(v) = queue.pop_min() {
                if let Some(p) = prev {
                    assert!(p <= v);
                }
                prev = Some(v);
            }
            assert!(queue.is_empty());
        }
    }

    #[test]
    fn fuzz_pop_max_descending() {
        let mut rng = thread_rng();
        for _ in 0..100 {
            let mut queue = Depq::new();
            for _ in 0..100 {
                queue.push(rng.gen::<u32>());
            }
            let mut prev = None;
            while let Some(v) = queue.pop_max() {
                if let Some(p) = prev {
                    assert!(p >= v);
                }
                prev = Some(v);
            }
            assert!(queue.is_empty());
        }
    }

    #[test]
    fn fuzz_round_trip_multiset() {
        let mut rng = thread_rng();
        for _ in 0..100 {
            let mut values: Vec<u32> = (0..25).map(|_| rng.gen_range(0..10)).collect();
            let mut queue = Depq::new();
            for &v in &values {
                queue.push(v);
            }
            assert_eq!(queue.len(), values.len());
            let mut drained = Vec::with_capacity(values.len());
            while let Some(v) = queue.pop_min() {
                drained.push(v);
            }
            values.sort_unstable();
            assert_eq!(drained, values);
        }
    }
}
