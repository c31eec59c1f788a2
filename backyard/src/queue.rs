//! A FIFO queue with constant-time membership queries and removal of arbitrary items.
//!
//! The queue is a doubly-linked list threaded through a fixed arena of `k * n` nodes. The arena is
//! split into `k` sub-arrays of `n` nodes, and an item may only live at one of its `k` probe
//! positions `A_i[h_i(item)]`, so finding an item takes at most `k` probes.
//!
//! When all probe positions of a new item are taken the queue is rebuilt: the hash functions are
//! re-sampled and all items are re-inserted in list order. A rebuild may itself run out of probe
//! positions, in which case it starts over with yet another set of functions. Termination is
//! therefore only guaranteed with probability 1, and the expected number of attempts grows quickly
//! as the queue gets close to its capacity.
use crate::hashing::CarterWegmanHash;
use backyard_core::{BackyardError, HashFunction, HashInput};
use log::debug;
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// A node of the arena. A node without an item is free.
#[derive(Debug, Clone)]
struct Node<T> {
    item: Option<T>,
    prev: Option<usize>,
    next: Option<usize>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            item: None,
            prev: None,
            next: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Front,
    Back,
}

/// Constant-time FIFO queue over a fixed arena.
///
/// # Guarantees
///
/// - O(k) `push_back`, `push_front`, `contains` and `remove` outside of rebuilds.
/// - O(1) `pop_front`.
/// - Pop order is the same as of [`std::collections::VecDeque`] under the same pushes.
///
/// # Examples
///
/// ```rust
/// use backyard::queue::ConstantTimeQueue;
///
/// let mut queue = ConstantTimeQueue::<u32>::new(10, 3, 42);
/// queue.push_back(1).unwrap();
/// queue.push_front(2).unwrap();
///
/// assert!(queue.contains(&1));
/// assert_eq!(queue.pop_front(), Some(2));
/// assert_eq!(queue.pop_front(), Some(1));
/// assert_eq!(queue.pop_front(), None);
/// ```
#[derive(Debug, Clone)]
pub struct ConstantTimeQueue<T> {
    nodes: Box<[Node<T>]>,
    hashers: Box<[CarterWegmanHash]>,
    sub_array_size: usize,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    num_rebuilds: usize,
}

impl<T: HashInput> ConstantTimeQueue<T> {
    const STRUCTURE: &'static str = "queue";

    /// Create an empty queue.
    ///
    /// # Parameters
    ///
    /// - `n`: Size of each sub-array.
    /// - `k`: Number of sub-arrays, which is also the number of probes per item.
    /// - `seed`: Seed for the probe hash functions.
    pub fn new(n: usize, k: usize, seed: u64) -> Self {
        debug_assert!(n > 0 && k > 0, r#""n" and "k" must be greater than 0"#);

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        Self {
            nodes: (0..n * k).map(|_| Node::default()).collect(),
            hashers: (0..k)
                .map(|_| CarterWegmanHash::from_seed(rng.next_u64(), n as u64))
                .collect(),
            sub_array_size: n,
            head: None,
            tail: None,
            len: 0,
            num_rebuilds: 0,
        }
    }

    /// Iterate over the `k` probe positions of the `item`.
    #[inline]
    fn probes<'a>(&'a self, item: &'a T) -> impl Iterator<Item = usize> + 'a {
        self.hashers
            .iter()
            .enumerate()
            .map(move |(i, h)| i * self.sub_array_size + h.hash(item) as usize)
    }

    fn free_position(&self, item: &T) -> Option<usize> {
        self.probes(item).find(|&pos| self.nodes[pos].item.is_none())
    }

    fn position(&self, item: &T) -> Option<usize> {
        self.probes(item)
            .find(|&pos| self.nodes[pos].item.as_ref() == Some(item))
    }

    /// Store the `item` at the free node `pos` and splice the node into the list.
    fn link(&mut self, pos: usize, item: T, end: End) {
        debug_assert!(self.nodes[pos].item.is_none(), "Node must be free");

        let node = match end {
            End::Back => {
                match self.tail {
                    Some(tail) => self.nodes[tail].next = Some(pos),
                    None => self.head = Some(pos),
                }
                let node = Node {
                    item: Some(item),
                    prev: self.tail,
                    next: None,
                };
                self.tail = Some(pos);
                node
            }
            End::Front => {
                match self.head {
                    Some(head) => self.nodes[head].prev = Some(pos),
                    None => self.tail = Some(pos),
                }
                let node = Node {
                    item: Some(item),
                    prev: None,
                    next: self.head,
                };
                self.head = Some(pos);
                node
            }
        };
        self.nodes[pos] = node;
        self.len += 1;
    }

    /// Detach the occupied node `pos` from the list and free it.
    fn unlink(&mut self, pos: usize) -> Option<T> {
        let Node { item, prev, next } = std::mem::take(&mut self.nodes[pos]);
        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
        item
    }

    fn push(&mut self, item: T, end: End) -> Result<(), BackyardError> {
        if self.len == self.capacity() {
            return Err(BackyardError::CapacityExceeded {
                structure: Self::STRUCTURE,
                capacity: self.capacity(),
            });
        }
        match self.free_position(&item) {
            Some(pos) => self.link(pos, item, end),
            None => self.rebuild(item, end),
        }
        Ok(())
    }

    /// Re-sample all probe functions and re-insert the current items together with the new one.
    fn rebuild(&mut self, item: T, end: End) {
        let mut items = Vec::with_capacity(self.len + 1);
        if end == End::Front {
            items.push(item);
        }
        items.extend(self.iter().copied());
        if end == End::Back {
            items.push(item);
        }

        loop {
            self.num_rebuilds += 1;
            debug!(
                "Rebuilding the queue (rebuild #{}, {} items, capacity {})",
                self.num_rebuilds,
                items.len(),
                self.capacity(),
            );

            for hasher in self.hashers.iter_mut() {
                hasher.randomize_parameters();
            }
            self.clear();

            let placed = items.iter().all(|&item| match self.free_position(&item) {
                Some(pos) => {
                    self.link(pos, item, End::Back);
                    true
                }
                None => false,
            });
            if placed {
                return;
            }
        }
    }

    /// Append the `item` to the back of the queue.
    ///
    /// # Errors
    ///
    /// - [`BackyardError::CapacityExceeded`] if all `k * n` nodes are already taken.
    pub fn push_back(&mut self, item: T) -> Result<(), BackyardError> {
        self.push(item, End::Back)
    }

    /// Prepend the `item` to the front of the queue.
    ///
    /// # Errors
    ///
    /// - [`BackyardError::CapacityExceeded`] if all `k * n` nodes are already taken.
    pub fn push_front(&mut self, item: T) -> Result<(), BackyardError> {
        self.push(item, End::Front)
    }

    /// Remove and return the item at the front of the queue.
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        self.unlink(head)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.position(item).is_some()
    }

    /// Remove the `item` wherever it is in the queue, returns `false` if it wasn't there.
    pub fn remove(&mut self, item: &T) -> bool {
        match self.position(item) {
            Some(pos) => self.unlink(pos).is_some(),
            None => false,
        }
    }

    /// Remove all items. Keeps the current hash functions.
    pub fn clear(&mut self) {
        self.nodes.fill_with(Node::default);
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Maximum number of items, equal to `k * n`.
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Number of rebuilds performed since construction.
    pub fn num_rebuilds(&self) -> usize {
        self.num_rebuilds
    }

    /// Iterate over the items from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            next: self.head,
        }
    }
}

/// Front-to-back iterator over a [`ConstantTimeQueue`].
pub struct Iter<'a, T> {
    nodes: &'a [Node<T>],
    next: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.nodes[self.next?];
        self.next = node.next;
        node.item.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backyard_testing::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use test_log::test;

    impl<T: HashInput> Deque<T> for ConstantTimeQueue<T> {
        fn push_back(&mut self, item: T) {
            ConstantTimeQueue::push_back(self, item).unwrap();
        }
        fn push_front(&mut self, item: T) {
            ConstantTimeQueue::push_front(self, item).unwrap();
        }
        fn pop_front(&mut self) -> Option<T> {
            ConstantTimeQueue::pop_front(self)
        }
        fn len(&self) -> usize {
            ConstantTimeQueue::len(self)
        }
    }

    #[test]
    fn test_push_back() {
        let mut queue = ConstantTimeQueue::<u64>::new(10, 3, 0);
        for item in 1..=3 {
            queue.push_back(item).unwrap();
        }

        assert!(queue.contains(&1) && queue.contains(&2) && queue.contains(&3));
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_push_front() {
        let mut queue = ConstantTimeQueue::<u64>::new(10, 3, 1);
        for item in 1..=3 {
            queue.push_front(item).unwrap();
        }

        assert!(queue.contains(&1) && queue.contains(&2) && queue.contains(&3));
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    fn test_pop_front() {
        let mut queue = ConstantTimeQueue::<u64>::new(10, 3, 2);
        queue.push_back(1).unwrap();
        queue.push_back(2).unwrap();

        assert_eq!(queue.pop_front(), Some(1));
        assert!(queue.contains(&2));
        assert!(!queue.contains(&1));

        assert_eq!(queue.pop_front(), Some(2));
        assert!(queue.is_empty());
        assert_eq!(queue.pop_front(), None);
    }

    #[test]
    fn test_contains() {
        let mut queue = ConstantTimeQueue::<u64>::new(10, 3, 3);
        queue.push_back(5).unwrap();
        queue.push_front(3).unwrap();

        assert!(queue.contains(&5));
        assert!(queue.contains(&3));
        assert!(!queue.contains(&1));
    }

    #[test]
    fn test_remove() {
        let mut queue = ConstantTimeQueue::<u64>::new(10, 3, 4);
        queue.push_back(10).unwrap();
        queue.push_back(20).unwrap();

        assert!(queue.remove(&10));
        assert!(!queue.remove(&10));
        assert!(!queue.contains(&10));
        assert!(queue.contains(&20));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_remove_keeps_head_and_tail_consistent() {
        let mut queue = ConstantTimeQueue::<u64>::new(10, 3, 5);
        for item in 1..=4 {
            queue.push_back(item).unwrap();
        }

        // Head, tail, then a middle node.
        assert!(queue.remove(&1));
        assert!(queue.remove(&4));
        queue.push_back(5).unwrap();
        queue.push_front(6).unwrap();
        assert!(queue.remove(&2));

        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![6, 3, 5]);
        assert_eq!(queue.pop_front(), Some(6));
        assert_eq!(queue.pop_front(), Some(3));
        assert_eq!(queue.pop_front(), Some(5));
        assert_eq!(queue.pop_front(), None);

        queue.push_back(7).unwrap();
        assert!(queue.remove(&7));
        assert!(queue.is_empty());
        assert_eq!(queue.pop_front(), None);
    }

    #[test]
    fn test_empty() {
        let mut queue = ConstantTimeQueue::<u64>::new(10, 3, 6);
        assert!(queue.is_empty());

        queue.push_back(1).unwrap();
        assert!(!queue.is_empty());

        queue.pop_front();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_rebuild_preserves_membership_and_order() {
        let mut queue = ConstantTimeQueue::<u64>::new(2, 3, 7);
        // Filling all 6 nodes is very likely to force multiple rebuilds.
        for item in 1..=6 {
            queue.push_front(item).unwrap();
        }

        for item in 1..=6 {
            assert!(queue.contains(&item), "{} is missing", item);
        }
        for expected in (1..=6).rev() {
            assert_eq!(queue.pop_front(), Some(expected));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_push_beyond_capacity_fails() {
        let mut queue = ConstantTimeQueue::<u64>::new(2, 2, 8);
        for item in 0..4 {
            queue.push_back(item).unwrap();
        }

        assert_eq!(
            queue.push_back(4),
            Err(BackyardError::CapacityExceeded {
                structure: "queue",
                capacity: 4,
            }),
        );
        assert_eq!(queue.len(), 4);
        assert!(!queue.contains(&4));
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_queue_matches_vec_deque() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        for _ in 0..20 {
            let mut queue = ConstantTimeQueue::<u32>::new(16, 4, rng.next_u64());
            let trace = generate_deque_trace::<_, u32>(&mut rng, &NumParams::default(), 500, 20);
            deque_equivalence(&mut queue, &trace);
        }
    }

    #[test]
    fn test_queue_matches_vec_deque_under_rebuilds() {
        let mut rng = ChaCha20Rng::seed_from_u64(10);
        let mut queue = ConstantTimeQueue::<(u32, bool)>::new(4, 3, 10);
        let trace =
            generate_deque_trace::<_, (u32, bool)>(&mut rng, &NumParams::default(), 300, 8);
        deque_equivalence(&mut queue, &trace);

        assert!(queue.num_rebuilds() > 0);
    }
}
