//! Implements the dictionary operations of [`BackyardCuckoo`].
use crate::engine::BackyardCuckoo;
use backyard_core::{BackyardError, Dictionary, HashFunction, Item};
use log::{trace, warn};

impl<T: Item, H: HashFunction> BackyardCuckoo<T, H> {
    /// Put an entry that is being moved around back into the queue.
    ///
    /// If even that fails the item is lost, so it's no longer counted.
    fn requeue(&mut self, entry: (T, bool), front: bool) -> Result<(), BackyardError> {
        let result = if front {
            self.queue.push_front(entry)
        } else {
            self.queue.push_back(entry)
        };
        if let Err(error) = &result {
            self.len -= 1;
            warn!("Dropped {:?} that could not be re-queued: {}", entry.0, error);
        }
        result
    }

    /// Insert the `item`.
    ///
    /// The item is appended to the queue and then up to `insert_iterations` placement steps are
    /// performed on the queue, starting from its head. Each step moves the entry in hand into
    /// a bin, into a free slot of a cuckoo table, or displaces the occupant of its cuckoo-table
    /// slot and continues with that occupant. Whatever is in hand when the steps run out goes to
    /// the front of the queue.
    ///
    /// Inserting a present item only performs the placement steps.
    ///
    /// # Notes
    ///
    /// - Every displacement records the displacing item together with the table it displaced
    ///   from. An item that comes back to displace from the same table again closes a cycle.
    /// - The cycle detector starts empty on every call, so the chain of an entry deferred to the
    ///   queue front is not remembered by the next call.
    ///
    /// # Errors
    ///
    /// - [`BackyardError::CapacityExceeded`] if the queue is full or the eviction chain grows
    ///   beyond the capacity of the cycle detector. A new item is not inserted if the queue
    ///   is full.
    pub fn insert(&mut self, item: T) -> Result<(), BackyardError> {
        if !self.contains(&item) {
            self.queue.push_back((item, true))?;
            self.len += 1;
        }
        self.detector.reset();

        let mut in_hand: Option<(T, bool)> = None;
        for _ in 0..self.insert_iterations {
            let (current, tag) = match in_hand.take().or_else(|| self.queue.pop_front()) {
                Some(entry) => entry,
                None => break,
            };

            if self.bins.insert(current) {
                continue;
            }

            let table = tag as usize;
            let slot = self.table_slot(table, &current);
            let occupant = match self.tables[table][slot] {
                Some(occupant) => occupant,
                None => {
                    self.tables[table][slot] = Some(current);
                    self.detector.reset();
                    continue;
                }
            };

            if self.detector.contains(&(current, tag)) {
                trace!("Eviction cycle at {:?}, moving it to the back of the queue", current);
                self.requeue((current, tag), false)?;
                self.detector.reset();
                continue;
            }

            if let Err(error) = self.detector.insert((current, tag)) {
                self.requeue((current, tag), true)?;
                return Err(error);
            }
            self.tables[table][slot] = Some(current);
            in_hand = Some((occupant, !tag));
        }

        if let Some(entry) = in_hand {
            trace!("Deferring placement of {:?}", entry.0);
            self.requeue(entry, true)?;
        }
        Ok(())
    }

    fn remove_from_tables(&mut self, item: &T) -> bool {
        for table in 0..2 {
            let slot = self.table_slot(table, item);
            if self.tables[table][slot].as_ref() == Some(item) {
                self.tables[table][slot] = None;
                return true;
            }
        }
        false
    }

    /// Remove the `item`, returns `false` if it wasn't present.
    pub fn remove(&mut self, item: &T) -> bool {
        let removed = self.bins.remove(item)
            || self.remove_from_tables(item)
            || self.queue.remove(&(*item, true))
            || self.queue.remove(&(*item, false));
        if removed {
            self.len -= 1;
        }
        removed
    }

    pub fn contains(&self, item: &T) -> bool {
        self.bins.contains(item)
            || self.table_holds(0, item)
            || self.table_holds(1, item)
            || self.queue.contains(&(*item, true))
            || self.queue.contains(&(*item, false))
    }
}

impl<T: Item, H: HashFunction> Dictionary<T> for BackyardCuckoo<T, H> {
    fn insert(&mut self, item: T) -> Result<(), BackyardError> {
        BackyardCuckoo::insert(self, item)
    }

    fn remove(&mut self, item: &T) -> bool {
        BackyardCuckoo::remove(self, item)
    }

    fn contains(&self, item: &T) -> bool {
        BackyardCuckoo::contains(self, item)
    }

    fn len(&self) -> usize {
        BackyardCuckoo::len(self)
    }
}
