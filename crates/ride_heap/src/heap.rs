//! Bounded min-heap of rides ordered by scheduled time.
//!
//! Rides live in a fixed-length arena of `capacity + 1` slots. Slot 0 is never
//! used so that `parent(i) = i / 2`, `left(i) = 2i` and `right(i) = 2i + 1`.
//!
//! # Lifecycle
//!
//! `Empty -> Populated` through [`MinHeap::insert`] or [`MinHeap::heapify`],
//! back to `Empty` when the last ride is removed. [`MinHeap::sort`] turns the
//! arena into a flat ascending sequence and moves the heap to `Sorted`; from
//! there only read-only queries work until [`MinHeap::reheapify`] or
//! [`MinHeap::heapify`] rebuilds heap order.

use std::collections::HashSet;
use std::fmt;

use crate::config::{HeapConfig, CONSOLIDATION_WINDOW_SECS};
use crate::diagnostics::{Diagnostics, NoopDiagnostics};
use crate::error::{HeapError, Rejected};
use crate::ride::Ride;
use crate::time::RideTime;

const ROOT: usize = 1;

fn parent(index: usize) -> usize {
    index / 2
}

fn left(index: usize) -> usize {
    index * 2
}

fn right(index: usize) -> usize {
    index * 2 + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapState {
    Empty,
    Populated,
    /// Sorted in place by [`MinHeap::sort`]; mutation is refused until re-heapified.
    Sorted,
}

/// How an accepted ride entered the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The ride took a new slot; `slot` is where it settled.
    Admitted { slot: usize },
    /// The ride's passengers joined ride `into`, which now sits at `slot`.
    Merged { into: i64, slot: usize },
}

/// Result of a batch insert that was not rejected as a whole.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub admitted: usize,
    pub merged: usize,
    /// Empty or invalid entries that were passed over.
    pub skipped: usize,
    /// Valid rides the heap refused individually (duplicates, capacity).
    pub rejected: Vec<Rejected<Ride>>,
}

impl BatchOutcome {
    pub fn accepted(&self) -> usize {
        self.admitted + self.merged
    }
}

pub struct MinHeap {
    slots: Vec<Option<Ride>>,
    count: usize,
    config: HeapConfig,
    sorted: bool,
    diagnostics: Box<dyn Diagnostics>,
}

impl fmt::Debug for MinHeap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinHeap")
            .field("slots", &self.slots)
            .field("count", &self.count)
            .field("config", &self.config)
            .field("sorted", &self.sorted)
            .finish_non_exhaustive()
    }
}

impl Default for MinHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl MinHeap {
    pub fn new() -> Self {
        Self::with_config(HeapConfig::default())
    }

    pub fn with_capacity(max_capacity: usize) -> Self {
        Self::with_config(HeapConfig::default().with_max_capacity(max_capacity))
    }

    /// # Panics
    ///
    /// Panics if `config.max_capacity` is zero.
    pub fn with_config(config: HeapConfig) -> Self {
        if let Err(message) = config.validate() {
            panic!("invalid heap config: {message}");
        }
        Self {
            slots: vec![None; config.max_capacity + 1],
            count: 0,
            config,
            sorted: false,
            diagnostics: Box::new(NoopDiagnostics),
        }
    }

    /// Replaces the trace sink. Behaviour is identical for every sink.
    pub fn with_diagnostics(mut self, diagnostics: Box<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn config(&self) -> &HeapConfig {
        &self.config
    }

    pub fn capacity(&self) -> usize {
        self.config.max_capacity
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count >= self.capacity()
    }

    pub fn state(&self) -> HeapState {
        if self.sorted {
            HeapState::Sorted
        } else if self.count == 0 {
            HeapState::Empty
        } else {
            HeapState::Populated
        }
    }

    /// The whole backing arena, slot 0 included.
    pub fn slots(&self) -> &[Option<Ride>] {
        &self.slots
    }

    /// Occupied slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Ride> + '_ {
        self.slots[ROOT..=self.count].iter().flatten()
    }

    /// The earliest ride, without removing it.
    pub fn peek(&self) -> Option<&Ride> {
        if self.count == 0 {
            return None;
        }
        self.slots[ROOT].as_ref()
    }

    pub fn has_ride(&self, ride: &Ride) -> bool {
        self.contains_id(ride.id())
    }

    pub fn contains_id(&self, id: i64) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: i64) -> Option<&Ride> {
        self.index_of(id).and_then(|index| self.slots[index].as_ref())
    }

    /// Admits a ride, first trying to fold it into a ride already scheduled on
    /// the same route within the consolidation window.
    ///
    /// A refused ride is handed back inside the error.
    pub fn insert(&mut self, ride: Ride) -> Result<Admission, Rejected<Ride>> {
        if let Err(reason) = self.check_admissible(&ride) {
            self.report(
                &format!(
                    "Unable to insert ride! {reason}... Ride ID: {}, Ride Time: {}",
                    ride.id(),
                    describe_time(&ride)
                ),
                "insert",
            );
            return Err(Rejected::new(reason, ride));
        }

        let ride = if self.config.consolidate {
            match self.try_merge(ride) {
                Ok(admission) => return Ok(admission),
                Err(ride) => ride,
            }
        } else {
            ride
        };

        let id = ride.id();
        self.count += 1;
        self.slots[self.count] = Some(ride);
        let slot = self.sift_up(self.count);
        self.report(
            &format!("Inserted ride {id} at slot {slot}, {} of {} slots used", self.count, self.capacity()),
            "insert",
        );
        debug_assert!(self.is_heap_ordered());
        Ok(Admission::Admitted { slot })
    }

    /// Inserts every valid entry of a 0- or 1-based sequence.
    ///
    /// The whole batch is refused (and returned) if its length is outside
    /// `1..=capacity + 1` or it holds no valid ride. Otherwise empty and
    /// invalid entries are skipped and each ride goes through [`MinHeap::insert`].
    pub fn insert_all(
        &mut self,
        rides: Vec<Option<Ride>>,
    ) -> Result<BatchOutcome, Rejected<Vec<Option<Ride>>>> {
        let max = self.capacity() + 1;
        let reason = if self.sorted {
            Some(HeapError::NotHeapOrdered)
        } else if rides.is_empty() || rides.len() > max {
            Some(HeapError::InvalidLength {
                len: rides.len(),
                max,
            })
        } else if !rides.iter().flatten().any(Ride::is_valid) {
            Some(HeapError::NoValidRides)
        } else {
            None
        };
        if let Some(reason) = reason {
            self.report(&format!("Unable to add rides! {reason}"), "insert");
            return Err(Rejected::new(reason, rides));
        }

        let mut outcome = BatchOutcome::default();
        for ride in rides {
            match ride {
                Some(ride) if ride.is_valid() => match self.insert(ride) {
                    Ok(Admission::Admitted { .. }) => outcome.admitted += 1,
                    Ok(Admission::Merged { .. }) => outcome.merged += 1,
                    Err(rejected) => outcome.rejected.push(rejected),
                },
                _ => outcome.skipped += 1,
            }
        }
        Ok(outcome)
    }

    /// Removes the ride with the same id as `ride` and returns the heap's copy.
    pub fn remove(&mut self, ride: &Ride) -> Result<Ride, HeapError> {
        self.remove_by_id(ride.id())
    }

    pub fn remove_by_id(&mut self, id: i64) -> Result<Ride, HeapError> {
        if self.sorted {
            self.report("Unable to remove ride! Heap is sorted, re-heapify first", "remove");
            return Err(HeapError::NotHeapOrdered);
        }
        let Some(index) = self.index_of(id) else {
            self.report(
                &format!("Unable to remove ride {id} from the heap! Ride was not found..."),
                "remove",
            );
            return Err(HeapError::NotFound { id });
        };

        let last = self.count;
        if index != last {
            self.swap(index, last);
        }
        let removed = self.slots[last].take();
        self.count -= 1;
        if index != last {
            self.restore(index);
        }
        self.report(
            &format!("Removed ride {id} from slot {index}, {} rides remain", self.count),
            "remove",
        );
        debug_assert!(self.is_heap_ordered());
        removed.ok_or(HeapError::NotFound { id })
    }

    /// Adopts an externally built sequence and puts it in heap order.
    ///
    /// A sequence whose slot 0 is occupied is taken as 0-based and shifted one
    /// place right. After the shift exactly `ride_count` valid rides with
    /// distinct ids must occupy slots `1..=ride_count`. A refused sequence is
    /// returned unchanged.
    pub fn heapify(
        &mut self,
        ride_count: usize,
        mut rides: Vec<Option<Ride>>,
    ) -> Result<&[Option<Ride>], Rejected<Vec<Option<Ride>>>> {
        if let Err(reason) = self.check_layout(ride_count, &rides) {
            self.report(&format!("Unable to heapify rides! {reason}"), "heapify");
            return Err(Rejected::new(reason, rides));
        }

        if rides.first().is_some_and(Option::is_some) {
            rides.insert(0, None);
        }
        // Everything past ride_count is empty, so resizing drops nothing.
        rides.resize(self.capacity() + 1, None);

        self.slots = rides;
        self.count = ride_count;
        self.sorted = false;
        self.build_heap();
        self.report(&format!("Heapified {ride_count} rides"), "heapify");
        debug_assert!(self.is_heap_ordered());
        Ok(self.slots.as_slice())
    }

    /// Rebuilds heap order over the current contents. Leaves `Sorted` state.
    pub fn reheapify(&mut self) -> &[Option<Ride>] {
        self.sorted = false;
        self.build_heap();
        &self.slots
    }

    /// Heap-sorts the arena in place into ascending order over `1..=len()`.
    ///
    /// The heap keeps its rides and its count but is no longer a heap: call
    /// [`MinHeap::reheapify`] before inserting or removing again. Heaps with
    /// fewer than two rides are returned untouched.
    pub fn sort(&mut self) -> &[Option<Ride>] {
        if self.count < 2 {
            return &self.slots;
        }
        if !self.sorted {
            // Repeatedly move the current minimum behind the shrinking heap;
            // this leaves the range in descending order.
            for last in (2..=self.count).rev() {
                self.swap_within(ROOT, last, last);
                self.sift_down_within(ROOT, last - 1);
            }
            self.slots[ROOT..=self.count].reverse();
            self.sorted = true;
            self.report(&format!("Sorted {} rides", self.count), "sort");
        }
        &self.slots
    }

    /// Empties the heap, returning its rides in ascending time order.
    pub fn drain_sorted(&mut self) -> Vec<Ride> {
        self.sort();
        let rides = self.slots[ROOT..=self.count]
            .iter_mut()
            .filter_map(Option::take)
            .collect();
        self.count = 0;
        self.sorted = false;
        rides
    }

    /// True when every occupied slot is no earlier than its parent.
    pub fn is_heap_ordered(&self) -> bool {
        (ROOT + 1..=self.count).all(|index| !self.is_smaller(index, parent(index), self.count))
    }

    fn check_admissible(&self, ride: &Ride) -> Result<(), HeapError> {
        if self.sorted {
            return Err(HeapError::NotHeapOrdered);
        }
        if let Some(reason) = ride.invalid_reason() {
            return Err(HeapError::InvalidRide(reason.clone()));
        }
        if self.is_full() {
            return Err(HeapError::CapacityExceeded {
                capacity: self.capacity(),
            });
        }
        if self.has_ride(ride) {
            return Err(HeapError::DuplicateRide { id: ride.id() });
        }
        Ok(())
    }

    /// Folds `ride` into the first ride (in slot order) on the same route
    /// within the consolidation window. Gives the ride back when there is no
    /// candidate or the candidate cannot take its passengers.
    fn try_merge(&mut self, ride: Ride) -> Result<Admission, Ride> {
        let Some(time) = ride.valid_time() else {
            return Err(ride);
        };
        let candidate = (ROOT..=self.count).find(|&index| {
            self.slots[index].as_ref().is_some_and(|existing| {
                existing.same_route(&ride)
                    && existing.valid_time().is_some_and(|existing_time| {
                        RideTime::seconds_between(existing_time, time) <= CONSOLIDATION_WINDOW_SECS
                    })
            })
        });
        let Some(index) = candidate else {
            return Err(ride);
        };

        let Some(existing) = self.slots[index].as_mut() else {
            return Err(ride);
        };
        if let Err(reason) = existing.try_add_passengers(ride.passengers()) {
            let into = existing.id();
            self.report(
                &format!("Ride {} cannot join ride {into}: {reason}", ride.id()),
                "optimize",
            );
            return Err(ride);
        }
        if existing.valid_time().is_some_and(|existing_time| time > existing_time) {
            existing.reschedule(time);
        }
        let into = existing.id();

        let slot = self.restore(index);
        self.report(
            &format!("Merged ride {} into ride {into} at slot {slot}", ride.id()),
            "optimize",
        );
        debug_assert!(self.is_heap_ordered());
        Ok(Admission::Merged { into, slot })
    }

    fn check_layout(&self, ride_count: usize, rides: &[Option<Ride>]) -> Result<(), HeapError> {
        let max = self.capacity() + 1;
        if ride_count < 1 {
            return Err(HeapError::InvalidRideCount { ride_count });
        }
        if rides.is_empty() || rides.len() > max {
            return Err(HeapError::InvalidLength {
                len: rides.len(),
                max,
            });
        }
        if ride_count > self.capacity() {
            return Err(HeapError::CapacityExceeded {
                capacity: self.capacity(),
            });
        }

        let shift = usize::from(rides[0].is_some());
        let mut seen = HashSet::new();
        for (index, ride) in rides.iter().enumerate() {
            let Some(ride) = ride else { continue };
            let slot = index + shift;
            if slot > ride_count {
                return Err(HeapError::InvalidLayout(format!(
                    "ride {} would sit at slot {slot}, past ride count {ride_count}",
                    ride.id()
                )));
            }
            if let Some(reason) = ride.invalid_reason() {
                return Err(HeapError::InvalidRide(reason.clone()));
            }
            if !seen.insert(ride.id()) {
                return Err(HeapError::DuplicateRide { id: ride.id() });
            }
        }
        if seen.len() != ride_count {
            return Err(HeapError::InvalidLayout(format!(
                "expected {ride_count} rides, found {}",
                seen.len()
            )));
        }
        Ok(())
    }

    fn build_heap(&mut self) {
        // Deepest parent first, moving toward the root.
        for index in (ROOT..=self.count / 2).rev() {
            self.sift_down(index);
        }
    }

    fn index_of(&self, id: i64) -> Option<usize> {
        (ROOT..=self.count).find(|&index| {
            self.slots[index]
                .as_ref()
                .is_some_and(|ride| ride.id() == id)
        })
    }

    /// Moves the ride at `index` to wherever heap order needs it; returns its final slot.
    fn restore(&mut self, index: usize) -> usize {
        let index = self.sift_up(index);
        self.sift_down(index)
    }

    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > ROOT && self.is_smaller(index, parent(index), self.count) {
            self.swap(index, parent(index));
            index = parent(index);
        }
        index
    }

    fn sift_down(&mut self, index: usize) -> usize {
        self.sift_down_within(index, self.count)
    }

    /// Down-heap limited to slots `1..=len`.
    fn sift_down_within(&mut self, mut index: usize, len: usize) -> usize {
        loop {
            let (left_child, right_child) = (left(index), right(index));
            if left_child > len {
                return index;
            }
            let smaller = if right_child <= len && self.is_smaller(right_child, left_child, len) {
                right_child
            } else {
                left_child
            };
            if !self.is_smaller(smaller, index, len) {
                return index;
            }
            self.swap_within(smaller, index, len);
            index = smaller;
        }
    }

    fn is_valid_index(index: usize, len: usize) -> bool {
        (ROOT..=len).contains(&index)
    }

    /// Out-of-range slots and incomparable rides are never smaller.
    fn is_smaller(&self, a: usize, b: usize, len: usize) -> bool {
        if !Self::is_valid_index(a, len) || !Self::is_valid_index(b, len) {
            return false;
        }
        match (&self.slots[a], &self.slots[b]) {
            (Some(x), Some(y)) => x.compare_to(y).is_ok_and(|order| order.is_lt()),
            _ => false,
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.swap_within(a, b, self.count);
    }

    fn swap_within(&mut self, a: usize, b: usize, len: usize) {
        if !Self::is_valid_index(a, len) || !Self::is_valid_index(b, len) {
            self.report(
                &format!("Unable to swap slots {a} and {b}! Index out of bounds, heap size {len}"),
                "swap",
            );
            return;
        }
        self.slots.swap(a, b);
    }

    fn report(&self, message: &str, origin: &str) {
        self.diagnostics.report(message, origin);
    }
}

fn describe_time(ride: &Ride) -> String {
    ride.time()
        .map(|time| time.to_string())
        .unwrap_or_else(|| "null".to_string())
}
