use ride_heap::test_helpers::solo_ride;
use ride_heap::{MinHeap, Ride};

/// The four fixture rides: ride N at 0N:00:00 on route N -> N + 1.
pub fn default_rides() -> [Ride; 4] {
    [
        solo_ride(1, "01:00:00"),
        solo_ride(2, "02:00:00"),
        solo_ride(3, "03:00:00"),
        solo_ride(4, "04:00:00"),
    ]
}

/// Heap built by inserting 03:00, 01:00, 04:00, 02:00 in that order.
pub fn scenario_heap() -> MinHeap {
    let [r1, r2, r3, r4] = default_rides();
    let mut heap = MinHeap::new();
    for ride in [r3, r1, r4, r2] {
        heap.insert(ride).expect("fixture ride should insert");
    }
    heap
}

/// Ids of the occupied slots in slot order.
pub fn slot_ids(heap: &MinHeap) -> Vec<i64> {
    heap.iter().map(Ride::id).collect()
}

pub fn slot_times(slots: &[Option<Ride>]) -> Vec<String> {
    slots
        .iter()
        .flatten()
        .filter_map(Ride::time)
        .map(|time| time.to_string())
        .collect()
}
