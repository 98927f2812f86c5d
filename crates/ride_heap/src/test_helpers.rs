//! Test helpers shared by unit tests, integration tests and benches.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::heap::MinHeap;
use crate::ride::Ride;
use crate::time::RideTime;

/// A one-passenger ride named after its id.
pub fn ride_at(id: i64, time: &str, start_id: i64, end_id: i64) -> Ride {
    Ride::new(id, time, [format!("Passenger {id}")], start_id, end_id)
}

/// A ride on its own route (`id -> id + 1`), so it never consolidates.
pub fn solo_ride(id: i64, time: &str) -> Ride {
    ride_at(id, time, id, id + 1)
}

/// Panics with the offending slot if heap order or id uniqueness is broken.
pub fn assert_heap_invariants(heap: &MinHeap) {
    let slots = heap.slots();
    assert!(slots[0].is_none(), "slot 0 must stay empty");
    assert!(heap.len() <= heap.capacity(), "count exceeds capacity");
    for index in 2..=heap.len() {
        let (child, parent) = match (&slots[index], &slots[index / 2]) {
            (Some(child), Some(parent)) => (child, parent),
            _ => panic!("slot {index} or its parent is empty inside the occupied range"),
        };
        assert!(
            child.time() >= parent.time(),
            "slot {index} ({:?}) is earlier than its parent ({:?})",
            child.time(),
            parent.time()
        );
    }
    assert!(
        slots[heap.len() + 1..].iter().all(Option::is_none),
        "occupied slot past count"
    );
    let ids: HashSet<i64> = heap.iter().map(Ride::id).collect();
    assert_eq!(ids.len(), heap.len(), "duplicate ride ids in heap");
}

/// Seeded rides with distinct ids, random times and routes drawn from
/// `route_pool` start/end locations (a small pool makes consolidation likely).
pub fn random_rides(seed: u64, count: usize, route_pool: i64) -> Vec<Ride> {
    let mut rng = StdRng::seed_from_u64(seed);
    (1..=count as i64)
        .map(|id| {
            let time = RideTime::from_hms(
                rng.gen_range(0..24),
                rng.gen_range(0..60),
                rng.gen_range(0..60),
            )
            .unwrap_or(RideTime::MIDNIGHT);
            let passengers = rng.gen_range(1..=3);
            let names: Vec<String> = (0..passengers).map(|n| format!("Rider {id}-{n}")).collect();
            Ride::with_time(
                id,
                time,
                names,
                rng.gen_range(1..=route_pool),
                rng.gen_range(1..=route_pool),
            )
        })
        .collect()
}
