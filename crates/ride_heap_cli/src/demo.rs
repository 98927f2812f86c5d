//! The sample scenario: a morning of requests, some on shared routes.

use std::io::Write;

use ride_heap::{Admission, MinHeap, Ride};

use crate::printer::{render_array, render_tree, Label};

/// The demo's ride requests in arrival order.
///
/// Rides 44 and 78 share a route with ride 42 and arrive within ten minutes
/// of it, so they merge into it; 2345 merges into 1147 the same way. The
/// second ride numbered 1 is a duplicate and is refused.
pub fn sample_rides() -> Vec<Ride> {
    vec![
        Ride::new(3, "03:00:00", ["Passenger 3"], 3, 4),
        Ride::new(1, "01:00:00", ["Passenger 1"], 1, 2),
        Ride::new(4, "04:00:00", ["Passenger 4"], 4, 5),
        Ride::new(2, "02:00:00", ["Passenger 2"], 2, 3),
        Ride::new(42, "08:00:02", ["pass2"], 420, 6969),
        Ride::new(44, "08:05:00", ["p5"], 420, 6969),
        Ride::new(89, "6:6:6", ["Test 17", "Test 18", "Test 19"], 80, 420000),
        Ride::new(78, "08:09:00", ["Test 20", "Test 21", "Test 22"], 420, 6969),
        Ride::new(1, "08:09:00", ["Test 223", "Test 221", "Test 220"], 420, 6969),
        Ride::new(99, "07:00:00", ["Test 19"], 420, 6969),
        Ride::new(1145, "14:10:00", ["p1"], 435, 4),
        Ride::new(1147, "10:10:10", ["p2"], 420, 500),
        Ride::new(2345, "10:15:15", ["p3"], 420, 500),
    ]
}

/// Inserts the sample rides, prints the heap, sorts it and prints it again.
pub fn run_demo(heap: &mut MinHeap, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Inserting {} ride requests...", sample_rides().len())?;
    for ride in sample_rides() {
        let id = ride.id();
        match heap.insert(ride) {
            Ok(Admission::Admitted { slot }) => writeln!(out, "  ride {id}: slot {slot}")?,
            Ok(Admission::Merged { into, slot }) => {
                writeln!(out, "  ride {id}: merged into ride {into} at slot {slot}")?
            }
            Err(rejected) => writeln!(out, "  ride {id}: refused ({rejected})")?,
        }
    }

    writeln!(out, "\nPrinting Heap...\n")?;
    write!(out, "{}", render_tree(heap.slots(), Label::Id))?;
    writeln!(out)?;
    write!(out, "{}", render_tree(heap.slots(), Label::Time))?;

    writeln!(out, "\nSorting...\n")?;
    write!(out, "{}", render_array(heap.sort()))?;
    Ok(())
}
