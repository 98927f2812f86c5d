//! Builds a small morning schedule, shows consolidation, then prints the
//! rides in departure order.
//!
//! Run with `RUST_LOG=ride_heap=debug` to see the heap's trace output.

use ride_heap::{Admission, LogDiagnostics, MinHeap, Ride};

fn main() {
    env_logger::init();

    let mut heap = MinHeap::new().with_diagnostics(Box::new(LogDiagnostics));
    let requests = [
        Ride::new(1, "08:15:00", ["Ada"], 10, 20),
        Ride::new(2, "07:45:00", ["Grace", "Edsger"], 11, 30),
        Ride::new(3, "08:20:00", ["Barbara"], 10, 20),
        Ride::new(4, "06:30:00", ["Ken"], 12, 40),
        Ride::new(5, "25:00:00", ["Nobody"], 1, 2),
    ];

    for ride in requests {
        let id = ride.id();
        match heap.insert(ride) {
            Ok(Admission::Admitted { slot }) => println!("ride {id}: admitted at slot {slot}"),
            Ok(Admission::Merged { into, slot }) => {
                println!("ride {id}: merged into ride {into} (slot {slot})")
            }
            Err(rejected) => println!("ride {id}: refused, {rejected}"),
        }
    }

    println!();
    for ride in heap.drain_sorted() {
        println!("{ride}");
    }
}
