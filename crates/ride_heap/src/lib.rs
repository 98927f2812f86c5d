//! Bounded priority queue of ride requests ordered by scheduled time.
//!
//! [`MinHeap`] admits validated [`Ride`]s, merges rides that share a route and
//! leave within [`CONSOLIDATION_WINDOW_MINUTES`] of each other, and supports
//! removal by id, bulk heapify of external sequences and in-place heap sort.
//!
//! ```
//! use ride_heap::{MinHeap, Ride};
//!
//! let mut heap = MinHeap::new();
//! heap.insert(Ride::new(3, "03:00:00", ["Cleo"], 3, 4)).unwrap();
//! heap.insert(Ride::new(1, "01:00:00", ["Ada"], 1, 2)).unwrap();
//! assert_eq!(heap.peek().map(Ride::id), Some(1));
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod heap;
pub mod record;
pub mod ride;
pub mod time;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use config::{
    HeapConfig, CONSOLIDATION_WINDOW_MINUTES, DEFAULT_MAX_CAPACITY, MAX_PASSENGERS,
};
pub use diagnostics::{Diagnostics, LogDiagnostics, NoopDiagnostics, RecordingDiagnostics};
pub use error::{ErrorKind, HeapError, Rejected, RideError};
pub use heap::{Admission, BatchOutcome, HeapState, MinHeap};
pub use record::{PassengerList, RideRecord};
pub use ride::Ride;
pub use time::RideTime;
