//! Error types for ride validation and heap operations.
//!
//! Every condition here is recoverable: the heap reports it and leaves its
//! state untouched.

use std::fmt;

/// Why a ride failed validation (or why a ride operation was refused).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RideError {
    InvalidId(i64),
    InvalidTime(String),
    NoPassengers,
    TooManyPassengers { count: usize, max: usize },
    BlankPassenger,
    /// A single name containing a comma, which would read as several names.
    AmbiguousPassenger(String),
    InvalidLocation { start_id: i64, end_id: i64 },
    /// Comparison involving a ride that never passed validation.
    InvalidRide,
}

impl fmt::Display for RideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RideError::InvalidId(id) => write!(f, "invalid ride id {id}, must be positive"),
            RideError::InvalidTime(raw) => {
                write!(f, "invalid ride time '{raw}', expected HH:MM:SS within 00:00:00-23:59:59")
            }
            RideError::NoPassengers => f.write_str("a ride needs at least one passenger"),
            RideError::TooManyPassengers { count, max } => {
                write!(f, "{count} passengers exceeds the limit of {max} per ride")
            }
            RideError::BlankPassenger => f.write_str("passenger names cannot be blank"),
            RideError::AmbiguousPassenger(name) => {
                write!(f, "passenger name '{name}' contains a comma")
            }
            RideError::InvalidLocation { start_id, end_id } => write!(
                f,
                "invalid locations start={start_id} end={end_id}, both must be positive"
            ),
            RideError::InvalidRide => f.write_str("cannot compare an invalid ride"),
        }
    }
}

impl std::error::Error for RideError {}

/// Coarse classification of heap failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    CapacityExceeded,
    DuplicateEntry,
    NotFound,
    /// The heap was sorted in place and must be re-heapified first.
    InvalidState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeapError {
    InvalidRide(RideError),
    MissingRide,
    CapacityExceeded { capacity: usize },
    DuplicateRide { id: i64 },
    NotFound { id: i64 },
    InvalidLength { len: usize, max: usize },
    InvalidRideCount { ride_count: usize },
    NoValidRides,
    InvalidLayout(String),
    NotHeapOrdered,
}

impl HeapError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HeapError::InvalidRide(_)
            | HeapError::MissingRide
            | HeapError::InvalidRideCount { .. }
            | HeapError::NoValidRides
            | HeapError::InvalidLayout(_) => ErrorKind::InvalidInput,
            HeapError::CapacityExceeded { .. } | HeapError::InvalidLength { .. } => {
                ErrorKind::CapacityExceeded
            }
            HeapError::DuplicateRide { .. } => ErrorKind::DuplicateEntry,
            HeapError::NotFound { .. } => ErrorKind::NotFound,
            HeapError::NotHeapOrdered => ErrorKind::InvalidState,
        }
    }
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::InvalidRide(reason) => write!(f, "ride is invalid: {reason}"),
            HeapError::MissingRide => f.write_str("no ride was given"),
            HeapError::CapacityExceeded { capacity } => {
                write!(f, "maximum ride limit reached (capacity {capacity})")
            }
            HeapError::DuplicateRide { id } => write!(f, "ride {id} is already in the heap"),
            HeapError::NotFound { id } => write!(f, "ride {id} was not found in the heap"),
            HeapError::InvalidLength { len, max } => {
                write!(f, "sequence length {len} is outside 1..={max}")
            }
            HeapError::InvalidRideCount { ride_count } => {
                write!(f, "invalid ride count {ride_count}")
            }
            HeapError::NoValidRides => f.write_str("sequence contains no valid ride"),
            HeapError::InvalidLayout(detail) => write!(f, "invalid heap layout: {detail}"),
            HeapError::NotHeapOrdered => {
                f.write_str("heap was sorted in place; re-heapify before modifying it")
            }
        }
    }
}

impl std::error::Error for HeapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HeapError::InvalidRide(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<RideError> for HeapError {
    fn from(err: RideError) -> Self {
        HeapError::InvalidRide(err)
    }
}

/// A refused operation that hands its owned input back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected<T> {
    pub reason: HeapError,
    pub input: T,
}

impl<T> Rejected<T> {
    pub fn new(reason: HeapError, input: T) -> Self {
        Self { reason, input }
    }

    pub fn kind(&self) -> ErrorKind {
        self.reason.kind()
    }

    pub fn into_input(self) -> T {
        self.input
    }
}

impl<T> fmt::Display for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.reason, f)
    }
}

impl<T: fmt::Debug> std::error::Error for Rejected<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_errors_map_onto_taxonomy() {
        assert_eq!(HeapError::MissingRide.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            HeapError::InvalidLength { len: 30, max: 21 }.kind(),
            ErrorKind::CapacityExceeded
        );
        assert_eq!(HeapError::DuplicateRide { id: 4 }.kind(), ErrorKind::DuplicateEntry);
        assert_eq!(HeapError::NotFound { id: 4 }.kind(), ErrorKind::NotFound);
        assert_eq!(HeapError::NotHeapOrdered.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn rejected_displays_reason_and_returns_input() {
        let rejected = Rejected::new(HeapError::CapacityExceeded { capacity: 20 }, 7usize);
        assert_eq!(rejected.to_string(), "maximum ride limit reached (capacity 20)");
        assert_eq!(rejected.into_input(), 7);
    }
}
