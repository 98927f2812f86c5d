//! Serializable ride shape used at the edges (files, JSON output).

use serde::{Deserialize, Serialize};

use crate::ride::Ride;

/// Either a single passenger name or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PassengerList {
    One(String),
    Many(Vec<String>),
}

impl PassengerList {
    pub fn names(&self) -> &[String] {
        match self {
            PassengerList::One(name) => std::slice::from_ref(name),
            PassengerList::Many(names) => names,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideRecord {
    pub id: i64,
    pub time: String,
    pub passengers: PassengerList,
    pub start_id: i64,
    pub end_id: i64,
}

impl RideRecord {
    /// Runs the usual ride validation; the result may be an invalid ride.
    pub fn into_ride(self) -> Ride {
        Ride::new(
            self.id,
            &self.time,
            self.passengers.names(),
            self.start_id,
            self.end_id,
        )
    }
}

impl From<&Ride> for RideRecord {
    fn from(ride: &Ride) -> Self {
        Self {
            id: ride.id(),
            time: ride.time().map(|t| t.to_string()).unwrap_or_default(),
            passengers: PassengerList::Many(ride.passengers().to_vec()),
            start_id: ride.start_id(),
            end_id: ride.end_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_single_name_or_list() {
        let single: RideRecord = serde_json::from_str(
            r#"{"id": 9, "time": "07:00:00", "passengers": "Test 19", "start_id": 420, "end_id": 6969}"#,
        )
        .unwrap();
        let ride = single.into_ride();
        assert!(ride.is_valid());
        assert_eq!(ride.passengers(), ["Test 19"]);

        let many: RideRecord = serde_json::from_str(
            r#"{"id": 89, "time": "6:6:6", "passengers": ["Test 17", "Test 18"], "start_id": 80, "end_id": 420000}"#,
        )
        .unwrap();
        assert_eq!(many.into_ride().passenger_count(), 2);
    }

    #[test]
    fn record_from_ride_uses_canonical_time() {
        let ride = Ride::new(5, "6:6:6", ["A"], 1, 2);
        let record = RideRecord::from(&ride);
        assert_eq!(record.time, "06:06:06");
        assert_eq!(record.clone().into_ride(), ride);
    }
}
