//! Seeded random ride records for experiments.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ride_heap::{PassengerList, RideRecord, RideTime, MAX_PASSENGERS};

/// Parameters for [`generate_records`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorParams {
    pub count: usize,
    pub seed: u64,
    /// Distinct pickup and dropoff locations. A small pool makes
    /// same-route rides, and therefore consolidation, common.
    pub locations: i64,
    /// Upper bound on passengers per generated ride.
    pub max_passengers: usize,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            count: 20,
            seed: 42,
            locations: 5,
            max_passengers: 3,
        }
    }
}

impl GeneratorParams {
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_locations(mut self, locations: i64) -> Self {
        self.locations = locations;
        self
    }
}

/// Same params, same records. Ids run from 1 to `count`.
pub fn generate_records(params: GeneratorParams) -> Vec<RideRecord> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let locations = params.locations.max(1);
    let max_passengers = params.max_passengers.clamp(1, MAX_PASSENGERS);

    (1..=params.count as i64)
        .map(|id| {
            let seconds = rng.gen_range(0..24 * 60 * 60);
            let time = RideTime::from_hms(seconds / 3600, seconds / 60 % 60, seconds % 60)
                .unwrap_or(RideTime::MIDNIGHT);
            let passengers = rng.gen_range(1..=max_passengers);
            let start_id = rng.gen_range(1..=locations);
            let end_id = rng.gen_range(1..=locations);
            RideRecord {
                id,
                time: time.to_string(),
                passengers: PassengerList::Many(
                    (1..=passengers).map(|n| format!("Passenger {id}-{n}")).collect(),
                ),
                start_id,
                end_id,
            }
        })
        .collect()
}
