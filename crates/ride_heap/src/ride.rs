//! Ride requests: one vehicle booking from a start location to an end location.

use std::cmp::Ordering;
use std::fmt;

use crate::config::MAX_PASSENGERS;
use crate::error::RideError;
use crate::time::RideTime;

/// A scheduling request. Construction never fails, but a ride that breaks
/// any rule is permanently invalid and no heap will admit it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ride {
    id: i64,
    time: Option<RideTime>,
    passengers: Vec<String>,
    start_id: i64,
    end_id: i64,
    invalid: Option<RideError>,
}

impl Ride {
    /// Builds a ride, parsing `time` as `HH:MM:SS`. Check [`Ride::is_valid`] afterwards.
    pub fn new<I, S>(id: i64, time: &str, passengers: I, start_id: i64, end_id: i64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let time = RideTime::parse(time);
        Self::build(id, time, passengers, start_id, end_id)
    }

    pub fn with_time<I, S>(id: i64, time: RideTime, passengers: I, start_id: i64, end_id: i64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build(id, Ok(time), passengers, start_id, end_id)
    }

    /// Like [`Ride::new`] but surfaces the first validation failure as an error.
    pub fn try_new<I, S>(
        id: i64,
        time: &str,
        passengers: I,
        start_id: i64,
        end_id: i64,
    ) -> Result<Self, RideError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ride = Self::new(id, time, passengers, start_id, end_id);
        match ride.invalid {
            Some(reason) => Err(reason),
            None => Ok(ride),
        }
    }

    fn build<I, S>(
        id: i64,
        time: Result<RideTime, RideError>,
        passengers: I,
        start_id: i64,
        end_id: i64,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ride = Self {
            id,
            time: None,
            passengers: Vec::new(),
            start_id,
            end_id,
            invalid: None,
        };
        // Validation stops at the first broken rule.
        let validated = validate_id(id)
            .and_then(|_| time)
            .and_then(|time| validate_passengers(passengers).map(|names| (time, names)))
            .and_then(|fields| validate_locations(start_id, end_id).map(|_| fields));
        match validated {
            Ok((time, names)) => {
                ride.time = Some(time);
                ride.passengers = names;
            }
            Err(reason) => ride.invalid = Some(reason),
        }
        ride
    }

    pub fn is_valid(&self) -> bool {
        self.invalid.is_none()
    }

    pub fn invalid_reason(&self) -> Option<&RideError> {
        self.invalid.as_ref()
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// `None` only for invalid rides.
    pub fn time(&self) -> Option<RideTime> {
        self.time
    }

    pub fn passengers(&self) -> &[String] {
        &self.passengers
    }

    pub fn passenger_count(&self) -> usize {
        self.passengers.len()
    }

    pub fn start_id(&self) -> i64 {
        self.start_id
    }

    pub fn end_id(&self) -> i64 {
        self.end_id
    }

    /// True when both rides travel between the same two locations.
    pub fn same_route(&self, other: &Ride) -> bool {
        self.start_id == other.start_id && self.end_id == other.end_id
    }

    /// Orders by scheduled time only. Equal times compare equal regardless of
    /// any other field.
    pub fn compare_to(&self, other: &Ride) -> Result<Ordering, RideError> {
        match (self.valid_time(), other.valid_time()) {
            (Some(a), Some(b)) => Ok(a.cmp(&b)),
            _ => Err(RideError::InvalidRide),
        }
    }

    /// Appends one passenger. Returns false (leaving the ride unchanged) when
    /// the name is blank, contains a comma, or the vehicle is full.
    pub fn add_passenger(&mut self, name: &str) -> bool {
        self.try_add_passenger(name).is_ok()
    }

    pub fn try_add_passenger(&mut self, name: &str) -> Result<(), RideError> {
        self.try_add_passengers([name])
    }

    /// Appends every non-blank name or none of them.
    pub fn add_passengers<I, S>(&mut self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.try_add_passengers(names).is_ok()
    }

    pub fn try_add_passengers<I, S>(&mut self, names: I) -> Result<(), RideError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.is_valid() {
            return Err(RideError::InvalidRide);
        }
        let mut incoming = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            check_name(name)?;
            incoming.push(name.to_string());
        }
        if incoming.is_empty() {
            return Err(RideError::BlankPassenger);
        }
        let count = self.passengers.len() + incoming.len();
        if count > MAX_PASSENGERS {
            return Err(RideError::TooManyPassengers {
                count,
                max: MAX_PASSENGERS,
            });
        }
        self.passengers.extend(incoming);
        Ok(())
    }

    pub(crate) fn valid_time(&self) -> Option<RideTime> {
        if self.is_valid() {
            self.time
        } else {
            None
        }
    }

    pub(crate) fn reschedule(&mut self, time: RideTime) {
        self.time = Some(time);
    }
}

impl fmt::Display for Ride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Ride {:03} -------", self.id)?;
        match self.time {
            Some(time) => writeln!(f, "Time: {time}")?,
            None => writeln!(f, "Time: null")?,
        }
        writeln!(f, "Start ID: {}", self.start_id)?;
        writeln!(f, "End ID: {}", self.end_id)?;
        writeln!(f, "Passengers:")?;
        for name in &self.passengers {
            writeln!(f, "{name}")?;
        }
        f.write_str("--------------------")
    }
}

fn validate_id(id: i64) -> Result<(), RideError> {
    if id > 0 {
        Ok(())
    } else {
        Err(RideError::InvalidId(id))
    }
}

fn validate_passengers<I, S>(passengers: I) -> Result<Vec<String>, RideError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut names = Vec::new();
    for name in passengers {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(RideError::BlankPassenger);
        }
        check_name(name)?;
        names.push(name.to_string());
    }
    match names.len() {
        0 => Err(RideError::NoPassengers),
        count if count > MAX_PASSENGERS => Err(RideError::TooManyPassengers {
            count,
            max: MAX_PASSENGERS,
        }),
        _ => Ok(names),
    }
}

fn check_name(name: &str) -> Result<(), RideError> {
    if name.contains(',') {
        Err(RideError::AmbiguousPassenger(name.to_string()))
    } else {
        Ok(())
    }
}

fn validate_locations(start_id: i64, end_id: i64) -> Result<(), RideError> {
    if start_id > 0 && end_id > 0 {
        Ok(())
    } else {
        Err(RideError::InvalidLocation { start_id, end_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Ride {
        Ride::new(1, "01:00:00", ["Passenger 1"], 1, 2)
    }

    #[test]
    fn valid_ride_keeps_trimmed_fields() {
        let ride = Ride::new(7, "08:05:00", ["  Ana ", "Bo"], 3, 4);
        assert!(ride.is_valid());
        assert_eq!(ride.time(), Some(RideTime::from_hms(8, 5, 0).unwrap()));
        assert_eq!(ride.passengers(), ["Ana", "Bo"]);
        assert_eq!((ride.start_id(), ride.end_id()), (3, 4));
    }

    #[test]
    fn validation_reports_first_failure() {
        let bad_id_and_time = Ride::new(0, "25:00:00", ["A"], 1, 1);
        assert_eq!(bad_id_and_time.invalid_reason(), Some(&RideError::InvalidId(0)));

        let bad_time = Ride::new(1, "12:61:00", ["A"], 1, 1);
        assert!(matches!(bad_time.invalid_reason(), Some(RideError::InvalidTime(_))));
        assert_eq!(bad_time.time(), None);

        let no_names = Ride::new(1, "12:00:00", Vec::<String>::new(), 1, 1);
        assert_eq!(no_names.invalid_reason(), Some(&RideError::NoPassengers));

        let seven = Ride::new(1, "12:00:00", ["a", "b", "c", "d", "e", "f", "g"], 1, 1);
        assert_eq!(
            seven.invalid_reason(),
            Some(&RideError::TooManyPassengers { count: 7, max: 6 })
        );

        let blank = Ride::new(1, "12:00:00", ["a", "   "], 1, 1);
        assert_eq!(blank.invalid_reason(), Some(&RideError::BlankPassenger));

        let comma = Ride::new(1, "12:00:00", ["a, b"], 1, 1);
        assert_eq!(
            comma.invalid_reason(),
            Some(&RideError::AmbiguousPassenger("a, b".to_string()))
        );

        let bad_location = Ride::new(1, "12:00:00", ["a"], 0, 5);
        assert_eq!(
            bad_location.invalid_reason(),
            Some(&RideError::InvalidLocation { start_id: 0, end_id: 5 })
        );
        assert!(bad_location.passengers().is_empty());
    }

    #[test]
    fn try_new_surfaces_reason() {
        assert!(Ride::try_new(3, "03:00:00", ["C"], 3, 4).is_ok());
        assert_eq!(
            Ride::try_new(-3, "03:00:00", ["C"], 3, 4),
            Err(RideError::InvalidId(-3))
        );
    }

    #[test]
    fn compare_to_uses_time_only() {
        let early = sample();
        let late = Ride::new(2, "02:00:00", ["Passenger 2"], 1, 2);
        let same_time = Ride::new(9, "01:00:00", ["Other"], 8, 9);

        assert_eq!(early.compare_to(&late), Ok(Ordering::Less));
        assert_eq!(late.compare_to(&early), Ok(Ordering::Greater));
        assert_eq!(early.compare_to(&same_time), Ok(Ordering::Equal));
    }

    #[test]
    fn compare_to_refuses_invalid_rides() {
        let invalid = Ride::new(0, "01:00:00", ["x"], 1, 2);
        assert_eq!(sample().compare_to(&invalid), Err(RideError::InvalidRide));
        assert_eq!(invalid.compare_to(&sample()), Err(RideError::InvalidRide));
    }

    #[test]
    fn add_passenger_respects_capacity_and_names() {
        let mut ride = Ride::new(1, "01:00:00", ["a", "b", "c", "d", "e"], 1, 2);
        assert!(!ride.add_passenger("   "));
        assert!(!ride.add_passenger("x,y"));
        assert!(ride.add_passenger(" f "));
        assert_eq!(ride.passenger_count(), MAX_PASSENGERS);
        assert!(!ride.add_passenger("g"));
        assert_eq!(ride.passengers().last().map(String::as_str), Some("f"));
    }

    #[test]
    fn add_passengers_is_all_or_nothing() {
        let mut ride = Ride::new(1, "01:00:00", ["a", "b", "c", "d"], 1, 2);
        let before = ride.clone();

        assert!(!ride.add_passengers(["e", "f", "g"]));
        assert_eq!(ride, before);

        assert!(!ride.add_passengers(["e", "bad,name"]));
        assert_eq!(ride, before);

        assert!(!ride.add_passengers(["", "  "]));
        assert_eq!(ride, before);

        assert!(ride.add_passengers(["e", "", "f"]));
        assert_eq!(ride.passengers(), ["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn invalid_rides_do_not_grow() {
        let mut ride = Ride::new(1, "99:00:00", ["a"], 1, 2);
        assert!(!ride.add_passenger("b"));
        assert!(ride.passengers().is_empty());
    }

    #[test]
    fn display_matches_fixed_layout() {
        let ride = Ride::new(42, "8:0:2", ["pass1", "pass2"], 420, 6969);
        assert_eq!(
            ride.to_string(),
            "--- Ride 042 -------\n\
             Time: 08:00:02\n\
             Start ID: 420\n\
             End ID: 6969\n\
             Passengers:\n\
             pass1\n\
             pass2\n\
             --------------------"
        );
    }
}
