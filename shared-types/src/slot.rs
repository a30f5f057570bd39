use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::appointment::Appointment;

/// Number of days after today covered by one generated week.
pub const DAYS_AHEAD: i64 = 7;

/// Probability that a simulated slot comes out available.
pub const SIMULATED_AVAILABILITY: f64 = 0.7;

const MORNING_STARTS: [(u32, u32); 6] = [(9, 0), (9, 30), (10, 0), (10, 30), (11, 0), (11, 30)];
const AFTERNOON_STARTS: [(u32, u32); 8] = [
    (14, 0),
    (14, 30),
    (15, 0),
    (15, 30),
    (16, 0),
    (16, 30),
    (17, 0),
    (17, 30),
];

/// A candidate appointment start time.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub id: String,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub start: NaiveTime,
    pub available: bool,
}

impl TimeSlot {
    pub fn new(date: NaiveDate, start: NaiveTime, available: bool) -> Self {
        TimeSlot {
            id: format!("{}T{}", date.format("%Y-%m-%d"), start.format("%H:%M")),
            date,
            start,
            available,
        }
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start)
    }

    pub fn is_morning(&self) -> bool {
        self.start.hour() < 12
    }

    pub fn label(&self) -> String {
        self.start.format("%H:%M").to_string()
    }
}

/// Decides whether a candidate slot can be offered.
pub trait AvailabilityOracle {
    fn is_available(&mut self, date: NaiveDate, start: NaiveTime) -> bool;
}

/// Coin-flip availability used for demos: each slot is independently
/// available with probability [`SIMULATED_AVAILABILITY`]. Two calls for the
/// same slot may disagree.
pub struct SimulatedAvailability<R: Rng = SmallRng> {
    rng: R,
}

impl SimulatedAvailability<SmallRng> {
    pub fn from_entropy() -> Self {
        SimulatedAvailability {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        SimulatedAvailability {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> AvailabilityOracle for SimulatedAvailability<R> {
    fn is_available(&mut self, _date: NaiveDate, _start: NaiveTime) -> bool {
        self.rng.gen_bool(SIMULATED_AVAILABILITY)
    }
}

/// Availability derived from a professional's stored appointments.
///
/// A slot is taken when its start instant falls inside any appointment that
/// still occupies the calendar, or when it starts before `now`.
pub struct BookedAvailability<'a> {
    appointments: &'a [Appointment],
    now: NaiveDateTime,
}

impl<'a> BookedAvailability<'a> {
    pub fn new(appointments: &'a [Appointment], now: NaiveDateTime) -> Self {
        BookedAvailability { appointments, now }
    }
}

impl AvailabilityOracle for BookedAvailability<'_> {
    fn is_available(&mut self, date: NaiveDate, start: NaiveTime) -> bool {
        let instant = date.and_time(start);
        if instant < self.now {
            return false;
        }
        !self
            .appointments
            .iter()
            .any(|a| a.status.occupies_calendar() && a.covers(instant))
    }
}

/// Start times offered on every open day, morning block first.
pub fn daily_start_times() -> Vec<NaiveTime> {
    MORNING_STARTS
        .iter()
        .chain(AFTERNOON_STARTS.iter())
        .filter_map(|&(h, m)| NaiveTime::from_hms_opt(h, m, 0))
        .collect()
}

/// Whether `at` is a start time the generator would ever offer.
pub fn is_offered_start(at: NaiveDateTime) -> bool {
    at.weekday() != Weekday::Sun && at.second() == 0 && daily_start_times().contains(&at.time())
}

/// Candidate slots for `today + 1 ..= today + 7`, Sundays excluded.
pub fn generate_week(today: NaiveDate, oracle: &mut impl AvailabilityOracle) -> Vec<TimeSlot> {
    let starts = daily_start_times();
    let mut slots = Vec::with_capacity(starts.len() * DAYS_AHEAD as usize);

    for offset in 1..=DAYS_AHEAD {
        let date = today + Duration::days(offset);
        if date.weekday() == Weekday::Sun {
            continue;
        }
        for &start in &starts {
            let available = oracle.is_available(date, start);
            slots.push(TimeSlot::new(date, start, available));
        }
    }

    slots
}

/// Splits an ordered slot list into one group per calendar day.
pub fn group_by_day(slots: Vec<TimeSlot>) -> Vec<(NaiveDate, Vec<TimeSlot>)> {
    let mut days: Vec<(NaiveDate, Vec<TimeSlot>)> = Vec::new();
    for slot in slots {
        match days.last_mut() {
            Some((date, day)) if *date == slot.date => day.push(slot),
            _ => days.push((slot.date, vec![slot])),
        }
    }
    days
}

mod hh_mm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::AppointmentStatus;
    use std::collections::BTreeMap;

    struct AlwaysOpen;

    impl AvailabilityOracle for AlwaysOpen {
        fn is_available(&mut self, _date: NaiveDate, _start: NaiveTime) -> bool {
            true
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grouping_keeps_day_order_and_sizes() {
        // 2024-01-13 is a Saturday, so the week skips the 14th.
        let slots = generate_week(date(2024, 1, 13), &mut AlwaysOpen);
        let days = group_by_day(slots);
        assert_eq!(days.len(), 6);
        assert_eq!(days[0].0, date(2024, 1, 15));
        assert!(days.iter().all(|(_, day)| day.len() == 14));
        assert!(days.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn never_generates_sundays_for_any_start_day() {
        let mut oracle = SimulatedAvailability::seeded(11);
        for offset in 0..14 {
            let today = date(2024, 1, 1) + Duration::days(offset);
            let slots = generate_week(today, &mut oracle);
            assert!(slots.iter().all(|s| s.date.weekday() != Weekday::Sun));
            assert!(slots.iter().all(|s| s.date > today && s.date <= today + Duration::days(7)));
        }
    }

    #[test]
    fn fourteen_slots_on_each_open_day() {
        // Monday: the following Sunday falls inside the window.
        let slots = generate_week(date(2024, 1, 15), &mut AlwaysOpen);

        let mut per_day: BTreeMap<NaiveDate, Vec<&TimeSlot>> = BTreeMap::new();
        for slot in &slots {
            per_day.entry(slot.date).or_default().push(slot);
        }

        assert_eq!(per_day.len(), 6);
        assert_eq!(slots.len(), 6 * 14);
        for day_slots in per_day.values() {
            assert_eq!(day_slots.len(), 14);
            assert_eq!(day_slots.iter().filter(|s| s.is_morning()).count(), 6);
        }
    }

    #[test]
    fn saturday_window_still_skips_sunday() {
        let slots = generate_week(date(2024, 1, 20), &mut AlwaysOpen);
        assert_eq!(slots.first().map(|s| s.date), Some(date(2024, 1, 22)));
        assert_eq!(slots.len(), 6 * 14);
    }

    #[test]
    fn simulated_availability_is_roughly_seventy_percent() {
        let mut oracle = SimulatedAvailability::seeded(42);
        let mut available = 0;
        let mut total = 0;
        for week in 0..50 {
            let today = date(2024, 3, 4) + Duration::days(week * 7);
            for slot in generate_week(today, &mut oracle) {
                total += 1;
                if slot.available {
                    available += 1;
                }
            }
        }
        let ratio = available as f64 / total as f64;
        assert!((0.6..0.8).contains(&ratio), "ratio was {ratio}");
    }

    #[test]
    fn booked_availability_blocks_covered_slots() {
        let monday = date(2024, 1, 15);
        let booked = vec![
            Appointment {
                id: 1,
                client_id: 1,
                professional_id: 2,
                service: "Lockout assistance".to_string(),
                date: monday.and_hms_opt(9, 30, 0).unwrap(),
                duration: 60,
                status: AppointmentStatus::Pending,
                price: 95.0,
                address: "5 Oak Ave".to_string(),
                notes: None,
                created_at: monday.and_hms_opt(7, 0, 0).unwrap(),
            },
            Appointment {
                id: 2,
                client_id: 1,
                professional_id: 2,
                service: "Rekey".to_string(),
                date: monday.and_hms_opt(14, 0, 0).unwrap(),
                duration: 30,
                status: AppointmentStatus::Cancelled,
                price: 60.0,
                address: "5 Oak Ave".to_string(),
                notes: None,
                created_at: monday.and_hms_opt(7, 0, 0).unwrap(),
            },
        ];
        let now = date(2024, 1, 14).and_hms_opt(12, 0, 0).unwrap();
        let mut oracle = BookedAvailability::new(&booked, now);

        let slots = generate_week(date(2024, 1, 14), &mut oracle);
        let taken: Vec<&str> = slots
            .iter()
            .filter(|s| !s.available)
            .map(|s| s.id.as_str())
            .collect();

        assert_eq!(taken, vec!["2024-01-15T09:30", "2024-01-15T10:00"]);
    }

    #[test]
    fn booked_availability_blocks_past_slots() {
        let now = date(2024, 1, 15).and_hms_opt(10, 15, 0).unwrap();
        let mut oracle = BookedAvailability::new(&[], now);
        let monday = date(2024, 1, 15);
        assert!(!oracle.is_available(monday, NaiveTime::from_hms_opt(10, 0, 0).unwrap()));
        assert!(oracle.is_available(monday, NaiveTime::from_hms_opt(10, 30, 0).unwrap()));
    }

    #[test]
    fn offered_starts_follow_the_daily_grid() {
        let monday = date(2024, 1, 15);
        assert!(is_offered_start(monday.and_hms_opt(9, 30, 0).unwrap()));
        assert!(is_offered_start(monday.and_hms_opt(17, 30, 0).unwrap()));
        assert!(!is_offered_start(monday.and_hms_opt(12, 0, 0).unwrap()));
        assert!(!is_offered_start(monday.and_hms_opt(9, 15, 0).unwrap()));
        assert!(!is_offered_start(date(2024, 1, 14).and_hms_opt(9, 0, 0).unwrap()));
    }

    #[test]
    fn slot_serializes_start_as_hh_mm() {
        let slot = TimeSlot::new(date(2024, 1, 15), NaiveTime::from_hms_opt(9, 0, 0).unwrap(), true);
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["id"], "2024-01-15T09:00");
        assert_eq!(json["start"], "09:00");
        assert_eq!(json["date"], "2024-01-15");
    }
}
