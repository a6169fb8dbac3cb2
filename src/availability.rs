//! # Availability Gate
//!
//! Decides which `(date, slot)` pairs a customer may pick. A slot is selectable
//! only when `slot_start - now >= lead_time`; the boundary itself is allowed.
//!
//! When a day has nothing left, the gate says *why* instead of returning an
//! empty list: either the day is inside the advance-notice window, or every
//! slot that day has been booked out.

use crate::model::{SlotKey, TimeSlot};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Mutex;

/// Source of the current store-local time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the machine's local zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(|p| p.into_inner()) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|p| p.into_inner());
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|p| p.into_inner())
    }
}

/// What the time picker should show for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SlotAvailability {
    /// Slots the customer may choose, in chronological order. Never empty.
    Open { slots: Vec<TimeSlot> },
    /// Every slot that day starts too soon. `earliest` is the first slot that
    /// satisfies the lead time.
    AdvanceNoticeRequired { earliest: SlotKey },
    /// Far enough out, but every remaining slot is fully booked.
    SoldOut,
}

impl SlotAvailability {
    pub fn slots(&self) -> &[TimeSlot] {
        match self {
            SlotAvailability::Open { slots } => slots,
            _ => &[],
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, SlotAvailability::Open { .. })
    }

    /// Banner text for the closed states.
    pub fn notice(&self) -> Option<String> {
        match self {
            SlotAvailability::Open { .. } => None,
            SlotAvailability::AdvanceNoticeRequired { earliest } => Some(format!(
                "Advance notice required. The earliest available pickup is {} at {}.",
                earliest.date.format("%a %b %-d"),
                earliest.slot
            )),
            SlotAvailability::SoldOut => {
                Some("No slots available on this date. Please choose another day.".to_string())
            }
        }
    }
}

/// Lead-time rule for pickup slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityGate {
    lead_time: Duration,
}

impl AvailabilityGate {
    pub fn new(lead_time: Duration) -> Self {
        Self { lead_time }
    }

    pub fn from_hours(hours: u32) -> Self {
        Self::new(Duration::hours(i64::from(hours)))
    }

    pub fn lead_time(&self) -> Duration {
        self.lead_time
    }

    pub fn is_selectable(&self, date: NaiveDate, slot: TimeSlot, now: NaiveDateTime) -> bool {
        SlotKey::new(date, slot).starts_at() - now >= self.lead_time
    }

    /// First slot, on any day, that satisfies the lead time.
    pub fn earliest_selectable(&self, now: NaiveDateTime) -> SlotKey {
        let threshold = now + self.lead_time;
        let day = threshold.date();
        TimeSlot::ALL
            .iter()
            .map(|&slot| SlotKey::new(day, slot))
            .find(|key| key.starts_at() >= threshold)
            .unwrap_or_else(|| {
                // Past the last slot of the threshold day; first slot of the next.
                let next = day.succ_opt().unwrap_or(day);
                SlotKey::new(next, TimeSlot::ALL[0])
            })
    }

    /// Selectable slots for `date`, minus any the backend reported as full.
    pub fn slots_for(
        &self,
        date: NaiveDate,
        now: NaiveDateTime,
        sold_out: &BTreeSet<SlotKey>,
    ) -> SlotAvailability {
        let in_window: Vec<TimeSlot> = TimeSlot::ALL
            .iter()
            .copied()
            .filter(|&slot| self.is_selectable(date, slot, now))
            .collect();

        if in_window.is_empty() {
            return SlotAvailability::AdvanceNoticeRequired {
                earliest: self.earliest_selectable(now),
            };
        }

        let slots: Vec<TimeSlot> = in_window
            .into_iter()
            .filter(|&slot| !sold_out.contains(&SlotKey::new(date, slot)))
            .collect();

        if slots.is_empty() {
            SlotAvailability::SoldOut
        } else {
            SlotAvailability::Open { slots }
        }
    }
}

impl Default for AvailabilityGate {
    fn default() -> Self {
        Self::from_hours(24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_exact_lead_time_is_selectable() {
        let gate = AvailabilityGate::from_hours(24);
        let now = at(2026, 10, 19, 15, 0);
        assert!(gate.is_selectable(day(2026, 10, 20), TimeSlot::Afternoon, now));
        assert!(!gate.is_selectable(day(2026, 10, 20), TimeSlot::Midday, now));
    }

    #[test]
    fn test_tomorrow_partially_open() {
        let gate = AvailabilityGate::default();
        let now = at(2026, 10, 19, 12, 30);
        let availability = gate.slots_for(day(2026, 10, 20), now, &BTreeSet::new());
        assert_eq!(
            availability,
            SlotAvailability::Open {
                slots: vec![TimeSlot::Afternoon, TimeSlot::Evening]
            }
        );
    }

    #[test]
    fn test_today_requires_advance_notice() {
        let gate = AvailabilityGate::default();
        let now = at(2026, 10, 19, 8, 0);
        let availability = gate.slots_for(day(2026, 10, 19), now, &BTreeSet::new());
        assert_eq!(
            availability,
            SlotAvailability::AdvanceNoticeRequired {
                earliest: SlotKey::new(day(2026, 10, 20), TimeSlot::Morning)
            }
        );
        assert!(availability.slots().is_empty());
        assert!(availability.notice().unwrap().contains("Advance notice"));
    }

    #[test]
    fn test_earliest_rolls_to_next_day_after_last_slot() {
        let gate = AvailabilityGate::default();
        let now = at(2026, 10, 19, 18, 1);
        assert_eq!(
            gate.earliest_selectable(now),
            SlotKey::new(day(2026, 10, 21), TimeSlot::Morning)
        );
    }

    #[test]
    fn test_fully_booked_day_is_sold_out() {
        let gate = AvailabilityGate::default();
        let now = at(2026, 10, 19, 9, 0);
        let date = day(2026, 10, 22);
        let sold_out: BTreeSet<SlotKey> = TimeSlot::ALL
            .iter()
            .map(|&s| SlotKey::new(date, s))
            .collect();
        assert_eq!(gate.slots_for(date, now, &sold_out), SlotAvailability::SoldOut);
    }

    #[test]
    fn test_fixed_clock_advances() {
        let clock = FixedClock::new(at(2026, 10, 19, 9, 0));
        clock.advance(Duration::hours(30));
        assert_eq!(clock.now(), at(2026, 10, 20, 15, 0));
    }
}
