/// Pickup capacity for one time slot on one day.
///
/// # Actor Framework
/// Managed by a [`ResourceActor`](crate::framework::ResourceActor); its id is the
/// natural key [`SlotKey`], so each `(date, slot)` pair exists at most once.
use super::TimeSlot;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub date: NaiveDate,
    pub slot: TimeSlot,
}

impl SlotKey {
    pub fn new(date: NaiveDate, slot: TimeSlot) -> Self {
        Self { date, slot }
    }

    /// When the pickup window opens.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.slot.start_time())
    }
}

impl Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{:?}", self.date, self.slot)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCapacity {
    pub key: SlotKey,
    pub capacity: u32,
    pub reserved: u32,
}

impl SlotCapacity {
    pub fn remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.reserved)
    }
}

/// Payload for opening a slot for booking.
#[derive(Debug, Clone)]
pub struct SlotOpen {
    pub key: SlotKey,
    pub capacity: u32,
}

/// Payload for resizing an open slot. Shrinking below what is already
/// reserved leaves the slot sold out; existing bookings are kept.
#[derive(Debug, Clone)]
pub struct SlotUpdate {
    pub capacity: u32,
}
