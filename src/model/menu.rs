//! Closed menus the wizard offers: crust options, add-ons and pickup slots.
//!
//! Each choice is an enum variant carrying its own label and price, so no code
//! ever matches against display text.

use super::Money;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Crust choice for an açaí cake, with its per-cake price delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrustOption {
    Classic,
    Granola,
    Chocolate,
    GlutenFree,
}

impl CrustOption {
    pub const ALL: [CrustOption; 4] = [
        CrustOption::Classic,
        CrustOption::Granola,
        CrustOption::Chocolate,
        CrustOption::GlutenFree,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CrustOption::Classic => "Classic",
            CrustOption::Granola => "Granola Crunch",
            CrustOption::Chocolate => "Chocolate Cookie",
            CrustOption::GlutenFree => "Gluten-Free Almond",
        }
    }

    /// Added to the base price of every cake in the order.
    pub fn price_delta(self) -> Money {
        match self {
            CrustOption::Classic => Money::ZERO,
            CrustOption::Granola => Money::from_cents(450),
            CrustOption::Chocolate => Money::from_cents(300),
            CrustOption::GlutenFree => Money::from_cents(500),
        }
    }
}

impl fmt::Display for CrustOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Optional extras. Charged once per order, whatever the quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOn {
    Candles,
    GreetingCard,
    ExtraFruit,
}

impl AddOn {
    pub const ALL: [AddOn; 3] = [AddOn::Candles, AddOn::GreetingCard, AddOn::ExtraFruit];

    pub fn label(self) -> &'static str {
        match self {
            AddOn::Candles => "Birthday Candles",
            AddOn::GreetingCard => "Greeting Card",
            AddOn::ExtraFruit => "Extra Fruit Topping",
        }
    }

    pub fn charge(self) -> Money {
        match self {
            AddOn::Candles => Money::from_cents(200),
            AddOn::GreetingCard => Money::from_cents(350),
            AddOn::ExtraFruit => Money::from_cents(400),
        }
    }
}

impl fmt::Display for AddOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed pickup windows offered every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    Morning,
    Midday,
    Afternoon,
    Evening,
}

impl TimeSlot {
    /// In chronological order.
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Midday,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
    ];

    pub fn start_hour(self) -> u32 {
        match self {
            TimeSlot::Morning => 10,
            TimeSlot::Midday => 12,
            TimeSlot::Afternoon => 15,
            TimeSlot::Evening => 18,
        }
    }

    pub fn start_time(self) -> NaiveTime {
        // Hours above are all < 24.
        NaiveTime::from_hms_opt(self.start_hour(), 0, 0).unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::Morning => "10:00 AM",
            TimeSlot::Midday => "12:00 PM",
            TimeSlot::Afternoon => "3:00 PM",
            TimeSlot::Evening => "6:00 PM",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
