//! Back-office status changes for placed orders.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Placed → Preparing → Ready → PickedUp.
    Advance,
    /// Allowed before the cake is ready. Frees the pickup slot.
    Cancel,
    /// Allowed once the cake is ready. Frees the pickup slot if the cake was
    /// never collected.
    Refund,
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderAction::Advance => "advance",
            OrderAction::Cancel => "cancel",
            OrderAction::Refund => "refund",
        };
        f.write_str(name)
    }
}
