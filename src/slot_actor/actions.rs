//! Custom actions for the slot actor.

/// Operations on one pickup slot beyond CRUD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotAction {
    /// Reads the remaining capacity without changing it.
    Remaining,
    /// Books cakes into the slot.
    ///
    /// # Errors
    /// Fails with [`SlotError::SoldOut`](super::SlotError::SoldOut) when fewer
    /// than the requested number remain. Nothing is booked in that case.
    Reserve(u32),
    /// Gives back cakes from a cancelled or refunded order.
    Release(u32),
}

/// Results from [`SlotAction`]s; variants match 1:1. Each carries the
/// capacity left after the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotActionResult {
    Remaining(u32),
    Reserve(u32),
    Release(u32),
}
