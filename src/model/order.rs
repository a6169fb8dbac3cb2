/// Represents a placed cake pre-order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for CakeOrder`](#impl-ActorEntity-for-CakeOrder) for details on:
/// - Creation parameters ([`OrderRequest`])
/// - Back-office status changes ([`OrderAction`](crate::order_actor::OrderAction))
use super::{AddOn, ContactInfo, CrustOption, Money, ProductId, SlotKey, TimeSlot};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Back-office fulfilment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Placed,
    Preparing,
    Ready,
    PickedUp,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    /// The next step in the normal fulfilment path, if any.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Placed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::PickedUp),
            OrderStatus::PickedUp | OrderStatus::Cancelled | OrderStatus::Refunded => None,
        }
    }

    pub fn can_cancel(self) -> bool {
        matches!(self, OrderStatus::Placed | OrderStatus::Preparing)
    }

    pub fn can_refund(self) -> bool {
        matches!(self, OrderStatus::Ready | OrderStatus::PickedUp)
    }

    /// True while the order still occupies room in its pickup slot.
    pub fn holds_slot(self) -> bool {
        matches!(
            self,
            OrderStatus::Placed | OrderStatus::Preparing | OrderStatus::Ready
        )
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Body of the "create order" call: the finalized draft plus the total the
/// customer saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub product_id: ProductId,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub option: CrustOption,
    pub quantity: u32,
    pub add_ons: Vec<AddOn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gift_message: Option<String>,
    pub contact: ContactInfo,
    pub total: Money,
}

impl OrderRequest {
    pub fn slot_key(&self) -> SlotKey {
        SlotKey::new(self.date, self.time_slot)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CakeOrder {
    pub id: OrderId,
    pub request: OrderRequest,
    pub status: OrderStatus,
}

impl CakeOrder {
    /// Creates a new order in the `Placed` state.
    pub fn new(id: OrderId, request: OrderRequest) -> Self {
        Self {
            id,
            request,
            status: OrderStatus::Placed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fulfilment_path() {
        let mut status = OrderStatus::Placed;
        let mut seen = vec![status];
        while let Some(next) = status.next() {
            status = next;
            seen.push(status);
        }
        assert_eq!(
            seen,
            vec![
                OrderStatus::Placed,
                OrderStatus::Preparing,
                OrderStatus::Ready,
                OrderStatus::PickedUp
            ]
        );
    }

    #[test]
    fn test_request_wire_shape() {
        let request = OrderRequest {
            product_id: ProductId(1),
            date: NaiveDate::from_ymd_opt(2026, 10, 21).unwrap(),
            time_slot: TimeSlot::Afternoon,
            option: CrustOption::Granola,
            quantity: 2,
            add_ons: vec![AddOn::Candles],
            gift_message: None,
            contact: ContactInfo::new("Ana", "ana@example.com", "5551234567"),
            total: Money::from_cents(8_700),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["date"], "2026-10-21");
        assert_eq!(json["time_slot"], "afternoon");
        assert_eq!(json["option"], "granola");
        assert_eq!(json["total"], 8_700);
        assert!(json.get("gift_message").is_none());

        let back: OrderRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back, request);
    }
}
