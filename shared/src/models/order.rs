//! Order models and status rules

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "order_status", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Completed and cancelled orders never change again
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Completed)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
        )
    }

    /// Check a status change, returning the new status when allowed
    pub fn transition_to(&self, next: OrderStatus) -> Result<OrderStatus, OrderError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(OrderError::InvalidTransition {
                from: *self,
                to: next,
            })
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(OrderError::UnknownStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Badge used to render an order status string
///
/// Unknown strings fall back to a generic badge instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    Success,
    Warning,
    Danger,
    Neutral,
}

impl StatusBadge {
    pub fn for_status(status: &str) -> Self {
        match status.parse::<OrderStatus>() {
            Ok(OrderStatus::Completed) => StatusBadge::Success,
            Ok(OrderStatus::Pending) => StatusBadge::Warning,
            Ok(OrderStatus::Cancelled) => StatusBadge::Danger,
            Err(_) => StatusBadge::Neutral,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StatusBadge::Success => "badge-success",
            StatusBadge::Warning => "badge-warning",
            StatusBadge::Danger => "badge-danger",
            StatusBadge::Neutral => "badge-info",
        }
    }
}

/// Whether the dashboard offers complete/cancel actions for a status string
pub fn status_actions_available(status: &str) -> bool {
    status != OrderStatus::Completed.as_str() && status != OrderStatus::Cancelled.as_str()
}

/// Order rule violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("Order must contain at least one item")]
    Empty,

    #[error("Item quantity must be at least 1")]
    InvalidQuantity,

    #[error("Cannot change order status from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Unknown order status: {0}")]
    UnknownStatus(String),
}

/// A placed order with its lines
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: i64,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub created_by: i64,
    pub notes: Option<String>,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A line of an order, priced when the order was placed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub price: Decimal,
}

impl OrderItem {
    pub fn subtotal(&self) -> Decimal {
        line_subtotal(self.price, self.quantity)
    }
}

pub fn line_subtotal(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Sum of `price * quantity` over priced lines
pub fn order_total<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, i32)>,
{
    lines
        .into_iter()
        .map(|(price, quantity)| line_subtotal(price, quantity))
        .sum()
}

/// Short order row shown on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderSummary {
    pub id: i64,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_amount: Decimal,
}

/// A requested order line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct OrderItemInput {
    pub product_id: i64,
    #[validate(range(min = 1, message = "Item quantity must be at least 1"))]
    pub quantity: i32,
}

/// Input for placing an order
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrderInput {
    #[validate(length(min = 1, message = "Order must contain at least one item"))]
    pub items: Vec<OrderItemInput>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateOrderInput {
    /// Check the whole request, including every line
    pub fn check(&self) -> Result<(), OrderError> {
        if self.items.is_empty() {
            return Err(OrderError::Empty);
        }
        if self.items.iter().any(|item| item.quantity < 1) {
            return Err(OrderError::InvalidQuantity);
        }
        Ok(())
    }
}

/// Query string of `PUT /orders/{id}/status`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderStatusQuery {
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdated {
    pub message: String,
    pub order: Order,
}
