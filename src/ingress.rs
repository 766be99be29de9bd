//! Ingress boundary: request bodies, validation and responses.
//!
//! The engine trusts its inputs. Everything arriving from outside passes
//! through [`OrderRequest::validate_into`] or [`PickerRequest::validate_into`]
//! first; numeric fields are signed here so that negative values can be
//! rejected instead of failing to parse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Allocation, Order, Picker};

/// Rejections raised before anything reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be at least {min}, got {value}")]
    BelowMinimum {
        field: &'static str,
        min: i64,
        value: i64,
    },

    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

fn at_least<T: TryFrom<i64>>(
    field: &'static str,
    value: i64,
    min: i64,
) -> Result<T, ValidationError> {
    if value < min {
        return Err(ValidationError::BelowMinimum { field, min, value });
    }
    T::try_from(value).map_err(|_| ValidationError::OutOfRange { field, value })
}

// ============================================================================
// Requests
// ============================================================================

/// Body of an "order is ready to allocate" event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub order_id: String,
    pub store_id: String,

    /// Optimal Allocation Time as epoch millis; absent means now
    #[serde(default)]
    pub oat_timestamp_ms: Option<i64>,

    pub priority_order: i64,
    pub sku_count: i64,
}

impl OrderRequest {
    /// Check every field and build the [`Order`] snapshot.
    ///
    /// `now` stands in for a missing OAT.
    pub fn validate_into(self, now: DateTime<Utc>) -> Result<Order, ValidationError> {
        require("order_id", &self.order_id)?;
        require("store_id", &self.store_id)?;
        let priority_order = at_least("priority_order", self.priority_order, 1)?;
        let sku_count = at_least("sku_count", self.sku_count, 1)?;

        let oat = match self.oat_timestamp_ms {
            None => now,
            Some(ms) => DateTime::from_timestamp_millis(ms).ok_or(ValidationError::OutOfRange {
                field: "oat_timestamp_ms",
                value: ms,
            })?,
        };

        Ok(Order::new(
            self.order_id,
            self.store_id,
            oat,
            priority_order,
            sku_count,
        ))
    }
}

/// Body of a "picker is available" event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerRequest {
    pub picker_id: String,
    pub store_id: String,
    pub sku_completed: i64,
    pub order_completed: i64,
}

impl PickerRequest {
    pub fn validate_into(self) -> Result<Picker, ValidationError> {
        require("picker_id", &self.picker_id)?;
        require("store_id", &self.store_id)?;
        let sku_completed = at_least("sku_completed", self.sku_completed, 0)?;
        let order_completed = at_least("order_completed", self.order_completed, 0)?;

        Ok(Picker::new(
            self.picker_id,
            self.store_id,
            sku_completed,
            order_completed,
        ))
    }
}

// ============================================================================
// Response
// ============================================================================

/// Outcome of an allocation attempt as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResponse {
    pub order_id: Option<String>,
    pub picker_id: Option<String>,
    pub store_id: String,
    /// Match time in epoch millis, 0 when nothing was allocated
    pub timestamp: i64,
    pub success: bool,
    pub message: String,
}

impl AllocationResponse {
    pub fn success(allocation: &Allocation) -> Self {
        Self {
            order_id: Some(allocation.order_id.clone()),
            picker_id: Some(allocation.picker_id.clone()),
            store_id: allocation.store_id.clone(),
            timestamp: allocation.timestamp_millis(),
            success: true,
            message: "Order allocated successfully".to_string(),
        }
    }

    pub fn no_allocation(store_id: impl Into<String>) -> Self {
        Self {
            order_id: None,
            picker_id: None,
            store_id: store_id.into(),
            timestamp: 0,
            success: false,
            message: "No allocation possible - queues may be empty".to_string(),
        }
    }
}

impl From<(Option<Allocation>, &str)> for AllocationResponse {
    fn from((allocation, store_id): (Option<Allocation>, &str)) -> Self {
        match allocation {
            Some(allocation) => Self::success(&allocation),
            None => Self::no_allocation(store_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
    }

    fn order_request() -> OrderRequest {
        OrderRequest {
            order_id: "O1".into(),
            store_id: "S1".into(),
            oat_timestamp_ms: None,
            priority_order: 2,
            sku_count: 12,
        }
    }

    fn picker_request() -> PickerRequest {
        PickerRequest {
            picker_id: "P1".into(),
            store_id: "S1".into(),
            sku_completed: 350,
            order_completed: 40,
        }
    }

    #[test]
    fn test_order_request_defaults_oat_to_now() {
        let order = order_request().validate_into(now()).unwrap();

        assert_eq!(order.optimal_allocation_time, now());
        assert_eq!(order.priority_order, 2);
        assert_eq!(order.sku_count, 12);
    }

    #[test]
    fn test_order_request_explicit_oat() {
        let oat = now() - chrono::Duration::minutes(30);
        let request = OrderRequest {
            oat_timestamp_ms: Some(oat.timestamp_millis()),
            ..order_request()
        };

        assert_eq!(request.validate_into(now()).unwrap().optimal_allocation_time, oat);
    }

    #[test]
    fn test_order_request_rejections() {
        let blank_id = OrderRequest {
            order_id: "  ".into(),
            ..order_request()
        };
        assert_eq!(
            blank_id.validate_into(now()),
            Err(ValidationError::MissingField("order_id"))
        );

        let zero_priority = OrderRequest {
            priority_order: 0,
            ..order_request()
        };
        assert!(matches!(
            zero_priority.validate_into(now()),
            Err(ValidationError::BelowMinimum { field: "priority_order", .. })
        ));

        let zero_skus = OrderRequest {
            sku_count: 0,
            ..order_request()
        };
        assert!(zero_skus.validate_into(now()).is_err());

        let huge_priority = OrderRequest {
            priority_order: i64::from(u32::MAX) + 1,
            ..order_request()
        };
        assert!(matches!(
            huge_priority.validate_into(now()),
            Err(ValidationError::OutOfRange { field: "priority_order", .. })
        ));

        let bad_oat = OrderRequest {
            oat_timestamp_ms: Some(i64::MAX),
            ..order_request()
        };
        assert!(matches!(
            bad_oat.validate_into(now()),
            Err(ValidationError::OutOfRange { field: "oat_timestamp_ms", .. })
        ));
    }

    #[test]
    fn test_picker_request() {
        let picker = picker_request().validate_into().unwrap();
        assert_eq!(picker.sku_completed, 350);
        assert_eq!(picker.order_completed, 40);

        let negative = PickerRequest {
            order_completed: -1,
            ..picker_request()
        };
        assert_eq!(
            negative.validate_into().unwrap_err().to_string(),
            "order_completed must be at least 0, got -1"
        );

        let no_store = PickerRequest {
            store_id: String::new(),
            ..picker_request()
        };
        assert_eq!(
            no_store.validate_into(),
            Err(ValidationError::MissingField("store_id"))
        );
    }

    #[test]
    fn test_order_request_from_json() {
        let request: OrderRequest = serde_json::from_str(
            r#"{"order_id":"O9","store_id":"S2","priority_order":1,"sku_count":3}"#,
        )
        .unwrap();

        assert!(request.oat_timestamp_ms.is_none());
        assert_eq!(request.validate_into(now()).unwrap().order_id, "O9");
    }

    #[test]
    fn test_allocation_response() {
        let allocation = Allocation::new("O1", "P1", "S1", now());

        let ok = AllocationResponse::from((Some(allocation), "S1"));
        assert!(ok.success);
        assert_eq!(ok.order_id.as_deref(), Some("O1"));
        assert_eq!(ok.timestamp, now().timestamp_millis());

        let none = AllocationResponse::from((None, "S1"));
        assert!(!none.success);
        assert!(none.picker_id.is_none());
        assert_eq!(none.timestamp, 0);
        assert_eq!(none.store_id, "S1");
    }
}
