//! # Store Error Types
//!
//! Every failure a store operation can report, one variant per kind.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError (tienda-core)                                         │
//! │       │  #[from]                                                        │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← NotFound / Conflict / InsufficientStock    │
//! │       │                      EmptyCart / Unauthorized                   │
//! │       ▼                                                                 │
//! │  ApiError (apps/api) ← status code + JSON body                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store only returns these values. It never logs them; callers decide
//! what a failure means for their transport.

use thiserror::Error;

use tienda_core::{ProductId, UserId, ValidationError};

/// Store operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Malformed input: negative price or stock, non-positive quantity, ...
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Duplicate unique key, or delete blocked by a live reference.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Checkout-time stock shortfall.
    ///
    /// ## When This Occurs
    /// ```text
    /// Cart: Widget x3
    ///      │
    ///      ▼
    /// checkout(): stock = 2
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: 1, available: 2, requested: 3 }
    ///      │
    ///      ▼
    /// No stock moved, cart unchanged, no order created
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: ProductId,
        available: i64,
        requested: i64,
    },

    /// Checkout of a cart with no lines.
    #[error("Cart of user {user_id} is empty")]
    EmptyCart { user_id: UserId },

    /// Failed authentication. Unknown email and wrong credential look the same.
    #[error("Invalid credentials")]
    Unauthorized,

    /// Credential hashing failed.
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        StoreError::Conflict(message.into())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::InsufficientStock {
            product_id: 1,
            available: 2,
            requested: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 1: available 2, requested 3"
        );
        assert_eq!(
            StoreError::not_found("Product", 9).to_string(),
            "Product not found: 9"
        );
    }

    #[test]
    fn test_validation_converts_to_store_error() {
        let err: StoreError = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }
        .into();
        assert!(matches!(err, StoreError::Validation(_)));
    }
}
