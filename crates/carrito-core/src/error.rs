//! # Error Types
//!
//! Domain-specific error types for carrito-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  carrito-core errors (this file)                                       │
//! │  └── CoreError        - Domain rule violations (discount codes)        │
//! │                                                                         │
//! │  carrito-store errors (separate crate)                                 │
//! │  └── StoreError       - Persistence failures                           │
//! │                                                                         │
//! │  The engine returns CoreError to callers, while StoreError is          │
//! │  swallowed at the engine boundary (best-effort persistence).           │
//! │                                                                         │
//! │  Missing names on removal-style operations are NOT errors: they are    │
//! │  silent no-ops (idempotent deletes).                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never String
//! 3. Each variant maps to a user-facing rejection message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The discount code input was empty or whitespace.
    #[error("Ingresa un código de descuento")]
    EmptyDiscountCode,

    /// The discount code is not in the allow-list.
    #[error("Código de descuento no válido: {0}")]
    InvalidDiscountCode(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::EmptyDiscountCode.to_string(),
            "Ingresa un código de descuento"
        );
        assert_eq!(
            CoreError::InvalidDiscountCode("FAKE123".into()).to_string(),
            "Código de descuento no válido: FAKE123"
        );
    }
}
