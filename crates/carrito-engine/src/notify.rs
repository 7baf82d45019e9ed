//! # Notifications
//!
//! The user-facing notification seam and the message texts.
//!
//! Messages follow the frontend's toast wording (Spanish, emoji-prefixed by
//! severity). Delivery is fire-and-forget: the engine never fails because a
//! toast could not be shown.

use async_trait::async_trait;

use carrito_core::Money;

// =============================================================================
// Notifier Trait
// =============================================================================

/// Fire-and-forget user-facing messages.
///
/// Implementations deliver however the platform shows toasts; the result is
/// ignored by callers.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Shows a short message to the user.
    async fn notify(&self, message: &str);
}

/// Notifier that drops every message. For headless use and tests that
/// don't assert on notifications.
#[derive(Debug, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, _message: &str) {}
}

// =============================================================================
// Message Texts
// =============================================================================

/// "Added to cart", naming the resulting quantity for the line.
pub fn added(name: &str, quantity: i64) -> String {
    if quantity == 1 {
        format!("🛒 {name} agregado al carrito")
    } else {
        format!("🛒 {quantity} unidades de {name} en el carrito")
    }
}

/// One unit removed, line still present.
pub fn reduced(name: &str, quantity: i64) -> String {
    format!("ℹ️ {name} - Cantidad reducida a {quantity}")
}

/// Last unit removed via `remove_one_unit`.
pub fn removed(name: &str) -> String {
    format!("ℹ️ {name} removido del carrito")
}

/// Whole line deleted via `remove_line`.
pub fn deleted(name: &str) -> String {
    format!("ℹ️ {name} eliminado del carrito")
}

/// Cart emptied (only sent when it held something).
pub fn cleared() -> String {
    "✅ Carrito vaciado exitosamente".to_string()
}

/// Valid discount code accepted.
pub fn code_applied(code: &str) -> String {
    format!("✅ Código {code} aplicado: 5% de descuento adicional")
}

/// Discount code rejected; wraps the domain error's message.
pub fn code_rejected(reason: &str) -> String {
    format!("❌ {reason}")
}

/// Checkout confirmed for the charged amount.
pub fn order_confirmed(total: Money) -> String {
    format!("✅ Compra confirmada por {total}")
}

// =============================================================================
// Unit Tests
// =============================================================================
