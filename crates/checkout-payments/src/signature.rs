//! Payment Signature Verification
//!
//! The checkout widget's completion callback hands back a payment id and
//! an HMAC-SHA256 signature over the entity and payment ids, keyed with
//! the gateway secret. Verifying it before marking a record paid keeps a
//! forged callback from flipping the paid flag.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{PaymentError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Signed message for a one-time order payment: `{order_id}|{payment_id}`
pub fn order_message(order_id: &str, payment_id: &str) -> String {
    format!("{order_id}|{payment_id}")
}

/// Signed message for a subscription payment: `{payment_id}|{subscription_id}`
pub fn subscription_message(payment_id: &str, subscription_id: &str) -> String {
    format!("{payment_id}|{subscription_id}")
}

/// Verify a hex-encoded HMAC-SHA256 signature over `message`.
///
/// Uses the MAC's own constant-time comparison.
pub fn verify_signature(message: &str, signature: &str, key_secret: &str) -> Result<()> {
    let expected = hex::decode(signature).map_err(|_| PaymentError::InvalidSignature)?;

    let mut mac = HmacSha256::new_from_slice(key_secret.as_bytes())
        .map_err(|e| PaymentError::Config(format!("HMAC key error: {e}")))?;
    mac.update(message.as_bytes());

    mac.verify_slice(&expected)
        .map_err(|_| PaymentError::InvalidSignature)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(message: &str, secret: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(message.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_valid_signature_verifies() {
        let message = order_message("order_123", "pay_456");
        let signature = sign(&message, "secret");
        assert!(verify_signature(&message, &signature, "secret").is_ok());
    }

    #[test]
    fn test_tampered_message_fails() {
        let signature = sign(&order_message("order_123", "pay_456"), "secret");
        let err = verify_signature(
            &order_message("order_123", "pay_999"),
            &signature,
            "secret",
        )
        .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidSignature));
    }

    #[test]
    fn test_non_hex_signature_fails() {
        let err = verify_signature("order_1|pay_1", "not hex!", "secret").unwrap_err();
        assert!(matches!(err, PaymentError::InvalidSignature));
    }

    #[test]
    fn test_message_shapes() {
        assert_eq!(order_message("o", "p"), "o|p");
        assert_eq!(subscription_message("p", "s"), "p|s");
    }
}
