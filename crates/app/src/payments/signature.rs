//! Payment callback signature verification.
//!
//! The gateway signs `"{order_id}|{payment_id}"` with HMAC-SHA256 under the
//! key secret and sends the hex digest alongside the callback. Verification
//! recomputes the digest and compares in constant time.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::payments::secret::GatewaySecret;

type HmacSha256 = Hmac<Sha256>;

/// Compute the hex signature the gateway is expected to send for the given
/// order/payment pair.
#[must_use]
pub fn payment_signature(secret: &GatewaySecret, order_id: &str, payment_id: &str) -> String {
    hex::encode(signed_payload_mac(secret, order_id, payment_id).finalize().into_bytes())
}

/// Check a callback signature. Undecodable or truncated signatures are
/// rejected the same way as mismatched ones.
#[must_use]
pub fn verify_payment_signature(
    secret: &GatewaySecret,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> bool {
    let Ok(signature) = hex::decode(signature) else {
        return false;
    };

    signed_payload_mac(secret, order_id, payment_id)
        .verify_slice(&signature)
        .is_ok()
}

fn signed_payload_mac(secret: &GatewaySecret, order_id: &str, payment_id: &str) -> HmacSha256 {
    #[expect(
        clippy::expect_used,
        reason = "HMAC-SHA256 accepts keys of any length"
    )]
    let mut mac = HmacSha256::new_from_slice(secret.expose().as_bytes())
        .expect("HMAC-SHA256 accepts keys of any length");

    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());

    mac
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> GatewaySecret {
        GatewaySecret::new("kz_test_secret".to_string())
    }

    #[test]
    fn valid_signature_is_accepted() {
        let signature = payment_signature(&secret(), "order_abc", "pay_xyz");

        assert!(verify_payment_signature(
            &secret(),
            "order_abc",
            "pay_xyz",
            &signature
        ));
    }

    #[test]
    fn single_character_mutation_is_rejected() {
        let signature = payment_signature(&secret(), "order_abc", "pay_xyz");

        let mut chars: Vec<char> = signature.chars().collect();
        chars[0] = if chars[0] == '0' { '1' } else { '0' };
        let mutated: String = chars.into_iter().collect();

        assert!(!verify_payment_signature(
            &secret(),
            "order_abc",
            "pay_xyz",
            &mutated
        ));
    }

    #[test]
    fn swapped_order_and_payment_ids_are_rejected() {
        let signature = payment_signature(&secret(), "pay_xyz", "order_abc");

        assert!(!verify_payment_signature(
            &secret(),
            "order_abc",
            "pay_xyz",
            &signature
        ));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let other = GatewaySecret::new("kz_other_secret".to_string());
        let signature = payment_signature(&other, "order_abc", "pay_xyz");

        assert!(!verify_payment_signature(
            &secret(),
            "order_abc",
            "pay_xyz",
            &signature
        ));
    }

    #[test]
    fn undecodable_signature_is_rejected() {
        assert!(!verify_payment_signature(
            &secret(),
            "order_abc",
            "pay_xyz",
            "not-hex!"
        ));
    }

    #[test]
    fn truncated_signature_is_rejected() {
        let signature = payment_signature(&secret(), "order_abc", "pay_xyz");

        assert!(!verify_payment_signature(
            &secret(),
            "order_abc",
            "pay_xyz",
            &signature[..32]
        ));
    }
}
