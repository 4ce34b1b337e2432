//! In-memory wrapper for the gateway key secret.

use std::fmt;

use zeroize::Zeroize;

/// Gateway key secret, shared by order creation (basic auth) and callback
/// signature verification. Never printed; zeroed on drop.
#[derive(Clone)]
pub struct GatewaySecret {
    value: String,
}

impl GatewaySecret {
    #[must_use]
    pub fn new(value: String) -> Self {
        Self { value }
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for GatewaySecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GatewaySecret(**redacted**)")?;
        Ok(())
    }
}

impl Drop for GatewaySecret {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}
