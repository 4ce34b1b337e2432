//! Order confirmation email delivery.

mod client;
mod dispatcher;
pub mod template;

pub use client::*;
pub use dispatcher::{OrderNotifier, spawn_dispatcher};
