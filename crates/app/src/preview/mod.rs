//! Social preview rendering.

mod renderer;

pub use renderer::*;
