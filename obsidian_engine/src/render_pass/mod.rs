/// Render pass module - attachment keys, pass construction and the pass cache

pub mod render_pass_key;
pub mod render_pass_builder;
pub mod render_pass_cache;

pub use render_pass_key::*;
pub use render_pass_builder::*;
pub use render_pass_cache::*;
