/// Pipeline module - shader stage slots, parameter table and backend lifecycle

pub mod pipeline;
pub mod pipeline_layout;
pub mod pipeline_archive;

pub use pipeline::*;
pub use pipeline_layout::*;
pub use pipeline_archive::*;
