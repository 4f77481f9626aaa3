/*!
# Obsidian Engine

Backend-agnostic core of the Obsidian renderer: render pass caching and
programmable pipelines.

Backends (Vulkan today) implement the `GraphicsDevice` trait; everything in
this crate talks to the device only through that trait, so it can be driven
by a mock device in unit tests.

## Architecture

- **GraphicsDevice**: Factory trait for render passes, pipelines and command lists
- **RenderPassCache**: Deduplicates render passes by attachment format signature
- **Pipeline**: Shader stage slots, fixed-function state, merged parameter table
- **ShaderSource**: Compiled stage bytecode plus reflection, as produced by a `ShaderCompiler`
- **Engine**: Global logger routing
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod render_pass;
pub mod shader;
pub mod pipeline;

// Main obsidian namespace module
pub mod obsidian {
    // Error types
    pub use crate::error::{Error, Result};

    // Logger routing
    pub use crate::engine::Engine;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Device abstraction
    pub mod graphics_device {
        pub use crate::graphics_device::*;
    }

    // Render pass keys, builder and cache
    pub mod render_pass {
        pub use crate::render_pass::*;
    }

    // Shader stages, sources and reflection
    pub mod shader {
        pub use crate::shader::*;
    }

    // Pipelines
    pub mod pipeline {
        pub use crate::pipeline::*;
    }
}
