/// Shader module - stage kinds, stage objects and compiler output

pub mod shader_stage;
pub mod shader;
pub mod shader_reflection;
pub mod shader_source;
pub mod shader_compiler;

pub use shader_stage::*;
pub use shader::*;
pub use shader_reflection::*;
pub use shader_source::*;
pub use shader_compiler::*;
