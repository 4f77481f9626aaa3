/// Shader stage object owned by a pipeline

use crate::shader::ShaderStage;

/// Default entry point name
pub const DEFAULT_ENTRY_POINT: &str = "main";

/// One programmable stage of a pipeline: bytecode plus entry point
///
/// Created empty by `Pipeline::allocate_shaders` and filled by
/// `Pipeline::submit_compiled_source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shader {
    stage: ShaderStage,
    code: Vec<u8>,
    entry_point: String,
}

impl Shader {
    /// Create an empty shader for the given stage
    pub fn new(stage: ShaderStage) -> Self {
        Self {
            stage,
            code: Vec::new(),
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
        }
    }

    /// Stage this shader belongs to
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Backend bytecode
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    /// Entry point name
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    pub fn set_entry_point(&mut self, entry_point: impl Into<String>) {
        self.entry_point = entry_point.into();
    }

    /// Replace the bytecode
    pub fn upload(&mut self, code: &[u8]) {
        self.code.clear();
        self.code.extend_from_slice(code);
    }

    /// Returns true if no bytecode has been uploaded
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}
