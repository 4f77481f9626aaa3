/// Compiled shader output: per-stage bytecode plus reflection

use crate::shader::{ShaderReflection, ShaderStage, ShaderType};

/// Output of a shader compiler, consumed by `Pipeline::submit_compiled_source`
///
/// An empty code buffer means the stage is absent.
#[derive(Debug, Clone, Default)]
pub struct ShaderSource {
    pub vertex_code: Vec<u8>,
    pub tessellation_control_code: Vec<u8>,
    pub tessellation_code: Vec<u8>,
    pub geometry_code: Vec<u8>,
    pub fragment_code: Vec<u8>,
    pub compute_code: Vec<u8>,
    pub reflection: ShaderReflection,
}

impl ShaderSource {
    /// Bytecode of a stage (empty if absent)
    pub fn code(&self, stage: ShaderStage) -> &[u8] {
        match stage {
            ShaderStage::Vertex => &self.vertex_code,
            ShaderStage::TessellationControl => &self.tessellation_control_code,
            ShaderStage::Tessellation => &self.tessellation_code,
            ShaderStage::Geometry => &self.geometry_code,
            ShaderStage::Fragment => &self.fragment_code,
            ShaderStage::Compute => &self.compute_code,
        }
    }

    /// Mutable bytecode buffer of a stage
    pub fn code_mut(&mut self, stage: ShaderStage) -> &mut Vec<u8> {
        match stage {
            ShaderStage::Vertex => &mut self.vertex_code,
            ShaderStage::TessellationControl => &mut self.tessellation_control_code,
            ShaderStage::Tessellation => &mut self.tessellation_code,
            ShaderStage::Geometry => &mut self.geometry_code,
            ShaderStage::Fragment => &mut self.fragment_code,
            ShaderStage::Compute => &mut self.compute_code,
        }
    }

    /// Set of stages carrying bytecode
    pub fn stage_flags(&self) -> ShaderType {
        ShaderStage::ALL
            .into_iter()
            .filter(|stage| !self.code(*stage).is_empty())
            .fold(ShaderType::empty(), |flags, stage| flags | stage.flag())
    }

    pub fn has_valid_graphical_pipeline(&self) -> bool {
        self.has_vertex_shader() && self.has_fragment_shader()
    }

    pub fn has_valid_compute_pipeline(&self) -> bool {
        self.has_compute_shader()
    }

    pub fn has_vertex_shader(&self) -> bool {
        !self.vertex_code.is_empty()
    }

    pub fn has_tessellation_control_shader(&self) -> bool {
        !self.tessellation_control_code.is_empty()
    }

    pub fn has_tessellation_shader(&self) -> bool {
        !self.tessellation_code.is_empty()
    }

    pub fn has_geometry_shader(&self) -> bool {
        !self.geometry_code.is_empty()
    }

    pub fn has_fragment_shader(&self) -> bool {
        !self.fragment_code.is_empty()
    }

    pub fn has_compute_shader(&self) -> bool {
        !self.compute_code.is_empty()
    }
}

#[cfg(test)]
#[path = "shader_source_tests.rs"]
mod tests;
