/// Programmable shader stages and the stage bit set

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShaderStage {
    Vertex,
    TessellationControl,
    Tessellation,
    Geometry,
    Fragment,
    Compute,
}

/// Number of stage slots a pipeline holds
pub const SHADER_STAGE_COUNT: usize = 6;

bitflags! {
    /// Set of shader stages
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    pub struct ShaderType: u32 {
        const VERTEX = 1 << 0;
        const TESSELLATION_CONTROL = 1 << 1;
        const TESSELLATION = 1 << 2;
        const GEOMETRY = 1 << 3;
        const FRAGMENT = 1 << 4;
        const COMPUTE = 1 << 5;
    }
}

impl ShaderStage {
    /// All stages in slot order
    pub const ALL: [ShaderStage; SHADER_STAGE_COUNT] = [
        ShaderStage::Vertex,
        ShaderStage::TessellationControl,
        ShaderStage::Tessellation,
        ShaderStage::Geometry,
        ShaderStage::Fragment,
        ShaderStage::Compute,
    ];

    /// Slot index of the stage (0..SHADER_STAGE_COUNT)
    pub fn index(&self) -> usize {
        match self {
            ShaderStage::Vertex => 0,
            ShaderStage::TessellationControl => 1,
            ShaderStage::Tessellation => 2,
            ShaderStage::Geometry => 3,
            ShaderStage::Fragment => 4,
            ShaderStage::Compute => 5,
        }
    }

    /// Bit matching this stage
    pub fn flag(&self) -> ShaderType {
        match self {
            ShaderStage::Vertex => ShaderType::VERTEX,
            ShaderStage::TessellationControl => ShaderType::TESSELLATION_CONTROL,
            ShaderStage::Tessellation => ShaderType::TESSELLATION,
            ShaderStage::Geometry => ShaderType::GEOMETRY,
            ShaderStage::Fragment => ShaderType::FRAGMENT,
            ShaderStage::Compute => ShaderType::COMPUTE,
        }
    }

    /// Human-readable stage name
    pub fn name(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "Vertex",
            ShaderStage::TessellationControl => "TessellationControl",
            ShaderStage::Tessellation => "Tessellation",
            ShaderStage::Geometry => "Geometry",
            ShaderStage::Fragment => "Fragment",
            ShaderStage::Compute => "Compute",
        }
    }
}

impl ShaderType {
    /// Stages required for a graphics pipeline
    pub const GRAPHICS_REQUIRED: ShaderType = ShaderType::VERTEX.union(ShaderType::FRAGMENT);

    /// Every stage that can take part in a graphics pipeline
    pub const GRAPHICS_ALL: ShaderType = ShaderType::VERTEX
        .union(ShaderType::TESSELLATION_CONTROL)
        .union(ShaderType::TESSELLATION)
        .union(ShaderType::GEOMETRY)
        .union(ShaderType::FRAGMENT);

    /// Stages contained in this set, in slot order
    pub fn stages(self) -> impl Iterator<Item = ShaderStage> {
        ShaderStage::ALL.into_iter().filter(move |stage| self.contains(stage.flag()))
    }

    /// Returns true if vertex and fragment stages are both present
    pub fn is_valid_graphical(&self) -> bool {
        self.contains(ShaderType::GRAPHICS_REQUIRED)
    }

    /// Returns true if the compute stage is present
    pub fn is_valid_compute(&self) -> bool {
        self.contains(ShaderType::COMPUTE)
    }
}

impl From<ShaderStage> for ShaderType {
    fn from(stage: ShaderStage) -> Self {
        stage.flag()
    }
}

#[cfg(test)]
#[path = "shader_stage_tests.rs"]
mod tests;
