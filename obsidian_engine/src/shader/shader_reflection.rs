/// Reflected shader metadata: vertex inputs and uniform parameters

use serde::{Deserialize, Serialize};
use crate::shader::ShaderType;

// ===== VERTEX ATTRIBUTES =====

/// Element type of a vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexBufferElementType {
    Float1,
    Float2,
    Float3,
    Float4,
    Int1,
    Int2,
    Int3,
    Int4,
    UInt1,
    UInt2,
    UInt3,
    UInt4,
    /// Four normalized unsigned bytes
    Color,
}

impl VertexBufferElementType {
    /// Size in bytes of one element
    pub fn size_bytes(&self) -> u32 {
        match self {
            Self::Float1 | Self::Int1 | Self::UInt1 | Self::Color => 4,
            Self::Float2 | Self::Int2 | Self::UInt2 => 8,
            Self::Float3 | Self::Int3 | Self::UInt3 => 12,
            Self::Float4 | Self::Int4 | Self::UInt4 => 16,
        }
    }

    /// Number of components
    pub fn component_count(&self) -> u32 {
        match self {
            Self::Float1 | Self::Int1 | Self::UInt1 => 1,
            Self::Float2 | Self::Int2 | Self::UInt2 => 2,
            Self::Float3 | Self::Int3 | Self::UInt3 => 3,
            Self::Float4 | Self::Int4 | Self::UInt4 | Self::Color => 4,
        }
    }
}

/// Vertex input rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexAttributeInputRate {
    /// Data is per-vertex
    Vertex,
    /// Data is per-instance
    Instance,
}

/// Semantic of a vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexBufferSemantic {
    Position,
    TexCoord,
    Color,
    Normal,
    Tangent,
    Bitangent,
    BlendWeight,
    BlendIndices,
}

/// Vertex attribute consumed by the vertex stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexAttribute {
    pub name: String,
    pub element_type: VertexBufferElementType,
    pub rate: VertexAttributeInputRate,
    pub semantic: VertexBufferSemantic,
    pub semantic_index: u8,
    pub location: u8,
    /// Vertex stream (binding) the attribute is read from
    pub stream_index: u8,
    /// Byte offset inside the stream element
    pub offset: u16,
}

// ===== UNIFORM PARAMETERS =====

/// Type of a uniform parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialParameterType {
    Bool,
    Int,
    UInt,
    Float,
    Vec2,
    Vec3,
    Vec4,
    IVec2,
    IVec3,
    IVec4,
    UVec2,
    UVec3,
    UVec4,
    Mat3,
    Mat4,
    /// Opaque or unrecognized block member
    Undefined,
}

/// Uniform parameter declared by one or more stages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialParameterInfo {
    pub name: String,
    pub param_type: MaterialParameterType,
    /// Byte offset inside the uniform block
    pub offset: u32,
    /// Size in bytes
    pub size: u32,
    /// Uniform block binding slot
    pub binding: u32,
    /// Stages that declare the parameter
    pub stages: ShaderType,
}

// ===== REFLECTION =====

/// Reflection output of the shader compiler
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderReflection {
    pub attributes: Vec<VertexAttribute>,
    pub uniform_member_infos: Vec<MaterialParameterInfo>,
}

impl ShaderReflection {
    pub fn clear(&mut self) -> &mut Self {
        self.uniform_member_infos.clear();
        self.attributes.clear();
        self
    }

    /// Returns true if nothing was reflected
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.uniform_member_infos.is_empty()
    }
}
