/// Pipeline trait, fixed-function state groups and pipeline descriptor

use std::sync::Arc;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use crate::graphics_device::{RenderPass, PipelineBindPoint};
use crate::shader::{ShaderStage, ShaderType, VertexAttributeInputRate, VertexBufferElementType};

// ===== FIXED-FUNCTION ENUMS =====

/// Comparison operator for depth and stencil tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    /// Never pass
    Never,
    /// Pass if value < reference
    Less,
    /// Pass if value == reference
    Equal,
    /// Pass if value <= reference
    LessOrEqual,
    /// Pass if value > reference
    Greater,
    /// Pass if value != reference
    NotEqual,
    /// Pass if value >= reference
    GreaterOrEqual,
    /// Always pass
    Always,
}

/// Stencil operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StencilOp {
    /// Keep current value
    Keep,
    /// Set to zero
    Zero,
    /// Replace with reference value
    Replace,
    /// Increment and clamp to max
    IncrementAndClamp,
    /// Decrement and clamp to zero
    DecrementAndClamp,
    /// Bitwise invert
    Invert,
    /// Increment and wrap around
    IncrementAndWrap,
    /// Decrement and wrap around
    DecrementAndWrap,
}

/// Primitive topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveTopology {
    /// Triangle list
    TriangleList,
    /// Triangle strip
    TriangleStrip,
    /// Triangle fan
    TriangleFan,
    /// Line list
    LineList,
    /// Line strip
    LineStrip,
    /// Point list
    PointList,
}

/// Polygon rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolygonMode {
    /// Fill polygons
    Fill,
    /// Draw edges only (wireframe)
    Line,
    /// Draw vertices only
    Point,
}

/// Face culling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CullMode {
    /// No culling
    None,
    /// Cull front faces
    Front,
    /// Cull back faces
    Back,
    /// Cull both faces
    FrontAndBack,
}

/// Front face winding order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrontFace {
    /// Counter-clockwise vertices define front face
    CounterClockwise,
    /// Clockwise vertices define front face
    Clockwise,
}

/// Blend factor for color blending equations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    DstColor,
    OneMinusDstColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
    ConstantColor,
    OneMinusConstantColor,
    SrcAlphaSaturate,
}

/// Blend operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlendOp {
    /// result = src * srcFactor + dst * dstFactor
    Add,
    /// result = src * srcFactor - dst * dstFactor
    Subtract,
    /// result = dst * dstFactor - src * srcFactor
    ReverseSubtract,
    /// result = min(src, dst)
    Min,
    /// result = max(src, dst)
    Max,
}

bitflags! {
    /// Color channels written by the blend stage
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ColorWriteMask: u8 {
        const R = 1 << 0;
        const G = 1 << 1;
        const B = 1 << 2;
        const A = 1 << 3;
        const RGBA = Self::R.bits() | Self::G.bits() | Self::B.bits() | Self::A.bits();
    }
}

// ===== FIXED-FUNCTION STATE GROUPS =====

/// Depth testing state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthTestInfo {
    /// Depth comparison operator
    pub func: CompareOp,
    /// Enable depth testing
    pub enable: bool,
    /// Enable writing to depth buffer
    pub write_enable: bool,
}

impl Default for DepthTestInfo {
    fn default() -> Self {
        Self {
            func: CompareOp::Less,
            enable: true,
            write_enable: true,
        }
    }
}

/// Stencil testing state (shared by front and back faces)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StencilTestInfo {
    /// Enable stencil testing
    pub enable: bool,
    /// Action on stencil test fail
    pub fail: StencilOp,
    /// Action on stencil pass + depth pass
    pub depth_pass: StencilOp,
    /// Action on stencil pass + depth fail
    pub depth_fail: StencilOp,
    /// Comparison operator
    pub compare: CompareOp,
    /// Bits of stencil buffer read for compare
    pub compare_mask: u8,
    /// Bits of stencil buffer written
    pub write_mask: u8,
}

impl Default for StencilTestInfo {
    fn default() -> Self {
        Self {
            enable: false,
            fail: StencilOp::DecrementAndClamp,
            depth_pass: StencilOp::DecrementAndClamp,
            depth_fail: StencilOp::DecrementAndClamp,
            compare: CompareOp::Less,
            compare_mask: 0,
            write_mask: 0,
        }
    }
}

/// Input assembly state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssemblyInfo {
    pub primitive_topology: PrimitiveTopology,
}

impl Default for AssemblyInfo {
    fn default() -> Self {
        Self {
            primitive_topology: PrimitiveTopology::TriangleList,
        }
    }
}

/// Rasterization state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterizerInfo {
    /// Polygon rendering mode
    pub polygon_mode: PolygonMode,
    /// Face culling mode
    pub cull_mode: CullMode,
    /// Front face winding order
    pub front_face: FrontFace,
    /// Rasterized line width
    pub line_width: f32,
}

impl Default for RasterizerInfo {
    fn default() -> Self {
        Self {
            polygon_mode: PolygonMode::Fill,
            cull_mode: CullMode::None,
            front_face: FrontFace::Clockwise,
            line_width: 1.0,
        }
    }
}

/// Color blending state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorBlendingInfo {
    /// Enable blending
    pub enable: bool,
    /// Source color blend factor
    pub src_color_func: BlendFactor,
    /// Destination color blend factor
    pub dst_color_func: BlendFactor,
    /// Color blend operation
    pub color_op: BlendOp,
    /// Source alpha blend factor
    pub src_alpha_func: BlendFactor,
    /// Destination alpha blend factor
    pub dst_alpha_func: BlendFactor,
    /// Alpha blend operation
    pub alpha_op: BlendOp,
    /// Color write mask
    pub color_mask: ColorWriteMask,
}

impl Default for ColorBlendingInfo {
    fn default() -> Self {
        Self {
            enable: false,
            src_color_func: BlendFactor::SrcAlpha,
            dst_color_func: BlendFactor::OneMinusSrcAlpha,
            color_op: BlendOp::Add,
            src_alpha_func: BlendFactor::One,
            dst_alpha_func: BlendFactor::Zero,
            alpha_op: BlendOp::Add,
            color_mask: ColorWriteMask::RGBA,
        }
    }
}

/// All fixed-function groups of a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FixedFunctionState {
    pub depth_test: DepthTestInfo,
    pub stencil_test: StencilTestInfo,
    pub input_assembly: AssemblyInfo,
    pub rasterizer: RasterizerInfo,
    pub color_blending: ColorBlendingInfo,
}

// ===== VERTEX INPUT =====

/// Vertex attribute description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexInputAttribute {
    /// Attribute location in shader
    pub location: u32,
    /// Binding index (vertex stream)
    pub binding: u32,
    /// Element type of the attribute
    pub element_type: VertexBufferElementType,
    /// Offset in bytes from the start of the vertex
    pub offset: u32,
}

/// Vertex binding description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexInputBinding {
    /// Binding index (vertex stream)
    pub binding: u32,
    /// Stride in bytes between consecutive elements
    pub stride: u32,
    /// Input rate (per-vertex or per-instance)
    pub input_rate: VertexAttributeInputRate,
}

/// Vertex input layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexLayout {
    /// Vertex bindings
    pub bindings: Vec<VertexInputBinding>,
    /// Vertex attributes
    pub attributes: Vec<VertexInputAttribute>,
}

// ===== DESCRIPTOR BINDINGS =====

/// Uniform buffer binding visible to a set of stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorBinding {
    /// Binding slot in descriptor set 0
    pub binding: u32,
    /// Size in bytes of the uniform block
    pub size: u32,
    /// Stages reading the binding
    pub stages: ShaderType,
}

// ===== PIPELINE DESC =====

/// One programmable stage of a pipeline descriptor
#[derive(Debug, Clone)]
pub struct PipelineStageDesc {
    /// Stage kind
    pub stage: ShaderStage,
    /// Backend bytecode (SPIR-V for Vulkan)
    pub code: Vec<u8>,
    /// Entry point name
    pub entry_point: String,
}

/// Descriptor for creating a graphics or compute pipeline
#[derive(Clone)]
pub struct PipelineDesc {
    /// Programmable stages, in stage order
    pub stages: Vec<PipelineStageDesc>,
    /// Fixed-function state (ignored for compute)
    pub fixed_function: FixedFunctionState,
    /// Vertex input layout (ignored for compute)
    pub vertex_layout: VertexLayout,
    /// Uniform buffer bindings
    pub bindings: Vec<DescriptorBinding>,
    /// Render pass the pipeline is compatible with (None for compute)
    pub render_pass: Option<Arc<dyn RenderPass>>,
}

impl PipelineDesc {
    /// Bind point derived from the stage list
    pub fn bind_point(&self) -> PipelineBindPoint {
        let graphics = self.stages.iter().any(|s| s.stage != ShaderStage::Compute);
        if !graphics && self.stages.iter().any(|s| s.stage == ShaderStage::Compute) {
            PipelineBindPoint::Compute
        } else {
            PipelineBindPoint::Graphics
        }
    }
}

// ===== PIPELINE TRAIT =====

/// Pipeline trait
///
/// Native pipeline object. Released when the last reference is dropped.
pub trait Pipeline: Send + Sync {
    /// Bind point this pipeline was created for
    fn bind_point(&self) -> PipelineBindPoint;
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
