//! Unit tests for graphics_device/pipeline.rs

use crate::graphics_device::{
    CompareOp, StencilOp, PrimitiveTopology, PolygonMode, CullMode, FrontFace,
    BlendFactor, BlendOp, ColorWriteMask, DepthTestInfo, StencilTestInfo,
    AssemblyInfo, RasterizerInfo, ColorBlendingInfo, FixedFunctionState,
    PipelineDesc, PipelineStageDesc, PipelineBindPoint, VertexLayout,
};
use crate::shader::ShaderStage;

fn stage(stage: ShaderStage) -> PipelineStageDesc {
    PipelineStageDesc {
        stage,
        code: vec![0; 4],
        entry_point: "main".to_string(),
    }
}

fn desc(stages: Vec<PipelineStageDesc>) -> PipelineDesc {
    PipelineDesc {
        stages,
        fixed_function: FixedFunctionState::default(),
        vertex_layout: VertexLayout::default(),
        bindings: Vec::new(),
        render_pass: None,
    }
}

// ============================================================================
// DEFAULTS
// ============================================================================

#[test]
fn test_depth_test_defaults() {
    let depth = DepthTestInfo::default();
    assert!(depth.enable);
    assert!(depth.write_enable);
    assert_eq!(depth.func, CompareOp::Less);
}

#[test]
fn test_stencil_test_defaults() {
    let stencil = StencilTestInfo::default();
    assert!(!stencil.enable);
    assert_eq!(stencil.fail, StencilOp::DecrementAndClamp);
    assert_eq!(stencil.depth_pass, StencilOp::DecrementAndClamp);
    assert_eq!(stencil.depth_fail, StencilOp::DecrementAndClamp);
    assert_eq!(stencil.compare, CompareOp::Less);
    assert_eq!(stencil.compare_mask, 0);
    assert_eq!(stencil.write_mask, 0);
}

#[test]
fn test_assembly_and_rasterizer_defaults() {
    assert_eq!(AssemblyInfo::default().primitive_topology, PrimitiveTopology::TriangleList);

    let raster = RasterizerInfo::default();
    assert_eq!(raster.polygon_mode, PolygonMode::Fill);
    assert_eq!(raster.cull_mode, CullMode::None);
    assert_eq!(raster.front_face, FrontFace::Clockwise);
    assert_eq!(raster.line_width, 1.0);
}

#[test]
fn test_color_blending_defaults() {
    let blend = ColorBlendingInfo::default();
    assert!(!blend.enable);
    assert_eq!(blend.src_color_func, BlendFactor::SrcAlpha);
    assert_eq!(blend.dst_color_func, BlendFactor::OneMinusSrcAlpha);
    assert_eq!(blend.color_op, BlendOp::Add);
    assert_eq!(blend.src_alpha_func, BlendFactor::One);
    assert_eq!(blend.dst_alpha_func, BlendFactor::Zero);
    assert_eq!(blend.alpha_op, BlendOp::Add);
    assert_eq!(blend.color_mask, ColorWriteMask::RGBA);
}

#[test]
fn test_color_write_mask_rgba_is_all_channels() {
    assert_eq!(
        ColorWriteMask::RGBA,
        ColorWriteMask::R | ColorWriteMask::G | ColorWriteMask::B | ColorWriteMask::A
    );
    assert_eq!(ColorWriteMask::RGBA, ColorWriteMask::all());
}

#[test]
fn test_fixed_function_state_inequality_on_change() {
    let a = FixedFunctionState::default();
    let mut b = a;
    assert_eq!(a, b);
    b.rasterizer.cull_mode = CullMode::Back;
    assert_ne!(a, b);
}

// ============================================================================
// BIND POINT
// ============================================================================

#[test]
fn test_bind_point_graphics() {
    let d = desc(vec![stage(ShaderStage::Vertex), stage(ShaderStage::Fragment)]);
    assert_eq!(d.bind_point(), PipelineBindPoint::Graphics);
}

#[test]
fn test_bind_point_compute() {
    let d = desc(vec![stage(ShaderStage::Compute)]);
    assert_eq!(d.bind_point(), PipelineBindPoint::Compute);
}
