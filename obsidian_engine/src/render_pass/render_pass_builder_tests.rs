//! Unit tests for render_pass_builder.rs

use crate::error::Error;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::graphics_device::{
    GraphicsDevice, TextureFormat, LoadOp, StoreOp, ImageLayout, PipelineBindPoint,
    PipelineStageFlags, AccessFlags, DependencyFlags, SUBPASS_EXTERNAL,
};
use crate::render_pass::{RenderPassBuilder, RenderPassKey, depth_reference_layout};

fn dst_stages() -> PipelineStageFlags {
    PipelineStageFlags::VERTEX_SHADER
        | PipelineStageFlags::FRAGMENT_SHADER
        | PipelineStageFlags::COMPUTE_SHADER
        | PipelineStageFlags::TRANSFER
}

// ============================================================================
// ATTACHMENT DESCRIPTIONS
// ============================================================================

#[test]
fn test_color_attachments_load_store() {
    let desc = RenderPassBuilder::with_attachments(
        &[TextureFormat::R8G8B8A8_UNORM, TextureFormat::R16G16B16A16_SFLOAT],
        None,
    ).desc();

    assert_eq!(desc.attachments.len(), 2);
    for (attachment, format) in desc.attachments.iter().zip([
        TextureFormat::R8G8B8A8_UNORM,
        TextureFormat::R16G16B16A16_SFLOAT,
    ]) {
        assert_eq!(attachment.format, format);
        assert_eq!(attachment.samples, 1);
        assert_eq!(attachment.load_op, LoadOp::Load);
        assert_eq!(attachment.store_op, StoreOp::Store);
        assert_eq!(attachment.stencil_load_op, LoadOp::DontCare);
        assert_eq!(attachment.stencil_store_op, StoreOp::DontCare);
        assert_eq!(attachment.initial_layout, ImageLayout::ColorAttachment);
        assert_eq!(attachment.final_layout, ImageLayout::ColorAttachment);
    }
}

#[test]
fn test_stencil_ops_per_format_class() {
    // (format, expected stencil ops, expected description layout, expected reference layout)
    let cases = [
        (TextureFormat::D32_FLOAT, LoadOp::DontCare, StoreOp::DontCare, ImageLayout::DepthAttachment, ImageLayout::DepthAttachment),
        (TextureFormat::D16_UNORM, LoadOp::DontCare, StoreOp::DontCare, ImageLayout::DepthAttachment, ImageLayout::DepthAttachment),
        (TextureFormat::D24_UNORM_S8_UINT, LoadOp::Load, StoreOp::Store, ImageLayout::DepthStencilAttachment, ImageLayout::DepthStencilAttachment),
        (TextureFormat::D32_FLOAT_S8_UINT, LoadOp::Load, StoreOp::Store, ImageLayout::DepthStencilAttachment, ImageLayout::DepthStencilAttachment),
        (TextureFormat::S8_UINT, LoadOp::Load, StoreOp::Store, ImageLayout::DepthStencilAttachment, ImageLayout::DepthStencilAttachment),
    ];

    for (format, stencil_load, stencil_store, layout, reference_layout) in cases {
        let desc = RenderPassBuilder::with_attachments(&[TextureFormat::R8G8B8A8_UNORM], Some(format)).desc();
        let depth = desc.attachments[1];

        assert_eq!(depth.format, format);
        assert_eq!(depth.load_op, LoadOp::Load, "{:?}", format);
        assert_eq!(depth.store_op, StoreOp::Store, "{:?}", format);
        assert_eq!(depth.stencil_load_op, stencil_load, "{:?}", format);
        assert_eq!(depth.stencil_store_op, stencil_store, "{:?}", format);
        assert_eq!(depth.initial_layout, layout, "{:?}", format);
        assert_eq!(depth.final_layout, layout, "{:?}", format);

        let reference = desc.subpass.depth_stencil_attachment.unwrap();
        assert_eq!(reference.layout, reference_layout, "{:?}", format);
    }
}

#[test]
fn test_depth_reference_layout_fallback() {
    assert_eq!(depth_reference_layout(TextureFormat::R8G8B8A8_UNORM), ImageLayout::DepthStencilAttachment);
    assert_eq!(depth_reference_layout(TextureFormat::D16_UNORM), ImageLayout::DepthAttachment);
}

// ============================================================================
// REFERENCES AND SUBPASS
// ============================================================================

#[test]
fn test_references_index_colors_then_depth() {
    let desc = RenderPassBuilder::with_attachments(
        &[
            TextureFormat::R8G8B8A8_UNORM,
            TextureFormat::R8G8B8A8_UNORM,
            TextureFormat::R32_SFLOAT,
        ],
        Some(TextureFormat::D32_FLOAT),
    ).desc();

    assert_eq!(desc.subpass.bind_point, PipelineBindPoint::Graphics);
    assert_eq!(desc.subpass.color_attachments.len(), 3);
    for (i, reference) in desc.subpass.color_attachments.iter().enumerate() {
        assert_eq!(reference.attachment, i as u32);
        assert_eq!(reference.layout, ImageLayout::ColorAttachment);
    }
    assert_eq!(desc.subpass.depth_stencil_attachment.unwrap().attachment, 3);
}

#[test]
fn test_depth_set_before_colors_still_indexes_last() {
    let mut builder = RenderPassBuilder::new();
    builder.set_depth_stencil_attachment(TextureFormat::D32_FLOAT);
    builder.add_color_attachment(TextureFormat::R8G8B8A8_UNORM);
    builder.add_color_attachment(TextureFormat::R8G8B8A8_UNORM);

    let desc = builder.desc();
    assert_eq!(desc.attachments.len(), 3);
    assert_eq!(desc.attachments[2].format, TextureFormat::D32_FLOAT);
    assert_eq!(desc.subpass.depth_stencil_attachment.unwrap().attachment, 2);
}

#[test]
fn test_no_depth_reference_without_depth() {
    let desc = RenderPassBuilder::swapchain(TextureFormat::B8G8R8A8_SRGB).desc();
    assert!(desc.subpass.depth_stencil_attachment.is_none());
    assert_eq!(desc.attachments.len(), 1);
}

// ============================================================================
// DEPENDENCY
// ============================================================================

#[test]
fn test_dependency_without_depth() {
    let dependency = RenderPassBuilder::swapchain(TextureFormat::B8G8R8A8_SRGB).desc().dependency;

    assert_eq!(dependency.src_subpass, 0);
    assert_eq!(dependency.dst_subpass, SUBPASS_EXTERNAL);
    assert_eq!(dependency.src_stage_mask, PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT);
    assert_eq!(dependency.dst_stage_mask, dst_stages());
    assert_eq!(
        dependency.src_access_mask,
        AccessFlags::COLOR_ATTACHMENT_WRITE | AccessFlags::COLOR_ATTACHMENT_READ
    );
    assert_eq!(dependency.dst_access_mask, AccessFlags::SHADER_READ | AccessFlags::TRANSFER_READ);
    assert_eq!(dependency.dependency_flags, DependencyFlags::BY_REGION);
}

#[test]
fn test_dependency_with_depth() {
    let dependency = RenderPassBuilder::with_attachments(
        &[TextureFormat::R8G8B8A8_UNORM],
        Some(TextureFormat::D24_UNORM_S8_UINT),
    ).desc().dependency;

    assert_eq!(
        dependency.src_stage_mask,
        PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT | PipelineStageFlags::EARLY_FRAGMENT_TESTS
    );
    assert_eq!(dependency.dst_stage_mask, dst_stages());
    assert_eq!(
        dependency.src_access_mask,
        AccessFlags::COLOR_ATTACHMENT_WRITE
            | AccessFlags::COLOR_ATTACHMENT_READ
            | AccessFlags::DEPTH_STENCIL_ATTACHMENT_WRITE
    );
}

// ============================================================================
// KEY ROUND TRIP AND BUILD
// ============================================================================

#[test]
fn test_from_key_matches_with_attachments() {
    let colors = [TextureFormat::R8G8B8A8_UNORM, TextureFormat::R32_SFLOAT];
    let key = RenderPassKey::from_formats(&colors, Some(TextureFormat::D32_FLOAT)).unwrap();

    assert_eq!(
        RenderPassBuilder::from_key(&key).desc(),
        RenderPassBuilder::with_attachments(&colors, Some(TextureFormat::D32_FLOAT)).desc()
    );
}

#[test]
fn test_swapchain_matches_single_color() {
    assert_eq!(
        RenderPassBuilder::swapchain(TextureFormat::B8G8R8A8_UNORM).desc(),
        RenderPassBuilder::with_attachments(&[TextureFormat::B8G8R8A8_UNORM], None).desc()
    );
}

#[test]
fn test_build_hands_desc_to_device() {
    let mut device = MockGraphicsDevice::new();
    let builder = RenderPassBuilder::swapchain(TextureFormat::B8G8R8A8_SRGB);

    let _pass = builder.build(&mut device).unwrap();

    assert_eq!(device.render_passes_created, 1);
    assert_eq!(device.render_pass_descs[0], builder.desc());
}

#[test]
fn test_build_failure_is_construction_failure() {
    let mut device = MockGraphicsDevice::new();
    device.fail_next_render_passes(1);

    let result = RenderPassBuilder::swapchain(TextureFormat::B8G8R8A8_SRGB).build(&mut device);

    assert!(matches!(result, Err(Error::ConstructionFailure(_))));
    assert_eq!(device.render_passes_created, 0);
}

#[test]
fn test_build_through_trait_object() {
    let mut device = MockGraphicsDevice::new();
    let dyn_device: &mut dyn GraphicsDevice = &mut device;
    let pass = RenderPassBuilder::new().build(dyn_device);
    assert!(pass.is_ok());
    assert_eq!(device.render_pass_descs[0].attachments.len(), 0);
}
