/// Conversions from engine enums to Vulkan enums
///
/// Pure functions, no device required.

use ash::vk;
use obsidian_engine::obsidian::graphics_device::{
    TextureFormat, LoadOp, StoreOp, ImageLayout, PipelineBindPoint,
    PipelineStageFlags, AccessFlags, DependencyFlags,
    CompareOp, StencilOp, PrimitiveTopology, PolygonMode, CullMode, FrontFace,
    BlendFactor, BlendOp, ColorWriteMask, StencilTestInfo,
};
use obsidian_engine::obsidian::shader::{
    ShaderStage, ShaderType, VertexBufferElementType, VertexAttributeInputRate,
};

// ===== ATTACHMENTS =====

/// Convert TextureFormat to Vulkan format
pub(crate) fn texture_format_to_vk(format: TextureFormat) -> vk::Format {
    match format {
        TextureFormat::Undefined => vk::Format::UNDEFINED,
        TextureFormat::R8_UNORM => vk::Format::R8_UNORM,
        TextureFormat::R8G8B8A8_SRGB => vk::Format::R8G8B8A8_SRGB,
        TextureFormat::R8G8B8A8_UNORM => vk::Format::R8G8B8A8_UNORM,
        TextureFormat::B8G8R8A8_SRGB => vk::Format::B8G8R8A8_SRGB,
        TextureFormat::B8G8R8A8_UNORM => vk::Format::B8G8R8A8_UNORM,
        TextureFormat::A2B10G10R10_UNORM => vk::Format::A2B10G10R10_UNORM_PACK32,
        TextureFormat::R16G16B16A16_SFLOAT => vk::Format::R16G16B16A16_SFLOAT,
        TextureFormat::R32_SFLOAT => vk::Format::R32_SFLOAT,
        TextureFormat::R32G32B32A32_SFLOAT => vk::Format::R32G32B32A32_SFLOAT,
        TextureFormat::D16_UNORM => vk::Format::D16_UNORM,
        TextureFormat::D32_FLOAT => vk::Format::D32_SFLOAT,
        TextureFormat::D24_UNORM_S8_UINT => vk::Format::D24_UNORM_S8_UINT,
        TextureFormat::D32_FLOAT_S8_UINT => vk::Format::D32_SFLOAT_S8_UINT,
        TextureFormat::S8_UINT => vk::Format::S8_UINT,
    }
}

pub(crate) fn sample_count_to_vk(samples: u32) -> vk::SampleCountFlags {
    match samples {
        2 => vk::SampleCountFlags::TYPE_2,
        4 => vk::SampleCountFlags::TYPE_4,
        8 => vk::SampleCountFlags::TYPE_8,
        16 => vk::SampleCountFlags::TYPE_16,
        _ => vk::SampleCountFlags::TYPE_1,
    }
}

pub(crate) fn load_op_to_vk(load_op: LoadOp) -> vk::AttachmentLoadOp {
    match load_op {
        LoadOp::Load => vk::AttachmentLoadOp::LOAD,
        LoadOp::Clear => vk::AttachmentLoadOp::CLEAR,
        LoadOp::DontCare => vk::AttachmentLoadOp::DONT_CARE,
    }
}

pub(crate) fn store_op_to_vk(store_op: StoreOp) -> vk::AttachmentStoreOp {
    match store_op {
        StoreOp::Store => vk::AttachmentStoreOp::STORE,
        StoreOp::DontCare => vk::AttachmentStoreOp::DONT_CARE,
    }
}

pub(crate) fn image_layout_to_vk(layout: ImageLayout) -> vk::ImageLayout {
    match layout {
        ImageLayout::Undefined => vk::ImageLayout::UNDEFINED,
        ImageLayout::ColorAttachment => vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL,
        ImageLayout::DepthAttachment => vk::ImageLayout::DEPTH_ATTACHMENT_OPTIMAL,
        ImageLayout::DepthStencilAttachment => vk::ImageLayout::DEPTH_STENCIL_ATTACHMENT_OPTIMAL,
        ImageLayout::ShaderReadOnly => vk::ImageLayout::SHADER_READ_ONLY_OPTIMAL,
        ImageLayout::TransferSrc => vk::ImageLayout::TRANSFER_SRC_OPTIMAL,
        ImageLayout::TransferDst => vk::ImageLayout::TRANSFER_DST_OPTIMAL,
        ImageLayout::PresentSrc => vk::ImageLayout::PRESENT_SRC_KHR,
    }
}

pub(crate) fn bind_point_to_vk(bind_point: PipelineBindPoint) -> vk::PipelineBindPoint {
    match bind_point {
        PipelineBindPoint::Graphics => vk::PipelineBindPoint::GRAPHICS,
        PipelineBindPoint::Compute => vk::PipelineBindPoint::COMPUTE,
    }
}

/// Subpass index, mapping the engine's external marker to Vulkan's
pub(crate) fn subpass_to_vk(subpass: u32) -> u32 {
    if subpass == obsidian_engine::obsidian::graphics_device::SUBPASS_EXTERNAL {
        vk::SUBPASS_EXTERNAL
    } else {
        subpass
    }
}

pub(crate) fn pipeline_stages_to_vk(flags: PipelineStageFlags) -> vk::PipelineStageFlags {
    let mut vk_flags = vk::PipelineStageFlags::empty();
    if flags.contains(PipelineStageFlags::VERTEX_SHADER) { vk_flags |= vk::PipelineStageFlags::VERTEX_SHADER; }
    if flags.contains(PipelineStageFlags::EARLY_FRAGMENT_TESTS) { vk_flags |= vk::PipelineStageFlags::EARLY_FRAGMENT_TESTS; }
    if flags.contains(PipelineStageFlags::FRAGMENT_SHADER) { vk_flags |= vk::PipelineStageFlags::FRAGMENT_SHADER; }
    if flags.contains(PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT) { vk_flags |= vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT; }
    if flags.contains(PipelineStageFlags::COMPUTE_SHADER) { vk_flags |= vk::PipelineStageFlags::COMPUTE_SHADER; }
    if flags.contains(PipelineStageFlags::TRANSFER) { vk_flags |= vk::PipelineStageFlags::TRANSFER; }
    vk_flags
}

pub(crate) fn access_to_vk(flags: AccessFlags) -> vk::AccessFlags {
    let mut vk_flags = vk::AccessFlags::empty();
    if flags.contains(AccessFlags::SHADER_READ) { vk_flags |= vk::AccessFlags::SHADER_READ; }
    if flags.contains(AccessFlags::COLOR_ATTACHMENT_READ) { vk_flags |= vk::AccessFlags::COLOR_ATTACHMENT_READ; }
    if flags.contains(AccessFlags::COLOR_ATTACHMENT_WRITE) { vk_flags |= vk::AccessFlags::COLOR_ATTACHMENT_WRITE; }
    if flags.contains(AccessFlags::DEPTH_STENCIL_ATTACHMENT_WRITE) { vk_flags |= vk::AccessFlags::DEPTH_STENCIL_ATTACHMENT_WRITE; }
    if flags.contains(AccessFlags::TRANSFER_READ) { vk_flags |= vk::AccessFlags::TRANSFER_READ; }
    vk_flags
}

pub(crate) fn dependency_flags_to_vk(flags: DependencyFlags) -> vk::DependencyFlags {
    if flags.contains(DependencyFlags::BY_REGION) {
        vk::DependencyFlags::BY_REGION
    } else {
        vk::DependencyFlags::empty()
    }
}

// ===== SHADER STAGES =====

pub(crate) fn shader_stage_to_vk(stage: ShaderStage) -> vk::ShaderStageFlags {
    match stage {
        ShaderStage::Vertex => vk::ShaderStageFlags::VERTEX,
        ShaderStage::TessellationControl => vk::ShaderStageFlags::TESSELLATION_CONTROL,
        ShaderStage::Tessellation => vk::ShaderStageFlags::TESSELLATION_EVALUATION,
        ShaderStage::Geometry => vk::ShaderStageFlags::GEOMETRY,
        ShaderStage::Fragment => vk::ShaderStageFlags::FRAGMENT,
        ShaderStage::Compute => vk::ShaderStageFlags::COMPUTE,
    }
}

pub(crate) fn shader_type_to_vk(flags: ShaderType) -> vk::ShaderStageFlags {
    flags
        .stages()
        .fold(vk::ShaderStageFlags::empty(), |acc, stage| acc | shader_stage_to_vk(stage))
}

// ===== VERTEX INPUT =====

/// Convert a vertex element type to Vulkan format
pub(crate) fn element_type_to_vk(element_type: VertexBufferElementType) -> vk::Format {
    match element_type {
        VertexBufferElementType::Float1 => vk::Format::R32_SFLOAT,
        VertexBufferElementType::Float2 => vk::Format::R32G32_SFLOAT,
        VertexBufferElementType::Float3 => vk::Format::R32G32B32_SFLOAT,
        VertexBufferElementType::Float4 => vk::Format::R32G32B32A32_SFLOAT,
        VertexBufferElementType::Int1 => vk::Format::R32_SINT,
        VertexBufferElementType::Int2 => vk::Format::R32G32_SINT,
        VertexBufferElementType::Int3 => vk::Format::R32G32B32_SINT,
        VertexBufferElementType::Int4 => vk::Format::R32G32B32A32_SINT,
        VertexBufferElementType::UInt1 => vk::Format::R32_UINT,
        VertexBufferElementType::UInt2 => vk::Format::R32G32_UINT,
        VertexBufferElementType::UInt3 => vk::Format::R32G32B32_UINT,
        VertexBufferElementType::UInt4 => vk::Format::R32G32B32A32_UINT,
        VertexBufferElementType::Color => vk::Format::R8G8B8A8_UNORM,
    }
}

pub(crate) fn input_rate_to_vk(rate: VertexAttributeInputRate) -> vk::VertexInputRate {
    match rate {
        VertexAttributeInputRate::Vertex => vk::VertexInputRate::VERTEX,
        VertexAttributeInputRate::Instance => vk::VertexInputRate::INSTANCE,
    }
}

// ===== FIXED FUNCTION =====

pub(crate) fn topology_to_vk(topology: PrimitiveTopology) -> vk::PrimitiveTopology {
    match topology {
        PrimitiveTopology::TriangleList => vk::PrimitiveTopology::TRIANGLE_LIST,
        PrimitiveTopology::TriangleStrip => vk::PrimitiveTopology::TRIANGLE_STRIP,
        PrimitiveTopology::TriangleFan => vk::PrimitiveTopology::TRIANGLE_FAN,
        PrimitiveTopology::LineList => vk::PrimitiveTopology::LINE_LIST,
        PrimitiveTopology::LineStrip => vk::PrimitiveTopology::LINE_STRIP,
        PrimitiveTopology::PointList => vk::PrimitiveTopology::POINT_LIST,
    }
}

pub(crate) fn polygon_mode_to_vk(mode: PolygonMode) -> vk::PolygonMode {
    match mode {
        PolygonMode::Fill => vk::PolygonMode::FILL,
        PolygonMode::Line => vk::PolygonMode::LINE,
        PolygonMode::Point => vk::PolygonMode::POINT,
    }
}

pub(crate) fn cull_mode_to_vk(mode: CullMode) -> vk::CullModeFlags {
    match mode {
        CullMode::None => vk::CullModeFlags::NONE,
        CullMode::Front => vk::CullModeFlags::FRONT,
        CullMode::Back => vk::CullModeFlags::BACK,
        CullMode::FrontAndBack => vk::CullModeFlags::FRONT_AND_BACK,
    }
}

pub(crate) fn front_face_to_vk(face: FrontFace) -> vk::FrontFace {
    match face {
        FrontFace::CounterClockwise => vk::FrontFace::COUNTER_CLOCKWISE,
        FrontFace::Clockwise => vk::FrontFace::CLOCKWISE,
    }
}

pub(crate) fn compare_op_to_vk(op: CompareOp) -> vk::CompareOp {
    match op {
        CompareOp::Never => vk::CompareOp::NEVER,
        CompareOp::Less => vk::CompareOp::LESS,
        CompareOp::Equal => vk::CompareOp::EQUAL,
        CompareOp::LessOrEqual => vk::CompareOp::LESS_OR_EQUAL,
        CompareOp::Greater => vk::CompareOp::GREATER,
        CompareOp::NotEqual => vk::CompareOp::NOT_EQUAL,
        CompareOp::GreaterOrEqual => vk::CompareOp::GREATER_OR_EQUAL,
        CompareOp::Always => vk::CompareOp::ALWAYS,
    }
}

pub(crate) fn stencil_op_to_vk(op: StencilOp) -> vk::StencilOp {
    match op {
        StencilOp::Keep => vk::StencilOp::KEEP,
        StencilOp::Zero => vk::StencilOp::ZERO,
        StencilOp::Replace => vk::StencilOp::REPLACE,
        StencilOp::IncrementAndClamp => vk::StencilOp::INCREMENT_AND_CLAMP,
        StencilOp::DecrementAndClamp => vk::StencilOp::DECREMENT_AND_CLAMP,
        StencilOp::Invert => vk::StencilOp::INVERT,
        StencilOp::IncrementAndWrap => vk::StencilOp::INCREMENT_AND_WRAP,
        StencilOp::DecrementAndWrap => vk::StencilOp::DECREMENT_AND_WRAP,
    }
}

/// Stencil state applied to both faces
pub(crate) fn stencil_state_to_vk(info: &StencilTestInfo) -> vk::StencilOpState {
    vk::StencilOpState {
        fail_op: stencil_op_to_vk(info.fail),
        pass_op: stencil_op_to_vk(info.depth_pass),
        depth_fail_op: stencil_op_to_vk(info.depth_fail),
        compare_op: compare_op_to_vk(info.compare),
        compare_mask: u32::from(info.compare_mask),
        write_mask: u32::from(info.write_mask),
        reference: 0,
    }
}

pub(crate) fn blend_factor_to_vk(factor: BlendFactor) -> vk::BlendFactor {
    match factor {
        BlendFactor::Zero => vk::BlendFactor::ZERO,
        BlendFactor::One => vk::BlendFactor::ONE,
        BlendFactor::SrcColor => vk::BlendFactor::SRC_COLOR,
        BlendFactor::OneMinusSrcColor => vk::BlendFactor::ONE_MINUS_SRC_COLOR,
        BlendFactor::DstColor => vk::BlendFactor::DST_COLOR,
        BlendFactor::OneMinusDstColor => vk::BlendFactor::ONE_MINUS_DST_COLOR,
        BlendFactor::SrcAlpha => vk::BlendFactor::SRC_ALPHA,
        BlendFactor::OneMinusSrcAlpha => vk::BlendFactor::ONE_MINUS_SRC_ALPHA,
        BlendFactor::DstAlpha => vk::BlendFactor::DST_ALPHA,
        BlendFactor::OneMinusDstAlpha => vk::BlendFactor::ONE_MINUS_DST_ALPHA,
        BlendFactor::ConstantColor => vk::BlendFactor::CONSTANT_COLOR,
        BlendFactor::OneMinusConstantColor => vk::BlendFactor::ONE_MINUS_CONSTANT_COLOR,
        BlendFactor::SrcAlphaSaturate => vk::BlendFactor::SRC_ALPHA_SATURATE,
    }
}

pub(crate) fn blend_op_to_vk(op: BlendOp) -> vk::BlendOp {
    match op {
        BlendOp::Add => vk::BlendOp::ADD,
        BlendOp::Subtract => vk::BlendOp::SUBTRACT,
        BlendOp::ReverseSubtract => vk::BlendOp::REVERSE_SUBTRACT,
        BlendOp::Min => vk::BlendOp::MIN,
        BlendOp::Max => vk::BlendOp::MAX,
    }
}

pub(crate) fn color_write_mask_to_vk(mask: ColorWriteMask) -> vk::ColorComponentFlags {
    let mut flags = vk::ColorComponentFlags::empty();
    if mask.contains(ColorWriteMask::R) { flags |= vk::ColorComponentFlags::R; }
    if mask.contains(ColorWriteMask::G) { flags |= vk::ColorComponentFlags::G; }
    if mask.contains(ColorWriteMask::B) { flags |= vk::ColorComponentFlags::B; }
    if mask.contains(ColorWriteMask::A) { flags |= vk::ColorComponentFlags::A; }
    flags
}

#[cfg(test)]
#[path = "vulkan_format_tests.rs"]
mod tests;
