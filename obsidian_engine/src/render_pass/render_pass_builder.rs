/// Render pass construction from attachment formats
///
/// Every pass built here has one graphics subpass and one dependency from
/// that subpass to external work, so its results can be sampled or copied
/// by anything recorded afterwards.

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{
    GraphicsDevice, RenderPass, RenderPassDesc, AttachmentDesc, AttachmentReference,
    SubpassDesc, SubpassDependency, PipelineBindPoint, LoadOp, StoreOp, ImageLayout,
    PipelineStageFlags, AccessFlags, DependencyFlags, TextureFormat, FormatClass,
    SUBPASS_EXTERNAL,
};
use crate::render_pass::RenderPassKey;

/// Attachment description with Load/Store on every aspect that exists
pub fn attachment_description(format: TextureFormat, layout: ImageLayout, has_stencil: bool) -> AttachmentDesc {
    let (stencil_load_op, stencil_store_op) = if has_stencil {
        (LoadOp::Load, StoreOp::Store)
    } else {
        (LoadOp::DontCare, StoreOp::DontCare)
    };

    AttachmentDesc {
        format,
        samples: 1,
        load_op: LoadOp::Load,
        store_op: StoreOp::Store,
        stencil_load_op,
        stencil_store_op,
        initial_layout: layout,
        final_layout: layout,
    }
}

/// Layout of the depth/stencil reference, chosen by format class
pub fn depth_reference_layout(format: TextureFormat) -> ImageLayout {
    match format.class() {
        FormatClass::ShadowDepth | FormatClass::Depth => ImageLayout::DepthAttachment,
        FormatClass::DepthStencil => ImageLayout::DepthStencilAttachment,
        _ => ImageLayout::DepthStencilAttachment,
    }
}

/// Builds `RenderPassDesc`s and hands them to the graphics device
#[derive(Debug, Clone, Default)]
pub struct RenderPassBuilder {
    attachments: Vec<AttachmentDesc>,
    color_references: Vec<AttachmentReference>,
    depth_stencil: Option<TextureFormat>,
}

impl RenderPassBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder for the given color formats and optional depth/stencil format
    pub fn with_attachments(colors: &[TextureFormat], depth_stencil: Option<TextureFormat>) -> Self {
        let mut builder = Self::new();
        for format in colors {
            builder.add_color_attachment(*format);
        }
        if let Some(format) = depth_stencil {
            builder.set_depth_stencil_attachment(format);
        }
        builder
    }

    /// Builder for the defined slots of a key
    pub fn from_key(key: &RenderPassKey) -> Self {
        let count = key.color_attachment_count();
        let depth = key.has_depth_stencil().then(|| key.depth_stencil_format());
        Self::with_attachments(&key.color_formats()[..count], depth)
    }

    /// Builder for a single-color swapchain pass
    pub fn swapchain(format: TextureFormat) -> Self {
        Self::with_attachments(&[format], None)
    }

    /// Append a color attachment in the next binding slot
    pub fn add_color_attachment(&mut self, format: TextureFormat) -> &mut Self {
        let index = self.color_references.len() as u32;
        self.attachments.push(attachment_description(format, ImageLayout::ColorAttachment, false));
        self.color_references.push(AttachmentReference {
            attachment: index,
            layout: ImageLayout::ColorAttachment,
        });
        self
    }

    /// Set the depth/stencil attachment (placed after all colors)
    pub fn set_depth_stencil_attachment(&mut self, format: TextureFormat) -> &mut Self {
        self.depth_stencil = Some(format);
        self
    }

    /// Produce the backend-neutral description
    pub fn desc(&self) -> RenderPassDesc {
        let mut attachments = self.attachments.clone();
        let mut depth_reference = None;

        if let Some(format) = self.depth_stencil {
            let has_stencil = format.has_stencil();
            let layout = if has_stencil {
                ImageLayout::DepthStencilAttachment
            } else {
                ImageLayout::DepthAttachment
            };
            attachments.push(attachment_description(format, layout, has_stencil));
            depth_reference = Some(AttachmentReference {
                attachment: self.color_references.len() as u32,
                layout: depth_reference_layout(format),
            });
        }

        let has_depth = depth_reference.is_some();

        let mut src_stage_mask = PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT;
        let mut src_access_mask = AccessFlags::COLOR_ATTACHMENT_WRITE | AccessFlags::COLOR_ATTACHMENT_READ;
        if has_depth {
            src_stage_mask |= PipelineStageFlags::EARLY_FRAGMENT_TESTS;
            src_access_mask |= AccessFlags::DEPTH_STENCIL_ATTACHMENT_WRITE;
        }

        RenderPassDesc {
            attachments,
            subpass: SubpassDesc {
                bind_point: PipelineBindPoint::Graphics,
                color_attachments: self.color_references.clone(),
                depth_stencil_attachment: depth_reference,
            },
            dependency: SubpassDependency {
                src_subpass: 0,
                dst_subpass: SUBPASS_EXTERNAL,
                src_stage_mask,
                dst_stage_mask: PipelineStageFlags::VERTEX_SHADER
                    | PipelineStageFlags::FRAGMENT_SHADER
                    | PipelineStageFlags::COMPUTE_SHADER
                    | PipelineStageFlags::TRANSFER,
                src_access_mask,
                dst_access_mask: AccessFlags::SHADER_READ | AccessFlags::TRANSFER_READ,
                dependency_flags: DependencyFlags::BY_REGION,
            },
        }
    }

    /// Create the native render pass
    ///
    /// # Errors
    ///
    /// `ConstructionFailure` if the device rejects the description.
    pub fn build(&self, graphics_device: &mut dyn GraphicsDevice) -> Result<Arc<dyn RenderPass>> {
        crate::engine_info!("obsidian::RenderPassBuilder", "New render pass");

        let desc = self.desc();
        graphics_device.create_render_pass(&desc).map_err(|e| {
            crate::engine_construction_err!(
                "obsidian::RenderPassBuilder",
                "Failed to create render pass ({} attachments): {}",
                desc.attachments.len(),
                e
            )
        })
    }
}

#[cfg(test)]
#[path = "render_pass_builder_tests.rs"]
mod tests;
