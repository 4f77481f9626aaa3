/// VulkanRenderPass - Vulkan implementation of the RenderPass trait

use obsidian_engine::obsidian::graphics_device::RenderPass;
use ash::vk;

/// Vulkan render pass implementation
///
/// Simple wrapper around vk::RenderPass
pub struct VulkanRenderPass {
    /// Vulkan render pass handle
    pub(crate) render_pass: vk::RenderPass,
    /// Number of attachments the pass was created with
    pub(crate) attachment_count: usize,
    /// Number of color attachments used by the subpass
    pub(crate) color_attachment_count: usize,
    /// Vulkan device (for cleanup)
    pub(crate) device: ash::Device,
}

impl VulkanRenderPass {
    /// Raw Vulkan handle
    pub fn handle(&self) -> vk::RenderPass {
        self.render_pass
    }

    pub fn attachment_count(&self) -> usize {
        self.attachment_count
    }

    pub fn color_attachment_count(&self) -> usize {
        self.color_attachment_count
    }
}

impl RenderPass for VulkanRenderPass {
    // No methods needed for now - just a type-safe wrapper
}

impl Drop for VulkanRenderPass {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_render_pass(self.render_pass, None);
        }
    }
}
