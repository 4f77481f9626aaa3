/// VulkanPipeline - Vulkan implementation of the Pipeline trait

use obsidian_engine::obsidian::graphics_device::{Pipeline, PipelineBindPoint};
use ash::vk;

/// Vulkan pipeline implementation
pub struct VulkanPipeline {
    /// Vulkan graphics or compute pipeline
    pub(crate) pipeline: vk::Pipeline,
    /// Pipeline layout (crate-private, needed for descriptor set binding)
    pub(crate) pipeline_layout: vk::PipelineLayout,
    /// Descriptor set layout for set 0 (null when the pipeline has no bindings)
    pub(crate) descriptor_set_layout: vk::DescriptorSetLayout,
    pub(crate) bind_point: PipelineBindPoint,
    /// Vulkan device (for cleanup)
    pub(crate) device: ash::Device,
}

impl VulkanPipeline {
    /// Raw Vulkan handle
    pub fn handle(&self) -> vk::Pipeline {
        self.pipeline
    }

    pub fn layout(&self) -> vk::PipelineLayout {
        self.pipeline_layout
    }
}

impl Pipeline for VulkanPipeline {
    fn bind_point(&self) -> PipelineBindPoint {
        self.bind_point
    }
}

impl Drop for VulkanPipeline {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_pipeline(self.pipeline, None);
            self.device.destroy_pipeline_layout(self.pipeline_layout, None);
            if self.descriptor_set_layout != vk::DescriptorSetLayout::null() {
                self.device.destroy_descriptor_set_layout(self.descriptor_set_layout, None);
            }
        }
    }
}
