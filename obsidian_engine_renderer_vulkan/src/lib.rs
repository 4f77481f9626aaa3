/*!
# Obsidian Engine - Vulkan Backend

Vulkan implementation of the Obsidian `GraphicsDevice` trait, built on Ash.

The device is headless: it creates native render passes, graphics and compute
pipelines and command lists. SPIR-V reflection (spirq) fills the engine's
`ShaderReflection` for shader compilers that emit SPIR-V.

Validation layers and the debug messenger are compiled in only with the
`vulkan-validation` feature.

# Example

```no_run
use std::sync::{Arc, Mutex};
use obsidian_engine::obsidian::graphics_device::{Config, GraphicsDevice};
use obsidian_engine_renderer_vulkan::obsidian::VulkanGraphicsDevice;

let device = VulkanGraphicsDevice::new(Config::default())?;
let device: Arc<Mutex<dyn GraphicsDevice>> = Arc::new(Mutex::new(device));
# Ok::<(), obsidian_engine::obsidian::Error>(())
```
*/

mod vulkan;
mod vulkan_format;
mod vulkan_render_pass;
mod vulkan_pipeline;
mod vulkan_command_list;
mod vulkan_reflection;
#[cfg(feature = "vulkan-validation")]
mod debug;

/// Public namespace of the Vulkan backend
pub mod obsidian {
    pub use crate::vulkan::VulkanGraphicsDevice;
    pub use crate::vulkan_render_pass::VulkanRenderPass;
    pub use crate::vulkan_pipeline::VulkanPipeline;
    pub use crate::vulkan_command_list::VulkanCommandList;
    pub use crate::vulkan_reflection::reflect_spirv;

    #[cfg(feature = "vulkan-validation")]
    pub use crate::debug::{get_validation_stats, ValidationStats};
}
