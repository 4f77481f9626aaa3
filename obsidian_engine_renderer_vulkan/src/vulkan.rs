/// VulkanGraphicsDevice - Vulkan implementation of the GraphicsDevice trait

use obsidian_engine::obsidian::{Result, Error};
use obsidian_engine::obsidian::graphics_device::{
    GraphicsDevice, Config, RenderPass, RenderPassDesc, Pipeline, PipelineDesc,
    PipelineBindPoint, CommandList, FixedFunctionState,
};
use obsidian_engine::{engine_debug, engine_info, engine_warn, engine_error, engine_bail, engine_err};
use ash::vk;
use std::ffi::{c_char, CString};
use std::sync::Arc;

use crate::vulkan_format::*;
use crate::vulkan_render_pass::VulkanRenderPass;
use crate::vulkan_pipeline::VulkanPipeline;
use crate::vulkan_command_list::VulkanCommandList;

/// Vulkan graphics device
///
/// Headless: owns the instance, one logical device and its graphics queue.
/// Presentation is left to the application.
pub struct VulkanGraphicsDevice {
    /// Vulkan entry (keeps the loader alive)
    _entry: ash::Entry,
    instance: ash::Instance,
    physical_device: vk::PhysicalDevice,
    /// Logical device, shared with command lists
    device: Arc<ash::Device>,
    graphics_queue: vk::Queue,
    graphics_queue_family: u32,
    /// Debug utils loader and messenger (validation builds only)
    #[cfg(feature = "vulkan-validation")]
    debug_messenger: Option<(ash::ext::debug_utils::Instance, vk::DebugUtilsMessengerEXT)>,
}

/// Depth-only attachments use `DEPTH_ATTACHMENT_OPTIMAL`, a Vulkan 1.2 layout
const MIN_DEVICE_API_VERSION: u32 = vk::API_VERSION_1_2;

/// Whether a physical device supports every render pass and pipeline built here
fn meets_requirements(api_version: u32, features12: &vk::PhysicalDeviceVulkan12Features) -> bool {
    api_version >= MIN_DEVICE_API_VERSION && features12.separate_depth_stencil_layouts == vk::TRUE
}

fn init_failed(what: &str, e: impl std::fmt::Debug) -> Error {
    engine_error!("obsidian::vulkan", "Failed to {}: {:?}", what, e);
    Error::InitializationFailed(format!("Failed to {}: {:?}", what, e))
}

impl VulkanGraphicsDevice {
    /// Create a new Vulkan graphics device
    ///
    /// # Arguments
    ///
    /// * `config` - Device configuration (application info, validation)
    ///
    /// # Errors
    ///
    /// `InitializationFailed` if the loader, instance, GPU or device cannot be set up.
    pub fn new(config: Config) -> Result<Self> {
        unsafe {
            let entry = ash::Entry::load()
                .map_err(|e| init_failed("load Vulkan library", e))?;

            let app_name = CString::new(config.app_name.as_str())
                .map_err(|e| init_failed("convert application name", e))?;
            let (major, minor, patch) = config.app_version;

            let app_info = vk::ApplicationInfo::default()
                .application_name(&app_name)
                .application_version(vk::make_api_version(0, major, minor, patch))
                .engine_name(c"Obsidian")
                .engine_version(vk::make_api_version(0, 0, 1, 0))
                .api_version(vk::API_VERSION_1_3);

            let enable_validation = Self::validation_available(&entry, &config);

            #[allow(unused_mut)]
            let mut extension_names: Vec<*const c_char> = Vec::new();
            #[allow(unused_mut)]
            let mut layer_names: Vec<*const c_char> = Vec::new();
            #[cfg(feature = "vulkan-validation")]
            {
                if enable_validation {
                    extension_names.push(ash::ext::debug_utils::NAME.as_ptr());
                    layer_names.push(c"VK_LAYER_KHRONOS_validation".as_ptr());
                }
            }

            let create_info = vk::InstanceCreateInfo::default()
                .application_info(&app_info)
                .enabled_layer_names(&layer_names)
                .enabled_extension_names(&extension_names);

            let instance = entry
                .create_instance(&create_info, None)
                .map_err(|e| init_failed("create instance", e))?;

            #[cfg(feature = "vulkan-validation")]
            let debug_messenger = if enable_validation {
                match Self::create_debug_messenger(&entry, &instance, &config) {
                    Ok(messenger) => Some(messenger),
                    Err(e) => {
                        instance.destroy_instance(None);
                        return Err(e);
                    }
                }
            } else {
                None
            };

            let picked = Self::pick_physical_device(&instance);
            let (physical_device, graphics_queue_family) = match picked {
                Ok(picked) => picked,
                Err(e) => {
                    #[cfg(feature = "vulkan-validation")]
                    Self::destroy_debug_messenger(&debug_messenger);
                    instance.destroy_instance(None);
                    return Err(e);
                }
            };

            let queue_priorities = [1.0];
            let queue_create_infos = [vk::DeviceQueueCreateInfo::default()
                .queue_family_index(graphics_queue_family)
                .queue_priorities(&queue_priorities)];

            let device_features = vk::PhysicalDeviceFeatures::default();
            let mut features12 = vk::PhysicalDeviceVulkan12Features::default()
                .separate_depth_stencil_layouts(true);
            let device_create_info = vk::DeviceCreateInfo::default()
                .queue_create_infos(&queue_create_infos)
                .enabled_features(&device_features)
                .push_next(&mut features12);

            let device = match instance.create_device(physical_device, &device_create_info, None) {
                Ok(device) => Arc::new(device),
                Err(e) => {
                    #[cfg(feature = "vulkan-validation")]
                    Self::destroy_debug_messenger(&debug_messenger);
                    instance.destroy_instance(None);
                    return Err(init_failed("create logical device", e));
                }
            };

            let graphics_queue = device.get_device_queue(graphics_queue_family, 0);

            let properties = instance.get_physical_device_properties(physical_device);
            let device_name = properties
                .device_name_as_c_str()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|_| "Unknown".to_string());
            engine_info!("obsidian::vulkan",
                "Graphics device '{}' ready (queue family {}, validation {})",
                device_name, graphics_queue_family, if enable_validation { "on" } else { "off" });

            Ok(Self {
                _entry: entry,
                instance,
                physical_device,
                device,
                graphics_queue,
                graphics_queue_family,
                #[cfg(feature = "vulkan-validation")]
                debug_messenger,
            })
        }
    }

    /// Whether validation was requested, compiled in and installed
    fn validation_available(entry: &ash::Entry, config: &Config) -> bool {
        if !config.enable_validation {
            return false;
        }
        if !cfg!(feature = "vulkan-validation") {
            engine_warn!("obsidian::vulkan",
                "Validation requested but the 'vulkan-validation' feature is disabled");
            return false;
        }

        let layers = unsafe { entry.enumerate_instance_layer_properties() }.unwrap_or_default();
        let found = layers.iter().any(|layer| {
            layer.layer_name_as_c_str()
                .map(|name| name == c"VK_LAYER_KHRONOS_validation")
                .unwrap_or(false)
        });
        if !found {
            engine_warn!("obsidian::vulkan",
                "VK_LAYER_KHRONOS_validation is not installed, continuing without validation");
        }
        found
    }

    #[cfg(feature = "vulkan-validation")]
    unsafe fn create_debug_messenger(
        entry: &ash::Entry,
        instance: &ash::Instance,
        config: &Config,
    ) -> Result<(ash::ext::debug_utils::Instance, vk::DebugUtilsMessengerEXT)> {
        let debug_utils = ash::ext::debug_utils::Instance::new(entry, instance);

        crate::debug::init_debug_config(crate::debug::Config {
            severity: config.debug_severity,
            break_on_error: config.break_on_validation_error,
        });

        let debug_info = vk::DebugUtilsMessengerCreateInfoEXT::default()
            .message_severity(crate::debug::severity_flags(config.debug_severity))
            .message_type(
                vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                    | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
                    | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE
            )
            .pfn_user_callback(Some(crate::debug::vulkan_debug_callback));

        let messenger = debug_utils
            .create_debug_utils_messenger(&debug_info, None)
            .map_err(|e| {
                crate::debug::cleanup_debug_config();
                init_failed("create debug messenger", e)
            })?;

        Ok((debug_utils, messenger))
    }

    #[cfg(feature = "vulkan-validation")]
    unsafe fn destroy_debug_messenger(
        messenger: &Option<(ash::ext::debug_utils::Instance, vk::DebugUtilsMessengerEXT)>,
    ) {
        // Silence the callback before the messenger goes away
        crate::debug::cleanup_debug_config();
        if let Some((debug_utils, messenger)) = messenger {
            debug_utils.destroy_debug_utils_messenger(*messenger, None);
        }
    }

    /// First Vulkan 1.2 GPU with separate depth/stencil layouts and a queue
    /// family supporting graphics and compute
    unsafe fn pick_physical_device(instance: &ash::Instance) -> Result<(vk::PhysicalDevice, u32)> {
        let physical_devices = instance
            .enumerate_physical_devices()
            .map_err(|e| init_failed("enumerate physical devices", e))?;

        let wanted = vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE;
        physical_devices
            .into_iter()
            .filter(|&physical_device| {
                let suitable = Self::supports_requirements(instance, physical_device);
                if !suitable {
                    engine_debug!("obsidian::vulkan",
                        "Skipping physical device {:?}: needs Vulkan 1.2 with separateDepthStencilLayouts",
                        physical_device);
                }
                suitable
            })
            .find_map(|physical_device| {
                instance
                    .get_physical_device_queue_family_properties(physical_device)
                    .iter()
                    .position(|qf| qf.queue_flags.contains(wanted))
                    .map(|index| (physical_device, index as u32))
            })
            .ok_or_else(|| {
                engine_error!("obsidian::vulkan", "No Vulkan 1.2 GPU with a graphics queue found");
                Error::InitializationFailed("No Vulkan 1.2 GPU with a graphics queue found".to_string())
            })
    }

    unsafe fn supports_requirements(instance: &ash::Instance, physical_device: vk::PhysicalDevice) -> bool {
        let api_version = instance.get_physical_device_properties(physical_device).api_version;
        // Vulkan12Features may only be queried on a 1.2 device
        if api_version < MIN_DEVICE_API_VERSION {
            return false;
        }

        let mut features12 = vk::PhysicalDeviceVulkan12Features::default();
        {
            let mut features2 = vk::PhysicalDeviceFeatures2::default().push_next(&mut features12);
            instance.get_physical_device_features2(physical_device, &mut features2);
        }
        meets_requirements(api_version, &features12)
    }

    /// API version reported by the selected physical device
    pub fn api_version(&self) -> u32 {
        unsafe { self.instance.get_physical_device_properties(self.physical_device) }.api_version
    }

    pub fn physical_device(&self) -> vk::PhysicalDevice {
        self.physical_device
    }

    pub fn device(&self) -> &Arc<ash::Device> {
        &self.device
    }

    pub fn graphics_queue(&self) -> vk::Queue {
        self.graphics_queue
    }

    pub fn graphics_queue_family(&self) -> u32 {
        self.graphics_queue_family
    }

    /// Temporary shader modules for each stage, destroyed by the caller
    unsafe fn create_shader_modules(
        &self,
        desc: &PipelineDesc,
    ) -> Result<Vec<(vk::ShaderModule, vk::ShaderStageFlags, CString)>> {
        let mut modules = Vec::with_capacity(desc.stages.len());
        for stage in &desc.stages {
            let result = Self::stage_words(&stage.code, stage.stage.name())
                .and_then(|words| {
                    let entry_point = CString::new(stage.entry_point.as_str()).map_err(|_| {
                        engine_err!("obsidian::vulkan",
                            "Entry point '{}' of {} stage contains a NUL byte",
                            stage.entry_point, stage.stage.name())
                    })?;
                    let create_info = vk::ShaderModuleCreateInfo::default().code(&words);
                    let module = self.device.create_shader_module(&create_info, None)
                        .map_err(|e| engine_err!("obsidian::vulkan",
                            "Failed to create {} shader module: {:?}", stage.stage.name(), e))?;
                    Ok((module, shader_stage_to_vk(stage.stage), entry_point))
                });

            match result {
                Ok(module) => modules.push(module),
                Err(e) => {
                    self.destroy_shader_modules(&modules);
                    return Err(e);
                }
            }
        }
        Ok(modules)
    }

    unsafe fn destroy_shader_modules(&self, modules: &[(vk::ShaderModule, vk::ShaderStageFlags, CString)]) {
        for (module, _, _) in modules {
            self.device.destroy_shader_module(*module, None);
        }
    }

    fn stage_words(code: &[u8], stage_name: &str) -> Result<Vec<u32>> {
        if code.is_empty() || code.len() % 4 != 0 {
            engine_bail!("obsidian::vulkan",
                "{} shader code must be a non-zero multiple of 4 bytes (got {})", stage_name, code.len());
        }
        Ok(code
            .chunks_exact(4)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect())
    }

    /// Set 0 layout with one uniform buffer per declared binding
    unsafe fn create_set_layout(&self, desc: &PipelineDesc) -> Result<vk::DescriptorSetLayout> {
        if desc.bindings.is_empty() {
            return Ok(vk::DescriptorSetLayout::null());
        }

        let bindings: Vec<vk::DescriptorSetLayoutBinding> = desc.bindings
            .iter()
            .map(|binding| {
                vk::DescriptorSetLayoutBinding::default()
                    .binding(binding.binding)
                    .descriptor_type(vk::DescriptorType::UNIFORM_BUFFER)
                    .descriptor_count(1)
                    .stage_flags(shader_type_to_vk(binding.stages))
            })
            .collect();

        let layout_create = vk::DescriptorSetLayoutCreateInfo::default().bindings(&bindings);
        self.device.create_descriptor_set_layout(&layout_create, None)
            .map_err(|e| engine_err!("obsidian::vulkan", "Failed to create descriptor set layout: {:?}", e))
    }

    unsafe fn create_graphics_pipeline(
        &self,
        desc: &PipelineDesc,
        stages: &[vk::PipelineShaderStageCreateInfo],
        layout: vk::PipelineLayout,
    ) -> Result<vk::Pipeline> {
        let render_pass = match &desc.render_pass {
            Some(render_pass) => render_pass,
            None => engine_bail!("obsidian::vulkan", "Graphics pipeline requires a render pass"),
        };
        // Downcast to Vulkan type
        let vk_render_pass = render_pass.as_ref() as *const dyn RenderPass as *const VulkanRenderPass;
        let vk_render_pass = &*vk_render_pass;

        let vertex_bindings: Vec<vk::VertexInputBindingDescription> = desc.vertex_layout.bindings
            .iter()
            .map(|binding| vk::VertexInputBindingDescription {
                binding: binding.binding,
                stride: binding.stride,
                input_rate: input_rate_to_vk(binding.input_rate),
            })
            .collect();

        let vertex_attributes: Vec<vk::VertexInputAttributeDescription> = desc.vertex_layout.attributes
            .iter()
            .map(|attribute| vk::VertexInputAttributeDescription {
                location: attribute.location,
                binding: attribute.binding,
                format: element_type_to_vk(attribute.element_type),
                offset: attribute.offset,
            })
            .collect();

        let vertex_input_state = vk::PipelineVertexInputStateCreateInfo::default()
            .vertex_binding_descriptions(&vertex_bindings)
            .vertex_attribute_descriptions(&vertex_attributes);

        let state: &FixedFunctionState = &desc.fixed_function;

        let input_assembly_state = vk::PipelineInputAssemblyStateCreateInfo::default()
            .topology(topology_to_vk(state.input_assembly.primitive_topology))
            .primitive_restart_enable(false);

        // Viewport state (dynamic)
        let viewports = [vk::Viewport::default()];
        let scissors = [vk::Rect2D::default()];
        let viewport_state = vk::PipelineViewportStateCreateInfo::default()
            .viewports(&viewports)
            .scissors(&scissors);

        let rasterization_state = vk::PipelineRasterizationStateCreateInfo::default()
            .depth_clamp_enable(false)
            .rasterizer_discard_enable(false)
            .polygon_mode(polygon_mode_to_vk(state.rasterizer.polygon_mode))
            .line_width(state.rasterizer.line_width)
            .cull_mode(cull_mode_to_vk(state.rasterizer.cull_mode))
            .front_face(front_face_to_vk(state.rasterizer.front_face))
            .depth_bias_enable(false);

        let stencil = stencil_state_to_vk(&state.stencil_test);
        let depth_stencil_state = vk::PipelineDepthStencilStateCreateInfo::default()
            .depth_test_enable(state.depth_test.enable)
            .depth_write_enable(state.depth_test.write_enable)
            .depth_compare_op(compare_op_to_vk(state.depth_test.func))
            .depth_bounds_test_enable(false)
            .stencil_test_enable(state.stencil_test.enable)
            .front(stencil)
            .back(stencil);

        let multisample_state = vk::PipelineMultisampleStateCreateInfo::default()
            .sample_shading_enable(false)
            .rasterization_samples(vk::SampleCountFlags::TYPE_1);

        let blending = &state.color_blending;
        let mut blend_attachment = vk::PipelineColorBlendAttachmentState::default()
            .color_write_mask(color_write_mask_to_vk(blending.color_mask))
            .blend_enable(blending.enable);
        if blending.enable {
            blend_attachment = blend_attachment
                .src_color_blend_factor(blend_factor_to_vk(blending.src_color_func))
                .dst_color_blend_factor(blend_factor_to_vk(blending.dst_color_func))
                .color_blend_op(blend_op_to_vk(blending.color_op))
                .src_alpha_blend_factor(blend_factor_to_vk(blending.src_alpha_func))
                .dst_alpha_blend_factor(blend_factor_to_vk(blending.dst_alpha_func))
                .alpha_blend_op(blend_op_to_vk(blending.alpha_op));
        }
        // One blend state per color attachment of the pass
        let color_attachment_count = vk_render_pass.color_attachment_count;
        let blend_attachments = vec![blend_attachment; color_attachment_count];

        let color_blend_state = vk::PipelineColorBlendStateCreateInfo::default()
            .logic_op_enable(false)
            .attachments(&blend_attachments);

        let dynamic_states = [vk::DynamicState::VIEWPORT, vk::DynamicState::SCISSOR];
        let dynamic_state = vk::PipelineDynamicStateCreateInfo::default()
            .dynamic_states(&dynamic_states);

        let pipeline_create_info = vk::GraphicsPipelineCreateInfo::default()
            .stages(stages)
            .vertex_input_state(&vertex_input_state)
            .input_assembly_state(&input_assembly_state)
            .viewport_state(&viewport_state)
            .rasterization_state(&rasterization_state)
            .depth_stencil_state(&depth_stencil_state)
            .multisample_state(&multisample_state)
            .color_blend_state(&color_blend_state)
            .dynamic_state(&dynamic_state)
            .layout(layout)
            .render_pass(vk_render_pass.render_pass)
            .subpass(0);

        let pipelines = self.device.create_graphics_pipelines(
            vk::PipelineCache::null(),
            &[pipeline_create_info],
            None,
        )
        .map_err(|e| engine_err!("obsidian::vulkan", "Failed to create graphics pipeline: {:?}", e.1))?;

        Ok(pipelines[0])
    }

    unsafe fn create_compute_pipeline(
        &self,
        stages: &[vk::PipelineShaderStageCreateInfo],
        layout: vk::PipelineLayout,
    ) -> Result<vk::Pipeline> {
        let compute_stage = match stages.iter().find(|s| s.stage == vk::ShaderStageFlags::COMPUTE) {
            Some(stage) => *stage,
            None => engine_bail!("obsidian::vulkan", "Compute pipeline requires a compute stage"),
        };

        let pipeline_create_info = vk::ComputePipelineCreateInfo::default()
            .stage(compute_stage)
            .layout(layout);

        let pipelines = self.device.create_compute_pipelines(
            vk::PipelineCache::null(),
            &[pipeline_create_info],
            None,
        )
        .map_err(|e| engine_err!("obsidian::vulkan", "Failed to create compute pipeline: {:?}", e.1))?;

        Ok(pipelines[0])
    }
}

impl GraphicsDevice for VulkanGraphicsDevice {
    fn create_render_pass(&mut self, desc: &RenderPassDesc) -> Result<Arc<dyn RenderPass>> {
        let attachments: Vec<vk::AttachmentDescription> = desc.attachments
            .iter()
            .map(|attachment| {
                vk::AttachmentDescription::default()
                    .format(texture_format_to_vk(attachment.format))
                    .samples(sample_count_to_vk(attachment.samples))
                    .load_op(load_op_to_vk(attachment.load_op))
                    .store_op(store_op_to_vk(attachment.store_op))
                    .stencil_load_op(load_op_to_vk(attachment.stencil_load_op))
                    .stencil_store_op(store_op_to_vk(attachment.stencil_store_op))
                    .initial_layout(image_layout_to_vk(attachment.initial_layout))
                    .final_layout(image_layout_to_vk(attachment.final_layout))
            })
            .collect();

        let color_attachment_refs: Vec<vk::AttachmentReference> = desc.subpass.color_attachments
            .iter()
            .map(|reference| {
                vk::AttachmentReference::default()
                    .attachment(reference.attachment)
                    .layout(image_layout_to_vk(reference.layout))
            })
            .collect();

        let depth_attachment_ref = desc.subpass.depth_stencil_attachment.map(|reference| {
            vk::AttachmentReference::default()
                .attachment(reference.attachment)
                .layout(image_layout_to_vk(reference.layout))
        });

        let mut subpass = vk::SubpassDescription::default()
            .pipeline_bind_point(bind_point_to_vk(desc.subpass.bind_point))
            .color_attachments(&color_attachment_refs);
        if let Some(ref depth_ref) = depth_attachment_ref {
            subpass = subpass.depth_stencil_attachment(depth_ref);
        }

        let dependency = vk::SubpassDependency::default()
            .src_subpass(subpass_to_vk(desc.dependency.src_subpass))
            .dst_subpass(subpass_to_vk(desc.dependency.dst_subpass))
            .src_stage_mask(pipeline_stages_to_vk(desc.dependency.src_stage_mask))
            .dst_stage_mask(pipeline_stages_to_vk(desc.dependency.dst_stage_mask))
            .src_access_mask(access_to_vk(desc.dependency.src_access_mask))
            .dst_access_mask(access_to_vk(desc.dependency.dst_access_mask))
            .dependency_flags(dependency_flags_to_vk(desc.dependency.dependency_flags));

        let render_pass_info = vk::RenderPassCreateInfo::default()
            .attachments(&attachments)
            .subpasses(std::slice::from_ref(&subpass))
            .dependencies(std::slice::from_ref(&dependency));

        let render_pass = unsafe {
            self.device.create_render_pass(&render_pass_info, None)
                .map_err(|e| engine_err!("obsidian::vulkan", "Failed to create render pass: {:?}", e))?
        };

        engine_debug!("obsidian::vulkan", "Created render pass with {} attachment(s)", attachments.len());

        Ok(Arc::new(VulkanRenderPass {
            render_pass,
            attachment_count: attachments.len(),
            color_attachment_count: color_attachment_refs.len(),
            device: (*self.device).clone(),
        }))
    }

    fn create_pipeline(&mut self, desc: &PipelineDesc) -> Result<Arc<dyn Pipeline>> {
        let bind_point = desc.bind_point();

        unsafe {
            let modules = self.create_shader_modules(desc)?;
            let stage_infos: Vec<vk::PipelineShaderStageCreateInfo> = modules
                .iter()
                .filter(|(_, stage, _)| match bind_point {
                    PipelineBindPoint::Graphics => *stage != vk::ShaderStageFlags::COMPUTE,
                    PipelineBindPoint::Compute => *stage == vk::ShaderStageFlags::COMPUTE,
                })
                .map(|(module, stage, entry_point)| {
                    vk::PipelineShaderStageCreateInfo::default()
                        .stage(*stage)
                        .module(*module)
                        .name(entry_point)
                })
                .collect();

            let descriptor_set_layout = match self.create_set_layout(desc) {
                Ok(layout) => layout,
                Err(e) => {
                    self.destroy_shader_modules(&modules);
                    return Err(e);
                }
            };

            let set_layouts = [descriptor_set_layout];
            let mut layout_create_info = vk::PipelineLayoutCreateInfo::default();
            if descriptor_set_layout != vk::DescriptorSetLayout::null() {
                layout_create_info = layout_create_info.set_layouts(&set_layouts);
            }

            let pipeline_layout = match self.device.create_pipeline_layout(&layout_create_info, None) {
                Ok(layout) => layout,
                Err(e) => {
                    if descriptor_set_layout != vk::DescriptorSetLayout::null() {
                        self.device.destroy_descriptor_set_layout(descriptor_set_layout, None);
                    }
                    self.destroy_shader_modules(&modules);
                    engine_bail!("obsidian::vulkan", "Failed to create pipeline layout: {:?}", e);
                }
            };

            let result = match bind_point {
                PipelineBindPoint::Graphics => self.create_graphics_pipeline(desc, &stage_infos, pipeline_layout),
                PipelineBindPoint::Compute => self.create_compute_pipeline(&stage_infos, pipeline_layout),
            };

            // Modules are only needed during creation
            self.destroy_shader_modules(&modules);

            let pipeline = match result {
                Ok(pipeline) => pipeline,
                Err(e) => {
                    self.device.destroy_pipeline_layout(pipeline_layout, None);
                    if descriptor_set_layout != vk::DescriptorSetLayout::null() {
                        self.device.destroy_descriptor_set_layout(descriptor_set_layout, None);
                    }
                    return Err(e);
                }
            };

            engine_debug!("obsidian::vulkan",
                "Created {:?} pipeline ({} stage(s), {} binding(s))",
                bind_point, stage_infos.len(), desc.bindings.len());

            Ok(Arc::new(VulkanPipeline {
                pipeline,
                pipeline_layout,
                descriptor_set_layout,
                bind_point,
                device: (*self.device).clone(),
            }))
        }
    }

    fn create_command_list(&mut self) -> Result<Box<dyn CommandList>> {
        let command_list = VulkanCommandList::new(Arc::clone(&self.device), self.graphics_queue_family)?;
        Ok(Box::new(command_list))
    }

    fn wait_idle(&self) -> Result<()> {
        unsafe {
            self.device
                .device_wait_idle()
                .map_err(|e| engine_err!("obsidian::vulkan", "Failed to wait idle: {:?}", e))
        }
    }
}

impl Drop for VulkanGraphicsDevice {
    fn drop(&mut self) {
        unsafe {
            // Wait for device to finish
            self.device.device_wait_idle().ok();

            // Messenger goes before device and instance
            #[cfg(feature = "vulkan-validation")]
            Self::destroy_debug_messenger(&self.debug_messenger);

            self.device.destroy_device(None);
            self.instance.destroy_instance(None);
        }
    }
}

#[cfg(test)]
#[path = "vulkan_tests.rs"]
mod tests;
