/// Pipeline: programmable stages, fixed-function state and the parameter table.
///
/// A Pipeline owns one optional shader object per stage slot. Compiled
/// shader output is submitted with `submit_compiled_source`, which uploads
/// stage bytecode and merges reflected uniform parameters. The backend
/// pipeline object is built lazily by `rhi_init` and rebuilt only when the
/// stages, the fixed-function state or the target render pass changed.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;
use crate::error::{Error, Result};
use crate::graphics_device::{
    self, GraphicsDevice, RenderPass, CommandList, PipelineDesc, PipelineStageDesc,
    PipelineBindPoint, FixedFunctionState, DepthTestInfo, StencilTestInfo,
    AssemblyInfo, RasterizerInfo, ColorBlendingInfo, VertexLayout,
    DescriptorBinding,
};
use crate::log::{Logger, LogEntry, LogSeverity};
use crate::pipeline::{vertex_layout_from_attributes, descriptor_bindings_from_parameters};
use crate::shader::{
    Shader, ShaderStage, ShaderType, ShaderSource, MaterialParameterInfo,
    VertexAttribute, SHADER_STAGE_COUNT,
};

// ===== PIPELINE STATE =====

/// Lifecycle state of a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No stage slot allocated
    Empty,
    /// Some stages present but neither a graphics nor a compute set
    PartiallyConfigured,
    /// Vertex and fragment stages carry bytecode
    ValidGraphical,
    /// Compute stage carries bytecode
    ValidCompute,
    /// Backend object matches the current stages and fixed-function state
    BackendBuilt,
    /// Backend object built and bound into a command list
    Bound,
}

/// Snapshot of what the backend object was built from
struct BuiltPipeline {
    pipeline: Arc<dyn graphics_device::Pipeline>,
    bind_point: PipelineBindPoint,
    fixed_function: FixedFunctionState,
    stage_revision: u64,
    render_pass: Option<Arc<dyn RenderPass>>,
}

// ===== PIPELINE =====

/// Graphics or compute pipeline
pub struct Pipeline {
    graphics_device: Arc<Mutex<dyn GraphicsDevice>>,

    /// Depth test group
    pub depth_test: DepthTestInfo,
    /// Stencil test group
    pub stencil_test: StencilTestInfo,
    /// Input assembly group
    pub input_assembly: AssemblyInfo,
    /// Rasterizer group
    pub rasterizer: RasterizerInfo,
    /// Color blending group
    pub color_blending: ColorBlendingInfo,

    shaders: [Option<Box<Shader>>; SHADER_STAGE_COUNT],
    parameters: BTreeMap<String, MaterialParameterInfo>,
    vertex_attributes: Vec<VertexAttribute>,

    /// Bumped on every stage mutation
    stage_revision: u64,
    backend: Option<BuiltPipeline>,
    bound: bool,
}

impl Pipeline {
    /// Create an empty pipeline with default fixed-function state
    pub fn new(graphics_device: Arc<Mutex<dyn GraphicsDevice>>) -> Self {
        Self {
            graphics_device,
            depth_test: DepthTestInfo::default(),
            stencil_test: StencilTestInfo::default(),
            input_assembly: AssemblyInfo::default(),
            rasterizer: RasterizerInfo::default(),
            color_blending: ColorBlendingInfo::default(),
            shaders: Default::default(),
            parameters: BTreeMap::new(),
            vertex_attributes: Vec::new(),
            stage_revision: 0,
            backend: None,
            bound: false,
        }
    }

    // ===== STAGE SLOTS =====

    /// Shader of a stage, if allocated
    pub fn shader(&self, stage: ShaderStage) -> Option<&Shader> {
        self.shaders[stage.index()].as_deref()
    }

    /// Mutable shader of a stage, allocating it first when `create` is set
    ///
    /// Handing out a mutable shader counts as a stage mutation.
    pub fn shader_mut(&mut self, stage: ShaderStage, create: bool) -> Option<&mut Shader> {
        let slot = &mut self.shaders[stage.index()];
        if slot.is_none() && !create {
            return None;
        }
        self.stage_revision += 1;
        Some(slot.get_or_insert_with(|| Box::new(Shader::new(stage))))
    }

    pub fn vertex_shader(&self) -> Option<&Shader> {
        self.shader(ShaderStage::Vertex)
    }

    pub fn tessellation_control_shader(&self) -> Option<&Shader> {
        self.shader(ShaderStage::TessellationControl)
    }

    pub fn tessellation_shader(&self) -> Option<&Shader> {
        self.shader(ShaderStage::Tessellation)
    }

    pub fn geometry_shader(&self) -> Option<&Shader> {
        self.shader(ShaderStage::Geometry)
    }

    pub fn fragment_shader(&self) -> Option<&Shader> {
        self.shader(ShaderStage::Fragment)
    }

    pub fn compute_shader(&self) -> Option<&Shader> {
        self.shader(ShaderStage::Compute)
    }

    pub fn vertex_shader_mut(&mut self, create: bool) -> Option<&mut Shader> {
        self.shader_mut(ShaderStage::Vertex, create)
    }

    pub fn tessellation_control_shader_mut(&mut self, create: bool) -> Option<&mut Shader> {
        self.shader_mut(ShaderStage::TessellationControl, create)
    }

    pub fn tessellation_shader_mut(&mut self, create: bool) -> Option<&mut Shader> {
        self.shader_mut(ShaderStage::Tessellation, create)
    }

    pub fn geometry_shader_mut(&mut self, create: bool) -> Option<&mut Shader> {
        self.shader_mut(ShaderStage::Geometry, create)
    }

    pub fn fragment_shader_mut(&mut self, create: bool) -> Option<&mut Shader> {
        self.shader_mut(ShaderStage::Fragment, create)
    }

    pub fn compute_shader_mut(&mut self, create: bool) -> Option<&mut Shader> {
        self.shader_mut(ShaderStage::Compute, create)
    }

    /// Remove the shader of one stage
    pub fn remove_shader(&mut self, stage: ShaderStage) -> &mut Self {
        self.remove_shaders(stage.flag())
    }

    pub fn remove_vertex_shader(&mut self) -> &mut Self {
        self.remove_shader(ShaderStage::Vertex)
    }

    pub fn remove_tessellation_control_shader(&mut self) -> &mut Self {
        self.remove_shader(ShaderStage::TessellationControl)
    }

    pub fn remove_tessellation_shader(&mut self) -> &mut Self {
        self.remove_shader(ShaderStage::Tessellation)
    }

    pub fn remove_geometry_shader(&mut self) -> &mut Self {
        self.remove_shader(ShaderStage::Geometry)
    }

    pub fn remove_fragment_shader(&mut self) -> &mut Self {
        self.remove_shader(ShaderStage::Fragment)
    }

    pub fn remove_compute_shader(&mut self) -> &mut Self {
        self.remove_shader(ShaderStage::Compute)
    }

    /// Allocate an empty shader for every stage in `flags` that has none
    pub fn allocate_shaders(&mut self, flags: ShaderType) -> &mut Self {
        for stage in flags.stages() {
            let slot = &mut self.shaders[stage.index()];
            if slot.is_none() {
                *slot = Some(Box::new(Shader::new(stage)));
                self.stage_revision += 1;
            }
        }
        self
    }

    /// Drop the shaders of every stage in `flags`
    pub fn remove_shaders(&mut self, flags: ShaderType) -> &mut Self {
        for stage in flags.stages() {
            if self.shaders[stage.index()].take().is_some() {
                self.stage_revision += 1;
            }
        }
        self
    }

    pub fn remove_all_shaders(&mut self) -> &mut Self {
        self.remove_shaders(ShaderType::all())
    }

    /// Set of allocated stage slots
    pub fn shader_type_flags(&self) -> ShaderType {
        ShaderStage::ALL
            .into_iter()
            .filter(|stage| self.shaders[stage.index()].is_some())
            .fold(ShaderType::empty(), |flags, stage| flags | stage.flag())
    }

    /// All stage slots in stage order
    pub fn shader_array(&self) -> [Option<&Shader>; SHADER_STAGE_COUNT] {
        ShaderStage::ALL.map(|stage| self.shader(stage))
    }

    /// Number of allocated stage slots
    pub fn stages_count(&self) -> usize {
        self.shaders.iter().filter(|slot| slot.is_some()).count()
    }

    /// Set of stages whose shader carries bytecode
    fn loaded_stage_flags(&self) -> ShaderType {
        ShaderStage::ALL
            .into_iter()
            .filter(|stage| self.shader(*stage).is_some_and(|s| !s.is_empty()))
            .fold(ShaderType::empty(), |flags, stage| flags | stage.flag())
    }

    /// Returns true if vertex and fragment stages carry bytecode
    pub fn has_valid_graphical_pipeline(&self) -> bool {
        self.loaded_stage_flags().is_valid_graphical()
    }

    /// Returns true if the compute stage carries bytecode
    pub fn has_valid_compute_pipeline(&self) -> bool {
        self.loaded_stage_flags().is_valid_compute()
    }

    // ===== PARAMETERS =====

    /// Merged uniform parameter of the given name
    pub fn find_param_info(&self, name: &str) -> Option<&MaterialParameterInfo> {
        self.parameters.get(name)
    }

    /// Whole parameter table, ordered by name
    pub fn parameters(&self) -> &BTreeMap<String, MaterialParameterInfo> {
        &self.parameters
    }

    /// Merge one reflected parameter
    ///
    /// Type, offset, size and binding of the latest declaration win. Stage
    /// visibility accumulates across declarations.
    fn merge_parameter(&mut self, info: &MaterialParameterInfo) {
        match self.parameters.get_mut(&info.name) {
            Some(existing) => {
                existing.param_type = info.param_type;
                existing.offset = info.offset;
                existing.size = info.size;
                existing.binding = info.binding;
                existing.stages |= info.stages;
            }
            None => {
                self.parameters.insert(info.name.clone(), info.clone());
            }
        }
    }

    /// Vertex attributes consumed by the vertex stage
    pub fn vertex_attributes(&self) -> &[VertexAttribute] {
        &self.vertex_attributes
    }

    /// Vertex input layout derived from the vertex attributes
    pub fn vertex_layout(&self) -> VertexLayout {
        vertex_layout_from_attributes(&self.vertex_attributes)
    }

    /// Uniform buffer bindings derived from the parameter table
    ///
    /// Fails with `InvalidResource` when a parameter's end offset overflows.
    pub fn descriptor_bindings(&self) -> Result<Vec<DescriptorBinding>> {
        descriptor_bindings_from_parameters(self.parameters.values())
    }

    // ===== COMPILED SOURCE =====

    /// Upload compiled shader output into the pipeline
    ///
    /// Every non-empty stage buffer is uploaded (allocating its slot),
    /// reflected parameters are merged, and the vertex attributes are
    /// replaced when the source carries a vertex stage.
    ///
    /// # Errors
    ///
    /// `CompileIntegrityError` if the stages present after the upload would
    /// form neither a graphics (vertex + fragment) nor a compute set. The
    /// pipeline is left untouched. The failure is reported to `logger` when
    /// given, to the engine log otherwise.
    pub fn submit_compiled_source(&mut self, source: &ShaderSource, logger: Option<&dyn Logger>) -> Result<()> {
        let resulting = self.loaded_stage_flags() | source.stage_flags();

        if !resulting.is_valid_graphical() && !resulting.is_valid_compute() {
            let message = format!(
                "Incomplete shader set {:?}: a pipeline needs vertex and fragment stages, or a compute stage",
                resulting
            );
            match logger {
                Some(logger) => logger.log(&LogEntry {
                    severity: LogSeverity::Error,
                    timestamp: SystemTime::now(),
                    source: "obsidian::Pipeline".to_string(),
                    message: message.clone(),
                    file: Some(file!()),
                    line: Some(line!()),
                }),
                None => crate::engine_error!("obsidian::Pipeline", "{}", message),
            }
            return Err(Error::CompileIntegrityError(message));
        }

        // ========== UPLOAD STAGES ==========
        for stage in source.stage_flags().stages() {
            let code = source.code(stage);
            if let Some(shader) = self.shader_mut(stage, true) {
                shader.upload(code);
            }
        }

        // ========== MERGE REFLECTION ==========
        for info in &source.reflection.uniform_member_infos {
            self.merge_parameter(info);
        }

        if source.has_vertex_shader() {
            self.vertex_attributes = source.reflection.attributes.clone();
        }

        crate::engine_debug!(
            "obsidian::Pipeline",
            "Submitted stages {:?}, {} parameter(s), {} vertex attribute(s)",
            source.stage_flags(),
            self.parameters.len(),
            self.vertex_attributes.len()
        );

        Ok(())
    }

    // ===== FIXED FUNCTION =====

    /// Current fixed-function groups
    pub fn fixed_function(&self) -> FixedFunctionState {
        FixedFunctionState {
            depth_test: self.depth_test,
            stencil_test: self.stencil_test,
            input_assembly: self.input_assembly,
            rasterizer: self.rasterizer,
            color_blending: self.color_blending,
        }
    }

    // ===== BACKEND LIFECYCLE =====

    /// Returns true if the backend object was built from the current stages
    /// and fixed-function state
    fn backend_up_to_date(&self) -> bool {
        self.backend.as_ref().is_some_and(|built| {
            built.stage_revision == self.stage_revision && built.fixed_function == self.fixed_function()
        })
    }

    /// Lifecycle state
    pub fn state(&self) -> PipelineState {
        if self.backend_up_to_date() {
            return if self.bound {
                PipelineState::Bound
            } else {
                PipelineState::BackendBuilt
            };
        }

        if self.has_valid_graphical_pipeline() {
            PipelineState::ValidGraphical
        } else if self.has_valid_compute_pipeline() {
            PipelineState::ValidCompute
        } else if self.stages_count() == 0 {
            PipelineState::Empty
        } else {
            PipelineState::PartiallyConfigured
        }
    }

    /// Native pipeline object, if built
    pub fn backend_pipeline(&self) -> Option<&Arc<dyn graphics_device::Pipeline>> {
        self.backend.as_ref().map(|built| &built.pipeline)
    }

    /// Create or validate the backend pipeline object
    ///
    /// Graphics pipelines are built against `render_pass`; compute pipelines
    /// ignore it. Nothing reaches the device when the backend object already
    /// matches the current stages, fixed-function state and render pass.
    ///
    /// # Errors
    ///
    /// - `CompileIntegrityError` if the stages form neither a graphics nor a compute set
    /// - `InvalidResource` if a graphics pipeline is initialized without a render pass
    ///   or a uniform parameter overflows its binding
    /// - `ConstructionFailure` if the device fails (the previous backend object is discarded)
    /// - `BackendError` if the device lock is poisoned
    pub fn rhi_init(&mut self, render_pass: Option<&Arc<dyn RenderPass>>) -> Result<()> {
        let bind_point = if self.has_valid_graphical_pipeline() {
            if self.has_valid_compute_pipeline() {
                crate::engine_warn!(
                    "obsidian::Pipeline",
                    "Both graphics and compute stages present, building the graphics pipeline"
                );
            }
            PipelineBindPoint::Graphics
        } else if self.has_valid_compute_pipeline() {
            PipelineBindPoint::Compute
        } else {
            let message = format!("Cannot build pipeline from stages {:?}", self.loaded_stage_flags());
            crate::engine_error!("obsidian::Pipeline", "{}", message);
            return Err(Error::CompileIntegrityError(message));
        };

        let render_pass = match bind_point {
            PipelineBindPoint::Graphics => match render_pass {
                Some(pass) => Some(Arc::clone(pass)),
                None => {
                    let message = "Graphics pipeline requires a render pass".to_string();
                    crate::engine_error!("obsidian::Pipeline", "{}", message);
                    return Err(Error::InvalidResource(message));
                }
            },
            PipelineBindPoint::Compute => None,
        };

        if self.backend_up_to_date() {
            let same_target = self.backend.as_ref().is_some_and(|built| {
                built.bind_point == bind_point
                    && match (&built.render_pass, &render_pass) {
                        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                        (None, None) => true,
                        _ => false,
                    }
            });
            if same_target {
                return Ok(());
            }
        }

        // ========== REBUILD ==========
        self.backend = None;
        self.bound = false;

        let stages: Vec<PipelineStageDesc> = self
            .loaded_stage_flags()
            .stages()
            .filter(|stage| match bind_point {
                PipelineBindPoint::Graphics => *stage != ShaderStage::Compute,
                PipelineBindPoint::Compute => *stage == ShaderStage::Compute,
            })
            .filter_map(|stage| self.shader(stage))
            .map(|shader| PipelineStageDesc {
                stage: shader.stage(),
                code: shader.code().to_vec(),
                entry_point: shader.entry_point().to_string(),
            })
            .collect();

        let vertex_layout = match bind_point {
            PipelineBindPoint::Graphics => self.vertex_layout(),
            PipelineBindPoint::Compute => VertexLayout::default(),
        };

        let desc = PipelineDesc {
            stages,
            fixed_function: self.fixed_function(),
            vertex_layout,
            bindings: self.descriptor_bindings()?,
            render_pass: render_pass.clone(),
        };

        let pipeline = {
            let mut device = self.graphics_device.lock()
                .map_err(|_| crate::engine_err!("obsidian::Pipeline", "GraphicsDevice lock poisoned"))?;
            device.create_pipeline(&desc).map_err(|e| {
                crate::engine_construction_err!("obsidian::Pipeline", "Failed to create {:?} pipeline: {}", bind_point, e)
            })?
        };

        crate::engine_debug!(
            "obsidian::Pipeline",
            "Built {:?} pipeline with {} stage(s)",
            bind_point,
            desc.stages.len()
        );

        self.backend = Some(BuiltPipeline {
            pipeline,
            bind_point,
            fixed_function: desc.fixed_function,
            stage_revision: self.stage_revision,
            render_pass,
        });

        Ok(())
    }

    /// Bind the backend pipeline object into a command list
    ///
    /// # Errors
    ///
    /// `InvalidResource` if the backend object is missing or out of date
    /// (call `rhi_init` first).
    pub fn rhi_bind(&mut self, command_list: &mut dyn CommandList) -> Result<()> {
        if !self.backend_up_to_date() {
            let message = "Pipeline has no up-to-date backend object, call rhi_init first".to_string();
            crate::engine_error!("obsidian::Pipeline", "{}", message);
            return Err(Error::InvalidResource(message));
        }

        if let Some(built) = &self.backend {
            command_list.bind_pipeline(&built.pipeline)?;
        }
        self.bound = true;
        Ok(())
    }

    // ===== PERSISTENCE SUPPORT =====

    /// Replace stages, parameters and attributes wholesale
    pub(crate) fn replace_contents(
        &mut self,
        shaders: Vec<Shader>,
        parameters: BTreeMap<String, MaterialParameterInfo>,
        vertex_attributes: Vec<VertexAttribute>,
    ) {
        self.shaders = Default::default();
        for shader in shaders {
            let index = shader.stage().index();
            self.shaders[index] = Some(Box::new(shader));
        }
        self.parameters = parameters;
        self.vertex_attributes = vertex_attributes;
        self.stage_revision += 1;
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
