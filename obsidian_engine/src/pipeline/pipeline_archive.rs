/// Persisted pipeline state (serde + serde_json)

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};
use crate::graphics_device::{
    DepthTestInfo, StencilTestInfo, AssemblyInfo, RasterizerInfo, ColorBlendingInfo,
};
use crate::pipeline::Pipeline;
use crate::shader::{Shader, ShaderStage, MaterialParameterInfo, VertexAttribute};

/// Current archive format version
pub const PIPELINE_ARCHIVE_VERSION: u32 = 1;

/// One stored stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageArchive {
    pub stage: ShaderStage,
    pub entry_point: String,
    pub code: Vec<u8>,
}

/// Serializable image of a pipeline
///
/// The backend object is never stored; a loaded pipeline must go through
/// `rhi_init` again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineArchive {
    pub version: u32,
    pub depth_test: DepthTestInfo,
    pub stencil_test: StencilTestInfo,
    pub input_assembly: AssemblyInfo,
    pub rasterizer: RasterizerInfo,
    pub color_blending: ColorBlendingInfo,
    pub stages: Vec<StageArchive>,
    pub parameters: Vec<MaterialParameterInfo>,
    pub vertex_attributes: Vec<VertexAttribute>,
}

impl PipelineArchive {
    /// Capture the persistent state of a pipeline
    pub fn capture(pipeline: &Pipeline) -> Self {
        Self {
            version: PIPELINE_ARCHIVE_VERSION,
            depth_test: pipeline.depth_test,
            stencil_test: pipeline.stencil_test,
            input_assembly: pipeline.input_assembly,
            rasterizer: pipeline.rasterizer,
            color_blending: pipeline.color_blending,
            stages: pipeline
                .shader_array()
                .into_iter()
                .flatten()
                .map(|shader| StageArchive {
                    stage: shader.stage(),
                    entry_point: shader.entry_point().to_string(),
                    code: shader.code().to_vec(),
                })
                .collect(),
            parameters: pipeline.parameters().values().cloned().collect(),
            vertex_attributes: pipeline.vertex_attributes().to_vec(),
        }
    }

    /// Write the archive into a pipeline, replacing its persistent state
    ///
    /// # Errors
    ///
    /// `InvalidResource` on a version mismatch or a stage stored twice.
    pub fn apply(self, pipeline: &mut Pipeline) -> Result<()> {
        if self.version != PIPELINE_ARCHIVE_VERSION {
            crate::engine_error!(
                "obsidian::Pipeline",
                "Unsupported pipeline archive version {} (expected {})",
                self.version,
                PIPELINE_ARCHIVE_VERSION
            );
            return Err(Error::InvalidResource(format!(
                "Unsupported pipeline archive version {}",
                self.version
            )));
        }

        let mut shaders: Vec<Shader> = Vec::with_capacity(self.stages.len());
        for stored in self.stages {
            if shaders.iter().any(|s| s.stage() == stored.stage) {
                return Err(Error::InvalidResource(format!(
                    "Stage {} stored twice in pipeline archive",
                    stored.stage.name()
                )));
            }
            let mut shader = Shader::new(stored.stage);
            shader.set_entry_point(stored.entry_point);
            shader.upload(&stored.code);
            shaders.push(shader);
        }

        let parameters: BTreeMap<String, MaterialParameterInfo> = self
            .parameters
            .into_iter()
            .map(|info| (info.name.clone(), info))
            .collect();

        pipeline.depth_test = self.depth_test;
        pipeline.stencil_test = self.stencil_test;
        pipeline.input_assembly = self.input_assembly;
        pipeline.rasterizer = self.rasterizer;
        pipeline.color_blending = self.color_blending;
        pipeline.replace_contents(shaders, parameters, self.vertex_attributes);
        Ok(())
    }
}

impl Pipeline {
    /// Serialize the persistent state (fixed-function groups, stages,
    /// parameters, vertex attributes) to JSON bytes
    ///
    /// # Errors
    ///
    /// `BackendError` if encoding fails.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&PipelineArchive::capture(self))
            .map_err(|e| crate::engine_err!("obsidian::Pipeline", "Failed to serialize pipeline: {}", e))
    }

    /// Load state written by `serialize`
    ///
    /// The backend object becomes out of date and is rebuilt by the next `rhi_init`.
    ///
    /// # Errors
    ///
    /// - `BackendError` if the bytes are not a pipeline archive
    /// - `InvalidResource` if the archive is inconsistent
    pub fn deserialize(&mut self, bytes: &[u8]) -> Result<()> {
        let archive: PipelineArchive = serde_json::from_slice(bytes)
            .map_err(|e| crate::engine_err!("obsidian::Pipeline", "Failed to deserialize pipeline: {}", e))?;
        archive.apply(self)
    }
}

#[cfg(test)]
#[path = "pipeline_archive_tests.rs"]
mod tests;
