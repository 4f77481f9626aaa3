/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Records every creation call so tests can observe how many native
/// objects were built, and can be told to fail the next N creations.

use std::sync::{Arc, Mutex};
use crate::error::Result;
use crate::engine_bail;
use crate::graphics_device::{
    GraphicsDevice, RenderPass, RenderPassDesc, Pipeline, PipelineDesc,
    PipelineBindPoint, CommandList,
};

// ============================================================================
// Mock RenderPass
// ============================================================================

#[derive(Debug)]
pub struct MockRenderPass {
    /// Creation order (1-based)
    pub id: usize,
    pub desc: RenderPassDesc,
}

impl RenderPass for MockRenderPass {}

// ============================================================================
// Mock Pipeline
// ============================================================================

#[derive(Debug)]
pub struct MockPipeline {
    /// Creation order (1-based)
    pub id: usize,
    pub bind_point: PipelineBindPoint,
    pub stage_count: usize,
}

impl Pipeline for MockPipeline {
    fn bind_point(&self) -> PipelineBindPoint {
        self.bind_point
    }
}

// ============================================================================
// Mock CommandList
// ============================================================================

/// Command recorded by MockCommandList
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCommand {
    Begin,
    End,
    BindPipeline(PipelineBindPoint),
    Draw { vertex_count: u32, first_vertex: u32 },
    Dispatch { x: u32, y: u32, z: u32 },
}

#[derive(Debug, Default)]
pub struct MockCommandList {
    pub commands: Vec<MockCommand>,
}

impl MockCommandList {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommandList for MockCommandList {
    fn begin(&mut self) -> Result<()> {
        self.commands.push(MockCommand::Begin);
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.commands.push(MockCommand::End);
        Ok(())
    }

    fn bind_pipeline(&mut self, pipeline: &Arc<dyn Pipeline>) -> Result<()> {
        self.commands.push(MockCommand::BindPipeline(pipeline.bind_point()));
        Ok(())
    }

    fn draw(&mut self, vertex_count: u32, first_vertex: u32) -> Result<()> {
        self.commands.push(MockCommand::Draw { vertex_count, first_vertex });
        Ok(())
    }

    fn dispatch(&mut self, group_count_x: u32, group_count_y: u32, group_count_z: u32) -> Result<()> {
        self.commands.push(MockCommand::Dispatch {
            x: group_count_x,
            y: group_count_y,
            z: group_count_z,
        });
        Ok(())
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

#[derive(Default)]
pub struct MockGraphicsDevice {
    /// Every render pass descriptor that reached the device
    pub render_pass_descs: Vec<RenderPassDesc>,
    /// Every pipeline descriptor that reached the device
    pub pipeline_descs: Vec<PipelineDesc>,
    /// Number of successfully created render passes
    pub render_passes_created: usize,
    /// Number of successfully created pipelines
    pub pipelines_created: usize,
    /// Number of command lists handed out
    pub command_lists_created: usize,
    fail_render_passes: usize,
    fail_pipelines: usize,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap in the shared handle the engine passes around
    pub fn shared() -> Arc<Mutex<MockGraphicsDevice>> {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Make the next `count` render pass creations fail
    pub fn fail_next_render_passes(&mut self, count: usize) {
        self.fail_render_passes = count;
    }

    /// Make the next `count` pipeline creations fail
    pub fn fail_next_pipelines(&mut self, count: usize) {
        self.fail_pipelines = count;
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_render_pass(&mut self, desc: &RenderPassDesc) -> Result<Arc<dyn RenderPass>> {
        self.render_pass_descs.push(desc.clone());
        if self.fail_render_passes > 0 {
            self.fail_render_passes -= 1;
            engine_bail!("obsidian::MockGraphicsDevice", "Forced render pass creation failure");
        }
        self.render_passes_created += 1;
        Ok(Arc::new(MockRenderPass {
            id: self.render_passes_created,
            desc: desc.clone(),
        }))
    }

    fn create_pipeline(&mut self, desc: &PipelineDesc) -> Result<Arc<dyn Pipeline>> {
        self.pipeline_descs.push(desc.clone());
        if self.fail_pipelines > 0 {
            self.fail_pipelines -= 1;
            engine_bail!("obsidian::MockGraphicsDevice", "Forced pipeline creation failure");
        }
        self.pipelines_created += 1;
        Ok(Arc::new(MockPipeline {
            id: self.pipelines_created,
            bind_point: desc.bind_point(),
            stage_count: desc.stages.len(),
        }))
    }

    fn create_command_list(&mut self) -> Result<Box<dyn CommandList>> {
        self.command_lists_created += 1;
        Ok(Box::new(MockCommandList::new()))
    }

    fn wait_idle(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
