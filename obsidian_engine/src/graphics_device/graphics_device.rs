/// GraphicsDevice trait - factory for native render passes, pipelines and command lists

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{
    RenderPass, RenderPassDesc, Pipeline, PipelineDesc, CommandList,
};

// ============================================================================
// Configuration
// ============================================================================

/// Validation message filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugSeverity {
    /// Only errors
    ErrorsOnly,
    /// Errors and warnings
    ErrorsAndWarnings,
    /// Everything, including info and verbose messages
    All,
}

/// Graphics device configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Application version (major, minor, patch)
    pub app_version: (u32, u32, u32),
    /// Enable validation/debug layers
    pub enable_validation: bool,
    /// Which validation messages reach the engine log
    pub debug_severity: DebugSeverity,
    /// Panic on validation errors (debugging aid)
    pub break_on_validation_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Obsidian Application".to_string(),
            app_version: (1, 0, 0),
            enable_validation: cfg!(debug_assertions),
            debug_severity: DebugSeverity::ErrorsAndWarnings,
            break_on_validation_error: false,
        }
    }
}

// ============================================================================
// GraphicsDevice trait
// ============================================================================

/// Graphics device trait
///
/// Central factory for native GPU objects. Implemented by backend-specific
/// devices (e.g., VulkanGraphicsDevice) and shared as `Arc<Mutex<dyn GraphicsDevice>>`.
pub trait GraphicsDevice: Send + Sync {
    /// Create a render pass
    ///
    /// # Arguments
    ///
    /// * `desc` - Attachments, subpass and dependency of the pass
    ///
    /// # Returns
    ///
    /// A shared pointer to the created render pass
    fn create_render_pass(&mut self, desc: &RenderPassDesc) -> Result<Arc<dyn RenderPass>>;

    /// Create a graphics or compute pipeline
    ///
    /// # Arguments
    ///
    /// * `desc` - Pipeline descriptor
    ///
    /// # Returns
    ///
    /// A shared pointer to the created pipeline
    fn create_pipeline(&mut self, desc: &PipelineDesc) -> Result<Arc<dyn Pipeline>>;

    /// Create a command list for recording commands
    fn create_command_list(&mut self) -> Result<Box<dyn CommandList>>;

    /// Wait for the GPU to finish all submitted work
    fn wait_idle(&self) -> Result<()>;
}
