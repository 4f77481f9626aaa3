/// ShaderCompiler trait - seam for the external shader front-end

use crate::error::Result;
use crate::shader::ShaderSource;

/// Shader compiler front-end
///
/// Turns shader source text into per-stage bytecode and reflection.
/// Implementations live outside the core (offline compilers, tooling).
pub trait ShaderCompiler: Send + Sync {
    /// Name of the backend API the produced bytecode targets (e.g., "vulkan")
    fn api_name(&self) -> &str;

    /// Compile `source` into `out`
    ///
    /// On failure `out` is left in an unspecified state and must not be submitted.
    fn compile(&self, source: &str, out: &mut ShaderSource) -> Result<()>;
}
