/// Render pass cache - one native render pass per distinct attachment key

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, RenderPass, RenderTarget, TextureFormat};
use crate::render_pass::{RenderPassKey, RenderPassBuilder};

/// Cache of native render passes keyed by attachment formats
///
/// Passes are created on first request and kept until `destroy_all()`.
/// There is no eviction. A pass created for a single color surface without
/// depth shares its entry with `swapchain_render_pass` of the same format.
///
/// # Example
///
/// ```no_run
/// use std::sync::{Arc, Mutex};
/// use obsidian_engine::obsidian::graphics_device::{GraphicsDevice, TextureFormat};
/// use obsidian_engine::obsidian::render_pass::RenderPassCache;
///
/// # fn run(device: Arc<Mutex<dyn GraphicsDevice>>) -> obsidian_engine::obsidian::Result<()> {
/// let mut cache = RenderPassCache::new(device);
/// let pass = cache.swapchain_render_pass(TextureFormat::B8G8R8A8_SRGB)?;
/// let same = cache.swapchain_render_pass(TextureFormat::B8G8R8A8_SRGB)?;
/// assert!(Arc::ptr_eq(&pass, &same));
/// cache.destroy_all();
/// # Ok(())
/// # }
/// ```
pub struct RenderPassCache {
    graphics_device: Arc<Mutex<dyn GraphicsDevice>>,
    render_passes: BTreeMap<RenderPassKey, Arc<dyn RenderPass>>,
}

impl RenderPassCache {
    /// Create an empty cache creating passes on `graphics_device`
    pub fn new(graphics_device: Arc<Mutex<dyn GraphicsDevice>>) -> Self {
        Self {
            graphics_device,
            render_passes: BTreeMap::new(),
        }
    }

    /// Get the pass drawing into the given surfaces, creating it on first use
    ///
    /// # Errors
    ///
    /// - `InvalidResource` if the surfaces cannot form a key
    /// - `ConstructionFailure` if the device fails to create the pass (nothing is cached)
    /// - `BackendError` if the device lock is poisoned
    pub fn find_or_create(
        &mut self,
        color_attachments: &[&dyn RenderTarget],
        depth_stencil: Option<&dyn RenderTarget>,
    ) -> Result<Arc<dyn RenderPass>> {
        let key = RenderPassKey::from_attachments(color_attachments, depth_stencil)?;
        self.find_or_create_with_key(key, RenderPassBuilder::from_key)
    }

    /// Same as `find_or_create`, from raw formats
    pub fn find_or_create_formats(
        &mut self,
        colors: &[TextureFormat],
        depth_stencil: Option<TextureFormat>,
    ) -> Result<Arc<dyn RenderPass>> {
        let key = RenderPassKey::from_formats(colors, depth_stencil)?;
        self.find_or_create_with_key(key, RenderPassBuilder::from_key)
    }

    /// Get the single-color pass used to draw into swapchain images
    ///
    /// # Errors
    ///
    /// - `InvalidResource` if `format` is `Undefined` (nothing is created)
    /// - `ConstructionFailure` if the device fails to create the pass (nothing is cached)
    /// - `BackendError` if the device lock is poisoned
    pub fn swapchain_render_pass(&mut self, format: TextureFormat) -> Result<Arc<dyn RenderPass>> {
        let key = RenderPassKey::from_swapchain_format(format)?;
        self.find_or_create_with_key(key, |_| RenderPassBuilder::swapchain(format))
    }

    fn find_or_create_with_key(
        &mut self,
        key: RenderPassKey,
        builder: impl FnOnce(&RenderPassKey) -> RenderPassBuilder,
    ) -> Result<Arc<dyn RenderPass>> {
        if let Some(pass) = self.render_passes.get(&key) {
            return Ok(Arc::clone(pass));
        }

        crate::engine_debug!(
            "obsidian::RenderPassCache",
            "Cache miss: {} color attachment(s), depth/stencil {:?}",
            key.color_attachment_count(),
            key.depth_stencil_format()
        );

        let pass = {
            let mut device = self.graphics_device.lock()
                .map_err(|_| crate::engine_err!("obsidian::RenderPassCache", "GraphicsDevice lock poisoned"))?;
            builder(&key).build(&mut *device)?
        };

        self.render_passes.insert(key, Arc::clone(&pass));
        Ok(pass)
    }

    /// Release every cached pass and empty the cache
    ///
    /// Passes still referenced elsewhere stay alive until those references
    /// are dropped, but must not be used once the device is torn down.
    pub fn destroy_all(&mut self) {
        if self.render_passes.is_empty() {
            return;
        }
        crate::engine_debug!(
            "obsidian::RenderPassCache",
            "Destroying {} render pass(es)",
            self.render_passes.len()
        );
        self.render_passes.clear();
    }

    /// Number of cached passes
    pub fn len(&self) -> usize {
        self.render_passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.render_passes.is_empty()
    }

    pub fn contains(&self, key: &RenderPassKey) -> bool {
        self.render_passes.contains_key(key)
    }

    /// Cached pass for `key`, without creating it
    pub fn get(&self, key: &RenderPassKey) -> Option<Arc<dyn RenderPass>> {
        self.render_passes.get(key).cloned()
    }

    /// Device the cache creates passes on
    pub fn graphics_device(&self) -> &Arc<Mutex<dyn GraphicsDevice>> {
        &self.graphics_device
    }
}

impl Drop for RenderPassCache {
    fn drop(&mut self) {
        self.destroy_all();
    }
}

#[cfg(test)]
#[path = "render_pass_cache_tests.rs"]
mod tests;
