/// Canonical attachment-format key of a render pass

use crate::error::{Error, Result};
use crate::graphics_device::{RenderTarget, TextureFormat};

/// Maximum number of color attachments bound at once
pub const MAX_COLOR_ATTACHMENTS: usize = 8;

/// Attachment formats identifying a render pass
///
/// Slot index is the color binding slot. Unused slots and a missing depth
/// attachment are `TextureFormat::Undefined`. Load/store behavior is fixed
/// by the builder and is not part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderPassKey {
    color_attachments: [TextureFormat; MAX_COLOR_ATTACHMENTS],
    depth_stencil: TextureFormat,
}

impl RenderPassKey {
    /// Key of a single-color swapchain pass
    ///
    /// # Errors
    ///
    /// `InvalidResource` if `format` is `Undefined`.
    pub fn from_swapchain_format(format: TextureFormat) -> Result<Self> {
        if format.is_undefined() {
            return Err(Error::InvalidResource(
                "Swapchain format is undefined".to_string(),
            ));
        }

        let mut color_attachments = [TextureFormat::Undefined; MAX_COLOR_ATTACHMENTS];
        color_attachments[0] = format;
        Ok(Self {
            color_attachments,
            depth_stencil: TextureFormat::Undefined,
        })
    }

    /// Key of a pass drawing into the given surfaces
    ///
    /// # Errors
    ///
    /// `InvalidResource` if more than `MAX_COLOR_ATTACHMENTS` colors are given.
    pub fn from_attachments(
        color_attachments: &[&dyn RenderTarget],
        depth_stencil: Option<&dyn RenderTarget>,
    ) -> Result<Self> {
        let formats: Vec<TextureFormat> = color_attachments.iter().map(|t| t.format()).collect();
        Self::from_formats(&formats, depth_stencil.map(|t| t.format()))
    }

    /// Key from raw formats
    ///
    /// # Errors
    ///
    /// `InvalidResource` if more than `MAX_COLOR_ATTACHMENTS` colors are given
    /// or a color format is `Undefined`.
    pub fn from_formats(colors: &[TextureFormat], depth_stencil: Option<TextureFormat>) -> Result<Self> {
        if colors.len() > MAX_COLOR_ATTACHMENTS {
            return Err(Error::InvalidResource(format!(
                "{} color attachments requested, at most {} supported",
                colors.len(),
                MAX_COLOR_ATTACHMENTS
            )));
        }

        if let Some(slot) = colors.iter().position(|f| f.is_undefined()) {
            return Err(Error::InvalidResource(format!(
                "Color attachment {} has an undefined format",
                slot
            )));
        }

        let mut color_attachments = [TextureFormat::Undefined; MAX_COLOR_ATTACHMENTS];
        color_attachments[..colors.len()].copy_from_slice(colors);

        Ok(Self {
            color_attachments,
            depth_stencil: depth_stencil.unwrap_or(TextureFormat::Undefined),
        })
    }

    /// All color slots, including unused ones
    pub fn color_formats(&self) -> &[TextureFormat; MAX_COLOR_ATTACHMENTS] {
        &self.color_attachments
    }

    /// Number of leading defined color slots
    pub fn color_attachment_count(&self) -> usize {
        self.color_attachments
            .iter()
            .take_while(|f| !f.is_undefined())
            .count()
    }

    pub fn depth_stencil_format(&self) -> TextureFormat {
        self.depth_stencil
    }

    pub fn has_depth_stencil(&self) -> bool {
        !self.depth_stencil.is_undefined()
    }
}

#[cfg(test)]
#[path = "render_pass_key_tests.rs"]
mod tests;
