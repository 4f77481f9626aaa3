/// Texture formats and their attachment classes

use serde::{Deserialize, Serialize};

/// Pixel format of a texture or render surface
///
/// `Undefined` marks an unused attachment slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    #[default]
    Undefined,

    // Color formats
    R8_UNORM,
    R8G8B8A8_SRGB,
    R8G8B8A8_UNORM,
    B8G8R8A8_SRGB,
    B8G8R8A8_UNORM,
    A2B10G10R10_UNORM,
    R16G16B16A16_SFLOAT,
    R32_SFLOAT,
    R32G32B32A32_SFLOAT,

    // Depth / stencil formats
    D16_UNORM,
    D32_FLOAT,
    D24_UNORM_S8_UINT,
    D32_FLOAT_S8_UINT,
    S8_UINT,
}

/// Attachment class of a format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatClass {
    /// Regular color target
    Color,
    /// Depth-only target
    Depth,
    /// Depth-only target used for shadow maps
    ShadowDepth,
    /// Combined depth and stencil target
    DepthStencil,
    /// Stencil-only target
    Stencil,
    /// No format
    Undefined,
}

impl TextureFormat {
    /// Attachment class of this format
    pub fn class(&self) -> FormatClass {
        match self {
            TextureFormat::Undefined => FormatClass::Undefined,
            TextureFormat::D16_UNORM => FormatClass::ShadowDepth,
            TextureFormat::D32_FLOAT => FormatClass::Depth,
            TextureFormat::D24_UNORM_S8_UINT | TextureFormat::D32_FLOAT_S8_UINT => {
                FormatClass::DepthStencil
            }
            TextureFormat::S8_UINT => FormatClass::Stencil,
            _ => FormatClass::Color,
        }
    }

    /// Returns true if the format carries a stencil aspect
    pub fn has_stencil(&self) -> bool {
        matches!(self.class(), FormatClass::DepthStencil | FormatClass::Stencil)
    }

    /// Returns true if the format carries a depth aspect
    pub fn has_depth(&self) -> bool {
        matches!(
            self.class(),
            FormatClass::Depth | FormatClass::ShadowDepth | FormatClass::DepthStencil
        )
    }

    /// Returns true if the format can only be bound as a depth/stencil attachment
    pub fn is_depth_stencil_class(&self) -> bool {
        self.has_depth() || self.has_stencil()
    }

    /// Returns true for the `Undefined` sentinel
    pub fn is_undefined(&self) -> bool {
        *self == TextureFormat::Undefined
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
