//! Unit tests for render_pass_key.rs

use crate::error::Error;
use crate::graphics_device::{RenderTarget, TextureFormat};
use crate::render_pass::{RenderPassKey, MAX_COLOR_ATTACHMENTS};
use std::collections::{BTreeMap, HashSet};

struct Surface(TextureFormat);

impl RenderTarget for Surface {
    fn width(&self) -> u32 {
        64
    }

    fn height(&self) -> u32 {
        64
    }

    fn format(&self) -> TextureFormat {
        self.0
    }
}

#[test]
fn test_swapchain_key_uses_slot_zero() {
    let key = RenderPassKey::from_swapchain_format(TextureFormat::B8G8R8A8_SRGB).unwrap();

    assert_eq!(key.color_formats()[0], TextureFormat::B8G8R8A8_SRGB);
    for format in &key.color_formats()[1..] {
        assert_eq!(*format, TextureFormat::Undefined);
    }
    assert_eq!(key.depth_stencil_format(), TextureFormat::Undefined);
    assert!(!key.has_depth_stencil());
    assert_eq!(key.color_attachment_count(), 1);
}

#[test]
fn test_attachment_key_fills_unused_slots_with_undefined() {
    let albedo = Surface(TextureFormat::R8G8B8A8_UNORM);
    let normal = Surface(TextureFormat::R16G16B16A16_SFLOAT);
    let depth = Surface(TextureFormat::D32_FLOAT);

    let key = RenderPassKey::from_attachments(&[&albedo, &normal], Some(&depth)).unwrap();

    assert_eq!(key.color_formats()[0], TextureFormat::R8G8B8A8_UNORM);
    assert_eq!(key.color_formats()[1], TextureFormat::R16G16B16A16_SFLOAT);
    for format in &key.color_formats()[2..] {
        assert_eq!(*format, TextureFormat::Undefined);
    }
    assert_eq!(key.depth_stencil_format(), TextureFormat::D32_FLOAT);
    assert!(key.has_depth_stencil());
    assert_eq!(key.color_attachment_count(), 2);
}

#[test]
fn test_single_color_key_equals_swapchain_key() {
    let color = Surface(TextureFormat::B8G8R8A8_UNORM);
    let from_surfaces = RenderPassKey::from_attachments(&[&color], None).unwrap();
    let swapchain = RenderPassKey::from_swapchain_format(TextureFormat::B8G8R8A8_UNORM).unwrap();

    assert_eq!(from_surfaces, swapchain);
}

#[test]
fn test_too_many_color_attachments() {
    let colors = vec![TextureFormat::R8G8B8A8_UNORM; MAX_COLOR_ATTACHMENTS + 1];
    let result = RenderPassKey::from_formats(&colors, None);
    assert!(matches!(result, Err(Error::InvalidResource(_))));

    let colors = vec![TextureFormat::R8G8B8A8_UNORM; MAX_COLOR_ATTACHMENTS];
    let key = RenderPassKey::from_formats(&colors, None).unwrap();
    assert_eq!(key.color_attachment_count(), MAX_COLOR_ATTACHMENTS);
}

#[test]
fn test_undefined_color_format_rejected() {
    let result = RenderPassKey::from_formats(
        &[TextureFormat::R8G8B8A8_UNORM, TextureFormat::Undefined],
        None,
    );
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}

#[test]
fn test_undefined_swapchain_format_rejected() {
    let result = RenderPassKey::from_swapchain_format(TextureFormat::Undefined);
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}

#[test]
fn test_keys_differing_in_any_slot_are_distinct() {
    let base = RenderPassKey::from_formats(&[TextureFormat::R8G8B8A8_UNORM], None).unwrap();
    let other_color = RenderPassKey::from_formats(&[TextureFormat::R8G8B8A8_SRGB], None).unwrap();
    let extra_slot = RenderPassKey::from_formats(
        &[TextureFormat::R8G8B8A8_UNORM, TextureFormat::R8G8B8A8_UNORM],
        None,
    ).unwrap();
    let with_depth = RenderPassKey::from_formats(
        &[TextureFormat::R8G8B8A8_UNORM],
        Some(TextureFormat::D24_UNORM_S8_UINT),
    ).unwrap();

    let set: HashSet<RenderPassKey> = [base, other_color, extra_slot, with_depth].into_iter().collect();
    assert_eq!(set.len(), 4);

    let mut map = BTreeMap::new();
    for key in [base, other_color, extra_slot, with_depth, base] {
        map.insert(key, ());
    }
    assert_eq!(map.len(), 4);
}

#[test]
fn test_depth_only_key() {
    let key = RenderPassKey::from_formats(&[], Some(TextureFormat::D16_UNORM)).unwrap();
    assert_eq!(key.color_attachment_count(), 0);
    assert!(key.has_depth_stencil());
}
