//! Unit tests for vulkan.rs

use super::*;

fn features12(separate_depth_stencil_layouts: bool) -> vk::PhysicalDeviceVulkan12Features<'static> {
    vk::PhysicalDeviceVulkan12Features::default()
        .separate_depth_stencil_layouts(separate_depth_stencil_layouts)
}

#[test]
fn test_vulkan_1_2_with_separate_layouts_accepted() {
    assert!(meets_requirements(vk::API_VERSION_1_2, &features12(true)));
    assert!(meets_requirements(vk::API_VERSION_1_3, &features12(true)));
}

#[test]
fn test_vulkan_1_1_rejected() {
    assert!(!meets_requirements(vk::API_VERSION_1_1, &features12(true)));
    assert!(!meets_requirements(vk::API_VERSION_1_0, &features12(true)));
}

#[test]
fn test_missing_separate_layouts_rejected() {
    assert!(!meets_requirements(vk::API_VERSION_1_3, &features12(false)));
}

