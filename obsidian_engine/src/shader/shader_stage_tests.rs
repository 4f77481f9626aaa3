//! Unit tests for shader_stage.rs

use crate::shader::{ShaderStage, ShaderType, SHADER_STAGE_COUNT};

#[test]
fn test_stage_indices_are_slot_order() {
    for (i, stage) in ShaderStage::ALL.iter().enumerate() {
        assert_eq!(stage.index(), i);
    }
    assert_eq!(ShaderStage::ALL.len(), SHADER_STAGE_COUNT);
}

#[test]
fn test_stage_flags_are_distinct() {
    let mut all = ShaderType::empty();
    for stage in ShaderStage::ALL {
        assert!(!all.contains(stage.flag()));
        all |= stage.flag();
    }
    assert_eq!(all, ShaderType::all());
}

#[test]
fn test_stages_iterator_in_slot_order() {
    let set = ShaderType::FRAGMENT | ShaderType::VERTEX | ShaderType::COMPUTE;
    let stages: Vec<ShaderStage> = set.stages().collect();
    assert_eq!(stages, vec![ShaderStage::Vertex, ShaderStage::Fragment, ShaderStage::Compute]);
}

#[test]
fn test_validity_predicates() {
    assert!(ShaderType::GRAPHICS_REQUIRED.is_valid_graphical());
    assert!(!ShaderType::VERTEX.is_valid_graphical());
    assert!((ShaderType::VERTEX | ShaderType::GEOMETRY | ShaderType::FRAGMENT).is_valid_graphical());
    assert!(ShaderType::COMPUTE.is_valid_compute());
    assert!(!ShaderType::GRAPHICS_ALL.is_valid_compute());
    assert!(!ShaderType::GRAPHICS_ALL.contains(ShaderType::COMPUTE));
}

#[test]
fn test_from_stage() {
    assert_eq!(ShaderType::from(ShaderStage::Geometry), ShaderType::GEOMETRY);
    assert_eq!(ShaderStage::TessellationControl.name(), "TessellationControl");
}
