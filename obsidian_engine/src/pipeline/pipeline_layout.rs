/// Backend layouts derived from reflection: vertex input and uniform bindings

use std::collections::BTreeMap;
use crate::error::{Error, Result};
use crate::graphics_device::{
    VertexLayout, VertexInputBinding, VertexInputAttribute, DescriptorBinding,
};
use crate::shader::{VertexAttribute, MaterialParameterInfo, ShaderType};

/// Vertex input layout of a set of attributes
///
/// One binding per vertex stream. The stride of a stream is the end of its
/// furthest attribute; its input rate is that of its first attribute.
pub fn vertex_layout_from_attributes(attributes: &[VertexAttribute]) -> VertexLayout {
    let mut streams: BTreeMap<u32, VertexInputBinding> = BTreeMap::new();

    for attribute in attributes {
        let binding = attribute.stream_index as u32;
        let end = attribute.offset as u32 + attribute.element_type.size_bytes();
        let entry = streams.entry(binding).or_insert(VertexInputBinding {
            binding,
            stride: 0,
            input_rate: attribute.rate,
        });
        entry.stride = entry.stride.max(end);
    }

    let mut layout_attributes: Vec<VertexInputAttribute> = attributes
        .iter()
        .map(|attribute| VertexInputAttribute {
            location: attribute.location as u32,
            binding: attribute.stream_index as u32,
            element_type: attribute.element_type,
            offset: attribute.offset as u32,
        })
        .collect();
    layout_attributes.sort_by_key(|a| a.location);

    VertexLayout {
        bindings: streams.into_values().collect(),
        attributes: layout_attributes,
    }
}

/// Uniform buffer bindings of a parameter table
///
/// One binding per distinct binding slot. The block size covers every member
/// and the stage set is the union of the members' stages.
///
/// # Errors
///
/// `InvalidResource` if a member's end offset does not fit in 32 bits
pub fn descriptor_bindings_from_parameters<'a>(
    parameters: impl IntoIterator<Item = &'a MaterialParameterInfo>,
) -> Result<Vec<DescriptorBinding>> {
    let mut bindings: BTreeMap<u32, (u32, ShaderType)> = BTreeMap::new();

    for info in parameters {
        let end = info.offset.checked_add(info.size).ok_or_else(|| {
            let message = format!(
                "Parameter '{}' overflows binding {} (offset {}, size {})",
                info.name, info.binding, info.offset, info.size
            );
            crate::engine_error!("obsidian::Pipeline", "{}", message);
            Error::InvalidResource(message)
        })?;
        let entry = bindings.entry(info.binding).or_insert((0, ShaderType::empty()));
        entry.0 = entry.0.max(end);
        entry.1 |= info.stages;
    }

    Ok(bindings
        .into_iter()
        .map(|(binding, (size, stages))| DescriptorBinding { binding, size, stages })
        .collect())
}

#[cfg(test)]
#[path = "pipeline_layout_tests.rs"]
mod tests;
