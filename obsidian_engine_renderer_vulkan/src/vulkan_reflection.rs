/// SPIR-V reflection through spirq
///
/// Produces the engine's `ShaderReflection` (vertex inputs and uniform block
/// members) from one stage's bytecode.

use obsidian_engine::obsidian::Result;
use obsidian_engine::obsidian::shader::{
    ShaderStage, ShaderReflection, VertexAttribute, VertexBufferElementType,
    VertexAttributeInputRate, VertexBufferSemantic, MaterialParameterInfo, MaterialParameterType,
};
use obsidian_engine::{engine_bail, engine_err};

/// Reflect one stage of SPIR-V bytecode
///
/// Vertex inputs are reported only for the vertex stage, packed into stream 0
/// in location order. Uniform block members are reported with their block's
/// binding and the stage's flag.
///
/// # Errors
///
/// `BackendError` if the bytecode is not valid SPIR-V, a vertex input has a
/// type that cannot be fed from a vertex buffer, or a location, offset or size
/// does not fit the engine's attribute and parameter fields.
pub fn reflect_spirv(code: &[u8], stage: ShaderStage) -> Result<ShaderReflection> {
    if code.is_empty() || code.len() % 4 != 0 {
        engine_bail!("obsidian::vulkan",
            "SPIR-V code size must be a non-zero multiple of 4 (got {} bytes)", code.len());
    }
    let words: Vec<u32> = code
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    let entry_points = spirq::ReflectConfig::new()
        .spv(words.as_slice())
        .ref_all_rscs(true)
        .reflect()
        .map_err(|e| engine_err!("obsidian::vulkan", "SPIR-V reflection failed: {:?}", e))?;

    let mut reflection = ShaderReflection::default();
    let mut inputs: Vec<(u32, String, VertexBufferElementType)> = Vec::new();

    for entry_point in &entry_points {
        for var in entry_point.vars.iter() {
            match var {
                spirq::var::Variable::Input { name, location, ty, .. } if stage == ShaderStage::Vertex => {
                    let name = name.clone().unwrap_or_default();
                    let element_type = vertex_element_type(ty).ok_or_else(|| {
                        engine_err!("obsidian::vulkan",
                            "Vertex input '{}' has unsupported type {:?}", name, ty)
                    })?;
                    if !inputs.iter().any(|(loc, _, _)| *loc == location.loc()) {
                        inputs.push((location.loc(), name, element_type));
                    }
                }
                spirq::var::Variable::Descriptor { desc_bind, desc_ty, ty, .. } => {
                    if !matches!(desc_ty, spirq::ty::DescriptorType::UniformBuffer()) {
                        continue;
                    }
                    if let spirq::ty::Type::Struct(st) = ty {
                        for member in &st.members {
                            let name = member.name.clone().unwrap_or_default();
                            let offset = u32::try_from(member.offset.unwrap_or(0)).map_err(|_| {
                                engine_err!("obsidian::vulkan",
                                    "Uniform member '{}' offset does not fit in 32 bits", name)
                            })?;
                            let size = u32::try_from(member.ty.nbyte().unwrap_or(0)).map_err(|_| {
                                engine_err!("obsidian::vulkan",
                                    "Uniform member '{}' size does not fit in 32 bits", name)
                            })?;
                            reflection.uniform_member_infos.push(MaterialParameterInfo {
                                name,
                                param_type: parameter_type(&member.ty),
                                offset,
                                size,
                                binding: desc_bind.bind(),
                                stages: stage.flag(),
                            });
                        }
                    }
                }
                _ => {}
            }
        }
    }

    reflection.attributes = pack_vertex_inputs(inputs)?;
    Ok(reflection)
}

/// Vertex inputs as attributes of stream 0, tightly packed in location order
pub(crate) fn pack_vertex_inputs(
    mut inputs: Vec<(u32, String, VertexBufferElementType)>,
) -> Result<Vec<VertexAttribute>> {
    inputs.sort_by_key(|(loc, _, _)| *loc);

    let mut attributes = Vec::with_capacity(inputs.len());
    let mut offset: u32 = 0;
    for (location, name, element_type) in inputs {
        let Ok(location_u8) = u8::try_from(location) else {
            engine_bail!("obsidian::vulkan",
                "Vertex input '{}' location {} exceeds {}", name, location, u8::MAX);
        };
        let Ok(offset_u16) = u16::try_from(offset) else {
            engine_bail!("obsidian::vulkan",
                "Vertex input '{}' offset {} exceeds {}", name, offset, u16::MAX);
        };
        let (semantic, semantic_index) = semantic_from_name(&name);
        attributes.push(VertexAttribute {
            name,
            element_type,
            rate: VertexAttributeInputRate::Vertex,
            semantic,
            semantic_index,
            location: location_u8,
            stream_index: 0,
            offset: offset_u16,
        });
        offset += element_type.size_bytes();
    }

    Ok(attributes)
}

fn vertex_element_type(ty: &spirq::ty::Type) -> Option<VertexBufferElementType> {
    use spirq::ty::{ScalarType, Type};
    use VertexBufferElementType::*;

    let (scalar, count) = match ty {
        Type::Scalar(s) => (s, 1),
        Type::Vector(v) => (&v.scalar_ty, v.nscalar),
        _ => return None,
    };

    match (scalar, count) {
        (ScalarType::Float { bits: 32 }, 1) => Some(Float1),
        (ScalarType::Float { bits: 32 }, 2) => Some(Float2),
        (ScalarType::Float { bits: 32 }, 3) => Some(Float3),
        (ScalarType::Float { bits: 32 }, 4) => Some(Float4),
        (ScalarType::Integer { bits: 32, is_signed: true }, 1) => Some(Int1),
        (ScalarType::Integer { bits: 32, is_signed: true }, 2) => Some(Int2),
        (ScalarType::Integer { bits: 32, is_signed: true }, 3) => Some(Int3),
        (ScalarType::Integer { bits: 32, is_signed: true }, 4) => Some(Int4),
        (ScalarType::Integer { bits: 32, is_signed: false }, 1) => Some(UInt1),
        (ScalarType::Integer { bits: 32, is_signed: false }, 2) => Some(UInt2),
        (ScalarType::Integer { bits: 32, is_signed: false }, 3) => Some(UInt3),
        (ScalarType::Integer { bits: 32, is_signed: false }, 4) => Some(UInt4),
        _ => None,
    }
}

fn parameter_type(ty: &spirq::ty::Type) -> MaterialParameterType {
    use spirq::ty::{ScalarType, Type};
    use MaterialParameterType::*;

    match ty {
        Type::Scalar(ScalarType::Boolean) => Bool,
        Type::Scalar(ScalarType::Integer { is_signed: true, .. }) => Int,
        Type::Scalar(ScalarType::Integer { is_signed: false, .. }) => UInt,
        Type::Scalar(ScalarType::Float { .. }) => Float,
        Type::Vector(v) => match (&v.scalar_ty, v.nscalar) {
            (ScalarType::Float { .. }, 2) => Vec2,
            (ScalarType::Float { .. }, 3) => Vec3,
            (ScalarType::Float { .. }, 4) => Vec4,
            (ScalarType::Integer { is_signed: true, .. }, 2) => IVec2,
            (ScalarType::Integer { is_signed: true, .. }, 3) => IVec3,
            (ScalarType::Integer { is_signed: true, .. }, 4) => IVec4,
            (ScalarType::Integer { is_signed: false, .. }, 2) => UVec2,
            (ScalarType::Integer { is_signed: false, .. }, 3) => UVec3,
            (ScalarType::Integer { is_signed: false, .. }, 4) => UVec4,
            _ => Undefined,
        },
        Type::Matrix(m) => match (m.nvector, m.vector_ty.nscalar) {
            (3, 3) => Mat3,
            (4, 4) => Mat4,
            _ => Undefined,
        },
        _ => Undefined,
    }
}

/// Semantic and semantic index guessed from an input name
///
/// `in_uv1` gives (TexCoord, 1); unknown names fall back to Position.
pub(crate) fn semantic_from_name(name: &str) -> (VertexBufferSemantic, u8) {
    let lower = name.to_ascii_lowercase();
    let digits_at = lower.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    let (stem, digits) = lower.split_at(digits_at);
    let index = digits.parse::<u8>().unwrap_or(0);

    // Order matters: "bitangent" contains "tangent", "blendindices" contains "indices"
    let semantic = if stem.contains("bitangent") || stem.contains("binormal") {
        VertexBufferSemantic::Bitangent
    } else if stem.contains("tangent") {
        VertexBufferSemantic::Tangent
    } else if stem.contains("normal") {
        VertexBufferSemantic::Normal
    } else if stem.contains("uv") || stem.contains("texcoord") {
        VertexBufferSemantic::TexCoord
    } else if stem.contains("color") || stem.contains("colour") {
        VertexBufferSemantic::Color
    } else if stem.contains("weight") {
        VertexBufferSemantic::BlendWeight
    } else if stem.contains("indices") || stem.contains("joint") {
        VertexBufferSemantic::BlendIndices
    } else {
        VertexBufferSemantic::Position
    };

    (semantic, index)
}

#[cfg(test)]
#[path = "vulkan_reflection_tests.rs"]
mod tests;
