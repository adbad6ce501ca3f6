//! GPU data layout and WGSL source for streak rendering.
//!
//! Each stroked line becomes one instanced quad: the vertex shader
//! expands a two-triangle strip along the segment's axis, offset by half
//! the stroke width along its normal. Coordinates arrive in surface
//! pixels and are mapped to NDC against the uniform surface size.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::visuals::Rgba;

/// WGSL source for the streak pipeline.
pub const STREAK_SHADER: &str = r#"
struct Uniforms {
    surface: vec2<f32>,
    _pad: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) endpoints: vec4<f32>,
    @location(1) color: vec4<f32>,
    @location(2) extent: vec4<f32>,
) -> VertexOutput {
    // x picks the side of the stroke, y the end of the segment.
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, 0.0),
        vec2<f32>( 1.0, 0.0),
        vec2<f32>(-1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
        vec2<f32>( 1.0, 0.0),
        vec2<f32>( 1.0, 1.0),
    );
    let corner = corners[vertex_index];

    let a = endpoints.xy;
    let b = endpoints.zw;
    var axis = b - a;
    if length(axis) < 1e-4 {
        axis = vec2<f32>(0.0, 1.0);
    } else {
        axis = normalize(axis);
    }
    let normal = vec2<f32>(-axis.y, axis.x);

    let px = mix(a, b, vec2<f32>(corner.y, corner.y)) + normal * corner.x * extent.x * 0.5;
    let ndc = vec2<f32>(
        px.x / uniforms.surface.x * 2.0 - 1.0,
        1.0 - px.y / uniforms.surface.y * 2.0,
    );

    var out: VertexOutput;
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    out.color = color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

/// Per-frame uniform data.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct Uniforms {
    /// Surface size in pixels.
    pub surface: [f32; 2],
    pub _pad: [f32; 2],
}

/// One streak instance. Three vec4 rows, 48 bytes, 16-byte aligned.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct StreakInstance {
    /// Segment endpoints packed as `x0, y0, x1, y1`.
    pub endpoints: [f32; 4],
    /// Stroke color with alpha.
    pub color: [f32; 4],
    /// `x` is the stroke width; the rest is padding.
    pub extent: [f32; 4],
}

impl StreakInstance {
    /// Pack one stroked segment for upload.
    pub fn new(from: Vec2, to: Vec2, width: f32, color: Rgba) -> Self {
        Self {
            endpoints: [from.x, from.y, to.x, to.y],
            color: color.to_array(),
            extent: [width, 0.0, 0.0, 0.0],
        }
    }
}

/// Vertex attributes matching `StreakInstance`'s three vec4 rows.
pub const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 3] = [
    wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x4,
    },
    wgpu::VertexAttribute {
        offset: 16,
        shader_location: 1,
        format: wgpu::VertexFormat::Float32x4,
    },
    wgpu::VertexAttribute {
        offset: 32,
        shader_location: 2,
        format: wgpu::VertexFormat::Float32x4,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_packing() {
        let instance = StreakInstance::new(
            Vec2::new(10.0, 20.0),
            Vec2::new(10.0, 50.0),
            1.5,
            Rgba::new(0.1, 0.2, 0.3, 0.4),
        );

        assert_eq!(instance.endpoints, [10.0, 20.0, 10.0, 50.0]);
        assert_eq!(instance.color, [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(instance.extent[0], 1.5);
    }

    #[test]
    fn test_instance_size_matches_attributes() {
        assert_eq!(std::mem::size_of::<StreakInstance>(), 48);
    }
}
