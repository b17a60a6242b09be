/// WGSL shader for instanced thick line segments.
///
/// Each instance carries both endpoints (xyz plus the line distance in w),
/// its color, and `(width_px, dash_size, gap_size, _)`. Six vertices per
/// instance expand the segment into a quad in pixel space, padded by one
/// pixel for the anti-aliased edge and extended past both ends for caps.
pub const LINE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    viewport: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct SegmentInput {
    @location(0) start: vec4<f32>,
    @location(1) end: vec4<f32>,
    @location(2) color: vec4<f32>,
    @location(3) style: vec4<f32>,
};

struct LineOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) across: f32,
    @location(2) distance: f32,
    @location(3) style: vec4<f32>,
};

@vertex
fn vs_line(@builtin(vertex_index) vid: u32, seg: SegmentInput) -> LineOutput {
    var along = array<f32, 6>(0.0, 1.0, 0.0, 0.0, 1.0, 1.0);
    var side = array<f32, 6>(-1.0, -1.0, 1.0, 1.0, -1.0, 1.0);

    let half_size = uniforms.viewport.xy * 0.5;
    let a = uniforms.view_proj * vec4<f32>(seg.start.xyz, 1.0);
    let b = uniforms.view_proj * vec4<f32>(seg.end.xyz, 1.0);
    let sa = a.xy / a.w * half_size;
    let sb = b.xy / b.w * half_size;

    var dir = sb - sa;
    if (length(dir) < 1e-6) {
        dir = vec2<f32>(1.0, 0.0);
    }
    dir = normalize(dir);
    let normal = vec2<f32>(-dir.y, dir.x);

    let t = along[vid];
    let s = side[vid];
    let reach = seg.style.x * 0.5 + 1.0;
    let screen = mix(sa, sb, t) + normal * s * reach + dir * (t * 2.0 - 1.0) * reach;
    let depth = mix(a.z / a.w, b.z / b.w, t);

    var out: LineOutput;
    out.clip_position = vec4<f32>(screen / half_size, depth, 1.0);
    out.color = seg.color;
    out.across = s * reach;
    out.distance = mix(seg.start.w, seg.end.w, t);
    out.style = seg.style;
    return out;
}

@fragment
fn fs_line(in: LineOutput) -> @location(0) vec4<f32> {
    let half_width = in.style.x * 0.5;
    let coverage = clamp(half_width + 0.5 - abs(in.across), 0.0, 1.0);
    if (coverage <= 0.0) {
        discard;
    }
    let dash = in.style.y;
    if (dash > 0.0) {
        let period = dash + in.style.z;
        let phase = in.distance - floor(in.distance / period) * period;
        if (phase >= dash) {
            discard;
        }
    }
    return vec4<f32>(in.color.rgb, in.color.a * coverage);
}
"#;
