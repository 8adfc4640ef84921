use bytemuck::{Pod, Zeroable};

use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{point_pipeline, uniform_bind_group_layout, uniform_binding, QuadBuffers};

/// Renderer for host-simulated points.
///
/// The whole position array is replaced every frame; the instance buffer only
/// grows (power-of-two capacity) and is reused between frames.
pub struct DynamicPointRenderer {
    point_size: f32,
    color: Color,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    globals_ubo: Option<wgpu::Buffer>,

    quad: Option<QuadBuffers>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
}

impl DynamicPointRenderer {
    /// `point_size` in physical pixels.
    pub fn new(point_size: f32, color: Color) -> Self {
        Self {
            point_size,
            color,
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            globals_ubo: None,
            quad: None,
            instance_vbo: None,
            instance_capacity: 0,
        }
    }

    /// Uploads `positions` (clip space) and draws one point per entry.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        positions: &[[f32; 2]],
    ) {
        if positions.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx, "pointfield dynamic"));
        }
        self.ensure_instance_capacity(ctx, positions.len());
        self.write_globals(ctx);

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(positions));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad) = self.quad.as_ref() else { return };

        let mut rpass = target.load_pass("pointfield dynamic pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QuadBuffers::INDEX_COUNT, 0, 0..positions.len() as u32);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bind_group_layout =
            uniform_bind_group_layout::<DynamicGlobals>(ctx, "pointfield dynamic bgl");
        let pipeline = point_pipeline(
            ctx,
            "pointfield dynamic",
            include_str!("shaders/dynamic_points.wgsl"),
            &bind_group_layout,
            position_layout(),
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.globals_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.globals_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let (ubo, bind_group) =
            uniform_binding::<DynamicGlobals>(ctx, bgl, "pointfield dynamic globals");
        self.globals_ubo = Some(ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = grown_capacity(required);
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pointfield dynamic instance vbo"),
            size: (new_cap * std::mem::size_of::<[f32; 2]>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
        log::debug!("dynamic point buffer grown to {new_cap} instances");
    }

    fn write_globals(&self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.globals_ubo.as_ref() else { return };
        ctx.queue.write_buffer(
            ubo,
            0,
            bytemuck::bytes_of(&DynamicGlobals {
                viewport: ctx.viewport.to_uniform(),
                point_size: self.point_size,
                _pad: 0.0,
                color: self.color.to_array(),
            }),
        );
    }
}

fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(64)
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Per-frame uniform (32 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct DynamicGlobals {
    viewport: [f32; 2],
    point_size: f32,
    _pad: f32,
    color: [f32; 4],
}

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x2];

fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 2]>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &POSITION_ATTRS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_grows_in_powers_of_two() {
        assert_eq!(grown_capacity(1), 64);
        assert_eq!(grown_capacity(64), 64);
        assert_eq!(grown_capacity(65), 128);
        assert_eq!(grown_capacity(10_000), 16_384);
    }

    #[test]
    fn globals_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<DynamicGlobals>(), 32);
        assert_eq!(std::mem::offset_of!(DynamicGlobals, color), 16);
    }

    #[test]
    fn positions_are_tightly_packed() {
        assert_eq!(position_layout().array_stride, 8);
    }
}
