use bytemuck::{Pod, Zeroable};
use pointfield_sim::{SpawnedChunk, RECORD_STRIDE};

use crate::render::{RenderCtx, RenderTarget};
use crate::time::FrameTime;

use super::common::{point_pipeline, uniform_bind_group_layout, uniform_binding, QuadBuffers};

/// Renderer for the streaming demo.
///
/// Owns a fixed-capacity GPU buffer of `StreamRecord`s that mirrors the
/// simulation's ring. Chunks are staged with [`stage`](Self::stage) and
/// written by byte offset (`Queue::write_buffer`) at the start of the next
/// [`render`](Self::render); the rest of the buffer is never touched. Motion
/// and visibility are computed in the vertex shader from each record's birth
/// time and the frame time uniform.
pub struct StreamedPointRenderer {
    capacity: u32,
    point_size: f32,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    globals_ubo: Option<wgpu::Buffer>,

    quad: Option<QuadBuffers>,
    records: Option<wgpu::Buffer>,

    pending: Vec<SpawnedChunk>,
}

impl StreamedPointRenderer {
    /// `capacity` in records; `point_size` in physical pixels.
    pub fn new(capacity: u32, point_size: f32) -> Self {
        Self {
            capacity,
            point_size,
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            globals_ubo: None,
            quad: None,
            records: None,
            pending: Vec::new(),
        }
    }

    /// Size of the record buffer in bytes.
    #[inline]
    pub fn buffer_size(&self) -> u64 {
        self.capacity as u64 * RECORD_STRIDE
    }

    /// Queues a chunk for upload before the next draw.
    pub fn stage(&mut self, chunk: SpawnedChunk) {
        let end = chunk.byte_offset + chunk.bytes().len() as u64;
        assert!(
            end <= self.buffer_size(),
            "chunk {} ends at byte {end}, past the {}-byte ring",
            chunk.slot.index,
            self.buffer_size()
        );
        self.pending.push(chunk);
    }

    /// Chunks staged but not yet written to the GPU.
    #[inline]
    pub fn pending(&self) -> &[SpawnedChunk] {
        &self.pending
    }

    /// Uploads staged chunks, then draws `count` records.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        time: &FrameTime,
        count: u32,
    ) {
        self.ensure_pipeline(ctx);
        self.ensure_buffers(ctx);
        self.ensure_bindings(ctx);

        self.flush_pending(ctx);
        self.write_globals(ctx, time);

        let count = count.min(self.capacity);
        if count == 0 {
            return;
        }

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad) = self.quad.as_ref() else { return };
        let Some(records) = self.records.as_ref() else { return };

        let mut rpass = target.load_pass("pointfield streamed pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, records.slice(..));
        rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QuadBuffers::INDEX_COUNT, 0, 0..count);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bind_group_layout =
            uniform_bind_group_layout::<StreamGlobals>(ctx, "pointfield streamed bgl");
        let pipeline = point_pipeline(
            ctx,
            "pointfield streamed",
            include_str!("shaders/streamed_points.wgsl"),
            &bind_group_layout,
            record_layout(),
        );

        log::debug!("streamed point pipeline built for {:?}", ctx.surface_format);

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
            uniform_binding::<StreamGlobals>(ctx, bgl, "pointfield streamed globals");
        self.globals_ubo = Some(ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx, "pointfield streamed"));
        }
        if self.records.is_none() {
            // Zero-initialized; slots not yet written are never inside the draw count.
            self.records = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("pointfield streamed records"),
                size: self.buffer_size(),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            log::info!(
                "allocated ring buffer: {} records x {} bytes",
                self.capacity,
                RECORD_STRIDE
            );
        }
    }

    fn flush_pending(&mut self, ctx: &RenderCtx<'_>) {
        let Some(records) = self.records.as_ref() else { return };
        for chunk in self.pending.drain(..) {
            ctx.queue.write_buffer(records, chunk.byte_offset, chunk.bytes());
        }
    }

    fn write_globals(&self, ctx: &RenderCtx<'_>, time: &FrameTime) {
        let Some(ubo) = self.globals_ubo.as_ref() else { return };
        ctx.queue.write_buffer(
            ubo,
            0,
            bytemuck::bytes_of(&StreamGlobals {
                viewport: ctx.viewport.to_uniform(),
                time: time.elapsed,
                tick: time.frame_index as f32,
                point_size: self.point_size,
                _pad: [0.0; 3],
            }),
        );
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Per-frame uniform (32 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct StreamGlobals {
    viewport: [f32; 2],
    time: f32,
    tick: f32,
    point_size: f32,
    _pad: [f32; 3],
}

/// Instance attributes over `StreamRecord`; offsets follow its field order.
const RECORD_ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    1 => Float32x2, // start
    2 => Float32x2, // target
    3 => Float32x2, // velocity
    4 => Float32,   // birth
    5 => Float32x4  // color
];

fn record_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: RECORD_STRIDE,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &RECORD_ATTRS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointfield_sim::{ChunkSlot, StreamRecord};
    use std::mem::offset_of;

    #[test]
    fn attribute_offsets_match_record_fields() {
        let offsets: Vec<u64> = RECORD_ATTRS.iter().map(|a| a.offset).collect();
        assert_eq!(
            offsets,
            vec![
                offset_of!(StreamRecord, start) as u64,
                offset_of!(StreamRecord, target) as u64,
                offset_of!(StreamRecord, velocity) as u64,
                offset_of!(StreamRecord, birth) as u64,
                offset_of!(StreamRecord, color) as u64,
            ]
        );
        assert_eq!(record_layout().array_stride, 44);
    }

    #[test]
    fn globals_are_32_bytes() {
        assert_eq!(std::mem::size_of::<StreamGlobals>(), 32);
    }

    fn chunk(index: u32, len: u32) -> SpawnedChunk {
        let slot = ChunkSlot { index, first_record: index * len, len };
        SpawnedChunk {
            slot,
            byte_offset: slot.byte_offset(RECORD_STRIDE),
            records: vec![StreamRecord::default(); len as usize],
        }
    }

    #[test]
    fn stages_chunks_in_order() {
        let mut r = StreamedPointRenderer::new(50, 10.0);
        r.stage(chunk(0, 10));
        r.stage(chunk(4, 10));
        let offsets: Vec<u64> = r.pending().iter().map(|c| c.byte_offset).collect();
        assert_eq!(offsets, vec![0, 4 * 10 * 44]);
        assert_eq!(r.buffer_size(), 50 * 44);
    }

    #[test]
    #[should_panic(expected = "past the")]
    fn staging_past_the_ring_is_a_bug() {
        let mut r = StreamedPointRenderer::new(50, 10.0);
        r.stage(chunk(5, 10));
    }
}
