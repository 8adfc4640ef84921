//! Streaming particles: a chunk of points every second, each travelling from
//! a spot near the origin to the right edge and disappearing there.

use anyhow::{Context, Result};
use rand::rngs::ThreadRng;

use pointfield_engine::core::{App, AppControl, FrameCtx};
use pointfield_engine::device::GpuInit;
use pointfield_engine::logging::{init_logging, LoggingConfig};
use pointfield_engine::paint::Color;
use pointfield_engine::render::points::StreamedPointRenderer;
use pointfield_engine::window::{Runtime, RuntimeConfig};
use pointfield_sim::{StreamConfig, StreamField};

struct StreamDemo {
    field: StreamField,
    renderer: StreamedPointRenderer,
    rng: ThreadRng,
}

impl StreamDemo {
    fn new(config: StreamConfig) -> Result<Self> {
        let mut renderer = StreamedPointRenderer::new(config.capacity, config.point_size);
        let mut field = StreamField::new(config).context("invalid stream configuration")?;
        let mut rng = rand::rng();

        // Initial chunk, born at time zero: the frame clock reads 0.0 on frame 0.
        // The cadence takes over from tick 1.
        if let Some(chunk) = field.spawn(0.0, &mut rng) {
            renderer.stage(chunk);
        }

        Ok(Self { field, renderer, rng })
    }
}

impl App for StreamDemo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let time = ctx.time;

        if let Some(chunk) = self.field.on_frame(time.elapsed, time.frame_index, &mut self.rng) {
            self.renderer.stage(chunk);
        }

        let count = self.field.draw_count();
        let renderer = &mut self.renderer;
        ctx.render(Color::BLACK, |rctx, target| {
            renderer.render(rctx, target, &time, count);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = StreamConfig::default();
    log::info!(
        "stream demo: capacity {} records, {} per chunk every {} frames, limit {}",
        config.capacity,
        config.chunk_size,
        config.spawn_interval,
        config.population_limit
    );
    log::debug!("spawn distributions: {:?}", config.spawn);

    let app = StreamDemo::new(config)?;

    Runtime::run(
        RuntimeConfig {
            title: "pointfield: stream".to_string(),
            ..Default::default()
        },
        GpuInit::default(),
        app,
    )
}
