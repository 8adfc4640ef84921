//! Bouncing particles: points simulated on the host, reflected at the edges
//! of clip space, and redrawn from scratch every frame.

use anyhow::{Context, Result};

use pointfield_engine::core::{App, AppControl, FrameCtx};
use pointfield_engine::device::GpuInit;
use pointfield_engine::logging::{init_logging, LoggingConfig};
use pointfield_engine::paint::Color;
use pointfield_engine::render::points::DynamicPointRenderer;
use pointfield_engine::window::{Runtime, RuntimeConfig};
use pointfield_sim::{BounceConfig, BounceField};

struct BounceDemo {
    field: BounceField,
    renderer: DynamicPointRenderer,
    positions: Vec<[f32; 2]>,
}

impl BounceDemo {
    fn new(config: &BounceConfig) -> Result<Self> {
        let field = BounceField::new(config, &mut rand::rng())
            .context("invalid bounce configuration")?;
        let renderer =
            DynamicPointRenderer::new(config.point_size, Color::from_straight_array(config.color));

        Ok(Self {
            positions: Vec::with_capacity(field.len()),
            field,
            renderer,
        })
    }
}

impl App for BounceDemo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.field.step();
        self.field.write_positions(&mut self.positions);

        let (renderer, positions) = (&mut self.renderer, &self.positions);
        ctx.render(Color::BLACK, |rctx, target| {
            renderer.render(rctx, target, positions);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = BounceConfig::default();
    log::info!(
        "bounce demo: {} particles, size {} px, velocity {:?}",
        config.count,
        config.point_size,
        config.velocity
    );

    let app = BounceDemo::new(&config)?;

    Runtime::run(
        RuntimeConfig {
            title: "pointfield: bounce".to_string(),
            ..Default::default()
        },
        GpuInit::default(),
        app,
    )
}
