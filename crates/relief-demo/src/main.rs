//! Headless scrolling-terrain demo.
//!
//! Drives the full terrain loop without a GPU: loads a location preset from
//! config, fetches synthetic imagery/elevation for it, then steps the frame
//! loop while a scripted drag pans the map across the pedestal. Midway it
//! zooms the map and switches location, exercising every data path the real
//! application uses.
//!
//! Run with: `cargo run -p relief-demo -- --frames 240 --location kauai`

mod renderer;
mod source;

use std::path::{Path, PathBuf};

use clap::Parser;
use glam::{Affine3A, Vec2, Vec3};
use relief_config::{CliArgs, Config, LocationConfig, MapConfig};
use relief_geo::{WorldRegion, bounds_to_local, lat_lon_bounds};
use relief_render::{DrawCall, Material};
use relief_terrain::{FrameInput, Terrain};
use tracing::{info, warn};

use crate::renderer::HeadlessRenderer;
use crate::source::MapSource;

/// Demo command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "relief-demo", about = "Headless scrolling-terrain demo")]
struct DemoArgs {
    #[command(flatten)]
    config: CliArgs,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 240)]
    frames: u32,

    /// Location preset to load first, by name.
    #[arg(long)]
    location: Option<String>,

    /// Seed for the synthetic map source.
    #[arg(long, default_value_t = 42)]
    seed: u32,
}

/// Height the pedestal top sits above the floor, meters.
const PEDESTAL_HEIGHT: f32 = 0.9;

/// Nominal frame rate of the scripted animation.
const FRAME_RATE: f32 = 60.0;

struct App {
    terrain: Terrain,
    renderer: HeadlessRenderer,
    source: MapSource,
    scale: f32,
    // Unscaled metric regions of the current location's data, kept so zoom
    // changes can re-place the loaded images without refetching.
    height_region: Option<WorldRegion>,
    color_region: Option<WorldRegion>,
}

impl App {
    fn new(config: &Config, seed: u32) -> Self {
        let mut renderer = HeadlessRenderer::new();
        let levels = renderer.build_mesh_levels(
            config.terrain.chunk_size,
            config.terrain.chunk_detail,
            config.lod.levels.max(1),
        );
        let terrain = Terrain::new(&config.terrain_params(), levels, Material::new());

        Self {
            terrain,
            renderer,
            source: MapSource::new(seed),
            scale: config.map.scale,
            height_region: None,
            color_region: None,
        }
    }

    /// Load a location: reset to placeholder data, then fetch and place the
    /// color image (tile-snapped bounds) and the elevation grid (exact
    /// bounds).
    fn load_location(&mut self, location: &LocationConfig) {
        info!(name = %location.name, "loading location");

        let white = self.renderer.white_tex();
        let black = self.renderer.black_tex();
        self.terrain.set_color_data(white, Vec2::ZERO, Vec2::ZERO);
        self.terrain.set_height_data(black, Vec3::ZERO, Vec2::ZERO);
        self.terrain.set_position(Vec3::ZERO);
        self.height_region = None;
        self.color_region = None;

        let query = lat_lon_bounds(location.latitude, location.longitude, location.radius_m);

        let color = self.source.fetch_color(&query);
        let region = bounds_to_local(&query, &color.given, 1.0);
        let tex = self.renderer.upload_color(&color.image);
        self.terrain.set_color_data(
            tex,
            Vec2::new(region.size.x, region.size.z) * self.scale,
            region.offset * self.scale,
        );
        self.color_region = Some(region);

        let height = self.source.fetch_height(&query);
        let region = bounds_to_local(&query, &height.given, 1.0);
        let tex = self.renderer.upload_height(&height.image);
        self.terrain
            .set_height_data(tex, region.size * self.scale, region.offset * self.scale);
        self.height_region = Some(region);
    }

    /// Zoom: re-place the loaded images at a new scale and carry the pan
    /// translation through geographic space so the view stays put.
    fn set_scale(&mut self, new_scale: f32) {
        info!(old = self.scale, new = new_scale, "rescaling map");

        if let Some(region) = self.height_region {
            self.terrain
                .set_height_dimensions(region.size * new_scale, region.offset * new_scale);
        }
        if let Some(region) = self.color_region {
            self.terrain.set_color_dimensions(
                Vec2::new(region.size.x, region.size.z) * new_scale,
                region.offset * new_scale,
            );
        }

        let geo_translation = self.terrain.frame().position() / self.scale;
        self.terrain.set_position(geo_translation * new_scale);
        self.scale = new_scale;
    }
}

fn main() {
    let args = DemoArgs::parse();

    let config_dir = resolve_config_dir(args.config.config.as_deref());
    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load config, using defaults: {e}");
            Config::default()
        }
    };
    config.apply_cli_overrides(&args.config);

    relief_log::init_logging(
        Some(&config_dir.join("logs")),
        cfg!(debug_assertions),
        Some(&config),
    );

    let locations = if config.map.locations.is_empty() {
        warn!("config has no locations, using built-in presets");
        MapConfig::default().locations
    } else {
        config.map.locations.clone()
    };
    let mut location_id = args
        .location
        .as_deref()
        .and_then(|name| {
            locations
                .iter()
                .position(|l| l.name.eq_ignore_ascii_case(name))
        })
        .unwrap_or(0);

    info!(
        chunk_size = config.terrain.chunk_size,
        grid = config.terrain.grid_dimension,
        levels = config.lod.levels,
        policy = ?config.lod.policy,
        "relief demo starting"
    );

    let mut app = App::new(&config, args.seed);
    app.load_location(&locations[location_id]);

    // The pedestal stands on the floor in front of the user; everything the
    // terrain hands the shader must land in that space.
    let ambient = Affine3A::from_translation(Vec3::new(0.0, PEDESTAL_HEIGHT, -0.5));

    let mut calls: Vec<DrawCall> = Vec::new();
    let mut shifts = 0u32;
    let mut last_anchor = app.terrain.grid().anchor();

    for frame in 0..args.frames {
        let time = frame as f32 / FRAME_RATE;

        // Scripted hand drag: pan the map in a slow loop, staying on the
        // table plane.
        let position = Vec3::new((time * 0.7).sin(), 0.0, (time * 0.5).cos() - 1.0);
        app.terrain.set_position(position);
        // Pin the clip circle to the pedestal center, not the dragged map.
        app.terrain.set_clip(-position, config.terrain.clip_radius);

        // The viewer's head circles the pedestal.
        let input = FrameInput {
            focus: Vec3::new((time * 0.25).cos() * 0.5, 0.25, (time * 0.25).sin() * 0.5),
            ambient,
        };

        calls.clear();
        app.terrain.update(&input, &mut calls);
        app.renderer
            .submit(app.terrain.material(), &calls, config.debug.trace_draw_calls);

        let anchor = app.terrain.grid().anchor();
        if anchor != last_anchor {
            shifts += 1;
            last_anchor = anchor;
        }

        if frame == args.frames / 3 {
            let scale = app.scale;
            app.set_scale(scale * 1.25);
        }
        if frame == 2 * args.frames / 3 {
            location_id = (location_id + 1) % locations.len();
            app.load_location(&locations[location_id]);
            last_anchor = app.terrain.grid().anchor();
        }
    }

    let mut histogram = vec![0u32; config.lod.levels.max(1) as usize];
    for call in &calls {
        histogram[call.lod as usize] += 1;
    }

    info!(
        frames = args.frames,
        chunks = calls.len(),
        recenter_events = shifts,
        lod_histogram = ?histogram,
        "demo complete"
    );
}

/// Resolve the config directory: CLI override, OS config dir, or the
/// working directory as a last resort.
fn resolve_config_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    dirs::config_dir()
        .map(|base| base.join("relief"))
        .unwrap_or_else(|| PathBuf::from("."))
}
