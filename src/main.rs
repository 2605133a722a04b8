mod color;
mod interactive;
mod lights;
mod propagation;
mod queue;
mod render;
mod sim;
mod world;


// Re-export public API
pub use color::{MAX_BRIGHTNESS, Rgb};
pub use interactive::{InteractiveViewer, Selector, ViewerConfig, ViewerError};
pub use lights::LightRegistry;
pub use propagation::Propagator;
pub use queue::{LightQueue, SEARCH_RADIUS};
pub use render::{save_ppm, smoothed_corners};
pub use sim::Simulation;
pub use world::{TilePos, WorldGrid};

fn main() {
    env_logger::init();

    // Check for command line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--interactive" {
        run_interactive();
    } else if args.len() > 1 && args[1] == "--benchmark" {
        run_benchmark();
    } else if args.len() > 1 && args[1] == "--demo" {
        run_demo();
    } else {
        println!("Lighting Playground");
        println!("Run with --interactive for the minifb playground");
        println!("Run with --benchmark to time light recomputes");
        println!("Run with --demo to render a scene to lighting_demo.ppm");
    }
}

const SCATTER_SEED: u64 = 0x5EED;

fn run_benchmark() {
    use std::time::Instant;

    println!("=== Incremental Relight Benchmark ===\n");

    // (world size, scattered lights)
    let scenarios = [(64usize, 32usize), (128, 128), (256, 512)];
    let iterations = 10;

    for (size, count) in scenarios {
        println!("World {0}x{0}, {1} scattered lights", size, count);
        println!("-----------------------");

        let mut total_initial_ms = 0.0;
        let mut total_edit_ms = 0.0;
        let mut requeued = 0;

        for iter in 0..iterations {
            let mut sim = Simulation::new(size);
            scatter_lights(&mut sim, count, SCATTER_SEED + iter as u64);

            // Initial drain: every placed light queued at once
            let start = Instant::now();
            sim.drain();
            total_initial_ms += start.elapsed().as_secs_f64() * 1000.0;

            // One obstacle edit in the middle of the lit field
            let center = (size as i32 / 2, size as i32 / 2);
            sim.place_obstacle(center);
            requeued += sim.pending();
            let start = Instant::now();
            sim.drain();
            total_edit_ms += start.elapsed().as_secs_f64() * 1000.0;
        }

        let avg_initial_ms = total_initial_ms / iterations as f64;
        let avg_edit_ms = total_edit_ms / iterations as f64;
        let avg_requeued = requeued as f64 / iterations as f64;

        println!("  Initial drain: {:.3} ms", avg_initial_ms);
        println!(
            "  Obstacle edit: {:.3} ms ({:.1} lights requeued avg)",
            avg_edit_ms, avg_requeued
        );
        println!();
    }
}

/// Scatters random lights over the world. Tiles that already hold a light
/// fall through the placement no-op rule, so the live count can come out
/// slightly under `count`.
fn scatter_lights(sim: &mut Simulation, count: usize, seed: u64) {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(seed);
    let size = sim.grid().size() as i32;
    for _ in 0..count {
        let pos = (rng.gen_range(0..size), rng.gen_range(0..size));
        let color = Rgb::new(
            rng.gen_range(0..=MAX_BRIGHTNESS),
            rng.gen_range(0..=MAX_BRIGHTNESS),
            rng.gen_range(0..=MAX_BRIGHTNESS),
        );
        sim.place_light(pos, color);
    }
}

fn run_demo() {
    let mut sim = Simulation::new(64);

    // A wall splitting the scene, with a doorway at y = 30..32
    for y in 8..56 {
        if y == 30 || y == 31 {
            continue;
        }
        sim.place_obstacle((32, y));
    }
    sim.place_light((20, 32), Rgb::new(15, 10, 4));
    sim.place_light((44, 28), Rgb::new(2, 9, 15));
    sim.place_light((48, 48), Rgb::new(12, 15, 6));
    sim.drain();

    match save_ppm(sim.grid(), "lighting_demo.ppm", 8) {
        Ok(()) => println!("Wrote lighting_demo.ppm (64x64 tiles at 8px)"),
        Err(e) => eprintln!("Failed to write PPM: {}", e),
    }
}

fn run_interactive() {
    let config = ViewerConfig::default();

    match InteractiveViewer::new(config) {
        Ok(mut viewer) => {
            if let Err(e) = viewer.run() {
                eprintln!("Error: {}", e);
            }
        }
        Err(e) => {
            eprintln!("Failed to create viewer: {}", e);
        }
    }
}
