//! Step a search through the demo cavern and print the result.
//!
//! Run: cargo run --bin strata-demo -- --capability strong --steps-per-frame 4

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use strata_demos::{World, init_logging};
use strata_gen::MazeCarver;
use strata_paths::{AgentConfig, AgentProfile, Capability, Heuristic, Session, Status};

/// Weighted 3D pathfinding demo
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Agent capability (weak, normal, strong, excellent, extreme)
    #[arg(short, long, default_value = "normal")]
    capability: Capability,

    /// Distance heuristic (manhattan, euclidean)
    #[arg(long, default_value = "manhattan")]
    heuristic: Heuristic,

    /// Most difficult terrain the agent can enter
    #[arg(long, default_value_t = 1.0)]
    walk_capacity: f64,

    /// Search expansions per printed frame
    #[arg(long, default_value_t = 8)]
    steps_per_frame: usize,

    /// Extra passages to carve before searching
    #[arg(long, default_value_t = 0)]
    carve: usize,

    /// Seed for carving
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut world = World::cavern()?;
    if args.carve > 0 {
        let floor = world
            .palette
            .get('.')
            .cloned()
            .ok_or("palette has no floor glyph")?;
        let mut carver = MazeCarver::new(StdRng::seed_from_u64(args.seed));
        let n = carver.carve(&mut world.grid, args.carve, &floor);
        log::info!("carved {n} cells");
    }
    world.grid.set_static(true);

    let agent = AgentProfile::new(AgentConfig {
        capability: args.capability,
        walk_capacity: args.walk_capacity,
        heuristic: args.heuristic,
        ..Default::default()
    });
    log::info!(
        "{} agent from {} to {}",
        agent.capability(),
        world.start,
        world.goal
    );

    let (path, costs) = {
        let mut session = Session::new(&world.grid, &agent, world.start, world.goal)?;
        let mut frame = 0;
        while session.status() == Status::Processing {
            for _ in 0..args.steps_per_frame.max(1) {
                if session.advance().is_terminal() {
                    break;
                }
            }
            frame += 1;
            log::info!(
                "frame {frame}: {} steps, {} open, {:?}",
                session.steps(),
                session.open_len(),
                session.status()
            );
        }
        let path = session.result().to_vec();

        // A reset replays the same search.
        session.reset();
        session.run();
        if session.result() != path.as_slice() {
            log::warn!("replayed search found a different path");
        }
        (path, session.costs())
    };
    world.grid.record_costs(costs);

    print!("{}", world.render(&path));
    if path.is_empty() {
        println!("no path");
    } else {
        let total: f64 = path
            .iter()
            .filter_map(|&p| world.grid.get(p))
            .map(|c| c.cost())
            .sum();
        println!("path of {} cells, total cost {total:.1}", path.len());
    }
    Ok(())
}
