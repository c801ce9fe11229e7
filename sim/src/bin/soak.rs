//! Soak test for the table simulation.
//!
//! Plays bot shots back to back on an unpaced table and checks, every frame,
//! that kinetic energy never grows and every position stays finite. Between
//! shots it checks that every ball came to rest on the cloth.
//!
//! Usage: cargo run --bin soak -- [OPTIONS]
//!
//! Options:
//!   --shots N        Number of bot shots (default: 500)
//!   --seed S         RNG seed (default: config rngSeed)
//!   --max-frames F   Frame limit per shot before giving up (default: 20000)

use billiards_sim::bot::ShotBot;
use billiards_sim::config::SimConfig;
use billiards_sim::state::TableState;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

/// Allowed float noise when comparing energies between frames
const ENERGY_TOLERANCE: f64 = 1e-9;

#[derive(Default)]
struct Totals {
    frames: u64,
    cushion_hits: u64,
    collisions: u64,
    longest_shot: u64,
    energy_violations: u64,
    non_finite: u64,
    escaped: u64,
    unsettled: u64,
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config = match SimConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Cannot load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let args: Vec<String> = std::env::args().collect();
    let mut shots: u32 = 500;
    let mut seed = config.rng_seed;
    let mut max_frames: u64 = 20_000;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--shots" => {
                i += 1;
                shots = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(500);
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(seed);
            }
            "--max-frames" => {
                i += 1;
                max_frames = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(20_000);
            }
            _ => {}
        }
        i += 1;
    }

    println!("=== Billiards Soak Test ===");
    println!("Shots: {}", shots);
    println!("Seed: {}", seed);
    println!("Max frames per shot: {}", max_frames);
    println!();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut bot = ShotBot::varied(&mut rng);
    let mut state = TableState::new(&config);
    let dt = config.tick_seconds();
    let mut totals = Totals::default();
    let started = Instant::now();

    for shot_no in 1..=shots {
        let Some(shot) = bot.plan_shot(&state.bodies, state.cue_index(), &mut rng) else {
            eprintln!("Bot could not plan shot {}", shot_no);
            break;
        };
        state.shoot(&shot);

        let mut energy = state.total_energy();
        let mut frames = 0u64;
        while !state.at_rest() && frames < max_frames {
            let report = state.tick(dt);
            totals.cushion_hits += report.cushion_hits.len() as u64;
            totals.collisions += report.collisions().count() as u64;
            frames += 1;

            let next = state.total_energy();
            if next > energy + ENERGY_TOLERANCE {
                totals.energy_violations += 1;
                eprintln!(
                    "Shot {} frame {}: energy rose {:.6} -> {:.6}",
                    shot_no,
                    state.frame(),
                    energy,
                    next
                );
            }
            energy = next;

            if state.bodies.iter().any(|b| !b.pos.is_finite() || !b.vel.is_finite()) {
                totals.non_finite += 1;
            }
        }

        totals.frames += frames;
        totals.longest_shot = totals.longest_shot.max(frames);
        if !state.at_rest() {
            totals.unsettled += 1;
            eprintln!("Shot {} still moving after {} frames", shot_no, frames);
        }
        // Pair separation can leave a ball a hair over a wall; only count real escapes.
        let cushion = state.table.cushion_rect();
        totals.escaped += state
            .bodies
            .iter()
            .filter(|b| {
                b.pos.x < cushion.x
                    || b.pos.x > cushion.x + cushion.w
                    || b.pos.y < cushion.y
                    || b.pos.y > cushion.y + cushion.h
            })
            .count() as u64;

        if shot_no % 100 == 0 {
            println!(
                "[{:>6.1}s] shots={} frames={} collisions={}",
                started.elapsed().as_secs_f64(),
                shot_no,
                totals.frames,
                totals.collisions
            );
        }
    }

    let elapsed = started.elapsed();
    println!();
    println!("=== Final Results ===");
    println!("Elapsed: {:?}", elapsed);
    println!("Total frames: {}", totals.frames);
    if elapsed.as_secs_f64() > 0.0 {
        println!(
            "Frames per second: {:.0}",
            totals.frames as f64 / elapsed.as_secs_f64()
        );
    }
    println!("Longest shot: {} frames", totals.longest_shot);
    println!("Cushion hits: {}", totals.cushion_hits);
    println!("Ball collisions: {}", totals.collisions);
    println!("Energy violations: {}", totals.energy_violations);
    println!("Non-finite frames: {}", totals.non_finite);
    println!("Escaped balls: {}", totals.escaped);
    println!("Unsettled shots: {}", totals.unsettled);

    let failures = totals.energy_violations + totals.non_finite + totals.escaped + totals.unsettled;
    if failures > 0 {
        println!();
        println!("FAILED");
        std::process::exit(1);
    }
    println!();
    println!("PASSED");
}
