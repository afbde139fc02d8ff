//! Endless Runner entry point
//!
//! Headless driver: plays a run with the autopilot, or reads jump/restart
//! commands from stdin while a fixed 20 ms clock drives the simulation.

use std::io::BufRead;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;

use endless_runner::sim::{GameState, InputEvent, InputQueue, TickInput, tick};
use endless_runner::tuning::Tuning;

#[derive(Debug, Parser)]
#[command(name = "endless-runner", about = "Endless runner simulation driver")]
struct Args {
    /// RNG seed for obstacle placement
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Number of ticks to simulate in headless mode
    #[arg(long, default_value_t = 3000)]
    ticks: u64,

    /// JSON tuning file (missing fields use defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Play in real time: `j` jumps, `r` restarts, `q` quits
    #[arg(long)]
    interactive: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.config {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let mut state = GameState::with_tuning(args.seed, tuning).context("invalid tuning")?;

    if args.interactive {
        run_interactive(&mut state);
    } else {
        run_headless(&mut state, args.ticks);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    } else {
        println!("{}", state.score_label());
    }
    Ok(())
}

/// Autopilot for a fixed number of ticks, restarting after each crash
fn run_headless(state: &mut GameState, ticks: u64) {
    log::info!("Running {} ticks headless", ticks);
    let mut input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut best = 0;
    for _ in 0..ticks {
        tick(state, &input);
        input.restart = false;
        for event in state.drain_events() {
            log::debug!("{:?}", event);
        }
        if state.is_game_over() {
            best = best.max(state.score());
            input.restart = true;
        }
    }
    best = best.max(state.score());
    log::info!("Best score: {}", best);
}

/// Real-time loop; stdin is read on its own thread and handed over per tick
fn run_interactive(state: &mut GameState) {
    let (sender, queue) = InputQueue::channel();
    let (quit_tx, quit_rx) = std::sync::mpsc::channel::<()>();

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let event = match line.trim() {
                "j" | "" => InputEvent::JumpRequested,
                "r" => InputEvent::RestartRequested,
                "q" => break,
                other => {
                    log::warn!("Unknown command {:?}", other);
                    continue;
                }
            };
            if !sender.send(event) {
                break;
            }
        }
        let _ = quit_tx.send(());
    });

    let period = Duration::from_millis(state.tuning.tick_interval_ms);
    let mut next = Instant::now();
    let mut last_label = String::new();
    loop {
        if quit_rx.try_recv().is_ok() {
            break;
        }
        let input = queue.drain();
        tick(state, &input);
        for event in state.drain_events() {
            log::debug!("{:?}", event);
        }

        let label = state.score_label();
        if label != last_label {
            println!("{}", label);
            last_label = label;
        }

        next += period;
        let now = Instant::now();
        if next > now {
            std::thread::sleep(next - now);
        } else {
            next = now;
        }
    }
}
