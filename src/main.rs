//! Flappy entry point
//!
//! Terminal shell over the headless backend: shows the title, then turns
//! stdin lines into input events (empty line = flap, `q` = quit) while the
//! scene loop runs on its own task.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use flappy::Tuning;
use flappy::platform::{Banner, Event, HeadlessBackend};
use flappy::runner;
use flappy::sim::Scene;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file overriding tuning values
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Seed for pipe shapes (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory that must contain the `.png` assets
    #[arg(long)]
    assets: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("{e:#}");
        std::process::exit(2);
    }
}

#[tokio::main]
async fn run() -> Result<()> {
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("could not load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    let mut backend = HeadlessBackend::new(args.assets.clone());
    backend
        .draw_title("Flappy Bird", tuning.banner_point_size)
        .context("could not draw title")?;
    tokio::time::sleep(tuning.title_hold()).await;

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut scene = Scene::new(&mut backend, &tuning, seed).context("could not create scene")?;

    let (events, mut inbox) = mpsc::unbounded_channel();
    let mut game = tokio::spawn(async move {
        let result = runner::run(&mut scene, &mut inbox, &mut backend).await;
        log::info!("{} frames presented", backend.frames());
        scene.destroy(&mut backend);
        result
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;
    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                let event = match line.context("could not read input")? {
                    Some(line) => parse_input(&line),
                    None => {
                        input_open = false;
                        Event::Quit
                    }
                };
                // A closed channel means the loop already ended; its result follows
                let _ = events.send(event);
            }
            result = &mut game => {
                return result.context("game loop panicked")?.context("game loop failed");
            }
        }
    }
}

/// Map one line of terminal input to a platform event
fn parse_input(line: &str) -> Event {
    match line.trim() {
        "" => Event::Press,
        "q" | "quit" | "exit" => Event::Quit,
        other => other.chars().next().map_or(Event::Other, Event::Key),
    }
}
