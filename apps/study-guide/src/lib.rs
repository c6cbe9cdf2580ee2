//! Terminal front-end for the Art History Study Guide.

pub mod command;
pub mod config;
pub mod page;
pub mod render;
pub mod timer;

use anyhow::Context;
use study_core::{parse, MotionSettings, ParticlePlanner};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::command::Command;
use crate::config::Config;
use crate::page::Page;
use crate::timer::ChannelScheduler;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    tracing::info!(source = ?config.source, "Loading study guide...");

    let content = config.source.load().await?;
    let guide = parse(&content).context("failed to parse study guide")?;

    let motion = MotionSettings::from_capabilities(config.capabilities);
    tracing::info!(
        mouse_trail = motion.mouse_trail,
        glitter_ms = motion.glitter_interval.as_millis() as u64,
        "Motion settings"
    );

    let (scheduler, mut resets) = ChannelScheduler::new();
    let mut page = Page::new(guide, motion, ParticlePlanner::new(), config.viewport, scheduler);
    page.shuffle_board(&mut rand::thread_rng());
    page.handle(Command::Show)?;
    page.handle(Command::Help)?;
    print_lines(page.take_output());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut glitter = tokio::time::interval(motion.glitter_interval);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read input")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => {
                        if let Err(e) = page.handle(command) {
                            tracing::warn!("{}", e);
                            println!("! {e}");
                        }
                    }
                    Err(e) => println!("! {e}"),
                }
            }
            Some(reset) = resets.recv() => page.apply_reset(reset),
            _ = glitter.tick() => page.glitter(),
        }
        print_lines(page.take_output());
    }

    tracing::info!("🎨 Study guide closed");
    Ok(())
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
