//! Lava Leap entry point
//!
//! Plays the campaign headless: a fixed 60 Hz frame clock, a simple
//! autopilot standing in for the keyboard, and log output instead of a
//! renderer.
//!
//! Usage: `lava-leap [--settings settings.json] [level.txt ...]`

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Context, Result};

#[cfg(not(target_arch = "wasm32"))]
use lava_leap::{
    Settings,
    consts::PLAYER_SIZE,
    driver::{Campaign, Progress},
    levels::LEVEL_PLANS,
    sim::{ActorKind, Legend, State, TickInput},
};

/// Simulated frame length
#[cfg(not(target_arch = "wasm32"))]
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after five simulated minutes
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u32 = 60 * 60 * 5;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<()> {
    env_logger::init();
    log::info!("Lava Leap (headless) starting...");

    let mut settings_path = None;
    let mut level_paths = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => {
                settings_path = Some(args.next().context("--settings needs a file path")?);
            }
            _ => level_paths.push(arg),
        }
    }

    let settings = match settings_path {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };

    let plans: Vec<String> = if level_paths.is_empty() {
        LEVEL_PLANS.iter().map(|plan| plan.to_string()).collect()
    } else {
        level_paths
            .iter()
            .map(|path| {
                std::fs::read_to_string(path).with_context(|| format!("reading level {path}"))
            })
            .collect::<Result<_>>()?
    };

    let mut campaign = Campaign::from_plans(plans.as_slice(), &Legend::default(), settings)
        .context("loading levels")?;
    log::info!("Loaded {} level(s)", campaign.level_count());

    for frame in 0..MAX_FRAMES {
        let input = campaign.state().map(autopilot).unwrap_or_default();
        match campaign.frame(FRAME_DT, &input) {
            Progress::Running => {}
            Progress::Advanced { level } => {
                println!("Level {} cleared at frame {frame}", level + 1);
            }
            Progress::Restarted { level, attempt } => {
                println!("Level {} lost, attempt {attempt}", level + 1);
            }
            Progress::Complete => {
                println!("All {} levels cleared in {frame} frames", campaign.level_count());
                return Ok(());
            }
        }
    }

    log::warn!(
        "Stopped after {MAX_FRAMES} frames on level {}",
        campaign.current_level() + 1
    );
    Ok(())
}

/// Head for the nearest coin, hopping whenever possible
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &State) -> TickInput {
    let Some(player) = state.player() else {
        return TickInput::default();
    };
    let center = player.pos + PLAYER_SIZE * 0.5;

    let target = state
        .actors()
        .iter()
        .filter(|actor| actor.kind() == ActorKind::Coin)
        .map(|coin| coin.pos() + coin.size() * 0.5)
        .min_by(|a, b| {
            a.distance_squared(center)
                .partial_cmp(&b.distance_squared(center))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    match target {
        Some(coin) => {
            let dx = coin.x - center.x;
            TickInput {
                left: dx < -0.2,
                right: dx > 0.2,
                jump: true,
            }
        }
        None => TickInput::default(),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is driven by the host page
}
