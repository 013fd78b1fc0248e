//! Wayfarer
//!
//! Headless driver: builds a session on the demo content, feeds it a
//! keystroke script (or a compass-sweeping walk) and prints the log.

mod demo;
mod script;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wf_core::action::Command;
use wf_core::collab::{Collaborators, GameObserver, Severity};
use wf_core::combat::HitLocation;
use wf_core::map::Pos;
use wf_core::monster::Enemy;
use wf_core::player::Player;
use wf_core::world::{CoreOptions, Mode};
use wf_core::{GameLoopResult, GameSession};

use demo::{DemoGenerator, DemoLoot};

#[derive(Debug, Parser)]
#[command(name = "wayfarer", version, about = "Run the Wayfarer simulation headless")]
struct Args {
    /// Generator seed; overrides the config file
    #[arg(short, long)]
    seed: Option<u32>,

    /// Options file (OPTIONS=name:value,... lines)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keystroke script; without one the player sweeps the compass
    #[arg(long)]
    script: Option<String>,

    /// Stop after this many commands
    #[arg(short, long, default_value_t = 200)]
    turns: usize,

    /// Every attack lands on this body part
    #[arg(long)]
    force_hit: Option<HitLocation>,

    /// Every unblocked player hit is a critical
    #[arg(long)]
    always_crit: bool,

    /// Print the current map when done
    #[arg(long)]
    map: bool,

    /// Print the final game state as JSON
    #[arg(long)]
    dump_state: bool,

    /// More tracing output (-v info, -vv debug); RUST_LOG wins when set
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Prints narration as it happens
struct ConsoleObserver;

impl GameObserver for ConsoleObserver {
    fn on_log(&mut self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => println!("  {}", message),
            Severity::Combat => println!("* {}", message),
            Severity::Warning => println!("! {}", message),
        }
    }

    fn on_player_died(&mut self, player: &Player) {
        println!("-- died at level {} with {} gold", player.level, player.gold());
    }

    fn on_enemy_died(&mut self, enemy: &Enemy) {
        tracing::debug!(id = ?enemy.id, kind = %enemy.kind, "enemy died");
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_options(args: &Args) -> Result<CoreOptions, Box<dyn Error>> {
    let mut options = match &args.config {
        Some(path) => CoreOptions::load_from_file(path)?,
        None => CoreOptions::default(),
    };
    if args.seed.is_some() {
        options.seed = args.seed;
    }
    if args.force_hit.is_some() {
        options.force_hit = args.force_hit;
    }
    options.always_crit |= args.always_crit;
    Ok(options)
}

/// Visible part of the current map with the player and enemies drawn in
fn render(session: &GameSession) -> Vec<String> {
    let state = session.state();
    let (width, height) = state.map.dims();
    let mut rows = Vec::with_capacity(height);
    for y in 0..height as i32 {
        let mut row = String::with_capacity(width);
        for x in 0..width as i32 {
            let pos = Pos::new(x, y);
            let visible = state.visibility.is_visible(pos);
            let glyph = if pos == state.player.pos {
                '@'
            } else if let Some(enemy) = state.enemies.iter().find(|e| e.pos == pos && visible) {
                enemy.kind.to_string().chars().next().unwrap_or('?')
            } else if let Some(npc) = state.npcs.iter().find(|n| n.pos == pos && visible) {
                npc.name.chars().next().unwrap_or('?')
            } else if state.visibility.is_seen(pos) {
                state.map.get(pos).map_or(' ', |t| t.symbol())
            } else {
                ' '
            };
            row.push(glyph);
        }
        rows.push(row);
    }
    rows
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let options = load_options(&args)?;
    let commands: Box<dyn Iterator<Item = Command>> = match &args.script {
        Some(text) => Box::new(script::parse(text)?.into_iter()),
        None => Box::new(script::wander()),
    };

    let collab = Collaborators::default()
        .with_generator(DemoGenerator)
        .with_loot(DemoLoot)
        .with_observer(ConsoleObserver);
    let mut session = GameSession::new(options, collab);
    println!("Seed {}", session.state().rng.seed());

    let mut mode = session.mode();
    for command in commands.take(args.turns) {
        let result = session.tick(command);
        if session.mode() != mode {
            mode = session.mode();
            let place = session
                .state()
                .area
                .as_ref()
                .map_or_else(|| "the overworld".to_string(), |a| a.info.name.clone());
            println!("== {} ({})", place, mode);
        }
        if let GameLoopResult::PlayerDied(cause) = result {
            println!("== {}", cause);
            break;
        }
    }

    let state = session.state();
    let p = &state.player;
    println!(
        "{} | turn {} | {} | HP {}/{} | Lvl {} ({}/{} xp) | Atk {} Def {} | {} gold",
        state.time(),
        state.turns,
        if mode == Mode::World { "overworld" } else { "inside" },
        p.hp,
        p.hp_max,
        p.level,
        p.xp,
        p.xp_next,
        p.attack(),
        p.defense(),
        p.gold(),
    );

    if args.map {
        for row in render(&session) {
            println!("{}", row.trim_end());
        }
    }
    if args.dump_state {
        println!("{}", serde_json::to_string_pretty(session.state())?);
    }
    Ok(())
}
