use std::{fs::File, sync::Mutex};

use bracket_terminal::prelude::*;
use pale_harbor::{
    config::{GameConfig, SCRIPT_ENV},
    game::Game,
    input::keys::KeyLatch,
    ports::TracingAudio,
    render::{CellCanvas, HudPresenter, draw_scene},
    scripted_input::ScriptedInput,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const SCREEN_WIDTH: i32 = 80;
const SCREEN_HEIGHT: i32 = 50;

struct PaleHarborState {
    config: GameConfig,
    game: Game<HudPresenter, TracingAudio>,
    latch: KeyLatch,
    canvas: CellCanvas,
}

impl PaleHarborState {
    fn new(config: GameConfig) -> Self {
        Self {
            game: Game::new(config.clone(), HudPresenter::new(), TracingAudio),
            config,
            latch: KeyLatch::new(),
            canvas: CellCanvas::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        }
    }

    fn restart(&mut self) {
        info!(frame = self.game.frame(), "restarting");
        self.game = Game::new(self.config.clone(), HudPresenter::new(), TracingAudio);
    }
}

impl GameState for PaleHarborState {
    fn tick(&mut self, ctx: &mut BTerm) {
        let dt = (f64::from(ctx.frame_time_ms) / 1000.0).clamp(0.0, self.config.max_frame_delta);
        let input = self.latch.frame(ctx.key, ctx.shift, dt);
        if self.latch.quit_requested() {
            info!(frame = self.game.frame(), "quit requested");
            ctx.quit();
            return;
        }
        if self.latch.take_restart() && self.game.phase().is_terminal() {
            self.restart();
        }
        if let Err(err) = self.game.update(dt, &input) {
            error!(error = %err, frame = self.game.frame(), "frame failed");
        }

        self.canvas.clear();
        draw_scene(&mut self.canvas, &self.game);
        ctx.cls();
        self.canvas.flush(ctx);
        self.game.presenter().draw(ctx);
    }
}

fn init_tracing(config: &GameConfig) -> Result<(), std::io::Error> {
    let file = File::create(&config.log_file)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

/// Plays a frame script without a terminal and prints the transcript and
/// final state.
fn replay(config: GameConfig, path: &str) -> BError {
    let mut script = ScriptedInput::from_file(path)?;
    info!(path, frames = script.len(), seconds = script.duration(), "replaying script");
    let mut game = Game::headless(config);
    while let Some(frame) = script.next_frame() {
        if let Err(err) = game.update(frame.dt, &frame.input) {
            error!(error = %err, frame = game.frame(), "frame failed");
        }
    }
    for line in &game.presenter().transcript {
        println!("{line}");
    }
    for screen in &game.presenter().end_screens {
        println!("== {} ==", screen.title);
    }
    println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    Ok(())
}

fn main() -> BError {
    let config = GameConfig::from_env()?;
    init_tracing(&config)?;

    if let Ok(path) = std::env::var(SCRIPT_ENV) {
        return replay(config, &path);
    }

    match crossterm::terminal::size() {
        Ok((cols, rows)) if i32::from(cols) < SCREEN_WIDTH || i32::from(rows) < SCREEN_HEIGHT => {
            warn!(cols, rows, "terminal smaller than {SCREEN_WIDTH}x{SCREEN_HEIGHT}")
        }
        Ok(_) => {}
        Err(err) => warn!(error = %err, "could not read terminal size"),
    }

    info!(seed = config.world_seed, "starting The Pale Harbor");
    let context = BTermBuilder::simple80x50()
        .with_title("The Pale Harbor")
        .build()?;
    main_loop(context, PaleHarborState::new(config))
}
