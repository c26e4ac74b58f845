mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{error, info};
use rand::thread_rng;

use bug_crossing::compute::{apply_input, init_world, tick};
use bug_crossing::config::GameConfig;
use bug_crossing::entities::{Direction, World};
use bug_crossing::error::Result;

/// What a single key event means to the host.
#[derive(Debug, PartialEq)]
enum Command {
    Move(Option<Direction>),
    Quit,
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

/// Translate a key event into a command.
///
/// Moves fire on key release when the terminal reports releases, matching
/// the key-up behaviour of the game; classic terminals only send presses,
/// so there the press is used instead.  Quit keys act on press either way.
fn command_for(key: KeyEvent, release_events: bool) -> Option<Command> {
    let KeyEvent {
        code,
        kind,
        modifiers,
        ..
    } = key;

    if kind == KeyEventKind::Press {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Some(Command::Quit),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(Command::Quit)
            }
            _ => {}
        }
    }

    let trigger = if release_events {
        KeyEventKind::Release
    } else {
        KeyEventKind::Press
    };
    (kind == trigger).then(|| Command::Move(direction_for(code)))
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Input is drained at the top of every
/// frame, so input handling and ticks never interleave.
fn game_loop<W: Write>(
    out: &mut W,
    world: &mut World,
    rx: &mpsc::Receiver<Event>,
    frame: Duration,
    release_events: bool,
) -> Result<()> {
    let mut rng = thread_rng();
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(key) = ev else { continue };
            match command_for(key, release_events) {
                Some(Command::Quit) => return Ok(()),
                Some(Command::Move(direction)) => *world = apply_input(world, direction),
                None => {}
            }
        }

        let dt = frame_start.duration_since(last_frame).as_secs_f32();
        last_frame = frame_start;

        *world = tick(world, dt, &mut rng);
        display::render(out, world)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(config: &GameConfig) -> Result<()> {
    let file = File::create(&config.log_file)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Everything between entering and leaving raw mode.  Sets
/// `keyboard_enhanced` as soon as the flags are pushed so the caller can
/// pop them again, whatever happens afterwards.
fn run<W: Write>(out: &mut W, config: &GameConfig, keyboard_enhanced: &mut bool) -> Result<()> {
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events so moves can fire on key-up.
    // Ghostty / kitty-protocol terminals support this; others fall back to presses.
    *keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    info!("key release events: {}", keyboard_enhanced);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let mut world = init_world(&mut thread_rng());
    info!(
        "starting with {} enemies, speeds {:?}",
        world.enemies.len(),
        world.enemies.iter().map(|e| e.speed).collect::<Vec<_>>()
    );

    let frame = Duration::from_millis(config.frame_millis);
    let result = game_loop(out, &mut world, &rx, frame, *keyboard_enhanced);
    info!(
        "exiting after {} crossings and {} collisions",
        world.crossings, world.collisions
    );
    result
}

fn main() -> Result<()> {
    let (config, source) = GameConfig::discover()?;
    init_logging(&config)?;
    match &source {
        Some(path) => info!("loaded config from {}", path.display()),
        None => info!("no config file found, using defaults"),
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    let mut keyboard_enhanced = false;
    let result = run(&mut out, &config, &mut keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        error!("{}", e);
    }
    result
}
