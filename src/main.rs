mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bubble_laser::entities::Playfield;
use bubble_laser::session::GameSession;

use display::Viewport;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

#[derive(Parser)]
#[command(name = "bubble-laser")]
#[command(about = "Pop rising bubbles with a laser before the clock runs out")]
struct Args {
    /// Logical pixels per terminal column
    #[arg(long, default_value_t = 8.0)]
    cell_width: f32,

    /// Logical pixels per terminal row
    #[arg(long, default_value_t = 16.0)]
    cell_height: f32,

    /// What a bubble looks like on screen
    #[arg(long, default_value = "🫧")]
    glyph: String,

    /// Seed for bubble placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Cap on live bubbles (unbounded if omitted)
    #[arg(long)]
    max_bubbles: Option<usize>,

    /// Write logs here; RUST_LOG controls the filter
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// The terminal belongs to the game, so logs only go to a file when asked.
fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input events are stamped with the instant the reader thread saw them, so
/// tap timing is not skewed by how long a frame took.
type Stamped = (Event, Instant);

fn game_loop<W: Write>(
    out: &mut W,
    session: &mut GameSession<StdRng>,
    view: &Viewport,
    rx: &mpsc::Receiver<Stamped>,
    launched: Instant,
) -> std::io::Result<()> {
    let ms = |at: Instant| at.saturating_duration_since(launched).as_millis() as u64;
    let mut dirty = true;

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok((ev, at)) = rx.try_recv() {
            dirty = true;
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    modifiers,
                    ..
                }) => match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => {
                        session.start(ms(at));
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') => session.reset(),
                    _ => {}
                },
                Event::Mouse(MouseEvent { kind, column, .. }) => {
                    let x = view.col_to_x(column);
                    match kind {
                        MouseEventKind::Down(MouseButton::Left) => session.pointer_down(x, ms(at)),
                        MouseEventKind::Drag(MouseButton::Left) => session.pointer_move(x),
                        MouseEventKind::Up(MouseButton::Left) => {
                            session.pointer_up(x, ms(at));
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        if session.advance(ms(Instant::now())) {
            dirty = true;
        }

        if dirty {
            display::render(out, &session.snapshot(), view)?;
            dirty = false;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let (cols, rows) = terminal::size().context("failed to query terminal size")?;
    let view = Viewport {
        cell_width: args.cell_width,
        cell_height: args.cell_height,
        glyph: args.glyph,
        cols,
        rows,
    };
    let playfield = Playfield {
        width: view.playfield_width(),
        height: view.playfield_height(),
    };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(?playfield, seed = ?args.seed, cap = ?args.max_bubbles, "launching");
    let mut session = GameSession::new(playfield, args.max_bubbles, rng);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    let launched = Instant::now();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Stamped>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send((ev, Instant::now())).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &mut session, &view, &rx, launched);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(score = session.state().score, "exiting");
    result.context("game loop failed")
}
