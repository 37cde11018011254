use std::fs::File;
use std::io;
use std::io::Write;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lifeview::Error;
use lifeview::ScreenSize;
use lifeview::camera::Camera;
use lifeview::config::Cli;
use lifeview::config::Config;
use lifeview::coords::BoundingBox;
use lifeview::coords::CoordinateMapper;
use lifeview::events::InputEvent;
use lifeview::frame::FrameQueue;
use lifeview::frame::MonotonicClock;
use lifeview::input::Dispatch;
use lifeview::input::InputDispatcher;
use lifeview::io::convert_event;
use lifeview::render::GridRenderer;
use lifeview::render::Palette;
use lifeview::surface::Color;
use lifeview::surface::PixelCanvas;
use lifeview::universe::Life;
use lifeview::visualizer::Visualizer;

/// Grid line color while grid lines are shown. The default palette's light grey leaves them
/// unlit on the braille camera.
const GRIDLINE_COLOR: Color = Color::rgb(60, 60, 60);

/// Rows taken by the frame rate readout, plus the blank line above it
const READOUT_ROWS: ScreenSize = 6;

type TerminalVisualizer = Visualizer<Life, Camera, FrameQueue, MonotonicClock>;

fn main() -> anyhow::Result<()> {
    let config = Cli::parse().config();

    match config.headless {
        Some(frames) => run_headless(&config, frames),
        None => run_terminal(&config),
    }
}

fn init_logging(config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match (&config.log_file, config.headless) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }

        // Headless runs own stderr
        (None, Some(_)) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }

        // Anything written to the terminal would tear the picture apart
        (None, None) => {}
    }

    Ok(())
}

fn universe(config: &Config) -> Life {
    Life::with_pattern(
        config.dims.width,
        config.dims.height,
        config.layout,
        config.pattern,
        config.seed,
    )
}

fn run_headless(config: &Config, frames: u64) -> anyhow::Result<()> {
    init_logging(config)?;

    let renderer = GridRenderer::new(config.cell_size, Palette::default());
    let (w, h) = renderer.surface_size(config.dims);

    let mut vis = Visualizer::new(
        universe(config),
        PixelCanvas::new(w, h),
        renderer,
        FrameQueue::new(),
        MonotonicClock::new(),
    );

    info!(frames, width = w, height = h, "running headless");

    vis.redraw();
    vis.play();

    for _ in 0..frames {
        let due = vis.scheduler_mut().drain();
        for handle in due {
            vis.run_frame(handle);
        }
    }

    vis.pause();

    print!("{}", vis.universe());
    println!("generation {}", vis.universe().generation());
    println!("{}", vis.fps());

    Ok(())
}

/// Restores the terminal when dropped, even if the app bails out early
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;

        let guard = TerminalGuard;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            cursor::Show,
            event::DisableMouseCapture,
            terminal::LeaveAlternateScreen,
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn run_terminal(config: &Config) -> anyhow::Result<()> {
    init_logging(config)?;

    let renderer = GridRenderer::new(config.cell_size, Palette::default());
    let (w, h) = renderer.surface_size(config.dims);
    let camera = Camera::new(w as usize, h as usize);

    let cols = ScreenSize::try_from(camera.cols()).unwrap_or(ScreenSize::MAX);
    let rows = ScreenSize::try_from(camera.rows()).unwrap_or(ScreenSize::MAX);
    let (have_cols, have_rows) = terminal::size().context("Failed to read the terminal size")?;
    let (need_cols, need_rows) = (cols, rows.saturating_add(1 + READOUT_ROWS));

    if have_cols < need_cols || have_rows < need_rows {
        return Err(Error::TerminalTooSmall {
            need_cols,
            need_rows,
            have_cols,
            have_rows,
        }
        .into());
    }

    // The button sits top left, the canvas right below it
    let button = BoundingBox::new(0.0, 0.0, 3.0, 1.0);
    let canvas = BoundingBox::new(0.0, 1.0, cols as f64, rows as f64);

    let mut dispatcher = InputDispatcher::new(
        CoordinateMapper::new(config.dims, config.cell_size),
        canvas,
        button,
        GRIDLINE_COLOR,
    );

    let mut vis = Visualizer::new(
        universe(config),
        camera,
        renderer,
        FrameQueue::new(),
        MonotonicClock::new(),
    );

    vis.redraw();
    if config.start_running {
        vis.play();
    }

    info!(dims = ?config.dims, cols, rows, "starting");

    let guard = TerminalGuard::enter().context("Failed to set up the terminal")?;
    let res = event_loop(&mut vis, &mut dispatcher, config.refresh_rate);
    drop(guard);

    res
}

fn event_loop(
    vis: &mut TerminalVisualizer,
    dispatcher: &mut InputDispatcher,
    refresh_rate: u32,
) -> anyhow::Result<()> {
    let frametime = Duration::from_secs_f64(1.0 / refresh_rate as f64);
    let mut stdout = io::stdout();

    loop {
        let t = Instant::now();

        // Wait up to a frame for input, then take everything else that is already queued
        if event::poll(frametime)? {
            let events = pending_events()?;

            if events.contains(&InputEvent::Resize) {
                execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
            }

            if dispatcher.dispatch_all(events, vis) == Dispatch::Exit {
                break;
            }
        }

        let due = vis.scheduler_mut().drain();
        for handle in due {
            vis.run_frame(handle);
        }

        present(&mut stdout, vis)?;

        thread::sleep(frametime.saturating_sub(t.elapsed()));
    }

    Ok(())
}

/// Reads every queued terminal event without blocking. Pointer motion is reported constantly
/// while mouse capture is on, and is dropped by `convert_event`.
fn pending_events() -> io::Result<Vec<InputEvent>> {
    let mut events = Vec::new();

    while event::poll(Duration::ZERO)? {
        events.extend(convert_event(event::read()?));
    }

    Ok(events)
}

fn present(stdout: &mut io::Stdout, vis: &mut TerminalVisualizer) -> io::Result<()> {
    let title = format!(
        "[{}] generation {:<8} space: play/pause  g: grid  q: quit",
        vis.glyph(),
        vis.universe().generation(),
    );
    let readout = vis.fps().to_string();

    queue!(
        stdout,
        cursor::MoveTo(0, 0),
        style::Print(title),
        terminal::Clear(terminal::ClearType::UntilNewLine),
    )?;

    let frame = vis.surface_mut().render();
    let mut row: ScreenSize = 1;
    for line in frame.lines() {
        queue!(stdout, cursor::MoveTo(0, row), style::Print(line))?;
        row += 1;
    }

    row += 1;
    for line in readout.lines() {
        queue!(
            stdout,
            cursor::MoveTo(0, row),
            style::Print(line),
            terminal::Clear(terminal::ClearType::UntilNewLine),
        )?;
        row += 1;
    }

    stdout.flush()
}
