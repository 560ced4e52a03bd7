//! # Game of Life
//!
//! Runs a seed pattern either in an interactive terminal interface built on
//! `ratatui` and `crossterm`, or as plain text redrawn in place.
//!
//! ## Controls
//!
//! * Space: Play/Pause the simulation
//! * Enter: Step forward one generation (when paused)
//! * r: Reset to the seed
//! * q / Esc: Quit

use std::{
    fs::File,
    io::{self, Stdout, Write},
    path::PathBuf,
    str::FromStr,
    sync::Mutex,
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::{MoveTo, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use game_of_life::{random_soup, tui::App, Grid, Life, Pattern};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(author, version, about = "Conway's Game of Life in the terminal", long_about = None)]
struct Args {
    /// Seed pattern.
    #[arg(short, long, value_enum, default_value_t = Pattern::Pentadecathlon)]
    pattern: Pattern,
    /// Start from a random soup sized by --size instead of a pattern.
    #[arg(long, conflicts_with = "pattern")]
    random: bool,
    /// Grid dimensions for a random soup, as ROWSxCOLS.
    #[arg(short, long, value_name = "ROWSxCOLS", default_value = "40x80")]
    size: GridSize,
    /// Probability that a cell of a random soup starts alive.
    #[arg(long, default_value_t = 0.3)]
    density: f64,
    /// Milliseconds between generations.
    #[arg(
        short,
        long = "tick-ms",
        value_name = "MILLISECONDS",
        default_value_t = 1000,
        value_parser = clap::value_parser!(u64).range(1..=60_000)
    )]
    tick_ms: u64,
    /// Print each generation as text instead of opening the interactive view.
    #[arg(long)]
    plain: bool,
    /// Stop after this many generations (plain mode only).
    #[arg(short, long, requires = "plain")]
    generations: Option<u64>,
    /// Write logs to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Grid dimensions parsed from a ROWSxCOLS argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GridSize {
    rows: usize,
    cols: usize,
}

impl FromStr for GridSize {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (rows, cols) = value
            .split_once(['x', 'X'])
            .ok_or_else(|| "expected format ROWSxCOLS".to_string())?;

        let parse = |part: &str, what: &str| {
            part.trim()
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| format!("{what} must be a positive integer"))
        };

        Ok(GridSize {
            rows: parse(rows, "rows")?,
            cols: parse(cols, "columns")?,
        })
    }
}

impl Args {
    fn seed(&self) -> Result<(Grid, String)> {
        if self.random {
            let GridSize { rows, cols } = self.size;
            let grid = random_soup(rows, cols, self.density, &mut rand::thread_rng())
                .context("failed to build random soup")?;
            return Ok((grid, "random".to_string()));
        }
        Ok((self.pattern.seed(), self.pattern.name().to_string()))
    }

    fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Clears the screen, prints the generation, waits, and repeats.
fn run_plain(life: &mut Life, tick_rate: Duration, generations: Option<u64>) -> Result<()> {
    let mut stdout = io::stdout();
    loop {
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))
            .context("failed to clear screen")?;
        writeln!(stdout, "{life}").context("failed to write generation")?;
        stdout.flush()?;

        if generations.is_some_and(|limit| life.stats().generation >= limit) {
            return Ok(());
        }
        life.transition();
        thread::sleep(tick_rate);
    }
}

/// Puts the terminal back the way it was when dropped.
///
/// Created as soon as raw mode is on, so every later exit path restores it.
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(err) = execute!(self.out, LeaveAlternateScreen, DisableMouseCapture, Show) {
            error!(?err, "failed to leave alternate screen");
        }
        if let Err(err) = disable_raw_mode() {
            error!(?err, "failed to disable raw mode");
        }
    }
}

fn run_tui(app: &mut App, tick_rate: Duration) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let _guard = TerminalGuard { out: io::stdout() };

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to build terminal backend")?;

    event_loop(&mut terminal, app, tick_rate)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| app.draw(f))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char(' ') => app.toggle_running(),
                        KeyCode::Char('r') => app.reset(),
                        KeyCode::Enter if !app.running => app.step(),
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if app.running {
                app.step();
            }
            last_tick = Instant::now();
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let (seed, label) = args.seed()?;
    info!(
        pattern = %label,
        rows = seed.rows(),
        cols = seed.cols(),
        plain = args.plain,
        "starting"
    );

    if args.plain {
        let mut life = Life::new(seed);
        run_plain(&mut life, args.tick_rate(), args.generations)?;
        info!(generation = life.stats().generation, "stopped");
    } else {
        let mut app = App::new(seed, label);
        run_tui(&mut app, args.tick_rate())?;
        info!(generation = app.life.stats().generation, "stopped");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn grid_size_parsing() {
        assert_eq!(
            "12x30".parse::<GridSize>(),
            Ok(GridSize { rows: 12, cols: 30 })
        );
        assert_eq!(
            " 3 X 4 ".parse::<GridSize>(),
            Ok(GridSize { rows: 3, cols: 4 })
        );
        assert!("0x4".parse::<GridSize>().is_err());
        assert!("12".parse::<GridSize>().is_err());
        assert!("axb".parse::<GridSize>().is_err());
    }

    #[test]
    fn defaults_start_the_pentadecathlon() {
        let args = Args::parse_from(["game_of_life"]);
        assert!(!args.plain);
        assert_eq!(args.tick_rate(), Duration::from_secs(1));
        let (seed, label) = args.seed().unwrap();
        assert_eq!(label, "pentadecathlon");
        assert_eq!(seed, Pattern::Pentadecathlon.seed());
    }

    #[test]
    fn random_soup_uses_size() {
        let args = Args::parse_from(["game_of_life", "--random", "-s", "7x9"]);
        let (seed, label) = args.seed().unwrap();
        assert_eq!(label, "random");
        assert_eq!((seed.rows(), seed.cols()), (7, 9));
    }

    #[test]
    fn pattern_names_are_cli_values() {
        for pattern in Pattern::ALL {
            let args = Args::parse_from(["game_of_life", "--pattern", pattern.name()]);
            assert_eq!(args.pattern, pattern);
            assert_eq!(args.seed().unwrap().0, pattern.seed());
        }
        assert!(Args::try_parse_from(["game_of_life", "--random", "-p", "toad"]).is_err());
    }

    #[test]
    fn terminal_guard_restores_screen_on_drop() {
        let mut out = Vec::new();
        drop(TerminalGuard { out: &mut out });
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"), "left alternate screen");
        assert!(written.contains("\x1b[?25h"), "showed cursor");
    }

    #[test]
    fn generations_require_plain() {
        assert!(Args::try_parse_from(["game_of_life", "-g", "3"]).is_err());
        let args = Args::try_parse_from(["game_of_life", "--plain", "-g", "3"]).unwrap();
        assert_eq!(args.generations, Some(3));
    }
}
