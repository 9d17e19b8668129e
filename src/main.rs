use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Margin},
    text::Line,
    widgets::Paragraph,
};
use shadow_loader::{Loader, LoaderConfig, config};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info};

// --- CLI ----------------------------------------------------------------

/// Preview the shadow loader in the terminal.
#[derive(Debug, Parser)]
#[command(name = "shadow-loader", version)]
struct Cli {
    /// TOML config for the first loader (default: ~/.config/shadow-loader/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Rows per loader
    #[arg(long, default_value_t = 3)]
    height: u16,

    /// Write logs to this file; the terminal is taken by the UI.
    /// Without this flag no logs are written anywhere.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

// --- Config -------------------------------------------------------------

/// An explicit --config must exist; the default location is optional.
fn load_config(explicit: Option<&Path>) -> Result<(LoaderConfig, String)> {
    match explicit {
        Some(path) => Ok((LoaderConfig::load(path)?, path.display().to_string())),
        None => {
            let path = config::default_path()?;
            let source = if path.exists() {
                path.display().to_string()
            } else {
                "defaults".to_string()
            };
            Ok((LoaderConfig::load_or_default(&path)?, source))
        }
    }
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::File::create(path).with_context(|| format!("creating {:?}", path))?;
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(log_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// --- View model ---------------------------------------------------------

struct Preview {
    label: String,
    loader: Loader,
}

/// Fresh loaders every time: rebuilding is the only way back to the
/// not-yet-appeared state.
fn build_previews(config: &LoaderConfig, source: &str) -> Vec<Preview> {
    vec![
        Preview {
            label: format!("config ({source})"),
            loader: Loader::with_config(config.clone()),
        },
        Preview {
            label: "preview preset".to_string(),
            loader: Loader::with_config(LoaderConfig::preview()),
        },
    ]
}

// --- Rendering ----------------------------------------------------------

fn render(f: &mut Frame, previews: &mut [Preview], height: u16) {
    let area = f.area().inner(Margin::new(2, 1));

    let mut constraints = vec![Constraint::Length(1), Constraint::Length(1)];
    for _ in previews.iter() {
        constraints.extend([
            Constraint::Length(1),
            Constraint::Length(height),
            Constraint::Length(1),
        ]);
    }
    constraints.push(Constraint::Min(0));
    let rows = Layout::vertical(constraints).split(area);

    f.render_widget(
        Paragraph::new(Line::from("shadow-loader  q quit · r restart")),
        rows[0],
    );

    for (i, preview) in previews.iter_mut().enumerate() {
        let base = 2 + i * 3;
        f.render_widget(Paragraph::new(preview.label.as_str()), rows[base]);
        f.render_widget(&mut preview.loader, rows[base + 1]);
    }
}

// --- Terminal lifecycle -------------------------------------------------

fn setup() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn teardown(term: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    terminal::disable_raw_mode()?;
    execute!(term.backend_mut(), LeaveAlternateScreen)?;
    term.show_cursor()?;
    Ok(())
}

// --- Entry point --------------------------------------------------------

// ~30 fps is plenty for a sweep measured in seconds.
const TICK_RATE: Duration = Duration::from_millis(33);

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let (config, source) = load_config(cli.config.as_deref())?;
    info!(%source, ?config, "loaded loader config");

    let mut previews = build_previews(&config, &source);

    // Restore terminal on panic so we don't leave alternate screen active
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        hook(info);
    }));

    let mut term = setup()?;

    loop {
        term.draw(|f| render(f, &mut previews, cli.height))?;

        if event::poll(TICK_RATE)? {
            match event::read()? {
                Event::Key(k) if matches!(k.code, KeyCode::Char('q') | KeyCode::Esc) => break,
                Event::Key(k) if k.code == KeyCode::Char('r') => {
                    debug!("rebuilding loaders");
                    previews = build_previews(&config, &source);
                }
                _ => {}
            }
        }
    }

    teardown(&mut term)
}

// --- Tests --------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend, style::Color};
    use tempfile::tempdir;

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["shadow-loader"]).unwrap();
        assert_eq!(cli.height, 3);
        assert!(cli.config.is_none());
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn cli_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "shadow-loader",
            "--config",
            "/tmp/loader.toml",
            "--height",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/loader.toml")));
        assert_eq!(cli.height, 5);
    }

    #[test]
    fn log_file_help_says_logging_is_opt_in() {
        use clap::CommandFactory;

        let cmd = Cli::command();
        let arg = cmd
            .get_arguments()
            .find(|a| a.get_id() == "log_file")
            .unwrap();
        let help = arg
            .get_long_help()
            .or(arg.get_help())
            .unwrap()
            .to_string();
        assert!(help.contains("no logs"));
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempdir().unwrap();
        assert!(load_config(Some(dir.path().join("missing.toml").as_path())).is_err());
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("loader.toml");
        std::fs::write(&path, "shadow_width = 10\n").unwrap();

        let (config, source) = load_config(Some(path.as_path())).unwrap();

        assert_eq!(config.shadow_width, 10.0);
        assert!(source.ends_with("loader.toml"));
    }

    #[test]
    fn previews_start_fresh() {
        let previews = build_previews(&LoaderConfig::default(), "defaults");

        assert_eq!(previews.len(), 2);
        assert!(previews.iter().all(|p| !p.loader.has_appeared()));
        assert_eq!(previews[1].loader.config(), &LoaderConfig::preview());
    }

    #[test]
    fn render_draws_both_loaders() {
        let mut term = Terminal::new(TestBackend::new(40, 16)).unwrap();
        let mut previews = build_previews(&LoaderConfig::default(), "defaults");

        term.draw(|f| render(f, &mut previews, 3)).unwrap();

        assert!(previews.iter().all(|p| p.loader.has_appeared()));
        let buf = term.backend().buffer();
        // Header on rows 1-2, then label + 3 loader rows + gap per preview.
        assert_eq!(buf[(20, 5)].bg, Color::Rgb(0, 0, 0));
        let blue = shadow_loader::Rgba::BLUE;
        assert_eq!(buf[(20, 10)].bg, Color::Rgb(blue.r, blue.g, blue.b));
        // Labels are not painted over.
        assert_eq!(buf[(20, 8)].bg, Color::Reset);
    }
}
