//! Bestiary viewer.
//!
//! A vim-style terminal interface for searching a monster catalogue and
//! reading full stat blocks.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for scripts:
//!
//! ```bash
//! cargo run -p bestiary -- --headless --query goblin
//! ```

mod app;
mod events;
mod headless;
mod ui;

use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use bestiary_core::{ApiConfig, MonsterApi, MonsterSearch, SearchWorker};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::App;
use events::{handle_event, EventResult};
use ui::layout::AppLayout;
use ui::render::render;

/// Search a monster catalogue and read stat blocks
#[derive(Parser, Debug)]
#[command(name = "bestiary", version, about)]
struct Cli {
    /// Base URL of the monster search service
    #[arg(long, env = "BESTIARY_API_URL")]
    api_url: Option<String>,

    /// Results requested per page
    #[arg(long, env = "BESTIARY_PAGE_SIZE")]
    page_size: Option<u32>,

    /// Run without the TUI, reading commands from stdin
    #[arg(long)]
    headless: bool,

    /// Search once, print the stat blocks and exit (headless only)
    #[arg(long, requires = "headless")]
    query: Option<String>,

    /// Directory for the TUI log file
    #[arg(long, env = "BESTIARY_LOG_DIR", default_value = "logs")]
    log_dir: PathBuf,
}

impl Cli {
    /// Build the client config. Flags (and their env fallbacks) win over the
    /// built-in defaults.
    fn api_config(&self) -> anyhow::Result<ApiConfig> {
        let mut config = match &self.api_url {
            Some(url) => ApiConfig::new(url)?,
            None => ApiConfig::from_env()?,
        };
        if let Some(page_size) = self.page_size {
            config = config.with_page_size(page_size);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present, before clap reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = cli.api_config()?;
    let page_size = config.page_size;
    let label = config.base_url().to_string();
    let api = MonsterApi::new(config)?;

    if cli.headless {
        init_stderr_logging();
        return headless::run_headless(&api, page_size, cli.query).await;
    }

    let _guard = init_file_logging(&cli.log_dir)?;
    tracing::info!(service = %label, page_size, "starting viewer");

    let service: Arc<dyn MonsterSearch> = Arc::new(api);
    let (worker, replies) = SearchWorker::new(service);
    let app = App::new(worker, replies, page_size, label);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app).await;

    // Restore terminal before reporting anything
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "viewer exited with an error");
    }
    result.context("terminal loop failed")
}

async fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> io::Result<()> {
    loop {
        // The scroll limit depends on where the stat blocks will be drawn
        let size = terminal.size()?;
        app.set_results_area(AppLayout::calculate(Rect::new(0, 0, size.width, size.height)).results_area);

        terminal.draw(|f| render(f, &app))?;

        // Apply any search replies that arrived since the last frame
        app.poll_replies();

        // Poll with a timeout so replies show up without a keypress
        if event::poll(Duration::from_millis(50))? {
            let ev = event::read()?;
            if handle_event(&mut app, ev) == EventResult::Quit {
                return Ok(());
            }
        } else {
            // Let spawned searches make progress between polls
            tokio::task::yield_now().await;
        }
    }
}

/// Log to a file so the TUI stays clean. The returned guard flushes the
/// writer when dropped.
fn init_file_logging(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, "bestiary.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Headless output goes to stdout, so logs go to stderr.
fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
