use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dashboard_config::Config;
use dashboard_engine::{CalendarDate, DateRange};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env,
    fs::OpenOptions,
    io::{Stdout, stdout},
    process,
};

mod app;
mod layout;
mod ui;

use app::{App, Control};

fn init_logging(config: &Config) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder
                .filter_level(log::LevelFilter::Info)
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        // stderr shares the terminal with the TUI, keep it quiet
        None => {
            builder.filter_level(log::LevelFilter::Warn);
        }
    }
    builder.init();
    Ok(())
}

fn parse_range(from: &str, to: &str) -> Option<DateRange> {
    Some(DateRange::new(
        CalendarDate::parse(from)?,
        CalendarDate::parse(to)?,
    ))
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Fix or remove {}", config_path.display());
            process::exit(1);
        }
    };

    let initial = match args.len() {
        1 => None,
        3 => match parse_range(&args[1], &args[2]) {
            Some(range) => Some(range),
            None => {
                eprintln!("Error: dates must be given as YYYY-MM-DD");
                eprintln!("Usage: {} [FROM TO]", args[0]);
                process::exit(1);
            }
        },
        _ => {
            eprintln!("Usage: {} [FROM TO]", args[0]);
            process::exit(1);
        }
    };

    init_logging(&config)?;
    log::info!("dashboard starting up, config at {}", config_path.display());

    let mut app = App::new(&config, initial, CalendarDate::today());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.on_key(key.code) == Control::Quit {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => app.on_mouse(mouse),
            _ => {}
        }
    }
}
