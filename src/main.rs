//! Bookfinder: search the Open Library catalog from the desktop
//!
//! Usage:
//!   bookfinder                  - Open the search window
//!   bookfinder search <words>   - Search once and print result cards
//!   bookfinder help             - Show help

mod app;
mod catalog;
mod commands;
mod config;
mod controller;
mod error;
mod ui;

use std::env;
use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

use app::BookFinder;
use catalog::OpenLibraryClient;
use commands::Command;
use config::Config;
use controller::{SearchController, LOADING_MESSAGE};
use iced::{window, Size, Task};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::card::BookCard;

fn main() -> Result<ExitCode, Box<dyn Error>> {
    // Initialize logging (RUST_LOG controls the filter)
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let args: Vec<String> = env::args().skip(1).collect();

    match Command::parse(args.as_slice()) {
        Command::Window => {
            start_window()?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Search { query } => run_search(&query),
        Command::Help => {
            println!("{}", Command::help_text());
            Ok(ExitCode::SUCCESS)
        }
        Command::Unknown { name } => {
            eprintln!("Unknown command: {}", name);
            eprintln!("Run 'bookfinder help' for usage");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn start_window() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env();
    tracing::info!("Starting Bookfinder (search endpoint {})", config.search_url);

    let app = BookFinder::new(&config)?;

    iced::application(BookFinder::title, BookFinder::update, BookFinder::view)
        .subscription(BookFinder::subscription)
        .theme(BookFinder::theme)
        .window(window::Settings {
            size: Size::new(760.0, 640.0),
            position: window::Position::Centered,
            resizable: true,
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || (app, Task::none()))?;

    Ok(())
}

/// Headless search through the same controller the window uses
fn run_search(raw: &str) -> Result<ExitCode, Box<dyn Error>> {
    let config = Config::from_env();
    let catalog = Arc::new(OpenLibraryClient::new(&config)?);
    let mut controller = SearchController::new(catalog);

    if let Some(pending) = controller.on_submit(raw) {
        eprintln!("{}", LOADING_MESSAGE);
        let rt = tokio::runtime::Runtime::new()?;
        let settled = rt.block_on(pending);
        controller.on_settled(settled);
    }

    let state = controller.state();
    if state.is_error() {
        eprintln!("{}", state.message());
        return Ok(ExitCode::FAILURE);
    }

    println!("{}", state.message());
    for (i, doc) in state.books().iter().enumerate() {
        println!("\n{}. {}", i + 1, BookCard::new(doc, &config.links));
    }
    Ok(ExitCode::SUCCESS)
}
