//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::future::Future;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::adapters::csv_market_data::{read_bars, CsvMarketData};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::mock_market_data::MockMarketData;
use crate::adapters::terminal::{self, FETCH_FAILED, LOADING, NOT_FOUND};
use crate::app::dashboard::Dashboard;
use crate::app::navigator::{Navigator, Snapshot, View};
use crate::app::settings::{validate_history_days, ProviderSettings, Settings};
use crate::domain::analysis::{compute_analysis, AnalysisSummary};
use crate::domain::error::DashError;
use crate::domain::quote::normalize_symbol;
use crate::ports::market_data_port::MarketDataPort;

#[derive(Parser, Debug)]
#[command(name = "stockdash", about = "Stock list and technical analysis dashboard")]
pub struct Cli {
    /// INI configuration file; defaults apply when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Debug-level logging unless RUST_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the web dashboard
    Serve {
        #[arg(long)]
        listen: Option<SocketAddr>,
    },
    /// Print the stock list once
    List {
        #[arg(long)]
        json: bool,
    },
    /// Print quote, recent history and analysis for one symbol
    Show {
        symbol: String,
        #[arg(long)]
        days: Option<u32>,
        #[arg(long)]
        json: bool,
    },
    /// Interactive terminal dashboard that refreshes on the poll interval
    Watch { symbol: Option<String> },
    /// Analyse a CSV file of daily bars (date,open,high,low,close,volume)
    Analyze {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Analyze { file, json } => run_analyze(&file, json),
        command => load_settings(cli.config.as_deref()).and_then(|s| dispatch(command, s)),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn dispatch(command: Command, settings: Settings) -> Result<(), DashError> {
    match command {
        Command::Serve { listen } => run_serve(settings, listen),
        Command::List { json } => run_list(&settings, json),
        Command::Show { symbol, days, json } => run_show(&settings, &symbol, days, json),
        Command::Watch { symbol } => run_watch(&settings, symbol),
        Command::Analyze { file, json } => run_analyze(&file, json),
    }
}

pub fn load_settings(path: Option<&Path>) -> Result<Settings, DashError> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    tracing::info!("loading config from {}", path.display());
    let adapter = FileConfigAdapter::from_file(path)?;
    Settings::from_config(&adapter)
}

pub fn build_market_data(provider: &ProviderSettings) -> Arc<dyn MarketDataPort> {
    match provider {
        ProviderSettings::Mock(mock) => {
            tracing::info!(seed = ?mock.seed, "using mock market data");
            Arc::new(MockMarketData::new(mock.clone()))
        }
        ProviderSettings::Csv { path } => {
            tracing::info!("using CSV market data from {}", path.display());
            Arc::new(CsvMarketData::new(path.clone()))
        }
    }
}

pub fn build_dashboard(settings: &Settings) -> Dashboard {
    Dashboard::new(build_market_data(&settings.provider), settings.history_days)
}

fn block_on<F: Future>(future: F) -> Result<F::Output, DashError> {
    let runtime = tokio::runtime::Runtime::new()?;
    Ok(runtime.block_on(future))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), DashError> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{json}");
    Ok(())
}

fn run_list(settings: &Settings, json: bool) -> Result<(), DashError> {
    let dashboard = build_dashboard(settings);
    let quotes = block_on(dashboard.stock_list())??;
    if json {
        print_json(&quotes)
    } else {
        print!("{}", terminal::render_list(&quotes));
        Ok(())
    }
}

fn run_show(settings: &Settings, symbol: &str, days: Option<u32>, json: bool) -> Result<(), DashError> {
    let days = validate_history_days(days.unwrap_or(settings.history_days))?;
    let dashboard = build_dashboard(settings);
    let detail = block_on(dashboard.stock_detail_for(symbol, days))??;
    if json {
        print_json(&detail)
    } else {
        print!("{}", terminal::render_detail(&detail));
        Ok(())
    }
}

pub fn analyze_file(path: &Path) -> Result<AnalysisSummary, DashError> {
    let file = std::fs::File::open(path)?;
    let bars = read_bars(file)?;
    tracing::debug!(bars = bars.len(), "read {}", path.display());
    compute_analysis(&bars)
}

fn run_analyze(path: &Path, json: bool) -> Result<(), DashError> {
    let summary = analyze_file(path)?;
    if json {
        print_json(&summary)
    } else {
        print!("{}", terminal::render_analysis(&summary));
        Ok(())
    }
}

fn run_serve(settings: Settings, listen: Option<SocketAddr>) -> Result<(), DashError> {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{build_router, AppState};

        let addr = listen.unwrap_or(settings.listen);
        let router = build_router(AppState {
            dashboard: build_dashboard(&settings),
            poll_interval: settings.poll_interval,
        });

        block_on(async move {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!(%addr, "starting web server");
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            tracing::info!("web server stopped");
            Ok(())
        })?
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = (settings, listen);
        Err(DashError::InvalidArgument {
            reason: "web feature is required for serve".into(),
        })
    }
}

#[cfg(feature = "web")]
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown requested");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchCommand {
    Quit,
    Back,
    Help,
    Select(String),
    Nothing,
}

pub fn parse_watch_command(input: &str) -> WatchCommand {
    match input.trim().to_lowercase().as_str() {
        "" => WatchCommand::Nothing,
        "q" | "quit" | "exit" => WatchCommand::Quit,
        "b" | "back" | "list" => WatchCommand::Back,
        "?" | "h" | "help" => WatchCommand::Help,
        _ => WatchCommand::Select(normalize_symbol(input)),
    }
}

const WATCH_HELP: &str = "コマンド: <銘柄> 詳細表示 / b 一覧へ戻る / q 終了";

pub fn render_snapshot(result: Result<Snapshot, DashError>) -> String {
    match result {
        Ok(Snapshot::List(quotes)) => terminal::render_list(&quotes),
        Ok(Snapshot::Detail(detail)) => terminal::render_detail(&detail),
        Err(DashError::UnknownSymbol { symbol }) => format!("{NOT_FOUND} ({symbol})\n"),
        Err(e) => {
            tracing::error!(error = %e, "poll failed");
            format!("{FETCH_FAILED}\n")
        }
    }
}

fn run_watch(settings: &Settings, symbol: Option<String>) -> Result<(), DashError> {
    let dashboard = build_dashboard(settings);
    block_on(watch_loop(dashboard, settings.poll_interval, symbol))?
}

async fn watch_loop(
    dashboard: Dashboard,
    interval: Duration,
    symbol: Option<String>,
) -> Result<(), DashError> {
    let (mut navigator, mut updates) = Navigator::new(dashboard, interval);
    if let Some(symbol) = symbol {
        navigator.select(&symbol);
    }
    println!("{WATCH_HELP}");
    println!("{LOADING}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(update) = updates.recv() => {
                if let Some(result) = navigator.accept(update) {
                    println!("{}", render_snapshot(result));
                }
            }
            line = lines.next_line() => {
                let Some(input) = line? else { break };
                match parse_watch_command(&input) {
                    WatchCommand::Quit => break,
                    WatchCommand::Back => {
                        if navigator.view() != &View::List {
                            navigator.back();
                            println!("{LOADING}");
                        }
                    }
                    WatchCommand::Select(symbol) => {
                        navigator.select(&symbol);
                        println!("{LOADING}");
                    }
                    WatchCommand::Help => println!("{WATCH_HELP}"),
                    WatchCommand::Nothing => {}
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    tracing::debug!("watch stopped");
    Ok(())
}
