//! chatline CLI: terminal chat client for a `/chat` endpoint

use chatline_core::config::SERVER_URL_ENV;
use chatline_core::markup::{markup_lines, unescape};
use chatline_core::{ChatTransport, ChatWidget, Config, Entry, HttpTransport, MemoryPage, MessageSink};
use clap::{Parser, Subcommand};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "chatline=info";

/// Terminal chat client
#[derive(Parser)]
#[command(name = "chatline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: .chatline/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Chat server base URL, overriding the config file
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat page (default when no command specified)
    Tui,

    /// Send one message and print the conversation
    Send {
        /// Message text
        message: String,
    },

    /// Print the effective configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        None | Some(Commands::Tui) => {
            if let Err(e) = init_file_logging(&config.log_file) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
            if let Err(e) = run_tui(&config) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Send { message }) => {
            init_stderr_logging();
            if let Err(e) = cmd_send(&config, message) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config { json }) => {
            init_stderr_logging();
            if let Err(e) = cmd_config(&config, json) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}

/// Load the config file, then apply the environment and `--server` overrides.
fn resolve_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let config = Config::discover(&cwd, cli.config.as_deref())?
        .with_server_override(std::env::var(SERVER_URL_ENV).ok())
        .with_server_override(cli.server.clone());
    config.validate()?;
    Ok(config)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Log to a file so output never lands on the terminal page.
fn init_file_logging(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::options().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| e as Box<dyn std::error::Error>)?;
    Ok(())
}

fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_tui(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(chatline_tui::run_tui(config))
}

fn cmd_send(config: &Config, message: String) -> Result<(), Box<dyn std::error::Error>> {
    let transport = HttpTransport::new(config.endpoint_url()?, config.request_timeout())?;
    let mut page = MemoryPage::new(&config.page).with_input(message);
    let widget = ChatWidget::bind(&page, &config.widget)?.with_markup(config.markup);

    let rt = tokio::runtime::Runtime::new()?;
    info!(endpoint = %transport.describe(), "sending one message");
    if !rt.block_on(widget.submit_with(&mut page, &transport)) {
        return Err("nothing to send: message is empty".into());
    }

    for entry in page.transcript.entries() {
        println!("{}", format_entry(entry));
    }
    Ok(())
}

/// Plain-text form of an entry: `[sender] text`, continuation lines indented.
fn format_entry(entry: &Entry) -> String {
    let prefix = format!("[{}]", entry.sender.tag());
    let indent = " ".repeat(prefix.len() + 1);

    let mut out = prefix;
    for (i, line) in markup_lines(&entry.content).into_iter().enumerate() {
        if i == 0 {
            out.push(' ');
        } else {
            out.push('\n');
            out.push_str(&indent);
        }
        out.push_str(&unescape(line));
    }
    out
}

fn cmd_config(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("Chat endpoint: {}", config.endpoint_url()?);
    match config.request_timeout_secs {
        Some(secs) => println!("Request timeout: {secs}s"),
        None => println!("Request timeout: none"),
    }
    println!("Markup: {}", serde_json::to_string(&config.markup)?.trim_matches('"'));
    println!(
        "Page ids: form={} input={} container={}",
        config.page.form, config.page.input, config.page.container
    );
    println!(
        "Widget ids: form={} input={} container={}",
        config.widget.form, config.widget.input, config.widget.container
    );
    println!("Log file: {}", config.log_file.display());
    println!("Tick rate: {}ms", config.tick_rate_ms);
    Ok(())
}
