use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use std::path::{Path, PathBuf};
use std::process;

use webpost::clipboard::SystemClipboard;
use webpost::config::{self, WebPostConfig};
use webpost::executor::{ExecutionConfig, Executor};
use webpost::formatter::{format_response, FormattedResponse, StatusClass};
use webpost::history::{format_history_entry_relative, FileStore, HistoryStore};
use webpost::models::{HeaderList, HttpMethod, RequestForm};
use webpost::notification::{ToastVariant, Toaster};
use webpost::{App, ImportOutcome};

/// webpost: send HTTP requests and keep a history of the responses
#[derive(Parser, Debug)]
#[command(name = "webpost", version, about = "Compose HTTP requests and inspect responses")]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a request and record the response
    Send {
        /// GET, POST, PUT, DELETE or PATCH
        method: HttpMethod,

        url: String,

        /// Request header as `Name: value` (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// JSON request body
        #[arg(short = 'd', long = "data")]
        body: Option<String>,
    },

    /// Browse or clear the request history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Save the history as a collection file
    Export {
        /// Target file, or a directory to place a generated file name in
        path: PathBuf,
    },

    /// Replace the history with a collection file
    Import { path: PathBuf },

    /// Copy the history to the clipboard
    Share,
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// List entries, newest first
    List,
    /// Show the stored response of entry N (1-based)
    Show { index: usize },
    /// Delete all entries
    Clear,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", "✖".red().bold(), e);
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<i32> {
    let config = load_settings(cli.config.as_deref())?;
    let mut app = build_app(&config)?;

    let code = match cli.command {
        Command::Send {
            method,
            url,
            headers,
            body,
        } => send(&mut app, method, url, &headers, body).await?,
        Command::History { action } => history(&mut app, action),
        Command::Export { path } => exit_code(app.export_collection(&path).is_some()),
        Command::Import { path } => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            exit_code(app.import_collection(&text) != ImportOutcome::Rejected)
        }
        Command::Share => exit_code(app.share_collection()),
    };

    print_toasts(&app);
    Ok(code)
}

fn exit_code(succeeded: bool) -> i32 {
    if succeeded {
        0
    } else {
        1
    }
}

fn load_settings(path: Option<&Path>) -> Result<WebPostConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match config::default_config_path() {
            Some(path) => path,
            None => return config::load_config(None).map_err(|e| anyhow!(e)),
        },
    };
    config::load_config_file(&path).map_err(|e| anyhow!(e))
}

fn build_app(config: &WebPostConfig) -> Result<App> {
    let executor = Executor::with_reqwest(&ExecutionConfig::from_global_config())?;
    let store = match &config.history_dir {
        Some(dir) => FileStore::new(dir),
        None => FileStore::in_data_dir()?,
    };
    log::debug!("Using history store at {}", store.dir().display());

    Ok(App::new(
        executor,
        HistoryStore::load(Box::new(store)),
        Box::new(SystemClipboard),
        Toaster::new(config.toast_duration()),
    ))
}

async fn send(
    app: &mut App,
    method: HttpMethod,
    url: String,
    headers: &[String],
    body: Option<String>,
) -> Result<i32> {
    let mut form = RequestForm {
        method,
        url,
        headers: HeaderList::empty(),
        body: body.unwrap_or_default(),
    };
    for header in headers {
        let (name, value) = header
            .split_once(':')
            .ok_or_else(|| anyhow!("Invalid header '{}', expected 'Name: value'", header))?;
        form.headers.push(name.trim(), value.trim());
    }

    if let Err(e) = form.validate() {
        bail!(e);
    }

    match app.submit(form.to_spec()).await {
        Ok(response) => {
            print_response(&format_response(response));
            Ok(0)
        }
        Err(_) => {
            eprintln!(
                "{} {}",
                "Error".red().bold(),
                app.error().unwrap_or_default()
            );
            Ok(1)
        }
    }
}

fn history(app: &mut App, action: HistoryAction) -> i32 {
    match action {
        HistoryAction::List => {
            if app.history().is_empty() {
                println!("No history yet");
            }
            let now = chrono::Utc::now();
            for (i, entry) in app.history().iter().enumerate() {
                println!("{:>3}  {}", i + 1, format_history_entry_relative(entry, now));
            }
            0
        }
        HistoryAction::Show { index } => {
            if index == 0 || !app.select_history(index - 1) {
                eprintln!("{} No history entry {}", "✖".red().bold(), index);
                return 1;
            }
            println!(
                "{} {}",
                app.current_method().as_str().bold(),
                app.current_url()
            );
            if let Some(response) = app.response() {
                print_response(&format_response(response));
            }
            0
        }
        HistoryAction::Clear => {
            app.clear_history();
            0
        }
    }
}

fn paint_status(formatted: &FormattedResponse) -> ColoredString {
    let line = formatted.status_line.as_str();
    match formatted.status_class {
        StatusClass::Success => line.green().bold(),
        StatusClass::Redirect => line.yellow().bold(),
        StatusClass::Error => line.red().bold(),
        StatusClass::None => line.normal(),
    }
}

fn print_response(formatted: &FormattedResponse) {
    println!("{}", paint_status(formatted));
    println!();
    println!("{}", formatted.formatted_body);
    if !formatted.headers_text.is_empty() {
        println!();
        println!("{}", "Headers".bold());
        print!("{}", formatted.headers_text.dimmed());
    }
}

fn print_toasts(app: &App) {
    for toast in app.toasts() {
        let title = match toast.variant {
            ToastVariant::Default => toast.title.cyan().bold(),
            ToastVariant::Destructive => toast.title.red().bold(),
        };
        if toast.description.is_empty() {
            eprintln!("{}", title);
        } else {
            eprintln!("{}: {}", title, toast.description);
        }
    }
}
