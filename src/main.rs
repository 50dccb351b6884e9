use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use toolify::backend::MockBackend;
use toolify::directory::{CategoryFilter, DirectoryController, LoadOutcome};
use toolify::domain::{IconDisplay, Tool};
use toolify::notify::{LogNotifier, Notification, Notifier, Severity};
use toolify::session::DEMO_USER_ID;
use toolify::submission::{FormField, SubmissionFlow};

mod cli;
mod config;
mod tui;

use cli::Cli;
use cli::commands::Commands;
use config::Config;

fn setup_logging(level: &str) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolify")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("toolify.log");

    // Setup env_logger with file output; RUST_LOG wins over the config level
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn build_backend(config: &Config) -> Result<MockBackend> {
    let backend = match &config.backend.catalog_path {
        Some(path) => MockBackend::from_catalog(path)
            .with_context(|| format!("Failed to load catalogue from {}", path.display()))?,
        None => MockBackend::new(),
    };
    Ok(backend.with_delays(config.backend.load_delay(), config.backend.submit_delay()))
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let backend = build_backend(config)?;

    match &cli.command {
        None => run_tui(backend, config).await,
        Some(Commands::List { search, category, json }) => {
            handle_list_command(&backend, config, search, category, *json).await
        }
        Some(Commands::Show { id }) => handle_show_command(&backend, config, id).await,
        Some(Commands::Submit {
            name,
            description,
            link,
            category,
            icon,
        }) => {
            let mut flow = SubmissionFlow::new();
            let form = &mut flow.form;
            form.set(FormField::Name, name)?;
            form.set(FormField::Description, description)?;
            form.set(FormField::Link, link)?;
            form.set(FormField::IconUrl, icon.as_deref().unwrap_or_default())?;
            form.set(FormField::Category, category)?;
            handle_submit_command(&backend, flow).await
        }
    }
}

async fn run_tui(backend: MockBackend, config: &Config) -> Result<()> {
    info!("Launching TUI mode");

    let app = tui::App::new(tui::AppState::from_config(config));
    let events = tui::EventHandler::new(config.tui.tick_rate_ms);

    let terminal = tui::init_terminal()?;
    let mut runner = tui::TuiRunner::new(terminal, app, events, Arc::new(backend));
    let result = runner.run().await;

    // Restore the terminal before reporting any error
    tui::restore_terminal()?;
    result
}

/// Load the whole directory through the controller, as the TUI does.
async fn load_directory(backend: &MockBackend, config: &Config) -> Result<DirectoryController> {
    let mut directory = DirectoryController::new(config.directory.options());
    match directory.load(backend).await {
        LoadOutcome::Applied(count) => info!("Loaded {} tools", count),
        LoadOutcome::Failed(e) => return Err(e).context("Could not load tools"),
        LoadOutcome::Stale => {}
    }
    Ok(directory)
}

async fn handle_list_command(
    backend: &MockBackend,
    config: &Config,
    search: &str,
    category: &str,
    json: bool,
) -> Result<()> {
    let category: CategoryFilter = category.parse()?;
    let mut directory = load_directory(backend, config).await?;
    directory.set_search_term(search);
    if !directory.set_selected_category(category) && category != CategoryFilter::All {
        return Err(eyre!("Category filtering is disabled in the configuration"));
    }

    let tools = directory.visible_tools();
    if json {
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    println!("{} {}", "Featured Tools".bold(), format!("({})", tools.len()).dimmed());
    if tools.is_empty() {
        println!();
        println!("{}", "No tools found".bold());
        println!("{}", "Try adjusting your search or filter criteria".dimmed());
        return Ok(());
    }

    println!("{:<4} {:<18} {:<10} {}", "ID".bold(), "NAME".bold(), "TYPE".bold(), "LINK".bold());
    for tool in tools {
        println!(
            "{:<4} {:<18} {:<10} {}",
            tool.id,
            tool.name,
            category_colored(tool),
            tool.link.dimmed()
        );
    }
    Ok(())
}

fn category_colored(tool: &Tool) -> ColoredString {
    let label = tool.category.as_str();
    match tool.category {
        toolify::domain::Category::Software => label.cyan(),
        toolify::domain::Category::Plugin => label.yellow(),
        toolify::domain::Category::Script => label.green(),
    }
}

async fn handle_show_command(backend: &MockBackend, config: &Config, id: &str) -> Result<()> {
    let directory = load_directory(backend, config).await?;
    let tool = directory.get(id).ok_or_else(|| toolify::ToolifyError::ToolNotFound(id.to_string()))?;

    let badge = match tool.icon_display() {
        IconDisplay::Icon(url) => url,
        IconDisplay::Initial(c) => format!("[{}]", c),
    };
    println!("{} {}", badge.magenta(), tool.name.bold());
    println!("  {:<12} {}", "ID:".dimmed(), tool.id);
    println!("  {:<12} {}", "Type:".dimmed(), category_colored(tool));
    println!("  {:<12} {}", "Link:".dimmed(), tool.link);
    if let Some(owner) = &tool.owner {
        println!("  {:<12} {}", "Owner:".dimmed(), owner);
    }
    println!();
    println!("{}", tool.description);
    Ok(())
}

/// Prints notifications to the terminal and the log.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notification: Notification) {
        let title = match notification.severity {
            Severity::Default => notification.title.green().bold(),
            Severity::Destructive => notification.title.red().bold(),
        };
        println!("{} {}", title, notification.message);
        LogNotifier.notify(notification);
    }
}

async fn handle_submit_command(backend: &MockBackend, mut flow: SubmissionFlow) -> Result<()> {
    let mut notifier = ConsoleNotifier;
    let tool = flow.submit(backend, Some(DEMO_USER_ID), &mut notifier).await?;
    println!("  {:<12} {}", "ID:".dimmed(), tool.id);
    println!("  {:<12} {}", "Owner:".dimmed(), DEMO_USER_ID);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging at the configured level
    let level = config.log_level.as_deref().unwrap_or("info");
    setup_logging(level).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
