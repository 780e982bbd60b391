//! CLI binary for browsing game deals and trying the account flows.

use std::io::{self, Write as _};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use gamedeals_rs::config::AppConfig;
use gamedeals_rs::context::AppContext;
use gamedeals_rs::models::Deal;
use gamedeals_rs::viewmodel::{StoreDirectory, user_message};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use secrecy::SecretString;

/// Environment variable name for the identity provider API key.
const API_KEY_ENV: &str = "GAMEDEALS_IDENTITY_KEY";

/// Environment variable name for the account password.
const PASSWORD_ENV: &str = "GAMEDEALS_PASSWORD";

/// Game deals CLI — browse storefront deals and manage your account.
#[derive(Debug, Parser)]
#[command(name = "gamedeals", version, about)]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// List the most recent deals across storefronts.
    Deals,
    /// Search games by title and show their best offers.
    Search {
        /// Title to search for (at least three characters).
        title: String,
    },
    /// List active storefronts.
    Stores,
    /// Sign in with email and password.
    Login {
        /// Account email.
        email: String,
    },
    /// Create a new account.
    Register {
        /// Account email.
        email: String,
        /// Display name for the new account.
        #[arg(long)]
        name: Option<String>,
    },
}

/// Reads the identity API key from the environment.
fn read_api_key() -> io::Result<Option<SecretString>> {
    match std::env::var(API_KEY_ENV) {
        Ok(val) if !val.is_empty() => Ok(Some(SecretString::from(val))),
        _ => {
            let mut err = io::stderr().lock();
            writeln!(
                err,
                "{} {} environment variable is not set",
                "error:".red().bold(),
                API_KEY_ENV.bold()
            )?;
            writeln!(
                err,
                "  {} create a .env file with {}=<your_key>",
                "hint:".cyan(),
                API_KEY_ENV
            )?;
            Ok(None)
        }
    }
}

/// Reads the account password from the environment.
fn read_password() -> io::Result<Option<SecretString>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(val) if !val.is_empty() => Ok(Some(SecretString::from(val))),
        _ => {
            let mut err = io::stderr().lock();
            writeln!(
                err,
                "{} {} environment variable is not set",
                "error:".red().bold(),
                PASSWORD_ENV.bold()
            )?;
            Ok(None)
        }
    }
}

/// Runs the CLI, returning an appropriate exit code.
async fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let _dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let Some(api_key) = read_api_key()? else {
        return Ok(ExitCode::FAILURE);
    };

    let context = match AppContext::new(AppConfig::new(api_key)) {
        Ok(context) => context,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to build clients: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    dispatch(&context, cli.command).await
}

/// Dispatches to the appropriate subcommand handler.
async fn dispatch(context: &AppContext, command: Command) -> io::Result<ExitCode> {
    match command {
        Command::Deals => cmd_deals(context).await,
        Command::Search { title } => cmd_search(context, &title).await,
        Command::Stores => cmd_stores(context).await,
        Command::Login { email } => cmd_login(context, &email).await,
        Command::Register { email, name } => cmd_register(context, &email, name.as_deref()).await,
    }
}

/// Executes the `deals` subcommand: the most recent deals page.
async fn cmd_deals(context: &AppContext) -> io::Result<ExitCode> {
    let spinner = make_spinner("Fetching recent deals...");

    let directory = context.store_directory();
    directory.load().await;

    match context.get_latest_deals().execute().await {
        Ok(deals) => {
            spinner.finish_and_clear();
            print_deals_table("Recent Deals", &deals, &directory)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            spinner.finish_and_clear();
            print_failure("failed to fetch deals", &err)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `search` subcommand: title search.
async fn cmd_search(context: &AppContext, title: &str) -> io::Result<ExitCode> {
    let spinner = make_spinner("Searching games...");

    let directory = context.store_directory();
    directory.load().await;

    match context.search_game_offers().execute(title).await {
        Ok(deals) => {
            spinner.finish_and_clear();
            if deals.is_empty() {
                writeln!(
                    io::stdout().lock(),
                    "{}",
                    "No games found. Search terms need at least three characters.".dimmed()
                )?;
                return Ok(ExitCode::SUCCESS);
            }
            print_deals_table("Search Results", &deals, &directory)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            spinner.finish_and_clear();
            print_failure("search failed", &err)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `stores` subcommand: active storefronts.
async fn cmd_stores(context: &AppContext) -> io::Result<ExitCode> {
    let spinner = make_spinner("Fetching storefronts...");

    match context.get_stores().execute().await {
        Ok(stores) => {
            spinner.finish_and_clear();
            let mut out = io::stdout().lock();
            if stores.is_empty() {
                writeln!(out, "{}", "No active storefronts.".dimmed())?;
                return Ok(ExitCode::SUCCESS);
            }

            let mut table = Table::new();
            _ = table.load_preset(UTF8_FULL);
            _ = table.set_header(vec![
                Cell::new("ID").fg(Color::Cyan),
                Cell::new("Name").fg(Color::Cyan),
                Cell::new("Icon").fg(Color::Cyan),
            ]);
            for store in &stores {
                _ = table.add_row(vec![
                    Cell::new(store.store_id.as_inner()),
                    Cell::new(&store.store_name),
                    Cell::new(&store.icon_url),
                ]);
            }

            writeln!(
                out,
                "{} {}",
                "Active Storefronts".green().bold(),
                format_args!("({})", stores.len()).dimmed()
            )?;
            writeln!(out)?;
            writeln!(out, "{table}")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            spinner.finish_and_clear();
            print_failure("failed to fetch storefronts", &err)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `login` subcommand: email/password sign-in.
async fn cmd_login(context: &AppContext, email: &str) -> io::Result<ExitCode> {
    let Some(password) = read_password()? else {
        return Ok(ExitCode::FAILURE);
    };

    let spinner = make_spinner("Signing in...");
    match context.sign_in_user().execute(email, &password).await {
        Ok(user) => {
            spinner.finish_and_clear();
            let mut out = io::stdout().lock();
            writeln!(out, "{} {}", "Signed in as".green().bold(), user.uid)?;
            if !user.display_name.is_empty() {
                writeln!(out, "  {} {}", "Name:".bold(), user.display_name)?;
            }
            writeln!(
                out,
                "  {} {}",
                "Member since:".bold(),
                user.created_at.format("%Y-%m-%d")
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            spinner.finish_and_clear();
            print_failure("sign-in failed", &err)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `register` subcommand: account creation.
async fn cmd_register(
    context: &AppContext,
    email: &str,
    name: Option<&str>,
) -> io::Result<ExitCode> {
    let Some(password) = read_password()? else {
        return Ok(ExitCode::FAILURE);
    };

    let spinner = make_spinner("Creating account...");
    match context.register_user().execute(email, &password, name).await {
        Ok(user) => {
            spinner.finish_and_clear();
            writeln!(
                io::stdout().lock(),
                "{} {}",
                "Account created:".green().bold(),
                user.uid
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            spinner.finish_and_clear();
            print_failure("registration failed", &err)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

// ── Output formatting ────────────────────────────────────────────────

/// Prints a failure with its display-ready message and the underlying
/// error for context.
fn print_failure(label: &str, err: &gamedeals_rs::error::GameDealsError) -> io::Result<()> {
    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{} {label}: {}", "error:".red().bold(), user_message(err))?;
    writeln!(stderr, "  {} {err}", "cause:".dimmed())?;
    Ok(())
}

/// Creates a steady-tick spinner with the given message.
fn make_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(core::time::Duration::from_millis(80));
    spinner
}

/// Prints deals in a table, resolving store names via the directory.
fn print_deals_table(
    heading: &str,
    deals: &[Deal],
    directory: &StoreDirectory<gamedeals_rs::repository::ApiGameRepository>,
) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if deals.is_empty() {
        writeln!(out, "{}", "No deals found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Title").fg(Color::Cyan),
        Cell::new("Sale").fg(Color::Cyan),
        Cell::new("Normal").fg(Color::Cyan),
        Cell::new("Savings").fg(Color::Cyan),
        Cell::new("Store").fg(Color::Cyan),
    ]);

    for deal in deals {
        _ = table.add_row(vec![
            Cell::new(&deal.title),
            Cell::new(format!("${:.2}", deal.sale_price)).fg(Color::Green),
            Cell::new(format!("${:.2}", deal.normal_price)).fg(Color::DarkGrey),
            Cell::new(format!("{:.0}%", deal.savings)),
            Cell::new(directory.store_name(&deal.store_id)),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        heading.green().bold(),
        format_args!("({})", deals.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Entry point.
#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            // If stderr itself failed there is nothing left to do.
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}
