//! CLI smoke and demo entry point.
//!
//! # Responsibility
//! - Verify `yoon_core` linkage (`yoon_cli` without a subcommand).
//! - Drive the search flow and notification store from a terminal.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use yoon_core::{init_logging, CoreConfig, SearchOutcome, SearchScope, Session};

const CLI_USER_ID: &str = "cli_user";

/// YOON legal search and notifications from the terminal.
#[derive(Debug, Parser)]
#[command(name = "yoon_cli")]
#[command(version)]
struct Cli {
    /// Subcommand to execute. Without one, prints a linkage probe.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// CLI subcommands.
#[derive(Debug, Subcommand, PartialEq, Eq)]
enum Commands {
    /// Search legal texts by title, description or content.
    Search {
        /// Text to look for.
        query: String,
        /// Restrict results to one legal domain (`all` disables the filter).
        domain: Option<String>,
    },
    /// Search article bodies across every text.
    Articles {
        /// Text to look for.
        query: String,
    },
    /// List the session notifications.
    Notifications,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Option<Commands>) -> Result<(), String> {
    let Some(command) = command else {
        println!("yoon_core ping={}", yoon_core::ping());
        println!("yoon_core version={}", yoon_core::core_version());
        return Ok(());
    };

    let config = CoreConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(log) = &config.log {
        init_logging(log).map_err(|err| err.to_string())?;
    }
    let mut session = Session::open(&config).map_err(|err| err.to_string())?;

    match command {
        Commands::Search { query, domain } => {
            run_search(&mut session, &query, &SearchScope::Texts { domain }).await;
        }
        Commands::Articles { query } => {
            run_search(&mut session, &query, &SearchScope::Articles { text_id: None }).await;
        }
        Commands::Notifications => print_notifications(&session),
    }

    Ok(())
}

async fn run_search(session: &mut Session, query: &str, scope: &SearchScope) {
    match session
        .search_flow()
        .search(Some(CLI_USER_ID), query, scope)
        .await
    {
        Some(SearchOutcome::Texts(texts)) => {
            for text in texts {
                println!(
                    "[{}] {} ({})",
                    text.id,
                    text.title,
                    text.legal_domain.as_deref().unwrap_or("-")
                );
            }
        }
        Some(SearchOutcome::Articles(articles)) => {
            for article in articles {
                println!("[{}] {}: {}", article.text_id, article.number, article.body);
            }
        }
        None => {}
    }
    print_notifications(session);
}

fn print_notifications(session: &Session) {
    let store = &session.notifications;
    println!("-- {} notification(s), {} unread", store.len(), store.unread_count());
    for notification in store.notifications() {
        println!(
            "{} [{}] {}: {}",
            if notification.is_read() { " " } else { "*" },
            notification.category().as_str(),
            notification.title(),
            notification.message()
        );
    }
}
