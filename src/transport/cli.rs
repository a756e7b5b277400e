//! Terminal client commands

use super::render::render_turn;
use crate::backend::{self, HealthStatus, HttpAnswerClient};
use crate::chat::{ChatExchange, Session, SubmitReport};
use crate::config::{Config, QA_AGENT_NAME};
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

fn build_exchange(config: &Config) -> Result<ChatExchange> {
    let client = HttpAnswerClient::from_config(&config.frontend)
        .context("Chat endpoint is not configured correctly")?;
    Ok(ChatExchange::new(Arc::new(client), &config.frontend))
}

fn print_reply(report: &SubmitReport) {
    if let Some(reply) = report.reply() {
        println!("\n{}\n", render_turn(reply));
    }
}

/// Send one message in a fresh session and print the answer
pub async fn run_ask(config: &Config, message: &str, json: bool) -> Result<()> {
    let exchange = build_exchange(config)?;
    let session = Session::new();

    let report = exchange.submit(&session, message).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_reply(&report);
    }
    Ok(())
}

/// Run interactive chat mode
pub async fn run_chat(config: &Config) -> Result<()> {
    let exchange = build_exchange(config)?;
    let mut session = Session::new();

    println!("{}", "AstraRAG chat".bold().cyan());
    println!("Answer service: {}", config.frontend.chat_endpoint_url);
    println!("Type 'exit' or 'quit' to exit, 'clear' to start a new session\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "exit" | "quit" => {
                println!("Goodbye!");
                break;
            }
            "clear" => {
                tracing::debug!("Ending session {}", session.id());
                session = Session::new();
                println!("Started a new session.\n");
                continue;
            }
            _ => {}
        }

        match exchange.submit(&session, input).await {
            Ok(report) => print_reply(&report),
            Err(e) => eprintln!("Error: {}\n", e),
        }
    }

    Ok(())
}

/// Probe the answer service and print the result
pub async fn run_health(config: &Config) -> Result<()> {
    let endpoint = config.frontend.validate()?;
    let status = backend::probe(
        &reqwest::Client::new(),
        &endpoint,
        config.frontend.health_timeout(),
    )
    .await;

    let summary = status.summary(&endpoint);
    match &status {
        HealthStatus::Connected => println!("{} {}", "✓".green(), summary),
        HealthStatus::Degraded { .. } => println!("{} {}", "!".yellow(), summary),
        HealthStatus::Unreachable { reason } => {
            println!("{} {}", "✗".red(), summary);
            println!("  {}", reason.dimmed());
            println!(
                "Make sure to run: `{}` in a separate terminal",
                config.frontend.backend_start_command
            );
        }
    }
    Ok(())
}

/// Print the effective configuration
pub fn run_config(config: &Config) -> Result<()> {
    println!("# {}", Config::config_path()?.display());
    println!("{}", config.to_toml()?);

    let qa = config.llm.for_agent(QA_AGENT_NAME);
    println!(
        "{} {} (temperature {})",
        format!("{}:", QA_AGENT_NAME).bold(),
        qa.model,
        qa.temperature
    );
    Ok(())
}
