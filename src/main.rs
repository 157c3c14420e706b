// src/main.rs

use std::io;

use quizdeck::{
    config::Config,
    gateway::HttpGateway,
    models::question::Label,
    presenter::terminal::TerminalPresenter,
    quiz::{navigation::Direction, runner::QuizRunner},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment (and .env if present)
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(2);
        }
    };

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "quizdeck.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    // stdout belongs to the quiz itself
    let stderr_layer = fmt::layer().with_writer(io::stderr).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    let gateway = match HttpGateway::from_config(&config) {
        Ok(gateway) => gateway,
        Err(e) => {
            tracing::error!("Failed to build API gateway: {}", e);
            std::process::exit(2);
        }
    };
    tracing::info!(questions = %gateway.routes().questions, submit = %gateway.routes().submit, "quiz API resolved");

    let mut runner = QuizRunner::new(gateway, TerminalPresenter::new(io::stdout()));
    if let Err(e) = runner.load().await {
        tracing::warn!("Initial load failed: {}", e);
        println!("[r]etry  [q]uit");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read input: {:?}", e);
                break;
            }
        };

        match line.trim() {
            "" => continue,
            "q" => break,
            "r" => {
                if let Err(e) = runner.restart().await {
                    tracing::warn!("Reload failed: {}", e);
                }
            }
            "n" => {
                runner.navigate(Direction::Next).await;
            }
            "p" => {
                runner.navigate(Direction::Back).await;
            }
            "s" => {
                if let Some(Err(e)) = runner.navigate(Direction::Submit).await {
                    tracing::warn!("Submission failed: {}", e);
                }
            }
            other => match Label::parse(&other.to_ascii_uppercase()) {
                Some(label) if runner.session().offers_option(label.index()) => {
                    if let Err(e) = runner.select_current(label.index()) {
                        tracing::warn!("Selection rejected: {}", e);
                    }
                }
                _ => println!("unrecognised input '{}'", other),
            },
        }
    }

    tracing::info!("quiz client exiting");
}
