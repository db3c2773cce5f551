use clap::Parser;
use gymsched_core::error::CoreError;
use gymsched_core::options::RuleOptions;
use gymsched_core::projector::OccurrenceProjector;
use gymsched_core::validator::RuleValidator;
use owo_colors::{OwoColorize, Style};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod util;
mod views;

const LOG_ENV: &str = "GYMSCHED_LOG";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let config = config::Config::load(&cli.config).unwrap_or_else(|e| {
        tracing::warn!(
            path = %cli.config.display(),
            error = %e,
            "failed to load configuration, using defaults"
        );
        config::Config::default()
    });

    let options = RuleOptions::default();
    let validator = RuleValidator::new(options.clone(), config.validator_config());
    let projector = OccurrenceProjector::new(config.projector_config());

    let result = match cli.command {
        cli::Commands::New(command) => commands::new::new_rule(command),
        cli::Commands::Validate(command) => commands::validate::validate_rule(&validator, command),
        cli::Commands::Reset(command) => commands::reset::reset_rule(command),
        cli::Commands::Preview(command) => {
            commands::preview::preview_rule(&validator, &projector, config.preview.days, command)
        }
        cli::Commands::Submit(command) => {
            let gateway = commands::submit::StdoutGateway;
            commands::submit::submit_rule(&validator, &gateway, command).await
        }
        cli::Commands::Options => commands::options::list_options(&options),
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::Validation(errors) => {
                eprintln!(
                    "{} Rule is invalid ({} field{})",
                    "Error:".style(error_style),
                    errors.len(),
                    if errors.len() == 1 { "" } else { "s" }
                );
                views::table::display_validation_errors(errors);
            }
            CoreError::Gateway(s) => {
                eprintln!("{} Submission failed: {}", "Error:".style(error_style), s);
                eprintln!("Fix the problem and submit again.");
            }
            CoreError::InvalidDate(s) => {
                eprintln!("{} Invalid date: {}", "Error:".style(error_style), s.yellow());
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}
