mod adapters;
mod application;
mod cli;
mod config;
mod ports;
mod review;
mod shared;

use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::FileSystemReader;
use adapters::outbound::network::GitHubDependencyGraphClient;
use application::dto::{ReviewRequest, ReviewResponse};
use application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use application::use_cases::ReviewChangesUseCase;
use clap::Parser;
use cli::Args;
use config::{
    discover_config, load_config_from_path, resolve_policy, ConfigFile, CONFIG_FILENAME,
};
use owo_colors::OwoColorize;
use ports::outbound::ChangeSource;
use shared::error::ExitCode;
use shared::Result;
use std::process;

const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version also arrive here and are not failures
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    match run(args).await {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(&args)?;
    let policy = resolve_policy(config, args.policy_overrides())?;
    let warn_only = policy.warn_only;
    let request = ReviewRequest::new(policy);

    let response = match (&args.changes, &args.repo) {
        (Some(path), _) => run_review(FileSystemReader::new(path.clone()), request).await?,
        (None, Some(repo)) => {
            let client = GitHubDependencyGraphClient::new(
                repo,
                args.base_ref.as_deref().unwrap_or_default(),
                args.head_ref.as_deref().unwrap_or_default(),
            )?
            .with_token(std::env::var(GITHUB_TOKEN_ENV).ok());
            let client = match &args.api_url {
                Some(api_url) => client.with_api_url(api_url.as_str()),
                None => client,
            };
            run_review(client, request).await?
        }
        (None, None) => anyhow::bail!("Either --changes or --repo must be specified"),
    };

    eprintln!("{}", FormatterFactory::progress_message(args.format));
    let formatter = FormatterFactory::create(args.format);
    let formatted_output = formatter.format(&response)?;

    let presenter = PresenterFactory::create(PresenterType::from_output(args.output.clone()));
    presenter.present(&formatted_output)?;

    Ok(verdict(&response, warn_only))
}

fn load_config(args: &Args) -> Result<Option<ConfigFile>> {
    match &args.config {
        Some(path) => {
            let config = load_config_from_path(path)?;
            eprintln!("📋 Using config file: {}", path.display());
            Ok(Some(config))
        }
        None => {
            let current_dir = std::env::current_dir()?;
            let config = discover_config(&current_dir)?;
            if config.is_some() {
                eprintln!(
                    "📋 Auto-discovered config file: {}",
                    current_dir.join(CONFIG_FILENAME).display()
                );
            }
            Ok(config)
        }
    }
}

async fn run_review<CS: ChangeSource>(
    change_source: CS,
    request: ReviewRequest,
) -> Result<ReviewResponse> {
    let use_case = ReviewChangesUseCase::new(change_source, StderrProgressReporter::new());
    use_case.execute(request).await
}

/// Maps the review verdict to the process exit code and prints the status line
fn verdict(response: &ReviewResponse, warn_only: bool) -> ExitCode {
    if response.passed {
        eprintln!("{}", "✅ Dependency review passed".green().bold());
        return ExitCode::Success;
    }

    if warn_only {
        eprintln!(
            "{}",
            "⚠️  Dependency review found policy violations (warn-only mode, not failing)"
                .yellow()
                .bold()
        );
        return ExitCode::Success;
    }

    eprintln!("{}", "❌ Dependency review failed".red().bold());
    ExitCode::PolicyViolation
}
