//! Udemy Downloader - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use udemy_downloader::{
    api::{auth::is_token_missing, CourseApi, Credential, UdemyApi},
    cli::Args,
    config::{validate_config, Config, CourseSelector},
    course::{course_id_from_url, fetch_assets, list_courses},
    download::{download_range, HttpDownloader, Session},
    error::{exit_codes, Error, Result},
    fs::ensure_dir,
    output::{
        print_banner, print_config_summary, print_error, print_info, print_run_stats,
        print_success, print_warning,
    },
    prompt::{ConsolePrompter, Prompter},
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Authentication(_) | Error::Api(_) | Error::CourseNotFound(_) => {
                    ExitCode::from(exit_codes::API_ERROR as u8)
                }
                Error::MaxAttemptsExceeded(_) | Error::Prompt(_) => {
                    ExitCode::from(exit_codes::ABORT as u8)
                }
                Error::Download(_) | Error::Stream(_) | Error::FileCreate { .. } => {
                    ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    validate_config(&config)?;

    let mut prompter = ConsolePrompter::new();

    // Access token, asked for when not supplied
    let token = match config.account.access_token.as_deref() {
        Some(token) if !is_token_missing(Some(token)) => token.to_string(),
        _ => prompter.access_token()?,
    };
    let credential = Credential::new(&token)?;

    let api = UdemyApi::with_base_url(
        credential,
        &config.options.api_base_url,
        config.request_timeout(),
    )?;

    print_info("Checking access token...");
    api.verify_credential().await?;
    print_success("Access token accepted");

    let mut session = Session::from_config(&config)?;

    // Course selection
    let selector = config.course_selector();
    let mut show_catalog = selector.lists_catalog();
    if let CourseSelector::Url(url) = &selector {
        match course_id_from_url(&api, url).await? {
            Some(id) => {
                print_info(&format!("Course id: {}", id));
                session.course_id = Some(id);
            }
            None => {
                print_warning("Could not read the course id from the page");
                show_catalog = true;
            }
        }
    }

    if show_catalog {
        list_courses(&api).await?;
    }

    print_config_summary(
        &selector.to_string(),
        session.resolution.as_deref(),
        &session.download_dir.display().to_string(),
    );

    ensure_dir(&session.download_dir)?;

    let assets = fetch_assets(&api, &mut prompter, &mut session).await?;
    if assets.is_empty() {
        print_warning("This course has no downloadable lectures");
        return Ok(());
    }

    let downloader = HttpDownloader::new(api.http_client(), config.request_timeout())
        .show_progress(config.options.show_progress)
        .keep_partial_files(config.options.keep_partial_files);

    let result = download_range(&api, &downloader, &mut prompter, &mut session, &assets).await;

    print_run_stats(&session);
    result
}
