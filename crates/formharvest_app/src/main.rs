mod cli;
mod config;
mod console;
mod fatal;
mod prompt;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use formharvest_engine::{
    ensure_output_dir, run_and_close, ChromiumBrowser, FetchSettings, RunConfig, RunError,
    RunSummary,
};
use harvest_logging::{harvest_error, harvest_info, LogTargets};

use crate::cli::Args;
use crate::console::StdoutSink;

const LOG_FILENAME: &str = "formharvest.log";

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    let (config, runtime) = match prepare(&args) {
        Ok(prepared) => prepared,
        Err(err) => {
            harvest_error!("startup failed: {err:#}");
            print!("{}", fatal::startup_error_block(&err));
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(execute(&args, &config)) {
        Ok(summary) => {
            println!(
                "Done: {} downloaded, {} skipped",
                summary.downloaded, summary.skipped
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            harvest_error!("run failed: {err}");
            print!("{}", fatal::run_error_block(&err));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(args: &Args) {
    // The log lives next to the downloads; without the directory it is skipped.
    let log_file = args.out.join(LOG_FILENAME);
    let file = ensure_output_dir(&args.out).ok().map(|_| log_file.as_path());
    harvest_logging::initialize(LogTargets {
        terminal_level: args.terminal_level(),
        file,
    });
}

/// Resolve everything the run needs before the browser starts.
fn prepare(args: &Args) -> Result<(RunConfig, tokio::runtime::Runtime)> {
    let site = config::load_site_config(args.site.as_deref())?;
    let console = console::resolve_encoding(args.encoding.as_deref())?;
    harvest_info!("Console encoding: {}", console.name());
    let credentials = prompt::resolve_credentials(args.username.clone(), args.password.clone())?;

    let config = RunConfig {
        output_dir: args.out.clone(),
        filter: args.filter.clone(),
        selection: args.selection(),
        credentials,
        console,
        site,
        fetch: FetchSettings::default(),
    };
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    Ok((config, runtime))
}

async fn execute(args: &Args, config: &RunConfig) -> Result<RunSummary, RunError> {
    let browser = ChromiumBrowser::launch(&args.browser_settings()).await?;
    run_and_close(browser, config, &StdoutSink).await
}
