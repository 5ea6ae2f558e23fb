use clap::{CommandFactory, Parser};
use jobcheck::config::{CliConfig, Config};
use jobcheck::core::constants::output_formats;
use jobcheck::core::types::CheckResult;
use jobcheck::discovery::read_urls;
use jobcheck::reporting::csv_sink::{sheet_text_path, write_results, write_sheet_text};
use jobcheck::reporting::logging;
use jobcheck::reporting::{LogProgressSink, NoopProgressSink, ProgressSink};
use jobcheck::ui::completion::print_completions;
use jobcheck::ui::{BatchSummary, Cli, Commands, ProgressReporter, cli_to_config, display_results};
use jobcheck::validation::{Dispatcher, LivenessClassifier, RetryController};

use std::sync::Arc;
use std::time::{Duration, Instant};

/// Bar redraw cadence; the log sink keeps the configured interval
const BAR_REFRESH: Duration = Duration::from_millis(200);

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        print_completions(shell, &mut Cli::command());
        std::process::exit(0);
    }

    match run_jobcheck(&cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Everything after argument parsing; any error here is fatal
async fn run_jobcheck(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;
    let settings = OutputSettings::new(&cli_config, &config);

    logging::init_logger(settings.verbose, settings.quiet);
    logging::log_config_info(&config);

    let urls = read_urls(&cli.input).inspect_err(|e| {
        logging::log_error(&format!("Could not read input '{}'", cli.input), Some(e));
    })?;
    logging::log_input_info(&cli.input, urls.len());

    let classifier = LivenessClassifier::from_config(&config)?;
    let checker = RetryController::from_config(classifier, &config);

    let started = Instant::now();
    let results = run_dispatcher(checker, urls, &config, &settings).await;
    let elapsed = started.elapsed();
    logging::log_check_complete(&results, elapsed.as_millis());

    write_outputs(&cli.output, &results, &config)?;

    let summary = BatchSummary::from_results(&results, elapsed);
    display_results(&results, &summary, &settings.output_format, settings.quiet);

    Ok(())
}

/// Load configuration from file or standard locations and merge with CLI config
fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file)?
    } else {
        Config::load_from_standard_locations()
    };

    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

struct OutputSettings {
    quiet: bool,
    verbose: bool,
    output_format: String,
    show_progress: bool,
}

impl OutputSettings {
    fn new(cli_config: &CliConfig, config: &Config) -> Self {
        let quiet = cli_config.quiet;
        let output_format = config
            .output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
            .to_string();
        // A bar would interleave with machine-readable stdout
        let show_progress =
            !quiet && !cli_config.no_progress && output_format == output_formats::TEXT;

        Self {
            quiet,
            verbose: config.verbose.unwrap_or(false),
            output_format,
            show_progress,
        }
    }
}

async fn run_dispatcher(
    checker: RetryController<LivenessClassifier>,
    urls: Vec<String>,
    config: &Config,
    settings: &OutputSettings,
) -> Vec<CheckResult> {
    let dispatcher = Dispatcher::from_config(checker, config);
    logging::log_check_start(urls.len(), dispatcher.max_workers());

    let dispatcher = if settings.quiet {
        dispatcher.with_sink(Arc::new(NoopProgressSink))
    } else if settings.show_progress {
        let sink: Arc<dyn ProgressSink> = Arc::new(ProgressReporter::new(true));
        dispatcher
            .with_progress_interval(BAR_REFRESH.min(config.progress_interval_duration()))
            .with_sink(sink)
    } else {
        dispatcher.with_sink(Arc::new(LogProgressSink))
    };

    dispatcher.run(urls).await
}

fn write_outputs(
    output: &str,
    results: &[CheckResult],
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    write_results(output, results)?;
    log::info!("Wrote {} result(s) to {output}", results.len());

    if config.sheet_text_file() {
        let sheet_path = sheet_text_path(output);
        write_sheet_text(&sheet_path, results)?;
        log::info!("Wrote sheet text to {}", sheet_path.display());
    }

    Ok(())
}
