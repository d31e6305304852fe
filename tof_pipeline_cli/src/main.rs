mod prompt;

use clap::{Arg, ArgAction, ArgMatches, Command};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use libtof_pipeline::config::Config;
use libtof_pipeline::locator::{find_latest, Selection};
use libtof_pipeline::process::process;
use libtof_pipeline::stage_status::{Stage, StageStatus};
use libtof_pipeline::tool::ProcessRunner;

const LOG_FILE: &str = "./tof_pipeline.log";

/// Send the library's detailed log to a file, truncated each run
fn init_file_log(path: &Path) -> spdlog::Result<()> {
    let file_sink = Arc::new(
        spdlog::sink::FileSink::builder()
            .path(path)
            .formatter(Box::new(spdlog::formatter::PatternFormatter::new(
                spdlog::formatter::pattern!(
                    "[{date_short} {time_short}] - [thread: {tid}] - [{^{level}}] - {payload}{eol}"
                ),
            )))
            .truncate(true)
            .build()?,
    );
    let logger = Arc::new(
        spdlog::Logger::builder()
            .flush_level_filter(spdlog::LevelFilter::All)
            .sink(file_sink)
            .build()?,
    );
    spdlog::set_default_logger(logger);
    Ok(())
}

fn build_cli() -> Command {
    Command::new("tof_pipeline_cli")
        .about("Convert, channel-map and plot a raw .ade acquisition file")
        .subcommand(Command::new("new").about("Make a template configuration yaml file"))
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .global(true)
                .help("Path to a configuration yaml file"),
        )
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .help("Directory holding the source files (overrides the config)"),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .conflicts_with("yes")
                .help("Name of the source file to use instead of the latest"),
        )
        .arg(
            Arg::new("yes")
                .short('y')
                .long("yes")
                .action(ArgAction::SetTrue)
                .help("Use the latest source file without asking"),
        )
        .arg(
            Arg::new("no-plot")
                .long("no-plot")
                .action(ArgAction::SetTrue)
                .help("Stop after channel mapping instead of opening the plots"),
        )
}

/// Work out which source file to use, asking the operator if the command line didn't say
fn choose_selection(config: &Config, matches: &ArgMatches) -> Result<Selection, String> {
    if let Some(name) = matches.get_one::<String>("file") {
        return Ok(Selection::Named(name.clone()));
    }
    if matches.get_flag("yes") {
        return Ok(Selection::Latest);
    }

    let root = config.resolve_root().map_err(|e| e.to_string())?;
    let latest = find_latest(&root, &config.source_extension)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| {
            format!(
                "No .{} files found in {}",
                config.source_extension,
                root.display()
            )
        })?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    prompt::choose_source(
        &latest,
        &config.source_extension,
        &mut stdin.lock(),
        &mut stdout,
    )
    .map_err(|e| format!("Failed to read answer: {e}"))
}

fn main() -> ExitCode {
    let matches = build_cli().get_matches();

    // Initialize feedback
    let logger = simplelog::TermLogger::new(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    let pb_manager = MultiProgress::new();
    if let Err(e) = LogWrapper::new(pb_manager.clone(), logger).try_init() {
        eprintln!("Could not create logging/progress: {e}");
        return ExitCode::FAILURE;
    }
    log::set_max_level(log::LevelFilter::Info);

    let config_path = matches.get_one::<String>("config").map(PathBuf::from);

    if let Some(("new", _)) = matches.subcommand() {
        let Some(path) = config_path else {
            log::error!("Making a template requires a path given with --config");
            return ExitCode::FAILURE;
        };
        log::info!("Making a template config at {}...", path.display());
        return match Config::default().write_config_file(&path) {
            Ok(()) => {
                log::info!("Done.");
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    if let Err(e) = init_file_log(Path::new(LOG_FILE)) {
        log::warn!("Could not open log file {LOG_FILE}, detailed log is unavailable: {e}");
    }

    // Load our config
    let mut config = match &config_path {
        Some(path) => {
            log::info!("Loading config from {}...", path.display());
            match Config::read_config_file(path) {
                Ok(c) => c,
                Err(e) => {
                    log::error!("{e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        None => Config::default(),
    };
    if let Some(root) = matches.get_one::<String>("root") {
        config.root_path = PathBuf::from(root);
    }
    if matches.get_flag("no-plot") {
        config.plot = false;
    }
    log::info!("Root Path: {}", config.root_path.display());
    log::info!("Converter: {}", config.get_converter_program().display());
    log::info!(
        "Macros: {} / {}",
        config.channel_macro.display(),
        config.plot_macro.display()
    );
    log::info!("Channel Map: {:?}", config.channel_map.as_args());

    let selection = match choose_selection(&config, &matches) {
        Ok(s) => s,
        Err(e) => {
            log::error!("{e}. Exiting.");
            return ExitCode::FAILURE;
        }
    };

    // Setup the progress bar
    let pb = pb_manager.add(ProgressBar::new(100));
    pb.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {percent:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb.set_message(Stage::Locate.to_string());

    // Spawn the task!
    let (tx, rx) = mpsc::channel::<StageStatus>();
    let handle = std::thread::spawn(move || {
        let mut runner = ProcessRunner;
        process(&config, &selection, &mut runner, &tx)
    });

    let mut code = ExitCode::SUCCESS;
    loop {
        std::thread::sleep(Duration::from_millis(250));
        while let Ok(status) = rx.try_recv() {
            pb.set_position((status.progress() * 100.0) as u64);
            pb.set_message(status.stage.to_string());
        }

        if handle.is_finished() {
            match handle.join() {
                Ok(result) => match result {
                    Ok(report) => {
                        log::info!("Source: {}", report.source.display());
                        log::info!("Converted: {}", report.relocated.display());
                        log::info!("By channels: {}", report.by_channels.display());
                        log::info!("Pipeline completed successfully!");
                    }
                    Err(e) => {
                        log::error!("{e}. Exiting.");
                        log::error!("See {LOG_FILE} for tool output.");
                        code = ExitCode::FAILURE;
                    }
                },
                Err(_) => {
                    log::error!("Failed to join pipeline task!");
                    code = ExitCode::FAILURE;
                }
            }
            break;
        }
    }

    pb.finish();
    log::info!("Done.");
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn file_and_yes_conflict() {
        let result = build_cli().try_get_matches_from(["tof_pipeline_cli", "-f", "a.ade", "-y"]);
        assert!(result.is_err());
    }

    #[test]
    fn named_file_skips_prompt() {
        let matches = build_cli()
            .try_get_matches_from(["tof_pipeline_cli", "--file", "run001.ade"])
            .unwrap();
        assert_eq!(
            choose_selection(&Config::default(), &matches).unwrap(),
            Selection::Named(String::from("run001.ade"))
        );
    }

    #[test]
    fn yes_flag_skips_prompt() {
        let matches = build_cli()
            .try_get_matches_from(["tof_pipeline_cli", "-y", "--no-plot"])
            .unwrap();
        assert_eq!(
            choose_selection(&Config::default(), &matches).unwrap(),
            Selection::Latest
        );
        assert!(matches.get_flag("no-plot"));
    }
}
