use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use libtof_pipeline::config::Config;
use libtof_pipeline::error::{
    ConverterError, LayoutError, LocatorError, PipelineError, ToolError,
};
use libtof_pipeline::locator::Selection;
use libtof_pipeline::process::process;
use libtof_pipeline::stage_status::{Stage, StageStatus};
use libtof_pipeline::tool::{ToolCommand, ToolOutcome, ToolRunner};
use tempfile::TempDir;

/// Stands in for the external tools: call N writes the files in `effects[N]` and exits with
/// `exit_codes[N]` (0 if not given).
#[derive(Default)]
struct ScriptedRunner {
    calls: Vec<ToolCommand>,
    effects: Vec<Vec<PathBuf>>,
    exit_codes: Vec<i32>,
}

impl ToolRunner for ScriptedRunner {
    fn run(&mut self, command: &ToolCommand) -> Result<ToolOutcome, ToolError> {
        let idx = self.calls.len();
        self.calls.push(command.clone());
        if let Some(files) = self.effects.get(idx) {
            for file in files {
                fs::write(file, b"simulated").unwrap();
            }
        }
        Ok(ToolOutcome {
            exit_code: Some(self.exit_codes.get(idx).copied().unwrap_or(0)),
            stdout: String::new(),
            stderr: String::new(),
            elapsed: Duration::ZERO,
        })
    }
}

struct Fixture {
    _tmp: TempDir,
    root: PathBuf,
    config: Config,
}

fn fixture(sources: &[&str]) -> Fixture {
    let tmp = TempDir::new().unwrap();
    let root = fs::canonicalize(tmp.path()).unwrap();
    for name in sources {
        fs::write(root.join(name), b"raw").unwrap();
    }
    let config = Config {
        root_path: root.clone(),
        converter_path: PathBuf::from("/opt/abcd/convert/ade2root"),
        ..Default::default()
    };
    Fixture {
        _tmp: tmp,
        root,
        config,
    }
}

fn run(
    config: &Config,
    selection: &Selection,
    runner: &mut ScriptedRunner,
) -> (Result<libtof_pipeline::process::PipelineReport, PipelineError>, Vec<StageStatus>) {
    let (tx, rx) = mpsc::channel();
    let result = process(config, selection, runner, &tx);
    drop(tx);
    (result, rx.iter().collect())
}

fn count_files(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

#[test]
fn latest_run_goes_through_every_stage() {
    let fx = fixture(&["run001.ade", "run002.ade"]);
    let mut runner = ScriptedRunner {
        effects: vec![
            vec![fx.root.join("run002_events.root")],
            vec![fx.root.join("bychannels/run002_by_channels.root")],
        ],
        ..Default::default()
    };

    let (result, statuses) = run(&fx.config, &Selection::Latest, &mut runner);
    let report = result.unwrap();

    assert_eq!(report.source, fx.root.join("run002.ade"));
    assert_eq!(report.converted, fx.root.join("run002_events.root"));
    assert_eq!(report.relocated, fx.root.join("raw_root/run002_events.root"));
    assert_eq!(
        report.by_channels,
        fx.root.join("bychannels/run002_by_channels.root")
    );
    assert!(report.plot.unwrap().success());
    assert!(report.relocated.is_file());
    assert!(!report.converted.exists());

    assert_eq!(runner.calls.len(), 3);
    let convert = &runner.calls[0];
    assert_eq!(convert.program, PathBuf::from("/opt/abcd/convert/ade2root"));
    assert_eq!(
        convert.args,
        vec![
            fx.root.join("run002.ade").display().to_string(),
            fx.root.display().to_string(),
        ]
    );

    let map = &runner.calls[1];
    assert_eq!(map.program, PathBuf::from("root"));
    assert_eq!(&map.args[..2], &["-l", "-q"]);
    assert_eq!(
        map.args[2],
        format!(
            "Tree_generation_vectorized.C(\"{}\", \"{}\", 23, 28, 24, 25, 26, 27)",
            fx.root.join("raw_root/run002_events.root").display(),
            fx.root.join("bychannels/run002_by_channels.root").display()
        )
    );

    let plot = &runner.calls[2];
    assert!(plot.interactive);
    assert_eq!(
        plot.args[1],
        format!(
            "ToF_analysis_pos_sensitive_vectorized.C(\"{}\")",
            fx.root.join("bychannels/run002_by_channels.root").display()
        )
    );

    assert_eq!(statuses.first(), Some(&StageStatus::new(Stage::Locate, false)));
    assert_eq!(statuses.last(), Some(&StageStatus::new(Stage::Plot, true)));
    assert_eq!(statuses.len(), 10);
}

#[test]
fn missing_conversion_stops_before_touching_directories() {
    let fx = fixture(&["run001.ade"]);
    let mut runner = ScriptedRunner::default();

    let (result, _) = run(&fx.config, &Selection::Latest, &mut runner);
    let err = result.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Relocate(LayoutError::Locator(LocatorError::NoMatchingFiles(_, _)))
    ));
    assert!(err.to_string().contains(&fx.root.display().to_string()));
    assert!(!fx.root.join("raw_root").exists());
    assert!(!fx.root.join("bychannels").exists());
    assert_eq!(runner.calls.len(), 1);
}

#[test]
fn failed_converter_is_caught_despite_stale_output() {
    let fx = fixture(&["run001.ade"]);
    fs::write(fx.root.join("stale_events.root"), b"old run").unwrap();
    let mut runner = ScriptedRunner {
        exit_codes: vec![1],
        ..Default::default()
    };

    let (result, _) = run(&fx.config, &Selection::Latest, &mut runner);

    assert!(matches!(
        result,
        Err(PipelineError::Convert(ConverterError::Tool(
            ToolError::ExitFailure(_, Some(1))
        )))
    ));
    assert!(fx.root.join("stale_events.root").exists());
    assert!(!fx.root.join("raw_root").exists());
}

#[test]
fn named_source_overrides_latest() {
    let fx = fixture(&["run001.ade", "run002.ade"]);
    let mut runner = ScriptedRunner {
        effects: vec![
            vec![fx.root.join("run001_events.root")],
            vec![fx.root.join("bychannels/run001_by_channels.root")],
        ],
        ..Default::default()
    };

    let selection = Selection::Named(String::from("run001.ade"));
    let (result, _) = run(&fx.config, &selection, &mut runner);

    assert_eq!(result.unwrap().source, fx.root.join("run001.ade"));
}

#[test]
fn missing_named_source_is_fatal() {
    let fx = fixture(&["run001.ade"]);
    let mut runner = ScriptedRunner::default();

    let selection = Selection::Named(String::from("run009.ade"));
    let (result, _) = run(&fx.config, &selection, &mut runner);

    assert!(matches!(
        result,
        Err(PipelineError::Source(LocatorError::MissingFile(p))) if p == fx.root.join("run009.ade")
    ));
    assert!(runner.calls.is_empty());
}

#[test]
fn relocation_overwrites_previous_run() {
    let fx = fixture(&["run002.ade"]);
    fs::create_dir_all(fx.root.join("raw_root")).unwrap();
    fs::write(fx.root.join("raw_root/run002_events.root"), b"previous").unwrap();
    let mut runner = ScriptedRunner {
        effects: vec![
            vec![fx.root.join("run002_events.root")],
            vec![fx.root.join("bychannels/run002_by_channels.root")],
        ],
        ..Default::default()
    };

    let (result, _) = run(&fx.config, &Selection::Latest, &mut runner);
    let report = result.unwrap();

    assert_eq!(fs::read(&report.relocated).unwrap(), b"simulated");
    assert_eq!(count_files(&fx.root.join("raw_root")), 1);
}

#[test]
fn renamed_mapper_output_is_still_plotted() {
    let fx = fixture(&["run002.ade"]);
    let mut runner = ScriptedRunner {
        effects: vec![
            vec![fx.root.join("run002_events.root")],
            vec![fx.root.join("bychannels/tof_input.root")],
        ],
        ..Default::default()
    };

    let (result, _) = run(&fx.config, &Selection::Latest, &mut runner);
    let report = result.unwrap();

    assert_eq!(report.by_channels, fx.root.join("bychannels/tof_input.root"));
    assert!(runner.calls[2].args[1].contains("tof_input.root"));
}

#[test]
fn missing_mapper_output_is_fatal() {
    let fx = fixture(&["run002.ade"]);
    let mut runner = ScriptedRunner {
        effects: vec![vec![fx.root.join("run002_events.root")]],
        ..Default::default()
    };

    let (result, _) = run(&fx.config, &Selection::Latest, &mut runner);
    let err = result.unwrap_err();

    assert!(matches!(err, PipelineError::Plot(_)));
    assert!(err
        .to_string()
        .contains(&fx.root.join("bychannels").display().to_string()));
    assert_eq!(runner.calls.len(), 2);
}

#[test]
fn plotting_can_be_disabled() {
    let mut fx = fixture(&["run002.ade"]);
    fx.config.plot = false;
    let mut runner = ScriptedRunner {
        effects: vec![
            vec![fx.root.join("run002_events.root")],
            vec![fx.root.join("bychannels/run002_by_channels.root")],
        ],
        ..Default::default()
    };

    let (result, statuses) = run(&fx.config, &Selection::Latest, &mut runner);

    assert_eq!(result.unwrap().plot, None);
    assert_eq!(runner.calls.len(), 2);
    assert_eq!(statuses.last(), Some(&StageStatus::new(Stage::Plot, true)));
}
