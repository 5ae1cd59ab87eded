use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use dashgrid::{
    Canvas, CanvasSnapshot, EnginePolicy, GestureTrace, GestureTransition, GridConfig,
    InvariantReport, replay_trace,
};
use serde::Serialize;

use crate::error::{HarnessError, Result};
use crate::logging;

#[derive(Debug, Parser)]
#[command(
    name = "dashgrid-replay",
    about = "Replay dashgrid gesture traces against a canvas snapshot",
    version
)]
pub struct Cli {
    /// Canvas snapshot JSON to start from. Defaults to an empty 12-column canvas.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Gesture trace JSON to replay.
    #[arg(long)]
    pub trace: Option<PathBuf>,

    /// Engine policy file (.toml or .json).
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// Canvas width in pixels when no trace supplies one.
    #[arg(long, default_value_t = 1200.0)]
    pub canvas_width: f64,

    /// Exit with status 2 if the final layout violates an invariant.
    #[arg(long)]
    pub check: bool,

    /// Print a full report (transitions, invariants, hash) instead of the
    /// bare snapshot.
    #[arg(long)]
    pub report: bool,

    /// Emit logs as JSON lines on stderr.
    #[arg(long)]
    pub log_json: bool,
}

#[derive(Debug, Serialize)]
struct ReplayReport {
    final_hash: u64,
    invariants: InvariantReport,
    transitions: Vec<GestureTransition>,
    snapshot: CanvasSnapshot,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_json);
    let stdout = std::io::stdout();
    run(&cli, &mut stdout.lock())
}

pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let policy = match &cli.policy {
        Some(path) => EnginePolicy::from_file(path).map_err(HarnessError::engine)?,
        None => EnginePolicy::default(),
    };

    let mut canvas = match &cli.snapshot {
        Some(path) => {
            let snapshot =
                CanvasSnapshot::from_json_str(&read(path)?).map_err(HarnessError::engine)?;
            Canvas::from_snapshot(snapshot, policy, cli.canvas_width)
        }
        None => Canvas::new(GridConfig::default(), policy, cli.canvas_width),
    }
    .map_err(HarnessError::engine)?;
    tracing::info!(widgets = canvas.list().len(), "canvas loaded");

    let transitions = match &cli.trace {
        Some(path) => {
            let trace = GestureTrace::from_json_str(&read(path)?).map_err(HarnessError::engine)?;
            replay_trace(&mut canvas, &trace)
                .map_err(HarnessError::engine)?
                .transitions
        }
        None => Vec::new(),
    };

    let invariants = canvas.check_invariants();
    if !invariants.is_clean() {
        tracing::warn!(
            overlaps = invariants.overlaps.len(),
            out_of_bounds = invariants.out_of_bounds.len(),
            "layout invariants violated"
        );
    }

    let snapshot = canvas.to_snapshot();
    let rendered = if cli.report {
        serde_json::to_string_pretty(&ReplayReport {
            final_hash: canvas.widgets().state_hash(),
            invariants: invariants.clone(),
            transitions,
            snapshot,
        })
    } else {
        serde_json::to_string_pretty(&snapshot)
    }
    .map_err(HarnessError::engine)?;
    writeln!(out, "{rendered}")?;

    if cli.check && !invariants.is_clean() {
        return Err(HarnessError::InvariantViolation {
            overlaps: invariants.overlaps.len(),
            out_of_bounds: invariants.out_of_bounds.len(),
        });
    }
    Ok(())
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| HarnessError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::{Cli, run};
    use crate::error::HarnessError;

    const TRACE: &str = r#"{
        "canvas_width_px": 1200.0,
        "events": [
            {"event": "begin_insert", "kind": "metric", "x": 150.0, "y": 50.0},
            {"event": "pointer_up", "x": 150.0, "y": 50.0}
        ]
    }"#;

    fn cli() -> Cli {
        Cli::parse_from(["dashgrid-replay"])
    }

    fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).expect("write temp file");
        path
    }

    fn output(cli: &Cli) -> serde_json::Value {
        let mut buffer = Vec::new();
        run(cli, &mut buffer).expect("run succeeds");
        serde_json::from_slice(&buffer).expect("stdout is JSON")
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from([
            "dashgrid-replay",
            "--trace",
            "t.json",
            "--policy",
            "p.toml",
            "--check",
            "--log-json",
            "--canvas-width",
            "800",
        ]);
        assert_eq!(cli.trace, Some(PathBuf::from("t.json")));
        assert_eq!(cli.policy, Some(PathBuf::from("p.toml")));
        assert!(cli.check && cli.log_json && !cli.report);
        assert!((cli.canvas_width - 800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_run_prints_empty_snapshot() {
        let value = output(&cli());
        assert_eq!(value["schema_version"], 1);
        assert_eq!(value["widgets"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn replays_trace_into_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cli = cli();
        cli.trace = Some(write_temp(&dir, "trace.json", TRACE));
        let value = output(&cli);
        assert_eq!(value["widgets"][0]["position"]["x"], 1);
        assert_eq!(value["widgets"][0]["content"]["type"], "metric");
    }

    #[test]
    fn report_includes_transitions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cli = cli();
        cli.trace = Some(write_temp(&dir, "trace.json", TRACE));
        cli.report = true;
        let value = output(&cli);
        assert_eq!(value["transitions"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["transitions"][1]["effect"]["effect"], "inserted");
        assert_eq!(value["invariants"]["overlaps"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn toml_policy_is_applied() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cli = cli();
        cli.policy = Some(write_temp(
            &dir,
            "policy.toml",
            "[gesture]\nsplit_on_widget_drop = false\n",
        ));
        cli.snapshot = Some(write_temp(
            &dir,
            "snapshot.json",
            r#"{"widgets":[{"id":1,"position":{"x":0,"y":0,"width":8,"height":2},"content":{"type":"chart"}}]}"#,
        ));
        cli.trace = Some(write_temp(&dir, "trace.json", TRACE));
        let value = output(&cli);
        assert_eq!(value["widgets"][0]["position"]["width"], 8);
        assert_eq!(value["widgets"][1]["position"]["y"], 2);
    }

    #[test]
    fn invalid_policy_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cli = cli();
        cli.policy = Some(write_temp(&dir, "policy.json", r#"{"gesture":{"min_height":0}}"#));
        let err = run(&cli, &mut Vec::new()).expect_err("invalid policy");
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("gesture.min_height"));
    }

    #[test]
    fn missing_snapshot_names_the_path() {
        let mut cli = cli();
        cli.snapshot = Some(PathBuf::from("/nonexistent/snapshot.json"));
        let err = run(&cli, &mut Vec::new()).expect_err("missing file");
        assert!(matches!(err, HarnessError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/snapshot.json"));
    }
}
