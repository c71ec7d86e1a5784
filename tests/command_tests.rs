mod common;

use common::{sample, SAMPLE_TRACE};
use pretty_assertions::assert_eq;
use ratesim_analyzer::commands::{
    execute_analyze, execute_convert, inspect_summary, load_input, AnalyzeArgs, ConvertArgs,
};
use ratesim_analyzer::output::{load, read_series};
use ratesim_analyzer::utils::config::{ParserConfig, ReportConfig};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_analyze_end_to_end() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("run.log");
    fs::write(&input, SAMPLE_TRACE).unwrap();

    let args = AnalyzeArgs {
        input,
        report: dir.path().join("report.txt"),
        series: Some(dir.path().join("plots").join("series.json")),
        save: Some(dir.path().join("run.dat.gz")),
        smooth: 0,
        parser: ParserConfig::new(),
        report_config: ReportConfig::new()
            .with_sections(vec![(20, 29)])
            .with_percentiles(vec![0.25, 1.0]),
    };
    execute_analyze(args).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("report.txt")).unwrap(),
        "Section #1\nbandwidth overhead = 0.1\n25%ile latency = 6\n100%ile latency = 9\n\n"
    );

    let export = read_series(dir.path().join("plots").join("series.json")).unwrap();
    assert_eq!(export.rates["overhead_recv"][27], 1.0);
    assert_eq!(export.sections.len(), 1);

    assert_eq!(load(dir.path().join("run.dat.gz")).unwrap(), sample());
}

#[test]
fn test_analyze_from_artifact() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("run.log");
    let artifact = dir.path().join("run.dat");
    fs::write(&input, SAMPLE_TRACE).unwrap();

    execute_convert(ConvertArgs {
        input,
        output: artifact.clone(),
        parser: ParserConfig::new(),
    })
    .unwrap();

    let args = AnalyzeArgs {
        input: artifact,
        report: dir.path().join("report.txt"),
        report_config: ReportConfig::new()
            .with_sections(vec![(15, 25)])
            .with_percentiles(vec![1.0]),
        ..Default::default()
    };
    execute_analyze(args).unwrap();

    let report = fs::read_to_string(dir.path().join("report.txt")).unwrap();
    assert!(report.contains("100%ile latency = 9"));
}

#[test]
fn test_analyze_short_run_with_default_sections() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("run.log");
    fs::write(&input, SAMPLE_TRACE).unwrap();

    let args = AnalyzeArgs {
        input,
        report: dir.path().join("report.txt"),
        ..Default::default()
    };
    execute_analyze(args).unwrap();

    let report = fs::read_to_string(dir.path().join("report.txt")).unwrap();
    assert_eq!(report.matches("bandwidth overhead = NaN").count(), 3);
    assert!(!report.contains("%ile latency"));
}

#[test]
fn test_convert_rejects_artifact_input() {
    let dir = tempdir().unwrap();
    let result = execute_convert(ConvertArgs {
        input: dir.path().join("run.dat"),
        output: dir.path().join("copy.dat"),
        parser: ParserConfig::new(),
    });
    assert!(result.is_err());
}

#[test]
fn test_strict_mode_rejects_stray_lines() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("run.log");
    fs::write(&input, SAMPLE_TRACE.replace("[16:0]Router_9", "note: Router_9")).unwrap();

    assert!(load_input(&input, &ParserConfig::new()).is_ok());
    assert!(load_input(&input, &ParserConfig::new().with_strict(true)).is_err());
}

#[test]
fn test_inspect_summary() {
    let summary = inspect_summary(&sample());

    assert!(summary.contains("Settings: num_senders, rate_limit"));
    assert!(summary.contains("Nodes: 2 (3 sends, 3 receives)"));
    assert!(summary.contains("Transactions: 2 (2 complete, 0 pending)"));
    assert!(summary.contains("  Total simulation ticks: 30"));
}
