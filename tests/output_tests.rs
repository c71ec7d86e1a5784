mod common;

use common::{sample, SAMPLE_TRACE};
use pretty_assertions::assert_eq;
use ratesim_analyzer::output::{
    build_report, build_series, load, read_series, render_report, save, validate_path,
    write_report, write_series,
};
use ratesim_analyzer::parser::{parse_trace_str, Number};
use ratesim_analyzer::utils::config::{
    ParserConfig, ReportConfig, ARTIFACT_FORMAT, SERIES_VERSION,
};
use ratesim_analyzer::utils::error::{ArtifactError, OutputError};
use std::fs;
use tempfile::tempdir;

fn section_config() -> ReportConfig {
    ReportConfig::new()
        .with_sections(vec![(20, 29)])
        .with_percentiles(vec![0.25, 1.0])
}

#[test]
fn test_artifact_roundtrip_plain_and_gzip() {
    let dir = tempdir().unwrap();
    let raw = sample();

    for name in ["run.dat", "nested/run.dat.gz"] {
        let path = dir.path().join(name);
        save(&raw, &path).unwrap();
        assert!(path.exists());
        assert_eq!(load(&path).unwrap(), raw);
    }
}

#[test]
fn test_artifact_keeps_non_finite_stats() {
    let dir = tempdir().unwrap();
    let trace = SAMPLE_TRACE.to_string() + "Peak ratio: inf\nAverage latency: nan\n";
    let raw = parse_trace_str(&trace, &ParserConfig::new()).unwrap();
    assert_eq!(raw.stats()["Peak ratio"], Number::Float(f64::INFINITY));

    let path = dir.path().join("run.dat");
    save(&raw, &path).unwrap();
    let loaded = load(&path).unwrap();

    assert_eq!(loaded.stats()["Peak ratio"], Number::Float(f64::INFINITY));
    assert!(loaded.stats()["Average latency"].as_f64().is_nan());
    assert_eq!(loaded.transactions(), raw.transactions());
    assert_eq!(loaded.actions(), raw.actions());
}

#[test]
fn test_artifact_version_mismatch() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("old.dat");
    fs::write(
        &path,
        format!(r#"{{"format":"{}","version":99,"data":{{}}}}"#, ARTIFACT_FORMAT),
    )
    .unwrap();

    let err = load(&path).unwrap_err();
    assert!(matches!(err, ArtifactError::Version { found: 99, expected: 1 }));
}

#[test]
fn test_artifact_rejects_trace_extension() {
    let dir = tempdir().unwrap();
    let err = save(&sample(), dir.path().join("run.log")).unwrap_err();
    assert!(matches!(err, ArtifactError::InvalidPath(_)));
}

#[test]
fn test_section_report() {
    let sections = build_report(&sample(), &section_config()).unwrap();

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].bounds, (20, 29));
    assert_eq!(sections[0].samples, 2);
    assert_eq!(sections[0].percentiles, vec![(0.25, 6), (1.0, 9)]);
    assert_eq!(
        render_report(&sections),
        "Section #1\nbandwidth overhead = 0.1\n25%ile latency = 6\n100%ile latency = 9\n\n"
    );
}

#[test]
fn test_section_without_completions() {
    let config = ReportConfig::new()
        .with_sections(vec![(0, 5), (20, 29)])
        .with_percentiles(vec![1.0]);
    let sections = build_report(&sample(), &config).unwrap();

    assert_eq!(sections[0].samples, 0);
    assert!(sections[0].percentiles.is_empty());
    assert_eq!(
        render_report(&sections),
        "Section #1\nbandwidth overhead = 0.0\n\n\
         Section #2\nbandwidth overhead = 0.1\n100%ile latency = 9\n\n"
    );
}

#[test]
fn test_write_report_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out").join("report.txt");
    let sections = build_report(&sample(), &section_config()).unwrap();

    write_report(&sections, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Section #1\n"));
    assert!(text.contains("100%ile latency = 9"));
}

#[test]
fn test_series_export_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("series.json");

    let export = build_series(&sample(), &section_config(), 1).unwrap();
    assert_eq!(export.version, SERIES_VERSION);
    assert_eq!(export.total_ticks, 30);
    assert_eq!(export.rate_limit, Some(2.0));
    assert_eq!(export.rates.len(), 4);
    assert!(export.rates.values().all(|series| series.len() == 31));
    assert_eq!(export.total_latency.latencies, vec![6, 9]);
    assert_eq!(export.on_wire_latency.latencies, vec![4, 8]);

    write_series(&export, &path).unwrap();
    assert_eq!(read_series(&path).unwrap(), export);
}

#[test]
fn test_validate_path() {
    let dir = tempdir().unwrap();

    assert!(validate_path(&dir.path().join("report.txt")).is_ok());
    assert!(matches!(
        validate_path(dir.path()),
        Err(OutputError::InvalidPath(_))
    ));
    assert!(matches!(
        validate_path(std::path::Path::new("")),
        Err(OutputError::InvalidPath(_))
    ));
}
