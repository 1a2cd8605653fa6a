//! End-to-end integration tests: CSV -> align -> sample -> gnuplot script.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use barowarp_dtw::{DtwError, Reference, compute_warp, sample_correspondences};
use barowarp_io::{IoError, ScriptRenderer, SeriesReader, Template};

/// Path to the test fixture directory.
fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_template() -> Template {
    let file = File::open(fixture_path("template.gp")).expect("template fixture");
    Template::parse(BufReader::new(file)).expect("template should parse")
}

#[test]
fn delayed_curve_renders_script() {
    // 1. Read both curves
    let a = SeriesReader::new(&fixture_path("stairs_a.csv"))
        .read()
        .expect("fixture should parse");
    let b = SeriesReader::new(&fixture_path("stairs_b.csv"))
        .read()
        .expect("fixture should parse");
    assert_eq!(a.len(), 12);
    assert_eq!(b.len(), 13);

    // 2. Align: the second logger is the same staircase delayed by two samples
    let alignment = compute_warp(a.samples(), b.samples(), 3).unwrap();
    assert_eq!(alignment.cost.value(), 0.0);
    assert_eq!(alignment.half_width, 3);

    // 3. Sample every third sample of the earlier-ending curve
    let set =
        sample_correspondences(&alignment.path, a.samples(), b.samples(), 3, 5.0).unwrap();
    assert_eq!(set.reference(), Reference::First);
    let indices: Vec<usize> = set.iter().map(|c| c.reference_index).collect();
    assert_eq!(indices, vec![0, 3, 6, 9]);
    for c in &set {
        assert_eq!(c.first.value, a[c.reference_index].value + 5.0);
        // Zero-cost path: every matched pair has equal readings.
        assert_eq!(c.second.value, c.first.value - 5.0);
    }

    // 4. Render
    let template = load_template();
    let script = ScriptRenderer::new(&template, "stairs", "stairs_a.csv", "stairs_b.csv")
        .render(&set, 5.0)
        .unwrap();

    let lines: Vec<&str> = script.lines().collect();
    assert_eq!(lines[0], "# barowarp template");
    assert_eq!(lines[3], "set ylabel \"pressure (hPa)\"");
    assert_eq!(lines[4], "heightCurveOffset = 5.0");
    assert_eq!(lines[5], "");
    assert_eq!(
        lines[6],
        "set arrow from 0.000000,1005.000000 to 0.500000,1000.000000 nohead lc rgb \"gray\""
    );
    let arrows = lines.iter().filter(|l| l.starts_with("set arrow")).count();
    assert_eq!(arrows, 4);
    assert_eq!(lines[10], "set output \"stairs.pdf\"");
    assert!(lines[11].starts_with("plot \"stairs_a.csv\""));
    assert!(lines[11].contains("\"stairs_b.csv\" using"));
    assert_eq!(lines.len(), 12);
    assert!(!script.contains("#DTW"));
}

#[test]
fn rebased_curves_keep_alignment() {
    let a = SeriesReader::new(&fixture_path("stairs_a.csv")).read().unwrap();
    let b = SeriesReader::new(&fixture_path("stairs_b.csv")).read().unwrap();
    let rebased = b.rebased().unwrap();
    assert_eq!(rebased.first().timestamp, 0.0);
    assert_eq!(rebased.duration_ms(), b.duration_ms());

    // Timestamps never enter the cost, so the path is unchanged.
    let unshifted = compute_warp(a.samples(), b.samples(), 3).unwrap();
    let shifted = compute_warp(a.samples(), rebased.samples(), 3).unwrap();
    assert_eq!(unshifted.path, shifted.path);

    let before =
        sample_correspondences(&unshifted.path, a.samples(), b.samples(), 4, 0.0).unwrap();
    let after =
        sample_correspondences(&shifted.path, a.samples(), rebased.samples(), 4, 0.0).unwrap();
    assert_eq!(after.reference(), Reference::First);
    assert_eq!(after.len(), 3);
    for (x, y) in before.iter().zip(after.iter()) {
        assert_eq!(x.reference_index, y.reference_index);
        assert_eq!(x.second.timestamp - 500.0, y.second.timestamp);
    }
}

#[test]
fn reader_fixture_files_match_expected_errors() {
    let result = SeriesReader::new(&fixture_path("comments_only.csv")).read();
    assert!(matches!(
        result,
        Err(IoError::InvalidSeries {
            source: DtwError::EmptySeries,
            ..
        })
    ));

    let result = SeriesReader::new(&fixture_path("decreasing.csv")).read();
    assert!(matches!(
        result,
        Err(IoError::InvalidSeries {
            source: DtwError::NonMonotonicTimestamp { index: 2, .. },
            ..
        })
    ));

    let result = SeriesReader::new(&fixture_path("short_row.csv")).read();
    assert!(matches!(result, Err(IoError::MissingField { line: 2, .. })));

    let result = SeriesReader::new(&fixture_path("bad_number.csv")).read();
    assert!(matches!(result, Err(IoError::InvalidNumber { line: 2, column: 1, .. })));

    let result = SeriesReader::new(&fixture_path("missing.csv")).read();
    assert!(matches!(result, Err(IoError::FileNotFound { .. })));
}

#[test]
fn error_messages_name_the_file() {
    let path = fixture_path("bad_number.csv");
    let err = SeriesReader::new(&path).read().unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("bad_number.csv"), "message was: {msg}");
    assert!(msg.contains("\"high\""), "message was: {msg}");
}
