//! Fixture tests for the filter codec.
//!
//! Each fixture (.filter) is decoded and re-encoded; the normalized text is
//! compared against the co-located snapshot (.snap) in `fixtures/`.

use crate::parsing::{
    DecodeOptions, SkipReason, decode_filter, decode_filter_with, encode_filter,
};

#[test]
fn fixture_currency() {
    let report = assert_fixture("currency");
    assert_eq!(report.blocks.len(), 3);
    assert!(report.skipped.is_empty());
}

#[test]
fn fixture_hidden_and_malformed() {
    let report = assert_fixture("hidden_and_malformed");
    assert_eq!(report.blocks.len(), 2);

    let skipped: Vec<(usize, &SkipReason)> = report
        .skipped
        .iter()
        .map(|s| (s.index, &s.reason))
        .collect();
    assert_eq!(skipped.len(), 2);
    assert_eq!(skipped[0], (1, &SkipReason::MissingVisibility));
    assert_eq!(skipped[1].0, 2);
    assert!(matches!(skipped[1].1, SkipReason::InvalidNumber { .. }));
}

fn assert_fixture(name: &str) -> crate::parsing::DecodeReport {
    let fixtures_dir = format!(
        "{}/src/parsing/tests/fixtures",
        env!("CARGO_MANIFEST_DIR")
    );
    let text = std::fs::read_to_string(format!("{fixtures_dir}/{name}.filter")).unwrap();

    let report = decode_filter_with(&text, &DecodeOptions::default());
    let encoded = encode_filter(&report.blocks);

    // Normalized text is a fixed point of the codec.
    assert_eq!(encode_filter(&decode_filter(&encoded)), encoded);

    insta::with_settings!({
        snapshot_path => fixtures_dir.as_str(),
        prepend_module_to_snapshot => false,
    }, {
        insta::assert_snapshot!(name, encoded);
    });
    report
}

/// Windows line endings decode the same as Unix ones.
#[test]
fn crlf_input_matches_lf_input() {
    let lf = "# One\nShow\nClass == Gems\nSetTextColor 1 2 3 255\n\n# Two\nHide\nItemLevel <= 5\n";
    let crlf = lf.replace('\n', "\r\n");

    assert_eq!(decode_filter(&crlf), decode_filter(lf));
    assert_eq!(decode_filter(lf).len(), 2);
}

#[test]
fn empty_file() {
    assert!(decode_filter("").is_empty());
}

#[test]
fn blank_lines_only() {
    assert!(decode_filter("\n\n\n").is_empty());
}
