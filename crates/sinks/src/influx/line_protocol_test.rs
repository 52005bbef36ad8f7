//! Tests for line protocol encoding

use stargaze_protocol::{MeasurementPoint, PointFields, PointTags};

use super::line_protocol::{encode_batch, encode_point};

fn point(owner: &str, language: Option<&str>, name: &str) -> MeasurementPoint {
    MeasurementPoint {
        tags: PointTags {
            owner: owner.to_string(),
            language: language.map(str::to_string),
        },
        fields: PointFields {
            name: name.to_string(),
            url: format!("https://github.com/{}/{}", owner, name),
            stargazer_count: 5000,
            fork_count: 100,
        },
        timestamp_ms: 1_700_000_000_000,
    }
}

#[test]
fn test_encode_point_with_all_tags() {
    let mut line = String::new();
    encode_point("repositories", &point("x", Some("Go"), "a"), &mut line);

    assert_eq!(
        line,
        "repositories,owner=x,language=Go name=\"a\",url=\"https://github.com/x/a\",stargazerCount=5000i,forkCount=100i 1700000000000"
    );
}

#[test]
fn test_encode_point_omits_null_language() {
    let mut line = String::new();
    encode_point("repositories", &point("y", None, "b"), &mut line);

    assert!(line.starts_with("repositories,owner=y name="));
    assert!(!line.contains("language"));
}

#[test]
fn test_encode_point_omits_empty_tag_value() {
    let mut line = String::new();
    encode_point("repositories", &point("y", Some(""), "b"), &mut line);
    assert!(!line.contains("language"));
}

#[test]
fn test_tag_values_are_escaped() {
    let mut line = String::new();
    encode_point("repositories", &point("x", Some("Visual Basic .NET"), "a"), &mut line);
    assert!(line.contains("language=Visual\\ Basic\\ .NET "));

    let mut line = String::new();
    encode_point("repositories", &point("a,b=c", None, "r"), &mut line);
    assert!(line.contains("owner=a\\,b\\=c "));
}

#[test]
fn test_measurement_is_escaped() {
    let mut line = String::new();
    encode_point("repo stats,v1", &point("x", None, "a"), &mut line);
    assert!(line.starts_with("repo\\ stats\\,v1,owner=x"));
}

#[test]
fn test_string_fields_escape_quotes_and_backslashes() {
    let mut line = String::new();
    encode_point("repositories", &point("x", None, "say \"hi\"\\"), &mut line);
    assert!(line.contains("name=\"say \\\"hi\\\"\\\\\""));
}

#[test]
fn test_encode_batch_one_line_per_point() {
    let points = vec![
        point("x", Some("Go"), "a"),
        point("y", None, "b"),
        point("z", Some("Rust"), "c"),
    ];
    let body = encode_batch("repositories", &points);
    let lines: Vec<_> = body.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("name=\"a\""));
    assert!(lines[1].contains("name=\"b\""));
    assert!(lines[2].contains("name=\"c\""));
}

#[test]
fn test_encode_empty_batch() {
    assert_eq!(encode_batch("repositories", &[]), "");
}

#[test]
fn test_counts_are_integer_fields() {
    let mut line = String::new();
    encode_point("m", &point("x", None, "a"), &mut line);
    assert!(line.contains("stargazerCount=5000i"));
    assert!(line.contains("forkCount=100i"));
}
