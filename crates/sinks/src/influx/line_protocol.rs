//! Line protocol encoding
//!
//! ```text
//! repositories,owner=rust-lang,language=Rust name="rust",url="https://github.com/rust-lang/rust",stargazerCount=98000i,forkCount=12000i 1700000000000
//! ```
//!
//! A null tag is omitted from the line. Timestamps are milliseconds, so
//! writes must use `precision=ms`.

use std::fmt::Write;

use stargaze_protocol::{
    FIELD_FORK_COUNT, FIELD_NAME, FIELD_STARGAZER_COUNT, FIELD_URL, MeasurementPoint,
};

/// Encode a batch, one line per point
pub fn encode_batch(measurement: &str, points: &[MeasurementPoint]) -> String {
    let mut out = String::with_capacity(points.len() * 160);
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        encode_point(measurement, point, &mut out);
    }
    out
}

/// Append one encoded point to `out`
pub fn encode_point(measurement: &str, point: &MeasurementPoint, out: &mut String) {
    push_escaped(out, measurement, &[',', ' ']);

    for (key, value) in point.tags.iter() {
        // Empty tag values are invalid in line protocol
        if value.is_empty() {
            continue;
        }
        out.push(',');
        push_escaped(out, key, &[',', '=', ' ']);
        out.push('=');
        push_escaped(out, value, &[',', '=', ' ']);
    }

    let fields = &point.fields;
    out.push(' ');
    push_string_field(out, FIELD_NAME, &fields.name);
    out.push(',');
    push_string_field(out, FIELD_URL, &fields.url);
    // Writing to a String cannot fail
    let _ = write!(
        out,
        ",{}={}i,{}={}i {}",
        FIELD_STARGAZER_COUNT,
        fields.stargazer_count,
        FIELD_FORK_COUNT,
        fields.fork_count,
        point.timestamp_ms
    );
}

fn push_string_field(out: &mut String, key: &str, value: &str) {
    push_escaped(out, key, &[',', '=', ' ']);
    out.push_str("=\"");
    push_escaped(out, value, &['"', '\\']);
    out.push('"');
}

fn push_escaped(out: &mut String, value: &str, special: &[char]) {
    for ch in value.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            c if special.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
}
