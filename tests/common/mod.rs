//! Shared fixture builders for integration tests.
//!
//! Members are generated to the exact fixed-column layouts: 25/13/11 text
//! header lines, fixed-width numeric header blocks, count-prefixed payload
//! blocks at 8 values per line.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Twelve acceleration samples; first/last values are the documented
/// boundary literals.
pub const ACCEL: [f64; 12] = [
    -0.000102, 0.000034, -0.000076, 0.000412, -0.001230, 0.002100, -0.000870, 0.000655,
    -0.000321, 0.000199, -0.000045, 0.000105,
];

pub const VELOC: [f64; 12] = [
    0.000095, 0.000110, 0.000134, -0.000156, 0.000178, -0.000201, 0.000225, -0.000250,
    0.000276, -0.000303, 0.000331, 0.000101,
];

pub const DISPL: [f64; 12] = [
    0.000001, -0.000002, 0.000004, -0.000007, 0.000011, -0.000016, 0.000022, -0.000029,
    0.000037, -0.000046, 0.000056, -0.000067,
];

fn chunked(values: impl Iterator<Item = String>, per_line: usize) -> String {
    values
        .collect::<Vec<_>>()
        .chunks(per_line)
        .map(|chunk| chunk.concat())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn data_block(values: &[f64], width: usize) -> String {
    chunked(
        values.iter().map(|value| format!("{:>width$.6}", value, width = width)),
        8,
    )
}

fn int_block(count: usize, width: usize, per_line: usize) -> String {
    chunked(
        (1..=count as i64).map(|value| format!("{:>width$}", value, width = width)),
        per_line,
    )
}

fn real_block(count: usize, width: usize, per_line: usize) -> String {
    chunked(
        (1..=count).map(|value| format!("{:>width$.3}", value as f64 * 0.5, width = width)),
        per_line,
    )
}

pub fn count_line(npts: usize, quantity: &str, time_step: &str) -> String {
    format!(
        "{:>8} points of {} data equally spaced at  {} sec",
        npts, quantity, time_step
    )
}

/// The 25-line V2 text header; `location` feeds the Location token
pub fn v2_text_header(channel: u32, location: &str) -> Vec<String> {
    let mut lines = vec![String::new(); 25];
    lines[0] = "Corrected accelerogram 58658-CE58658-N.V2".to_string(); // 1
    lines[1] = "Processed by the California strong motion instrumentation program".to_string();
    lines[4] = "Earthquake of: 04/26/21, 10:09 PDT".to_string(); // 5
    lines[5] = "Station No. 58658   37.8085N, 122.2672W".to_string(); // 6
    lines[6] = "Berkeley - Unnamed Building".to_string(); // 7
    lines[7] = format!(
        "Chan  {0}: 360 Deg  Sta Chn: {0}  Location: {1}",
        channel, location
    ); // 8
    lines[10] = "Instr Period = 0.039 sec, Damping = 0.577".to_string(); // 11
    lines[13] = "Peak acceleration = 17.433 cm/sec2 at 5.210 sec".to_string(); // 14
    lines[14] = "Peak velocity = 0.205 cm/sec at 5.940 sec".to_string(); // 15
    lines[15] = "Peak displacement = -0.004 cm at 9.150 sec".to_string(); // 16
    lines[16] = "Initial velocity = 0.095 cm/sec; Initial displacement = -0.002 cm".to_string(); // 17
    lines[21] = count_line(ACCEL.len(), "accel", ".005"); // 22
    lines[22] = count_line(VELOC.len(), "veloc", ".005"); // 23
    lines[23] = count_line(DISPL.len(), "displ", ".005"); // 24
    lines
}

/// A complete full-format V2 member
pub fn v2_member(channel: u32, location: &str) -> String {
    let mut sections = v2_text_header(channel, location);
    sections.push(int_block(100, 5, 16));
    sections.push(real_block(100, 10, 8));
    for (values, quantity) in [(&ACCEL, "accel"), (&VELOC, "veloc"), (&DISPL, "displ")] {
        sections.push(count_line(values.len(), quantity, ".005"));
        sections.push(data_block(values, 10));
    }
    sections.join("\n")
}

/// A complete reduced-format V1 member (acceleration only, 9-char fields)
pub fn v1_member(channel: u32) -> String {
    let mut lines = vec![String::new(); 13];
    lines[0] = "Uncorrected accelerogram 58658-CE58658-N.V1".to_string(); // 1
    lines[2] = "Earthquake of: 04/26/21, 10:09 PDT".to_string(); // 3
    lines[3] = "Station No. 58658   37.8085N, 122.2672W".to_string(); // 4
    lines[5] = "Berkeley - Unnamed Building".to_string(); // 6
    lines[6] = format!(
        "Chan  {0}: 360 Deg  Sta Chn: {0}  Location: Roof level",
        channel
    ); // 7
    lines[7] = "Instr Period = 0.039 sec, Damping = 0.577".to_string(); // 8
    lines[9] = count_line(ACCEL.len(), "accel", ".005"); // 10

    lines.push(int_block(50, 5, 16));
    lines.push(real_block(50, 10, 8));
    lines.push(count_line(ACCEL.len(), "accel", ".005"));
    lines.push(data_block(&ACCEL, 9));
    lines.join("\n")
}

/// A complete SMC member
pub fn smc_member(channel: u32) -> String {
    let mut lines = vec![String::new(); 11];
    lines[0] = "1103.HN2.NP corrected accelerogram".to_string(); // 1
    lines[1] = "Berkeley - Byerly Vault".to_string(); // 2
    lines[2] = "Earthquake of 04 Jan 2018 02:39 UTC".to_string(); // 3
    lines[3] = "Station No. 1103   37.8771N, 122.2460W".to_string(); // 4
    lines[4] = format!("Chan  {}: HN2  Location: Free-field vault", channel); // 5
    lines[5] = "Peak acceleration = 3.120 cm/sec2 at 1.250 sec".to_string(); // 6
    lines[6] = count_line(ACCEL.len(), "accel", ".010"); // 7

    lines.push(int_block(48, 10, 8));
    lines.push(real_block(50, 15, 5));
    lines.push(count_line(ACCEL.len(), "accel", ".010"));
    lines.push(data_block(&ACCEL, 10));
    lines.join("\n")
}

/// Write a zip archive of (member name, content) pairs
pub fn write_zip(path: &Path, members: &[(String, String)]) -> anyhow::Result<()> {
    let mut writer = ZipWriter::new(File::create(path)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in members {
        writer.start_file(name.as_str(), options)?;
        writer.write_all(content.as_bytes())?;
    }
    writer.finish()?;
    Ok(())
}
