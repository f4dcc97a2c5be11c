//! End-to-end tests for archive-level CSMIP parsing.

mod common;

use common::{ACCEL, DISPL, VELOC, v2_member, write_zip};
use csmip::{Parsed, ParseOptions, read};

/// Build a zip archive holding `channels` V2 members named chan001.v2 ...
fn v2_archive(dir: &tempfile::TempDir, channels: u32) -> anyhow::Result<std::path::PathBuf> {
    let members: Vec<(String, String)> = (1..=channels)
        .map(|channel| {
            (
                format!("chan{:03}.v2", channel),
                v2_member(channel, "Roof level"),
            )
        })
        .collect();
    let path = dir.path().join("58658_007_20210426_10.09.54.P.zip");
    write_zip(&path, &members)?;
    Ok(path)
}

#[test]
fn test_archive_yields_one_series_per_channel() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let archive = v2_archive(&dir, 20)?;

    let Some(Parsed::Record(record)) = read(&archive, &ParseOptions::new())? else {
        panic!("expected an archive-level record");
    };

    // 20 channel files, exactly 20 components post-consolidation
    assert_eq!(record.len(), 20);
    for channel in 1..=20u32 {
        assert!(record.get(&channel.to_string()).is_some(), "channel {}", channel);
    }
    Ok(())
}

#[test]
fn test_archive_series_carry_payload_and_peaks() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let archive = v2_archive(&dir, 3)?;

    let Some(Parsed::Record(record)) = read(&archive, &ParseOptions::new())? else {
        panic!("expected an archive-level record");
    };

    let series = record.get("1").unwrap();
    let accel = series.accel().unwrap();
    assert_eq!(accel[0], -0.000102);
    assert_eq!(accel[accel.len() - 1], 0.000105);
    assert_eq!(series.veloc().unwrap(), &VELOC);
    assert_eq!(series.displ().unwrap(), &DISPL);

    let meta = series.meta();
    assert_eq!(meta.get_f64("peak_accel"), Some(17.433));
    assert_eq!(meta.get_f64("peak_veloc"), Some(0.205));
    assert_eq!(meta.get_f64("peak_displ"), Some(-0.004));
    Ok(())
}

#[test]
fn test_record_metadata_from_first_member() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let archive = v2_archive(&dir, 2)?;

    let Some(Parsed::Record(record)) = read(&archive, &ParseOptions::new())? else {
        panic!("expected an archive-level record");
    };

    assert_eq!(record.event_date(), Some("2021-04-26T10:09:00"));
    assert_eq!(record.station_name(), Some("Berkeley - Unnamed Building"));
    assert_eq!(record.station_number(), Some("58658"));
    assert_eq!(record.coordinates(), Some("37.8085N, 122.2672W"));
    assert_eq!(record.file_name(), Some(archive.to_string_lossy().as_ref()));
    Ok(())
}

#[test]
fn test_member_failure_is_isolated() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut members: Vec<(String, String)> = (1..=4u32)
        .map(|channel| {
            (
                format!("chan{:03}.v2", channel),
                v2_member(channel, "Roof level"),
            )
        })
        .collect();
    // truncate one member inside its integer header block
    let truncated = members[1].1.lines().take(27).collect::<Vec<_>>().join("\n");
    members[1].1 = truncated;
    let path = dir.path().join("event.zip");
    write_zip(&path, &members)?;

    let Some(Parsed::Record(record)) = read(&path, &ParseOptions::new())? else {
        panic!("expected an archive-level record");
    };

    // the corrupt member is skipped, its siblings survive
    assert_eq!(record.len(), 3);
    assert!(record.get("2").is_none());
    Ok(())
}

#[test]
fn test_non_member_files_are_ignored() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let members = vec![
        ("readme.txt".to_string(), "not a record".to_string()),
        ("chan001.v2".to_string(), v2_member(1, "Roof level")),
    ];
    let path = dir.path().join("event.zip");
    write_zip(&path, &members)?;

    let Some(Parsed::Record(record)) = read(&path, &ParseOptions::new())? else {
        panic!("expected an archive-level record");
    };
    assert_eq!(record.len(), 1);
    Ok(())
}

#[test]
fn test_summarize_archive_parses_metadata_only() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let archive = v2_archive(&dir, 2)?;

    let Some(Parsed::Record(record)) = read(&archive, &ParseOptions::summary())? else {
        panic!("expected an archive-level record");
    };

    assert_eq!(record.len(), 2);
    for series in record.series().values() {
        assert!(series.accel().is_none());
        assert!(series.veloc().is_none());
        assert!(series.displ().is_none());
        assert_eq!(series.meta().get_f64("peak_accel"), Some(17.433));
    }
    Ok(())
}

#[test]
fn test_directory_parse_matches_archive_parse() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let event_dir = dir.path().join("58658_007_20210426_10.09.54.P");
    std::fs::create_dir(&event_dir)?;
    for channel in 1..=3u32 {
        std::fs::write(
            event_dir.join(format!("chan{:03}.v2", channel)),
            v2_member(channel, "Roof level"),
        )?;
    }

    let Some(Parsed::Record(record)) = read(&event_dir, &ParseOptions::new())? else {
        panic!("expected a directory-level record");
    };

    assert_eq!(record.len(), 3);
    assert_eq!(record.get("1").unwrap().accel().unwrap(), &ACCEL);
    assert_eq!(record.station_number(), Some("58658"));
    Ok(())
}

#[test]
fn test_single_member_file_parse() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("chan001.v2");
    std::fs::write(&path, v2_member(1, "Roof level"))?;

    let Some(Parsed::Series(series)) = read(&path, &ParseOptions::new())? else {
        panic!("expected a single series");
    };

    assert_eq!(series.accel().unwrap(), &ACCEL);
    assert_eq!(series.meta().get_f64("peak_accel"), Some(17.433));
    assert_eq!(series.meta().get_str("file_name"), Some("chan001.v2"));
    Ok(())
}
