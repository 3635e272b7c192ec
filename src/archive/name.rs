use chrono::NaiveDateTime;

use crate::types::{ProfileId, ARCHIVE_SEPARATOR};

pub const ARCHIVE_PREFIX: &str = "WR";
pub const ARCHIVE_EXTENSION: &str = ".zip";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H%M%S";
const TIMESTAMP_LAYOUT: &[u8; 17] = b"dddd-dd-dd_dddddd";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRecord {
    pub profile: ProfileId,
    pub created_at: NaiveDateTime,
}

/// `WR~<profile>~<YYYY-MM-DD_HHMMSS>.zip`; sub-second precision is dropped.
pub fn format_archive_name(profile: &ProfileId, created_at: NaiveDateTime) -> String {
    format!(
        "{prefix}{sep}{profile}{sep}{stamp}{ext}",
        prefix = ARCHIVE_PREFIX,
        sep = ARCHIVE_SEPARATOR,
        profile = profile,
        stamp = created_at.format(TIMESTAMP_FORMAT),
        ext = ARCHIVE_EXTENSION,
    )
}

pub fn parse_archive_name(file_name: &str) -> Option<ArchiveRecord> {
    let split = file_name.len().checked_sub(ARCHIVE_EXTENSION.len())?;
    let extension = file_name.get(split..)?;
    if !extension.eq_ignore_ascii_case(ARCHIVE_EXTENSION) {
        return None;
    }
    let stem = &file_name[..split];
    let parts: Vec<&str> = stem.split(ARCHIVE_SEPARATOR).collect();
    if parts.len() != 3 || parts[0] != ARCHIVE_PREFIX {
        return None;
    }
    let profile = parts[1].parse::<ProfileId>().ok()?;
    let created_at = parse_timestamp(parts[2])?;
    Some(ArchiveRecord {
        profile,
        created_at,
    })
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let bytes = value.as_bytes();
    if bytes.len() != TIMESTAMP_LAYOUT.len() {
        return None;
    }
    let fixed_width = bytes
        .iter()
        .zip(TIMESTAMP_LAYOUT.iter())
        .all(|(b, layout)| match layout {
            b'd' => b.is_ascii_digit(),
            other => b == other,
        });
    // chrono accepts a leap second of 60; seconds stop at 59 here.
    if !fixed_width || &value[15..] > "59" {
        return None;
    }
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).ok()
}
