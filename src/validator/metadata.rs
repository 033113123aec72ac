use std::collections::HashMap;

use parquet::file::metadata::ParquetMetaData;

use crate::decoder::MAX_CHANNELS;
use crate::metadata::ListFileMetadata;
use crate::schema::{
    ABSENT_VALUE, KEY_CHANNELS, KEY_COMPLETE, KEY_FORMAT_VERSION, KEY_HEADER, KEY_SENTINEL,
    MPALIST_FORMAT_VERSION,
};

use super::{ValidationCheck, ValidationReport};

/// Step 2: footer metadata integrity.
///
/// Returns the parsed metadata, or `None` when it is unusable for the
/// remaining steps.
pub(crate) fn check_metadata_integrity(
    parquet: &ParquetMetaData,
    report: &mut ValidationReport,
) -> Option<ListFileMetadata> {
    let Some(kv_metadata) = parquet.file_metadata().key_value_metadata() else {
        report.add_check(ValidationCheck::failed(
            "Footer metadata",
            "No key-value metadata found in Parquet footer",
        ));
        return None;
    };
    let kv_map: HashMap<String, String> = kv_metadata
        .iter()
        .filter_map(|kv| kv.value.as_ref().map(|v| (kv.key.clone(), v.clone())))
        .collect();

    match kv_map.get(KEY_FORMAT_VERSION) {
        Some(version) if version == MPALIST_FORMAT_VERSION => {
            report.add_check(ValidationCheck::ok(format!(
                "Format version matches ({})",
                MPALIST_FORMAT_VERSION
            )));
        }
        Some(version) => report.add_check(ValidationCheck::warning(
            "Format version",
            format!("Expected {}, found {}", MPALIST_FORMAT_VERSION, version),
        )),
        None => report.add_check(ValidationCheck::warning(
            "Format version",
            "Format version not found in Parquet metadata",
        )),
    }

    report.add_check(ValidationCheck::require(
        "Completion marker",
        kv_map.get(KEY_COMPLETE).map(|v| v == "true").unwrap_or(false),
        "Store is not marked complete; the conversion may have been interrupted",
    ));

    let sentinel = ABSENT_VALUE.to_string();
    match kv_map.get(KEY_SENTINEL) {
        Some(value) if *value == sentinel => {
            report.add_check(ValidationCheck::ok(format!("Absent-value sentinel documented ({})", sentinel)));
        }
        Some(value) => report.add_check(ValidationCheck::failed(
            "Absent-value sentinel documented",
            format!("Expected {}, found {}", sentinel, value),
        )),
        None => report.add_check(ValidationCheck::failed(
            "Absent-value sentinel documented",
            format!("{} missing from footer", KEY_SENTINEL),
        )),
    }

    if kv_map.contains_key(KEY_HEADER) {
        report.add_check(ValidationCheck::ok("List-file header present"));
    } else {
        report.add_check(ValidationCheck::warning(
            "List-file header present",
            format!("{} missing from footer", KEY_HEADER),
        ));
    }

    if !kv_map.contains_key(KEY_CHANNELS) {
        report.add_check(ValidationCheck::failed(
            "Channel list",
            format!("{} missing from footer", KEY_CHANNELS),
        ));
        return None;
    }

    let metadata = match ListFileMetadata::from_parquet_metadata(&kv_map) {
        Ok(metadata) => {
            report.add_check(ValidationCheck::ok("Footer metadata deserializes"));
            metadata
        }
        Err(e) => {
            report.add_check(ValidationCheck::failed(
                "Footer metadata deserializes",
                format!("Failed to deserialize: {}", e),
            ));
            return None;
        }
    };

    let ordered = metadata.channels.windows(2).all(|w| w[0] < w[1]);
    let in_range = metadata
        .channels
        .iter()
        .all(|&c| metadata.channel_origin.bit(c).is_some());
    report.add_check(ValidationCheck::require(
        "Channel list",
        ordered && in_range,
        format!(
            "Channels {:?} must be strictly increasing and within {} ADC inputs",
            metadata.channels, MAX_CHANNELS
        ),
    ));

    if metadata.diagnostics.is_clean() {
        report.add_check(ValidationCheck::ok("Decoding diagnostics clean"));
    } else {
        let d = &metadata.diagnostics;
        report.add_check(ValidationCheck::warning(
            "Decoding diagnostics clean",
            format!(
                "{} skipped pairs, {} empty headers, {} truncated events, {} trailing bytes",
                d.skipped_pairs, d.empty_headers, d.truncated_events, d.trailing_bytes
            ),
        ));
    }

    Some(metadata)
}
