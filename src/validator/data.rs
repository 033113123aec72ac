use std::path::Path;

use arrow::array::{Array, UInt16Array, UInt32Array};
use parquet::file::metadata::ParquetMetaData;

use crate::metadata::ListFileMetadata;
use crate::reader::ListModeReader;
use crate::schema::{channel_column_name, ABSENT_VALUE, TIME};

use super::{ValidationCheck, ValidationError, ValidationReport};

/// Step 4: column lengths, `TIME` order, row occupancy, event count.
pub(crate) fn check_data_sanity(
    path: &Path,
    parquet: &ParquetMetaData,
    metadata: &ListFileMetadata,
    report: &mut ValidationReport,
) -> Result<(), ValidationError> {
    let num_rows = parquet.file_metadata().num_rows();
    report.add_check(ValidationCheck::ok(format!("Total events: {}", num_rows)));

    let mut ragged = Vec::new();
    for (rg_idx, row_group) in parquet.row_groups().iter().enumerate() {
        for column in row_group.columns() {
            if column.num_values() != row_group.num_rows() {
                ragged.push(format!(
                    "row group {} column {} has {} values for {} rows",
                    rg_idx,
                    column.column_path(),
                    column.num_values(),
                    row_group.num_rows()
                ));
            }
        }
    }
    report.add_check(ValidationCheck::require("Equal column lengths", ragged.is_empty(), ragged.join("; ")));

    if let Some(explore) = metadata.explore {
        report.add_check(ValidationCheck::require(
            "Event count matches discovery pass",
            i64::try_from(explore.events).map(|e| e == num_rows).unwrap_or(false),
            format!("Discovery pass found {} events, store holds {}", explore.events, num_rows),
        ));
    } else {
        report.add_check(ValidationCheck::warning(
            "Event count matches discovery pass",
            "No discovery summary in footer",
        ));
    }

    if num_rows == 0 {
        report.add_check(ValidationCheck::warning("Event rows", "Store contains no events"));
        return Ok(());
    }

    let scan = scan_rows(path)?;

    match scan.first_decrease {
        None => report.add_check(ValidationCheck::ok("TIME non-decreasing")),
        Some((row, prev, value)) => report.add_check(ValidationCheck::failed(
            "TIME non-decreasing",
            format!("TIME drops from {} to {} at event {}", prev, value, row),
        )),
    }

    match scan.first_empty {
        None => report.add_check(ValidationCheck::ok("Every event has a sample")),
        Some(row) => report.add_check(ValidationCheck::failed(
            "Every event has a sample",
            format!(
                "{} events hold only the sentinel, first at event {}",
                scan.empty_rows, row
            ),
        )),
    }

    Ok(())
}

#[derive(Debug, Default)]
struct RowScan {
    /// (row, previous TIME, TIME)
    first_decrease: Option<(u64, u32, u32)>,
    first_empty: Option<u64>,
    empty_rows: u64,
}

/// Stream every batch once.
fn scan_rows(path: &Path) -> Result<RowScan, ValidationError> {
    let reader = ListModeReader::open(path)?;
    let names: Vec<String> = reader.channels().iter().map(|&c| channel_column_name(c)).collect();

    let mut scan = RowScan::default();
    let mut prev: Option<u32> = None;
    let mut row: u64 = 0;

    for batch in reader.iter_batches()? {
        let batch = batch?;
        let time = batch
            .column_by_name(TIME)
            .and_then(|c| c.as_any().downcast_ref::<UInt32Array>())
            .ok_or_else(|| ValidationError::StructureError(format!("{} is not a UInt32 column", TIME)))?;
        let columns = names
            .iter()
            .map(|name| {
                batch
                    .column_by_name(name)
                    .and_then(|c| c.as_any().downcast_ref::<UInt16Array>())
                    .ok_or_else(|| ValidationError::StructureError(format!("{} is not a UInt16 column", name)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (i, &t) in time.values().iter().enumerate() {
            if let Some(p) = prev {
                if t < p && scan.first_decrease.is_none() {
                    scan.first_decrease = Some((row, p, t));
                }
            }
            prev = Some(t);

            if columns.iter().all(|c| c.value(i) == ABSENT_VALUE) {
                scan.empty_rows += 1;
                scan.first_empty.get_or_insert(row);
            }
            row += 1;
        }
    }

    Ok(scan)
}
