use std::fs::File;
use std::path::Path;

use parquet::file::metadata::ParquetMetaData;
use parquet::file::reader::{FileReader, SerializedFileReader};

use crate::schema::MPALIST_EXTENSION;

use super::{ValidationCheck, ValidationError, ValidationReport};

/// Step 1: the path exists and parses as Parquet.
pub(crate) fn check_structure(path: &Path, report: &mut ValidationReport) -> Result<ParquetMetaData, ValidationError> {
    if !path.exists() {
        report.add_check(ValidationCheck::failed(
            "Path exists",
            format!("Path does not exist: {}", path.display()),
        ));
        return Err(ValidationError::StructureError("Path does not exist".to_string()));
    }
    report.add_check(ValidationCheck::ok("Path exists"));

    if !path.is_file() {
        report.add_check(ValidationCheck::failed("Single file", "Path is not a regular file"));
        return Err(ValidationError::StructureError("Path is not a regular file".to_string()));
    }
    report.add_check(ValidationCheck::ok("Single file"));

    if path.extension().map(|e| e == MPALIST_EXTENSION).unwrap_or(false) {
        report.add_check(ValidationCheck::ok("File extension"));
    } else {
        report.add_check(ValidationCheck::warning(
            "File extension",
            format!("Expected .{} extension", MPALIST_EXTENSION),
        ));
    }

    let file = File::open(path)?;
    match SerializedFileReader::new(file) {
        Ok(reader) => {
            report.add_check(ValidationCheck::ok("Valid Parquet file"));
            Ok(reader.metadata().clone())
        }
        Err(e) => {
            report.add_check(ValidationCheck::failed(
                "Valid Parquet file",
                format!("Failed to read Parquet footer: {}", e),
            ));
            Err(ValidationError::StructureError(format!("Not a Parquet file: {}", e)))
        }
    }
}
