//! Export helpers for collision tables: an XLSX workbook, plus CSV and JSON for tooling.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Directory collision tables land in when the caller gives none.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";
/// File stem used when the caller gives no output name.
pub const DEFAULT_OUTPUT_STEM: &str = "collision";
/// Output name that streams the table to stdout.
pub const STDOUT_NAME: &str = "-";

const HEADER: [&str; 6] = ["sat_a", "sat_b", "x_km", "y_km", "theta_deg", "time_min"];
const EPOCH_COLUMN: &str = "epoch_utc";

fn header(with_epoch: bool) -> Vec<&'static str> {
    let mut header = HEADER.to_vec();
    if with_epoch {
        header.push(EPOCH_COLUMN);
    }
    header
}

/// Errors surfaced while writing export artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// `<dir>/<name>.xlsx`, defaulting the stem to `collision`. A name of `-` selects stdout.
pub fn default_output_path(dir: &Path, name: Option<&str>) -> PathBuf {
    match name {
        Some(STDOUT_NAME) => PathBuf::from(STDOUT_NAME),
        name => dir.join(format!("{}.xlsx", name.unwrap_or(DEFAULT_OUTPUT_STEM))),
    }
}

/// Whether `path` is the stdout marker rather than a file.
pub fn is_stdout(path: &Path) -> bool {
    path == Path::new(STDOUT_NAME)
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if is_stdout(path) {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod collisions {
    use std::io::Write;

    use serde::Serialize;

    use super::{ExportError, header};

    /// One exported pair. Missing values mean the pair does not collide within the horizon.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Record {
        pub sat_a: usize,
        pub sat_b: usize,
        pub x_km: Option<f64>,
        pub y_km: Option<f64>,
        pub theta_deg: Option<f64>,
        pub time_min: Option<f64>,
        pub epoch_utc: Option<String>,
    }

    impl Record {
        /// Row for a pair with no collision in the horizon.
        pub fn missing(sat_a: usize, sat_b: usize) -> Self {
            Self {
                sat_a,
                sat_b,
                x_km: None,
                y_km: None,
                theta_deg: None,
                time_min: None,
                epoch_utc: None,
            }
        }

        fn fields(&self, with_epoch: bool) -> Vec<String> {
            let mut fields = vec![
                self.sat_a.to_string(),
                self.sat_b.to_string(),
                fmt_opt(self.x_km),
                fmt_opt(self.y_km),
                fmt_opt(self.theta_deg),
                fmt_opt(self.time_min),
            ];
            if with_epoch {
                fields.push(self.epoch_utc.clone().unwrap_or_default());
            }
            fields
        }
    }

    fn fmt_opt(value: Option<f64>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    /// Write the collision table as CSV. The `epoch_utc` column is only emitted when `with_epoch`.
    pub fn write_csv(
        writer: &mut dyn Write,
        records: &[Record],
        with_epoch: bool,
    ) -> Result<(), ExportError> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(header(with_epoch))?;
        for record in records {
            csv.write_record(record.fields(with_epoch))?;
        }
        csv.flush()?;
        Ok(())
    }
}

pub mod workbook {
    use std::fs;
    use std::path::Path;

    use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

    use super::collisions::Record;
    use super::{ExportError, header};

    /// Worksheet holding the collision table.
    pub const SHEET_NAME: &str = "collisions";

    /// Write the collision table as a single-sheet XLSX workbook. Missing values stay blank.
    pub fn write_xlsx(path: &Path, records: &[Record], with_epoch: bool) -> Result<(), ExportError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;
        for (col, title) in header(with_epoch).into_iter().enumerate() {
            sheet.write_string(0, col as u16, title)?;
        }
        for (i, record) in records.iter().enumerate() {
            write_row(sheet, i as u32 + 1, record, with_epoch)?;
        }
        workbook.save(path)?;
        Ok(())
    }

    fn write_row(
        sheet: &mut Worksheet,
        row: u32,
        record: &Record,
        with_epoch: bool,
    ) -> Result<(), XlsxError> {
        sheet.write_number(row, 0, record.sat_a as f64)?;
        sheet.write_number(row, 1, record.sat_b as f64)?;
        let values = [record.x_km, record.y_km, record.theta_deg, record.time_min];
        for (offset, value) in values.into_iter().enumerate() {
            if let Some(v) = value {
                sheet.write_number(row, 2 + offset as u16, v)?;
            }
        }
        if with_epoch {
            if let Some(epoch) = &record.epoch_utc {
                sheet.write_string(row, 6, epoch)?;
            }
        }
        Ok(())
    }
}

pub mod summary {
    use std::fs::{self, File};
    use std::path::{Path, PathBuf};

    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use super::ExportError;
    use super::collisions::Record;

    /// Scenario parameters echoed into the JSON sidecar.
    #[derive(Debug, Serialize)]
    pub struct Metadata<'a> {
        pub name: Option<&'a str>,
        pub minor_axis_km: f64,
        pub major_axis_km: f64,
        pub periods_min: &'a [f64],
        pub start_points_rad: &'a [f64],
        pub max_years: u32,
        pub epoch_utc: Option<&'a str>,
    }

    #[derive(Serialize)]
    struct Sidecar<'a> {
        #[serde(flatten)]
        meta: &'a Metadata<'a>,
        pairs: usize,
        collisions: usize,
        rows: &'a [Record],
    }

    /// JSON path that sits next to a table export: `<stem>.json` in the same directory.
    pub fn sidecar_path(table_path: &Path) -> PathBuf {
        let parent = table_path.parent().unwrap_or_else(|| Path::new("."));
        let stem = table_path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| *s != super::STDOUT_NAME)
            .unwrap_or(super::DEFAULT_OUTPUT_STEM);
        parent.join(format!("{stem}.json"))
    }

    /// Write the scenario metadata and every row as pretty-printed JSON.
    pub fn write_sidecar(
        path: &Path,
        meta: &Metadata<'_>,
        records: &[Record],
    ) -> Result<(), ExportError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let sidecar = Sidecar {
            meta,
            pairs: records.len(),
            collisions: records.iter().filter(|r| r.time_min.is_some()).count(),
            rows: records,
        };
        to_writer_pretty(File::create(path)?, &sidecar)?;
        Ok(())
    }
}
