//! CSV readers and writers for the tables the core consumes and produces.
//!
//! Source lists carry `CLIENT_ID`, `PROBA`, `SOURCE` plus an open set of
//! extra columns shared by every input; contracts carry `CLIENT_ID` and
//! `DATE_BEG`. Extra columns survive the round trip untouched.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use abkit_core::{ClientRecord, Contract, SourceList};

use crate::error::{Error, Result};

const CLIENT_ID: &str = "CLIENT_ID";
const PROBA: &str = "PROBA";
const SOURCE: &str = "SOURCE";
const DATE_BEG: &str = "DATE_BEG";

const DATE_FORMAT: &str = "%Y-%m-%d";

fn column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| Error::InvalidTable(format!("missing column '{name}'")))
}

/// Read one candidate source list from a CSV file.
///
/// # Errors
///
/// Fails with [`Error::InvalidTable`] when a required column is missing or
/// a `PROBA` value does not parse as a float.
pub fn read_source_list(path: &Path) -> Result<SourceList> {
    let mut reader = ReaderBuilder::new().from_path(path)?;
    let headers = reader.headers()?.clone();

    let client_idx = column(&headers, CLIENT_ID)?;
    let proba_idx = column(&headers, PROBA)?;
    let source_idx = column(&headers, SOURCE)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let proba: f64 = row[proba_idx].parse().map_err(|_| {
            Error::InvalidTable(format!("bad PROBA value '{}'", &row[proba_idx]))
        })?;

        let mut extra = BTreeMap::new();
        for (idx, field) in row.iter().enumerate() {
            if idx != client_idx && idx != proba_idx && idx != source_idx {
                extra.insert(headers[idx].to_string(), field.to_string());
            }
        }

        records.push(ClientRecord {
            client_id: row[client_idx].to_string(),
            proba,
            source: row[source_idx].to_string(),
            extra,
        });
    }

    tracing::debug!(path = %path.display(), rows = records.len(), "read source list");
    Ok(SourceList::new(records))
}

/// Read the contracts table from a CSV file.
///
/// # Errors
///
/// Fails with [`Error::InvalidTable`] when a required column is missing or
/// a `DATE_BEG` value is not `YYYY-MM-DD`.
pub fn read_contracts(path: &Path) -> Result<Vec<Contract>> {
    let mut reader = ReaderBuilder::new().from_path(path)?;
    let headers = reader.headers()?.clone();

    let client_idx = column(&headers, CLIENT_ID)?;
    let date_idx = column(&headers, DATE_BEG)?;

    let mut contracts = Vec::new();
    for row in reader.records() {
        let row = row?;
        let signed_at = NaiveDate::parse_from_str(&row[date_idx], DATE_FORMAT).map_err(|_| {
            Error::InvalidTable(format!("bad DATE_BEG value '{}'", &row[date_idx]))
        })?;
        contracts.push(Contract {
            client_id: row[client_idx].to_string(),
            signed_at,
        });
    }

    tracing::debug!(path = %path.display(), rows = contracts.len(), "read contracts");
    Ok(contracts)
}

/// Write client records to a CSV file with the same column structure the
/// inputs had.
///
/// Extra columns come from the first record; every record of one table
/// shares the same column set.
pub fn write_records(path: &Path, records: &[ClientRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path)?;

    let extra_columns: Vec<String> = records
        .first()
        .map(|r| r.extra.keys().cloned().collect())
        .unwrap_or_default();

    let mut header = vec![CLIENT_ID.to_string(), PROBA.to_string(), SOURCE.to_string()];
    header.extend(extra_columns.iter().cloned());
    writer.write_record(&header)?;

    for record in records {
        let mut row = vec![
            record.client_id.clone(),
            record.proba.to_string(),
            record.source.clone(),
        ];
        for name in &extra_columns {
            row.push(record.extra.get(name).cloned().unwrap_or_default());
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
