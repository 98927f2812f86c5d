//! Ride files on disk: JSON arrays of ride records or CSV tables.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ride_heap::{HeapConfig, PassengerList, Ride, RideRecord};
use serde::Deserialize;

/// Separator between passenger names inside one CSV cell.
pub const CSV_PASSENGER_SEPARATOR: char = ';';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    /// Picks the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(InputFormat::Json),
            Some("csv") => Ok(InputFormat::Csv),
            _ => Err(format!(
                "unsupported ride file '{}', expected a .json or .csv extension",
                path.display()
            )
            .into()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    id: i64,
    time: String,
    passengers: String,
    start_id: i64,
    end_id: i64,
}

impl From<CsvRow> for RideRecord {
    fn from(row: CsvRow) -> Self {
        let names = row
            .passengers
            .split(CSV_PASSENGER_SEPARATOR)
            .map(str::to_string)
            .collect();
        RideRecord {
            id: row.id,
            time: row.time,
            passengers: PassengerList::Many(names),
            start_id: row.start_id,
            end_id: row.end_id,
        }
    }
}

/// Reads every record in `path`. Records are not validated here.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<RideRecord>, Box<dyn std::error::Error>> {
    let path = path.as_ref();
    let format = InputFormat::from_path(path)?;
    let file = File::open(path)
        .map_err(|err| format!("failed to open ride file '{}': {err}", path.display()))?;
    let reader = BufReader::new(file);
    match format {
        InputFormat::Json => read_json_records(reader),
        InputFormat::Csv => read_csv_records(reader),
    }
}

pub fn read_json_records(reader: impl Read) -> Result<Vec<RideRecord>, Box<dyn std::error::Error>> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn read_csv_records(reader: impl Read) -> Result<Vec<RideRecord>, Box<dyn std::error::Error>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();
    for row in rdr.deserialize::<CsvRow>() {
        records.push(row?.into());
    }
    Ok(records)
}

/// Loads a heap configuration; absent fields keep their defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<HeapConfig, Box<dyn std::error::Error>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|err| format!("failed to open config '{}': {err}", path.display()))?;
    let config: HeapConfig = serde_json::from_reader(BufReader::new(file))?;
    config.validate()?;
    Ok(config)
}

/// Writes rides as a pretty JSON array of records.
pub fn write_rides_json<'a>(
    rides: impl IntoIterator<Item = &'a Ride>,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let records: Vec<RideRecord> = rides.into_iter().map(RideRecord::from).collect();
    write_records_json(&records, path)
}

pub fn write_records_json(
    records: &[RideRecord],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, records)?;
    Ok(())
}
