use std::fs;
use std::io::Write;
use std::path::PathBuf;

use ride_heap::RideRecord;
use ride_heap_cli::cli::{run_generate, run_load, GenerateArgs};
use ride_heap_cli::input::read_json_records;
use ride_heap_cli::{LoadArgs, View};
use tempfile::{Builder, NamedTempFile, TempDir};

fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

fn load_args(input: PathBuf) -> LoadArgs {
    LoadArgs {
        input,
        config: None,
        capacity: None,
        no_merge: false,
        view: View::Array,
        sort: false,
        output: None,
    }
}

const CSV_RIDES: &str = "id,time,passengers,start_id,end_id\n\
    3,03:00:00,Passenger 3,3,4\n\
    1,01:00:00,Passenger 1,1,2\n\
    4,04:00:00,Passenger 4,4,5\n\
    2,02:00:00,Passenger 2,2,3\n\
    42,08:00:02,pass2,420,6969\n\
    44,08:05:00,p5;p6,420,6969\n\
    0,09:00:00,Nobody,1,2\n\
    1,10:00:00,Duplicate,7,8\n";

#[test]
fn csv_load_merges_and_reports_totals() {
    let input = temp_file(".csv", CSV_RIDES);
    let mut out = Vec::new();

    let summary = run_load(&load_args(input.path().to_path_buf()), &mut out).unwrap();

    assert_eq!(summary.read, 8);
    assert_eq!(summary.admitted, 5);
    assert_eq!(summary.merged, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.rejected, 1);

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("8 records: 5 admitted, 1 merged, 1 skipped, 1 rejected"));
    assert!(text.contains("1: Ride ID = 1, Ride Timestamp = 01:00:00"));
    assert!(text.contains("Ride ID = 42, Ride Timestamp = 08:05:00"));
}

#[test]
fn no_merge_keeps_rides_apart() {
    let input = temp_file(".csv", CSV_RIDES);
    let mut args = load_args(input.path().to_path_buf());
    args.no_merge = true;

    let summary = run_load(&args, &mut Vec::new()).unwrap();

    assert_eq!(summary.admitted, 6);
    assert_eq!(summary.merged, 0);
}

#[test]
fn sorted_load_writes_ascending_json() {
    let input = temp_file(".csv", CSV_RIDES);
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("sorted.json");
    let mut args = load_args(input.path().to_path_buf());
    args.sort = true;
    args.view = View::Times;
    args.output = Some(output.clone());

    let mut out = Vec::new();
    run_load(&args, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Sorted:"));

    let written = read_json_records(fs::File::open(&output).unwrap()).unwrap();
    let times: Vec<&str> = written.iter().map(|record| record.time.as_str()).collect();
    assert_eq!(
        times,
        ["01:00:00", "02:00:00", "03:00:00", "04:00:00", "08:05:00"]
    );
    assert_eq!(written[4].passengers.names(), ["pass2", "p5", "p6"]);
}

#[test]
fn config_file_and_capacity_flag_combine() {
    let input = temp_file(".csv", CSV_RIDES);
    let config = temp_file(".json", r#"{"consolidate": false}"#);
    let mut args = load_args(input.path().to_path_buf());
    args.config = Some(config.path().to_path_buf());
    args.capacity = Some(3);

    let summary = run_load(&args, &mut Vec::new()).unwrap();

    // Six valid distinct rides compete for three slots without merging.
    assert_eq!(summary.admitted, 3);
    assert_eq!(summary.merged, 0);
    assert_eq!(summary.rejected, 4);
}

#[test]
fn oversized_file_loads_in_batches() {
    let records: Vec<String> = (1..=30)
        .map(|id| format!("{id},{:02}:00:00,Passenger {id},{id},{}", id % 24, id + 1))
        .collect();
    let csv = format!("id,time,passengers,start_id,end_id\n{}\n", records.join("\n"));
    let input = temp_file(".csv", &csv);

    let summary = run_load(&load_args(input.path().to_path_buf()), &mut Vec::new()).unwrap();

    assert_eq!(summary.admitted, 20);
    assert_eq!(summary.rejected, 10);
}

#[test]
fn unknown_extension_is_an_error() {
    let input = temp_file(".txt", CSV_RIDES);
    assert!(run_load(&load_args(input.path().to_path_buf()), &mut Vec::new()).is_err());
}

#[test]
fn generated_file_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rides.json");
    let args = GenerateArgs {
        count: 15,
        seed: 3,
        locations: 2,
        output: Some(path.clone()),
    };
    run_generate(&args, &mut Vec::new()).unwrap();

    let records: Vec<RideRecord> = read_json_records(fs::File::open(&path).unwrap()).unwrap();
    assert_eq!(records.len(), 15);

    let summary = run_load(&load_args(path), &mut Vec::new()).unwrap();
    assert_eq!(summary.read, 15);
    assert_eq!(summary.accepted(), 15);
}

#[test]
fn generate_without_output_prints_json() {
    let args = GenerateArgs {
        count: 2,
        seed: 1,
        locations: 5,
        output: None,
    };
    let mut out = Vec::new();
    run_generate(&args, &mut out).unwrap();

    let records = read_json_records(out.as_slice()).unwrap();
    assert_eq!(records.len(), 2);
}
