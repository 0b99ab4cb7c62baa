//! Integration tests for `AntReader`
//!
//! The argument shape of every named operation is checked with a stub that
//! echoes what it received; output handling with a fake ant-tools.

#![cfg(unix)]

mod common;

use ant_tools_adapter::{
    AdapterOptions, AntReader, AntToolsError, ChrRange, LoadOptions, OutputMode, ProcessAdapter,
    Record,
};
use serde::Deserialize;
use serde_json::json;

use common::{adapter_for, init_logging};

async fn received_args(stream: ant_tools_adapter::RecordStream) -> Vec<String> {
    stream
        .collect_records()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.to_string())
        .collect()
}

#[test]
fn test_empty_path_is_rejected() {
    // No runtime here: construction must fail before anything could be spawned
    let adapter = ProcessAdapter::new(
        AdapterOptions::builder()
            .executable_path("/nonexistent/ant-tools")
            .build(),
    );

    let err = AntReader::new("", adapter.clone()).unwrap_err();
    assert!(matches!(err, AntToolsError::InvalidArgument(_)));
    assert!(err.to_string().starts_with("argument: "));

    assert!(matches!(
        AntReader::new("   ", adapter),
        Err(AntToolsError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn test_validate_arguments() {
    let reader = AntReader::new("x.ant", adapter_for("echo_args")).unwrap();
    assert_eq!(reader.path().as_str(), "x.ant");

    let stream = reader.validate().await.unwrap();
    assert_eq!(stream.mode(), OutputMode::Text);
    assert_eq!(received_args(stream).await, vec!["x.ant", "--validate"]);
}

#[tokio::test]
async fn test_print_stats_arguments() {
    let reader = AntReader::new("x.ant", adapter_for("echo_args")).unwrap();
    let stream = reader.print_stats().await.unwrap();
    assert_eq!(received_args(stream).await, vec!["x.ant", "--stats"]);
}

#[tokio::test]
async fn test_load_arguments() {
    let reader = AntReader::new("x.ant", adapter_for("echo_args")).unwrap();

    // Load decodes JSON; inspect the raw arguments through a text invocation instead
    let plain = reader
        .adapter()
        .invocation([reader.path().as_str()])
        .spawn()
        .await
        .unwrap();
    assert_eq!(received_args(plain).await, vec!["x.ant"]);

    let stream = reader.load().await.unwrap();
    assert_eq!(stream.mode(), OutputMode::Json);
    let err = stream.collect_records().await.unwrap_err();
    assert!(matches!(
        err,
        AntToolsError::MalformedRecord { ref line, .. } if line == "x.ant"
    ));
}

#[tokio::test]
async fn test_export_bed_arguments() {
    let reader = AntReader::new("x.ant", adapter_for("echo_args")).unwrap();
    let options = LoadOptions::builder()
        .range("chr7:5-50".parse::<ChrRange>().unwrap())
        .limit(10)
        .memory_limit_mb(512)
        .build()
        .unwrap();

    let stream = reader.export_bed(&options).await.unwrap();
    assert_eq!(
        received_args(stream).await,
        vec![
            "x.ant",
            "--range=chr7:5-50",
            "--limit=10",
            "--memlimit=512",
            "--bedout"
        ]
    );
}

#[tokio::test]
async fn test_load_decodes_records() {
    init_logging();

    #[derive(Debug, Deserialize, PartialEq)]
    struct Position {
        chromosome: String,
        position: u64,
    }

    let reader = AntReader::new("sample.ant", adapter_for("fake_ant_tools")).unwrap();
    let records = reader.load().await.unwrap().collect_records().await.unwrap();

    assert_eq!(
        records,
        vec![
            Record::Json(json!({"chromosome": "chr1", "position": 100})),
            Record::Json(json!({"chromosome": "chr1", "position": 200})),
        ]
    );

    let typed: Position = records[1].decode().unwrap();
    assert_eq!(
        typed,
        Position {
            chromosome: "chr1".to_string(),
            position: 200
        }
    );
}

#[tokio::test]
async fn test_validate_and_stats_output() {
    let reader = AntReader::new("sample.ant", adapter_for("fake_ant_tools")).unwrap();

    let validation = received_args(reader.validate().await.unwrap()).await;
    assert_eq!(validation, vec!["sample.ant: structure ok"]);

    let stats = received_args(reader.print_stats().await.unwrap()).await;
    assert_eq!(stats, vec!["version: 3", "", "records: 2"]);
}

#[tokio::test]
async fn test_reader_surfaces_missing_executable() {
    let reader = AntReader::new(
        "sample.ant",
        ProcessAdapter::new(
            AdapterOptions::builder()
                .executable_path("/nonexistent/ant-tools")
                .build(),
        ),
    )
    .unwrap();

    assert!(matches!(
        reader.validate().await,
        Err(AntToolsError::ExecutableNotFound { .. })
    ));
}
