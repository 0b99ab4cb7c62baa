//! Unit tests for configuration, ranges, load options, records and errors

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use ant_tools_adapter::{
    AdapterOptions, AntPath, AntToolsError, ChrRange, EmptyArgs, LoadOptions, OutputMode, Record,
    StderrMode, parse_record,
};
use serde_json::json;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_default_options() {
    let options = AdapterOptions::default();
    assert_eq!(options.executable_path, PathBuf::from("bin/ant-tools"));
    assert_eq!(options.output_mode, OutputMode::Text);
    assert_eq!(options.empty_args, EmptyArgs::PassThrough);
    assert_eq!(options.stderr, StderrMode::Inherit);
    assert!(!options.skip_blank_lines);
    assert!(options.timeout.is_none());
    assert_eq!(options.max_line_length, 1024 * 1024);
}

#[test]
fn test_options_from_lookup() {
    let options = AdapterOptions::from_lookup(lookup(&[
        ("ANT_TOOLS_BIN", "bin/x86_64/ant-tools"),
        ("ANT_TOOLS_OUTPUT", "JSON"),
        ("ANT_TOOLS_TIMEOUT_SECS", "30"),
    ]))
    .unwrap();

    assert_eq!(options.executable_path, PathBuf::from("bin/x86_64/ant-tools"));
    assert_eq!(options.output_mode, OutputMode::Json);
    assert_eq!(options.timeout, Some(Duration::from_secs(30)));

    let untouched = AdapterOptions::from_lookup(lookup(&[("ANT_TOOLS_BIN", "  ")])).unwrap();
    assert_eq!(untouched.executable_path, PathBuf::from("bin/ant-tools"));
}

#[test]
fn test_options_from_lookup_rejects_bad_values() {
    for pairs in [
        [("ANT_TOOLS_OUTPUT", "xml")],
        [("ANT_TOOLS_TIMEOUT_SECS", "soon")],
        [("ANT_TOOLS_TIMEOUT_SECS", "0")],
    ] {
        let err = AdapterOptions::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, AntToolsError::InvalidConfig(_)), "{pairs:?}");
        assert!(err.to_string().starts_with("config: "));
    }
}

#[test]
fn test_builder() {
    let options = AdapterOptions::builder()
        .executable_path("ant-tools")
        .base_dir("/opt/ant")
        .output_mode(OutputMode::Json)
        .skip_blank_lines(true)
        .empty_args(EmptyArgs::SingleEmptyArgument)
        .timeout(Duration::from_secs(5))
        .stderr(StderrMode::Capture)
        .max_line_length(4096)
        .env("ANT_SAMPLE", "hg19")
        .build();

    assert_eq!(options.executable_path, PathBuf::from("ant-tools"));
    assert_eq!(options.base_dir, Some(PathBuf::from("/opt/ant")));
    assert_eq!(options.output_mode, OutputMode::Json);
    assert!(options.skip_blank_lines);
    assert_eq!(options.empty_args, EmptyArgs::SingleEmptyArgument);
    assert_eq!(options.timeout, Some(Duration::from_secs(5)));
    assert_eq!(options.stderr, StderrMode::Capture);
    assert_eq!(options.max_line_length, 4096);
    assert_eq!(options.env.get("ANT_SAMPLE").map(String::as_str), Some("hg19"));
}

#[test]
fn test_chr_range_parsing() {
    let range: ChrRange = "chr1:100-200".parse().unwrap();
    assert_eq!(range, ChrRange::new("chr1", 100, 200).unwrap());
    assert_eq!(range.to_string(), "chr1:100-200");

    // Everything up to the last ':' is the chromosome
    let odd: ChrRange = "HLA-A*01:01:5-9".parse().unwrap();
    assert_eq!(odd.chromosome, "HLA-A*01:01");
    assert_eq!((odd.start, odd.stop), (5, 9));

    for bad in ["chr1", "chr1:100", "chr1:-5", "chr1:a-b", ":1-2", "chr1:9-3", "chr1:+1-2"] {
        assert!(
            matches!(bad.parse::<ChrRange>(), Err(AntToolsError::InvalidArgument(_))),
            "{bad} should not parse"
        );
    }
}

#[test]
fn test_load_options_args() {
    assert!(LoadOptions::default().to_args().is_empty());

    let options = LoadOptions::builder()
        .include_all(true)
        .limit(25)
        .memory_limit_mb(1024)
        .build()
        .unwrap();
    assert_eq!(options.to_args(), vec!["--all", "--limit=25", "--memlimit=1024"]);

    let options = LoadOptions::builder().bed("regions.bed").build().unwrap();
    assert_eq!(options.to_args(), vec!["--bed=regions.bed"]);
}

#[test]
fn test_load_options_conflicts() {
    let range = || ChrRange::new("chr2", 1, 10).unwrap();

    let cases = [
        LoadOptions::builder().range(range()).bed("a.bed"),
        LoadOptions::builder().range(range()).include_all(true),
        LoadOptions::builder().bed("a.bed").include_all(true),
        LoadOptions::builder().bed(""),
        LoadOptions::builder().limit(0),
        LoadOptions::builder().memory_limit_mb(0),
    ];

    for builder in cases {
        assert!(matches!(
            builder.build(),
            Err(AntToolsError::InvalidArgument(_))
        ));
    }
}

#[test]
fn test_ant_path() {
    let path = AntPath::new("data/sample.ant").unwrap();
    assert_eq!(path.as_str(), "data/sample.ant");
    assert_eq!(path.to_string(), "data/sample.ant");
    assert!(AntPath::try_from("").is_err());
    assert!(AntPath::try_from(String::from("x.ant")).is_ok());
}

#[test]
fn test_parse_record() {
    assert_eq!(
        parse_record("plain text".to_string(), OutputMode::Text, 1).unwrap(),
        Record::Line("plain text".to_string())
    );
    assert_eq!(
        parse_record(r#"{"a":1}"#.to_string(), OutputMode::Json, 1).unwrap(),
        Record::Json(json!({"a": 1}))
    );

    let err = parse_record("not-json".to_string(), OutputMode::Json, 7).unwrap_err();
    assert!(err.is_per_record());
    assert!(err.to_string().starts_with("decode: malformed record on line 7"));
}

#[test]
fn test_record_accessors() {
    let json = Record::Json(json!({"a": 1}));
    assert_eq!(json.to_string(), r#"{"a":1}"#);
    assert!(json.as_line().is_none());
    assert_eq!(json.clone().into_json(), Some(json!({"a": 1})));

    let line = Record::Line(r#"{"a":2}"#.to_string());
    assert_eq!(line.as_line(), Some(r#"{"a":2}"#));
    let decoded: HashMap<String, i64> = line.decode().unwrap();
    assert_eq!(decoded["a"], 2);

    let mismatch = json.decode::<Vec<u8>>().unwrap_err();
    match mismatch {
        AntToolsError::MalformedRecord {
            line_number, line, ..
        } => {
            assert_eq!(line_number, 0, "decoded records carry no line number");
            assert_eq!(line, r#"{"a":1}"#);
        }
        other => panic!("expected MalformedRecord, got {other:?}"),
    }
}

#[test]
fn test_output_mode_round_trip() {
    assert_eq!("text".parse::<OutputMode>().unwrap(), OutputMode::Text);
    assert_eq!(OutputMode::Json.to_string(), "json");
    assert!("yaml".parse::<OutputMode>().is_err());
}

#[test]
fn test_error_exit_codes() {
    assert_eq!(AntToolsError::non_zero_exit(Some(4), None).exit_code(), 4);
    assert_eq!(AntToolsError::non_zero_exit(None, None).exit_code(), 1);
    assert_eq!(
        AntToolsError::executable_not_found("bin/ant-tools", "missing").exit_code(),
        127
    );
    assert_eq!(AntToolsError::cancelled("stop").exit_code(), 130);
    assert_eq!(AntToolsError::invalid_argument("x").exit_code(), 1);

    assert_eq!(
        AntToolsError::non_zero_exit(None, None).to_string(),
        "exit: ant-tools was terminated by a signal"
    );
    assert!(!AntToolsError::cancelled("stop").is_per_record());
}
