use rdb_json::{
    from_reader, from_str, to_string, to_string_pretty, to_string_with_options, Document,
    JsonOptions, Scalar,
};
use std::io::{Cursor, Write};
use std::process::{Command, Stdio};

const EXPERIMENT: &str = r#"#start data file format 4
#pair "wall start date" "Mon Jan  1 10:00:00 2024"
#pair "wall start time" 1.704103200e+09
#pair "problem" "korf100/12"
#pair "seed" 0042
#altcols "incumbent" "incumbent num" "incumbent nodes expanded" "incumbent cost"
#altrow "incumbent" 1 77 62.5
#altrow "incumbent" 2 15065 58
#altrow "incumbent" 3 45397 57
#pair "total nodes expanded" 45397
#pair "wall finish date" "Mon Jan  1 10:00:03 2024"
#end data file format 4
"#;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_rdb-to-json"))
}

#[test]
fn test_realistic_experiment() {
    let doc = from_str(EXPERIMENT).unwrap();

    let keys: Vec<_> = doc.pairs().keys().cloned().collect();
    assert_eq!(
        keys,
        vec![
            "wall start date",
            "wall start time",
            "problem",
            "seed",
            "total nodes expanded",
            "wall finish date",
        ]
    );
    assert_eq!(doc.pair("wall start time"), Some(&Scalar::Float(1.7041032e9)));
    assert_eq!(doc.pair("seed"), Some(&Scalar::Integer(42)));

    let table = doc.table("incumbent").unwrap();
    assert_eq!(table.row_count(), 3);
    assert_eq!(
        table.row(0),
        Some(vec![
            &Scalar::Integer(1),
            &Scalar::Integer(77),
            &Scalar::Float(62.5)
        ])
    );
    assert_eq!(
        table.column("incumbent cost"),
        Some(&[Scalar::Float(62.5), Scalar::Integer(58), Scalar::Integer(57)][..])
    );
}

#[test]
fn test_json_round_trip() {
    let doc = from_str(EXPERIMENT).unwrap();
    let json = to_string(&doc).unwrap();
    let back: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(doc, back);

    let pretty = to_string_pretty(&doc).unwrap();
    let back: Document = serde_json::from_str(&pretty).unwrap();
    assert_eq!(doc, back);
}

#[test]
fn test_custom_indent() {
    let doc = from_str("#pair a 1").unwrap();
    let json = to_string_with_options(&doc, &JsonOptions::pretty().with_indent(4)).unwrap();
    assert_eq!(
        json,
        "{\n    \"format\": null,\n    \"pairs\": {\n        \"a\": 1\n    },\n    \"tables\": []\n}"
    );

    let compact = to_string_with_options(&doc, &JsonOptions::new().with_indent(4)).unwrap();
    assert_eq!(compact, r#"{"format":null,"pairs":{"a":1},"tables":[]}"#);
}

#[test]
fn test_reader_stops_at_first_fatal_error() {
    let input = "#altcols t a\n#altrow t 1 2\n#altrow nowhere 1\n";
    let err = from_reader(Cursor::new(input)).unwrap_err();
    assert_eq!(err.line(), Some(2));
}

#[test]
fn test_cli_reads_file_and_prints_compact_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(EXPERIMENT.as_bytes()).unwrap();

    let output = bin().arg(file.path()).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains('\n'));
    let expected = to_string(&from_str(EXPERIMENT).unwrap()).unwrap();
    assert_eq!(stdout, expected);
}

#[test]
fn test_cli_reads_stdin_and_pretty_prints() {
    let mut child = bin()
        .arg("--pretty")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"#pair k v\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "{\n  \"format\": null,\n  \"pairs\": {\n    \"k\": \"v\"\n  },\n  \"tables\": []\n}\n"
    );
}

#[test]
fn test_cli_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("run.rdb");
    let target = dir.path().join("out").join("run.json");
    std::fs::write(&input, EXPERIMENT).unwrap();

    let output = bin()
        .arg(&input)
        .arg("-o")
        .arg(&target)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let written = std::fs::read_to_string(&target).unwrap();
    let doc: Document = serde_json::from_str(&written).unwrap();
    assert_eq!(doc, from_str(EXPERIMENT).unwrap());
}

#[test]
fn test_cli_parse_error_produces_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.rdb");
    let target = dir.path().join("bad.json");
    std::fs::write(&input, "#altcols t a b\n#altrow t 1\n").unwrap();

    let output = bin().arg(&input).arg("-o").arg(&target).output().unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!target.exists());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error while parsing RDB input"));
    assert!(stderr.contains("expected 2"));
}

#[test]
fn test_cli_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.rdb");

    let output = bin().arg(&missing).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to open RDB file"));
}
