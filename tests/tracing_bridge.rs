#![cfg(feature = "stackdriver")]

use std::sync::Arc;

use logr::init::{init_tracing, InitError};
use logr::noop_sink::NoopSink;
use logr::sink::MemorySink;
use logr::stackdriver::Stackdriver;
use serde_json::{json, Value};

// The global subscriber can only be installed once per process, so the
// whole bridge is exercised from a single test.
#[test]
fn tracing_events_reach_the_global_backend() {
    let sink = Arc::new(MemorySink::new());
    init_tracing(Stackdriver::with_sink("billing", "1.2.0", sink.clone())).unwrap();

    tracing::info!(items = 42, "processed");
    tracing::warn!("slow response");
    let expected_line = line!() + 1;
    tracing::error!(reason = "timeout", "failed to connect");

    let lines: Vec<Value> = sink
        .take()
        .iter()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);

    assert_eq!(lines[0]["severity"], "INFO");
    assert_eq!(lines[0]["message"], "processed items=42");
    assert!(lines[0].get("context").is_none());

    assert_eq!(lines[1]["severity"], "INFO");
    assert_eq!(lines[1]["message"], "slow response");

    assert_eq!(lines[2]["severity"], "ERROR");
    assert_eq!(lines[2]["message"], "failed to connect reason=timeout");
    let location = &lines[2]["context"]["reportLocation"];
    assert!(location["filePath"].as_str().unwrap().ends_with("tracing_bridge.rs"));
    assert_eq!(location["lineNumber"], json!(expected_line));
    assert!(!lines[2]["stacktrace"].as_str().unwrap().is_empty());

    let second = init_tracing(Stackdriver::with_sink("other", "0.0.1", Arc::new(NoopSink)));
    assert!(matches!(second, Err(InitError::AlreadyInitialized(_))));
}
