#![allow(clippy::unwrap_used, clippy::expect_used)]

use apiwatch_core::core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND,
};
use apiwatch_core::errors::{ExError, ExErrorKind, WatchError};
use apiwatch_core::logging_facility::test_capture::init_test_capture;
use apiwatch_core::{log_op_end, log_op_error, log_op_start};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, doc_url = "https://api.test/docs");

    let starts = capture.find(op_name, EVENT_START);
    assert_eq!(starts.len(), 1, "Should have exactly one start event");
    assert_eq!(starts[0].field("doc_url"), Some("https://api.test/docs"));
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42u64);

    let ends = capture.find(op_name, EVENT_END);
    assert_eq!(ends.len(), 1, "Should have exactly one end event");
    assert_eq!(ends[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = WatchError::FetchStatus {
        url: "https://api.test/docs".to_string(),
        status: 502,
    };
    log_op_error!(op_name, err, duration_ms = 10u64);

    let errors = capture.find(op_name, EVENT_END_ERROR);
    assert_eq!(errors.len(), 1, "Should have exactly one error event");
    assert_eq!(errors[0].field(FIELD_ERR_CODE), Some("ERR_FETCH"));
    assert_eq!(errors[0].field(FIELD_ERR_KIND), Some("Fetch"));
}

#[test]
fn test_log_op_error_accepts_ex_error() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_4";

    let err = ExError::new(ExErrorKind::Notify).with_message("webhook said no");
    log_op_error!(op_name, err, duration_ms = 1u64);

    let errors = capture.find(op_name, EVENT_END_ERROR);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].field("err.message").unwrap().contains("webhook said no"));
}

#[test]
fn test_component_is_module_path() {
    let capture = init_test_capture();
    let op_name = "test_component_unique_5";

    log_op_start!(op_name);

    let starts = capture.find(op_name, EVENT_START);
    assert_eq!(starts.len(), 1);
    assert_eq!(
        starts[0].component.as_deref(),
        Some("logging_facility_tests")
    );
}
