//! Unit tests for the assertion engine.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

use std::cell::Cell;

#[test]
fn that_passes_on_true() {
    assert!(that(1 > 0, "is greater than 0").is_ok());
}

#[test]
fn that_fails_with_message() {
    let failure = that(false, "should hold").unwrap_err();
    assert_eq!(failure.message, "should hold");
    assert_eq!(failure.expected, None);
    assert_eq!(failure.actual, None);
}

#[test]
fn lazy_message_not_built_on_passing_path() {
    let built = Cell::new(false);
    let result = that_with(true, || {
        built.set(true);
        "never rendered".to_string()
    });
    assert!(result.is_ok());
    assert!(!built.get());
}

#[test]
fn lazy_message_built_on_failure() {
    let failure = that_with(false, || format!("sum was {}", 2 + 2)).unwrap_err();
    assert_eq!(failure.message, "sum was 4");
}

#[test]
fn eq_records_expected_and_actual() {
    assert!(eq(&2, &2, "equal").is_ok());

    let failure = eq(&4, &5, "4 is 2 times 2").unwrap_err();
    assert_eq!(failure.expected.as_deref(), Some("4"));
    assert_eq!(failure.actual.as_deref(), Some("5"));
}

#[test]
fn ne_rejects_equal_values() {
    assert!(ne(&0, &1, "result cannot be 0").is_ok());
    assert!(ne(&0, &0, "result cannot be 0").is_err());
}

#[test]
fn identity_is_distinct_from_equality() {
    // Two distinct allocations holding equal values.
    let a = Box::new(1);
    let b = Box::new(1);

    assert!(eq(&*a, &*b, "values are equal").is_ok());
    assert!(same(&*a, &*b, "same allocation").is_err());
    assert!(same(&*a, &*a, "same allocation").is_ok());
    assert!(not_same(&*a, &*b, "different allocations").is_ok());
}

#[test]
fn is_none_reports_the_contained_value() {
    assert!(is_none::<i32>(None, "should be absent").is_ok());

    let failure = is_none(Some(&7), "should be absent").unwrap_err();
    assert_eq!(failure.actual.as_deref(), Some("Some(7)"));
}

#[test]
fn fail_always_fails() {
    let failure = fail("development is not completed").unwrap_err();
    assert_eq!(failure.message, "development is not completed");
}

#[test]
fn err_yields_the_error_value() {
    let error = err(Err::<i32, _>("boom"), "expected an error").unwrap();
    assert_eq!(error, "boom");

    let failure = err(Ok::<_, String>(3), "expected an error").unwrap_err();
    assert_eq!(failure.actual.as_deref(), Some("Ok(3)"));
}

#[test]
fn ok_yields_the_value() {
    let value = ok(Ok::<_, String>(3), "expected no error").unwrap();
    assert_eq!(value, 3);

    let failure = ok(Err::<i32, _>("broken"), "expected no error").unwrap_err();
    assert_eq!(failure.actual.as_deref(), Some("broken"));
}

#[test]
fn iter_eq_reports_the_mismatch_position() {
    let one = vec!["Java", "JUnit", "Test"];
    let two = vec!["Java", "Unit", "Test"];

    let failure = iter_eq(one, two, "lists should match").unwrap_err();
    assert!(failure.message.contains("position 1"), "{}", failure.message);
}

#[test]
fn iter_eq_reports_length_differences() {
    let failure = iter_eq(vec![1, 2, 3], vec![1, 2], "lists should match").unwrap_err();
    assert!(failure.message.contains("lengths differ"), "{}", failure.message);
}

#[test]
fn display_includes_values_when_present() {
    let failure = eq(&1, &2, "off by one").unwrap_err();
    assert_eq!(failure.to_string(), "off by one (expected 1, got 2)");
}
