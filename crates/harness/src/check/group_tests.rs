//! Unit tests for the assertion group aggregator.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]

use super::*;

use crate::check;

#[test]
fn empty_group_passes() {
    assert!(Group::named("empty").run().is_ok());
}

#[test]
fn all_passing_checks_pass() {
    let result = Group::named("grouped assertions")
        .check(|| check::eq(&4, &(2 * 2), "4 is 2 times 2"))
        .check(|| check::eq("ava", &"JAVA".to_lowercase()[1..], "lowercase tail"))
        .check(|| check::that(5 > 4, "5 is greater than 4"))
        .run();
    assert!(result.is_ok());
}

#[test]
fn every_failing_check_is_reported() {
    let numbers = [0, 1, 2, 3, 4];
    let failure = Group::named("numbers")
        .check(move || check::eq(&numbers[0], &1, "first element"))
        .check(move || check::eq(&numbers[3], &3, "fourth element"))
        .check(move || check::eq(&numbers[4], &4, "fifth element"))
        .run()
        .unwrap_err();

    // Only the first check is wrong; the group must still have run all
    // three and report exactly that one.
    assert_eq!(failure.total, 3);
    assert_eq!(failure.failures.len(), 1);
    assert_eq!(failure.failures[0].index, Some(0));
    assert_eq!(failure.failures[0].group.as_deref(), Some("numbers"));
}

#[test]
fn failures_keep_their_check_index() {
    let failure = Group::named("mixed")
        .check(|| check::fail("first"))
        .check(|| Ok(()))
        .check(|| check::fail("third"))
        .run()
        .unwrap_err();

    let indices: Vec<_> = failure.failures.iter().map(|f| f.index).collect();
    assert_eq!(indices, vec![Some(0), Some(2)]);
}

#[test]
fn early_failure_never_hides_later_checks() {
    // Every check fails; the count must never collapse below the number
    // of designed failures.
    let failure = Group::named("all-fail")
        .check(|| check::fail("a"))
        .check(|| check::fail("b"))
        .check(|| check::fail("c"))
        .run()
        .unwrap_err();
    assert_eq!(failure.failures.len(), 3);
}

#[test]
fn panicking_check_is_recorded_not_propagated() {
    let out_of_range = vec![1, 2, 3];
    let failure = Group::named("faulty")
        .check(move || check::eq(&out_of_range[9], &1, "index out of range"))
        .check(|| check::that(true, "still runs"))
        .run()
        .unwrap_err();

    assert_eq!(failure.total, 2);
    assert_eq!(failure.failures.len(), 1);
    assert!(failure.failures[0].message.contains("check panicked"));
    assert_eq!(failure.failures[0].index, Some(0));
}

#[test]
fn display_summarizes_the_group() {
    let failure = Group::named("numbers").check(|| check::fail("x")).run().unwrap_err();
    assert_eq!(failure.to_string(), "group `numbers`: 1 of 1 checks failed");
}
