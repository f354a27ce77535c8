//! Scenario tests for the status aggregator's hook protocol.
//!
//! Each test counts hook invocations through shared counters and checks
//! them after every report.

use std::cell::RefCell;
use std::rc::Rc;

use huebot::{Severity, StatusAggregator};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Counts {
    failure: u32,
    warning: u32,
    normal: u32,
    new_failure: Vec<String>,
    new_warning: Vec<String>,
}

fn counted() -> (StatusAggregator<String>, Rc<RefCell<Counts>>) {
    let counts = Rc::new(RefCell::new(Counts::default()));
    let mut agg = StatusAggregator::new();

    let c = Rc::clone(&counts);
    agg.set_on_failure(move || {
        c.borrow_mut().failure += 1;
        Ok(())
    });
    let c = Rc::clone(&counts);
    agg.set_on_warning(move || {
        c.borrow_mut().warning += 1;
        Ok(())
    });
    let c = Rc::clone(&counts);
    agg.set_on_normal(move || {
        c.borrow_mut().normal += 1;
        Ok(())
    });
    let c = Rc::clone(&counts);
    agg.set_on_new_failure(move |k: &String| {
        c.borrow_mut().new_failure.push(k.clone());
        Ok(())
    });
    let c = Rc::clone(&counts);
    agg.set_on_new_warning(move |k: &String| {
        c.borrow_mut().new_warning.push(k.clone());
        Ok(())
    });

    (agg, counts)
}

fn key(k: &str) -> String {
    k.to_string()
}

fn assert_partition(agg: &StatusAggregator<String>) {
    let levels = [agg.is_failure(), agg.is_warning(), agg.is_normal()];
    assert_eq!(
        levels.iter().filter(|b| **b).count(),
        1,
        "exactly one aggregate predicate must hold, got {:?}",
        levels
    );
}

#[test]
fn failures_on_two_channels_then_recovery() {
    let (mut agg, counts) = counted();
    assert!(agg.is_normal());

    // a fails: first failure lights up.
    agg.report_failure(key("a"));
    assert_partition(&agg);
    assert!(agg.is_failure());
    assert_eq!(counts.borrow().failure, 1);
    assert_eq!(counts.borrow().new_failure, vec![key("a")]);

    // b fails too: already failing, only the per-key hook fires.
    agg.report_failure(key("b"));
    assert_partition(&agg);
    assert!(agg.is_failure());
    assert_eq!(counts.borrow().failure, 1);
    assert_eq!(counts.borrow().new_failure, vec![key("a"), key("b")]);

    // a recovers: b still failing, nothing fires.
    let before = counts.borrow().clone();
    agg.report_normal(&key("a"));
    assert_partition(&agg);
    assert!(agg.is_failure());
    assert_eq!(*counts.borrow(), before);

    // b recovers: back to normal exactly once.
    agg.report_normal(&key("b"));
    assert_partition(&agg);
    assert!(agg.is_normal());
    assert_eq!(counts.borrow().normal, 1);
    assert_eq!(counts.borrow().warning, 0);
}

#[test]
fn warning_then_failure_on_same_channel() {
    let (mut agg, counts) = counted();

    agg.report_warning(key("x"));
    assert!(agg.is_warning());
    assert_eq!(counts.borrow().warning, 1);

    agg.report_failure(key("x"));
    assert_partition(&agg);
    assert!(agg.is_failure());
    assert!(!agg.is_warning());
    assert_eq!(counts.borrow().failure, 1);
    assert_eq!(counts.borrow().warning, 1, "warning must not re-fire");
    assert_eq!(agg.warning().count(), 0, "x must leave the warning set");
    assert_eq!(agg.severity_of(&key("x")), Severity::Failure);
}

#[test]
fn failure_then_warning_on_same_channel() {
    let (mut agg, counts) = counted();

    agg.report_failure(key("x"));
    agg.report_warning(key("x"));

    assert_partition(&agg);
    assert!(agg.is_warning());
    assert_eq!(agg.failing().count(), 0);
    assert_eq!(agg.warning().collect::<Vec<_>>(), vec![&key("x")]);

    let c = counts.borrow();
    assert_eq!(c.failure, 1);
    assert_eq!(c.warning, 1);
    assert_eq!(c.normal, 0, "no normal dip happened");
    assert_eq!(c.new_warning, vec![key("x")]);
}

#[test]
fn repeated_failure_reports_are_idempotent() {
    let (mut agg, counts) = counted();

    agg.report_failure(key("k"));
    let after_one = (agg.tracked(), counts.borrow().clone());
    agg.report_failure(key("k"));
    let after_two = (agg.tracked(), counts.borrow().clone());

    assert_eq!(after_one, after_two);
    assert_eq!(counts.borrow().new_failure, vec![key("k")]);
}

#[test]
fn independent_aggregators_do_not_share_state() {
    let (mut first, first_counts) = counted();
    let (second, second_counts) = counted();

    first.report_failure(key("a"));

    assert!(first.is_failure());
    assert!(second.is_normal());
    assert_eq!(first_counts.borrow().failure, 1);
    assert_eq!(second_counts.borrow().failure, 0);
}
