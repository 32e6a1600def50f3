//! # Reference Scenario Tests
//!
//! Replays small traces with hand-checked results through the full
//! reader → decomposition → engine → finalize path, both from memory and
//! from files on disk, and checks that every failure yields no counters.

use std::path::Path;

use csim_core::common::{ParseError, ParseErrorKind, SimError};
use csim_core::sim::Simulator;
use csim_core::{AccessOutcome, simulate_file};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{geometry, run_trace, stats, write_trace};

#[rstest]
// 16 sets, direct-mapped, 16-byte blocks: two different sets.
#[case((4, 4, 1), "L 10,1\nL 20,1\n", (0, 2, 0, 0, 0))]
// Load, store hit, load hit on one block.
#[case((4, 4, 1), "L 10,1\nS 10,1\nL 10,1\n", (2, 1, 0, 16, 0))]
// 4 sets, 2-way, 4-byte blocks: tags 0,1,2,0 all in set 0.
#[case((2, 2, 2), "L 0,1\nL 10,1\nL 20,1\nL 0,1\n", (0, 4, 2, 0, 0))]
// Third store evicts the dirty tag-0 line.
#[case((2, 2, 2), "S 0,1\nS 10,1\nS 20,1\n", (0, 3, 1, 8, 4))]
// Fully associative, 1-byte blocks: the load makes tag 1 MRU, so tag 2 is evicted.
#[case((0, 0, 4), "S 1,1\nS 2,1\nL 1,1\nS 3,1\nS 4,1\nS 5,1\n", (1, 5, 1, 4, 1))]
// Offsets within one block share a line.
#[case((1, 3, 1), "L 0,1\nL 7,1\nS 3,4\nL 8,1\n", (2, 2, 0, 8, 0))]
fn reference_scenarios(
    #[case] shape: (u32, u32, usize),
    #[case] trace: &str,
    #[case] expected: (u64, u64, u64, u64, u64),
) {
    let (s, b, e) = shape;
    let (h, m, ev, d, de) = expected;
    assert_eq!(run_trace(geometry(s, b, e), trace).unwrap(), stats(h, m, ev, d, de));
}

#[test]
fn empty_trace_reports_zeros() {
    assert_eq!(run_trace(geometry(4, 4, 1), "").unwrap(), stats(0, 0, 0, 0, 0));
}

#[test]
fn simulate_file_reads_from_disk() {
    let file = write_trace("S 0,1\nS 10,1\nS 20,1\n");
    let result = simulate_file(geometry(2, 2, 2), file.path()).unwrap();
    assert_eq!(result, stats(0, 3, 1, 8, 4));
    assert_eq!(
        result.to_string(),
        "hits:0 misses:3 evictions:1 dirty_bytes_in_cache:8 dirty_bytes_evicted:4"
    );
}

#[test]
fn observer_sees_every_access_in_order() {
    let mut sim = Simulator::new(geometry(0, 0, 2)).unwrap();
    let mut seen = Vec::new();
    sim.run_with("S 1,1\nL 2,1\nL 1,1\nL 3,1\n".as_bytes(), |record, outcome| {
        seen.push((record.addr, outcome));
    })
    .unwrap();
    assert_eq!(
        seen,
        vec![
            (1, AccessOutcome::Miss),
            (2, AccessOutcome::Miss),
            (1, AccessOutcome::Hit),
            (3, AccessOutcome::MissEviction { dirty: false }),
        ]
    );
    assert_eq!(sim.finish(), stats(1, 3, 1, 1, 0));
}

#[test]
fn successive_traces_share_cache_state() {
    let mut sim = Simulator::new(geometry(2, 2, 1)).unwrap();
    sim.run("S 0,1\n".as_bytes()).unwrap();
    sim.run("L 0,1\n".as_bytes()).unwrap();
    assert_eq!(sim.cache().stats().hits, 1);
    assert_eq!(sim.finish(), stats(1, 1, 0, 4, 0));
}

// ══════════════════════════════════════════════════════════
// Failures: every one aborts with an error and no counters.
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("L 10,1\nL 20,1", 2, ParseErrorKind::MissingNewline)]
#[case("M 10,1\n", 1, ParseErrorKind::InvalidOperation("M".into()))]
#[case("L 1gg,1\n", 1, ParseErrorKind::InvalidAddress("1gg".into()))]
#[case("L 1,0\n", 1, ParseErrorKind::SizeOutOfRange(0))]
#[case("S 0,1\nL 1,2048\n", 2, ParseErrorKind::SizeOutOfRange(2048))]
fn malformed_traces_abort(
    #[case] trace: &str,
    #[case] line: usize,
    #[case] kind: ParseErrorKind,
) {
    let file = write_trace(trace);
    match simulate_file(geometry(4, 4, 1), file.path()) {
        Err(SimError::Parse(err)) => assert_eq!(err, ParseError { line, kind }),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn missing_trace_file_is_an_io_error() {
    let path = Path::new("/nonexistent/dir/csim.trace");
    let err = simulate_file(geometry(1, 1, 1), path).unwrap_err();
    assert!(matches!(&err, SimError::Io { path: p, .. } if p == path));
    assert!(err.to_string().starts_with("Error opening '/nonexistent/dir/csim.trace': "));
}

#[test]
fn unallocatable_geometry_fails_before_reading() {
    let file = write_trace("L 0,1\n");
    let err = simulate_file(geometry(64, 0, 2), file.path()).unwrap_err();
    assert!(matches!(err, SimError::Allocation { ways: 2, .. }));
}
