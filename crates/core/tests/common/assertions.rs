//! Custom assertion helpers over controller event streams.
#![allow(dead_code)]

use rk_protocol::ipc::Event;
use rk_protocol::run_models::RunStatus;

/// Stage ids in the order their `StageStarted` events were sent.
pub fn stage_ids(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::StageStarted { stage_id, .. } => Some(stage_id.clone()),
            _ => None,
        })
        .collect()
}

/// Progress values reported by `StageStarted` events, in order.
pub fn stage_progress(events: &[Event]) -> Vec<u8> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::StageStarted { progress, .. } => Some(*progress),
            _ => None,
        })
        .collect()
}

/// Statuses reported by `RunStatusUpdate` events, in order.
pub fn status_updates(events: &[Event]) -> Vec<RunStatus> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::RunStatusUpdate { status, .. } => Some(*status),
            _ => None,
        })
        .collect()
}

/// Assert that `values` never decreases.
pub fn assert_monotonic(values: &[u8]) {
    for pair in values.windows(2) {
        assert!(
            pair[0] <= pair[1],
            "Progress went backwards: {} -> {} in {:?}",
            pair[0],
            pair[1],
            values
        );
    }
}

/// Assert that the stream starts with `RunStarted` and ends with exactly
/// one terminal event.
pub fn assert_event_sequence(events: &[Event]) {
    if events.is_empty() {
        panic!("Event sequence is empty");
    }

    assert!(
        matches!(events[0], Event::RunStarted { .. }),
        "First event should be RunStarted, got: {:?}",
        events[0]
    );

    let terminal = events
        .iter()
        .filter(|e| matches!(e, Event::RunCompleted { .. } | Event::RunError { .. }))
        .count();
    assert_eq!(terminal, 1, "Expected exactly one terminal event in {:?}", events);

    let last = events.last().unwrap();
    assert!(
        matches!(last, Event::RunCompleted { .. } | Event::RunError { .. }),
        "Last event should be RunCompleted or RunError, got: {:?}",
        last
    );
}

/// Assert that a string contains a substring (case-insensitive).
pub fn assert_contains_ci(haystack: &str, needle: &str) {
    let haystack_lower = haystack.to_lowercase();
    let needle_lower = needle.to_lowercase();
    assert!(
        haystack_lower.contains(&needle_lower),
        "Expected '{}' to contain '{}' (case-insensitive)",
        haystack,
        needle
    );
}
