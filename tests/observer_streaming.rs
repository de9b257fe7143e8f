// tests/observer_streaming.rs
//
// Attach-timing matrix for log observers: before output, mid-run, after
// completion, plus detach isolation and unknown identities.

mod common;
use crate::common::init_tracing;

use std::time::Duration;

use jobcast::errors::JobcastError;
use jobcast::job::{JobId, JobManager, JobStatus};
use jobcast::stream::{LogEvent, LogObserver};
use jobcast_test_utils::builders::sh;
use jobcast_test_utils::with_timeout;

async fn drain_lines(observer: &mut LogObserver) -> Vec<String> {
    let mut lines = Vec::new();
    while let Some(event) = observer.recv().await {
        if let LogEvent::Line(line) = event {
            lines.push(line.to_string());
        }
    }
    lines
}

/// Poll until the job reaches a terminal state.
async fn wait_terminal(manager: &JobManager, id: JobId) -> JobStatus {
    with_timeout(async {
        loop {
            let snapshot = manager.get(id).expect("job must exist");
            if snapshot.status.is_terminal() {
                return snapshot.status;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
}

#[tokio::test]
async fn attaching_after_completion_replays_the_full_backlog() {
    init_tracing();

    let manager = JobManager::new();
    let id = manager.submit(sh("echo one; echo two")).expect("submit");

    assert_eq!(wait_terminal(&manager, id).await, JobStatus::Success);

    // The buffer is closed; a late observer still sees everything, then
    // end-of-stream immediately.
    let mut observer = manager.attach(id).expect("attach");
    let lines = with_timeout(drain_lines(&mut observer)).await;
    assert_eq!(lines, vec!["one".to_string(), "two".to_string()]);
}

#[tokio::test]
async fn observers_attached_at_different_times_see_identical_order() {
    init_tracing();

    let manager = JobManager::new();
    let id = manager
        .submit(sh("for i in 1 2 3 4 5; do echo line $i; sleep 0.05; done"))
        .expect("submit");

    // Early observer streams live.
    let mut early = manager.attach(id).expect("attach early");
    let early_lines = with_timeout(drain_lines(&mut early)).await;

    // Late observer replays from the closed buffer.
    let mut late = manager.attach(id).expect("attach late");
    let late_lines = with_timeout(drain_lines(&mut late)).await;

    assert_eq!(early_lines.len(), 5);
    assert_eq!(early_lines, late_lines);
}

#[tokio::test]
async fn detaching_mid_stream_affects_nothing_else() {
    init_tracing();

    let manager = JobManager::new();
    let id = manager
        .submit(sh("echo first; sleep 0.2; echo second; sleep 0.2; echo third"))
        .expect("submit");

    // Simulated disconnect: read one event, then drop the observer.
    {
        let mut doomed = manager.attach(id).expect("attach");
        let first = with_timeout(doomed.recv()).await;
        assert_eq!(
            first,
            Some(LogEvent::Line("first".into())),
            "expected the first line"
        );
    }

    // The runner keeps going, and a fresh observer still gets the full
    // backlog from the beginning.
    assert_eq!(wait_terminal(&manager, id).await, JobStatus::Success);

    let mut fresh = manager.attach(id).expect("attach");
    let lines = with_timeout(drain_lines(&mut fresh)).await;
    assert_eq!(
        lines,
        vec![
            "first".to_string(),
            "second".to_string(),
            "third".to_string()
        ]
    );
}

#[tokio::test]
async fn a_slow_observer_does_not_hold_up_a_fast_one() {
    init_tracing();

    let manager = JobManager::new();
    let id = manager
        .submit(sh("echo a; echo b; echo c"))
        .expect("submit");

    // The slow observer never reads at all.
    let _slow = manager.attach(id).expect("attach slow");

    let mut fast = manager.attach(id).expect("attach fast");
    let lines = with_timeout(drain_lines(&mut fast)).await;
    assert_eq!(
        lines,
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    );
}

#[tokio::test]
async fn unknown_identity_errors_instead_of_hanging() {
    init_tracing();

    let manager = JobManager::new();
    let bogus = uuid::Uuid::new_v4();

    assert!(matches!(
        manager.attach(bogus),
        Err(JobcastError::UnknownJob(id)) if id == bogus
    ));
    assert!(matches!(
        manager.get(bogus),
        Err(JobcastError::UnknownJob(id)) if id == bogus
    ));
}
