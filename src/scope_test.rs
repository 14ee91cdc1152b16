use super::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::time::{Duration, sleep};

#[tokio::test]
async fn finished_tasks_are_pruned() {
    let scope = TaskScope::new();
    scope.spawn(async {});
    sleep(Duration::from_millis(20)).await;
    assert_eq!(scope.active(), 0);
}

#[tokio::test(start_paused = true)]
async fn shutdown_aborts_pending_tasks() {
    let scope = TaskScope::new();
    let fired = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&fired);
    scope.spawn(async move {
        sleep(Duration::from_secs(5)).await;
        flag.store(true, Ordering::SeqCst);
    });
    assert_eq!(scope.active(), 1);

    scope.shutdown();
    sleep(Duration::from_secs(10)).await;

    assert!(!fired.load(Ordering::SeqCst));
    assert_eq!(scope.active(), 0);
}

#[tokio::test(start_paused = true)]
async fn drop_aborts_pending_tasks() {
    let fired = Arc::new(AtomicBool::new(false));
    {
        let scope = TaskScope::new();
        let flag = Arc::clone(&fired);
        scope.spawn(async move {
            sleep(Duration::from_secs(1)).await;
            flag.store(true, Ordering::SeqCst);
        });
    }
    sleep(Duration::from_secs(2)).await;
    assert!(!fired.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn tasks_run_to_completion_while_scope_lives() {
    let scope = TaskScope::new();
    let fired = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&fired);
    scope.spawn(async move {
        sleep(Duration::from_secs(1)).await;
        flag.store(true, Ordering::SeqCst);
    });
    sleep(Duration::from_secs(2)).await;
    assert!(fired.load(Ordering::SeqCst));
}
