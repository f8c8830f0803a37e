//! Toast lifetimes on a virtual timeline

use std::time::Duration;

use assert_matches::assert_matches;
use sheetconv::toast::{Toast, ToastKind, ToastQueue};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn visible_messages(queue: &ToastQueue) -> Vec<&str> {
    queue
        .toasts()
        .iter()
        .filter(|toast| toast.visible)
        .map(|toast| toast.message.as_str())
        .collect()
}

#[test]
fn test_staggered_toasts_expire_independently() {
    let mut queue = ToastQueue::default();
    queue.success("first");
    queue.advance(ms(1000));
    queue.error("second");

    queue.advance(ms(3000));
    assert_eq!(visible_messages(&queue), vec!["second"]);
    assert_eq!(queue.len(), 2);

    queue.advance(ms(300));
    assert_eq!(queue.len(), 1);

    queue.advance(ms(1000));
    assert!(queue.is_empty());
}

#[test]
fn test_ids_are_never_reused() {
    let mut queue = ToastQueue::default();
    let a = queue.success("a");
    queue.clear();
    let b = queue.success("b");
    queue.advance(ms(10_000));
    let c = queue.error("c");

    assert!(a < b && b < c);
    assert_eq!(c.get(), 3);
}

#[test]
fn test_dismissed_toast_ignores_its_stale_hide_timer() {
    let mut queue = ToastQueue::default();
    let keep = queue.success("keep");
    let gone = queue.success("gone");

    queue.dismiss(gone);
    queue.advance(ms(300));
    assert_eq!(queue.toasts().len(), 1);
    assert_matches!(queue.get(keep), Some(Toast { visible: true, .. }));

    // The cancelled 4000ms hide of the dismissed toast must not disturb anything
    queue.advance(ms(3700));
    assert_matches!(queue.get(keep), Some(Toast { visible: false, .. }));
    assert!(queue.get(gone).is_none());
}

#[test]
fn test_clear_drops_pending_timers() {
    let mut queue = ToastQueue::default();
    let old = queue.error("old");
    queue.clear();
    queue.advance(ms(500));
    let fresh = queue.success("fresh");

    // Past the old entry's hide (4000ms) and removal (4300ms) times
    queue.advance(ms(3950));
    assert!(queue.get(old).is_none());
    assert_eq!(queue.len(), 1);
    assert_matches!(
        queue.get(fresh),
        Some(Toast {
            visible: true,
            kind: ToastKind::Success,
            ..
        })
    );
}

#[test]
fn test_drain_new_announces_each_toast_once() {
    let mut queue = ToastQueue::default();
    queue.success("one");
    queue.error("two");

    let first: Vec<String> = queue.drain_new().into_iter().map(|t| t.message).collect();
    assert_eq!(first, vec!["one", "two"]);
    assert!(queue.drain_new().is_empty());

    queue.clear();
    queue.success("three");
    let second: Vec<String> = queue.drain_new().into_iter().map(|t| t.message).collect();
    assert_eq!(second, vec!["three"]);
}

#[test]
fn test_custom_timing() {
    let mut queue = ToastQueue::new(ms(100), ms(50));
    queue.success("quick");
    queue.advance(ms(100));
    assert!(visible_messages(&queue).is_empty());
    queue.advance(ms(50));
    assert!(queue.is_empty());
}
