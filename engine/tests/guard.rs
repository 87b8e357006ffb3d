use engine::guard::{GUARD_TIMEOUT_TICKS, GuardState, SubmitGuard};
use engine::session::SubmitWindow;

#[test]
fn opens_and_closes() {
    let mut guard = SubmitGuard::new();
    assert_eq!(guard.state(), GuardState::Closed);
    guard.open(3);
    assert_eq!(guard.state(), GuardState::Open { opened_at: 3 });
    guard.close();
    assert_eq!(guard.state(), GuardState::Closed);
}

#[test]
fn stays_open_inside_the_timeout_window() {
    let mut guard = SubmitGuard::new();
    guard.open(0);
    assert!(!guard.expire_if_stale(GUARD_TIMEOUT_TICKS - 1));
    assert!(guard.is_open());
}

#[test]
fn times_out_when_the_close_never_fires() {
    let mut guard = SubmitGuard::new();
    guard.open(0);
    assert!(guard.expire_if_stale(GUARD_TIMEOUT_TICKS));
    assert_eq!(guard.state(), GuardState::Closed);
}

#[test]
fn expiring_a_closed_guard_is_a_no_op() {
    let mut guard = SubmitGuard::new();
    assert!(!guard.expire_if_stale(1_000));
    guard.open(5);
    guard.close();
    assert!(!guard.expire_if_stale(1_000));
}

#[test]
fn reopen_replaces_the_stale_window() {
    let mut guard = SubmitGuard::with_timeout(10);
    guard.open(0);
    guard.open(8);
    // The replacement window counts from the second open.
    assert!(!guard.expire_if_stale(12));
    assert!(guard.expire_if_stale(18));
}

#[test]
fn window_timeout_disarms_the_roll_context() {
    let mut window = SubmitWindow::new();
    window.open(0, vec![true, true]);
    assert!(window.is_open());
    assert_eq!(window.ctx_mut().claim(), Some(true));

    window.tick(GUARD_TIMEOUT_TICKS);
    assert!(!window.is_open());
    assert_eq!(window.ctx_mut().claim(), None);
}

#[test]
fn window_close_resets_the_position_counter() {
    let mut window = SubmitWindow::new();
    window.open(0, vec![false]);
    assert_eq!(window.ctx_mut().claim(), Some(false));
    window.close();
    window.open(1, vec![true]);
    assert_eq!(window.ctx_mut().claim(), Some(true));
}
