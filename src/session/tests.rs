use super::*;
use std::sync::mpsc;
use std::time::Duration;

#[test]
fn new_timer_is_idle_and_full() {
    let timer = SessionTimer::new(300);
    assert_eq!(timer.state(), SessionState::Idle);
    assert!(!timer.is_active());
    assert_eq!(timer.remaining_secs(), 300);
    assert_eq!(timer.serial(), 0);
}

#[test]
fn start_sets_remaining_to_full_duration() {
    let mut timer = SessionTimer::new(300);
    assert!(timer.start());
    assert_eq!(timer.state(), SessionState::Running);
    assert_eq!(timer.remaining_secs(), 300);
    assert_eq!(timer.display(), "05:00");
}

#[test]
fn start_while_running_is_inert() {
    let mut timer = SessionTimer::new(300);
    timer.start();
    for _ in 0..10 {
        timer.tick();
    }
    let serial = timer.serial();

    assert!(!timer.start());
    assert_eq!(timer.remaining_secs(), 290);
    assert_eq!(timer.serial(), serial);
    assert!(timer.is_active());
}

#[test]
fn three_hundred_ticks_complete_exactly_once() {
    let mut timer = SessionTimer::new(300);
    timer.start();

    let mut completions = 0;
    for _ in 0..300 {
        if timer.tick() == TickOutcome::Completed {
            completions += 1;
        }
    }

    assert_eq!(completions, 1);
    assert_eq!(timer.state(), SessionState::Idle);
    assert_eq!(timer.remaining_secs(), 0);
    assert_eq!(timer.display(), "00:00");

    // Once idle, further ticks do nothing.
    assert_eq!(timer.tick(), TickOutcome::Idle);
    assert_eq!(timer.remaining_secs(), 0);
}

#[test]
fn tick_counts_down_by_one() {
    let mut timer = SessionTimer::new(300);
    timer.start();
    assert_eq!(timer.tick(), TickOutcome::Counting(299));
    assert_eq!(timer.tick(), TickOutcome::Counting(298));
    assert_eq!(timer.display(), "04:58");
}

#[test]
fn tick_while_idle_is_a_noop() {
    let mut timer = SessionTimer::new(300);
    assert_eq!(timer.tick(), TickOutcome::Idle);
    assert_eq!(timer.remaining_secs(), 300);
}

#[test]
fn restart_after_completion_gets_a_new_serial() {
    let mut timer = SessionTimer::new(2);
    timer.start();
    let first = timer.serial();
    timer.tick();
    assert_eq!(timer.tick(), TickOutcome::Completed);

    assert!(timer.start());
    assert_eq!(timer.remaining_secs(), 2);
    assert!(timer.serial() > first);
}

#[test]
fn one_second_session_completes_on_first_tick() {
    let mut timer = SessionTimer::new(1);
    timer.start();
    assert_eq!(timer.tick(), TickOutcome::Completed);
    assert_eq!(timer.remaining_secs(), 0);
}

#[test]
fn format_mmss_zero_pads_both_fields() {
    assert_eq!(format_mmss(0), "00:00");
    assert_eq!(format_mmss(9), "00:09");
    assert_eq!(format_mmss(61), "01:01");
    assert_eq!(format_mmss(300), "05:00");
    assert_eq!(format_mmss(6_000), "100:00");
}

#[test]
fn ticker_sends_ticks_tagged_with_serial() {
    let (tx, rx) = mpsc::channel();
    let handle = spawn_ticker(Duration::from_millis(5), 7, tx);
    assert_eq!(handle.serial(), 7);

    let tick = rx.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(tick, Tick { serial: 7 });
    handle.cancel();
}

#[test]
fn cancelled_ticker_sends_nothing_more() {
    let (tx, rx) = mpsc::channel();
    let handle = spawn_ticker(Duration::from_millis(5), 1, tx);
    rx.recv_timeout(Duration::from_secs(2)).unwrap();

    handle.cancel();
    // Drain whatever was queued before cancellation; then the channel is
    // closed because the thread (the only sender) has exited.
    while rx.try_recv().is_ok() {}
    assert_eq!(
        rx.recv_timeout(Duration::from_millis(50)),
        Err(mpsc::RecvTimeoutError::Disconnected)
    );
}

#[test]
fn dropping_the_handle_stops_the_ticker() {
    let (tx, rx) = mpsc::channel();
    {
        let _handle = spawn_ticker(Duration::from_millis(5), 1, tx);
    }
    while rx.try_recv().is_ok() {}
    assert_eq!(
        rx.recv_timeout(Duration::from_millis(50)),
        Err(mpsc::RecvTimeoutError::Disconnected)
    );
}
