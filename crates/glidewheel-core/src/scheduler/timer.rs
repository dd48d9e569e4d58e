//! Retriggerable frame timer
//!
//! One tokio task per timer, steered through a `watch` channel. Arming,
//! re-arming and disarming only publish a new state, so they never block and
//! can be called from any thread, including the OS hook callback.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, error};

/// Timer schedule published to the timer task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// No ticks until armed again
    Disarmed,
    /// Tick after `delay`, then every `period`
    Armed { delay: Duration, period: Duration },
    /// Task exits
    Shutdown,
}

/// Handle to a repeating timer task
#[derive(Debug)]
pub struct FrameTimer {
    state_tx: watch::Sender<TimerState>,
}

impl FrameTimer {
    /// Spawn the timer task on `runtime`, initially disarmed
    ///
    /// `on_tick` runs on the runtime's worker threads. A panic inside it is
    /// caught and logged; the timer keeps its schedule.
    pub fn spawn<F>(runtime: &Handle, on_tick: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let (state_tx, state_rx) = watch::channel(TimerState::Disarmed);
        runtime.spawn(run(state_rx, on_tick));
        Self { state_tx }
    }

    /// Start ticking now, then every `interval`
    pub fn arm(&self, interval: Duration) {
        self.publish(TimerState::Armed {
            delay: Duration::ZERO,
            period: interval,
        });
    }

    /// Change the period; the next tick comes one `interval` from now
    pub fn rearm(&self, interval: Duration) {
        self.publish(TimerState::Armed {
            delay: interval,
            period: interval,
        });
    }

    /// Stop ticking until armed again
    pub fn disarm(&self) {
        self.publish(TimerState::Disarmed);
    }

    /// Stop the timer task for good
    pub fn shutdown(&self) {
        self.publish(TimerState::Shutdown);
    }

    pub fn state(&self) -> TimerState {
        *self.state_tx.borrow()
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state(), TimerState::Armed { .. })
    }

    fn publish(&self, next: TimerState) {
        self.state_tx.send_if_modified(|state| {
            if *state == TimerState::Shutdown || *state == next && next == TimerState::Disarmed {
                return false;
            }
            *state = next;
            true
        });
    }
}

impl Drop for FrameTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run<F>(mut state_rx: watch::Receiver<TimerState>, on_tick: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let mut state = *state_rx.borrow_and_update();

    loop {
        match state {
            TimerState::Shutdown => break,
            TimerState::Disarmed => {
                if state_rx.changed().await.is_err() {
                    break;
                }
                state = *state_rx.borrow_and_update();
            }
            TimerState::Armed { delay, period } => {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {
                        state = TimerState::Armed { delay: period, period };

                        if catch_unwind(AssertUnwindSafe(&on_tick)).is_err() {
                            error!("Frame tick panicked; continuing");
                        }

                        // The tick may have re-armed or disarmed us
                        if state_rx.has_changed().unwrap_or(true) {
                            state = *state_rx.borrow_and_update();
                        }
                    }
                    changed = state_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        state = *state_rx.borrow_and_update();
                    }
                }
            }
        }
    }

    debug!("Frame timer stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, OnceLock};

    fn counting_timer() -> (FrameTimer, Arc<AtomicUsize>) {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        let timer = FrameTimer::spawn(&Handle::current(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (timer, ticks)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn test_starts_disarmed() {
        let (timer, ticks) = counting_timer();
        tokio::time::sleep(ms(100)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
        assert_eq!(timer.state(), TimerState::Disarmed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_arm_ticks_immediately_then_periodically() {
        let (timer, ticks) = counting_timer();
        timer.arm(ms(16));

        tokio::time::sleep(ms(1)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);

        // Ticks at 16, 32, 48
        tokio::time::sleep(ms(50)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 4);
        assert!(timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_disarm_stops_ticks() {
        let (timer, ticks) = counting_timer();
        timer.arm(ms(10));
        tokio::time::sleep(ms(25)).await;
        timer.disarm();
        let seen = ticks.load(Ordering::SeqCst);

        tokio::time::sleep(ms(200)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), seen);
        assert!(!timer.is_armed());

        timer.arm(ms(10));
        tokio::time::sleep(ms(1)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), seen + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_changes_period() {
        let (timer, ticks) = counting_timer();
        timer.arm(ms(10));
        tokio::time::sleep(ms(1)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);

        timer.rearm(ms(50));
        // Old 10ms period would have ticked four more times by now
        tokio::time::sleep(ms(45)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
        tokio::time::sleep(ms(10)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_can_rearm_itself() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let timer_slot: Arc<OnceLock<Arc<FrameTimer>>> = Arc::new(OnceLock::new());

        let counter = ticks.clone();
        let slot = timer_slot.clone();
        let timer = Arc::new(FrameTimer::spawn(&Handle::current(), move || {
            // Stop after three ticks
            if counter.fetch_add(1, Ordering::SeqCst) + 1 >= 3 {
                if let Some(timer) = slot.get() {
                    timer.disarm();
                }
            }
        }));
        let _ = timer_slot.set(timer.clone());

        timer.arm(ms(10));
        tokio::time::sleep(ms(500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
        assert_eq!(timer.state(), TimerState::Disarmed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_tick_keeps_schedule() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        let timer = FrameTimer::spawn(&Handle::current(), move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                panic!("first tick fails");
            }
        });
        timer.arm(ms(10));
        tokio::time::sleep(ms(25)).await;
        assert!(ticks.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_is_final() {
        let (timer, ticks) = counting_timer();
        timer.shutdown();
        timer.arm(ms(10));
        tokio::time::sleep(ms(100)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
        assert_eq!(timer.state(), TimerState::Shutdown);
    }
}
