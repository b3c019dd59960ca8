use std::time::{Duration, Instant};

/// Wall-clock stopwatch started when the player enters the cavern.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SessionTimer {
    started: Instant,
}

impl SessionTimer {
    pub(crate) fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Renders a duration as whole minutes and seconds.
pub(crate) fn describe(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let minutes = total / 60;
    let seconds = total % 60;
    format!(
        "{minutes} minute{} and {seconds} second{}",
        plural(minutes),
        plural(seconds)
    )
}

fn plural(count: u64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
