use std::time::Duration;

/// Wall-clock timer for solve reports. Browsers have no `Instant`, so on
/// wasm the page's `performance.now()` clock is used instead.
pub(crate) struct Stopwatch {
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
    #[cfg(target_arch = "wasm32")]
    start_ms: f64,
}

#[cfg(not(target_arch = "wasm32"))]
impl Stopwatch {
    pub(crate) fn start() -> Self {
        Stopwatch {
            start: std::time::Instant::now(),
        }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(target_arch = "wasm32")]
impl Stopwatch {
    pub(crate) fn start() -> Self {
        Stopwatch { start_ms: now_ms() }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        Duration::from_secs_f64((now_ms() - self.start_ms).max(0.0) / 1000.0)
    }
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_grows() {
        let stopwatch = Stopwatch::start();
        let first = stopwatch.elapsed();
        std::thread::sleep(Duration::from_millis(2));
        assert!(stopwatch.elapsed() > first);
    }
}
