use anyhow::{bail, Result};
use std::sync::atomic::{AtomicU8, Ordering};

const CREATED: u8 = 0;
const STARTED: u8 = 1;
const STOPPED: u8 = 2;

/// `Created -> Started -> Stopped` state shared by all metrics backends.
#[derive(Debug, Default)]
pub(crate) struct Lifecycle {
    state: AtomicU8,
}

impl Lifecycle {
    // ---
    pub fn new() -> Self {
        // ---
        Self {
            state: AtomicU8::new(CREATED),
        }
    }

    /// Moves `Created -> Started`. Any other starting state is an error.
    pub fn start(&self, backend: &str) -> Result<()> {
        // ---
        match self
            .state
            .compare_exchange(CREATED, STARTED, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => {
                tracing::info!("{} metrics registry started", backend);
                Ok(())
            }
            Err(STARTED) => bail!("{backend} metrics registry already started"),
            Err(_) => bail!("{backend} metrics registry already stopped"),
        }
    }

    /// Moves to `Stopped`. Returns `false` if it was already stopped.
    pub fn stop(&self, backend: &str) -> bool {
        // ---
        let previous = self.state.swap(STOPPED, Ordering::AcqRel);
        if previous == STOPPED {
            tracing::debug!("{} metrics registry already stopped", backend);
            return false;
        }
        tracing::info!("{} metrics registry stopped", backend);
        true
    }

    pub fn is_closed(&self) -> bool {
        // ---
        self.state.load(Ordering::Acquire) == STOPPED
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn start_then_stop() -> Result<()> {
        // ---
        let lc = Lifecycle::new();
        assert!(!lc.is_closed());

        lc.start("test")?;
        assert!(!lc.is_closed());

        assert!(lc.stop("test"));
        assert!(lc.is_closed());
        Ok(())
    }

    #[test]
    fn double_start_is_rejected() -> Result<()> {
        // ---
        let lc = Lifecycle::new();
        lc.start("test")?;

        let err = lc.start("test").expect_err("second start must fail");
        assert!(err.to_string().contains("already started"), "{err}");
        Ok(())
    }

    #[test]
    fn start_after_stop_is_rejected() {
        // ---
        let lc = Lifecycle::new();
        lc.stop("test");

        let err = lc.start("test").expect_err("start after stop must fail");
        assert!(err.to_string().contains("already stopped"), "{err}");
    }

    #[test]
    fn second_stop_is_a_noop() {
        // ---
        let lc = Lifecycle::new();
        assert!(lc.stop("test"));
        assert!(!lc.stop("test"));
        assert!(lc.is_closed());
    }
}
