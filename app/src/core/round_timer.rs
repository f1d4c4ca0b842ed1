use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Single-shot, restartable delayed action
///
/// Every call to [`RoundTimer::arm`] aborts the task in flight and bumps the
/// generation. The expiry callback receives the generation it was armed
/// with; the owner compares it with [`RoundTimer::is_current`] under its own
/// lock before acting, so a superseded timer can never take effect even if
/// it already woke up.
#[derive(Debug, Default)]
pub struct RoundTimer {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl RoundTimer {
    /// Create an idle timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending expiry and schedule a new one
    ///
    /// # Arguments
    ///
    /// * `delay` - Time until `on_expire` runs
    /// * `on_expire` - Callback receiving the generation of this arming
    ///
    /// # Returns
    ///
    /// The generation assigned to the new arming
    pub fn arm<F, Fut>(&mut self, delay: Duration, on_expire: F) -> u64
    where
        F: FnOnce(u64) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.generation += 1;

        let generation = self.generation;
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_expire(generation).await;
        }));

        tracing::debug!("Round timer armed: generation={} delay={:?}", generation, delay);
        generation
    }

    /// Abort the pending expiry, if any
    ///
    /// The generation is left as is: whatever was armed stays stale.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Mark the current arming as fired
    ///
    /// Called by the expiry path itself, so the handle is dropped rather
    /// than aborted.
    pub fn complete(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.handle.take().is_some()
    }

    /// True if `generation` is the latest arming and has not fired or been cancelled
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation && self.handle.is_some()
    }

    /// True while an expiry is scheduled
    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    /// Generation of the most recent arming (0 if never armed)
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for RoundTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
