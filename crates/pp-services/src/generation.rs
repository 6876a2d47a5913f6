//! AI background generation: service trait and the bounded status poll.
//!
//! A generation is three calls against the backend proxy: upload the
//! reference snapshot, create a task, then poll the task until it reaches
//! `success` or `fail`. Polling is timer-driven (never blocks the UI
//! thread), capped at [`PollConfig::max_attempts`] checks and abandoned as
//! soon as the owning view signals cancellation.

use crate::error::{ServiceError, ServiceResult};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tokio::sync::watch;

pub const DEFAULT_MODEL: &str = "nano-banana-pro";
pub const DEFAULT_RESOLUTION: &str = "1K";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Publicly reachable URL of the reference snapshot.
    pub reference_url: String,
    /// Reduced `W:H` of the active canvas preset.
    pub aspect_ratio: String,
    pub model: String,
}

impl GenerationRequest {
    pub fn new(
        prompt: impl Into<String>,
        reference_url: impl Into<String>,
        aspect_ratio: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            reference_url: reference_url.into(),
            aspect_ratio: aspect_ratio.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Success(Vec<String>),
    Fail(String),
}

/// The generation backend, as seen through the proxy.
#[allow(async_fn_in_trait)]
pub trait GenerationService {
    /// Upload a PNG and return a URL the generator can fetch.
    async fn upload_reference(&self, png: Vec<u8>) -> ServiceResult<String>;

    async fn create_task(&self, request: &GenerationRequest) -> ServiceResult<TaskId>;

    async fn task_status(&self, task: &TaskId) -> ServiceResult<TaskStatus>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(2500),
            max_attempts: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Completed(Vec<String>),
    Cancelled,
}

/// Owner side of a cancellation pair. Dropping it also cancels, so a view
/// that is torn down mid-poll stops the loop.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        self.tx.send_replace(true);
    }
}

/// Listener side of a cancellation pair.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelSignal { rx })
}

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation is requested.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                // Sender gone without cancelling: nothing can fire anymore.
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Poll `task` until it settles, the attempt cap is hit, or `cancel` fires.
///
/// The first check happens immediately; later checks are spaced by
/// `config.interval`.
pub async fn poll_until_done(
    service: &impl GenerationService,
    task: &TaskId,
    config: &PollConfig,
    cancel: &mut CancelSignal,
) -> ServiceResult<PollOutcome> {
    for attempt in 1..=config.max_attempts {
        if cancel.is_cancelled() {
            return Ok(PollOutcome::Cancelled);
        }
        let status = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(PollOutcome::Cancelled),
            status = service.task_status(task) => status?,
        };
        match status {
            TaskStatus::Success(urls) => {
                log::debug!("task {task}: success after {attempt} checks, {} urls", urls.len());
                return Ok(PollOutcome::Completed(urls));
            }
            TaskStatus::Fail(message) => {
                log::warn!("task {task}: failed: {message}");
                return Err(ServiceError::GenerationFailed(message));
            }
            TaskStatus::Pending => log::trace!("task {task}: pending ({attempt}/{})", config.max_attempts),
        }
        if attempt < config.max_attempts {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Ok(PollOutcome::Cancelled),
                _ = tokio::time::sleep(config.interval) => {}
            }
        }
    }
    Err(ServiceError::TimedOut {
        attempts: config.max_attempts,
    })
}

/// Candidate backgrounds offered to the user.
///
/// The first URL is the one applied to the stage. A single result is
/// shown twice so the picker always has a pair.
pub fn candidates(urls: &[String]) -> Vec<String> {
    match urls {
        [] => Vec::new(),
        [only] => vec![only.clone(), only.clone()],
        many => many.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_result_is_duplicated() {
        let one = vec!["https://cdn/a.png".to_string()];
        assert_eq!(candidates(&one), vec!["https://cdn/a.png"; 2]);
        assert!(candidates(&[]).is_empty());
    }

    #[test]
    fn request_defaults_to_nano_banana() {
        let r = GenerationRequest::new("soft light", "https://x/ref.png", "4:3");
        assert_eq!(r.model, DEFAULT_MODEL);
        assert_eq!(r.with_model("flux").model, "flux");
    }

    #[test]
    fn poll_defaults() {
        let c = PollConfig::default();
        assert_eq!(c.interval, Duration::from_millis(2500));
        assert_eq!(c.max_attempts, 20);
    }

    #[test]
    fn dropping_handle_cancels() {
        let (handle, signal) = cancel_pair();
        assert!(!signal.is_cancelled());
        drop(handle);
        assert!(signal.is_cancelled());
        assert!(!CancelSignal::never().is_cancelled());
    }
}
