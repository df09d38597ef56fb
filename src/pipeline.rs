use std::{io::Write, time::Duration};

use async_trait::async_trait;
use log::{info, warn};
use nutype::nutype;

use crate::{BacklinkError, EntityId, OutputRow, ResultWriter};

/// Attempts made per name before a placeholder row is written.
pub const DEFAULT_MAX_ATTEMPTS: u8 = 3;

/// Fixed wait between two attempts for the same name.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

#[nutype(
    validate(greater_or_equal = 1, less_or_equal = 100),
    derive(Debug, Display, Clone, Copy, PartialEq)
)]
pub struct MaxAttempts(u8);

impl Default for MaxAttempts {
    #[allow(clippy::unwrap_used)]
    fn default() -> Self {
        Self::try_new(DEFAULT_MAX_ATTEMPTS).unwrap()
    }
}

/// Resolves a name to an entity. `None` covers every failure, including "no match".
#[async_trait]
pub trait EntityResolver: Send + Sync {
    async fn resolve(&self, name: &str) -> Option<EntityId>;
}

/// Counts the displayed backlinks of an entity. `None` covers every failure.
#[async_trait]
pub trait BacklinkCounter: Send + Sync {
    async fn displayed_items(&self, id: &EntityId) -> Option<u64>;
}

#[async_trait]
pub trait Wait: Send + Sync {
    async fn wait(&self, duration: Duration);
}

#[async_trait]
impl<T: EntityResolver + ?Sized> EntityResolver for &T {
    async fn resolve(&self, name: &str) -> Option<EntityId> {
        (**self).resolve(name).await
    }
}

#[async_trait]
impl<T: BacklinkCounter + ?Sized> BacklinkCounter for &T {
    async fn displayed_items(&self, id: &EntityId) -> Option<u64> {
        (**self).displayed_items(id).await
    }
}

#[async_trait]
impl<T: Wait + ?Sized> Wait for &T {
    async fn wait(&self, duration: Duration) {
        (**self).wait(duration).await;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioWait;

#[async_trait]
impl Wait for TokioWait {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone, PartialEq)]
enum AttemptState {
    Attempting { remaining: u8 },
    Succeeded(OutputRow),
    Exhausted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rows: usize,
    pub resolved: usize,
    pub unavailable: usize,
}

#[derive(Debug)]
pub struct Pipeline<R, C, W> {
    resolver: R,
    counter: C,
    waiter: W,
    max_attempts: MaxAttempts,
    retry_delay: Duration,
}

impl<R: EntityResolver, C: BacklinkCounter, W: Wait> Pipeline<R, C, W> {
    pub fn new(resolver: R, counter: C, waiter: W) -> Self {
        Self {
            resolver,
            counter,
            waiter,
            max_attempts: MaxAttempts::default(),
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    pub const fn with_max_attempts(mut self, max_attempts: MaxAttempts) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub const fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Processes every name in order, writing exactly one row per name as soon as it is known.
    /// # Errors
    /// Only fails if a row cannot be written.
    pub async fn run<O: Write>(
        &self,
        names: &[String],
        writer: &mut ResultWriter<O>,
    ) -> Result<RunSummary, BacklinkError> {
        let mut summary = RunSummary::default();
        for (i, name) in names.iter().enumerate() {
            info!("Processing {} / {} : '{name}'", i + 1, names.len());
            let row = self.process_name(name).await;
            writer.write_row(&row)?;
            summary.rows += 1;
            if row.is_resolved() {
                summary.resolved += 1;
            } else {
                summary.unavailable += 1;
            }
        }
        Ok(summary)
    }

    /// Runs the attempt state machine for one name until it succeeds or runs out of attempts.
    pub async fn process_name(&self, name: &str) -> OutputRow {
        let mut state = AttemptState::Attempting {
            remaining: self.max_attempts.into_inner(),
        };
        loop {
            state = match state {
                AttemptState::Attempting { remaining } => self.attempt(name, remaining).await,
                AttemptState::Succeeded(row) => return row,
                // Any QID found on an earlier attempt is not kept
                AttemptState::Exhausted => return OutputRow::unavailable(name),
            };
        }
    }

    async fn attempt(&self, name: &str, remaining: u8) -> AttemptState {
        info!("Searching for '{name}'...");
        match self.resolver.resolve(name).await {
            Some(id) => match self.counter.displayed_items(&id).await {
                Some(count) => {
                    return AttemptState::Succeeded(OutputRow::resolved(name, id, count));
                }
                None => warn!("Error processing '{name}', retrying..."),
            },
            None => warn!("Error finding QID for '{name}', retrying..."),
        }
        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            warn!("Skipping '{name}' after multiple failed attempts.");
            return AttemptState::Exhausted;
        }
        info!(
            "Waiting for {} seconds before retrying...",
            self.retry_delay.as_secs()
        );
        self.waiter.wait(self.retry_delay).await;
        AttemptState::Attempting { remaining }
    }
}
