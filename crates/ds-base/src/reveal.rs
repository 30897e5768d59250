//! Simulated streaming of an already-complete reply.
//!
//! A [`RevealScheduler`] owns at most one [`RevealJob`]. The event loop calls
//! [`RevealScheduler::tick`] as often as it likes; every elapsed interval
//! counts as one timer firing and advances the cursor by exactly one
//! character, so a slow loop catches up instead of skipping prefixes.
//!
//! Each firing yields a [`RevealEvent::Update`] carrying the prefix revealed so
//! far, until the cursor reaches the last character: that firing yields a
//! single [`RevealEvent::Complete`] with the full text and drops the job.
//! Events carry the [`JobToken`] of the job that produced them, so consumers
//! can tell a superseded job's output apart from the active one.

use std::time::{Duration, Instant};

/// Identity of one reveal job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobToken(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealEvent {
    /// Prefix revealed so far, one character longer than the previous update
    Update { token: JobToken, partial: String },
    /// Terminal event, carries the full text
    Complete { token: JobToken, content: String },
}

impl RevealEvent {
    pub fn token(&self) -> JobToken {
        match self {
            RevealEvent::Update { token, .. } | RevealEvent::Complete { token, .. } => *token,
        }
    }
}

struct RevealJob {
    token: JobToken,
    full_text: String,
    /// Byte offset just past each character of `full_text`
    ends: Vec<usize>,
    /// Number of characters revealed
    cursor: usize,
    paused: bool,
    next_fire: Instant,
}

impl RevealJob {
    fn prefix(&self) -> &str {
        match self.cursor {
            0 => "",
            n => &self.full_text[..self.ends[n - 1]],
        }
    }

    /// Index of the last character; the empty text terminates at 0 too.
    fn last_index(&self) -> usize {
        self.ends.len().saturating_sub(1)
    }
}

pub struct RevealScheduler {
    interval: Duration,
    job: Option<RevealJob>,
    issued: u64,
}

impl RevealScheduler {
    pub fn new(interval: Duration) -> Self {
        Self { interval: interval.max(Duration::from_millis(1)), job: None, issued: 0 }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Begin revealing `full_text`, replacing any active job.
    /// The first firing happens one interval after `now`; an empty text
    /// completes on the very next tick.
    pub fn start(&mut self, full_text: impl Into<String>, now: Instant) -> JobToken {
        if let Some(old) = self.cancel() {
            tracing::debug!(?old, "reveal superseded by a new job");
        }

        self.issued += 1;
        let token = JobToken(self.issued);
        let full_text = full_text.into();
        let ends: Vec<usize> = full_text.char_indices().map(|(i, c)| i + c.len_utf8()).collect();
        let next_fire = if ends.is_empty() { now } else { now + self.interval };

        tracing::debug!(?token, chars = ends.len(), "reveal started");
        self.job = Some(RevealJob { token, full_text, ends, cursor: 0, paused: false, next_fire });
        token
    }

    /// Flip the paused flag of the active job. Returns the new flag, or
    /// `None` when there is no job. Resuming re-arms the timer one interval
    /// after `now`.
    pub fn toggle_pause(&mut self, now: Instant) -> Option<bool> {
        let interval = self.interval;
        let job = self.job.as_mut()?;
        job.paused = !job.paused;
        if !job.paused {
            job.next_fire = now + interval;
        }
        Some(job.paused)
    }

    /// Drop the active job without completing it.
    pub fn cancel(&mut self) -> Option<JobToken> {
        self.job.take().map(|job| job.token)
    }

    pub fn is_active(&self) -> bool {
        self.job.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.job.as_ref().is_some_and(|job| job.paused)
    }

    pub fn active_token(&self) -> Option<JobToken> {
        self.job.as_ref().map(|job| job.token)
    }

    /// Run every timer firing due at `now`, in order.
    pub fn tick(&mut self, now: Instant) -> Vec<RevealEvent> {
        let mut events = Vec::new();

        while let Some(job) = self.job.as_mut() {
            if job.next_fire > now {
                break;
            }
            job.next_fire += self.interval;

            // Paused: the timer fires but nothing advances.
            if job.paused {
                continue;
            }

            if job.cursor >= job.last_index() {
                if let Some(job) = self.job.take() {
                    events.push(RevealEvent::Complete { token: job.token, content: job.full_text });
                }
                break;
            }

            job.cursor += 1;
            events.push(RevealEvent::Update { token: job.token, partial: job.prefix().to_string() });
        }

        events
    }
}
