// SPDX-License-Identifier: MPL-2.0
//! Analysis state machine.
//!
//! ```text
//! idle | success | error --begin--> analyzing --complete(Ok)--> success
//!                                             --complete(Err)-> error
//! any --reset--> idle
//! ```
//!
//! Each `begin` hands out a [`Ticket`]. A completion is applied only when its
//! ticket is the current one, so responses that arrive after a reset or after
//! a new image was chosen are dropped.

use crate::client::AnalysisResult;
use crate::config::{RING_ANIMATION_DELAY_MS, RING_ANIMATION_DURATION_MS};
use crate::error::AnalysisError;
use crate::intake::ImageId;
use crate::ui::results;
use std::time::{Duration, Instant};

/// Coarse state, as shown by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Analyzing,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Idle,
    Analyzing,
    Success(Box<AnalysisResult>),
    Error(AnalysisError),
}

/// Identifies one in-flight analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    image_id: ImageId,
}

impl Ticket {
    pub fn image_id(&self) -> ImageId {
        self.image_id
    }
}

/// Why `begin` refused to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginError {
    NoImage,
    InFlight,
}

/// What `complete` did with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed(AnalysisError),
    /// The ticket was stale; nothing changed.
    Discarded,
}

/// Sweep of the confidence ring from 0 to its target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RingAnimation {
    target: f32,
    start_at: Option<Instant>,
}

impl RingAnimation {
    /// Schedules the sweep to `target` percent, starting after the ring delay.
    pub fn schedule(&mut self, target: f32, now: Instant) {
        self.target = target;
        self.start_at = Some(now + Duration::from_millis(RING_ANIMATION_DELAY_MS));
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Target percent, capped at 99.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Percent to draw at `now`: 0 before the delay, then eased to the target.
    pub fn percent_at(&self, now: Instant) -> f32 {
        let Some(start_at) = self.start_at else {
            return 0.0;
        };
        let Some(elapsed) = now.checked_duration_since(start_at) else {
            return 0.0;
        };
        let t = elapsed.as_secs_f32() / (RING_ANIMATION_DURATION_MS as f32 / 1000.0);
        self.target * results::ease_out(t)
    }

    /// `true` until the sweep has reached its target.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.start_at.is_some_and(|start_at| {
            now < start_at + Duration::from_millis(RING_ANIMATION_DURATION_MS)
        })
    }
}

/// Holder of the analysis status, result, error and ring.
#[derive(Debug, Clone)]
pub struct AnalysisState {
    phase: Phase,
    ticket: Option<Ticket>,
    last_seq: u64,
    shown_at: Option<Instant>,
    ring: RingAnimation,
}

impl Default for AnalysisState {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            ticket: None,
            last_seq: 0,
            shown_at: None,
            ring: RingAnimation::default(),
        }
    }

    /// Starts an analysis of `image`.
    ///
    /// Refused without an image or while another analysis is in flight.
    pub fn begin(&mut self, image: Option<ImageId>) -> Result<Ticket, BeginError> {
        let image_id = image.ok_or(BeginError::NoImage)?;
        if self.phase == Phase::Analyzing {
            return Err(BeginError::InFlight);
        }

        self.last_seq += 1;
        let ticket = Ticket {
            seq: self.last_seq,
            image_id,
        };
        self.ticket = Some(ticket);
        self.phase = Phase::Analyzing;
        self.shown_at = None;
        self.ring.reset();
        Ok(ticket)
    }

    /// Applies the response for `ticket`.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        response: Result<AnalysisResult, AnalysisError>,
        now: Instant,
    ) -> Outcome {
        if self.ticket != Some(ticket) || self.phase != Phase::Analyzing {
            tracing::debug!(seq = ticket.seq, "discarding stale analysis response");
            return Outcome::Discarded;
        }
        self.ticket = None;

        match response {
            Ok(result) => {
                self.ring.reset();
                self.ring
                    .schedule(results::ring_percent(result.confidence), now);
                self.shown_at = Some(now);
                self.phase = Phase::Success(Box::new(result));
                Outcome::Succeeded
            }
            Err(error) => {
                self.phase = Phase::Error(error.clone());
                Outcome::Failed(error)
            }
        }
    }

    /// Back to idle: result, error and ring cleared, pending ticket voided.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.ticket = None;
        self.shown_at = None;
        self.ring.reset();
    }

    pub fn status(&self) -> Status {
        match self.phase {
            Phase::Idle => Status::Idle,
            Phase::Analyzing => Status::Analyzing,
            Phase::Success(_) => Status::Success,
            Phase::Error(_) => Status::Error,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        self.phase == Phase::Analyzing
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            Phase::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match &self.phase {
            Phase::Error(error) => Some(error),
            _ => None,
        }
    }

    pub fn ring(&self) -> &RingAnimation {
        &self.ring
    }

    /// Time since the result arrived, used to stagger the probability bars.
    pub fn result_age(&self, now: Instant) -> Option<Duration> {
        self.shown_at
            .map(|shown_at| now.saturating_duration_since(shown_at))
    }

    /// `true` while the ring or any bar is still moving.
    pub fn is_animating(&self, now: Instant) -> bool {
        let bars_moving = match (self.result(), self.result_age(now)) {
            (Some(result), Some(age)) => age < results::bars_settle_time(result.sorted_probs.len()),
            _ => false,
        };
        self.ring.is_animating(now) || bars_moving
    }
}
