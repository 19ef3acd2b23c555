//! Toasts and the confirmation state machine. Pure presentation state: the
//! caller supplies `Instant`s so timers are deterministic under test.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

const FADE_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub created_at: Instant,
}

/// Transient notifications. Each toast carries its own timer and expires
/// independently of the others.
#[derive(Debug)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
    lifetime: Duration,
}

impl ToastQueue {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 0,
            lifetime,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, severity: Severity, now: Instant) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            severity,
            created_at: now,
        });
        id
    }

    /// Removes only the toast with `id`.
    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    /// Drops every toast whose timer has run out.
    pub fn prune(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.toasts
            .retain(|toast| now.saturating_duration_since(toast.created_at) < lifetime);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// 1.0 while fully visible, falling to 0.0 across the fade window at the
    /// end of the toast's life.
    pub fn opacity(&self, toast: &Toast, now: Instant) -> f32 {
        let age = now.saturating_duration_since(toast.created_at);
        let remaining = self.lifetime.saturating_sub(age);
        let fade = FADE_DURATION.min(self.lifetime);
        if fade.is_zero() || remaining >= fade {
            1.0
        } else {
            remaining.as_secs_f32() / fade.as_secs_f32()
        }
    }
}

/// Pending destructive action awaiting a yes/no answer. At most one is ever
/// outstanding; a new request replaces a stale unanswered one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Confirmation<A> {
    Idle,
    AwaitingConfirmation { message: String, action: A },
}

impl<A> Default for Confirmation<A> {
    fn default() -> Self {
        Confirmation::Idle
    }
}

impl<A> Confirmation<A> {
    pub fn request(&mut self, message: impl Into<String>, action: A) {
        *self = Confirmation::AwaitingConfirmation {
            message: message.into(),
            action,
        };
    }

    /// Affirmative answer: hands back the pending action and returns to idle.
    pub fn confirm(&mut self) -> Option<A> {
        match std::mem::take(self) {
            Confirmation::Idle => None,
            Confirmation::AwaitingConfirmation { action, .. } => Some(action),
        }
    }

    /// Negative answer or close: discards the pending action.
    pub fn cancel(&mut self) {
        *self = Confirmation::Idle;
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Confirmation::AwaitingConfirmation { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Confirmation::Idle => None,
            Confirmation::AwaitingConfirmation { message, .. } => Some(message),
        }
    }
}
