//! One-time passcode exchange.
//!
//! Both sign-up and sign-in follow the same shape: submit details, the
//! server emails a code, the user types it back. Resending is throttled by
//! a fixed cooldown.

use crate::error::{CoreError, Result};
use crate::types::User;
use std::time::{Duration, Instant};

/// Minimum wait between two code requests for the same flow
pub const RESEND_COOLDOWN: Duration = Duration::from_secs(60);

/// Where a sign-up or sign-in attempt currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpStage {
    /// Waiting for the user to submit name/dob/email (or just email)
    CollectingDetails,
    /// A code was sent to `email` at `sent_at`
    AwaitingCode { email: String, sent_at: Instant },
    /// The code was accepted
    Verified(User),
}

impl OtpStage {
    fn name(&self) -> &'static str {
        match self {
            OtpStage::CollectingDetails => "collecting_details",
            OtpStage::AwaitingCode { .. } => "awaiting_code",
            OtpStage::Verified(_) => "verified",
        }
    }
}

/// State machine driving one sign-up or sign-in attempt
#[derive(Debug, Clone)]
pub struct OtpFlow {
    stage: OtpStage,
    cooldown: Duration,
}

impl Default for OtpFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl OtpFlow {
    pub fn new() -> Self {
        Self::with_cooldown(RESEND_COOLDOWN)
    }

    pub fn with_cooldown(cooldown: Duration) -> Self {
        Self {
            stage: OtpStage::CollectingDetails,
            cooldown,
        }
    }

    pub fn stage(&self) -> &OtpStage {
        &self.stage
    }

    /// Email the pending code was sent to
    pub fn pending_email(&self) -> Option<&str> {
        match &self.stage {
            OtpStage::AwaitingCode { email, .. } => Some(email),
            _ => None,
        }
    }

    /// Record that the server accepted the details and sent a code.
    ///
    /// Also used for resends, which restart the cooldown.
    pub fn code_sent(&mut self, email: impl Into<String>, now: Instant) -> Result<()> {
        if let OtpStage::Verified(_) = self.stage {
            return Err(CoreError::InvalidTransition {
                from: self.stage.name(),
                event: "code_sent",
            });
        }
        self.stage = OtpStage::AwaitingCode {
            email: email.into(),
            sent_at: now,
        };
        Ok(())
    }

    /// Time left before another code may be requested
    pub fn resend_remaining(&self, now: Instant) -> Duration {
        match &self.stage {
            OtpStage::AwaitingCode { sent_at, .. } => self
                .cooldown
                .saturating_sub(now.saturating_duration_since(*sent_at)),
            _ => Duration::ZERO,
        }
    }

    pub fn can_resend(&self, now: Instant) -> bool {
        matches!(self.stage, OtpStage::AwaitingCode { .. })
            && self.resend_remaining(now).is_zero()
    }

    /// Record that the server accepted the code
    pub fn verified(&mut self, user: User) -> Result<()> {
        match self.stage {
            OtpStage::AwaitingCode { .. } => {
                self.stage = OtpStage::Verified(user);
                Ok(())
            }
            _ => Err(CoreError::InvalidTransition {
                from: self.stage.name(),
                event: "verified",
            }),
        }
    }

    /// Abandon the pending code and start over
    pub fn reset(&mut self) {
        self.stage = OtpStage::CollectingDetails;
    }
}

/// Render a countdown as `m:ss`
pub fn format_countdown(remaining: Duration) -> String {
    // Round up so "0:00" only shows once the wait is really over
    let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
    format!("{}:{:02}", secs / 60, secs % 60)
}
