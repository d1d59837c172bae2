use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::{ChatMessage, SharedTranscript};
use crate::config::ChatConfig;

pub const CANNED_REPLIES: [&str; 5] = [
    "I found several scholarships that match your criteria. Let me show you the best options for your profile.",
    "Based on your academic background, I recommend focusing on STEM scholarships. Here are the top 3 opportunities:",
    "That's a great question! Let me help you understand the application requirements for that scholarship.",
    "I can help you with that! Would you like me to provide more details about the application process?",
    "Excellent! I've saved those scholarships to your favorites. Would you like me to set up deadline reminders?",
];

/// Source of the reply choice and extra delay for each simulated answer.
pub trait ReplyPicker: Send + Sync {
    fn pick(&self, choices: usize) -> usize;
    fn jitter(&self, max: Duration) -> Duration;
}

/// Picks from the sub-second part of the wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockPicker;

impl ClockPicker {
    fn entropy() -> u64 {
        u64::from(Utc::now().timestamp_subsec_nanos())
    }
}

impl ReplyPicker for ClockPicker {
    fn pick(&self, choices: usize) -> usize {
        if choices == 0 {
            return 0;
        }
        (Self::entropy() % choices as u64) as usize
    }

    fn jitter(&self, max: Duration) -> Duration {
        let max_ms = max.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(Self::entropy() % (max_ms + 1))
    }
}

/// Answers each user message with a canned reply after a randomized delay.
///
/// Scheduled replies are never cancelled. When several are in flight they land in the
/// order their timers fire, which need not match the order the messages were sent.
pub struct SimulatedResponder<P = ClockPicker> {
    delay: Duration,
    jitter: Duration,
    picker: Arc<P>,
}

impl SimulatedResponder<ClockPicker> {
    pub fn from_config(config: &ChatConfig) -> Self {
        Self::with_picker(config.reply_delay, config.reply_jitter, ClockPicker)
    }
}

impl<P> SimulatedResponder<P>
where
    P: ReplyPicker + 'static,
{
    pub fn with_picker(delay: Duration, jitter: Duration, picker: P) -> Self {
        Self {
            delay,
            jitter,
            picker: Arc::new(picker),
        }
    }

    /// Mark the transcript as typing and spawn the delayed reply on the current runtime.
    pub fn schedule(&self, transcript: SharedTranscript) -> JoinHandle<ChatMessage> {
        transcript
            .lock()
            .expect("transcript mutex poisoned")
            .begin_reply();

        let wait = self.delay + self.picker.jitter(self.jitter);
        let picker = Arc::clone(&self.picker);
        debug!(wait_ms = wait.as_millis() as u64, "assistant reply scheduled");

        tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            let content = CANNED_REPLIES[picker.pick(CANNED_REPLIES.len()) % CANNED_REPLIES.len()];
            let mut guard = transcript.lock().expect("transcript mutex poisoned");
            guard.finish_reply(content, Utc::now()).clone()
        })
    }
}
