use std::time::{Instant, Duration};
use log::{debug, warn};

use crate::config::anti_spam::{MAX_RESPONSES_PER_SECOND, MAX_REQUESTS_PER_SECOND, BAN_DURATION_SECONDS};

/// What to do with an error reply bound for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorVerdict {
    Send,
    /// Same code as the last reported error, and the run has not accepted an action since.
    Suppress,
    Ban,
}

/// Rate limits and error de-duplication for one WebSocket connection.
///
/// A rejected command is reported once. Repeats of the same rejection stay silent until
/// the run accepts one of the player's commands, so holding a key through the day banner
/// or an enemy turn costs a single reply.
pub struct AntiSpamState {
    reported_error: Option<String>,
    window_start: Instant,
    frames_in_window: u32,
    replies_in_window: u32,
    banned_until: Option<Instant>,
}

impl Default for AntiSpamState {
    fn default() -> Self {
        Self::new()
    }
}

impl AntiSpamState {
    pub fn new() -> Self {
        Self {
            reported_error: None,
            window_start: Instant::now(),
            frames_in_window: 0,
            replies_in_window: 0,
            banned_until: None,
        }
    }

    /// Count an incoming text frame. Returns true if the connection is banned.
    pub fn record_frame(&mut self, session_id: &str) -> bool {
        self.roll_window();
        self.frames_in_window += 1;
        if self.frames_in_window > MAX_REQUESTS_PER_SECOND {
            self.ban(session_id, "too many frames per second");
            return true;
        }
        self.is_banned()
    }

    /// Screen an error reply: repeats are dropped, the rest count against the reply budget.
    /// State broadcasts never pass through here.
    pub fn judge_error(&mut self, error_code: &str, session_id: &str) -> ErrorVerdict {
        if self.is_banned() {
            return ErrorVerdict::Ban;
        }
        if self.reported_error.as_deref() == Some(error_code) {
            debug!("[AntiSpam] Dropped repeated '{}' for session={}", error_code, session_id);
            return ErrorVerdict::Suppress;
        }
        self.reported_error = Some(error_code.to_string());

        self.roll_window();
        self.replies_in_window += 1;
        if self.replies_in_window > MAX_RESPONSES_PER_SECOND {
            self.ban(session_id, "too many error replies per second");
            return ErrorVerdict::Ban;
        }
        ErrorVerdict::Send
    }

    /// The run accepted a command from this connection; the next rejection is news again.
    pub fn action_accepted(&mut self) {
        self.reported_error = None;
    }

    pub fn is_banned(&self) -> bool {
        self.banned_until.is_some_and(|until| Instant::now() < until)
    }

    /// Remaining ban in whole seconds, 0 when not banned.
    pub fn ban_remaining_secs(&self) -> u64 {
        self.banned_until
            .map(|until| until.saturating_duration_since(Instant::now()).as_secs())
            .unwrap_or(0)
    }

    fn ban(&mut self, session_id: &str, reason: &str) {
        let until = Instant::now() + Duration::from_secs(BAN_DURATION_SECONDS);
        self.banned_until = Some(until);
        warn!("[AntiSpam] Banned session={} for {}s: {}", session_id, BAN_DURATION_SECONDS, reason);
    }

    fn roll_window(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.window_start) >= Duration::from_secs(1) {
            self.window_start = now;
            self.frames_in_window = 0;
            self.replies_in_window = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_flood_bans() {
        let mut state = AntiSpamState::new();
        for _ in 0..MAX_REQUESTS_PER_SECOND {
            assert!(!state.record_frame("s1"));
        }
        assert!(state.record_frame("s1"));
        assert!(state.is_banned());
        assert!(state.ban_remaining_secs() > 0);
    }

    #[test]
    fn test_held_key_during_banner_is_reported_once() {
        // A socket's order of calls for a parsed move the run then refuses.
        let mut state = AntiSpamState::new();
        let mut verdicts = Vec::new();
        for _ in 0..6 {
            assert!(!state.record_frame("s1"));
            verdicts.push(state.judge_error("NOT_PLAYERS_TURN", "s1"));
        }

        assert_eq!(verdicts.iter().filter(|v| **v == ErrorVerdict::Send).count(), 1);
        assert!(!verdicts.contains(&ErrorVerdict::Ban));
        assert!(!state.is_banned());
    }

    #[test]
    fn test_acceptance_rearms_reporting() {
        let mut state = AntiSpamState::new();
        assert_eq!(state.judge_error("NOT_PLAYERS_TURN", "s1"), ErrorVerdict::Send);
        assert_eq!(state.judge_error("NOT_PLAYERS_TURN", "s1"), ErrorVerdict::Suppress);

        state.action_accepted();
        assert_eq!(state.judge_error("NOT_PLAYERS_TURN", "s1"), ErrorVerdict::Send);
    }

    #[test]
    fn test_alternating_errors_spend_the_reply_budget() {
        let mut state = AntiSpamState::new();
        for i in 0..MAX_RESPONSES_PER_SECOND {
            let code = if i % 2 == 0 { "INVALID_ACTION" } else { "GAME_OVER" };
            assert_eq!(state.judge_error(code, "s1"), ErrorVerdict::Send);
        }
        let code = if MAX_RESPONSES_PER_SECOND % 2 == 0 { "INVALID_ACTION" } else { "GAME_OVER" };
        assert_eq!(state.judge_error(code, "s1"), ErrorVerdict::Ban);
        assert!(state.is_banned());
    }

    #[test]
    fn test_not_banned_by_default() {
        let state = AntiSpamState::default();
        assert!(!state.is_banned());
        assert_eq!(state.ban_remaining_secs(), 0);
    }
}
