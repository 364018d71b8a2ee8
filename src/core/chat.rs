//! # Chat Log
//!
//! Append-only transcript for the assistant sidebar.
//!
//! Each accepted submission appends a user turn right away and leaves one
//! reply in flight. Replies arrive later through [`ChatLog::receive_reply`].
//! Nothing stops a second submission while a reply is pending; every reply
//! lands on its own.
//!
//! ```text
//! Idle ──submit──▶ AwaitingReply ──last reply arrives──▶ Idle
//! ```

use serde::{Deserialize, Serialize};

/// Text of the simulated assistant.
pub const CANNED_REPLY: &str = "I'm an AI assistant. How can I help you with your code?";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPhase {
    Idle,
    AwaitingReply,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatLog {
    turns: Vec<ChatTurn>,
    pending_replies: usize,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn pending_replies(&self) -> usize {
        self.pending_replies
    }

    pub fn phase(&self) -> ChatPhase {
        if self.pending_replies > 0 {
            ChatPhase::AwaitingReply
        } else {
            ChatPhase::Idle
        }
    }

    /// Appends a user turn unless `text` is blank. The text is stored as typed.
    /// Returns `true` when a reply should be scheduled.
    pub fn submit(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.turns.push(ChatTurn {
            role: Role::User,
            content: text.to_string(),
        });
        self.pending_replies += 1;
        true
    }

    pub fn receive_reply(&mut self, content: String) {
        self.turns.push(ChatTurn {
            role: Role::Assistant,
            content,
        });
        self.pending_replies = self.pending_replies.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_appends_user_turn() {
        let mut log = ChatLog::new();
        assert!(log.submit("hello"));
        assert_eq!(
            log.turns(),
            &[ChatTurn {
                role: Role::User,
                content: "hello".to_string()
            }]
        );
        assert_eq!(log.phase(), ChatPhase::AwaitingReply);
    }

    #[test]
    fn test_blank_submit_is_rejected() {
        let mut log = ChatLog::new();
        log.submit("first");
        let before = log.clone();
        assert!(!log.submit("   "));
        assert!(!log.submit("\n\t"));
        assert!(!log.submit(""));
        assert_eq!(log, before);
    }

    #[test]
    fn test_text_kept_as_typed() {
        let mut log = ChatLog::new();
        log.submit("  padded  ");
        assert_eq!(log.turns()[0].content, "  padded  ");
    }

    #[test]
    fn test_overlapping_replies() {
        let mut log = ChatLog::new();
        log.submit("one");
        log.submit("two");
        assert_eq!(log.pending_replies(), 2);

        log.receive_reply(CANNED_REPLY.to_string());
        assert_eq!(log.phase(), ChatPhase::AwaitingReply);
        log.receive_reply(CANNED_REPLY.to_string());
        assert_eq!(log.phase(), ChatPhase::Idle);

        let roles: Vec<Role> = log.turns().iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::User, Role::User, Role::Assistant, Role::Assistant]);
    }

    #[test]
    fn test_stray_reply_does_not_underflow() {
        let mut log = ChatLog::new();
        log.receive_reply("unexpected".to_string());
        assert_eq!(log.pending_replies(), 0);
        assert_eq!(log.turns().len(), 1);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let turn = ChatTurn {
            role: Role::Assistant,
            content: "hi".to_string(),
        };
        let json = serde_json::to_string(&turn).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }
}
