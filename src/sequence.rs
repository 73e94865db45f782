//! Request Sequencing
//!
//! Monotonic tokens so that only the newest edit action may write the form.

use std::cell::Cell;

/// Token handed out per open action
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Token(u64);

#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: Cell<u64>,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new action; every previously issued token becomes stale
    pub fn next(&self) -> Token {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        Token(next)
    }

    pub fn is_current(&self, token: Token) -> bool {
        self.latest.get() == token.0
    }
}
