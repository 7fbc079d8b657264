use tracing::{debug, info};

use crate::clock::SessionClock;
use crate::passage::{Passage, TextProvider};
use crate::scoring::{self, CharClass, Stats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SessionStatus {
    /// no keystroke yet
    Idle,
    Running,
    Finished,
}

/// One attempt at one passage. Replaced wholesale, never partially reset.
#[derive(Debug, Clone)]
pub struct Session {
    passage: Passage,
    typed: String,
    clock: SessionClock,
    status: SessionStatus,
    stats: Stats,
}

impl Session {
    pub fn new(passage: Passage) -> Self {
        Self {
            passage,
            typed: String::new(),
            clock: SessionClock::default(),
            status: SessionStatus::Idle,
            stats: Stats::default(),
        }
    }

    pub fn passage(&self) -> &Passage {
        &self.passage
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    fn submit(&mut self, raw: &str) {
        if self.status == SessionStatus::Finished {
            return;
        }

        // Anything typed past the end of the passage is dropped, so an
        // over-long paste still completes the session.
        let limit = self.passage.char_len();
        self.typed = raw.chars().take(limit).collect();
        let typed_len = self.typed.chars().count();

        if self.status == SessionStatus::Idle && typed_len > 0 {
            self.clock.start();
            self.status = SessionStatus::Running;
            info!(passage_len = limit, "session started");
        }

        if self.status == SessionStatus::Running && typed_len == limit {
            self.clock.stop();
            self.stats = scoring::compute_stats(
                self.passage.as_str(),
                &self.typed,
                self.clock.elapsed_secs(),
            );
            self.status = SessionStatus::Finished;
            info!(
                wpm = self.stats.wpm,
                accuracy = self.stats.accuracy,
                errors = self.stats.errors,
                elapsed_secs = self.clock.elapsed_secs(),
                "session finished"
            );
        }
    }
}

/// Read-only view of the current session for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<'a> {
    pub passage: &'a str,
    pub typed_input: &'a str,
    pub elapsed_secs: f64,
    pub status: SessionStatus,
    pub stats: Stats,
}

impl Snapshot<'_> {
    pub fn char_classes(&self) -> Vec<(char, CharClass)> {
        scoring::classify(self.passage, self.typed_input)
    }
}

/// Drives the `Idle -> Running -> Finished` lifecycle of the current session
pub struct SessionMachine {
    provider: Box<dyn TextProvider>,
    session: Session,
}

impl SessionMachine {
    pub fn new(provider: Box<dyn TextProvider>) -> Self {
        let session = Session::new(provider.select_passage());
        Self { provider, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> SessionStatus {
        self.session.status
    }

    pub fn typed(&self) -> &str {
        &self.session.typed
    }

    /// Replace the typed text and re-evaluate every transition.
    pub fn submit_input(&mut self, raw: &str) {
        self.session.submit(raw);
    }

    pub fn on_tick(&mut self) {
        self.session.clock.tick();
    }

    /// Drop the current session and start a fresh one on a new passage.
    pub fn request_new_session(&mut self) {
        self.session.clock.stop();
        self.session = Session::new(self.provider.select_passage());
        debug!(passage_len = self.session.passage.char_len(), "new session");
    }

    /// Fresh session on the passage just attempted.
    pub fn retry(&mut self) {
        self.session.clock.stop();
        self.session = Session::new(self.session.passage.clone());
        debug!("retrying passage");
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            passage: self.session.passage.as_str(),
            typed_input: &self.session.typed,
            elapsed_secs: self.session.clock.elapsed_secs(),
            status: self.session.status,
            stats: self.session.stats,
        }
    }
}

impl std::fmt::Debug for SessionMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionMachine")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passage::{FixedPassage, PassagePool};
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;

    fn machine(text: &str) -> SessionMachine {
        SessionMachine::new(Box::new(FixedPassage::new(Passage::new(text).unwrap())))
    }

    fn tick_n(m: &mut SessionMachine, n: usize) {
        for _ in 0..n {
            m.on_tick();
        }
    }

    #[test]
    fn test_new_machine_is_idle() {
        let m = machine("cat");
        let snap = m.snapshot();
        assert_eq!(snap.passage, "cat");
        assert_eq!(snap.typed_input, "");
        assert_eq!(snap.elapsed_secs, 0.0);
        assert_eq!(snap.status, SessionStatus::Idle);
        assert_eq!(snap.stats, Stats::default());
    }

    #[test]
    fn test_ticks_before_first_keystroke_are_ignored() {
        let mut m = machine("cat");
        tick_n(&mut m, 10);
        assert_eq!(m.snapshot().elapsed_secs, 0.0);
        assert_eq!(m.status(), SessionStatus::Idle);
    }

    #[test]
    fn test_empty_input_stays_idle() {
        let mut m = machine("cat");
        m.submit_input("");
        assert_eq!(m.status(), SessionStatus::Idle);
        assert!(!m.session().clock().is_running());
    }

    #[test]
    fn test_first_keystroke_starts_clock() {
        let mut m = machine("cat");
        m.submit_input("c");
        assert_eq!(m.status(), SessionStatus::Running);
        assert!(m.session().clock().is_running());
        tick_n(&mut m, 3);
        assert_relative_eq!(m.snapshot().elapsed_secs, 0.3);
    }

    #[test]
    fn test_stats_stay_default_while_running() {
        let mut m = machine("cat");
        m.submit_input("cx");
        tick_n(&mut m, 5);
        assert_eq!(m.snapshot().stats, Stats::default());
    }

    #[test]
    fn test_deleting_everything_keeps_running() {
        let mut m = machine("cat");
        m.submit_input("c");
        m.submit_input("");
        assert_eq!(m.status(), SessionStatus::Running);
        tick_n(&mut m, 2);
        assert_relative_eq!(m.snapshot().elapsed_secs, 0.2);
    }

    #[test]
    fn test_finishes_exactly_at_passage_length() {
        let mut m = machine("cat");
        m.submit_input("c");
        m.submit_input("ca");
        assert_eq!(m.status(), SessionStatus::Running);
        m.submit_input("cat");
        assert_eq!(m.status(), SessionStatus::Finished);
        assert!(!m.session().clock().is_running());
    }

    #[test]
    fn test_elapsed_frozen_after_finish() {
        let mut m = machine("ab");
        m.submit_input("a");
        tick_n(&mut m, 4);
        m.submit_input("ab");
        tick_n(&mut m, 50);
        assert_relative_eq!(m.snapshot().elapsed_secs, 0.4);
    }

    #[test]
    fn test_same_tick_completion() {
        let mut m = machine("a b");
        m.submit_input("a b");
        let snap = m.snapshot();
        assert_eq!(snap.status, SessionStatus::Finished);
        assert_eq!(snap.stats.wpm, 0);
        assert_eq!(snap.stats.accuracy, 100);
        assert_eq!(snap.stats.errors, 0);
    }

    #[test]
    fn test_overflow_is_truncated_and_finishes() {
        let mut m = machine("cat");
        m.submit_input("c");
        tick_n(&mut m, 10);
        m.submit_input("cattle");
        let snap = m.snapshot();
        assert_eq!(snap.status, SessionStatus::Finished);
        assert_eq!(snap.typed_input, "cat");
        assert_eq!(snap.stats.errors, 0);
    }

    #[test]
    fn test_overflow_from_idle_finishes() {
        let mut m = machine("hi");
        m.submit_input("hi there");
        assert_eq!(m.status(), SessionStatus::Finished);
        assert_eq!(m.typed(), "hi");
    }

    #[test]
    fn test_input_ignored_once_finished() {
        let mut m = machine("ab");
        m.submit_input("ab");
        let stats = m.snapshot().stats;
        m.submit_input("a");
        m.submit_input("");
        assert_eq!(m.status(), SessionStatus::Finished);
        assert_eq!(m.typed(), "ab");
        assert_eq!(m.snapshot().stats, stats);
    }

    #[test]
    fn test_unicode_lengths() {
        let mut m = machine("né");
        m.submit_input("n");
        m.submit_input("né");
        assert_eq!(m.status(), SessionStatus::Finished);
    }

    #[test]
    fn test_request_new_session_mid_run() {
        let mut m = machine("cat");
        m.submit_input("c");
        tick_n(&mut m, 123);
        assert_relative_eq!(m.snapshot().elapsed_secs, 12.3);

        m.request_new_session();
        tick_n(&mut m, 10);

        let snap = m.snapshot();
        assert_eq!(snap.status, SessionStatus::Idle);
        assert_eq!(snap.elapsed_secs, 0.0);
        assert_eq!(snap.typed_input, "");
        assert_eq!(snap.stats, Stats::default());
        assert!(!m.session().clock().is_running());
    }

    #[test]
    fn test_request_new_session_twice() {
        let pool = PassagePool::new("two", vec!["one".into(), "two".into()]).unwrap();
        let mut m = SessionMachine::new(Box::new(pool));
        m.submit_input("o");
        for _ in 0..2 {
            m.request_new_session();
            let snap = m.snapshot();
            assert_matches!(snap.status, SessionStatus::Idle);
            assert_eq!(snap.elapsed_secs, 0.0);
            assert_eq!(snap.stats, Stats::default());
            assert!(snap.passage == "one" || snap.passage == "two");
        }
    }

    #[test]
    fn test_retry_keeps_passage() {
        let mut m = machine("dog");
        m.submit_input("dxg");
        assert_eq!(m.status(), SessionStatus::Finished);
        m.retry();
        let snap = m.snapshot();
        assert_eq!(snap.passage, "dog");
        assert_eq!(snap.status, SessionStatus::Idle);
        assert_eq!(snap.typed_input, "");
        assert_eq!(snap.stats, Stats::default());
    }

    #[test]
    fn test_new_session_after_finish_accepts_input_again() {
        let mut m = machine("ab");
        m.submit_input("ab");
        m.request_new_session();
        m.submit_input("a");
        assert_eq!(m.status(), SessionStatus::Running);
    }

    #[test]
    fn test_snapshot_char_classes() {
        let mut m = machine("abc");
        m.submit_input("ax");
        let classes = m.snapshot().char_classes();
        assert_eq!(classes[0].1, CharClass::Correct);
        assert_eq!(classes[1].1, CharClass::Incorrect);
        assert_eq!(classes[2].1, CharClass::Current);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SessionStatus::Idle.to_string(), "Idle");
        assert_eq!(SessionStatus::Finished.to_string(), "Finished");
    }
}
