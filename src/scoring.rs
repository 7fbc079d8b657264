use itertools::{EitherOrBoth, Itertools};

/// Result of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub wpm: u32,
    /// integer percentage, 0..=100
    pub accuracy: u8,
    pub errors: usize,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            wpm: 0,
            accuracy: 100,
            errors: 0,
        }
    }
}

/// How the display surface should style one passage character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Correct,
    Incorrect,
    /// next character to be typed
    Current,
    Pending,
}

pub fn compute_stats(passage: &str, typed: &str, elapsed_secs: f64) -> Stats {
    let errors = count_errors(passage, typed);
    Stats {
        wpm: wpm(word_count(passage), elapsed_secs),
        accuracy: accuracy(typed.chars().count(), errors),
        errors,
    }
}

/// Positions of `typed` that differ from `passage`. Typed chars past the end
/// of the passage have nothing to match and count as errors.
pub fn count_errors(passage: &str, typed: &str) -> usize {
    typed
        .chars()
        .zip_longest(passage.chars())
        .filter(|pair| match pair {
            EitherOrBoth::Both(t, p) => t != p,
            EitherOrBoth::Left(_) => true,
            EitherOrBoth::Right(_) => false,
        })
        .count()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn accuracy(typed_len: usize, errors: usize) -> u8 {
    if typed_len == 0 {
        return 100;
    }
    let ratio = typed_len.saturating_sub(errors) as f64 / typed_len as f64;
    (ratio.max(0.0) * 100.0).round() as u8
}

/// Words per minute over the whole passage. Zero elapsed time gives a
/// non-finite rate, which is reported as 0.
pub fn wpm(words: usize, elapsed_secs: f64) -> u32 {
    let rate = (words as f64 / (elapsed_secs / 60.0)).round();
    if rate.is_finite() && rate >= 0.0 {
        rate as u32
    } else {
        0
    }
}

pub fn classify(passage: &str, typed: &str) -> Vec<(char, CharClass)> {
    let typed: Vec<char> = typed.chars().collect();
    passage
        .chars()
        .enumerate()
        .map(|(idx, expected)| {
            let class = match typed.get(idx) {
                Some(&c) if c == expected => CharClass::Correct,
                Some(_) => CharClass::Incorrect,
                None if idx == typed.len() => CharClass::Current,
                None => CharClass::Pending,
            };
            (expected, class)
        })
        .collect()
}
