//! Keyword patterns: bounded-gap, reverse-contiguous and exact-phrase search.
//!
//! Every pattern relates two keywords, a *lead* and a *trail*:
//!
//! | shape       | text form                    | example                  |
//! |-------------|------------------------------|--------------------------|
//! | `Proximity` | lead, ≤ `max_gap` chars, trail | "reset my old password" |
//! | `Reverse`   | trail, whitespace, lead      | "password reset"         |
//! | `Phrase`    | lead, one space, trail       | "reset password"         |
//!
//! Keywords match case-insensitively on word boundaries only. The `regex`
//! crate has no look-around, so exclusions are checked against the text on
//! either side of each keyword occurrence instead of inside one expression;
//! exclusion words compare ASCII case-insensitively.

use crate::ClassifierError;
use regex::Regex;
use std::fmt;

// ---------------------------------------------------------------------------
// Spans
// ---------------------------------------------------------------------------

/// Byte range of a match inside the whitespace-normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

// ---------------------------------------------------------------------------
// Textual rules
// ---------------------------------------------------------------------------

/// Context in which a keyword occurrence does not count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exclusion {
    /// The keyword directly follows this whole word and whitespace ("in order").
    PrecededBy(String),
    /// Whitespace and this whole word directly follow the keyword ("order to").
    FollowedBy(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSpec {
    pub word: String,
    pub exclusions: Vec<Exclusion>,
}

impl KeywordSpec {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            exclusions: Vec::new(),
        }
    }

    pub fn except_preceded_by(mut self, word: impl Into<String>) -> Self {
        self.exclusions.push(Exclusion::PrecededBy(word.into()));
        self
    }

    pub fn except_followed_by(mut self, word: impl Into<String>) -> Self {
        self.exclusions.push(Exclusion::FollowedBy(word.into()));
        self
    }
}

impl From<&str> for KeywordSpec {
    fn from(word: &str) -> Self {
        Self::new(word)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternShape {
    /// Lead before trail with at most `max_gap` characters in between.
    Proximity { max_gap: usize },
    /// Trail before lead, separated by whitespace only.
    Reverse,
    /// Lead, a single space, trail.
    Phrase,
}

/// Uncompiled pattern rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSpec {
    pub shape: PatternShape,
    pub lead: KeywordSpec,
    pub trail: KeywordSpec,
}

impl PatternSpec {
    pub fn proximity(
        lead: impl Into<KeywordSpec>,
        trail: impl Into<KeywordSpec>,
        max_gap: usize,
    ) -> Self {
        Self {
            shape: PatternShape::Proximity { max_gap },
            lead: lead.into(),
            trail: trail.into(),
        }
    }

    pub fn reverse(lead: impl Into<KeywordSpec>, trail: impl Into<KeywordSpec>) -> Self {
        Self {
            shape: PatternShape::Reverse,
            lead: lead.into(),
            trail: trail.into(),
        }
    }

    pub fn phrase(lead: impl Into<KeywordSpec>, trail: impl Into<KeywordSpec>) -> Self {
        Self {
            shape: PatternShape::Phrase,
            lead: lead.into(),
            trail: trail.into(),
        }
    }

    pub fn compile(&self) -> Result<Pattern, ClassifierError> {
        Ok(Pattern {
            shape: self.shape,
            lead: Keyword::compile(&self.lead)?,
            trail: Keyword::compile(&self.trail)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Compiled form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Keyword {
    word: String,
    matcher: Regex,
    preceded_by: Vec<String>,
    followed_by: Vec<String>,
}

impl Keyword {
    fn compile(spec: &KeywordSpec) -> Result<Self, ClassifierError> {
        let word = checked_word(&spec.word)?;
        let mut preceded_by = Vec::new();
        let mut followed_by = Vec::new();

        for exclusion in &spec.exclusions {
            match exclusion {
                Exclusion::PrecededBy(w) => preceded_by.push(checked_word(w)?.to_string()),
                Exclusion::FollowedBy(w) => followed_by.push(checked_word(w)?.to_string()),
            }
        }

        Ok(Self {
            word: word.to_string(),
            matcher: Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word)))?,
            preceded_by,
            followed_by,
        })
    }

    /// All non-excluded occurrences, in text order.
    fn occurrences(&self, text: &str) -> Vec<MatchSpan> {
        self.matcher
            .find_iter(text)
            .map(|m| MatchSpan {
                start: m.start(),
                end: m.end(),
            })
            .filter(|span| !self.is_excluded(text, *span))
            .collect()
    }

    fn is_excluded(&self, text: &str, span: MatchSpan) -> bool {
        let before = &text[..span.start];
        let after = &text[span.end..];
        self.preceded_by.iter().any(|w| ends_with_word(before, w))
            || self.followed_by.iter().any(|w| starts_with_word(after, w))
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn checked_word(word: &str) -> Result<&str, ClassifierError> {
    if word.is_empty() {
        return Err(ClassifierError::EmptyKeyword);
    }
    let edges_ok = word.starts_with(is_word_char) && word.ends_with(is_word_char);
    if !edges_ok || word.chars().any(char::is_whitespace) {
        return Err(ClassifierError::InvalidKeyword(word.to_string()));
    }
    Ok(word)
}

/// `before` ends with the whole word `word` plus at least one whitespace
/// character. Only the trailing whitespace run and the word are inspected.
fn ends_with_word(before: &str, word: &str) -> bool {
    let trimmed = before.trim_end();
    if trimmed.len() == before.len() {
        return false;
    }
    let Some(split) = trimmed.len().checked_sub(word.len()) else {
        return false;
    };
    if !trimmed.is_char_boundary(split) {
        return false;
    }
    let (head, tail) = trimmed.split_at(split);
    tail.eq_ignore_ascii_case(word) && !head.ends_with(is_word_char)
}

/// `after` starts with at least one whitespace character and then the
/// whole word `word`.
fn starts_with_word(after: &str, word: &str) -> bool {
    let trimmed = after.trim_start();
    if trimmed.len() == after.len()
        || trimmed.len() < word.len()
        || !trimmed.is_char_boundary(word.len())
    {
        return false;
    }
    let (head, rest) = trimmed.split_at(word.len());
    head.eq_ignore_ascii_case(word) && !rest.starts_with(is_word_char)
}

/// A compiled, immutable pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    shape: PatternShape,
    lead: Keyword,
    trail: Keyword,
}

impl Pattern {
    /// Leftmost match in `text`. Callers pass whitespace-normalized text.
    ///
    /// Runs in time linear in `text`: occurrence lists are sorted, so each
    /// search walks them once.
    pub fn find(&self, text: &str) -> Option<MatchSpan> {
        let leads = self.lead.occurrences(text);
        if leads.is_empty() {
            return None;
        }
        let trails = self.trail.occurrences(text);

        match self.shape {
            PatternShape::Proximity { max_gap } => find_proximity(text, &leads, &trails, max_gap),
            PatternShape::Reverse => find_adjacent(text, &trails, &leads, |gap| {
                !gap.is_empty() && gap.chars().all(char::is_whitespace)
            }),
            PatternShape::Phrase => find_adjacent(text, &leads, &trails, |gap| gap == " "),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lead, trail) = (&self.lead.word, &self.trail.word);
        match self.shape {
            PatternShape::Proximity { max_gap } => write!(f, "{lead} ..{max_gap}.. {trail}"),
            PatternShape::Reverse => write!(f, "{trail} {lead} (reverse)"),
            PatternShape::Phrase => write!(f, "\"{lead} {trail}\""),
        }
    }
}

/// At most `max_gap` characters. A char is at most 4 bytes, so longer byte
/// runs are rejected without counting.
fn gap_within(gap: &str, max_gap: usize) -> bool {
    gap.len() <= max_gap
        || (gap.len() <= max_gap.saturating_mul(4) && gap.chars().count() <= max_gap)
}

/// Index of the first span in `spans[from..]` starting at or after `pos`.
fn advance(spans: &[MatchSpan], mut from: usize, pos: usize) -> usize {
    while from < spans.len() && spans[from].start < pos {
        from += 1;
    }
    from
}

/// First lead occurrence whose nearest following trail is within `max_gap`
/// characters. Farther trails only widen the gap.
fn find_proximity(
    text: &str,
    leads: &[MatchSpan],
    trails: &[MatchSpan],
    max_gap: usize,
) -> Option<MatchSpan> {
    let mut next = 0;
    for lead in leads {
        next = advance(trails, next, lead.end);
        let trail = trails.get(next)?;
        if gap_within(&text[lead.end..trail.start], max_gap) {
            return Some(MatchSpan {
                start: lead.start,
                end: trail.end,
            });
        }
    }
    None
}

/// First `first` occurrence whose next `second` occurrence is separated by a
/// gap accepted by `gap_ok`.
fn find_adjacent(
    text: &str,
    first: &[MatchSpan],
    second: &[MatchSpan],
    gap_ok: impl Fn(&str) -> bool,
) -> Option<MatchSpan> {
    let mut next = 0;
    for a in first {
        next = advance(second, next, a.end);
        let b = second.get(next)?;
        if gap_ok(&text[a.end..b.start]) {
            return Some(MatchSpan {
                start: a.start,
                end: b.end,
            });
        }
    }
    None
}
