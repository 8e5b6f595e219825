//! Text input handling.
//!
//! The controls panel feeds raw text in; this module decides which words
//! are *completed* (followed by whitespace), how every word is tinted in
//! the overlay, and what the status line says.

use crate::branchless::color::sequence_color;

/// Modulus of the token id shown in the navigation panel.
pub const TOKEN_ID_SPACE: i64 = 50_000;

pub const IDLE_STATUS: &str = "Type words to explore the semantic galaxy...";
pub const NARROWED_STATUS: &str = "Probability field narrowed.";

/// Words followed by whitespace; the trailing partial word is dropped.
pub fn completed_words(text: &str) -> Vec<&str> {
    match text.rfind(char::is_whitespace) {
        Some(end) => text[..end].split_whitespace().collect(),
        None => Vec::new(),
    }
}

/// One run of the overlay: either a word (tinted by its position) or the
/// whitespace between words.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordSpan<'a> {
    pub text: &'a str,
    /// `None` for whitespace
    pub color: Option<[f32; 3]>,
}

/// Split `text` into alternating word / whitespace runs, coloring every
/// word including the one still being typed.
pub fn word_spans(text: &str) -> Vec<WordSpan<'_>> {
    let mut spans = Vec::new();
    let mut word_index = 0;
    let mut start = 0;
    let mut in_space: Option<bool> = None;

    for (i, ch) in text.char_indices() {
        let space = ch.is_whitespace();
        match in_space {
            Some(prev) if prev == space => {}
            Some(prev) => {
                spans.push(span(&text[start..i], prev, &mut word_index));
                start = i;
            }
            None => {}
        }
        in_space = Some(space);
    }
    if let Some(prev) = in_space {
        spans.push(span(&text[start..], prev, &mut word_index));
    }
    spans
}

fn span<'a>(text: &'a str, is_space: bool, word_index: &mut usize) -> WordSpan<'a> {
    if is_space {
        return WordSpan { text, color: None };
    }
    let color = sequence_color(*word_index);
    *word_index += 1;
    WordSpan {
        text,
        color: Some(color),
    }
}

/// Overlay color as 8-bit RGB (floor of channel × 255).
pub fn overlay_rgb(color: [f32; 3]) -> [u8; 3] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).floor() as u8)
}

/// Status line under the input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub headline: String,
    pub detail: Option<&'static str>,
}

pub fn status_line<S: AsRef<str>>(words: &[S]) -> StatusLine {
    if words.is_empty() {
        return StatusLine {
            headline: IDLE_STATUS.to_string(),
            detail: None,
        };
    }
    let joined = words
        .iter()
        .map(|w| w.as_ref())
        .collect::<Vec<_>>()
        .join(" → ");
    StatusLine {
        headline: format!("Sequence: {}", joined),
        detail: Some(NARROWED_STATUS),
    }
}

/// Display-only token id: 32-bit string hash (`h * 31 + unit` over UTF-16
/// code units, wrapping), absolute value, mod 50000.
pub fn token_id(word: &str) -> u32 {
    let hash = word
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32));
    // i64 so that |i32::MIN| does not overflow
    ((hash as i64).abs() % TOKEN_ID_SPACE) as u32
}
