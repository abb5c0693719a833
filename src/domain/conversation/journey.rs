//! Emotional-journey summarization.
//!
//! Derives a natural-language phrase from the frequency distribution of
//! emotion labels across a conversation's user turns. The summary is a pure
//! function of the turn history and is recomputed on each request.

use crate::domain::emotion::EmotionLabel;

use super::{ConversationTurn, TurnRole};

/// Summarizes the dominant emotions seen across user turns.
///
/// Returns:
/// - the empty string when no user turn carries an emotion yet;
/// - a single-label phrase when only one distinct label occurs;
/// - a two-label phrase naming the top two labels by descending frequency.
///
/// Ties are broken by first occurrence in the history, so the summary is
/// deterministic for a given turn sequence.
pub fn summarize_emotional_journey(turns: &[ConversationTurn]) -> String {
    let mut counts: Vec<(EmotionLabel, usize)> = Vec::new();

    for turn in turns {
        if turn.role != TurnRole::User {
            continue;
        }
        let Some(label) = turn.emotion else { continue };
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label, 1)),
        }
    }

    if counts.is_empty() {
        return String::new();
    }

    // Stable sort keeps first-occurrence order for equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    match counts.as_slice() {
        [(only, _)] => format!("So far, you've mostly been feeling {}.", only),
        [(top, _), (second, _), ..] => format!(
            "So far, you've mostly been feeling {}, but also had moments of {}.",
            top, second
        ),
        [] => unreachable!("empty case handled above"),
    }
}
