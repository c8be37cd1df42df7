//! Bigram Dice coefficient
//!
//! `2 * |shared bigrams| / (|bigrams(a)| + |bigrams(b)|)` where bigrams are
//! adjacent character pairs counted with multiplicity. Whitespace is removed
//! before bigrams are built, so `"ram kumar"` and `"ramkumar"` are identical.

/// Dice similarity of two already-cleaned strings, in `[0, 1]`.
///
/// Strings shorter than two characters have no bigrams: they score 1.0 when
/// equal and 0.0 otherwise.
pub fn dice_coefficient(a: &str, b: &str) -> f64 {
    strsim::sorensen_dice(a, b).clamp(0.0, 1.0)
}
