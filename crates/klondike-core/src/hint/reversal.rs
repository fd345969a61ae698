//! Textual inverses of move descriptors. Hints must not simply undo the
//! player's previous move, so candidates are compared against the inverse of
//! the last descriptor.

const WASTE_TO_TABLEAU: &str = "move waste to tableau ";
const TABLEAU_PREFIX: &str = "move tableau ";
const TO_WASTE: &str = " to waste";
const CARDS_FROM_TABLEAU: &str = "move cards from tableau ";

/// The descriptor that would put things back the way they were, when one
/// exists.
///
/// Draws, recycles and foundation moves have no inverse.
pub fn reversal_of(descriptor: &str) -> Option<String> {
    let lowered = descriptor.trim().to_ascii_lowercase();

    if let Some(number) = lowered.strip_prefix(WASTE_TO_TABLEAU) {
        return Some(format!("Move tableau {} to waste", number.trim()));
    }

    if let Some(number) = lowered
        .strip_prefix(TABLEAU_PREFIX)
        .and_then(|rest| rest.strip_suffix(TO_WASTE))
    {
        return Some(format!("Move waste to tableau {}", number.trim()));
    }

    if let Some(rest) = lowered.strip_prefix(CARDS_FROM_TABLEAU) {
        let words: Vec<&str> = rest.split_whitespace().collect();
        if let [from, "to", "tableau", to] = words.as_slice() {
            return Some(format!("Move cards from tableau {to} to tableau {from}"));
        }
    }

    None
}

/// Whether `candidate` would undo `last_move`. Comparison ignores ASCII case.
pub fn is_reversal(candidate: &str, last_move: Option<&str>) -> bool {
    last_move
        .and_then(reversal_of)
        .is_some_and(|inverse| candidate.trim().eq_ignore_ascii_case(&inverse))
}
