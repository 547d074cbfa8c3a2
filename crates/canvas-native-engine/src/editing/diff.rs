use crate::parsing::rope::TextRange;

/// The smallest single replacement turning `before` into `after`, as a range
/// of `before` in UTF-16 units and the text that replaces it.
///
/// Found by trimming the common prefix and suffix. Returns `None` when the
/// strings are equal. The range never splits a surrogate pair.
pub fn replacement(before: &str, after: &str) -> Option<(TextRange, String)> {
    if before == after {
        return None;
    }
    let old: Vec<u16> = before.encode_utf16().collect();
    let new: Vec<u16> = after.encode_utf16().collect();

    let mut prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
    if prefix > 0 && is_high_surrogate(old[prefix - 1]) {
        prefix -= 1;
    }

    let max_suffix = old.len().min(new.len()) - prefix;
    let mut suffix = old
        .iter()
        .rev()
        .zip(new.iter().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a == b)
        .count();
    if suffix > 0 && is_low_surrogate(old[old.len() - suffix]) {
        suffix -= 1;
    }

    let range = TextRange::from_bounds(prefix, old.len() - suffix);
    let text = String::from_utf16_lossy(&new[prefix..new.len() - suffix]);
    Some((range, text))
}

fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..0xDC00).contains(&unit)
}

fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..0xE000).contains(&unit)
}
