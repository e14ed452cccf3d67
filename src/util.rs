use std::borrow::Cow;

/// Shortens `text` to at most `max_chars` characters, ending in an ellipsis
/// when anything was cut.
pub fn ellipsize(text: &str, max_chars: usize) -> Cow<'_, str> {
    if text.chars().count() <= max_chars {
        return Cow::Borrowed(text);
    }

    let keep = max_chars.saturating_sub(1);
    let mut shortened = text.chars().take(keep).collect::<String>();
    shortened.truncate(shortened.trim_end().len());
    shortened.push('…');
    Cow::Owned(shortened)
}

pub fn phase_label(phase_number: Option<u32>, ordinal: usize) -> String {
    format!("Phase {}", phase_number.map_or(ordinal as u64 + 1, u64::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_borrowed() {
        assert!(matches!(ellipsize("DNS", 10), Cow::Borrowed("DNS")));
    }

    #[test]
    fn long_text_is_cut_on_char_boundaries() {
        assert_eq!(ellipsize("Conversión tracking", 11), "Conversión…");
        assert_eq!(ellipsize("Two words", 5), "Two…");
        assert_eq!(ellipsize("abc", 0), "…");
    }

    #[test]
    fn phase_label_falls_back_to_ordinal() {
        assert_eq!(phase_label(Some(3), 0), "Phase 3");
        assert_eq!(phase_label(None, 4), "Phase 5");
    }
}
