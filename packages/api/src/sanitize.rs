/// Remove anything that looks like a markup tag from `text`.
///
/// Error bodies from the server may be HTML pages; they are shown as plain text,
/// so every `<...>` run is dropped, including an unterminated trailing `<...`.
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match (in_tag, c) {
            (false, '<') => in_tag = true,
            (false, c) => out.push(c),
            (true, '>') => in_tag = false,
            (true, _) => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_markup("<b>boom</b> bad"), "boom bad");
        assert_eq!(
            strip_markup("<html><body><h1>Server Error (500)</h1></body></html>"),
            "Server Error (500)"
        );
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(strip_markup("Preview failed: 3 > 2"), "Preview failed: 3 > 2");
    }

    #[test]
    fn test_unterminated_tag_dropped() {
        assert_eq!(strip_markup("oops <script src=x"), "oops ");
    }
}
