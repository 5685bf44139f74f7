//! HTML escaping for Telegram's HTML parse mode.

/// Escape text so it is safe to interpolate into an HTML-mode message.
///
/// Covers `&`, `<`, `>`, `"` and `'`. Payload content must never be able to
/// open or close tags the relay did not emit itself.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
