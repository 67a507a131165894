const BULLETS: &[char] = &['-', '•', '·', '–', '—', '>'];
const QUOTES: &[char] = &['"', '“', '”'];

/// Strips the markup a post renderer must not receive.
///
/// Bold markers go everywhere. Bullets, dashes and double quotes go from the start, double
/// quotes from the end. A leading `*` only counts as a bullet when whitespace follows it.
/// With `strict`, double quotes are removed from the whole string first, so that dropping
/// them can never glue two `*` into a fresh bold marker.
pub fn sanitize(text: &str, strict: bool) -> String {
    let text = if strict {
        text.replace(QUOTES, "")
    } else {
        text.to_owned()
    };

    let text = text.replace("**", "");

    trim_leading(&text)
        .trim_end_matches(|c: char| c.is_whitespace() || QUOTES.contains(&c))
        .to_owned()
}

fn trim_leading(mut text: &str) -> &str {
    loop {
        let trimmed = text
            .trim_start_matches(|c: char| c.is_whitespace() || BULLETS.contains(&c) || QUOTES.contains(&c));

        match trimmed.strip_prefix('*') {
            Some(rest) if rest.starts_with(char::is_whitespace) => text = rest,
            _ => return trimmed,
        }
    }
}
