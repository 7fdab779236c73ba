use std::sync::LazyLock;

use regex::Regex;

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("markup pattern compiles"));
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("blank pattern compiles"));

/// `speech_01.txt` -> `SPEECH_01`
pub fn source_label(file: &str) -> String {
    file.split('.').next().unwrap_or(file).to_uppercase()
}

/// Flattens rendered NER markup to readable text.
///
/// A tag closing an entity highlight is replaced by a space so that the
/// entity and its type label do not run together.
pub fn plain_text(markup: &str) -> String {
    let without_breaks = markup
        .replace("<br>", "\n")
        .replace("<br/>", "\n")
        .replace("<br />", "\n");
    let without_tags = MARKUP_TAG.replace_all(&without_breaks, " ");
    let decoded = decode_entities(&without_tags);
    let collapsed = BLANK_RUN.replace_all(&decoded, " ");

    collapsed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Truncates an entity string to fit inside a fixed-width box.
pub fn short_entity(entity: &str, max_chars: usize) -> String {
    if entity.chars().count() <= max_chars {
        return entity.to_owned();
    }

    let mut short = entity
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect::<String>();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_label_uppercases_file_stem() {
        assert_eq!(source_label("speech_01.txt"), "SPEECH_01");
        assert_eq!(source_label("noext"), "NOEXT");
    }

    #[test]
    fn plain_text_strips_entity_markup() {
        let markup = r#"<div class="entities"><mark class="entity">Alice <span>PERSON</span></mark> went to <mark>Paris<span>GPE</span></mark> &amp; back.</div>"#;

        assert_eq!(plain_text(markup), "Alice PERSON went to Paris GPE & back.");
    }

    #[test]
    fn plain_text_keeps_line_breaks() {
        assert_eq!(plain_text("first<br>  second  <br/>\n\nthird"), "first\nsecond\nthird");
    }

    #[test]
    fn short_entity_truncates_long_names() {
        assert_eq!(short_entity("Paris", 10), "Paris");
        assert_eq!(short_entity("United Nations General Assembly", 10), "United Na…");
    }
}
