use regex::Regex;
use std::sync::LazyLock;

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Strip markup from a catalog's free-text summary, leaving collapsed plain
/// text. Handles the handful of entities these catalogs actually emit.
pub fn strip_html(raw: &str) -> String {
    let text = TAG_PATTERN.replace_all(raw, " ");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_collapses_whitespace() {
        let raw = "<p><b>Dark</b> is a German  series.</p>\n<p>Time travel.</p>";
        assert_eq!(strip_html(raw), "Dark is a German series. Time travel.");
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(strip_html("Tom &amp; Jerry &quot;classic&quot;"), "Tom & Jerry \"classic\"");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_html("No markup here"), "No markup here");
    }
}
