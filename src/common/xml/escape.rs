use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Whitespace characters are written as character references so that attribute
// value normalization on the next parse does not turn them into spaces.
static ATTRIBUTE_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::new(["&", "<", ">", "\"", "'", "\t", "\n", "\r"])
        .expect("Failed to build XML attribute escaper")
});

static TEXT_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::new(["&", "<", ">", "\r"]).expect("Failed to build XML text escaper")
});

/// Escape a string for use inside a double-quoted attribute value.
///
/// # Examples
///
/// ```
/// use longan::common::xml::escape_attribute;
/// assert_eq!(escape_attribute("a & \"b\""), "a &amp; &quot;b&quot;");
/// assert_eq!(escape_attribute("line\nbreak"), "line&#10;break");
/// ```
#[inline]
pub fn escape_attribute(s: &str) -> String {
    ATTRIBUTE_ESCAPER.replace_all(
        s,
        &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;", "&#9;", "&#10;", "&#13;"],
    )
}

/// Escape a string for use as character data.
///
/// Quotes are left alone, they carry no meaning outside of markup.
///
/// # Examples
///
/// ```
/// use longan::common::xml::escape_text;
/// assert_eq!(escape_text("<b> & \"c\""), "&lt;b&gt; &amp; \"c\"");
/// ```
#[inline]
pub fn escape_text(s: &str) -> String {
    TEXT_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&#13;"])
}
