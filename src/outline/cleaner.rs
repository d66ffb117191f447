//! Text fragment cleanup applied to every title and content string

use once_cell::sync::Lazy;
use regex::Regex;

const JS_BANNER: &str = "You need to enable JavaScript to run this app.";

static SCRIPT_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"src=".*?\.js">"#).expect("Invalid script src regex pattern"));

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").expect("Invalid tag regex pattern"));

static ABSOLUTE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("Invalid URL regex pattern"));

static BARE_WWW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"www\.\S+").expect("Invalid www regex pattern"));

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+").expect("Invalid email regex pattern"));

static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("Invalid comment regex pattern"));

/// Normalizes a raw text fragment
///
/// Whitespace control characters become spaces, anything outside printable
/// ASCII is dropped and whitespace runs collapse to a single space before the
/// pattern passes run. Each pass removes script remnants, the "enable
/// JavaScript" banner, tag remnants, absolute URLs, bare `www.` hosts,
/// email-like tokens and HTML comments, then collapses whitespace again.
/// Passes repeat until the text stops changing. The result is trimmed.
///
/// Cleaning is idempotent: `clean_text(&clean_text(s)) == clean_text(s)`.
///
/// # Examples
///
/// ```
/// use sumi_outline::clean_text;
///
/// assert_eq!(clean_text("  Hello\n\tworld  "), "Hello world");
/// assert_eq!(clean_text("Mail me@example.com or visit https://x.test now"), "Mail or visit now");
/// ```
pub fn clean_text(raw: &str) -> String {
    let printable: String = raw
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| (' '..='~').contains(c))
        .collect();

    // A removal can expose another match, so run the passes to a fixed point
    let mut text = collapse_whitespace(&printable);
    loop {
        let next = strip_patterns(&text);
        if next == text {
            return text;
        }
        text = next;
    }
}

/// One round of every removal, followed by whitespace collapsing
fn strip_patterns(text: &str) -> String {
    let text = SCRIPT_SRC.replace_all(text, "");
    let text = text.replace(JS_BANNER, "");
    let text = TAG.replace_all(&text, "");
    let text = ABSOLUTE_URL.replace_all(&text, "");
    let text = BARE_WWW.replace_all(&text, "");
    let text = EMAIL.replace_all(&text, "");
    let text = COMMENT.replace_all(&text, "");

    collapse_whitespace(&text)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
