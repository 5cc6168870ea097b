//! Rewrites assistant replies into display markup.
//!
//! The rules run in declaration order and the order is part of the output
//! contract: the sentence rule consumes the whitespace that the newline
//! rules would otherwise turn into breaks, and the numbered-list rule must
//! see `N. ` before the sentence rule rewrites it.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

pub struct RewriteRule {
    pub name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl RewriteRule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("display rewrite pattern should compile"),
            replacement,
        }
    }

    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(text, self.replacement)
    }
}

pub static DISPLAY_RULES: LazyLock<Vec<RewriteRule>> = LazyLock::new(|| {
    vec![
        RewriteRule::new(
            "numbered_list",
            r"([0-9]+)\.\s+",
            "<br><strong>${1}.</strong> ",
        ),
        RewriteRule::new("bullet_glyph", r"•\s+", "<br>• "),
        RewriteRule::new("bullet_asterisk", r"\*\s+", "<br>• "),
        RewriteRule::new(
            "section_header",
            r"(?i)(Morning Routine|Evening Routine|Step [0-9]+|Application|Benefits|Tips|Important)",
            "<br><br><strong>${1}</strong>",
        ),
        RewriteRule::new("sentence_break", r"\.\s+([A-Z])", ".<br><br>${1}"),
        RewriteRule::new("paragraph_newline", r"\n\n", "<br><br>"),
        RewriteRule::new("line_newline", r"\n", "<br>"),
    ]
});

pub fn format_for_display(text: &str) -> String {
    let formatted = DISPLAY_RULES
        .iter()
        .fold(text.to_string(), |acc, rule| rule.apply(&acc).into_owned());
    formatted.trim().to_string()
}
