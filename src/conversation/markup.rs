//! Inline markup tree for chat bubbles.
//!
//! Only the tags the display rules emit are recognized (`<br>`, `<strong>`,
//! `</strong>`). Anything else stays literal text.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(String),
    Break,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Markup {
    pub inlines: Vec<Inline>,
}

impl Markup {
    pub fn parse(source: &str) -> Self {
        let mut parser = Parser::default();
        let mut rest = source;

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix("<br>") {
                parser.flush();
                parser.inlines.push(Inline::Break);
                rest = after;
            } else if let Some(after) = rest.strip_prefix("<strong>") {
                parser.flush();
                parser.strong = true;
                rest = after;
            } else if let Some(after) = rest.strip_prefix("</strong>") {
                parser.flush();
                parser.strong = false;
                rest = after;
            } else {
                let first = rest.chars().next().map_or(0, char::len_utf8);
                let next_tag = rest[first..]
                    .find('<')
                    .map_or(rest.len(), |index| index + first);
                parser.buffer.push_str(&rest[..next_tag]);
                rest = &rest[next_tag..];
            }
        }

        parser.flush();
        Self {
            inlines: parser.inlines,
        }
    }

    /// Plain text with newlines turned into breaks. Used for user turns,
    /// which are shown as typed.
    pub fn plain(text: &str) -> Self {
        let mut inlines = Vec::new();
        for (index, line) in text.split('\n').enumerate() {
            if index > 0 {
                inlines.push(Inline::Break);
            }
            if !line.is_empty() {
                inlines.push(Inline::Text(line.to_string()));
            }
        }
        Self { inlines }
    }
}

#[derive(Default)]
struct Parser {
    inlines: Vec<Inline>,
    buffer: String,
    strong: bool,
}

impl Parser {
    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.buffer);
        self.inlines.push(if self.strong {
            Inline::Strong(text)
        } else {
            Inline::Text(text)
        });
    }
}
