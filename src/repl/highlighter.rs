use lazy_static::lazy_static;
use owo_colors::OwoColorize;
use regex::Regex;
use rustyline::highlight::{Highlighter, MatchingBracketHighlighter};
use rustyline_derive::{Completer, Helper, Hinter, Validator};
use std::borrow::Cow::{self, Owned};

lazy_static! {
    static ref COMMENT_RE: Regex = Regex::new(r";.*").unwrap();
    static ref NUMBER_RE: Regex = Regex::new(r"[-+]?\b\d+(\.\d*)?([eE][+-]?\d+)?\b").unwrap();
    static ref KEYWORD_RE: Regex =
        Regex::new(r"\b(let|lambda|define|mu|quote|if|cond|begin|and|or|else)\b").unwrap();
    static ref LITERAL_RE: Regex = Regex::new(r"#[tf]\b|\b(true|false|nil)\b").unwrap();
    static ref PARENS_RE: Regex = Regex::new(r"[()']").unwrap();
}

#[derive(Clone, Copy)]
enum TokenStyle {
    Comment,
    Number,
    Keyword,
    Literal,
    Paren,
}

fn paint(text: &str, style: TokenStyle) -> String {
    match style {
        TokenStyle::Comment => text.bright_black().to_string(),
        TokenStyle::Number => text.magenta().to_string(),
        TokenStyle::Keyword => text.cyan().bold().to_string(),
        TokenStyle::Literal => text.yellow().to_string(),
        TokenStyle::Paren => text.blue().to_string(),
    }
}

/// Wraps recognized tokens of `line` in ANSI colors. Unrecognized text is
/// copied through unchanged.
pub fn highlight_line(line: &str) -> String {
    let tokens_with_styles: [(&Regex, TokenStyle); 5] = [
        (&*COMMENT_RE, TokenStyle::Comment),
        (&*NUMBER_RE, TokenStyle::Number),
        (&*KEYWORD_RE, TokenStyle::Keyword),
        (&*LITERAL_RE, TokenStyle::Literal),
        (&*PARENS_RE, TokenStyle::Paren),
    ];

    let mut styled = String::with_capacity(line.len());
    let mut current_pos = 0;
    while current_pos < line.len() {
        let token = tokens_with_styles.iter().find_map(|(regex, style)| {
            regex
                .find_at(line, current_pos)
                .filter(|mat| mat.start() == current_pos && mat.end() > current_pos)
                .map(|mat| (mat.end(), *style))
        });

        match token {
            Some((end, style)) => {
                styled.push_str(&paint(&line[current_pos..end], style));
                current_pos = end;
            }
            None => {
                let end = line[current_pos..]
                    .chars()
                    .next()
                    .map_or(line.len(), |c| current_pos + c.len_utf8());
                styled.push_str(&line[current_pos..end]);
                current_pos = end;
            }
        }
    }
    styled
}

#[derive(Default)]
pub struct SchemeHighlighter {
    matching_bracket_highlighter: MatchingBracketHighlighter,
}

impl Highlighter for SchemeHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Owned(highlight_line(line))
    }

    fn highlight_char(&self, line: &str, pos: usize, forced: bool) -> bool {
        self.matching_bracket_highlighter
            .highlight_char(line, pos, forced)
    }
}

#[derive(Helper, Completer, Hinter, Validator)]
pub struct ReplHelper {
    highlighter: SchemeHighlighter,
}

impl ReplHelper {
    pub fn new() -> Self {
        Self {
            highlighter: SchemeHighlighter::default(),
        }
    }
}

impl Default for ReplHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_char(&self, line: &str, pos: usize, forced: bool) -> bool {
        self.highlighter.highlight_char(line, pos, forced)
    }
}
