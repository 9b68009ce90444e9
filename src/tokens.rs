use regex::Regex;
use std::fmt;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TokenKind {
    OpenParen,
    CloseParen,
    Atom,
}

/// A view into the input buffer. Tokens own no text, so the buffer has to
/// outlive both tokenizing and parsing.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn from_capture(text: &'a str) -> Self {
        let kind = match text {
            "(" => TokenKind::OpenParen,
            ")" => TokenKind::CloseParen,
            _ => TokenKind::Atom,
        };
        Token { kind, text }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

pub fn tokenize(input: &str) -> Vec<Token> {
    lazy_static! {
        // Only U+0020 separates tokens. Tabs and newlines end up inside atoms.
        static ref TOKEN_RE: Regex = Regex::new(
            r#"(?x)
                ^\x20*               # runs of spaces, ignored
                (                    # token capture group
                    [()]             # a single paren
                    |[^\x20()]+      # an atom: anything up to a space or paren
                )
            "#
        )
        .unwrap();
    }
    let mut input = input;
    let mut tokens = Vec::new();
    while let Some(caps) = TOKEN_RE.captures(input) {
        let (whole, token) = match (caps.get(0), caps.get(1)) {
            (Some(whole), Some(token)) => (whole, token),
            _ => break,
        };
        tokens.push(Token::from_capture(token.as_str()));
        input = &input[whole.end()..];
    }
    log::trace!("tokenized into {} tokens", tokens.len());
    tokens
}
