use crate::tokens::{tokenize, Token, TokenKind};
use crate::types::{Cell, Int};
use regex::Regex;
use std::collections::VecDeque;
use std::fmt;

pub type TokenQueue<'a> = VecDeque<Token<'a>>;
pub type Result<T = Cell> = std::result::Result<T, ParseError>;

/// Deepest list nesting the reader accepts. Evaluation and printing recurse
/// once per level, so this also bounds them for anything that was read.
pub const MAX_DEPTH: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnexpectedEndOfInput,
    UnexpectedCloseParen,
    BadInteger(String),
    TooDeep,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedEndOfInput => write!(f, "unexpected end of input"),
            ParseError::UnexpectedCloseParen => write!(f, "unexpected ')'"),
            ParseError::BadInteger(text) => write!(f, "integer out of range: {}", text),
            ParseError::TooDeep => write!(f, "lists nested deeper than {}", MAX_DEPTH),
        }
    }
}

impl std::error::Error for ParseError {}

pub fn read_str(input: &str) -> Result {
    let mut tokens: TokenQueue = tokenize(input).into_iter().collect();
    let cell = parse(&mut tokens)?;
    if !tokens.is_empty() {
        log::debug!("ignoring {} tokens after the first expression", tokens.len());
    }
    Ok(cell)
}

/// Consume one expression from the front of the queue.
pub fn parse(tokens: &mut TokenQueue) -> Result {
    parse_form(tokens, 0)
}

// `depth` counts the lists already open around this form.
fn parse_form(tokens: &mut TokenQueue, depth: usize) -> Result {
    let token = tokens.pop_front().ok_or(ParseError::UnexpectedEndOfInput)?;
    match token.kind {
        TokenKind::OpenParen if depth >= MAX_DEPTH => Err(ParseError::TooDeep),
        TokenKind::OpenParen => parse_list(tokens, depth + 1).map(Cell::List),
        TokenKind::CloseParen => Err(ParseError::UnexpectedCloseParen),
        TokenKind::Atom => read_atom(token.text),
    }
}

fn parse_list(tokens: &mut TokenQueue, depth: usize) -> Result<Vec<Cell>> {
    let mut elements = Vec::new();
    loop {
        match tokens.front() {
            Some(Token {
                kind: TokenKind::CloseParen,
                ..
            }) => {
                tokens.pop_front();
                return Ok(elements);
            }
            Some(_) => elements.push(parse_form(tokens, depth)?),
            None => return Err(ParseError::UnexpectedEndOfInput),
        }
    }
}

fn read_atom(text: &str) -> Result {
    lazy_static! {
        // A lone "-" is not a number: it names the subtraction builtin.
        static ref NUMBER_RE: Regex = Regex::new(r"^-?[0-9]+$").unwrap();
    }
    if NUMBER_RE.is_match(text) {
        text.parse::<Int>()
            .map(Cell::Number)
            .map_err(|_| ParseError::BadInteger(text.to_string()))
    } else if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        Ok(Cell::string(&text[1..text.len() - 1]))
    } else {
        Ok(Cell::symbol(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(x: Int) -> Cell {
        Cell::Number(x)
    }

    fn sym(s: &str) -> Cell {
        Cell::symbol(s)
    }

    #[test]
    fn parse_consumes_one_expression_from_the_queue() {
        let mut tokens: TokenQueue = tokenize("(+ 1 2) rest").into_iter().collect();
        let cell = parse(&mut tokens).unwrap();
        assert_eq!(cell, Cell::List(vec![sym("+"), num(1), num(2)]));
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "rest");
        assert_eq!(parse(&mut tokens), Ok(sym("rest")));
        assert_eq!(parse(&mut tokens), Err(ParseError::UnexpectedEndOfInput));
    }

    #[test]
    fn nested_lists() {
        assert_eq!(
            read_str("(list (list 1) () x)"),
            Ok(Cell::List(vec![
                sym("list"),
                Cell::List(vec![sym("list"), num(1)]),
                Cell::List(vec![]),
                sym("x"),
            ]))
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(read_str("42"), Ok(num(42)));
        assert_eq!(read_str("-5"), Ok(num(-5)));
        assert_eq!(read_str("007"), Ok(num(7)));
        assert_eq!(read_str("-2147483648"), Ok(num(Int::min_value())));
    }

    #[test]
    fn lone_minus_is_a_symbol() {
        assert_eq!(read_str("-"), Ok(sym("-")));
        assert_eq!(read_str("(- 5 3)").unwrap().as_list().unwrap()[0], sym("-"));
    }

    #[test]
    fn near_numbers_are_symbols() {
        assert_eq!(read_str("1a"), Ok(sym("1a")));
        assert_eq!(read_str("+5"), Ok(sym("+5")));
        assert_eq!(read_str("5-"), Ok(sym("5-")));
        assert_eq!(read_str("--5"), Ok(sym("--5")));
    }

    #[test]
    fn out_of_range_integer() {
        assert_eq!(
            read_str("99999999999"),
            Err(ParseError::BadInteger("99999999999".into()))
        );
    }

    #[test]
    fn strings_lose_their_quotes() {
        assert_eq!(read_str("\"abc\""), Ok(Cell::string("abc")));
        assert_eq!(read_str("\"\""), Ok(Cell::string("")));
        assert_eq!(read_str("\"héllo\""), Ok(Cell::string("héllo")));
    }

    #[test]
    fn lone_quote_is_a_symbol() {
        assert_eq!(read_str("\""), Ok(sym("\"")));
        assert_eq!(read_str("\"abc"), Ok(sym("\"abc")));
    }

    #[test]
    fn missing_close_paren() {
        assert_eq!(read_str("(+ 1 2"), Err(ParseError::UnexpectedEndOfInput));
        assert_eq!(read_str("(("), Err(ParseError::UnexpectedEndOfInput));
    }

    #[test]
    fn stray_close_paren() {
        assert_eq!(read_str(")"), Err(ParseError::UnexpectedCloseParen));
    }

    #[test]
    fn empty_input() {
        assert_eq!(read_str(""), Err(ParseError::UnexpectedEndOfInput));
        assert_eq!(read_str("   "), Err(ParseError::UnexpectedEndOfInput));
    }

    fn nested(depth: usize) -> String {
        format!("{}1{}", "(".repeat(depth), ")".repeat(depth))
    }

    #[test]
    fn long_run_of_open_parens_is_a_parse_error() {
        assert_eq!(read_str(&"(".repeat(100_000)), Err(ParseError::TooDeep));
        assert_eq!(read_str(&"(".repeat(200_000)), Err(ParseError::TooDeep));
    }

    #[test]
    fn deeply_nested_balanced_input_is_a_parse_error() {
        assert_eq!(read_str(&nested(20_000)), Err(ParseError::TooDeep));
        assert_eq!(read_str(&nested(MAX_DEPTH + 1)), Err(ParseError::TooDeep));
    }

    #[test]
    fn nesting_up_to_the_limit_is_accepted() {
        let mut cell = read_str(&nested(MAX_DEPTH)).unwrap();
        let mut depth = 0;
        while let Cell::List(mut children) = cell {
            assert_eq!(children.len(), 1);
            cell = children.remove(0);
            depth += 1;
        }
        assert_eq!(depth, MAX_DEPTH);
        assert_eq!(cell, num(1));
        // Unbalanced but shallow input still reports the missing paren.
        assert_eq!(
            read_str(&"(".repeat(MAX_DEPTH)),
            Err(ParseError::UnexpectedEndOfInput)
        );
    }

    #[test]
    fn extra_close_paren_after_expression_is_ignored() {
        assert_eq!(read_str("x)"), Ok(sym("x")));
    }
}
