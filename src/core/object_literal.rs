//! Restricted parser for JavaScript-style object literals.
//!
//! Accepts the literal subset of JavaScript that chart options are usually
//! written in (unquoted keys, single quotes, comments, trailing commas, hex
//! numbers) and produces a `serde_json::Value`. Nothing is evaluated: any
//! expression that is not a literal value is rejected with a position.

use serde_json::{Map, Number, Value};

use crate::error::ParseError;

const MAX_DEPTH: usize = 128;

/// Result of parsing one literal out of a larger text.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralParse {
    pub value: Value,
    /// Byte offset just past the literal, trailing trivia and an optional `;`.
    pub end: usize,
}

/// Parses `text` as a single literal; only comments, whitespace and one `;` may follow.
pub fn parse_object_literal(text: &str) -> Result<Value, ParseError> {
    let parsed = parse_literal_at(text, 0)?;
    let mut parser = Parser::new(text, parsed.end);
    parser.skip_trivia()?;
    if let Some(c) = parser.peek() {
        return Err(parser.error(format!("unexpected `{c}` after literal")));
    }
    Ok(parsed.value)
}

/// Parses one literal starting at byte offset `start` of `text`.
///
/// Error positions are reported relative to the whole `text`.
pub fn parse_literal_at(text: &str, start: usize) -> Result<LiteralParse, ParseError> {
    let mut parser = Parser::new(text, start);
    let value_start = {
        parser.skip_trivia()?;
        parser.pos
    };
    let value = match parser.parse_value(0)? {
        Literal::Value(value) => value,
        Literal::Undefined => {
            return Err(parser.error_at(value_start, "option evaluates to `undefined`"));
        }
    };
    parser.skip_trivia()?;
    parser.eat(';');
    Ok(LiteralParse {
        value,
        end: parser.pos,
    })
}

/// 1-based line and column (in chars) of byte offset `pos`.
pub(crate) fn line_column(text: &str, pos: usize) -> (usize, usize) {
    let prefix = &text[..pos.min(text.len())];
    let line = prefix.matches('\n').count() + 1;
    let line_start = prefix.rfind('\n').map_or(0, |idx| idx + 1);
    let column = prefix[line_start..].chars().count() + 1;
    (line, column)
}

enum Literal {
    Value(Value),
    Undefined,
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, pos: usize) -> Self {
        Self { src, pos }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            return true;
        }
        false
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, pos: usize, message: impl Into<String>) -> ParseError {
        let (line, column) = line_column(self.src, pos);
        ParseError::Literal {
            line,
            column,
            message: message.into(),
        }
    }

    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() || c == '\u{feff}' => {
                    self.bump();
                }
                Some('/') if self.peek_nth(1) == Some('/') => {
                    let rest = &self.src[self.pos..];
                    self.pos += rest.find('\n').unwrap_or(rest.len());
                }
                Some('/') if self.peek_nth(1) == Some('*') => {
                    let open = self.pos;
                    match self.src[self.pos + 2..].find("*/") {
                        Some(offset) => self.pos += offset + 4,
                        None => return Err(self.error_at(open, "unterminated block comment")),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<Literal, ParseError> {
        if depth > MAX_DEPTH {
            return Err(self.error("literal is nested too deeply"));
        }
        self.skip_trivia()?;
        let Some(c) = self.peek() else {
            return Err(self.error("unexpected end of input, expected a value"));
        };
        match c {
            '{' => self.parse_object(depth).map(Literal::Value),
            '[' => self.parse_array(depth).map(Literal::Value),
            '"' | '\'' => self.parse_string().map(|s| Literal::Value(Value::String(s))),
            '0'..='9' | '.' | '+' | '-' => self.parse_number().map(Literal::Value),
            '`' => Err(self.error("template literals are not supported")),
            c if is_ident_start(c) => {
                let start = self.pos;
                let ident = self.parse_ident();
                match ident {
                    "true" => Ok(Literal::Value(Value::Bool(true))),
                    "false" => Ok(Literal::Value(Value::Bool(false))),
                    "null" => Ok(Literal::Value(Value::Null)),
                    "undefined" => Ok(Literal::Undefined),
                    "Infinity" | "NaN" => Err(self.error_at(
                        start,
                        format!("`{ident}` cannot be represented in JSON"),
                    )),
                    "function" => Err(self.error_at(start, "function expressions are not supported")),
                    _ => Err(self.error_at(
                        start,
                        format!("unsupported expression `{ident}`; only literal values are allowed"),
                    )),
                }
            }
            other => Err(self.error(format!("unexpected character `{other}`"))),
        }
    }

    fn parse_object(&mut self, depth: usize) -> Result<Value, ParseError> {
        self.bump();
        // Keeps first-seen key position while letting later duplicates win.
        let mut entries: Vec<(String, Option<Value>)> = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.eat('}') {
                break;
            }
            let key = self.parse_key()?;
            self.skip_trivia()?;
            if !self.eat(':') {
                return Err(self.error(format!("expected `:` after key `{key}`")));
            }
            let value = match self.parse_value(depth + 1)? {
                Literal::Value(value) => Some(value),
                Literal::Undefined => None,
            };
            match entries.iter().position(|(existing, _)| *existing == key) {
                Some(idx) => entries[idx].1 = value,
                None => entries.push((key, value)),
            }
            self.skip_trivia()?;
            if self.eat(',') {
                continue;
            }
            if self.eat('}') {
                break;
            }
            return Err(self.unexpected("expected `,` or `}` in object"));
        }

        let mut map = Map::new();
        for (key, value) in entries {
            if let Some(value) = value {
                map.insert(key, value);
            }
        }
        Ok(Value::Object(map))
    }

    fn parse_key(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Some('"' | '\'') => self.parse_string(),
            Some(c) if c.is_ascii_digit() || c == '.' => {
                let start = self.pos;
                match self.parse_number()? {
                    Value::Number(number) => Ok(number_key(&number)),
                    _ => Err(self.error_at(start, "invalid numeric key")),
                }
            }
            Some(c) if is_ident_start(c) => Ok(self.parse_ident().to_owned()),
            _ => Err(self.unexpected("expected property key")),
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<Value, ParseError> {
        self.bump();
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.eat(']') {
                break;
            }
            if self.peek() == Some(',') {
                return Err(self.error("array holes are not supported"));
            }
            match self.parse_value(depth + 1)? {
                Literal::Value(value) => items.push(value),
                Literal::Undefined => items.push(Value::Null),
            }
            self.skip_trivia()?;
            if self.eat(',') {
                continue;
            }
            if self.eat(']') {
                break;
            }
            return Err(self.unexpected("expected `,` or `]` in array"));
        }
        Ok(Value::Array(items))
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        let open = self.pos;
        let Some(quote) = self.bump() else {
            return Err(self.error("expected string"));
        };
        let mut out = String::new();
        loop {
            let Some(c) = self.bump() else {
                return Err(self.error_at(open, "unterminated string literal"));
            };
            match c {
                c if c == quote => return Ok(out),
                '\\' => self.parse_escape(open, &mut out)?,
                '\n' | '\r' => {
                    return Err(self.error_at(self.pos - 1, "line break inside string literal"));
                }
                c => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self, open: usize, out: &mut String) -> Result<(), ParseError> {
        let escape_pos = self.pos - 1;
        let Some(c) = self.bump() else {
            return Err(self.error_at(open, "unterminated string literal"));
        };
        match c {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !self.peek().is_some_and(|next| next.is_ascii_digit()) => out.push('\0'),
            '0'..='9' => {
                return Err(self.error_at(escape_pos, "octal escapes are not supported"));
            }
            'x' => {
                let code = self.read_hex(2, escape_pos)?;
                out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            'u' => out.push(self.parse_unicode_escape(escape_pos)?),
            '\r' => {
                self.eat('\n');
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
        Ok(())
    }

    fn parse_unicode_escape(&mut self, escape_pos: usize) -> Result<char, ParseError> {
        if self.eat('{') {
            let start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.bump();
            }
            let src = self.src;
            let digits = &src[start..self.pos];
            if digits.is_empty() || digits.len() > 6 || !self.eat('}') {
                return Err(self.error_at(escape_pos, "malformed `\\u{...}` escape"));
            }
            let code = u32::from_str_radix(digits, 16)
                .map_err(|_| self.error_at(escape_pos, "malformed `\\u{...}` escape"))?;
            return char::from_u32(code)
                .ok_or_else(|| self.error_at(escape_pos, "escape is not a valid code point"));
        }

        let high = self.read_hex(4, escape_pos)?;
        if !(0xD800..=0xDBFF).contains(&high) {
            // Lone low surrogates have no `char` representation.
            return Ok(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER));
        }
        if self.peek() == Some('\\') && self.peek_nth(1) == Some('u') {
            let checkpoint = self.pos;
            self.pos += 2;
            if let Ok(low) = self.read_hex(4, escape_pos) {
                if (0xDC00..=0xDFFF).contains(&low) {
                    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                    return Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
            }
            self.pos = checkpoint;
        }
        Ok(char::REPLACEMENT_CHARACTER)
    }

    fn read_hex(&mut self, count: usize, escape_pos: usize) -> Result<u32, ParseError> {
        let mut code = 0u32;
        for _ in 0..count {
            let digit = self
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error_at(escape_pos, "malformed hexadecimal escape"))?;
            self.bump();
            code = code * 16 + digit;
        }
        Ok(code)
    }

    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        let negative = match self.peek() {
            Some('-') => {
                self.bump();
                true
            }
            Some('+') => {
                self.bump();
                false
            }
            _ => false,
        };
        if self.pos != start {
            // `- 5` and `-/* c */5` are both a unary minus applied to 5.
            self.skip_trivia()?;
        }

        if self.peek().is_some_and(is_ident_start) {
            let ident = self.parse_ident();
            return Err(match ident {
                "Infinity" | "NaN" => {
                    self.error_at(start, format!("`{ident}` cannot be represented in JSON"))
                }
                _ => self.error_at(start, "unary operators are only allowed on numbers"),
            });
        }

        if self.peek() == Some('0')
            && matches!(self.peek_nth(1), Some('x' | 'X' | 'o' | 'O' | 'b' | 'B'))
        {
            return self.parse_radix_integer(start, negative);
        }

        let mut text = String::new();
        if negative {
            text.push('-');
        }
        let int_digits = self.take_digits(&mut text, 10);
        if int_digits > 1 && text.trim_start_matches('-').starts_with('0') {
            return Err(self.error_at(start, "leading zeros are not allowed in numbers"));
        }
        let mut is_float = false;
        let mut frac_digits = 0;
        if self.peek() == Some('.') {
            self.bump();
            text.push('.');
            is_float = true;
            frac_digits = self.take_digits(&mut text, 10);
        }
        if int_digits == 0 && frac_digits == 0 {
            return Err(self.error_at(start, "expected digits in number literal"));
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            self.bump();
            text.push('e');
            is_float = true;
            if let Some(sign @ ('+' | '-')) = self.peek() {
                self.bump();
                text.push(sign);
            }
            if self.take_digits(&mut text, 10) == 0 {
                return Err(self.error_at(start, "missing exponent digits in number literal"));
            }
        }
        self.reject_trailing_identifier()?;

        if !is_float {
            if negative {
                if let Ok(v) = text.parse::<i64>() {
                    return Ok(Value::Number(v.into()));
                }
            } else if let Ok(v) = text.parse::<u64>() {
                return Ok(Value::Number(v.into()));
            }
        }
        self.finite_number(start, &text)
    }

    fn parse_radix_integer(&mut self, start: usize, negative: bool) -> Result<Value, ParseError> {
        self.bump();
        let radix = match self.bump() {
            Some('x' | 'X') => 16,
            Some('o' | 'O') => 8,
            _ => 2,
        };
        let mut digits = String::new();
        if self.take_digits(&mut digits, radix) == 0 {
            return Err(self.error_at(start, "missing digits after radix prefix"));
        }
        self.reject_trailing_identifier()?;
        let magnitude = u64::from_str_radix(&digits, radix)
            .map_err(|_| self.error_at(start, "integer literal is out of range"))?;
        if !negative {
            return Ok(Value::Number(magnitude.into()));
        }
        let value = i64::try_from(magnitude)
            .ok()
            .and_then(i64::checked_neg)
            .ok_or_else(|| self.error_at(start, "integer literal is out of range"))?;
        Ok(Value::Number(value.into()))
    }

    /// Appends digits of `radix` (skipping `_` separators) and returns how many were read.
    fn take_digits(&mut self, out: &mut String, radix: u32) -> usize {
        let mut count = 0;
        while let Some(c) = self.peek() {
            if c.is_digit(radix) {
                out.push(c);
                count += 1;
            } else if c == '_' && count > 0 && self.peek_nth(1).is_some_and(|n| n.is_digit(radix)) {
                // numeric separator
            } else {
                break;
            }
            self.bump();
        }
        count
    }

    fn reject_trailing_identifier(&self) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if is_ident_start(c) || c.is_ascii_digit() => Err(self.error(format!(
                "identifier starts immediately after number literal (`{c}`)"
            ))),
            _ => Ok(()),
        }
    }

    fn finite_number(&self, start: usize, text: &str) -> Result<Value, ParseError> {
        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| self.error_at(start, "number literal cannot be represented in JSON"))
    }

    fn parse_ident(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.bump();
        }
        let src = self.src;
        &src[start..self.pos]
    }

    fn unexpected(&self, expectation: &str) -> ParseError {
        match self.peek() {
            Some(c) => self.error(format!("{expectation}, found `{c}`")),
            None => self.error(format!("{expectation}, found end of input")),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphanumeric()
}

fn number_key(number: &Number) -> String {
    if let Some(v) = number.as_u64() {
        return v.to_string();
    }
    if let Some(v) = number.as_i64() {
        return v.to_string();
    }
    match number.as_f64() {
        Some(v) if v.fract() == 0.0 && v.abs() < 1e21 => format!("{v:.0}"),
        Some(v) => v.to_string(),
        None => number.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn line_column_counts_chars_not_bytes() {
        let text = "{\n  é: x";
        let pos = text.find('x').expect("x present");
        assert_eq!(line_column(text, pos), (2, 6));
        assert_eq!(line_column(text, 0), (1, 1));
    }

    #[test]
    fn surrogate_pairs_are_combined() {
        let value = parse_object_literal(r#"'\uD83D\uDE00'"#).expect("parse");
        assert_eq!(value, json!("\u{1F600}"));
    }

    #[test]
    fn lone_surrogate_becomes_replacement_char() {
        let value = parse_object_literal(r#"'\uD83Dx'"#).expect("parse");
        assert_eq!(value, json!("\u{FFFD}x"));
    }

    #[test]
    fn numeric_keys_use_javascript_spelling() {
        let value = parse_object_literal("{1: 'a', 0x10: 'b', 1.5: 'c'}").expect("parse");
        assert_eq!(value, json!({"1": "a", "16": "b", "1.5": "c"}));
    }

    #[test]
    fn separators_and_radix_literals() {
        let value = parse_object_literal("[1_000, 0xff, 0o17, 0b101, -0x10]").expect("parse");
        assert_eq!(value, json!([1000, 255, 15, 5, -16]));
    }

    #[test]
    fn literal_end_includes_semicolon() {
        let text = "{a: 1}; chart.setOption(option);";
        let parsed = parse_literal_at(text, 0).expect("parse");
        assert_eq!(parsed.value, json!({"a": 1}));
        assert_eq!(&text[parsed.end..], " chart.setOption(option);");
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let text = format!("{}{}", "[".repeat(MAX_DEPTH + 2), "]".repeat(MAX_DEPTH + 2));
        let err = parse_object_literal(&text).expect_err("too deep");
        assert!(err.to_string().contains("nested too deeply"));
    }
}
