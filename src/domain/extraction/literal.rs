//! Restricted literal parser used as the permissive decode fallback.
//!
//! Model output frequently looks like a Python literal rather than strict
//! JSON: single-quoted strings, `True`/`False`/`None`, trailing commas. This
//! parser accepts exactly that surface (primitives, lists, and string-keyed
//! maps) and nothing else. It never evaluates anything.

use serde_json::{Map, Value};

/// Parse a full candidate string as a restricted literal. The entire input
/// must be consumed (modulo surrounding whitespace) for the parse to count.
pub(super) fn parse(input: &str) -> Option<Value> {
    let chars: Vec<char> = input.chars().collect();
    let mut parser = Parser { chars, pos: 0 };
    parser.skip_whitespace();
    let value = parser.value()?;
    parser.skip_whitespace();
    if parser.pos == parser.chars.len() {
        Some(value)
    } else {
        None
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn eat_word(&mut self, word: &str) -> bool {
        let end = self.pos + word.len();
        if end <= self.chars.len() && self.chars[self.pos..end].iter().collect::<String>() == word {
            self.pos = end;
            true
        } else {
            false
        }
    }

    fn value(&mut self) -> Option<Value> {
        self.skip_whitespace();
        match self.peek()? {
            '{' => self.map(),
            '[' => self.list(),
            '\'' | '"' => self.string().map(Value::String),
            c if c == '-' || c == '+' || c.is_ascii_digit() => self.number(),
            _ => self.keyword(),
        }
    }

    fn keyword(&mut self) -> Option<Value> {
        if self.eat_word("null") || self.eat_word("None") {
            Some(Value::Null)
        } else if self.eat_word("true") || self.eat_word("True") {
            Some(Value::Bool(true))
        } else if self.eat_word("false") || self.eat_word("False") {
            Some(Value::Bool(false))
        } else {
            None
        }
    }

    fn number(&mut self) -> Option<Value> {
        let start = self.pos;
        if matches!(self.peek(), Some('-') | Some('+')) {
            self.pos += 1;
        }
        let mut is_float = false;
        while let Some(ch) = self.peek() {
            match ch {
                '0'..='9' => self.pos += 1,
                '.' | 'e' | 'E' => {
                    is_float = true;
                    self.pos += 1;
                }
                '-' | '+' if is_float => self.pos += 1,
                _ => break,
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        let text = text.strip_prefix('+').unwrap_or(&text);
        if is_float {
            serde_json::Number::from_f64(text.parse::<f64>().ok()?).map(Value::Number)
        } else {
            text.parse::<i64>().ok().map(|n| Value::Number(n.into()))
        }
    }

    fn string(&mut self) -> Option<String> {
        let quote = self.bump()?;
        let mut out = String::new();
        loop {
            match self.bump()? {
                ch if ch == quote => return Some(out),
                '\\' => match self.bump()? {
                    'n' => out.push('\n'),
                    'r' => out.push('\r'),
                    't' => out.push('\t'),
                    'b' => out.push('\u{8}'),
                    'f' => out.push('\u{c}'),
                    'u' => out.push(self.unicode_escape()?),
                    other => out.push(other),
                },
                ch => out.push(ch),
            }
        }
    }

    fn unicode_escape(&mut self) -> Option<char> {
        let mut code = 0u32;
        for _ in 0..4 {
            code = code * 16 + self.bump()?.to_digit(16)?;
        }
        // Combine a surrogate pair when the model emitted JSON-style escapes.
        if (0xD800..0xDC00).contains(&code) {
            if self.bump()? != '\\' || self.bump()? != 'u' {
                return None;
            }
            let mut low = 0u32;
            for _ in 0..4 {
                low = low * 16 + self.bump()?.to_digit(16)?;
            }
            if !(0xDC00..0xE000).contains(&low) {
                return None;
            }
            code = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
        }
        char::from_u32(code)
    }

    fn list(&mut self) -> Option<Value> {
        self.bump();
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek()? == ']' {
                self.bump();
                return Some(Value::Array(items));
            }
            items.push(self.value()?);
            self.skip_whitespace();
            match self.peek()? {
                ',' => {
                    self.bump();
                }
                ']' => {}
                _ => return None,
            }
        }
    }

    fn map(&mut self) -> Option<Value> {
        self.bump();
        let mut entries = Map::new();
        loop {
            self.skip_whitespace();
            if self.peek()? == '}' {
                self.bump();
                return Some(Value::Object(entries));
            }
            if !matches!(self.peek()?, '\'' | '"') {
                return None;
            }
            let key = self.string()?;
            self.skip_whitespace();
            if self.bump()? != ':' {
                return None;
            }
            let value = self.value()?;
            entries.insert(key, value);
            self.skip_whitespace();
            match self.peek()? {
                ',' => {
                    self.bump();
                }
                '}' => {}
                _ => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse;
    use serde_json::json;

    #[test]
    fn parses_python_style_literals() {
        assert_eq!(
            parse("{'query': 'rust', 'limit': 3}"),
            Some(json!({"query": "rust", "limit": 3}))
        );
        assert_eq!(
            parse("{'done': True, 'extra': None}"),
            Some(json!({"done": true, "extra": null}))
        );
        assert_eq!(parse("[1, 2.5, -3,]"), Some(json!([1, 2.5, -3])));
    }

    #[test]
    fn parses_strict_json_too() {
        assert_eq!(
            parse(r#"{"final_answer": "42"}"#),
            Some(json!({"final_answer": "42"}))
        );
    }

    #[test]
    fn rejects_expressions_and_bare_words() {
        assert_eq!(parse("__import__('os')"), None);
        assert_eq!(parse("1 + 1"), None);
        assert_eq!(parse("{'key': value}"), None);
        assert_eq!(parse("{1: 'non-string key'}"), None);
    }

    #[test]
    fn requires_full_consumption() {
        assert_eq!(parse("[1, 2] trailing"), None);
    }

    #[test]
    fn handles_escapes() {
        assert_eq!(parse(r#"'line\none'"#), Some(json!("line\none")));
        assert_eq!(parse(r#""quote \" inside""#), Some(json!("quote \" inside")));
        assert_eq!(parse(r#""é""#), Some(json!("é")));
    }
}
