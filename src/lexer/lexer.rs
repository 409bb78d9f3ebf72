/*
 * ==========================================================================
 * PAWX - Code with Claws!
 * ==========================================================================
 * 
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * Website:  https://www.pawx-lang.com
 * Github:   https://github.com/samwilcox/pawx
 * 
 * License:
 * This file is part of the PAWX programming language project.
 * 
 * PAWX is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 * 
 * You may choose either license to govern your use of this software.
 * Full license text available at:
 *    https://license.pawx-lang.com
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * 
 * ==========================================================================
 */

use crate::ast::Literal;
use crate::error::{ExprError, ExprResult};
use crate::lexer::token::{base_priority, Operator, Token, TokenKind, DEPTH_BOOST};

const SPECIALS: [char; 5] = [',', '(', ')', '[', ']'];

/// On-demand scanner: every call to [`Lexer::next_token`] produces exactly
/// one token and advances the cursor past it. There is no separate
/// tokenization pass; the parser pulls tokens as it needs them.
pub struct Lexer {
    chars: Vec<char>,
    cursor: usize,

    /// Positions of the currently open `(` / `[`.
    brackets: Vec<usize>,

    /// Set when the previous token was a variable or a closing bracket, in
    /// which case a following `.` is member access, never a decimal point.
    after_operand: bool,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            cursor: 0,
            brackets: Vec::new(),
            after_operand: false,
        }
    }

    /// Current character offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Priority boost for the current bracket depth.
    pub fn depth_priority(&self) -> u32 {
        self.brackets.len() as u32 * DEPTH_BOOST
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.chars.len()
    }

    /// Scans the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> ExprResult<Option<Token>> {
        self.skip_whitespace();
        if self.is_at_end() {
            return Ok(None);
        }

        let position = self.cursor;
        let depth = self.depth_priority();
        let ch = self.chars[position];

        let (kind, base) = if ch.is_ascii_alphabetic() {
            (self.identifier(), 0)
        } else if ch.is_ascii_digit() || (ch == '.' && self.decimal_point_allowed()) {
            (TokenKind::Const(Literal::Number(self.number()?)), 0)
        } else if ch == '"' {
            (TokenKind::Const(Literal::String(self.string()?)), 0)
        } else if SPECIALS.contains(&ch) {
            let base = base_priority(&ch.to_string()).unwrap_or(0);
            self.bracket(ch)?;
            (TokenKind::Special(ch), base)
        } else {
            let op = self.operator()?;
            (TokenKind::Operator(op), op.priority())
        };

        self.after_operand = matches!(
            kind,
            TokenKind::Variable(_) | TokenKind::Special(')') | TokenKind::Special(']')
        );

        Ok(Some(Token {
            kind,
            position,
            priority: depth + base,
        }))
    }

    /// Name → `Function` when followed by `(`, `Const` when it directly
    /// follows a `.`, otherwise `Variable` (or a boolean constant).
    fn identifier(&mut self) -> TokenKind {
        let start = self.cursor;
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            self.cursor += 1;
        }
        let name: String = self.chars[start..self.cursor].iter().collect();

        self.skip_whitespace();

        if self.peek() == Some('(') {
            TokenKind::Function(name)
        } else if start > 0 && self.chars[start - 1] == '.' {
            TokenKind::Const(Literal::String(name))
        } else {
            match name.as_str() {
                "true" => TokenKind::Const(Literal::Bool(true)),
                "false" => TokenKind::Const(Literal::Bool(false)),
                _ => TokenKind::Variable(name),
            }
        }
    }

    /// Digits with at most one decimal point. A `.` only belongs to the
    /// number when a digit follows and the previous token was not an
    /// operand (`a.b`, `(x).y`).
    fn number(&mut self) -> ExprResult<f64> {
        let start = self.cursor;
        let mut seen_dot = false;

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.cursor += 1;
            } else if c == '.' && !seen_dot && self.decimal_point_allowed() {
                seen_dot = true;
                self.cursor += 1;
            } else {
                break;
            }
        }

        let text: String = self.chars[start..self.cursor].iter().collect();
        text.parse::<f64>()
            .map_err(|_| ExprError::lexical(format!("Invalid number {}", text), start))
    }

    /// Double-quoted string without escapes.
    fn string(&mut self) -> ExprResult<String> {
        let start = self.cursor;
        let close = self.chars[start + 1..]
            .iter()
            .position(|&c| c == '"')
            .map(|i| start + 1 + i)
            .ok_or_else(|| ExprError::lexical("Unterminated string", start))?;

        self.cursor = close + 1;
        Ok(self.chars[start + 1..close].iter().collect())
    }

    /// Tracks bracket nesting; a closer must match the innermost opener.
    fn bracket(&mut self, ch: char) -> ExprResult<()> {
        let position = self.cursor;
        match ch {
            '(' | '[' => self.brackets.push(position),
            ')' | ']' => {
                let opener = self.brackets.pop().map(|i| self.chars[i]);
                if !matches!((opener, ch), (Some('('), ')') | (Some('['), ']')) {
                    return Err(ExprError::lexical("Unexpected char", position));
                }
            }
            _ => {}
        }
        self.cursor += 1;
        Ok(())
    }

    fn operator(&mut self) -> ExprResult<Operator> {
        let position = self.cursor;
        let ch = self.chars[position];
        let next = self.peek_next();

        if Operator::from_symbol(&ch.to_string()).is_none() {
            return Err(ExprError::lexical("Unexpected char", position));
        }

        // `.` is member access only when glued to an operand on the left
        // and followed by a property name.
        if ch == '.' {
            let glued = position > 0 && !self.chars[position - 1].is_whitespace();
            if !glued || !next.is_some_and(|c| c.is_ascii_alphabetic()) {
                return Err(ExprError::lexical("Unexpected char", position));
            }
        }

        let mut symbol = ch.to_string();
        let doubles = match (ch, next) {
            ('>' | '<' | '!' | '-' | '+' | '=', Some('=')) => true,
            ('+', Some('+')) | ('-', Some('-')) => true,
            _ => false,
        };
        if let (true, Some(second)) = (doubles, next) {
            symbol.push(second);
            self.cursor += 1;
        }
        self.cursor += 1;

        Operator::from_symbol(&symbol).ok_or_else(|| ExprError::lexical("Unexpected char", position))
    }

    fn decimal_point_allowed(&self) -> bool {
        !self.after_operand && self.peek_next().is_some_and(|c| c.is_ascii_digit())
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| matches!(c, ' ' | '\n' | '\r' | '\t')) {
            self.cursor += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.cursor).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.cursor + 1).copied()
    }
}

impl Iterator for Lexer {
    type Item = ExprResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Scans a whole string up front. Only used for inspection and tests; the
/// parser pulls tokens lazily.
pub fn tokenize(source: &str) -> ExprResult<Vec<Token>> {
    Lexer::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn classifies_names() {
        assert_eq!(
            kinds("foo bar(x) a.b"),
            vec![
                TokenKind::Variable("foo".into()),
                TokenKind::Function("bar".into()),
                TokenKind::Special('('),
                TokenKind::Variable("x".into()),
                TokenKind::Special(')'),
                TokenKind::Variable("a".into()),
                TokenKind::Operator(Operator::Dot),
                TokenKind::Const(Literal::String("b".into())),
            ]
        );
    }

    #[test]
    fn function_detection_skips_spaces() {
        assert_eq!(kinds("max  (1)")[0], TokenKind::Function("max".into()));
    }

    #[test]
    fn decimal_point_versus_member_dot() {
        assert_eq!(kinds("1.5")[0], TokenKind::Const(Literal::Number(1.5)));
        assert_eq!(kinds(".5")[0], TokenKind::Const(Literal::Number(0.5)));
        assert_eq!(
            kinds("a.x"),
            vec![
                TokenKind::Variable("a".into()),
                TokenKind::Operator(Operator::Dot),
                TokenKind::Const(Literal::String("x".into())),
            ]
        );
        assert!(tokenize("a .x").is_err());
        assert!(tokenize("a.5").is_err());
    }

    #[test]
    fn two_character_operators() {
        let ops: Vec<_> = tokenize(">= <= != == += -= ++ -- > = !")
            .unwrap()
            .into_iter()
            .filter_map(|t| t.operator())
            .collect();
        assert_eq!(
            ops,
            vec![
                Operator::GreaterEq,
                Operator::LessEq,
                Operator::NotEqual,
                Operator::Equal,
                Operator::AddAssign,
                Operator::SubAssign,
                Operator::Increment,
                Operator::Decrement,
                Operator::Greater,
                Operator::Assign,
                Operator::Not,
            ]
        );
    }

    #[test]
    fn priority_includes_bracket_depth() {
        let tokens = tokenize("1 + (2 * [3])").unwrap();
        let priorities: Vec<u32> = tokens.iter().map(|t| t.priority).collect();
        // 1  +  (  2  *  [  3  ]  )
        assert_eq!(priorities, vec![0, 6, 10, 10, 17, 20, 20, 20, 10]);
    }

    #[test]
    fn strings_have_no_escapes() {
        assert_eq!(kinds(r#""a b""#)[0], TokenKind::Const(Literal::String("a b".into())));
        assert_eq!(kinds(r#""""#)[0], TokenKind::Const(Literal::String(String::new())));
        let err = tokenize(r#"x = "open"#).unwrap_err();
        assert_eq!(err.message, "Unterminated string");
        assert_eq!(err.position, 4);
    }

    #[test]
    fn mismatched_brackets_are_rejected() {
        let err = tokenize("(1]").unwrap_err();
        assert_eq!(err.message, "Unexpected char");
        assert_eq!(err.position, 2);
        assert!(tokenize(")").is_err());
    }

    #[test]
    fn unknown_characters_are_rejected() {
        let err = tokenize("a # b").unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.kind, crate::error::ErrorKind::Lexical);
    }

    #[test]
    fn booleans_are_constants() {
        assert_eq!(kinds("true")[0], TokenKind::Const(Literal::Bool(true)));
        assert_eq!(kinds("a.true")[2], TokenKind::Const(Literal::String("true".into())));
    }
}
