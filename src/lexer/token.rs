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

use std::fmt;

use serde::{Serialize, Serializer};

use crate::ast::Literal;

/// Priority added per level of `(`/`[` nesting.
///
/// Every token's priority is its base priority plus this boost times the
/// bracket depth at which it was scanned, so anything inside a group binds
/// tighter than the surrounding expression.
pub const DEPTH_BOOST: u32 = 10;

/// Base priority of an operator or special symbol.
///
/// ```text
/// ( [ .          10
/// ++ --           9
/// !               8
/// * / %           7
/// + -             6
/// > < >= <= == != 5
/// &               4
/// |               3
/// = += -=         2
/// ; ,             1
/// ) ]             0
/// ```
pub fn base_priority(symbol: &str) -> Option<u32> {
    let priority = match symbol {
        "(" | "[" | "." => 10,
        "++" | "--" => 9,
        "!" => 8,
        "*" | "/" | "%" => 7,
        "+" | "-" => 6,
        ">" | "<" | ">=" | "<=" | "==" | "!=" => 5,
        "&" => 4,
        "|" => 3,
        "=" | "+=" | "-=" => 2,
        ";" | "," => 1,
        ")" | "]" => 0,
        _ => return None,
    };
    Some(priority)
}

/// Every operator the language knows.
///
/// `Index` is never scanned as an operator: the parser builds it from the
/// `[` special token that follows an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Dot,
    Index,
    Increment,
    Decrement,
    Not,
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Greater,
    Less,
    GreaterEq,
    LessEq,
    Equal,
    NotEqual,
    And,
    Or,
    Assign,
    AddAssign,
    SubAssign,
    Semicolon,
}

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "." => Operator::Dot,
            "[" => Operator::Index,
            "++" => Operator::Increment,
            "--" => Operator::Decrement,
            "!" => Operator::Not,
            "*" => Operator::Mul,
            "/" => Operator::Div,
            "%" => Operator::Rem,
            "+" => Operator::Add,
            "-" => Operator::Sub,
            ">" => Operator::Greater,
            "<" => Operator::Less,
            ">=" => Operator::GreaterEq,
            "<=" => Operator::LessEq,
            "==" => Operator::Equal,
            "!=" => Operator::NotEqual,
            "&" => Operator::And,
            "|" => Operator::Or,
            "=" => Operator::Assign,
            "+=" => Operator::AddAssign,
            "-=" => Operator::SubAssign,
            ";" => Operator::Semicolon,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Dot => ".",
            Operator::Index => "[",
            Operator::Increment => "++",
            Operator::Decrement => "--",
            Operator::Not => "!",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Rem => "%",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Greater => ">",
            Operator::Less => "<",
            Operator::GreaterEq => ">=",
            Operator::LessEq => "<=",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::And => "&",
            Operator::Or => "|",
            Operator::Assign => "=",
            Operator::AddAssign => "+=",
            Operator::SubAssign => "-=",
            Operator::Semicolon => ";",
        }
    }

    /// Base priority from the shared table.
    pub fn priority(self) -> u32 {
        base_priority(self.symbol()).unwrap_or(0)
    }

    /// Operators that write through their left operand.
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            Operator::Assign
                | Operator::AddAssign
                | Operator::SubAssign
                | Operator::Increment
                | Operator::Decrement
        )
    }

    /// Member access and indexing.
    pub fn is_member(self) -> bool {
        matches!(self, Operator::Dot | Operator::Index)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

/// Represents the **category of a lexical token**.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A number, string or boolean constant, or a property name that
    /// directly follows a `.` (scanned as a string constant).
    Const(Literal),

    /// A name that is not followed by `(`.
    Variable(String),

    /// A name immediately followed by `(`.
    Function(String),

    Operator(Operator),

    /// One of `, ( ) [ ]`.
    Special(char),
}

/// A single lexical token, produced on demand by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,

    /// Character offset of the token's first character.
    pub position: usize,

    /// Base priority plus the bracket-depth boost.
    pub priority: u32,
}

impl Token {
    pub fn is_special(&self, ch: char) -> bool {
        self.kind == TokenKind::Special(ch)
    }

    pub fn is_operator(&self) -> bool {
        matches!(self.kind, TokenKind::Operator(_))
    }

    pub fn operator(&self) -> Option<Operator> {
        match self.kind {
            TokenKind::Operator(op) => Some(op),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    /// Formats a token as the source text that produced it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::Const(literal) => write!(f, "{}", literal),
            TokenKind::Variable(name) | TokenKind::Function(name) => f.write_str(name),
            TokenKind::Operator(op) => f.write_str(op.symbol()),
            TokenKind::Special(ch) => write!(f, "{}", ch),
        }
    }
}
