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

use thiserror::Error;

/// Broad category of an [`ExprError`].
///
/// Every kind maps to a stable diagnostic code so hosts can branch on the
/// category without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input detected while scanning characters.
    Lexical,

    /// Token stream does not form a valid expression.
    Syntax,

    /// Unresolved object, property, function or command.
    Reference,

    /// Operand or argument of the wrong shape for an operation.
    Type,

    /// Any other failure raised while evaluating.
    Runtime,
}

impl ErrorKind {
    /// Stable error code (E_LEX, E_SYNTAX, …)
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Lexical => "E_LEX",
            ErrorKind::Syntax => "E_SYNTAX",
            ErrorKind::Reference => "E_REFERENCE",
            ErrorKind::Type => "E_TYPE",
            ErrorKind::Runtime => "E_RUNTIME",
        }
    }

    /// True for the kinds raised while compiling a program.
    pub fn is_compile_time(self) -> bool {
        matches!(self, ErrorKind::Lexical | ErrorKind::Syntax)
    }
}

/// The single error type surfaced by lexing, parsing and evaluation.
///
/// `position` is a character offset into the text being processed. While a
/// statement is parsed or evaluated it is relative to that statement; the
/// program sequencer shifts it so it refers to the full script.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ExprError {
    /// Error category
    pub kind: ErrorKind,

    /// Human-readable error message
    pub message: String,

    /// Character offset of the offending token
    pub position: usize,

    /// Optional note / help text
    pub help: Option<String>,
}

pub type ExprResult<T> = Result<T, ExprError>;

impl ExprError {
    /// Generic constructor
    pub fn new(kind: ErrorKind, message: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
            help: None,
        }
    }

    /// Lexical error (bad character, unterminated string)
    pub fn lexical(message: impl Into<String>, position: usize) -> Self {
        Self::new(ErrorKind::Lexical, message, position)
    }

    /// Syntax error (missing expression, bracket mismatch)
    pub fn syntax(message: impl Into<String>, position: usize) -> Self {
        Self::new(ErrorKind::Syntax, message, position)
    }

    /// Reference error (unknown object, property or function)
    pub fn reference(message: impl Into<String>, position: usize) -> Self {
        Self::new(ErrorKind::Reference, message, position)
    }

    /// Type error (invalid operation / operand types)
    pub fn type_error(message: impl Into<String>, position: usize) -> Self {
        Self::new(ErrorKind::Type, message, position)
    }

    /// Runtime error (during evaluation)
    pub fn runtime(message: impl Into<String>, position: usize) -> Self {
        Self::new(ErrorKind::Runtime, message, position)
    }

    /// Stable code of this error's kind.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Moves the error by `offset` characters.
    pub fn shifted(mut self, offset: usize) -> Self {
        self.position += offset;
        self
    }

    /// Attach a help message to the error (builder-style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}
