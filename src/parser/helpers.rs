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

use crate::error::{ExprError, ExprResult};
use crate::lexer::{Token, TokenKind};
use crate::parser::parser::{Parser, MAX_NESTING};

impl Parser {
    /// Scans the next token and makes it the lookahead.
    ///
    /// Returns a copy of the new lookahead so callers can dispatch on it
    /// while the parser keeps its own reference for later checks.
    pub(crate) fn bump(&mut self) -> ExprResult<Option<Token>> {
        self.lookahead = self.lexer.next_token()?;
        Ok(self.lookahead.clone())
    }

    /// True if the lookahead is the special symbol `ch`.
    pub(crate) fn at_special(&self, ch: char) -> bool {
        self.lookahead.as_ref().is_some_and(|t| t.is_special(ch))
    }

    /// True if the lookahead can extend an operand whose binding priority
    /// is `min_priority`: an operator (or the indexing `[`) with strictly
    /// higher priority.
    pub(crate) fn continues_operand(&self, min_priority: u32) -> bool {
        self.lookahead.as_ref().is_some_and(|t| {
            t.priority > min_priority && (t.is_operator() || t.is_special('['))
        })
    }

    /// Closing symbol for the group opened by the lookahead.
    pub(crate) fn closer_for_lookahead(&self) -> char {
        match self.lookahead.as_ref().map(|t| &t.kind) {
            Some(TokenKind::Special('[')) => ']',
            _ => ')',
        }
    }

    /// Position to blame when the lookahead is missing or wrong.
    pub(crate) fn error_position(&self) -> usize {
        self.lookahead
            .as_ref()
            .map_or(self.lexer.cursor(), |t| t.position)
    }

    pub(crate) fn expected(&self, closer: char) -> ExprError {
        ExprError::syntax(format!("Expected \"{}\"", closer), self.error_position())
    }

    /// Enters one more nesting level, failing at `position` once the
    /// parser is [`MAX_NESTING`] levels deep.
    pub(crate) fn descend(&mut self, position: usize) -> ExprResult<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(ExprError::syntax("Expression nested too deeply", position)
                .with_help(format!("at most {} levels of nesting are allowed", MAX_NESTING)));
        }
        Ok(())
    }
}
