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

/*
 * --------------------------------------------------------------------------
 *  MODULE OVERVIEW
 * --------------------------------------------------------------------------
 * The whole expression grammar, as one precedence-climbing routine.
 *
 * Every token carries a priority (base priority + 10 per bracket level), so
 * there is no per-level function like `term()` or `factor()`. Instead
 * `expression(min)` builds a primary and then folds in every following
 * operator whose priority is strictly greater than `min`. Recursing with the
 * operator's own priority gives left-associativity; the depth boost makes
 * the contents of `(...)`/`[...]` bind tighter than anything outside.
 *
 *   primary := literal | variable | name "(" args ")" | "!" expr
 *            | ("+" | "-") expr            (rewritten as 0 ± expr)
 *            | "(" expr ")" | "[" args "]"
 *   tail    := "[" expr "]" | "++" | "--" | op expr
 * ==========================================================================
 */

use crate::ast::{Literal, Node};
use crate::error::{ExprError, ExprResult};
use crate::lexer::{Operator, Token, TokenKind};
use crate::parser::parser::Parser;

impl Parser {
    /// Parses an expression whose operators all bind tighter than
    /// `min_priority`.
    ///
    /// `first` is an already-scanned token to start from (used by argument
    /// lists, which must look at a token before deciding to parse it);
    /// otherwise a fresh token is scanned.
    pub(crate) fn expression(&mut self, min_priority: u32, first: Option<Token>) -> ExprResult<Node> {
        let entry = self.depth;
        let result = self.nested_expression(min_priority, first);
        self.depth = entry;
        result
    }

    fn nested_expression(&mut self, min_priority: u32, first: Option<Token>) -> ExprResult<Node> {
        let start = first
            .as_ref()
            .map_or(self.lexer.cursor(), |token| token.position);
        self.descend(start)?;

        let item = match first {
            Some(token) => token,
            None => self
                .bump()?
                .ok_or_else(|| ExprError::syntax("Expected expression", self.lexer.cursor()))?,
        };

        let mut node = self.primary(item)?;

        while self.continues_operand(min_priority) {
            let Some(op_token) = self.lookahead.clone() else {
                break;
            };
            // each fold grows the tree by one level
            self.descend(op_token.position)?;

            node = match op_token.kind {
                // `a[i]`: the bracket's own priority keeps `a[i].b` and
                // `a[i][j]` left-associative.
                TokenKind::Special(_) => {
                    let index = self.group_element(op_token.priority)?;
                    Node::binary(Operator::Index, node, index, op_token.position, op_token.priority)
                }
                TokenKind::Operator(op @ (Operator::Increment | Operator::Decrement)) => {
                    self.bump()?;
                    Node::unary(op, node, op_token.position, op_token.priority)
                }
                TokenKind::Operator(op) => {
                    let right = self.expression(op_token.priority, None)?;
                    Node::binary(op, node, right, op_token.position, op_token.priority)
                }
                _ => break,
            };
        }

        Ok(node)
    }

    /// Builds the leading operand from `item`, which is also the current
    /// lookahead.
    fn primary(&mut self, item: Token) -> ExprResult<Node> {
        let Token {
            kind,
            position,
            priority,
        } = item;

        let node = match kind {
            TokenKind::Const(value) => {
                self.bump()?;
                Node::literal(value, position, priority)
            }
            TokenKind::Variable(name) => {
                self.bump()?;
                Node::variable(name, position, priority)
            }
            TokenKind::Function(name) => {
                // step onto the `(` that made this token a function name
                self.bump()?;
                let args = self.group_elements(priority)?;
                Node::call(name, args, position, priority)
            }
            TokenKind::Operator(Operator::Not) => {
                let operand = self.expression(priority, None)?;
                Node::unary(Operator::Not, operand, position, priority)
            }
            // Prefix sign: `-x` becomes `0 - x` so it shares the binary
            // operator's priority and associativity.
            TokenKind::Operator(op @ (Operator::Add | Operator::Sub)) => {
                let zero = Node::literal(Literal::Number(0.0), position, self.lexer.depth_priority());
                let right = self.expression(priority, None)?;
                Node::binary(op, zero, right, position, priority)
            }
            TokenKind::Special('(') => self.group_element(priority)?,
            TokenKind::Special('[') => {
                let elements = self.group_elements(priority)?;
                Node::array(elements, position, priority)
            }
            _ => return Err(ExprError::syntax("Argument expected", position)),
        };

        Ok(node)
    }

    /// `( expr )` or `[ expr ]` with the opener as lookahead.
    pub(crate) fn group_element(&mut self, priority: u32) -> ExprResult<Node> {
        let closer = self.closer_for_lookahead();
        let inner = self.expression(priority, None)?;

        if !self.at_special(closer) {
            return Err(self.expected(closer));
        }
        self.bump()?;

        Ok(inner)
    }

    /// Comma-separated list up to the closer matching the lookahead opener.
    /// Each element must be followed by `,` or the closer.
    pub(crate) fn group_elements(&mut self, priority: u32) -> ExprResult<Vec<Node>> {
        let closer = self.closer_for_lookahead();
        let mut items = Vec::new();
        let mut current = self.bump()?;

        loop {
            match current {
                None => return Err(self.expected(closer)),
                Some(ref token) if token.is_special(closer) => break,
                Some(token) => {
                    items.push(self.expression(priority, Some(token))?);

                    current = if self.at_special(',') {
                        self.bump()?
                    } else if self.at_special(closer) {
                        self.lookahead.clone()
                    } else {
                        return Err(match &self.lookahead {
                            Some(t) => ExprError::syntax("Unexpected char", t.position),
                            None => self.expected(closer),
                        });
                    };
                }
            }
        }

        // consume the closer
        self.bump()?;
        Ok(items)
    }
}
