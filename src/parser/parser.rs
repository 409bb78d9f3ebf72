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

use crate::ast::Node;
use crate::error::{ExprError, ExprResult};
use crate::lexer::{Lexer, Token};

/// Deepest expression nesting the parser accepts.
///
/// Every group, call argument, operand of a prefix operator and folded
/// operator counts one level, so the height of any tree the parser returns
/// stays within this bound.
pub const MAX_NESTING: usize = 256;

/// Precedence-climbing parser over an on-demand [`Lexer`].
///
/// The parser keeps exactly one token of lookahead: `lookahead` always holds
/// the most recently scanned token, which is the next token nobody has
/// consumed yet. The grammar itself lives in `expressions.rs` and the token
/// checks in `helpers.rs`, both as further `impl Parser` blocks.
pub struct Parser {
    pub(crate) lexer: Lexer,

    /// Most recently scanned token, `None` at end of input.
    pub(crate) lookahead: Option<Token>,

    /// Current nesting level, see [`MAX_NESTING`].
    pub(crate) depth: usize,
}

/// Parses one statement (one `;`-free expression) into a tree.
///
/// # Errors
/// Lexical errors from the scanner, and syntax errors: `Expected expression`,
/// `Argument expected`, `Expected ")"`/`Expected "]"`, `Unexpected char`,
/// `Expression nested too deeply`.
/// Positions are character offsets into `source`.
///
/// # Example
/// ```
/// use pawx_expr::parse_statement;
///
/// let node = parse_statement("total += price * 2").unwrap();
/// assert_eq!(node.to_string(), "(total += (price * 2))");
/// ```
pub fn parse_statement(source: &str) -> ExprResult<Node> {
    let mut parser = Parser::new(source);
    parser.parse()
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self {
            lexer: Lexer::new(source),
            lookahead: None,
            depth: 0,
        }
    }

    /// Parses the whole input as a single expression.
    ///
    /// Anything left over once the expression is complete (`1 2`, `f(x) y`)
    /// is rejected rather than silently dropped.
    pub fn parse(&mut self) -> ExprResult<Node> {
        let node = self.expression(0, None)?;

        if let Some(token) = &self.lookahead {
            return Err(ExprError::syntax("Unexpected char", token.position));
        }

        Ok(node)
    }
}
