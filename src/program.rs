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

use tracing::{debug, instrument, trace};

use crate::ast::Node;
use crate::context::Bindings;
use crate::error::{ExprError, ExprResult};
use crate::interpreter::Scope;
use crate::parser::parse_statement;

/// One `;`-separated statement of a script.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The statement's text exactly as it appears in the script.
    pub text: String,
    pub node: Node,
    /// Character offset of `text` within the whole script.
    pub offset: usize,
}

/// A compiled script: statements in source order, ready to run any number
/// of times against any bindings.
///
/// ```
/// use pawx_expr::{Context, Program, Value};
///
/// let program = Program::compile("total = 0; foreach(n, prices, total += n)").unwrap();
///
/// let mut ctx = Context::new()
///     .with("total", 0)
///     .with("prices", vec![Value::from(3), Value::from(4)]);
/// program.run(&mut ctx).unwrap();
///
/// assert_eq!(ctx.value("total"), Some(&Value::from(7)));
/// ```
#[derive(Debug, Clone)]
pub struct Program {
    source: String,
    statements: Vec<Statement>,
}

impl Program {
    /// Splits `source` on `;` and parses every non-blank statement.
    ///
    /// A `;` inside a string literal does not split. Any parse error aborts
    /// compilation; its position refers to `source`, and its message shows
    /// the failing statement with `>>` marking the failure point.
    #[instrument(level = "debug", skip_all, fields(chars = source.chars().count()))]
    pub fn compile(source: &str) -> ExprResult<Self> {
        let mut statements = Vec::new();

        for (offset, text) in split_statements(source) {
            if text.trim().is_empty() {
                continue;
            }

            let node = parse_statement(&text).map_err(|err| annotate(err, &text, offset))?;
            trace!(offset, "parsed statement");

            statements.push(Statement { text, node, offset });
        }

        debug!(statements = statements.len(), "compiled program");

        Ok(Self {
            source: source.to_string(),
            statements,
        })
    }

    /// Evaluates every statement in order against `bindings`.
    ///
    /// Stops at the first error, whose position is remapped from the
    /// statement to the whole script. Statements that already ran keep
    /// their side effects.
    #[instrument(level = "debug", skip_all, fields(statements = self.statements.len()))]
    pub fn run(&self, bindings: &mut dyn Bindings) -> ExprResult<()> {
        let mut scope = Scope::new(bindings);

        for statement in &self.statements {
            trace!(offset = statement.offset, text = %statement.text.trim(), "running statement");

            scope
                .eval(&statement.node)
                .map_err(|err| err.shifted(statement.offset))?;
        }

        debug!("program finished");
        Ok(())
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

/// Splits on `;` outside string literals, keeping every segment (blank
/// ones included) with its character offset.
fn split_statements(source: &str) -> Vec<(usize, String)> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut start = 0;
    let mut in_string = false;

    for (index, c) in source.chars().enumerate() {
        match c {
            '"' => {
                in_string = !in_string;
                current.push(c);
            }
            ';' if !in_string => {
                segments.push((start, std::mem::take(&mut current)));
                start = index + 1;
            }
            _ => current.push(c),
        }
    }
    segments.push((start, current));

    segments
}

/// Turns a statement-relative parse error into a script-relative one with
/// the statement text split at the failure point.
fn annotate(err: ExprError, text: &str, offset: usize) -> ExprError {
    let at = err.position.min(text.chars().count());
    let before: String = text.chars().take(at).collect();
    let after: String = text.chars().skip(at).collect();

    ExprError {
        message: format!("{}: {} >>{}", err.message, before, after),
        ..err
    }
    .shifted(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::error::ErrorKind;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_and_records_offsets() {
        let program = Program::compile("a = 1;  ; b = 2").unwrap();
        let offsets: Vec<usize> = program.statements().iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0, 9]);
        assert_eq!(program.statements()[1].text, " b = 2");
    }

    #[test]
    fn semicolon_inside_string_does_not_split() {
        let program = Program::compile(r#"s = "a;b"; n = 1"#).unwrap();
        assert_eq!(program.statements().len(), 2);

        let mut ctx = Context::new().with("s", "").with("n", 0);
        program.run(&mut ctx).unwrap();
        assert_eq!(ctx.value("s"), Some(&Value::from("a;b")));
    }

    #[test]
    fn semicolon_inside_brackets_still_splits() {
        let err = Program::compile("f(1; 2)").unwrap_err();
        assert_eq!(err.message, "Expected \")\": f(1 >>");
        assert_eq!(err.kind, ErrorKind::Syntax);
    }

    #[test]
    fn parse_errors_are_annotated_and_shifted() {
        let err = Program::compile("x = 1; y = * 2").unwrap_err();
        assert_eq!(err.message, "Argument expected:  y =  >>* 2");
        assert_eq!(err.position, 11);
    }

    #[test]
    fn runtime_errors_are_remapped_to_the_script() {
        let program = Program::compile("1+1; 1/0").unwrap();
        let err = program.run(&mut Context::new()).unwrap_err();
        assert_eq!(err.message, "Divide by 0");
        assert_eq!(err.position, 6);
    }

    #[test]
    fn blank_segments_still_count_towards_offsets() {
        let program = Program::compile(";;1/0").unwrap();
        let err = program.run(&mut Context::new()).unwrap_err();
        assert_eq!(err.position, 3);
    }

    #[test]
    fn earlier_statements_keep_their_effects() {
        let program = Program::compile("x = 5; y = 1").unwrap();
        let mut ctx = Context::new().with("x", 0);
        assert!(program.run(&mut ctx).is_err());
        assert_eq!(ctx.value("x"), Some(&Value::from(5)));
    }

    #[test]
    fn empty_script_compiles_to_nothing() {
        let program = Program::compile(" \n\t; ").unwrap();
        assert!(program.statements().is_empty());
        program.run(&mut Context::new()).unwrap();
    }
}
