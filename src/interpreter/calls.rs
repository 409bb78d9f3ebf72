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

use tracing::trace;

use crate::ast::Node;
use crate::error::{ExprError, ExprResult};
use crate::interpreter::scope::Scope;
use crate::library::NativeFn;
use crate::value::Value;

/// Resolved target of a bare `name(args)` call.
enum Callee {
    Library(NativeFn),
    Bindings,
}

impl<'a> Scope<'a> {
    /// Dispatches `name(args)`.
    ///
    /// Lookup order:
    /// 1. commands (`if`, `foreach`), which get the unevaluated nodes
    /// 2. the numeric library
    /// 3. engine built-ins
    /// 4. callables in the host bindings
    ///
    /// A callable's failure message is reported at the call's position.
    /// Arguments are evaluated before the call, so an error inside an
    /// argument keeps its own position.
    pub(crate) fn call(&mut self, node: &Node, name: &str, args: &[Node]) -> ExprResult<Value> {
        match name {
            "if" => return self.command_if(node, args),
            "foreach" => return self.command_foreach(node, args),
            _ => {}
        }

        let callee = if let Some(f) = self.library.math(name) {
            Callee::Library(f)
        } else if let Some(f) = self.library.builtin(name) {
            Callee::Library(f)
        } else if self.bindings.has(name) {
            Callee::Bindings
        } else {
            return Err(ExprError::reference(
                format!("Unknown function or command - {}", name),
                node.position,
            ));
        };

        let values = self.eval_args(args)?;
        trace!(function = name, args = values.len(), "calling function");

        let result = match callee {
            Callee::Library(f) => f(&values),
            Callee::Bindings => self.bindings.call(name, values),
        };

        result.map_err(|message| ExprError::runtime(message, node.position))
    }

    pub(crate) fn eval_args(&mut self, args: &[Node]) -> ExprResult<Vec<Value>> {
        args.iter().map(|arg| self.eval(arg)).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::context::Context;
    use crate::error::{ErrorKind, ExprResult};
    use crate::interpreter::evaluate;
    use crate::parser::parse_statement;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    fn run(ctx: &mut Context, source: &str) -> ExprResult<Value> {
        evaluate(&parse_statement(source).unwrap(), ctx)
    }

    #[test]
    fn library_functions_by_bare_name() {
        let mut ctx = Context::new();
        assert_eq!(run(&mut ctx, "max(1, 7, 3)"), Ok(Value::from(7)));
        assert_eq!(run(&mut ctx, "floor(2.7) + abs(-1)"), Ok(Value::from(3)));
        assert_eq!(run(&mut ctx, "sum(1, 2, 3)"), Ok(Value::from(6)));
        assert_eq!(run(&mut ctx, "split(\"a b\", \" \").length"), Ok(Value::from(2)));
    }

    #[test]
    fn host_callables_come_last() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);

        let mut ctx = Context::new()
            .with(
                "ssum",
                Value::function(move |args| {
                    seen.set(seen.get() + 1);
                    Ok(args.iter().fold(Value::from(0), |acc, v| {
                        Value::from(acc.to_number() + v.to_number())
                    }))
                }),
            )
            // a host `max` never wins over the library one
            .with("max", Value::function(|_| Ok(Value::from(-1))));

        assert_eq!(run(&mut ctx, "ssum(2, 3)"), Ok(Value::from(5)));
        assert_eq!(run(&mut ctx, "max(2, 3)"), Ok(Value::from(3)));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn unknown_function_is_positioned_at_the_name() {
        let err = run(&mut Context::new(), "1 + nope(2)").unwrap_err();
        assert_eq!(err.message, "Unknown function or command - nope");
        assert_eq!(err.kind, ErrorKind::Reference);
        assert_eq!(err.position, 4);
    }

    #[test]
    fn callable_failures_are_rewrapped_at_the_call() {
        let mut ctx = Context::new().with("fail", Value::function(|_| Err("boom".to_string())));
        let err = run(&mut ctx, "1 + fail()").unwrap_err();
        assert_eq!(err.message, "boom");
        assert_eq!(err.position, 4);
        assert_eq!(err.kind, ErrorKind::Runtime);
    }

    #[test]
    fn argument_errors_keep_their_position() {
        let err = run(&mut Context::new(), "max(1, 2 / 0)").unwrap_err();
        assert_eq!(err.message, "Divide by 0");
        assert_eq!(err.position, 9);
    }

    #[test]
    fn non_callable_binding() {
        let mut ctx = Context::new().with("n", 1);
        let err = run(&mut ctx, "n()").unwrap_err();
        assert_eq!(err.message, "n is not a function");
    }
}
