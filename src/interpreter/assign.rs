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

use crate::ast::{Node, NodeKind};
use crate::error::{ExprError, ExprResult};
use crate::interpreter::helpers::{add, property_key, subtract};
use crate::interpreter::members::{get_member, has_member, set_member};
use crate::interpreter::scope::Scope;
use crate::lexer::Operator;
use crate::value::Value;

/// Where an assignment writes.
enum Target {
    /// A loop variable in the top frame.
    Frame(String),
    /// A top-level name in the host bindings.
    Binding(String),
    /// `object.key` / `object[key]`.
    Member { object: Value, key: String },
}

impl<'a> Scope<'a> {
    /// `= += -= ++ --`.
    ///
    /// Assignment never creates anything: the target name or property must
    /// already exist. The target is resolved (and its object evaluated)
    /// before the right-hand side. Postfix `++`/`--` return the old value.
    pub(crate) fn assign(
        &mut self,
        node: &Node,
        op: Operator,
        target: &Node,
        value: Option<&Node>,
    ) -> ExprResult<Value> {
        let slot = self.resolve_target(target)?;

        let rhs = match value {
            Some(expr) => self.eval(expr)?,
            None => Value::Undefined,
        };

        let (stored, result) = match op {
            Operator::Assign => (rhs.clone(), rhs),
            Operator::AddAssign => {
                let sum = add(&self.read_target(&slot), &rhs);
                (sum.clone(), sum)
            }
            Operator::SubAssign => {
                let difference = subtract(&self.read_target(&slot), &rhs);
                (difference.clone(), difference)
            }
            Operator::Increment | Operator::Decrement => {
                let old = self.read_target(&slot).to_number();
                let step = if op == Operator::Increment { 1.0 } else { -1.0 };
                (Value::Number(old + step), Value::Number(old))
            }
            other => {
                return Err(ExprError::runtime(
                    format!("Unknown operator {}", other),
                    node.position,
                ))
            }
        };

        self.write_target(&slot, stored)
            .map_err(|message| ExprError::runtime(message, node.position))?;

        Ok(result)
    }

    fn resolve_target(&mut self, target: &Node) -> ExprResult<Target> {
        match &target.kind {
            NodeKind::Variable { name } => {
                if self.top_frame_has(name) {
                    Ok(Target::Frame(name.clone()))
                } else if self.bindings.has(name) {
                    Ok(Target::Binding(name.clone()))
                } else {
                    Err(missing_property(name, target.position))
                }
            }

            NodeKind::Binary {
                op: Operator::Dot | Operator::Index,
                left,
                right,
            } => {
                let object = self.eval(left)?;
                let key = property_key(&self.eval(right)?);

                if !object.is_truthy() {
                    return Err(ExprError::reference(
                        format!("Cannot find object {}", left.path()),
                        left.position,
                    ));
                }
                if !has_member(&object, &key) {
                    return Err(missing_property(&key, right.position));
                }

                Ok(Target::Member { object, key })
            }

            _ => {
                let description = match target.operator() {
                    Some(op) => op.to_string(),
                    None => target.to_string(),
                };
                Err(ExprError::type_error(
                    format!("Cannot assign value to {}", description),
                    target.position,
                ))
            }
        }
    }

    fn read_target(&self, target: &Target) -> Value {
        match target {
            Target::Frame(name) | Target::Binding(name) => self.lookup(name),
            Target::Member { object, key } => get_member(object, key),
        }
    }

    fn write_target(&mut self, target: &Target, value: Value) -> Result<(), String> {
        match target {
            Target::Frame(name) => {
                self.bind(name, value);
                Ok(())
            }
            Target::Binding(name) => self.bindings.set(name, value),
            Target::Member { object, key } => set_member(object, key, value),
        }
    }
}

fn missing_property(key: &str, position: usize) -> ExprError {
    ExprError::reference(format!("Cannot find property {} in object", key), position)
        .with_help("assignment only updates names and properties that already exist")
}

#[cfg(test)]
mod tests {
    use crate::context::Context;
    use crate::error::ErrorKind;
    use crate::interpreter::evaluate;
    use crate::parser::parse_statement;
    use crate::value::Value;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn run(ctx: &mut Context, source: &str) -> crate::error::ExprResult<Value> {
        evaluate(&parse_statement(source).unwrap(), ctx)
    }

    #[test]
    fn assignment_updates_existing_names_only() {
        let mut ctx = Context::new().with("x", 1);

        assert_eq!(run(&mut ctx, "x = 2"), Ok(Value::from(2)));
        assert_eq!(ctx.value("x"), Some(&Value::from(2)));

        let err = run(&mut ctx, "y = 2").unwrap_err();
        assert_eq!(err.message, "Cannot find property y in object");
        assert_eq!(err.kind, ErrorKind::Reference);
        assert_eq!(err.position, 0);
        assert!(ctx.value("y").is_none());
    }

    #[test]
    fn compound_assignment() {
        let mut ctx = Context::new().with("s", 10).with("t", "a");
        assert_eq!(run(&mut ctx, "s += 5"), Ok(Value::from(15)));
        assert_eq!(run(&mut ctx, "s -= 1"), Ok(Value::from(14)));
        assert_eq!(run(&mut ctx, "t += 1"), Ok(Value::from("a1")));
    }

    #[test]
    fn postfix_returns_old_value() {
        let mut ctx = Context::new().with("n", 5);
        assert_eq!(run(&mut ctx, "n++"), Ok(Value::from(5)));
        assert_eq!(run(&mut ctx, "n--"), Ok(Value::from(6)));
        assert_eq!(ctx.value("n"), Some(&Value::from(5)));
    }

    #[test]
    fn member_and_index_targets() {
        let mut ctx = Context::from_json(json!({
            "p": { "name": "a", "scores": [1, 2, 3] }
        }))
        .unwrap();

        run(&mut ctx, r#"p.name = "b""#).unwrap();
        run(&mut ctx, "p.scores[1] += 10").unwrap();
        run(&mut ctx, "p[\"scores\"][0]++").unwrap();

        assert_eq!(ctx.to_json(), json!({ "p": { "name": "b", "scores": [2, 12, 3] } }));
    }

    #[test]
    fn missing_member_is_rejected() {
        let mut ctx = Context::from_json(json!({ "p": { "a": 1 }, "list": [1] })).unwrap();

        let err = run(&mut ctx, "p.b = 1").unwrap_err();
        assert_eq!(err.message, "Cannot find property b in object");
        assert_eq!(err.position, 2);

        let err = run(&mut ctx, "list[3] = 1").unwrap_err();
        assert_eq!(err.message, "Cannot find property 3 in object");

        let err = run(&mut ctx, "q.a = 1").unwrap_err();
        assert_eq!(err.message, "Cannot find object q");
        assert_eq!(err.position, 0);
    }

    #[test]
    fn non_assignable_targets() {
        let mut ctx = Context::new().with("x", 1);

        let err = run(&mut ctx, "1 = 2").unwrap_err();
        assert_eq!(err.message, "Cannot assign value to 1");

        let err = run(&mut ctx, "(x + 1) = 2").unwrap_err();
        assert_eq!(err.message, "Cannot assign value to +");
        assert_eq!(err.kind, ErrorKind::Type);
    }
}
