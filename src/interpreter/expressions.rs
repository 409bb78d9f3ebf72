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
use crate::interpreter::helpers::{add, compare, remainder, subtract};
use crate::interpreter::scope::Scope;
use crate::lexer::Operator;
use crate::parser::MAX_NESTING;
use crate::value::Value;

impl<'a> Scope<'a> {
    /// Evaluates a single node and returns its runtime value.
    ///
    /// This is the core dispatcher; every sub-expression, command argument
    /// and statement passes through here. Trees deeper than
    /// [`MAX_NESTING`] fail instead of exhausting the stack; the parser
    /// never produces one, but hand-built trees can.
    pub fn eval(&mut self, node: &Node) -> ExprResult<Value> {
        if self.depth >= MAX_NESTING {
            return Err(ExprError::runtime("Expression nested too deeply", node.position));
        }

        self.depth += 1;
        let result = self.eval_node(node);
        self.depth -= 1;
        result
    }

    fn eval_node(&mut self, node: &Node) -> ExprResult<Value> {
        match &node.kind {
            // -----------------------------------------------------------------
            // Leaves
            // -----------------------------------------------------------------
            NodeKind::Literal { value } => Ok(value.to_value()),
            NodeKind::Variable { name } => Ok(self.lookup(name)),

            // -----------------------------------------------------------------
            // `!x`, `x++`, `x--`
            // -----------------------------------------------------------------
            NodeKind::Unary { op, operand } => match op {
                Operator::Not => Ok(Value::Bool(!self.eval(operand)?.is_truthy())),
                Operator::Increment | Operator::Decrement => self.assign(node, *op, operand, None),
                other => Err(unknown_operator(*other, node.position)),
            },

            NodeKind::Binary { op, left, right } => self.eval_binary(node, *op, left, right),

            // -----------------------------------------------------------------
            // `[a, b, c]`: a fresh array on every evaluation
            // -----------------------------------------------------------------
            NodeKind::Array { elements } => {
                let values = elements
                    .iter()
                    .map(|element| self.eval(element))
                    .collect::<ExprResult<Vec<_>>>()?;
                Ok(Value::array(values))
            }

            NodeKind::Call { name, args } => self.call(node, name, args),
        }
    }

    fn eval_binary(&mut self, node: &Node, op: Operator, left: &Node, right: &Node) -> ExprResult<Value> {
        match op {
            Operator::Assign | Operator::AddAssign | Operator::SubAssign => {
                self.assign(node, op, left, Some(right))
            }

            Operator::Dot | Operator::Index => self.member(left, right),

            // -----------------------------------------------------------------
            // Numbers only
            // -----------------------------------------------------------------
            Operator::Mul | Operator::Div => {
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;

                let (Value::Number(a), Value::Number(b)) = (&lhs, &rhs) else {
                    return Err(ExprError::type_error(
                        "operator * is applicable for numbers only",
                        node.position,
                    )
                    .with_help(format!(
                        "left side is {}, right side is {}",
                        lhs.type_name(),
                        rhs.type_name()
                    )));
                };

                if op == Operator::Mul {
                    return Ok(Value::Number(a * b));
                }
                if *b == 0.0 {
                    return Err(ExprError::runtime("Divide by 0", node.position));
                }
                Ok(Value::Number(a / b))
            }

            // -----------------------------------------------------------------
            // Generic arithmetic
            // -----------------------------------------------------------------
            Operator::Add => {
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                Ok(add(&lhs, &rhs))
            }
            Operator::Sub => {
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                Ok(subtract(&lhs, &rhs))
            }
            Operator::Rem => {
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                Ok(remainder(&lhs, &rhs))
            }

            // -----------------------------------------------------------------
            // Logic: both sides are always evaluated, the result is one of
            // the operands
            // -----------------------------------------------------------------
            Operator::And => {
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                Ok(if lhs.is_truthy() { rhs } else { lhs })
            }
            Operator::Or => {
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                Ok(if lhs.is_truthy() { lhs } else { rhs })
            }

            // -----------------------------------------------------------------
            // Comparison
            // -----------------------------------------------------------------
            Operator::Equal | Operator::NotEqual => {
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                let equal = Value::strict_equals(&lhs, &rhs);
                Ok(Value::Bool(if op == Operator::Equal { equal } else { !equal }))
            }
            Operator::Greater | Operator::Less | Operator::GreaterEq | Operator::LessEq => {
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                Ok(Value::Bool(compare(op, &lhs, &rhs)))
            }

            other => Err(unknown_operator(other, node.position)),
        }
    }
}

fn unknown_operator(op: Operator, position: usize) -> ExprError {
    ExprError::runtime(format!("Unknown operator {}", op), position)
}
