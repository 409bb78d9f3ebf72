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

use serde::Serialize;

use crate::lexer::Operator;
use crate::value::{format_number, Value};

/// A constant as written in the source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Number(f64),
    String(String),
    Bool(bool),
}

impl Literal {
    pub fn to_value(&self) -> Value {
        match self {
            Literal::Number(n) => Value::Number(*n),
            Literal::String(s) => Value::String(s.clone()),
            Literal::Bool(b) => Value::Bool(*b),
        }
    }
}

impl fmt::Display for Literal {
    /// Source form: strings are quoted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => f.write_str(&format_number(*n)),
            Literal::String(s) => write!(f, "\"{}\"", s),
            Literal::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// One node of the syntax tree.
///
/// `position` and `priority` come from the token the node was built from:
/// the operator token for operator nodes, the name for calls, the opening
/// `[` for array literals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    pub position: usize,
    pub priority: u32,
}

/// Closed set of node shapes.
///
/// Unary and binary operators are separate variants so the one-child /
/// two-child invariant holds by construction. Prefix `+`/`-` never produce a
/// `Unary`: the parser rewrites them as `Binary` with a synthesized zero on
/// the left.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Literal {
        value: Literal,
    },
    Variable {
        name: String,
    },
    /// `!x`, `x++`, `x--`
    Unary {
        op: Operator,
        operand: Box<Node>,
    },
    /// Arithmetic, logic, comparison, assignment, `.` and `[`.
    Binary {
        op: Operator,
        left: Box<Node>,
        right: Box<Node>,
    },
    Array {
        elements: Vec<Node>,
    },
    /// Host/engine function call or built-in command (`if`, `foreach`).
    /// Which one is decided when the call is evaluated.
    Call {
        name: String,
        args: Vec<Node>,
    },
}

impl Node {
    pub fn new(kind: NodeKind, position: usize, priority: u32) -> Self {
        Self {
            kind,
            position,
            priority,
        }
    }

    pub fn literal(value: Literal, position: usize, priority: u32) -> Self {
        Self::new(NodeKind::Literal { value }, position, priority)
    }

    pub fn variable(name: impl Into<String>, position: usize, priority: u32) -> Self {
        Self::new(NodeKind::Variable { name: name.into() }, position, priority)
    }

    pub fn unary(op: Operator, operand: Node, position: usize, priority: u32) -> Self {
        Self::new(
            NodeKind::Unary {
                op,
                operand: Box::new(operand),
            },
            position,
            priority,
        )
    }

    pub fn binary(op: Operator, left: Node, right: Node, position: usize, priority: u32) -> Self {
        Self::new(
            NodeKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            position,
            priority,
        )
    }

    pub fn array(elements: Vec<Node>, position: usize, priority: u32) -> Self {
        Self::new(NodeKind::Array { elements }, position, priority)
    }

    pub fn call(name: impl Into<String>, args: Vec<Node>, position: usize, priority: u32) -> Self {
        Self::new(
            NodeKind::Call {
                name: name.into(),
                args,
            },
            position,
            priority,
        )
    }

    pub fn as_variable(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Variable { name } => Some(name),
            _ => None,
        }
    }

    pub fn is_call(&self) -> bool {
        matches!(self.kind, NodeKind::Call { .. })
    }

    /// Operator of a unary or binary node.
    pub fn operator(&self) -> Option<Operator> {
        match &self.kind {
            NodeKind::Unary { op, .. } | NodeKind::Binary { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// Dotted path used in "not found" messages, e.g. `p.players.1`.
    pub fn path(&self) -> String {
        match &self.kind {
            NodeKind::Variable { name } => name.clone(),
            NodeKind::Literal { value: Literal::String(s) } => s.clone(),
            NodeKind::Literal { value } => value.to_string(),
            NodeKind::Binary { left, right, .. } => format!("{}.{}", left.path(), right.path()),
            NodeKind::Unary { operand, .. } => operand.path(),
            NodeKind::Call { name, .. } => format!("{}()", name),
            NodeKind::Array { .. } => "[]".to_string(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::printer::to_source(self))
    }
}
