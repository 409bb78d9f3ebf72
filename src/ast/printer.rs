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

use crate::ast::node::{Literal, Node, NodeKind};
use crate::lexer::Operator;

/// Prints a node back to source text.
///
/// Every binary operator is wrapped in parentheses, so re-parsing the
/// output yields a tree that evaluates the same way regardless of the
/// priorities of the original text. Prefix minus comes back as `(0 - x)`,
/// which is exactly what the parser synthesized in the first place.
pub fn to_source(node: &Node) -> String {
    match &node.kind {
        NodeKind::Literal { value: Literal::Number(n) } if *n < 0.0 => {
            format!("(0 - {})", Literal::Number(-n))
        }
        NodeKind::Literal { value } => value.to_string(),
        NodeKind::Variable { name } => name.clone(),
        NodeKind::Unary { op: Operator::Not, operand } => format!("!{}", operand_source(operand)),
        NodeKind::Unary { op, operand } => format!("{}{}", operand_source(operand), op),
        NodeKind::Binary { op: Operator::Dot, left, right } => match &right.kind {
            NodeKind::Literal { value: Literal::String(name) } if is_identifier(name) => {
                format!("{}.{}", operand_source(left), name)
            }
            NodeKind::Call { .. } => format!("{}.{}", operand_source(left), to_source(right)),
            _ => format!("{}[{}]", operand_source(left), to_source(right)),
        },
        NodeKind::Binary { op: Operator::Index, left, right } => {
            format!("{}[{}]", operand_source(left), to_source(right))
        }
        NodeKind::Binary { op, left, right } => {
            format!("({} {} {})", to_source(left), op, to_source(right))
        }
        NodeKind::Array { elements } => format!("[{}]", join(elements)),
        NodeKind::Call { name, args } => format!("{}({})", name, join(args)),
    }
}

/// Indented one-node-per-line dump:
///
/// ```text
/// = Operator
/// | x Variable
/// | + Operator
/// | | 1 Const
/// | | 2 Const
/// ```
pub fn to_tree(node: &Node) -> String {
    let mut out = String::new();
    write_tree(node, 0, &mut out);
    out
}

fn write_tree(node: &Node, level: usize, out: &mut String) {
    out.push_str(&"| ".repeat(level));

    match &node.kind {
        NodeKind::Literal { value } => out.push_str(&format!("{} Const\n", value)),
        NodeKind::Variable { name } => out.push_str(&format!("{} Variable\n", name)),
        NodeKind::Unary { op, operand } => {
            out.push_str(&format!("{} Operator\n", op));
            write_tree(operand, level + 1, out);
        }
        NodeKind::Binary { op, left, right } => {
            out.push_str(&format!("{} Operator\n", op));
            write_tree(left, level + 1, out);
            write_tree(right, level + 1, out);
        }
        NodeKind::Array { elements } => {
            out.push_str("array Array\n");
            for element in elements {
                write_tree(element, level + 1, out);
            }
        }
        NodeKind::Call { name, args } => {
            let suffix = if args.is_empty() { "()" } else { "" };
            out.push_str(&format!("{}{} Function\n", name, suffix));
            for arg in args {
                write_tree(arg, level + 1, out);
            }
        }
    }
}

/// Operands of postfix, `!`, `.` and `[` only need extra parentheses when
/// they are themselves unary; binary operators already print wrapped.
fn operand_source(node: &Node) -> String {
    match &node.kind {
        NodeKind::Unary { .. } => format!("({})", to_source(node)),
        _ => to_source(node),
    }
}

fn join(nodes: &[Node]) -> String {
    nodes.iter().map(to_source).collect::<Vec<_>>().join(", ")
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic()) && chars.all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_statement;
    use pretty_assertions::assert_eq;

    fn print(source: &str) -> String {
        to_source(&parse_statement(source).unwrap())
    }

    #[test]
    fn binary_operators_are_parenthesised() {
        assert_eq!(print("x = 1 + 2 * 3"), "(x = (1 + (2 * 3)))");
    }

    #[test]
    fn prefix_minus_prints_as_subtraction_from_zero() {
        assert_eq!(print("-a"), "(0 - a)");
    }

    #[test]
    fn member_chains_and_calls() {
        assert_eq!(print(r#"p.players[1].name.slice(0, 2)"#), "p.players[1].name.slice(0, 2)");
        assert_eq!(print("foreach(i, [1, 2], s += i)"), "foreach(i, [1, 2], (s += i))");
    }

    #[test]
    fn postfix_and_not() {
        assert_eq!(print("a.b++"), "a.b++");
        assert_eq!(print("!(x < 1)"), "!(x < 1)");
        assert_eq!(print("(!x).y"), "(!x).y");
    }

    #[test]
    fn tree_dump_indents_children() {
        let tree = to_tree(&parse_statement("x = max(1)").unwrap());
        assert_eq!(tree, "= Operator\n| x Variable\n| max Function\n| | 1 Const\n");
    }
}
