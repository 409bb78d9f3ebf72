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

//! Property tests for the source printer.
//!
//! Random expressions are parsed, printed back with `to_source` and parsed
//! again. The reprinted tree must evaluate to the same result, and leave
//! the same bindings behind, as the original. Printing must also be a
//! fixed point. Generated scripts cover operators, member paths, indexing,
//! method calls, array literals, postfix updates, assignments, `if` and
//! `foreach`.

use pawx_expr::{evaluate, parse_statement, to_source, Context};
use proptest::prelude::*;
use serde_json::json;

fn atom_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..50).prop_map(|n| n.to_string()),
        Just("a".to_string()),
        Just("b".to_string()),
        Just("x".to_string()),
        Just("true".to_string()),
        Just("\"s\"".to_string()),
        Just("[]".to_string()),
        member_path_strategy(),
    ]
}

/// Member paths into the fixture bindings, all of which exist.
fn member_path_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["p.n", "p.a[1].b", "p[\"n\"]", "a[0]", "a.length", "p.a[0]"])
        .prop_map(str::to_string)
}

/// Things that can be assigned to or incremented.
fn target_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["x", "p.n", "a[0]", "p.a[1].b"]).prop_map(str::to_string)
}

fn operator_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["+", "-", "*", "%", "<", ">=", "==", "!=", "&", "|"])
}

fn assignment_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["=", "+=", "-="])
}

/// Methods that never grow their receiver, so loops over `a` stay finite.
fn method_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["slice", "indexOf", "join", "includes"])
}

fn expr_strategy() -> impl Strategy<Value = String> {
    atom_strategy().prop_recursive(4, 48, 3, |inner| {
        prop_oneof![
            (inner.clone(), operator_strategy(), inner.clone())
                .prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            inner.clone().prop_map(|e| format!("({e})")),
            inner.clone().prop_map(|e| format!("-({e})")),
            inner.clone().prop_map(|e| format!("!({e})")),
            prop::collection::vec(inner.clone(), 1..4)
                .prop_map(|args| format!("max({})", args.join(", "))),
            prop::collection::vec(inner.clone(), 0..4)
                .prop_map(|items| format!("[{}]", items.join(", "))),
            inner.clone().prop_map(|e| format!("({e}).length")),
            (inner.clone(), inner.clone()).prop_map(|(e, i)| format!("({e})[{i}]")),
            (inner.clone(), method_strategy(), prop::collection::vec(inner.clone(), 0..3))
                .prop_map(|(e, m, args)| format!("({e}).{m}({})", args.join(", "))),
            (target_strategy(), prop::sample::select(vec!["++", "--"]))
                .prop_map(|(t, op)| format!("{t}{op}")),
            (target_strategy(), assignment_strategy(), inner.clone())
                .prop_map(|(t, op, e)| format!("({t} {op} {e})")),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(c, t, e)| format!("if({c}, {t}, {e})")),
            inner.prop_map(|body| format!("foreach(i, a, {body})")),
        ]
    })
}

/// Evaluation outcome plus the bindings it left behind. Error positions
/// are dropped, since reprinting moves every token.
fn outcome(source: &str) -> (Result<String, String>, serde_json::Value) {
    let mut ctx = Context::from_json(json!({
        "p": { "n": 1, "a": [0, { "b": 5 }] },
        "a": [1, 2, 3],
        "b": 7,
        "x": 3
    }))
    .unwrap();

    let result = match parse_statement(source) {
        Ok(node) => evaluate(&node, &mut ctx)
            .map(|value| value.to_script_string())
            .map_err(|e| e.message),
        Err(e) => Err(format!("parse: {}", e.message)),
    };

    (result, ctx.to_json())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn reprinted_source_evaluates_the_same(expr in expr_strategy()) {
        let node = parse_statement(&expr).unwrap();
        let printed = to_source(&node);

        prop_assert_eq!(outcome(&expr), outcome(&printed), "printed as {}", printed);
    }

    #[test]
    fn printing_is_a_fixed_point(expr in expr_strategy()) {
        let printed = to_source(&parse_statement(&expr).unwrap());
        let reprinted = to_source(&parse_statement(&printed).unwrap());

        prop_assert_eq!(printed, reprinted);
    }
}
