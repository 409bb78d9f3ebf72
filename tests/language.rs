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

use std::cell::RefCell;
use std::collections::HashMap;

use pawx_expr::{CallResult, Context, ErrorKind, ExprError, HostObject, Program, Value};
use pretty_assertions::assert_eq;
use serde_json::json;

fn run(ctx: &mut Context, src: &str) -> Result<(), ExprError> {
    Program::compile(src)?.run(ctx)
}

fn assert_success(ctx: &mut Context, src: &str) {
    if let Err(e) = run(ctx, src) {
        panic!("Script failed: {src}\nError: {e}");
    }
}

fn assert_failure(ctx: &mut Context, src: &str) -> ExprError {
    match run(ctx, src) {
        Ok(()) => panic!("Script succeeded but was expected to fail: {src}"),
        Err(e) => e,
    }
}

/// Evaluates `expr` by assigning it to a pre-bound `r`.
fn value_of(expr: &str) -> Value {
    let mut ctx = Context::new().with("r", 0);
    assert_success(&mut ctx, &format!("r = {expr}"));
    ctx.value("r").cloned().unwrap_or(Value::Undefined)
}

#[test]
fn arithmetic_precedence_and_associativity() {
    assert_eq!(value_of("1 + 2 * 3"), Value::from(7));
    assert_eq!(value_of("(1 + 2) * 3"), Value::from(9));
    assert_eq!(value_of("10 - 2 - 3"), Value::from(5));
    assert_eq!(value_of("2 * 3 % 4"), Value::from(2));
    assert_eq!(value_of("-2 + 5"), Value::from(3));
    assert_eq!(value_of("1 + 2 < 4 & 3 > 2"), Value::from(true));
}

#[test]
fn strings_and_numbers_mix_through_plus() {
    assert_eq!(value_of(r#""n=" + 1 + 2"#), Value::from("n=12"));
    assert_eq!(value_of(r#"1 + 2 + "px""#), Value::from("3px"));
    assert_eq!(value_of(r#""abc" < "abd""#), Value::from(true));
    assert_eq!(value_of("[2] > [10]"), Value::from(true));
    assert_eq!(value_of("[2] > 10"), Value::from(false));
}

#[test]
fn division_by_zero_reports_the_operator() {
    let err = assert_failure(&mut Context::new(), "1 + 10 / 0");
    assert_eq!(err.message, "Divide by 0");
    assert_eq!(err.kind, ErrorKind::Runtime);
    assert_eq!(err.position, 7);
}

#[test]
fn assignment_needs_an_existing_name() {
    let mut ctx = Context::new().with("x", 1);
    assert_success(&mut ctx, "x = x + 1; x += 10; x -= 1");
    assert_eq!(ctx.value("x"), Some(&Value::from(11)));

    let err = assert_failure(&mut ctx, "y = 1");
    assert_eq!(err.message, "Cannot find property y in object");
    assert_eq!(err.kind, ErrorKind::Reference);
    assert!(ctx.value("y").is_none());
}

#[test]
fn increments_return_the_previous_value() {
    let mut ctx = Context::new().with("x", 5).with("old", 0);
    assert_success(&mut ctx, "old = x++; x--; x++");
    assert_eq!(ctx.value("old"), Some(&Value::from(5)));
    assert_eq!(ctx.value("x"), Some(&Value::from(6)));
}

#[test]
fn logic_operators_evaluate_both_sides() {
    let mut ctx = Context::new().with("x", 0).with("r", 1);
    assert_success(&mut ctx, "r = false & (x++)");
    assert_eq!(ctx.value("x"), Some(&Value::from(1)));
    assert_eq!(ctx.value("r"), Some(&Value::from(false)));

    assert_success(&mut ctx, "r = true | (x++)");
    assert_eq!(ctx.value("x"), Some(&Value::from(2)));
    assert_eq!(ctx.value("r"), Some(&Value::from(true)));
}

#[test]
fn nested_foreach_leaves_no_loop_variables_behind() {
    let mut ctx = Context::from_json(json!({ "a": [1, 2, 3], "total": 0 })).unwrap();
    assert_success(&mut ctx, "foreach(i, a, foreach(j, a, total += i * j))");
    assert_eq!(ctx.value("total"), Some(&Value::from(36)));
    assert!(ctx.value("i").is_none());
    assert!(ctx.value("j").is_none());

    // loop variables cannot be assigned once the loop is over
    let err = assert_failure(&mut ctx, "foreach(i, a, 1); i = 1");
    assert_eq!(err.kind, ErrorKind::Reference);
}

#[test]
fn nested_foreach_cannot_reuse_a_name() {
    let mut ctx = Context::from_json(json!({ "a": [1], "b": [2] })).unwrap();
    let err = assert_failure(&mut ctx, "foreach(i, a, foreach(i, b, 0))");
    assert_eq!(err.message, "Item name \"i\" is already in use");
    assert_eq!(err.position, 22);
}

#[test]
fn conditional_picks_one_branch() {
    let mut ctx = Context::from_json(json!({ "score": 70, "grade": "" })).unwrap();
    assert_success(&mut ctx, r#"grade = if(score >= 60, "pass", "fail")"#);
    assert_eq!(ctx.value("grade"), Some(&Value::from("pass")));
}

#[test]
fn errors_are_positioned_within_the_whole_script() {
    let err = assert_failure(&mut Context::new(), "1+1; 1/0");
    assert_eq!(err.position, 6);

    let err = assert_failure(&mut Context::new(), "1+1;\n  nope()");
    assert_eq!(err.message, "Unknown function or command - nope");
    assert_eq!(err.position, 7);
}

#[test]
fn parse_errors_fail_before_anything_runs() {
    let mut ctx = Context::new().with("x", 0);
    let err = assert_failure(&mut ctx, "x = 1; x = (2");
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(ctx.value("x"), Some(&Value::from(0)));
}

#[test]
fn semicolons_in_strings_are_text() {
    let mut ctx = Context::new().with("csv", "").with("n", 0);
    assert_success(&mut ctx, r#"csv = "a;b;c"; n = csv.split(";").length"#);
    assert_eq!(ctx.value("n"), Some(&Value::from(3)));
}

#[test]
fn objects_and_arrays_from_json() {
    let mut ctx = Context::from_json(json!({
        "user": { "name": "ada", "tags": ["x", "y"] },
        "out": ""
    }))
    .unwrap();

    assert_success(
        &mut ctx,
        r#"user.tags.push("z"); user.name = user.name.toUpperCase(); out = user.tags.join("-")"#,
    );

    assert_eq!(
        ctx.to_json(),
        json!({ "user": { "name": "ADA", "tags": ["x", "y", "z"] }, "out": "x-y-z" })
    );
}

#[test]
fn missing_object_in_a_member_chain() {
    let mut ctx = Context::new().with("n", 0);
    let err = assert_failure(&mut ctx, "n = cfg.limit");
    assert_eq!(err.message, "Object cfg not found");
    assert_eq!(err.position, 4);
}

#[test]
fn library_and_builtins() {
    assert_eq!(value_of("max(3, 9, 4) - min(3, 9, 4)"), Value::from(6));
    assert_eq!(value_of("round(2.5) + floor(-0.5)"), Value::from(2));
    assert_eq!(value_of("sum(1, 2, 3, 4)"), Value::from(10));
    assert_eq!(value_of(r#"indexOf("hello", "l")"#), Value::from(2));
    assert_eq!(value_of("[1, 2, 3].slice(-2).length"), Value::from(2));
}

#[test]
fn arrays_that_contain_themselves_still_print() {
    let mut ctx = Context::from_json(json!({ "a": [1], "s": "", "t": "" })).unwrap();
    assert_success(&mut ctx, r#"a.push(a); s = a.join("-"); t = a + "!""#);

    assert_eq!(ctx.value("s"), Some(&Value::from("1-")));
    assert_eq!(ctx.value("t"), Some(&Value::from("1,!")));
    assert_eq!(ctx.to_json()["a"], json!([1, null]));
}

#[test]
fn deeply_nested_scripts_fail_to_compile() {
    let src = format!("x = {}1{}", "(".repeat(50_000), ")".repeat(50_000));
    let err = assert_failure(&mut Context::new().with("x", 0), &src);
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert!(err.message.starts_with("Expression nested too deeply: "));
}

/// Shopping cart exposed to scripts through the host object interface.
struct Cart {
    items: RefCell<Vec<f64>>,
    fields: RefCell<HashMap<String, Value>>,
}

impl Cart {
    fn new() -> Self {
        let mut fields = HashMap::new();
        fields.insert("discount".to_string(), Value::from(0));
        Self {
            items: RefCell::new(Vec::new()),
            fields: RefCell::new(fields),
        }
    }
}

impl HostObject for Cart {
    fn has(&self, key: &str) -> bool {
        matches!(key, "add" | "total" | "count") || self.fields.borrow().contains_key(key)
    }

    fn get(&self, key: &str) -> Value {
        match key {
            "count" => Value::from(self.items.borrow().len() as f64),
            _ => self.fields.borrow().get(key).cloned().unwrap_or(Value::Undefined),
        }
    }

    fn set(&self, key: &str, value: Value) -> Result<(), String> {
        self.fields.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }

    fn call(&self, method: &str, args: Vec<Value>) -> CallResult {
        match method {
            "add" => {
                let price = args.first().and_then(Value::as_number).ok_or("add expects a price")?;
                self.items.borrow_mut().push(price);
                Ok(Value::Undefined)
            }
            "total" => {
                let discount = self.get("discount").to_number();
                Ok(Value::from(self.items.borrow().iter().sum::<f64>() - discount))
            }
            _ => Err(format!("no method {method}")),
        }
    }

    fn type_name(&self) -> &str {
        "Cart"
    }
}

#[test]
fn host_objects_are_driven_through_their_interface() {
    let mut ctx = Context::new().with("cart", Value::host(Cart::new())).with("due", 0);

    assert_success(
        &mut ctx,
        "cart.add(10); cart.add(5.5); cart.discount += 3; due = cart.total()",
    );
    assert_eq!(ctx.value("due"), Some(&Value::from(12.5)));

    let err = assert_failure(&mut ctx, r#"cart.add("free")"#);
    assert_eq!(err.message, "add expects a price");
    assert_eq!(err.position, 5);

    let err = assert_failure(&mut ctx, "cart.coupon = 1");
    assert_eq!(err.message, "Cannot find property coupon in object");
}
