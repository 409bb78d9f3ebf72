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
use std::rc::Rc;

use crate::library::{optional_arg, slice_bounds, FunctionTable, NativeFn};
use crate::value::{join_array, CallResult, Value};

/// Installs the methods scripts can call on array values.
///
/// Arrays are shared handles, so `push`/`pop` mutate the array every
/// holder sees, including the one stored in the binding context.
///
/// # Example (script)
/// ```text
/// foreach(p, players, names.push(p.name))
/// ```
pub fn create_array_methods() -> FunctionTable {
    let methods: [(&'static str, NativeFn); 6] = [
        ("push", array_push),
        ("pop", array_pop),
        ("indexOf", array_index_of),
        ("includes", array_includes),
        ("join", array_join),
        ("slice", array_slice),
    ];

    methods.into_iter().collect()
}

fn receiver(args: &[Value]) -> Result<&Rc<RefCell<Vec<Value>>>, String> {
    match args.first() {
        Some(Value::Array(items)) => Ok(items),
        _ => Err("array method called on a non-array".to_string()),
    }
}

/// Appends every argument; returns the new length.
pub fn array_push(args: &[Value]) -> CallResult {
    let items = receiver(args)?;
    let mut items = items.borrow_mut();
    items.extend(args[1..].iter().cloned());

    Ok(Value::Number(items.len() as f64))
}

/// Removes and returns the last element, `undefined` when empty.
pub fn array_pop(args: &[Value]) -> CallResult {
    let items = receiver(args)?;
    let last = items.borrow_mut().pop();

    Ok(last.unwrap_or(Value::Undefined))
}

/// Index of the first strictly equal element, or -1.
pub fn array_index_of(args: &[Value]) -> CallResult {
    let items = receiver(args)?.borrow();
    let needle = args.get(1).cloned().unwrap_or(Value::Undefined);

    let index = items
        .iter()
        .position(|item| Value::strict_equals(item, &needle))
        .map_or(-1.0, |i| i as f64);

    Ok(Value::Number(index))
}

/// Like `indexOf(x) >= 0`, except that NaN finds NaN.
pub fn array_includes(args: &[Value]) -> CallResult {
    let items = receiver(args)?.borrow();
    let needle = args.get(1).cloned().unwrap_or(Value::Undefined);

    let found = items.iter().any(|item| match (item, &needle) {
        (Value::Number(a), Value::Number(b)) if a.is_nan() && b.is_nan() => true,
        _ => Value::strict_equals(item, &needle),
    });

    Ok(Value::Bool(found))
}

/// Joins the string forms with `separator` (default `,`); `null` and
/// `undefined` elements contribute empty strings.
pub fn array_join(args: &[Value]) -> CallResult {
    let items = receiver(args)?;
    let separator = optional_arg(args, 1).map_or_else(|| ",".to_string(), Value::to_script_string);

    Ok(Value::String(join_array(items, &separator)))
}

/// Shallow copy of `start..end`, negative bounds counted from the end.
pub fn array_slice(args: &[Value]) -> CallResult {
    let items = receiver(args)?.borrow();
    let (start, end) = slice_bounds(args, 1, items.len());

    Ok(Value::array(items[start..end].to_vec()))
}
