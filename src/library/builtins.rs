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

use crate::interpreter::helpers::add;
use crate::library::{array, string, FunctionTable, NativeFn};
use crate::value::{CallResult, Value};

/// Installs the engine's own global functions.
///
/// These sit between the numeric library and the host bindings in call
/// dispatch, so a host binding named `sum` is shadowed by the built-in.
pub fn create_builtin_functions() -> FunctionTable {
    let functions: [(&'static str, NativeFn); 8] = [
        ("sum", builtin_sum),
        ("or", builtin_or),
        ("and", builtin_and),
        ("indexOf", builtin_index_of),
        ("slice", builtin_slice),
        ("split", builtin_split),
        ("string", builtin_string),
        ("replace", builtin_replace),
    ];

    functions.into_iter().collect()
}

/// Folds `+` over the arguments starting from 0, so strings concatenate:
/// `sum(1, 2, "x")` is `"3x"`.
pub fn builtin_sum(args: &[Value]) -> CallResult {
    Ok(args.iter().fold(Value::Number(0.0), |acc, v| add(&acc, v)))
}

/// First truthy argument, else the last one (0 when called bare).
pub fn builtin_or(args: &[Value]) -> CallResult {
    Ok(args.iter().fold(Value::Number(0.0), |acc, v| {
        if acc.is_truthy() {
            acc
        } else {
            v.clone()
        }
    }))
}

/// First falsy argument, else the last one (`true` when called bare).
pub fn builtin_and(args: &[Value]) -> CallResult {
    Ok(args.iter().fold(Value::Bool(true), |acc, v| {
        if acc.is_truthy() {
            v.clone()
        } else {
            acc
        }
    }))
}

/// `indexOf(text, item)`; arrays are searched too.
pub fn builtin_index_of(args: &[Value]) -> CallResult {
    match args.first() {
        Some(Value::String(_)) => string::string_index_of(args),
        Some(Value::Array(_)) => array::array_index_of(args),
        _ => Err("indexOf expects a string or an array".to_string()),
    }
}

/// `slice(text, start[, end])`; arrays are sliced too.
pub fn builtin_slice(args: &[Value]) -> CallResult {
    match args.first() {
        Some(Value::String(_)) => string::string_slice(args),
        Some(Value::Array(_)) => array::array_slice(args),
        _ => Err("slice expects a string or an array".to_string()),
    }
}

/// `split(text, delimiter[, limit])`.
pub fn builtin_split(args: &[Value]) -> CallResult {
    match args.first() {
        Some(Value::String(_)) => string::string_split(args),
        _ => Err("split expects a string".to_string()),
    }
}

/// String form of any value except `null`/`undefined`.
pub fn builtin_string(args: &[Value]) -> CallResult {
    match args.first() {
        None | Some(Value::Undefined) => Err("Cannot convert undefined to string".to_string()),
        Some(Value::Null) => Err("Cannot convert null to string".to_string()),
        Some(value) => Ok(Value::String(value.to_script_string())),
    }
}

/// `replace(text, search, replacement)`, first occurrence only.
pub fn builtin_replace(args: &[Value]) -> CallResult {
    match args.first() {
        Some(Value::String(_)) => string::string_replace(args),
        _ => Err("replace expects a string".to_string()),
    }
}
