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

/// Numeric functions callable by bare name (`max(a, b)`, `sqrt(x)`).
pub mod math;

/// Engine built-ins: `sum`, `or`, `and`, `indexOf`, `slice`, `split`,
/// `string`, `replace`.
pub mod builtins;

/// Methods reachable as `text.name(...)`.
pub mod string;

/// Methods reachable as `list.name(...)`.
pub mod array;

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::value::{CallResult, Value};

/// Signature shared by every engine-provided function and method.
///
/// Methods receive their receiver as `args[0]`, followed by the call's own
/// arguments.
pub type NativeFn = fn(&[Value]) -> CallResult;

pub type FunctionTable = HashMap<&'static str, NativeFn>;

/// Everything the engine provides on its own, independent of the host.
pub struct Library {
    math: FunctionTable,
    builtins: FunctionTable,
    string_methods: FunctionTable,
    array_methods: FunctionTable,
}

impl Library {
    /// The shared, lazily built standard library.
    pub fn standard() -> &'static Library {
        static STANDARD: OnceLock<Library> = OnceLock::new();
        STANDARD.get_or_init(|| Library {
            math: math::create_math_functions(),
            builtins: builtins::create_builtin_functions(),
            string_methods: string::create_string_methods(),
            array_methods: array::create_array_methods(),
        })
    }

    pub fn math(&self, name: &str) -> Option<NativeFn> {
        self.math.get(name).copied()
    }

    pub fn builtin(&self, name: &str) -> Option<NativeFn> {
        self.builtins.get(name).copied()
    }

    pub fn string_method(&self, name: &str) -> Option<NativeFn> {
        self.string_methods.get(name).copied()
    }

    pub fn array_method(&self, name: &str) -> Option<NativeFn> {
        self.array_methods.get(name).copied()
    }
}

/// Numeric argument `index`, NaN when missing.
pub(crate) fn number_arg(args: &[Value], index: usize) -> f64 {
    args.get(index).map_or(f64::NAN, Value::to_number)
}

/// Optional argument: `None` when missing or `undefined`.
pub(crate) fn optional_arg(args: &[Value], index: usize) -> Option<&Value> {
    match args.get(index) {
        None | Some(Value::Undefined) => None,
        Some(value) => Some(value),
    }
}

/// String form of argument `index` (`"undefined"` when missing).
pub(crate) fn string_arg(args: &[Value], index: usize) -> String {
    args.get(index)
        .map_or_else(|| "undefined".to_string(), Value::to_script_string)
}

/// Resolves a `slice`-style bound against a sequence of length `len`:
/// negative values count from the end, results are clamped to `0..=len`.
pub(crate) fn relative_index(bound: f64, len: usize) -> usize {
    if bound.is_nan() {
        return 0;
    }
    let bound = bound.trunc();
    let len_f = len as f64;
    if bound < 0.0 {
        (len_f + bound).max(0.0) as usize
    } else {
        bound.min(len_f) as usize
    }
}

/// `(start, end)` of a `slice(start[, end])` call whose arguments begin at
/// `first`.
pub(crate) fn slice_bounds(args: &[Value], first: usize, len: usize) -> (usize, usize) {
    let start = relative_index(optional_arg(args, first).map_or(0.0, Value::to_number), len);
    let end = optional_arg(args, first + 1)
        .map_or(len, |v| relative_index(v.to_number(), len));
    (start, end.max(start))
}
