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
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

/// Result type returned by anything the host or the engine library exposes
/// as callable. The error string becomes the message of a positioned
/// [`crate::ExprError`] at the call site.
pub type CallResult = Result<Value, String>;

/// Native host function:
/// takes a vector of script Values → returns a script Value or a failure message
#[derive(Clone)]
pub struct NativeFunction(Rc<dyn Fn(Vec<Value>) -> CallResult>);

impl NativeFunction {
    pub fn new(f: impl Fn(Vec<Value>) -> CallResult + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, args: Vec<Value>) -> CallResult {
        (self.0)(args)
    }

    fn ptr_eq(&self, other: &NativeFunction) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Capability interface for objects the host hands to scripts.
///
/// Member access (`obj.name`, `obj[key]`), member assignment and method
/// calls (`obj.name(args)`) on a [`Value::Host`] are routed through these
/// four operations. Keys arrive already converted to their string form, so
/// `obj[1]` asks for `"1"`.
///
/// Implementations use interior mutability: scripts only ever hold shared
/// handles to host objects.
pub trait HostObject {
    /// Whether `key` names a property or method.
    fn has(&self, key: &str) -> bool;

    /// Reads a property, `Value::Undefined` when absent.
    fn get(&self, key: &str) -> Value;

    /// Writes a property. Only called for keys where `has` is true.
    fn set(&self, key: &str, value: Value) -> Result<(), String>;

    /// Invokes a method with already-evaluated arguments.
    fn call(&self, method: &str, args: Vec<Value>) -> CallResult;

    /// Name used in diagnostics and `Debug` output.
    fn type_name(&self) -> &str {
        "Object"
    }
}

/// Runtime value representation.
///
/// This is the core type that flows through the evaluator.
/// Every expression ultimately evaluates to one of these.
#[derive(Clone)]
pub enum Value {
    /// Result of reading a name or property that does not exist.
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),

    // Shared across copies; assignment through `a[i] = …` is visible to
    // every holder of the array.
    Array(Rc<RefCell<Vec<Value>>>),

    // Plain object / field map
    Object(Rc<RefCell<HashMap<String, Value>>>),

    Host(Rc<dyn HostObject>),
    Function(NativeFunction),
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Number(n) => write!(f, "Number({})", n),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Array(values) => write!(f, "Array([{}])", join_array(values, ", ")),
            Value::Object(fields) => write!(f, "[Object keys={}]", fields.borrow().len()),
            Value::Host(host) => write!(f, "[Host {}]", host.type_name()),
            Value::Function(_) => write!(f, "[NativeFunction]"),
        }
    }
}

impl PartialEq for Value {
    /// Same relation as the `==` operator.
    fn eq(&self, other: &Self) -> bool {
        Value::strict_equals(self, other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_script_string())
    }
}

impl Value {
    pub fn array(values: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(values)))
    }

    pub fn object(fields: HashMap<String, Value>) -> Self {
        Value::Object(Rc::new(RefCell::new(fields)))
    }

    pub fn function(f: impl Fn(Vec<Value>) -> CallResult + 'static) -> Self {
        Value::Function(NativeFunction::new(f))
    }

    pub fn host(object: impl HostObject + 'static) -> Self {
        Value::Host(Rc::new(object))
    }

    /// Returns a stable type name string (useful for errors).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "Undefined",
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
            Value::Host(_) => "Host",
            Value::Function(_) => "Function",
        }
    }

    /// Truthiness used by `!`, `&`, `|`, `if` and the object-presence check
    /// of member access.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            // arrays, objects and functions are truthy even when empty
            _ => true,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric coercion used by `-`, `%`, `++`, `--`, relational
    /// comparisons and the numeric library.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => *n,
            Value::String(s) => parse_numeric(s),
            // `[]` is 0 and `[7]` is 7, via their string form
            Value::Array(_) => parse_numeric(&self.to_script_string()),
            _ => f64::NAN,
        }
    }

    /// String form used by `+` concatenation, `string()` and `join`.
    ///
    /// An array that (indirectly) contains itself prints the inner
    /// occurrence as an empty string.
    pub fn to_script_string(&self) -> String {
        self.script_string_within(&mut HashSet::new())
    }

    fn script_string_within(&self, open: &mut HashSet<*const ()>) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::Array(values) => join_within(values, ",", open),
            Value::Object(_) | Value::Host(_) => "[object Object]".to_string(),
            Value::Function(_) => "[function]".to_string(),
        }
    }

    /// Strict equality (`==`):
    /// - primitives compare by type and value
    /// - arrays/objects/functions/host objects compare by identity
    pub fn strict_equals(a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(x), Value::Bool(y)) => x == y,
            (Value::Number(x), Value::Number(y)) => x == y,
            (Value::String(x), Value::String(y)) => x == y,
            (Value::Array(x), Value::Array(y)) => Rc::ptr_eq(x, y),
            (Value::Object(x), Value::Object(y)) => Rc::ptr_eq(x, y),
            (Value::Host(x), Value::Host(y)) => {
                std::ptr::addr_eq(Rc::as_ptr(x), Rc::as_ptr(y))
            }
            (Value::Function(x), Value::Function(y)) => x.ptr_eq(y),
            _ => false,
        }
    }

    /// Converts to JSON. Functions and host objects have no JSON form and
    /// become `null`, as do non-finite numbers and any array or object
    /// reached again while it is still being converted.
    pub fn to_json(&self) -> serde_json::Value {
        self.json_within(&mut HashSet::new())
    }

    fn json_within(&self, open: &mut HashSet<*const ()>) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Undefined | Value::Null | Value::Host(_) | Value::Function(_) => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 9.0e15 {
                    Json::from(*n as i64)
                } else {
                    serde_json::Number::from_f64(*n).map_or(Json::Null, Json::Number)
                }
            }
            Value::String(s) => Json::String(s.clone()),
            Value::Array(values) => {
                let id = Rc::as_ptr(values) as *const ();
                if !open.insert(id) {
                    return Json::Null;
                }
                let items = values.borrow().iter().map(|v| v.json_within(open)).collect();
                open.remove(&id);
                Json::Array(items)
            }
            Value::Object(fields) => {
                let id = Rc::as_ptr(fields) as *const ();
                if !open.insert(id) {
                    return Json::Null;
                }
                let map = fields
                    .borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.json_within(open)))
                    .collect();
                open.remove(&id);
                Json::Object(map)
            }
        }
    }
}

/// Joins the string forms of an array's elements; `undefined` and `null`
/// elements print empty.
pub(crate) fn join_array(values: &Rc<RefCell<Vec<Value>>>, separator: &str) -> String {
    join_within(values, separator, &mut HashSet::new())
}

/// `open` holds the arrays currently being printed; meeting one of them
/// again yields an empty string instead of recursing forever.
fn join_within(
    values: &Rc<RefCell<Vec<Value>>>,
    separator: &str,
    open: &mut HashSet<*const ()>,
) -> String {
    let id = Rc::as_ptr(values) as *const ();
    if !open.insert(id) {
        return String::new();
    }

    let joined = values
        .borrow()
        .iter()
        .map(|v| match v {
            Value::Undefined | Value::Null => String::new(),
            other => other.script_string_within(open),
        })
        .collect::<Vec<_>>()
        .join(separator);

    open.remove(&id);
    joined
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::array(items.into_iter().map(Value::from).collect()),
            Json::Object(fields) => {
                Value::object(fields.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::array(values)
    }
}

/// Formats a number the way scripts print it: integral values without a
/// fractional part, `NaN`, `Infinity`, `-Infinity`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        // also covers -0
        "0".to_string()
    } else {
        n.to_string()
    }
}

fn parse_numeric(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        // reject Rust-only spellings such as "inf" and "nan"
        t if t.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => f64::NAN,
        t => t.parse::<f64>().unwrap_or(f64::NAN),
    }
}
