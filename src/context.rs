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

use std::collections::HashMap;

use crate::value::{CallResult, Value};

/// The namespace a script runs against.
///
/// Variable reads, top-level assignments and calls that are neither
/// commands nor library functions all go through this trait, so a host can
/// back it with whatever it likes: a plain map, an environment record, an
/// adapter over its own object model.
pub trait Bindings {
    fn has(&self, name: &str) -> bool;

    /// Current value of `name`, `None` when it is not bound.
    fn get(&self, name: &str) -> Option<Value>;

    /// Stores `value` under `name`. Only called for names where `has` is
    /// true; scripts cannot introduce new top-level names.
    fn set(&mut self, name: &str, value: Value) -> Result<(), String>;

    /// Calls the callable bound to `name`.
    ///
    /// The default looks the name up and invokes it when it holds a
    /// [`Value::Function`].
    fn call(&mut self, name: &str, args: Vec<Value>) -> CallResult {
        match self.get(name) {
            Some(Value::Function(f)) => f.call(args),
            _ => Err(format!("{} is not a function", name)),
        }
    }
}

/// Stock `HashMap`-backed binding context.
///
/// ```
/// use pawx_expr::{Context, Program, Value};
///
/// let mut ctx = Context::new().with("x", 1).with("y", 0);
/// Program::compile("y = x + 41").unwrap().run(&mut ctx).unwrap();
/// assert_eq!(ctx.value("y"), Some(&Value::from(42)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: HashMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Context::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Binds `name`, returning the previous value if there was one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Builds a context from a JSON object; every top-level key becomes a
    /// binding.
    pub fn from_json(json: serde_json::Value) -> Result<Self, String> {
        match json {
            serde_json::Value::Object(fields) => Ok(Self {
                values: fields.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            }),
            other => Err(format!(
                "context must be a JSON object, got {}",
                json_kind(&other)
            )),
        }
    }

    /// Exports every binding; callables and host objects come out as `null`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl Bindings for Context {
    fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), String> {
        self.values.insert(name.to_string(), value);
        Ok(())
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
