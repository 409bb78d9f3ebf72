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

use std::rc::Rc;

use tracing::trace;

use crate::ast::{Node, NodeKind};
use crate::error::{ExprError, ExprResult};
use crate::interpreter::helpers::{array_index, property_key};
use crate::interpreter::scope::Scope;
use crate::library::NativeFn;
use crate::value::{HostObject, NativeFunction, Value};

/// What `object.name(...)` resolved to.
enum Method {
    /// Function-valued field of a plain object.
    Field(NativeFunction),
    /// Field that exists but holds something else.
    NotCallable,
    Host(Rc<dyn HostObject>),
    /// String/array method; the receiver is passed as `args[0]`.
    Library(NativeFn),
}

impl<'a> Scope<'a> {
    /// `object.key`, `object[key]` and `object.method(args)`.
    pub(crate) fn member(&mut self, left: &Node, right: &Node) -> ExprResult<Value> {
        let object = self.eval(left)?;

        if !object.is_truthy() {
            return Err(ExprError::reference(
                format!("Object {} not found", left.path()),
                left.position,
            ));
        }

        if let NodeKind::Call { name, args } = &right.kind {
            return self.call_method(&object, name, args, right);
        }

        let key = self.eval(right)?;
        Ok(get_member(&object, &property_key(&key)))
    }

    fn call_method(&mut self, object: &Value, name: &str, args: &[Node], call: &Node) -> ExprResult<Value> {
        let Some(method) = self.find_method(object, name) else {
            return Err(ExprError::reference(
                format!("Function {} not found", name),
                call.position,
            ));
        };

        let mut values = args
            .iter()
            .map(|arg| self.eval(arg))
            .collect::<ExprResult<Vec<_>>>()?;

        trace!(method = name, receiver = object.type_name(), args = values.len(), "calling method");

        let result = match method {
            Method::Field(f) => f.call(values),
            Method::NotCallable => Err(format!("{} is not a function", name)),
            Method::Host(host) => host.call(name, values),
            Method::Library(f) => {
                values.insert(0, object.clone());
                f(&values)
            }
        };

        result.map_err(|message| ExprError::runtime(message, call.position))
    }

    fn find_method(&self, object: &Value, name: &str) -> Option<Method> {
        match object {
            Value::Object(fields) => match fields.borrow().get(name) {
                Some(Value::Function(f)) => Some(Method::Field(f.clone())),
                Some(_) => Some(Method::NotCallable),
                None => None,
            },
            Value::Host(host) => host.has(name).then(|| Method::Host(Rc::clone(host))),
            Value::String(_) => self.library.string_method(name).map(Method::Library),
            Value::Array(_) => self.library.array_method(name).map(Method::Library),
            _ => None,
        }
    }
}

/// Reads `object[key]`; anything missing is `undefined`.
///
/// Strings and arrays expose `length` and per-index elements; plain
/// objects and host objects expose their fields.
pub fn get_member(object: &Value, key: &str) -> Value {
    match object {
        Value::Object(fields) => fields.borrow().get(key).cloned().unwrap_or(Value::Undefined),
        Value::Host(host) => host.get(key),
        Value::Array(items) => {
            let items = items.borrow();
            if key == "length" {
                return Value::Number(items.len() as f64);
            }
            array_index(key)
                .and_then(|i| items.get(i).cloned())
                .unwrap_or(Value::Undefined)
        }
        Value::String(text) => {
            if key == "length" {
                return Value::Number(text.chars().count() as f64);
            }
            array_index(key)
                .and_then(|i| text.chars().nth(i))
                .map_or(Value::Undefined, |c| Value::String(c.to_string()))
        }
        _ => Value::Undefined,
    }
}

/// Whether an assignment to `object[key]` targets an existing slot.
pub fn has_member(object: &Value, key: &str) -> bool {
    match object {
        Value::Object(fields) => fields.borrow().contains_key(key),
        Value::Host(host) => host.has(key),
        Value::Array(items) => array_index(key).is_some_and(|i| i < items.borrow().len()),
        // strings are immutable
        _ => false,
    }
}

/// Writes `object[key]`; callers check [`has_member`] first.
pub fn set_member(object: &Value, key: &str, value: Value) -> Result<(), String> {
    match object {
        Value::Object(fields) => {
            fields.borrow_mut().insert(key.to_string(), value);
            Ok(())
        }
        Value::Host(host) => host.set(key, value),
        Value::Array(items) => {
            let mut items = items.borrow_mut();
            match array_index(key).and_then(|i| items.get_mut(i)) {
                Some(slot) => {
                    *slot = value;
                    Ok(())
                }
                None => Err(format!("Cannot find property {} in object", key)),
            }
        }
        other => Err(format!("Cannot assign to a property of {}", other.type_name())),
    }
}
