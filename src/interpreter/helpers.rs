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

use std::borrow::Cow;
use std::cmp::Ordering;

use crate::lexer::Operator;
use crate::value::Value;

/// Generic `+`.
///
/// Concatenates when either side is a string (or anything whose primitive
/// form is a string: arrays, objects, functions); otherwise adds the
/// numeric coercions, so `true + 1` is 2 and `undefined + 1` is NaN.
pub fn add(left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
        _ if concatenates(left) || concatenates(right) => {
            Value::String(left.to_script_string() + &right.to_script_string())
        }
        _ => Value::Number(left.to_number() + right.to_number()),
    }
}

fn concatenates(value: &Value) -> bool {
    matches!(
        value,
        Value::String(_) | Value::Array(_) | Value::Object(_) | Value::Host(_) | Value::Function(_)
    )
}

pub fn subtract(left: &Value, right: &Value) -> Value {
    Value::Number(left.to_number() - right.to_number())
}

/// `%` keeps the sign of the dividend, as `f64 %` does.
pub fn remainder(left: &Value, right: &Value) -> Value {
    Value::Number(left.to_number() % right.to_number())
}

/// Relational comparison for `> < >= <=`.
///
/// Arrays, objects and functions first turn into their string form. Two strings then
/// compare lexicographically; anything else compares numerically, and a
/// NaN on either side makes every comparison false.
pub fn compare(op: Operator, left: &Value, right: &Value) -> bool {
    let left = primitive(left);
    let right = primitive(right);

    let ordering = match (left.as_ref(), right.as_ref()) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (l, r) => l.to_number().partial_cmp(&r.to_number()),
    };

    let Some(ordering) = ordering else {
        return false;
    };

    match op {
        Operator::Greater => ordering == Ordering::Greater,
        Operator::Less => ordering == Ordering::Less,
        Operator::GreaterEq => ordering != Ordering::Less,
        Operator::LessEq => ordering != Ordering::Greater,
        _ => false,
    }
}

fn primitive(value: &Value) -> Cow<'_, Value> {
    match value {
        Value::Array(_) | Value::Object(_) | Value::Host(_) | Value::Function(_) => {
            Cow::Owned(Value::String(value.to_script_string()))
        }
        other => Cow::Borrowed(other),
    }
}

/// Property key for `obj[key]` / `obj.key`: the string form of the key, so
/// `a[1]` and `a["1"]` name the same slot.
pub fn property_key(key: &Value) -> String {
    key.to_script_string()
}

/// Parses a key as an array index (`"2"` → 2). Only canonical
/// non-negative integers qualify; `"02"` and `"1.5"` are plain names.
pub fn array_index(key: &str) -> Option<usize> {
    let index = key.parse::<usize>().ok()?;
    (index.to_string() == key).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_is_generic() {
        assert_eq!(add(&Value::from(1), &Value::from(2)), Value::from(3));
        assert_eq!(add(&Value::from("a"), &Value::from(1)), Value::from("a1"));
        assert_eq!(add(&Value::from(1), &Value::from("a")), Value::from("1a"));
        assert_eq!(add(&Value::Bool(true), &Value::from(1)), Value::from(2));
        assert_eq!(add(&Value::Null, &Value::from(1)), Value::from(1));
        assert!(add(&Value::Undefined, &Value::from(1)).to_number().is_nan());
    }

    #[test]
    fn comparisons() {
        assert!(compare(Operator::Less, &Value::from(1), &Value::from(2)));
        assert!(compare(Operator::Greater, &Value::from("b"), &Value::from("a")));
        assert!(compare(Operator::GreaterEq, &Value::from("10"), &Value::from(9)));
        assert!(!compare(Operator::LessEq, &Value::Undefined, &Value::from(1)));
        assert!(!compare(Operator::GreaterEq, &Value::Undefined, &Value::from(1)));
    }

    #[test]
    fn arrays_compare_by_their_string_form() {
        let two = Value::array(vec![Value::from(2)]);
        let ten = Value::array(vec![Value::from(10)]);
        assert!(compare(Operator::Greater, &two, &ten));
        assert!(!compare(Operator::Less, &two, &ten));

        // against a number the string form is coerced back
        assert!(compare(Operator::Less, &two, &Value::from(10)));
        assert!(compare(Operator::Greater, &two, &Value::from("10")));
    }

    #[test]
    fn array_index_is_canonical() {
        assert_eq!(array_index("2"), Some(2));
        assert_eq!(array_index("02"), None);
        assert_eq!(array_index("-1"), None);
        assert_eq!(array_index("length"), None);
    }
}
