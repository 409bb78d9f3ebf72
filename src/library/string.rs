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

use crate::library::{number_arg, optional_arg, slice_bounds, string_arg, FunctionTable, NativeFn};
use crate::value::{CallResult, Value};

/// Installs the methods scripts can call on string values.
///
/// Each entry receives the receiver string as `args[0]`. Indices and
/// lengths count characters, not bytes.
///
/// # Example (script)
/// ```text
/// name.slice(0, 3).toUpperCase()
/// ```
pub fn create_string_methods() -> FunctionTable {
    let methods: [(&'static str, NativeFn); 12] = [
        ("indexOf", string_index_of),
        ("slice", string_slice),
        ("split", string_split),
        ("replace", string_replace),
        ("toUpperCase", |a| Ok(Value::String(receiver(a)?.to_uppercase()))),
        ("toLowerCase", |a| Ok(Value::String(receiver(a)?.to_lowercase()))),
        ("trim", |a| Ok(Value::from(receiver(a)?.trim()))),
        ("includes", |a| Ok(Value::Bool(receiver(a)?.contains(string_arg(a, 1).as_str())))),
        ("startsWith", |a| Ok(Value::Bool(receiver(a)?.starts_with(string_arg(a, 1).as_str())))),
        ("endsWith", |a| Ok(Value::Bool(receiver(a)?.ends_with(string_arg(a, 1).as_str())))),
        ("charAt", string_char_at),
        ("toString", |a| Ok(Value::from(receiver(a)?))),
    ];

    methods.into_iter().collect()
}

fn receiver(args: &[Value]) -> Result<&str, String> {
    args.first()
        .and_then(Value::as_str)
        .ok_or_else(|| "string method called on a non-string".to_string())
}

/// Character index of the first occurrence of `search`, or -1.
pub fn string_index_of(args: &[Value]) -> CallResult {
    let text = receiver(args)?;
    let search = string_arg(args, 1);

    let index = text
        .find(search.as_str())
        .map_or(-1.0, |byte| text[..byte].chars().count() as f64);

    Ok(Value::Number(index))
}

/// `text.slice(start[, end])` with negative bounds counted from the end.
pub fn string_slice(args: &[Value]) -> CallResult {
    let chars: Vec<char> = receiver(args)?.chars().collect();
    let (start, end) = slice_bounds(args, 1, chars.len());

    Ok(Value::String(chars[start..end].iter().collect()))
}

/// `text.split(delimiter[, limit])`.
///
/// - no delimiter: a one-element array holding the whole text
/// - empty delimiter: one element per character
pub fn string_split(args: &[Value]) -> CallResult {
    let text = receiver(args)?;

    let mut parts: Vec<Value> = match optional_arg(args, 1) {
        None => vec![Value::from(text)],
        Some(delimiter) => {
            let delimiter = delimiter.to_script_string();
            if delimiter.is_empty() {
                text.chars().map(|c| Value::String(c.to_string())).collect()
            } else {
                text.split(delimiter.as_str()).map(Value::from).collect()
            }
        }
    };

    if optional_arg(args, 2).is_some() {
        let limit = number_arg(args, 2);
        if limit.is_finite() && limit >= 0.0 {
            parts.truncate(limit as usize);
        }
    }

    Ok(Value::array(parts))
}

/// Replaces the first occurrence of `search` with `replacement`.
pub fn string_replace(args: &[Value]) -> CallResult {
    let text = receiver(args)?;
    let search = string_arg(args, 1);
    let replacement = string_arg(args, 2);

    Ok(Value::String(text.replacen(search.as_str(), &replacement, 1)))
}

/// Character at `index` as a one-character string, `""` when out of range.
fn string_char_at(args: &[Value]) -> CallResult {
    let text = receiver(args)?;
    let index = optional_arg(args, 1).map_or(0.0, Value::to_number);
    let index = if index.is_nan() { 0.0 } else { index.trunc() };

    if index < 0.0 {
        return Ok(Value::String(String::new()));
    }

    Ok(Value::String(
        text.chars()
            .nth(index as usize)
            .map(String::from)
            .unwrap_or_default(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn call(name: &str, args: &[Value]) -> Value {
        let f = create_string_methods()[name];
        f(args).unwrap()
    }

    #[test]
    fn index_of_counts_characters() {
        assert_eq!(call("indexOf", &[Value::from("héllo"), Value::from("l")]), Value::from(2));
        assert_eq!(call("indexOf", &[Value::from("abc"), Value::from("z")]), Value::from(-1));
    }

    #[test]
    fn slice_supports_negative_bounds() {
        let text = Value::from("abcdef");
        assert_eq!(call("slice", &[text.clone(), Value::from(1), Value::from(3)]), Value::from("bc"));
        assert_eq!(call("slice", &[text.clone(), Value::from(-2)]), Value::from("ef"));
        assert_eq!(call("slice", &[text, Value::from(4), Value::from(2)]), Value::from(""));
    }

    #[test]
    fn split_variants() {
        let parts = call("split", &[Value::from("a,b,c"), Value::from(","), Value::from(2)]);
        assert_eq!(parts.to_script_string(), "a,b");

        let chars = call("split", &[Value::from("xyz"), Value::from("")]);
        assert_eq!(chars.to_json(), serde_json::json!(["x", "y", "z"]));

        let whole = call("split", &[Value::from("a b")]);
        assert_eq!(whole.to_json(), serde_json::json!(["a b"]));
    }

    #[test]
    fn replace_only_first_occurrence() {
        let out = call("replace", &[Value::from("a-a-a"), Value::from("a"), Value::from("b")]);
        assert_eq!(out, Value::from("b-a-a"));
    }

    #[test]
    fn case_trim_and_predicates() {
        assert_eq!(call("toUpperCase", &[Value::from("pawx")]), Value::from("PAWX"));
        assert_eq!(call("trim", &[Value::from("  x ")]), Value::from("x"));
        assert_eq!(call("includes", &[Value::from("hello"), Value::from("ell")]), Value::Bool(true));
        assert_eq!(call("startsWith", &[Value::from("hello"), Value::from("he")]), Value::Bool(true));
        assert_eq!(call("endsWith", &[Value::from("hello"), Value::from("x")]), Value::Bool(false));
        assert_eq!(call("charAt", &[Value::from("abc"), Value::from(1)]), Value::from("b"));
        assert_eq!(call("charAt", &[Value::from("abc"), Value::from(9)]), Value::from(""));
    }

    #[test]
    fn non_string_receiver_is_an_error() {
        let f = create_string_methods()["trim"];
        assert!(f(&[Value::from(1)]).is_err());
    }
}
