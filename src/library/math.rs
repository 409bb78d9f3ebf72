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

//! The numeric library.
//!
//! Every function coerces its arguments to numbers and treats a missing
//! argument as NaN, so `sqrt()` is NaN rather than an error. Results follow
//! IEEE-754 the way script numbers do: `sqrt(-1)` is NaN, `log(0)` is
//! `-Infinity`.

use crate::library::{number_arg, FunctionTable, NativeFn};
use crate::value::{CallResult, Value};

/// Builds the name → function table for the numeric library.
pub fn create_math_functions() -> FunctionTable {
    let functions: [(&'static str, NativeFn); 33] = [
        // ---------------------------------------------------------------------
        // Rounding & sign
        // ---------------------------------------------------------------------
        ("abs", |a| unary(a, f64::abs)),
        ("ceil", |a| unary(a, f64::ceil)),
        ("floor", |a| unary(a, f64::floor)),
        ("round", |a| unary(a, round_half_up)),
        ("trunc", |a| unary(a, f64::trunc)),
        ("sign", |a| unary(a, sign)),
        ("fround", |a| unary(a, |x| f64::from(x as f32))),
        // ---------------------------------------------------------------------
        // Powers, roots & logarithms
        // ---------------------------------------------------------------------
        ("sqrt", |a| unary(a, f64::sqrt)),
        ("cbrt", |a| unary(a, f64::cbrt)),
        ("exp", |a| unary(a, f64::exp)),
        ("expm1", |a| unary(a, f64::exp_m1)),
        ("log", |a| unary(a, f64::ln)),
        ("log10", |a| unary(a, f64::log10)),
        ("log1p", |a| unary(a, f64::ln_1p)),
        ("log2", |a| unary(a, f64::log2)),
        ("pow", math_pow),
        ("hypot", math_hypot),
        // ---------------------------------------------------------------------
        // Trigonometry
        // ---------------------------------------------------------------------
        ("sin", |a| unary(a, f64::sin)),
        ("cos", |a| unary(a, f64::cos)),
        ("tan", |a| unary(a, f64::tan)),
        ("asin", |a| unary(a, f64::asin)),
        ("acos", |a| unary(a, f64::acos)),
        ("atan", |a| unary(a, f64::atan)),
        ("atan2", |a| Ok(Value::Number(number_arg(a, 0).atan2(number_arg(a, 1))))),
        ("sinh", |a| unary(a, f64::sinh)),
        ("cosh", |a| unary(a, f64::cosh)),
        ("tanh", |a| unary(a, f64::tanh)),
        ("asinh", |a| unary(a, f64::asinh)),
        ("acosh", |a| unary(a, f64::acosh)),
        ("atanh", |a| unary(a, f64::atanh)),
        // ---------------------------------------------------------------------
        // Aggregates
        // ---------------------------------------------------------------------
        ("max", math_max),
        ("min", math_min),
        // ---------------------------------------------------------------------
        // Randomness
        // ---------------------------------------------------------------------
        ("random", math_random),
    ];

    functions.into_iter().collect()
}

fn unary(args: &[Value], f: fn(f64) -> f64) -> CallResult {
    Ok(Value::Number(f(number_arg(args, 0))))
}

/// Halves round towards +Infinity: `round(2.5)` is 3, `round(-2.5)` is -2.
fn round_half_up(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

fn sign(x: f64) -> f64 {
    if x.is_nan() || x == 0.0 {
        x
    } else {
        x.signum()
    }
}

/// `pow(base, exponent)`. Unlike `powf`, `pow(1, NaN)` is NaN.
fn math_pow(args: &[Value]) -> CallResult {
    let base = number_arg(args, 0);
    let exponent = number_arg(args, 1);

    if exponent.is_nan() {
        return Ok(Value::Number(f64::NAN));
    }
    Ok(Value::Number(base.powf(exponent)))
}

/// Square root of the sum of squares; `hypot()` is 0.
fn math_hypot(args: &[Value]) -> CallResult {
    let values: Vec<f64> = args.iter().map(Value::to_number).collect();

    if values.iter().any(|v| v.is_infinite()) {
        return Ok(Value::Number(f64::INFINITY));
    }
    Ok(Value::Number(values.iter().map(|v| v * v).sum::<f64>().sqrt()))
}

/// Largest argument; `-Infinity` with no arguments, NaN if any is NaN.
fn math_max(args: &[Value]) -> CallResult {
    let mut max = f64::NEG_INFINITY;

    for n in args.iter().map(Value::to_number) {
        if n.is_nan() {
            return Ok(Value::Number(f64::NAN));
        }
        if n > max {
            max = n;
        }
    }

    Ok(Value::Number(max))
}

/// Smallest argument; `Infinity` with no arguments, NaN if any is NaN.
fn math_min(args: &[Value]) -> CallResult {
    let mut min = f64::INFINITY;

    for n in args.iter().map(Value::to_number) {
        if n.is_nan() {
            return Ok(Value::Number(f64::NAN));
        }
        if n < min {
            min = n;
        }
    }

    Ok(Value::Number(min))
}

/// Uniform in `[0, 1)`.
fn math_random(_args: &[Value]) -> CallResult {
    Ok(Value::Number(rand::random::<f64>()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[Value]) -> f64 {
        let table = create_math_functions();
        let f = table[name];
        f(args).unwrap().to_number()
    }

    #[test]
    fn rounding_rounds_halves_up() {
        assert_eq!(call("round", &[Value::from(2.5)]), 3.0);
        assert_eq!(call("round", &[Value::from(-2.5)]), -2.0);
        assert_eq!(call("round", &[Value::from(-2.6)]), -3.0);
    }

    #[test]
    fn arguments_are_coerced() {
        assert_eq!(call("sqrt", &[Value::from("16")]), 4.0);
        assert!(call("sqrt", &[]).is_nan());
        assert_eq!(call("abs", &[Value::Bool(true)]), 1.0);
    }

    #[test]
    fn aggregates() {
        assert_eq!(call("max", &[Value::from(4), Value::from(1), Value::from(9)]), 9.0);
        assert_eq!(call("min", &[Value::from(4), Value::from(1), Value::from(9)]), 1.0);
        assert_eq!(call("max", &[]), f64::NEG_INFINITY);
        assert!(call("min", &[Value::from(1), Value::Undefined]).is_nan());
        assert_eq!(call("hypot", &[Value::from(3), Value::from(4)]), 5.0);
    }

    #[test]
    fn pow_with_nan_exponent_is_nan() {
        assert_eq!(call("pow", &[Value::from(2), Value::from(10)]), 1024.0);
        assert!(call("pow", &[Value::from(1), Value::Undefined]).is_nan());
    }

    #[test]
    fn random_is_in_unit_interval() {
        for _ in 0..100 {
            let r = call("random", &[]);
            assert!((0.0..1.0).contains(&r));
        }
    }

    #[test]
    fn sign_keeps_zero_and_nan() {
        assert_eq!(call("sign", &[Value::from(-3)]), -1.0);
        assert_eq!(call("sign", &[Value::from(0)]), 0.0);
        assert!(call("sign", &[Value::Undefined]).is_nan());
    }
}
