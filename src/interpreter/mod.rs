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

/*
 * --------------------------------------------------------------------------
 *  MODULE OVERVIEW
 * --------------------------------------------------------------------------
 * Tree-walking evaluator.
 *
 * All evaluation logic hangs off `Scope` as `impl` blocks in the submodules:
 *
 *  - scope.rs       → loop-variable frames over the host bindings
 *  - expressions.rs → node dispatch and operators
 *  - assign.rs      → `= += -= ++ --`
 *  - members.rs     → `.`, `[]` and method calls
 *  - calls.rs       → bare-name call dispatch
 *  - commands.rs    → `if` and `foreach`
 *  - helpers.rs     → value-level operator semantics
 * ==========================================================================
 */

pub mod assign;
pub mod calls;
pub mod commands;
pub mod expressions;
pub mod helpers;
pub mod members;
pub mod scope;

use crate::ast::Node;
use crate::context::Bindings;
use crate::error::ExprResult;
use crate::value::Value;

pub use scope::Scope;

/// Evaluates one statement tree against `bindings`.
///
/// Each call starts without loop frames; use [`Scope`] directly to evaluate
/// several trees in one scope.
pub fn evaluate(node: &Node, bindings: &mut dyn Bindings) -> ExprResult<Value> {
    Scope::new(bindings).eval(node)
}
