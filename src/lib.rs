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

//! Small embeddable expression language.
//!
//! Scripts are `;`-separated expressions evaluated against host-supplied
//! bindings:
//!
//! ```
//! use pawx_expr::{Context, Program, Value};
//!
//! let program = Program::compile(
//!     "foreach(p, players, if(p.score > best, best = p.score)); count = players.length",
//! )
//! .unwrap();
//!
//! let mut ctx = Context::from_json(serde_json::json!({
//!     "players": [{ "score": 3 }, { "score": 11 }, { "score": 7 }],
//!     "best": 0,
//!     "count": 0
//! }))
//! .unwrap();
//!
//! program.run(&mut ctx).unwrap();
//! assert_eq!(ctx.value("best"), Some(&Value::from(11)));
//! assert_eq!(ctx.value("count"), Some(&Value::from(3)));
//! ```
//!
//! Pipeline: [`lexer`] (on-demand tokens with bracket-depth priorities) →
//! [`parser`] (precedence climbing) → [`ast`] → [`interpreter`] (tree
//! walk over a [`Bindings`] namespace) → [`Program`] (statement splitting
//! and error remapping).

pub mod ast;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod library;
pub mod parser;
pub mod program;
pub mod span;
pub mod value;

pub use ast::{to_source, to_tree, Literal, Node, NodeKind};
pub use context::{Bindings, Context};
pub use diagnostics::DiagnosticPrinter;
pub use error::{ErrorKind, ExprError, ExprResult};
pub use interpreter::{evaluate, Scope};
pub use lexer::{tokenize, Operator, Token, TokenKind};
pub use parser::parse_statement;
pub use program::{Program, Statement};
pub use span::Span;
pub use value::{CallResult, HostObject, NativeFunction, Value};
