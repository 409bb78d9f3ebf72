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

use tracing::debug;

use crate::context::Bindings;
use crate::library::Library;
use crate::parser::MAX_NESTING;
use crate::value::Value;

/// Evaluation state for one run: the host bindings plus the loop-variable
/// frames layered above them.
///
/// At most one frame exists at a time. The outermost `foreach` pushes it
/// and every nested `foreach` binds its variable into that same frame,
/// which is why two nested loops cannot share a variable name.
pub struct Scope<'a> {
    pub(crate) bindings: &'a mut dyn Bindings,
    pub(crate) frames: Vec<HashMap<String, Value>>,
    pub(crate) library: &'static Library,

    /// Nodes currently being evaluated, bounded by [`MAX_NESTING`].
    pub(crate) depth: usize,
}

impl<'a> Scope<'a> {
    pub fn new(bindings: &'a mut dyn Bindings) -> Self {
        Self {
            bindings,
            frames: Vec::new(),
            library: Library::standard(),
            depth: 0,
        }
    }

    /// Resolves a name: the top frame first, then the bindings. A name
    /// bound in neither reads as `undefined`.
    pub fn lookup(&self, name: &str) -> Value {
        self.frames
            .last()
            .and_then(|frame| frame.get(name))
            .cloned()
            .or_else(|| self.bindings.get(name))
            .unwrap_or(Value::Undefined)
    }

    /// Number of live frames (0 or 1 outside of a running `foreach`).
    pub fn frame_depth(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn top_frame_has(&self, name: &str) -> bool {
        self.frames.last().is_some_and(|frame| frame.contains_key(name))
    }

    pub(crate) fn push_frame(&mut self) {
        self.frames.push(HashMap::new());
        debug!(depth = self.frames.len(), "pushed loop frame");
    }

    pub(crate) fn pop_frame(&mut self) {
        self.frames.pop();
        debug!(depth = self.frames.len(), "popped loop frame");
    }

    /// Binds `name` in the top frame. No-op without a frame.
    pub(crate) fn bind(&mut self, name: &str, value: Value) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.to_string(), value);
        }
    }

    pub(crate) fn unbind(&mut self, name: &str) {
        if let Some(frame) = self.frames.last_mut() {
            frame.remove(name);
        }
    }
}
