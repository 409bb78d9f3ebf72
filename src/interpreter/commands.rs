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
 * Built-in commands.
 *
 * Commands look like calls but receive their argument *nodes*, so they
 * decide what gets evaluated and when:
 *
 *   if(cond, then[, else])    only the taken branch runs
 *   foreach(item, list, body) body runs once per element with `item` bound
 */

use crate::ast::Node;
use crate::error::{ExprError, ExprResult};
use crate::interpreter::scope::Scope;
use crate::value::Value;

impl<'a> Scope<'a> {
    pub(crate) fn command_if(&mut self, node: &Node, args: &[Node]) -> ExprResult<Value> {
        if args.len() < 2 {
            return Err(ExprError::runtime("Wrong arguments in if command", node.position)
                .with_help("usage: if(condition, then[, else])"));
        }

        if self.eval(&args[0])?.is_truthy() {
            self.eval(&args[1])
        } else if let Some(otherwise) = args.get(2) {
            self.eval(otherwise)
        } else {
            Ok(Value::Undefined)
        }
    }

    /// `foreach(item, list, body)`.
    ///
    /// All nested loops share a single frame: the outermost loop pushes
    /// it, inner loops add their variable to it. The loop variable is
    /// removed again on every exit path, error or not.
    pub(crate) fn command_foreach(&mut self, node: &Node, args: &[Node]) -> ExprResult<Value> {
        let [item, list, body] = args else {
            return Err(ExprError::runtime("Wrong arguments in foreach", node.position)
                .with_help("usage: foreach(item, list, body)"));
        };

        let Some(name) = item.as_variable() else {
            return Err(ExprError::type_error("First parameter must be variable", item.position));
        };

        let owns_frame = self.frames.is_empty();
        if owns_frame {
            self.push_frame();
        }

        if self.top_frame_has(name) {
            if owns_frame {
                self.pop_frame();
            }
            return Err(ExprError::runtime(
                format!("Item name \"{}\" is already in use", name),
                item.position,
            ));
        }

        let result = self.iterate(name, list, body);

        if owns_frame {
            self.pop_frame();
        } else {
            self.unbind(name);
        }

        result.map(|_| Value::Undefined)
    }

    fn iterate(&mut self, name: &str, list: &Node, body: &Node) -> ExprResult<()> {
        match self.eval(list)? {
            // Read by index on every step so that elements pushed by the
            // body are visited too.
            Value::Array(items) => {
                let mut index = 0;
                loop {
                    let next = items.borrow().get(index).cloned();
                    let Some(element) = next else {
                        break;
                    };
                    self.bind(name, element);
                    self.eval(body)?;
                    index += 1;
                }
            }
            Value::String(text) => {
                for c in text.chars() {
                    self.bind(name, Value::String(c.to_string()));
                    self.eval(body)?;
                }
            }
            other => {
                return Err(ExprError::type_error("Second parameter must be array", list.position)
                    .with_help(format!("got {}", other.type_name())));
            }
        }

        Ok(())
    }
}
