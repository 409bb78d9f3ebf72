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

use std::fmt::Write as _;

use crate::error::ExprError;
use crate::span::Span;

/// Responsible for rendering human-friendly, compiler-style diagnostics
/// for expression errors.
///
/// This printer:
/// - Formats errors with script/line/column information
/// - Displays the offending source line
/// - Highlights the exact error position using a caret (`^`)
/// - Optionally shows a helpful follow-up hint
///
/// Error positions are character offsets into the full script, exactly as
/// reported by [`crate::Program::run`] and [`crate::Program::compile`].
pub struct DiagnosticPrinter {
    /// Full text of the script the error was raised against.
    source: String,

    /// Name shown in the `-->` line (a file name, or `<stdin>`).
    file_name: String,
}

impl DiagnosticPrinter {
    /// Creates a new diagnostic printer for a given script.
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Renders the diagnostic into a string.
    ///
    /// # Output Example
    /// ```text
    /// error[E_RUNTIME]: Divide by 0
    ///   --> totals.pxe:1:8
    ///    |
    ///   1 | total = 1 / 0
    ///    |         ^
    /// ```
    pub fn render(&self, error: &ExprError) -> String {
        let Span { line, column } = Span::from_offset(&self.source, error.position);

        let src_line = self
            .source
            .lines()
            .nth(line.saturating_sub(1))
            .unwrap_or("");

        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "error[{}]: {}\n  --> {}:{}:{}",
            error.code(),
            error.message,
            self.file_name,
            line,
            column + 1
        );
        let _ = writeln!(out, "   |");
        let _ = writeln!(out, "{:>3} | {}", line, src_line);
        let _ = writeln!(out, "   | {}^", " ".repeat(column));

        if let Some(help) = &error.help {
            let _ = writeln!(out, "\nhelp: {}", help);
        }

        out
    }

    /// Prints a formatted error diagnostic to stderr.
    pub fn print(&self, error: &ExprError) {
        eprint!("{}", self.render(error));
    }
}
