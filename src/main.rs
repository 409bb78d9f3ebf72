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

use std::io::Read;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pawx_expr::{to_source, to_tree, Context, DiagnosticPrinter, ExprError, Node, Program};

/// Run and inspect expression scripts.
#[derive(Parser)]
#[command(name = "pawx-expr")]
#[command(about = "Run and inspect pawx expression scripts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a script and print the resulting bindings as JSON
    Run {
        /// Path to the script file (reads stdin if omitted)
        script: Option<PathBuf>,

        /// JSON object holding the initial bindings
        #[arg(short, long, env = "PAWX_EXPR_CONTEXT")]
        context: Option<PathBuf>,
    },
    /// Print the syntax tree of every statement
    Ast {
        /// Path to the script file (reads stdin if omitted)
        script: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = AstFormat::Tree)]
        format: AstFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum AstFormat {
    /// Indented one-node-per-line dump
    Tree,
    /// Serialized nodes
    Json,
    /// Fully parenthesized source
    Source,
}

#[derive(Debug, Error)]
enum CliError {
    /// A lexing, parsing or evaluation error, rendered against its script.
    #[error("{error}")]
    Script {
        error: ExprError,
        file: String,
        text: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid context: {0}")]
    Context(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Script { error, .. } if error.kind.is_compile_time() => 2,
            CliError::Script { .. } => 3,
            CliError::Io(_) | CliError::Context(_) | CliError::Json(_) => 4,
        }
    }
}

/// Script text plus the name diagnostics refer to it by.
struct Script {
    file: String,
    source: String,
}

impl Script {
    fn load(path: Option<PathBuf>) -> Result<Self, CliError> {
        match path {
            Some(path) => Ok(Self {
                source: std::fs::read_to_string(&path)?,
                file: path.display().to_string(),
            }),
            None => {
                let mut source = String::new();
                std::io::stdin().read_to_string(&mut source)?;
                Ok(Self {
                    file: "<stdin>".to_string(),
                    source,
                })
            }
        }
    }

    fn compile(&self) -> Result<Program, CliError> {
        Program::compile(&self.source).map_err(|error| self.failure(error))
    }

    fn failure(&self, error: ExprError) -> CliError {
        CliError::Script {
            error,
            file: self.file.clone(),
            text: self.source.clone(),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run { script, context } => run_script(script, context),
        Command::Ast { script, format } => print_ast(script, format),
    };

    if let Err(e) = result {
        match &e {
            CliError::Script { error, file, text } => {
                DiagnosticPrinter::new(file.as_str(), text.as_str()).print(error)
            }
            other => eprintln!("Error: {}", other),
        }
        process::exit(e.exit_code());
    }
}

fn run_script(script: Option<PathBuf>, context: Option<PathBuf>) -> Result<(), CliError> {
    let script = Script::load(script)?;
    let program = script.compile()?;

    let mut ctx = match context {
        Some(path) => {
            debug!(path = %path.display(), "loading context");
            let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
            Context::from_json(json).map_err(CliError::Context)?
        }
        None => Context::new(),
    };

    program.run(&mut ctx).map_err(|error| script.failure(error))?;

    println!("{}", serde_json::to_string_pretty(&ctx.to_json())?);
    Ok(())
}

fn print_ast(script: Option<PathBuf>, format: AstFormat) -> Result<(), CliError> {
    let script = Script::load(script)?;
    let program = script.compile()?;
    let nodes: Vec<&Node> = program.statements().iter().map(|s| &s.node).collect();

    match format {
        AstFormat::Tree => {
            for node in nodes {
                print!("{}", to_tree(node));
            }
        }
        AstFormat::Source => {
            for node in nodes {
                println!("{}", to_source(node));
            }
        }
        AstFormat::Json => println!("{}", serde_json::to_string_pretty(&nodes)?),
    }

    Ok(())
}
