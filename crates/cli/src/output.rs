// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rendering of [`ToolResult`]s for the terminal or a calling program.

use clap::ValueEnum;
use rangewire_core::ToolResult;

use crate::color::{self, codes};

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// The full result object, pretty-printed
    #[default]
    Json,
    /// Data or message for humans; failures go to stderr
    Text,
}

/// Rendered output and the stream it belongs on.
#[derive(Debug, PartialEq)]
pub struct Rendered {
    pub text: String,
    pub to_stderr: bool,
}

pub fn render(result: &ToolResult, format: OutputFormat, color: bool) -> anyhow::Result<Rendered> {
    match format {
        OutputFormat::Json => {
            Ok(Rendered { text: serde_json::to_string_pretty(result)?, to_stderr: false })
        }
        OutputFormat::Text => match result.error_kind() {
            None => {
                let text = match result.data() {
                    Some(data) => serde_json::to_string_pretty(data)?,
                    None => result.message.trim_end().to_string(),
                };
                Ok(Rendered { text, to_stderr: false })
            }
            Some(kind) => {
                let label = color::paint(codes::FAILURE, &format!("error[{kind}]"), color);
                let mut text = format!("{label}: {}", result.message.trim_end());
                let raw = result.raw_output.trim_end();
                if !raw.is_empty() && raw != result.message.trim_end() {
                    text.push_str("\n\n");
                    text.push_str(&color::paint(codes::CONTEXT, raw, color));
                }
                Ok(Rendered { text, to_stderr: true })
            }
        },
    }
}

pub fn print(result: &ToolResult, format: OutputFormat) -> anyhow::Result<()> {
    let to_stderr = format == OutputFormat::Text && !result.success;
    let color = if to_stderr {
        color::should_colorize(&std::io::stderr())
    } else {
        color::should_colorize(&std::io::stdout())
    };
    let rendered = render(result, format, color)?;
    if rendered.to_stderr {
        eprintln!("{}", rendered.text);
    } else if !rendered.text.is_empty() {
        println!("{}", rendered.text);
    }
    Ok(())
}
