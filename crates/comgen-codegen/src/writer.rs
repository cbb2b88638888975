//! Indentation-aware C source writer

use comgen_core::GeneratorConfig;

const RULE: &str = "//-----------------------------------------------------------------------------";

/// Builds one C source or header file in memory
#[derive(Debug, Clone)]
pub struct CSourceWriter {
    indent_unit: String,
    level: usize,
    out: String,
}

impl CSourceWriter {
    pub fn new(indent_unit: impl Into<String>) -> Self {
        Self {
            indent_unit: indent_unit.into(),
            level: 0,
            out: String::new(),
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.indent_string())
    }

    /// Write `line` at the current indentation
    pub fn write_line(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        if !line.is_empty() {
            for _ in 0..self.level {
                self.out.push_str(&self.indent_unit);
            }
            self.out.push_str(line);
        }
        self.out.push('\n');
    }

    pub fn empty_line(&mut self) {
        self.out.push('\n');
    }

    pub fn begin_block(&mut self) {
        self.write_line("{");
        self.level += 1;
    }

    pub fn end_block(&mut self) {
        self.end_block_with("");
    }

    /// Close a block with a trailing suffix, e.g. `;` after an initializer
    pub fn end_block_with(&mut self, suffix: &str) {
        self.level = self.level.saturating_sub(1);
        self.write_line(format!("}}{suffix}"));
    }

    /// Ruled comment introducing a section or function
    pub fn header_comment(&mut self, text: &str) {
        self.write_line(RULE);
        self.write_line(format!("// {text}"));
        self.write_line(RULE);
    }

    /// `#include "name"` for local headers, `#include <name>` otherwise
    pub fn include(&mut self, name: &str, local: bool) {
        if local {
            self.write_line(format!("#include \"{name}\""));
        } else {
            self.write_line(format!("#include <{name}>"));
        }
    }

    /// Banner identifying the file as generated
    pub fn file_banner(&mut self, file_name: &str) {
        self.write_line(RULE);
        self.write_line(format!("// File: {file_name}"));
        self.write_line(RULE);
        self.write_line("// Auto-generated by comgen");
        self.write_line("// DO NOT MODIFY THIS FILE. ALL CHANGES WILL BE OVERWRITTEN BY COMGEN.");
        self.empty_line();
    }

    pub fn begin_guard(&mut self, guard: &str) {
        self.write_line(format!("#ifndef {guard}"));
        self.write_line(format!("#define {guard}"));
        self.empty_line();
    }

    pub fn end_guard(&mut self, guard: &str) {
        self.write_line(format!("#endif // {guard}"));
    }

    /// Current nesting depth
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Include-guard macro for a file name: `mcapi_instance.h` → `MCAPI_INSTANCE_H`
pub fn guard_name(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Quoted C string literal for arbitrary text
pub fn c_string(text: &str) -> String {
    format!("\"{}\"", c_escape(text))
}

/// Escapes text for use inside a C string literal
pub fn c_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03o}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
