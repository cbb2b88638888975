//! Interactive overwrite confirmation

use comgen_codegen::ConfirmOverwrite;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Lists the files about to be replaced and reads a yes/no answer
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl PromptConfirm<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, paths: &[PathBuf]) -> io::Result<bool> {
        writeln!(self.output, "The following files will be overwritten:")?;
        for path in paths {
            writeln!(self.output, "  {}", path.display())?;
        }
        write!(self.output, "Continue? [y/N] ")?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

impl<R: BufRead, W: Write> ConfirmOverwrite for PromptConfirm<R, W> {
    /// Unreadable input counts as "no"
    fn confirm_overwrite(&mut self, paths: &[PathBuf]) -> bool {
        self.ask(paths).unwrap_or(false)
    }
}
