//! Runner that prints invocations instead of executing them

use std::io;

use super::{CommandOutput, CommandRunner, Invocation};
use crate::ui::Reporter;

/// Exit code reported for status queries: "not present"
const QUERY_NOT_FOUND: i32 = 2;

/// Reports each invocation and pretends it succeeded
///
/// Status queries answer "not present", so a dry run shows the full set of
/// actions a fresh host would get.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunRunner {
    reporter: Reporter,
}

impl DryRunRunner {
    pub fn new(reporter: Reporter) -> Self {
        Self { reporter }
    }
}

impl CommandRunner for DryRunRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        if invocation.is_query() {
            self.reporter.would(&format!("check: {invocation}"));
            return Ok(CommandOutput::with_code(QUERY_NOT_FOUND));
        }
        self.reporter.would(&format!("run: {invocation}"));
        Ok(CommandOutput::with_code(0))
    }

    fn spawn(&self, invocation: &Invocation) -> io::Result<()> {
        self.reporter.would(&format!("start: {invocation}"));
        Ok(())
    }
}
