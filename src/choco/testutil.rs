//! Scripted command runner double shared by the unit tests.

use std::cell::RefCell;
use std::path::Path;

use super::error::ChocoError;
use super::runner::{CommandOutput, CommandRunner};

/// Records every invocation and answers from a scripted closure instead of
/// spawning processes.
pub(crate) struct ScriptedRunner {
    calls: RefCell<Vec<Vec<String>>>,
    script: Box<dyn Fn(&[String]) -> CommandOutput>,
}

impl ScriptedRunner {
    pub(crate) fn responding(script: impl Fn(&[String]) -> CommandOutput + 'static) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            script: Box::new(script),
        }
    }

    pub(crate) fn ok(stdout: &str) -> CommandOutput {
        CommandOutput {
            stdout: stdout.to_string(),
            success: true,
            code: Some(0),
        }
    }

    pub(crate) fn fail(code: i32) -> CommandOutput {
        CommandOutput {
            stdout: String::new(),
            success: false,
            code: Some(code),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, _program: &Path, args: &[String]) -> Result<CommandOutput, ChocoError> {
        self.calls.borrow_mut().push(args.to_vec());
        Ok((self.script)(args))
    }
}
