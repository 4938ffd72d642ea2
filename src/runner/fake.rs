//! Scripted command runner for tests
//!
//! Records every invocation in order and answers from handlers registered
//! per program + argument list. Unmatched commands succeed with no output.

#![allow(clippy::expect_used)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;

use super::{CommandOutput, CommandRunner, CommandSpec};
use crate::error::{CartageError, Result};

type Handler = Box<dyn FnMut(&CommandSpec) -> Result<CommandOutput>>;

struct Registration {
    program: String,
    args: Vec<String>,
    handler: Handler,
}

#[derive(Default)]
pub struct FakeRunner {
    executed: RefCell<Vec<CommandSpec>>,
    registrations: RefCell<Vec<Registration>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; later registrations take precedence.
    pub fn when_running<F>(&self, program: &str, args: &[&str], handler: F)
    where
        F: FnMut(&CommandSpec) -> Result<CommandOutput> + 'static,
    {
        self.registrations.borrow_mut().push(Registration {
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            handler: Box::new(handler),
        });
    }

    /// Succeed with `stdout` every time.
    pub fn respond(&self, program: &str, args: &[&str], stdout: &str) {
        let stdout = stdout.to_string();
        self.when_running(program, args, move |_| Ok(CommandOutput::new(stdout.clone(), "")));
    }

    /// Succeed with each of `outputs` in turn, repeating the last one.
    pub fn respond_in_sequence(&self, program: &str, args: &[&str], outputs: &[&str]) {
        let mut queue: VecDeque<String> = outputs.iter().map(ToString::to_string).collect();
        self.when_running(program, args, move |_| {
            let next = if queue.len() > 1 {
                queue.pop_front().unwrap_or_default()
            } else {
                queue.front().cloned().unwrap_or_default()
            };
            Ok(CommandOutput::new(next, ""))
        });
    }

    /// Fail with a non-zero exit carrying `output`.
    pub fn fail(&self, program: &str, args: &[&str], output: &str) {
        let output = output.to_string();
        self.when_running(program, args, move |spec| {
            Err(CartageError::CommandFailed {
                command: spec.to_string(),
                reason: "exit status: 1".to_string(),
                output: output.clone(),
            })
        });
    }

    /// Every command run so far, in order
    pub fn executed(&self) -> Vec<CommandSpec> {
        self.executed.borrow().clone()
    }

    /// Every command run so far, rendered as `program arg...`
    pub fn executed_lines(&self) -> Vec<String> {
        self.executed.borrow().iter().map(ToString::to_string).collect()
    }

    /// Commands run so far inside `dir`, rendered as `program arg...`
    pub fn executed_in(&self, dir: &Path) -> Vec<String> {
        self.executed
            .borrow()
            .iter()
            .filter(|spec| spec.dir.as_deref() == Some(dir))
            .map(ToString::to_string)
            .collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        self.executed.borrow_mut().push(spec.clone());

        let mut registrations = self.registrations.borrow_mut();
        let matching = registrations
            .iter_mut()
            .rev()
            .find(|r| r.program == spec.program && r.args == spec.args);

        match matching {
            Some(registration) => (registration.handler)(spec),
            None => Ok(CommandOutput::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_commands_in_order() {
        let runner = FakeRunner::new();
        runner.run(&CommandSpec::new("git", ["fetch"])).expect("run");
        runner
            .run(&CommandSpec::new("git", ["checkout", "v1"]))
            .expect("run");

        assert_eq!(runner.executed_lines(), vec!["git fetch", "git checkout v1"]);
    }

    #[test]
    fn test_sequence_repeats_last_output() {
        let runner = FakeRunner::new();
        runner.respond_in_sequence("git", &["rev-parse", "HEAD"], &["old\n", "new\n"]);
        let spec = CommandSpec::new("git", ["rev-parse", "HEAD"]);

        assert_eq!(runner.run(&spec).expect("run").stdout, "old\n");
        assert_eq!(runner.run(&spec).expect("run").stdout, "new\n");
        assert_eq!(runner.run(&spec).expect("run").stdout, "new\n");
    }

    #[test]
    fn test_latest_registration_wins() {
        let runner = FakeRunner::new();
        runner.respond("hg", &["id", "-i"], "first");
        runner.fail("hg", &["id", "-i"], "boom");

        assert!(runner.run(&CommandSpec::new("hg", ["id", "-i"])).is_err());
    }
}
