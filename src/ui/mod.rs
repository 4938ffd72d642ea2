//! Progress presentation layer
//!
//! This module handles:
//! - Announcing each dependency as it is fetched, indented by nesting depth
//! - A spinner while the fetch runs on an interactive terminal
//! - Silent reporting for tests and scripted use
//!
//! All progress reporting goes through the [`ProgressReporter`] trait so the
//! install engine does not care where its output ends up.

pub mod display;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::dependency::Dependency;

/// Progress reporter trait for install runs
pub trait ProgressReporter {
    /// A dependency is about to be fetched
    fn start_dependency(&mut self, depth: usize, dep: &Dependency, width: usize);

    /// The dependency announced last resolved to `resolved`
    fn finish_dependency(&mut self, resolved: &Dependency);

    /// Descending into the nested manifest of `path`
    fn enter_nested(&mut self, depth: usize, path: &str);

    /// Stop any running progress display after an error
    fn abandon(&mut self);
}

/// Terminal reporter that shows a spinner next to the dependency being fetched
///
/// The spinner draws to stdout like the rest of the install output, and
/// falls back to plain lines when stdout is not a terminal.
#[derive(Default)]
pub struct InteractiveProgressReporter {
    current: Option<(ProgressBar, String)>,
}

impl InteractiveProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn spinner(line: &str) -> ProgressBar {
        let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg} {spinner:.cyan}") {
            pb.set_style(style);
        }
        pb.set_message(line.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn start_dependency(&mut self, depth: usize, dep: &Dependency, width: usize) {
        self.abandon();

        let line = display::dependency_line(depth, dep, width);
        let pb = Self::spinner(&line);
        self.current = Some((pb, line));
    }

    fn finish_dependency(&mut self, resolved: &Dependency) {
        let Some((pb, line)) = self.current.take() else {
            return;
        };

        let finished = format!(
            "{line}  {}",
            console::Style::new().dim().apply_to(&resolved.version)
        );

        if pb.is_hidden() {
            println!("{finished}");
        } else {
            pb.finish_with_message(finished);
        }
    }

    fn enter_nested(&mut self, depth: usize, path: &str) {
        println!("{}", display::nested_header(depth, path));
    }

    fn abandon(&mut self) {
        if let Some((pb, line)) = self.current.take() {
            if pb.is_hidden() {
                println!("{line}");
            } else {
                pb.abandon();
            }
        }
    }
}

/// Silent progress reporter
///
/// No-op implementation that does not display anything.
#[derive(Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn start_dependency(&mut self, _depth: usize, _dep: &Dependency, _width: usize) {}

    fn finish_dependency(&mut self, _resolved: &Dependency) {}

    fn enter_nested(&mut self, _depth: usize, _path: &str) {}

    fn abandon(&mut self) {}
}
