//! Text rendering for install progress and check findings
//!
//! Every function returns a `String` so callers decide where it goes.

use console::Style;

use crate::checker::{Finding, Problem, VersionDelta};
use crate::dependency::Dependency;

/// Pad `text` with two spaces per nesting level, on every line
pub fn indent(level: usize, text: &str) -> String {
    let padding = " ".repeat(level * 2);
    text.trim_end_matches([' ', '\n'])
        .split('\n')
        .map(|line| format!("{padding}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Width of the widest path, for aligning versions in a column
pub fn path_width<'a, I>(deps: I) -> usize
where
    I: IntoIterator<Item = &'a Dependency>,
{
    deps.into_iter().map(|dep| dep.path.len()).max().unwrap_or(0)
}

/// `path  version`, with the version aligned to `width`
pub fn dependency_line(depth: usize, dep: &Dependency, width: usize) -> String {
    let version = if dep.bleeding_edge && dep.version.is_empty() {
        "*"
    } else {
        dep.version.as_str()
    };
    let padding = " ".repeat(width.saturating_sub(dep.path.len()) + 2);

    indent(
        depth,
        &format!(
            "{}{}{}",
            Style::new().bold().apply_to(&dep.path),
            padding,
            Style::new().cyan().apply_to(version)
        ),
    )
}

/// Header printed before descending into a nested manifest
pub fn nested_header(depth: usize, path: &str) -> String {
    format!("\n{}", indent(depth, &format!("fetching dependencies for {path}")))
}

pub fn ok() -> String {
    Style::new().green().apply_to("OK").to_string()
}

/// Multi-line description of one check finding
pub fn finding(finding: &Finding) -> String {
    let mut out = format!("{}\n", Style::new().bold().apply_to(&finding.path));

    match &finding.problem {
        Problem::Dirty { output } => {
            out.push_str("dirty state:\n");
            out.push_str(&indent(1, output.trim_start_matches('\n')));
            out.push('\n');
        }
        Problem::VersionMismatch {
            expected,
            current,
            delta,
        } => {
            out.push_str("version mismatch:\n");
            out.push_str(&format!(
                "  want {}\n  have {}\n",
                Style::new().red().apply_to(expected),
                Style::new().green().apply_to(current)
            ));
            out.push_str(&delta_description(delta));
        }
    }

    out
}

fn delta_description(delta: &VersionDelta) -> String {
    match delta {
        VersionDelta::Ahead { commits, log } => format!(
            "\n  ahead by {commits} {}; extra commits:\n{}\n",
            plural(*commits),
            indent(2, log)
        ),
        VersionDelta::Behind { commits, log } => format!(
            "\n  behind by {commits} {}; missing commits:\n{}\n",
            plural(*commits),
            indent(2, log)
        ),
        VersionDelta::Unknown => {
            "\n  behind by an unknown number of commits (expected version not fetched?)\n"
                .to_string()
        }
    }
}

fn plural(commits: usize) -> &'static str {
    if commits == 1 { "commit" } else { "commits" }
}
