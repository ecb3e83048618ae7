//! `lin show` — render the family hierarchy.

use std::io::{self, Write};
use std::path::Path;

use crate::output::{OutputMode, fail, pretty_rule, render_json};
use lineage_core::{DisplayNode, build, load_from_path};

/// Execute `lin show`.
///
/// Human output is an indented outline with `[id]` suffixes on person
/// lines so ids can be fed back into `add`, `edit` and `info`. JSON
/// output is the hierarchy itself.
///
/// # Errors
///
/// A load failure, or the tree holds no root person.
pub fn run_show(output: OutputMode, path: &Path) -> anyhow::Result<()> {
    let tree = match load_from_path(path) {
        Ok(tree) => tree,
        Err(e) => return Err(fail(output, &e)),
    };

    let node = match build(&tree) {
        Ok(node) => node,
        Err(e) => return Err(fail(output, &e)),
    };

    if output.is_json() {
        return render_json(&node);
    }

    let stdout = io::stdout();
    let mut w = stdout.lock();
    if output.is_pretty() {
        pretty_rule(&mut w)?;
    }
    render_outline(&mut w, &node, 0)?;
    if output.is_pretty() {
        pretty_rule(&mut w)?;
    }
    Ok(())
}

fn render_outline(w: &mut dyn Write, node: &DisplayNode, depth: usize) -> io::Result<()> {
    let indent = "  ".repeat(depth);
    if let Some(id) = node.person {
        writeln!(w, "{indent}{} [{id}]", node.label)?;
    } else {
        writeln!(w, "{indent}{}:", node.label)?;
    }
    for child in &node.children {
        render_outline(w, child, depth + 1)?;
    }
    Ok(())
}
