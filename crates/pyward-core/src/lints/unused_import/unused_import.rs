use std::ops::Range;

use rustc_hash::FxHashSet;
use tree_sitter::Node;

use crate::diagnostic::*;
use crate::registry::Check;
use crate::source::SourceModel;
use crate::utils_ast::{field_children, indentation, is_name_reference, named_children, string_value};

pub struct UnusedImport {
    name: String,
}

/// ## What it does
///
/// Checks for imported names that are never referenced in the module.
///
/// ## Why is this bad?
///
/// Every import executes the imported module and keeps it in memory. An
/// import that is never used slows down start-up for nothing and hides the
/// real dependencies of the module.
///
/// Names listed in `__all__` count as used, and `from __future__` or
/// `from m import *` imports are never reported.
///
/// This rule comes with a safe fix that rewrites the import statement with
/// only the names still in use, or removes it entirely. No fix is proposed
/// when the statement contains comments.
///
/// ## Example
///
/// ```python
/// import os, sys
///
/// print(sys.argv)
/// ```
///
/// Use instead:
/// ```python
/// import sys
///
/// print(sys.argv)
/// ```
impl Violation for UnusedImport {
    fn check(&self) -> Check {
        Check::UnusedImport
    }
    fn body(&self) -> String {
        format!("Imported name '{}' is never used.", self.name)
    }
}

// One name brought in by an import statement.
struct ImportedName<'a> {
    node: Node<'a>,
    // `a.b` or `a.b as c`, as written in the fix log and the message.
    display: String,
    // The name the import binds in the namespace.
    binding: String,
}

// An `import ...` or `from ... import ...` statement.
struct ImportStatement<'a> {
    node: Node<'a>,
    // `None` for plain `import` statements.
    module: Option<String>,
    names: Vec<ImportedName<'a>>,
}

impl ImportStatement<'_> {
    fn render(&self, names: &[&ImportedName<'_>], model: &SourceModel) -> String {
        let list: Vec<&str> = names.iter().map(|n| n.display.as_str()).collect();
        match &self.module {
            None => format!("import {}", list.join(", ")),
            Some(module) if !self.is_multiline() => {
                format!("from {module} import {}", list.join(", "))
            }
            Some(module) => {
                let indent = indentation(model, self.node).unwrap_or_default();
                let separator = format!(",\n{indent}    ");
                format!(
                    "from {module} import (\n{indent}    {}\n{indent})",
                    list.join(&separator)
                )
            }
        }
    }

    fn is_multiline(&self) -> bool {
        self.node.start_position().row != self.node.end_position().row
    }

    fn log_line(&self, name: &ImportedName<'_>) -> String {
        match &self.module {
            None => format!("import {} deleted", name.display),
            Some(module) => format!("from {module} import {} deleted", name.display),
        }
    }
}

pub fn unused_import(model: &SourceModel) -> anyhow::Result<Vec<Diagnostic>> {
    let statements: Vec<ImportStatement> = model
        .preorder()
        .filter_map(|node| import_statement(model, node))
        .collect();

    if statements.is_empty() {
        return Ok(vec![]);
    }

    let used = used_names(model);
    let is_unused = |name: &ImportedName| !used.contains(name.binding.as_str());

    // Statements that disappear entirely once fixed.
    let removed: FxHashSet<usize> = statements
        .iter()
        .filter(|statement| statement.names.iter().all(is_unused))
        .map(|statement| statement.node.id())
        .collect();

    let mut diagnostics = vec![];

    for statement in &statements {
        let (unused, kept): (Vec<&ImportedName>, Vec<&ImportedName>) =
            statement.names.iter().partition(|name| is_unused(*name));

        if unused.is_empty() {
            continue;
        }

        let edit = removal_edit(model, statement, &kept, &removed);
        let line = model.line(statement.node);

        for name in unused {
            let fix = edit.as_ref().map(|(range, content)| Fix {
                content: content.clone(),
                start: range.start,
                end: range.end,
                description: statement.log_line(name),
            });
            diagnostics.push(
                Diagnostic::new(
                    UnusedImport { name: name.display.clone() },
                    line,
                    name.node.byte_range(),
                )
                .with_fix(fix),
            );
        }
    }

    Ok(diagnostics)
}

fn import_statement<'a>(model: &SourceModel, node: Node<'a>) -> Option<ImportStatement<'a>> {
    let module = match node.kind() {
        "import_statement" => None,
        "import_from_statement" => {
            let module = model.text(node.child_by_field_name("module_name")?);
            if module == "__future__" {
                return None;
            }
            let mut cursor = node.walk();
            if node
                .named_children(&mut cursor)
                .any(|child| child.kind() == "wildcard_import")
            {
                return None;
            }
            Some(module.to_string())
        }
        _ => return None,
    };

    let names = field_children(node, "name")
        .into_iter()
        .filter_map(|name| imported_name(model, name))
        .collect();

    Some(ImportStatement { node, module, names })
}

fn imported_name<'a>(model: &SourceModel, node: Node<'a>) -> Option<ImportedName<'a>> {
    match node.kind() {
        "aliased_import" => {
            let name = model.text(node.child_by_field_name("name")?);
            let alias = model.text(node.child_by_field_name("alias")?);
            Some(ImportedName {
                node,
                display: format!("{name} as {alias}"),
                binding: alias.to_string(),
            })
        }
        "dotted_name" => {
            // `import a.b` binds `a`.
            let first = node.named_child(0)?;
            Some(ImportedName {
                node,
                display: model.text(node).to_string(),
                binding: model.text(first).to_string(),
            })
        }
        _ => None,
    }
}

// Every name referenced outside of import statements, plus the names listed
// in a module-level `__all__`.
fn used_names(model: &SourceModel) -> FxHashSet<String> {
    let mut used: FxHashSet<String> = model
        .nodes_of_kind("identifier")
        .filter(|node| is_name_reference(*node) && !is_in_import(*node))
        .map(|node| model.text(node).to_string())
        .collect();

    for statement in named_children(model.root()) {
        if statement.kind() != "expression_statement" {
            continue;
        }
        let Some(assignment) = statement
            .named_child(0)
            .filter(|n| matches!(n.kind(), "assignment" | "augmented_assignment"))
        else {
            continue;
        };
        let is_all = assignment
            .child_by_field_name("left")
            .is_some_and(|left| model.text(left) == "__all__");
        let Some(right) = assignment
            .child_by_field_name("right")
            .filter(|right| matches!(right.kind(), "list" | "tuple"))
        else {
            continue;
        };
        if is_all {
            used.extend(
                named_children(right)
                    .into_iter()
                    .filter_map(|element| string_value(model, element)),
            );
        }
    }

    used
}

fn is_in_import(node: Node<'_>) -> bool {
    let mut current = node;
    while let Some(parent) = current.parent() {
        if matches!(
            parent.kind(),
            "import_statement" | "import_from_statement" | "future_import_statement"
        ) {
            return true;
        }
        current = parent;
    }
    false
}

// The edit that leaves only `kept` in the statement, or `None` when no safe
// edit exists. `removed` holds the ids of every statement removed by the fix.
fn removal_edit(
    model: &SourceModel,
    statement: &ImportStatement<'_>,
    kept: &[&ImportedName<'_>],
    removed: &FxHashSet<usize>,
) -> Option<(Range<usize>, String)> {
    let node = statement.node;
    let lines = model.line_start(node.start_byte())..model.line_end(node.end_byte());
    if model.contains_comments(lines.clone()) {
        return None;
    }

    if !kept.is_empty() {
        return Some((node.byte_range(), statement.render(kept, model)));
    }

    // A block cannot be left empty: when all of its statements go, the last
    // one is replaced instead of removed.
    if let Some(parent) = node.parent().filter(|p| p.kind() == "block") {
        let siblings: Vec<Node> = named_children(parent)
            .into_iter()
            .filter(|n| n.kind() != "comment")
            .collect();
        let empties_block = siblings.iter().all(|n| removed.contains(&n.id()));
        if empties_block && siblings.last().is_some_and(|last| last.id() == node.id()) {
            return Some((node.byte_range(), "pass".to_string()));
        }
    }

    let row = node.start_position().row;
    let same_row = |n: &Node| n.start_position().row == row;

    // `import os; x = 1`
    if let Some(semicolon) = node.next_sibling().filter(|n| n.kind() == ";") {
        if let Some(following) = semicolon.next_named_sibling().filter(same_row) {
            return Some((node.start_byte()..following.start_byte(), String::new()));
        }
    }
    // `x = 1; import os`
    if let Some(semicolon) = node.prev_sibling().filter(|n| n.kind() == ";") {
        return Some((semicolon.start_byte()..node.end_byte(), String::new()));
    }

    let owns_line = indentation(model, node).is_some()
        && model
            .source()
            .get(node.end_byte()..lines.end)
            .is_some_and(|rest| rest.trim_start_matches(';').trim().is_empty());

    owns_line.then(|| (lines, String::new()))
}
