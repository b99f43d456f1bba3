use std::ops::Range;

use tree_sitter::Node;

use crate::diagnostic::*;
use crate::registry::Check;
use crate::source::SourceModel;
use crate::utils_ast::{indentation, named_children};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnreachableReason {
    AfterReturn,
    AfterRaise,
    AfterBreak,
    AfterContinue,
    AfterBranchTerminating,
}

impl UnreachableReason {
    fn from_statement(model: &SourceModel, statement: Node<'_>) -> Option<Self> {
        match statement.kind() {
            "return_statement" => Some(Self::AfterReturn),
            "raise_statement" => Some(Self::AfterRaise),
            "break_statement" => Some(Self::AfterBreak),
            "continue_statement" => Some(Self::AfterContinue),
            "if_statement" if if_terminates(model, statement) => Some(Self::AfterBranchTerminating),
            _ => None,
        }
    }
}

pub struct UnreachableCode {
    reason: UnreachableReason,
}

/// ## What it does
///
/// Detects statements that can never be executed because they follow a
/// `return`, `raise`, `break` or `continue` in the same block, or an
/// `if`/`else` whose branches all end that way.
///
/// ## Why is this bad?
///
/// Unreachable code is dead weight: it is parsed and compiled for nothing,
/// confuses readers, and often points at a logic error.
///
/// This rule has a safe fix that removes the unreachable statements. No fix
/// is proposed when they contain comments.
///
/// ## Example
///
/// ```python
/// def foo(x):
///     return x + 1
///     print("hi")  # unreachable
/// ```
///
/// ```python
/// def foo(x):
///     if x > 5:
///         return "hi"
///     else:
///         return "bye"
///     x += 1  # unreachable
/// ```
impl Violation for UnreachableCode {
    fn check(&self) -> Check {
        Check::UnreachableCode
    }
    fn body(&self) -> String {
        match self.reason {
            UnreachableReason::AfterReturn => {
                "This code is unreachable because it appears after a return statement."
            }
            UnreachableReason::AfterRaise => {
                "This code is unreachable because it appears after a raise statement."
            }
            UnreachableReason::AfterBreak => {
                "This code is unreachable because it appears after a break statement."
            }
            UnreachableReason::AfterContinue => {
                "This code is unreachable because it appears after a continue statement."
            }
            UnreachableReason::AfterBranchTerminating => {
                "This code is unreachable because the preceding if/else terminates in all branches."
            }
        }
        .to_string()
    }
}

pub fn unreachable_code(model: &SourceModel) -> anyhow::Result<Vec<Diagnostic>> {
    let mut diagnostics = Vec::new();
    // Dead regions already reported. Blocks nested inside them are not
    // reported a second time.
    let mut reported: Vec<Range<usize>> = Vec::new();

    for block in model.preorder().filter(|n| matches!(n.kind(), "block" | "module")) {
        if reported.iter().any(|r| r.contains(&block.start_byte())) {
            continue;
        }

        let statements = named_children(block);
        let Some((index, reason)) = statements
            .iter()
            .enumerate()
            .find_map(|(i, s)| UnreachableReason::from_statement(model, *s).map(|r| (i, r)))
        else {
            continue;
        };

        let dead = &statements[index + 1..];
        let (Some(first), Some(last)) = (dead.first(), dead.last()) else {
            continue;
        };

        let line = model.line(*first);
        let range = first.start_byte()..last.end_byte();
        let fix = removal_edit(model, statements[index], *first, *last).map(|range| Fix {
            content: String::new(),
            start: range.start,
            end: range.end,
            description: format!("Removed unreachable code at line {line}"),
        });

        reported.push(range.clone());
        diagnostics.push(Diagnostic::new(UnreachableCode { reason }, line, range).with_fix(fix));
    }

    Ok(diagnostics)
}

// `if`/`elif`/`else` chain with an `else` where every branch terminates.
fn if_terminates(model: &SourceModel, node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let alternatives: Vec<Node> = node
        .children_by_field_name("alternative", &mut cursor)
        .collect();

    let has_else = alternatives.iter().any(|alt| alt.kind() == "else_clause");
    if !has_else {
        return false;
    }

    let consequence_terminates = node
        .child_by_field_name("consequence")
        .is_some_and(|block| block_terminates(model, block));

    consequence_terminates
        && alternatives.iter().all(|alt| {
            let field = if alt.kind() == "else_clause" { "body" } else { "consequence" };
            alt.child_by_field_name(field)
                .is_some_and(|block| block_terminates(model, block))
        })
}

fn block_terminates(model: &SourceModel, block: Node<'_>) -> bool {
    named_children(block)
        .into_iter()
        .any(|statement| UnreachableReason::from_statement(model, statement).is_some())
}

// Remove the dead statements. When they share the line of the terminating
// statement (`return; x = 1`) only that tail is removed, otherwise whole
// lines are.
fn removal_edit(
    model: &SourceModel,
    terminal: Node<'_>,
    first: Node<'_>,
    last: Node<'_>,
) -> Option<Range<usize>> {
    let same_line = first.start_position().row == terminal.end_position().row;

    let range = if same_line {
        terminal.end_byte()..last.end_byte()
    } else {
        if indentation(model, first).is_none() {
            return None;
        }
        // Includes comments between the terminating statement and the dead
        // code.
        model.line_end(terminal.end_byte())..model.line_end(last.end_byte())
    };

    let rest_of_line = model.source().get(last.end_byte()..model.line_end(last.end_byte()))?;
    if !rest_of_line.trim_start_matches(';').trim().is_empty() {
        return None;
    }

    if model.contains_comments(range.start..model.line_end(last.end_byte())) {
        return None;
    }

    Some(range)
}
