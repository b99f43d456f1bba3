//! Helpers over tree-sitter-python nodes shared by the checks.

use tree_sitter::Node;

use crate::source::SourceModel;

/// Node kinds that open a new scope: loops and locals do not cross them.
pub const SCOPE_KINDS: &[&str] = &["function_definition", "class_definition", "lambda", "module"];

/// Node kinds of loop statements.
pub const LOOP_KINDS: &[&str] = &["for_statement", "while_statement"];

/// Named children of `node`, comments excluded.
pub fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// All children of `node` attached to the field `field`.
pub fn field_children<'a>(node: Node<'a>, field: &str) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

/// The dotted name of an expression made of identifiers and attribute
/// accesses only, e.g. `os.path.join`. Returns `None` for anything else,
/// e.g. `get_module().join`.
pub fn dotted_name(model: &SourceModel, node: Node<'_>) -> Option<String> {
    match node.kind() {
        "identifier" => Some(model.text(node).to_string()),
        "attribute" => {
            let object = dotted_name(model, node.child_by_field_name("object")?)?;
            let attribute = node.child_by_field_name("attribute")?;
            Some(format!("{object}.{}", model.text(attribute)))
        }
        _ => None,
    }
}

/// The dotted name of the callee of a `call` node.
pub fn call_name(model: &SourceModel, call: Node<'_>) -> Option<String> {
    dotted_name(model, call.child_by_field_name("function")?)
}

/// The `argument_list` of a call. Calls on a bare generator expression
/// (`f(x for x in y)`) have none.
pub fn argument_list(call: Node<'_>) -> Option<Node<'_>> {
    call.child_by_field_name("arguments")
        .filter(|args| args.kind() == "argument_list")
}

/// Positional arguments of a call, splats excluded.
pub fn positional_arguments(call: Node<'_>) -> Vec<Node<'_>> {
    argument_list(call)
        .map(|args| {
            named_children(args)
                .into_iter()
                .filter(|arg| {
                    !matches!(
                        arg.kind(),
                        "keyword_argument" | "list_splat" | "dictionary_splat"
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Whether the call passes `*args` or `**kwargs`.
pub fn has_splat_arguments(call: Node<'_>) -> bool {
    argument_list(call)
        .map(|args| {
            named_children(args)
                .iter()
                .any(|arg| matches!(arg.kind(), "list_splat" | "dictionary_splat"))
        })
        .unwrap_or(false)
}

/// The value passed to keyword argument `name`, if any.
pub fn keyword_argument<'a>(model: &SourceModel, call: Node<'a>, name: &str) -> Option<Node<'a>> {
    let args = argument_list(call)?;
    named_children(args)
        .into_iter()
        .filter(|arg| arg.kind() == "keyword_argument")
        .find(|arg| {
            arg.child_by_field_name("name")
                .is_some_and(|n| model.text(n) == name)
        })
        .and_then(|arg| arg.child_by_field_name("value"))
}

/// The value of a plain string literal: no f-string interpolation, no
/// implicit concatenation. Escape sequences are kept verbatim.
pub fn string_value(model: &SourceModel, node: Node<'_>) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }

    let mut value = String::new();
    for child in named_children(node) {
        match child.kind() {
            "string_start" | "string_end" => {}
            "string_content" | "escape_sequence" => value.push_str(model.text(child)),
            _ => return None,
        }
    }
    Some(value)
}

/// Whether the node is a string literal of any flavour, f-strings and
/// implicit concatenations included.
pub fn is_string(node: Node<'_>) -> bool {
    matches!(node.kind(), "string" | "concatenated_string")
}

/// Whether the node is the `False` literal.
pub fn is_false(node: Node<'_>) -> bool {
    node.kind() == "false"
}

/// The innermost loop whose body contains `node`, without leaving the
/// current scope. The loop header (`for x in <here>`) does not count.
pub fn enclosing_loop(node: Node<'_>) -> Option<Node<'_>> {
    let mut current = node;
    while let Some(parent) = current.parent() {
        if SCOPE_KINDS.contains(&parent.kind()) {
            return None;
        }
        if LOOP_KINDS.contains(&parent.kind())
            && parent
                .child_by_field_name("body")
                .is_some_and(|body| body.id() == current.id())
        {
            return Some(parent);
        }
        current = parent;
    }
    None
}

/// Whether `node` is a reference to a name: an identifier that is neither an
/// attribute member (`x.<attr>`) nor a keyword argument name (`f(<kw>=1)`).
pub fn is_name_reference(node: Node<'_>) -> bool {
    if node.kind() != "identifier" {
        return false;
    }
    let Some(parent) = node.parent() else {
        return true;
    };
    let is_field = |field: &str| {
        parent
            .child_by_field_name(field)
            .is_some_and(|child| child.id() == node.id())
    };
    match parent.kind() {
        "attribute" => !is_field("attribute"),
        "keyword_argument" => !is_field("name"),
        _ => true,
    }
}

/// The whitespace before `node` on its first line, if nothing else precedes
/// it there.
pub fn indentation<'a>(model: &'a SourceModel, node: Node<'_>) -> Option<&'a str> {
    let line_start = model.line_start(node.start_byte());
    let prefix = model.source().get(line_start..node.start_byte())?;
    prefix.chars().all(char::is_whitespace).then_some(prefix)
}
