use serde_json::Value;

use crate::schema::{Schema, TypeDefinition};

/// Resolves a statically abstract declared type to the concrete type that
/// should drive field resolution for `value`.
///
/// `child_type` is the type asserted by a fragment type condition, if any;
/// `parent_type` is the field's declared, possibly abstract type. The rules
/// form an ordered decision table evaluated top-down, first match wins.
/// Every branch terminates in a type or `None`; `None` means resolution
/// failed and carries no further detail.
pub fn resolve_abstract_type<'schema>(
    schema: &'schema Schema,
    value: &Value,
    child_type: Option<&'schema TypeDefinition>,
    parent_type: &'schema TypeDefinition,
) -> Option<&'schema TypeDefinition> {
    match (child_type, parent_type) {
        // Without a type condition only a union can resolve on its own.
        (None, TypeDefinition::Union(union_type)) => union_type
            .resolve_member(value)
            .and_then(|name| schema.type_named(&name)),
        (None, _) => None,
        // A union type condition admits the parent only if the parent is one
        // of its members.
        (Some(TypeDefinition::Union(union_type)), _) => {
            if union_type
                .types
                .iter()
                .any(|member| member == parent_type.name())
            {
                Some(parent_type)
            } else {
                None
            }
        }
        // An interface type condition resolves from the value alone; the
        // parent type plays no part.
        (Some(TypeDefinition::Interface(interface_type)), _) => interface_type
            .resolve_value(value, schema)
            .and_then(|name| schema.type_named(&name)),
        (Some(child), parent) if child == parent => Some(child),
        _ => None,
    }
}
