use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use graphql_parser::schema::{
    Definition, Document as SchemaDocument, TypeDefinition as SchemaTypeDefinition,
};
use serde_json::Value;
use tracing::warn;

/// Computes the concrete type name for a runtime value, usually by looking at
/// a discriminant carried on the value itself.
pub type TypeResolverFn = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

#[derive(Clone, PartialEq, Eq)]
pub struct ObjectType {
    pub name: String,
}

#[derive(Clone)]
pub struct InterfaceType {
    pub name: String,
    pub resolve_type: Option<TypeResolverFn>,
}

#[derive(Clone)]
pub struct UnionType {
    pub name: String,
    pub types: Vec<String>,
    pub resolve_type: Option<TypeResolverFn>,
}

/// The three type shapes this core distinguishes. Scalars, enums and input
/// objects never reach abstract-type resolution and are not modeled here.
#[derive(Clone)]
pub enum TypeDefinition {
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Object(object_type) => &object_type.name,
            TypeDefinition::Interface(interface_type) => &interface_type.name,
            TypeDefinition::Union(union_type) => &union_type.name,
        }
    }

}

impl PartialEq for TypeDefinition {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeDefinition::Object(a), TypeDefinition::Object(b)) => a.name == b.name,
            (TypeDefinition::Interface(a), TypeDefinition::Interface(b)) => a.name == b.name,
            (TypeDefinition::Union(a), TypeDefinition::Union(b)) => {
                a.name == b.name && a.types == b.types
            }
            _ => false,
        }
    }
}

impl fmt::Debug for TypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDefinition::Object(object_type) => f
                .debug_struct("ObjectType")
                .field("name", &object_type.name)
                .finish(),
            TypeDefinition::Interface(interface_type) => f
                .debug_struct("InterfaceType")
                .field("name", &interface_type.name)
                .field("custom_resolver", &interface_type.resolve_type.is_some())
                .finish(),
            TypeDefinition::Union(union_type) => f
                .debug_struct("UnionType")
                .field("name", &union_type.name)
                .field("types", &union_type.types)
                .field("custom_resolver", &union_type.resolve_type.is_some())
                .finish(),
        }
    }
}

pub(crate) fn value_type_name(value: &Value) -> Option<&str> {
    value.get("__typename").and_then(Value::as_str)
}

impl UnionType {
    /// Resolves `value` to one of the union's member types. Falls back to the
    /// `__typename` discriminant when no custom resolver is attached.
    pub fn resolve_member(&self, value: &Value) -> Option<String> {
        if let Some(resolve) = &self.resolve_type {
            return resolve(value);
        }
        value_type_name(value)
            .filter(|name| self.types.iter().any(|member| member == name))
            .map(str::to_string)
    }
}

impl InterfaceType {
    /// Resolves `value` to a concrete implementor of the interface, by custom
    /// resolver or by checking the `__typename` discriminant against the
    /// schema's possible types.
    pub fn resolve_value(&self, value: &Value, schema: &Schema) -> Option<String> {
        if let Some(resolve) = &self.resolve_type {
            return resolve(value);
        }
        let name = value_type_name(value)?;
        schema
            .possible_types
            .get(&self.name)
            .filter(|implementors| implementors.contains(name))
            .map(|_| name.to_string())
    }
}

/// Read-only view of the schema's type system: the type table plus the
/// transitive abstract-to-concrete membership map.
pub struct Schema {
    types: HashMap<String, TypeDefinition>,
    pub possible_types: HashMap<String, HashSet<String>>,
}

impl Schema {
    pub fn from_document(document: &SchemaDocument<'static, String>) -> Self {
        let mut types: HashMap<String, TypeDefinition> = HashMap::new();
        let mut first_possible_types: HashMap<String, Vec<String>> = HashMap::new();

        for definition in &document.definitions {
            match definition {
                Definition::TypeDefinition(SchemaTypeDefinition::Object(object_type)) => {
                    types.insert(
                        object_type.name.to_string(),
                        TypeDefinition::Object(ObjectType {
                            name: object_type.name.to_string(),
                        }),
                    );
                    for interface in &object_type.implements_interfaces {
                        first_possible_types
                            .entry(interface.to_string())
                            .or_default()
                            .push(object_type.name.to_string());
                    }
                }
                Definition::TypeDefinition(SchemaTypeDefinition::Interface(interface_type)) => {
                    types.insert(
                        interface_type.name.to_string(),
                        TypeDefinition::Interface(InterfaceType {
                            name: interface_type.name.to_string(),
                            resolve_type: None,
                        }),
                    );
                    for interface in &interface_type.implements_interfaces {
                        first_possible_types
                            .entry(interface.to_string())
                            .or_default()
                            .push(interface_type.name.to_string());
                    }
                }
                Definition::TypeDefinition(SchemaTypeDefinition::Union(union_type)) => {
                    let members: Vec<String> =
                        union_type.types.iter().map(|member| member.to_string()).collect();
                    first_possible_types.insert(union_type.name.to_string(), members.clone());
                    types.insert(
                        union_type.name.to_string(),
                        TypeDefinition::Union(UnionType {
                            name: union_type.name.to_string(),
                            types: members,
                            resolve_type: None,
                        }),
                    );
                }
                _ => {}
            }
        }

        // One level of indirection is enough: an interface implemented by an
        // interface picks up the latter's implementors.
        let mut possible_types: HashMap<String, HashSet<String>> = HashMap::new();
        for (abstract_name, direct_members) in &first_possible_types {
            let mut members: HashSet<String> = HashSet::new();
            for member_name in direct_members {
                members.insert(member_name.to_string());
                if let Some(transitive) = first_possible_types.get(member_name) {
                    for transitive_name in transitive {
                        members.insert(transitive_name.to_string());
                    }
                }
            }
            possible_types.insert(abstract_name.to_string(), members);
        }

        Schema {
            types,
            possible_types,
        }
    }

    pub fn type_named(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    /// Attaches a custom resolution strategy to an interface or union type.
    pub fn with_type_resolver(mut self, type_name: &str, resolver: TypeResolverFn) -> Self {
        match self.types.get_mut(type_name) {
            Some(TypeDefinition::Interface(interface_type)) => {
                interface_type.resolve_type = Some(resolver);
            }
            Some(TypeDefinition::Union(union_type)) => {
                union_type.resolve_type = Some(resolver);
            }
            _ => {
                warn!(
                    type_name,
                    "type resolvers only apply to interface and union types"
                );
            }
        }
        self
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("types", &self.types.len())
            .field("possible_types", &self.possible_types)
            .finish()
    }
}
