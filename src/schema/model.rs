//! GraphQL SDL parsing into an owned, diffable schema model.

use std::collections::BTreeMap;

use apollo_parser::Parser;
use apollo_parser::ast::{self, AstNode, Definition};
use tracing::{debug, warn};

use crate::error::SchemaError;

/// Reason GraphQL assigns to `@deprecated` when none is given.
pub const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

/// The kind of a named type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

impl TypeKind {
    /// Name of the SDL definition kind, as used in change messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scalar => "ScalarTypeDefinition",
            Self::Object => "ObjectTypeDefinition",
            Self::Interface => "InterfaceTypeDefinition",
            Self::Union => "UnionTypeDefinition",
            Self::Enum => "EnumTypeDefinition",
            Self::InputObject => "InputObjectTypeDefinition",
        }
    }
}

/// An argument or input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputValueDef {
    pub name: String,
    pub description: Option<String>,
    pub ty: String,
    pub default_value: Option<String>,
}

/// A field on an object or interface type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub description: Option<String>,
    pub ty: String,
    pub args: Vec<InputValueDef>,
    pub deprecation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValueDef {
    pub name: String,
    pub description: Option<String>,
    pub deprecation: Option<String>,
}

/// A named type definition. Only the members relevant to `kind` are populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    pub name: String,
    pub kind: TypeKind,
    pub description: Option<String>,
    pub fields: Vec<FieldDef>,
    pub interfaces: Vec<String>,
    pub enum_values: Vec<EnumValueDef>,
    pub members: Vec<String>,
    pub input_fields: Vec<InputValueDef>,
}

impl TypeDef {
    fn new(name: String, kind: TypeKind, description: Option<String>) -> Self {
        Self {
            name,
            kind,
            description,
            fields: Vec::new(),
            interfaces: Vec::new(),
            enum_values: Vec::new(),
            members: Vec::new(),
            input_fields: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveDef {
    pub name: String,
    pub description: Option<String>,
    pub args: Vec<InputValueDef>,
    pub locations: Vec<String>,
}

/// A parsed schema, keyed by type and directive name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaModel {
    pub types: BTreeMap<String, TypeDef>,
    pub directives: BTreeMap<String, DirectiveDef>,
    pub query: Option<String>,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
}

/// Parse SDL text into a [`SchemaModel`].
///
/// Any syntax error fails the whole parse.
pub fn parse_schema(source: &str) -> Result<SchemaModel, SchemaError> {
    let tree = Parser::new(source).parse();

    let errors: Vec<String> = tree.errors().map(|e| e.message().to_string()).collect();
    if let Some(first) = errors.first() {
        return Err(SchemaError::Parse {
            count: errors.len(),
            first: first.clone(),
        });
    }

    let mut model = SchemaModel::default();
    let mut roots: Option<Vec<(String, String)>> = None;

    for definition in tree.document().definitions() {
        match definition {
            Definition::SchemaDefinition(schema) => {
                let ops = schema
                    .root_operation_type_definitions()
                    .filter_map(|root| {
                        let op = root.operation_type()?.syntax().text().to_string();
                        let ty = root.named_type()?.name()?.text().to_string();
                        Some((op.trim().to_string(), ty))
                    })
                    .collect();
                roots = Some(ops);
            }
            Definition::ScalarTypeDefinition(def) => {
                if let Some(name) = name_of(def.name()) {
                    let ty = TypeDef::new(name, TypeKind::Scalar, description(def.description()));
                    model.insert_type(ty);
                }
            }
            Definition::ObjectTypeDefinition(def) => {
                if let Some(name) = name_of(def.name()) {
                    let mut ty = TypeDef::new(name, TypeKind::Object, description(def.description()));
                    ty.interfaces = interfaces(def.implements_interfaces());
                    ty.fields = fields(def.fields_definition());
                    model.insert_type(ty);
                }
            }
            Definition::InterfaceTypeDefinition(def) => {
                if let Some(name) = name_of(def.name()) {
                    let mut ty =
                        TypeDef::new(name, TypeKind::Interface, description(def.description()));
                    ty.interfaces = interfaces(def.implements_interfaces());
                    ty.fields = fields(def.fields_definition());
                    model.insert_type(ty);
                }
            }
            Definition::UnionTypeDefinition(def) => {
                if let Some(name) = name_of(def.name()) {
                    let mut ty = TypeDef::new(name, TypeKind::Union, description(def.description()));
                    ty.members = def
                        .union_member_types()
                        .map(|members| {
                            members
                                .named_types()
                                .filter_map(|n| name_of(n.name()))
                                .collect()
                        })
                        .unwrap_or_default();
                    model.insert_type(ty);
                }
            }
            Definition::EnumTypeDefinition(def) => {
                if let Some(name) = name_of(def.name()) {
                    let mut ty = TypeDef::new(name, TypeKind::Enum, description(def.description()));
                    ty.enum_values = def
                        .enum_values_definition()
                        .map(|values| {
                            values
                                .enum_value_definitions()
                                .filter_map(|v| {
                                    Some(EnumValueDef {
                                        name: name_of(v.enum_value()?.name())?,
                                        description: description(v.description()),
                                        deprecation: deprecation(v.directives()),
                                    })
                                })
                                .collect()
                        })
                        .unwrap_or_default();
                    model.insert_type(ty);
                }
            }
            Definition::InputObjectTypeDefinition(def) => {
                if let Some(name) = name_of(def.name()) {
                    let mut ty =
                        TypeDef::new(name, TypeKind::InputObject, description(def.description()));
                    ty.input_fields = def
                        .input_fields_definition()
                        .map(|f| f.input_value_definitions().filter_map(input_value).collect())
                        .unwrap_or_default();
                    model.insert_type(ty);
                }
            }
            Definition::DirectiveDefinition(def) => {
                if let Some(name) = name_of(def.name()) {
                    let directive = DirectiveDef {
                        name: name.clone(),
                        description: description(def.description()),
                        args: def
                            .arguments_definition()
                            .map(|a| a.input_value_definitions().filter_map(input_value).collect())
                            .unwrap_or_default(),
                        locations: def
                            .directive_locations()
                            .map(|locs| {
                                locs.directive_locations()
                                    .map(|l| {
                                        l.syntax()
                                            .text()
                                            .to_string()
                                            .trim_matches(|c: char| c.is_whitespace() || c == '|')
                                            .to_string()
                                    })
                                    .collect()
                            })
                            .unwrap_or_default(),
                    };
                    model.directives.insert(name, directive);
                }
            }
            ext @ (Definition::SchemaExtension(_)
            | Definition::ScalarTypeExtension(_)
            | Definition::ObjectTypeExtension(_)
            | Definition::InterfaceTypeExtension(_)
            | Definition::UnionTypeExtension(_)
            | Definition::EnumTypeExtension(_)
            | Definition::InputObjectTypeExtension(_)) => {
                warn!(
                    "Type extensions are not diffed; skipping {:?}",
                    ext.syntax().kind()
                );
            }
            other => {
                debug!("Skipping executable definition: {:?}", other.syntax().kind());
            }
        }
    }

    match roots {
        Some(ops) => {
            for (op, ty) in ops {
                match op.as_str() {
                    "query" => model.query = Some(ty),
                    "mutation" => model.mutation = Some(ty),
                    "subscription" => model.subscription = Some(ty),
                    _ => debug!("Unknown root operation '{}'", op),
                }
            }
        }
        None => {
            model.query = model.default_root("Query");
            model.mutation = model.default_root("Mutation");
            model.subscription = model.default_root("Subscription");
        }
    }

    Ok(model)
}

impl SchemaModel {
    fn insert_type(&mut self, ty: TypeDef) {
        if self.types.contains_key(&ty.name) {
            debug!("Type '{}' defined more than once, keeping the last", ty.name);
        }
        self.types.insert(ty.name.clone(), ty);
    }

    fn default_root(&self, name: &str) -> Option<String> {
        self.types.contains_key(name).then(|| name.to_string())
    }
}

fn name_of(name: Option<ast::Name>) -> Option<String> {
    name.map(|n| n.text().to_string())
}

fn description(desc: Option<ast::Description>) -> Option<String> {
    desc.and_then(|d| d.string_value()).map(String::from)
}

fn interfaces(implements: Option<ast::ImplementsInterfaces>) -> Vec<String> {
    implements
        .map(|i| i.named_types().filter_map(|n| name_of(n.name())).collect())
        .unwrap_or_default()
}

fn fields(def: Option<ast::FieldsDefinition>) -> Vec<FieldDef> {
    let Some(def) = def else {
        return Vec::new();
    };

    def.field_definitions()
        .filter_map(|field| {
            Some(FieldDef {
                name: name_of(field.name())?,
                description: description(field.description()),
                ty: render_type(&field.ty()?),
                args: field
                    .arguments_definition()
                    .map(|a| a.input_value_definitions().filter_map(input_value).collect())
                    .unwrap_or_default(),
                deprecation: deprecation(field.directives()),
            })
        })
        .collect()
}

fn input_value(value: ast::InputValueDefinition) -> Option<InputValueDef> {
    Some(InputValueDef {
        name: name_of(value.name())?,
        description: description(value.description()),
        ty: render_type(&value.ty()?),
        default_value: value
            .default_value()
            .and_then(|d| d.value())
            .map(|v| render_value(&v)),
    })
}

/// The `@deprecated` reason, if the element carries the directive.
fn deprecation(directives: Option<ast::Directives>) -> Option<String> {
    let directive = directives?
        .directives()
        .find(|d| name_of(d.name()).as_deref() == Some("deprecated"))?;

    let reason = directive
        .arguments()
        .and_then(|args| {
            args.arguments()
                .find(|a| name_of(a.name()).as_deref() == Some("reason"))
        })
        .and_then(|arg| arg.value())
        .and_then(|value| match value {
            ast::Value::StringValue(s) => Some(String::from(s)),
            _ => None,
        });

    Some(reason.unwrap_or_else(|| DEFAULT_DEPRECATION_REASON.to_string()))
}

/// Render a type reference back to SDL, e.g. `[String!]!`.
fn render_type(ty: &ast::Type) -> String {
    match ty {
        ast::Type::NamedType(named) => name_of(named.name()).unwrap_or_default(),
        ast::Type::ListType(list) => format!(
            "[{}]",
            list.ty().map(|inner| render_type(&inner)).unwrap_or_default()
        ),
        ast::Type::NonNullType(non_null) => {
            let inner = if let Some(named) = non_null.named_type() {
                name_of(named.name()).unwrap_or_default()
            } else if let Some(list) = non_null.list_type() {
                render_type(&ast::Type::ListType(list))
            } else {
                String::new()
            };
            format!("{}!", inner)
        }
    }
}

/// Render a constant value with whitespace collapsed.
fn render_value(value: &ast::Value) -> String {
    value
        .syntax()
        .text()
        .to_string()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_with_args_and_deprecation() {
        let model = parse_schema(
            r#"
            type Query {
              "The viewer"
              viewer: User!
              search(query: String!, first: Int = 10): [User]
              legacy: String @deprecated
              old: String @deprecated(reason: "Use `viewer`.")
            }

            type User implements Node { id: ID! }
            interface Node { id: ID! }
            "#,
        )
        .unwrap();

        let query = &model.types["Query"];
        assert_eq!(query.kind, TypeKind::Object);
        assert_eq!(query.fields.len(), 4);
        assert_eq!(query.fields[0].ty, "User!");
        assert_eq!(query.fields[0].description.as_deref(), Some("The viewer"));
        assert_eq!(query.fields[1].ty, "[User]");
        assert_eq!(query.fields[1].args[1].default_value.as_deref(), Some("10"));
        assert_eq!(
            query.fields[2].deprecation.as_deref(),
            Some(DEFAULT_DEPRECATION_REASON)
        );
        assert_eq!(query.fields[3].deprecation.as_deref(), Some("Use `viewer`."));
        assert_eq!(model.types["User"].interfaces, vec!["Node".to_string()]);
        assert_eq!(model.query.as_deref(), Some("Query"));
        assert_eq!(model.mutation, None);
    }

    #[test]
    fn test_parse_enum_union_input_directive() {
        let model = parse_schema(
            r#"
            enum State { OPEN CLOSED @deprecated(reason: "Gone") }
            union Result = Issue | PullRequest
            type Issue { id: ID }
            type PullRequest { id: ID }
            input Filter { states: [State!] = [OPEN] }
            directive @preview(toggledBy: String!) on SCALAR | OBJECT
            "#,
        )
        .unwrap();

        let state = &model.types["State"];
        assert_eq!(state.enum_values.len(), 2);
        assert_eq!(state.enum_values[1].deprecation.as_deref(), Some("Gone"));
        assert_eq!(
            model.types["Result"].members,
            vec!["Issue".to_string(), "PullRequest".to_string()]
        );
        let filter = &model.types["Filter"];
        assert_eq!(filter.input_fields[0].ty, "[State!]");
        assert_eq!(filter.input_fields[0].default_value.as_deref(), Some("[OPEN]"));
        let directive = &model.directives["preview"];
        assert_eq!(directive.locations, vec!["SCALAR".to_string(), "OBJECT".to_string()]);
        assert_eq!(directive.args[0].ty, "String!");
    }

    #[test]
    fn test_schema_block_sets_roots() {
        let model = parse_schema(
            "schema { query: Root mutation: Writes }\ntype Root { a: Int }\ntype Writes { b: Int }\ntype Query { c: Int }",
        )
        .unwrap();
        assert_eq!(model.query.as_deref(), Some("Root"));
        assert_eq!(model.mutation.as_deref(), Some("Writes"));
    }

    #[test]
    fn test_extensions_are_skipped() {
        let model = parse_schema("type Query { a: Int }\nextend type Query { b: Int }").unwrap();
        let names: Vec<&str> = model.types["Query"]
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn test_parse_error() {
        let result = parse_schema("type Query { foo: }");
        assert!(matches!(result, Err(SchemaError::Parse { .. })));
    }
}
