//! Change records produced by a schema diff, and the closed set of change kinds.

use serde::{Deserialize, Serialize};

/// A single difference between two schema versions.
///
/// Mirrors the `{type, path, message}` shape emitted by GraphQL diff tools, so
/// records can come from [`crate::schema::diff`] or from an external JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    #[serde(rename = "type")]
    pub kind: String,
    /// Dotted location of the changed element; empty for schema-level changes.
    #[serde(default)]
    pub path: String,
    pub message: String,
}

impl Change {
    pub fn new(kind: ChangeKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            path: path.into(),
            message: message.into(),
        }
    }
}

/// What to do with a change of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Report,
    Ignore,
    Unknown,
}

macro_rules! change_kinds {
    ($($variant:ident => $name:literal,)+) => {
        /// Every change kind the differ knows about.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ChangeKind {
            $($variant,)+
        }

        impl ChangeKind {
            /// Wire name of the kind, e.g. `"FIELD_REMOVED"`.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl std::str::FromStr for ChangeKind {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    _ => Err(format!("Unknown change kind: {}", s)),
                }
            }
        }
    };
}

change_kinds! {
    FieldArgumentDescriptionChanged => "FIELD_ARGUMENT_DESCRIPTION_CHANGED",
    FieldArgumentDefaultChanged => "FIELD_ARGUMENT_DEFAULT_CHANGED",
    FieldArgumentTypeChanged => "FIELD_ARGUMENT_TYPE_CHANGED",
    DirectiveRemoved => "DIRECTIVE_REMOVED",
    DirectiveAdded => "DIRECTIVE_ADDED",
    DirectiveDescriptionChanged => "DIRECTIVE_DESCRIPTION_CHANGED",
    DirectiveLocationAdded => "DIRECTIVE_LOCATION_ADDED",
    DirectiveLocationRemoved => "DIRECTIVE_LOCATION_REMOVED",
    DirectiveArgumentAdded => "DIRECTIVE_ARGUMENT_ADDED",
    DirectiveArgumentRemoved => "DIRECTIVE_ARGUMENT_REMOVED",
    DirectiveArgumentDescriptionChanged => "DIRECTIVE_ARGUMENT_DESCRIPTION_CHANGED",
    DirectiveArgumentDefaultValueChanged => "DIRECTIVE_ARGUMENT_DEFAULT_VALUE_CHANGED",
    DirectiveArgumentTypeChanged => "DIRECTIVE_ARGUMENT_TYPE_CHANGED",
    EnumValueRemoved => "ENUM_VALUE_REMOVED",
    EnumValueAdded => "ENUM_VALUE_ADDED",
    EnumValueDescriptionChanged => "ENUM_VALUE_DESCRIPTION_CHANGED",
    EnumValueDeprecationReasonChanged => "ENUM_VALUE_DEPRECATION_REASON_CHANGED",
    EnumValueDeprecationReasonAdded => "ENUM_VALUE_DEPRECATION_REASON_ADDED",
    EnumValueDeprecationReasonRemoved => "ENUM_VALUE_DEPRECATION_REASON_REMOVED",
    FieldRemoved => "FIELD_REMOVED",
    FieldAdded => "FIELD_ADDED",
    FieldDescriptionChanged => "FIELD_DESCRIPTION_CHANGED",
    FieldDescriptionAdded => "FIELD_DESCRIPTION_ADDED",
    FieldDescriptionRemoved => "FIELD_DESCRIPTION_REMOVED",
    FieldDeprecationAdded => "FIELD_DEPRECATION_ADDED",
    FieldDeprecationRemoved => "FIELD_DEPRECATION_REMOVED",
    FieldDeprecationReasonChanged => "FIELD_DEPRECATION_REASON_CHANGED",
    FieldDeprecationReasonAdded => "FIELD_DEPRECATION_REASON_ADDED",
    FieldDeprecationReasonRemoved => "FIELD_DEPRECATION_REASON_REMOVED",
    FieldTypeChanged => "FIELD_TYPE_CHANGED",
    FieldArgumentAdded => "FIELD_ARGUMENT_ADDED",
    FieldArgumentRemoved => "FIELD_ARGUMENT_REMOVED",
    InputFieldRemoved => "INPUT_FIELD_REMOVED",
    InputFieldAdded => "INPUT_FIELD_ADDED",
    InputFieldDescriptionAdded => "INPUT_FIELD_DESCRIPTION_ADDED",
    InputFieldDescriptionRemoved => "INPUT_FIELD_DESCRIPTION_REMOVED",
    InputFieldDescriptionChanged => "INPUT_FIELD_DESCRIPTION_CHANGED",
    InputFieldDefaultValueChanged => "INPUT_FIELD_DEFAULT_VALUE_CHANGED",
    InputFieldTypeChanged => "INPUT_FIELD_TYPE_CHANGED",
    ObjectTypeInterfaceAdded => "OBJECT_TYPE_INTERFACE_ADDED",
    ObjectTypeInterfaceRemoved => "OBJECT_TYPE_INTERFACE_REMOVED",
    SchemaQueryTypeChanged => "SCHEMA_QUERY_TYPE_CHANGED",
    SchemaMutationTypeChanged => "SCHEMA_MUTATION_TYPE_CHANGED",
    SchemaSubscriptionTypeChanged => "SCHEMA_SUBSCRIPTION_TYPE_CHANGED",
    TypeRemoved => "TYPE_REMOVED",
    TypeAdded => "TYPE_ADDED",
    TypeKindChanged => "TYPE_KIND_CHANGED",
    TypeDescriptionChanged => "TYPE_DESCRIPTION_CHANGED",
    TypeDescriptionRemoved => "TYPE_DESCRIPTION_REMOVED",
    TypeDescriptionAdded => "TYPE_DESCRIPTION_ADDED",
    UnionMemberRemoved => "UNION_MEMBER_REMOVED",
    UnionMemberAdded => "UNION_MEMBER_ADDED",
}

impl ChangeKind {
    /// Whether changes of this kind belong in the changelog.
    ///
    /// Exhaustive on purpose: a new variant does not compile until it is
    /// placed on one side.
    pub fn disposition(&self) -> Disposition {
        use ChangeKind::*;

        match self {
            FieldArgumentDefaultChanged
            | FieldArgumentTypeChanged
            | EnumValueRemoved
            | EnumValueAdded
            | FieldRemoved
            | FieldAdded
            | FieldTypeChanged
            | FieldArgumentAdded
            | FieldArgumentRemoved
            | ObjectTypeInterfaceAdded
            | ObjectTypeInterfaceRemoved
            | InputFieldRemoved
            | InputFieldAdded
            | InputFieldDefaultValueChanged
            | InputFieldTypeChanged
            | TypeRemoved
            | TypeAdded
            | TypeKindChanged
            | UnionMemberRemoved
            | UnionMemberAdded
            | SchemaQueryTypeChanged
            | SchemaMutationTypeChanged
            | SchemaSubscriptionTypeChanged => Disposition::Report,

            FieldArgumentDescriptionChanged
            | DirectiveRemoved
            | DirectiveAdded
            | DirectiveDescriptionChanged
            | DirectiveLocationAdded
            | DirectiveLocationRemoved
            | DirectiveArgumentAdded
            | DirectiveArgumentRemoved
            | DirectiveArgumentDescriptionChanged
            | DirectiveArgumentDefaultValueChanged
            | DirectiveArgumentTypeChanged
            | EnumValueDescriptionChanged
            | EnumValueDeprecationReasonChanged
            | EnumValueDeprecationReasonAdded
            | EnumValueDeprecationReasonRemoved
            | FieldDescriptionChanged
            | FieldDescriptionAdded
            | FieldDescriptionRemoved
            | FieldDeprecationAdded
            | FieldDeprecationRemoved
            | FieldDeprecationReasonChanged
            | FieldDeprecationReasonAdded
            | FieldDeprecationReasonRemoved
            | InputFieldDescriptionAdded
            | InputFieldDescriptionRemoved
            | InputFieldDescriptionChanged
            | TypeDescriptionChanged
            | TypeDescriptionRemoved
            | TypeDescriptionAdded => Disposition::Ignore,
        }
    }
}

/// Map any kind string to its disposition; strings outside the known set are `Unknown`.
pub fn disposition(kind: &str) -> Disposition {
    kind.parse::<ChangeKind>()
        .map(|k| k.disposition())
        .unwrap_or(Disposition::Unknown)
}
