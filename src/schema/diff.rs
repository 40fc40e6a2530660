//! Structural diff between two schema models.
//!
//! Emits [`Change`] records in the vocabulary and message style of common GraphQL
//! diff tools, so downstream classification works the same whether the records
//! come from here or from an external diff.

use std::collections::BTreeMap;

use super::change::{Change, ChangeKind};
use super::model::{DirectiveDef, EnumValueDef, FieldDef, InputValueDef, SchemaModel, TypeDef, TypeKind};

/// Compute every change between `old` and `new`.
pub fn diff(old: &SchemaModel, new: &SchemaModel) -> Vec<Change> {
    let mut changes = Vec::new();

    diff_root(
        &mut changes,
        ChangeKind::SchemaQueryTypeChanged,
        "query",
        &old.query,
        &new.query,
    );
    diff_root(
        &mut changes,
        ChangeKind::SchemaMutationTypeChanged,
        "mutation",
        &old.mutation,
        &new.mutation,
    );
    diff_root(
        &mut changes,
        ChangeKind::SchemaSubscriptionTypeChanged,
        "subscription",
        &old.subscription,
        &new.subscription,
    );

    for name in old.types.keys().filter(|n| !new.types.contains_key(*n)) {
        changes.push(Change::new(
            ChangeKind::TypeRemoved,
            name.as_str(),
            format!("Type '{}' was removed", name),
        ));
    }

    for name in new.types.keys().filter(|n| !old.types.contains_key(*n)) {
        changes.push(Change::new(
            ChangeKind::TypeAdded,
            name.as_str(),
            format!("Type '{}' was added", name),
        ));
    }

    for (name, old_type) in &old.types {
        if let Some(new_type) = new.types.get(name) {
            diff_type(&mut changes, old_type, new_type);
        }
    }

    diff_directives(&mut changes, &old.directives, &new.directives);

    changes
}

fn diff_root(
    changes: &mut Vec<Change>,
    kind: ChangeKind,
    operation: &str,
    old: &Option<String>,
    new: &Option<String>,
) {
    if old == new {
        return;
    }

    changes.push(Change::new(
        kind,
        "",
        format!(
            "Schema {} root has changed from '{}' to '{}'",
            operation,
            old.as_deref().unwrap_or("unknown"),
            new.as_deref().unwrap_or("unknown"),
        ),
    ));
}

fn diff_type(changes: &mut Vec<Change>, old: &TypeDef, new: &TypeDef) {
    let name = &old.name;

    if old.kind != new.kind {
        changes.push(Change::new(
            ChangeKind::TypeKindChanged,
            name.as_str(),
            format!(
                "'{}' kind changed from '{}' to '{}'",
                name,
                old.kind.as_str(),
                new.kind.as_str()
            ),
        ));
        return;
    }

    match (&old.description, &new.description) {
        (None, Some(added)) => changes.push(Change::new(
            ChangeKind::TypeDescriptionAdded,
            name.as_str(),
            format!("Description '{}' was added to object type '{}'", added, name),
        )),
        (Some(removed), None) => changes.push(Change::new(
            ChangeKind::TypeDescriptionRemoved,
            name.as_str(),
            format!("Description '{}' was removed from object type '{}'", removed, name),
        )),
        (Some(before), Some(after)) if before != after => changes.push(Change::new(
            ChangeKind::TypeDescriptionChanged,
            name.as_str(),
            format!(
                "Description '{}' on type '{}' has changed to '{}'",
                before, name, after
            ),
        )),
        _ => {}
    }

    match old.kind {
        TypeKind::Object | TypeKind::Interface => {
            diff_interfaces(changes, old.kind, name, &old.interfaces, &new.interfaces);
            diff_fields(changes, old.kind, name, &old.fields, &new.fields);
        }
        TypeKind::Enum => diff_enum_values(changes, name, &old.enum_values, &new.enum_values),
        TypeKind::Union => diff_union_members(changes, name, &old.members, &new.members),
        TypeKind::InputObject => {
            diff_input_fields(changes, name, &old.input_fields, &new.input_fields)
        }
        TypeKind::Scalar => {}
    }
}

fn diff_interfaces(
    changes: &mut Vec<Change>,
    kind: TypeKind,
    type_name: &str,
    old: &[String],
    new: &[String],
) {
    let owner = if kind == TypeKind::Interface {
        "interface"
    } else {
        "object type"
    };

    for iface in old.iter().filter(|i| !new.contains(i)) {
        changes.push(Change::new(
            ChangeKind::ObjectTypeInterfaceRemoved,
            type_name,
            format!(
                "'{}' {} no longer implements '{}' interface",
                type_name, owner, iface
            ),
        ));
    }

    for iface in new.iter().filter(|i| !old.contains(i)) {
        changes.push(Change::new(
            ChangeKind::ObjectTypeInterfaceAdded,
            type_name,
            format!("'{}' {} implements '{}' interface", type_name, owner, iface),
        ));
    }
}

fn diff_fields(
    changes: &mut Vec<Change>,
    kind: TypeKind,
    type_name: &str,
    old: &[FieldDef],
    new: &[FieldDef],
) {
    let owner = if kind == TypeKind::Interface {
        "interface"
    } else {
        "object type"
    };

    for field in old.iter().filter(|f| find(new, &f.name).is_none()) {
        let deprecated = if field.deprecation.is_some() {
            "(deprecated) "
        } else {
            ""
        };
        changes.push(Change::new(
            ChangeKind::FieldRemoved,
            format!("{}.{}", type_name, field.name),
            format!(
                "Field '{}' {}was removed from {} '{}'",
                field.name, deprecated, owner, type_name
            ),
        ));
    }

    for field in new.iter().filter(|f| find(old, &f.name).is_none()) {
        changes.push(Change::new(
            ChangeKind::FieldAdded,
            format!("{}.{}", type_name, field.name),
            format!("Field '{}' was added to {} '{}'", field.name, owner, type_name),
        ));
    }

    for old_field in old {
        if let Some(new_field) = find(new, &old_field.name) {
            diff_field(changes, type_name, old_field, new_field);
        }
    }
}

fn diff_field(changes: &mut Vec<Change>, type_name: &str, old: &FieldDef, new: &FieldDef) {
    let coordinate = format!("{}.{}", type_name, old.name);

    match (&old.description, &new.description) {
        (None, Some(added)) => changes.push(Change::new(
            ChangeKind::FieldDescriptionAdded,
            coordinate.as_str(),
            format!("Field '{}' has description '{}'", coordinate, added),
        )),
        (Some(_), None) => changes.push(Change::new(
            ChangeKind::FieldDescriptionRemoved,
            coordinate.as_str(),
            format!("Description was removed from field '{}'", coordinate),
        )),
        (Some(before), Some(after)) if before != after => changes.push(Change::new(
            ChangeKind::FieldDescriptionChanged,
            coordinate.as_str(),
            format!(
                "Field '{}' description changed from '{}' to '{}'",
                coordinate, before, after
            ),
        )),
        _ => {}
    }

    match (&old.deprecation, &new.deprecation) {
        (None, Some(_)) => changes.push(Change::new(
            ChangeKind::FieldDeprecationAdded,
            coordinate.as_str(),
            format!("Field '{}' is deprecated", coordinate),
        )),
        (Some(_), None) => changes.push(Change::new(
            ChangeKind::FieldDeprecationRemoved,
            coordinate.as_str(),
            format!("Field '{}' is no longer deprecated", coordinate),
        )),
        (Some(before), Some(after)) if before != after => changes.push(Change::new(
            ChangeKind::FieldDeprecationReasonChanged,
            coordinate.as_str(),
            format!(
                "Deprecation reason on field '{}' has changed from '{}' to '{}'",
                coordinate, before, after
            ),
        )),
        _ => {}
    }

    if old.ty != new.ty {
        changes.push(Change::new(
            ChangeKind::FieldTypeChanged,
            coordinate.as_str(),
            format!(
                "Field '{}' changed type from '{}' to '{}'",
                coordinate, old.ty, new.ty
            ),
        ));
    }

    for arg in old.args.iter().filter(|a| find(&new.args, &a.name).is_none()) {
        changes.push(Change::new(
            ChangeKind::FieldArgumentRemoved,
            format!("{}.{}", coordinate, arg.name),
            format!(
                "Argument '{}: {}' was removed from field '{}'",
                arg.name, arg.ty, coordinate
            ),
        ));
    }

    for arg in new.args.iter().filter(|a| find(&old.args, &a.name).is_none()) {
        changes.push(Change::new(
            ChangeKind::FieldArgumentAdded,
            format!("{}.{}", coordinate, arg.name),
            format!(
                "Argument '{}: {}' added to field '{}'",
                arg.name, arg.ty, coordinate
            ),
        ));
    }

    for old_arg in &old.args {
        if let Some(new_arg) = find(&new.args, &old_arg.name) {
            diff_field_argument(changes, &coordinate, old_arg, new_arg);
        }
    }
}

fn diff_field_argument(
    changes: &mut Vec<Change>,
    field: &str,
    old: &InputValueDef,
    new: &InputValueDef,
) {
    let path = format!("{}.{}", field, old.name);

    if old.description != new.description {
        changes.push(Change::new(
            ChangeKind::FieldArgumentDescriptionChanged,
            path.as_str(),
            format!(
                "Description for argument '{}' on field '{}' changed from '{}' to '{}'",
                old.name,
                field,
                old.description.as_deref().unwrap_or("undefined"),
                new.description.as_deref().unwrap_or("undefined"),
            ),
        ));
    }

    if old.default_value != new.default_value {
        let message = match (&old.default_value, &new.default_value) {
            (None, Some(added)) => format!(
                "Default value '{}' was added to argument '{}' on field '{}'",
                added, old.name, field
            ),
            (before, after) => format!(
                "Default value for argument '{}' on field '{}' changed from '{}' to '{}'",
                old.name,
                field,
                before.as_deref().unwrap_or("undefined"),
                after.as_deref().unwrap_or("undefined"),
            ),
        };
        changes.push(Change::new(
            ChangeKind::FieldArgumentDefaultChanged,
            path.as_str(),
            message,
        ));
    }

    if old.ty != new.ty {
        changes.push(Change::new(
            ChangeKind::FieldArgumentTypeChanged,
            path.as_str(),
            format!(
                "Type for argument '{}' on field '{}' changed from '{}' to '{}'",
                old.name, field, old.ty, new.ty
            ),
        ));
    }
}

fn diff_enum_values(
    changes: &mut Vec<Change>,
    enum_name: &str,
    old: &[EnumValueDef],
    new: &[EnumValueDef],
) {
    for value in old.iter().filter(|v| find_value(new, &v.name).is_none()) {
        changes.push(Change::new(
            ChangeKind::EnumValueRemoved,
            format!("{}.{}", enum_name, value.name),
            format!("Enum value '{}' was removed from enum '{}'", value.name, enum_name),
        ));
    }

    for value in new.iter().filter(|v| find_value(old, &v.name).is_none()) {
        changes.push(Change::new(
            ChangeKind::EnumValueAdded,
            format!("{}.{}", enum_name, value.name),
            format!("Enum value '{}' was added to enum '{}'", value.name, enum_name),
        ));
    }

    for old_value in old {
        let Some(new_value) = find_value(new, &old_value.name) else {
            continue;
        };
        let path = format!("{}.{}", enum_name, old_value.name);

        if old_value.description != new_value.description {
            let message = match &new_value.description {
                Some(desc) => format!("Description '{}' was added to enum value '{}'", desc, path),
                None => format!("Description was removed from enum value '{}'", path),
            };
            changes.push(Change::new(
                ChangeKind::EnumValueDescriptionChanged,
                path.as_str(),
                message,
            ));
        }

        match (&old_value.deprecation, &new_value.deprecation) {
            (None, Some(reason)) => changes.push(Change::new(
                ChangeKind::EnumValueDeprecationReasonAdded,
                path.as_str(),
                format!(
                    "Enum value '{}' was deprecated with reason '{}'",
                    path, reason
                ),
            )),
            (Some(_), None) => changes.push(Change::new(
                ChangeKind::EnumValueDeprecationReasonRemoved,
                path.as_str(),
                format!("Deprecation reason was removed from enum value '{}'", path),
            )),
            (Some(before), Some(after)) if before != after => changes.push(Change::new(
                ChangeKind::EnumValueDeprecationReasonChanged,
                path.as_str(),
                format!(
                    "Enum value '{}' deprecation reason changed from '{}' to '{}'",
                    path, before, after
                ),
            )),
            _ => {}
        }
    }
}

fn diff_union_members(changes: &mut Vec<Change>, union_name: &str, old: &[String], new: &[String]) {
    for member in old.iter().filter(|m| !new.contains(m)) {
        changes.push(Change::new(
            ChangeKind::UnionMemberRemoved,
            union_name,
            format!("Member '{}' was removed from Union type '{}'", member, union_name),
        ));
    }

    for member in new.iter().filter(|m| !old.contains(m)) {
        changes.push(Change::new(
            ChangeKind::UnionMemberAdded,
            union_name,
            format!("Member '{}' was added to Union type '{}'", member, union_name),
        ));
    }
}

fn diff_input_fields(
    changes: &mut Vec<Change>,
    input_name: &str,
    old: &[InputValueDef],
    new: &[InputValueDef],
) {
    for field in old.iter().filter(|f| find(new, &f.name).is_none()) {
        changes.push(Change::new(
            ChangeKind::InputFieldRemoved,
            format!("{}.{}", input_name, field.name),
            format!(
                "Input field '{}' was removed from input object type '{}'",
                field.name, input_name
            ),
        ));
    }

    for field in new.iter().filter(|f| find(old, &f.name).is_none()) {
        changes.push(Change::new(
            ChangeKind::InputFieldAdded,
            format!("{}.{}", input_name, field.name),
            format!(
                "Input field '{}' was added to input object type '{}'",
                field.name, input_name
            ),
        ));
    }

    for old_field in old {
        let Some(new_field) = find(new, &old_field.name) else {
            continue;
        };
        let coordinate = format!("{}.{}", input_name, old_field.name);

        match (&old_field.description, &new_field.description) {
            (None, Some(added)) => changes.push(Change::new(
                ChangeKind::InputFieldDescriptionAdded,
                coordinate.as_str(),
                format!("Input field '{}' has description '{}'", coordinate, added),
            )),
            (Some(_), None) => changes.push(Change::new(
                ChangeKind::InputFieldDescriptionRemoved,
                coordinate.as_str(),
                format!("Description was removed from input field '{}'", coordinate),
            )),
            (Some(before), Some(after)) if before != after => changes.push(Change::new(
                ChangeKind::InputFieldDescriptionChanged,
                coordinate.as_str(),
                format!(
                    "Input field '{}' description changed from '{}' to '{}'",
                    coordinate, before, after
                ),
            )),
            _ => {}
        }

        if old_field.default_value != new_field.default_value {
            changes.push(Change::new(
                ChangeKind::InputFieldDefaultValueChanged,
                coordinate.as_str(),
                format!(
                    "Input field '{}' default value changed from '{}' to '{}'",
                    coordinate,
                    old_field.default_value.as_deref().unwrap_or("undefined"),
                    new_field.default_value.as_deref().unwrap_or("undefined"),
                ),
            ));
        }

        if old_field.ty != new_field.ty {
            changes.push(Change::new(
                ChangeKind::InputFieldTypeChanged,
                coordinate.as_str(),
                format!(
                    "Input field '{}' changed type from '{}' to '{}'",
                    coordinate, old_field.ty, new_field.ty
                ),
            ));
        }
    }
}

fn diff_directives(
    changes: &mut Vec<Change>,
    old: &BTreeMap<String, DirectiveDef>,
    new: &BTreeMap<String, DirectiveDef>,
) {
    for name in old.keys().filter(|n| !new.contains_key(*n)) {
        changes.push(Change::new(
            ChangeKind::DirectiveRemoved,
            format!("@{}", name),
            format!("Directive '{}' was removed", name),
        ));
    }

    for name in new.keys().filter(|n| !old.contains_key(*n)) {
        changes.push(Change::new(
            ChangeKind::DirectiveAdded,
            format!("@{}", name),
            format!("Directive '{}' was added", name),
        ));
    }

    for (name, old_directive) in old {
        let Some(new_directive) = new.get(name) else {
            continue;
        };
        let path = format!("@{}", name);

        if old_directive.description != new_directive.description {
            changes.push(Change::new(
                ChangeKind::DirectiveDescriptionChanged,
                path.as_str(),
                format!(
                    "Directive '{}' description changed from '{}' to '{}'",
                    name,
                    old_directive.description.as_deref().unwrap_or("undefined"),
                    new_directive.description.as_deref().unwrap_or("undefined"),
                ),
            ));
        }

        for location in old_directive
            .locations
            .iter()
            .filter(|l| !new_directive.locations.contains(l))
        {
            changes.push(Change::new(
                ChangeKind::DirectiveLocationRemoved,
                path.as_str(),
                format!("Location '{}' was removed from directive '{}'", location, name),
            ));
        }

        for location in new_directive
            .locations
            .iter()
            .filter(|l| !old_directive.locations.contains(l))
        {
            changes.push(Change::new(
                ChangeKind::DirectiveLocationAdded,
                path.as_str(),
                format!("Location '{}' was added to directive '{}'", location, name),
            ));
        }

        diff_directive_arguments(changes, name, &old_directive.args, &new_directive.args);
    }
}

fn diff_directive_arguments(
    changes: &mut Vec<Change>,
    directive: &str,
    old: &[InputValueDef],
    new: &[InputValueDef],
) {
    for arg in old.iter().filter(|a| find(new, &a.name).is_none()) {
        changes.push(Change::new(
            ChangeKind::DirectiveArgumentRemoved,
            format!("@{}.{}", directive, arg.name),
            format!("Argument '{}' was removed from directive '{}'", arg.name, directive),
        ));
    }

    for arg in new.iter().filter(|a| find(old, &a.name).is_none()) {
        changes.push(Change::new(
            ChangeKind::DirectiveArgumentAdded,
            format!("@{}.{}", directive, arg.name),
            format!("Argument '{}' was added to directive '{}'", arg.name, directive),
        ));
    }

    for old_arg in old {
        let Some(new_arg) = find(new, &old_arg.name) else {
            continue;
        };
        let path = format!("@{}.{}", directive, old_arg.name);

        if old_arg.description != new_arg.description {
            changes.push(Change::new(
                ChangeKind::DirectiveArgumentDescriptionChanged,
                path.as_str(),
                format!(
                    "Description for argument '{}' on directive '{}' changed from '{}' to '{}'",
                    old_arg.name,
                    directive,
                    old_arg.description.as_deref().unwrap_or("undefined"),
                    new_arg.description.as_deref().unwrap_or("undefined"),
                ),
            ));
        }

        if old_arg.default_value != new_arg.default_value {
            changes.push(Change::new(
                ChangeKind::DirectiveArgumentDefaultValueChanged,
                path.as_str(),
                format!(
                    "Default value for argument '{}' on directive '{}' changed from '{}' to '{}'",
                    old_arg.name,
                    directive,
                    old_arg.default_value.as_deref().unwrap_or("undefined"),
                    new_arg.default_value.as_deref().unwrap_or("undefined"),
                ),
            ));
        }

        if old_arg.ty != new_arg.ty {
            changes.push(Change::new(
                ChangeKind::DirectiveArgumentTypeChanged,
                path.as_str(),
                format!(
                    "Type for argument '{}' on directive '{}' changed from '{}' to '{}'",
                    old_arg.name, directive, old_arg.ty, new_arg.ty
                ),
            ));
        }
    }
}

trait Named {
    fn name(&self) -> &str;
}

impl Named for FieldDef {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for InputValueDef {
    fn name(&self) -> &str {
        &self.name
    }
}

fn find<'a, T: Named>(items: &'a [T], name: &str) -> Option<&'a T> {
    items.iter().find(|item| item.name() == name)
}

fn find_value<'a>(values: &'a [EnumValueDef], name: &str) -> Option<&'a EnumValueDef> {
    values.iter().find(|v| v.name == name)
}
