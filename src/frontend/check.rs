//! Schema validation
//!
//! Runs over the merged schema and returns the first violated rule. Checks run in a fixed order,
//! each over every group:
//!
//! 1. type names (scalars, enums, structs, builtins) are unique schema-wide;
//! 2. interface names are unique (a namespace separate from types);
//! 3. enum options, struct fields, interface functions and function params are unique within
//!    their owner, reporting every duplicated name;
//! 4. every referenced type resolves to a builtin or a declared type;
//! 5. enum option values do not mix integers with strings or bare options.

use std::collections::HashSet;

use api1_core::lang::types;
use indexmap::IndexMap;

use crate::frontend::ast::{EnumType, EnumValue, Schema, TypeRef};
use crate::frontend::diagnostics::{CompileError, DuplicateKind};

/// Validate a merged schema.
///
/// ## Errors
/// Returns the first [`CompileError::DuplicateDefinition`], [`CompileError::UnresolvedType`] or
/// [`CompileError::EnumValueType`] found.
#[tracing::instrument(skip_all, fields(groups = schema.groups.len()))]
pub fn check(schema: &Schema) -> Result<(), CompileError> {
    let declared = check_type_names(schema)?;
    check_iface_names(schema)?;
    check_members(schema)?;
    check_references(schema, &declared)?;
    for group in &schema.groups {
        for enum_type in &group.enum_types {
            check_enum_values(enum_type)?;
        }
    }
    Ok(())
}

// ============================================================================
// Uniqueness
// ============================================================================

/// Register every type name, builtins first. Returns the set of resolvable names.
fn check_type_names(schema: &Schema) -> Result<HashSet<&str>, CompileError> {
    let mut names: HashSet<&str> = types::BUILTIN_TYPES.iter().map(|t| t.item.canonical).collect();

    for group in &schema.groups {
        let declared = group
            .scalar_types
            .iter()
            .map(|s| s.name.as_str())
            .chain(group.enum_types.iter().map(|e| e.name.as_str()))
            .chain(group.struct_types.iter().map(|s| s.name.as_str()));
        for name in declared {
            if !names.insert(name) {
                return Err(duplicate(DuplicateKind::Type, vec![name.to_string()]));
            }
        }
    }
    Ok(names)
}

fn check_iface_names(schema: &Schema) -> Result<(), CompileError> {
    let mut names = HashSet::new();
    for iface in schema.groups.iter().flat_map(|g| g.ifaces.iter()) {
        if !names.insert(iface.name.as_str()) {
            return Err(duplicate(DuplicateKind::Interface, vec![iface.name.clone()]));
        }
    }
    Ok(())
}

fn check_members(schema: &Schema) -> Result<(), CompileError> {
    for group in &schema.groups {
        for enum_type in &group.enum_types {
            let dup = duplicated(enum_type.options.iter().map(|o| o.name.as_str()));
            if !dup.is_empty() {
                let kind = DuplicateKind::EnumOption {
                    enum_name: enum_type.name.clone(),
                };
                return Err(duplicate(kind, dup));
            }
        }
        for struct_type in &group.struct_types {
            let dup = duplicated(struct_type.fields.iter().map(|f| f.name.as_str()));
            if !dup.is_empty() {
                let kind = DuplicateKind::StructField {
                    struct_name: struct_type.name.clone(),
                };
                return Err(duplicate(kind, dup));
            }
        }
        for iface in &group.ifaces {
            let dup = duplicated(iface.funs.iter().map(|f| f.name.as_str()));
            if !dup.is_empty() {
                let kind = DuplicateKind::Function {
                    iface: iface.name.clone(),
                };
                return Err(duplicate(kind, dup));
            }
            for fun in &iface.funs {
                let dup = duplicated(fun.params.iter().map(|p| p.name.as_str()));
                if !dup.is_empty() {
                    let kind = DuplicateKind::Param {
                        iface: iface.name.clone(),
                        fun: fun.name.clone(),
                    };
                    return Err(duplicate(kind, dup));
                }
            }
        }
    }
    Ok(())
}

/// Names occurring more than once, in order of first occurrence.
pub fn duplicated<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for name in names {
        *counts.entry(name).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.to_string())
        .collect()
}

fn duplicate(kind: DuplicateKind, names: Vec<String>) -> CompileError {
    CompileError::DuplicateDefinition { kind, names }
}

// ============================================================================
// References
// ============================================================================

fn check_references(schema: &Schema, declared: &HashSet<&str>) -> Result<(), CompileError> {
    for group in &schema.groups {
        for struct_type in &group.struct_types {
            for field in &struct_type.fields {
                resolve(&field.ty, declared, || format!("Struct [{}]", struct_type.name))?;
            }
        }
        for iface in &group.ifaces {
            for fun in &iface.funs {
                let context = || format!("Function [{}.{}]", iface.name, fun.name);
                // Return types are optional
                if let Some(ret) = &fun.return_type {
                    resolve(ret, declared, context)?;
                }
                for param in &fun.params {
                    resolve(&param.ty, declared, context)?;
                }
            }
        }
    }
    Ok(())
}

fn resolve(ty: &TypeRef, declared: &HashSet<&str>, context: impl FnOnce() -> String) -> Result<(), CompileError> {
    let name = ty.innermost_name();
    if declared.contains(name) {
        Ok(())
    } else {
        Err(CompileError::UnresolvedType {
            name: name.to_string(),
            context: context(),
        })
    }
}

// ============================================================================
// Enum values
// ============================================================================

/// Integer values must be used on every option or on none.
///
/// A bare option stands for its own name, so bare and string options may be mixed.
fn check_enum_values(enum_type: &EnumType) -> Result<(), CompileError> {
    let mut has_int = false;
    let mut has_other = false;
    for option in &enum_type.options {
        match option.value {
            Some(EnumValue::Int(_)) => has_int = true,
            Some(EnumValue::Str(_)) | None => has_other = true,
        }
    }
    if has_int && has_other {
        return Err(CompileError::EnumValueType {
            enum_name: enum_type.name.clone(),
        });
    }
    Ok(())
}
