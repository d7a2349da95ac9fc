//! Schema merging across source units.
//!
//! Each source unit contributes one group. Units may reopen a group by name and may declare the
//! same interface more than once; this pass folds those back together:
//!
//! 1. groups sharing a name are coalesced into the first one seen;
//! 2. inside each group, interfaces sharing a name are merged into the first one seen.
//!
//! Merging appends comments, post comments and functions, and re-adds semantic comments with the
//! usual accumulate-into-list rule. Everything else keeps first-seen order.

use indexmap::IndexMap;

use crate::frontend::ast::{Group, Iface, Schema};

/// Coalesce same-named groups, then merge same-named interfaces inside each group.
#[tracing::instrument(skip_all, fields(groups = schema.groups.len()))]
pub fn merge_group_ifaces(schema: &mut Schema) {
    coalesce_groups(schema);
    for group in &mut schema.groups {
        let before = group.ifaces.len();
        group.ifaces = merge_ifaces(std::mem::take(&mut group.ifaces));
        if group.ifaces.len() != before {
            tracing::debug!(
                group = %group.name,
                before,
                after = group.ifaces.len(),
                "merged interfaces"
            );
        }
    }
}

/// Fold groups that share a name into the first occurrence.
pub fn coalesce_groups(schema: &mut Schema) {
    let mut by_name: IndexMap<String, Group> = IndexMap::new();
    for group in std::mem::take(&mut schema.groups) {
        match by_name.get_mut(&group.name) {
            Some(existing) => {
                tracing::debug!(group = %group.name, "coalesced group");
                let Group {
                    comments,
                    scalar_types,
                    enum_types,
                    struct_types,
                    ifaces,
                    ..
                } = group;
                existing.comments.absorb(comments);
                existing.scalar_types.extend(scalar_types);
                existing.enum_types.extend(enum_types);
                existing.struct_types.extend(struct_types);
                existing.ifaces.extend(ifaces);
            }
            None => {
                by_name.insert(group.name.clone(), group);
            }
        }
    }
    schema.groups = by_name.into_values().collect();
}

fn merge_ifaces(ifaces: Vec<Iface>) -> Vec<Iface> {
    let mut by_name: IndexMap<String, Iface> = IndexMap::new();
    for iface in ifaces {
        match by_name.get_mut(&iface.name) {
            Some(existing) => {
                existing.comments.absorb(iface.comments);
                existing.funs.extend(iface.funs);
            }
            None => {
                by_name.insert(iface.name.clone(), iface);
            }
        }
    }
    by_name.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ast::Fun;
    use crate::frontend::sem::SemValue;

    fn iface(name: &str, funs: &[&str]) -> Iface {
        Iface {
            name: name.to_string(),
            funs: funs
                .iter()
                .map(|f| Fun {
                    name: f.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn group(name: &str, ifaces: Vec<Iface>) -> Group {
        Group {
            name: name.to_string(),
            ifaces,
            ..Default::default()
        }
    }

    fn fun_names(iface: &Iface) -> Vec<&str> {
        iface.funs.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_same_named_ifaces_merge_in_first_seen_order() {
        let mut schema = Schema {
            groups: vec![group(
                "g",
                vec![iface("Foo", &["f1"]), iface("Bar", &["b1"]), iface("Foo", &["f2"])],
            )],
        };
        merge_group_ifaces(&mut schema);
        let ifaces = &schema.groups[0].ifaces;
        assert_eq!(ifaces.len(), 2);
        assert_eq!(ifaces[0].name, "Foo");
        assert_eq!(fun_names(&ifaces[0]), ["f1", "f2"]);
        assert_eq!(ifaces[1].name, "Bar");
    }

    #[test]
    fn test_groups_from_different_units_coalesce() {
        let mut schema = Schema {
            groups: vec![
                group("user", vec![iface("Foo", &["f1"])]),
                group("order", vec![]),
                group("user", vec![iface("Foo", &["f2"])]),
            ],
        };
        merge_group_ifaces(&mut schema);
        let names: Vec<_> = schema.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["user", "order"]);
        assert_eq!(fun_names(&schema.groups[0].ifaces[0]), ["f1", "f2"]);
    }

    #[test]
    fn test_merge_absorbs_comments() {
        let mut a = iface("Foo", &[]);
        a.comments.comments.push("first".into());
        a.comments.add_sem_comment("tag", SemValue::Str("a".into()));
        let mut b = iface("Foo", &[]);
        b.comments.comments.push("second".into());
        b.comments.post_comments.push("tail".into());
        b.comments.add_sem_comment("tag", SemValue::Str("b".into()));

        let mut schema = Schema {
            groups: vec![group("g", vec![a, b])],
        };
        merge_group_ifaces(&mut schema);
        let merged = &schema.groups[0].ifaces[0].comments;
        assert_eq!(merged.comments, vec!["first", "second"]);
        assert_eq!(merged.post_comments, vec!["tail"]);
        assert_eq!(
            merged.sem_comment("tag"),
            Some(&SemValue::List(vec![SemValue::Str("a".into()), SemValue::Str("b".into())]))
        );
    }

    #[test]
    fn test_ifaces_in_different_groups_stay_apart() {
        let mut schema = Schema {
            groups: vec![group("a", vec![iface("Foo", &["f1"])]), group("b", vec![iface("Foo", &["f2"])])],
        };
        merge_group_ifaces(&mut schema);
        assert_eq!(schema.groups[0].ifaces.len(), 1);
        assert_eq!(schema.groups[1].ifaces.len(), 1);
    }
}
