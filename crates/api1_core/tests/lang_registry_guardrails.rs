use std::collections::HashMap;

use api1_core::lang::http::{self, HttpMethodId};
use api1_core::lang::types::{self, BuiltinTypeId};

#[test]
fn builtin_types_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, BuiltinTypeId> = HashMap::new();

    for info in types::BUILTIN_TYPES {
        assert_eq!(
            types::from_str(info.item.canonical),
            Some(info.item.id),
            "builtin type canonical spelling not resolvable: {}",
            info.item.canonical
        );
        assert_eq!(
            types::as_str(info.item.id),
            info.item.canonical,
            "builtin type as_str mismatch for {:?}",
            info.item.id
        );
        if let Some(prev) = seen.insert(info.item.canonical, info.item.id) {
            panic!(
                "duplicate builtin type spelling {:?}: {:?} and {:?}",
                info.item.canonical, prev, info.item.id
            );
        }
    }

    assert_eq!(seen.len(), 6, "exactly six builtin types are pre-registered");
}

#[test]
fn http_methods_spellings_unique_and_resolvable() {
    let mut seen: HashMap<String, HttpMethodId> = HashMap::new();

    for info in http::HTTP_METHODS {
        assert_eq!(
            http::from_str(info.canonical),
            Some(info.id),
            "http method canonical spelling not resolvable: {}",
            info.canonical
        );
        for &alias in info.aliases {
            assert_eq!(http::from_str(alias), Some(info.id), "http method alias not resolvable: {}", alias);
        }
        if let Some(prev) = seen.insert(info.canonical.to_ascii_lowercase(), info.id) {
            panic!("duplicate http method spelling {:?}: {:?} and {:?}", info.canonical, prev, info.id);
        }
    }

    assert_eq!(seen.len(), 8, "all eight HTTP verbs are routable");
}

#[test]
fn http_methods_resolve_case_insensitively() {
    assert_eq!(http::from_str("get"), Some(HttpMethodId::Get));
    assert_eq!(http::from_str("GeT"), Some(HttpMethodId::Get));
    assert_eq!(http::from_str(" PATCH "), Some(HttpMethodId::Patch));
    assert_eq!(http::from_str("connect"), None);
}
