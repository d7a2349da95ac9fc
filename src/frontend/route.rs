//! Route compilation.
//!
//! Functions annotated with `@route <method> <path>` get a [`RouteInfo`]: the HTTP method, the
//! path rendered in the requested [`PathStyle`], and the position of every parameter.
//!
//! ## Parameter classification
//!
//! In declaration order, each parameter is:
//! - `path` if its name is a placeholder of the path (`:id` or `{id}`);
//! - `body` if its type is an array, `object`, `any`, a struct, or a scalar annotated with
//!   `@route.in body`;
//! - `query` otherwise (builtin scalars, enums, plain scalars).
//!
//! A routed function is rejected if a path parameter is nullable, if more than one parameter
//! lands in the body, or if a placeholder has no matching parameter.

use std::collections::HashMap;
use std::sync::LazyLock;

use api1_core::lang::http::{self, HttpMethodId};
use api1_core::lang::types::{self as builtin, Placement};
use indexmap::{IndexMap, IndexSet};
use regex::Regex;

use crate::frontend::ast::{Fun, Param, PathStyle, Position, RouteInfo, Schema, TypeRef, placeholder_name};
use crate::frontend::diagnostics::{CompileError, RouteErrorKind};

/// Semantic comment key holding the route annotation.
pub const ROUTE_KEY: &str = "route";
/// Semantic comment key marking a scalar type as a body value (`@route.in body`).
pub const ROUTE_IN_KEY: &str = "route.in";

static ROUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(get|put|post|delete|options|head|patch|trace)\s+(.+?)\s*$")
        .expect("INVARIANT: route pattern is a valid regex")
});

/// What a declared type name refers to, as far as routing cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Scalar { body: bool },
    Enum,
    Struct,
}

/// Compiles `@route` annotations against one schema.
///
/// ## Notes
/// - The type lookup table is built once, in [`RouteCompiler::new`]; build a new compiler for
///   each schema.
#[derive(Debug, Clone)]
pub struct RouteCompiler {
    types: HashMap<String, TypeKind>,
    style: PathStyle,
}

impl RouteCompiler {
    pub fn new(schema: &Schema, style: PathStyle) -> Self {
        let mut types = HashMap::new();
        for group in &schema.groups {
            for scalar in &group.scalar_types {
                let body = scalar.comments.sem_comment(ROUTE_IN_KEY).and_then(|v| v.as_str()) == Some("body");
                types.insert(scalar.name.clone(), TypeKind::Scalar { body });
            }
            for enum_type in &group.enum_types {
                types.insert(enum_type.name.clone(), TypeKind::Enum);
            }
            for struct_type in &group.struct_types {
                types.insert(struct_type.name.clone(), TypeKind::Struct);
            }
        }
        Self { types, style }
    }

    pub fn type_kind(&self, name: &str) -> Option<TypeKind> {
        self.types.get(name).copied()
    }

    /// Whether a parameter of type `ty` travels in the request body.
    pub fn is_body_type(&self, ty: &TypeRef) -> bool {
        let name = match ty {
            TypeRef::Array { .. } => return true,
            TypeRef::Named { name, .. } => name,
        };
        if let Some(id) = builtin::from_str(name) {
            return builtin::placement(id) == Placement::Body;
        }
        match self.type_kind(name) {
            Some(TypeKind::Struct) => true,
            Some(TypeKind::Scalar { body }) => body,
            Some(TypeKind::Enum) | None => false,
        }
    }

    /// Compile the route of one function, if it has one.
    ///
    /// ## Errors
    /// Returns a [`CompileError::Route`] qualified with `iface.fun`.
    pub fn compile_fun(&self, iface: &str, fun: &Fun) -> Result<Option<RouteInfo>, CompileError> {
        let route_error = |kind| CompileError::Route {
            iface: iface.to_string(),
            fun: fun.name.clone(),
            kind,
        };

        let Some(value) = fun.comments.sem_comment(ROUTE_KEY) else {
            return Ok(None);
        };
        let route = value.as_str().ok_or_else(|| route_error(RouteErrorKind::NotAString))?;
        let (method, path, path_params) = parse_route(route, self.style).map_err(route_error)?;
        let params_in = self.classify(&fun.params, &path_params).map_err(route_error)?;

        Ok(Some(RouteInfo {
            method,
            path,
            params_in,
        }))
    }

    /// Assign a position to every parameter, in declaration order.
    pub fn classify(
        &self,
        params: &[Param],
        path_params: &[String],
    ) -> Result<IndexMap<String, Position>, RouteErrorKind> {
        let mut unsatisfied: IndexSet<&str> = path_params.iter().map(String::as_str).collect();
        let mut params_in = IndexMap::new();
        let mut body = Vec::new();

        for param in params {
            let position = if unsatisfied.shift_remove(param.name.as_str()) {
                if param.ty.nullable() {
                    return Err(RouteErrorKind::NullablePathParam(param.name.clone()));
                }
                Position::Path
            } else if self.is_body_type(&param.ty) {
                body.push(param.name.clone());
                Position::Body
            } else {
                Position::Query
            };
            params_in.insert(param.name.clone(), position);
        }

        if body.len() > 1 {
            return Err(RouteErrorKind::MultipleBody(body));
        }
        if !unsatisfied.is_empty() {
            return Err(RouteErrorKind::UndefinedPathParams(
                unsatisfied.into_iter().map(str::to_string).collect(),
            ));
        }
        Ok(params_in)
    }

    /// Parameters of a routed function paired with their positions, in declaration order.
    ///
    /// Returns an empty list for functions without a route.
    pub fn route_params(fun: &Fun) -> Vec<(&Param, Position)> {
        let Some(route) = &fun.route else {
            return Vec::new();
        };
        fun.params
            .iter()
            .filter_map(|p| route.params_in.get(&p.name).map(|pos| (p, *pos)))
            .collect()
    }
}

/// Compile every `@route` annotation in `schema` and record the result on its function.
///
/// ## Errors
/// Stops at the first function whose route does not compile.
#[tracing::instrument(skip_all, fields(style = ?style))]
pub fn compile_routes(schema: &mut Schema, style: PathStyle) -> Result<(), CompileError> {
    let compiler = RouteCompiler::new(schema, style);
    let mut routed = 0usize;
    for group in &mut schema.groups {
        for iface in &mut group.ifaces {
            let iface_name = &iface.name;
            for fun in &mut iface.funs {
                fun.route = compiler.compile_fun(iface_name, fun)?;
                if let Some(route) = &fun.route {
                    routed += 1;
                    tracing::debug!(method = %route.method, path = %route.path, "{iface_name}.{}", fun.name);
                }
            }
        }
    }
    tracing::debug!(routed, "compiled routes");
    Ok(())
}

// ============================================================================
// Route strings
// ============================================================================

/// Rewrite the placeholders of `path` in `style` and collect their names in path order.
///
/// Segments that are not `:name` or `{name}` (including `*rest` wildcards) are kept as written.
pub fn parse_path(path: &str, style: PathStyle) -> (String, Vec<String>) {
    let mut params = Vec::new();
    let rendered = path
        .split('/')
        .map(|segment| match placeholder_name(segment) {
            Some(name) => {
                params.push(name.to_string());
                style.placeholder(name)
            }
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/");
    (rendered, params)
}

/// Split a route annotation (`get /users/:id`) into method, styled path and path params.
///
/// ## Errors
/// Returns [`RouteErrorKind::InvalidRoute`] if the annotation does not start with a known HTTP
/// method followed by a path.
pub fn parse_route(route: &str, style: PathStyle) -> Result<(HttpMethodId, String, Vec<String>), RouteErrorKind> {
    let invalid = || RouteErrorKind::InvalidRoute(route.to_string());
    let caps = ROUTE.captures(route).ok_or_else(invalid)?;
    let method = http::from_str(&caps[1]).ok_or_else(invalid)?;
    let (path, params) = parse_path(&caps[2], style);
    Ok((method, path, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::parser::parse_unit;

    fn compile_str(source: &str, style: PathStyle) -> Result<Schema, CompileError> {
        let mut schema = parse_unit("route.api", source).expect("fixture parses");
        compile_routes(&mut schema, style)?;
        Ok(schema)
    }

    fn positions(schema: &Schema, fun: &str) -> Vec<(String, Position)> {
        let (_, fun) = schema.funs().find(|(_, f)| f.name == fun).expect("function exists");
        let route = fun.route.as_ref().expect("function is routed");
        route.params_in.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }

    const USERS: &str = r#"
group users
struct User {
  name: string
}
enum Role {
  ADMIN
}
scalar DateTime
# @route.in body
scalar Blob
interface UserController {
  # @route put /users/:id
  updateUser(id: int, u: User, tag: string): User

  # @route GET /users/{id}/roles
  listRoles(id: int, role: Role, since: DateTime, limit: int?): [Role]

  # @route post /blobs
  upload(b: Blob)

  ping()
}
"#;

    #[test]
    fn test_update_user_classification() {
        let schema = compile_str(USERS, PathStyle::Colon).unwrap();
        assert_eq!(
            positions(&schema, "updateUser"),
            vec![
                ("id".to_string(), Position::Path),
                ("u".to_string(), Position::Body),
                ("tag".to_string(), Position::Query),
            ]
        );
    }

    #[test]
    fn test_enum_and_plain_scalar_are_query() {
        let schema = compile_str(USERS, PathStyle::Colon).unwrap();
        let (_, fun) = schema.funs().find(|(_, f)| f.name == "listRoles").unwrap();
        let route = fun.route.as_ref().unwrap();
        assert_eq!(route.method, HttpMethodId::Get);
        assert_eq!(route.path, "/users/:id/roles");
        assert_eq!(route.params_in["role"], Position::Query);
        assert_eq!(route.params_in["since"], Position::Query);
        assert_eq!(route.params_in["limit"], Position::Query);
    }

    #[test]
    fn test_scalar_marked_body() {
        let schema = compile_str(USERS, PathStyle::Colon).unwrap();
        assert_eq!(positions(&schema, "upload"), vec![("b".to_string(), Position::Body)]);
    }

    #[test]
    fn test_unannotated_function_is_unrouted() {
        let schema = compile_str(USERS, PathStyle::Colon).unwrap();
        let (_, ping) = schema.funs().find(|(_, f)| f.name == "ping").unwrap();
        assert!(ping.route.is_none());
        assert!(RouteCompiler::route_params(ping).is_empty());
    }

    #[test]
    fn test_brace_style_output() {
        let schema = compile_str(USERS, PathStyle::Brace).unwrap();
        let (_, fun) = schema.funs().find(|(_, f)| f.name == "updateUser").unwrap();
        assert_eq!(fun.route.as_ref().unwrap().path, "/users/{id}");
    }

    #[test]
    fn test_nullable_path_param() {
        let source = "group g\ninterface I {\n  # @route get /users/:id\n  getUser(id: int?)\n}\n";
        let err = compile_str(source, PathStyle::Colon).unwrap_err();
        assert_eq!(err.to_string(), "Function [I.getUser] has nullable path param [id]");
    }

    #[test]
    fn test_multiple_body_params() {
        let source = r#"
group g
struct User {
  name: string
}
interface I {
  # @route put /users/:id
  f(id: int, a: User, b: [int])
}
"#;
        let err = compile_str(source, PathStyle::Colon).unwrap_err();
        assert_eq!(err.to_string(), "Function [I.f] has more than one body param [a, b]");
    }

    #[test]
    fn test_undefined_path_params_in_path_order() {
        let source = "group g\ninterface I {\n  # @route get /a/:x/b/{y}/c/:id\n  f(id: int)\n}\n";
        let err = compile_str(source, PathStyle::Colon).unwrap_err();
        assert_eq!(err.to_string(), "Function [I.f] has undefined path params [x, y]");
    }

    #[test]
    fn test_invalid_route() {
        let source = "group g\ninterface I {\n  # @route fetch /users\n  f()\n}\n";
        let err = compile_str(source, PathStyle::Colon).unwrap_err();
        assert_eq!(err.to_string(), "Function [I.f] has invalid route [fetch /users]");
    }

    #[test]
    fn test_repeated_route_is_not_a_string() {
        let source = "group g\ninterface I {\n  # @route get /a\n  # @route get /b\n  f()\n}\n";
        let err = compile_str(source, PathStyle::Colon).unwrap_err();
        assert!(matches!(
            err,
            CompileError::Route {
                kind: RouteErrorKind::NotAString,
                ..
            }
        ));
    }

    #[test]
    fn test_route_params_pairs_in_declaration_order() {
        let schema = compile_str(USERS, PathStyle::Colon).unwrap();
        let (_, fun) = schema.funs().find(|(_, f)| f.name == "updateUser").unwrap();
        let pairs: Vec<_> = RouteCompiler::route_params(fun)
            .into_iter()
            .map(|(p, pos)| format!("{}:{pos}", p.name))
            .collect();
        assert_eq!(pairs, ["id:path", "u:body", "tag:query"]);
    }

    #[test]
    fn test_is_body_type() {
        let schema = parse_unit("t.api", USERS).unwrap();
        let compiler = RouteCompiler::new(&schema, PathStyle::Colon);
        assert!(compiler.is_body_type(&TypeRef::array(TypeRef::named("int"))));
        assert!(compiler.is_body_type(&TypeRef::named("object")));
        assert!(compiler.is_body_type(&TypeRef::named("any")));
        assert!(compiler.is_body_type(&TypeRef::named("User")));
        assert!(compiler.is_body_type(&TypeRef::named("Blob")));
        assert!(!compiler.is_body_type(&TypeRef::named("boolean")));
        assert!(!compiler.is_body_type(&TypeRef::named("Role")));
        assert!(!compiler.is_body_type(&TypeRef::named("DateTime")));
    }

    #[test]
    fn test_parse_path_accepts_both_spellings() {
        let (path, params) = parse_path("/users/:id/posts/{postId}", PathStyle::Brace);
        assert_eq!(path, "/users/{id}/posts/{postId}");
        assert_eq!(params, ["id", "postId"]);
    }

    #[test]
    fn test_parse_path_keeps_wildcards_literal() {
        let (path, params) = parse_path("/static/*rest", PathStyle::Colon);
        assert_eq!(path, "/static/*rest");
        assert!(params.is_empty());
    }

    #[test]
    fn test_parse_route_method_is_case_insensitive() {
        let (method, path, params) = parse_route("  Delete /items/:id ", PathStyle::Colon).unwrap();
        assert_eq!(method, HttpMethodId::Delete);
        assert_eq!(path, "/items/:id");
        assert_eq!(params, ["id"]);
    }
}
