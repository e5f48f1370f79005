//! Declared-state extractor.
//!
//! Finds the `data` function of the `export default` component description
//! and lists the keys of the object literal it returns:
//!
//! ```js
//! export default {
//!   data() {
//!     return { count: 0, label: '' }   // -> count, label
//!   }
//! }
//! ```
//!
//! Anything that deviates from this shape yields no keys rather than an error.

use swc_common::{SourceMap, Span};
use swc_ecma_ast::{
    BlockStmt, BlockStmtOrExpr, Callee, Expr, ExportDefaultExpr, Function, MemberProp, ObjectLit,
    Prop, PropName, PropOrSpread, Stmt,
};
use swc_ecma_visit::Visit;

use crate::core::{
    SourceContext, SourceLocation,
    analysis::node::skip_transparent,
};

/// Name of the component option that declares reactive state.
pub const STATE_DECLARATION_KEY: &str = "data";

/// Wrappers whose first argument is the component description.
const DEFINE_COMPONENT: &str = "defineComponent";
const EXTEND: &str = "extend";

/// One key of the object returned by `data()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredStateKey {
    pub name: String,
    pub context: SourceContext,
}

enum DataBody<'a> {
    Block(&'a BlockStmt),
    Expr(&'a Expr),
}

struct DeclaredStateCollector<'a> {
    source_map: &'a SourceMap,
    file_path: &'a str,
    keys: Vec<DeclaredStateKey>,
}

impl Visit for DeclaredStateCollector<'_> {
    fn visit_export_default_expr(&mut self, node: &ExportDefaultExpr) {
        let Some(component) = component_object(&node.expr) else {
            return;
        };
        let Some(body) = data_body(component) else {
            return;
        };
        for object in returned_objects(body) {
            self.collect_keys(object);
        }
    }
}

impl DeclaredStateCollector<'_> {
    fn collect_keys(&mut self, object: &ObjectLit) {
        for prop in &object.props {
            // Spread elements carry no statically known key.
            let PropOrSpread::Prop(prop) = prop else {
                continue;
            };
            let key = match &**prop {
                Prop::Shorthand(ident) => Some((ident.sym.as_str(), ident.span)),
                Prop::KeyValue(kv) => ident_key(&kv.key),
                Prop::Method(method) => ident_key(&method.key),
                Prop::Getter(getter) => ident_key(&getter.key),
                Prop::Setter(setter) => ident_key(&setter.key),
                Prop::Assign(_) => None,
            };
            if let Some((name, span)) = key {
                let context = self.context(span);
                self.keys.push(DeclaredStateKey {
                    name: name.to_string(),
                    context,
                });
            }
        }
    }

    fn context(&self, span: Span) -> SourceContext {
        let loc = self.source_map.lookup_char_pos(span.lo);
        let source_line = loc
            .file
            .get_line(loc.line - 1)
            .map(|cow| cow.to_string())
            .unwrap_or_default();
        SourceContext::new(
            SourceLocation::new(self.file_path, loc.line, loc.col_display + 1),
            source_line,
        )
    }
}

/// Only plain identifier keys name state; string, numeric and computed keys
/// are skipped.
fn ident_key(key: &PropName) -> Option<(&str, Span)> {
    match key {
        PropName::Ident(ident) => Some((ident.sym.as_str(), ident.span)),
        _ => None,
    }
}

/// The component description: an object literal, or the first argument of
/// `defineComponent(..)` / `Vue.extend(..)`.
fn component_object(expr: &Expr) -> Option<&ObjectLit> {
    match skip_transparent(expr) {
        Expr::Object(object) => Some(object),
        Expr::Call(call) => {
            let Callee::Expr(callee) = &call.callee else {
                return None;
            };
            let is_wrapper = match skip_transparent(callee) {
                Expr::Ident(ident) => ident.sym.as_str() == DEFINE_COMPONENT,
                Expr::Member(member) => {
                    matches!(&member.prop, MemberProp::Ident(prop) if prop.sym.as_str() == EXTEND)
                }
                _ => false,
            };
            if !is_wrapper {
                return None;
            }
            match skip_transparent(&call.args.first()?.expr) {
                Expr::Object(object) => Some(object),
                _ => None,
            }
        }
        _ => None,
    }
}

fn data_body(component: &ObjectLit) -> Option<DataBody<'_>> {
    component.props.iter().find_map(|prop| {
        let PropOrSpread::Prop(prop) = prop else {
            return None;
        };
        match &**prop {
            Prop::Method(method) if is_data_key(&method.key) => function_body(&method.function),
            Prop::KeyValue(kv) if is_data_key(&kv.key) => match skip_transparent(&kv.value) {
                Expr::Fn(fn_expr) => function_body(&fn_expr.function),
                Expr::Arrow(arrow) => match &*arrow.body {
                    BlockStmtOrExpr::BlockStmt(block) => Some(DataBody::Block(block)),
                    BlockStmtOrExpr::Expr(expr) => Some(DataBody::Expr(expr)),
                },
                _ => None,
            },
            _ => None,
        }
    })
}

fn is_data_key(key: &PropName) -> bool {
    matches!(key, PropName::Ident(ident) if ident.sym.as_str() == STATE_DECLARATION_KEY)
}

fn function_body(function: &Function) -> Option<DataBody<'_>> {
    function.body.as_ref().map(DataBody::Block)
}

/// Object literals returned at the top level of the `data` body.
fn returned_objects(body: DataBody<'_>) -> Vec<&ObjectLit> {
    fn as_object(expr: &Expr) -> Option<&ObjectLit> {
        match skip_transparent(expr) {
            Expr::Object(object) => Some(object),
            _ => None,
        }
    }

    match body {
        DataBody::Expr(expr) => as_object(expr).into_iter().collect(),
        DataBody::Block(block) => block
            .stmts
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::Return(ret) => ret.arg.as_deref().and_then(as_object),
                _ => None,
            })
            .collect(),
    }
}

/// Collect the declared state keys of a parsed component script.
pub fn extract_declared_state(
    module: &swc_ecma_ast::Module,
    source_map: &SourceMap,
    file_path: &str,
) -> Vec<DeclaredStateKey> {
    use swc_ecma_visit::VisitWith;

    let mut collector = DeclaredStateCollector {
        source_map,
        file_path,
        keys: Vec::new(),
    };
    module.visit_with(&mut collector);
    collector.keys
}
