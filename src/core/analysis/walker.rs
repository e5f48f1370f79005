//! Expression usage walker.
//!
//! Visits markup-bound expressions and records every state name they
//! reference. Traversal uses an explicit work stack over borrowed nodes, so
//! expression depth is bounded by heap, not by the call stack.

use std::collections::HashSet;

use swc_ecma_ast::{
    ArrayLit, Expr, ExprOrSpread, MemberExpr, MemberProp, ObjectLit, Prop, PropOrSpread,
};

use crate::core::analysis::node::{Classified, ExpressionNode, MarkupExpression, skip_transparent};

/// Root identifiers of property chains that are never component state.
pub const GLOBAL_ALLOW_LIST: [&str; 3] = ["JSON", "Object", "Array"];

/// Names referenced by the markup of one component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageSet(HashSet<String>);

impl UsageSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.0.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Leftmost base of a property-access chain.
pub struct ChainRoot<'a> {
    /// The first node that is not a property access (`foo` in `foo.a[b].c`).
    pub base: &'a Expr,
    /// Computed keys met along the chain (`b` in `foo.a[b].c`), outermost first.
    pub computed: Vec<&'a Expr>,
}

/// Follow the object side of `member` until a non-member node is reached.
///
/// Parentheses, TypeScript wrappers and optional chaining are looked through.
pub fn chain_root(member: &MemberExpr) -> ChainRoot<'_> {
    let mut computed = Vec::new();
    let mut current = member;
    loop {
        if let MemberProp::Computed(key) = &current.prop {
            computed.push(&*key.expr);
        }
        match as_member(&current.obj) {
            Some(next) => current = next,
            None => {
                return ChainRoot {
                    base: skip_transparent(&current.obj),
                    computed,
                };
            }
        }
    }
}

fn as_member(expr: &Expr) -> Option<&MemberExpr> {
    match ExpressionNode::classify(expr) {
        Classified::Node(ExpressionNode::PropertyAccess(member)) => Some(member),
        _ => None,
    }
}

/// Accumulates the [`UsageSet`] for one component.
///
/// Feed it every markup expression with [`UsageWalker::walk`], then take the
/// result with [`UsageWalker::into_usages`].
#[derive(Default)]
pub struct UsageWalker<'a> {
    usages: UsageSet,
    stack: Vec<ExpressionNode<'a>>,
}

impl<'a> UsageWalker<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the names used by one markup expression.
    ///
    /// Returns the kinds of every sub-expression outside the supported set;
    /// those subtrees are not traversed.
    pub fn walk(&mut self, expression: &'a MarkupExpression) -> Vec<&'static str> {
        let mut unsupported = Vec::new();
        self.push(expression.classify(), &mut unsupported);
        self.drain(&mut unsupported);
        unsupported
    }

    /// Record the names used by an optional node. `None` is a no-op.
    pub fn walk_node(&mut self, node: Option<ExpressionNode<'a>>) -> Vec<&'static str> {
        let mut unsupported = Vec::new();
        if let Some(node) = node {
            self.stack.push(node);
            self.drain(&mut unsupported);
        }
        unsupported
    }

    pub fn usages(&self) -> &UsageSet {
        &self.usages
    }

    pub fn into_usages(self) -> UsageSet {
        self.usages
    }

    fn drain(&mut self, unsupported: &mut Vec<&'static str>) {
        while let Some(node) = self.stack.pop() {
            self.visit(node, unsupported);
        }
    }

    fn push(&mut self, classified: Classified<'a>, unsupported: &mut Vec<&'static str>) {
        match classified {
            Classified::Node(node) => self.stack.push(node),
            Classified::Leaf => {}
            Classified::Unsupported(kind) => unsupported.push(kind),
        }
    }

    fn push_expr(&mut self, expr: &'a Expr, unsupported: &mut Vec<&'static str>) {
        self.push(ExpressionNode::classify(expr), unsupported);
    }

    fn push_args(&mut self, args: &'a [ExprOrSpread], unsupported: &mut Vec<&'static str>) {
        for arg in args {
            self.push_expr(&arg.expr, unsupported);
        }
    }

    fn visit(&mut self, node: ExpressionNode<'a>, unsupported: &mut Vec<&'static str>) {
        match node {
            ExpressionNode::Identifier(ident) => self.usages.insert(ident.sym.as_str()),
            ExpressionNode::PropertyAccess(member) => self.visit_member(member, unsupported),
            ExpressionNode::ArrayLiteral(ArrayLit { elems, .. }) => {
                // Holes are `None`.
                for elem in elems.iter().flatten() {
                    self.push_expr(&elem.expr, unsupported);
                }
            }
            ExpressionNode::UnaryOp(unary) => self.push_expr(&unary.arg, unsupported),
            ExpressionNode::Call { callee, arguments } => {
                if let Some(callee) = callee {
                    self.push_expr(callee, unsupported);
                }
                self.push_args(arguments, unsupported);
            }
            ExpressionNode::BinaryOp(bin) | ExpressionNode::LogicalOp(bin) => {
                self.push_expr(&bin.left, unsupported);
                self.push_expr(&bin.right, unsupported);
            }
            ExpressionNode::Conditional(cond) => {
                self.push_expr(&cond.test, unsupported);
                self.push_expr(&cond.cons, unsupported);
                self.push_expr(&cond.alt, unsupported);
            }
            ExpressionNode::TemplateString(tpl) => {
                for expr in &tpl.exprs {
                    self.push_expr(expr, unsupported);
                }
            }
            ExpressionNode::FilterSequence(sequence) => {
                self.push_expr(&sequence.expression, unsupported);
                for filter in &sequence.filters {
                    match &filter.arguments {
                        Some(arguments) => self.push_args(arguments, unsupported),
                        None => self.push_expr(&filter.callee, unsupported),
                    }
                }
            }
            ExpressionNode::ObjectLiteral(object) => self.visit_object(object, unsupported),
            ExpressionNode::IterationBinding(binding) => {
                self.push_expr(&binding.collection, unsupported);
            }
        }
    }

    fn visit_member(&mut self, member: &'a MemberExpr, unsupported: &mut Vec<&'static str>) {
        if let Classified::Node(call @ ExpressionNode::Call { .. }) =
            ExpressionNode::classify(&member.obj)
        {
            // `fetch().data`: the call carries the usages, not a chain root.
            self.stack.push(call);
            if let MemberProp::Computed(key) = &member.prop {
                self.push_expr(&key.expr, unsupported);
            }
            return;
        }

        let root = chain_root(member);
        for key in root.computed {
            self.push_expr(key, unsupported);
        }
        match root.base {
            Expr::Ident(ident) => {
                let name = ident.sym.as_str();
                if !GLOBAL_ALLOW_LIST.contains(&name) {
                    self.usages.insert(name);
                }
            }
            other => self.push_expr(other, unsupported),
        }
    }

    fn visit_object(&mut self, object: &'a ObjectLit, unsupported: &mut Vec<&'static str>) {
        for prop in &object.props {
            match prop {
                PropOrSpread::Prop(prop) => match &**prop {
                    Prop::KeyValue(kv) => self.push_expr(&kv.value, unsupported),
                    Prop::Shorthand(ident) => self.usages.insert(ident.sym.as_str()),
                    Prop::Assign(assign) => self.push_expr(&assign.value, unsupported),
                    Prop::Getter(_) | Prop::Setter(_) | Prop::Method(_) => {}
                },
                PropOrSpread::Spread(_) => {}
            }
        }
    }
}

/// Walk every expression into one fresh [`UsageSet`].
pub fn collect_usages<'a, I>(expressions: I) -> (UsageSet, Vec<&'static str>)
where
    I: IntoIterator<Item = &'a MarkupExpression>,
{
    let mut walker = UsageWalker::new();
    let mut unsupported = Vec::new();
    for expression in expressions {
        unsupported.extend(walker.walk(expression));
    }
    (walker.into_usages(), unsupported)
}
