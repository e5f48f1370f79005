//! Expression node model for markup-bound expressions.
//!
//! Plain JavaScript expressions come straight from swc. The two Vue-only
//! constructs, filter sequences (`value | filter(arg)`) and iteration
//! bindings (`item in items`), are represented by [`FilterSequence`] and
//! [`IterationBinding`], built by the binding parser.
//!
//! [`ExpressionNode`] is the closed set of kinds the usage walker
//! understands. It only borrows parser-owned nodes.

use swc_ecma_ast::{
    ArrayLit, BinExpr, BinaryOp, Callee, CondExpr, Expr, ExprOrSpread, Ident, MemberExpr,
    ObjectLit, OptChainBase, Tpl, UnaryExpr,
};

/// One `| name` or `| name(args)` stage of a filter sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// The filter name expression (`currency` in `| currency('$')`).
    pub callee: Box<Expr>,
    /// `None` for a bare name (`| upper`), `Some` when written as a call.
    pub arguments: Option<Vec<ExprOrSpread>>,
}

/// `value | f1 | f2(arg)`: a base expression piped through filters.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSequence {
    pub expression: Box<Expr>,
    pub filters: Vec<Filter>,
}

/// The `v-for` construct: `alias in collection`.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationBinding {
    /// Loop-local alias text, e.g. `item` or `(item, index)`.
    pub alias: String,
    pub collection: Box<Expr>,
}

/// A parsed markup-bound expression, ready for the usage walker.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupExpression {
    Expression(Box<Expr>),
    Filters(FilterSequence),
    Iteration(IterationBinding),
}

/// Closed set of expression kinds handled by the usage walker.
#[derive(Debug, Clone, Copy)]
pub enum ExpressionNode<'a> {
    Identifier(&'a Ident),
    PropertyAccess(&'a MemberExpr),
    ArrayLiteral(&'a ArrayLit),
    UnaryOp(&'a UnaryExpr),
    Call {
        /// `None` for `super(..)` and `import(..)` callees.
        callee: Option<&'a Expr>,
        arguments: &'a [ExprOrSpread],
    },
    BinaryOp(&'a BinExpr),
    Conditional(&'a CondExpr),
    TemplateString(&'a Tpl),
    FilterSequence(&'a FilterSequence),
    LogicalOp(&'a BinExpr),
    ObjectLiteral(&'a ObjectLit),
    IterationBinding(&'a IterationBinding),
}

/// Result of mapping a swc expression onto [`ExpressionNode`].
#[derive(Debug, Clone, Copy)]
pub enum Classified<'a> {
    Node(ExpressionNode<'a>),
    /// Literals and `this`: nothing inside can name component state.
    Leaf,
    /// A kind outside the closed set; the walker records it as a blind spot.
    Unsupported(&'static str),
}

impl<'a> ExpressionNode<'a> {
    pub fn classify(expr: &'a Expr) -> Classified<'a> {
        let node = match skip_transparent(expr) {
            Expr::Ident(ident) => ExpressionNode::Identifier(ident),
            Expr::Member(member) => ExpressionNode::PropertyAccess(member),
            Expr::OptChain(chain) => match &*chain.base {
                OptChainBase::Member(member) => ExpressionNode::PropertyAccess(member),
                OptChainBase::Call(call) => ExpressionNode::Call {
                    callee: Some(&*call.callee),
                    arguments: &call.args,
                },
            },
            Expr::Array(array) => ExpressionNode::ArrayLiteral(array),
            Expr::Unary(unary) => ExpressionNode::UnaryOp(unary),
            Expr::Call(call) => ExpressionNode::Call {
                callee: match &call.callee {
                    Callee::Expr(callee) => Some(&**callee),
                    Callee::Super(_) | Callee::Import(_) => None,
                },
                arguments: &call.args,
            },
            Expr::Bin(bin) if is_logical(bin.op) => ExpressionNode::LogicalOp(bin),
            Expr::Bin(bin) => ExpressionNode::BinaryOp(bin),
            Expr::Cond(cond) => ExpressionNode::Conditional(cond),
            Expr::Tpl(tpl) => ExpressionNode::TemplateString(tpl),
            Expr::Object(object) => ExpressionNode::ObjectLiteral(object),
            Expr::Lit(_) | Expr::This(_) => return Classified::Leaf,
            other => return Classified::Unsupported(unsupported_kind(other)),
        };
        Classified::Node(node)
    }
}

impl MarkupExpression {
    /// Top-level node of this expression as seen by the walker.
    pub fn classify(&self) -> Classified<'_> {
        match self {
            MarkupExpression::Expression(expr) => ExpressionNode::classify(expr),
            MarkupExpression::Filters(sequence) => {
                Classified::Node(ExpressionNode::FilterSequence(sequence))
            }
            MarkupExpression::Iteration(binding) => {
                Classified::Node(ExpressionNode::IterationBinding(binding))
            }
        }
    }
}

fn is_logical(op: BinaryOp) -> bool {
    matches!(
        op,
        BinaryOp::LogicalAnd | BinaryOp::LogicalOr | BinaryOp::NullishCoalescing
    )
}

/// Strip parentheses and TypeScript-only wrappers (`x!`, `x as T`, ...).
///
/// None of them change which names an expression references.
pub fn skip_transparent(mut expr: &Expr) -> &Expr {
    loop {
        expr = match expr {
            Expr::Paren(paren) => &*paren.expr,
            Expr::TsAs(as_expr) => &*as_expr.expr,
            Expr::TsNonNull(non_null) => &*non_null.expr,
            Expr::TsSatisfies(satisfies) => &*satisfies.expr,
            Expr::TsConstAssertion(assertion) => &*assertion.expr,
            Expr::TsTypeAssertion(assertion) => &*assertion.expr,
            Expr::TsInstantiation(instantiation) => &*instantiation.expr,
            _ => return expr,
        };
    }
}

/// Human readable name for expression kinds outside the closed set.
fn unsupported_kind(expr: &Expr) -> &'static str {
    match expr {
        Expr::Fn(_) => "function expression",
        Expr::Arrow(_) => "arrow function",
        Expr::New(_) => "new expression",
        Expr::Seq(_) => "sequence expression",
        Expr::Assign(_) => "assignment",
        Expr::Update(_) => "update expression",
        Expr::TaggedTpl(_) => "tagged template",
        Expr::Await(_) => "await expression",
        Expr::Yield(_) => "yield expression",
        Expr::Class(_) => "class expression",
        Expr::MetaProp(_) => "meta property",
        Expr::SuperProp(_) => "super property",
        Expr::PrivateName(_) => "private name",
        _ => "expression",
    }
}
