use crate::{Node, SyntaxKind};

pub fn is_identifier(node: &Node) -> bool {
    node.kind() == SyntaxKind::Identifier
}

pub fn is_expression(node: &Node) -> bool {
    matches!(
        node.kind(),
        SyntaxKind::Identifier
            | SyntaxKind::Literal
            | SyntaxKind::TemplateLiteral
            | SyntaxKind::TaggedTemplateExpression
            | SyntaxKind::ThisExpression
            | SyntaxKind::ArrayExpression
            | SyntaxKind::ObjectExpression
            | SyntaxKind::FunctionExpression
            | SyntaxKind::ArrowFunctionExpression
            | SyntaxKind::ClassExpression
            | SyntaxKind::UnaryExpression
            | SyntaxKind::UpdateExpression
            | SyntaxKind::BinaryExpression
            | SyntaxKind::LogicalExpression
            | SyntaxKind::AssignmentExpression
            | SyntaxKind::ConditionalExpression
            | SyntaxKind::CallExpression
            | SyntaxKind::OptionalCallExpression
            | SyntaxKind::NewExpression
            | SyntaxKind::MemberExpression
            | SyntaxKind::OptionalMemberExpression
            | SyntaxKind::ChainExpression
            | SyntaxKind::SequenceExpression
            | SyntaxKind::AwaitExpression
            | SyntaxKind::YieldExpression
            | SyntaxKind::ImportExpression
            | SyntaxKind::MetaProperty
            | SyntaxKind::TypeCastExpression
            | SyntaxKind::AsExpression
            | SyntaxKind::AsConstExpression
            | SyntaxKind::JSXElement
            | SyntaxKind::JSXFragment
    )
}
