use std::cell::RefCell;

use derive_builder::Builder;
use id_arena::Id;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    build_code_frame, build_diagnostic_comment_value, unsupported_feature_message, AstArena,
    Comment, CommentKind, ExpectedTranslationError, HasArena, Node, NodeFactory, ScopeManager,
    SyntaxKind, TSTypeAliasDeclaration, TranslationError, TypeAlias, UnexpectedTranslationError,
};

/// Where lowered enums find their runtime helpers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeHelperImport {
    pub module: String,
    pub name: String,
}

#[derive(Builder, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[builder(default, setter(into))]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationOptions {
    /// Replace untranslatable constructs with annotated placeholders instead
    /// of failing.
    pub recover_from_errors: bool,
    pub runtime_helper_import: Option<RuntimeHelperImport>,
}

/// The translated program together with the diagnostic comments attached to
/// its placeholder nodes.
#[derive(Debug)]
pub struct TranslationResult {
    pub program: Id<Node>,
    pub code: String,
    pub comments: Vec<Comment>,
}

/// Per-call state shared by every step of one translation.
pub struct TranslationContext<'a> {
    pub arena: &'a AstArena,
    pub factory: NodeFactory<'a>,
    pub code: &'a str,
    pub scope_manager: &'a ScopeManager,
    pub options: &'a TranslationOptions,
    comments: RefCell<Vec<Comment>>,
    counters: RefCell<IndexMap<&'static str, usize>>,
}

impl<'a> TranslationContext<'a> {
    pub fn new(
        arena: &'a AstArena,
        code: &'a str,
        scope_manager: &'a ScopeManager,
        options: &'a TranslationOptions,
    ) -> Self {
        Self {
            arena,
            factory: NodeFactory::new(arena),
            code,
            scope_manager,
            options,
            comments: Default::default(),
            counters: Default::default(),
        }
    }

    pub fn recover_from_errors(&self) -> bool {
        self.options.recover_from_errors
    }

    /// Returns 1, 2, 3, ... for successive calls with the same `name`.
    pub fn next_counter(&self, name: &'static str) -> usize {
        let mut counters = self.counters.borrow_mut();
        let counter = counters.entry(name).or_insert(0);
        *counter += 1;
        *counter
    }

    pub fn expected_error(&self, node: Id<Node>, message: impl Into<String>) -> TranslationError {
        ExpectedTranslationError::new(message, self.range_of(node), self.code).into()
    }

    pub fn unexpected_error(&self, node: Id<Node>, message: impl Into<String>) -> TranslationError {
        UnexpectedTranslationError::new(message, self.range_of(node), self.code).into()
    }

    /// Attaches a block comment rendering `source`'s code frame to `target`.
    pub fn add_diagnostic_comment(&self, source: Id<Node>, target: Id<Node>, message: &str) {
        let code_frame = build_code_frame(self.code, self.range_of(source), message);
        self.comments.borrow_mut().push(Comment {
            kind: CommentKind::Block,
            value: build_diagnostic_comment_value(&code_frame),
            node: target,
        });
    }

    pub fn add_comment(&self, comment: Comment) {
        self.comments.borrow_mut().push(comment);
    }

    pub fn into_result(self, program: Id<Node>) -> TranslationResult {
        TranslationResult {
            program,
            code: self.code.to_owned(),
            comments: self.comments.into_inner(),
        }
    }

    /// `$FlowFixMe` in recover mode, otherwise an expected error.
    pub fn flow_fix_me_or_error(
        &self,
        node: Id<Node>,
        message: &str,
    ) -> Result<Id<Node>, TranslationError> {
        if !self.recover_from_errors() {
            return Err(self.expected_error(node, message));
        }
        debug!(message, "substituting $FlowFixMe");
        Ok(self.factory.create_generic_type_annotation("$FlowFixMe", None))
    }

    /// A placeholder type of the target type system (`any`), or an expected
    /// error in strict mode.
    pub fn unsupported_annotation(
        &self,
        node: Id<Node>,
        thing: &str,
        placeholder_kind: SyntaxKind,
    ) -> Result<Id<Node>, TranslationError> {
        let message = unsupported_feature_message(thing);
        if !self.recover_from_errors() {
            return Err(self.expected_error(node, message));
        }
        debug!(thing, "replacing unsupported annotation with a placeholder");
        let placeholder = self.factory.create_keyword(placeholder_kind);
        self.add_diagnostic_comment(node, placeholder, &message);
        Ok(placeholder)
    }

    /// `type Name<...> = any` in the TS dialect, keeping the declared name
    /// visible to later references.
    pub fn unsupported_ts_declaration(
        &self,
        node: Id<Node>,
        thing: &str,
        id: Id<Node>,
        declare: bool,
        type_parameters: Option<Id<Node>>,
    ) -> Result<Id<Node>, TranslationError> {
        let message = unsupported_feature_message(thing);
        if !self.recover_from_errors() {
            return Err(self.expected_error(node, message));
        }
        debug!(thing, "replacing unsupported declaration with an alias");
        let type_annotation = self.factory.create_keyword(SyntaxKind::TSAnyKeyword);
        let alias = self.factory.create(TSTypeAliasDeclaration {
            id,
            type_parameters,
            type_annotation,
            declare,
        });
        self.add_diagnostic_comment(node, alias, &message);
        Ok(alias)
    }

    /// `type Name<...> = any` in the Flow dialect.
    pub fn unsupported_flow_declaration(
        &self,
        node: Id<Node>,
        thing: &str,
        id: Id<Node>,
        type_parameters: Option<Id<Node>>,
    ) -> Result<Id<Node>, TranslationError> {
        let message = unsupported_feature_message(thing);
        if !self.recover_from_errors() {
            return Err(self.expected_error(node, message));
        }
        debug!(thing, "replacing unsupported declaration with an alias");
        let right = self.factory.create_keyword(SyntaxKind::AnyTypeAnnotation);
        let alias = self.factory.create(TypeAlias {
            id,
            type_parameters,
            right,
        });
        self.add_diagnostic_comment(node, alias, &message);
        Ok(alias)
    }
}

impl HasArena for TranslationContext<'_> {
    fn arena(&self) -> &AstArena {
        self.arena
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::ExistsTypeAnnotation;

    #[test]
    fn test_options_deserialize_from_camel_case() {
        let options: TranslationOptions = serde_json::from_value(json!({
            "recoverFromErrors": true,
            "runtimeHelperImport": {"module": "flow-enums-runtime", "name": "require"},
        }))
        .unwrap();
        assert_eq!(
            options,
            TranslationOptionsBuilder::default()
                .recover_from_errors(true)
                .runtime_helper_import(RuntimeHelperImport {
                    module: "flow-enums-runtime".to_owned(),
                    name: "require".to_owned(),
                })
                .build()
                .unwrap(),
        );
    }

    #[test]
    fn test_missing_options_default() {
        let options: TranslationOptions = serde_json::from_value(json!({})).unwrap();
        assert_eq!(options, TranslationOptions::default());
    }

    #[test]
    fn test_counters_are_independent() {
        let arena = AstArena::new();
        let scope_manager = ScopeManager::default();
        let options = TranslationOptions::default();
        let context = TranslationContext::new(&arena, "", &scope_manager, &options);
        assert_eq!(context.next_counter("a"), 1);
        assert_eq!(context.next_counter("a"), 2);
        assert_eq!(context.next_counter("b"), 1);
    }

    #[test]
    fn test_strict_mode_unsupported_annotation_is_an_expected_error() {
        let arena = AstArena::new();
        let scope_manager = ScopeManager::default();
        let options = TranslationOptions::default();
        let context = TranslationContext::new(&arena, "", &scope_manager, &options);
        let node = context.factory.create(ExistsTypeAnnotation {});
        let error = context
            .unsupported_annotation(node, "existential type", SyntaxKind::TSAnyKeyword)
            .unwrap_err();
        assert!(error.is_expected());
        assert_eq!(
            error.message(),
            "Unsupported feature: Translating \"existential type\" is currently not supported."
        );
    }

    #[test]
    fn test_recover_mode_attaches_one_comment() {
        let arena = AstArena::new();
        let scope_manager = ScopeManager::default();
        let options = TranslationOptions {
            recover_from_errors: true,
            ..Default::default()
        };
        let context = TranslationContext::new(&arena, "", &scope_manager, &options);
        let node = context.factory.create_keyword(SyntaxKind::EmptyTypeAnnotation);
        let placeholder = context
            .unsupported_annotation(node, "empty type", SyntaxKind::TSAnyKeyword)
            .unwrap();
        assert_eq!(arena.kind_of(placeholder), SyntaxKind::TSAnyKeyword);
        let result = context.into_result(placeholder);
        assert_eq!(result.comments.len(), 1);
        assert_eq!(result.comments[0].node, placeholder);
    }
}
