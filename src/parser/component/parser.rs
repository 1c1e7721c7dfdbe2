//! Recursive descent parser for component files
//!
//! Only the constructs that matter for style references get structure:
//! import declarations, `require` declarations and postfix member/index
//! chains. Everything else is kept as a flat token run under the root, so
//! arbitrary JS/TS/JSX parses without errors.

use super::lexer::{Lexer, Token};
use super::syntax_kind::{SyntaxKind, SyntaxNode};
use crate::parser::SyntaxError;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse component source into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens, input.len());
    parser.parse_source_file();
    parser.finish()
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    end: TextSize,
    last_significant: Option<SyntaxKind>,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            end: TextSize::new(len as u32),
            last_significant: None,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        // Look ahead, skipping trivia
        let mut idx = self.pos;
        let mut count = 0;
        while idx < self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                if count == n {
                    return self.tokens[idx].kind;
                }
                count += 1;
            }
            idx += 1;
        }
        SyntaxKind::ERROR
    }

    /// The previous significant token was a `.` or `?.`, so a name here is
    /// a property, not a base expression.
    fn after_property_access(&self) -> bool {
        matches!(
            self.last_significant,
            Some(SyntaxKind::DOT | SyntaxKind::QUESTION_DOT)
        )
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        let Some(&Token { kind, text, .. }) = self.current() else {
            return;
        };
        self.builder.token(kind.into(), text);
        if !kind.is_trivia() {
            self.last_significant = Some(kind);
        }
        self.pos += 1;
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    /// Consume trivia plus the next token if it has the given kind;
    /// leaves trailing trivia untouched otherwise.
    fn eat_after_trivia(&mut self, kind: SyntaxKind) -> bool {
        if self.nth(0) == kind {
            self.skip_trivia();
            self.bump();
            true
        } else {
            false
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| TextRange::empty(self.end));
        self.errors.push(SyntaxError::new(message, range));
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// SourceFile = Item*
    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);
        self.parse_items(None);
        self.finish_node();
    }

    /// Items up to `stop` at bracket depth zero (or end of input).
    fn parse_items(&mut self, stop: Option<SyntaxKind>) {
        let mut depth = 0usize;
        while !self.at_eof() {
            let kind = self.current_kind();
            if kind.is_trivia() {
                self.bump();
                continue;
            }
            if depth == 0 && Some(kind) == stop {
                break;
            }
            let pos_before = self.pos;
            match kind {
                SyntaxKind::L_BRACKET => {
                    depth += 1;
                    self.bump();
                }
                SyntaxKind::R_BRACKET => {
                    depth = depth.saturating_sub(1);
                    self.bump();
                }
                _ => self.parse_item(),
            }
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump();
            }
        }
    }

    /// Item = ImportDecl | RequireDecl | PostfixChain | token
    fn parse_item(&mut self) {
        let kind = self.current_kind();
        match kind {
            SyntaxKind::IMPORT_KW
                if !self.after_property_access()
                    && !matches!(self.nth(1), SyntaxKind::L_PAREN | SyntaxKind::DOT) =>
            {
                self.parse_import()
            }
            SyntaxKind::CONST_KW | SyntaxKind::LET_KW | SyntaxKind::VAR_KW
                if self.at_require_decl() =>
            {
                self.parse_require_decl()
            }
            k if k.is_name()
                && !self.after_property_access()
                && matches!(
                    self.nth(1),
                    SyntaxKind::DOT | SyntaxKind::QUESTION_DOT | SyntaxKind::L_BRACKET
                ) =>
            {
                self.parse_postfix_chain()
            }
            _ => self.bump(),
        }
    }

    /// ImportDecl = 'import' 'type'? (STRING | ImportClause 'from' STRING) ';'?
    ///
    /// ImportClause = Binding (',' (NamespaceImport | NamedImports))?
    ///              | NamespaceImport | NamedImports
    fn parse_import(&mut self) {
        self.start_node(SyntaxKind::IMPORT_DECL);
        self.bump();
        self.skip_trivia();

        // `import type X from …`, but `import type from …` binds `type`
        if self.at(SyntaxKind::TYPE_KW) {
            let next = self.nth(1);
            if matches!(next, SyntaxKind::L_BRACE | SyntaxKind::STAR)
                || (next.is_name() && next != SyntaxKind::FROM_KW)
            {
                self.bump();
                self.skip_trivia();
            }
        }

        if self.at(SyntaxKind::STRING) {
            self.bump();
        } else {
            if self.current_kind().is_name() {
                self.start_node(SyntaxKind::BINDING);
                self.bump();
                self.finish_node();
                self.skip_trivia();
                if self.eat(SyntaxKind::COMMA) {
                    self.skip_trivia();
                }
            }
            if self.at(SyntaxKind::STAR) {
                self.parse_namespace_import();
                self.skip_trivia();
            } else if self.at(SyntaxKind::L_BRACE) {
                self.parse_named_imports();
                self.skip_trivia();
            }
            if self.eat(SyntaxKind::FROM_KW) {
                self.skip_trivia();
                if !self.eat(SyntaxKind::STRING) {
                    self.error("expected module specifier");
                }
            } else {
                self.error("expected 'from'");
            }
        }

        self.eat_after_trivia(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// NamespaceImport = '*' 'as' Binding
    fn parse_namespace_import(&mut self) {
        self.start_node(SyntaxKind::NAMESPACE_IMPORT);
        self.bump();
        self.skip_trivia();
        if self.eat(SyntaxKind::AS_KW) {
            self.skip_trivia();
            if self.current_kind().is_name() {
                self.start_node(SyntaxKind::BINDING);
                self.bump();
                self.finish_node();
            } else {
                self.error("expected binding name");
            }
        } else {
            self.error("expected 'as'");
        }
        self.finish_node();
    }

    /// NamedImports = '{' … '}'
    fn parse_named_imports(&mut self) {
        self.start_node(SyntaxKind::NAMED_IMPORTS);
        self.bump();
        loop {
            if self.at_eof() || self.at(SyntaxKind::SEMICOLON) {
                self.error("expected '}'");
                break;
            }
            if self.eat(SyntaxKind::R_BRACE) {
                break;
            }
            self.bump();
        }
        self.finish_node();
    }

    /// `(const|let|var) NAME = require ( STRING`
    fn at_require_decl(&self) -> bool {
        self.nth(1).is_name()
            && self.nth(2) == SyntaxKind::EQ
            && self.nth(3) == SyntaxKind::REQUIRE_KW
            && self.nth(4) == SyntaxKind::L_PAREN
            && self.nth(5) == SyntaxKind::STRING
    }

    /// RequireDecl = ('const'|'let'|'var') Binding '=' 'require' '(' STRING ')' ';'?
    fn parse_require_decl(&mut self) {
        self.start_node(SyntaxKind::REQUIRE_DECL);
        self.bump();
        self.skip_trivia();
        self.start_node(SyntaxKind::BINDING);
        self.bump();
        self.finish_node();
        // `= require ( STRING` was checked by `at_require_decl`
        for _ in 0..4 {
            self.skip_trivia();
            self.bump();
        }
        if !self.eat_after_trivia(SyntaxKind::R_PAREN) {
            self.error("expected ')'");
        }
        self.eat_after_trivia(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// PostfixChain = NameRef (MemberSuffix | IndexSuffix)*
    ///
    /// MemberSuffix = ('.' | '?.') NAME
    /// IndexSuffix  = '?.'? '[' IndexKey ']'
    fn parse_postfix_chain(&mut self) {
        let checkpoint = self.builder.checkpoint();
        self.start_node(SyntaxKind::NAME_REF);
        self.bump();
        self.finish_node();

        loop {
            match (self.nth(0), self.nth(1)) {
                (SyntaxKind::DOT | SyntaxKind::QUESTION_DOT, next) if next.is_name() => {
                    self.builder
                        .start_node_at(checkpoint, SyntaxKind::MEMBER_EXPR.into());
                    self.skip_trivia();
                    self.bump();
                    self.skip_trivia();
                    self.bump();
                    self.finish_node();
                }
                (SyntaxKind::QUESTION_DOT, SyntaxKind::L_BRACKET) | (SyntaxKind::L_BRACKET, _) => {
                    self.builder
                        .start_node_at(checkpoint, SyntaxKind::INDEX_EXPR.into());
                    self.skip_trivia();
                    if self.eat(SyntaxKind::QUESTION_DOT) {
                        self.skip_trivia();
                    }
                    self.bump();
                    self.start_node(SyntaxKind::INDEX_KEY);
                    self.parse_items(Some(SyntaxKind::R_BRACKET));
                    self.finish_node();
                    if !self.eat(SyntaxKind::R_BRACKET) {
                        self.error("expected ']'");
                    }
                    self.finish_node();
                }
                _ => break,
            }
        }
    }
}
