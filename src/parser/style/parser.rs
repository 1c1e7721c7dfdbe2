//! Recursive descent parser for style sheets
//!
//! Builds a rowan GreenNode tree from tokens. The grammar is deliberately
//! shallow: it only distinguishes what selector indexing needs (rules,
//! selectors, at-rules and declarations) and treats everything else as
//! opaque token runs.

use super::lexer::{Lexer, Token};
use super::syntax_kind::{SyntaxKind, SyntaxNode};
use crate::base::StyleDialect;
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

/// Parse style-sheet source into a CST
pub fn parse(input: &str, dialect: StyleDialect) -> Parse {
    let tokens: Vec<_> = Lexer::new(input, dialect).collect();
    let mut parser = Parser::new(&tokens, input.len());
    parser.parse_source_file();
    parser.finish()
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    end: TextSize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            end: TextSize::new(len as u32),
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

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Kind of the next non-trivia token, `None` at end of input
    fn next_significant(&self) -> Option<SyntaxKind> {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .map(|t| t.kind)
            .find(|kind| !kind.is_trivia())
    }

    /// Decide whether the construct at the cursor is a rule: a `{` shows up
    /// at nesting depth zero before any `;` or `}`.
    fn at_rule_start(&self) -> bool {
        let mut depth = 0usize;
        for token in &self.tokens[self.pos..] {
            match token.kind {
                SyntaxKind::L_PAREN
                | SyntaxKind::L_BRACKET
                | SyntaxKind::INTERP_START
                | SyntaxKind::LESS_INTERP => depth += 1,
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET => depth = depth.saturating_sub(1),
                SyntaxKind::R_BRACE if depth > 0 => depth -= 1,
                SyntaxKind::L_BRACE if depth == 0 => return true,
                SyntaxKind::SEMICOLON | SyntaxKind::R_BRACE if depth == 0 => return false,
                _ => {}
            }
        }
        false
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        let Some(&Token { kind, text, .. }) = self.current() else {
            return;
        };
        self.builder.token(kind.into(), text);
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

    /// Bump one token, keeping track of bracket nesting.
    fn bump_nested(&mut self, depth: &mut usize) {
        match self.current_kind() {
            SyntaxKind::L_PAREN
            | SyntaxKind::L_BRACKET
            | SyntaxKind::INTERP_START
            | SyntaxKind::LESS_INTERP => *depth += 1,
            SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                *depth = depth.saturating_sub(1)
            }
            _ => {}
        }
        self.bump();
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

    /// Wrap the current token alone in an ERROR node.
    fn error_bump(&mut self, message: impl Into<String>) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        self.bump();
        self.builder.finish_node();
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.builder.finish_node();
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

        while !self.at_eof() {
            let pos_before = self.pos;
            self.skip_trivia();
            if self.at_eof() {
                break;
            }
            if self.at(SyntaxKind::R_BRACE) {
                self.error_bump("unexpected '}'");
                continue;
            }
            self.parse_item();
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump();
            }
        }

        self.finish_node();
    }

    /// Item = AtRule | Rule | Declaration
    fn parse_item(&mut self) {
        if self.at(SyntaxKind::AT_KEYWORD) {
            self.parse_at_rule();
        } else if self.at_rule_start() {
            self.parse_rule();
        } else {
            self.parse_declaration();
        }
    }

    /// Rule = SelectorList Block
    fn parse_rule(&mut self) {
        self.start_node(SyntaxKind::RULE);
        self.parse_selector_list();
        self.parse_block();
        self.finish_node();
    }

    /// SelectorList = Selector (',' Selector)*
    fn parse_selector_list(&mut self) {
        self.start_node(SyntaxKind::SELECTOR_LIST);
        let mut seen_selector = false;
        loop {
            self.skip_trivia();
            if self.at_eof() || self.at(SyntaxKind::L_BRACE) {
                break;
            }
            if self.eat(SyntaxKind::COMMA) {
                continue;
            }
            self.parse_selector();
            seen_selector = true;
        }
        if !seen_selector {
            self.error("expected selector");
        }
        self.finish_node();
    }

    /// Selector = token run up to ',' or '{' at depth zero.
    ///
    /// Trailing trivia stays outside the node so its range covers the
    /// selector text exactly.
    fn parse_selector(&mut self) {
        self.start_node(SyntaxKind::SELECTOR);
        let mut depth = 0usize;
        while !self.at_eof() {
            let kind = self.current_kind();
            if depth == 0 {
                if matches!(kind, SyntaxKind::COMMA | SyntaxKind::L_BRACE) {
                    break;
                }
                if kind.is_trivia()
                    && matches!(
                        self.next_significant(),
                        None | Some(SyntaxKind::COMMA) | Some(SyntaxKind::L_BRACE)
                    )
                {
                    break;
                }
            }
            self.bump_nested(&mut depth);
        }
        self.finish_node();
    }

    /// Block = '{' Item* '}'
    fn parse_block(&mut self) {
        self.skip_trivia();
        if !self.at(SyntaxKind::L_BRACE) {
            self.error("expected '{'");
            return;
        }
        self.start_node(SyntaxKind::BLOCK);
        self.bump();
        loop {
            self.skip_trivia();
            if self.at_eof() {
                self.error("expected '}'");
                break;
            }
            if self.eat(SyntaxKind::R_BRACE) {
                break;
            }
            let pos_before = self.pos;
            self.parse_item();
            if self.pos == pos_before {
                self.error_recover(
                    format!("unexpected token: {:?}", self.current_kind()),
                    &[SyntaxKind::R_BRACE],
                );
            }
        }
        self.finish_node();
    }

    /// AtRule = AT_KEYWORD AtPrelude (Block | ';')?
    fn parse_at_rule(&mut self) {
        self.start_node(SyntaxKind::AT_RULE);
        self.bump();

        self.start_node(SyntaxKind::AT_PRELUDE);
        let mut depth = 0usize;
        while !self.at_eof() {
            if depth == 0
                && self.at_any(&[SyntaxKind::L_BRACE, SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE])
            {
                break;
            }
            self.bump_nested(&mut depth);
        }
        self.finish_node();

        if self.at(SyntaxKind::L_BRACE) {
            self.parse_block();
        } else {
            self.eat(SyntaxKind::SEMICOLON);
        }
        self.finish_node();
    }

    /// Declaration = token run up to ';' (consumed) or '}' (left for the block)
    fn parse_declaration(&mut self) {
        self.start_node(SyntaxKind::DECLARATION);
        let mut depth = 0usize;
        while !self.at_eof() {
            if depth == 0 {
                if self.eat(SyntaxKind::SEMICOLON) {
                    break;
                }
                if self.at(SyntaxKind::R_BRACE) {
                    break;
                }
            }
            self.bump_nested(&mut depth);
        }
        self.finish_node();
    }
}
