//! Accessor extraction
//!
//! Style imports and the class accesses made on them.
//!
//! A component file binds a style sheet with a default import, a namespace
//! import or `require`, then names classes as properties of the binding:
//!
//! ```text
//! import styles from './Button.module.css';
//! <button className={styles.primary} />      // static: "primary"
//! <span className={styles['icon-left']} />   // static: "icon-left"
//! <span className={styles[variant]} />       // dynamic
//! ```

use rowan::TextRange;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::FileId;
use crate::base::constants::{is_style_specifier, strip_specifier_suffix};
use crate::parser::component::{self, AstNode, IndexExpr, MemberExpr, ModuleSpecifier};

/// An import (or `require`) of a style sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleImportBinding {
    /// Local name of a default/namespace import; `None` for side-effect
    /// and named-only imports, which are checked but bind nothing.
    pub local_name: Option<SmolStr>,
    /// Module specifier as written, without quotes.
    pub source: SmolStr,
    /// The whole import statement.
    pub range: TextRange,
    /// The specifier literal.
    pub source_range: TextRange,
    /// Target style document; filled in against the current workspace.
    pub resolved: Option<FileId>,
}

impl StyleImportBinding {
    /// Specifier with any `?query`/`#hash` removed.
    pub fn path_specifier(&self) -> &str {
        strip_specifier_suffix(&self.source)
    }
}

/// A class access on a style binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleAccessor {
    /// Index into the document's bindings.
    pub binding: usize,
    /// Accessed class name; for dynamic keys, the key's source text.
    pub name: SmolStr,
    /// The whole access expression (`styles.box`).
    pub range: TextRange,
    /// The property name or the string literal contents.
    pub key_range: TextRange,
    /// The key is not a compile-time constant.
    pub is_dynamic: bool,
}

/// Bindings and accessors of one component file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComponentExtraction {
    pub bindings: Vec<StyleImportBinding>,
    pub accessors: Vec<StyleAccessor>,
}

fn binding_from(
    local_name: Option<SmolStr>,
    specifier: ModuleSpecifier,
    range: TextRange,
) -> Option<StyleImportBinding> {
    if !is_style_specifier(&specifier.value) {
        return None;
    }
    Some(StyleImportBinding {
        local_name,
        source: specifier.value.into(),
        range,
        source_range: specifier.range,
        resolved: None,
    })
}

/// Collect style imports, then every member/index access whose base
/// identifier names one of them.
pub fn extract_accessors(root: &component::SourceFile) -> ComponentExtraction {
    let mut bindings = Vec::new();

    for node in root.syntax().descendants() {
        let binding = if let Some(import) = component::ImportDecl::cast(node.clone()) {
            import.specifier().and_then(|specifier| {
                let name = import
                    .binding()
                    .and_then(|b| b.name())
                    .map(|t| SmolStr::new(t.text()));
                binding_from(name, specifier, import.range())
            })
        } else if let Some(require) = component::RequireDecl::cast(node) {
            require.specifier().and_then(|specifier| {
                let name = require
                    .binding()
                    .and_then(|b| b.name())
                    .map(|t| SmolStr::new(t.text()));
                binding_from(name, specifier, require.range())
            })
        } else {
            None
        };
        if let Some(binding) = binding {
            tracing::trace!(source = %binding.source, name = ?binding.local_name, "style import");
            bindings.push(binding);
        }
    }

    // First binding of a name wins
    let mut by_name: FxHashMap<&str, usize> = FxHashMap::default();
    for (index, binding) in bindings.iter().enumerate() {
        if let Some(name) = &binding.local_name {
            by_name.entry(name.as_str()).or_insert(index);
        }
    }

    let mut accessors = Vec::new();
    if !by_name.is_empty() {
        for node in root.syntax().descendants() {
            let accessor = if let Some(member) = MemberExpr::cast(node.clone()) {
                member_accessor(&member, &by_name)
            } else if let Some(index) = IndexExpr::cast(node) {
                index_accessor(&index, &by_name)
            } else {
                None
            };
            accessors.extend(accessor);
        }
    }

    ComponentExtraction {
        bindings,
        accessors,
    }
}

fn member_accessor(member: &MemberExpr, by_name: &FxHashMap<&str, usize>) -> Option<StyleAccessor> {
    let base = member.base_name()?.name()?;
    let binding = *by_name.get(base.text())?;
    let property = member.property()?;
    Some(StyleAccessor {
        binding,
        name: property.text().into(),
        range: member.range(),
        key_range: property.text_range(),
        is_dynamic: false,
    })
}

fn index_accessor(index: &IndexExpr, by_name: &FxHashMap<&str, usize>) -> Option<StyleAccessor> {
    let base = index.base_name()?.name()?;
    let binding = *by_name.get(base.text())?;
    let key = index.key()?;
    let accessor = match key.static_value() {
        Some(value) => StyleAccessor {
            binding,
            name: value.value.into(),
            range: index.range(),
            key_range: value.range,
            is_dynamic: false,
        },
        None => StyleAccessor {
            binding,
            name: key.syntax().text().to_string().trim().into(),
            range: index.range(),
            key_range: key.range(),
            is_dynamic: true,
        },
    };
    Some(accessor)
}

/// Convenience: parse and extract component text in one step.
pub fn extract_accessors_text(text: &str) -> ComponentExtraction {
    let parse = component::parse(text);
    match component::SourceFile::cast(parse.syntax()) {
        Some(root) => extract_accessors(&root),
        None => ComponentExtraction::default(),
    }
}
