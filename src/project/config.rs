//! Project configuration
//!
//! Workspace root, path aliases and feature toggles.
//!
//! The host builds a [`ProjectConfig`] from its own settings and hands it to
//! the workspace index. Alias patterns follow the tsconfig `paths` shape:
//!
//! ```text
//! "@/*"        → ["src/*"]          wildcard: the matched tail replaces `*`
//! "@styles"    → ["src/styles"]     plain prefix: `@styles/a.css` → `src/styles/a.css`
//! ```
//!
//! Targets are relative to the workspace root unless absolute.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::NormalizedPath;

/// Which host-facing features are enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureToggles {
    pub goto_definition: bool,
    pub hover: bool,
    pub completion: bool,
    pub diagnostics: bool,
    pub code_actions: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            goto_definition: true,
            hover: true,
            completion: true,
            diagnostics: true,
            code_actions: true,
        }
    }
}

/// Configuration consulted by the path resolver and the IDE layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Absolute workspace root.
    pub root: NormalizedPath,
    /// Alias pattern → target directories, in declaration order.
    pub aliases: IndexMap<SmolStr, Vec<String>>,
    /// Directory (relative to the root) that bare specifiers resolve against.
    pub base_dir: Option<String>,
    pub features: FeatureToggles,
}

impl ProjectConfig {
    /// Create a configuration for `root` with no aliases.
    pub fn new(root: NormalizedPath) -> Self {
        Self {
            root,
            aliases: IndexMap::new(),
            base_dir: None,
            features: FeatureToggles::default(),
        }
    }

    /// Add an alias with one or more targets. Re-adding a pattern appends
    /// targets to it.
    pub fn with_alias<I, S>(mut self, pattern: impl Into<SmolStr>, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases
            .entry(pattern.into())
            .or_default()
            .extend(targets.into_iter().map(Into::into));
        self
    }

    /// Set the base directory.
    pub fn with_base_dir(mut self, base_dir: impl Into<String>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Set the feature toggles.
    pub fn with_features(mut self, features: FeatureToggles) -> Self {
        self.features = features;
        self
    }

    /// Absolute base directory, if configured.
    pub fn base_path(&self) -> Option<NormalizedPath> {
        self.base_dir.as_deref().map(|dir| self.root.join(dir))
    }

    /// Candidate paths for `source` under the first alias whose pattern
    /// matches. Empty when no alias matches.
    pub fn expand_alias(&self, source: &str) -> Vec<NormalizedPath> {
        for (pattern, targets) in &self.aliases {
            let Some(tail) = match_alias(pattern, source) else {
                continue;
            };
            tracing::trace!(%pattern, source, "alias matched");
            return targets
                .iter()
                .map(|target| self.root.join(&substitute(target, tail)))
                .collect();
        }
        Vec::new()
    }
}

/// The part of `source` matched by the pattern's wildcard (or the remainder
/// after a plain prefix).
fn match_alias<'a>(pattern: &str, source: &'a str) -> Option<&'a str> {
    if let Some((prefix, suffix)) = pattern.split_once('*') {
        let rest = source.strip_prefix(prefix)?;
        return rest.strip_suffix(suffix);
    }
    let prefix = pattern.trim_end_matches('/');
    if source == prefix {
        return Some("");
    }
    source.strip_prefix(prefix)?.strip_prefix('/')
}

fn substitute(target: &str, tail: &str) -> String {
    if target.contains('*') {
        return target.replacen('*', tail, 1);
    }
    if tail.is_empty() {
        target.to_string()
    } else {
        format!("{}/{}", target.trim_end_matches('/'), tail)
    }
}

#[cfg(feature = "tsconfig")]
mod tsconfig {
    use serde::Deserialize;

    use super::ProjectConfig;
    use crate::base::NormalizedPath;
    use crate::project::ProjectError;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct TsConfig {
        #[serde(default)]
        compiler_options: CompilerOptions,
    }

    #[derive(Default, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct CompilerOptions {
        base_url: Option<String>,
        #[serde(default)]
        paths: indexmap::IndexMap<String, Vec<String>>,
    }

    impl ProjectConfig {
        /// Build a configuration from a `tsconfig.json`/`jsconfig.json`.
        ///
        /// `baseUrl` becomes the base directory, and `paths` targets are
        /// taken relative to it, as the TypeScript compiler does.
        pub fn from_tsconfig(root: NormalizedPath, json: &str) -> Result<Self, ProjectError> {
            let tsconfig: TsConfig = serde_json::from_str(json)
                .map_err(|e| ProjectError::invalid_config(format!("tsconfig: {}", e)))?;
            let options = tsconfig.compiler_options;

            let mut config = ProjectConfig::new(root);
            let base = options.base_url.as_deref().unwrap_or(".").trim_end_matches('/');
            for (pattern, targets) in options.paths {
                let targets: Vec<String> = targets
                    .into_iter()
                    .map(|t| format!("{}/{}", base, t.trim_start_matches("./")))
                    .collect();
                config = config.with_alias(pattern, targets);
            }
            if let Some(base_url) = options.base_url {
                config = config.with_base_dir(base_url);
            }
            Ok(config)
        }
    }

}
