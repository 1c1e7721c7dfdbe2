//! Import resolution tests against a populated workspace.

use cssmodules::project::{PathResolver, ProjectConfig};
use rstest::rstest;

use crate::helpers::workspace_helpers::{ROOT, index_with_config, path};

const STYLES: &[(&str, &str)] = &[
    ("/ws/src/components/a.module.css", ".relative {}"),
    ("/ws/a.module.css", ".root {}"),
    ("/ws/src/shared/a.module.css", ".alias {}"),
    ("/ws/lib/b.module.css", ".base {}"),
];

fn config() -> ProjectConfig {
    ProjectConfig::new(path(ROOT))
        .with_alias("@shared/*", ["src/shared/*"])
        .with_alias("~", ["src/shared"])
        .with_base_dir("lib")
}

/// The single selector name of the sheet `specifier` resolves to from a
/// component in `src/components`.
fn resolved_name(specifier: &str) -> Option<String> {
    let component = format!("import s from '{}';\ns.x;", specifier);
    let mut sources: Vec<(&str, &str)> = STYLES.to_vec();
    sources.push(("/ws/src/components/App.tsx", component.as_str()));
    let index = index_with_config(config(), &sources);

    let app = index.component(&path("/ws/src/components/App.tsx"))?;
    let target = app.bindings.first()?.resolved?;
    let style = index.style_by_file(target)?;
    style.selectors.names().next().map(|n| n.to_string())
}

#[rstest]
#[case("./a.module.css", Some("relative"))]
#[case("/a.module.css", Some("root"))]
#[case("a.module.css", Some("root"))]
#[case("@shared/a.module.css", Some("alias"))]
#[case("~/a.module.css", Some("alias"))]
#[case("b.module.css", Some("base"))]
#[case("./a.module.css?inline", Some("relative"))]
#[case("../missing.module.css", None)]
fn test_resolution_strategies(#[case] specifier: &str, #[case] expected: Option<&str>) {
    assert_eq!(resolved_name(specifier).as_deref(), expected);
}

#[test]
fn test_candidate_order() {
    let config = config();
    let candidates: Vec<String> = PathResolver::new(&config)
        .candidates("./x.css", &path("/ws/src/components/App.tsx"))
        .into_iter()
        .map(|p| p.as_str().to_string())
        .collect();
    assert_eq!(
        candidates,
        vec![
            "/ws/src/components/x.css",
            "/ws/x.css",
            "/ws/lib/x.css",
        ]
    );
}
