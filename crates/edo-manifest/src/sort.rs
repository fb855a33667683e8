use serde_json::{Map, Value};

/// Top-level key order of a canonical `package.json`. Keys not listed keep
/// their relative order after the known ones.
const FIELD_ORDER: &[&str] = &[
    "$schema",
    "name",
    "displayName",
    "version",
    "private",
    "description",
    "categories",
    "keywords",
    "homepage",
    "bugs",
    "repository",
    "funding",
    "license",
    "qna",
    "author",
    "maintainers",
    "contributors",
    "publisher",
    "sideEffects",
    "type",
    "imports",
    "exports",
    "main",
    "svelte",
    "umd:main",
    "jsdelivr",
    "unpkg",
    "module",
    "source",
    "jsnext:main",
    "browser",
    "react-native",
    "types",
    "typesVersions",
    "typings",
    "style",
    "example",
    "examplestyle",
    "assets",
    "bin",
    "man",
    "directories",
    "files",
    "workspaces",
    "binary",
    "scripts",
    "betterScripts",
    "contributes",
    "activationEvents",
    "husky",
    "simple-git-hooks",
    "pre-commit",
    "commitlint",
    "lint-staged",
    "config",
    "nodemonConfig",
    "browserify",
    "babel",
    "browserslist",
    "xo",
    "prettier",
    "eslintConfig",
    "eslintIgnore",
    "npmpackagejsonlint",
    "release",
    "remarkConfig",
    "stylelint",
    "ava",
    "jest",
    "mocha",
    "nyc",
    "c8",
    "tap",
    "resolutions",
    "dependencies",
    "devDependencies",
    "dependenciesMeta",
    "peerDependencies",
    "peerDependenciesMeta",
    "optionalDependencies",
    "bundledDependencies",
    "bundleDependencies",
    "extensionPack",
    "extensionDependencies",
    "flat",
    "packageManager",
    "engines",
    "engineStrict",
    "volta",
    "languageName",
    "os",
    "cpu",
    "preferGlobal",
    "publishConfig",
    "icon",
    "badges",
    "galleryBanner",
    "preview",
    "markdown",
];

/// Object-valued fields whose own keys are sorted alphabetically.
const SORTED_MAPS: &[&str] = &[
    "resolutions",
    "dependencies",
    "devDependencies",
    "dependenciesMeta",
    "peerDependencies",
    "peerDependenciesMeta",
    "optionalDependencies",
    "engines",
    "publishConfig",
];

const REPOSITORY_ORDER: &[&str] = &["type", "url", "directory"];

#[must_use]
pub fn sort_package_json(fields: Map<String, Value>) -> Map<String, Value> {
    let mut rest = fields;
    let mut sorted = Map::new();

    for key in FIELD_ORDER {
        if let Some(value) = rest.remove(*key) {
            sorted.insert((*key).to_string(), normalize_field(key, value));
        }
    }
    for (key, value) in rest {
        sorted.insert(key, value);
    }

    sorted
}

fn normalize_field(key: &str, value: Value) -> Value {
    match value {
        Value::Object(map) if SORTED_MAPS.contains(&key) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(entries.into_iter().collect())
        }
        Value::Object(map) if key == "repository" => {
            Value::Object(order_keys(map, REPOSITORY_ORDER))
        }
        other => other,
    }
}

fn order_keys(mut map: Map<String, Value>, order: &[&str]) -> Map<String, Value> {
    let mut ordered = Map::new();
    for key in order {
        if let Some(value) = map.remove(*key) {
            ordered.insert((*key).to_string(), value);
        }
    }
    ordered.extend(map);
    ordered
}
