//! Icon Registry
//!
//! Maps short label keys (tool names, config file names, file extensions) to
//! icon references. An icon reference is one of:
//! - an iconify name, `<collection>:<name>`
//! - inline SVG markup starting with `<svg`
//! - an `http(s)` URL pointing at an SVG document
//!
//! References are not validated here; a bad one only shows up as an empty
//! icon when the stylesheet is generated.

use indexmap::IndexMap;

/// Built-in keys, in registry order. Equal-length keys that both match a label
/// resolve to the one listed first.
pub const BUILTIN_ICONS: &[(&str, &str)] = &[
    // package managers
    ("pnpm", "vscode-icons:file-type-light-pnpm"),
    ("npm", "vscode-icons:file-type-npm"),
    ("yarn", "vscode-icons:file-type-yarn"),
    ("bun", "vscode-icons:file-type-bun"),
    ("deno", "vscode-icons:file-type-light-deno"),
    ("pip", "vscode-icons:file-type-pip"),
    // frameworks
    ("vue", "vscode-icons:file-type-vue"),
    ("svelte", "vscode-icons:file-type-svelte"),
    ("angular", "vscode-icons:file-type-angular"),
    ("react", "vscode-icons:file-type-reactjs"),
    ("next", "vscode-icons:file-type-light-next"),
    ("nuxt", "vscode-icons:file-type-nuxt"),
    ("solid", "logos:solidjs-icon"),
    ("astro", "vscode-icons:file-type-light-astro"),
    ("docker", "vscode-icons:file-type-docker2"),
    // bundlers
    ("rollup", "vscode-icons:file-type-rollup"),
    ("webpack", "vscode-icons:file-type-webpack"),
    ("vite", "vscode-icons:file-type-vite"),
    ("esbuild", "vscode-icons:file-type-esbuild"),
    // configuration files
    ("package.json", "vscode-icons:file-type-node"),
    ("tsconfig.json", "vscode-icons:file-type-tsconfig"),
    (".npmrc", "vscode-icons:file-type-npm"),
    (".editorconfig", "vscode-icons:file-type-editorconfig"),
    (".eslintrc", "vscode-icons:file-type-eslint"),
    (".eslintignore", "vscode-icons:file-type-eslint"),
    ("eslint.config", "vscode-icons:file-type-eslint"),
    (".gitignore", "vscode-icons:file-type-git"),
    (".gitattributes", "vscode-icons:file-type-git"),
    (".env", "vscode-icons:file-type-dotenv"),
    (".env.example", "vscode-icons:file-type-dotenv"),
    (".vscode", "vscode-icons:file-type-vscode"),
    ("tailwind.config", "vscode-icons:file-type-tailwind"),
    ("uno.config", "vscode-icons:file-type-unocss"),
    // file extensions
    (".ts", "vscode-icons:file-type-typescript"),
    (".tsx", "vscode-icons:file-type-typescript"),
    (".mjs", "vscode-icons:file-type-js"),
    (".cjs", "vscode-icons:file-type-js"),
    (".json", "vscode-icons:file-type-json"),
    (".js", "vscode-icons:file-type-js"),
    (".jsx", "vscode-icons:file-type-js"),
    (".md", "vscode-icons:file-type-markdown"),
    (".py", "vscode-icons:file-type-python"),
    (".cpp", "vscode-icons:file-type-cpp"),
    (".ico", "vscode-icons:file-type-favicon"),
    (".html", "vscode-icons:file-type-html"),
    (".css", "vscode-icons:file-type-css"),
    (".yml", "vscode-icons:file-type-light-yaml"),
    (".yaml", "vscode-icons:file-type-light-yaml"),
    // languages and shells
    ("c++", "vscode-icons:file-type-cpp"),
    ("git", "vscode-icons:file-type-git"),
    ("powershell", "vscode-icons:file-type-powershell"),
    ("pwsh", "vscode-icons:file-type-powershell"),
    ("shell", "vscode-icons:file-type-shell"),
    ("sh", "vscode-icons:file-type-shell"),
];

/// Key to icon reference mapping, fixed once a plugin instance is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRegistry {
    entries: IndexMap<String, String>,
}

impl IconRegistry {
    /// The built-in table only.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_ICONS.iter().map(|(key, icon)| (*key, *icon)))
    }

    /// The built-in table merged with caller overrides. An override for an
    /// existing key replaces its icon but keeps the key's position; new keys
    /// are appended in override order.
    pub fn with_overrides(overrides: &IndexMap<String, String>) -> Self {
        let mut registry = Self::builtin();
        for (key, icon) in overrides {
            registry.entries.insert(key.clone(), icon.clone());
        }
        registry
    }

    /// A registry holding exactly the given entries, without built-ins.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, icon)| (key.into(), icon.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Entries in registry (insertion) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for IconRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
