//! Installing the custom language package and wiring it into the generator.

use std::path::{Path, PathBuf};

use super::languages::BUILTIN_LANGUAGES;

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum RegisterError {
    #[error("failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to back up {path}: {source}")]
    Backup {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("highlight plugin at {0} has no module.exports to hook into")]
    PluginShape(PathBuf),

    #[error("failed to serialize the package manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

// =============================================================================
// Locating the generator's highlight.js
// =============================================================================

/// Find the generator's installed highlight.js module.
///
/// An explicit override wins; otherwise the usual install locations are
/// probed in order: the npm prefix install, the system-wide install, and a
/// project-local node_modules.
pub fn locate_highlight_module(override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return path.exists().then(|| path.to_path_buf());
    }

    let mut candidates = Vec::new();
    if let Ok(prefix) = std::env::var("NPM_CONFIG_PREFIX") {
        candidates
            .push(PathBuf::from(prefix).join("lib/node_modules/honkit/node_modules/highlight.js"));
    }
    candidates.push(PathBuf::from(
        "/usr/local/lib/node_modules/honkit/node_modules/highlight.js",
    ));
    candidates.push(PathBuf::from("./node_modules/highlight.js"));

    candidates.into_iter().find(|p| p.exists())
}

// =============================================================================
// Registrar
// =============================================================================

/// What the registration step ended up doing.
#[derive(Debug)]
pub struct RegisterOutcome {
    /// Directory the language package was written to
    pub package_dir: PathBuf,
    /// The generator's highlight plugin file, when one was found
    pub plugin_path: Option<PathBuf>,
    /// True when the plugin file was modified in this run
    pub plugin_patched: bool,
}

/// Writes the custom language package and wires it into the generator's
/// highlight plugin.
///
/// The whole step is idempotent: the plugin is patched at most once, and the
/// backup taken before the first patch is never overwritten.
pub struct Registrar {
    /// The installed highlight.js module directory
    highlight_path: PathBuf,
    /// Where the custom-languages package is written
    package_dir: PathBuf,
}

impl Registrar {
    pub fn new(highlight_path: PathBuf, package_dir: PathBuf) -> Self {
        Self {
            highlight_path,
            package_dir,
        }
    }

    /// Ensure the language package exists and the highlight plugin loads it.
    pub fn ensure_registered(&self) -> Result<RegisterOutcome, RegisterError> {
        self.write_package()?;
        let (plugin_path, plugin_patched) = self.patch_plugin()?;

        Ok(RegisterOutcome {
            package_dir: self.package_dir.clone(),
            plugin_path,
            plugin_patched,
        })
    }

    /// The registration module inside the package.
    pub fn register_module_path(&self) -> PathBuf {
        self.package_dir.join("register-languages.js")
    }

    /// Write the language grammars, the registration module, and the npm
    /// manifest. Re-running overwrites the files with identical content.
    fn write_package(&self) -> Result<(), RegisterError> {
        std::fs::create_dir_all(&self.package_dir).map_err(|e| RegisterError::CreateDir {
            path: self.package_dir.clone(),
            source: e,
        })?;

        for lang in BUILTIN_LANGUAGES {
            self.write_file(&self.package_dir.join(lang.file_name), lang.source)?;
        }

        self.write_file(&self.register_module_path(), &self.register_script())?;

        let manifest = serde_json::json!({
            "name": "custom-languages",
            "version": "1.0.0",
            "description": "Custom language definitions for HonKit syntax highlighting",
            "main": "register-languages.js",
            "license": "MIT",
        });
        let manifest = serde_json::to_string_pretty(&manifest)?;
        self.write_file(&self.package_dir.join("package.json"), &manifest)?;

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), RegisterError> {
        std::fs::write(path, content).map_err(|e| RegisterError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// The CommonJS module that registers every bundled grammar.
    fn register_script(&self) -> String {
        let mut script = String::new();
        script.push_str("// This script registers custom languages with highlight.js\n");
        for lang in BUILTIN_LANGUAGES {
            script.push_str(&format!(
                "const {name} = require('./{name}');\n",
                name = lang.name
            ));
        }
        script.push_str(&format!(
            "const hljs = require('{}');\n\n",
            self.highlight_path.display()
        ));
        for lang in BUILTIN_LANGUAGES {
            script.push_str(&format!(
                "hljs.registerLanguage('{name}', {name});\n",
                name = lang.name
            ));
        }
        script.push_str("hljs.registerLanguage('markup', hljs.getLanguage('xml'));\n\n");
        script.push_str("// Alias terraform to hcl\n");
        script.push_str("hljs.registerAliases('terraform', { languageName: 'hcl' });\n\n");
        script.push_str("console.log('Custom languages successfully registered with highlight.js!');\n");
        script
    }

    /// Patch the generator's highlight plugin to load the registration
    /// module before its exports.
    ///
    /// Returns the plugin path (when found) and whether this run modified it.
    /// A plugin that already requires the registration module is left alone.
    fn patch_plugin(&self) -> Result<(Option<PathBuf>, bool), RegisterError> {
        let Some(plugin_path) = self.find_plugin() else {
            return Ok((None, false));
        };

        let content = std::fs::read_to_string(&plugin_path).map_err(|e| RegisterError::Read {
            path: plugin_path.clone(),
            source: e,
        })?;

        if content.contains("register-languages.js") {
            return Ok((Some(plugin_path), false));
        }

        const ANCHOR: &str = "module.exports = {";
        if !content.contains(ANCHOR) {
            return Err(RegisterError::PluginShape(plugin_path));
        }

        let backup_path = plugin_path.with_extension("js.backup");
        if !backup_path.exists() {
            std::fs::copy(&plugin_path, &backup_path).map_err(|e| RegisterError::Backup {
                path: plugin_path.clone(),
                source: e,
            })?;
        }

        let hook = format!(
            "// Load custom languages\nrequire('{}');\n\n{ANCHOR}",
            self.register_module_path().display()
        );
        let patched = content.replacen(ANCHOR, &hook, 1);
        self.write_file(&plugin_path, &patched)?;

        Ok((Some(plugin_path), true))
    }

    /// Locate the generator's highlight plugin next to the highlight.js
    /// install.
    fn find_plugin(&self) -> Option<PathBuf> {
        let node_modules = self.highlight_path.parent()?;
        let mut candidates = vec![node_modules.join("@honkit/honkit-plugin-highlight/index.js")];
        if let Some(parent) = node_modules.parent() {
            candidates.push(parent.join("@honkit/honkit-plugin-highlight/index.js"));
        }

        candidates.into_iter().find(|p| p.exists())
    }
}
