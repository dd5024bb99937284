//! Registration of extra syntax-highlighting languages with the generator.
//!
//! HonKit highlights fenced code through its bundled highlight.js, which
//! ships without grammars for HCL or Bicep. Registration drops a small npm
//! package with the missing grammars next to the site and wires it into the
//! generator's highlight plugin. The step is idempotent: the plugin is
//! patched at most once and the pre-patch backup is never overwritten.

mod languages;
mod register;

pub use languages::{BUILTIN_LANGUAGES, LanguageDef};
pub use register::{RegisterError, RegisterOutcome, Registrar, locate_highlight_module};
