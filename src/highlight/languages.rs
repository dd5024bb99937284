//! Built-in highlight.js language definitions.
//!
//! The generator's bundled highlight.js ships without grammars for the
//! infrastructure languages used across the content, so docfix carries them
//! as CommonJS modules and installs them alongside the site.

/// A highlight.js language grammar shipped with docfix.
pub struct LanguageDef {
    /// Name the grammar registers under
    pub name: &'static str,
    /// File the grammar is written to inside the custom package
    pub file_name: &'static str,
    /// CommonJS module source of the grammar
    pub source: &'static str,
}

/// Languages missing from the generator's bundled highlight.js.
pub const BUILTIN_LANGUAGES: &[LanguageDef] = &[
    LanguageDef {
        name: "hcl",
        file_name: "hcl.js",
        source: HCL_SOURCE,
    },
    LanguageDef {
        name: "bicep",
        file_name: "bicep.js",
        source: BICEP_SOURCE,
    },
];

const HCL_SOURCE: &str = r#"module.exports = function(hljs) {
  return {
    name: 'hcl',
    case_insensitive: true,
    keywords: {
      keyword: 'resource provider variable data terraform module output locals',
      literal: 'true false null'
    },
    contains: [
      hljs.COMMENT('//', '$'),
      hljs.COMMENT('#', '$'),
      hljs.COMMENT('/\\*', '\\*/'),
      {
        beginKeywords: 'resource',
        end: '\\{',
        contains: [hljs.QUOTE_STRING_MODE]
      },
      {
        className: 'string',
        begin: '"',
        end: '"',
        contains: [{
          className: 'variable',
          begin: '\\$\\{',
          end: '\\}',
          contains: [hljs.BACKSLASH_ESCAPE]
        }],
        illegal: '\\n'
      },
      {
        className: 'number',
        begin: '\\b\\d+(\\.\\d+)?',
        relevance: 0
      }
    ]
  };
};
"#;

const BICEP_SOURCE: &str = r#"module.exports = function(hljs) {
  return {
    name: 'bicep',
    keywords: {
      keyword: 'param var resource module output targetScope import as existing for if',
      built_in: 'string int bool array object',
      literal: 'true false null'
    },
    contains: [
      hljs.QUOTE_STRING_MODE,
      hljs.NUMBER_MODE,
      hljs.COMMENT('//', '$'),
      hljs.COMMENT('/\\*', '\\*/'),
      {
        className: 'function',
        beginKeywords: 'resource module',
        end: '\\{',
        excludeEnd: true,
        contains: [
          hljs.TITLE_MODE,
          {
            className: 'string',
            begin: "'",
            end: "'"
          },
          {
            className: 'string',
            begin: '@',
            end: '\\('
          }
        ]
      }
    ]
  };
};
"#;
