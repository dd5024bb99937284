//! The individual rewrite rules.
//!
//! Each rule is a pure function from document text to rewritten text plus a
//! flag saying whether it matched. They are deliberately substring-level
//! regex rewrites over unstructured markdown, not a parser; the existing
//! document corpus depends on exactly these matching semantics, so a rule
//! that wants to become fence-aware has to be replaced wholesale, not
//! "improved" in place.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `{% raw %}` directly wrapping a whole fenced block.
static RAW_AROUND_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{%\s*raw\s*%\}(```.*?```)\{%\s*endraw\s*%\}").unwrap()
});

/// A raw pair inside a language-tagged fence, wrapping the code body.
static RAW_INSIDE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```([a-zA-Z0-9]+)\n\{%\s*raw\s*%\}(.*?)\{%\s*endraw\s*%\}\n```").unwrap()
});

/// A `{% tabs %}` span; fence rewriting is scoped to these.
static TABS_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{%\s*tabs\s*%\}.*?\{%\s*endtabs\s*%\}").unwrap());

/// A fenced block inside a tabs span, language tag optional.
static TAB_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```([a-zA-Z0-9]*)(.*?)```").unwrap());

/// An open `{% code ... %}` tag at the very end of a span, ignoring trailing
/// whitespace. Fences sitting behind one already carry the canonical wrapper.
static TRAILING_CODE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{%\s*code\b[^%]*%\}\s*\z").unwrap());

/// Replace a raw escape around a fence with a `{% code %}` wrapper.
///
/// The fence itself is re-emitted untouched.
pub fn unwrap_raw_around_fence(text: &str) -> (String, bool) {
    let mut changed = false;
    let out = RAW_AROUND_FENCE.replace_all(text, |caps: &Captures| {
        changed = true;
        format!("{{% code %}}\n{}\n{{% endcode %}}", &caps[1])
    });
    (out.into_owned(), changed)
}

/// Lift a raw escape out of a language-tagged fence.
///
/// The fence is regenerated with the language repeated on a `{% code %}`
/// wrapper; language id and code body are re-emitted verbatim. Only
/// alphanumeric language tags match; a hyphenated tag is left untouched.
pub fn unwrap_raw_inside_fence(text: &str) -> (String, bool) {
    let mut changed = false;
    let out = RAW_INSIDE_FENCE.replace_all(text, |caps: &Captures| {
        changed = true;
        let lang = &caps[1];
        let code = &caps[2];
        format!("{{% code lang=\"{lang}\" %}}\n```{lang}\n{code}\n```\n{{% endcode %}}")
    });
    (out.into_owned(), changed)
}

/// Insert `plaintext` after every three-backtick sequence directly followed
/// by a newline.
///
/// This is a literal substring replacement with no fence-pairing awareness:
/// the closing delimiter of a tagged block matches too when it is followed
/// directly by a newline.
pub fn tag_bare_fences(text: &str) -> (String, bool) {
    if !text.contains("```\n") {
        return (text.to_string(), false);
    }
    (text.replace("```\n", "```plaintext\n"), true)
}

/// Rewrite fences inside `{% tabs %}` spans to the canonical
/// `{% code lang="..." %}` form, defaulting the language to `plaintext`.
///
/// Scoped: fences outside any tabs span are not touched by this rule. A
/// fence that already sits directly behind a `{% code ... %}` open tag is
/// left alone, so the rule wraps each block exactly once.
pub fn wrap_tab_fences(text: &str) -> (String, bool) {
    let mut changed = false;
    let out = TABS_SPAN.replace_all(text, |caps: &Captures| {
        rewrap_span_fences(caps.get(0).unwrap().as_str(), &mut changed)
    });
    (out.into_owned(), changed)
}

fn rewrap_span_fences(span: &str, changed: &mut bool) -> String {
    let mut out = String::with_capacity(span.len());
    let mut last = 0;

    for caps in TAB_FENCE.captures_iter(span) {
        let m = caps.get(0).unwrap();
        out.push_str(&span[last..m.start()]);
        last = m.end();

        if TRAILING_CODE_OPEN.is_match(&span[..m.start()]) {
            // Already wrapped, keep as is
            out.push_str(m.as_str());
            continue;
        }

        // The language capture stops at the first non-alphanumeric char, so
        // anything but a newline right after it means a tag this rule does
        // not accept (a hyphenated language, say). Leave those fences alone.
        if !caps[2].starts_with('\n') {
            out.push_str(m.as_str());
            continue;
        }

        let lang = match &caps[1] {
            "" => "plaintext",
            lang => lang,
        };
        let code = caps[2].trim_matches('\n');
        *changed = true;
        out.push_str(&format!(
            "{{% code lang=\"{lang}\" %}}\n```{lang}\n{code}\n```\n{{% endcode %}}"
        ));
    }

    out.push_str(&span[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_raw_around_fence() {
        let (text, changed) =
            unwrap_raw_around_fence("{% raw %}```js\nconsole.log(1)\n```{% endraw %}");
        assert_eq!(text, "{% code %}\n```js\nconsole.log(1)\n```\n{% endcode %}");
        assert!(changed);
    }

    #[test]
    fn test_unwrap_raw_around_fence_spaced_tags() {
        let (text, changed) =
            unwrap_raw_around_fence("{%raw%}```\nx\n```{%  endraw  %}");
        assert_eq!(text, "{% code %}\n```\nx\n```\n{% endcode %}");
        assert!(changed);
    }

    #[test]
    fn test_unwrap_raw_around_fence_no_match() {
        let (text, changed) = unwrap_raw_around_fence("{% raw %}no fence here{% endraw %}");
        assert_eq!(text, "{% raw %}no fence here{% endraw %}");
        assert!(!changed);
    }

    #[test]
    fn test_unwrap_raw_inside_fence() {
        let input = "```python\n{% raw %}\nprint('{{ x }}')\n{% endraw %}\n```";
        let (text, changed) = unwrap_raw_inside_fence(input);
        // The captured body keeps its own surrounding newlines
        assert_eq!(
            text,
            "{% code lang=\"python\" %}\n```python\n\nprint('{{ x }}')\n\n```\n{% endcode %}"
        );
        assert!(changed);
    }

    #[test]
    fn test_unwrap_raw_inside_fence_requires_alphanumeric_language() {
        let input = "```objective-c\n{% raw %}\nx\n{% endraw %}\n```";
        let (text, changed) = unwrap_raw_inside_fence(input);
        assert_eq!(text, input);
        assert!(!changed);
    }

    #[test]
    fn test_tag_bare_fences() {
        let (text, changed) = tag_bare_fences("```\nplain text\n```");
        assert_eq!(text, "```plaintext\nplain text\n```");
        assert!(changed);
    }

    #[test]
    fn test_tag_bare_fences_matches_closing_delimiter_too() {
        // No fence-pairing awareness: a closing delimiter followed by a
        // newline matches as well.
        let (text, changed) = tag_bare_fences("```sh\nls\n```\nafter\n");
        assert_eq!(text, "```sh\nls\n```plaintext\nafter\n");
        assert!(changed);
    }

    #[test]
    fn test_tag_bare_fences_untouched() {
        let (text, changed) = tag_bare_fences("```rust\nfn main() {}\n```");
        assert_eq!(text, "```rust\nfn main() {}\n```");
        assert!(!changed);
    }

    #[test]
    fn test_wrap_tab_fences() {
        let input = "{% tabs %}\n{% tab %}\n```js\nconst a = 1;\n```\n{% endtab %}\n{% endtabs %}";
        let (text, changed) = wrap_tab_fences(input);
        assert_eq!(
            text,
            "{% tabs %}\n{% tab %}\n{% code lang=\"js\" %}\n```js\nconst a = 1;\n```\n{% endcode %}\n{% endtab %}\n{% endtabs %}"
        );
        assert!(changed);
    }

    #[test]
    fn test_wrap_tab_fences_defaults_to_plaintext() {
        let input = "{% tabs %}\n```\nx\n```\n{% endtabs %}";
        let (text, changed) = wrap_tab_fences(input);
        assert_eq!(
            text,
            "{% tabs %}\n{% code lang=\"plaintext\" %}\n```plaintext\nx\n```\n{% endcode %}\n{% endtabs %}"
        );
        assert!(changed);
    }

    #[test]
    fn test_wrap_tab_fences_is_scoped_to_tabs_spans() {
        let input = "```js\noutside\n```\n\n{% tabs %}\n```js\ninside\n```\n{% endtabs %}";
        let (text, _) = wrap_tab_fences(input);
        assert!(text.starts_with("```js\noutside\n```\n"));
        assert!(text.contains("{% code lang=\"js\" %}\n```js\ninside\n```\n{% endcode %}"));
    }

    #[test]
    fn test_wrap_tab_fences_skips_wrapped_blocks() {
        let input = "{% tabs %}\n{% code lang=\"js\" %}\n```js\nconst a = 1;\n```\n{% endcode %}\n{% endtabs %}";
        let (text, changed) = wrap_tab_fences(input);
        assert_eq!(text, input);
        assert!(!changed);
    }

    #[test]
    fn test_wrap_tab_fences_requires_alphanumeric_language() {
        let input = "{% tabs %}\n```objective-c\nx\n```\n{% endtabs %}";
        let (text, changed) = wrap_tab_fences(input);
        assert_eq!(text, input);
        assert!(!changed);
    }

    #[test]
    fn test_wrap_tab_fences_is_idempotent() {
        let input = "{% tabs %}\n{% tab %}\n```js\nconst a = 1;\n```\n{% endtab %}\n{% endtabs %}";
        let (first, changed) = wrap_tab_fences(input);
        assert!(changed);
        let (second, changed) = wrap_tab_fences(&first);
        assert_eq!(second, first);
        assert!(!changed);
    }

    #[test]
    fn test_wrap_tab_fences_multiple_blocks() {
        let input = "{% tabs %}\n```sh\nls\n```\nmiddle\n```py\nprint(1)\n```\n{% endtabs %}";
        let (text, changed) = wrap_tab_fences(input);
        assert_eq!(
            text,
            "{% tabs %}\n{% code lang=\"sh\" %}\n```sh\nls\n```\n{% endcode %}\nmiddle\n{% code lang=\"py\" %}\n```py\nprint(1)\n```\n{% endcode %}\n{% endtabs %}"
        );
        assert!(changed);
    }
}
