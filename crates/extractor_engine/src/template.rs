//! `${...}` placeholder expansion for action parameters.

pub(crate) const ARG: &str = "${arg}";
pub(crate) const SELECTOR: &str = "${selector}";
pub(crate) const SEARCH: &str = "${search}";

/// Values available for substitution at one invocation.
///
/// `arg` is only filled in by the `go` action; elsewhere `${arg}` is left
/// untouched.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Placeholders<'a> {
    pub arg: Option<&'a str>,
    pub selector: &'a str,
    pub search: &'a str,
}

impl Placeholders<'_> {
    pub fn expand(&self, template: &str) -> String {
        if !template.contains("${") {
            return template.to_string();
        }
        let mut expanded = template.to_string();
        if let Some(arg) = self.arg {
            expanded = expanded.replace(ARG, arg);
        }
        expanded
            .replace(SELECTOR, self.selector)
            .replace(SEARCH, self.search)
    }
}

/// Compiles `pattern` with dot-matches-newline enabled.
pub(crate) fn compile_pattern(pattern: &str) -> Result<regex::bytes::Regex, regex::Error> {
    regex::bytes::RegexBuilder::new(pattern)
        .dot_matches_new_line(true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_every_known_placeholder() {
        let values = Placeholders {
            arg: Some("/page/2"),
            selector: "link",
            search: "rust",
        };
        assert_eq!(
            values.expand("${arg}?q=${search}&s=${selector}&again=${search}"),
            "/page/2?q=rust&s=link&again=rust"
        );
    }

    #[test]
    fn arg_is_left_alone_without_a_value() {
        let values = Placeholders {
            arg: None,
            selector: "",
            search: "x",
        };
        assert_eq!(values.expand("${arg}-${search}"), "${arg}-x");
    }

    #[test]
    fn patterns_match_across_lines() {
        let re = compile_pattern("<p>(.*)</p>").unwrap();
        let caps = re.captures(b"<p>a\nb</p>").unwrap();
        assert_eq!(&caps[1], b"a\nb");
    }
}
