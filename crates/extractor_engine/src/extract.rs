use engine_logging::{engine_debug, engine_warn};
use regex::bytes::Regex;

use crate::chain::Invocation;
use crate::template::{compile_pattern, Placeholders};
use crate::{ActionHandler, ExecutionContext, ExtractError};

/// `extract`: runs a regex over the payload and continues once per captured
/// value, with the capture group's label as the selector.
pub(crate) struct ExtractAction;

impl ActionHandler for ExtractAction {
    fn handle(
        &self,
        ctx: &mut ExecutionContext<'_>,
        call: Invocation<'_>,
    ) -> Result<(), ExtractError> {
        let pattern = Placeholders {
            arg: None,
            selector: call.selector,
            search: ctx.search(),
        }
        .expand(call.param);
        let re = match compile_pattern(&pattern) {
            Ok(re) => re,
            Err(err) => {
                ctx.stop();
                return Err(ExtractError::Pattern {
                    pattern,
                    message: err.to_string(),
                });
            }
        };

        let groups = group_captures(&re, call.payload);
        let limit = ctx.iteration_limit();
        let mut iterations = 0u64;
        for (label, values) in &groups {
            for value in values {
                if ctx.is_stopped() {
                    engine_debug!("extract stopped after {} iterations", iterations);
                    return Ok(());
                }
                if limit != 0 && iterations >= limit {
                    engine_warn!("extract hit iteration limit {}", limit);
                    return Err(ExtractError::IterationLimitExceeded { limit });
                }
                ctx.advance(call.next, label, value)?;
                iterations += 1;
            }
        }
        Ok(())
    }
}

/// Groups every non-empty captured value by capture label, across all
/// matches. Unnamed groups are labelled by their 1-based index.
///
/// Labels keep the order they were first seen in; values keep match order.
pub(crate) fn group_captures<'h>(re: &Regex, haystack: &'h [u8]) -> Vec<(String, Vec<&'h [u8]>)> {
    let labels: Vec<String> = re
        .capture_names()
        .enumerate()
        .skip(1)
        .map(|(index, name)| name.map_or_else(|| index.to_string(), str::to_string))
        .collect();
    let mut groups: Vec<(String, Vec<&'h [u8]>)> = Vec::new();
    if labels.is_empty() {
        return groups;
    }

    for caps in re.captures_iter(haystack) {
        for (offset, label) in labels.iter().enumerate() {
            let Some(m) = caps.get(offset + 1) else {
                continue;
            };
            if m.as_bytes().is_empty() {
                continue;
            }
            match groups.iter_mut().find(|(existing, _)| existing == label) {
                Some((_, values)) => values.push(m.as_bytes()),
                None => groups.push((label.clone(), vec![m.as_bytes()])),
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::group_captures;
    use crate::template::compile_pattern;

    fn labels_and_values(pattern: &str, haystack: &[u8]) -> Vec<(String, Vec<String>)> {
        let re = compile_pattern(pattern).unwrap();
        group_captures(&re, haystack)
            .into_iter()
            .map(|(label, values)| {
                let values = values
                    .into_iter()
                    .map(|v| String::from_utf8_lossy(v).into_owned())
                    .collect();
                (label, values)
            })
            .collect()
    }

    #[test]
    fn single_unnamed_group_is_labelled_one() {
        assert_eq!(
            labels_and_values("<b>(.*?)</b>", b"<b>x</b><b>y</b>"),
            vec![("1".to_string(), vec!["x".to_string(), "y".to_string()])]
        );
    }

    #[test]
    fn mixed_groups_use_name_or_position() {
        let groups = labels_and_values(r"(\d+)-(?P<word>[a-z]+)-(\d+)", b"1-a-2 3-b-4");
        assert_eq!(
            groups,
            vec![
                ("1".to_string(), vec!["1".to_string(), "3".to_string()]),
                ("word".to_string(), vec!["a".to_string(), "b".to_string()]),
                ("3".to_string(), vec!["2".to_string(), "4".to_string()]),
            ]
        );
    }

    #[test]
    fn empty_and_unmatched_groups_are_skipped() {
        let groups = labels_and_values("<i>(?P<a>x*)</i>|<u>(?P<b>.*?)</u>", b"<i></i><u>q</u><i>xx</i>");
        assert_eq!(
            groups,
            vec![
                ("b".to_string(), vec!["q".to_string()]),
                ("a".to_string(), vec!["xx".to_string()]),
            ]
        );
    }

    #[test]
    fn pattern_without_groups_yields_nothing() {
        assert!(labels_and_values("abc", b"abcabc").is_empty());
    }
}
