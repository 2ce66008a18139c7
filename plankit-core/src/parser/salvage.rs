//! Salvage pass: best-effort extraction of the solution region from text that failed to parse.
//!
//! This pass is pattern based and makes no structural guarantees; whatever it returns is handed
//! back to the structural pass.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{DEFAULT_GOAL_TAG, DEFAULT_SOLUTION_TAG};

static DEFAULT_SOLUTION_RE: LazyLock<Regex> =
    LazyLock::new(|| element_pattern(DEFAULT_SOLUTION_TAG).expect("valid"));
static DEFAULT_GOAL_RE: LazyLock<Regex> =
    LazyLock::new(|| element_pattern(DEFAULT_GOAL_TAG).expect("valid"));

fn element_pattern(tag: &str) -> Result<Regex, regex::Error> {
    let tag = regex::escape(tag);
    Regex::new(&format!(r"(?s)<{tag}\b[^>]*>(.*?)</{tag}>"))
}

fn element_regex(tag: &str) -> Option<Cow<'static, Regex>> {
    match tag {
        DEFAULT_SOLUTION_TAG => Some(Cow::Borrowed(&*DEFAULT_SOLUTION_RE)),
        DEFAULT_GOAL_TAG => Some(Cow::Borrowed(&*DEFAULT_GOAL_RE)),
        _ => element_pattern(tag).ok().map(Cow::Owned),
    }
}

/// The first closed `<tag ...>...</tag>` region in `text`, tags included.
pub(crate) fn find_element<'t>(text: &'t str, tag: &str) -> Option<&'t str> {
    element_regex(tag)?.find(text).map(|m| m.as_str())
}

/// Finds the first `<tag ...>...</tag>` region in `text`.
///
/// When no closed region exists, the search is repeated with a closing tag appended to the end
/// of `text`. Returns the whole matched region, tags included.
pub(crate) fn recover_solution(text: &str, tag: &str) -> Option<String> {
    let re = element_regex(tag)?;
    if let Some(m) = re.find(text) {
        return Some(m.as_str().to_string());
    }

    let closed = format!("{text}</{tag}>");
    re.find(&closed).map(|m| m.as_str().to_string())
}
