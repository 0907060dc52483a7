//! Content matcher
//!
//! A page either satisfies the crawl's [`SearchCriterion`] or it doesn't.
//! Matching is a pure function of the parsed page and the criterion.

use crate::crawler::parser::ParsedPage;
use serde::Serialize;
use std::fmt;

/// What a page must contain to count as matched
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum SearchCriterion {
    /// At least one element carries this class token
    ByClass(String),

    /// The visible text contains this literal, case-sensitive substring
    ByString(String),
}

impl SearchCriterion {
    /// Returns true if `page` satisfies this criterion
    ///
    /// # Example
    ///
    /// ```
    /// use page_sift::crawler::{ParsedPage, SearchCriterion};
    ///
    /// let page = ParsedPage::parse(r#"<div class="highlight">hi</div>"#);
    /// assert!(SearchCriterion::ByClass("highlight".into()).matches(&page));
    /// assert!(!SearchCriterion::ByString("Hi".into()).matches(&page));
    /// ```
    pub fn matches(&self, page: &ParsedPage) -> bool {
        match self {
            Self::ByClass(class_name) => page.has_class(class_name),
            Self::ByString(term) => page.text_content().contains(term.as_str()),
        }
    }

    /// The class name or search term
    pub fn value(&self) -> &str {
        match self {
            Self::ByClass(value) | Self::ByString(value) => value,
        }
    }
}

impl fmt::Display for SearchCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByClass(class_name) => write!(f, "class \"{}\"", class_name),
            Self::ByString(term) => write!(f, "text \"{}\"", term),
        }
    }
}

/// Classifies a parsed page against a criterion
pub fn matches(page: &ParsedPage, criterion: &SearchCriterion) -> bool {
    criterion.matches(page)
}
