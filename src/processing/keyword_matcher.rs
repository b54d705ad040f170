//! Whole-word skill matching against the fixed vocabulary

use crate::error::{Result, ResumeRelevanceError};
use regex::Regex;
use std::collections::BTreeSet;

/// Recognized skill and technology terms, in display order.
pub const SKILL_VOCABULARY: [&str; 19] = [
    "python",
    "java",
    "c++",
    "sql",
    "machine learning",
    "deep learning",
    "nlp",
    "excel",
    "tableau",
    "power bi",
    "django",
    "flask",
    "react",
    "aws",
    "git",
    "docker",
    "kubernetes",
    "tensorflow",
    "pytorch",
];

/// Matches vocabulary terms as literal, case-insensitive, token-delimited phrases.
///
/// A term counts only when it is preceded by start of text or a non-word
/// character and followed by end of text or a non-word character. For
/// alphanumeric terms this is the same as `\b` anchoring; unlike `\b` it also
/// lets terms that end in punctuation, such as `c++`, match before a space.
pub struct KeywordMatcher {
    patterns: Vec<(String, Regex)>,
}

impl KeywordMatcher {
    pub fn new<I, S>(vocabulary: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = vocabulary
            .into_iter()
            .map(|term| {
                let term = term.as_ref().to_lowercase();
                let pattern = format!(r"(?i)(?:^|\W){}(?:\W|$)", regex::escape(&term));
                Regex::new(&pattern)
                    .map(|re| (term.clone(), re))
                    .map_err(|e| {
                        ResumeRelevanceError::TextProcessing(format!(
                            "Failed to build matcher for '{}': {}",
                            term, e
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Return the vocabulary terms present in `text`.
    pub fn find_skills(&self, text: &str) -> BTreeSet<String> {
        self.patterns
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(term, _)| term.clone())
            .collect()
    }

    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|(term, _)| term.as_str())
    }

    pub fn skill_count(&self) -> usize {
        self.patterns.len()
    }
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new(SKILL_VOCABULARY).expect("escaped vocabulary patterns always compile")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(text: &str) -> Vec<String> {
        KeywordMatcher::default().find_skills(text).into_iter().collect()
    }

    #[test]
    fn test_matcher_creation() {
        let matcher = KeywordMatcher::default();
        assert_eq!(matcher.skill_count(), 19);
        assert_eq!(matcher.vocabulary().next(), Some("python"));
    }

    #[test]
    fn test_java_does_not_match_javascript() {
        assert!(skills("javascript developer").is_empty());
    }

    #[test]
    fn test_java_and_sql_match() {
        assert_eq!(skills("expert in java and sql"), vec!["java", "sql"]);
    }

    #[test]
    fn test_cpp_is_literal() {
        assert_eq!(skills("proficient in c++ programming"), vec!["c++"]);
        assert_eq!(skills("wrote c++"), vec!["c++"]);
        // `+` must not be read as a quantifier
        assert!(skills("cc programming").is_empty());
    }

    #[test]
    fn test_multi_word_phrase_must_be_contiguous() {
        assert_eq!(skills("dashboards in power bi daily"), vec!["power bi"]);
        assert!(skills("power users of bi tools").is_empty());
        assert!(skills("power  bi").is_empty());
    }

    #[test]
    fn test_case_insensitive_and_punctuation_boundaries() {
        assert_eq!(
            skills("Skills: Python, Docker/Kubernetes (AWS)."),
            vec!["aws", "docker", "kubernetes", "python"]
        );
    }

    #[test]
    fn test_partial_words_do_not_match() {
        assert!(skills("gitlab pythonic reactive flasks").is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(skills("sql sql SQL"), vec!["sql"]);
    }

    #[test]
    fn test_no_terms_yields_empty_set() {
        assert!(skills("").is_empty());
        assert!(skills("gardening and woodworking").is_empty());
    }

    #[test]
    fn test_custom_vocabulary_escapes_metacharacters() {
        let matcher = KeywordMatcher::new(["c#", ".net", "node.js"]).unwrap();
        let found = matcher.find_skills("c# and .net services, no nodexjs");
        assert!(found.contains("c#"));
        assert!(found.contains(".net"));
        assert!(!found.contains("node.js"));
    }
}
