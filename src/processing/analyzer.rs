//! Hybrid scoring: keyword overlap blended with semantic similarity

use crate::error::Result;
use crate::input::extract_pdf_text;
use crate::processing::embeddings::SemanticScorer;
use crate::processing::keyword_matcher::KeywordMatcher;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub const KEYWORD_WEIGHT: f64 = 0.6;
pub const SEMANTIC_WEIGHT: f64 = 0.4;
pub const HIGH_THRESHOLD: f64 = 70.0;
pub const MEDIUM_THRESHOLD: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    High,
    Medium,
    Low,
}

impl Verdict {
    /// Bands are evaluated high to low; the first one that holds wins.
    pub fn from_score(final_score: f64) -> Self {
        if final_score >= HIGH_THRESHOLD {
            Verdict::High
        } else if final_score >= MEDIUM_THRESHOLD {
            Verdict::Medium
        } else {
            Verdict::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::High => "High Suitability",
            Verdict::Medium => "Medium Suitability",
            Verdict::Low => "Low Suitability",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one scoring pass. Built once by `aggregate`, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub matched_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    pub hard_score: f64,
    pub semantic_score: f64,
    pub final_score: f64,
    pub verdict: Verdict,
}

/// Percentage of job-description skills also present in the resume.
/// Defined as 0 when the job description has no recognized skills.
pub fn hard_match_score(resume_skills: &BTreeSet<String>, jd_skills: &BTreeSet<String>) -> f64 {
    if jd_skills.is_empty() {
        return 0.0;
    }
    let matched = jd_skills.intersection(resume_skills).count();
    100.0 * matched as f64 / jd_skills.len() as f64
}

/// Combine skill sets and component scores into a final result.
pub fn aggregate(
    resume_skills: &BTreeSet<String>,
    jd_skills: &BTreeSet<String>,
    hard_score: f64,
    semantic_score: f64,
) -> ScoreResult {
    let matched_skills: BTreeSet<String> = resume_skills.intersection(jd_skills).cloned().collect();
    let missing_skills: BTreeSet<String> = jd_skills.difference(resume_skills).cloned().collect();

    let final_score = KEYWORD_WEIGHT * hard_score + SEMANTIC_WEIGHT * semantic_score;

    ScoreResult {
        matched_skills,
        missing_skills,
        hard_score,
        semantic_score,
        final_score,
        verdict: Verdict::from_score(final_score),
    }
}

/// Per-run scoring breakdown, including the raw skill sets of both documents.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub resume_skills: BTreeSet<String>,
    pub jd_skills: BTreeSet<String>,
    pub result: ScoreResult,
}

/// Runs extraction, keyword matching, semantic scoring and aggregation.
pub struct RelevancePipeline {
    matcher: KeywordMatcher,
    scorer: SemanticScorer,
}

impl RelevancePipeline {
    pub fn new(matcher: KeywordMatcher, scorer: SemanticScorer) -> Self {
        Self { matcher, scorer }
    }

    pub fn model_id(&self) -> &str {
        self.scorer.model_id()
    }

    /// Score two PDFs given as raw bytes.
    pub fn score_pdfs(&self, resume_pdf: &[u8], jd_pdf: &[u8]) -> Result<PipelineOutput> {
        info!("Extracting text from resume and job description");
        let resume_text = extract_pdf_text(resume_pdf)?;
        let jd_text = extract_pdf_text(jd_pdf)?;
        self.score_texts(&resume_text, &jd_text)
    }

    /// Score two already-extracted, lowercased texts.
    pub fn score_texts(&self, resume_text: &str, jd_text: &str) -> Result<PipelineOutput> {
        debug!(
            "Resume text: {} chars, job description text: {} chars",
            resume_text.len(),
            jd_text.len()
        );

        let resume_skills = self.matcher.find_skills(resume_text);
        let jd_skills = self.matcher.find_skills(jd_text);
        debug!("Resume skills: {:?}", resume_skills);
        debug!("Job description skills: {:?}", jd_skills);

        let hard_score = hard_match_score(&resume_skills, &jd_skills);

        info!("Computing semantic similarity with {}", self.scorer.model_id());
        let semantic_score = self.scorer.similarity(resume_text, jd_text)?;

        let result = aggregate(&resume_skills, &jd_skills, hard_score, semantic_score);
        info!(
            "Final score {:.2} ({}): hard {:.2}, semantic {:.2}",
            result.final_score, result.verdict, result.hard_score, result.semantic_score
        );

        Ok(PipelineOutput {
            resume_skills,
            jd_skills,
            result,
        })
    }
}
