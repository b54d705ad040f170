//! Report structure handed to the formatters

use crate::processing::analyzer::{PipelineOutput, ScoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// A scoring result together with the context it was produced in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevanceReport {
    pub result: ScoreResult,
    pub resume_skills: BTreeSet<String>,
    pub jd_skills: BTreeSet<String>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub resume_file: String,
    pub job_file: String,
    pub embedding_model: String,
    pub processing_time_ms: u64,
    pub generated_at: DateTime<Utc>,
    pub version: String,
}

impl RelevanceReport {
    pub fn new(
        output: PipelineOutput,
        resume_path: &Path,
        job_path: &Path,
        embedding_model: &str,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            result: output.result,
            resume_skills: output.resume_skills,
            jd_skills: output.jd_skills,
            metadata: ReportMetadata {
                resume_file: display_name(resume_path),
                job_file: display_name(job_path),
                embedding_model: embedding_model.to_string(),
                processing_time_ms,
                generated_at: Utc::now(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
