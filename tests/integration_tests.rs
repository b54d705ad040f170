//! Integration tests for the resume relevance checker

use printpdf::{BuiltinFont, Mm, PdfDocument};
use resume_relevance::input::{extract_pdf_text, InputManager};
use resume_relevance::{
    KeywordMatcher, ModelHandle, RelevancePipeline, ResumeRelevanceError, SemanticScorer, SentenceEmbedder, Verdict,
};
use std::collections::BTreeSet;
use std::io::Write;
use std::sync::Arc;

/// Build a PDF with one text line per page.
fn make_pdf(pages: &[&str]) -> Vec<u8> {
    let (doc, first_page, first_layer) = PdfDocument::new("fixture", Mm(210.0), Mm(297.0), "Layer 1");
    let font = doc.add_builtin_font(BuiltinFont::Helvetica).unwrap();

    for (i, text) in pages.iter().enumerate() {
        let (page, layer) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(210.0), Mm(297.0), format!("Layer {}", i + 1))
        };
        doc.get_page(page)
            .get_layer(layer)
            .use_text(*text, 12.0, Mm(20.0), Mm(270.0), &font);
    }

    doc.save_to_bytes().unwrap()
}

fn write_temp_pdf(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file
}

/// Embeds by vowel counts; deterministic and cheap.
struct VowelEmbedder;

impl SentenceEmbedder for VowelEmbedder {
    fn embed(&self, text: &str) -> resume_relevance::Result<Vec<f32>> {
        Ok("aeiou"
            .chars()
            .map(|v| text.chars().filter(|c| *c == v).count() as f32)
            .collect())
    }

    fn model_id(&self) -> &str {
        "test/vowels"
    }
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

async fn pipeline() -> RelevancePipeline {
    let handle = ModelHandle::with_embedder(Arc::new(VowelEmbedder));
    let embedder = handle.get().await.unwrap();
    RelevancePipeline::new(KeywordMatcher::default(), SemanticScorer::new(embedder))
}

#[test]
fn test_pdf_text_is_lowercased() {
    let text = extract_pdf_text(&make_pdf(&["Senior Python Developer"])).unwrap();
    assert!(text.contains("senior python developer"));
    assert!(!text.contains("Python"));
}

#[test]
fn test_pages_are_concatenated_in_order() {
    let text = extract_pdf_text(&make_pdf(&["first page kubernetes", "second page tableau"])).unwrap();
    let first = text.find("kubernetes").unwrap();
    let second = text.find("tableau").unwrap();
    assert!(first < second);
}

#[tokio::test]
async fn test_end_to_end_from_pdf_files() {
    let resume = write_temp_pdf(&make_pdf(&["Data engineer: Python, SQL and Docker"]));
    let job = write_temp_pdf(&make_pdf(&["Requirements: Python, SQL, AWS"]));

    let manager = InputManager::new();
    let resume_pdf = manager.read_pdf(resume.path()).await.unwrap();
    let job_pdf = manager.read_pdf(job.path()).await.unwrap();

    let output = pipeline().await.score_pdfs(&resume_pdf, &job_pdf).unwrap();

    assert_eq!(output.resume_skills, set(&["docker", "python", "sql"]));
    assert_eq!(output.result.matched_skills, set(&["python", "sql"]));
    assert_eq!(output.result.missing_skills, set(&["aws"]));
    assert_eq!(format!("{:.2}", output.result.hard_score), "66.67");
    assert!((output.result.final_score
        - (0.6 * output.result.hard_score + 0.4 * output.result.semantic_score))
        .abs()
        < 1e-6);
}

#[tokio::test]
async fn test_identical_inputs_give_identical_results() {
    let resume = make_pdf(&["Machine learning with PyTorch", "Git and Docker"]);
    let job = make_pdf(&["Deep learning engineer, PyTorch and Kubernetes"]);

    let p = pipeline().await;
    let first = p.score_pdfs(&resume, &job).unwrap();
    let second = p.score_pdfs(&resume, &job).unwrap();
    assert_eq!(first.result, second.result);
}

#[tokio::test]
async fn test_job_without_known_skills_scores_zero_hard_match() {
    let resume = make_pdf(&["Python and SQL"]);
    let job = make_pdf(&["Friendly barista wanted"]);

    let output = pipeline().await.score_pdfs(&resume, &job).unwrap();
    assert_eq!(output.result.hard_score, 0.0);
    assert!(output.result.matched_skills.is_empty());
    assert!(output.result.missing_skills.is_empty());
    assert_eq!(output.result.verdict, Verdict::from_score(0.4 * output.result.semantic_score));
}

#[tokio::test]
async fn test_malformed_upload_is_rejected() {
    let bogus = write_temp_pdf(b"%PDF-1.7\nthis file was truncated");
    let manager = InputManager::new();

    let bytes = manager.read_pdf(bogus.path()).await.unwrap();
    let err = pipeline().await.score_pdfs(&bytes, &make_pdf(&["python"])).unwrap_err();
    assert!(matches!(err, ResumeRelevanceError::DocumentParse(_)));
}
