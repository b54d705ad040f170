//! Resume relevance checker: hybrid keyword + semantic scoring of a resume against a job description

use clap::Parser;
use log::{error, info};
use resume_relevance::cli::{self, Cli, Commands, ConfigAction, ModelAction};
use resume_relevance::config::Config;
use resume_relevance::error::{Result, ResumeRelevanceError};
use resume_relevance::input::InputManager;
use resume_relevance::output::{save_report_to_file, RelevanceReport, ReportGenerator};
use resume_relevance::processing::embedding_manager::ModelHandle;
use resume_relevance::processing::embeddings::SemanticScorer;
use resume_relevance::processing::keyword_matcher::KeywordMatcher;
use resume_relevance::RelevancePipeline;
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        if e.is_upload_rejection() {
            error!("Upload rejected, please provide a valid PDF: {}", e);
        } else {
            error!("Command failed: {}", e);
        }
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Check {
            resume,
            job,
            output,
            save,
            no_color,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeRelevanceError::InvalidInput)?,
                None => config.output.format,
            };
            let use_colors = config.output.color_output && !no_color && save.is_none();

            let start_time = Instant::now();
            info!("Starting relevance check");

            // Both uploads are validated before the model is touched
            let input_manager = InputManager::new();
            let resume_pdf = input_manager.read_pdf(&resume).await?;
            let job_pdf = input_manager.read_pdf(&job).await?;

            let model_handle = ModelHandle::new(&config);
            let embedder = model_handle.get().await?;
            let pipeline = RelevancePipeline::new(KeywordMatcher::default(), SemanticScorer::new(embedder));

            let pipeline_output = pipeline.score_pdfs(&resume_pdf, &job_pdf)?;
            let report = RelevanceReport::new(
                pipeline_output,
                &resume,
                &job,
                pipeline.model_id(),
                start_time.elapsed().as_millis() as u64,
            );

            let rendered = ReportGenerator::new(use_colors).generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Skills => {
            let matcher = KeywordMatcher::default();
            println!("Recognized skills ({}):", matcher.skill_count());
            for skill in matcher.vocabulary() {
                println!("  • {}", skill);
            }
        }

        Commands::Models { action } => {
            let model_handle = ModelHandle::new(&config);

            match action {
                ModelAction::Download { force } => {
                    if !force && model_handle.cached_files().is_some() {
                        println!("✅ Model '{}' is already downloaded", model_handle.model_id());
                        println!("💡 Use --force to re-download");
                        return Ok(());
                    }

                    let files = model_handle.ensure_files(force).await?;
                    println!("✅ Model '{}' downloaded", model_handle.model_id());
                    println!("📁 Weights: {}", files.weights.display());
                }

                ModelAction::Info => {
                    println!("Model: {}", model_handle.model_id());
                    println!("Cache: {}", model_handle.cache_dir().display());
                    match model_handle.cached_files() {
                        Some(files) => {
                            println!("Status: ✅ Downloaded");
                            println!("Weights: {}", files.weights.display());
                        }
                        None => {
                            println!("Status: ⬇️  Not downloaded");
                            println!("💡 Run: resume-relevance models download");
                        }
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("{}", config.to_toml()?);
            }
            Some(ConfigAction::Default) => {
                println!("{}", Config::default().to_toml()?);
                println!("# Save as {}", Config::config_path().display());
            }
        },
    }

    Ok(())
}
