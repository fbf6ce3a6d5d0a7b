use std::io::Read;
use std::path::Path;

use crate::cli::config::{AppConfig, Backend, GeneratorConfig};
use crate::collector::ElementCollector;
use crate::collector::session::BrowserSession;
use crate::error::AppError;
use crate::export::console::{format_elements, format_scripts, format_test_cases};
use crate::export::files::{ArtifactPaths, TableFormat, write_all, write_elements_json};
use crate::extract::{extract_script_cases, extract_test_cases};
use crate::generator::backend::{
    DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL, DEFAULT_OLLAMA_ENDPOINT, DEFAULT_OLLAMA_MODEL,
};
use crate::generator::{GeminiGenerator, OllamaGenerator, TextGenerator};
use crate::pipeline::Pipeline;
use crate::trace::PipelineTrace;

// ============================================================================
// run subcommand
// ============================================================================

/// Run the whole pipeline against `url` and write every artifact.
pub fn cmd_run(
    url: &str,
    output_dir: &str,
    format: TableFormat,
    config: &AppConfig,
    generator_config: &GeneratorConfig,
) -> Result<ArtifactPaths, AppError> {
    let generator = build_generator(generator_config)?;
    let trace = match config.trace_file.as_deref() {
        Some(path) => PipelineTrace::open(Path::new(path))?,
        None => PipelineTrace::off(),
    };
    let pipeline = Pipeline::new(generator.as_ref(), config.prompt.clone()).with_trace(trace);

    let mut session = BrowserSession::launch(&config.browser.server_script)?;
    let output = pipeline.run(&mut session, url);
    session.quit()?;
    let output = output?;

    print!("{}", format_elements(&output.elements));
    print!("{}", format_test_cases(&output.test_case_rows()));
    print!(
        "{}",
        format_scripts(&output.scripts.scripts, &output.scripts.links)
    );

    let paths = write_all(Path::new(output_dir), &output, format)?;

    println!("Wrote {}", paths.elements.display());
    println!("Wrote {}", paths.test_cases.display());
    println!("Wrote {}", paths.scripts.display());
    Ok(paths)
}

// ============================================================================
// elements subcommand
// ============================================================================

pub fn cmd_elements(url: &str, output_dir: &str, config: &AppConfig) -> Result<(), AppError> {
    let mut session = BrowserSession::launch(&config.browser.server_script)?;
    let elements = session.collect(url);
    session.quit()?;
    let elements = elements?;

    print!("{}", format_elements(&elements));
    let path = write_elements_json(Path::new(output_dir), &elements)?;
    println!("Wrote {}", path.display());
    Ok(())
}

// ============================================================================
// parse-cases / parse-scripts subcommands
// ============================================================================

/// Extract test cases from saved generator output and print them.
pub fn cmd_parse_cases(input: &str, json: bool) -> Result<(), AppError> {
    let text = read_input(input)?;
    let records = extract_test_cases(&text);

    if json {
        println!("{}", to_json(&records, "parsed test cases")?);
    } else {
        print!("{}", format_test_cases(&records));
    }
    Ok(())
}

/// Extract scripts from saved generator output and print them.
pub fn cmd_parse_scripts(input: &str, json: bool) -> Result<(), AppError> {
    let text = read_input(input)?;
    let records = extract_script_cases(&text);

    if json {
        println!("{}", to_json(&records, "parsed scripts")?);
    } else {
        print!("{}", format_scripts(&records, &[]));
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Build the text generator selected by the resolved settings.
pub fn build_generator(config: &GeneratorConfig) -> Result<Box<dyn TextGenerator>, AppError> {
    match config.backend {
        Backend::Ollama => {
            let endpoint = config.endpoint.as_deref().unwrap_or(DEFAULT_OLLAMA_ENDPOINT);
            let model = config.model.as_deref().unwrap_or(DEFAULT_OLLAMA_MODEL);
            Ok(Box::new(OllamaGenerator::new(endpoint, model)))
        }
        Backend::Gemini => {
            let endpoint = config.endpoint.as_deref().unwrap_or(DEFAULT_GEMINI_ENDPOINT);
            let model = config.model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL);
            Ok(Box::new(GeminiGenerator::from_env(
                &config.api_key_env,
                endpoint,
                model,
            )?))
        }
    }
}

/// Read a whole file, or stdin when `path` is `-`.
pub fn read_input(path: &str) -> Result<String, AppError> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| AppError::io("<stdin>", e))?;
        return Ok(text);
    }
    std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))
}

fn to_json<T: serde::Serialize>(value: &T, context: &str) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::JsonSerialize {
        context: context.into(),
        source: e,
    })
}
