use crate::{
    collector::{ElementCollector, element_set::ElementSet},
    error::AppError,
    extract::{
        extract_script_cases, extract_test_cases,
        identity::{
            KeyedTestCase, ScriptLink, assign_case_keys, correlate_scripts, keyed_script_rows,
        },
        record_model::{ScriptRecord, TestCaseRecord},
    },
    generator::{
        TextGenerator,
        prompts::{PromptConfig, build_script_prompt, build_test_case_prompt},
    },
    trace::PipelineTrace,
};

pub const STAGE_COLLECT: &str = "collect";
pub const STAGE_TEST_CASES: &str = "test_cases";
pub const STAGE_SCRIPTS: &str = "scripts";

/// Scripts generated for a set of keyed test cases, one link per script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptStage {
    pub scripts: Vec<ScriptRecord>,
    pub links: Vec<ScriptLink>,
}

/// Everything one run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub url: String,
    pub elements: ElementSet,
    pub test_cases: Vec<KeyedTestCase>,
    pub scripts: ScriptStage,
}

impl PipelineOutput {
    /// Test case table rows, identified by their assigned keys.
    pub fn test_case_rows(&self) -> Vec<TestCaseRecord> {
        self.test_cases.iter().map(KeyedTestCase::table_row).collect()
    }

    /// Script table rows, identified by the key of the case they cover.
    pub fn script_rows(&self) -> Vec<ScriptRecord> {
        keyed_script_rows(&self.scripts.scripts, &self.scripts.links)
    }
}

/// Elements → test cases → scripts, with one generator call per stage.
pub struct Pipeline<'a> {
    generator: &'a dyn TextGenerator,
    prompt: PromptConfig,
    trace: PipelineTrace,
}

impl<'a> Pipeline<'a> {
    pub fn new(generator: &'a dyn TextGenerator, prompt: PromptConfig) -> Self {
        Self {
            generator,
            prompt,
            trace: PipelineTrace::off(),
        }
    }

    pub fn with_trace(mut self, trace: PipelineTrace) -> Self {
        self.trace = trace;
        self
    }

    /// Call the generator, treating a blank answer as fatal for `stage`.
    fn generate(&self, stage: &str, prompt: &str) -> Result<String, AppError> {
        tracing::info!(stage, generator = self.generator.name(), "requesting generation");
        let text = self.generator.generate(prompt)?;

        self.trace.generated(stage, self.generator.name(), prompt, &text);

        if text.trim().is_empty() {
            return Err(AppError::EmptyGeneration {
                stage: stage.to_string(),
            });
        }
        Ok(text)
    }

    /// Ask for test cases covering `elements` and parse the answer.
    pub fn generate_test_cases(&self, elements: &ElementSet) -> Result<Vec<TestCaseRecord>, AppError> {
        let prompt = build_test_case_prompt(elements, &self.prompt)?;
        let text = self.generate(STAGE_TEST_CASES, &prompt)?;
        let cases = extract_test_cases(&text);

        if cases.is_empty() {
            tracing::warn!("generator output contained no recognisable test cases");
        } else {
            tracing::info!(count = cases.len(), "extracted test cases");
        }
        self.trace.extracted(STAGE_TEST_CASES, cases.len());
        Ok(cases)
    }

    /// Ask for a script per keyed test case, parse the answer and link each
    /// script to the case whose key it names.
    pub fn generate_scripts(&self, keyed_cases: &[KeyedTestCase]) -> Result<ScriptStage, AppError> {
        let prompt = build_script_prompt(keyed_cases)?;
        let text = self.generate(STAGE_SCRIPTS, &prompt)?;
        let scripts = extract_script_cases(&text);
        let links = correlate_scripts(keyed_cases, &scripts);

        let unmatched = links.iter().filter(|l| l.case_key.is_none()).count();
        if unmatched > 0 {
            tracing::warn!(unmatched, "some scripts do not name a known test case key");
        }
        if scripts.len() < keyed_cases.len() {
            tracing::warn!(
                expected = keyed_cases.len(),
                found = scripts.len(),
                "fewer scripts than test cases; malformed fragments were skipped"
            );
        }
        tracing::info!(count = scripts.len(), "extracted scripts");
        self.trace.extracted(STAGE_SCRIPTS, scripts.len());

        Ok(ScriptStage { scripts, links })
    }

    /// Run every stage for the page at `url`.
    ///
    /// When no test cases could be extracted the script stage is skipped and
    /// the output carries no scripts.
    pub fn run(&self, collector: &mut dyn ElementCollector, url: &str) -> Result<PipelineOutput, AppError> {
        let elements = collector.collect(url)?;
        if elements.is_empty() {
            tracing::warn!(url, "no interactive elements found on page");
        }
        self.trace.collected(STAGE_COLLECT, url, &elements);

        let test_cases = assign_case_keys(&self.generate_test_cases(&elements)?);

        let scripts = if test_cases.is_empty() {
            tracing::warn!("skipping script generation: no test cases");
            ScriptStage::default()
        } else {
            self.generate_scripts(&test_cases)?
        };

        Ok(PipelineOutput {
            url: url.to_string(),
            elements,
            test_cases,
            scripts,
        })
    }
}
