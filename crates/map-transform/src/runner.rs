use std::path::{Path, PathBuf};

use log::{info, warn};
use mapdoc::Point3;
use serde::Serialize;

use crate::config::RunConfig;
use crate::driver::transform_map;
use crate::error::{ErrorKind, Result, TransformError};
use crate::pipeline::PipelineAssembler;
use crate::utils::file::{load_map_file, save_map_file};

/// Result of processing one input/output pair.
#[derive(Debug, Serialize)]
pub struct DocumentOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(flatten)]
    pub status: DocumentStatus,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentStatus {
    Transformed {
        items: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        center: Option<[f64; 3]>,
    },
    Failed {
        kind: ErrorKind,
        code: u8,
        #[serde(serialize_with = "serialize_error")]
        error: TransformError,
    },
}

fn serialize_error<S: serde::Serializer>(
    error: &TransformError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

impl DocumentOutcome {
    pub fn error(&self) -> Option<&TransformError> {
        match &self.status {
            DocumentStatus::Failed { error, .. } => Some(error),
            DocumentStatus::Transformed { .. } => None,
        }
    }
}

/// Outcome of every document in a run, in input order.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub documents: Vec<DocumentOutcome>,
}

impl RunReport {
    pub fn failures(&self) -> impl Iterator<Item = (&DocumentOutcome, &TransformError)> {
        self.documents
            .iter()
            .filter_map(|d| d.error().map(|e| (d, e)))
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Kind of the first failed document, or `NoError`.
    pub fn exit_kind(&self) -> ErrorKind {
        self.failures()
            .next()
            .map_or(ErrorKind::NoError, |(_, e)| e.kind())
    }
}

/// Check the configuration before any file is read or written.
pub fn validate(config: &RunConfig) -> Result<()> {
    if config.inputs.is_empty() {
        return Err(TransformError::NoInputFiles);
    }
    if config.outputs.is_empty() {
        return Err(TransformError::NoOutputFiles);
    }
    if config.inputs.len() != config.outputs.len() {
        return Err(TransformError::MismatchedInputOutputCount {
            inputs: config.inputs.len(),
            outputs: config.outputs.len(),
        });
    }
    if !config.has_transforms() {
        return Err(TransformError::NoTransforms);
    }
    Ok(())
}

/// Transform every input map into its output path, one document at a time.
///
/// Configuration problems fail the whole run up front. A failing document
/// is recorded in the report and does not stop the documents after it; its
/// output file is never written.
pub fn run(config: &RunConfig) -> Result<RunReport> {
    validate(config)?;

    let assembler = PipelineAssembler::new(config);
    let mut report = RunReport::default();

    for (input, output) in config.inputs.iter().zip(&config.outputs) {
        info!("Transforming {} -> {}", input.display(), output.display());
        let status = match process_document(&assembler, input, output) {
            Ok((items, center)) => DocumentStatus::Transformed {
                items,
                center: center.map(|c| c.to_array()),
            },
            Err(error) => {
                warn!("{}: {error}", input.display());
                DocumentStatus::Failed {
                    kind: error.kind(),
                    code: error.kind().code(),
                    error,
                }
            }
        };
        report.documents.push(DocumentOutcome {
            input: input.clone(),
            output: output.clone(),
            status,
        });
    }

    Ok(report)
}

fn process_document(
    assembler: &PipelineAssembler<'_>,
    input: &Path,
    output: &Path,
) -> Result<(usize, Option<Point3>)> {
    let mut doc = load_map_file(input)?;
    let pipeline = assembler.assemble(&doc)?;
    let items = transform_map(&mut doc, &pipeline.queue)?;
    save_map_file(output, &doc)?;
    Ok((items, pipeline.center))
}
