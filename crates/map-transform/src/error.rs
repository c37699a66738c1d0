use std::fmt;
use std::path::PathBuf;

use mapdoc::MapDocError;
use serde::Serialize;
use thiserror::Error;

/// Error categories reported to the user. The numeric code is the process
/// exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NoError = 0,
    InvalidCommand = 1,
    NoInputFiles = 2,
    NoOutputFiles = 3,
    FileDoesNotExist = 4,
    PathIsNotAFile = 5,
    FailedToOpenMap = 6,
    MapReadError = 7,
    FailedToSaveMap = 8,
    MapParseError = 9,
    MissingMapNode = 10,
    MissingPositionAttribute = 11,
    MismatchedInputOutputCount = 12,
    MapItemReadError = 13,
    OutOfMemory = 14,
    NoTransforms = 15,
}

impl ErrorKind {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::NoError => "No error",
            Self::InvalidCommand => "Invalid command",
            Self::NoInputFiles => "No input files",
            Self::NoOutputFiles => "No output files",
            Self::FileDoesNotExist => "File does not exist",
            Self::PathIsNotAFile => "Path is not a file",
            Self::FailedToOpenMap => "Failed to open map file",
            Self::MapReadError => "Failed to read map",
            Self::FailedToSaveMap => "Failed to save map file",
            Self::MapParseError => "Map parse error",
            Self::MissingMapNode => "Missing map node",
            Self::MissingPositionAttribute => "Missing pos attribute",
            Self::MismatchedInputOutputCount => "Mismatch input and output file count",
            Self::MapItemReadError => "Map item read error",
            Self::OutOfMemory => "Bad alloc. Failed to allocate memory",
            Self::NoTransforms => "No transforms given",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("No input files given")]
    NoInputFiles,

    #[error("No output files given")]
    NoOutputFiles,

    #[error("{inputs} input file(s) but {outputs} output file(s)")]
    MismatchedInputOutputCount { inputs: usize, outputs: usize },

    #[error("No transforms requested")]
    NoTransforms,

    #[error("File does not exist: {}", .0.display())]
    FileDoesNotExist(PathBuf),

    #[error("Path is not a file: {}", .0.display())]
    PathIsNotAFile(PathBuf),

    #[error("Failed to open {}: {source}", .path.display())]
    FailedToOpenMap {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    MapReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to save {}: {source}", .path.display())]
    FailedToSaveMap {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Document(#[from] MapDocError),
}

impl TransformError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCommand(_) => ErrorKind::InvalidCommand,
            Self::NoInputFiles => ErrorKind::NoInputFiles,
            Self::NoOutputFiles => ErrorKind::NoOutputFiles,
            Self::MismatchedInputOutputCount { .. } => ErrorKind::MismatchedInputOutputCount,
            Self::NoTransforms => ErrorKind::NoTransforms,
            Self::FileDoesNotExist(_) => ErrorKind::FileDoesNotExist,
            Self::PathIsNotAFile(_) => ErrorKind::PathIsNotAFile,
            Self::FailedToOpenMap { .. } => ErrorKind::FailedToOpenMap,
            Self::MapReadError { .. } => ErrorKind::MapReadError,
            Self::FailedToSaveMap { .. } => ErrorKind::FailedToSaveMap,
            Self::Document(e) => document_error_kind(e),
        }
    }
}

fn document_error_kind(e: &MapDocError) -> ErrorKind {
    match e {
        MapDocError::XmlParse(_) => ErrorKind::MapParseError,
        MapDocError::MissingMapNode { .. } => ErrorKind::MissingMapNode,
        MapDocError::MissingAttribute { .. } => ErrorKind::MissingPositionAttribute,
        MapDocError::InvalidCoordinate { .. } | MapDocError::UnformattableCoordinate { .. } => {
            ErrorKind::MapItemReadError
        }
        MapDocError::OutOfMemory(_) => ErrorKind::OutOfMemory,
        // Serializing into memory or a save target
        MapDocError::Io(_) => ErrorKind::FailedToSaveMap,
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
