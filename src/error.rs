use std::fmt;

/// Failure taxonomy for the whole pipeline. Every variant is fatal:
/// nothing is retried, a failed frame aborts the run.
#[derive(Debug)]
pub enum PipelineError {
    /// Bad invocation: missing arguments, unknown output mode.
    Usage(String),
    /// Video source exhausted or unreadable.
    Decode(String),
    /// Network weights, deploy descriptor, or mean file incompatible
    /// or unparseable.
    ModelLoad(String),
    /// Forward pass requested before a network was loaded. The handle
    /// returned by `load` makes this unrepresentable in safe use; kept
    /// so callers can match the full taxonomy.
    NotLoaded,
    /// Output file could not be created or written.
    Io(String),
    /// Forward pass failed inside the inference runtime.
    Runtime(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Usage(msg) => write!(f, "usage error: {msg}"),
            PipelineError::Decode(msg) => write!(f, "decode error: {msg}"),
            PipelineError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            PipelineError::NotLoaded => write!(f, "network not loaded"),
            PipelineError::Io(msg) => write!(f, "io error: {msg}"),
            PipelineError::Runtime(msg) => write!(f, "runtime error: {msg}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Io(err.to_string())
    }
}

impl From<opencv::Error> for PipelineError {
    fn from(err: opencv::Error) -> Self {
        PipelineError::Decode(err.to_string())
    }
}
