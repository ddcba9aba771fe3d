use thiserror::Error;

/// Top-level error type for arch generation.
#[derive(Debug, Error)]
pub enum ArchError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to topological operations.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("wire is not closed")]
    WireNotClosed,

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to shaping operations (offset, loft, extrude).
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Errors reported by a geometry kernel collaborator.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error("unknown {kind} handle")]
    UnknownHandle { kind: &'static str },

    #[error("profile has {found} loops, expected {expected}")]
    LoopCount { expected: usize, found: usize },

    #[error("no candidates to select a {0} from")]
    NoCandidates(&'static str),

    #[error("kernel call failed: {0}")]
    Failed(String),
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    #[error("invalid physical constants: {0}")]
    Constants(String),

    #[error("invalid offset margins: {0}")]
    Margins(String),

    #[error("invalid station table: {0}")]
    Stations(String),

    #[error("invalid feature setting: {0}")]
    Features(String),

    #[error("invalid arch name: {0}")]
    Name(String),
}

/// Convenience type alias for results using [`ArchError`].
pub type Result<T> = std::result::Result<T, ArchError>;
