use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

/// Rendering failures are fatal for the request and never retried; they
/// indicate a broken deployment rather than transient load.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The drawing toolchain is missing from the deployment
    #[error("Rendering backend unavailable: {0} (is Graphviz installed?)")]
    BackendUnavailable(String),

    /// The backend ran but rejected the graph
    #[error("Rendering backend failed (exit {status}): {stderr}")]
    BackendFailed { status: i32, stderr: String },

    /// I/O error while feeding the backend
    #[error("I/O error talking to rendering backend: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Unsupported layout direction: {0}")]
    UnsupportedDirection(String),
}
