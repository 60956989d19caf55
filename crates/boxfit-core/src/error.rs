pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to run geometry query `{program}`: {source}")]
    Subprocess {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Geometry query `{program}` exited with {status}: {stderr}")]
    SubprocessFailed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("Malformed geometry output (line {line}): {message}")]
    MalformedGeometry { line: usize, message: String },

    #[error("No geometry for object: {id}")]
    MissingGeometry { id: String },

    #[error("Geometry for {id} is not finite: {attribute} = {value}")]
    NonFiniteGeometry {
        id: String,
        attribute: crate::matcher::Attribute,
        value: f64,
    },

    #[error("No candidate box for text element: {text_id}")]
    NoCandidateBox { text_id: String },

    #[error("Invalid {side} padding {expr:?}: {message}")]
    InvalidPadding {
        side: &'static str,
        expr: String,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
