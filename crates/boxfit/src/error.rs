pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] boxfit_core::Error),

    #[error("Invalid SVG document: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("No element with id: {id}")]
    ElementNotFound { id: String },
}
