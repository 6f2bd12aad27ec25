//! Setup errors
//!
//! Only surface acquisition can fail. The simulation itself has no error
//! conditions; these abort initialization before the first frame.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("browser window not available")]
    NoWindow,
    #[error("document not available")]
    NoDocument,
    #[error("element `{selector}` not available")]
    MissingElement { selector: String },
    #[error("element `{selector}` is not a canvas")]
    NotACanvas { selector: String },
    #[error("cannot get 2d context for `{selector}`")]
    NoContext { selector: String },
}

impl SetupError {
    pub fn missing(selector: &str) -> Self {
        Self::MissingElement {
            selector: selector.to_string(),
        }
    }
}
