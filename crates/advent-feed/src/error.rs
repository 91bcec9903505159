use thiserror::Error;

/// Errors raised while serialising a feed to XML.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error while writing XML: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("rendered feed is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
