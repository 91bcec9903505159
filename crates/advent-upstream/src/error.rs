use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("failed to encode GraphQL request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("empty response from upstream API")]
    EmptyResponse,

    #[error("GraphQL response carried no data: {messages}")]
    GraphQl { messages: String },
}
