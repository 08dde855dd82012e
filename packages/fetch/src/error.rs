#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("I can not handle protocol: {protocol:?},\n  known protocols are: {known:?}")]
    UnknownProtocol {
        protocol: String,
        known: Vec<String>,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, FetchError>;
