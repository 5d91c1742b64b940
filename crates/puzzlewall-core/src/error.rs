pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid input ({format}): {message}")]
    InvalidInput {
        format: &'static str,
        message: String,
    },

    #[error(
        "Unsupported document shape: expected an item array, an object with `items`, or a tree with `label`/`children` (got {found})"
    )]
    UnsupportedDocument { found: &'static str },

    #[error("Invalid config value for `{key}`: {message}")]
    InvalidConfig { key: String, message: String },
}
