/// Errors raised by the spider itself; transport and database errors are carried by
/// [`anyhow::Error`] instead.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A CIK must be 1 to 10 ASCII digits.
    #[error("invalid CIK {0:?}")]
    InvalidCik(String),

    /// An expected key is absent from a payload.
    #[error("missing key `{0}`")]
    MissingKey(&'static str),

    /// A key is present but does not hold an array.
    #[error("`{0}` is not a list")]
    NotAList(&'static str),
}
