use super::store;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Clone)]
pub enum Error {
    MissingFields,
    PhoneRequired,
    Store(store::Error),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields => write!(f, "All fields are required"),
            Self::PhoneRequired => write!(f, "phone required"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl From<store::Error> for Error {
    fn from(value: store::Error) -> Self {
        Self::Store(value)
    }
}

impl std::error::Error for Error {}
