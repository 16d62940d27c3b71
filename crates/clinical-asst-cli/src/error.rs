use derive_more::From;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, From)]
pub enum Error {
    #[from]
    Core(clinical_asst_core::Error),
    #[from]
    Dialoguer(dialoguer::Error),
    #[from]
    Io(std::io::Error),
}

// region:       -- Error Boilerplate

impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        match self {
            Self::Core(err) => write!(fmt, "{err}"),
            other => write!(fmt, "{other:?}"),
        }
    }
}

impl std::error::Error for Error {}

// endregion:    -- Error Boilerplate
