use crate::ais::RunOutcome;
use derive_more::From;
use std::time::Duration;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, From)]
pub enum Error {
    // -- Config
    NoOpenAIApiKeyInEnv,
    InvalidPollConfig(String),

    // -- openFDA
    EmptyIndication,
    InvalidLimit(u32),
    // NOTE: Status and raw body, verbatim from the drug label API.
    FetchFailed {
        status: u16,
        body: String,
    },

    // -- Runs
    RunTimeout {
        run_id: String,
        waited: Duration,
    },
    RunUnsuccessful(RunOutcome),

    // -- Externals
    #[from]
    Io(std::io::Error),
    #[from]
    OpenAI(async_openai::error::OpenAIError),
    #[from]
    Reqwest(reqwest::Error),
    #[from]
    SerdeJson(serde_json::Error),
    #[from]
    SimpleFs(simple_fs::Error),
    #[from]
    TomlDe(toml::de::Error),
}

// region:       -- Error Boilerplate

impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}

// endregion:    -- Error Boilerplate
