// region:       -- Modules
mod error;
mod utils;

pub use self::error::{Error, Result};

use clinical_asst_core::{
    ais::{new_openai_client, AssistantService},
    openfda::DrugLabelClient,
    presenter, Clinic, Config, CLINICAL_TOML,
};
use console::Term;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use utils::cli::{question_line, read_followup, Mark};

// endregion:    -- Modules

const INDICATION: &str = "prostatitis";
const QUESTION: &str = "What are the most effective treatments for prostatitis?";
const DEFAULT_LOG_FILTER: &str = "clinical=info,clinical_asst_core=info,warn";

#[tokio::main]
async fn main() {
    // NOTE: Keep main() small, start() does the work.
    println!();

    match start().await {
        Ok(_) => println!("\nBye!\n"),
        Err(e) => {
            error!(error = ?e, "clinical session failed");
            println!("\nError: {}\n", e)
        }
    }
}

async fn start() -> Result<()> {
    // -- Env & logs
    // A missing .env is fine, the keys may already be exported.
    dotenvy::dotenv().ok();
    init_tracing();

    // -- Setup: fetch, package, provision
    let config = Config::load_or_default(CLINICAL_TOML)?;
    let oac = new_openai_client()?;
    let fda = DrugLabelClient::from_env();

    let clinic = Clinic::setup(oac, &fda, config, INDICATION).await?;
    println!(
        "{} Dataset '{}' uploaded as {}",
        Mark::Uploaded.styled(),
        clinic.artifact().path.display(),
        clinic.artifact().file_id
    );
    println!(
        "{} Assistant '{}' ready ({})",
        Mark::Ready.styled(),
        clinic.name(),
        clinic.assistant_id()
    );

    // -- Ask
    ask(&clinic, QUESTION).await?;

    // -- Follow-ups, each on a fresh thread
    if console::user_attended() {
        while let Some(question) = read_followup()? {
            ask(&clinic, &question).await?;
        }
    }

    Ok(())
}

async fn ask<S: AssistantService>(clinic: &Clinic<S>, question: &str) -> Result<()> {
    println!("{}", question_line(question));

    let transcript = clinic.ask(question).await?;
    match transcript.completed() {
        Ok(messages) => {
            info!(count = messages.len(), "run completed");
            let mut term = Term::stdout();
            presenter::render(&mut term, &messages)?;
        }
        Err(err) => {
            info!(error = %err, "run did not complete");
            println!("{} Run did not complete: {err}", Mark::Unfinished.styled())
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // stderr, so the transcript on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
