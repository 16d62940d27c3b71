use crate::Result;
use console::{style, Style, StyledObject};
use dialoguer::{theme::ColorfulTheme, Input};

// Color shared by the question marker and the prompt.
const ACCENT: u8 = 45;

// region:       -- Follow-up Prompt

fn followup_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_style: Style::new().for_stderr().color256(ACCENT),
        prompt_prefix: style("?".to_string()).color256(ACCENT).for_stderr(),
        ..ColorfulTheme::default()
    }
}

/// Reads the next question. `None` when the user submits an empty line.
pub fn read_followup() -> Result<Option<String>> {
    let input: String = Input::with_theme(&followup_theme())
        .with_prompt("Another question (empty to quit)")
        .allow_empty(true)
        .interact_text()?;

    Ok(non_empty(&input))
}

fn non_empty(input: &str) -> Option<String> {
    let question = input.trim();
    (!question.is_empty()).then(|| question.to_string())
}

// endregion:    -- Follow-up Prompt

// region:       -- Line Markers

/// Left-hand marker of each status line the session prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Question,
    Uploaded,
    Ready,
    Unfinished,
}

impl Mark {
    fn symbol(self) -> &'static str {
        match self {
            Self::Question => "➤",
            Self::Uploaded => "↥",
            Self::Ready => "✔",
            Self::Unfinished => "✗",
        }
    }

    pub fn styled(self) -> StyledObject<&'static str> {
        let sym = style(self.symbol());
        match self {
            Self::Question => sym.color256(ACCENT),
            Self::Uploaded | Self::Ready => sym.green(),
            Self::Unfinished => sym.red(),
        }
    }
}

pub fn question_line(question: &str) -> String {
    format!("{} {}", Mark::Question.styled(), style(question).bright())
}

// endregion:    -- Line Markers
