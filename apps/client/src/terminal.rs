//! Terminal front end for the trivia game.
//!
//! Reads choices line by line from any async reader and writes to any
//! `io::Write`, so the whole game loop can be driven from a script in tests.

use std::io::Write;
use std::time::Duration;

use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use trivia_core::{AnswerOutcome, Difficulty, GameSettings, Score, SessionStatus, CATEGORIES};

use crate::game::{Game, LoadOutcome, PresentedQuestion};

/// What to do once a round is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Next {
    NewGame,
    Replay,
    Quit,
}

pub struct Terminal<R, W> {
    game: Game,
    input: R,
    output: W,
    reveal_delay: Duration,
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(game: Game, input: R, output: W) -> Self {
        Self {
            game,
            input,
            output,
            reveal_delay: Duration::ZERO,
        }
    }

    /// Pause between revealing an answer and showing the next question.
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }

    /// Give back the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run games until the player quits or input ends.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut next = Next::NewGame;
        loop {
            match next {
                Next::NewGame => {
                    if !self.load_questions().await? {
                        break;
                    }
                }
                Next::Replay => {
                    self.game.reset_to_start().await?;
                }
                Next::Quit => break,
            }

            if !self.play_round().await? {
                break;
            }
            next = self.end_menu().await?;
        }

        writeln!(self.output, "Thanks for playing!")?;
        Ok(())
    }

    /// Fetch questions until a non-empty batch loads. Returns false on quit.
    async fn load_questions(&mut self) -> anyhow::Result<bool> {
        loop {
            writeln!(self.output, "\nLoading questions...")?;
            self.output.flush()?;

            let message = match self.game.new_game().await {
                Ok(LoadOutcome::Loaded {
                    status: SessionStatus::Active,
                    ..
                }) => return Ok(true),
                Ok(LoadOutcome::Loaded { .. }) => {
                    "No questions available. Please try again.".to_string()
                }
                Ok(LoadOutcome::Superseded) => continue,
                Err(err) => err.user_message(),
            };
            writeln!(self.output, "{}", message.red())?;

            writeln!(self.output, "[r] Retry  [s] Change settings  [q] Quit")?;
            match self.read_key(&["r", "s", "q"]).await? {
                Some("r") => {}
                Some("s") => self.settings_menu().await?,
                _ => return Ok(false),
            }
        }
    }

    /// Play the loaded session to the end. Returns false if input ran out.
    async fn play_round(&mut self) -> anyhow::Result<bool> {
        while self.game.status().await == SessionStatus::Active {
            let question = self.game.present_current().await?;
            render_question(&mut self.output, &question)?;

            let Some(choice) = self.read_choice(question.answers.len()).await? else {
                return Ok(false);
            };
            let outcome = self.game.submit_answer(&question.answers[choice]).await?;
            render_feedback(&mut self.output, &question, &outcome)?;
            render_score(&mut self.output, self.game.score().await)?;
            self.output.flush()?;

            if !self.reveal_delay.is_zero() {
                tokio::time::sleep(self.reveal_delay).await;
            }
            self.game.advance().await?;
        }
        Ok(true)
    }

    async fn end_menu(&mut self) -> anyhow::Result<Next> {
        let score = self.game.score().await;
        writeln!(self.output, "\n{}", "Game over!".bold())?;
        writeln!(self.output, "Final score: {}", score)?;

        writeln!(
            self.output,
            "[p] Play again  [r] Reset  [s] Change settings  [q] Quit"
        )?;
        let next = match self.read_key(&["p", "r", "s", "q"]).await? {
            Some("p") => Next::NewGame,
            Some("r") => Next::Replay,
            Some("s") => {
                self.settings_menu().await?;
                Next::NewGame
            }
            Some(_) | None => Next::Quit,
        };
        Ok(next)
    }

    /// Pick a category and difficulty, then confirm before applying.
    async fn settings_menu(&mut self) -> anyhow::Result<()> {
        let current = self.game.settings().await;

        writeln!(self.output, "\nCategory (enter keeps {}):", current.category_name())?;
        for (i, category) in CATEGORIES.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, category.name)?;
        }
        let category_id = match self.read_optional_choice(CATEGORIES.len()).await? {
            Some(Some(i)) => CATEGORIES[i].id,
            Some(None) => current.category_id,
            None => return Ok(()),
        };

        writeln!(
            self.output,
            "\nDifficulty (enter keeps {}):",
            current.difficulty_name()
        )?;
        writeln!(self.output, "  1. Any Difficulty")?;
        for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 2, difficulty.label())?;
        }
        let difficulty = match self.read_optional_choice(Difficulty::ALL.len() + 1).await? {
            Some(Some(0)) => None,
            Some(Some(i)) => Some(Difficulty::ALL[i - 1]),
            Some(None) => current.difficulty,
            None => return Ok(()),
        };

        let settings = GameSettings::new(category_id, difficulty);
        writeln!(self.output, "\n{}", settings.describe())?;
        writeln!(self.output, "Apply these settings? [y/n]")?;
        if self.read_key(&["y", "n"]).await? == Some("y") {
            self.game.set_settings(settings).await;
            writeln!(self.output, "{}", "Settings updated.".green())?;
        }
        Ok(())
    }

    /// Read one trimmed line. `None` once input is exhausted.
    async fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            debug!("input closed");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Read until the player picks one of `keys`.
    async fn read_key(&mut self, keys: &[&'static str]) -> anyhow::Result<Option<&'static str>> {
        loop {
            let Some(line) = self.read_line().await? else {
                return Ok(None);
            };
            let line = line.to_lowercase();
            if let Some(key) = keys.iter().find(|k| **k == line) {
                return Ok(Some(*key));
            }
            writeln!(self.output, "Please enter one of: {}", keys.join(", "))?;
        }
    }

    /// Read a 1-based choice out of `count`, returned 0-based.
    async fn read_choice(&mut self, count: usize) -> anyhow::Result<Option<usize>> {
        loop {
            match self.read_optional_choice(count).await? {
                Some(Some(choice)) => return Ok(Some(choice)),
                Some(None) => {
                    writeln!(self.output, "Please enter a number from 1 to {}", count)?
                }
                None => return Ok(None),
            }
        }
    }

    /// Like [`read_choice`](Self::read_choice), but a blank line yields `Some(None)`.
    async fn read_optional_choice(
        &mut self,
        count: usize,
    ) -> anyhow::Result<Option<Option<usize>>> {
        loop {
            let Some(line) = self.read_line().await? else {
                return Ok(None);
            };
            if line.is_empty() {
                return Ok(Some(None));
            }
            match parse_choice(&line, count) {
                Some(choice) => return Ok(Some(Some(choice))),
                None => writeln!(self.output, "Please enter a number from 1 to {}", count)?,
            }
        }
    }
}

/// Parse a 1-based menu choice into a 0-based index.
pub fn parse_choice(input: &str, count: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=count).contains(&n).then(|| n - 1)
}

pub fn render_question<W: Write>(out: &mut W, question: &PresentedQuestion) -> std::io::Result<()> {
    writeln!(out)?;
    write!(out, "{}  |  {}", question.position, question.category)?;
    if let Some(difficulty) = question.difficulty {
        write!(out, "  |  {}", difficulty.label())?;
    }
    writeln!(out)?;
    writeln!(out, "{}", question.question.bold())?;
    for (i, answer) in question.answers.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, answer)?;
    }
    Ok(())
}

/// Show the answers again with the correct one in green and a wrong pick in red.
pub fn render_feedback<W: Write>(
    out: &mut W,
    question: &PresentedQuestion,
    outcome: &AnswerOutcome,
) -> std::io::Result<()> {
    for (i, answer) in question.answers.iter().enumerate() {
        let line = format!("  {}. {}", i + 1, answer);
        if *answer == outcome.correct_answer {
            writeln!(out, "{}", line.green().bold())?;
        } else if *answer == outcome.submitted {
            writeln!(out, "{}", line.red())?;
        } else {
            writeln!(out, "{}", line)?;
        }
    }

    if outcome.is_correct {
        writeln!(out, "{}", "Correct!".green().bold())
    } else {
        writeln!(
            out,
            "{} The correct answer was: {}",
            "Wrong!".red().bold(),
            outcome.correct_answer
        )
    }
}

pub fn render_score<W: Write>(out: &mut W, score: Score) -> std::io::Result<()> {
    writeln!(out, "Score: {}", score)
}
