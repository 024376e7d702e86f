use std::io::{self, BufRead, Write};

use quiz_core::model::{QuestionDraft, QuestionSet};
use quiz_core::session::Verdict;
use services::QuestionService;

use crate::menu::{MENU_PROMPT, MenuChoice};

/// Interactive menu shell over arbitrary input/output streams.
///
/// Keeping the streams generic lets tests drive a whole session from an
/// in-memory transcript.
pub struct Shell<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Prompts and reads one trimmed line.
    ///
    /// `None` means the input stream ended, which the caller treats as
    /// quitting.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    /// Runs the menu loop until the user quits, the input ends, or a quiz
    /// session completes.
    pub async fn run(
        &mut self,
        service: &QuestionService,
        set: &mut QuestionSet,
    ) -> io::Result<()> {
        loop {
            let Some(line) = self.prompt(MENU_PROMPT)? else {
                return Ok(());
            };
            let Some(choice) = MenuChoice::from_input(&line) else {
                writeln!(
                    self.out,
                    "Invalid input. Please enter a number between 1 and 6."
                )?;
                continue;
            };

            match choice {
                MenuChoice::AddQuestions => self.add_questions(service, set).await?,
                MenuChoice::DeleteQuestion => self.delete_question(service, set).await?,
                MenuChoice::ViewQuestions => self.view_questions(set)?,
                MenuChoice::StartQuiz => {
                    if self.start_quiz(service, set).await? {
                        return Ok(());
                    }
                }
                MenuChoice::ClearAll => self.clear_all(service, set).await?,
                MenuChoice::Quit => return Ok(()),
            }
        }
    }

    /// Collects question/answer pairs until the user enters `done`.
    async fn add_questions(
        &mut self,
        service: &QuestionService,
        set: &mut QuestionSet,
    ) -> io::Result<()> {
        loop {
            let Some(text) =
                self.prompt("Enter a question to add to the quiz (enter \"done\" if done): ")?
            else {
                return Ok(());
            };
            if text.eq_ignore_ascii_case("done") {
                return Ok(());
            }
            let Some(answer) = self.prompt("Enter the answer to the question: ")? else {
                return Ok(());
            };

            match service
                .add_question(set, QuestionDraft::new(text, answer))
                .await
            {
                Ok(()) => {}
                Err(err) => writeln!(self.out, "Could not add the question: {err}")?,
            }
        }
    }

    async fn delete_question(
        &mut self,
        service: &QuestionService,
        set: &mut QuestionSet,
    ) -> io::Result<()> {
        if set.is_empty() {
            writeln!(self.out, "No questions available.")?;
            return Ok(());
        }

        let Some(line) = self.prompt("Enter the number of the question to delete: ")? else {
            return Ok(());
        };
        let Ok(position) = line.parse::<usize>() else {
            writeln!(self.out, "Invalid question number. Please enter a number.")?;
            return Ok(());
        };

        match service.delete_question(set, position).await {
            Ok(removed) => writeln!(self.out, "Question deleted: {}", removed.text())?,
            Err(err) => writeln!(self.out, "Could not delete the question: {err}")?,
        }
        Ok(())
    }

    fn view_questions(&mut self, set: &QuestionSet) -> io::Result<()> {
        if set.is_empty() {
            writeln!(self.out, "No questions available.")?;
            return Ok(());
        }
        writeln!(self.out, "Existing questions:")?;
        for (position, question) in set.entries() {
            writeln!(self.out, "({position}.) {}", question.text())?;
        }
        Ok(())
    }

    /// Runs one quiz session. Returns true when a session ran (complete or
    /// aborted by end of input), after which the shell exits.
    async fn start_quiz(
        &mut self,
        service: &QuestionService,
        set: &QuestionSet,
    ) -> io::Result<bool> {
        let mut session = match service.start_quiz(set) {
            Ok(session) => session,
            Err(err) => {
                writeln!(self.out, "Error: {err}. Please add questions first.")?;
                return Ok(false);
            }
        };

        loop {
            let Some((position, text)) = session.current().map(|(p, q)| (p, q.text().to_owned()))
            else {
                break;
            };
            writeln!(self.out, "({position}.) {text}")?;
            let Some(given) = self.prompt("Enter answer: ")? else {
                writeln!(self.out, "Input ended before the quiz was finished.")?;
                return Ok(true);
            };
            if session.answer(&given).is_err() {
                break;
            }
        }

        match service.finish_quiz(session) {
            Ok(report) => {
                let elapsed = report.completed_at() - report.started_at();
                writeln!(self.out, "You got {}%!", report.percentage_text())?;
                writeln!(
                    self.out,
                    "{} of {} correct in {}s.",
                    report.correct(),
                    report.total(),
                    elapsed.num_seconds()
                )?;
                match report.verdict() {
                    Verdict::Pass => writeln!(self.out, "Congratulations!")?,
                    Verdict::NeedsPractice => writeln!(self.out, "You can do better next time!")?,
                }
            }
            Err(err) => writeln!(self.out, "Could not score the quiz: {err}")?,
        }
        Ok(true)
    }

    async fn clear_all(
        &mut self,
        service: &QuestionService,
        set: &mut QuestionSet,
    ) -> io::Result<()> {
        let Some(confirm) = self.prompt("Delete every question? This cannot be undone (y/N): ")?
        else {
            return Ok(());
        };
        if !confirm.eq_ignore_ascii_case("y") {
            writeln!(self.out, "Nothing deleted.")?;
            return Ok(());
        }

        match service.clear(set).await {
            Ok(()) => writeln!(self.out, "All questions deleted.")?,
            Err(err) => writeln!(self.out, "Could not clear the questions: {err}")?,
        }
        Ok(())
    }
}
