/// One top-level action in the interactive menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddQuestions,
    DeleteQuestion,
    ViewQuestions,
    StartQuiz,
    ClearAll,
    Quit,
}

pub const MENU_PROMPT: &str = "\
Would you like to:
  (1) add questions
  (2) delete a question
  (3) view questions
  (4) start the quiz
  (5) clear all questions
  (6) quit
Enter a choice: ";

impl MenuChoice {
    /// Parses a numeric menu entry.
    ///
    /// Returns `None` for anything that is not one of the listed options;
    /// the caller reports it and reprompts.
    #[must_use]
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::AddQuestions),
            "2" => Some(Self::DeleteQuestion),
            "3" => Some(Self::ViewQuestions),
            "4" => Some(Self::StartQuiz),
            "5" => Some(Self::ClearAll),
            "6" => Some(Self::Quit),
            _ => None,
        }
    }
}
