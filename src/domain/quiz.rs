use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(alias = "question")]
    pub text: String,
    #[serde(alias = "choices")]
    pub options: Vec<String>,
    pub answer: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionBankFile {
    Wrapped { questions: Vec<Question> },
    Bare(Vec<Question>),
}

/// Accepts both `{"questions": [...]}` and a bare array of questions.
pub fn parse_question_bank(json: &str) -> Result<Vec<Question>, serde_json::Error> {
    let file: QuestionBankFile = serde_json::from_str(json)?;
    Ok(match file {
        QuestionBankFile::Wrapped { questions } => questions,
        QuestionBankFile::Bare(questions) => questions,
    })
}

const BUILTIN_BANK: &str = r#"[
  {"question": "What is the chemical symbol for sodium?", "choices": ["So", "Na", "Sd", "S"], "answer": "Na"},
  {"question": "What is the atomic number of carbon?", "choices": ["6", "12", "8", "14"], "answer": "6"},
  {"question": "Which gas makes up most of Earth's atmosphere?", "choices": ["Oxygen", "Carbon dioxide", "Nitrogen", "Argon"], "answer": "Nitrogen"},
  {"question": "What is the pH of pure water at 25 C?", "choices": ["5", "7", "9", "14"], "answer": "7"},
  {"question": "Which element is a noble gas?", "choices": ["Chlorine", "Neon", "Sulfur", "Lithium"], "answer": "Neon"},
  {"question": "What is H2O2 commonly called?", "choices": ["Water", "Hydrogen peroxide", "Ozone", "Hydroxide"], "answer": "Hydrogen peroxide"},
  {"question": "Which particle carries a negative charge?", "choices": ["Proton", "Neutron", "Electron", "Nucleus"], "answer": "Electron"},
  {"question": "What is the chemical symbol for iron?", "choices": ["Ir", "In", "Fe", "I"], "answer": "Fe"},
  {"question": "Which bond shares electron pairs between atoms?", "choices": ["Ionic", "Covalent", "Metallic", "Hydrogen"], "answer": "Covalent"},
  {"question": "What is the lightest element?", "choices": ["Helium", "Hydrogen", "Lithium", "Carbon"], "answer": "Hydrogen"}
]"#;

/// Question bank used when no bank file is configured or present.
pub fn builtin_bank() -> Vec<Question> {
    parse_question_bank(BUILTIN_BANK).unwrap_or_default()
}

/// Shuffles a copy of the bank and keeps the first `count` questions.
pub fn select_questions<R: Rng + ?Sized>(
    bank: &[Question],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut shuffled = bank.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count.min(bank.len()));
    shuffled
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    Finished,
    AlreadyAnswered,
    NotAnswered,
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::Finished => write!(f, "quiz is already finished"),
            QuizError::AlreadyAnswered => write!(f, "question was already answered"),
            QuizError::NotAnswered => write!(f, "answer the current question first"),
        }
    }
}

impl std::error::Error for QuizError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question: String,
    pub given: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone)]
pub struct QuizRun {
    questions: Vec<Question>,
    current: usize,
    score: usize,
    answers: Vec<AnswerRecord>,
}

impl QuizRun {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current: 0,
            score: 0,
            answers: Vec::new(),
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn position(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Questions after the current one; zero once finished.
    pub fn remaining(&self) -> usize {
        self.total().saturating_sub(self.current + 1)
    }

    /// Score as a whole percentage of the question count, rounded half up.
    pub fn percentage(&self) -> usize {
        match self.total() {
            0 => 0,
            total => (self.score * 100 + total / 2) / total,
        }
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.questions.len()
    }

    fn current_answered(&self) -> bool {
        self.answers.len() > self.current
    }

    /// Records the answer for the current question. `None` means skipped.
    pub fn answer(&mut self, given: Option<&str>) -> Result<bool, QuizError> {
        let Some(question) = self.questions.get(self.current) else {
            return Err(QuizError::Finished);
        };
        if self.current_answered() {
            return Err(QuizError::AlreadyAnswered);
        }

        let is_correct = given == Some(question.answer.as_str());
        self.answers.push(AnswerRecord {
            question: question.text.clone(),
            given: given.map(str::to_string),
            correct_answer: question.answer.clone(),
            is_correct,
        });
        if is_correct {
            self.score += 1;
        }
        Ok(is_correct)
    }

    pub fn next(&mut self) -> Result<(), QuizError> {
        if self.is_finished() {
            return Err(QuizError::Finished);
        }
        if !self.current_answered() {
            return Err(QuizError::NotAnswered);
        }
        self.current += 1;
        Ok(())
    }
}
