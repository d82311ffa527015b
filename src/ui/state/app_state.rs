use dioxus::prelude::{use_signal, Signal};

use crate::domain::calc::Calculator;
use crate::domain::entities::schema::Schema;
use crate::domain::quiz::QuizRun;
use crate::usecase::services::view_session::ViewSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Leaderboard,
    Calculator,
    Quiz,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Leaderboard, Tab::Calculator, Tab::Quiz];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Leaderboard => "Leaderboard",
            Tab::Calculator => "Calculator",
            Tab::Quiz => "Quiz",
        }
    }
}

pub struct AppState {
    pub tab: Signal<Tab>,
    pub status: Signal<String>,
    pub session: Signal<ViewSession>,
    pub calculator: Signal<Calculator>,
    pub quiz: Signal<Option<QuizRun>>,
}

impl AppState {
    pub fn new(page_size: usize) -> Self {
        Self {
            tab: use_signal(|| Tab::Leaderboard),
            status: use_signal(|| "Ready".to_string()),
            session: use_signal(|| ViewSession::new(Schema::leaderboard(), page_size)),
            calculator: use_signal(Calculator::new),
            quiz: use_signal(|| None::<QuizRun>),
        }
    }
}
