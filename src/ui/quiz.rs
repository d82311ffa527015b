use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use dioxus::prelude::*;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use tracing::warn;

use crate::domain::quiz::{select_questions, QuizRun};
use crate::infra::import::quiz_bank::read_question_bank;
use crate::infra::sqlite::kv_store::SqliteKvStore;
use crate::platform::desktop::blocking::run_blocking;
use crate::usecase::services::quiz_history::{
    QuizHistoryEntry, QuizHistoryService, RECENT_LIMIT,
};

const DEFAULT_QUESTION_COUNT: usize = 5;

pub(crate) async fn open_history(db_path: PathBuf) -> Option<Arc<QuizHistoryService>> {
    let opened = run_blocking(move || SqliteKvStore::open(db_path))
        .await
        .and_then(|result| result.map_err(anyhow::Error::from));
    match opened {
        Ok(store) => Some(Arc::new(QuizHistoryService::new(Arc::new(store)))),
        Err(err) => {
            warn!(error = %format!("{err:#}"), "quiz history is unavailable");
            None
        }
    }
}

pub(crate) async fn load_recent(
    history: Arc<QuizHistoryService>,
) -> anyhow::Result<Vec<QuizHistoryEntry>> {
    Ok(run_blocking(move || history.recent(RECENT_LIMIT)).await??)
}

/// Saves `entry` and returns the refreshed recent list.
pub(crate) async fn record_result(
    history: Arc<QuizHistoryService>,
    entry: QuizHistoryEntry,
) -> anyhow::Result<Vec<QuizHistoryEntry>> {
    Ok(run_blocking(move || {
        history.record(entry)?;
        history.recent(RECENT_LIMIT)
    })
    .await??)
}

pub(crate) async fn clear_results(history: Arc<QuizHistoryService>) -> anyhow::Result<()> {
    Ok(run_blocking(move || history.clear()).await??)
}

#[component]
pub fn QuizPanel(
    mut quiz: Signal<Option<QuizRun>>,
    mut status: Signal<String>,
    bank_path: PathBuf,
    db_path: Option<PathBuf>,
) -> Element {
    let mut history = use_signal(|| None::<Arc<QuizHistoryService>>);
    let mut recent = use_signal(Vec::<QuizHistoryEntry>::new);
    let mut player = use_signal(String::new);
    let mut count = use_signal(|| DEFAULT_QUESTION_COUNT);
    let mut selected = use_signal(|| None::<String>);
    let mut started_at = use_signal(|| None::<Instant>);
    let mut recorded = use_signal(|| false);

    use_hook(move || {
        spawn(async move {
            let Some(db_path) = db_path else {
                return;
            };
            let Some(opened) = open_history(db_path).await else {
                return;
            };
            match load_recent(opened.clone()).await {
                Ok(entries) => recent.set(entries),
                Err(err) => status.set(format!("Failed to read quiz history: {err:#}")),
            }
            history.set(Some(opened));
        });
    });

    let start = move |_: MouseEvent| {
        let bank_path = bank_path.clone();
        spawn(async move {
            let loaded = run_blocking(move || read_question_bank(&bank_path))
                .await
                .and_then(|result| result);
            match loaded {
                Ok(bank) => {
                    let questions = select_questions(&bank, count(), &mut rand::rng());
                    selected.set(None);
                    recorded.set(false);
                    started_at.set(Some(Instant::now()));
                    quiz.set(Some(QuizRun::new(questions)));
                    status.set("Quiz started".to_string());
                }
                Err(err) => status.set(format!("Failed to load questions: {err:#}")),
            }
        });
    };

    let next = move |_: MouseEvent| {
        let choice = selected();
        let finished = {
            let mut guard = quiz.write();
            let Some(run) = guard.as_mut() else {
                return;
            };
            if let Err(err) = run.answer(choice.as_deref()).and_then(|_| run.next()) {
                status.set(err.to_string());
                return;
            }
            if run.is_finished() {
                Some((run.score(), run.total()))
            } else {
                None
            }
        };
        selected.set(None);

        let Some((score, total)) = finished else {
            return;
        };
        if recorded() {
            return;
        }
        recorded.set(true);
        let seconds = started_at()
            .map(|start| start.elapsed().as_secs())
            .unwrap_or_default();
        let name = match player().trim() {
            "" => "Anonymous".to_string(),
            name => name.to_string(),
        };
        let Some(store) = history() else {
            return;
        };
        let entry = QuizHistoryEntry {
            name,
            score,
            total,
            seconds,
            recorded_at: Local::now().format("%Y-%m-%d %H:%M").to_string(),
        };
        spawn(async move {
            match record_result(store, entry).await {
                Ok(entries) => recent.set(entries),
                Err(err) => status.set(format!("Failed to save quiz result: {err:#}")),
            }
        });
    };

    let clear_history = move |_: MouseEvent| {
        let Some(store) = history() else {
            return;
        };
        let confirmed = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("Clear quiz history")
            .set_description("Remove every saved quiz result?")
            .set_buttons(MessageButtons::YesNo)
            .show();
        if confirmed != MessageDialogResult::Yes {
            return;
        }
        spawn(async move {
            match clear_results(store).await {
                Ok(()) => recent.set(Vec::new()),
                Err(err) => status.set(format!("Failed to clear quiz history: {err:#}")),
            }
        });
    };

    let run = quiz.read().clone();
    let question = run
        .as_ref()
        .and_then(|run| run.current_question())
        .map(|question| (question.text.clone(), question.options.clone()));
    let counter = run
        .as_ref()
        .map(|run| {
            format!(
                "Question {} of {} ({} left)",
                run.position() + 1,
                run.total(),
                run.remaining()
            )
        })
        .unwrap_or_default();
    let result = run
        .as_ref()
        .filter(|run| run.is_finished())
        .map(|run| {
            let summary = format!(
                "You scored {} / {} ({}%)",
                run.score(),
                run.total(),
                run.percentage()
            );
            (summary, run.answers().to_vec())
        });
    let entries = recent();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 12px; max-width: 640px;",

            div {
                style: "display: flex; gap: 8px; align-items: center;",
                input {
                    placeholder: "Your name",
                    value: "{player}",
                    oninput: move |event| player.set(event.value()),
                }
                input {
                    r#type: "number",
                    min: "1",
                    style: "width: 64px;",
                    value: "{count}",
                    oninput: move |event| {
                        if let Ok(value) = event.value().parse::<usize>() {
                            count.set(value.max(1));
                        }
                    },
                }
                button { onclick: start, "Start Quiz" }
            }

            if let Some((question_text, options)) = question {
                div {
                    style: "border: 1px solid #ddd; border-radius: 8px; padding: 12px;",
                    small { "{counter}" }
                    h3 { "{question_text}" }
                    div {
                        style: "display: flex; flex-direction: column; gap: 6px;",
                        {options.iter().map(|option| {
                            let label = option.clone();
                            let choice = option.clone();
                            let is_selected = selected().as_deref() == Some(option.as_str());
                            let background = if is_selected { "#ffe4f1" } else { "#fff" };
                            rsx!(
                                button {
                                    key: "{label}",
                                    style: "text-align: left; background: {background};",
                                    onclick: move |_| selected.set(Some(choice.clone())),
                                    "{label}"
                                }
                            )
                        })}
                    }
                    button { style: "margin-top: 8px;", onclick: next, "Next" }
                }
            }

            if let Some((summary, answers)) = result {
                div {
                    h3 { "{summary}" }
                    ul {
                        {answers.into_iter().enumerate().map(|(idx, answer)| {
                            let given = answer.given.unwrap_or_else(|| "No answer".to_string());
                            let mark = if answer.is_correct { "✔" } else { "✘" };
                            let line = format!(
                                "{mark} {} | yours: {given} | correct: {}",
                                answer.question, answer.correct_answer
                            );
                            rsx!(
                                li { key: "{idx}", "{line}" }
                            )
                        })}
                    }
                }
            }

            div {
                div {
                    style: "display: flex; gap: 8px; align-items: center;",
                    h3 { "Recent results" }
                    button { onclick: clear_history, "Clear" }
                }
                if entries.is_empty() {
                    p { "No quiz results yet." }
                } else {
                    ul {
                        {entries.into_iter().enumerate().map(|(idx, entry)| {
                            let line = format!(
                                "{}  {}: {}/{} in {}s",
                                entry.recorded_at, entry.name, entry.score, entry.total, entry.seconds
                            );
                            rsx!(
                                li { key: "{idx}", "{line}" }
                            )
                        })}
                    }
                }
            }
        }
    }
}
