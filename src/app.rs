use dioxus::prelude::*;
use tracing::warn;

use crate::config::{default_db_path, AppConfig};
use crate::ui::calculator::CalculatorPanel;
use crate::ui::leaderboard::LeaderboardView;
use crate::ui::quiz::QuizPanel;
use crate::ui::state::app_state::{AppState, Tab};

/// Inactive panels are hidden, not unmounted.
fn panel_display(active: Tab, panel: Tab) -> &'static str {
    if active == panel {
        "block"
    } else {
        "none"
    }
}

#[component]
pub fn App() -> Element {
    let config = use_hook(AppConfig::load_default);

    let data_path = match config.data_path() {
        Ok(path) => path,
        Err(err) => {
            return rsx! {
                div {
                    p { "Unable to resolve the leaderboard data path: {err}" }
                }
            };
        }
    };
    let bank_path = match config.quiz_bank_path() {
        Ok(path) => path,
        Err(err) => {
            return rsx! {
                div {
                    p { "Unable to resolve the question bank path: {err}" }
                }
            };
        }
    };
    let db_path = match default_db_path() {
        Ok(path) => Some(path),
        Err(err) => {
            warn!(error = %format!("{err:#}"), "quiz history disabled");
            None
        }
    };

    let AppState {
        mut tab,
        status,
        session,
        calculator,
        quiz,
    } = AppState::new(config.page_size);

    let active = tab();
    let leaderboard_display = panel_display(active, Tab::Leaderboard);
    let calculator_display = panel_display(active, Tab::Calculator);
    let quiz_display = panel_display(active, Tab::Quiz);
    let page_size_options = config.page_size_options.clone();

    rsx! {
        div {
            style: "font-family: sans-serif; padding: 12px; display: flex; flex-direction: column; gap: 12px;",

            div {
                style: "display: flex; gap: 6px; border-bottom: 1px solid #ddd; padding-bottom: 6px;",
                {Tab::ALL.iter().map(|item| {
                    let item = *item;
                    let label = item.label();
                    let weight = if item == active { "bold" } else { "normal" };
                    rsx!(
                        button {
                            key: "{label}",
                            style: "font-weight: {weight}; padding: 4px 12px; cursor: pointer;",
                            onclick: move |_| tab.set(item),
                            "{label}"
                        }
                    )
                })}
            }

            div {
                style: "display: {leaderboard_display};",
                LeaderboardView {
                    session,
                    status,
                    data_path,
                    page_size_options,
                }
            }
            div {
                style: "display: {calculator_display};",
                CalculatorPanel { calculator }
            }
            div {
                style: "display: {quiz_display};",
                QuizPanel {
                    quiz,
                    status,
                    bank_path,
                    db_path,
                }
            }

            p { style: "color: #666; font-size: 12px; margin: 0;", "{status}" }
        }
    }
}
