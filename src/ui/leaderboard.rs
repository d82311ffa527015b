use std::path::PathBuf;

use dioxus::prelude::*;
use rfd::FileDialog;

use crate::domain::entities::view::DisplayRow;
use crate::infra::import::FileSource;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::format::{
    avatar_url, display_name, format_date, format_score, rank_class, search_summary,
    sort_indicator,
};
use crate::usecase::ports::source::{DatasetSource, LoadError};
use crate::usecase::services::view_session::{LoadOutcome, ViewSession};

const SORTABLE_COLUMNS: [&str; 5] = ["rank", "name", "score", "level", "join_date"];
const TABLE_COLUMNS: &str = "5";

/// Loads `path` off the UI thread and hands the result to the session.
pub async fn load_dataset(
    mut session: Signal<ViewSession>,
    mut status: Signal<String>,
    path: PathBuf,
) {
    let ticket = session.write().begin_load();
    let schema = session.read().schema().clone();
    let source = FileSource::new(path, schema);
    let label = source.describe();
    *status.write() = format!("Loading {label}...");

    let result = run_blocking(move || source.load())
        .await
        .unwrap_or_else(|err| Err(LoadError::Transport(format!("{err:#}"))));
    let failure = result.as_ref().err().cloned();

    match session.write().complete_load(ticket, result) {
        LoadOutcome::Applied => *status.write() = format!("Loaded {label}"),
        LoadOutcome::Failed => {
            let reason = failure.map(|err| err.to_string()).unwrap_or_default();
            *status.write() = format!("Failed to load leaderboard data: {reason}");
        }
        LoadOutcome::Stale | LoadOutcome::Discarded => {}
    }
}

#[component]
fn PlayerRow(row: DisplayRow) -> Element {
    let rank = row.display_rank;
    let badge = rank_class(rank);
    let name = display_name(&row.record);
    let country = row.record.get("country").to_string();
    let score = format_score(row.record.get("score"));
    let level = row.record.get("level").to_string();
    let joined = format_date(row.record.get("join_date"));
    let avatar = avatar_url(&row.record);

    rsx! {
        tr {
            td { class: "rank-cell",
                div { class: "rank-with-avatar",
                    span { class: "rank-badge {badge}", "{rank}" }
                    img {
                        class: "player-avatar",
                        src: "{avatar}",
                        alt: "{name} Avatar",
                        width: "28",
                        height: "28",
                    }
                }
            }
            td { class: "player-name",
                div { style: "display: flex; flex-direction: column; gap: 2px;",
                    strong { "{name}" }
                    small { style: "color: #888; font-size: 11px;", "{country}" }
                }
            }
            td { class: "score-cell", style: "text-align: right;", "{score}" }
            td { span { class: "level-badge", "Level {level}" } }
            td { class: "date-cell", "{joined}" }
        }
    }
}

#[component]
pub fn LeaderboardView(
    mut session: Signal<ViewSession>,
    status: Signal<String>,
    data_path: PathBuf,
    page_size_options: Vec<usize>,
) -> Element {
    let mut current_path = use_signal(|| data_path.clone());

    use_hook(move || {
        spawn(load_dataset(session, status, data_path.clone()));
    });

    use_drop(move || {
        if let Ok(mut session) = session.try_write() {
            session.teardown();
        }
    });

    let model = session.read().view_model();
    let headers: Vec<(String, String)> = {
        let guard = session.read();
        SORTABLE_COLUMNS
            .iter()
            .map(|field| {
                let label = guard
                    .schema()
                    .field(field)
                    .map(|spec| spec.label.clone())
                    .unwrap_or_else(|| field.to_string());
                let indicator =
                    sort_indicator(field, model.sort_field.as_deref(), model.sort_direction);
                (field.to_string(), format!("{label}{indicator}"))
            })
            .collect()
    };
    let summary = search_summary(&model.filter_query, model.filtered_count, model.total_count);
    let page_label = format!("Page {} of {}", model.page_index + 1, model.total_pages);
    let show_loading = model.loading && model.total_count == 0;
    let show_empty = !show_loading && model.rows.is_empty();
    let nav = model.navigation;
    let page_size = model.page_size;
    let query = model.filter_query.clone();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 12px;",

            div {
                style: "display: flex; gap: 8px; align-items: center; position: sticky; top: 0; background: #fff; z-index: 900; padding: 8px 0;",
                input {
                    placeholder: "Search players or countries",
                    value: "{query}",
                    oninput: move |event| session.write().set_query(&event.value()),
                }
                if !model.filter_query.is_empty() {
                    button {
                        onclick: move |_| session.write().clear_query(),
                        "✕"
                    }
                }
                button {
                    disabled: model.loading,
                    onclick: move |_| {
                        spawn(load_dataset(session, status, current_path()));
                    },
                    "Reload"
                }
                button {
                    disabled: model.loading,
                    onclick: move |_| {
                        if let Some(path) = FileDialog::new()
                            .add_filter("Datasets", &["json", "csv", "xlsx", "xls", "ods"])
                            .add_filter("All files", &["*"])
                            .pick_file()
                        {
                            current_path.set(path.clone());
                            spawn(load_dataset(session, status, path));
                        }
                    },
                    "Open dataset"
                }
            }

            if let Some(summary) = summary {
                p { style: "color: #ff69b4; margin: 0;", "{summary}" }
            }

            if let Some(err) = model.error.clone() {
                div {
                    style: "border: 1px solid #f5c2c7; background: #f8d7da; color: #842029; padding: 8px 12px; border-radius: 6px;",
                    strong { "⚠️ Error " }
                    "Failed to load leaderboard data. {err}"
                }
            }

            table {
                style: "border-collapse: collapse; width: 100%;",
                thead {
                    tr {
                        {headers.into_iter().map(|(field, label)| {
                            let key = field.clone();
                            rsx!(
                                th {
                                    key: "{key}",
                                    style: "cursor: pointer; text-align: left; padding: 6px; border-bottom: 2px solid #ddd;",
                                    onclick: move |_| session.write().toggle_sort(&field),
                                    "{label}"
                                }
                            )
                        })}
                    }
                }
                tbody {
                    if show_loading {
                        tr {
                            td { colspan: TABLE_COLUMNS, "Loading leaderboard data..." }
                        }
                    } else if show_empty {
                        tr {
                            td { colspan: TABLE_COLUMNS,
                                h3 { "No Players Found" }
                                p { "The leaderboard is currently empty." }
                            }
                        }
                    } else {
                        {model.rows.iter().map(|row| {
                            let key = row.load_index.to_string();
                            rsx!(PlayerRow { key: "{key}", row: row.clone() })
                        })}
                    }
                }
            }

            div {
                style: "display: flex; gap: 6px; align-items: center;",
                button {
                    disabled: !nav.first,
                    onclick: move |_| session.write().first_page(),
                    "« First"
                }
                button {
                    disabled: !nav.prev,
                    onclick: move |_| session.write().prev_page(),
                    "‹ Prev"
                }
                span { "{page_label}" }
                button {
                    disabled: !nav.next,
                    onclick: move |_| session.write().next_page(),
                    "Next ›"
                }
                button {
                    disabled: !nav.last,
                    onclick: move |_| session.write().last_page(),
                    "Last »"
                }
                select {
                    onchange: move |event| {
                        if let Ok(size) = event.value().parse::<usize>() {
                            session.write().set_page_size(size);
                        }
                    },
                    {page_size_options.iter().map(|size| {
                        let size = *size;
                        rsx!(
                            option {
                                key: "{size}",
                                value: "{size}",
                                selected: size == page_size,
                                "{size} per page"
                            }
                        )
                    })}
                }
            }
        }
    }
}
