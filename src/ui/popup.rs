/// Popup UI: tracked jobs, stats and the follow-up draft

use yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use patternfly_yew::prelude::*;
use log::warn;
use crate::chrome::{self, ChromeStorage};
use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::followup::{compose_email, select_follow_up_target};
use crate::job_data::JobRecord;
use crate::render::{project, stats};
use crate::storage::RecordStore;
use crate::ui::components::{JobCard, NoJobs, StatsBar};

#[derive(Clone, PartialEq)]
enum ViewState {
    Loading,
    Idle,
    Error(String),
}

#[derive(Clone, PartialEq)]
struct Status {
    message: String,
    success: bool,
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| TrackerConfig::default());
    let state = use_state(|| ViewState::Loading);
    let jobs = use_state(Vec::<JobRecord>::new);
    let status = use_state(|| None::<Status>);
    // Bumped on every status message so a stale timer cannot clear a newer one
    let status_generation = use_mut_ref(|| 0u32);

    let show_status = {
        let status = status.clone();
        let status_generation = status_generation.clone();
        let clear_ms = config.status_clear_ms;

        Callback::from(move |new_status: Status| {
            let generation = {
                let mut current = status_generation.borrow_mut();
                *current += 1;
                *current
            };
            status.set(Some(new_status));

            let status = status.clone();
            let status_generation = status_generation.clone();
            let clear = Closure::once_into_js(move || {
                if *status_generation.borrow() == generation {
                    status.set(None);
                }
            });
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    clear.unchecked_ref(),
                    clear_ms,
                ) {
                    warn!("failed to schedule status clear: {:?}", e);
                }
            }
        })
    };

    let reload = {
        let state = state.clone();
        let jobs = jobs.clone();
        let config = config.clone();

        Callback::from(move |_: ()| {
            let state = state.clone();
            let jobs = jobs.clone();
            let config = config.clone();

            spawn_local(async move {
                match job_store(&config).list_all().await {
                    Ok(loaded) => {
                        jobs.set(loaded);
                        state.set(ViewState::Idle);
                    }
                    Err(e) => {
                        warn!("failed to load jobs: {}", e);
                        state.set(ViewState::Error(format!("Failed to load: {}", e)));
                    }
                }
            });
        })
    };

    // Load jobs on mount
    {
        let reload = reload.clone();
        use_effect_with((), move |_| {
            reload.emit(());
            || ()
        });
    }

    let on_open = Callback::from(|url: String| chrome::open_tab(&url));

    let on_delete = {
        let reload = reload.clone();
        let show_status = show_status.clone();
        let config = config.clone();

        Callback::from(move |id: String| {
            let reload = reload.clone();
            let show_status = show_status.clone();
            let config = config.clone();

            spawn_local(async move {
                match job_store(&config).remove(&id).await {
                    Ok(()) => reload.emit(()),
                    Err(e) => show_status.emit(error_status(&e)),
                }
            });
        })
    };

    let on_clear = {
        let reload = reload.clone();
        let show_status = show_status.clone();
        let config = config.clone();

        Callback::from(move |_: MouseEvent| {
            let confirmed = web_sys::window()
                .and_then(|window| {
                    window
                        .confirm_with_message("Are you sure you want to clear all tracked applications?")
                        .ok()
                })
                .unwrap_or(false);
            if !confirmed {
                return;
            }

            let reload = reload.clone();
            let show_status = show_status.clone();
            let config = config.clone();

            spawn_local(async move {
                match job_store(&config).clear().await {
                    Ok(()) => {
                        reload.emit(());
                        show_status.emit(Status {
                            message: "All applications cleared".to_string(),
                            success: true,
                        });
                    }
                    Err(e) => show_status.emit(error_status(&e)),
                }
            });
        })
    };

    let on_draft = {
        let show_status = show_status.clone();
        let config = config.clone();

        Callback::from(move |_: MouseEvent| {
            let show_status = show_status.clone();
            let config = config.clone();

            spawn_local(async move {
                match draft_follow_up(&config).await {
                    Ok(company) => show_status.emit(Status {
                        message: format!("✅ Follow-up email for {} copied to clipboard!", company),
                        success: true,
                    }),
                    Err(e) => {
                        warn!("follow-up draft failed: {}", e);
                        show_status.emit(error_status(&e));
                    }
                }
            });
        })
    };

    let views = project(&jobs, chrome::today(), config.follow_up_after_days);
    let job_stats = stats(&views);
    let is_empty = views.is_empty();

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Job Tracker"}</h1>

            <StatsBar stats={job_stats} />

            {match &*state {
                ViewState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading jobs..."}</p>
                    </div>
                },
                ViewState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                ViewState::Idle => html! {
                    <>
                    if is_empty {
                        <NoJobs />
                    } else {
                        <div class="jobs-list">
                            {for views.iter().map(|view| html! {
                                <JobCard
                                    key={view.record.id.clone()}
                                    view={view.clone()}
                                    on_open={on_open.clone()}
                                    on_delete={on_delete.clone()}
                                />
                            })}
                        </div>
                    }
                    </>
                },
            }}

            <div class="flex-column-gap">
                <Button onclick={on_draft} disabled={is_empty} variant={ButtonVariant::Primary} block={true}>
                    {"✉️ Draft Follow-up Email"}
                </Button>
                <Button onclick={on_clear} variant={ButtonVariant::Secondary} block={true}>
                    {"🗑️ Clear All"}
                </Button>
            </div>

            if let Some(current) = (*status).clone() {
                <div class="message-top-margin">
                    <Alert
                        r#type={if current.success { AlertType::Success } else { AlertType::Danger }}
                        title={current.message}
                        inline={true}
                    >
                    </Alert>
                </div>
            }
        </div>
    }
}

// Helper functions

fn job_store(config: &TrackerConfig) -> RecordStore<ChromeStorage> {
    RecordStore::new(ChromeStorage, config)
}

/// Copy a follow-up email for the most overdue job. Returns the company it
/// was written for.
async fn draft_follow_up(config: &TrackerConfig) -> Result<String, TrackerError> {
    let jobs = job_store(config).list_all().await?;
    let today = chrome::today();

    let target = select_follow_up_target(&jobs, today, config.follow_up_after_days)?;
    let draft = compose_email(target, target.age_days(today));
    chrome::write_clipboard(&draft).await?;

    Ok(target.company.clone())
}

fn error_status(error: &TrackerError) -> Status {
    let message = match error {
        TrackerError::NoRecords => "No jobs to follow up on!".to_string(),
        TrackerError::ClipboardWriteFailed(_) => "Failed to copy to clipboard".to_string(),
        other => other.to_string(),
    };
    Status {
        message,
        success: false,
    }
}
