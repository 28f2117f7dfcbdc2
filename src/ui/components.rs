/// Reusable popup components

use crate::render::{card_markup, JobStats, JobView};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatsBarProps {
    pub stats: JobStats,
}

#[function_component(StatsBar)]
pub fn stats_bar(props: &StatsBarProps) -> Html {
    html! {
        <div class="stats">
            <div class="stat">
                <span class="stat-number">{props.stats.total}</span>
                <span class="stat-label">{"Total Applied"}</span>
            </div>
            <div class="stat">
                <span class="stat-number">{props.stats.needs_follow_up}</span>
                <span class="stat-label">{"Need Follow-up"}</span>
            </div>
        </div>
    }
}

#[function_component(NoJobs)]
pub fn no_jobs() -> Html {
    html! {
        <div class="empty-state">
            <div class="icon">{"📋"}</div>
            <p>{"No jobs tracked yet."}</p>
            <p class="empty-state-hint">
                {"Apply on LinkedIn, Indeed, or other job sites to get started!"}
            </p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct JobCardProps {
    pub view: JobView,
    /// Receives the job URL
    pub on_open: Callback<String>,
    /// Receives the job id
    pub on_delete: Callback<String>,
}

#[function_component(JobCard)]
pub fn job_card(props: &JobCardProps) -> Html {
    let onclick = props.on_open.reform({
        let url = props.view.record.url.clone();
        move |_: MouseEvent| url.clone()
    });

    // The card itself opens the job, so the delete click must not bubble.
    let on_delete = {
        let on_delete = props.on_delete.clone();
        let id = props.view.record.id.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_delete.emit(id.clone());
        })
    };

    html! {
        <div class="job-card" style="cursor: pointer;" {onclick}>
            <button class="delete-btn" title="Remove" onclick={on_delete}>{"❌"}</button>
            {Html::from_html_unchecked(AttrValue::from(card_markup(&props.view)))}
        </div>
    }
}
