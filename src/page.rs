/// Content script: watch the page for a confirmation and offer a track button
use crate::chrome::{self, ChromeStorage};
use crate::config::TrackerConfig;
use crate::detector::{extract_job_info, is_confirmation, DetectionPoll, PollStep};
use crate::error::TrackerError;
use crate::job_data::NewJob;
use crate::storage::RecordStore;
use log::{debug, info, warn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlElement, MouseEvent, Window};

const BUTTON_STYLE: &str = "position: fixed; top: 20px; right: 20px; z-index: 10000; \
    padding: 12px 20px; color: white; border: none; border-radius: 8px; font-weight: bold; \
    font-size: 14px; cursor: pointer; box-shadow: 0 4px 12px rgba(10, 102, 194, 0.4); \
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;";
const TRACK_BACKGROUND: &str = "linear-gradient(135deg, #0a66c2 0%, #004182 100%)";
const SAVED_BACKGROUND: &str = "linear-gradient(135deg, #28a745 0%, #1e7e34 100%)";
const DUPLICATE_BACKGROUND: &str = "#ffc107";
const FAILED_BACKGROUND: &str = "#dc3545";

/// Immediate check, then one check per interval until a match or the
/// attempt cap.
pub fn start_detector(config: TrackerConfig) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let config = Rc::new(config);
    let poll = Rc::new(RefCell::new(DetectionPoll::new(config.max_poll_attempts)));

    let step = poll.borrow_mut().check_now(page_matches(&window));
    if step == PollStep::Fire {
        info!("confirmation page detected on load");
        return show_track_button(&window, &poll, &config);
    }

    let interval_id = Rc::new(Cell::new(None::<i32>));
    let on_tick = {
        let window = window.clone();
        let poll = poll.clone();
        let config = config.clone();
        let interval_id = interval_id.clone();

        Closure::<dyn FnMut()>::new(move || {
            let step = poll.borrow_mut().tick(page_matches(&window));
            match step {
                PollStep::Continue => {}
                PollStep::Fire => {
                    stop_polling(&window, &interval_id);
                    info!("confirmation page detected");
                    if let Err(e) = show_track_button(&window, &poll, &config) {
                        warn!("failed to show track button: {:?}", e);
                    }
                }
                PollStep::Stop => {
                    stop_polling(&window, &interval_id);
                    debug!("no confirmation found, stopped polling");
                }
            }
        })
    };

    let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
        on_tick.as_ref().unchecked_ref(),
        config.poll_interval_ms,
    )?;
    interval_id.set(Some(id));
    on_tick.forget();

    Ok(())
}

fn stop_polling(window: &Window, interval_id: &Cell<Option<i32>>) {
    if let Some(id) = interval_id.take() {
        window.clear_interval_with_handle(id);
    }
}

fn page_matches(window: &Window) -> bool {
    let url = window.location().href().unwrap_or_default();
    let text = window
        .document()
        .and_then(|document| document.body())
        .map(|body| body.inner_text())
        .unwrap_or_default();

    is_confirmation(&url, &text)
}

fn first_heading(document: &Document) -> Option<String> {
    document
        .query_selector("h1")
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        .map(|heading| heading.inner_text())
}

fn style_with_background(background: &str) -> String {
    format!("{} background: {};", BUTTON_STYLE, background)
}

fn show_track_button(
    window: &Window,
    poll: &RefCell<DetectionPoll>,
    config: &Rc<TrackerConfig>,
) -> Result<(), JsValue> {
    if !poll.borrow_mut().claim_button() {
        return Ok(());
    }

    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let info = extract_job_info(&document.title(), first_heading(&document).as_deref());
    let url = window.location().href()?;

    let button: HtmlElement = document.create_element("button")?.dyn_into()?;
    button.set_text_content(Some("✅ Track This Job"));
    button.set_attribute("style", &style_with_background(TRACK_BACKGROUND))?;

    let saving = Rc::new(Cell::new(false));
    let onclick = {
        let button = button.clone();
        let window = window.clone();
        let config = config.clone();

        Closure::<dyn FnMut(MouseEvent)>::new(move |_| {
            if saving.replace(true) {
                return;
            }

            let candidate = NewJob::new(info.clone(), url.clone(), chrome::today());
            let button = button.clone();
            let window = window.clone();
            let config = config.clone();
            let saving = saving.clone();

            spawn_local(async move {
                let store = RecordStore::new(ChromeStorage, &config);
                let (label, background) = match store.add(candidate).await {
                    Ok(_) => ("✅ Saved!", SAVED_BACKGROUND),
                    Err(TrackerError::AlreadyTracked { .. }) => ("⚠️ Already Tracked", DUPLICATE_BACKGROUND),
                    Err(e) => {
                        warn!("failed to track job: {}", e);
                        saving.set(false);
                        button.set_text_content(Some("⚠️ Save failed, click to retry"));
                        restyle(&button, FAILED_BACKGROUND);
                        return;
                    }
                };

                button.set_text_content(Some(label));
                restyle(&button, background);
                remove_after(&window, button, config.button_dismiss_ms);
            });
        })
    };
    button.set_onclick(Some(onclick.as_ref().unchecked_ref()));
    onclick.forget();

    body.append_child(&button)?;
    Ok(())
}

fn restyle(button: &HtmlElement, background: &str) {
    if let Err(e) = button.set_attribute("style", &style_with_background(background)) {
        warn!("failed to restyle track button: {:?}", e);
    }
}

fn remove_after(window: &Window, button: HtmlElement, delay_ms: i32) {
    let remove = Closure::once_into_js(move || button.remove());
    if let Err(e) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(remove.unchecked_ref(), delay_ms)
    {
        warn!("failed to schedule button removal: {:?}", e);
    }
}
