pub mod audio;
pub mod canvas;
pub mod dom;
pub mod frame;
pub mod listeners;
pub mod mail;
pub mod runner;
pub mod speech;

use std::cell::RefCell;

use folio_engine::{AssetManifest, ClickOutcome, SiteConfig};
use wasm_bindgen::prelude::*;

pub use runner::SiteRunner;

use crate::frame::FrameLoop;

thread_local! {
    static RUNNER: RefCell<Option<SiteRunner>> = const { RefCell::new(None) };
    static FRAMES: RefCell<Option<FrameLoop>> = const { RefCell::new(None) };
}

/// Run `f` against the live runner. `None` when the site is not initialized
/// or the runner is already borrowed further up the stack.
pub(crate) fn with_runner<R>(f: impl FnOnce(&mut SiteRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.try_borrow_mut().ok()?;
        borrow.as_mut().map(f)
    })
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Build the site from a JSON override blob (`"{}"` for stock settings) and
/// start the animation loop.
#[wasm_bindgen]
pub fn site_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    site_shutdown();

    let config = SiteConfig::from_json(config_json).map_err(to_js)?;
    let mut runner = SiteRunner::new(config);
    runner.init();
    runner.attach_listeners()?;
    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));

    let frames = FrameLoop::start(|now| {
        with_runner(|r| r.frame(now));
    })?;
    FRAMES.with(|cell| *cell.borrow_mut() = Some(frames));

    log::info!("folio: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn site_load_manifest(json: &str) -> Result<(), JsValue> {
    let manifest = AssetManifest::from_json(json).map_err(to_js)?;
    with_runner(|r| r.load_manifest(manifest));
    Ok(())
}

#[wasm_bindgen]
pub fn site_choose_sound(allowed: bool) {
    with_runner(|r| r.choose_sound(allowed));
}

#[wasm_bindgen]
pub fn site_reset_permission() {
    with_runner(|r| r.reset_permission());
}

/// Flip the ambient loop. Returns the speaker glyph for the new state.
#[wasm_bindgen]
pub fn site_toggle_audio() -> String {
    with_runner(|r| r.toggle_audio().to_owned()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn site_dialogue_click() -> String {
    let outcome = with_runner(|r| r.dialogue_click()).unwrap_or(ClickOutcome::Ignored);
    match outcome {
        ClickOutcome::Ignored => "ignored",
        ClickOutcome::Skipped => "skipped",
        ClickOutcome::Advanced => "advanced",
        ClickOutcome::Dismissed => "dismissed",
    }
    .to_owned()
}

/// Submit the contact form. Resolves to the final status string; rejects on
/// invalid input or when a submission is already in flight.
#[wasm_bindgen]
pub fn site_submit_contact(name: String, email: String, message: String) -> js_sys::Promise {
    wasm_bindgen_futures::future_to_promise(async move {
        let (endpoint, request) = with_runner(|r| r.begin_contact(&name, &email, &message))
            .ok_or_else(|| JsValue::from_str("site not initialized"))?
            .map_err(to_js)?;
        let response = mail::send(&endpoint, &request).await;
        let status = with_runner(|r| r.finish_contact(response))
            .ok_or_else(|| JsValue::from_str("site shut down during submission"))?;
        Ok(JsValue::from_str(status.as_str()))
    })
}

#[wasm_bindgen]
pub fn site_active_section() -> String {
    with_runner(|r| r.active_section().id().to_owned()).unwrap_or_default()
}

/// Stop the frame loop, detach listeners and release every sound.
#[wasm_bindgen]
pub fn site_shutdown() {
    FRAMES.with(|cell| {
        if let Some(mut frames) = cell.borrow_mut().take() {
            frames.stop();
        }
    });
    RUNNER.with(|cell| {
        if let Some(mut runner) = cell.borrow_mut().take() {
            runner.shutdown();
        }
    });
}
