//! `HtmlAudioElement` wrappers for the glitch cue and the ambient loop.

use folio_engine::FolioError;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

use crate::listeners::EventListener;

pub struct Sound {
    element: HtmlAudioElement,
    /// Load listeners; dropped with the sound.
    _listeners: Vec<EventListener>,
}

impl Sound {
    /// Create an element for `src`. Nothing is fetched until `preload`.
    pub fn new(src: &str, volume: f64, looping: bool) -> Result<Self, JsValue> {
        let element = HtmlAudioElement::new_with_src(src)?;
        element.set_volume(volume.clamp(0.0, 1.0));
        element.set_loop(looping);
        Ok(Self {
            element,
            _listeners: Vec::new(),
        })
    }

    /// Start loading; exactly one of the callbacks fires, later, from the
    /// event loop.
    pub fn preload<R, F>(&mut self, on_ready: R, on_failed: F) -> Result<(), JsValue>
    where
        R: Fn() + 'static,
        F: Fn(FolioError) + 'static,
    {
        let src = self.element.src();
        let ready = EventListener::new(&self.element, "canplaythrough", move |_| on_ready())?;
        let failed = EventListener::new(&self.element, "error", move |_| {
            on_failed(FolioError::AssetLoad(src.clone()))
        })?;
        self._listeners = vec![ready, failed];
        self.element.set_preload("auto");
        self.element.load();
        Ok(())
    }

    /// Rewind and play. A rejected play promise is reported to `on_rejected`
    /// and otherwise ignored.
    pub fn play_from_start<F>(&self, on_rejected: F)
    where
        F: FnOnce(FolioError) + 'static,
    {
        self.element.set_current_time(0.0);
        self.play(on_rejected);
    }

    pub fn play<F>(&self, on_rejected: F)
    where
        F: FnOnce(FolioError) + 'static,
    {
        let promise = match self.element.play() {
            Ok(promise) => promise,
            Err(err) => {
                on_rejected(FolioError::PlaybackRejected(describe(&err)));
                return;
            }
        };
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                on_rejected(FolioError::PlaybackRejected(describe(&err)));
            }
        });
    }

    pub fn pause(&self) {
        let _ = self.element.pause();
    }

    pub fn set_volume(&self, volume: f64) {
        self.element.set_volume(volume.clamp(0.0, 1.0));
    }

    /// Pause and drop the loaded media.
    pub fn release(self) {
        let _ = self.element.pause();
        self.element.remove_attribute("src").ok();
        self.element.load();
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            js_sys::Reflect::get(err, &JsValue::from_str("name"))
                .ok()
                .and_then(|v| v.as_string())
        })
        .unwrap_or_else(|| format!("{err:?}"))
}
