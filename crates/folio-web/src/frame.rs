//! The single `requestAnimationFrame` loop every component is driven from.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type FrameCallback = Closure<dyn FnMut(f64)>;

pub struct FrameLoop {
    callback: Rc<RefCell<Option<FrameCallback>>>,
    handle: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    /// Call `on_frame` with the rAF timestamp on every animation frame until
    /// `stop` (or drop).
    pub fn start<F>(mut on_frame: F) -> Result<Self, JsValue>
    where
        F: FnMut(f64) + 'static,
    {
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));

        let f = callback.clone();
        let h = handle.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            on_frame(now);
            // Stopped from inside the frame: do not reschedule.
            if h.get().is_none() {
                return;
            }
            if let Some(cb) = f.borrow().as_ref() {
                match request(cb) {
                    Ok(id) => h.set(Some(id)),
                    Err(err) => {
                        log::warn!("frame: requestAnimationFrame failed: {err:?}");
                        h.set(None);
                    }
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let first = match callback.borrow().as_ref() {
            Some(cb) => request(cb)?,
            None => return Err(JsValue::from_str("frame callback missing")),
        };
        handle.set(Some(first));
        Ok(Self { callback, handle })
    }

    pub fn is_running(&self) -> bool {
        self.handle.get().is_some()
    }

    /// Cancel the pending frame and release the callback.
    pub fn stop(&mut self) {
        if let Some(id) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        // Breaks the callback -> cell reference cycle.
        self.callback.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request(cb: &FrameCallback) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window.request_animation_frame(cb.as_ref().unchecked_ref())
}
