//! Thin helpers over the page. Missing elements are not errors: the page
//! simply lacks that piece of chrome and the update is skipped.

use folio_engine::{DeviceProfile, RegionBounds, Section, Spark, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Shared clock: the same timebase rAF hands out.
pub fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_default()
}

pub fn by_id(id: &str) -> Option<Element> {
    document().ok()?.get_element_by_id(id)
}

pub fn html_by_id(id: &str) -> Option<HtmlElement> {
    by_id(id)?.dyn_into::<HtmlElement>().ok()
}

pub fn set_class(id: &str, class: &str, on: bool) {
    if let Some(el) = by_id(id) {
        let _ = el.class_list().toggle_with_force(class, on);
    }
}

pub fn set_text(id: &str, text: &str) {
    if let Some(el) = by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_style(id: &str, property: &str, value: &str) {
    if let Some(el) = html_by_id(id) {
        let _ = el.style().set_property(property, value);
    }
}

pub fn viewport() -> Viewport {
    let Ok(w) = window() else {
        return Viewport::default();
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1280.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(720.0);
    Viewport::new(width, height, w.device_pixel_ratio())
}

pub fn device_profile() -> DeviceProfile {
    let width = viewport().width;
    let agent = window()
        .and_then(|w| w.navigator().user_agent())
        .unwrap_or_default();
    DeviceProfile::from_user_agent(&agent, width)
}

pub fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y()).unwrap_or_default()
}

/// Viewport-relative box of a section, or `None` if it is not on the page.
pub fn section_bounds(section: Section) -> Option<RegionBounds> {
    let rect = by_id(section.id())?.get_bounding_client_rect();
    Some(RegionBounds::new(rect.top(), rect.bottom()))
}

/// Append a one-shot spark element to `container_id`. The element removes
/// itself when its CSS animation ends.
pub fn spawn_spark(container_id: &str, class: &str, spark: &Spark) -> Result<(), JsValue> {
    let Some(container) = by_id(container_id) else {
        return Ok(());
    };
    let el: HtmlElement = document()?.create_element("div")?.dyn_into()?;
    el.set_class_name(class);
    let style = el.style();
    style.set_property("left", &format!("{:.2}%", spark.left_pct))?;
    style.set_property("top", &format!("{:.2}%", spark.top_pct))?;
    if let Some(ms) = spark.duration_ms {
        style.set_property("animation-duration", &format!("{:.0}ms", ms))?;
    }
    if let Some(ms) = spark.delay_ms {
        style.set_property("animation-delay", &format!("{:.0}ms", ms))?;
    }

    let doomed = el.clone();
    let remove = Closure::once_into_js(move || doomed.remove());
    el.add_event_listener_with_callback("animationend", remove.unchecked_ref())?;
    container.append_child(&el)?;
    Ok(())
}
