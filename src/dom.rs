use anyhow::{anyhow, Context};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn document() -> Option<web::Document> {
    web::window()?.document()
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .with_context(|| format!("missing #{id}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow!("#{id} is not a canvas: {:?}", e))
}

/// Current value of an `<input>`, or `None` if the element is absent.
pub fn input_value(document: &web::Document, id: &str) -> Option<String> {
    document
        .get_element_by_id(id)?
        .dyn_into::<web::HtmlInputElement>()
        .ok()
        .map(|input| input.value())
}

/// Listeners live as long as the page, so the closure is leaked.
fn listen(target: &web::EventTarget, event: &str, handler: Box<dyn FnMut(web::Event)>) {
    let closure = Closure::wrap(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("[dom] could not listen for {}: {:?}", event, e);
    }
    closure.forget();
}

/// Click handler on `#element_id`; returns whether the element exists.
pub fn on_click(document: &web::Document, element_id: &str, mut handler: impl FnMut() + 'static) -> bool {
    let Some(el) = document.get_element_by_id(element_id) else {
        return false;
    };
    listen(&el, "click", Box::new(move |_| handler()));
    true
}

pub fn on_keydown(target: &web::EventTarget, mut handler: impl FnMut(web::KeyboardEvent) + 'static) {
    listen(
        target,
        "keydown",
        Box::new(move |ev| {
            if let Ok(key_ev) = ev.dyn_into::<web::KeyboardEvent>() {
                handler(key_ev);
            }
        }),
    );
}

/// Match the backing store to CSS size * devicePixelRatio. Returns whether
/// the size changed, which clears the canvas.
pub fn fit_canvas_to_css(canvas: &web::HtmlCanvasElement) -> bool {
    let Some(window) = web::window() else {
        return false;
    };
    let dpr = window.device_pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    let width = ((rect.width() * dpr).round() as u32).max(1);
    let height = ((rect.height() * dpr).round() as u32).max(1);
    if canvas.width() == width && canvas.height() == height {
        return false;
    }
    canvas.set_width(width);
    canvas.set_height(height);
    true
}

/// Refit the canvas on window resize; `on_resized` runs only when the
/// backing store actually changed.
pub fn on_window_resize(canvas: &web::HtmlCanvasElement, mut on_resized: impl FnMut() + 'static) {
    let Some(window) = web::window() else {
        return;
    };
    let canvas = canvas.clone();
    listen(
        &window,
        "resize",
        Box::new(move |_| {
            if fit_canvas_to_css(&canvas) {
                on_resized();
            }
        }),
    );
}
