use crate::constants::STATUS_ID;
use web_sys as web;

#[inline]
pub fn show_status(document: &web::Document, kind: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(STATUS_ID) {
        el.set_text_content(Some(text));
        _ = el.set_attribute("data-kind", kind);
        _ = el.class_list().remove_1("hidden");
    }
}

#[inline]
pub fn clear_status(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(STATUS_ID) {
        el.set_text_content(None);
        _ = el.remove_attribute("data-kind");
        _ = el.class_list().add_1("hidden");
    }
}
