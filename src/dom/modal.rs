//! Modal visibility: Bootstrap when it's loaded, plain CSS otherwise.

use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

use crate::fields::ModalHandle;

#[wasm_bindgen]
extern "C" {
    type BootstrapModal;

    #[wasm_bindgen(js_namespace = ["window", "bootstrap", "Modal"], js_name = getOrCreateInstance, catch)]
    fn get_or_create_instance(element: &Element) -> Result<BootstrapModal, JsValue>;

    #[wasm_bindgen(method)]
    fn show(this: &BootstrapModal);
}

pub struct DomModal {
    element: HtmlElement,
}

impl DomModal {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    fn show_without_bootstrap(&self) {
        let _ = self.element.style().set_property("display", "block");
        let _ = self.element.class_list().add_1("show");
        let _ = self.element.remove_attribute("aria-hidden");
    }
}

impl ModalHandle for DomModal {
    fn show(&self) {
        match get_or_create_instance(&self.element) {
            Ok(modal) => modal.show(),
            Err(_) => {
                log::debug!("bootstrap.Modal unavailable, toggling display on #{}", self.element.id());
                self.show_without_bootstrap();
            }
        }
    }
}
