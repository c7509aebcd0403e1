//! DOM presentation surface
//!
//! The page markup (wheel div, button, status line, result card, canvas) is
//! external; this module only holds references to it and applies side
//! effects: wheel face paint, rotation transform, text updates, the result
//! pulse, and button enablement.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement};

use crate::prizes::{PRIZES, Prize, gradient_stops};
use crate::slice_angle;

/// Handles to the widget's DOM nodes
pub struct Presentation {
    wheel: HtmlElement,
    spin_btn: HtmlButtonElement,
    status: Element,
    result_title: Element,
    result_description: Element,
    result_card: HtmlElement,
}

impl Presentation {
    /// Look up the widget's nodes. Missing markup is a startup contract
    /// violation, not a runtime condition.
    pub fn from_document(document: &Document) -> Self {
        Self {
            wheel: require(document, "wheel"),
            spin_btn: require(document, "spin-btn"),
            status: document
                .get_element_by_id("status")
                .expect("no #status element"),
            result_title: document
                .get_element_by_id("result-title")
                .expect("no #result-title element"),
            result_description: document
                .get_element_by_id("result-description")
                .expect("no #result-description element"),
            result_card: require(document, "result-card"),
        }
    }

    /// Paint the wheel face once at startup: a conic-gradient pie of the
    /// prize colors plus one label per slice rotated out to its mid-angle.
    pub fn build_wheel(&self, document: &Document) {
        let stops = gradient_stops();
        let _ = self
            .wheel
            .style()
            .set_property("background", &format!("conic-gradient({stops})"));

        let angle = slice_angle(PRIZES.len());
        let radius = label_radius();
        for (i, prize) in PRIZES.iter().enumerate() {
            let Ok(label) = document.create_element("span") else {
                continue;
            };
            label.set_class_name("segment-label");
            label.set_text_content(Some(prize.label));
            if let Some(el) = label.dyn_ref::<HtmlElement>() {
                let base_angle = i as f64 * angle + angle / 2.0;
                let _ = el.style().set_property(
                    "transform",
                    &format!(
                        "translate(-50%, -50%) rotate({base_angle}deg) translateY(-{radius}px) rotate({neg}deg)",
                        neg = -base_angle
                    ),
                );
            }
            let _ = self.wheel.append_child(&label);
        }
    }

    /// Set the wheel's absolute rotation; the CSS transition on the wheel
    /// element supplies the animation
    pub fn set_wheel_rotation(&self, degrees: f64) {
        let _ = self
            .wheel
            .style()
            .set_property("transform", &format!("rotate({degrees}deg)"));
    }

    pub fn set_status(&self, text: &str) {
        self.status.set_text_content(Some(text));
    }

    /// Fill the result card and retrigger its pulse animation
    pub fn show_result(&self, prize: &Prize) {
        self.result_title.set_text_content(Some(prize.label));
        self.result_description
            .set_text_content(Some(prize.description));

        // Remove-reflow-add so the CSS animation restarts on repeat wins
        let _ = self.result_card.class_list().remove_1("pulse");
        let _ = self.result_card.offset_width();
        let _ = self.result_card.class_list().add_1("pulse");
    }

    pub fn set_spin_enabled(&self, enabled: bool) {
        self.spin_btn.set_disabled(!enabled);
    }
}

fn require<T: JsCast>(document: &Document, id: &str) -> T {
    document
        .get_element_by_id(id)
        .unwrap_or_else(|| panic!("no #{id} element"))
        .dyn_into()
        .unwrap_or_else(|_| panic!("#{id} has the wrong element type"))
}

/// Label orbit radius in pixels, capped for narrow viewports
fn label_radius() -> f64 {
    let width = web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width * 0.15).min(88.0)
}
