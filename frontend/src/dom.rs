//! Page binding helpers
//!
//! The simulations attach to markup that already exists on the page. Lookups
//! happen once at mount time; everything after that is measurement and
//! style/class/text writes. Write failures are ignored: a failed style write
//! must not abort a render.

use shared::{Rect, SetupError, Size, StatusMessage, TargetGeometry};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, ResizeObserver, SvgGraphicsElement};

// ===== LOOKUP =====

/// Element lookup that reports failures against one simulation.
pub struct PageLookup {
    simulation: &'static str,
    document: Document,
}

impl PageLookup {
    pub fn new(simulation: &'static str) -> Result<Self, SetupError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(SetupError::NoDocument { simulation })?;
        Ok(Self {
            simulation,
            document,
        })
    }

    pub fn required<E: JsCast>(&self, id: &str) -> Result<E, SetupError> {
        let name = format!("#{id}");
        match self.document.get_element_by_id(id) {
            Some(element) => self.cast(element, name),
            None => Err(SetupError::missing(self.simulation, name)),
        }
    }

    /// Decorative elements the simulation can run without.
    pub fn optional<E: JsCast>(&self, id: &str) -> Option<E> {
        self.document.get_element_by_id(id)?.dyn_into().ok()
    }

    pub fn required_selector<E: JsCast>(&self, selector: &str) -> Result<E, SetupError> {
        match self.document.query_selector(selector).ok().flatten() {
            Some(element) => self.cast(element, selector.to_string()),
            None => Err(SetupError::missing(self.simulation, selector)),
        }
    }

    /// First match of `selectors` inside `root`, tried in order. The error
    /// names every selector that was tried.
    pub fn required_within<E: JsCast>(&self, root: &Element, selectors: &[&str]) -> Result<E, SetupError> {
        let name = selectors.join(" or ");
        let found = selectors
            .iter()
            .find_map(|selector| root.query_selector(selector).ok().flatten());
        match found {
            Some(element) => self.cast(element, name),
            None => Err(SetupError::missing(self.simulation, name)),
        }
    }

    fn cast<E: JsCast>(&self, element: Element, name: String) -> Result<E, SetupError> {
        element
            .dyn_into::<E>()
            .map_err(|_| SetupError::WrongElementType {
                simulation: self.simulation,
                element: name,
                expected: short_type_name::<E>(),
            })
    }
}

fn short_type_name<E>() -> &'static str {
    let full = std::any::type_name::<E>();
    full.rsplit("::").next().unwrap_or(full)
}

// ===== MEASUREMENT =====

pub fn client_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

pub fn offset_size(element: &HtmlElement) -> Size {
    Size::new(
        f64::from(element.offset_width()),
        f64::from(element.offset_height()),
    )
}

/// Invalidate measurements taken under the previous layout.
pub fn mark_layout_stale(epoch: &mut u32) {
    *epoch = epoch.wrapping_add(1);
}

/// A stage target bound to its page element.
#[derive(Clone)]
pub enum MountedTarget {
    /// Shape inside an SVG diagram; `graphic` is the owning `<svg>`.
    Shape {
        shape: SvgGraphicsElement,
        graphic: Element,
    },
    Rect(Element),
}

impl MountedTarget {
    pub fn element(&self) -> &Element {
        match self {
            MountedTarget::Shape { shape, .. } => shape,
            MountedTarget::Rect(element) => element,
        }
    }

    /// Current geometry, `None` while the shape has no bounding box yet.
    pub fn geometry(&self) -> Option<TargetGeometry> {
        match self {
            MountedTarget::Shape { shape, graphic } => {
                let bbox = shape.get_b_box().ok()?;
                Some(TargetGeometry::Shape {
                    local_bbox: Rect::new(
                        f64::from(bbox.x()),
                        f64::from(bbox.y()),
                        f64::from(bbox.width()),
                        f64::from(bbox.height()),
                    ),
                    graphic_client: client_rect(graphic),
                })
            }
            MountedTarget::Rect(element) => Some(TargetGeometry::Rect {
                client: client_rect(element),
            }),
        }
    }
}

// ===== WRITES =====

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    element.style().set_property(property, value).ok();
}

pub fn set_px(element: &HtmlElement, property: &str, value: f64) {
    set_style(element, property, &format!("{value}px"));
}

pub fn toggle_class(element: &Element, class: &str, on: bool) {
    element.class_list().toggle_with_force(class, on).ok();
}

pub fn set_text(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

/// `<strong>{heading}</strong> {body}`
pub fn write_status(element: &Element, status: &StatusMessage) {
    element.set_text_content(None);
    let Some(document) = element.owner_document() else {
        set_text(element, &format!("{} {}", status.heading, status.body));
        return;
    };
    if let Ok(strong) = document.create_element("strong") {
        strong.set_text_content(Some(&status.heading));
        element.append_child(&strong).ok();
    }
    let body = document.create_text_node(&format!(" {}", status.body));
    element.append_child(&body).ok();
}

// ===== CALLBACKS =====

/// Listener that lives as long as the page.
pub fn on_event(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}

/// Listener for an event that fires once, such as `animationend`.
pub fn on_event_once(target: &EventTarget, event: &str, handler: impl FnOnce() + 'static) {
    let callback = Closure::once_into_js(handler);
    target
        .add_event_listener_with_callback(event, callback.unchecked_ref())
        .ok();
}

/// Call `handler` whenever `element` changes size.
pub fn observe_resize(element: &Element, mut handler: impl FnMut() + 'static) -> Result<ResizeObserver, JsValue> {
    let closure = Closure::wrap(Box::new(move |_entries: JsValue, _observer: JsValue| handler())
        as Box<dyn FnMut(JsValue, JsValue)>);
    let observer = ResizeObserver::new(closure.as_ref().unchecked_ref())?;
    observer.observe(element);
    closure.forget();
    Ok(observer)
}

/// Run `callback` once before the next repaint.
pub fn next_frame(callback: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(callback);
    window
        .request_animation_frame(callback.unchecked_ref())
        .ok();
}
