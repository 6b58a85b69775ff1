//! Bindings for the browser scripts loaded by the shell: the Leaflet
//! compass control and html2canvas.

use leptos::logging::warn;
use leptos_leaflet::leaflet::{Control, Map};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{
    js_sys::{Object, Promise, Reflect},
    HtmlAnchorElement, HtmlCanvasElement, HtmlElement,
};

pub const MAP_IMAGE_FILE: &str = "treasure-map.png";

const MAP_SELECTOR: &str = ".leaflet-container";
const PARCHMENT: &str = "#f4d03f";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(extends = Control, js_namespace = ["L", "Control"])]
    #[derive(Debug, Clone)]
    pub type Compass;

    #[wasm_bindgen(constructor, js_namespace = ["L", "Control"])]
    pub fn new(options: &JsValue) -> Compass;

    #[wasm_bindgen(js_name = html2canvas)]
    fn html2canvas(element: &HtmlElement, options: &JsValue) -> Promise;
}

/// Plain JS object from key/value pairs.
pub fn js_object(entries: &[(&str, JsValue)]) -> JsValue {
    let object = Object::new();
    for (key, value) in entries {
        if Reflect::set(&object, &JsValue::from_str(key), value).is_err() {
            warn!("could not set option {}", key);
        }
    }
    object.into()
}

/// Adds the device-heading compass to the top right corner of `map`.
pub fn add_compass(map: &Map) {
    let options = js_object(&[
        ("autoActive", JsValue::TRUE),
        ("showDigit", JsValue::TRUE),
        ("position", JsValue::from_str("topright")),
        ("width", JsValue::from_f64(40.0)),
        ("height", JsValue::from_f64(40.0)),
    ]);
    map.add_control(&Compass::new(&options));
}

/// Renders the visible map to a PNG and hands it to the browser as a
/// download. Failures are logged; the page is left as it was.
pub fn download_map() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        warn!("no document to capture");
        return;
    };
    let element = match document.query_selector(MAP_SELECTOR) {
        Ok(Some(element)) => element,
        _ => {
            warn!("map container not found");
            return;
        }
    };
    let Ok(element) = element.dyn_into::<HtmlElement>() else {
        warn!("map container is not an html element");
        return;
    };

    let options = js_object(&[
        ("useCORS", JsValue::TRUE),
        ("allowTaint", JsValue::TRUE),
        ("backgroundColor", JsValue::from_str(PARCHMENT)),
    ]);

    let on_canvas = Closure::once(move |canvas: JsValue| {
        if let Err(e) = save_canvas(canvas) {
            warn!("could not save the map image: {:?}", e);
        }
    });
    let on_error = Closure::once(move |e: JsValue| {
        warn!("could not capture the map: {:?}", e);
    });

    let _ = html2canvas(&element, &options).then2(&on_canvas, &on_error);

    on_canvas.forget();
    on_error.forget();
}

fn save_canvas(canvas: JsValue) -> Result<(), JsValue> {
    let canvas: HtmlCanvasElement = canvas.dyn_into()?;
    let href = canvas.to_data_url_with_type("image/png")?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_download(MAP_IMAGE_FILE);
    link.set_href(&href);
    link.click();
    Ok(())
}
