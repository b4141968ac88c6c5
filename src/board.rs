use js_sys::Reflect;
use proofview::{BridgeError, Color, OverlayHandle, RenderBridge, RenderKind, Scene};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    /// Board object supplied by the page. `createOverlayPoint` is optional.
    pub type JsBoard;

    #[wasm_bindgen(method, catch, js_name = createOverlayLine)]
    fn create_overlay_line(
        this: &JsBoard,
        start: &str,
        end: &str,
        straight_first: bool,
        straight_last: bool,
        color: &str,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = createOverlayPoint)]
    fn create_overlay_point(this: &JsBoard, id: &str, color: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, js_name = removeOverlay)]
    fn remove_overlay(this: &JsBoard, overlay: &JsValue);

    #[wasm_bindgen(method, js_name = highlightPoint)]
    fn highlight_point(this: &JsBoard, id: &str);

    #[wasm_bindgen(method, js_name = unhighlightPoint)]
    fn unhighlight_point(this: &JsBoard, id: &str);
}

/// Render surface backed by a JS board. Overlay objects returned by the
/// board live in a slab; handles are slab indices.
pub struct Board {
    js: JsBoard,
    scene: Scene,
    overlays: Vec<Option<JsValue>>,
    free: Vec<u32>,
    point_markers: bool,
}

impl Board {
    pub fn new(js: JsBoard, scene: Scene) -> Board {
        let point_markers = Reflect::get(&js, &JsValue::from_str("createOverlayPoint"))
            .map(|f| f.is_function())
            .unwrap_or(false);
        Board { js, scene, overlays: Vec::new(), free: Vec::new(), point_markers }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn live_overlays(&self) -> usize {
        self.overlays.iter().filter(|o| o.is_some()).count()
    }

    fn store(&mut self, overlay: JsValue) -> OverlayHandle {
        if let Some(i) = self.free.pop() {
            self.overlays[i as usize] = Some(overlay);
            return OverlayHandle(i);
        }
        self.overlays.push(Some(overlay));
        OverlayHandle((self.overlays.len() - 1) as u32)
    }
}

fn describe(e: &JsValue) -> String {
    if let Some(err) = e.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

impl RenderBridge for Board {
    fn contains_point(&self, id: &str) -> bool {
        self.scene.contains_point(id)
    }

    fn create_overlay_line(
        &mut self,
        start: &str,
        end: &str,
        kind: RenderKind,
        color: Color,
    ) -> Result<OverlayHandle, BridgeError> {
        let css = color.to_hex();
        let v = self
            .js
            .create_overlay_line(start, end, kind.straight_first(), kind.straight_last(), &css)
            .map_err(|e| BridgeError::new(describe(&e)))?;
        if v.is_undefined() || v.is_null() {
            return Err(BridgeError::new(format!("board drew no line {}-{}", start, end)));
        }
        Ok(self.store(v))
    }

    fn create_overlay_point(
        &mut self,
        id: &str,
        color: Color,
    ) -> Result<Option<OverlayHandle>, BridgeError> {
        if !self.point_markers {
            return Ok(None);
        }
        let v = self
            .js
            .create_overlay_point(id, &color.to_hex())
            .map_err(|e| BridgeError::new(describe(&e)))?;
        if v.is_undefined() || v.is_null() {
            return Ok(None);
        }
        Ok(Some(self.store(v)))
    }

    fn remove_overlay(&mut self, handle: OverlayHandle) {
        let Some(slot) = self.overlays.get_mut(handle.0 as usize) else { return };
        if let Some(v) = slot.take() {
            self.js.remove_overlay(&v);
            self.free.push(handle.0);
        }
    }

    fn highlight_point(&mut self, id: &str) {
        self.js.highlight_point(id);
    }

    fn unhighlight_point(&mut self, id: &str) {
        self.js.unhighlight_point(id);
    }
}
