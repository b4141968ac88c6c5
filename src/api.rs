use crate::board::JsBoard;
use crate::interop::{arr_u32, arr_usize, json_arg, new_obj, set_kv, to_js};
use crate::{error, logging, Explorer};
use js_sys::{Object, Uint32Array};
use log::LevelFilter;
use proofview::label::label;
use proofview::{decode, ClickOutcome, Palette, ProofTree, RenderBridge, Scene};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Routes core logs to the console. Accepts `off`, `error`, `warn`,
/// `info`, `debug` or `trace`; returns false for anything else.
#[wasm_bindgen]
pub fn init_logging(level: &str) -> bool {
    match level.parse::<LevelFilter>() {
        Ok(l) => {
            logging::init(l);
            true
        }
        Err(_) => false,
    }
}

fn descriptor_obj(tag: &str) -> Result<JsValue, JsValue> {
    let d = decode(tag).map_err(|e| error::decode(&e))?;
    let obj: Object = to_js(&d).unchecked_into();
    set_kv(&obj, "label", &JsValue::from_str(&label(&d).to_string()));
    if let Some(v) = d.vertex() {
        set_kv(&obj, "vertex", &JsValue::from_str(v));
    }
    Ok(obj.into())
}

#[wasm_bindgen]
pub fn decode_tag(tag: &str) -> JsValue {
    descriptor_obj(tag).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub fn decode_tag_res(tag: &str) -> JsValue {
    match descriptor_obj(tag) {
        Ok(v) => error::ok(v),
        Err(e) => e,
    }
}

#[wasm_bindgen]
pub fn label_tag(tag: &str) -> Option<String> {
    decode(tag).ok().map(|d| label(&d).to_string())
}

/// Checks a scene description and returns it with its viewport.
#[wasm_bindgen]
pub fn scene_from_json_res(v: JsValue) -> JsValue {
    let val = match json_arg(v) {
        Ok(Some(val)) => val,
        Ok(None) => return error::json_parse("missing scene"),
        Err(e) => return error::json_parse(e),
    };
    match Scene::from_json_value_strict(val) {
        Ok(scene) => {
            let obj = new_obj();
            set_kv(&obj, "scene", &to_js(&scene));
            set_kv(&obj, "viewport", &to_js(&scene.viewport()));
            error::ok(obj.into())
        }
        Err(e) => error::ingest(&e),
    }
}

fn parse_scene(v: JsValue) -> Result<Scene, JsValue> {
    match json_arg(v).map_err(error::json_parse)? {
        Some(val) => Scene::from_json_value(val).map_err(|e| error::ingest(&e)),
        None => Ok(Scene::default()),
    }
}

fn parse_proof(v: JsValue) -> Result<ProofTree, JsValue> {
    match json_arg(v).map_err(error::json_parse)? {
        Some(val) => ProofTree::from_json_value(val).map_err(|e| error::ingest(&e)),
        None => Ok(ProofTree::default()),
    }
}

fn parse_palette(v: JsValue) -> Result<Palette, JsValue> {
    match json_arg(v).map_err(error::json_parse)? {
        Some(val) => Palette::from_json_value(val).map_err(|e| error::palette(&e)),
        None => Ok(Palette::default()),
    }
}

#[wasm_bindgen]
impl Explorer {
    /// `scene`, `proof` and `palette` are plain JSON values; any of them
    /// may be omitted. Throws a result envelope on bad input.
    #[wasm_bindgen(constructor)]
    pub fn new(
        board: JsBoard,
        scene: JsValue,
        proof: JsValue,
        palette: JsValue,
    ) -> Result<Explorer, JsValue> {
        let scene = parse_scene(scene)?;
        let tree = parse_proof(proof)?;
        let palette = parse_palette(palette)?;
        Ok(Explorer::rs_new(board, scene, tree, palette))
    }

    // Selection
    pub fn entity_clicked(&mut self, tag: &str) -> JsValue {
        match self.inner.entity_clicked(tag) {
            Ok(ClickOutcome::Toggled(t)) => to_js(&t),
            _ => JsValue::NULL,
        }
    }
    pub fn entity_clicked_res(&mut self, tag: &str) -> JsValue {
        match self.inner.entity_clicked(tag) {
            Ok(ClickOutcome::Toggled(t)) => error::ok(to_js(&t)),
            Ok(ClickOutcome::Skipped(e)) => error::decode(&e),
            Err(e) => error::select(&e),
        }
    }
    pub fn clear_selection(&mut self) -> JsValue {
        to_js(&self.inner.registry_mut().clear())
    }
    pub fn is_selected(&self, tag: &str) -> bool {
        self.inner.registry().is_selected(tag)
    }
    pub fn selected_keys(&self) -> JsValue {
        to_js(self.inner.registry().picked())
    }
    pub fn slot_of(&self, tag: &str) -> Option<u32> {
        self.inner.registry().slot_of(tag).map(|s| s as u32)
    }
    pub fn slot_usage(&self) -> Uint32Array {
        arr_u32(self.inner.registry().slot_usage())
    }
    pub fn point_usage(&self, id: &str) -> u32 {
        self.inner.registry().point_usage(id)
    }
    pub fn has_point(&self, id: &str) -> bool {
        self.inner.registry().bridge().contains_point(id)
    }
    pub fn live_overlay_count(&self) -> u32 {
        self.inner.registry().bridge().live_overlays() as u32
    }
    pub fn viewport(&self) -> JsValue {
        to_js(&self.inner.registry().bridge().scene().viewport())
    }

    // Tree
    pub fn tree(&self) -> JsValue {
        to_js(self.inner.tree())
    }
    pub fn node_count(&self) -> u32 {
        self.inner.tree().len() as u32
    }
    pub fn is_open(&self, id: u32) -> bool {
        self.inner.tree().is_open(id as usize)
    }
    pub fn figures(&self, id: u32) -> JsValue {
        to_js(&self.inner.tree().figures(id as usize))
    }
    pub fn node_toggled(&mut self, id: u32, propagate: bool) -> bool {
        self.inner.node_toggled_propagate(id as usize, propagate).unwrap_or(false)
    }
    pub fn node_toggled_res(&mut self, id: u32, propagate: bool) -> JsValue {
        match self.inner.node_toggled_propagate(id as usize, propagate) {
            Ok(open) => error::ok(JsValue::from_bool(open)),
            Err(e) => error::tree(&e),
        }
    }
    pub fn selected_nodes(&self) -> Uint32Array {
        arr_usize(&self.inner.selected_nodes())
    }

    // Filter
    pub fn essential_filter_toggled(&mut self, hide: bool) -> JsValue {
        to_js(self.inner.essential_filter_toggled(hide))
    }
    pub fn hides_non_essential(&self) -> bool {
        self.inner.hides_non_essential()
    }
    pub fn visibility(&self) -> JsValue {
        to_js(self.inner.visibility())
    }
}
