use js_sys::{Object, Reflect, Uint32Array};
use serde::Serialize;
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object { Object::new() }

pub fn set_kv(obj: &Object, key: &str, val: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), val);
}

pub fn arr_u32(data: &[u32]) -> Uint32Array { Uint32Array::from(data) }

pub fn arr_usize(data: &[usize]) -> Uint32Array {
    let v: Vec<u32> = data.iter().map(|&i| i as u32).collect();
    Uint32Array::from(&v[..])
}

/// Plain JS objects and arrays; maps become objects rather than `Map`.
pub fn to_js<T: Serialize + ?Sized>(v: &T) -> JsValue {
    v.serialize(&serde_wasm_bindgen::Serializer::json_compatible()).unwrap_or(JsValue::NULL)
}

/// `undefined` and `null` read as "not given".
pub fn json_arg(v: JsValue) -> Result<Option<serde_json::Value>, serde_wasm_bindgen::Error> {
    if v.is_undefined() || v.is_null() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(v).map(Some)
}
