use crate::interop::{new_obj, set_kv};
use proofview::config::PaletteError;
use proofview::{DecodeError, IngestError, SelectError, TreeError};
use wasm_bindgen::JsValue;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

pub fn json_parse(e: impl std::fmt::Display) -> JsValue {
    err("invalid_json", e.to_string(), None)
}

pub fn decode(e: &DecodeError) -> JsValue {
    let d = new_obj();
    match e {
        DecodeError::UnrecognizedPrefix { tag } => set_kv(&d, "tag", &JsValue::from_str(tag)),
        DecodeError::ArityMismatch { kind, expected, found } => {
            set_kv(&d, "kind", &JsValue::from_str(kind.prefix()));
            set_kv(&d, "expected", &JsValue::from_f64(expected.min() as f64));
            set_kv(&d, "found", &JsValue::from_f64(*found as f64));
        }
        DecodeError::MalformedPoint { kind, position, id } => {
            set_kv(&d, "kind", &JsValue::from_str(kind.prefix()));
            set_kv(&d, "position", &JsValue::from_f64(*position as f64));
            set_kv(&d, "id", &JsValue::from_str(id));
        }
    }
    err(e.code(), e.to_string(), Some(d.into()))
}

pub fn select(e: &SelectError) -> JsValue {
    let d = new_obj();
    match e {
        SelectError::MissingEntity { key, point } => {
            set_kv(&d, "key", &JsValue::from_str(key));
            set_kv(&d, "point", &JsValue::from_str(point));
        }
        SelectError::Bridge { key, .. } => set_kv(&d, "key", &JsValue::from_str(key)),
    }
    err(e.code(), e.to_string(), Some(d.into()))
}

pub fn ingest(e: &IngestError) -> JsValue {
    let data = match e {
        IngestError::CapsExceeded { what, max } => {
            let d = new_obj();
            set_kv(&d, "what", &JsValue::from_str(what));
            set_kv(&d, "max", &JsValue::from_f64(*max as f64));
            Some(d.into())
        }
        IngestError::InvalidPremise { step, premise } => {
            let d = new_obj();
            set_kv(&d, "step", &JsValue::from_f64(*step as f64));
            set_kv(&d, "premise", &JsValue::from_f64(*premise as f64));
            Some(d.into())
        }
        IngestError::PremiseCycle { step } => {
            let d = new_obj();
            set_kv(&d, "step", &JsValue::from_f64(*step as f64));
            Some(d.into())
        }
        IngestError::NonFinite { name, .. }
        | IngestError::DuplicatePoint { name }
        | IngestError::UnknownPoint { name } => {
            let d = new_obj();
            set_kv(&d, "name", &JsValue::from_str(name));
            Some(d.into())
        }
        IngestError::Json(_) => None,
    };
    err(e.code(), e.to_string(), data)
}

pub fn tree(e: &TreeError) -> JsValue {
    let TreeError::UnknownNode(id) = e;
    let d = new_obj();
    set_kv(&d, "id", &JsValue::from_f64(*id as f64));
    err(e.code(), e.to_string(), Some(d.into()))
}

pub fn palette(e: &PaletteError) -> JsValue {
    err(e.code(), e.to_string(), None)
}
