use wasm_bindgen::prelude::*;
mod api;
mod board;
mod error;
mod interop;
mod logging;

pub use api::{
    decode_tag, decode_tag_res, init_logging, label_tag, scene_from_json_res, set_panic_hook,
};
pub use board::JsBoard;

use proofview::{Palette, ProofTree, Scene};

/// Proof view bound to one JS board.
#[wasm_bindgen]
pub struct Explorer { pub(crate) inner: proofview::Explorer<board::Board> }

impl Explorer {
    pub fn rs_new(board: JsBoard, scene: Scene, tree: ProofTree, palette: Palette) -> Explorer {
        Explorer { inner: proofview::Explorer::new(board::Board::new(board, scene), palette, tree) }
    }
}
