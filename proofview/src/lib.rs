pub mod model;
pub mod codec;
pub mod config;
pub mod label;
pub mod limits;
pub mod bridge;
pub mod registry;
pub mod scene;
pub mod tree;
pub mod visibility;
pub mod explorer;
mod json;

pub use bridge::{BridgeCall, BridgeError, OverlayHandle, Recorder, RenderBridge};
pub use codec::{decode, encode, DecodeError};
pub use config::Palette;
pub use explorer::{ClickOutcome, Explorer};
pub use json::IngestError;
pub use model::{Color, EntityDescriptor, EntityKind, LinePrimitive, RenderKind};
pub use registry::{SelectError, SelectionRegistry, Toggled};
pub use scene::Scene;
pub use tree::{NodeId, ProofStep, ProofTree, TreeError};
pub use visibility::{compute_visibility, Visibility};

impl Scene {
    pub fn from_json_value(v: serde_json::Value) -> Result<Scene, IngestError> {
        json::scene_from_json_impl(v)
    }
    pub fn from_json_value_strict(v: serde_json::Value) -> Result<Scene, IngestError> {
        json::scene_from_json_impl_strict(v)
    }
}

/// Parses a proof description into its steps without unfolding it.
pub fn steps_from_json_value(v: serde_json::Value) -> Result<Vec<ProofStep>, IngestError> {
    json::steps_from_json_impl(v)
}
