//! Location permission flow.
//!
//! On launch the flow checks for fine location. If it is held, updates start
//! right away; otherwise one combined fine + coarse request is issued and the
//! reply, delivered through the event channel, decides. A denial is silent
//! and final.

mod flow;
mod system;
mod types;

pub use flow::{FlowAction, FlowOutcome, FlowState, PermissionFlow};
pub use system::{send_response, PermissionSystem, StaticPermissions};
pub use types::{
    AccessLevel, Permission, PermissionResponse, PermissionStatus, LOCATION_PERMISSIONS,
};
