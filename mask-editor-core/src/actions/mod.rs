//! Action implementations for layout editing
//!
//! This module contains all the concrete action types that can be executed
//! through the action system.

pub mod add_mask_frame;
pub mod add_mask_point;
pub mod remove_mask_frame;
pub mod remove_mask_point;
pub mod transform_frame;

pub use add_mask_frame::AddMaskFrameAction;
pub use add_mask_point::AddMaskPointAction;
pub use remove_mask_frame::RemoveMaskFrameAction;
pub use remove_mask_point::RemoveMaskPointAction;
pub use transform_frame::{TransformFrameAction, TransformKind};
