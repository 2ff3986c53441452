//! Frame wire types and rendering helpers.

pub mod action;
pub mod frame;
pub mod meta;

pub use action::{ActionBody, FramePost, VerifiedAction};
pub use frame::{FrameDescriptor, ImageDescriptor};
pub use meta::{frame_meta_tags, render_frame_html, FrameLinks, FrameProps, MAX_BUTTONS};
