//! Foundation types for Post Position.
//!
//! This crate provides the identity and ordering types shared by every other
//! `postpos-*` crate.
//!
//! # Key Types
//!
//! - [`ItemId`] - Stable identifier of a content item
//! - [`ContentItem`] - A unit of content with host-attached payload
//! - [`Identified`] - Anything the merger can compare by identifier
//! - [`Position`] - Stored, non-negative position value (`0` = not pinned)
//! - [`PinnedItem`] - An item paired with its requested 1-based slot
//! - [`submission::parse_position`] - Edit-form value sanitization

pub mod error;
pub mod item;
pub mod pin;
pub mod submission;

pub use error::TypeError;
pub use item::{ContentItem, Identified, ItemId};
pub use pin::{parse_pin_spec, PinnedItem, Position};
pub use submission::parse_position;
