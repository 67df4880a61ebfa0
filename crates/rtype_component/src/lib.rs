//! # rtype_component
//!
//! The "E" and "C" of the proof-of-concept ECS, entity identity and the data
//! that can be attached to an entity.
//!
//! This crate provides:
//!
//! - [`Entity`]: lightweight `u64` entity identifiers.
//! - [`EntityAllocator`]: monotonically increasing ID allocator.
//! - [`ComponentTypeId`]: name-derived component keys.
//! - [`Component`]: tagged union over every known component kind.
//! - [`ComponentData`]: typed access into a [`Component`] without downcasts.
//! - [`Position`] / [`Velocity`]: the 2D motion components.

pub mod component;
pub mod entity;
pub mod motion;

pub use component::{Component, ComponentData, ComponentKind, ComponentTypeId, KindMismatch};
pub use entity::{Entity, EntityAllocator};
pub use motion::{Position, Velocity};
