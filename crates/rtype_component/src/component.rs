//! The [`Component`] sum type and typed access into it.
//!
//! Components are stored by the registry as a closed tagged union rather than
//! as type-erased boxes. Concrete component types implement
//! [`ComponentData`], which recovers a typed reference by matching on the
//! variant, so a lookup for the wrong kind yields `None` instead of a bad
//! cast.
//!
//! ## Component keys
//!
//! Each component attached to an entity has a string name. The registry keys
//! components by [`ComponentTypeId`], the FNV-1a 64-bit hash of that name,
//! which makes names unique per entity.

use serde::{Deserialize, Serialize};

use crate::motion::{Position, Velocity};

/// A component key derived from its string name using the FNV-1a 64-bit hash
/// algorithm.
///
/// The ID is deterministic: the same UTF-8 name always produces the same
/// `ComponentTypeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Compute the [`ComponentTypeId`] for a component name.
    ///
    /// # Algorithm (FNV-1a 64-bit)
    ///
    /// ```text
    /// hash = 0xcbf29ce484222325          (offset basis)
    /// for each byte in name.as_bytes():
    ///     hash = hash XOR byte
    ///     hash = hash * 0x00000100000001b3  (prime)
    /// return hash
    /// ```
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// The key of `T`'s canonical name.
    #[must_use]
    pub const fn of<T: ComponentData>() -> Self {
        Self::from_name(T::NAME)
    }
}

/// Discriminator naming the variant held by a [`Component`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Position,
    Velocity,
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Position => f.write_str("Position"),
            Self::Velocity => f.write_str("Velocity"),
        }
    }
}

/// Any value that can be attached to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Component {
    Position(Position),
    Velocity(Velocity),
}

impl Component {
    /// Returns the kind of the held value.
    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        match self {
            Self::Position(_) => ComponentKind::Position,
            Self::Velocity(_) => ComponentKind::Velocity,
        }
    }
}

/// Error returned when converting a [`Component`] into a concrete type of a
/// different kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected a {expected} component, found {found}")]
pub struct KindMismatch {
    pub expected: ComponentKind,
    pub found: ComponentKind,
}

/// A concrete component type that has its own [`Component`] variant.
///
/// # Examples
///
/// ```rust
/// use rtype_component::{Component, ComponentData, Position};
///
/// let stored: Component = Position::new(1.0, 2.0).into();
/// assert_eq!(Position::from_component(&stored), Some(&Position::new(1.0, 2.0)));
/// ```
pub trait ComponentData:
    Into<Component> + TryFrom<Component, Error = KindMismatch> + Send + Sync + 'static
{
    /// The variant this type is stored as.
    const KIND: ComponentKind;

    /// The canonical name under which this type is attached to an entity.
    const NAME: &'static str;

    /// Borrow `Self` out of a component, or `None` if it holds another kind.
    fn from_component(component: &Component) -> Option<&Self>;

    /// Mutably borrow `Self` out of a component, or `None` if it holds another kind.
    fn from_component_mut(component: &mut Component) -> Option<&mut Self>;

    /// Returns the [`ComponentTypeId`] of [`ComponentData::NAME`].
    fn component_type_id() -> ComponentTypeId {
        ComponentTypeId::from_name(Self::NAME)
    }
}
