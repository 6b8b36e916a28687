//! Verb objects.
//!
//! A verb object is the target of an action. It can be a plain name, a type
//! standing for "every value of this kind", or a concrete instance. The
//! mapper turns any of these into the canonical name rules are keyed by.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Reserved canonical name for rules that are not about any verb object.
pub const GLOBAL_RULE: &str = "GLOBAL_RULE";

/// An opaque extra argument forwarded unchanged to tests and hooks.
pub type Arg<'a> = &'a (dyn Any + Send + Sync);

/// Identity of a Rust type used as a verb object.
///
/// Equality and hashing use the [`TypeId`] only.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    type_name: &'static str,
}

impl TypeKey {
    /// The key for type `T`.
    pub fn of<T: ?Sized + Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    /// The type's identity.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The full type name as reported by the compiler.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The name the type was declared with.
    ///
    /// This is the last path segment of the type name with generic arguments
    /// stripped, so `app::model::Post` and `app::Page<u8>` become `Post` and
    /// `Page`. Anonymous types such as closures have no declared name and
    /// yield an empty string.
    ///
    /// The text of [`std::any::type_name`] is not guaranteed to be stable
    /// across compiler releases; register types explicitly where the name
    /// matters.
    pub fn declared_name(&self) -> &'static str {
        declared_name(self.type_name)
    }
}

fn declared_name(type_name: &'static str) -> &'static str {
    // Last `::` outside any generic argument list.
    let bytes = type_name.as_bytes();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, byte) in bytes.iter().enumerate() {
        match byte {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(index + 1) == Some(&b':') => start = index + 2,
            _ => {}
        }
    }

    let segment = &type_name[start..];
    let last = segment.split('<').next().unwrap_or(segment);
    let is_identifier = last
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && last.chars().all(|c| c.is_alphanumeric() || c == '_');

    if is_identifier {
        last
    } else {
        ""
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeKey").field(&self.type_name).finish()
    }
}

/// The target of an action.
#[derive(Clone, Copy, Default)]
pub enum VerbObject<'a> {
    /// No particular verb object; resolves to [`GLOBAL_RULE`].
    #[default]
    Global,

    /// A canonical name given directly.
    Name(&'a str),

    /// A type, standing for all of its values.
    Type(TypeKey),

    /// A concrete value together with its type.
    Instance {
        /// The value.
        value: Arg<'a>,

        /// The value's type.
        kind: TypeKey,
    },
}

impl<'a> VerbObject<'a> {
    /// A verb object given by name.
    pub fn name(name: &'a str) -> Self {
        Self::Name(name)
    }

    /// The type `T` as a verb object.
    pub fn of<T: Any>() -> Self {
        Self::Type(TypeKey::of::<T>())
    }

    /// A concrete value as a verb object.
    pub fn instance<T: Any + Send + Sync>(value: &'a T) -> Self {
        Self::Instance {
            value,
            kind: TypeKey::of::<T>(),
        }
    }

    /// Whether this is the global marker.
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }

    /// The type of a type or instance verb object.
    pub fn type_key(&self) -> Option<TypeKey> {
        match self {
            Self::Type(kind) | Self::Instance { kind, .. } => Some(*kind),
            Self::Global | Self::Name(_) => None,
        }
    }

    /// The instance value, if this is an instance of `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
        match self {
            Self::Instance { value, .. } => {
                let value: Arg<'a> = *value;
                value.downcast_ref::<T>()
            }
            _ => None,
        }
    }
}

impl<'a> From<&'a str> for VerbObject<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for VerbObject<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name.as_str())
    }
}

impl From<TypeKey> for VerbObject<'_> {
    fn from(kind: TypeKey) -> Self {
        Self::Type(kind)
    }
}

impl fmt::Debug for VerbObject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "Global"),
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Self::Type(kind) => f.debug_tuple("Type").field(kind).finish(),
            Self::Instance { kind, .. } => f.debug_struct("Instance").field("kind", kind).finish(),
        }
    }
}

impl fmt::Display for VerbObject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "{}", GLOBAL_RULE),
            Self::Name(name) => write!(f, "'{}'", name),
            Self::Type(kind) => write!(f, "type {}", kind.type_name()),
            Self::Instance { kind, .. } => write!(f, "instance of {}", kind.type_name()),
        }
    }
}
