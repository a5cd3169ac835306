use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A platform capability that may be missing.
pub enum Capability<T: ?Sized> {
    Available(Arc<T>),
    Unavailable,
}

impl<T: ?Sized> Capability<T> {
    pub fn get(&self) -> Option<&Arc<T>> {
        match self {
            Self::Available(inner) => Some(inner),
            Self::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl<T: ?Sized> Clone for Capability<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Available(inner) => Self::Available(Arc::clone(inner)),
            Self::Unavailable => Self::Unavailable,
        }
    }
}

impl<T: ?Sized> Debug for Capability<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(_) => write!(f, "Available"),
            Self::Unavailable => write!(f, "Unavailable"),
        }
    }
}
