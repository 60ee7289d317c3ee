/// Type-state markers for the session builder
///
/// A session cannot be built until a widget locator has been supplied;
/// the compiler enforces it.

use std::marker::PhantomData;

/// Marker trait for locator state
pub trait LocatorState {}

/// Locator has not been set
pub struct NoLocator;
impl LocatorState for NoLocator {}

/// Locator has been set
pub struct HasLocator;
impl LocatorState for HasLocator {}

/// Phantom marker to prevent direct construction
#[derive(Debug, Clone, Copy)]
pub struct TypeState<L> {
    _locator: PhantomData<L>,
}

impl<L> TypeState<L> {
    pub(crate) fn new() -> Self {
        Self {
            _locator: PhantomData,
        }
    }
}
