//! Identity derivation for tasks and destroy targets.
//!
//! A locator is its own identity, verbatim. A callback's identity is its
//! stable textual form (`Callback::label`). Invocations are never cached, so
//! destroying by a callback identity always resolves as "absent".

use super::types::{Callback, DestroyTarget, Identity};

pub fn for_locator(locator: &str) -> Identity {
    Identity::new(locator)
}

pub fn for_callback(callback: &Callback) -> Identity {
    Identity::new(callback.label())
}

pub fn derive(target: &DestroyTarget) -> Identity {
    match target {
        DestroyTarget::Locator(locator) => for_locator(locator),
        DestroyTarget::Callback(callback) => for_callback(callback),
    }
}
