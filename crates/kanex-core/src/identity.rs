//! The identity functor.
//!
//! `Identity<A>` wraps exactly one value. It is the degenerate `H` or `F`
//! in several conversions (`adjoint_to_ran`, `adjoint_to_lan`), and with
//! `G = H = Identity` a conversion `A → Identity<B>` behaves exactly like a
//! plain function `A → B`.

use crate::functor::{Applicative, Functor};
use crate::kind::Kind;
use serde::{Deserialize, Serialize};

/// A transparent single-value wrapper.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Identity<A>(pub A);

impl<A> Identity<A> {
    pub fn into_inner(self) -> A {
        self.0
    }
}

/// Marker for the [`Identity`] constructor.
pub enum IdentityK {}

impl Kind for IdentityK {
    type Of<A> = Identity<A>;
}

impl Functor for IdentityK {
    fn map<A, B, F>(fa: Identity<A>, mut f: F) -> Identity<B>
    where
        F: FnMut(A) -> B,
    {
        Identity(f(fa.0))
    }

    fn unzip<A, B>(fab: Identity<(A, B)>) -> (Identity<A>, Identity<B>) {
        let (a, b) = fab.0;
        (Identity(a), Identity(b))
    }
}

impl Applicative for IdentityK {
    fn point<A>(a: A) -> Identity<A> {
        Identity(a)
    }

    fn apply2<A, B, C, F>(fa: Identity<A>, fb: Identity<B>, mut f: F) -> Identity<C>
    where
        F: FnMut(A, B) -> C,
    {
        Identity(f(fa.0, fb.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_map_applies_once() {
        let mut calls = 0;
        let out = IdentityK::map::<i32, i32, _>(Identity(4), |n| {
            calls += 1;
            n * 10
        });
        assert_eq!(out, Identity(40));
        assert_eq!(calls, 1);
    }

    #[test]
    fn identity_serializes_transparently() {
        let json = serde_json::to_value(Identity(7)).unwrap();
        assert_eq!(json, serde_json::json!(7));
        let back: Identity<i64> = serde_json::from_value(json).unwrap();
        assert_eq!(back, Identity(7));
    }
}
