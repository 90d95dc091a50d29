//! Natural transformations.
//!
//! A natural transformation `F ⇒ G` is one conversion per type, so it is a
//! trait with a single generic method. An implementation must not inspect
//! `A`; naturality (`transform ∘ F.map(f) == G.map(f) ∘ transform`) follows
//! from that parametricity and is not checked.

use crate::functor::Functor;
use crate::identity::{Identity, IdentityK};
use crate::kind::{Compose, Kind};

/// A family of conversions `F<A> → G<A>`, one per `A`.
pub trait NaturalTransformation<F: Kind, G: Kind> {
    fn transform<A>(&self, fa: F::Of<A>) -> G::Of<A>;
}

/// `F ⇒ F`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransformation;

impl<F: Kind> NaturalTransformation<F, F> for IdentityTransformation {
    fn transform<A>(&self, fa: F::Of<A>) -> F::Of<A> {
        fa
    }
}

/// `F ⇒ Identity ∘ F`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WrapOuter;

impl<F: Kind> NaturalTransformation<F, Compose<IdentityK, F>> for WrapOuter {
    fn transform<A>(&self, fa: F::Of<A>) -> Identity<F::Of<A>> {
        Identity(fa)
    }
}

/// `Identity ∘ F ⇒ F`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnwrapOuter;

impl<F: Kind> NaturalTransformation<Compose<IdentityK, F>, F> for UnwrapOuter {
    fn transform<A>(&self, ifa: Identity<F::Of<A>>) -> F::Of<A> {
        ifa.into_inner()
    }
}

/// `F ⇒ F ∘ Identity`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WrapInner;

impl<F: Functor> NaturalTransformation<F, Compose<F, IdentityK>> for WrapInner {
    fn transform<A>(&self, fa: F::Of<A>) -> F::Of<Identity<A>> {
        F::map::<A, Identity<A>, _>(fa, Identity)
    }
}

/// `F ∘ Identity ⇒ F`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnwrapInner;

impl<F: Functor> NaturalTransformation<Compose<F, IdentityK>, F> for UnwrapInner {
    fn transform<A>(&self, fia: F::Of<Identity<A>>) -> F::Of<A> {
        F::map::<Identity<A>, A, _>(fia, Identity::into_inner)
    }
}
