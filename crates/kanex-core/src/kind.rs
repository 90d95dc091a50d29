//! Type constructors as marker types.
//!
//! Rust has no higher-kinded type parameters, so a unary type constructor
//! `F` is named by a marker type implementing [`Kind`], and `F<A>` is
//! spelled `F::Of<A>`. Markers are never instantiated.
//!
//! `F::Of<A>` is a projection, and projections are not injective: the
//! compiler cannot recover `A` from a value of type `F::Of<A>` when `F` is
//! generic. Generic code in this crate therefore names every type argument
//! explicitly (`F::map::<A, B, _>(..)`).

use std::marker::PhantomData;

/// A unary type constructor.
pub trait Kind: 'static {
    /// The constructor applied to `A`.
    type Of<A>;
}

/// Composition `F ∘ G`: `Compose<F, G>::Of<A> = F::Of<G::Of<A>>`.
///
/// Functor and Applicative when both components are (see
/// [`crate::functor`]).
pub struct Compose<F, G>(PhantomData<fn() -> (F, G)>);

impl<F: Kind, G: Kind> Kind for Compose<F, G> {
    type Of<A> = F::Of<G::Of<A>>;
}
