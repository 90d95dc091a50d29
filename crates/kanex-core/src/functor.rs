//! Functor and Applicative capabilities.
//!
//! Instances live on [`Kind`] markers and are selected per call site with a
//! turbofish (`OptionK::map::<A, B, _>(..)`); nothing is resolved through a
//! global registry.
//!
//! ## Laws
//!
//! The crate assumes, and never checks, that every instance satisfies:
//!
//! ```text
//! map(x, id)              == x
//! map(map(x, f), g)       == map(x, g ∘ f)
//! unzip(x)                == (map(x, fst), map(x, snd))
//!
//! ap(point(id), v)        == v
//! ap(point(f), point(x))  == point(f(x))
//! ap(u, point(y))         == ap(point(|f| f(y)), u)
//! ap(ap(ap(point(∘), u), v), w) == ap(u, ap(v, w))
//! ```
//!
//! `unzip` is the affine stand-in for using one functor value twice: where
//! a garbage-collected language writes `(map(x, fst), map(x, snd))` and
//! shares `x`, Rust would need `x: Clone`. Every structural functor can
//! split a paired value without cloning its elements.

use crate::kind::{Compose, Kind};
use std::marker::PhantomData;

/// A type constructor with a structure-preserving `map`.
pub trait Functor: Kind {
    fn map<A, B, F>(fa: Self::Of<A>, f: F) -> Self::Of<B>
    where
        F: FnMut(A) -> B;

    /// Split a functor of pairs into a pair of functors with the same shape.
    fn unzip<A, B>(fab: Self::Of<(A, B)>) -> (Self::Of<A>, Self::Of<B>);
}

/// A functor with `point` and a binary combinator.
pub trait Applicative: Functor {
    fn point<A>(a: A) -> Self::Of<A>;

    /// Combine two values elementwise. Both operands are consumed eagerly.
    fn apply2<A, B, C, F>(fa: Self::Of<A>, fb: Self::Of<B>, f: F) -> Self::Of<C>
    where
        F: FnMut(A, B) -> C;

    /// Apply wrapped functions to wrapped arguments.
    fn ap<A, B, F>(ff: Self::Of<F>, fa: Self::Of<A>) -> Self::Of<B>
    where
        F: FnOnce(A) -> B,
    {
        Self::apply2::<F, A, B, _>(ff, fa, |f, a| f(a))
    }
}

// ─── Option ─────────────────────────────────────────────────────────────────

/// Marker for `Option`.
pub enum OptionK {}

impl Kind for OptionK {
    type Of<A> = Option<A>;
}

impl Functor for OptionK {
    fn map<A, B, F>(fa: Option<A>, f: F) -> Option<B>
    where
        F: FnMut(A) -> B,
    {
        fa.map(f)
    }

    fn unzip<A, B>(fab: Option<(A, B)>) -> (Option<A>, Option<B>) {
        match fab {
            Some((a, b)) => (Some(a), Some(b)),
            None => (None, None),
        }
    }
}

impl Applicative for OptionK {
    fn point<A>(a: A) -> Option<A> {
        Some(a)
    }

    fn apply2<A, B, C, F>(fa: Option<A>, fb: Option<B>, mut f: F) -> Option<C>
    where
        F: FnMut(A, B) -> C,
    {
        match (fa, fb) {
            (Some(a), Some(b)) => Some(f(a, b)),
            _ => None,
        }
    }
}

// ─── Result ─────────────────────────────────────────────────────────────────

/// Marker for `Result<_, E>`. The first error encountered wins.
pub struct ResultK<E>(PhantomData<fn() -> E>);

impl<E: 'static> Kind for ResultK<E> {
    type Of<A> = Result<A, E>;
}

/// `unzip` duplicates the error, hence `E: Clone`.
impl<E: Clone + 'static> Functor for ResultK<E> {
    fn map<A, B, F>(fa: Result<A, E>, f: F) -> Result<B, E>
    where
        F: FnMut(A) -> B,
    {
        fa.map(f)
    }

    fn unzip<A, B>(fab: Result<(A, B), E>) -> (Result<A, E>, Result<B, E>) {
        match fab {
            Ok((a, b)) => (Ok(a), Ok(b)),
            Err(e) => (Err(e.clone()), Err(e)),
        }
    }
}

impl<E: Clone + 'static> Applicative for ResultK<E> {
    fn point<A>(a: A) -> Result<A, E> {
        Ok(a)
    }

    fn apply2<A, B, C, F>(fa: Result<A, E>, fb: Result<B, E>, mut f: F) -> Result<C, E>
    where
        F: FnMut(A, B) -> C,
    {
        match (fa, fb) {
            (Ok(a), Ok(b)) => Ok(f(a, b)),
            (Err(e), _) => Err(e),
            (Ok(_), Err(e)) => Err(e),
        }
    }
}

// ─── Vec ────────────────────────────────────────────────────────────────────

/// Marker for `Vec`. Functor only: a cartesian `apply2` would need to
/// clone elements.
pub enum VecK {}

impl Kind for VecK {
    type Of<A> = Vec<A>;
}

impl Functor for VecK {
    fn map<A, B, F>(fa: Vec<A>, f: F) -> Vec<B>
    where
        F: FnMut(A) -> B,
    {
        fa.into_iter().map(f).collect()
    }

    fn unzip<A, B>(fab: Vec<(A, B)>) -> (Vec<A>, Vec<B>) {
        fab.into_iter().unzip()
    }
}

// ─── Compose ────────────────────────────────────────────────────────────────

impl<F: Functor, G: Functor> Functor for Compose<F, G> {
    fn map<A, B, K>(fga: F::Of<G::Of<A>>, mut k: K) -> F::Of<G::Of<B>>
    where
        K: FnMut(A) -> B,
    {
        F::map::<G::Of<A>, G::Of<B>, _>(fga, |ga| G::map::<A, B, _>(ga, &mut k))
    }

    fn unzip<A, B>(fgab: F::Of<G::Of<(A, B)>>) -> (F::Of<G::Of<A>>, F::Of<G::Of<B>>) {
        let split = F::map::<G::Of<(A, B)>, (G::Of<A>, G::Of<B>), _>(fgab, G::unzip::<A, B>);
        F::unzip::<G::Of<A>, G::Of<B>>(split)
    }
}

impl<F: Applicative, G: Applicative> Applicative for Compose<F, G> {
    fn point<A>(a: A) -> F::Of<G::Of<A>> {
        F::point(G::point(a))
    }

    fn apply2<A, B, C, K>(fa: F::Of<G::Of<A>>, fb: F::Of<G::Of<B>>, mut k: K) -> F::Of<G::Of<C>>
    where
        K: FnMut(A, B) -> C,
    {
        F::apply2::<G::Of<A>, G::Of<B>, G::Of<C>, _>(fa, fb, |ga, gb| {
            G::apply2::<A, B, C, _>(ga, gb, &mut k)
        })
    }
}
