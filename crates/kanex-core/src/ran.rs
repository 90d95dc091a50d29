//! Right Kan extension `Ran<G, H, A>`.
//!
//! A value of `Ran<G, H, A>` answers, for *every* type `B` and every
//! conversion `k : A → G<B>`, with an `H<B>`. The operation is universally
//! quantified over `B`, so it is the single generic method of the
//! [`RightKan`] trait; each construction is its own adapter type, the way
//! iterator adapters are.
//!
//! ```text
//! gran                 Ran<G,H,G<A>>  → H<A>           (run with id)
//! to_ran               K<B>, K∘G ⇒ H  → Ran<G,H,B>
//! from_ran             K<G<B>>, K ⇒ Ran<G,H,->  → H<B>
//! adjoint_to_ran       F<A>           → Ran<G,Identity,A>     (F ⊣ G)
//! ran_to_adjoint       Ran<G,Identity,A> → F<A>               (F ⊣ G)
//! composed_adjoint_to_ran  H<F<A>>    → Ran<G,H,A>            (F ⊣ G)
//! RightKan::to_adjoint Ran<G,H,A>     → H<F<A>>               (F ⊣ G)
//! ```
//!
//! Every adapter runs through `&self` and may be run any number of times,
//! so the data it holds is cloned per run.
//!
//! Parametricity (a run must not branch on `B`) is not something the
//! compiler can enforce for hand-written implementations; the law checks
//! in `kanex-gate` and the property tests are what catch violations.

use crate::adjunction::Adjunction;
use crate::functor::Functor;
use crate::identity::{Identity, IdentityK};
use crate::kind::{Compose, Kind};
use crate::natural::NaturalTransformation;
use std::marker::PhantomData;

/// `H` extended from `G` on the right, at `Item`.
pub trait RightKan<G: Kind, H: Kind> {
    type Item;

    /// Run the universally quantified operation at `B`.
    fn run<B, K>(&self, k: K) -> H::Of<B>
    where
        K: Fn(Self::Item) -> G::Of<B>;

    /// Functor map: the result at `(C, k)` is `self` at `(C, k ∘ f)`.
    fn map<B, F>(self, f: F) -> RanMap<G, H, Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> B,
    {
        RanMap {
            ran: self,
            f,
            _kind: PhantomData,
        }
    }

    /// Run with the unit of `F ⊣ G`.
    fn to_adjoint<F, Adj>(&self) -> H::Of<F::Of<Self::Item>>
    where
        F: Functor,
        G: Functor,
        Adj: Adjunction<F, G>,
    {
        self.run::<F::Of<Self::Item>, _>(Adj::unit::<Self::Item>)
    }
}

/// A family of conversions `K<A> → Ran<G, H, A>`, one per `A`.
///
/// The natural transformation consumed by [`from_ran`]. `A: Clone` because
/// a Ran is run through `&self` and usually hands its value out per run.
pub trait RanTransformation<K: Kind, G: Kind, H: Kind> {
    fn ran_of<A: Clone>(&self, ka: K::Of<A>) -> impl RightKan<G, H, Item = A>;
}

/// Eliminate with the identity conversion.
///
/// This is the natural transformation `Ran<G, H, -> ∘ G ⇒ H` that defines
/// the extension; every other elimination factors through it.
pub fn gran<G, H, A, R>(r: &R) -> H::Of<A>
where
    G: Kind,
    H: Kind,
    R: RightKan<G, H, Item = G::Of<A>>,
{
    r.run::<A, _>(|ga: G::Of<A>| ga)
}

// ─── map ────────────────────────────────────────────────────────────────────

/// [`RightKan::map`].
pub struct RanMap<G, H, R, F> {
    ran: R,
    f: F,
    _kind: PhantomData<fn() -> (G, H)>,
}

impl<G, H, R, F, B> RightKan<G, H> for RanMap<G, H, R, F>
where
    G: Kind,
    H: Kind,
    R: RightKan<G, H>,
    F: Fn(R::Item) -> B,
{
    type Item = B;

    fn run<C, K>(&self, k: K) -> H::Of<C>
    where
        K: Fn(B) -> G::Of<C>,
    {
        self.ran.run::<C, _>(|a| k((self.f)(a)))
    }
}

// ─── to_ran ─────────────────────────────────────────────────────────────────

/// Ran induced by `k : K<A>` and `s : K ∘ G ⇒ H`. See [`to_ran`].
pub struct ToRan<G, H, K: Kind, S, A> {
    k: K::Of<A>,
    s: S,
    _kind: PhantomData<fn() -> (G, H)>,
}

/// Build the unique Ran `u` with `gran(u) == s(k)`: at `(C, f)`, map `f`
/// over `k` and apply `s`.
pub fn to_ran<G, H, K, S, A>(k: K::Of<A>, s: S) -> ToRan<G, H, K, S, A>
where
    G: Kind,
    H: Kind,
    K: Functor,
    S: NaturalTransformation<Compose<K, G>, H>,
{
    ToRan {
        k,
        s,
        _kind: PhantomData,
    }
}

impl<G, H, K, S, A> RightKan<G, H> for ToRan<G, H, K, S, A>
where
    G: Kind,
    H: Kind,
    K: Functor,
    S: NaturalTransformation<Compose<K, G>, H>,
    K::Of<A>: Clone,
{
    type Item = A;

    fn run<B, F>(&self, f: F) -> H::Of<B>
    where
        F: Fn(A) -> G::Of<B>,
    {
        let kgb = K::map::<A, G::Of<B>, F>(self.k.clone(), f);
        self.s.transform::<B>(kgb)
    }
}

/// Apply `s` to `k`, then eliminate with [`gran`].
pub fn from_ran<K, G, H, S, B>(k: K::Of<G::Of<B>>, s: &S) -> H::Of<B>
where
    K: Kind,
    G: Kind,
    H: Kind,
    S: RanTransformation<K, G, H>,
    G::Of<B>: Clone,
{
    gran::<G, H, B, _>(&s.ran_of::<G::Of<B>>(k))
}

// ─── adjunctions ────────────────────────────────────────────────────────────

/// Ran along `G` into `Identity` from `x : F<A>`, for `F ⊣ G`.
pub struct AdjointRan<F: Kind, G, Adj, A> {
    fa: F::Of<A>,
    _adjunction: PhantomData<fn() -> (G, Adj)>,
}

/// At `(B, k)`, answer `Identity(right_adjunct(k, x))`.
pub fn adjoint_to_ran<F, G, Adj, A>(x: F::Of<A>) -> AdjointRan<F, G, Adj, A>
where
    F: Functor,
    G: Functor,
    Adj: Adjunction<F, G>,
{
    AdjointRan {
        fa: x,
        _adjunction: PhantomData,
    }
}

impl<F, G, Adj, A> RightKan<G, IdentityK> for AdjointRan<F, G, Adj, A>
where
    F: Functor,
    G: Functor,
    Adj: Adjunction<F, G>,
    F::Of<A>: Clone,
{
    type Item = A;

    fn run<B, K>(&self, k: K) -> Identity<B>
    where
        K: Fn(A) -> G::Of<B>,
    {
        Identity(Adj::right_adjunct::<A, B, K>(k, self.fa.clone()))
    }
}

/// Inverse of [`adjoint_to_ran`]: run with `unit` and unwrap.
pub fn ran_to_adjoint<F, G, Adj, R>(r: &R) -> F::Of<R::Item>
where
    F: Functor,
    G: Functor,
    Adj: Adjunction<F, G>,
    R: RightKan<G, IdentityK>,
{
    r.to_adjoint::<F, Adj>().into_inner()
}

/// Ran along `G` into `H` from `h : H<F<A>>`, for `F ⊣ G`.
pub struct ComposedAdjointRan<F: Kind, G, H: Kind, Adj, A> {
    h: H::Of<F::Of<A>>,
    _adjunction: PhantomData<fn() -> (G, Adj)>,
}

/// At `(B, k)`, map `right_adjunct(k, _)` over `h`.
pub fn composed_adjoint_to_ran<F, G, H, Adj, A>(
    h: H::Of<F::Of<A>>,
) -> ComposedAdjointRan<F, G, H, Adj, A>
where
    F: Functor,
    G: Functor,
    H: Functor,
    Adj: Adjunction<F, G>,
{
    ComposedAdjointRan {
        h,
        _adjunction: PhantomData,
    }
}

impl<F, G, H, Adj, A> RightKan<G, H> for ComposedAdjointRan<F, G, H, Adj, A>
where
    F: Functor,
    G: Functor,
    H: Functor,
    Adj: Adjunction<F, G>,
    H::Of<F::Of<A>>: Clone,
{
    type Item = A;

    fn run<B, K>(&self, k: K) -> H::Of<B>
    where
        K: Fn(A) -> G::Of<B>,
    {
        H::map::<F::Of<A>, B, _>(self.h.clone(), |fa: F::Of<A>| {
            Adj::right_adjunct::<A, B, _>(&k, fa)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjunction::IdentityAdjunction;
    use crate::functor::{OptionK, VecK};
    use crate::natural::{UnwrapInner, UnwrapOuter};

    fn five() -> ToRan<IdentityK, IdentityK, IdentityK, UnwrapOuter, i32> {
        to_ran::<IdentityK, IdentityK, IdentityK, _, i32>(Identity(5), UnwrapOuter)
    }

    #[test]
    fn run_applies_the_conversion() {
        assert_eq!(five().run::<i32, _>(|n: i32| Identity(n + 1)), Identity(6));
    }

    #[test]
    fn map_precomposes() {
        let doubled = five().map(|n: i32| n * 2);
        assert_eq!(doubled.run::<i32, _>(|n: i32| Identity(n + 1)), Identity(11));
    }

    #[test]
    fn run_is_repeatable_at_different_types() {
        let r = five();
        assert_eq!(
            r.run::<String, _>(|n: i32| Identity(n.to_string())),
            Identity("5".to_string())
        );
        assert_eq!(r.run::<bool, _>(|n: i32| Identity(n > 3)), Identity(true));
    }

    #[test]
    fn gran_of_to_ran_is_the_transformation() {
        let k = vec![Identity(1), Identity(2)];
        let r = to_ran::<IdentityK, VecK, VecK, _, Identity<i32>>(k.clone(), UnwrapInner);
        let expected =
            NaturalTransformation::<Compose<VecK, IdentityK>, VecK>::transform(&UnwrapInner, k);
        assert_eq!(gran::<IdentityK, VecK, i32, _>(&r), expected);
    }

    struct Singleton;

    impl RanTransformation<IdentityK, IdentityK, VecK> for Singleton {
        fn ran_of<A: Clone>(
            &self,
            ka: Identity<A>,
        ) -> impl RightKan<IdentityK, VecK, Item = A> {
            SingletonRan(ka.into_inner())
        }
    }

    struct SingletonRan<A>(A);

    impl<A: Clone> RightKan<IdentityK, VecK> for SingletonRan<A> {
        type Item = A;

        fn run<B, K>(&self, k: K) -> Vec<B>
        where
            K: Fn(A) -> Identity<B>,
        {
            vec![k(self.0.clone()).into_inner()]
        }
    }

    #[test]
    fn from_ran_eliminates_through_gran() {
        let out =
            from_ran::<IdentityK, IdentityK, VecK, _, char>(Identity(Identity('q')), &Singleton);
        assert_eq!(out, vec!['q']);
    }

    #[test]
    fn adjoint_round_trip() {
        let r = adjoint_to_ran::<IdentityK, IdentityK, IdentityAdjunction, i32>(Identity(5));
        assert_eq!(
            ran_to_adjoint::<IdentityK, IdentityK, IdentityAdjunction, _>(&r),
            Identity(5)
        );
    }

    #[test]
    fn composed_adjoint_maps_pointwise() {
        let h = Some(Identity(20));
        let r =
            composed_adjoint_to_ran::<IdentityK, IdentityK, OptionK, IdentityAdjunction, i32>(h);
        assert_eq!(r.run::<i32, _>(|n: i32| Identity(n / 4)), Some(5));
        assert_eq!(
            r.to_adjoint::<IdentityK, IdentityAdjunction>(),
            Some(Identity(20))
        );
    }
}
