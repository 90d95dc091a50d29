//! Adjunctions `F ⊣ G`.
//!
//! An adjunction is a dictionary type implementing [`Adjunction<F, G>`];
//! callers pick the instance per call site. `unit` and `counit` are
//! required, the adjuncts are derived from them:
//!
//! ```text
//! left_adjunct(k, a)   = G.map(unit(a), k)        (F<A> → B) → (A → G<B>)
//! right_adjunct(k, fa) = counit(F.map(fa, k))     (A → G<B>) → (F<A> → B)
//! ```
//!
//! Laws assumed of every instance:
//!
//! ```text
//! counit(F.map(fa, unit))  == fa          (left triangle)
//! G.map(unit(ga), counit)  == ga          (right triangle)
//! left_adjunct(right_adjunct(k)) == k     (adjuncts are inverse)
//! ```

use crate::functor::Functor;
use crate::identity::{Identity, IdentityK};
use crate::kind::Compose;
use std::marker::PhantomData;

/// `F` is left adjoint to `G`.
///
/// Instances are marker types; `'static` so adjunct closures built from
/// them can be boxed.
pub trait Adjunction<F: Functor, G: Functor>: 'static {
    fn unit<A>(a: A) -> G::Of<F::Of<A>>;

    fn counit<A>(fga: F::Of<G::Of<A>>) -> A;

    fn left_adjunct<A, B, K>(k: K, a: A) -> G::Of<B>
    where
        K: FnMut(F::Of<A>) -> B,
    {
        G::map::<F::Of<A>, B, K>(Self::unit::<A>(a), k)
    }

    fn right_adjunct<A, B, K>(k: K, fa: F::Of<A>) -> B
    where
        K: FnMut(A) -> G::Of<B>,
    {
        Self::counit::<B>(F::map::<A, G::Of<B>, K>(fa, k))
    }
}

/// `Identity ⊣ Identity`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityAdjunction;

impl Adjunction<IdentityK, IdentityK> for IdentityAdjunction {
    fn unit<A>(a: A) -> Identity<Identity<A>> {
        Identity(Identity(a))
    }

    fn counit<A>(fga: Identity<Identity<A>>) -> A {
        fga.0.0
    }
}

/// Adjunctions compose: from `F1 ⊣ G1` and `F2 ⊣ G2`,
/// `F2 ∘ F1 ⊣ G1 ∘ G2`.
pub struct ComposeAdjunction<A1, A2>(PhantomData<fn() -> (A1, A2)>);

impl<F1, G1, F2, G2, A1, A2> Adjunction<Compose<F2, F1>, Compose<G1, G2>>
    for ComposeAdjunction<A1, A2>
where
    F1: Functor,
    G1: Functor,
    F2: Functor,
    G2: Functor,
    A1: Adjunction<F1, G1>,
    A2: Adjunction<F2, G2>,
{
    fn unit<A>(a: A) -> G1::Of<G2::Of<F2::Of<F1::Of<A>>>> {
        G1::map::<F1::Of<A>, G2::Of<F2::Of<F1::Of<A>>>, _>(
            A1::unit::<A>(a),
            A2::unit::<F1::Of<A>>,
        )
    }

    fn counit<A>(fga: F2::Of<F1::Of<G1::Of<G2::Of<A>>>>) -> A {
        A2::counit::<A>(F2::map::<F1::Of<G1::Of<G2::Of<A>>>, G2::Of<A>, _>(
            fga,
            A1::counit::<G2::Of<A>>,
        ))
    }
}
