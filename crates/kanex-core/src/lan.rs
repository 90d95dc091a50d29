//! Left Kan extension `Lan<G, H, A>`.
//!
//! A `Lan` packs, for some hidden witness type `I`, a value `v : H<I>` and
//! a conversion `f : G<I> → A`. Callers never learn `I`: every
//! construction returns `impl LeftKan<G, H, Item = A>`, and the only way to
//! open the package is one of the eliminations below.
//!
//! ```text
//! glan                     H<A>       → Lan<G,H,G<A>>     I = A, f = id
//! from_lan                 H<B>, Lan<G,H,-> ⇒ F → F<G<B>>
//! adjoint_to_lan           G<A>       → Lan<F,Identity,A> (F ⊣ G)
//! lan_to_adjoint           Lan<F,Identity,A> → G<A>       (F ⊣ G)
//! composed_adjoint_to_lan  H<G<A>>    → Lan<F,H,A>        (F ⊣ G)
//! LeftKan::to_lan          Lan<G,H,A>, H ⇒ F∘G → F<A>
//! LeftKan::to_adjoint      Lan<G,H,A> → H<F<A>>           (G ⊣ F)
//! ```
//!
//! With `G: Functor` and `H: Applicative`, `Lan<G, H, ->` is applicative
//! through [`point`] and [`LeftKan::ap`]. `ap` pairs the two hidden
//! witnesses and combines both packed values with `H::apply2` when it is
//! called, not when the result is eliminated.

use crate::adjunction::Adjunction;
use crate::functor::{Applicative, Functor};
use crate::identity::{Identity, IdentityK};
use crate::kind::{Compose, Kind};
use crate::natural::NaturalTransformation;
use sealed::{Existential, Token};

mod sealed {
    use crate::kind::Kind;

    /// Proof of being inside this module. Only `lan` can build one.
    pub struct Token(pub(super) ());

    pub trait Existential<G: Kind, H: Kind> {
        type Witness: 'static;
        type Item: 'static;

        #[allow(clippy::type_complexity)]
        fn unpack(
            self,
            token: Token,
        ) -> (
            H::Of<Self::Witness>,
            Box<dyn Fn(G::Of<Self::Witness>) -> Self::Item>,
        );
    }
}

/// The one concrete package behind every `impl LeftKan`.
struct Package<G: Kind, H: Kind, I, A> {
    v: H::Of<I>,
    f: Box<dyn Fn(G::Of<I>) -> A>,
}

impl<G: Kind, H: Kind, I: 'static, A: 'static> Existential<G, H> for Package<G, H, I, A> {
    type Witness = I;
    type Item = A;

    fn unpack(self, _: Token) -> (H::Of<I>, Box<dyn Fn(G::Of<I>) -> A>) {
        (self.v, self.f)
    }
}

impl<G: Kind, H: Kind, I: 'static, A: 'static> LeftKan<G, H> for Package<G, H, I, A> {}

/// `H` extended from `G` on the left, at `Item`.
///
/// Sealed: the witness stays hidden, so implementations come only from the
/// constructors in this module.
pub trait LeftKan<G: Kind, H: Kind>: Existential<G, H> + Sized {
    /// Post-compose the packed conversion with `g`.
    fn map<B, F>(self, g: F) -> impl LeftKan<G, H, Item = B>
    where
        B: 'static,
        F: Fn(Self::Item) -> B + 'static,
    {
        let (v, f) = self.unpack(Token(()));
        Package::<G, H, Self::Witness, B> {
            v,
            f: Box::new(move |gi: G::Of<Self::Witness>| g(f(gi))),
        }
    }

    /// Eliminate through `s : H ⇒ F ∘ G`, then map the packed conversion.
    fn to_lan<F, S>(self, s: &S) -> F::Of<Self::Item>
    where
        F: Functor,
        S: NaturalTransformation<H, Compose<F, G>>,
    {
        let (v, f) = self.unpack(Token(()));
        F::map::<G::Of<Self::Witness>, Self::Item, _>(s.transform::<Self::Witness>(v), f)
    }

    /// Map `left_adjunct(f, _)` of `G ⊣ F` over the packed value.
    fn to_adjoint<F, Adj>(self) -> H::Of<F::Of<Self::Item>>
    where
        F: Functor,
        G: Functor,
        H: Functor,
        Adj: Adjunction<G, F>,
    {
        let (v, f) = self.unpack(Token(()));
        H::map::<Self::Witness, F::Of<Self::Item>, _>(v, |i: Self::Witness| {
            Adj::left_adjunct::<Self::Witness, Self::Item, _>(&f, i)
        })
    }

    /// Apply the packed functions of `self` to the packed arguments of `x`.
    ///
    /// The result's witness is the pair of both witnesses; its conversion
    /// splits a `G` of pairs with `G::unzip`. `H::apply2` runs here.
    fn ap<B, X>(self, x: X) -> impl LeftKan<G, H, Item = B>
    where
        G: Functor,
        H: Applicative,
        X: LeftKan<G, H>,
        Self::Item: FnOnce(X::Item) -> B,
        B: 'static,
    {
        let (fv, ff) = self.unpack(Token(()));
        let (xv, xf) = x.unpack(Token(()));
        let v = H::apply2::<Self::Witness, X::Witness, (Self::Witness, X::Witness), _>(
            fv,
            xv,
            |i, j| (i, j),
        );
        Package::<G, H, (Self::Witness, X::Witness), B> {
            v,
            f: Box::new(move |gij: G::Of<(Self::Witness, X::Witness)>| {
                let (gi, gj) = G::unzip::<Self::Witness, X::Witness>(gij);
                ff(gi)(xf(gj))
            }),
        }
    }
}

/// A family of conversions `Lan<G, H, A> → F<A>`, one per `A`.
///
/// The natural transformation consumed by [`from_lan`].
pub trait LanTransformation<G: Kind, H: Kind, F: Kind> {
    fn apply<L: LeftKan<G, H>>(&self, lan: L) -> F::Of<L::Item>;
}

/// Pack `h` with the identity conversion.
pub fn glan<G, H, A>(h: H::Of<A>) -> impl LeftKan<G, H, Item = G::Of<A>>
where
    G: Kind,
    H: Kind,
    A: 'static,
{
    Package::<G, H, A, G::Of<A>> {
        v: h,
        f: Box::new(|ga: G::Of<A>| ga),
    }
}

/// Apply `s` to [`glan`] of `h`.
pub fn from_lan<G, H, F, S, B>(h: H::Of<B>, s: &S) -> F::Of<G::Of<B>>
where
    G: Kind,
    H: Kind,
    F: Kind,
    S: LanTransformation<G, H, F>,
    B: 'static,
{
    s.apply(glan::<G, H, B>(h))
}

/// `Lan` of a single value: witness `()`, packed value `H::point(())`.
///
/// The conversion may run once per element of an eliminated `F`, so `a`
/// is cloned per call.
pub fn point<G, H, A>(a: A) -> impl LeftKan<G, H, Item = A>
where
    G: Kind,
    H: Applicative,
    A: Clone + 'static,
{
    Package::<G, H, (), A> {
        v: H::point(()),
        f: Box::new(move |_: G::Of<()>| a.clone()),
    }
}

/// Lan along `F` into `Identity` from `ga : G<A>`, for `F ⊣ G`: witness
/// `G<A>`, conversion `counit`.
pub fn adjoint_to_lan<F, G, Adj, A>(ga: G::Of<A>) -> impl LeftKan<F, IdentityK, Item = A>
where
    F: Functor,
    G: Functor,
    Adj: Adjunction<F, G>,
    A: 'static,
{
    Package::<F, IdentityK, G::Of<A>, A> {
        v: Identity(ga),
        f: Box::new(|fga: F::Of<G::Of<A>>| Adj::counit::<A>(fga)),
    }
}

/// Inverse of [`adjoint_to_lan`]: `left_adjunct(f, v)`.
pub fn lan_to_adjoint<F, G, Adj, L>(lan: L) -> G::Of<L::Item>
where
    F: Functor,
    G: Functor,
    Adj: Adjunction<F, G>,
    L: LeftKan<F, IdentityK>,
{
    let (v, f) = lan.unpack(Token(()));
    Adj::left_adjunct::<L::Witness, L::Item, _>(f, v.into_inner())
}

/// Lan along `F` into `H` from `h : H<G<A>>`, for `F ⊣ G`.
pub fn composed_adjoint_to_lan<F, G, H, Adj, A>(
    h: H::Of<G::Of<A>>,
) -> impl LeftKan<F, H, Item = A>
where
    F: Functor,
    G: Functor,
    H: Kind,
    Adj: Adjunction<F, G>,
    A: 'static,
{
    Package::<F, H, G::Of<A>, A> {
        v: h,
        f: Box::new(|fga: F::Of<G::Of<A>>| Adj::counit::<A>(fga)),
    }
}
