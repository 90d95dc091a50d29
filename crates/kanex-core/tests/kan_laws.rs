//! Property-based tests for Ran and Lan.
//!
//! Functor and applicative laws, the universal properties of `gran` and
//! `glan` (existence and uniqueness), and the adjunction round trips, over
//! generated inputs.

use kanex_core::lan::point;
use kanex_core::{
    Compose, ComposeAdjunction, Identity, IdentityAdjunction, IdentityK, LeftKan,
    NaturalTransformation, OptionK, RightKan, UnwrapInner, VecK, WrapInner, adjoint_to_lan,
    adjoint_to_ran, composed_adjoint_to_ran, glan, gran, lan_to_adjoint, ran_to_adjoint, to_ran,
};
use proptest::prelude::*;

type Twice = ComposeAdjunction<IdentityAdjunction, IdentityAdjunction>;
type IdId = Compose<IdentityK, IdentityK>;

fn inc(n: i32) -> i32 {
    n.wrapping_add(1)
}

fn double(n: i32) -> i32 {
    n.wrapping_mul(2)
}

fn sub7(n: i32) -> i32 {
    n.wrapping_sub(7)
}

fn pick(i: usize) -> fn(i32) -> i32 {
    match i % 3 {
        0 => inc,
        1 => double,
        _ => sub7,
    }
}

fn lift<A: 'static>(h: Option<A>) -> impl LeftKan<IdentityK, OptionK, Item = A> {
    glan::<IdentityK, OptionK, A>(h).map(|g: Identity<A>| g.into_inner())
}

fn lower<L: LeftKan<IdentityK, OptionK>>(lan: L) -> Option<L::Item> {
    lan.to_lan::<OptionK, _>(&WrapInner)
}

/// Eliminate through `WrapInner`.
fn by_to_lan<L: LeftKan<IdentityK, VecK>>(lan: L) -> Vec<L::Item> {
    lan.to_lan::<VecK, _>(&WrapInner)
}

/// Eliminate through the identity adjunction, then drop the inner layer.
fn by_adjoint<L: LeftKan<IdentityK, VecK>>(lan: L) -> Vec<L::Item> {
    let nested = lan.to_adjoint::<IdentityK, IdentityAdjunction>();
    NaturalTransformation::<Compose<VecK, IdentityK>, VecK>::transform::<L::Item>(
        &UnwrapInner,
        nested,
    )
}

// =============================================================================
// Ran
// =============================================================================

proptest! {
    /// map(id) runs like the unmapped Ran
    #[test]
    fn prop_ran_map_identity(xs in prop::collection::vec(any::<i32>(), 0..8)) {
        let k = |n: i32| Identity(inc(n));
        let r = to_ran::<IdentityK, VecK, VecK, _, i32>(xs.clone(), UnwrapInner);
        let mapped = to_ran::<IdentityK, VecK, VecK, _, i32>(xs, UnwrapInner).map(|n: i32| n);
        prop_assert_eq!(mapped.run::<i32, _>(k), r.run::<i32, _>(k));
    }

    /// map(f).map(g) runs like map(g ∘ f)
    #[test]
    fn prop_ran_map_composition(xs in prop::collection::vec(any::<i32>(), 0..8)) {
        let k = |n: i32| Identity(n.to_string());
        let twice = to_ran::<IdentityK, VecK, VecK, _, i32>(xs.clone(), UnwrapInner)
            .map(double)
            .map(sub7);
        let once = to_ran::<IdentityK, VecK, VecK, _, i32>(xs, UnwrapInner)
            .map(|n: i32| sub7(double(n)));
        prop_assert_eq!(twice.run::<String, _>(k), once.run::<String, _>(k));
    }

    /// gran(to_ran(k, s)) == s(k)
    #[test]
    fn prop_gran_after_to_ran(xs in prop::collection::vec(any::<i32>(), 0..8)) {
        let k: Vec<Identity<i32>> = xs.into_iter().map(Identity).collect();
        let r = to_ran::<IdentityK, VecK, VecK, _, Identity<i32>>(k.clone(), UnwrapInner);
        let expected =
            NaturalTransformation::<Compose<VecK, IdentityK>, VecK>::transform(&UnwrapInner, k);
        prop_assert_eq!(gran::<IdentityK, VecK, i32, _>(&r), expected);
    }

    /// Two Rans with the same gran agree at every (C, f)
    #[test]
    fn prop_ran_is_unique(xs in prop::collection::vec(any::<i32>(), 0..8)) {
        let k: Vec<Identity<i32>> = xs.iter().copied().map(Identity).collect();
        let h: Vec<Identity<Identity<i32>>> = k.iter().copied().map(Identity).collect();
        let a = to_ran::<IdentityK, VecK, VecK, _, Identity<i32>>(k, UnwrapInner);
        let b = composed_adjoint_to_ran::<IdentityK, IdentityK, VecK, IdentityAdjunction, _>(h);

        prop_assert_eq!(gran::<IdentityK, VecK, i32, _>(&a), xs);
        prop_assert_eq!(
            gran::<IdentityK, VecK, i32, _>(&a),
            gran::<IdentityK, VecK, i32, _>(&b)
        );

        let show = |g: Identity<i32>| Identity(g.0.to_string());
        prop_assert_eq!(a.run::<String, _>(show), b.run::<String, _>(show));
        let positive = |g: Identity<i32>| Identity(g.0 > 0);
        prop_assert_eq!(a.run::<bool, _>(positive), b.run::<bool, _>(positive));
        let widen = |g: Identity<i32>| Identity(i64::from(g.0) * 3);
        prop_assert_eq!(a.run::<i64, _>(widen), b.run::<i64, _>(widen));
    }

    /// ran_to_adjoint(adjoint_to_ran(x)) == x
    #[test]
    fn prop_ran_adjoint_round_trip(x: i64) {
        let r = adjoint_to_ran::<IdentityK, IdentityK, IdentityAdjunction, i64>(Identity(x));
        prop_assert_eq!(
            ran_to_adjoint::<IdentityK, IdentityK, IdentityAdjunction, _>(&r),
            Identity(x)
        );

        let nested = Identity(Identity(x));
        let r = adjoint_to_ran::<IdId, IdId, Twice, i64>(nested);
        prop_assert_eq!(ran_to_adjoint::<IdId, IdId, Twice, _>(&r), nested);
    }
}

// =============================================================================
// Lan
// =============================================================================

proptest! {
    /// map(id) is the identity
    #[test]
    fn prop_lan_map_identity(h: Option<i32>) {
        prop_assert_eq!(lower(lift(h).map(|n: i32| n)), h);
    }

    /// map(f).map(g) == map(g ∘ f)
    #[test]
    fn prop_lan_map_composition(h: Option<i32>) {
        let twice = lower(lift(h).map(inc).map(double));
        let once = lower(lift(h).map(|n: i32| double(inc(n))));
        prop_assert_eq!(twice, once);
    }

    /// to_lan(glan(h), s) == s(h)
    #[test]
    fn prop_to_lan_after_glan(xs in prop::collection::vec(any::<u16>(), 0..8)) {
        let out = glan::<IdentityK, VecK, u16>(xs.clone()).to_lan::<VecK, _>(&WrapInner);
        let expected =
            NaturalTransformation::<VecK, Compose<VecK, IdentityK>>::transform(&WrapInner, xs);
        prop_assert_eq!(out, expected);
    }

    /// Two eliminations that agree on glan agree on every Lan
    #[test]
    fn prop_lan_is_unique(xs in prop::collection::vec(any::<u16>(), 0..8)) {
        let lan = || glan::<IdentityK, VecK, u16>(xs.clone());
        prop_assert_eq!(by_to_lan(lan()), by_adjoint(lan()));

        let show = || lan().map(|g: Identity<u16>| g.0.to_string());
        prop_assert_eq!(by_to_lan(show()), by_adjoint(show()));
        let even = || lan().map(|g: Identity<u16>| g.0 % 2 == 0).map(|b: bool| !b);
        prop_assert_eq!(by_to_lan(even()), by_adjoint(even()));
    }

    /// lan_to_adjoint(adjoint_to_lan(ga)) == ga
    #[test]
    fn prop_lan_adjoint_round_trip(x: i64) {
        let lan = adjoint_to_lan::<IdentityK, IdentityK, IdentityAdjunction, i64>(Identity(x));
        prop_assert_eq!(
            lan_to_adjoint::<IdentityK, IdentityK, IdentityAdjunction, _>(lan),
            Identity(x)
        );

        let nested = Identity(Identity(x));
        let lan = adjoint_to_lan::<IdId, IdId, Twice, i64>(nested);
        prop_assert_eq!(lan_to_adjoint::<IdId, IdId, Twice, _>(lan), nested);
    }
}

// =============================================================================
// Lan applicative
// =============================================================================

proptest! {
    /// point(id).ap(v) == v
    #[test]
    fn prop_lan_ap_identity(v: Option<i32>) {
        let id = point::<IdentityK, OptionK, _>(|n: i32| n);
        prop_assert_eq!(lower(id.ap(lift(v))), v);
    }

    /// point(f).ap(point(x)) == point(f(x))
    #[test]
    fn prop_lan_ap_homomorphism(i in 0usize..3, x: i32) {
        let f = pick(i);
        let lhs = point::<IdentityK, OptionK, _>(f).ap(point::<IdentityK, OptionK, _>(x));
        prop_assert_eq!(lower(lhs), Some(f(x)));
    }

    /// u.ap(point(y)) == point(|f| f(y)).ap(u)
    #[test]
    fn prop_lan_ap_interchange(u in prop::option::of(0usize..3), y: i32) {
        let u = u.map(pick);
        let lhs = lift(u).ap(point::<IdentityK, OptionK, _>(y));
        let rhs = point::<IdentityK, OptionK, _>(move |f: fn(i32) -> i32| f(y)).ap(lift(u));
        prop_assert_eq!(lower(lhs), lower(rhs));
    }

    /// point(∘).ap(u).ap(v).ap(w) == u.ap(v.ap(w))
    #[test]
    fn prop_lan_ap_composition(
        u in prop::option::of(0usize..3),
        v in prop::option::of(0usize..3),
        w: Option<i32>,
    ) {
        let (u, v) = (u.map(pick), v.map(pick));
        let compose =
            |f: fn(i32) -> i32| move |g: fn(i32) -> i32| move |x: i32| f(g(x));
        let lhs = point::<IdentityK, OptionK, _>(compose)
            .ap(lift(u))
            .ap(lift(v))
            .ap(lift(w));
        let rhs = lift(u).ap(lift(v).ap(lift(w)));
        prop_assert_eq!(lower(lhs), lower(rhs));
    }
}
