//! The law gate.
//!
//! Kan extensions are only as lawful as the capabilities they are built
//! from, and parametricity of a hand-written `RightKan` is a promise, not a
//! type error. The gate checks both over sample data:
//!
//! - capability preconditions: functor, applicative and adjunction laws
//! - Ran: functor laws of `map`, the universal property of `gran`
//! - Lan: functor laws of `map`, the universal property of `glan`,
//!   the applicative laws of `point`/`ap`
//! - adjunction round trips through Ran and Lan
//!
//! Every check is generic over the capability instance; the toy worlds in
//! [`crate::toy`] drive them from JSON fixtures. Samples are `i64`-valued
//! and arrows use wrapping arithmetic.
//!
//! A law records at most one failure per instance: the first failing
//! sample, with its indices as context.

use crate::error::KanError;
use crate::witness::{Law, LawFailure, LawResult};
use kanex_core::lan::point;
use kanex_core::{
    Adjunction, Applicative, Compose, Functor, Identity, IdentityK, Kind, LeftKan,
    NaturalTransformation, RightKan, UnwrapInner, WrapInner, adjoint_to_lan, adjoint_to_ran, glan,
    gran, lan_to_adjoint, ran_to_adjoint, to_ran,
};
use serde_json::{Value, json};
use std::rc::Rc;

/// Arrow carried inside a functor for the applicative laws.
type Arrow = Rc<dyn Fn(i64) -> i64>;

/// Curried arrow composition, `f ↦ g ↦ f ∘ g`, partially applied.
type Composer = Rc<dyn Fn(Arrow) -> Arrow>;

/// Arrow packed inside a Lan; `ap` needs `FnOnce`.
type LanArrow = Box<dyn Fn(i64) -> i64>;

fn inc(n: i64) -> i64 {
    n.wrapping_add(1)
}

fn double(n: i64) -> i64 {
    n.wrapping_mul(2)
}

/// Accumulates failures for one profile.
#[derive(Debug)]
pub struct LawGate {
    profile: String,
    failures: Vec<LawFailure>,
}

impl LawGate {
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            failures: Vec::new(),
        }
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn failures(&self) -> &[LawFailure] {
        &self.failures
    }

    pub fn finish(self) -> LawResult {
        if self.failures.is_empty() {
            LawResult::accepted(self.profile)
        } else {
            LawResult::rejected(self.profile, self.failures)
        }
    }

    fn record(&mut self, law: Law, instance: &str, context: Value) {
        let seen = self
            .failures
            .iter()
            .any(|f| f.law_ref == law.law_ref() && f.instance.as_deref() == Some(instance));
        if !seen {
            self.failures
                .push(LawFailure::of(law, Some(instance.to_string()), Some(context)));
        }
    }

    fn require(&mut self, holds: bool, law: Law, instance: &str, context: Value) {
        if !holds {
            self.record(law, instance, context);
        }
    }

    // ─── capability preconditions ───────────────────────────────────────

    /// FUNCTOR-1..3.
    pub fn check_functor<K>(&mut self, instance: &str, samples: &[K::Of<i64>])
    where
        K: Functor,
        K::Of<i64>: Clone + PartialEq,
    {
        for (i, x) in samples.iter().enumerate() {
            let ctx = json!({ "sample": i });

            let mapped = K::map::<i64, i64, _>(x.clone(), |n| n);
            self.require(mapped == *x, Law::FunctorIdentity, instance, ctx.clone());

            let twice = K::map::<i64, i64, _>(K::map::<i64, i64, _>(x.clone(), inc), double);
            let once = K::map::<i64, i64, _>(x.clone(), |n| double(inc(n)));
            self.require(twice == once, Law::FunctorComposition, instance, ctx.clone());

            let pairs = || K::map::<i64, (i64, i64), _>(x.clone(), |n| (n, inc(n)));
            let split = K::unzip::<i64, i64>(pairs());
            let projected = (
                K::map::<(i64, i64), i64, _>(pairs(), |p| p.0),
                K::map::<(i64, i64), i64, _>(pairs(), |p| p.1),
            );
            self.require(split == projected, Law::FunctorUnzip, instance, ctx);
        }
    }

    /// APPLICATIVE-1..4, with arrows `x ↦ x + n` built from each sample.
    pub fn check_applicative<K>(
        &mut self,
        instance: &str,
        samples: &[K::Of<i64>],
        points: &[i64],
    ) where
        K: Applicative,
        K::Of<i64>: Clone + PartialEq,
    {
        for (j, &y) in points.iter().enumerate() {
            let lhs = ap_rc::<K, i64, i64>(K::point::<Arrow>(Rc::new(inc)), K::point(y));
            self.require(
                lhs == K::point(inc(y)),
                Law::ApplicativeHomomorphism,
                instance,
                json!({ "point": j }),
            );
        }

        for (i, x) in samples.iter().enumerate() {
            let ctx = json!({ "sample": i });

            let id = ap_rc::<K, i64, i64>(K::point::<Arrow>(Rc::new(|n: i64| n)), x.clone());
            self.require(id == *x, Law::ApplicativeIdentity, instance, ctx.clone());

            for (j, &y) in points.iter().enumerate() {
                let lhs = ap_rc::<K, i64, i64>(adders::<K>(x.clone()), K::point(y));
                let at_y: Rc<dyn Fn(Arrow) -> i64> = Rc::new(move |f: Arrow| f(y));
                let rhs = ap_rc::<K, Arrow, i64>(K::point(at_y), adders::<K>(x.clone()));
                self.require(
                    lhs == rhs,
                    Law::ApplicativeInterchange,
                    instance,
                    json!({ "sample": i, "point": j }),
                );
            }

            let compose: Rc<dyn Fn(Arrow) -> Composer> = Rc::new(compose_arrows);
            let partial = ap_rc::<K, Arrow, Composer>(
                K::point(compose),
                adders::<K>(x.clone()),
            );
            let composed = ap_rc::<K, Arrow, Arrow>(partial, adders::<K>(x.clone()));
            let lhs = ap_rc::<K, i64, i64>(composed, x.clone());
            let rhs = ap_rc::<K, i64, i64>(
                adders::<K>(x.clone()),
                ap_rc::<K, i64, i64>(adders::<K>(x.clone()), x.clone()),
            );
            self.require(lhs == rhs, Law::ApplicativeComposition, instance, ctx);
        }
    }

    /// ADJUNCTION-1..3. `values` feed the adjunct check.
    pub fn check_adjunction<F, G, Adj>(
        &mut self,
        instance: &str,
        fas: &[F::Of<i64>],
        gas: &[G::Of<i64>],
        values: &[i64],
    ) where
        F: Functor,
        G: Functor,
        Adj: Adjunction<F, G>,
        F::Of<i64>: Clone + PartialEq,
        G::Of<i64>: Clone + PartialEq,
        G::Of<F::Of<i64>>: PartialEq,
    {
        for (i, fa) in fas.iter().enumerate() {
            let round = Adj::counit::<F::Of<i64>>(F::map::<i64, G::Of<F::Of<i64>>, _>(
                fa.clone(),
                Adj::unit::<i64>,
            ));
            self.require(
                round == *fa,
                Law::AdjunctionLeftTriangle,
                instance,
                json!({ "sample": i }),
            );
        }

        for (i, ga) in gas.iter().enumerate() {
            let round = G::map::<F::Of<G::Of<i64>>, i64, _>(
                Adj::unit::<G::Of<i64>>(ga.clone()),
                Adj::counit::<i64>,
            );
            self.require(
                round == *ga,
                Law::AdjunctionRightTriangle,
                instance,
                json!({ "sample": i }),
            );
        }

        let k = |n: i64| Adj::unit::<i64>(inc(n));
        for (i, &a) in values.iter().enumerate() {
            let back = Adj::left_adjunct::<i64, F::Of<i64>, _>(
                |fa: F::Of<i64>| Adj::right_adjunct::<i64, F::Of<i64>, _>(k, fa),
                a,
            );
            self.require(
                back == k(a),
                Law::AdjunctionAdjuncts,
                instance,
                json!({ "sample": i }),
            );
        }
    }

    // ─── Ran ────────────────────────────────────────────────────────────

    /// RAN-1, RAN-2 on `to_ran(x, UnwrapInner)` along `Identity` into `K`.
    pub fn check_ran_functor<K>(&mut self, instance: &str, samples: &[K::Of<i64>])
    where
        K: Functor,
        K::Of<i64>: Clone + PartialEq,
    {
        let ran = |x: &K::Of<i64>| to_ran::<IdentityK, K, K, _, i64>(x.clone(), UnwrapInner);
        let k = |n: i64| Identity(inc(n));

        for (i, x) in samples.iter().enumerate() {
            let ctx = json!({ "sample": i });

            let mapped = ran(x).map(|n: i64| n).run::<i64, _>(k);
            self.require(
                mapped == ran(x).run::<i64, _>(k),
                Law::RanMapIdentity,
                instance,
                ctx.clone(),
            );

            let twice = ran(x).map(inc).map(double).run::<i64, _>(k);
            let once = ran(x).map(|n: i64| double(inc(n))).run::<i64, _>(k);
            self.require(twice == once, Law::RanMapComposition, instance, ctx);
        }
    }

    /// RAN-3: `gran(to_ran(k, s)) == s(k)` with `k = map(x, Identity)`.
    pub fn check_ran_universal<K>(&mut self, instance: &str, samples: &[K::Of<i64>])
    where
        K: Functor,
        K::Of<i64>: Clone + PartialEq,
        K::Of<Identity<i64>>: Clone,
    {
        for (i, x) in samples.iter().enumerate() {
            let k = K::map::<i64, Identity<i64>, _>(x.clone(), Identity);
            let r = to_ran::<IdentityK, K, K, _, Identity<i64>>(k.clone(), UnwrapInner);
            let direct = NaturalTransformation::<Compose<K, IdentityK>, K>::transform::<i64>(
                &UnwrapInner,
                k,
            );
            self.require(
                gran::<IdentityK, K, i64, _>(&r) == direct,
                Law::RanUniversal,
                instance,
                json!({ "sample": i }),
            );
        }
    }

    // ─── Lan ────────────────────────────────────────────────────────────

    /// LAN-1, LAN-2, eliminating through `WrapInner`.
    pub fn check_lan_functor<K>(&mut self, instance: &str, samples: &[K::Of<i64>])
    where
        K: Functor,
        K::Of<i64>: Clone + PartialEq,
    {
        for (i, x) in samples.iter().enumerate() {
            let ctx = json!({ "sample": i });

            let mapped = lower::<K, _>(lift::<K, i64>(x.clone()).map(|n: i64| n));
            let plain = lower::<K, _>(lift::<K, i64>(x.clone()));
            self.require(mapped == plain, Law::LanMapIdentity, instance, ctx.clone());

            let twice = lower::<K, _>(lift::<K, i64>(x.clone()).map(inc).map(double));
            let once = lower::<K, _>(lift::<K, i64>(x.clone()).map(|n: i64| double(inc(n))));
            self.require(twice == once, Law::LanMapComposition, instance, ctx);
        }
    }

    /// LAN-3: `to_lan(glan(h), s) == s(h)` with `s = WrapInner`.
    pub fn check_lan_universal<K>(&mut self, instance: &str, samples: &[K::Of<i64>])
    where
        K: Functor,
        K::Of<i64>: Clone,
        K::Of<Identity<i64>>: PartialEq,
    {
        for (i, h) in samples.iter().enumerate() {
            let eliminated = glan::<IdentityK, K, i64>(h.clone()).to_lan::<K, _>(&WrapInner);
            let direct = NaturalTransformation::<K, Compose<K, IdentityK>>::transform::<i64>(
                &WrapInner,
                h.clone(),
            );
            self.require(
                eliminated == direct,
                Law::LanUniversal,
                instance,
                json!({ "sample": i }),
            );
        }
    }

    /// LAN-5..8 for `Lan<Identity, K, ->`.
    pub fn check_lan_applicative<K>(
        &mut self,
        instance: &str,
        samples: &[K::Of<i64>],
        points: &[i64],
    ) where
        K: Applicative,
        K::Of<i64>: Clone + PartialEq,
    {
        for (j, &y) in points.iter().enumerate() {
            let lhs = point::<IdentityK, K, _>(inc as fn(i64) -> i64)
                .ap(point::<IdentityK, K, i64>(y));
            let rhs = point::<IdentityK, K, i64>(inc(y));
            self.require(
                lower::<K, _>(lhs) == lower::<K, _>(rhs),
                Law::LanApHomomorphism,
                instance,
                json!({ "point": j }),
            );
        }

        for (i, x) in samples.iter().enumerate() {
            let ctx = json!({ "sample": i });

            let id = point::<IdentityK, K, _>(|n: i64| n).ap(lift::<K, i64>(x.clone()));
            self.require(
                lower::<K, _>(id) == lower::<K, _>(lift::<K, i64>(x.clone())),
                Law::LanApIdentity,
                instance,
                ctx.clone(),
            );

            for (j, &y) in points.iter().enumerate() {
                let lhs = lan_adders::<K>(x.clone()).ap(point::<IdentityK, K, i64>(y));
                let rhs = point::<IdentityK, K, _>(move |f: LanArrow| f(y))
                    .ap(lan_adders::<K>(x.clone()));
                self.require(
                    lower::<K, _>(lhs) == lower::<K, _>(rhs),
                    Law::LanApInterchange,
                    instance,
                    json!({ "sample": i, "point": j }),
                );
            }

            let compose = |f: LanArrow| move |g: LanArrow| move |n: i64| f(g(n));
            let lhs = point::<IdentityK, K, _>(compose)
                .ap(lan_adders::<K>(x.clone()))
                .ap(lan_adders::<K>(x.clone()))
                .ap(lift::<K, i64>(x.clone()));
            let rhs = lan_adders::<K>(x.clone())
                .ap(lan_adders::<K>(x.clone()).ap(lift::<K, i64>(x.clone())));
            self.require(
                lower::<K, _>(lhs) == lower::<K, _>(rhs),
                Law::LanApComposition,
                instance,
                ctx,
            );
        }
    }

    // ─── adjunction round trips ─────────────────────────────────────────

    /// RAN-4 over `fas`, LAN-4 over `gas`.
    pub fn check_adjoint_round_trips<F, G, Adj>(
        &mut self,
        instance: &str,
        fas: &[F::Of<i64>],
        gas: &[G::Of<i64>],
    ) where
        F: Functor,
        G: Functor,
        Adj: Adjunction<F, G>,
        F::Of<i64>: Clone + PartialEq,
        G::Of<i64>: Clone + PartialEq,
    {
        for (i, fa) in fas.iter().enumerate() {
            let r = adjoint_to_ran::<F, G, Adj, i64>(fa.clone());
            self.require(
                ran_to_adjoint::<F, G, Adj, _>(&r) == *fa,
                Law::RanAdjointRoundTrip,
                instance,
                json!({ "sample": i }),
            );
        }

        for (i, ga) in gas.iter().enumerate() {
            let lan = adjoint_to_lan::<F, G, Adj, i64>(ga.clone());
            self.require(
                lan_to_adjoint::<F, G, Adj, _>(lan) == *ga,
                Law::LanAdjointRoundTrip,
                instance,
                json!({ "sample": i }),
            );
        }
    }
}

/// Run one check against one world.
pub fn run_law_check(
    world: &dyn World,
    check: &LawCheck,
    profile: &str,
) -> Result<LawResult, KanError> {
    let mut gate = LawGate::new(profile);
    world.run(check, &mut gate)?;
    Ok(gate.finish())
}

/// A named capability instance the gate can exercise from JSON samples.
pub trait World {
    fn name(&self) -> &str;

    /// Decode the check's samples and run the matching `LawGate` checks.
    ///
    /// Returns [`KanError::Unsupported`] for checks the instance lacks the
    /// capability for.
    fn run(&self, check: &LawCheck, gate: &mut LawGate) -> Result<(), KanError>;
}

/// A law check parsed from a fixture.
#[derive(Debug, Clone, PartialEq)]
pub enum LawCheck {
    Functor { samples: Vec<Value> },
    Applicative { samples: Vec<Value>, points: Vec<i64> },
    Adjunction { samples: Vec<Value> },
    Ran { samples: Vec<Value> },
    Lan { samples: Vec<Value> },
    LanApplicative { samples: Vec<Value>, points: Vec<i64> },
    AdjointRoundTrip { samples: Vec<Value> },
}

impl LawCheck {
    /// Parse the fixture format:
    /// `{"kind": "...", "samples": [...], "points": [...]}`.
    ///
    /// `points` is required by `applicative` and `lan_applicative` only.
    pub fn from_fixture(check: &Value) -> Result<Self, KanError> {
        let kind = check
            .get("kind")
            .and_then(Value::as_str)
            .ok_or_else(|| KanError::MalformedCheck("missing string field `kind`".into()))?;
        let samples = check
            .get("samples")
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| KanError::MalformedCheck("missing array field `samples`".into()))?;

        match kind {
            "functor" => Ok(LawCheck::Functor { samples }),
            "applicative" => Ok(LawCheck::Applicative {
                samples,
                points: parse_points(check)?,
            }),
            "adjunction" => Ok(LawCheck::Adjunction { samples }),
            "ran" => Ok(LawCheck::Ran { samples }),
            "lan" => Ok(LawCheck::Lan { samples }),
            "lan_applicative" => Ok(LawCheck::LanApplicative {
                samples,
                points: parse_points(check)?,
            }),
            "adjoint_round_trip" => Ok(LawCheck::AdjointRoundTrip { samples }),
            other => Err(KanError::MalformedCheck(format!(
                "unknown check kind `{other}`"
            ))),
        }
    }

    /// The fixture `kind` string.
    pub fn kind(&self) -> &'static str {
        match self {
            LawCheck::Functor { .. } => "functor",
            LawCheck::Applicative { .. } => "applicative",
            LawCheck::Adjunction { .. } => "adjunction",
            LawCheck::Ran { .. } => "ran",
            LawCheck::Lan { .. } => "lan",
            LawCheck::LanApplicative { .. } => "lan_applicative",
            LawCheck::AdjointRoundTrip { .. } => "adjoint_round_trip",
        }
    }
}

fn parse_points(check: &Value) -> Result<Vec<i64>, KanError> {
    let points = check
        .get("points")
        .and_then(Value::as_array)
        .ok_or_else(|| KanError::MalformedCheck("missing array field `points`".into()))?;
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            p.as_i64()
                .ok_or_else(|| KanError::MalformedCheck(format!("points[{i}] is not an integer")))
        })
        .collect()
}

// ─── helpers ────────────────────────────────────────────────────────────────

fn ap_rc<K, A, B>(kf: K::Of<Rc<dyn Fn(A) -> B>>, ka: K::Of<A>) -> K::Of<B>
where
    K: Applicative,
    A: 'static,
    B: 'static,
{
    K::apply2::<Rc<dyn Fn(A) -> B>, A, B, _>(kf, ka, |f, a| f(a))
}

fn adders<K: Functor>(x: K::Of<i64>) -> K::Of<Arrow> {
    K::map::<i64, Arrow, _>(x, |n| -> Arrow { Rc::new(move |m: i64| m.wrapping_add(n)) })
}

fn compose_arrows(f: Arrow) -> Composer {
    Rc::new(move |g: Arrow| -> Arrow {
        let f = Rc::clone(&f);
        Rc::new(move |n: i64| f(g(n)))
    })
}

fn lift<K: Kind, A: 'static>(h: K::Of<A>) -> impl LeftKan<IdentityK, K, Item = A> {
    glan::<IdentityK, K, A>(h).map(|g: Identity<A>| g.into_inner())
}

fn lower<K, L>(lan: L) -> K::Of<L::Item>
where
    K: Functor,
    L: LeftKan<IdentityK, K>,
{
    lan.to_lan::<K, _>(&WrapInner)
}

fn lan_adders<K: Kind>(x: K::Of<i64>) -> impl LeftKan<IdentityK, K, Item = LanArrow> {
    lift::<K, i64>(x).map(|n: i64| -> LanArrow { Box::new(move |m: i64| m.wrapping_add(n)) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanex_core::{IdentityAdjunction, OptionK, VecK};

    #[test]
    fn lawful_option_is_accepted() {
        let samples = [Some(3), None, Some(-8)];
        let mut gate = LawGate::new("unit");
        gate.check_functor::<OptionK>("option", &samples);
        gate.check_applicative::<OptionK>("option", &samples, &[0, 41]);
        gate.check_ran_functor::<OptionK>("option", &samples);
        gate.check_ran_universal::<OptionK>("option", &samples);
        gate.check_lan_functor::<OptionK>("option", &samples);
        gate.check_lan_universal::<OptionK>("option", &samples);
        gate.check_lan_applicative::<OptionK>("option", &samples, &[0, 41]);
        let result = gate.finish();
        assert!(result.is_accepted(), "{result:?}");
        assert_eq!(result.profile, "unit");
    }

    #[test]
    fn identity_adjunction_is_accepted() {
        let xs = [Identity(1), Identity(-2)];
        let mut gate = LawGate::new("unit");
        gate.check_adjunction::<IdentityK, IdentityK, IdentityAdjunction>(
            "identity",
            &xs,
            &xs,
            &[5, 6],
        );
        gate.check_adjoint_round_trips::<IdentityK, IdentityK, IdentityAdjunction>(
            "identity", &xs, &xs,
        );
        assert!(gate.failures().is_empty(), "{:?}", gate.failures());
    }

    #[test]
    fn vec_ran_and_lan_are_accepted() {
        let samples = [vec![1, 2, 3], vec![], vec![i64::MAX]];
        let mut gate = LawGate::new("unit");
        gate.check_ran_functor::<VecK>("vec", &samples);
        gate.check_ran_universal::<VecK>("vec", &samples);
        gate.check_lan_functor::<VecK>("vec", &samples);
        gate.check_lan_universal::<VecK>("vec", &samples);
        assert!(gate.failures().is_empty(), "{:?}", gate.failures());
    }

    #[test]
    fn only_the_first_failing_sample_is_recorded() {
        let mut gate = LawGate::new("unit");
        gate.record(Law::FunctorIdentity, "w", json!({ "sample": 1 }));
        gate.record(Law::FunctorIdentity, "w", json!({ "sample": 2 }));
        gate.record(Law::FunctorIdentity, "other", json!({ "sample": 0 }));
        assert_eq!(gate.failures().len(), 2);
        assert_eq!(gate.failures()[0].context, Some(json!({ "sample": 1 })));
    }

    #[test]
    fn parses_fixture_checks() {
        let check = LawCheck::from_fixture(&json!({
            "kind": "lan_applicative",
            "samples": [1, 2],
            "points": [7],
        }))
        .unwrap();
        assert_eq!(check.kind(), "lan_applicative");
        assert_eq!(
            check,
            LawCheck::LanApplicative {
                samples: vec![json!(1), json!(2)],
                points: vec![7],
            }
        );
    }

    #[test]
    fn rejects_malformed_checks() {
        let missing_points = LawCheck::from_fixture(&json!({"kind": "applicative", "samples": []}));
        assert!(matches!(missing_points, Err(KanError::MalformedCheck(_))));

        let bad_point = LawCheck::from_fixture(&json!({
            "kind": "applicative",
            "samples": [],
            "points": ["x"],
        }));
        assert!(matches!(bad_point, Err(KanError::MalformedCheck(m)) if m.contains("points[0]")));

        let unknown = LawCheck::from_fixture(&json!({"kind": "monad", "samples": []}));
        assert!(matches!(unknown, Err(KanError::MalformedCheck(m)) if m.contains("monad")));
    }
}
