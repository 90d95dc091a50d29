//! Toy worlds for law-gate conformance testing.
//!
//! Each world is one capability instance over `i64` samples, decoded from
//! fixture JSON with serde.
//!
//! ## Worlds
//!
//! - **identity**: `Identity`, with `Identity ⊣ Identity`. Every check kind.
//! - **option**, **result**: `Option`, `Result<_, String>`. Applicative.
//!   `result` samples are externally tagged: `{"Ok": 1}`, `{"Err": "e"}`.
//! - **vec**: `Vec`. Functor only.
//! - **reverse_vec**: `Vec` whose `map` reverses the order. Breaks every
//!   functor law on non-palindromic samples, and with them the universal
//!   properties of `gran` and `glan`.
//! - **none_point**: `Option` whose `point` is `None`. Breaks applicative
//!   identity and composition, for the capability and for `Lan`.

use crate::error::KanError;
use crate::gate::{LawCheck, LawGate, World};
use crate::witness::LawResult;
use kanex_core::{
    Applicative, Functor, Identity, IdentityAdjunction, IdentityK, Kind, OptionK, ResultK, VecK,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

/// Names accepted by [`get_world`].
pub const WORLD_NAMES: [&str; 6] = [
    "identity",
    "option",
    "result",
    "vec",
    "reverse_vec",
    "none_point",
];

/// Get a toy world by name (matching the fixture `world` field).
pub fn get_world(name: &str) -> Result<Box<dyn World>, KanError> {
    match name {
        "identity" => Ok(Box::new(IdentityWorld)),
        "option" => Ok(Box::new(ApplicativeWorld::<OptionK>::new("option"))),
        "result" => Ok(Box::new(ApplicativeWorld::<ResultK<String>>::new("result"))),
        "vec" => Ok(Box::new(FunctorWorld::<VecK>::new("vec"))),
        "reverse_vec" => Ok(Box::new(FunctorWorld::<ReverseVecK>::new("reverse_vec"))),
        "none_point" => Ok(Box::new(ApplicativeWorld::<NonePointK>::new("none_point"))),
        other => Err(KanError::UnknownWorld(other.to_string())),
    }
}

/// Run a whole fixture case: `{"world": "...", "check": {...}}`.
pub fn run_case(case: &Value, profile: &str) -> Result<LawResult, KanError> {
    let name = case
        .get("world")
        .and_then(Value::as_str)
        .ok_or_else(|| KanError::MalformedCheck("missing string field `world`".into()))?;
    let world = get_world(name)?;
    let check = LawCheck::from_fixture(&case["check"])?;
    crate::gate::run_law_check(world.as_ref(), &check, profile)
}

fn decode<T: DeserializeOwned>(samples: &[Value]) -> Result<Vec<T>, KanError> {
    samples
        .iter()
        .enumerate()
        .map(|(index, v)| {
            T::deserialize(v).map_err(|source| KanError::MalformedSample { index, source })
        })
        .collect()
}

fn unsupported(world: &str, check: &LawCheck) -> KanError {
    KanError::Unsupported {
        world: world.to_string(),
        check: check.kind().to_string(),
    }
}

/// functor, ran, lan.
fn run_functor_family<K>(name: &str, check: &LawCheck, gate: &mut LawGate) -> Result<(), KanError>
where
    K: Functor,
    K::Of<i64>: DeserializeOwned + Clone + PartialEq,
    K::Of<Identity<i64>>: Clone + PartialEq,
{
    match check {
        LawCheck::Functor { samples } => {
            gate.check_functor::<K>(name, &decode::<K::Of<i64>>(samples)?);
        }
        LawCheck::Ran { samples } => {
            let xs = decode::<K::Of<i64>>(samples)?;
            gate.check_ran_functor::<K>(name, &xs);
            gate.check_ran_universal::<K>(name, &xs);
        }
        LawCheck::Lan { samples } => {
            let xs = decode::<K::Of<i64>>(samples)?;
            gate.check_lan_functor::<K>(name, &xs);
            gate.check_lan_universal::<K>(name, &xs);
        }
        other => return Err(unsupported(name, other)),
    }
    Ok(())
}

/// applicative, lan_applicative, then the functor family.
fn run_applicative_family<K>(
    name: &str,
    check: &LawCheck,
    gate: &mut LawGate,
) -> Result<(), KanError>
where
    K: Applicative,
    K::Of<i64>: DeserializeOwned + Clone + PartialEq,
    K::Of<Identity<i64>>: Clone + PartialEq,
{
    match check {
        LawCheck::Applicative { samples, points } => {
            gate.check_applicative::<K>(name, &decode::<K::Of<i64>>(samples)?, points);
            Ok(())
        }
        LawCheck::LanApplicative { samples, points } => {
            gate.check_lan_applicative::<K>(name, &decode::<K::Of<i64>>(samples)?, points);
            Ok(())
        }
        other => run_functor_family::<K>(name, other, gate),
    }
}

/// A world for a Functor-only instance.
pub struct FunctorWorld<K> {
    name: &'static str,
    _kind: PhantomData<fn() -> K>,
}

impl<K> FunctorWorld<K> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            _kind: PhantomData,
        }
    }
}

impl<K> World for FunctorWorld<K>
where
    K: Functor,
    K::Of<i64>: DeserializeOwned + Clone + PartialEq,
    K::Of<Identity<i64>>: Clone + PartialEq,
{
    fn name(&self) -> &str {
        self.name
    }

    fn run(&self, check: &LawCheck, gate: &mut LawGate) -> Result<(), KanError> {
        run_functor_family::<K>(self.name, check, gate)
    }
}

/// A world for an Applicative instance.
pub struct ApplicativeWorld<K> {
    name: &'static str,
    _kind: PhantomData<fn() -> K>,
}

impl<K> ApplicativeWorld<K> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            _kind: PhantomData,
        }
    }
}

impl<K> World for ApplicativeWorld<K>
where
    K: Applicative,
    K::Of<i64>: DeserializeOwned + Clone + PartialEq,
    K::Of<Identity<i64>>: Clone + PartialEq,
{
    fn name(&self) -> &str {
        self.name
    }

    fn run(&self, check: &LawCheck, gate: &mut LawGate) -> Result<(), KanError> {
        run_applicative_family::<K>(self.name, check, gate)
    }
}

/// `Identity`, the only instance here with an adjunction.
pub struct IdentityWorld;

impl World for IdentityWorld {
    fn name(&self) -> &str {
        "identity"
    }

    fn run(&self, check: &LawCheck, gate: &mut LawGate) -> Result<(), KanError> {
        match check {
            LawCheck::Adjunction { samples } => {
                let xs = decode::<Identity<i64>>(samples)?;
                let values = decode::<i64>(samples)?;
                gate.check_adjunction::<IdentityK, IdentityK, IdentityAdjunction>(
                    self.name(),
                    &xs,
                    &xs,
                    &values,
                );
                Ok(())
            }
            LawCheck::AdjointRoundTrip { samples } => {
                let xs = decode::<Identity<i64>>(samples)?;
                gate.check_adjoint_round_trips::<IdentityK, IdentityK, IdentityAdjunction>(
                    self.name(),
                    &xs,
                    &xs,
                );
                Ok(())
            }
            other => run_applicative_family::<IdentityK>(self.name(), other, gate),
        }
    }
}

// ─── unlawful instances ─────────────────────────────────────────────────────

/// `Vec` whose `map` reverses.
pub enum ReverseVecK {}

impl Kind for ReverseVecK {
    type Of<A> = Vec<A>;
}

impl Functor for ReverseVecK {
    fn map<A, B, F>(fa: Vec<A>, f: F) -> Vec<B>
    where
        F: FnMut(A) -> B,
    {
        fa.into_iter().rev().map(f).collect()
    }

    fn unzip<A, B>(fab: Vec<(A, B)>) -> (Vec<A>, Vec<B>) {
        fab.into_iter().unzip()
    }
}

/// `Option` whose `point` forgets its argument.
pub enum NonePointK {}

impl Kind for NonePointK {
    type Of<A> = Option<A>;
}

impl Functor for NonePointK {
    fn map<A, B, F>(fa: Option<A>, f: F) -> Option<B>
    where
        F: FnMut(A) -> B,
    {
        OptionK::map::<A, B, F>(fa, f)
    }

    fn unzip<A, B>(fab: Option<(A, B)>) -> (Option<A>, Option<B>) {
        OptionK::unzip::<A, B>(fab)
    }
}

impl Applicative for NonePointK {
    fn point<A>(_: A) -> Option<A> {
        None
    }

    fn apply2<A, B, C, F>(fa: Option<A>, fb: Option<B>, f: F) -> Option<C>
    where
        F: FnMut(A, B) -> C,
    {
        OptionK::apply2::<A, B, C, F>(fa, fb, f)
    }
}
