//! Law failures, gate results and deterministic witness identifiers.
//!
//! The same semantic failure always gets the same witness ID:
//!
//! 1. Build the canonical key `{schema, class, lawRef, instance, context}`
//! 2. Serialize it canonically (RFC 8785 / JCS: sorted keys, no whitespace)
//! 3. `witnessId = "w1_" || base32hex_lower(SHA256(keyBytes))`
//!
//! The message is not part of the key, so rewording a law statement never
//! changes an ID.

use crate::error::KanError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Compute a witness ID from the canonical key fields.
pub fn compute_witness_id(
    class: &str,
    law_ref: &str,
    instance: Option<&str>,
    context: Option<&Value>,
) -> String {
    let key = canonical_witness_key(class, law_ref, instance, context);
    let hash = Sha256::digest(jcs_serialize(&key));
    format!("w1_{}", base32hex_lower_no_pad(&hash))
}

fn canonical_witness_key(
    class: &str,
    law_ref: &str,
    instance: Option<&str>,
    context: Option<&Value>,
) -> Value {
    let mut map = serde_json::Map::new();
    map.insert("schema".to_string(), Value::Number(1.into()));
    map.insert("class".to_string(), Value::String(class.to_string()));
    map.insert("lawRef".to_string(), Value::String(law_ref.to_string()));
    map.insert(
        "instance".to_string(),
        instance
            .map(|s| Value::String(s.to_string()))
            .unwrap_or(Value::Null),
    );
    map.insert(
        "context".to_string(),
        context.cloned().unwrap_or(Value::Null),
    );
    Value::Object(map)
}

/// RFC 8785 canonical form for the values a witness key can hold:
/// integers, strings, null, and small nested objects and arrays.
fn jcs_serialize(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    write_canonical(value, &mut buf);
    buf
}

fn write_canonical(value: &Value, buf: &mut Vec<u8>) {
    match value {
        Value::Null => buf.extend_from_slice(b"null"),
        Value::Bool(true) => buf.extend_from_slice(b"true"),
        Value::Bool(false) => buf.extend_from_slice(b"false"),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                buf.extend_from_slice(i.to_string().as_bytes());
            } else if let Some(u) = n.as_u64() {
                buf.extend_from_slice(u.to_string().as_bytes());
            } else {
                buf.extend_from_slice(n.to_string().as_bytes());
            }
        }
        // `Value`'s Display is compact JSON with standard string escaping.
        Value::String(_) => buf.extend_from_slice(value.to_string().as_bytes()),
        Value::Array(items) => {
            buf.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_canonical(item, buf);
            }
            buf.push(b']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            buf.push(b'{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                buf.extend_from_slice(Value::String(key.clone()).to_string().as_bytes());
                buf.push(b':');
                write_canonical(&map[key], buf);
            }
            buf.push(b'}');
        }
    }
}

/// RFC 4648 base32hex, lowercase, no padding. Alphabet `0-9a-v`.
fn base32hex_lower_no_pad(data: &[u8]) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuv";

    let mut out = String::with_capacity(data.len().div_ceil(5) * 8);
    let mut bits: u64 = 0;
    let mut num_bits: u32 = 0;

    for &byte in data {
        bits = (bits << 8) | u64::from(byte);
        num_bits += 8;
        while num_bits >= 5 {
            num_bits -= 5;
            out.push(ALPHABET[((bits >> num_bits) & 0x1f) as usize] as char);
        }
    }
    if num_bits > 0 {
        out.push(ALPHABET[((bits << (5 - num_bits)) & 0x1f) as usize] as char);
    }
    out
}

/// Failure class constants.
pub mod failure_class {
    pub const FUNCTOR_LAW_FAILURE: &str = "functor_law_failure";
    pub const APPLICATIVE_LAW_FAILURE: &str = "applicative_law_failure";
    pub const ADJUNCTION_LAW_FAILURE: &str = "adjunction_law_failure";
    pub const UNIVERSAL_PROPERTY_FAILURE: &str = "universal_property_failure";
    pub const ROUND_TRIP_FAILURE: &str = "round_trip_failure";
}

/// Every law the gate checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Law {
    FunctorIdentity,
    FunctorComposition,
    FunctorUnzip,
    ApplicativeIdentity,
    ApplicativeHomomorphism,
    ApplicativeInterchange,
    ApplicativeComposition,
    AdjunctionLeftTriangle,
    AdjunctionRightTriangle,
    AdjunctionAdjuncts,
    RanMapIdentity,
    RanMapComposition,
    RanUniversal,
    RanAdjointRoundTrip,
    LanMapIdentity,
    LanMapComposition,
    LanUniversal,
    LanAdjointRoundTrip,
    LanApIdentity,
    LanApHomomorphism,
    LanApInterchange,
    LanApComposition,
}

impl Law {
    pub const ALL: [Law; 22] = [
        Law::FunctorIdentity,
        Law::FunctorComposition,
        Law::FunctorUnzip,
        Law::ApplicativeIdentity,
        Law::ApplicativeHomomorphism,
        Law::ApplicativeInterchange,
        Law::ApplicativeComposition,
        Law::AdjunctionLeftTriangle,
        Law::AdjunctionRightTriangle,
        Law::AdjunctionAdjuncts,
        Law::RanMapIdentity,
        Law::RanMapComposition,
        Law::RanUniversal,
        Law::RanAdjointRoundTrip,
        Law::LanMapIdentity,
        Law::LanMapComposition,
        Law::LanUniversal,
        Law::LanAdjointRoundTrip,
        Law::LanApIdentity,
        Law::LanApHomomorphism,
        Law::LanApInterchange,
        Law::LanApComposition,
    ];

    /// Stable reference, e.g. `"RAN-3"`.
    pub fn law_ref(self) -> &'static str {
        match self {
            Law::FunctorIdentity => "FUNCTOR-1",
            Law::FunctorComposition => "FUNCTOR-2",
            Law::FunctorUnzip => "FUNCTOR-3",
            Law::ApplicativeIdentity => "APPLICATIVE-1",
            Law::ApplicativeHomomorphism => "APPLICATIVE-2",
            Law::ApplicativeInterchange => "APPLICATIVE-3",
            Law::ApplicativeComposition => "APPLICATIVE-4",
            Law::AdjunctionLeftTriangle => "ADJUNCTION-1",
            Law::AdjunctionRightTriangle => "ADJUNCTION-2",
            Law::AdjunctionAdjuncts => "ADJUNCTION-3",
            Law::RanMapIdentity => "RAN-1",
            Law::RanMapComposition => "RAN-2",
            Law::RanUniversal => "RAN-3",
            Law::RanAdjointRoundTrip => "RAN-4",
            Law::LanMapIdentity => "LAN-1",
            Law::LanMapComposition => "LAN-2",
            Law::LanUniversal => "LAN-3",
            Law::LanAdjointRoundTrip => "LAN-4",
            Law::LanApIdentity => "LAN-5",
            Law::LanApHomomorphism => "LAN-6",
            Law::LanApInterchange => "LAN-7",
            Law::LanApComposition => "LAN-8",
        }
    }

    pub fn class(self) -> &'static str {
        use failure_class::*;
        match self {
            Law::FunctorIdentity
            | Law::FunctorComposition
            | Law::FunctorUnzip
            | Law::RanMapIdentity
            | Law::RanMapComposition
            | Law::LanMapIdentity
            | Law::LanMapComposition => FUNCTOR_LAW_FAILURE,
            Law::ApplicativeIdentity
            | Law::ApplicativeHomomorphism
            | Law::ApplicativeInterchange
            | Law::ApplicativeComposition
            | Law::LanApIdentity
            | Law::LanApHomomorphism
            | Law::LanApInterchange
            | Law::LanApComposition => APPLICATIVE_LAW_FAILURE,
            Law::AdjunctionLeftTriangle
            | Law::AdjunctionRightTriangle
            | Law::AdjunctionAdjuncts => ADJUNCTION_LAW_FAILURE,
            Law::RanUniversal | Law::LanUniversal => UNIVERSAL_PROPERTY_FAILURE,
            Law::RanAdjointRoundTrip | Law::LanAdjointRoundTrip => ROUND_TRIP_FAILURE,
        }
    }

    /// The equation, used as the failure message.
    pub fn statement(self) -> &'static str {
        match self {
            Law::FunctorIdentity => "map(x, id) == x",
            Law::FunctorComposition => "map(map(x, f), g) == map(x, g . f)",
            Law::FunctorUnzip => "unzip(x) == (map(x, fst), map(x, snd))",
            Law::ApplicativeIdentity => "ap(point(id), v) == v",
            Law::ApplicativeHomomorphism => "ap(point(f), point(x)) == point(f(x))",
            Law::ApplicativeInterchange => "ap(u, point(y)) == ap(point(|f| f(y)), u)",
            Law::ApplicativeComposition => {
                "ap(ap(ap(point(compose), u), v), w) == ap(u, ap(v, w))"
            }
            Law::AdjunctionLeftTriangle => "counit(F.map(fa, unit)) == fa",
            Law::AdjunctionRightTriangle => "G.map(unit(ga), counit) == ga",
            Law::AdjunctionAdjuncts => "left_adjunct(right_adjunct(k)) == k",
            Law::RanMapIdentity => "ran.map(id) == ran",
            Law::RanMapComposition => "ran.map(f).map(g) == ran.map(g . f)",
            Law::RanUniversal => "gran(to_ran(k, s)) == s(k)",
            Law::RanAdjointRoundTrip => "ran_to_adjoint(adjoint_to_ran(x)) == x",
            Law::LanMapIdentity => "lan.map(id) == lan",
            Law::LanMapComposition => "lan.map(f).map(g) == lan.map(g . f)",
            Law::LanUniversal => "to_lan(glan(h), s) == s(h)",
            Law::LanAdjointRoundTrip => "lan_to_adjoint(adjoint_to_lan(ga)) == ga",
            Law::LanApIdentity => "point(id).ap(v) == v",
            Law::LanApHomomorphism => "point(f).ap(point(x)) == point(f(x))",
            Law::LanApInterchange => "u.ap(point(y)) == point(|f| f(y)).ap(u)",
            Law::LanApComposition => "point(compose).ap(u).ap(v).ap(w) == u.ap(v.ap(w))",
        }
    }
}

/// One law violation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LawFailure {
    pub witness_id: String,

    pub class: String,

    /// e.g. `"FUNCTOR-2"`.
    pub law_ref: String,

    pub message: String,

    /// The instance (world) under test.
    #[serde(default)]
    pub instance: Option<String>,

    /// Which samples failed, e.g. `{"sample": 0}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl LawFailure {
    pub fn new(
        class: impl Into<String>,
        law_ref: impl Into<String>,
        message: impl Into<String>,
        instance: Option<String>,
        context: Option<Value>,
    ) -> Self {
        let class = class.into();
        let law_ref = law_ref.into();
        let witness_id =
            compute_witness_id(&class, &law_ref, instance.as_deref(), context.as_ref());
        Self {
            witness_id,
            class,
            law_ref,
            message: message.into(),
            instance,
            context,
        }
    }

    /// A failure of `law`, with its class and statement filled in.
    pub fn of(law: Law, instance: Option<String>, context: Option<Value>) -> Self {
        Self::new(law.class(), law.law_ref(), law.statement(), instance, context)
    }

    /// class, lawRef, instance, context, witnessId.
    fn sort_key(&self) -> (&str, &str, &str, String, &str) {
        (
            &self.class,
            &self.law_ref,
            self.instance.as_deref().unwrap_or(""),
            self.context
                .as_ref()
                .map(Value::to_string)
                .unwrap_or_default(),
            &self.witness_id,
        )
    }
}

impl PartialOrd for LawFailure {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LawFailure {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Accepted,
    Rejected,
}

/// `law_ref` reported for a rejected result that lists no failures.
pub const UNEXPLAINED_REJECTION: &str = "REJECTED";

/// The outcome of one gate run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LawResult {
    /// Always 1.
    pub witness_schema: u32,

    pub profile: String,

    pub result: Verdict,

    /// Empty when accepted; sorted otherwise.
    pub failures: Vec<LawFailure>,
}

impl LawResult {
    pub fn accepted(profile: impl Into<String>) -> Self {
        Self {
            witness_schema: 1,
            profile: profile.into(),
            result: Verdict::Accepted,
            failures: vec![],
        }
    }

    pub fn rejected(profile: impl Into<String>, mut failures: Vec<LawFailure>) -> Self {
        failures.sort();
        Self {
            witness_schema: 1,
            profile: profile.into(),
            result: Verdict::Rejected,
            failures,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.result == Verdict::Accepted
    }

    /// `Ok(self)` when accepted, otherwise the first failure as
    /// [`KanError::Violation`].
    ///
    /// A rejected result with no failures still fails, as
    /// [`UNEXPLAINED_REJECTION`].
    pub fn ensure_accepted(self) -> Result<Self, KanError> {
        match self.result {
            Verdict::Accepted => Ok(self),
            Verdict::Rejected => Err(match self.failures.first() {
                Some(first) => KanError::Violation {
                    law_ref: first.law_ref.clone(),
                    message: first.message.clone(),
                },
                None => KanError::Violation {
                    law_ref: UNEXPLAINED_REJECTION.to_string(),
                    message: "rejected without failures".to_string(),
                },
            }),
        }
    }
}
