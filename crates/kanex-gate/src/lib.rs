//! # Kanex Gate
//!
//! The verifier for `kanex-core`: runs the capability laws and the Kan
//! extension laws over sample data and reports every violation as a
//! deterministic, serialisable witness.
//!
//! ## Architecture
//!
//! ```text
//! LawCheck              ← Parsed fixture: kind + samples (+ points)
//!     │
//! World                 ← Named instance decoding samples (toy worlds)
//!     │
//! LawGate               ← Generic law checks, first failure per law
//!     │
//! LawResult             ← accepted | rejected, sorted LawFailures
//!     │
//! witness ID            ← "w1_" + base32hex(SHA256(JCS(key)))
//! ```

pub mod error;
pub mod gate;
pub mod toy;
pub mod witness;

pub use error::KanError;
pub use gate::{LawCheck, LawGate, World, run_law_check};
pub use toy::{get_world, run_case};
pub use witness::{Law, LawFailure, LawResult, Verdict, compute_witness_id};
