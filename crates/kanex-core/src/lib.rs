//! # Kanex Core
//!
//! Right and left Kan extensions of one type constructor along another,
//! and their conversions to and from adjoint functors.
//!
//! `Ran<G, H, A>` is universally quantified: for every `B` and every
//! `k : A → G<B>` it yields an `H<B>`. `Lan<G, H, A>` is existential: some
//! hidden `I` with a value `H<I>` and a conversion `G<I> → A`.
//!
//! Capabilities are traits on [`Kind`] markers. Their laws are assumed
//! here and checked by `kanex-gate`.
//!
//! ## Architecture
//!
//! ```text
//! Kind, Compose           ← Type constructors as markers, F::Of<A>
//!     │
//! Functor, Applicative    ← map / unzip, point / apply2 / ap
//!     │
//! NaturalTransformation   ← F ⇒ G, one generic method
//!     │
//! Adjunction<F, G>        ← unit / counit, derived adjuncts
//!     │
//! RightKan (Ran)          ← run at any B; adapters per construction
//! LeftKan  (Lan)          ← sealed package of H<I> and G<I> → A
//! ```

pub mod adjunction;
pub mod functor;
pub mod identity;
pub mod kind;
pub mod lan;
pub mod natural;
pub mod ran;

pub use adjunction::{Adjunction, ComposeAdjunction, IdentityAdjunction};
pub use functor::{Applicative, Functor, OptionK, ResultK, VecK};
pub use identity::{Identity, IdentityK};
pub use kind::{Compose, Kind};
pub use lan::{
    LanTransformation, LeftKan, adjoint_to_lan, composed_adjoint_to_lan, from_lan, glan,
    lan_to_adjoint,
};
pub use natural::{
    IdentityTransformation, NaturalTransformation, UnwrapInner, UnwrapOuter, WrapInner, WrapOuter,
};
pub use ran::{
    RanTransformation, RightKan, adjoint_to_ran, composed_adjoint_to_ran, from_ran, gran,
    ran_to_adjoint, to_ran,
};
