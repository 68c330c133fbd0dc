//! # sampler_core: Deterministic Simplex Sampling
//!
//! sampler_core provides three layers, each generic over the one below:
//! - A two-word bit-mixing engine (`engine::Tiny`)
//! - Naive base distributions mapping engine words into an interval
//!   (`distribution::NaiveInt`, `distribution::NaiveReal`)
//! - The diagonal adapter producing sequences constrained to a simplex
//!   (`distribution::Diagonal`, with `Triangle` and `Tetrahedron` aliases)
//!
//! Every stateful type has an exact text state (`state`), so a run can be
//! stopped, saved and resumed without changing its output.
//!
//! ## Usage Examples
//!
//! ```rust
//! use sampler_core::distribution::{Diagonal, NaiveInt, Tetrahedron, NaiveReal, Upper};
//! use sampler_core::engine::Tiny;
//!
//! let mut engine = Tiny::<u64>::from_words([1, 2]);
//!
//! // Three coordinates that never sum above one.
//! let mut tetra = Tetrahedron::<NaiveReal<f64>>::with_range(0.0, 1.0);
//! let (a, b, c) = (tetra.sample(&mut engine), tetra.sample(&mut engine), tetra.sample(&mut engine));
//! assert!(a + b + c <= 1.0);
//!
//! // Four integers that always sum to at least 100.
//! let mut upper = Diagonal::<NaiveInt<i32>, 4, Upper>::with_range(0, 100);
//! let window: Vec<i32> = upper.samples(&mut engine).take(4).collect();
//! assert!(window.iter().all(|v| (0..=100).contains(v)));
//! ```
//!
//! ## Preconditions
//!
//! Sampling never fails and never checks its inputs: an interval with
//! `min > max` produces unspecified values. Validate intervals at the
//! boundary of your application.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `Tiny`, `Interval`, `NaiveInt` and
//!   `NaiveReal`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod distribution;
pub mod engine;
pub mod error;
pub mod state;
pub mod support;

pub use distribution::{
    BaseDistribution, Diagonal, Interval, Lower, Middle, NaiveInt, NaiveReal, Side, Tetrahedron,
    Triangle, Upper,
};
pub use engine::{Engine, RngEngine, Tiny};
pub use error::{StateError, StateResult};
pub use state::TextState;
