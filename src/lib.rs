//! # symbios-plant
//!
//! A deterministic L-System engine that grows 3D plant skeletons.
//!
//! A [`GrammarEngine`] rewrites an axiom with single-symbol production rules and caches every
//! depth it computes. A [`TurtleInterpreter`] then walks the rewritten string with a 3D turtle
//! (position plus orientation, with `[`/`]` save and restore) and emits branch segments and
//! tagged markers (flowers) as a [`PlantSkeleton`]. [`LSystem`] ties both together.
//!
//! ```
//! use symbios_plant::LSystem;
//!
//! let mut lsystem = LSystem::new();
//! lsystem.load_program_from_string("angle = 25\naxiom = X\nX = F[+X][-X]F*\nF = FF\n");
//! let skeleton = lsystem.skeleton(3).unwrap();
//! assert!(!skeleton.branches.is_empty());
//! ```

pub mod error;
pub mod grammar;
pub mod interpreter;
pub mod lsystem;
pub mod skeleton;
pub mod turtle;

pub use error::*;
pub use grammar::*;
pub use interpreter::*;
pub use lsystem::*;
pub use skeleton::*;
pub use turtle::*;
