//! [`LSystem`]: a grammar engine and a turtle interpreter behind one handle.

use crate::error::LSystemError;
use crate::grammar::GrammarEngine;
use crate::interpreter::{TurtleConfig, TurtleInterpreter};
use crate::skeleton::{Branch, FlatGeometry, Marker, PlantSkeleton};
use std::path::Path;
use tracing::debug;

/// Loads a program, iterates it, and turns any depth into geometry.
///
/// The interpreter starts with the standard symbol table; rebind symbols through
/// [`interpreter_mut`](Self::interpreter_mut). The step and angle used by the turtle always
/// come from the grammar (program directives or the setters below).
#[derive(Clone, Debug, Default)]
pub struct LSystem {
    grammar: GrammarEngine,
    interpreter: TurtleInterpreter,
}

impl LSystem {
    /// An empty L-System with the standard symbol table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the program at `path` and loads it. Only I/O failures are errors.
    pub fn load_program(&mut self, path: impl AsRef<Path>) -> Result<(), LSystemError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading L-System program");
        let program = std::fs::read_to_string(path)?;
        self.load_program_from_string(&program);
        Ok(())
    }

    /// Replaces the grammar with `program`, see [`GrammarEngine::load_program_from_string`].
    pub fn load_program_from_string(&mut self, program: &str) {
        self.grammar.load_program_from_string(program);
    }

    /// Overrides the turn angle in degrees.
    pub fn set_default_angle(&mut self, degrees: f32) {
        self.grammar.set_default_angle(degrees);
    }

    /// Overrides the forward step.
    pub fn set_default_step(&mut self, distance: f32) {
        self.grammar.set_default_step(distance);
    }

    /// Turn angle in degrees.
    pub fn default_angle(&self) -> f32 {
        self.grammar.default_angle()
    }

    /// Forward step length.
    pub fn default_step(&self) -> f32 {
        self.grammar.default_step()
    }

    /// The raw text of the loaded program.
    pub fn grammar_string(&self) -> &str {
        self.grammar.grammar_string()
    }

    /// The underlying grammar engine.
    pub fn grammar(&self) -> &GrammarEngine {
        &self.grammar
    }

    /// Mutable access to the grammar, e.g. for [`GrammarEngine::add_production`].
    pub fn grammar_mut(&mut self) -> &mut GrammarEngine {
        &mut self.grammar
    }

    /// The turtle used by the `process*` calls.
    ///
    /// Its symbol map and `max_stack_depth` are honored; step and angle always come from the
    /// grammar, so set those with [`set_default_step`](Self::set_default_step) and
    /// [`set_default_angle`](Self::set_default_angle).
    pub fn interpreter_mut(&mut self) -> &mut TurtleInterpreter {
        &mut self.interpreter
    }

    /// The axiom rewritten `n` times.
    pub fn get_iteration(&mut self, n: usize) -> &str {
        self.grammar.get_iteration(n)
    }

    /// Grows depth `n` and replaces the contents of `branches` with its segments.
    ///
    /// On error `branches` holds the segments emitted before the walk stopped.
    pub fn process(&mut self, n: usize, branches: &mut Vec<Branch>) -> Result<(), LSystemError> {
        let mut skeleton = PlantSkeleton::new();
        let result = self.walk(n, false, &mut skeleton);
        *branches = skeleton.branches;
        result
    }

    /// Like [`process`](Self::process), also replacing `markers` with the flowers.
    pub fn process_with_markers(
        &mut self,
        n: usize,
        branches: &mut Vec<Branch>,
        markers: &mut Vec<Marker>,
    ) -> Result<(), LSystemError> {
        let mut skeleton = PlantSkeleton::new();
        let result = self.walk(n, true, &mut skeleton);
        *branches = skeleton.branches;
        *markers = skeleton.markers;
        result
    }

    /// Grows depth `n` into a [`PlantSkeleton`].
    pub fn skeleton(&mut self, n: usize) -> Result<PlantSkeleton, LSystemError> {
        let mut skeleton = PlantSkeleton::new();
        self.walk(n, true, &mut skeleton)?;
        Ok(skeleton)
    }

    /// Grows depth `n` and encodes it as flat buffers, see [`FlatGeometry`].
    pub fn process_flat(&mut self, n: usize) -> Result<FlatGeometry, LSystemError> {
        Ok(self.skeleton(n)?.to_flat())
    }

    fn walk(
        &mut self,
        n: usize,
        collect_markers: bool,
        out: &mut PlantSkeleton,
    ) -> Result<(), LSystemError> {
        let config = TurtleConfig {
            default_step: self.grammar.default_step(),
            default_angle: self.grammar.default_angle(),
            ..self.interpreter.config().clone()
        };
        let symbols = self.grammar.get_iteration(n);
        self.interpreter
            .interpret_with(&config, symbols, collect_markers, out)?;
        Ok(())
    }
}
