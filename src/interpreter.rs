//! Interpreter that walks a rewritten symbol string and grows a [`PlantSkeleton`].
//!
//! The entry point is [`TurtleInterpreter`]. Configure it with a [`TurtleConfig`],
//! register symbol-to-operation mappings via [`TurtleInterpreter::set_op`] or
//! [`TurtleInterpreter::populate_standard_symbols`], then call
//! [`TurtleInterpreter::build_skeleton`] with the string from
//! [`GrammarEngine::get_iteration`](crate::GrammarEngine::get_iteration).

use crate::error::TurtleError;
use crate::grammar::{DEFAULT_ANGLE, DEFAULT_STEP};
use crate::skeleton::{Branch, Marker, PlantSkeleton};
use crate::turtle::{TurtleOp, TurtleState};
use std::collections::HashMap;
use std::f32::consts::PI;
use tracing::debug;

/// Configuration for turtle interpretation.
#[derive(Clone, Debug)]
pub struct TurtleConfig {
    /// Distance covered by `Draw` and `Move`.
    pub default_step: f32,
    /// Rotation (in degrees) applied by `Turn`/`Pitch`/`Roll`.
    pub default_angle: f32,
    /// Maximum stack depth for push/pop operations.
    pub max_stack_depth: usize,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            default_step: DEFAULT_STEP,
            default_angle: DEFAULT_ANGLE,
            max_stack_depth: 1024,
        }
    }
}

/// Interprets L-System output to build a [`PlantSkeleton`].
#[derive(Clone, Debug)]
pub struct TurtleInterpreter {
    op_map: HashMap<char, TurtleOp>,
    config: TurtleConfig,
}

impl Default for TurtleInterpreter {
    /// Default configuration with the standard symbols registered.
    fn default() -> Self {
        let mut interpreter = Self::new(TurtleConfig::default());
        interpreter.populate_standard_symbols();
        interpreter
    }
}

impl TurtleInterpreter {
    /// Creates a new interpreter with the given configuration and an empty symbol map.
    pub fn new(config: TurtleConfig) -> Self {
        Self {
            op_map: HashMap::new(),
            config,
        }
    }

    /// Replaces the entire symbol-to-operation map in one step (builder pattern).
    pub fn with_map(mut self, map: HashMap<char, TurtleOp>) -> Self {
        self.op_map = map;
        self
    }

    /// Binds `symbol` to `op`, replacing any previous binding.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        self.op_map.insert(symbol, op);
    }

    /// The operation bound to `symbol`, [`TurtleOp::Ignore`] if there is none.
    pub fn op(&self, symbol: char) -> TurtleOp {
        self.op_map.get(&symbol).copied().unwrap_or(TurtleOp::Ignore)
    }

    /// The configuration used by [`interpret`](Self::interpret).
    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: TurtleConfig) {
        self.config = config;
    }

    /// Registers the conventional bracketed L-System symbols.
    ///
    /// See the crate README for the full symbol table.
    pub fn populate_standard_symbols(&mut self) {
        let mappings = [
            // Movement
            ('F', TurtleOp::Draw),
            ('f', TurtleOp::Move),
            // Rotation
            ('+', TurtleOp::Turn(1.0)),
            ('-', TurtleOp::Turn(-1.0)),
            ('&', TurtleOp::Pitch(1.0)),
            ('^', TurtleOp::Pitch(-1.0)),
            ('\\', TurtleOp::Roll(1.0)),
            ('/', TurtleOp::Roll(-1.0)),
            ('|', TurtleOp::TurnAround),
            // Flowers
            ('*', TurtleOp::Marker),
            // Flow
            ('[', TurtleOp::Push),
            (']', TurtleOp::Pop),
        ];

        for (sym, op) in mappings {
            self.set_op(sym, op);
        }
    }

    /// Walks `symbols` and returns branches and markers.
    pub fn build_skeleton(&self, symbols: &str) -> Result<PlantSkeleton, TurtleError> {
        let mut skeleton = PlantSkeleton::new();
        self.interpret(symbols, true, &mut skeleton)?;
        Ok(skeleton)
    }

    /// Walks `symbols` and returns only the branches.
    pub fn build_branches(&self, symbols: &str) -> Result<Vec<Branch>, TurtleError> {
        let mut skeleton = PlantSkeleton::new();
        self.interpret(symbols, false, &mut skeleton)?;
        Ok(skeleton.branches)
    }

    /// Executes `symbols` left to right, appending geometry to `out`.
    ///
    /// The turtle starts at the origin in the canonical frame (see [`TurtleState`]) with an
    /// empty branch stack. Markers are only recorded when `collect_markers` is set; branches
    /// are identical either way.
    ///
    /// # Push / Pop
    ///
    /// `[` saves a full copy of the turtle onto a stack and `]` replaces the turtle with the
    /// most recent copy, so sibling branches start from the same point.
    ///
    /// # Errors
    ///
    /// The walk stops at the first `]` with nothing to pop ([`TurtleError::UnbalancedPop`])
    /// or the first `[` beyond `max_stack_depth` ([`TurtleError::StackOverflow`]). Whatever
    /// was emitted before that point stays in `out`. States still on the stack at the end of
    /// the string are dropped.
    pub fn interpret(
        &self,
        symbols: &str,
        collect_markers: bool,
        out: &mut PlantSkeleton,
    ) -> Result<(), TurtleError> {
        self.interpret_with(&self.config, symbols, collect_markers, out)
    }

    /// [`interpret`](Self::interpret) under `config` instead of the stored configuration.
    pub(crate) fn interpret_with(
        &self,
        config: &TurtleConfig,
        symbols: &str,
        collect_markers: bool,
        out: &mut PlantSkeleton,
    ) -> Result<(), TurtleError> {
        let mut turtle = TurtleState::default();
        let mut stack: Vec<TurtleState> = Vec::new();
        let step = config.default_step;
        let angle = config.default_angle.to_radians();

        for (index, sym) in symbols.chars().enumerate() {
            match self.op(sym) {
                TurtleOp::Draw => {
                    let start = turtle.position;
                    turtle.move_forward(step);
                    out.add_branch(Branch::new(start, turtle.position));
                }
                TurtleOp::Move => turtle.move_forward(step),
                TurtleOp::Turn(s) => turtle.turn(angle * s),
                TurtleOp::Pitch(s) => turtle.pitch(angle * s),
                TurtleOp::Roll(s) => turtle.roll(angle * s),
                TurtleOp::TurnAround => turtle.turn(PI),
                TurtleOp::Marker => {
                    if collect_markers {
                        out.add_marker(Marker {
                            position: turtle.position,
                            tag: sym.to_string(),
                        });
                    }
                }
                TurtleOp::Push => {
                    if stack.len() >= config.max_stack_depth {
                        return Err(TurtleError::StackOverflow {
                            index,
                            limit: config.max_stack_depth,
                        });
                    }
                    stack.push(turtle.clone());
                }
                TurtleOp::Pop => match stack.pop() {
                    Some(saved) => turtle = saved,
                    None => return Err(TurtleError::UnbalancedPop { index }),
                },
                TurtleOp::Ignore => {}
            }
        }

        if !stack.is_empty() {
            debug!(open = stack.len(), "walk ended with unclosed branches");
        }
        debug!(
            branches = out.branches.len(),
            markers = out.markers.len(),
            "turtle walk complete"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const EPS: f32 = 1e-5;

    #[test]
    fn unbound_symbols_are_ignored() {
        let interpreter = TurtleInterpreter::new(TurtleConfig::default());
        let skeleton = interpreter.build_skeleton("F+[*]AB").unwrap();
        assert!(skeleton.branches.is_empty());
        assert!(skeleton.markers.is_empty());
    }

    #[test]
    fn move_does_not_draw() {
        let interpreter = TurtleInterpreter::default();
        let branches = interpreter.build_branches("fF").unwrap();
        assert_eq!(branches.len(), 1);
        assert!(branches[0].start.abs_diff_eq(Vec3::Z, EPS));
        assert!(branches[0].end.abs_diff_eq(Vec3::Z * 2.0, EPS));
    }

    #[test]
    fn step_comes_from_config() {
        let interpreter = TurtleInterpreter::new(TurtleConfig {
            default_step: 2.5,
            ..Default::default()
        })
        .with_map(HashMap::from([('X', TurtleOp::Draw)]));
        let branches = interpreter.build_branches("XF").unwrap();
        assert_eq!(branches.len(), 1);
        assert!((branches[0].length() - 2.5).abs() < EPS);
    }

    #[test]
    fn turn_around_reverses_heading() {
        let interpreter = TurtleInterpreter::default();
        let branches = interpreter.build_branches("F|F").unwrap();
        assert!(branches[1].end.abs_diff_eq(Vec3::ZERO, EPS));
    }

    #[test]
    fn unbalanced_pop_keeps_partial_output() {
        let interpreter = TurtleInterpreter::default();
        let mut out = PlantSkeleton::new();
        let err = interpreter.interpret("FF]F", true, &mut out).unwrap_err();
        assert_eq!(err, TurtleError::UnbalancedPop { index: 2 });
        assert_eq!(out.branches.len(), 2);
    }

    #[test]
    fn stack_limit_is_enforced() {
        let mut interpreter = TurtleInterpreter::default();
        interpreter.set_config(TurtleConfig {
            max_stack_depth: 2,
            ..Default::default()
        });
        assert!(interpreter.build_skeleton("[[]]").is_ok());
        assert_eq!(
            interpreter.build_skeleton("F[[[").unwrap_err(),
            TurtleError::StackOverflow { index: 3, limit: 2 }
        );
    }

    #[test]
    fn leftover_pushes_are_tolerated() {
        let interpreter = TurtleInterpreter::default();
        let skeleton = interpreter.build_skeleton("F[+F[-F").unwrap();
        assert_eq!(skeleton.branches.len(), 3);
    }
}
