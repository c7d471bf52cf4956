// tests/properties.rs
use glam::Vec3;
use proptest::prelude::*;
use symbios_plant::{GrammarEngine, TurtleInterpreter, TurtleState};

const EPS: f32 = 1e-4;

fn program(axiom: &str, rules: &[(char, String)]) -> String {
    let mut text = format!("axiom = {axiom}\n");
    for (sym, successor) in rules {
        text.push_str(&format!("{sym} = {successor}\n"));
    }
    text
}

/// Reference single-step rewrite, independent of the engine.
fn rewrite_once(input: &str, rules: &[(char, String)]) -> String {
    input
        .chars()
        .map(|c| {
            rules
                .iter()
                .rev()
                .find(|(sym, _)| *sym == c)
                .map_or_else(|| c.to_string(), |(_, s)| s.clone())
        })
        .collect()
}

fn rules_strategy() -> impl Strategy<Value = Vec<(char, String)>> {
    prop::collection::vec(
        (prop::sample::select(vec!['A', 'B', 'F']), "[ABF+-]{0,4}"),
        0..4,
    )
}

#[derive(Clone, Copy, Debug)]
enum Rotation {
    Turn(f32),
    Pitch(f32),
    Roll(f32),
}

fn rotation_strategy() -> impl Strategy<Value = Rotation> {
    let angle = -10.0f32..10.0;
    prop_oneof![
        angle.clone().prop_map(Rotation::Turn),
        angle.clone().prop_map(Rotation::Pitch),
        angle.prop_map(Rotation::Roll),
    ]
}

proptest! {
    #[test]
    fn depth_zero_is_axiom(axiom in "[ABF+-]{0,6}", rules in rules_strategy()) {
        let mut g = GrammarEngine::new();
        g.load_program_from_string(&program(&axiom, &rules));
        prop_assert_eq!(g.get_iteration(0), axiom.as_str());
    }

    #[test]
    fn each_depth_rewrites_the_previous(
        axiom in "[ABF+-]{1,4}",
        rules in rules_strategy(),
        n in 0usize..4,
    ) {
        let mut g = GrammarEngine::new();
        g.load_program_from_string(&program(&axiom, &rules));
        let previous = g.get_iteration(n).to_string();
        let next = g.get_iteration(n + 1).to_string();
        prop_assert_eq!(&next, &rewrite_once(&previous, &rules));
        prop_assert_eq!(g.get_iteration(n + 1), next.as_str());
    }

    #[test]
    fn no_rules_means_fixed_point(axiom in "[ABF+\\-\\[\\]]{0,8}", n in 0usize..8) {
        let mut g = GrammarEngine::new();
        g.load_program_from_string(&format!("axiom = {axiom}\n"));
        prop_assert_eq!(g.get_iteration(n), axiom.as_str());
    }

    #[test]
    fn cache_never_recomputes(a in 0usize..6, b in 0usize..6) {
        let mut g = GrammarEngine::new();
        g.load_program_from_string("axiom = A\nA = AB\nB = A\n");
        g.get_iteration(a);
        g.get_iteration(b);
        prop_assert_eq!(g.rewrite_count(), a.max(b));
    }

    #[test]
    fn frame_stays_orthonormal(ops in prop::collection::vec(rotation_strategy(), 0..64)) {
        let mut t = TurtleState::default();
        for op in ops {
            match op {
                Rotation::Turn(a) => t.turn(a),
                Rotation::Pitch(a) => t.pitch(a),
                Rotation::Roll(a) => t.roll(a),
            }
        }
        let (f, u, l) = (t.forward(), t.up(), t.left());
        prop_assert!(f.dot(u).abs() < EPS);
        prop_assert!(f.dot(l).abs() < EPS);
        prop_assert!(u.dot(l).abs() < EPS);
        for v in [f, u, l] {
            prop_assert!((v.length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn bracketed_excursion_returns_home(body in "[Ff+&^/|*\\\\-]{0,12}") {
        let interpreter = TurtleInterpreter::default();
        let branches = interpreter.build_branches(&format!("[{body}]F")).unwrap();
        let last = branches.last().copied().unwrap();
        prop_assert_eq!(last.start, Vec3::ZERO);
        prop_assert!(last.end.abs_diff_eq(Vec3::Z, EPS));
    }

    #[test]
    fn bracketed_excursion_restores_frame(body in "[Ff+&^/|*\\\\-]{0,12}") {
        // `+` and `&` rotate about up and left, so a leaked frame changes where this F lands.
        let interpreter = TurtleInterpreter::default();
        let branches = interpreter.build_branches(&format!("[{body}]+&F")).unwrap();
        let expected = interpreter.build_branches("+&F").unwrap()[0];
        prop_assert_eq!(branches.last().copied().unwrap(), expected);
    }
}
