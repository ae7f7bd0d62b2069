use keypad_chain::{
    Button, ChainSolver, Direction, DoorCode, Error, KeypadLayout, PathTable, Position,
};

const EXAMPLE_CODES: [&str; 5] = ["029A", "980A", "179A", "456A", "379A"];

fn replay(start: Position, moves: &str) -> Option<Vec<Position>> {
    let mut visited = Vec::new();
    let mut cur_pos = start;
    for key in moves.chars() {
        cur_pos = cur_pos.neighbor(Direction::from_key(key)?)?;
        visited.push(cur_pos);
    }

    Some(visited)
}

#[test]
fn move_options_are_minimal_and_avoid_gap() {
    for layout in [KeypadLayout::new_numeric(), KeypadLayout::new_directional()] {
        let table = PathTable::build(&layout).unwrap();
        for from in layout.buttons() {
            for to in layout.buttons() {
                let options = table.options(from.key(), to.key()).unwrap();
                assert!(!options.is_empty());

                let manhattan = from.pos().col().abs_diff(to.pos().col())
                    + from.pos().row().abs_diff(to.pos().row());
                for option in options {
                    assert_eq!(option.chars().count(), manhattan + 1);
                    assert!(option.ends_with('A'));

                    let moves = &option[..option.len() - 1];
                    let visited = replay(from.pos(), moves).unwrap();
                    assert!(visited.iter().all(|pos| *pos != layout.gap()));
                    assert_eq!(visited.last().copied().unwrap_or(from.pos()), to.pos());
                }
            }
        }
    }
}

#[test]
fn self_transition_is_single_activation() {
    let table = PathTable::build(&KeypadLayout::new_directional()).unwrap();
    for key in ['^', 'v', '<', '>', 'A'] {
        assert_eq!(table.options(key, key).unwrap(), ["A"]);
    }
}

#[test]
fn layout_validation_rejects_conflicts() {
    let buttons = Vec::from([
        Button::new('A', Position::new(0, 0)),
        Button::new('B', Position::new(0, 0)),
    ]);
    assert_eq!(
        KeypadLayout::new(buttons, Position::new(1, 1)).err(),
        Some(Error::DuplicateButtonPosition('A', 'B', Position::new(0, 0)))
    );

    let buttons = Vec::from([Button::new('A', Position::new(1, 1))]);
    assert_eq!(
        KeypadLayout::new(buttons, Position::new(1, 1)).err(),
        Some(Error::ButtonOnGap('A', Position::new(1, 1)))
    );
}

#[test]
fn zero_depth_cost_is_sequence_length() {
    let mut solver = ChainSolver::for_standard_pads().unwrap();
    for moves in ["A", "<A", ">^^A", "vvvA", "<vA<AA>>^A"] {
        assert_eq!(solver.moves_min_keys_n(moves, 0).unwrap(), moves.len());
    }
}

#[test]
fn cost_never_decreases_with_depth() {
    let mut solver = ChainSolver::for_standard_pads().unwrap();
    for moves in ["<A", ">^^A", "v<<A", "<vA>^A"] {
        let mut last_keys_n = 0;
        for depth in 0..8 {
            let keys_n = solver.moves_min_keys_n(moves, depth).unwrap();
            assert!(keys_n >= last_keys_n);
            last_keys_n = keys_n;
        }
    }
}

#[test]
fn cost_splits_over_activation_segments() {
    let mut solver = ChainSolver::for_standard_pads().unwrap();
    let moves = "<A^A>^^AvvvA";
    let segments = ["<A", "^A", ">^^A", "vvvA"];
    for depth in 1..6 {
        let whole_keys_n = solver.moves_min_keys_n(moves, depth).unwrap();
        let split_keys_n = segments
            .iter()
            .map(|segment| solver.moves_min_keys_n(segment, depth).unwrap())
            .sum::<usize>();
        assert_eq!(whole_keys_n, split_keys_n);
    }
}

#[test]
fn warmed_cache_matches_fresh_cache() {
    let mut warmed_solver = ChainSolver::for_standard_pads().unwrap();
    for code in EXAMPLE_CODES {
        warmed_solver.min_keys_n(code, 2).unwrap();
    }

    for code in EXAMPLE_CODES {
        let mut fresh_solver = ChainSolver::for_standard_pads().unwrap();
        assert_eq!(
            warmed_solver.min_keys_n(code, 2).unwrap(),
            fresh_solver.min_keys_n(code, 2).unwrap()
        );
    }
}

#[test]
fn example_codes_at_depth_two() {
    let mut solver = ChainSolver::for_standard_pads().unwrap();
    let expected_keys_n = [68, 60, 68, 64, 64];
    let mut sum_of_complexities = 0;
    for (code, expected) in EXAMPLE_CODES.iter().zip(expected_keys_n) {
        let min_keys_n = solver.min_keys_n(code, 2).unwrap();
        assert_eq!(min_keys_n, expected);
        sum_of_complexities += min_keys_n * DoorCode::new(code).number();
    }

    assert_eq!(sum_of_complexities, 126384);
}

#[test]
fn example_codes_at_depth_twenty_five() {
    let mut solver = ChainSolver::for_standard_pads().unwrap();
    let mut sum_of_complexities = 0;
    for code in EXAMPLE_CODES {
        sum_of_complexities += solver.min_keys_n(code, 25).unwrap() * DoorCode::new(code).number();
    }

    assert_eq!(sum_of_complexities, 154115708116294);
}

#[test]
fn malformed_codes_are_rejected() {
    let mut solver = ChainSolver::for_standard_pads().unwrap();
    assert_eq!(
        solver.min_keys_n("029", 2),
        Err(Error::NotEndedWithActivate("029".to_string()))
    );
    assert_eq!(solver.min_keys_n("0x9A", 2), Err(Error::InvalidKey('x')));
}
