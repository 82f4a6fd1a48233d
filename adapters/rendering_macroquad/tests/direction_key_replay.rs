use katorga_core::Direction;
use katorga_rendering::KeyChange;
use katorga_rendering_macroquad::DirectionKeys;

fn run_sequence(samples: &[(Direction, bool)]) -> Vec<Option<KeyChange>> {
    let mut keys = DirectionKeys::default();
    samples
        .iter()
        .map(|&(direction, down)| keys.observe(direction, down))
        .collect()
}

#[test]
fn held_key_reports_only_its_edges() {
    let samples = [
        (Direction::Left, false),
        (Direction::Left, true),
        (Direction::Left, true),
        (Direction::Left, true),
        (Direction::Left, false),
        (Direction::Left, false),
    ];
    let expected = vec![
        None,
        Some(KeyChange {
            direction: Direction::Left,
            pressed: true,
        }),
        None,
        None,
        Some(KeyChange {
            direction: Direction::Left,
            pressed: false,
        }),
        None,
    ];

    let first_run = run_sequence(&samples);
    let second_run = run_sequence(&samples);

    assert_eq!(first_run, expected);
    assert_eq!(first_run, second_run);
}

#[test]
fn keys_are_tracked_independently() {
    let mut keys = DirectionKeys::default();
    assert!(keys.observe(Direction::Up, true).is_some());
    assert!(keys.observe(Direction::Right, true).is_some());
    assert!(keys.observe(Direction::Up, true).is_none());

    assert_eq!(
        keys.observe(Direction::Up, false),
        Some(KeyChange {
            direction: Direction::Up,
            pressed: false,
        })
    );
    assert!(keys.held().is_set(Direction::Right));
    assert!(!keys.held().is_set(Direction::Up));
}
