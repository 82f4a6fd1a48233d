use katorga_core::{Command, Event, FigureSizes, Position, Rules, Size};
use katorga_system_collection::Collection;
use katorga_world::{self as world, query, World};

fn new_world() -> World {
    let sizes = FigureSizes {
        player: Size::new(32, 32),
        monster: Size::new(40, 40),
        coin: Size::new(16, 16),
    };
    World::new(Rules::default(), sizes).expect("default rules are valid")
}

fn apply_all(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn collect(world: &mut World) -> Vec<Event> {
    let mut commands = Vec::new();
    Collection.handle(
        &query::player(world),
        &query::monsters(world),
        &query::coins(world),
        &mut commands,
    );
    apply_all(world, commands)
}

#[test]
fn simultaneous_pickups_all_score() {
    let mut world = new_world();
    let _ = apply_all(
        &mut world,
        vec![
            Command::SpawnMonster {
                position: Position::new(0.0, 0.0),
                heading: katorga_core::Direction::Right,
            },
            Command::SpawnCoin {
                position: Position::new(330.0, 330.0),
            },
            Command::SpawnCoin {
                position: Position::new(10.0, 10.0),
            },
            Command::SpawnCoin {
                position: Position::new(500.0, 100.0),
            },
        ],
    );

    let events = collect(&mut world);

    let pickups = events
        .iter()
        .filter(|event| matches!(event, Event::CoinCollected { .. }))
        .count();
    assert_eq!(pickups, 2);
    assert_eq!(query::coin_count(&world), 1);
    assert_eq!(query::player(&world).score, 1);
    assert_eq!(query::monsters(&world)[0].score, 1);
}

#[test]
fn collecting_again_finds_nothing() {
    let mut world = new_world();
    let _ = apply_all(
        &mut world,
        vec![Command::SpawnCoin {
            position: Position::new(320.0, 320.0),
        }],
    );

    assert_eq!(collect(&mut world).len(), 1);
    assert!(collect(&mut world).is_empty());
}
