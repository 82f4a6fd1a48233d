#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Collection system that decides who picks up which coin.

use katorga_core::{Command, FigureSnapshot};

/// Pure system that resolves coin pickups for a single tick.
#[derive(Debug, Default)]
pub struct Collection;

impl Collection {
    /// Emits one pickup per touched coin.
    ///
    /// Coins are checked in order. The player has priority: a coin touching
    /// the player goes to the player even if monsters touch it too. Otherwise
    /// the first monster in order that touches the coin takes it. Every
    /// touched coin is collected within the same tick.
    pub fn handle(
        &self,
        player: &FigureSnapshot,
        monsters: &[FigureSnapshot],
        coins: &[FigureSnapshot],
        out: &mut Vec<Command>,
    ) {
        for coin in coins {
            let collector = if player.rect.overlaps(&coin.rect) {
                Some(player.id)
            } else {
                monsters
                    .iter()
                    .find(|monster| coin.rect.overlaps(&monster.rect))
                    .map(|monster| monster.id)
            };

            if let Some(collector) = collector {
                out.push(Command::CollectCoin {
                    coin: coin.id,
                    collector,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use katorga_core::{FigureId, FigureKind, Intent, Position, Rect, Size};

    fn snapshot(id: u32, kind: FigureKind, x: f32, y: f32, size: u32) -> FigureSnapshot {
        FigureSnapshot {
            id: FigureId::new(id),
            kind,
            rect: Rect::new(Position::new(x, y), Size::new(size, size)),
            score: 0,
            score_since_last_speedup: 0,
            speed: 1,
            intent: Intent::IDLE,
        }
    }

    fn collect(
        player: FigureSnapshot,
        monsters: &[FigureSnapshot],
        coins: &[FigureSnapshot],
    ) -> Vec<Command> {
        let mut commands = Vec::new();
        Collection.handle(&player, monsters, coins, &mut commands);
        commands
    }

    #[test]
    fn untouched_coins_stay() {
        let player = snapshot(0, FigureKind::Player, 100.0, 100.0, 32);
        let coin = snapshot(5, FigureKind::Coin, 200.0, 200.0, 16);
        assert!(collect(player, &[], &[coin]).is_empty());
    }

    #[test]
    fn player_beats_monster_to_shared_coin() {
        let player = snapshot(0, FigureKind::Player, 100.0, 100.0, 32);
        let monster = snapshot(1, FigureKind::Monster, 120.0, 120.0, 40);
        let coin = snapshot(5, FigureKind::Coin, 110.0, 110.0, 16);

        assert_eq!(
            collect(player, &[monster], &[coin]),
            vec![Command::CollectCoin {
                coin: coin.id,
                collector: player.id,
            }]
        );
    }

    #[test]
    fn first_monster_in_order_takes_the_coin() {
        let player = snapshot(0, FigureKind::Player, 0.0, 0.0, 32);
        let far = snapshot(1, FigureKind::Monster, 500.0, 500.0, 40);
        let near = snapshot(2, FigureKind::Monster, 300.0, 300.0, 40);
        let nearer = snapshot(3, FigureKind::Monster, 305.0, 305.0, 40);
        let coin = snapshot(9, FigureKind::Coin, 310.0, 310.0, 16);

        assert_eq!(
            collect(player, &[far, near, nearer], &[coin]),
            vec![Command::CollectCoin {
                coin: coin.id,
                collector: near.id,
            }]
        );
    }

    #[test]
    fn every_touched_coin_is_collected_in_one_tick() {
        let player = snapshot(0, FigureKind::Player, 100.0, 100.0, 32);
        let monster = snapshot(1, FigureKind::Monster, 400.0, 400.0, 40);
        let coins = [
            snapshot(5, FigureKind::Coin, 100.0, 100.0, 16),
            snapshot(6, FigureKind::Coin, 250.0, 250.0, 16),
            snapshot(7, FigureKind::Coin, 410.0, 410.0, 16),
            snapshot(8, FigureKind::Coin, 116.0, 116.0, 16),
        ];

        let collected: Vec<_> = collect(player, &[monster], &coins)
            .into_iter()
            .map(|command| match command {
                Command::CollectCoin { coin, collector } => (coin.get(), collector.get()),
                other => panic!("unexpected command {other:?}"),
            })
            .collect();
        assert_eq!(collected, vec![(5, 0), (7, 1), (8, 0)]);
    }
}
