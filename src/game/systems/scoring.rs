use tracing::debug;

use crate::game::camp::CampId;
use crate::game::events::GameEvent;
use crate::game::goal::Adoption;
use crate::game::player::PlayerId;
use crate::game::state::Game;

/// Update the capture state of the goal at `index` against every camp that
/// contains it. Camps are scanned in creation order; scoring stops the scan.
/// A goal outside every camp keeps its capture and timer untouched.
pub fn adopt(game: &mut Game, index: usize, events: &mut Vec<GameEvent>) {
    let Some(goal) = game.entities[index].as_goal_mut() else {
        return;
    };
    let position = goal.body.position;

    let mut scored = None;
    for camp in &game.camps {
        if !camp.contains(position) {
            continue;
        }
        match goal.adopt(camp.id) {
            Adoption::Captured(camp_id) => events.push(GameEvent::GoalCaptured {
                goal: goal.id(),
                camp: camp_id,
            }),
            Adoption::Held(_) => {}
            Adoption::Scored(camp_id) => {
                scored = Some((camp_id, camp.player));
                break;
            }
        }
    }

    if let Some((camp, player)) = scored {
        score(game, index, camp, player, events);
    }
}

/// Credit `player` and respawn the goal at a random position
fn score(game: &mut Game, index: usize, camp: CampId, player: PlayerId, events: &mut Vec<GameEvent>) {
    let Some(owner) = game.players.iter_mut().find(|p| p.id == player) else {
        return;
    };
    owner.score();
    let total = owner.score;

    let position = game.torus.random_position(&mut game.rng);
    if let Some(goal) = game.entities[index].as_goal_mut() {
        goal.reset(position);
        debug!(
            "Goal {} scored for player {} in camp {} (score {})",
            goal.id(),
            player,
            camp,
            total
        );
        events.push(GameEvent::GoalScored {
            goal: goal.id(),
            camp,
            player,
            score: total,
        });
    }
}
