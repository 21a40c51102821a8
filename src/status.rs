/// Run state machine: NotRunning → Running → {Lost, Won}.

use crate::collision::Resolution;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    /// Before the first start.
    #[default]
    NotRunning,
    Running,
    Lost,
    Won,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Lost | RunState::Won)
    }

    /// State after a frame whose collisions produced `resolution`.
    ///
    /// Only a running game can end.  Loss is checked first, so an enemy
    /// touching the player line on the same frame the last enemy dies is
    /// still a loss.
    pub fn after_frame(self, resolution: &Resolution) -> RunState {
        if self != RunState::Running {
            return self;
        }
        if resolution.enemy_reached_player {
            RunState::Lost
        } else if resolution.all_cleared {
            RunState::Won
        } else {
            RunState::Running
        }
    }

    /// Banner shown once the run is over.
    pub fn banner(self) -> Option<&'static str> {
        match self {
            RunState::Lost => Some("Game Over"),
            RunState::Won => Some("You Win"),
            RunState::NotRunning | RunState::Running => None,
        }
    }
}
