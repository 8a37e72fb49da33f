//! Content held by an open puzzle, hacking or reading modal.

use lastbell_core::content::{HackChallenge, MathPuzzle};
use lastbell_core::enums::GamePhase;
use lastbell_core::state::ModalView;

#[derive(Debug, Clone, PartialEq)]
pub enum ActiveModal {
    Puzzle(MathPuzzle),
    Hacking(HackChallenge),
    Reading(String),
}

impl ActiveModal {
    pub fn phase(&self) -> GamePhase {
        match self {
            ActiveModal::Puzzle(_) => GamePhase::Puzzle,
            ActiveModal::Hacking(_) => GamePhase::Hacking,
            ActiveModal::Reading(_) => GamePhase::Reading,
        }
    }

    /// Frontend view. Answers stay inside the simulation.
    pub fn view(&self) -> ModalView {
        match self {
            ActiveModal::Puzzle(p) => ModalView::Puzzle {
                question: p.question.clone(),
                hint: p.hint.clone(),
            },
            ActiveModal::Hacking(h) => ModalView::Hacking {
                title: h.title.clone(),
                code: h.code.clone(),
                options: h.options.clone(),
                description: h.description.clone(),
            },
            ActiveModal::Reading(text) => ModalView::Reading { text: text.clone() },
        }
    }
}
