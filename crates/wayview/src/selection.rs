//! The two-click endpoint selection machine.
//!
//! Every map click assigns the clicked position to whichever endpoint is
//! awaited next, then flips to the other one. The machine cycles forever;
//! a computed route does not reset it, so re-clicking just replaces
//! endpoints one at a time.

use crate::types::Coordinate;

/// Which endpoint a click assigns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

#[derive(Clone, Debug, Default)]
pub struct SelectionState {
    next: NextClick,
    start: Option<Coordinate>,
    end: Option<Coordinate>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum NextClick {
    #[default]
    AwaitingStart,
    AwaitingEnd,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `position` to the awaited endpoint and reports which one
    /// that was, so the caller can replace the matching marker and input
    /// field. Any position is accepted; bounds are not this layer's
    /// problem.
    pub fn select(&mut self, position: Coordinate) -> Endpoint {
        match self.next {
            NextClick::AwaitingStart => {
                self.start = Some(position);
                self.next = NextClick::AwaitingEnd;
                Endpoint::Start
            }
            NextClick::AwaitingEnd => {
                self.end = Some(position);
                self.next = NextClick::AwaitingStart;
                Endpoint::End
            }
        }
    }

    pub fn start(&self) -> Option<Coordinate> {
        self.start
    }

    pub fn end(&self) -> Option<Coordinate> {
        self.end
    }

    pub fn awaiting_start(&self) -> bool {
        self.next == NextClick::AwaitingStart
    }
}
