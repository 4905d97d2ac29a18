//! Selection state machine
//!
//! `Idle → Single → Paired`, capped at two items. A pair opens the
//! comparison; removing either item closes it again.


/// Items chosen for comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Single(usize),
    /// Two distinct items, in the order they were picked
    Paired(usize, usize),
}

/// Result of a selection event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Item added to the comparison set
    Selected,
    /// Item was already selected and has been removed
    Deselected,
    /// Two items are already selected; nothing changed
    Rejected,
    /// Detail panel opened for the item
    Expanded,
    /// Detail panel for the item closed
    Collapsed,
}

impl Selection {
    /// Toggle `index` in the comparison set
    pub fn toggle(self, index: usize) -> (Selection, SelectOutcome) {
        match self {
            Selection::Idle => (Selection::Single(index), SelectOutcome::Selected),
            Selection::Single(a) if a == index => (Selection::Idle, SelectOutcome::Deselected),
            Selection::Single(a) => (Selection::Paired(a, index), SelectOutcome::Selected),
            Selection::Paired(a, b) if a == index => {
                (Selection::Single(b), SelectOutcome::Deselected)
            }
            Selection::Paired(a, b) if b == index => {
                (Selection::Single(a), SelectOutcome::Deselected)
            }
            paired @ Selection::Paired(..) => (paired, SelectOutcome::Rejected),
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        match *self {
            Selection::Idle => false,
            Selection::Single(a) => a == index,
            Selection::Paired(a, b) => a == index || b == index,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Selection::Idle => 0,
            Selection::Single(_) => 1,
            Selection::Paired(..) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Idle)
    }

    pub fn pair(&self) -> Option<(usize, usize)> {
        match *self {
            Selection::Paired(a, b) => Some((a, b)),
            _ => None,
        }
    }
}

/// Per-view selection: comparison set plus the expanded detail panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    comparison_mode: bool,
    selection: Selection,
    expanded: Option<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comparison_mode(&self) -> bool {
        self.comparison_mode
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Item whose detail panel is open (non-comparison mode only)
    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    /// Whether the side-by-side comparison is showing
    pub fn comparison_open(&self) -> bool {
        self.comparison_mode && self.selection.pair().is_some()
    }

    /// Switch comparison mode, discarding any selection or open panel
    pub fn set_comparison_mode(&mut self, enabled: bool) {
        self.comparison_mode = enabled;
        self.selection = Selection::Idle;
        self.expanded = None;
    }

    /// Handle a click on item `index`
    pub fn select(&mut self, index: usize) -> SelectOutcome {
        if self.comparison_mode {
            let (next, outcome) = self.selection.toggle(index);
            self.selection = next;
            outcome
        } else if self.expanded == Some(index) {
            self.expanded = None;
            SelectOutcome::Collapsed
        } else {
            self.expanded = Some(index);
            SelectOutcome::Expanded
        }
    }

    /// Back to idle, closing any comparison or detail panel
    pub fn clear(&mut self) {
        self.selection = Selection::Idle;
        self.expanded = None;
    }
}
