//! Which view kind is mounted in which panel slot.

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;

/// Panel slots of the host layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewSlot {
    Main,
    SecondaryTop,
    SecondaryBottom,
}

impl ViewSlot {
    pub const ALL: [ViewSlot; 3] = [ViewSlot::Main, ViewSlot::SecondaryTop, ViewSlot::SecondaryBottom];

    fn index(self) -> usize {
        match self {
            ViewSlot::Main => 0,
            ViewSlot::SecondaryTop => 1,
            ViewSlot::SecondaryBottom => 2,
        }
    }
}

/// Kinds of view that can occupy a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewKind {
    #[serde(rename = "earth")]
    Planetary,
    #[serde(rename = "orbit")]
    Orbital,
    #[serde(rename = "raysGround")]
    GroundRays,
    #[serde(rename = "raysSpace")]
    SpaceRays,
    #[serde(rename = "nothing")]
    None,
}

impl ViewKind {
    /// Whether the kind is repainted on every animation tick.
    pub fn is_continuous(self) -> bool {
        matches!(self, ViewKind::Planetary | ViewKind::Orbital)
    }
}

/// Slot-to-kind mapping. Every kind other than [`ViewKind::None`] appears in
/// at most one slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LayoutRepr", into = "LayoutRepr")]
pub struct ViewLayoutState {
    slots: [ViewKind; 3],
}

/// Wire form of [`ViewLayoutState`], one named field per slot.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRepr {
    pub main: ViewKind,
    pub secondary_top: ViewKind,
    pub secondary_bottom: ViewKind,
}

impl Default for ViewLayoutState {
    fn default() -> Self {
        Self {
            slots: [ViewKind::Planetary, ViewKind::Orbital, ViewKind::GroundRays],
        }
    }
}

impl ViewLayoutState {
    /// Build a layout, rejecting duplicated kinds.
    pub fn new(main: ViewKind, secondary_top: ViewKind, secondary_bottom: ViewKind) -> Result<Self> {
        let layout = Self { slots: [main, secondary_top, secondary_bottom] };
        layout.validate()?;
        Ok(layout)
    }

    /// Kind mounted in `slot`.
    pub fn get(&self, slot: ViewSlot) -> ViewKind {
        self.slots[slot.index()]
    }

    /// Slot currently holding `kind`, if any.
    pub fn slot_of(&self, kind: ViewKind) -> Option<ViewSlot> {
        if kind == ViewKind::None {
            return None;
        }
        ViewSlot::ALL.into_iter().find(|s| self.get(*s) == kind)
    }

    /// `(slot, kind)` pairs in slot order.
    pub fn entries(&self) -> impl Iterator<Item = (ViewSlot, ViewKind)> + '_ {
        ViewSlot::ALL.into_iter().map(|s| (s, self.get(s)))
    }

    /// Put `kind` into `slot`.
    ///
    /// If `kind` already sits in another slot, the two slots exchange
    /// contents, so the previous occupant of `slot` moves to the slot `kind`
    /// vacated. Returns the slots whose contents changed.
    pub fn assign(&mut self, slot: ViewSlot, kind: ViewKind) -> Vec<ViewSlot> {
        let previous = self.get(slot);
        if previous == kind {
            return Vec::new();
        }
        match self.slot_of(kind) {
            Some(from) => {
                self.slots[from.index()] = previous;
                self.slots[slot.index()] = kind;
                vec![slot, from]
            }
            None => {
                self.slots[slot.index()] = kind;
                vec![slot]
            }
        }
    }

    fn validate(&self) -> Result<()> {
        for (i, a) in self.slots.iter().enumerate() {
            if *a == ViewKind::None {
                continue;
            }
            if self.slots[i + 1..].contains(a) {
                return Err(Error::InvalidLayout(format!("{a:?} appears in more than one slot")));
            }
        }
        Ok(())
    }
}

impl TryFrom<LayoutRepr> for ViewLayoutState {
    type Error = Error;

    fn try_from(repr: LayoutRepr) -> Result<Self> {
        ViewLayoutState::new(repr.main, repr.secondary_top, repr.secondary_bottom)
    }
}

impl From<ViewLayoutState> for LayoutRepr {
    fn from(layout: ViewLayoutState) -> Self {
        LayoutRepr {
            main: layout.slots[0],
            secondary_top: layout.slots[1],
            secondary_bottom: layout.slots[2],
        }
    }
}
