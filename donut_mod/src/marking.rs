// Copyright 2025 the Donut Mod Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The marking bridge: turning matched sectors into host marking commands.
//!
//! Commands are plain values. They are built by the gesture layer, applied once to a
//! [`Markable`] host and discarded; nothing here holds on to host state.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use core::borrow::Borrow;
use core::fmt;

use smallvec::SmallVec;

/// The stable identity of a sector (its category key in the host data).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectorKey(Arc<str>);

impl SectorKey {
    /// Creates a key.
    pub fn new(key: &str) -> Self {
        Self(Arc::from(key))
    }

    /// The key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectorKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for SectorKey {
    fn from(key: String) -> Self {
        Self(Arc::from(key))
    }
}

impl Borrow<str> for SectorKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a mark request combines with the host's existing marking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkMode {
    /// The given sectors become the whole marking.
    Replace,
    /// The given sectors are toggled into (or added to) the current marking.
    ToggleOrAdd,
}

/// The operation a [`MarkingCommand`] performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkingOperation {
    /// See [`MarkMode::Replace`].
    Replace,
    /// See [`MarkMode::ToggleOrAdd`].
    ToggleOrAdd,
    /// Remove every mark.
    ClearAll,
}

/// The host's marking capability.
pub trait Markable {
    /// Marks the rows of the given sectors.
    fn mark(&mut self, sectors: &[SectorKey], mode: MarkMode);
    /// Clears all marking in the data view.
    fn clear_marking(&mut self);
}

/// A marking change, applied once to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkingCommand {
    /// Mark a batch of sectors.
    Mark {
        /// How the batch combines with the current marking.
        mode: MarkMode,
        /// The sectors, in layout order.
        sectors: SmallVec<[SectorKey; 4]>,
    },
    /// Remove every mark.
    ClearAll,
}

impl MarkingCommand {
    /// The operation this command performs.
    pub fn operation(&self) -> MarkingOperation {
        match self {
            Self::Mark {
                mode: MarkMode::Replace,
                ..
            } => MarkingOperation::Replace,
            Self::Mark {
                mode: MarkMode::ToggleOrAdd,
                ..
            } => MarkingOperation::ToggleOrAdd,
            Self::ClearAll => MarkingOperation::ClearAll,
        }
    }

    /// The sectors this command marks; empty for [`MarkingCommand::ClearAll`].
    pub fn sectors(&self) -> &[SectorKey] {
        match self {
            Self::Mark { sectors, .. } => sectors.as_slice(),
            Self::ClearAll => &[],
        }
    }

    /// Applies the command to the host.
    pub fn apply(&self, host: &mut dyn Markable) {
        log::debug!(
            "applying {:?} to {} sector(s)",
            self.operation(),
            self.sectors().len()
        );
        match self {
            Self::Mark { mode, sectors } => host.mark(sectors, *mode),
            Self::ClearAll => host.clear_marking(),
        }
    }
}

/// The command for a direct click on one sector.
///
/// Holding ctrl adds the sector to (or toggles it in) the current marking; otherwise it
/// replaces the marking.
pub fn select(sector: &SectorKey, ctrl_key_held: bool) -> MarkingCommand {
    let mode = if ctrl_key_held {
        MarkMode::ToggleOrAdd
    } else {
        MarkMode::Replace
    };
    MarkingCommand::Mark {
        mode,
        sectors: smallvec::smallvec![sector.clone()],
    }
}

/// The command for a rectangle drag, or `None` when nothing was matched.
///
/// An empty drag leaves the marking alone; it never clears it.
pub fn resolve_rectangle_selection<'a>(
    matched: impl IntoIterator<Item = &'a SectorKey>,
) -> Option<MarkingCommand> {
    let sectors: SmallVec<[SectorKey; 4]> = matched.into_iter().cloned().collect();
    if sectors.is_empty() {
        return None;
    }
    Some(MarkingCommand::Mark {
        mode: MarkMode::ToggleOrAdd,
        sectors,
    })
}

/// The command for a click outside every sector.
pub fn clear_all() -> MarkingCommand {
    MarkingCommand::ClearAll
}
