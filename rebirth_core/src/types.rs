//! Core types for the rebirth calculator

use serde::{Deserialize, Serialize};

/// Number of sequential rebirth stages
pub const STAGE_COUNT: usize = 5;

/// One of the four stats tracked per stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatField {
    /// Constitution
    Con,
    /// Wisdom
    Wis,
    /// Dexterity
    Dex,
    /// Agility, always derived by the engine
    Agi,
}

impl StatField {
    /// Get all stat fields in display order
    pub fn all() -> &'static [StatField] {
        &[StatField::Con, StatField::Wis, StatField::Dex, StatField::Agi]
    }
}

/// A stat the user is allowed to edit directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditableStat {
    Con,
    Wis,
    Dex,
}

impl EditableStat {
    /// Get all editable stats
    pub fn all() -> &'static [EditableStat] {
        &[EditableStat::Con, EditableStat::Wis, EditableStat::Dex]
    }
}

impl From<EditableStat> for StatField {
    fn from(stat: EditableStat) -> Self {
        match stat {
            EditableStat::Con => StatField::Con,
            EditableStat::Wis => StatField::Wis,
            EditableStat::Dex => StatField::Dex,
        }
    }
}

/// Four stat values for a stage (display, real or applied)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatSet {
    pub con: f64,
    pub wis: f64,
    pub dex: f64,
    pub agi: f64,
}

impl StatSet {
    pub fn new(con: f64, wis: f64, dex: f64, agi: f64) -> Self {
        StatSet { con, wis, dex, agi }
    }

    /// Get the value of a single field
    pub fn get(&self, field: StatField) -> f64 {
        match field {
            StatField::Con => self.con,
            StatField::Wis => self.wis,
            StatField::Dex => self.dex,
            StatField::Agi => self.agi,
        }
    }

    /// Sum of all four fields, accumulated con → wis → dex → agi
    pub fn total(&self) -> f64 {
        self.con + self.wis + self.dex + self.agi
    }

    /// Apply `f` to every field
    pub fn map(&self, mut f: impl FnMut(f64) -> f64) -> StatSet {
        StatSet {
            con: f(self.con),
            wis: f(self.wis),
            dex: f(self.dex),
            agi: f(self.agi),
        }
    }

    /// Combine two sets field by field
    pub fn zip_with(&self, other: &StatSet, mut f: impl FnMut(f64, f64) -> f64) -> StatSet {
        StatSet {
            con: f(self.con, other.con),
            wis: f(self.wis, other.wis),
            dex: f(self.dex, other.dex),
            agi: f(self.agi, other.agi),
        }
    }
}

/// The three user-edited base stats of a stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    #[serde(default)]
    pub con: u32,
    #[serde(default)]
    pub wis: u32,
    #[serde(default)]
    pub dex: u32,
}

/// Caller-supplied input for a single stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageInput {
    /// Character level reached in this stage (>= 1)
    pub level: u32,
    pub con: u32,
    pub wis: u32,
    pub dex: u32,
}

impl StageInput {
    pub fn new(level: u32, con: u32, wis: u32, dex: u32) -> Self {
        StageInput { level, con, wis, dex }
    }

    /// Stage at `level` with no points spent
    pub fn blank(level: u32) -> Self {
        StageInput::new(level, 0, 0, 0)
    }

    pub fn from_base(level: u32, stats: BaseStats) -> Self {
        StageInput::new(level, stats.con, stats.wis, stats.dex)
    }

    pub fn base_stats(&self) -> BaseStats {
        BaseStats {
            con: self.con,
            wis: self.wis,
            dex: self.dex,
        }
    }

    /// Get an editable stat
    pub fn stat(&self, stat: EditableStat) -> u32 {
        match stat {
            EditableStat::Con => self.con,
            EditableStat::Wis => self.wis,
            EditableStat::Dex => self.dex,
        }
    }

    /// Sum of the user-edited stats
    pub fn edited_total(&self) -> u64 {
        self.con as u64 + self.wis as u64 + self.dex as u64
    }
}

impl Default for StageInput {
    fn default() -> Self {
        StageInput::blank(1)
    }
}
