//! Persistence collaborator and the typed progress view on top of it.

use std::collections::{BTreeMap, BTreeSet};

use super::error::StoreError;

/// Opaque key-value persistence.
///
/// The simulation reads at run start and writes on level-up, stage clear and
/// run end. How values reach disk (if at all) is up to the implementation.
pub trait ProgressStore: Send {
    fn get_int(&self, key: &str) -> Option<i64>;
    fn set_int(&mut self, key: &str, value: i64);
    fn get_string(&self, key: &str) -> Option<String>;
    fn set_string(&mut self, key: &str, value: &str);

    /// Refreshes values from the backing medium.
    fn load(&mut self) -> Result<(), StoreError>;

    /// Flushes values to the backing medium.
    fn save(&mut self) -> Result<(), StoreError>;
}

/// Store that keeps values in memory only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryProgressStore {
    ints: BTreeMap<String, i64>,
    strings: BTreeMap<String, String>,
    saves: u32,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful [`ProgressStore::save`] calls.
    pub fn save_count(&self) -> u32 {
        self.saves
    }

    pub fn ints(&self) -> &BTreeMap<String, i64> {
        &self.ints
    }

    pub fn strings(&self) -> &BTreeMap<String, String> {
        &self.strings
    }
}

impl ProgressStore for MemoryProgressStore {
    fn get_int(&self, key: &str) -> Option<i64> {
        self.ints.get(key).copied()
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.ints.insert(key.to_owned(), value);
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.strings.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.strings.insert(key.to_owned(), value.to_owned());
    }

    fn load(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    fn save(&mut self) -> Result<(), StoreError> {
        self.saves += 1;
        Ok(())
    }
}

const KEY_COINS: &str = "coins";
const KEY_LEVEL: &str = "level";
const KEY_BEST_LEVEL: &str = "best_level";
const KEY_LAST_STAGE: &str = "last_stage";
const PREFIX_SKILL_UNLOCK: &str = "skill_unlock.";
const PREFIX_STAGE_UNLOCKED: &str = "stage_unlocked.";

/// Typed view over the persisted progress keys.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressProfile {
    pub coins: i64,
    /// Level reached in the most recent run.
    pub level: u32,
    pub best_level: u32,
    pub last_stage: Option<String>,
    skill_unlocks: BTreeMap<String, u32>,
    unlocked_stages: BTreeSet<String>,
}

impl ProgressProfile {
    /// Reads the profile for the given skill names and stage ids.
    ///
    /// Only keys for known records are read; unknown keys in the store are left alone.
    pub fn read<'a>(
        store: &dyn ProgressStore,
        skills: impl IntoIterator<Item = &'a str>,
        stages: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut profile = Self {
            coins: store.get_int(KEY_COINS).unwrap_or(0),
            level: read_u32(store, KEY_LEVEL),
            best_level: read_u32(store, KEY_BEST_LEVEL),
            last_stage: store.get_string(KEY_LAST_STAGE),
            ..Self::default()
        };
        for skill in skills {
            let unlock = read_u32(store, &format!("{PREFIX_SKILL_UNLOCK}{skill}"));
            if unlock > 0 {
                profile.skill_unlocks.insert(skill.to_owned(), unlock);
            }
        }
        for stage in stages {
            if store.get_int(&format!("{PREFIX_STAGE_UNLOCKED}{stage}")).unwrap_or(0) != 0 {
                profile.unlocked_stages.insert(stage.to_owned());
            }
        }
        profile
    }

    /// Writes every field back to the store. Does not call `save`.
    pub fn write(&self, store: &mut dyn ProgressStore) {
        store.set_int(KEY_COINS, self.coins);
        store.set_int(KEY_LEVEL, i64::from(self.level));
        store.set_int(KEY_BEST_LEVEL, i64::from(self.best_level));
        if let Some(stage) = &self.last_stage {
            store.set_string(KEY_LAST_STAGE, stage);
        }
        for (skill, unlock) in &self.skill_unlocks {
            store.set_int(&format!("{PREFIX_SKILL_UNLOCK}{skill}"), i64::from(*unlock));
        }
        for stage in &self.unlocked_stages {
            store.set_int(&format!("{PREFIX_STAGE_UNLOCKED}{stage}"), 1);
        }
    }

    pub fn skill_unlock(&self, skill: &str) -> u32 {
        self.skill_unlocks.get(skill).copied().unwrap_or(0)
    }

    /// Raises a skill's unlock level; never lowers it.
    pub fn unlock_skill(&mut self, skill: &str, level: u32) {
        let entry = self.skill_unlocks.entry(skill.to_owned()).or_insert(0);
        *entry = (*entry).max(level);
    }

    pub fn is_stage_unlocked(&self, stage: &str) -> bool {
        self.unlocked_stages.contains(stage)
    }

    pub fn unlock_stage(&mut self, stage: &str) -> bool {
        self.unlocked_stages.insert(stage.to_owned())
    }

    /// Records the level of the current run and updates the best level.
    pub fn record_level(&mut self, level: u32) {
        self.level = level;
        self.best_level = self.best_level.max(level);
    }
}

fn read_u32(store: &dyn ProgressStore, key: &str) -> u32 {
    store
        .get_int(key)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_round_trips_through_store() {
        let mut store = MemoryProgressStore::new();
        let mut profile = ProgressProfile::default();
        profile.coins = 42;
        profile.record_level(7);
        profile.record_level(3);
        profile.unlock_skill("orb", 2);
        profile.unlock_stage("crypt");
        profile.write(&mut store);

        let read = ProgressProfile::read(&store, ["orb", "slash"], ["meadow", "crypt"]);
        assert_eq!(read.coins, 42);
        assert_eq!(read.level, 3);
        assert_eq!(read.best_level, 7);
        assert_eq!(read.skill_unlock("orb"), 2);
        assert_eq!(read.skill_unlock("slash"), 0);
        assert!(read.is_stage_unlocked("crypt"));
        assert!(!read.is_stage_unlocked("meadow"));
    }

    #[test]
    fn negative_levels_read_as_zero() {
        let mut store = MemoryProgressStore::new();
        store.set_int("best_level", -4);
        let profile = ProgressProfile::read(&store, [], []);
        assert_eq!(profile.best_level, 0);
    }

    #[test]
    fn unlocks_never_decrease() {
        let mut profile = ProgressProfile::default();
        profile.unlock_skill("orb", 3);
        profile.unlock_skill("orb", 1);
        assert_eq!(profile.skill_unlock("orb"), 3);
    }
}
