use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::model::ids::ConceptId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SkillTreeError {
    #[error("skill tree must contain at least one skill")]
    Empty,

    #[error("duplicate skill id: {0}")]
    DuplicateId(ConceptId),

    #[error("unknown skill id: {0}")]
    UnknownSkill(ConceptId),

    #[error("invalid skill level: {0}")]
    InvalidLevel(u8),
}

//
// ─── SKILL LEVEL ───────────────────────────────────────────────────────────────
//

/// Progress recorded for a single concept.
///
/// Persisted as its integer value (`0`, `1` or `3`), so a gap is left between
/// practiced and mastered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SkillLevel {
    #[default]
    Untouched,
    /// Answered correctly at the standard or remedial tier.
    Practiced,
    /// Answered the advanced mastery check correctly.
    Mastered,
}

impl SkillLevel {
    #[must_use]
    pub fn value(self) -> u8 {
        match self {
            SkillLevel::Untouched => 0,
            SkillLevel::Practiced => 1,
            SkillLevel::Mastered => 3,
        }
    }

    /// Experience points contributed by this level.
    #[must_use]
    pub fn xp(self) -> u32 {
        u32::from(self.value()) * 100
    }
}

impl TryFrom<u8> for SkillLevel {
    type Error = SkillTreeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SkillLevel::Untouched),
            1 => Ok(SkillLevel::Practiced),
            3 => Ok(SkillLevel::Mastered),
            other => Err(SkillTreeError::InvalidLevel(other)),
        }
    }
}

impl From<SkillLevel> for u8 {
    fn from(level: SkillLevel) -> Self {
        level.value()
    }
}

//
// ─── SKILL ─────────────────────────────────────────────────────────────────────
//

/// Persisted progress entry for one concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: ConceptId,
    pub label: String,
    pub level: SkillLevel,
    pub unlocked: bool,
}

impl Skill {
    #[must_use]
    pub fn new(id: ConceptId, label: impl Into<String>, unlocked: bool) -> Self {
        Self {
            id,
            label: label.into(),
            level: SkillLevel::Untouched,
            unlocked,
        }
    }

    #[must_use]
    pub fn is_mastered(&self) -> bool {
        self.level == SkillLevel::Mastered
    }
}

/// Display state of a skill node on the concept map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillNodeState {
    Locked,
    Unlocked,
    Mastered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillNode {
    pub id: ConceptId,
    pub label: String,
    pub level: SkillLevel,
    pub state: SkillNodeState,
}

/// A single progress write produced by answering a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillUpdate {
    /// Correct at the standard or remedial tier.
    Practiced(ConceptId),
    /// Correct at the advanced tier.
    Mastered(ConceptId),
}

impl SkillUpdate {
    #[must_use]
    pub fn concept_id(&self) -> &ConceptId {
        match self {
            SkillUpdate::Practiced(id) | SkillUpdate::Mastered(id) => id,
        }
    }
}

//
// ─── SKILL TREE ────────────────────────────────────────────────────────────────
//

/// Ordered per-concept progress record, one entry per catalog concept.
///
/// Entries are never added or removed once built; only `level` and `unlocked`
/// change, and `level` never decreases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillTree {
    skills: Vec<Skill>,
}

impl SkillTree {
    /// Fresh tree for a catalog: all untouched, only the first concept unlocked.
    #[must_use]
    pub fn default_for(catalog: &Catalog) -> Self {
        let skills = catalog
            .concepts()
            .iter()
            .enumerate()
            .map(|(index, concept)| {
                Skill::new(concept.id().clone(), concept.skill_label(), index == 0)
            })
            .collect();
        Self { skills }
    }

    /// Rehydrate a tree from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `SkillTreeError::Empty` for an empty snapshot and
    /// `SkillTreeError::DuplicateId` if an id appears twice.
    pub fn from_persisted(skills: Vec<Skill>) -> Result<Self, SkillTreeError> {
        if skills.is_empty() {
            return Err(SkillTreeError::Empty);
        }
        let mut seen = HashSet::with_capacity(skills.len());
        for skill in &skills {
            if !seen.insert(skill.id.as_str()) {
                return Err(SkillTreeError::DuplicateId(skill.id.clone()));
            }
        }
        Ok(Self { skills })
    }

    /// True when the tree holds exactly the catalog's concept ids, in order.
    #[must_use]
    pub fn matches_catalog(&self, catalog: &Catalog) -> bool {
        self.skills.len() == catalog.len()
            && self
                .skills
                .iter()
                .zip(catalog.concepts())
                .all(|(skill, concept)| &skill.id == concept.id())
    }

    #[must_use]
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    #[must_use]
    pub fn into_skills(self) -> Vec<Skill> {
        self.skills
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Skill> {
        self.skills.iter().find(|skill| skill.id == *id)
    }

    fn position(&self, id: &str) -> Result<usize, SkillTreeError> {
        self.skills
            .iter()
            .position(|skill| skill.id == *id)
            .ok_or_else(|| SkillTreeError::UnknownSkill(ConceptId::new(id)))
    }

    /// Raise the concept to at least `Practiced`.
    ///
    /// Returns `true` if the level changed.
    ///
    /// # Errors
    ///
    /// Returns `SkillTreeError::UnknownSkill` if the id is not in the tree.
    pub fn record_practice(&mut self, id: &str) -> Result<bool, SkillTreeError> {
        let index = self.position(id)?;
        let skill = &mut self.skills[index];
        if skill.level >= SkillLevel::Practiced {
            return Ok(false);
        }
        skill.level = SkillLevel::Practiced;
        Ok(true)
    }

    /// Mark the concept mastered and unlock the next concept in order.
    ///
    /// Unlocking leaves the next concept's level untouched. Returns the id of
    /// the concept that became unlocked by this call, if any.
    ///
    /// # Errors
    ///
    /// Returns `SkillTreeError::UnknownSkill` if the id is not in the tree.
    pub fn record_mastery(&mut self, id: &str) -> Result<Option<ConceptId>, SkillTreeError> {
        let index = self.position(id)?;
        self.skills[index].level = SkillLevel::Mastered;

        let Some(next) = self.skills.get_mut(index + 1) else {
            return Ok(None);
        };
        if next.unlocked {
            return Ok(None);
        }
        next.unlocked = true;
        Ok(Some(next.id.clone()))
    }

    /// Apply a progress write.
    ///
    /// # Errors
    ///
    /// Returns `SkillTreeError::UnknownSkill` if the concept is not in the tree.
    pub fn apply(&mut self, update: &SkillUpdate) -> Result<(), SkillTreeError> {
        match update {
            SkillUpdate::Practiced(id) => self.record_practice(id.as_str()).map(|_| ()),
            SkillUpdate::Mastered(id) => self.record_mastery(id.as_str()).map(|_| ()),
        }
    }

    /// Total experience: 100 points per level, summed over all concepts.
    #[must_use]
    pub fn total_xp(&self) -> u32 {
        self.skills.iter().map(|skill| skill.level.xp()).sum()
    }

    #[must_use]
    pub fn mastered_count(&self) -> usize {
        self.skills.iter().filter(|skill| skill.is_mastered()).count()
    }

    /// Node states for the concept map.
    #[must_use]
    pub fn nodes(&self) -> Vec<SkillNode> {
        self.skills
            .iter()
            .map(|skill| SkillNode {
                id: skill.id.clone(),
                label: skill.label.clone(),
                level: skill.level,
                state: if !skill.unlocked {
                    SkillNodeState::Locked
                } else if skill.is_mastered() {
                    SkillNodeState::Mastered
                } else {
                    SkillNodeState::Unlocked
                },
            })
            .collect()
    }
}
