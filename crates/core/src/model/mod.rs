mod accessibility;
mod concept;
mod ids;
mod skill;
mod tier;

pub use accessibility::{
    AccessibilitySettings, AccessibilitySettingsDraft, AccessibilitySettingsError, ColorBlindness,
    FontFamily, ReadingAid, Theme,
};
pub use concept::{Concept, ConceptError, Question, TieredQuestions};
pub use ids::ConceptId;
pub use skill::{
    Skill, SkillLevel, SkillNode, SkillNodeState, SkillTree, SkillTreeError, SkillUpdate,
};
pub use tier::{Tier, TierError};
