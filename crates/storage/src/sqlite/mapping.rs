use lesson_core::model::{Skill, SkillTree};

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Encode the tree as the JSON array `[{id, label, level, unlocked}, ...]`.
pub(crate) fn encode_skill_tree(tree: &SkillTree) -> Result<String, StorageError> {
    serde_json::to_string(tree.skills()).map_err(ser)
}

pub(crate) fn decode_skill_tree(raw: &str) -> Result<SkillTree, StorageError> {
    let skills: Vec<Skill> = serde_json::from_str(raw).map_err(ser)?;
    SkillTree::from_persisted(skills).map_err(ser)
}

pub(crate) fn bool_to_i64(value: bool) -> i64 {
    i64::from(value)
}

pub(crate) fn i64_to_bool(field: &'static str, value: i64) -> Result<bool, StorageError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StorageError::Serialization(format!(
            "invalid {field}: {other}"
        ))),
    }
}
