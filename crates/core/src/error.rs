use thiserror::Error;

use crate::catalog::CatalogError;
use crate::model::{AccessibilitySettingsError, ConceptError, SkillTreeError, TierError};
use crate::quiz::QuizError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Concept(#[from] ConceptError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Tier(#[from] TierError),
    #[error(transparent)]
    SkillTree(#[from] SkillTreeError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    AccessibilitySettings(#[from] AccessibilitySettingsError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, SkillTree, Tier};

    #[test]
    fn domain_errors_convert_into_umbrella() {
        let err: Error = Question::new("q", ["a"], 1, "f").unwrap_err().into();
        assert!(matches!(err, Error::Concept(_)));

        let err: Error = SkillTree::from_persisted(Vec::new()).unwrap_err().into();
        assert!(matches!(err, Error::SkillTree(SkillTreeError::Empty)));

        let err: Error = "expert".parse::<Tier>().unwrap_err().into();
        assert!(matches!(err, Error::Tier(TierError::Unknown(_))));
    }
}
