use learn_core::model::{Achievement, Percent, ProgressRecord, SectionId, XpGain};
use learn_core::scoring;

use super::service::ProgressService;
use crate::error::LearningFlowError;

/// Result of finishing a flashcard round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardOutcome {
    pub score: Percent,
    /// Passed rounds move on to the section quiz.
    pub passed: bool,
    /// XP granted for a pass; `None` for a failed round.
    pub xp: Option<XpGain>,
}

/// Result of finishing a section quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizOutcome {
    pub xp: XpGain,
    pub newly_completed: bool,
    /// Unlocked achievements in catalog order, to be shown one at a time.
    pub unlocked: Vec<Achievement>,
}

/// Result of finishing the final test.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalTestOutcome {
    pub xp: XpGain,
    pub unlocked: Vec<Achievement>,
}

impl ProgressService {
    /// Award flashcard XP for a passed round.
    ///
    /// Every passed round earns the flat reward again.
    ///
    /// # Errors
    ///
    /// Returns `LearningFlowError::UnknownSection` if the section is not in the catalog.
    pub async fn finish_flashcards(
        &self,
        record: &mut ProgressRecord,
        section_id: &SectionId,
        score: Percent,
    ) -> Result<FlashcardOutcome, LearningFlowError> {
        let reward = self.section_reward(section_id)?;

        let xp = match scoring::flashcard_xp(reward, score) {
            Some(amount) => Some(self.add_xp(record, amount).await),
            None => None,
        };

        Ok(FlashcardOutcome {
            score,
            passed: xp.is_some(),
            xp,
        })
    }

    /// Award quiz XP, complete the section, then evaluate achievements.
    ///
    /// # Errors
    ///
    /// Returns `LearningFlowError::UnknownSection` if the section is not in the catalog.
    pub async fn finish_section_quiz(
        &self,
        record: &mut ProgressRecord,
        section_id: &SectionId,
        score: Percent,
    ) -> Result<QuizOutcome, LearningFlowError> {
        let reward = self.section_reward(section_id)?;

        let xp = self.add_xp(record, scoring::quiz_xp(reward, score)).await;
        let newly_completed = self
            .complete_section(record, section_id.clone(), score)
            .await;
        let unlocked = self.check_achievements(record).await;

        Ok(QuizOutcome {
            xp,
            newly_completed,
            unlocked,
        })
    }

    /// Store the final test score, award its XP, then evaluate achievements.
    ///
    /// Retakes overwrite the score and earn XP again. Whether the test is
    /// available is up to the caller (see `Catalog::all_sections_completed`).
    pub async fn finish_final_test(
        &self,
        record: &mut ProgressRecord,
        score: Percent,
    ) -> FinalTestOutcome {
        record.record_final_test(score);
        let xp = self.add_xp(record, scoring::final_test_xp(score)).await;
        let unlocked = self.check_achievements(record).await;
        FinalTestOutcome { xp, unlocked }
    }

    fn section_reward(&self, section_id: &SectionId) -> Result<u32, LearningFlowError> {
        self.catalog
            .section(section_id)
            .map(|section| section.xp_reward)
            .ok_or_else(|| LearningFlowError::UnknownSection(section_id.clone()))
    }
}
