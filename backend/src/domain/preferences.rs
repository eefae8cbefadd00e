//! Travel habit preferences attached to a user profile.

use serde::{Deserialize, Serialize};

/// The user never does this.
pub const PREFERENCE_NEVER: i32 = 0;
/// The user occasionally does this.
pub const PREFERENCE_OCCASIONALLY: i32 = 1;
/// The user regularly does this.
pub const PREFERENCE_REGULARLY: i32 = 2;

/// Validation failures for [`Preferences`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreferencesValidationError {
    /// Smoking code outside `0..=2`.
    #[error("smoking preference is out of bounds \"{0}\"")]
    SmokingOutOfBounds(i32),
    /// Music code outside `0..=2`.
    #[error("music preference is out of bounds \"{0}\"")]
    MusicOutOfBounds(i32),
    /// Conversation code outside `0..=2`.
    #[error("conversation preference is out of bounds \"{0}\"")]
    ConversationOutOfBounds(i32),
}

impl PreferencesValidationError {
    /// Name of the offending field as clients see it.
    pub fn field(&self) -> &'static str {
        match self {
            Self::SmokingOutOfBounds(_) => "preferences.smoking",
            Self::MusicOutOfBounds(_) => "preferences.music",
            Self::ConversationOutOfBounds(_) => "preferences.conversation",
        }
    }

    /// Machine-readable failure code.
    pub fn code(&self) -> &'static str {
        "out_of_bounds"
    }
}

/// Smoking, music and conversation habits, each coded as never (0),
/// occasionally (1) or regularly (2).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Smoking habit code.
    pub smoking: i32,
    /// Conversation habit code.
    pub conversation: i32,
    /// Music habit code.
    pub music: i32,
}

fn in_range(value: i32) -> bool {
    (PREFERENCE_NEVER..=PREFERENCE_REGULARLY).contains(&value)
}

impl Preferences {
    /// Check every habit is a known code.
    ///
    /// Fields are checked as smoking, music, then conversation; the first
    /// failure wins.
    pub fn validate(&self) -> Result<(), PreferencesValidationError> {
        if !in_range(self.smoking) {
            return Err(PreferencesValidationError::SmokingOutOfBounds(self.smoking));
        }
        if !in_range(self.music) {
            return Err(PreferencesValidationError::MusicOutOfBounds(self.music));
        }
        if !in_range(self.conversation) {
            return Err(PreferencesValidationError::ConversationOutOfBounds(
                self.conversation,
            ));
        }
        Ok(())
    }
}

/// Partial preferences update; each present field replaces the stored one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PreferencesPatch {
    /// Replacement smoking code.
    pub smoking: Option<i32>,
    /// Replacement conversation code.
    pub conversation: Option<i32>,
    /// Replacement music code.
    pub music: Option<i32>,
}

impl PreferencesPatch {
    /// Merge into `current`, starting from all-never when nothing is stored.
    pub fn apply(self, current: Option<Preferences>) -> Preferences {
        let mut merged = current.unwrap_or_default();
        if let Some(smoking) = self.smoking {
            merged.smoking = smoking;
        }
        if let Some(conversation) = self.conversation {
            merged.conversation = conversation;
        }
        if let Some(music) = self.music {
            merged.music = music;
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn prefs(smoking: i32, conversation: i32, music: i32) -> Preferences {
        Preferences {
            smoking,
            conversation,
            music,
        }
    }

    #[rstest]
    fn every_in_range_combination_is_valid() {
        for smoking in 0..=2 {
            for conversation in 0..=2 {
                for music in 0..=2 {
                    assert!(prefs(smoking, conversation, music).validate().is_ok());
                }
            }
        }
    }

    #[rstest]
    #[case(prefs(3, 0, 0), PreferencesValidationError::SmokingOutOfBounds(3))]
    #[case(prefs(0, 0, -1), PreferencesValidationError::MusicOutOfBounds(-1))]
    #[case(prefs(0, 7, 0), PreferencesValidationError::ConversationOutOfBounds(7))]
    fn out_of_range_field_is_rejected(
        #[case] preferences: Preferences,
        #[case] expected: PreferencesValidationError,
    ) {
        assert_eq!(preferences.validate(), Err(expected));
    }

    #[rstest]
    fn check_order_is_smoking_music_conversation() {
        let err = prefs(9, 9, 9).validate().expect_err("all invalid");
        assert_eq!(err, PreferencesValidationError::SmokingOutOfBounds(9));

        let err = prefs(0, 9, 9).validate().expect_err("music and conversation invalid");
        assert_eq!(err, PreferencesValidationError::MusicOutOfBounds(9));
    }

    #[rstest]
    fn message_quotes_the_value() {
        let err = PreferencesValidationError::MusicOutOfBounds(5);
        assert_eq!(err.to_string(), "music preference is out of bounds \"5\"");
        assert_eq!(err.field(), "preferences.music");
    }

    #[rstest]
    fn patch_zero_clears_stored_value() {
        let patch = PreferencesPatch {
            smoking: Some(PREFERENCE_NEVER),
            ..PreferencesPatch::default()
        };
        let merged = patch.apply(Some(prefs(2, 1, 2)));
        assert_eq!(merged, prefs(0, 1, 2));
    }

    #[rstest]
    fn patch_without_stored_value_starts_from_never() {
        let patch = PreferencesPatch {
            music: Some(PREFERENCE_REGULARLY),
            ..PreferencesPatch::default()
        };
        assert_eq!(patch.apply(None), prefs(0, 0, 2));
    }
}
