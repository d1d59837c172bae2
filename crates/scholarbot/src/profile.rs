use serde::{Deserialize, Serialize};
use tracing::info;

/// The signed-in student's profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub university: String,
    pub major: String,
    pub gpa: String,
    pub graduation_year: String,
    pub bio: String,
    pub location: String,
    pub interests: Vec<String>,
    pub achievements: Vec<String>,
}

/// Editable text fields of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Email,
    University,
    Major,
    Gpa,
    GraduationYear,
    Bio,
    Location,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("profile is not being edited")]
    NotEditing,
    #[error("profile is already being edited")]
    AlreadyEditing,
}

/// View/edit state of the profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileMode {
    Viewing,
    Editing(UserProfile),
}

/// Drives profile edits through an explicit view → edit → save/cancel cycle.
#[derive(Debug, Clone)]
pub struct ProfileEditor {
    profile: UserProfile,
    mode: ProfileMode,
}

impl ProfileEditor {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            mode: ProfileMode::Viewing,
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn mode(&self) -> &ProfileMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, ProfileMode::Editing(_))
    }

    pub fn begin_edit(&mut self) -> Result<(), ProfileError> {
        if self.is_editing() {
            return Err(ProfileError::AlreadyEditing);
        }
        self.mode = ProfileMode::Editing(self.profile.clone());
        Ok(())
    }

    pub fn set_field(
        &mut self,
        field: ProfileField,
        value: impl Into<String>,
    ) -> Result<(), ProfileError> {
        let draft = self.draft_mut()?;
        let slot = match field {
            ProfileField::Name => &mut draft.name,
            ProfileField::Email => &mut draft.email,
            ProfileField::University => &mut draft.university,
            ProfileField::Major => &mut draft.major,
            ProfileField::Gpa => &mut draft.gpa,
            ProfileField::GraduationYear => &mut draft.graduation_year,
            ProfileField::Bio => &mut draft.bio,
            ProfileField::Location => &mut draft.location,
        };
        *slot = value.into();
        Ok(())
    }

    /// Returns `false` when the interest was blank or already listed.
    pub fn add_interest(&mut self, interest: &str) -> Result<bool, ProfileError> {
        let draft = self.draft_mut()?;
        let interest = interest.trim();
        if interest.is_empty() || draft.interests.iter().any(|known| known == interest) {
            return Ok(false);
        }
        draft.interests.push(interest.to_string());
        Ok(true)
    }

    pub fn remove_interest(&mut self, interest: &str) -> Result<(), ProfileError> {
        self.draft_mut()?
            .interests
            .retain(|known| known != interest);
        Ok(())
    }

    /// Returns `false` when the achievement was blank. Duplicates are allowed.
    pub fn add_achievement(&mut self, achievement: &str) -> Result<bool, ProfileError> {
        let draft = self.draft_mut()?;
        let achievement = achievement.trim();
        if achievement.is_empty() {
            return Ok(false);
        }
        draft.achievements.push(achievement.to_string());
        Ok(true)
    }

    pub fn remove_achievement(&mut self, achievement: &str) -> Result<(), ProfileError> {
        self.draft_mut()?
            .achievements
            .retain(|known| known != achievement);
        Ok(())
    }

    pub fn save(&mut self) -> Result<&UserProfile, ProfileError> {
        match std::mem::replace(&mut self.mode, ProfileMode::Viewing) {
            ProfileMode::Editing(draft) => {
                self.profile = draft;
                info!(user = %self.profile.id, "profile updated");
                Ok(&self.profile)
            }
            ProfileMode::Viewing => Err(ProfileError::NotEditing),
        }
    }

    pub fn cancel(&mut self) -> Result<(), ProfileError> {
        if !self.is_editing() {
            return Err(ProfileError::NotEditing);
        }
        self.mode = ProfileMode::Viewing;
        Ok(())
    }

    fn draft_mut(&mut self) -> Result<&mut UserProfile, ProfileError> {
        match &mut self.mode {
            ProfileMode::Editing(draft) => Ok(draft),
            ProfileMode::Viewing => Err(ProfileError::NotEditing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> ProfileEditor {
        ProfileEditor::new(UserProfile {
            id: "1".to_string(),
            name: "Alex Johnson".to_string(),
            interests: vec!["Research".to_string()],
            ..UserProfile::default()
        })
    }

    #[test]
    fn edits_require_edit_mode() {
        let mut editor = editor();
        assert_eq!(
            editor.add_interest("Robotics"),
            Err(ProfileError::NotEditing)
        );
        assert_eq!(editor.save().map(|_| ()), Err(ProfileError::NotEditing));
        assert_eq!(editor.cancel(), Err(ProfileError::NotEditing));
    }

    #[test]
    fn save_applies_the_draft() {
        let mut editor = editor();
        editor.begin_edit().expect("enter edit mode");
        assert_eq!(editor.begin_edit(), Err(ProfileError::AlreadyEditing));
        editor
            .set_field(ProfileField::Major, "Computer Science")
            .expect("field set");
        assert_eq!(editor.add_interest("  Robotics "), Ok(true));
        assert_eq!(editor.add_interest("Robotics"), Ok(false));
        assert_eq!(editor.add_interest("   "), Ok(false));
        assert_eq!(editor.add_achievement("Dean's List"), Ok(true));
        assert_eq!(editor.add_achievement("Dean's List"), Ok(true));
        editor.remove_interest("Research").expect("removed");

        let saved = editor.save().expect("saved").clone();
        assert_eq!(saved.major, "Computer Science");
        assert_eq!(saved.interests, vec!["Robotics".to_string()]);
        assert_eq!(saved.achievements.len(), 2);
        assert_eq!(editor.mode(), &ProfileMode::Viewing);
    }

    #[test]
    fn cancel_discards_the_draft() {
        let mut editor = editor();
        editor.begin_edit().expect("enter edit mode");
        editor
            .set_field(ProfileField::Name, "Someone Else")
            .expect("field set");
        editor.cancel().expect("cancelled");
        assert_eq!(editor.profile().name, "Alex Johnson");
        assert!(!editor.is_editing());
    }
}
