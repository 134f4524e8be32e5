use super::{CatalogEntry, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sponsor record. Pure display data - no relation to playback beyond
/// sitting next to the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sponsor {
    pub id: String,
    pub name: String,
    pub message: String,
    pub link: String,
}

impl CatalogEntry for Sponsor {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// New-sponsor form input. An empty link falls back to the placeholder
/// anchor.
#[derive(Debug, Clone)]
pub struct SponsorDraft {
    pub name: String,
    pub message: String,
    pub link: String,
}

impl SponsorDraft {
    pub fn build(self) -> Result<Sponsor, ValidationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let message = self.message.trim().to_string();
        if message.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        let link = match self.link.trim() {
            "" => "#".to_string(),
            link => link.to_string(),
        };

        Ok(Sponsor {
            id: Uuid::new_v4().to_string(),
            name,
            message,
            link,
        })
    }
}

pub fn default_sponsors() -> Vec<Sponsor> {
    vec![
        Sponsor {
            id: "sp1".to_string(),
            name: "Casa Nova".to_string(),
            message: "Pães quentinhos o dia todo!".to_string(),
            link: "#".to_string(),
        },
        Sponsor {
            id: "sp2".to_string(),
            name: "Rooster King".to_string(),
            message: "Sábado é dia de música!".to_string(),
            link: "#".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_name_and_message() {
        let draft = SponsorDraft {
            name: "".to_string(),
            message: "Oi".to_string(),
            link: "".to_string(),
        };
        assert_eq!(draft.build(), Err(ValidationError::EmptyName));

        let draft = SponsorDraft {
            name: "Loja".to_string(),
            message: "   ".to_string(),
            link: "".to_string(),
        };
        assert_eq!(draft.build(), Err(ValidationError::EmptyMessage));
    }

    #[test]
    fn empty_link_falls_back_to_placeholder() {
        let draft = SponsorDraft {
            name: "Loja do Zé".to_string(),
            message: "Ofertas da semana".to_string(),
            link: "  ".to_string(),
        };
        let sponsor = draft.build().unwrap();
        assert_eq!(sponsor.link, "#");
    }
}
