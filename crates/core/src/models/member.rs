use serde::{Deserialize, Serialize};

/// Club roles. Teamsters may create blocks but only with reasons flagged
/// `teamster_usable`; administrators are unrestricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Member,
    Teamster,
    Administrator,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Member => "member",
            MemberRole::Teamster => "teamster",
            MemberRole::Administrator => "administrator",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "member" => Some(MemberRole::Member),
            "teamster" => Some(MemberRole::Teamster),
            "administrator" => Some(MemberRole::Administrator),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, MemberRole::Administrator)
    }

    pub fn is_teamster(&self) -> bool {
        matches!(self, MemberRole::Teamster)
    }
}
