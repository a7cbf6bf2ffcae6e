//! Status enums for BEACON entities.
//!
//! All enums serialize to lowercase strings to match the wire protocol
//! consumed by agent clients and dashboards.

use serde::{Deserialize, Serialize};

/// Working status reported by an agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// Default when a status update omits the field.
    #[default]
    Active,
    Idle,
    Busy,
    Blocked,
    Offline,
}

/// Lifecycle status of a research item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ResearchStatus {
    #[default]
    Ongoing,
    Completed,
    Paused,
    Blocked,
}

/// What kind of improvement a proposal suggests. Uninterpreted by the core;
/// carried through for dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ProposalKind {
    Skill,
    Tool,
    Model,
    Upgrade,
}

/// Proposal priority. Uninterpreted by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ProposalPriority {
    Low,
    Medium,
    High,
    Critical,
}

/// Review status of a proposal.
///
/// Approved/Rejected exist in the data model but no mutation on this write
/// surface transitions them; the trigger is external.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Direction of a vote on a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Up,
    Down,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_serialize_lowercase() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&AgentStatus::Busy)?, "\"busy\"");
        assert_eq!(serde_json::to_string(&ResearchStatus::Ongoing)?, "\"ongoing\"");
        assert_eq!(serde_json::to_string(&ProposalStatus::Pending)?, "\"pending\"");
        assert_eq!(serde_json::to_string(&VoteChoice::Up)?, "\"up\"");
        Ok(())
    }

    #[test]
    fn defaults_match_protocol() {
        assert_eq!(AgentStatus::default(), AgentStatus::Active);
        assert_eq!(ResearchStatus::default(), ResearchStatus::Ongoing);
        assert_eq!(ProposalStatus::default(), ProposalStatus::Pending);
    }

    #[test]
    fn proposal_kind_roundtrip() -> Result<(), serde_json::Error> {
        for kind in [
            ProposalKind::Skill,
            ProposalKind::Tool,
            ProposalKind::Model,
            ProposalKind::Upgrade,
        ] {
            let json = serde_json::to_string(&kind)?;
            let back: ProposalKind = serde_json::from_str(&json)?;
            assert_eq!(back, kind);
        }
        Ok(())
    }
}
