//! Committees: members of the residents' committee.

use crate::types::CommitteeMember;
use crate::wire::{self, WireDecode};
use concierge_core::payload::{ListPayload, PayloadError};
use concierge_core::resource::{Resource, ResourceAction, ResourceState, Slices};
use concierge_macros::Operation;
use serde::Serialize;
use serde_json::Value;

/// Successful committee operations
#[derive(Operation, Clone, Debug, PartialEq)]
#[operation(name = "CommitteeOperation")]
pub enum CommitteeSuccess {
    /// A member was added
    CreateMember(CommitteeMember),
    /// The member list
    FetchMembers(ListPayload<CommitteeMember>),
    /// One member in detail
    FetchMember(CommitteeMember),
    /// A member was edited
    UpdateMember(CommitteeMember),
    /// A member was removed
    DeleteMember,
}

/// Selection slots of the committees domain
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CommitteeSelections {
    /// Member on the detail screen
    pub member: Option<CommitteeMember>,
}

/// Committees resource
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Committees;

impl Resource for Committees {
    const NAME: &'static str = "committees";
    const COLLECTION_KEY: &'static str = "members";
    type Entity = CommitteeMember;
    type Selections = CommitteeSelections;
    type Secondary = ();
    type Success = CommitteeSuccess;

    fn commit(success: CommitteeSuccess, slices: &mut Slices<'_, Self>) {
        match success {
            CommitteeSuccess::FetchMembers(list) => slices.replace_primary(list),
            CommitteeSuccess::CreateMember(member)
            | CommitteeSuccess::FetchMember(member)
            | CommitteeSuccess::UpdateMember(member) => slices.select(|s| &mut s.member, member),
            CommitteeSuccess::DeleteMember => {},
        }
    }
}

impl WireDecode for Committees {
    fn decode(operation: CommitteeOperation, payload: Value) -> Result<CommitteeSuccess, PayloadError> {
        Ok(match operation {
            CommitteeOperation::CreateMember => CommitteeSuccess::CreateMember(wire::entity(payload)?),
            CommitteeOperation::FetchMembers => CommitteeSuccess::FetchMembers(wire::list(payload, Self::COLLECTION_KEY)?),
            CommitteeOperation::FetchMember => CommitteeSuccess::FetchMember(wire::entity(payload)?),
            CommitteeOperation::UpdateMember => CommitteeSuccess::UpdateMember(wire::entity(payload)?),
            CommitteeOperation::DeleteMember => CommitteeSuccess::DeleteMember,
        })
    }
}

/// State of the committees domain
pub type CommitteeState = ResourceState<Committees>;

/// Events accepted by the committees domain
pub type CommitteeAction = ResourceAction<Committees>;
