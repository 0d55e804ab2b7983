//! Complaints: resident complaints and their comment threads.

use crate::types::{Complaint, ComplaintComment};
use crate::wire::{self, WireDecode};
use concierge_core::payload::{ListPayload, PayloadError};
use concierge_core::resource::{Resource, ResourceAction, ResourceState, Slices};
use concierge_macros::Operation;
use serde::Serialize;
use serde_json::Value;

/// Successful complaint operations
#[derive(Operation, Clone, Debug, PartialEq)]
pub enum ComplaintSuccess {
    /// A complaint was filed
    CreateComplaint(Complaint),
    /// The complaint list
    FetchComplaints(ListPayload<Complaint>),
    /// One complaint in detail
    FetchComplaint(Complaint),
    /// A complaint was edited
    UpdateComplaint(Complaint),
    /// A complaint was marked resolved
    ResolveComplaint(Complaint),
    /// A complaint was removed
    DeleteComplaint,
    /// A comment was posted
    AddComment(ComplaintComment),
    /// The comment thread of a complaint
    FetchComments(ListPayload<ComplaintComment>),
}

/// Selection slots of the complaints domain
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ComplaintSelections {
    /// Complaint on the detail screen
    pub complaint: Option<Complaint>,
    /// Comment just posted
    pub comment: Option<ComplaintComment>,
}

/// Sub-resource lists of the complaints domain
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ComplaintSecondary {
    /// Comment thread last fetched
    pub comments: Vec<ComplaintComment>,
}

/// Complaints resource
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complaints;

impl Resource for Complaints {
    const NAME: &'static str = "complaints";
    const COLLECTION_KEY: &'static str = "complaints";
    type Entity = Complaint;
    type Selections = ComplaintSelections;
    type Secondary = ComplaintSecondary;
    type Success = ComplaintSuccess;

    fn commit(success: ComplaintSuccess, slices: &mut Slices<'_, Self>) {
        match success {
            ComplaintSuccess::FetchComplaints(list) => slices.replace_primary(list),
            ComplaintSuccess::FetchComments(list) => slices.replace_secondary(|s| &mut s.comments, list),
            ComplaintSuccess::CreateComplaint(complaint)
            | ComplaintSuccess::FetchComplaint(complaint)
            | ComplaintSuccess::UpdateComplaint(complaint)
            | ComplaintSuccess::ResolveComplaint(complaint) => slices.select(|s| &mut s.complaint, complaint),
            ComplaintSuccess::AddComment(comment) => slices.select(|s| &mut s.comment, comment),
            ComplaintSuccess::DeleteComplaint => {},
        }
    }
}

impl WireDecode for Complaints {
    fn decode(operation: ComplaintOperation, payload: Value) -> Result<ComplaintSuccess, PayloadError> {
        Ok(match operation {
            ComplaintOperation::CreateComplaint => ComplaintSuccess::CreateComplaint(wire::entity(payload)?),
            ComplaintOperation::FetchComplaints => {
                ComplaintSuccess::FetchComplaints(wire::list(payload, Self::COLLECTION_KEY)?)
            },
            ComplaintOperation::FetchComplaint => ComplaintSuccess::FetchComplaint(wire::entity(payload)?),
            ComplaintOperation::UpdateComplaint => ComplaintSuccess::UpdateComplaint(wire::entity(payload)?),
            ComplaintOperation::ResolveComplaint => ComplaintSuccess::ResolveComplaint(wire::entity(payload)?),
            ComplaintOperation::DeleteComplaint => ComplaintSuccess::DeleteComplaint,
            ComplaintOperation::AddComment => ComplaintSuccess::AddComment(wire::entity(payload)?),
            ComplaintOperation::FetchComments => ComplaintSuccess::FetchComments(wire::list(payload, "comments")?),
        })
    }
}

/// State of the complaints domain
pub type ComplaintState = ResourceState<Complaints>;

/// Events accepted by the complaints domain
pub type ComplaintAction = ResourceAction<Complaints>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use serde_json::json;

    fn complaint(status: &str) -> Complaint {
        Complaint {
            id: "c1".to_string(),
            title: "Lift out of order".to_string(),
            status: Some(status.to_string()),
            ..Complaint::default()
        }
    }

    #[test]
    fn resolve_replaces_selected_complaint() {
        let state = ComplaintState::new()
            .next(ComplaintAction::success(ComplaintSuccess::FetchComplaint(complaint("open"))))
            .next(ComplaintAction::request(ComplaintOperation::ResolveComplaint))
            .next(ComplaintAction::success(ComplaintSuccess::ResolveComplaint(complaint("resolved"))));

        assert_eq!(
            state.selections().complaint.as_ref().and_then(|c| c.status.as_deref()),
            Some("resolved")
        );
    }

    #[test]
    fn comment_goes_to_comment_slot_not_thread() {
        let comment = ComplaintComment {
            id: "k1".to_string(),
            complaint_id: Some("c1".to_string()),
            message: "Technician called".to_string(),
            ..ComplaintComment::default()
        };

        let state = ComplaintState::new()
            .next(ComplaintAction::success(ComplaintSuccess::FetchComplaint(complaint("open"))))
            .next(ComplaintAction::success(ComplaintSuccess::AddComment(comment.clone())));

        assert_eq!(state.selections().comment, Some(comment));
        assert_eq!(state.selections().complaint, Some(complaint("open")));
        assert!(state.secondary().comments.is_empty());
    }

    #[test]
    fn decode_comment_thread() {
        let success = Complaints::decode(
            ComplaintOperation::FetchComments,
            json!([{ "_id": "k1", "message": "Noted", "createdAt": "2025-01-03T10:00:00Z" }]),
        )
        .unwrap();

        let state = ComplaintState::new().next(ComplaintAction::success(success));
        assert_eq!(state.secondary().comments.len(), 1);
        assert!(state.secondary().comments[0].created_at.is_some());
    }
}
