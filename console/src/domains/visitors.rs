//! Visitors: gate entries and their approval flow.

use crate::types::Visitor;
use crate::wire::{self, WireDecode};
use concierge_core::payload::{ListPayload, PayloadError};
use concierge_core::resource::{Resource, ResourceAction, ResourceState, Slices};
use concierge_macros::Operation;
use serde::Serialize;
use serde_json::Value;

/// Successful visitor operations
#[derive(Operation, Clone, Debug, PartialEq)]
pub enum VisitorSuccess {
    /// A visitor entry was created
    CreateVisitor(Visitor),
    /// The visitor list
    FetchVisitors(ListPayload<Visitor>),
    /// One visitor in detail
    FetchVisitor(Visitor),
    /// A visitor entry was edited
    UpdateVisitor(Visitor),
    /// A visitor entry was removed
    DeleteVisitor,
    /// The resident let the visitor in
    ApproveVisitor(Visitor),
    /// The resident turned the visitor away
    RejectVisitor(Visitor),
    /// The visitor left the premises
    CheckOutVisitor(Visitor),
}

/// Selection slots of the visitors domain
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VisitorSelections {
    /// Visitor on the detail screen
    pub visitor: Option<Visitor>,
}

/// Visitors resource
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Visitors;

impl Resource for Visitors {
    const NAME: &'static str = "visitors";
    const COLLECTION_KEY: &'static str = "visitors";
    type Entity = Visitor;
    type Selections = VisitorSelections;
    type Secondary = ();
    type Success = VisitorSuccess;

    fn commit(success: VisitorSuccess, slices: &mut Slices<'_, Self>) {
        match success {
            VisitorSuccess::FetchVisitors(list) => slices.replace_primary(list),
            VisitorSuccess::CreateVisitor(visitor)
            | VisitorSuccess::FetchVisitor(visitor)
            | VisitorSuccess::UpdateVisitor(visitor)
            | VisitorSuccess::ApproveVisitor(visitor)
            | VisitorSuccess::RejectVisitor(visitor)
            | VisitorSuccess::CheckOutVisitor(visitor) => slices.select(|s| &mut s.visitor, visitor),
            VisitorSuccess::DeleteVisitor => {},
        }
    }
}

impl WireDecode for Visitors {
    fn decode(operation: VisitorOperation, payload: Value) -> Result<VisitorSuccess, PayloadError> {
        Ok(match operation {
            VisitorOperation::CreateVisitor => VisitorSuccess::CreateVisitor(wire::entity(payload)?),
            VisitorOperation::FetchVisitors => VisitorSuccess::FetchVisitors(wire::list(payload, Self::COLLECTION_KEY)?),
            VisitorOperation::FetchVisitor => VisitorSuccess::FetchVisitor(wire::entity(payload)?),
            VisitorOperation::UpdateVisitor => VisitorSuccess::UpdateVisitor(wire::entity(payload)?),
            VisitorOperation::DeleteVisitor => VisitorSuccess::DeleteVisitor,
            VisitorOperation::ApproveVisitor => VisitorSuccess::ApproveVisitor(wire::entity(payload)?),
            VisitorOperation::RejectVisitor => VisitorSuccess::RejectVisitor(wire::entity(payload)?),
            VisitorOperation::CheckOutVisitor => VisitorSuccess::CheckOutVisitor(wire::entity(payload)?),
        })
    }
}

/// State of the visitors domain
pub type VisitorState = ResourceState<Visitors>;

/// Events accepted by the visitors domain
pub type VisitorAction = ResourceAction<Visitors>;
