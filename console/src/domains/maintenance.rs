//! Maintenance: monthly bills and the payments recorded against them.

use crate::types::{Bill, Payment};
use crate::wire::{self, WireDecode};
use concierge_core::payload::{ListPayload, PayloadError};
use concierge_core::resource::{Resource, ResourceAction, ResourceState, Slices};
use concierge_macros::Operation;
use serde::Serialize;
use serde_json::Value;

/// Successful maintenance operations
#[derive(Operation, Clone, Debug, PartialEq)]
#[operation(name = "MaintenanceOperation")]
pub enum BillSuccess {
    /// A bill was drafted
    CreateBill(Bill),
    /// The bill list
    FetchBills(ListPayload<Bill>),
    /// One bill in detail
    FetchBill(Bill),
    /// A bill was edited
    UpdateBill(Bill),
    /// A bill was issued to residents
    PublishBill(Bill),
    /// A bill was removed
    DeleteBill,
    /// A payment was recorded
    RecordPayment(Payment),
    /// Payments of a bill
    FetchPayments(ListPayload<Payment>),
}

/// Selection slots of the maintenance domain
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BillSelections {
    /// Bill on the detail screen
    pub bill: Option<Bill>,
    /// Payment just recorded
    pub payment: Option<Payment>,
}

/// Sub-resource lists of the maintenance domain
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BillSecondary {
    /// Payments last fetched
    pub payments: Vec<Payment>,
}

/// Maintenance billing resource
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Maintenance;

impl Resource for Maintenance {
    const NAME: &'static str = "maintenance";
    const COLLECTION_KEY: &'static str = "bills";
    type Entity = Bill;
    type Selections = BillSelections;
    type Secondary = BillSecondary;
    type Success = BillSuccess;

    fn commit(success: BillSuccess, slices: &mut Slices<'_, Self>) {
        match success {
            BillSuccess::FetchBills(list) => slices.replace_primary(list),
            BillSuccess::FetchPayments(list) => slices.replace_secondary(|s| &mut s.payments, list),
            BillSuccess::CreateBill(bill)
            | BillSuccess::FetchBill(bill)
            | BillSuccess::UpdateBill(bill)
            | BillSuccess::PublishBill(bill) => slices.select(|s| &mut s.bill, bill),
            BillSuccess::RecordPayment(payment) => slices.select(|s| &mut s.payment, payment),
            BillSuccess::DeleteBill => {},
        }
    }
}

impl WireDecode for Maintenance {
    fn decode(operation: MaintenanceOperation, payload: Value) -> Result<BillSuccess, PayloadError> {
        Ok(match operation {
            MaintenanceOperation::CreateBill => BillSuccess::CreateBill(wire::entity(payload)?),
            MaintenanceOperation::FetchBills => BillSuccess::FetchBills(wire::list(payload, Self::COLLECTION_KEY)?),
            MaintenanceOperation::FetchBill => BillSuccess::FetchBill(wire::entity(payload)?),
            MaintenanceOperation::UpdateBill => BillSuccess::UpdateBill(wire::entity(payload)?),
            MaintenanceOperation::PublishBill => BillSuccess::PublishBill(wire::entity(payload)?),
            MaintenanceOperation::DeleteBill => BillSuccess::DeleteBill,
            MaintenanceOperation::RecordPayment => BillSuccess::RecordPayment(wire::entity(payload)?),
            MaintenanceOperation::FetchPayments => BillSuccess::FetchPayments(wire::list(payload, "payments")?),
        })
    }
}

/// State of the maintenance domain
pub type MaintenanceState = ResourceState<Maintenance>;

/// Events accepted by the maintenance domain
pub type MaintenanceAction = ResourceAction<Maintenance>;
