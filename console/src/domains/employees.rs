//! Employees: building staff.

use crate::types::Employee;
use crate::wire::{self, WireDecode};
use concierge_core::payload::{ListPayload, PayloadError};
use concierge_core::resource::{Resource, ResourceAction, ResourceState, Slices};
use concierge_macros::Operation;
use serde::Serialize;
use serde_json::Value;

/// Successful employee operations
#[derive(Operation, Clone, Debug, PartialEq)]
pub enum EmployeeSuccess {
    /// A staff member was hired
    CreateEmployee(Employee),
    /// The staff list
    FetchEmployees(ListPayload<Employee>),
    /// One staff member in detail
    FetchEmployee(Employee),
    /// A staff record was edited
    UpdateEmployee(Employee),
    /// A staff record was removed
    DeleteEmployee,
}

/// Selection slots of the employees domain
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EmployeeSelections {
    /// Employee on the detail screen
    pub employee: Option<Employee>,
}

/// Employees resource
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Employees;

impl Resource for Employees {
    const NAME: &'static str = "employees";
    const COLLECTION_KEY: &'static str = "employees";
    type Entity = Employee;
    type Selections = EmployeeSelections;
    type Secondary = ();
    type Success = EmployeeSuccess;

    fn commit(success: EmployeeSuccess, slices: &mut Slices<'_, Self>) {
        match success {
            EmployeeSuccess::FetchEmployees(list) => slices.replace_primary(list),
            EmployeeSuccess::CreateEmployee(employee)
            | EmployeeSuccess::FetchEmployee(employee)
            | EmployeeSuccess::UpdateEmployee(employee) => slices.select(|s| &mut s.employee, employee),
            EmployeeSuccess::DeleteEmployee => {},
        }
    }
}

impl WireDecode for Employees {
    fn decode(operation: EmployeeOperation, payload: Value) -> Result<EmployeeSuccess, PayloadError> {
        Ok(match operation {
            EmployeeOperation::CreateEmployee => EmployeeSuccess::CreateEmployee(wire::entity(payload)?),
            EmployeeOperation::FetchEmployees => EmployeeSuccess::FetchEmployees(wire::list(payload, Self::COLLECTION_KEY)?),
            EmployeeOperation::FetchEmployee => EmployeeSuccess::FetchEmployee(wire::entity(payload)?),
            EmployeeOperation::UpdateEmployee => EmployeeSuccess::UpdateEmployee(wire::entity(payload)?),
            EmployeeOperation::DeleteEmployee => EmployeeSuccess::DeleteEmployee,
        })
    }
}

/// State of the employees domain
pub type EmployeeState = ResourceState<Employees>;

/// Events accepted by the employees domain
pub type EmployeeAction = ResourceAction<Employees>;
