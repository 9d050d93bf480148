//! Tenant relocation model.
//!
//! One tenant's occupancy and relocation record for an occupied-building
//! renovation. Money amounts are exact integer cents so cost aggregation
//! never drifts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a tenant is in the relocation lifecycle.
///
/// Effectively a small state machine (planned → relocated → returned),
/// but the engine only reads the current value; transition validity is
/// the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelocationStatus {
    Planned,
    Relocated,
    Returned,
    OnHold,
}

/// One tenant's occupancy/relocation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantRelocation {
    /// Unique record identifier.
    pub id: i64,
    /// Tenant display name.
    pub tenant_name: String,
    /// Unit currently occupied.
    pub current_unit: String,
    /// Leased floor area in square meters.
    pub leased_area_sqm: f64,
    /// Lease expiry date.
    pub lease_expiry: Option<NaiveDate>,
    /// Current relocation lifecycle state.
    pub status: RelocationStatus,
    /// Whether this tenant must be relocated at all.
    pub relocation_required: bool,
    /// Temporary location during works.
    pub temporary_location: Option<String>,
    /// Date the tenant moves out.
    pub relocation_start: Option<NaiveDate>,
    /// Date the tenant moves back.
    pub relocation_end: Option<NaiveDate>,
    /// Unit the tenant returns to, when different from `current_unit`.
    pub return_unit: Option<String>,
    /// Whether a relocation agreement has been signed.
    pub agreement_signed: bool,
    /// Relocation allowance in cents.
    pub relocation_allowance_cents: Option<i64>,
    /// Fit-out contribution in cents.
    pub fit_out_contribution_cents: Option<i64>,
    /// Date the tenant was formally notified.
    pub notification_date: Option<NaiveDate>,
    /// Contact person.
    pub contact_name: Option<String>,
}

impl TenantRelocation {
    /// Creates a new relocation record.
    pub fn new(id: i64, tenant_name: impl Into<String>, current_unit: impl Into<String>) -> Self {
        Self {
            id,
            tenant_name: tenant_name.into(),
            current_unit: current_unit.into(),
            leased_area_sqm: 0.0,
            lease_expiry: None,
            status: RelocationStatus::Planned,
            relocation_required: false,
            temporary_location: None,
            relocation_start: None,
            relocation_end: None,
            return_unit: None,
            agreement_signed: false,
            relocation_allowance_cents: None,
            fit_out_contribution_cents: None,
            notification_date: None,
            contact_name: None,
        }
    }

    /// Sets the leased area.
    pub fn with_area(mut self, sqm: f64) -> Self {
        self.leased_area_sqm = sqm;
        self
    }

    /// Sets the lease expiry date.
    pub fn with_lease_expiry(mut self, date: NaiveDate) -> Self {
        self.lease_expiry = Some(date);
        self
    }

    /// Sets the lifecycle status.
    pub fn with_status(mut self, status: RelocationStatus) -> Self {
        self.status = status;
        self
    }

    /// Requires relocation for this tenant.
    pub fn with_relocation_required(mut self, required: bool) -> Self {
        self.relocation_required = required;
        self
    }

    /// Sets the temporary location.
    pub fn with_temporary_location(mut self, location: impl Into<String>) -> Self {
        self.temporary_location = Some(location.into());
        self
    }

    /// Sets the relocation window.
    pub fn with_relocation_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.relocation_start = Some(start);
        self.relocation_end = Some(end);
        self
    }

    /// Sets only the relocation start date.
    pub fn with_relocation_start(mut self, start: NaiveDate) -> Self {
        self.relocation_start = Some(start);
        self
    }

    /// Sets the return unit.
    pub fn with_return_unit(mut self, unit: impl Into<String>) -> Self {
        self.return_unit = Some(unit.into());
        self
    }

    /// Marks the relocation agreement signed.
    pub fn with_agreement_signed(mut self, signed: bool) -> Self {
        self.agreement_signed = signed;
        self
    }

    /// Sets the relocation allowance in cents.
    pub fn with_allowance_cents(mut self, cents: i64) -> Self {
        self.relocation_allowance_cents = Some(cents);
        self
    }

    /// Sets the fit-out contribution in cents.
    pub fn with_fit_out_cents(mut self, cents: i64) -> Self {
        self.fit_out_contribution_cents = Some(cents);
        self
    }

    /// Sets the notification date.
    pub fn with_notification_date(mut self, date: NaiveDate) -> Self {
        self.notification_date = Some(date);
        self
    }

    /// Sets the contact person.
    pub fn with_contact(mut self, name: impl Into<String>) -> Self {
        self.contact_name = Some(name.into());
        self
    }

    /// Combined relocation cost in cents, missing amounts as zero.
    pub fn total_cost_cents(&self) -> i64 {
        self.relocation_allowance_cents.unwrap_or(0) + self.fit_out_contribution_cents.unwrap_or(0)
    }
}
