//! Tenant relocation coordination.
//!
//! A reporting view over relocation records for an occupied-building
//! renovation: counts by lifecycle state, exact cost aggregation, a
//! chronological move-out/move-back timeline, and risk warnings.
//!
//! Dates in the output are rendered as `YYYY-MM-DD` strings so the
//! presentation layer can serialize them verbatim; the timeline is
//! sorted by that string, which orders chronologically.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{RelocationStatus, TenantRelocation};

/// Days ahead of a relocation start within which an unsigned agreement
/// is flagged.
const AGREEMENT_WARNING_WINDOW_DAYS: i64 = 30;

/// Timeline event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEvent {
    RelocationStart,
    RelocationEnd,
}

/// One dated entry on the relocation timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Event date, `YYYY-MM-DD`.
    pub date: String,
    /// Move-out or move-back.
    pub event: TimelineEvent,
    /// Tenant display name.
    pub tenant: String,
    /// Human-readable description of the move.
    pub detail: String,
}

/// Per-tenant detail, mirroring the relocation record with dates
/// rendered as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantDetail {
    /// Record identifier.
    pub id: i64,
    /// Tenant display name.
    pub tenant_name: String,
    /// Unit currently occupied.
    pub current_unit: String,
    /// Leased floor area in square meters.
    pub leased_area_sqm: f64,
    /// Lease expiry date, `YYYY-MM-DD`.
    pub lease_expiry: Option<String>,
    /// Lifecycle state.
    pub status: RelocationStatus,
    /// Whether relocation is required.
    pub relocation_required: bool,
    /// Temporary location during works.
    pub temporary_location: Option<String>,
    /// Move-out date, `YYYY-MM-DD`.
    pub relocation_start: Option<String>,
    /// Move-back date, `YYYY-MM-DD`.
    pub relocation_end: Option<String>,
    /// Unit the tenant returns to.
    pub return_unit: Option<String>,
    /// Whether a relocation agreement is signed.
    pub agreement_signed: bool,
    /// Relocation allowance in cents.
    pub relocation_allowance_cents: Option<i64>,
    /// Fit-out contribution in cents.
    pub fit_out_contribution_cents: Option<i64>,
    /// Notification date, `YYYY-MM-DD`.
    pub notification_date: Option<String>,
    /// Contact person.
    pub contact_name: Option<String>,
}

/// Relocation coordination view for one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantCoordinationSummary {
    /// Project identifier.
    pub project_id: i64,
    /// Total relocation records.
    pub total_tenants: usize,
    /// Tenants that must be relocated.
    pub relocation_required_count: usize,
    /// Tenants currently relocated.
    pub relocated_count: usize,
    /// Tenants back in the building.
    pub returned_count: usize,
    /// Planned relocations with no notification sent yet.
    pub pending_notification_count: usize,
    /// Tenants with a signed relocation agreement.
    pub agreements_signed_count: usize,
    /// Sum of allowances and fit-out contributions, exact cents.
    pub total_relocation_cost_cents: i64,
    /// Per-tenant detail, in input order.
    pub tenants: Vec<TenantDetail>,
    /// Move-out/move-back events, ascending by date.
    pub timeline: Vec<TimelineEntry>,
    /// Coordination risk warnings.
    pub warnings: Vec<String>,
}

/// Builds the tenant coordination view.
///
/// `today` is the caller's current date, used only for the unsigned
/// agreement warning window.
pub fn coordinate_tenants(
    project_id: i64,
    relocations: &[TenantRelocation],
    today: NaiveDate,
) -> TenantCoordinationSummary {
    let mut relocation_required_count = 0;
    let mut relocated_count = 0;
    let mut returned_count = 0;
    let mut pending_notification_count = 0;
    let mut agreements_signed_count = 0;
    let mut total_relocation_cost_cents: i64 = 0;

    let mut tenants = Vec::with_capacity(relocations.len());
    let mut timeline = Vec::new();
    let mut warnings = Vec::new();

    for r in relocations {
        if r.relocation_required {
            relocation_required_count += 1;
        }
        match r.status {
            RelocationStatus::Relocated => relocated_count += 1,
            RelocationStatus::Returned => returned_count += 1,
            RelocationStatus::Planned if r.notification_date.is_none() => {
                pending_notification_count += 1;
            }
            _ => {}
        }
        if r.agreement_signed {
            agreements_signed_count += 1;
        }
        total_relocation_cost_cents += r.total_cost_cents();

        tenants.push(TenantDetail {
            id: r.id,
            tenant_name: r.tenant_name.clone(),
            current_unit: r.current_unit.clone(),
            leased_area_sqm: r.leased_area_sqm,
            lease_expiry: r.lease_expiry.map(format_date),
            status: r.status,
            relocation_required: r.relocation_required,
            temporary_location: r.temporary_location.clone(),
            relocation_start: r.relocation_start.map(format_date),
            relocation_end: r.relocation_end.map(format_date),
            return_unit: r.return_unit.clone(),
            agreement_signed: r.agreement_signed,
            relocation_allowance_cents: r.relocation_allowance_cents,
            fit_out_contribution_cents: r.fit_out_contribution_cents,
            notification_date: r.notification_date.map(format_date),
            contact_name: r.contact_name.clone(),
        });

        if let Some(start) = r.relocation_start {
            let location = r
                .temporary_location
                .clone()
                .unwrap_or_else(|| "unassigned temporary location".to_string());
            timeline.push(TimelineEntry {
                date: format_date(start),
                event: TimelineEvent::RelocationStart,
                tenant: r.tenant_name.clone(),
                detail: format!("Relocating to {location}"),
            });
        }
        if let Some(end) = r.relocation_end {
            let unit = r.return_unit.clone().unwrap_or_else(|| r.current_unit.clone());
            timeline.push(TimelineEntry {
                date: format_date(end),
                event: TimelineEvent::RelocationEnd,
                tenant: r.tenant_name.clone(),
                detail: format!("Returning to {unit}"),
            });
        }

        if r.relocation_required && !r.agreement_signed {
            if let Some(start) = r.relocation_start {
                let days_until = (start - today).num_days();
                if (0..=AGREEMENT_WARNING_WINDOW_DAYS).contains(&days_until) {
                    warnings.push(format!(
                        "Tenant '{}' relocation in {} days but agreement not signed",
                        r.tenant_name, days_until
                    ));
                }
            }
        }
        if let (Some(expiry), Some(end)) = (r.lease_expiry, r.relocation_end) {
            if end > expiry {
                warnings.push(format!(
                    "Tenant '{}' relocation extends beyond lease expiry",
                    r.tenant_name
                ));
            }
        }
    }

    // Stable: same-date events keep input order.
    timeline.sort_by(|a, b| a.date.cmp(&b.date));

    TenantCoordinationSummary {
        project_id,
        total_tenants: relocations.len(),
        relocation_required_count,
        relocated_count,
        returned_count,
        pending_notification_count,
        agreements_signed_count,
        total_relocation_cost_cents,
        tenants,
        timeline,
        warnings,
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 4, 15)
    }

    #[test]
    fn test_empty_input() {
        let summary = coordinate_tenants(1, &[], today());
        assert_eq!(summary.total_tenants, 0);
        assert_eq!(summary.total_relocation_cost_cents, 0);
        assert!(summary.tenants.is_empty());
        assert!(summary.timeline.is_empty());
        assert!(summary.warnings.is_empty());
    }

    #[test]
    fn test_counts() {
        let relocations = vec![
            TenantRelocation::new(1, "A", "U-1")
                .with_relocation_required(true)
                .with_status(RelocationStatus::Relocated)
                .with_agreement_signed(true),
            TenantRelocation::new(2, "B", "U-2").with_status(RelocationStatus::Returned),
            // Planned with no notification: pending.
            TenantRelocation::new(3, "C", "U-3"),
            // Planned but already notified: not pending.
            TenantRelocation::new(4, "D", "U-4").with_notification_date(date(2024, 3, 1)),
        ];
        let summary = coordinate_tenants(1, &relocations, today());
        assert_eq!(summary.total_tenants, 4);
        assert_eq!(summary.relocation_required_count, 1);
        assert_eq!(summary.relocated_count, 1);
        assert_eq!(summary.returned_count, 1);
        assert_eq!(summary.pending_notification_count, 1);
        assert_eq!(summary.agreements_signed_count, 1);
    }

    #[test]
    fn test_cost_aggregation_exact() {
        let relocations = vec![
            TenantRelocation::new(1, "A", "U-1")
                .with_allowance_cents(1_000_33)
                .with_fit_out_cents(2_000_67),
            TenantRelocation::new(2, "B", "U-2").with_allowance_cents(50),
            // No amounts at all: contributes zero.
            TenantRelocation::new(3, "C", "U-3"),
        ];
        let summary = coordinate_tenants(1, &relocations, today());
        assert_eq!(summary.total_relocation_cost_cents, 1_000_33 + 2_000_67 + 50);
    }

    #[test]
    fn test_timeline_sorted_by_date() {
        let relocations = vec![
            TenantRelocation::new(1, "A", "U-1")
                .with_relocation_dates(date(2024, 9, 1), date(2025, 2, 1)),
            TenantRelocation::new(2, "B", "U-2")
                .with_relocation_dates(date(2024, 3, 1), date(2024, 10, 1)),
        ];
        let summary = coordinate_tenants(1, &relocations, today());
        let dates: Vec<&str> = summary.timeline.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-09-01", "2024-10-01", "2025-02-01"]);
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_timeline_details() {
        let relocations = vec![TenantRelocation::new(1, "Harbour Cafe", "G-04")
            .with_temporary_location("Podium kiosk 2")
            .with_relocation_dates(date(2024, 5, 1), date(2024, 11, 1))
            .with_return_unit("G-06")];
        let summary = coordinate_tenants(1, &relocations, today());
        assert_eq!(summary.timeline.len(), 2);
        assert_eq!(summary.timeline[0].event, TimelineEvent::RelocationStart);
        assert_eq!(summary.timeline[0].detail, "Relocating to Podium kiosk 2");
        assert_eq!(summary.timeline[1].event, TimelineEvent::RelocationEnd);
        assert_eq!(summary.timeline[1].detail, "Returning to G-06");
    }

    #[test]
    fn test_return_detail_falls_back_to_current_unit() {
        let relocations = vec![TenantRelocation::new(1, "A", "U-9")
            .with_relocation_dates(date(2024, 5, 1), date(2024, 11, 1))];
        let summary = coordinate_tenants(1, &relocations, today());
        assert_eq!(summary.timeline[1].detail, "Returning to U-9");
    }

    #[test]
    fn test_unsigned_agreement_warning_inside_window() {
        let relocations = vec![TenantRelocation::new(1, "A", "U-1")
            .with_relocation_required(true)
            .with_relocation_start(date(2024, 4, 25))];
        let summary = coordinate_tenants(1, &relocations, today());
        assert_eq!(
            summary.warnings,
            vec!["Tenant 'A' relocation in 10 days but agreement not signed".to_string()]
        );
    }

    #[test]
    fn test_no_warning_outside_window_or_when_signed() {
        let relocations = vec![
            // Start too far out.
            TenantRelocation::new(1, "A", "U-1")
                .with_relocation_required(true)
                .with_relocation_start(date(2024, 8, 1)),
            // Already started: window is forward-looking only.
            TenantRelocation::new(2, "B", "U-2")
                .with_relocation_required(true)
                .with_relocation_start(date(2024, 4, 1)),
            // Signed in time.
            TenantRelocation::new(3, "C", "U-3")
                .with_relocation_required(true)
                .with_agreement_signed(true)
                .with_relocation_start(date(2024, 4, 20)),
        ];
        let summary = coordinate_tenants(1, &relocations, today());
        assert!(summary.warnings.is_empty());
    }

    #[test]
    fn test_lease_expiry_warning() {
        let relocations = vec![
            TenantRelocation::new(1, "A", "U-1")
                .with_lease_expiry(date(2024, 10, 1))
                .with_relocation_dates(date(2024, 5, 1), date(2024, 12, 1)),
            // Ends exactly on expiry: not beyond.
            TenantRelocation::new(2, "B", "U-2")
                .with_lease_expiry(date(2024, 10, 1))
                .with_relocation_dates(date(2024, 5, 1), date(2024, 10, 1)),
        ];
        let summary = coordinate_tenants(1, &relocations, today());
        assert_eq!(
            summary.warnings,
            vec!["Tenant 'A' relocation extends beyond lease expiry".to_string()]
        );
    }

    #[test]
    fn test_detail_dates_rendered_as_strings() {
        let relocations = vec![TenantRelocation::new(1, "A", "U-1")
            .with_lease_expiry(date(2025, 1, 31))
            .with_relocation_dates(date(2024, 5, 1), date(2024, 11, 1))
            .with_notification_date(date(2024, 2, 9))];
        let summary = coordinate_tenants(1, &relocations, today());
        let t = &summary.tenants[0];
        assert_eq!(t.lease_expiry.as_deref(), Some("2025-01-31"));
        assert_eq!(t.relocation_start.as_deref(), Some("2024-05-01"));
        assert_eq!(t.relocation_end.as_deref(), Some("2024-11-01"));
        assert_eq!(t.notification_date.as_deref(), Some("2024-02-09"));
    }

    #[test]
    fn test_event_names_serialize_snake_case() {
        let json = serde_json::to_string(&TimelineEvent::RelocationStart).unwrap();
        assert_eq!(json, "\"relocation_start\"");
    }
}
