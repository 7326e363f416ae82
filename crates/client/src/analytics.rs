//! Aggregate statistics and directory views.
//!
//! The administrative views are tables and stat cards over two slices of
//! data: the user directory and the full crop list. Everything here is a
//! pure function of those slices plus a reference date, so the views stay
//! trivially testable.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use harvest_trail_core::UserRole;

use crate::models::{Crop, User};

/// Per-role account counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleCounts {
    pub farmers: usize,
    pub distributors: usize,
    pub retailers: usize,
    pub consumers: usize,
}

/// Aggregate statistics over the directory and crop list.
#[derive(Debug, Clone)]
pub struct AnalyticsSnapshot {
    pub total_products: usize,
    pub total_users: usize,
    pub roles: RoleCounts,
    /// Crops created in the reference date's calendar month.
    pub products_this_month: usize,
    /// Crops created in the calendar month before it.
    pub products_last_month: usize,
    /// Month-over-month growth in percent, rounded to one decimal. Zero
    /// when last month had no products.
    pub monthly_growth_pct: f64,
    /// Crops with all three custody stages recorded.
    pub full_chain_products: usize,
    /// Share of crops with a complete chain, in percent, rounded to one
    /// decimal. Zero when there are no crops.
    pub chain_completion_pct: f64,
    pub products_by_type: BTreeMap<String, usize>,
    /// The five most common crop types, most common first; ties resolve
    /// alphabetically.
    pub top_types: Vec<(String, usize)>,
    pub unique_types: usize,
}

impl AnalyticsSnapshot {
    /// Compute the snapshot for a reference day.
    #[must_use]
    pub fn collect(users: &[User], crops: &[Crop], today: NaiveDate) -> Self {
        let roles = RoleCounts {
            farmers: count_role(users, UserRole::Farmer),
            distributors: count_role(users, UserRole::Distributor),
            retailers: count_role(users, UserRole::Retailer),
            consumers: count_role(users, UserRole::Consumer),
        };

        let this_month = (today.year(), today.month());
        let last_month = previous_month(this_month);

        let products_this_month = count_created_in(crops, this_month);
        let products_last_month = count_created_in(crops, last_month);

        let full_chain_products = crops.iter().filter(|c| c.has_full_chain()).count();

        let mut products_by_type: BTreeMap<String, usize> = BTreeMap::new();
        for crop in crops {
            *products_by_type.entry(crop.crop_type.clone()).or_default() += 1;
        }

        let mut top_types: Vec<(String, usize)> = products_by_type
            .iter()
            .map(|(t, n)| (t.clone(), *n))
            .collect();
        top_types.sort_by(|a, b| b.1.cmp(&a.1));
        top_types.truncate(5);

        Self {
            total_products: crops.len(),
            total_users: users.len(),
            roles,
            products_this_month,
            products_last_month,
            monthly_growth_pct: growth_pct(products_this_month, products_last_month),
            full_chain_products,
            chain_completion_pct: share_pct(full_chain_products, crops.len()),
            unique_types: products_by_type.len(),
            products_by_type,
            top_types,
        }
    }
}

/// Freshness tallies for the product stat cards.
///
/// These follow the stat-card boundary (a crop expiring today counts as
/// expired), which differs by one day from the per-crop badge rule in
/// [`harvest_trail_core::Freshness`]; both rules come from the views they
/// serve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FreshnessTally {
    pub total: usize,
    /// Expiry strictly after the reference day.
    pub active: usize,
    /// Within a week of expiry, but not yet at it.
    pub expiring_soon: usize,
    /// Expiry on or before the reference day.
    pub expired: usize,
}

impl FreshnessTally {
    /// Tally a crop list against a reference day.
    #[must_use]
    pub fn tally(crops: &[Crop], today: NaiveDate) -> Self {
        let mut counts = Self {
            total: crops.len(),
            ..Self::default()
        };

        for crop in crops {
            let days_left = (crop.expiry_date - today).num_days();

            if crop.expiry_date > today {
                counts.active += 1;
            } else {
                counts.expired += 1;
            }
            if days_left > 0 && days_left <= 7 {
                counts.expiring_soon += 1;
            }
        }

        counts
    }
}

/// Search and type filter for the product table.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring matched against name and type.
    pub search: Option<String>,
    /// Exact crop type (case-insensitive); `None` means all types.
    pub crop_type: Option<String>,
}

impl ProductFilter {
    /// Whether a crop passes the filter.
    #[must_use]
    pub fn matches(&self, crop: &Crop) -> bool {
        let search_ok = self.search.as_deref().is_none_or(|term| {
            let term = term.to_lowercase();
            crop.name.to_lowercase().contains(&term)
                || crop.crop_type.to_lowercase().contains(&term)
        });

        let type_ok = self
            .crop_type
            .as_deref()
            .is_none_or(|t| crop.crop_type.eq_ignore_ascii_case(t));

        search_ok && type_ok
    }
}

/// Apply a product filter, preserving order.
#[must_use]
pub fn filter_products<'a>(crops: &'a [Crop], filter: &ProductFilter) -> Vec<&'a Crop> {
    crops.iter().filter(|c| filter.matches(c)).collect()
}

/// The distinct crop types present, sorted, for populating a type filter.
#[must_use]
pub fn crop_types(crops: &[Crop]) -> Vec<String> {
    crops
        .iter()
        .map(|c| c.crop_type.clone())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Search and role filter for the user directory.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Case-insensitive substring matched against email and name.
    pub search: Option<String>,
    /// Exact role; `None` means all roles.
    pub role: Option<UserRole>,
}

impl UserFilter {
    /// Whether a user passes the filter.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        let search_ok = self.search.as_deref().is_none_or(|term| {
            let term = term.to_lowercase();
            user.email.as_str().to_lowercase().contains(&term)
                || user.display_name().to_lowercase().contains(&term)
        });

        let role_ok = self.role.is_none_or(|role| user.role == role);

        search_ok && role_ok
    }
}

/// Apply a user filter, preserving order.
#[must_use]
pub fn filter_users<'a>(users: &'a [User], filter: &UserFilter) -> Vec<&'a User> {
    users.iter().filter(|u| filter.matches(u)).collect()
}

/// Stat-card counts for the user directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectorySummary {
    pub total: usize,
    pub farmers: usize,
    /// Distributors and retailers together.
    pub partners: usize,
}

impl DirectorySummary {
    /// Summarize a user list.
    #[must_use]
    pub fn summarize(users: &[User]) -> Self {
        Self {
            total: users.len(),
            farmers: count_role(users, UserRole::Farmer),
            partners: count_role(users, UserRole::Distributor)
                + count_role(users, UserRole::Retailer),
        }
    }
}

/// Custody code column label: `F-123`, `D-456`, or `-`.
#[must_use]
pub fn custody_label(user: &User) -> String {
    if let Some(code) = &user.farmer_code {
        format!("F-{code}")
    } else if let Some(code) = &user.distributor_code {
        format!("D-{code}")
    } else {
        "-".to_string()
    }
}

fn count_role(users: &[User], role: UserRole) -> usize {
    users.iter().filter(|u| u.role == role).count()
}

fn count_created_in(crops: &[Crop], (year, month): (i32, u32)) -> usize {
    crops
        .iter()
        .filter(|c| {
            let created = c.created_at.date_naive();
            created.year() == year && created.month() == month
        })
        .count()
}

const fn previous_month((year, month): (i32, u32)) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

#[allow(clippy::cast_precision_loss)]
fn growth_pct(this_month: usize, last_month: usize) -> f64 {
    if last_month == 0 {
        return 0.0;
    }
    round1((this_month as f64 - last_month as f64) / last_month as f64 * 100.0)
}

#[allow(clippy::cast_precision_loss)]
fn share_pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round1(part as f64 / whole as f64 * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
