//! Administrative commands.

use chrono::Utc;
use clap::Subcommand;

use harvest_trail_core::{UserId, UserRole};

use harvest_trail_client::analytics::{
    DirectorySummary, FreshnessTally, ProductFilter, UserFilter, crop_types, custody_label,
    filter_products, filter_users,
};
use harvest_trail_client::services::AdminService;

use super::{CommandError, Context};

#[derive(Subcommand)]
pub enum AdminAction {
    /// List registered users
    Users {
        /// Only show one role
        #[arg(long)]
        role: Option<UserRole>,

        /// Case-insensitive search over email and name
        #[arg(long)]
        search: Option<String>,
    },
    /// List tracked products
    Products {
        /// Only show one crop type
        #[arg(long = "type")]
        crop_type: Option<String>,

        /// Case-insensitive search over name and type
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete a user and every crop they own
    DeleteUser {
        /// User ID
        id: i64,
    },
    /// Aggregate statistics
    Stats,
}

pub async fn run(action: AdminAction) -> Result<(), CommandError> {
    let ctx = Context::from_env()?;
    let service = AdminService::new(ctx.api.clone(), ctx.store.clone());

    match action {
        AdminAction::Users { role, search } => {
            let users = service.users().await?;
            let summary = DirectorySummary::summarize(&users);

            let filter = UserFilter { search, role };
            let shown = filter_users(&users, &filter);

            for user in &shown {
                println!(
                    "  {:>8}  {:<24} {:<12} {:<6}  {}",
                    user.id.to_string(),
                    user.email.to_string(),
                    user.role.to_string(),
                    custody_label(user),
                    user.display_name()
                );
            }

            if shown.is_empty() {
                println!("no users match");
            }
            println!(
                "{} shown of {} total ({} farmers, {} supply-chain partners)",
                shown.len(),
                summary.total,
                summary.farmers,
                summary.partners
            );
        }
        AdminAction::Products { crop_type, search } => {
            let today = Utc::now().date_naive();
            let products = service.products();
            let tally = FreshnessTally::tally(&products, today);

            let filter = ProductFilter { search, crop_type };
            let shown = filter_products(&products, &filter);
            for crop in &shown {
                println!(
                    "  {:>8}  {:<20} {:<12} {:<12} expires {}  [{}]",
                    crop.id.to_string(),
                    crop.name,
                    crop.crop_type,
                    crop.stage().to_string(),
                    crop.expiry_date,
                    crop.freshness(today)
                );
            }

            if shown.is_empty() {
                println!("no products match");
            }
            println!(
                "{} shown of {} total ({} active, {} expiring soon, {} expired)",
                shown.len(),
                tally.total,
                tally.active,
                tally.expiring_soon,
                tally.expired
            );

            let types = crop_types(&products);
            if !types.is_empty() {
                println!("types: {}", types.join(", "));
            }
        }
        AdminAction::DeleteUser { id } => {
            service.delete_user(UserId::new(id)).await?;
            println!("deleted user {id} and their crops");
        }
        AdminAction::Stats => {
            let snapshot = service.snapshot(Utc::now().date_naive());

            println!("products:        {}", snapshot.total_products);
            println!("users:           {}", snapshot.total_users);
            println!(
                "roles:           {} farmers / {} distributors / {} retailers / {} consumers",
                snapshot.roles.farmers,
                snapshot.roles.distributors,
                snapshot.roles.retailers,
                snapshot.roles.consumers
            );
            println!(
                "this month:      {} products ({:+.1}% vs last month's {})",
                snapshot.products_this_month,
                snapshot.monthly_growth_pct,
                snapshot.products_last_month
            );
            println!(
                "full chain:      {} products ({:.1}% of all)",
                snapshot.full_chain_products, snapshot.chain_completion_pct
            );
            println!("crop types:      {}", snapshot.unique_types);

            if !snapshot.top_types.is_empty() {
                println!("top types:");
                for (rank, (crop_type, count)) in snapshot.top_types.iter().enumerate() {
                    println!("  {}. {crop_type} ({count} products)", rank + 1);
                }
            }
        }
    }

    Ok(())
}
