//! Account commands.

use clap::Subcommand;

use harvest_trail_core::{Email, UserRole};

use harvest_trail_client::analytics::custody_label;
use harvest_trail_client::models::{Registration, User};

use super::{CommandError, Context};

#[derive(Subcommand)]
pub enum AccountAction {
    /// Register a new account
    Register {
        /// Email address
        #[arg(short, long)]
        email: Email,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Role: farmer, distributor, retailer, consumer, admin
        #[arg(short, long, default_value = "farmer")]
        role: UserRole,

        /// Display name
        #[arg(short, long)]
        name: Option<String>,

        /// Location
        #[arg(short, long)]
        location: Option<String>,
    },
    /// Sign in
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in account
    Whoami,
}

pub async fn run(action: AccountAction) -> Result<(), CommandError> {
    let ctx = Context::from_env()?;

    match action {
        AccountAction::Register {
            email,
            password,
            role,
            name,
            location,
        } => {
            let user = ctx
                .sessions()
                .sign_up(Registration {
                    email,
                    password,
                    role,
                    name,
                    location,
                })
                .await?;

            println!("registered and signed in");
            print_user(&user);
        }
        AccountAction::Login { email, password } => {
            let user = ctx.sessions().sign_in(&email, &password).await?;
            println!("signed in");
            print_user(&user);
        }
        AccountAction::Logout => {
            let sessions = ctx.sessions();
            sessions.restore();
            sessions.sign_out()?;
            println!("signed out");
        }
        AccountAction::Whoami => {
            let user = ctx.require_user()?;
            print_user(&user);
        }
    }

    Ok(())
}

fn print_user(user: &User) {
    println!("  {} <{}>", user.display_name(), user.email);
    println!("  role:     {}", user.role);
    println!("  custody:  {}", custody_label(user));
    if let Some(location) = &user.location {
        println!("  location: {location}");
    }
}
