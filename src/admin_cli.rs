// src/admin_cli.rs
// Operator utility for profile maintenance against the configured database

use anyhow::{anyhow, bail, Result};
use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use soilguard_api::common::migrations::run_migrations;
use soilguard_api::common::{utc_timestamp, AppConfig};
use soilguard_api::profile::{Profile, ProfileService};

const USAGE: &str = "Usage:
  soilguard-admin create-profile <user-id> <email> [full name]
  soilguard-admin upgrade <user-id-or-email>
  soilguard-admin show <user-id-or-email>";

#[derive(Debug, PartialEq)]
enum Command {
    CreateProfile {
        user_id: String,
        email: String,
        full_name: Option<String>,
    },
    Upgrade {
        target: String,
    },
    Show {
        target: String,
    },
}

fn parse_args(args: &[String]) -> Result<Command> {
    let Some((name, rest)) = args.split_first() else {
        bail!("missing command\n{}", USAGE);
    };

    match (name.as_str(), rest) {
        ("create-profile", [user_id, email, name_parts @ ..]) => {
            let full_name = name_parts.join(" ");
            Ok(Command::CreateProfile {
                user_id: user_id.clone(),
                email: email.clone(),
                full_name: Some(full_name).filter(|n| !n.trim().is_empty()),
            })
        }
        ("upgrade", [target]) => Ok(Command::Upgrade {
            target: target.clone(),
        }),
        ("show", [target]) => Ok(Command::Show {
            target: target.clone(),
        }),
        _ => bail!("invalid arguments\n{}", USAGE),
    }
}

fn print_profile(profile: &Profile) {
    println!("  id:                {}", profile.id);
    println!(
        "  email:             {}",
        profile.email.as_deref().unwrap_or("-")
    );
    println!(
        "  full name:         {}",
        profile.full_name.as_deref().unwrap_or("-")
    );
    println!(
        "  tier:              {}",
        profile.subscription_tier.as_str()
    );
    println!(
        "  subscription date: {}",
        profile.subscription_date.as_deref().unwrap_or("-")
    );
    println!("  created:           {}", profile.created_at);
}

async fn resolve(service: &ProfileService, target: &str) -> Result<Profile> {
    service
        .find_by_id_or_email(target)
        .await?
        .ok_or_else(|| anyhow!("no profile matches '{}'", target))
}

async fn run(pool: SqlitePool, command: Command) -> Result<()> {
    let service = ProfileService::new(pool);

    match command {
        Command::CreateProfile {
            user_id,
            email,
            full_name,
        } => {
            let (profile, created) = service
                .ensure(&user_id, &email, full_name.as_deref())
                .await?;
            if created {
                println!("✅ Profile created");
            } else {
                println!("ℹ️  Profile already exists");
            }
            print_profile(&profile);
        }
        Command::Upgrade { target } => {
            let profile = resolve(&service, &target).await?;
            let now = utc_timestamp();
            service.promote_to_pro(&profile.id, &now).await?;
            let upgraded = resolve(&service, &profile.id).await?;
            println!(
                "✅ {} is now {} (since {})",
                upgraded.id,
                upgraded.subscription_tier.as_str(),
                upgraded.subscription_date.as_deref().unwrap_or(&now)
            );
        }
        Command::Show { target } => {
            let profile = resolve(&service, &target).await?;
            print_profile(&profile);
        }
    }

    Ok(())
}

async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    run_migrations(&pool, false).await?;
    Ok(pool)
}

async fn execute(args: &[String]) -> Result<()> {
    let command = parse_args(args)?;
    let config = AppConfig::from_env();
    let pool = connect(&config.database_url).await?;
    run(pool, command).await
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if let Err(e) = execute(&args).await {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
