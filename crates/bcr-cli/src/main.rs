use anyhow::Context;
use bcr_cli::{admin, seeder};
use bcr_config::{DatabaseConfig, ServerConfig};
use bcr_db::{PgPool, init_db_pool, run_migrations};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "bcr-cli")]
#[command(about = "BCR CLI - Administrative tools for the BCR car rental API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// Display name of the admin
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake cars and customers
    Seed {
        /// Number of cars to create
        #[arg(short = 'c', long, default_value = "20")]
        cars: usize,

        /// Number of customers to create
        #[arg(long, default_value = "10")]
        customers: usize,
    },
    /// Clear all seeded data (keeps admins and real users)
    ClearSeed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let server_config = ServerConfig::from_env();

    let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
    run_migrations(&pool).await?;

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => handle_create_admin(&pool, name, email, password, server_config.bcrypt_cost).await,
        Commands::Seed { cars, customers } => {
            let config = seeder::SeedConfig {
                cars,
                customers,
                bcrypt_cost: server_config.bcrypt_cost,
            };
            seeder::seed_all(&pool, config)
                .await
                .context("Error seeding database")
        }
        Commands::ClearSeed => seeder::clear_all(&pool)
            .await
            .context("Error clearing seeded data"),
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    bcrypt_cost: u32,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new()
            .with_prompt("Name")
            .interact_text()
            .context("Failed to read name")?,
    };

    let email: String = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let user_id = admin::create_admin(pool, &name, &email, &password, bcrypt_cost)
        .await
        .context("Error creating admin")?;

    println!("\n✅ Admin created successfully!");
    println!("   Id: {}", user_id);
    println!("   Email: {}", email);
    println!("   Name: {}", name);

    Ok(())
}
