use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use sqlx::PgPool;
use validator::Validate;

use classbook_cli::seeder::{self, SeedConfig};
use classbook_config::DatabaseConfig;
use classbook_core::hash_password;
use classbook_db::{init_db_pool, is_unique_violation};
use classbook_models::RegisterTeacherDto;

#[derive(Parser)]
#[command(name = "classbook-cli")]
#[command(about = "Classbook CLI - Administrative tools for Classbook", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a teacher account
    CreateTeacher {
        /// Login name
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake teachers, classes, students, subjects and schedules
    Seed {
        /// Number of teachers to create
        #[arg(short = 't', long, default_value = "5")]
        teachers: usize,

        /// Number of classes to create
        #[arg(short = 'c', long, default_value = "8")]
        classes: usize,

        /// Number of students per class
        #[arg(long, default_value = "25")]
        students: usize,

        /// Number of subjects per teacher
        #[arg(long, default_value = "3")]
        subjects: usize,

        /// Number of weekly lessons per teacher
        #[arg(long, default_value = "15")]
        lessons: usize,
    },
    /// Clear all seeded data
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let Some(config) = DatabaseConfig::from_env() else {
        eprintln!("❌ DATABASE_URL must be set");
        std::process::exit(1);
    };

    let pool = match init_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::CreateTeacher {
            username,
            email,
            password,
        } => handle_create_teacher(&pool, username, email, password).await,
        Commands::Seed {
            teachers,
            classes,
            students,
            subjects,
            lessons,
        } => {
            let config = SeedConfig::new(teachers)
                .with_classes(classes, students)
                .with_subjects(subjects)
                .with_lessons(lessons);
            seeder::seed_all(&pool, config).await
        }
        Commands::ClearSeed => seeder::clear_all(&pool).await,
    };

    if let Err(e) = result {
        eprintln!("\n❌ {}", e);
        std::process::exit(1);
    }
}

async fn handle_create_teacher(
    pool: &PgPool,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let username = match username {
        Some(username) => username,
        None => Input::<String>::new().with_prompt("Username").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::<String>::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let dto = RegisterTeacherDto {
        username,
        email,
        password,
    };
    dto.validate()?;

    let password_hash = hash_password(&dto.password)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    sqlx::query("INSERT INTO teachers (username, email, password_hash) VALUES ($1, $2, $3)")
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&password_hash)
        .execute(pool)
        .await
        .map_err(|e| -> Box<dyn std::error::Error> {
            if is_unique_violation(&e) {
                "A teacher with this username or email already exists".into()
            } else {
                e.into()
            }
        })?;

    println!("\n✅ Teacher created successfully!");
    println!("   Username: {}", dto.username);
    println!("   Email: {}", dto.email);

    Ok(())
}
