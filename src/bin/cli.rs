use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use medibase::modules::users::directory::{InMemoryDirectory, UserDirectory};
use medibase_auth::{create_access_token, create_legacy_token, verify_token};
use medibase_config::{DirectoryConfig, JwtConfig};

#[derive(Parser)]
#[command(name = "medibase-cli")]
#[command(about = "Medibase CLI - Token tools for the Medibase API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue an access token for a directory user
    IssueToken {
        /// Directory id written to the subject claim
        #[arg(short = 'u', long)]
        user_id: String,

        /// Write the subject to the legacy `id` claim instead of `userId`
        #[arg(long)]
        legacy: bool,
    },
    /// Verify a token and print its subject
    VerifyToken {
        token: String,

        /// Also resolve the subject against USERS_SEED_FILE
        #[arg(short = 'r', long)]
        resolve: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let jwt_config = JwtConfig::from_env();
    let cli = Cli::parse();

    match cli.command {
        Commands::IssueToken { user_id, legacy } => {
            handle_issue_token(&jwt_config, &user_id, legacy)
        }
        Commands::VerifyToken { token, resolve } => {
            handle_verify_token(&jwt_config, &token, resolve).await
        }
    }
}

fn handle_issue_token(jwt_config: &JwtConfig, user_id: &str, legacy: bool) {
    let token = if legacy {
        create_legacy_token(user_id, jwt_config)
    } else {
        create_access_token(user_id, jwt_config)
    };

    match token {
        Ok(token) => println!("{}", token),
        Err(e) => {
            eprintln!("Error issuing token: {}", e.error);
            std::process::exit(1);
        }
    }
}

async fn handle_verify_token(jwt_config: &JwtConfig, token: &str, resolve: bool) {
    let claims = match verify_token(token, jwt_config) {
        Ok(claims) => claims,
        Err(e) => {
            eprintln!("Token rejected: {}", e);
            std::process::exit(1);
        }
    };

    let Some(subject) = claims.subject() else {
        eprintln!("Token carries no userId or id claim");
        std::process::exit(1);
    };
    println!("Subject: {}", subject);
    println!("Expires: {}", claims.exp);

    if !resolve {
        return;
    }

    let Some(seed_file) = DirectoryConfig::from_env().seed_file else {
        eprintln!("USERS_SEED_FILE must be set to resolve the subject");
        std::process::exit(1);
    };

    let directory = match InMemoryDirectory::from_seed_file(&seed_file).await {
        Ok(directory) => directory,
        Err(e) => {
            eprintln!("Error loading {}: {:#}", seed_file.display(), e);
            std::process::exit(1);
        }
    };

    match directory.find_user_by_id(subject).await {
        Ok(Some(user)) => println!("User: {} ({})", user.name, user.role),
        Ok(None) => {
            eprintln!("User not found");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Directory error: {}", e);
            std::process::exit(1);
        }
    }
}
