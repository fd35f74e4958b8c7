// Shelfside - Personal Library Web Application
// Copyright (C) 2025 Shelfside contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use shelfside::config::ServerConfig;
use shelfside::storage::Database;
use shelfside::web::{self, AppState};

#[derive(Parser)]
#[command(name = "shelfside")]
#[command(about = "Personal library web application", long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "SHELFSIDE_ADDR", default_value = "127.0.0.1:8378")]
    listen: String,

    /// Path to the SQLite database (created if missing)
    #[arg(long, env = "SHELFSIDE_DB")]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shelfside=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::from_parts(&cli.listen, cli.database)?;

    let db = Database::new(&config.database_path)
        .await
        .with_context(|| {
            format!(
                "failed to open library database at {}",
                config.database_path.display()
            )
        })?;

    let app = web::build_router(AppState::new(db));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %config.bind_addr,
        database = %config.database_path.display(),
        "shelfside listening"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
