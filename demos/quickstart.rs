//
//  cctrl-client
//  demos/quickstart.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Lists the applications of an account and the deployments of each.
//!
//! ```text
//! CCTRL_EMAIL=me@example.com CCTRL_PASSWORD=secret cargo run --example quickstart
//! ```
//!
//! Set `CCTRL_DEBUG=debug` to see the requests, and `CCTRL_API_URL` to talk
//! to another API origin.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cctrl_client::api::resources::{self, Application};
use cctrl_client::{ClientConfig, Session};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let email = std::env::var("CCTRL_EMAIL").context("CCTRL_EMAIL is not set")?;
    let password = std::env::var("CCTRL_PASSWORD").context("CCTRL_PASSWORD is not set")?;

    let mut session = Session::new(ClientConfig::from_env())?;
    session
        .authenticate(&email, &password)
        .await
        .context("Authentication failed")?;

    let apps: Vec<Application> = session.invoke(&resources::LIST_APPS, &[], None).await?;
    if apps.is_empty() {
        println!("No applications.");
    }

    for app in &apps {
        println!("{} ({})", app.name, app.app_type.name);
        for deployment in &app.deployments {
            println!(
                "  {} containers={} size={} state={}",
                deployment.name,
                deployment.containers,
                deployment.size,
                deployment.state.as_deref().unwrap_or("-")
            );
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("CCTRL_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
