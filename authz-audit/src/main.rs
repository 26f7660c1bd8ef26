//! hrm-authz-audit - 鉴权审计工具
//!
//! 给定主体，列出其可访问的路由与可见的导航菜单

mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use hrm_auth_core::{
    MenuNode, Principal, PrincipalResolver, RouteAuthorizationMap, SessionTokenVerifier,
    StaticPrincipalSource, TokenPrincipalSource, TreeAuthorizationFilter, hr_navigation,
};
use hrm_config::AuthzConfig;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "hrm-authz-audit",
    version,
    about = "Explain what an HR dashboard principal can reach"
)]
struct Cli {
    /// Configuration directory
    #[arg(short, long, default_value = "config", env = "HRM_CONFIG_DIR")]
    config: String,

    /// Treat the principal as a super admin
    #[arg(long)]
    super_admin: bool,

    /// Permission slug held by the principal (repeatable)
    #[arg(short, long = "permission")]
    permissions: Vec<String>,

    /// Session token; when present it takes precedence over the flags above
    #[arg(long, env = "HRM_SESSION_TOKEN")]
    token: Option<String>,

    /// Print gate decision counters (Prometheus text) to stderr on exit
    #[arg(long)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every mapped route with the principal's verdict
    Routes,
    /// Check a single route key; exits with status 1 when denied
    CheckRoute { key: String },
    /// Print the navigation menu visible to the principal
    Menu {
        /// JSON menu definition; defaults to the built-in HR navigation
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = AuthzConfig::load(&cli.config).context("loading configuration")?;
    if config.telemetry.json {
        hrm_telemetry::init_tracing_json(&config.telemetry.log_level);
    } else {
        hrm_telemetry::init_tracing(&config.telemetry.log_level);
    }
    let metrics = if cli.metrics {
        Some(hrm_telemetry::init_metrics().context("installing metrics recorder")?)
    } else {
        None
    };
    info!(app = %config.app_name, env = %config.app_env, "Configuration loaded");

    let principal = resolve_principal(&cli, &config)?;
    let routes = if config.routes.is_empty() {
        RouteAuthorizationMap::hr_default().clone()
    } else {
        RouteAuthorizationMap::from_rules(&config.routes).context("building route table")?
    };

    let code = match &cli.command {
        Command::Routes => {
            print_json(&report::route_report(&routes, &principal))?;
            ExitCode::SUCCESS
        }
        Command::CheckRoute { key } => {
            let check = report::check_route(&routes, &principal, key);
            print_json(&check)?;
            if check.allowed {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Command::Menu { file } => {
            let menu = load_menu(file.as_ref())?;
            let visible = TreeAuthorizationFilter::from_config(&config.tree)
                .filter(&principal, &menu)
                .context("filtering navigation menu")?;
            print_json(&visible)?;
            ExitCode::SUCCESS
        }
    };

    if let Some(handle) = metrics {
        eprintln!("{}", handle.render());
    }
    Ok(code)
}

/// 令牌优先，命令行参数其次
fn resolve_principal(cli: &Cli, config: &AuthzConfig) -> Result<Principal> {
    let mut resolver = PrincipalResolver::new();

    if cli.token.is_some() {
        let Some(session) = &config.session else {
            bail!("--token given but no [session] section is configured");
        };
        resolver = resolver.with_source(TokenPrincipalSource::new(
            SessionTokenVerifier::from_config(session),
            cli.token.clone(),
        ));
    }

    let flags = Principal::new(cli.super_admin, cli.permissions.iter().cloned().collect());
    let resolved = resolver
        .with_source(StaticPrincipalSource::known(flags))
        .resolve_detailed();

    info!(source = ?resolved.source, "Principal resolved");
    Ok(resolved.principal)
}

fn load_menu(file: Option<&PathBuf>) -> Result<Vec<MenuNode>> {
    match file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading menu file {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing menu file {}", path.display()))
        }
        None => Ok(hr_navigation()),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
