use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::PathBuf;

use servmon::app::App;
use servmon::cli::{Cli, Commands};
use servmon::core::api::ApiClient;
use servmon::core::fetch;
use servmon::core::stats::{partition_containers, SystemStats};
use servmon::utils::app_config::Settings;
use servmon::utils::helpers::{format_gb, format_percent, format_uptime};

#[tokio::main]
async fn main() -> Result<()> {
    // A .env file may supply SERVMON_BACKEND_URL / SERVMON_HOST
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::resolve(cli.backend_url.as_deref(), cli.host.as_deref())?;

    init_logging()?;

    match cli.command {
        None => {
            // No command - run interactive TUI
            let mut app = App::new(settings)?;
            app.run().await?;
        }
        Some(Commands::Ping) => {
            handle_ping(settings).await?;
        }
        Some(Commands::Status) => {
            handle_status(settings).await?;
        }
        Some(Commands::Stats { metric }) => {
            let mut app = App::new(settings)?;
            app.run_detail(metric.into()).await?;
        }
    }

    Ok(())
}

/// Diagnostics go to a file: the terminal belongs to the TUI.
fn init_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("servmon");
    std::fs::create_dir_all(&log_dir)?;

    let appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}",
        )))
        .build(log_dir.join("servmon.log"))?;

    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(appender)))
        .build(Root::builder().appender("file").build(LevelFilter::Info))?;

    log4rs::init_config(config)?;

    Ok(())
}

async fn handle_ping(settings: Settings) -> Result<()> {
    let client = ApiClient::new(&settings.backend_url)?;

    println!("Probing {} via {}...\n", settings.host, settings.backend_url);

    if fetch::probe_host(&client, &settings.host).await {
        println!("{} Host {} is reachable", "✓".green(), settings.host);
    } else {
        println!(
            "{} Host {} is unreachable (see servmon.log for details)",
            "✗".red(),
            settings.host
        );
    }

    Ok(())
}

async fn handle_status(settings: Settings) -> Result<()> {
    let client = ApiClient::new(&settings.backend_url)?;

    if !fetch::probe_host(&client, &settings.host).await {
        println!("{} Host {} is unreachable", "✗".red(), settings.host);
        return Ok(());
    }

    let batch = match fetch::fetch_stats(&client).await {
        Ok(batch) => batch,
        Err(e) => {
            println!("{} Failed to fetch system information: {}", "✗".red(), e);
            return Ok(());
        }
    };

    let mut stats = SystemStats::placeholder();
    fetch::merge_batch(&mut stats, batch);

    println!("Server Monitor Status\n");
    println!(
        "OS:      {} ({})",
        stats.os_info.distro, stats.os_info.architecture
    );
    println!(
        "CPU:     {} - {} Cores @ {} GHz",
        stats.cpu_info.brand, stats.cpu_info.cores, stats.cpu_info.speed
    );
    println!(
        "Memory:  Total {} | Used {} | Free {}",
        stats.memory_info.total, stats.memory_info.used, stats.memory_info.free
    );

    println!();
    println!(
        "{:<20} {:<8} {:>12} {:>12} {:>8}",
        "Filesystem", "Type", "Used", "Size", "Use%"
    );
    println!("{}", "-".repeat(64));
    for disk in &stats.storage_info {
        println!(
            "{:<20} {:<8} {:>12} {:>12} {:>8}",
            disk.fs,
            disk.kind,
            format_gb(disk.used),
            format_gb(disk.size),
            format_percent(disk.used_percent)
        );
    }

    let (running, stopped) = partition_containers(&stats.containers_info);

    println!();
    println!(
        "Containers: {} running, {} stopped",
        running.len().to_string().green(),
        stopped.len().to_string().red()
    );
    println!("{:<25} {:<15} {:<12}", "Name", "Tag", "Uptime");
    println!("{}", "-".repeat(55));
    for container in &running {
        println!(
            "{:<25} {:<15} {:<12}",
            container.name,
            container.tag,
            format_uptime(container.uptime)
        );
    }
    for container in &stopped {
        println!("{:<25} {:<15} {:<12}", container.name, container.tag, "Stopped");
    }

    Ok(())
}
