use clap::Parser;
use std::path::{Path, PathBuf};
use tumor_ai::{backend, cli, config, error, terminal, upload};
use tumor_ai_common::{Client, Variant};
use backend::HttpBackend;
use cli::{Cli, Commands};
use config::Config;
use error::{Result, TumorAiError};
use terminal::TerminalView;

type CliClient = Client<HttpBackend, TerminalView>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;
    let url = cli.url.as_deref();

    match cli.command {
        Commands::Status => {
            let client = build_client(&config, url, Path::new("."))?;
            let status = client.check_connectivity().await;
            if !status.connected {
                return Err(TumorAiError::Disconnected(status.message));
            }
        }

        Commands::Classify { image } => {
            let client = connect(&config, url, &cli::default_output_dir(&image)).await?;
            upload::stage_path(&client, &image)?;
            client.classify().await?;
        }

        Commands::Detect { image, output } => {
            let output = output.unwrap_or_else(|| cli::default_output_dir(&image));
            let client = connect(&config, url, &output).await?;
            upload::stage_path(&client, &image)?;
            client.detect().await?;
        }

        Commands::Segment { image, output } => {
            let output = output.unwrap_or_else(|| cli::default_output_dir(&image));
            let client = connect(&config, url, &output).await?;
            upload::stage_path(&client, &image)?;
            client.segment().await?;
        }

        Commands::Run { image, output, actions } => {
            let output = output.unwrap_or_else(|| cli::default_output_dir(&image));
            let client = connect(&config, url, &output).await?;
            upload::stage_path(&client, &image)?;

            // 各アクションは独立して同時に実行する
            let variants: Vec<Variant> = actions.into_iter().map(Variant::from).collect();
            let results =
                futures::future::join_all(variants.iter().map(|variant| client.run(*variant)))
                    .await;

            let total = results.len();
            let first_error = results.into_iter().find_map(|r| r.err());
            if let Some(err) = first_error {
                return Err(err.into());
            }
            println!("\n✅ {}件のアクションが完了", total);
        }

        Commands::Config { set_url, set_timeout, show } => {
            let mut config = config;
            let changed = set_url.is_some() || set_timeout.is_some();

            if let Some(url) = set_url {
                config.set_base_url(url)?;
            }
            if let Some(seconds) = set_timeout {
                config.timeout_seconds = seconds;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  ベースURL: {}", config.base_url);
                println!("  接続先（実効）: {}", config.resolve_base_url(url));
                println!("  タイムアウト: {}秒", config.timeout_seconds);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn build_client(config: &Config, url: Option<&str>, output: &Path) -> Result<CliClient> {
    let base_url = config.resolve_base_url(url);
    tracing::info!("API: {}", base_url);
    let backend = HttpBackend::new(base_url, config.timeout())?;
    Ok(Client::new(backend, TerminalView::new(PathBuf::from(output))))
}

/// クライアント生成と起動時の疎通確認（失敗しても続行）
async fn connect(config: &Config, url: Option<&str>, output: &Path) -> Result<CliClient> {
    let client = build_client(config, url, output)?;
    let status = client.check_connectivity().await;
    if !status.connected {
        tracing::warn!("{}; continuing anyway", status.message);
    }
    Ok(client)
}
