use clap::Parser;
use sales_etl::core::ConfigProvider;
use sales_etl::utils::{logger, validation::Validate};
use sales_etl::{CliConfig, EtlEngine, EtlError, LocalStorage, SalesPipeline, TomlConfig};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting sales-etl");
    tracing::debug!("CLI config: {:?}", cli);

    let outcome = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(&path).and_then(|config| {
                let monitor = cli.monitor || config.monitoring_enabled();
                run(config, monitor)
            })
        }
        None => {
            let monitor = cli.monitor;
            run(cli, monitor)
        }
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Run failed: {} (Category: {:?})",
            e,
            e.category()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        if matches!(e, EtlError::SourceNotFound { .. }) {
            eprintln!("{}", e.recovery_suggestion());
        } else {
            eprintln!("💡 {}", e.recovery_suggestion());
        }
        std::process::exit(1);
    }

    Ok(())
}

fn run<C: ConfigProvider + Validate>(config: C, monitor: bool) -> Result<(), EtlError> {
    config.validate()?;

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = SalesPipeline::new(storage, config);
    let mut engine = EtlEngine::new_with_monitoring(pipeline, monitor);

    let summary = engine.run()?;
    println!("✅ Report saved as '{}'", summary.report_path);
    println!("✅ Dashboard saved as '{}'", summary.chart_path);
    println!("🎉 Data automation completed successfully!");
    Ok(())
}
