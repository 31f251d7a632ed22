use catalog_etl::core::pipeline::{input_delimiter, read_raw_records};
use catalog_etl::core::ConfigProvider;
use catalog_etl::utils::{logger, validation::Validate};
use catalog_etl::{process_batch, CatalogPipeline, EtlEngine, LocalStorage, Strictness, TomlConfig};
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-etl")]
#[command(about = "Catalog ETL driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "catalog-etl.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override strict mode from config
    #[arg(long)]
    strict: Option<bool>,

    /// Parse the input and report what would be written, without writing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based catalog ETL");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(strict) = args.strict {
        config.transform.strict = Some(strict);
        tracing::info!("🔧 Strict mode overridden to: {}", strict);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        perform_dry_run(&config)?;
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(".");
    let pipeline = CatalogPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Catalog ETL completed successfully!");
            println!("✅ Catalog ETL completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Catalog ETL failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Pipeline: {} v{}",
        config.pipeline.name, config.pipeline.version
    );
    println!("  Input: {}", config.input_path());
    println!("  Output: {}", config.output_path());
    println!("  Header Row: {}", config.has_header());
    println!("  Strict: {}", config.strict());
    println!("  Formats: {}", config.output_formats().join(", "));

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Dry Run Analysis:");

    let data = std::fs::read(config.input_path())?;
    let records = read_raw_records(&data, config.has_header(), input_delimiter(config.input_path()))?;
    let result = process_batch(records, Strictness::Lenient)?;

    let structured = result
        .records
        .iter()
        .filter(|r| r.has_structured_prereq())
        .count();

    println!("  📊 Parsable records: {}", result.records.len());
    println!("  🔗 With structured prerequisites: {}", structured);
    println!("  ⚠️ Without a course code: {}", result.rejected.len());
    for rejected in result.rejected.iter().take(10) {
        println!("    line {}: {:?}", rejected.line, rejected.title);
    }

    if config.strict() && !result.rejected.is_empty() {
        println!("  ❗ Strict mode is on: a real run would abort on line {}", result.rejected[0].line);
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for per-record details during an actual run.");

    Ok(())
}
