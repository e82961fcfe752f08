use ddragon_backend::{
    Build, Catalog, DDragonClient, DDragonConfig, DEFAULT_BASE_URL, DEFAULT_LOCALE,
    SUMMONERS_RIFT, select_build, strip_markup,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

use clap::Parser;
use log::{LevelFilter, error, info};
use log4rs::{
    Config,
    append::console::{ConsoleAppender, Target},
    config::{Appender, Logger, Root},
    encode::pattern::PatternEncoder,
    init_config,
};

#[derive(clap::ValueEnum, Clone, Debug)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "lol-random")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Random League of Legends build generator", long_about = None)]
struct Cli {
    /// Number of builds to generate
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u16).range(1..), default_value_t = 1)]
    count: u16,
    /// Seed for a reproducible sequence of builds
    #[arg(short = 's', long)]
    seed: Option<u64>,
    /// Data Dragon version to load instead of the latest one
    #[arg(long)]
    game_version: Option<String>,
    #[arg(long, default_value = DEFAULT_LOCALE)]
    locale: String,
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Map the items must be available on
    #[arg(short = 'm', long, default_value_t = SUMMONERS_RIFT)]
    map: u16,
    /// Print builds as JSON
    #[arg(long)]
    json: bool,
    #[arg(short = 'l', long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

impl Cli {
    fn config(&self) -> DDragonConfig {
        DDragonConfig {
            base_url: self.base_url.clone(),
            locale: self.locale.clone(),
            map_id: self.map,
            version: self.game_version.clone(),
            ..Default::default()
        }
    }
}

fn init_logger(level: LevelFilter) -> anyhow::Result<()> {
    // 日志输出到 stderr，避免干扰 stdout 上的出装结果
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(
            "{h({d(%Y-%m-%dT%H:%M:%S.%f)(local):.23})} [{h({l})}] {m}{n}",
        )))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(stderr)))
        .logger(
            Logger::builder()
                .appender("console")
                .additive(false)
                .build("lol_random", level),
        )
        .logger(
            Logger::builder()
                .appender("console")
                .additive(false)
                .build("ddragon_backend", level),
        )
        .build(Root::builder().build(LevelFilter::Warn))?;
    init_config(config)?;
    Ok(())
}

fn render_build(client: &DDragonClient, catalog: &Catalog, build: &Build) -> String {
    let version = catalog.version();
    let mut lines = vec![
        format!(
            "{}, {} [{}]",
            build.champion.name,
            build.champion.title,
            build.champion.tags.join(", ")
        ),
        format!(
            "  {}",
            client.champion_image_url(version, &build.champion.image.full)
        ),
        "Items:".to_string(),
    ];
    for item in build.legendary_items.iter().chain([&build.boots]) {
        lines.push(format!(
            "  {:<32} {:>5}g  {}",
            item.name,
            item.gold.total,
            client.item_image_url(version, &item.image.full)
        ));
    }
    lines.push(format!(
        "Runes: {} / {}",
        build.primary_tree.name, build.secondary_tree.name
    ));
    for rune in &build.runes {
        lines.push(format!(
            "  {:<24} {}",
            rune.name,
            strip_markup(&rune.short_desc).replace('\n', " ")
        ));
    }
    lines.join("\n")
}

async fn core(args: Cli) -> anyhow::Result<()> {
    let client = DDragonClient::new(args.config())?;
    let catalog = client.fetch_catalog().await?;

    let mut rng = match args.seed {
        Some(seed) => {
            info!("使用随机种子 {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let builds = (0..args.count)
        .map(|_| select_build(&catalog, &mut rng))
        .collect::<ddragon_backend::Result<Vec<Build>>>()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&builds)?);
    } else {
        let rendered = builds
            .iter()
            .map(|build| render_build(&client, &catalog, build))
            .collect::<Vec<_>>();
        println!("Data Dragon {}\n", catalog.version());
        println!("{}", rendered.join("\n\n"));
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    if let Err(e) = init_logger(args.log_level.to_filter()) {
        eprintln!("初始化日志失败: {e}");
    }

    if let Err(e) = core(args).await {
        error!("生成出装失败: {e}");
        std::process::exit(1);
    }
}

#[test]
fn test_cli_definition() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn test_cli_config() {
    let cli = Cli::parse_from([
        "lol-random",
        "-n",
        "3",
        "--game-version",
        "14.1.1",
        "--locale",
        "ko_KR",
        "--seed",
        "7",
    ]);
    assert_eq!(cli.count, 3);
    assert_eq!(cli.seed, Some(7));
    let config = cli.config();
    assert_eq!(config.version.as_deref(), Some("14.1.1"));
    assert_eq!(config.locale, "ko_KR");
    assert_eq!(config.map_id, SUMMONERS_RIFT);
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
}
