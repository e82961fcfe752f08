use log::LevelFilter;
use log4rs::Config;
use log4rs::append::console::{ConsoleAppender, Target};
#[cfg(debug_assertions)]
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

pub fn init_logger() -> anyhow::Result<()> {
    let encoder = PatternEncoder::new(
        "{h({d(%Y-%m-%d %H:%M:%S.%f)(local):.23})} | {h({l}):>5} | {M}:{L} - {m}{n}",
    );
    let console = ConsoleAppender::builder()
        .target(Target::Stdout)
        .encoder(Box::new(encoder.clone()))
        .build();

    #[cfg(debug_assertions)]
    let level = LevelFilter::Trace;
    #[cfg(not(debug_assertions))]
    let level = LevelFilter::Info;

    let app_logger = Logger::builder()
        .appender("console")
        .additive(false)
        .build("lol_randomizer", level);
    let backend_logger = Logger::builder()
        .appender("console")
        .additive(false)
        .build("ddragon_backend", level);

    let builder = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console)))
        .logger(app_logger)
        .logger(backend_logger);

    #[cfg(debug_assertions)]
    let builder = {
        // 调试时额外记录请求详情到文件
        let log_file = FileAppender::builder()
            .encoder(Box::new(encoder))
            .build("log/debug.log")?;
        let client_logger = Logger::builder()
            .appender("file")
            .build("ddragon_backend::client", LevelFilter::Trace);
        builder
            .appender(Appender::builder().build("file", Box::new(log_file)))
            .logger(client_logger)
    };

    let config = builder.build(Root::builder().build(LevelFilter::Warn))?;
    log4rs::init_config(config)?;
    Ok(())
}

#[test]
fn test_init_logger() {
    init_logger().unwrap();
    log::info!("This is an info message");
    log::warn!("This is a warning message");
    log::error!("This is an error message");
}
