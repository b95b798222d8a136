pub fn setup(is_debug: bool) -> Result<(), data::log::Error> {
    let level = if is_debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let mut logger = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}:{} [{}:{}] -- {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.file().unwrap_or("?"),
                record.line().unwrap_or(0),
                message
            ));
        })
        .level(log::LevelFilter::Off)
        .level_for("equation_graph", level)
        .level_for("equation_graph_data", level);

    if is_debug {
        logger = logger.chain(std::io::stdout());
    } else {
        logger = logger.chain(data::log::file()?);
    }

    logger.apply()?;
    Ok(())
}
