use std::path::Path;

fn format_record(out: fern::FormatCallback, message: &std::fmt::Arguments, record: &log::Record) {
    out.finish(format_args! {
        "[{}] {}:{} {} {}",
        record.level(),
        record.file().unwrap_or("?"),
        record.line().unwrap_or(0),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        message
    })
}

pub fn init_logger(level: log::LevelFilter, log_file: Option<&Path>) -> Result<(), fern::InitError> {
    let base_config = fern::Dispatch::new();

    let application_config = fern::Dispatch::new()
        .level(level)
        // actix logs every worker start at info
        .level_for("actix_server", log::LevelFilter::Warn)
        .format(format_record)
        .chain(std::io::stdout());

    let mut base_config = base_config.chain(application_config);

    if let Some(path) = log_file {
        let emergency_config = fern::Dispatch::new()
            .level(log::LevelFilter::Error)
            .format(format_record)
            .chain(fern::log_file(path)?);
        base_config = base_config.chain(emergency_config);
    }

    base_config.apply()?;
    Ok(())
}
