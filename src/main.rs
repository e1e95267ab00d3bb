extern crate chrono;
extern crate flexi_logger;
extern crate getopts;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod config;
mod departures;
mod drawing;
mod fetch;
mod fonts;
mod result;
mod structs;
mod tasks;
mod upload;

const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn build_opts() -> getopts::Options {
    let mut opts = getopts::Options::new();
    opts.optopt("c", "config", "JSON config file", "FILENAME");
    opts.optopt("i", "save-image", "Where to write (or, for upload, read) the jpeg", "FILENAME");
    opts.optflag("u", "upload", "Upload the board to the display device after rendering");
    opts.optopt("", "font", "TrueType font for regular text", "FILENAME");
    opts.optopt("", "bold-font", "TrueType font for headings and times", "FILENAME");
    opts.optopt("", "log-dir", "Also write logs to this directory", "DIR");
    opts.optflag("h", "help", "Print this help");
    return opts;
}

fn usage(opts: &getopts::Options) -> String {
    return opts.usage("Usage: infoboard <departures|tasks|upload> [IMAGE] [options]");
}

fn init_logging(log_dir: Option<String>) -> result::BoardResult<flexi_logger::LoggerHandle> {
    let logger = flexi_logger::Logger::try_with_env_or_str("info")?
        .format(flexi_logger::detailed_format);
    let logger = match log_dir {
        Some(dir) => logger
            .log_to_file(flexi_logger::FileSpec::default().directory(dir))
            .duplicate_to_stderr(flexi_logger::Duplicate::Info),
        None => logger.log_to_stderr(),
    };
    return Ok(logger.start()?);
}

fn load_config(matches: &getopts::Matches) -> result::BoardResult<config::Config> {
    let mut config = match matches.opt_str("config") {
        Some(path) => config::Config::from_file(path)?,
        None => config::Config::default(),
    }.with_env_overrides();

    if let Some(font) = matches.opt_str("font") {
        config.font_path = Some(std::path::PathBuf::from(font));
    }
    if let Some(font) = matches.opt_str("bold-font") {
        config.bold_font_path = Some(std::path::PathBuf::from(font));
    }
    return Ok(config);
}

/// Header clock text and the local calendar date.
fn local_clock(config: &config::Config, now: chrono::DateTime<chrono::Utc>) -> result::BoardResult<(String, chrono::NaiveDate)> {
    match config.tz()? {
        Some(tz) => {
            let local = now.with_timezone(&tz);
            return Ok((local.format("%H:%M").to_string(), local.date_naive()));
        },
        None => {
            let local = now.with_timezone(&chrono::Local);
            return Ok((local.format("%H:%M").to_string(), local.date_naive()));
        },
    }
}

fn upload_target_if_requested(matches: &getopts::Matches, config: &config::Config) -> result::BoardResult<Option<upload::UploadTarget>> {
    if !matches.opt_present("upload") {
        return Ok(None);
    }
    return Ok(Some(upload::UploadTarget::from_config(config)?));
}

fn finish_board(
    imgbuf: &image::RgbImage,
    output: &std::path::Path,
    target: Option<upload::UploadTarget>) -> result::BoardResult<i32> {
    drawing::save_jpeg(imgbuf, output)?;
    info!("Display image saved to: {}", output.display());

    if let Some(target) = target {
        if !upload::upload_image(&target, output) {
            return Ok(EXIT_FAILURE);
        }
    }
    return Ok(0);
}

fn run_departures(matches: &getopts::Matches, config: &config::Config) -> result::BoardResult<i32> {
    let output = matches.opt_str("save-image").unwrap_or(drawing::DEPARTURES_IMAGE.to_string());
    let target = upload_target_if_requested(matches, config)?;

    let now = chrono::Utc::now();
    let (clock, _) = local_clock(config, now)?;

    info!("Fetching bus departures...");
    let rows = departures::get_departure_rows(config, now);
    if rows.is_empty() {
        info!("No departures found");
    } else {
        info!("Found {} upcoming buses", rows.len());
        for row in &rows {
            info!("  {}: {} - {}", row.label, row.destination, row.time_text);
        }
    }

    let styles = drawing::Styles::load(config);
    let imgbuf = drawing::generate_departures_image(&rows, &clock, &styles);

    return finish_board(&imgbuf, std::path::Path::new(&output), target);
}

fn run_tasks(matches: &getopts::Matches, config: &config::Config) -> result::BoardResult<i32> {
    config.require_auth_token()?;
    let output = matches.opt_str("save-image").unwrap_or(drawing::TASKS_IMAGE.to_string());
    let target = upload_target_if_requested(matches, config)?;

    let (_, today) = local_clock(config, chrono::Utc::now())?;

    info!("Fetching today's tasks from Todoist...");
    let rows = tasks::get_task_rows(config, today)?;
    if rows.is_empty() {
        info!("No tasks found for today");
    } else {
        let completed = rows.iter().filter(|t| t.completed).count();
        info!("Found {} active tasks and {} completed tasks", rows.len() - completed, completed);
        for task in &rows {
            if task.completed {
                info!("  [x] {}", task.content);
            } else {
                info!("  [ ] [{}] {} - {}", task.priority_label(), task.content, task.due_text);
            }
        }
    }

    let styles = drawing::Styles::load(config);
    let imgbuf = drawing::generate_tasks_image(&rows, &styles);

    return finish_board(&imgbuf, std::path::Path::new(&output), target);
}

fn run_upload(matches: &getopts::Matches, config: &config::Config) -> result::BoardResult<i32> {
    let path = matches.free.get(1).cloned()
        .or(matches.opt_str("save-image"))
        .unwrap_or(drawing::DEPARTURES_IMAGE.to_string());
    let target = upload::UploadTarget::from_config(config)?;

    if upload::upload_image(&target, std::path::Path::new(&path)) {
        return Ok(0);
    }
    return Ok(EXIT_FAILURE);
}

fn run(matches: &getopts::Matches) -> result::BoardResult<i32> {
    let config = load_config(matches)?;
    debug!("Config: device_url={:?} upload_dir={} timezone={:?}",
           config.device_url, config.upload_dir, config.timezone);

    match matches.free.first().map(|s| s.as_str()) {
        Some("departures") => return run_departures(matches, &config),
        Some("tasks") => return run_tasks(matches, &config),
        Some("upload") => return run_upload(matches, &config),
        Some(other) => return Err(result::make_error(
            &format!("Unknown command '{}', expected departures, tasks or upload", other))),
        None => return Err(result::make_error("No command given, expected departures, tasks or upload")),
    }
}

fn exit_code(err: &result::BoardError) -> i32 {
    match *err {
        result::BoardError::MissingConfig(_) => EXIT_USAGE,
        result::BoardError::UsageError(_) => EXIT_USAGE,
        result::BoardError::OtherError(_) => EXIT_USAGE,
        _ => EXIT_FAILURE,
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let opts = build_opts();

    let matches = match opts.parse(&args[1..]) {
        Ok(matches) => matches,
        Err(err) => {
            eprintln!("{}\n{}", err, usage(&opts));
            std::process::exit(EXIT_USAGE);
        },
    };

    if matches.opt_present("help") {
        println!("{}", usage(&opts));
        return;
    }

    let logger = match init_logging(matches.opt_str("log-dir")) {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(EXIT_USAGE);
        },
    };

    let code = match run(&matches) {
        Ok(code) => code,
        Err(err) => {
            error!("{}", err);
            exit_code(&err)
        },
    };

    logger.flush();
    std::process::exit(code);
}
