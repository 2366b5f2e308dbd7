use anyhow::Result;
use clap::{App, Arg, SubCommand};
use log::{debug, warn};

use crate::projects::PROJECTS;
use crate::source::base::VideoSource;
use crate::source::vimeo::{VimeoQuery, VimeoSettings};

/// Fetch the carousel videos once and print them
fn list() -> Result<()> {
    debug!("Loading config");
    let cfg = crate::config::Config::load()?;
    let query = VimeoQuery::new(VimeoSettings::from_config(&cfg));

    let videos = query.videos()?;
    if videos.is_empty() {
        warn!("Collection {:?} has no videos", &cfg.collection);
    }
    for (i, v) in videos.iter().enumerate() {
        println!(
            "{}. {}\nColor: {}\nImage: {}\nDescription: {}\n----",
            i + 1,
            v.title,
            v.accent_color(),
            v.image,
            v.description
        );
    }
    Ok(())
}

/// Print the static project sections
fn projects() -> Result<()> {
    for (i, p) in PROJECTS.iter().enumerate() {
        println!(
            "{} - {} (image {}, {} background)\nImage: {}",
            i + 1,
            p.title,
            if p.image_right { "right" } else { "left" },
            if p.dark_bg { "dark" } else { "light" },
            p.image,
        );
    }
    Ok(())
}

fn config_logging(verbosity: u64) -> Result<()> {
    // Level for this application
    let internal_level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,  // -v
        2 => log::LevelFilter::Debug, // -vv
        _ => log::LevelFilter::Trace, // -vvv
    };

    // Show log output for 3rd party library at -vvv
    let thirdparty_level = match verbosity {
        0..=2 => log::LevelFilter::Warn,
        _ => log::LevelFilter::Debug, // -vvv
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(thirdparty_level)
        .level_for("showreel", internal_level)
        .chain(std::io::stdout())
        .apply()?;

    Ok(())
}

pub fn main() -> Result<()> {
    // Web subcommand
    let sc_web = SubCommand::with_name("web").about("serve the landing page");

    // List subcommand
    let sc_list = SubCommand::with_name("list").about("fetch and list carousel videos");

    // Projects subcommand
    let sc_projects = SubCommand::with_name("projects").about("list showcase projects");

    // Main command
    let app = App::new("showreel")
        .subcommand(sc_web)
        .subcommand(sc_list)
        .subcommand(sc_projects)
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .takes_value(false)
                .global(true),
        );

    // Parse
    let app_m = app.get_matches();

    // Logging levels
    let verbosity = app_m.occurrences_of("verbose");
    config_logging(verbosity)?;

    match app_m.subcommand() {
        ("web", Some(_sub_m)) => crate::web::main()?,
        ("list", Some(_sub_m)) => list()?,
        ("projects", Some(_sub_m)) => projects()?,
        _ => {
            return Err(anyhow::anyhow!("Unhandled subcommand"));
        }
    };

    Ok(())
}
