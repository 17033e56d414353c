//! Desktop entry point for the timetable generator.
//!
//! Opens `timetable.db` in the working directory, writes logs under
//! `./logs`, and runs the form until the window closes.

mod app;
mod state;

use anyhow::{anyhow, Context};
use app::{initial_window_size, TimetableApp};
use eframe::egui;
use log::info;
use timetable_core::db::{open_db, DEFAULT_DB_FILE_NAME};
use timetable_core::{
    default_log_level, init_logging, logging_status, ScheduleConfig, ViewLayout,
};

const LOG_DIR_NAME: &str = "logs";

fn main() -> anyhow::Result<()> {
    let log_dir = std::env::current_dir()
        .context("cannot resolve working directory")?
        .join(LOG_DIR_NAME);
    if let Err(err) = init_logging(default_log_level(), &log_dir) {
        eprintln!("file logging disabled: {err}");
    }

    let conn = open_db(DEFAULT_DB_FILE_NAME)
        .with_context(|| format!("cannot open {DEFAULT_DB_FILE_NAME}"))?;
    let config = ScheduleConfig::standard();
    let layout = ViewLayout::STANDARD;

    let (log_level, log_dir) = logging_status().unwrap_or(("off", log_dir));
    info!(
        "event=app_start module=app status=ok version={} classes={} log_level={log_level} log_dir={}",
        timetable_core::core_version(),
        config.class_names().len(),
        log_dir.display()
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(layout.window_title)
            .with_inner_size(initial_window_size(&layout, &config)),
        ..Default::default()
    };

    eframe::run_native(
        layout.window_title,
        native_options,
        Box::new(move |_cc| Box::new(TimetableApp::new(conn, config, layout))),
    )
    .map_err(|err| anyhow!("window event loop failed: {err}"))
}
