use cosmic::app::Settings;
use cosmic::cosmic_config::CosmicConfigEntry;
use cosmic::iced::Limits;

mod application;
mod components;
mod localize;
mod message;
mod pages;

use agenda::config;

use application::{Agenda, Flags, LaunchMode};
use config::{APP_ID, AgendaConfig, CONFIG_VERSION};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cosmic_cfg = cosmic::cosmic_config::Config::new(APP_ID, CONFIG_VERSION)?;
    let config = AgendaConfig::get_entry(&cosmic_cfg).unwrap_or_else(|(errors, cfg)| {
        for e in errors {
            eprintln!("agenda: config entry error: {:?}", e);
        }
        cfg
    });

    // Log to the systemd user journal (`journalctl --user -t agenda -f`).
    // Our own targets at info/debug (per config), everything else at warn.
    {
        struct FilteredJournal {
            inner: systemd_journal_logger::JournalLog,
        }

        impl log::Log for FilteredJournal {
            fn enabled(&self, metadata: &log::Metadata) -> bool {
                let target = metadata.target();
                if target.starts_with("agenda")
                    || target.starts_with("application")
                    || target.starts_with("pages")
                    || target.starts_with("components")
                {
                    let max = if agenda::debug_logging() { log::LevelFilter::Debug } else { log::LevelFilter::Info };
                    metadata.level() <= max
                } else {
                    metadata.level() <= log::LevelFilter::Warn
                }
            }
            fn log(&self, record: &log::Record) {
                if self.enabled(record.metadata()) {
                    self.inner.log(record);
                }
            }
            fn flush(&self) {
                self.inner.flush();
            }
        }

        agenda::set_debug_logging(config.debug_logging);

        match systemd_journal_logger::JournalLog::new() {
            Ok(journal) => {
                let journal = journal.with_syslog_identifier("agenda".to_string());
                log::set_boxed_logger(Box::new(FilteredJournal { inner: journal }))?;
                // Global max must be Debug so our debug logs can pass when toggled.
                log::set_max_level(log::LevelFilter::Debug);
            }
            Err(e) => eprintln!("agenda: journal unavailable, logging disabled: {}", e),
        }
    }

    localize::localize();

    let launch_mode = if std::env::args().any(|a| a == "--new") {
        LaunchMode::Capture
    } else {
        LaunchMode::Normal
    };

    let settings = Settings::default()
        .size_limits(Limits::NONE.min_width(360.0).min_height(480.0))
        .theme(application::theme_for(config.dark_mode));

    let flags = Flags { config, cosmic_config: cosmic_cfg, launch_mode };
    cosmic::app::run::<Agenda>(settings, flags)?;

    Ok(())
}
