use agenda::core::clock::{Clock, SystemClock};
use agenda::store::{FileStore, TaskStore};

fn main() {
    if let Ok(journal) = systemd_journal_logger::JournalLog::new() {
        if let Err(e) = journal
            .with_syslog_identifier("agenda-list".to_string())
            .install()
        {
            eprintln!("agenda-list: journal unavailable, logging disabled: {}", e);
        }
    }
    log::set_max_level(log::LevelFilter::Info);

    let cosmic_cfg = match cosmic::cosmic_config::Config::new(agenda::config::APP_ID, agenda::config::CONFIG_VERSION) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to open config: {:?}", e);
            std::process::exit(1);
        }
    };
    let config = <agenda::config::AgendaConfig as cosmic::cosmic_config::CosmicConfigEntry>::get_entry(&cosmic_cfg)
        .unwrap_or_else(|(_, cfg)| cfg);

    let store = FileStore::new(config.storage_directory.clone());
    println!("Store: {}\n", store.dir().display());

    let tasks = match store.read_all() {
        Ok(tasks) => tasks,
        Err(e) => {
            eprintln!("Could not read tasks: {}", e);
            std::process::exit(1);
        }
    };

    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }

    let now = SystemClock.now();
    for (i, task) in tasks.iter().enumerate() {
        let marker = if task.is_expired_at(now) { "expired" } else { "pending" };
        println!("{:>3}. [{}] {} ({})", i + 1, marker, task.title, task.display_text);
        if !task.description.is_empty() {
            println!("     {}", task.description);
        }
        println!("     id {}  at {}", task.id, task.scheduled_at.to_rfc3339());
    }

    let expired = tasks.iter().filter(|t| t.is_expired_at(now)).count();
    println!("\n{} tasks, {} expired", tasks.len(), expired);
}
