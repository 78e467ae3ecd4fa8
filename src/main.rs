use clap::Parser;
use fjour::application::capture_entry::last_template;
use fjour::application::{
    capture_entry, init, list_entries, AccountService, CaptureRequest, ConfigService, EntryQuery,
    SortOrder, SyncFilter,
};
use fjour::cli::{self, Cli, Commands};
use fjour::domain::{EntryTemplate, Location, MediaKind};
use fjour::error::{JournalError, Result};
use fjour::infrastructure::FileSystemRepository;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { path, city } => {
            init::init(&path, city)?;
            Ok(())
        }
        Commands::Bind { payload } => {
            let repo = FileSystemRepository::discover()?;
            let account = AccountService::new(repo.storage()).bind(&payload)?;
            println!("Bound to {} ({})", account.label(), account.affiliation());
            if account.account_id.is_none() {
                println!("Note: payload carries no account id; pass --account when adding entries");
            }
            Ok(())
        }
        Commands::Account => {
            let repo = FileSystemRepository::discover()?;
            match AccountService::new(repo.storage()).current()? {
                Some(account) => print!("{}", cli::format_account(&account)),
                None => println!("No account linked"),
            }
            Ok(())
        }
        Commands::Unbind => {
            let repo = FileSystemRepository::discover()?;
            AccountService::new(repo.storage()).unbind()?;
            println!("Account unbound");
            Ok(())
        }
        Commands::Templates => {
            let repo = FileSystemRepository::discover()?;
            print!("{}", cli::format_templates(last_template(&repo.storage())?));
            Ok(())
        }
        Commands::Add {
            title,
            lat,
            lon,
            note,
            field,
            template,
            account,
            photos,
            videos,
            audio,
        } => {
            let repo = FileSystemRepository::discover()?;
            let template = template
                .map(|t| EntryTemplate::from_str(&t).map_err(JournalError::InvalidEntry))
                .transpose()?;

            let mut media = Vec::new();
            media.extend(photos.into_iter().map(|p| (p, MediaKind::Photo)));
            media.extend(videos.into_iter().map(|p| (p, MediaKind::Video)));
            media.extend(audio.into_iter().map(|p| (p, MediaKind::Audio)));

            let request = CaptureRequest {
                note,
                field,
                template,
                account_id: account,
                media,
                ..CaptureRequest::new(title, Location::new(lat, lon))
            };

            let store = repo.open_entry_store();
            let entry = capture_entry(&store, &repo.storage(), request)?;
            println!("Saved entry {}", entry.id);
            Ok(())
        }
        Commands::List {
            unsynced,
            synced,
            search,
            oldest,
            limit,
        } => {
            let repo = FileSystemRepository::discover()?;
            let query = EntryQuery {
                search,
                sync: match (unsynced, synced) {
                    (true, _) => Some(SyncFilter::Unsynced),
                    (_, true) => Some(SyncFilter::Synced),
                    _ => None,
                },
                order: if oldest {
                    SortOrder::Oldest
                } else {
                    SortOrder::Newest
                },
                limit,
            };

            let entries = list_entries(&repo.open_entry_store(), &query)?;
            print!("{}", cli::format_entry_list(&entries));
            if entries.is_empty() {
                println!();
            }
            Ok(())
        }
        Commands::Show { id } => {
            let repo = FileSystemRepository::discover()?;
            let entry = repo
                .open_entry_store()
                .find_entry(&id)?
                .ok_or(JournalError::EntryNotFound(id))?;
            print!("{}", cli::format_entry_detail(&entry));
            Ok(())
        }
        Commands::Delete { id } => {
            let repo = FileSystemRepository::discover()?;
            repo.open_entry_store().delete_entry(&id)?;
            println!("Deleted entry {}", id);
            Ok(())
        }
        Commands::MarkSynced { ids } => {
            let repo = FileSystemRepository::discover()?;
            repo.open_entry_store().mark_entries_as_synced(&ids)?;
            println!("Marked {} id(s) as synced", ids.len());
            Ok(())
        }
        Commands::Sweep { dry_run } => {
            let repo = FileSystemRepository::discover()?;
            let report = repo.open_entry_store().sweep_orphaned_media(dry_run)?;
            println!("{}", cli::format_sweep_report(&report).trim_end());
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("weather_city = {}", config.weather_city);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: fjour config [--list | <key> [<value>]]");
                println!("Valid keys: weather_city, created");
                Ok(())
            }
        }
    }
}
