use adventure_log::{
    Entry, EntryId, EntryStore, ReadPolicy, catalog, local_now,
    stats::{self, DailyGroup},
};
use clap::Parser;
use cli::{Cli, Command};
use color_eyre::eyre::{Result, WrapErr};
use time::{Date, OffsetDateTime, macros::format_description};
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ADVENTURE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // The local offset lookup refuses to run once other threads exist.
    let now = local_now();

    let read_policy = if cli.recover_corrupt {
        ReadPolicy::RecoverEmpty
    } else {
        ReadPolicy::Strict
    };
    let store = EntryStore::open(&cli.store).with_read_policy(read_policy);

    match cli.command {
        Command::Add { title, icon } => {
            if !catalog::is_known(&icon) {
                tracing::warn!(%icon, "Icon is not in the catalog");
            }

            let entry = Entry::new(title, icon, now);
            let id = entry.id.clone();

            store
                .append(entry)
                .wrap_err("Failed to save adventure")?;

            println!("Adventure logged ({id})");
        }
        Command::Remove { id } => {
            let removed = store
                .remove(&EntryId::from(id))
                .wrap_err("Failed to delete adventure")?;

            match removed {
                Some(entry) => println!("Removed {} {} ({})", entry.icon, entry.title, entry.id),
                None => println!("Adventure does not exist :("),
            }
        }
        Command::List => {
            let entries = store.list().wrap_err("Failed to load adventures")?;

            if entries.is_empty() {
                println!("No adventures yet. Log one with `add`!");
            }

            for entry in &entries {
                println!(
                    "{} {} ({}):\n\tlogged at: {} {}",
                    entry.icon,
                    entry.title,
                    entry.id,
                    entry.day,
                    clock_time(entry.created_at)?
                );
            }
        }
        Command::History => {
            let entries = store.list().wrap_err("Failed to load adventures")?;
            let groups = stats::group_by_date(&entries);

            if groups.is_empty() {
                println!("No adventures yet. Log one with `add`!");
            }

            for group in &groups {
                print_group(group, now.date())?;
            }
        }
        Command::Day { day } => {
            let entries = store.list().wrap_err("Failed to load adventures")?;
            let on_day = stats::entries_on(&entries, day);

            if on_day.is_empty() {
                println!("No adventures on {day}");
            }

            for entry in &on_day {
                println!(
                    "{}  {} {} ({})",
                    clock_time(entry.created_at)?,
                    entry.icon,
                    entry.title,
                    entry.id
                );
            }
        }
        Command::Stats { json } => {
            let entries = store.list().wrap_err("Failed to load adventures")?;
            let summary = stats::summarize(&entries, now);

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&summary).wrap_err("Failed to encode stats")?
                );
                return Ok(());
            }

            if summary.total_adventures == 0 {
                println!("No data yet. Log some adventures to see your statistics!");
                return Ok(());
            }

            let favorite = &summary.stats.most_frequent_icon;

            println!("Total adventures: {}", summary.total_adventures);
            println!("This week: {} adventures logged", summary.stats.total_this_week);
            println!("Day streak: {}", summary.streak);
            match summary.most_active_day {
                Some(active) => println!(
                    "Most active day: {} ({} adventures)",
                    active.day.date().weekday(),
                    active.count
                ),
                None => println!("Most active day: No data"),
            }
            if favorite.count > 0 {
                println!("Favorite activity: {} ({} times)", favorite.icon, favorite.count);
            } else {
                println!("Favorite activity: No data yet");
            }
        }
        Command::Icons => {
            for category in catalog::CATEGORIES {
                println!("{}:\n\t{}", category.name, category.icons.join(" "));
            }
        }
    }

    Ok(())
}

fn print_group(group: &DailyGroup, today: Date) -> Result<()> {
    let noun = if group.count == 1 {
        "adventure"
    } else {
        "adventures"
    };
    println!("{} ({} {noun})", day_heading(group.day.date(), today)?, group.count);

    for entry in &group.entries {
        println!(
            "\t{}  {} {} ({})",
            clock_time(entry.created_at)?,
            entry.icon,
            entry.title,
            entry.id
        );
    }

    Ok(())
}

fn day_heading(day: Date, today: Date) -> Result<String> {
    if day == today {
        return Ok("Today".to_owned());
    }
    if today.previous_day() == Some(day) {
        return Ok("Yesterday".to_owned());
    }

    day.format(format_description!("[weekday], [month repr:long] [day padding:none]"))
        .wrap_err("Failed to format day")
}

fn clock_time(at: OffsetDateTime) -> Result<String> {
    at.format(format_description!("[hour]:[minute]"))
        .wrap_err("Failed to format time")
}
