use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};
use dosemate_core::insight::INSIGHT_TITLE;
use dosemate_core::*;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Parser)]
#[command(name = "dosemate")]
#[command(about = "Smart pillbox medication tracker (in-memory demo)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the configured time display format (12h or 24h)
    #[arg(long, global = true)]
    time_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the health overview dashboard (default)
    Dashboard,

    /// Show the materialized schedule for a weekday
    Schedule {
        /// Weekday index, 0 = Sunday .. 6 = Saturday; defaults to today
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=6))]
        day: Option<u8>,
    },

    /// Mark a dose as taken and decrement inventory
    Take {
        /// Medication id (see `dashboard` output)
        med_id: String,
    },

    /// Refill one medication to its full capacity
    Refill {
        med_id: String,
    },

    /// Reset every medication to full capacity
    Reset {
        /// Confirm the reset; without this flag nothing happens
        #[arg(long)]
        yes: bool,
    },

    /// Add a new medication
    Add {
        #[arg(long)]
        name: String,

        /// Dosage description, e.g. "10mg"
        #[arg(long)]
        dosage: String,

        /// Pillbox slot, 1..=7
        #[arg(long)]
        compartment: u8,

        /// Dose time "HH:mm", may be given up to three times
        #[arg(long = "time")]
        times: Vec<String>,
    },

    /// Skip one dose occurrence on a weekday
    Skip {
        med_id: String,
        /// Dose time "HH:mm"
        time: String,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=6))]
        day: u8,
    },

    /// Restore a previously skipped dose occurrence
    Restore {
        med_id: String,
        time: String,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=6))]
        day: u8,
    },

    /// Print the adherence log
    Logs {
        /// Emit the full store snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// List notifications
    Notifications,
}

fn main() -> Result<()> {
    dosemate_core::logging::init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let time_format = match cli.time_format.as_deref() {
        Some("24h") => TimeFormat::TwentyFourHour,
        Some("12h") => TimeFormat::TwelveHour,
        Some(other) => {
            eprintln!("Unknown time format {:?}, using configured preference.", other);
            config.preferences.time_format
        }
        None => config.preferences.time_format,
    };
    tracing::debug!("Using time format {:?}", time_format);

    let mut store = build_demo_store(Box::new(SystemClock));
    store.set_low_inventory_threshold(config.preferences.low_inventory_threshold);

    match cli.command {
        Some(Commands::Dashboard) | None => cmd_dashboard(&mut store, time_format),
        Some(Commands::Schedule { day }) => cmd_schedule(&store, day, time_format),
        Some(Commands::Take { med_id }) => cmd_take(&mut store, &med_id),
        Some(Commands::Refill { med_id }) => cmd_refill(&mut store, &med_id),
        Some(Commands::Reset { yes }) => cmd_reset(&mut store, yes),
        Some(Commands::Add {
            name,
            dosage,
            compartment,
            times,
        }) => cmd_add(&mut store, name, dosage, compartment, times),
        Some(Commands::Skip { med_id, time, day }) => {
            store.skip_dose(&med_id, &time, day);
            println!(
                "Skipped {} at {} on {}.",
                med_id, time, DAY_NAMES[day as usize]
            );
            Ok(())
        }
        Some(Commands::Restore { med_id, time, day }) => {
            store.restore_dose(&med_id, &time, day);
            println!(
                "Restored {} at {} on {}.",
                med_id, time, DAY_NAMES[day as usize]
            );
            Ok(())
        }
        Some(Commands::Logs { json }) => cmd_logs(&store, json, time_format),
        Some(Commands::Notifications) => cmd_notifications(&mut store, time_format),
    }
}

fn cmd_dashboard(store: &mut Store, time_format: TimeFormat) -> Result<()> {
    store.fetch_insight(&StaticInsight);

    let summary = store.health_summary();
    println!("Health Overview");
    println!(
        "Weekly adherence: {}% ({} scheduled, {} missed)",
        summary.weekly_adherence, summary.total_scheduled, summary.missed_doses
    );
    println!();

    println!("Weekly activity:");
    for day in store.daily_breakdown() {
        println!(
            "  {}  {:>3}%  ({}/{} taken)",
            day.date.format("%a %d %b"),
            day.rate,
            day.taken,
            day.total
        );
    }
    println!();

    println!("Today's schedule:");
    let doses = store.today_doses();
    if doses.is_empty() {
        println!("  All set for today!");
    } else {
        for dose in &doses {
            print_dose_line(dose, time_format);
        }
    }
    println!();

    println!("My pills:");
    for med in store.medications() {
        println!(
            "  [{}] {:<14} {:>2}/{} pills left (compartment {})",
            med.id, med.name, med.inventory, med.total_capacity, med.compartment
        );
    }

    if let Some(insight) = store
        .notifications()
        .iter()
        .find(|n| n.title == INSIGHT_TITLE)
    {
        println!();
        println!("Insight: {}", insight.message);
    }

    println!();
    println!("\"{}\"", quote_of_the_day(Utc::now().date_naive()));
    println!("{} unread notifications", store.unread_count());
    Ok(())
}

fn cmd_schedule(store: &Store, day: Option<u8>, time_format: TimeFormat) -> Result<()> {
    let day = day.unwrap_or(Utc::now().weekday().num_days_from_sunday() as u8);
    let doses = store.doses_for_day(day);

    println!("Schedule for {}:", DAY_NAMES[day as usize]);
    if doses.is_empty() {
        println!("  No doses scheduled for this day.");
    } else {
        for dose in &doses {
            print_dose_line(dose, time_format);
        }
    }
    Ok(())
}

fn cmd_take(store: &mut Store, med_id: &str) -> Result<()> {
    let Some((compartment, name)) = store
        .medications()
        .iter()
        .find(|m| m.id == med_id)
        .map(|m| (m.compartment, m.name.clone()))
    else {
        // Unknown ids are a no-op in the store; report without failing
        println!("No medication with id {:?}; nothing recorded.", med_id);
        return Ok(());
    };

    store.take_dose(med_id, compartment);
    let left = store
        .medications()
        .iter()
        .find(|m| m.id == med_id)
        .map(|m| m.inventory)
        .unwrap_or(0);
    println!("Dose recorded for {} ({} pills left).", name, left);
    Ok(())
}

fn cmd_refill(store: &mut Store, med_id: &str) -> Result<()> {
    store.refill_one(med_id);
    match store.medications().iter().find(|m| m.id == med_id) {
        Some(med) => println!("Refilled {} to {} pills.", med.name, med.inventory),
        None => println!("No medication with id {:?}; nothing refilled.", med_id),
    }
    Ok(())
}

fn cmd_reset(store: &mut Store, yes: bool) -> Result<()> {
    if store.reset_all(yes) {
        println!("All medication compartments have been refilled.");
    } else {
        println!("Reset not applied. Re-run with --yes to confirm.");
    }
    Ok(())
}

fn cmd_add(
    store: &mut Store,
    name: String,
    dosage: String,
    compartment: u8,
    times: Vec<String>,
) -> Result<()> {
    let draft = MedicationDraft {
        name,
        dosage,
        compartment,
        times,
    };
    let id = store.add_medication(draft)?;
    let med = store
        .medications()
        .iter()
        .find(|m| m.id == id)
        .ok_or_else(|| Error::Other("medication missing after add".into()))?;
    println!(
        "Added {} {} in compartment {} ({} times/day).",
        med.name,
        med.dosage,
        med.compartment,
        med.times.len()
    );
    Ok(())
}

fn cmd_logs(store: &Store, json: bool, time_format: TimeFormat) -> Result<()> {
    if json {
        println!("{}", store.snapshot_json()?);
        return Ok(());
    }
    for entry in store.logs() {
        println!(
            "  {}  {}  {:<14} {:?} (compartment {})",
            entry.scheduled_time.format("%Y-%m-%d"),
            format_display_time(&entry.scheduled_time.format("%H:%M").to_string(), time_format),
            entry.medication_name,
            entry.status,
            entry.compartment
        );
    }
    Ok(())
}

fn cmd_notifications(store: &mut Store, time_format: TimeFormat) -> Result<()> {
    store.fetch_insight(&StaticInsight);
    if store.notifications().is_empty() {
        println!("No notifications.");
        return Ok(());
    }
    for n in store.notifications() {
        let marker = if n.read { " " } else { "*" };
        println!(
            "{} [{:?}] {}  {} - {}",
            marker,
            n.kind,
            format_display_time(&n.time.format("%H:%M").to_string(), time_format),
            n.title,
            n.message
        );
    }
    Ok(())
}

fn print_dose_line(dose: &DoseInstance, time_format: TimeFormat) {
    println!(
        "  {:>8}  {} {} (compartment {})",
        format_display_time(&dose.dose_time, time_format),
        dose.name,
        dose.dosage,
        dose.compartment
    );
}
