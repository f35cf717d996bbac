use chrono::Utc;
use clap::{Parser, Subcommand};
use fittrack_core::*;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "fittrack")]
#[command(about = "Fitness self-tracking system", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
    },

    /// Log in with an existing account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// End the current session
    Logout,

    /// Show who is logged in
    Whoami,

    /// Show or update the fitness profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Log a body measurement
    Measure {
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        waist: Option<f64>,
        #[arg(long)]
        chest: Option<f64>,
        #[arg(long)]
        bicep: Option<f64>,
        #[arg(long)]
        thigh: Option<f64>,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Show measurement history
    History,

    /// Manage the workout log
    Workout {
        #[command(subcommand)]
        command: WorkoutCommands,
    },

    /// Manage transformation photos
    Photo {
        #[command(subcommand)]
        command: PhotoCommands,
    },

    /// Show progress insights and workout stats
    Insights,

    /// Aggregate statistics across all stored users
    Admin {
        /// Filter the user table by name or email
        #[arg(long)]
        search: Option<String>,
    },

    /// Export measurement history to CSV
    Export {
        /// Output file (default: <data-dir>/measurements.csv)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show the profile with derived metrics
    Show,

    /// Update profile fields (only provided flags are written)
    Set {
        /// Height in cm
        #[arg(long)]
        height: Option<f64>,
        /// Current weight in kg
        #[arg(long)]
        weight: Option<f64>,
        /// Target weight in kg
        #[arg(long)]
        target_weight: Option<f64>,
        #[arg(long)]
        age: Option<u32>,
        /// male, female, or other
        #[arg(long)]
        gender: Option<String>,
        /// sedentary, lightly_active, moderately_active, very_active, extremely_active
        #[arg(long)]
        activity: Option<String>,
        #[arg(long)]
        goal: Option<String>,
        /// beginner, intermediate, or advanced
        #[arg(long)]
        experience: Option<String>,
        /// morning, afternoon, evening, or night
        #[arg(long)]
        workout_time: Option<String>,
        /// Workout days per week (0-7)
        #[arg(long)]
        frequency: Option<u32>,
        #[arg(long)]
        diet: Option<String>,
        #[arg(long)]
        injuries: Option<String>,
        #[arg(long)]
        medical: Option<String>,
        /// Monthly gym/equipment budget
        #[arg(long)]
        budget: Option<f64>,
    },
}

#[derive(Subcommand)]
enum WorkoutCommands {
    /// Log a workout session
    Add {
        #[arg(long)]
        name: String,
        /// Duration in minutes
        #[arg(long)]
        duration: u32,
        #[arg(long, default_value = "")]
        exercises: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List logged workouts
    List,
    /// Remove a workout by id
    Remove {
        id: Uuid,
    },
}

#[derive(Subcommand)]
enum PhotoCommands {
    /// Add a transformation entry
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        image_url: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List transformation entries
    List,
}

fn main() -> Result<()> {
    // Initialize logging
    fittrack_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let mut store = JsonStore::open(&data_dir);

    match cli.command {
        Commands::Register {
            email,
            password,
            name,
        } => cmd_register(&mut store, &email, &password, &name),
        Commands::Login { email, password } => cmd_login(&mut store, &email, &password),
        Commands::Logout => cmd_logout(&mut store),
        Commands::Whoami => cmd_whoami(&store),
        Commands::Profile { command } => match command {
            ProfileCommands::Show => cmd_profile_show(&store),
            ProfileCommands::Set {
                height,
                weight,
                target_weight,
                age,
                gender,
                activity,
                goal,
                experience,
                workout_time,
                frequency,
                diet,
                injuries,
                medical,
                budget,
            } => {
                let update = FitnessDetailsUpdate {
                    height,
                    current_weight: weight,
                    target_weight,
                    age,
                    gender: gender.as_deref().map(Gender::parse),
                    activity_level: activity.as_deref().map(ActivityLevel::parse),
                    fitness_goal: goal,
                    experience: experience.as_deref().map(Experience::parse),
                    preferred_workout_time: workout_time.as_deref().map(WorkoutTime::parse),
                    workout_frequency: frequency,
                    dietary_preference: diet,
                    injuries,
                    medical_conditions: medical,
                    max_budget: budget,
                };
                cmd_profile_set(&mut store, update)
            }
        },
        Commands::Measure {
            weight,
            waist,
            chest,
            bicep,
            thigh,
            notes,
        } => cmd_measure(&mut store, weight, waist, chest, bicep, thigh, notes),
        Commands::History => cmd_history(&store, &config),
        Commands::Workout { command } => match command {
            WorkoutCommands::Add {
                name,
                duration,
                exercises,
                notes,
            } => cmd_workout_add(&mut store, name, duration, exercises, notes),
            WorkoutCommands::List => cmd_workout_list(&store),
            WorkoutCommands::Remove { id } => cmd_workout_remove(&mut store, id),
        },
        Commands::Photo { command } => match command {
            PhotoCommands::Add {
                title,
                image_url,
                description,
            } => cmd_photo_add(&mut store, title, image_url, description),
            PhotoCommands::List => cmd_photo_list(&store),
        },
        Commands::Insights => cmd_insights(&store, &config),
        Commands::Admin { search } => cmd_admin(&store, &config, search),
        Commands::Export { out } => {
            let out = out.unwrap_or_else(|| data_dir.join("measurements.csv"));
            cmd_export(&store, &out)
        }
    }
}

/// Resolve the session pointer or fail with a hint
fn require_login(store: &dyn Repository) -> Result<UserRecord> {
    auth::current_user(store)?
        .ok_or_else(|| Error::Auth("Not logged in. Run `fittrack login` first.".into()))
}

fn cmd_register(store: &mut dyn Repository, email: &str, password: &str, name: &str) -> Result<()> {
    let user = auth::register(store, email, password, name)?;
    println!("✓ Welcome, {}! Account created and logged in.", user.name);
    Ok(())
}

fn cmd_login(store: &mut dyn Repository, email: &str, password: &str) -> Result<()> {
    let user = auth::login(store, email, password)?;
    println!("✓ Logged in as {}", user.email);
    Ok(())
}

fn cmd_logout(store: &mut dyn Repository) -> Result<()> {
    auth::logout(store)?;
    println!("✓ Logged out");
    Ok(())
}

fn cmd_whoami(store: &dyn Repository) -> Result<()> {
    match auth::current_user(store)? {
        Some(user) => println!("{} <{}>", user.name, user.email),
        None => println!("Not logged in"),
    }
    Ok(())
}

fn cmd_profile_show(store: &dyn Repository) -> Result<()> {
    let user = require_login(store)?;
    let details = &user.details;

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  PROFILE: {}", user.name);
    println!("╰─────────────────────────────────────────╯");
    println!();

    print_number("Height", details.height, "cm");
    print_number("Current weight", details.current_weight, "kg");
    print_number("Target weight", details.target_weight, "kg");
    if details.age != 0 {
        println!("  Age: {}", details.age);
    }
    println!("  Gender: {}", details.gender.as_str());
    println!(
        "  Activity: {}",
        metrics::activity_description(details.activity_level)
    );

    let bmi = metrics::bmi(details.current_weight, details.height);
    if bmi > 0.0 {
        println!();
        println!("  BMI: {} ({})", bmi, metrics::bmi_category(bmi));
    }

    let to_lose = metrics::weight_to_lose(details.current_weight, details.target_weight);
    if to_lose > 0.0 {
        println!("  To lose: {} kg", to_lose);
    }

    let kcal = metrics::calorie_recommendation(
        details.current_weight,
        details.height,
        details.age,
        details.gender,
        details.activity_level,
    );
    if kcal > 0 {
        println!("  Daily calories: {} kcal", kcal);

        let split = metrics::macro_recommendation(kcal, &details.fitness_goal);
        println!(
            "  Macros: {}g protein / {}g carbs / {}g fat",
            split.protein, split.carbs, split.fats
        );
    }

    let summary = metrics::fitness_summary(details);
    if !summary.is_empty() {
        println!();
        for line in summary {
            println!("  • {}", line);
        }
    }

    if let Some(updated) = details.last_updated {
        println!();
        println!("  Last updated: {}", updated.format("%Y-%m-%d %H:%M UTC"));
    }

    println!();
    Ok(())
}

fn print_number(label: &str, value: f64, unit: &str) {
    if value != 0.0 {
        println!("  {}: {} {}", label, value, unit);
    }
}

fn cmd_profile_set(store: &mut dyn Repository, update: FitnessDetailsUpdate) -> Result<()> {
    let user = require_login(store)?;

    if update.is_empty() {
        println!("Nothing to update. Pass at least one field flag.");
        return Ok(());
    }

    // Validation is advisory: warn, then save regardless
    let mut preview = user.details.clone();
    update.apply(&mut preview);
    let validation = metrics::validate_fitness_details(&preview);
    if !validation.valid {
        println!("⚠ Profile has issues:");
        for error in &validation.errors {
            println!("  - {}", error);
        }
        println!();
    }

    store::write_profile(store, user.id, &update)?;
    println!("✓ Profile saved");
    Ok(())
}

fn cmd_measure(
    store: &mut dyn Repository,
    weight: Option<f64>,
    waist: Option<f64>,
    chest: Option<f64>,
    bicep: Option<f64>,
    thigh: Option<f64>,
    notes: String,
) -> Result<()> {
    let mut user = require_login(store)?;

    if weight.is_none() && waist.is_none() && chest.is_none() && bicep.is_none() && thigh.is_none()
    {
        println!("Nothing to log. Pass at least one measurement flag.");
        return Ok(());
    }

    user.measurements.push(Measurement {
        id: Uuid::new_v4(),
        date: Utc::now().date_naive(),
        weight,
        waist,
        chest,
        bicep,
        thigh,
        notes,
    });

    store.put(user)?;
    println!("✓ Measurement logged");
    Ok(())
}

fn cmd_history(store: &dyn Repository, config: &Config) -> Result<()> {
    let user = require_login(store)?;

    if user.measurements.is_empty() {
        println!("No measurements logged yet. Start tracking your progress!");
        return Ok(());
    }

    let w = &config.units.body_weight;
    let g = &config.units.girth;
    println!(
        "{:<12} {:>12} {:>11} {:>11} {:>11} {:>11}  Notes",
        "Date",
        format!("Weight ({})", w),
        format!("Waist ({})", g),
        format!("Chest ({})", g),
        format!("Bicep ({})", g),
        format!("Thigh ({})", g),
    );

    // Newest first, like the dashboard table
    for m in user.measurements.iter().rev() {
        println!(
            "{:<12} {:>12} {:>11} {:>11} {:>11} {:>11}  {}",
            m.date,
            fmt_opt(m.weight),
            fmt_opt(m.waist),
            fmt_opt(m.chest),
            fmt_opt(m.bicep),
            fmt_opt(m.thigh),
            m.notes,
        );
    }

    Ok(())
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}", v),
        None => "-".into(),
    }
}

fn cmd_workout_add(
    store: &mut dyn Repository,
    name: String,
    duration: u32,
    exercises: String,
    notes: String,
) -> Result<()> {
    let mut user = require_login(store)?;

    let workout = Workout {
        id: Uuid::new_v4(),
        name,
        date: Utc::now().date_naive(),
        duration_minutes: duration,
        exercises,
        notes,
    };

    user.workouts.insert(0, workout);
    store.put(user)?;
    println!("✓ Workout logged");
    Ok(())
}

fn cmd_workout_list(store: &dyn Repository) -> Result<()> {
    let user = require_login(store)?;

    let stats = workout_stats(&user.workouts);
    println!(
        "{} workouts, {} min total, {} min average\n",
        stats.total, stats.total_minutes, stats.avg_duration_minutes
    );

    for w in &user.workouts {
        println!("{}  {}  {} min  [{}]", w.date, w.name, w.duration_minutes, w.id);
        if !w.exercises.is_empty() {
            println!("    {}", w.exercises);
        }
    }

    Ok(())
}

fn cmd_workout_remove(store: &mut dyn Repository, id: Uuid) -> Result<()> {
    let mut user = require_login(store)?;

    let before = user.workouts.len();
    user.workouts.retain(|w| w.id != id);
    if user.workouts.len() == before {
        println!("No workout with id {}", id);
        return Ok(());
    }

    store.put(user)?;
    println!("✓ Workout removed");
    Ok(())
}

fn cmd_photo_add(
    store: &mut dyn Repository,
    title: String,
    image_url: String,
    description: String,
) -> Result<()> {
    let mut user = require_login(store)?;

    user.transformations.push(Transformation {
        id: Uuid::new_v4(),
        title,
        description,
        image_url,
        date: Utc::now().date_naive(),
    });

    store.put(user)?;
    println!("✓ Transformation added");
    Ok(())
}

fn cmd_photo_list(store: &dyn Repository) -> Result<()> {
    let user = require_login(store)?;

    if user.transformations.is_empty() {
        println!("No transformations yet. Share your first one!");
        return Ok(());
    }

    for t in &user.transformations {
        println!("{}  {}", t.date, t.title);
        if !t.description.is_empty() {
            println!("    {}", t.description);
        }
        println!("    {}", t.image_url);
    }

    Ok(())
}

fn cmd_insights(store: &dyn Repository, config: &Config) -> Result<()> {
    let user = require_login(store)?;

    match progress_insights(&user.measurements) {
        Some(insights) => {
            let w = &config.units.body_weight;
            let g = &config.units.girth;
            println!("Progress over {} days ({} measurements):", insights.days_tracking, insights.measurement_count);
            println!("  Weight: {} {}", fmt_signed(insights.weight_change), w);
            println!("  Waist:  {} {}", fmt_signed(insights.waist_change), g);
            println!("  Chest:  {} {}", fmt_signed(insights.chest_change), g);
            println!("  Bicep:  {} {}", fmt_signed(insights.bicep_change), g);
            println!("  Thigh:  {} {}", fmt_signed(insights.thigh_change), g);
        }
        None => println!("Track more measurements to get insights"),
    }

    let stats = workout_stats(&user.workouts);
    if stats.total > 0 {
        println!();
        println!(
            "Workouts: {} logged, {} min total, {} min average",
            stats.total, stats.total_minutes, stats.avg_duration_minutes
        );
    }

    Ok(())
}

fn fmt_signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.1}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn cmd_admin(store: &dyn Repository, config: &Config, search: Option<String>) -> Result<()> {
    let users = store.list()?;
    let stats = global_stats(&users);

    println!("Users: {}", stats.total_users);
    println!(
        "Measurements: {} ({:.1} per user)",
        stats.total_measurements, stats.avg_measurements_per_user
    );
    println!(
        "Transformations: {} ({:.1} per user)",
        stats.total_transformations, stats.avg_transformations_per_user
    );

    let top_n = config.admin.top_performers;
    let top_measurements = admin::top_by_measurements(&users, top_n);
    if !top_measurements.is_empty() {
        println!("\nMost measurements logged:");
        for (rank, (user, count)) in top_measurements.iter().enumerate() {
            println!("  {}. {} — {}", rank + 1, user.name, count);
        }
    }

    let top_transformations = admin::top_by_transformations(&users, top_n);
    if !top_transformations.is_empty() {
        println!("\nMost transformations shared:");
        for (rank, (user, count)) in top_transformations.iter().enumerate() {
            println!("  {}. {} — {}", rank + 1, user.name, count);
        }
    }

    let listed: Vec<&UserRecord> = match search {
        Some(ref term) => admin::search_users(&users, term),
        None => users.iter().collect(),
    };

    if listed.is_empty() {
        println!("\nNo users found");
    } else {
        println!(
            "\n{:<20} {:<28} {:>12} {:>16}  Joined",
            "Name", "Email", "Measurements", "Transformations"
        );
        for user in listed {
            println!(
                "{:<20} {:<28} {:>12} {:>16}  {}",
                user.name,
                user.email,
                user.measurements.len(),
                user.transformations.len(),
                user.created_at.format("%Y-%m-%d"),
            );
        }
    }

    Ok(())
}

fn cmd_export(store: &dyn Repository, out: &std::path::Path) -> Result<()> {
    let user = require_login(store)?;

    let count = export_measurements(&user, out)?;
    println!("✓ Exported {} measurements", count);
    println!("  CSV: {}", out.display());
    Ok(())
}
