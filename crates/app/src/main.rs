mod args;
mod lesson_repl;

use lesson_core::Catalog;
use lesson_core::model::{AccessibilitySettings, SkillNodeState};
use services::{AppServices, Clock, LessonConfig, LessonTimings};
use tracing_subscriber::EnvFilter;

use crate::args::{Args, Command, prepare_sqlite_file, print_usage};

fn print_profile(tree: &lesson_core::model::SkillTree) {
    println!("Skill tree");
    for node in tree.nodes() {
        let state = match node.state {
            SkillNodeState::Locked => "locked",
            SkillNodeState::Unlocked => "unlocked",
            SkillNodeState::Mastered => "mastered",
        };
        println!("  {:<16} level {}  {state}", node.label, node.level.value());
    }
    println!(
        "Mastered {}/{} · {} XP",
        tree.mastered_count(),
        tree.skills().len(),
        tree.total_xp()
    );
}

fn print_settings(settings: &AccessibilitySettings) {
    println!("font             {}", settings.font().as_str());
    println!("theme            {}", settings.theme().as_str());
    println!("color blindness  {}", settings.color_blindness().as_str());
    println!("reading ruler    {}", settings.reading_ruler());
    println!("adhd mode        {}", settings.adhd_mode());
    println!("bionic mode      {}", settings.bionic_mode());
    println!(
        "font size        {} ({}px)",
        settings.font_scale(),
        settings.font_size_px()
    );
    println!("line height      {}", settings.line_height());
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let Some(args) = Args::parse(argv).inspect_err(|_| print_usage())? else {
        print_usage();
        return Ok(());
    };

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&args.db_url)?;
    let timings = if args.fast {
        LessonTimings::instant()
    } else {
        LessonTimings::default()
    };
    let config = LessonConfig {
        timings,
        ..LessonConfig::default()
    };
    let services = AppServices::new_sqlite(
        &args.db_url,
        Clock::default_clock(),
        config,
        Catalog::physics_motion(),
    )
    .await?;
    tracing::debug!(db = %args.db_url, command = ?args.command, "services ready");

    match args.command {
        Command::Lesson => lesson_repl::run(&services.lesson_loop()).await,
        Command::Profile => {
            print_profile(&services.skills().load().await?);
            Ok(())
        }
        Command::Reset => {
            let tree = services.skills().reset().await?;
            println!("Progress reset.");
            print_profile(&tree);
            Ok(())
        }
        Command::Settings => {
            let accessibility = services.accessibility();
            let settings = if args.settings.is_empty() {
                accessibility.load().await?
            } else {
                accessibility.update(args.settings).await?
            };
            print_settings(&settings);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
