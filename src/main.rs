use campus_roll::core::engine::MENU;
use campus_roll::core::seed;
use campus_roll::utils::error::{CampusError, ErrorSeverity};
use campus_roll::utils::{logger, validation::Validate};
use campus_roll::{Campus, CliConfig, LocalStorage, MenuAction, RosterConfig, RosterEngine, Settings};
use clap::Parser;
use std::io::{self, BufRead, Write};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting campus-roll");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let (campus, file_settings) = match load_roster(config.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => exit_with(&e),
    };

    let settings = config.apply_overrides(file_settings);
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    tracing::info!(
        "Roster ready: {} institutes, {} student placements",
        campus.institutes().len(),
        campus.student_count()
    );

    let storage = LocalStorage::new(settings.output_path.clone());
    let mut engine = RosterEngine::new(campus, storage, settings);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !config.run.is_empty() {
        for action in &config.run {
            engine.run(*action, &mut out)?;
        }
        return Ok(());
    }

    writeln!(out, "Data initialised successfully!")?;
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        write!(out, "\n{}Select an option: ", MENU)?;
        out.flush()?;
        let Some(choice) = read_line(&mut input)? else {
            break;
        };

        if choice == "9" {
            add_grade_interactively(&mut engine, &mut input, &mut out)?;
            continue;
        }

        match MenuAction::from_choice(&choice) {
            Some(MenuAction::Exit) => break,
            Some(action) => engine.run(action, &mut out)?,
            None => writeln!(out, "No such menu item!")?,
        }
    }

    tracing::info!("Exiting campus-roll");
    Ok(())
}

/// 載入名冊：指定檔案或內建範例
fn load_roster(path: Option<&str>) -> campus_roll::Result<(Campus, Settings)> {
    match path {
        Some(path) => {
            tracing::info!("📁 Loading roster from: {}", path);
            let roster = RosterConfig::from_file(path)?;
            roster.validate()?;
            Ok((roster.build_campus()?, roster.settings()))
        }
        None => {
            tracing::info!("No roster file given, using the built-in sample");
            Ok((seed::sample_campus()?, Settings::default()))
        }
    }
}

fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn add_grade_interactively(
    engine: &mut RosterEngine<LocalStorage, Settings>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    write!(out, "Student last name: ")?;
    out.flush()?;
    let Some(last_name) = read_line(input)? else {
        return Ok(());
    };

    write!(out, "Grade: ")?;
    out.flush()?;
    let Some(raw) = read_line(input)? else {
        return Ok(());
    };

    match raw.parse::<i64>() {
        Ok(value) => engine.add_grade(&last_name, value, out)?,
        Err(_) => writeln!(out, "Error: '{}' is not a number!", raw)?,
    }
    Ok(())
}

fn exit_with(e: &CampusError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
