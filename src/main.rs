mod cli;

use agrodose::error::Result;
use agrodose::logic::{compatibility, safety, WeatherAdvice};
use agrodose::models::{ApplicationPlan, EnvironmentalReading};
use agrodose::{App, Catalog, Config};
use clap::Parser;
use cli::{CalculateArgs, Cli, Commands, ConditionsArgs, ListTarget};
use dialoguer::Confirm;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // RUST_LOG wins over -v flags
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init => {
            Config::setup_interactive()?;
            Ok(())
        }
        Commands::Calculate(args) => {
            let (config, catalog) = load(cli.config.as_ref())?;
            calculate(App::new(config, catalog), args)
        }
        Commands::Check { pesticide, crop } => {
            let (_, catalog) = load(cli.config.as_ref())?;
            check(&catalog, pesticide, crop)
        }
        Commands::Epi { pesticide, ack } => {
            let (_, catalog) = load(cli.config.as_ref())?;
            epi(&catalog, pesticide, ack)
        }
        Commands::Advice(conditions) => {
            println!("{}", WeatherAdvice::assess(&reading_from(conditions)));
            Ok(())
        }
        Commands::List { what } => {
            let (_, catalog) = load(cli.config.as_ref())?;
            list(&catalog, what)
        }
    }
}

fn load(path: Option<&PathBuf>) -> Result<(Config, Catalog)> {
    let config = match Config::load(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run `agrodose init` or copy config/config.yaml.example to config/config.yaml");
            std::process::exit(1);
        }
    };
    let catalog = config.catalog()?;
    Ok((config, catalog))
}

fn reading_from(conditions: ConditionsArgs) -> EnvironmentalReading {
    EnvironmentalReading::from_inputs(conditions.temp, conditions.humidity, conditions.wind)
}

fn calculate(mut app: App, args: CalculateArgs) -> Result<()> {
    app.select_pesticide(args.pesticide)?;
    app.select_crop(args.crop)?;
    if let Some(area) = args.area {
        app.area_ha = Some(area);
    }
    app.temperature_c = args.conditions.temp;
    app.humidity_pct = args.conditions.humidity;
    app.wind_kmh = args.conditions.wind;
    for item in args.ack {
        app.acknowledge(item);
    }

    let assume_yes = args.yes;
    let plan = app
        .calculate(|_| {
            eprintln!("⚠ Producto no recomendado para este cultivo.");
            assume_yes
                || Confirm::new()
                    .with_prompt("¿Desea continuar?")
                    .default(false)
                    .interact()
                    .unwrap_or(false)
        })?
        .cloned();

    let Some(plan) = plan else {
        eprintln!("Cálculo cancelado");
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan, &app.config.date_format);
        println!("{}", app.weather_advice());
    }

    if let Some(message) = safety::warning_message(&app.missing_equipment()) {
        eprintln!("⚠ {}", message);
    }

    if args.register {
        let record = app.register(args.notes.as_deref().unwrap_or(""))?;
        eprintln!("{}", record.summary());
        println!("{}", serde_json::to_string_pretty(&record)?);
    }

    Ok(())
}

fn print_plan(plan: &ApplicationPlan, date_format: &str) {
    println!("{} en {} ({} ha)", plan.pesticide.name, plan.crop.name, plan.area_ha);
    println!("  Dosis ajustada:      {}", plan.dose_display());
    println!("  Cantidad total:      {}", plan.total_display());
    println!("  Carencia:            {}", plan.carency_display());
    println!(
        "  Próxima aplicación:  {}",
        plan.next_application_display(date_format)
    );
    if plan.application_suppressed() {
        println!("  ❌ Viento fuerte: no aplicar");
    }
}

fn check(catalog: &Catalog, pesticide_id: u32, crop_id: u32) -> Result<()> {
    let pesticide = catalog.pesticide(pesticide_id)?;
    let crop = catalog.crop(crop_id)?;
    let result = compatibility::check(pesticide, crop);
    println!("{}", compatibility::describe(&result, pesticide, crop));
    Ok(())
}

fn epi(catalog: &Catalog, pesticide_id: u32, ack: Vec<String>) -> Result<()> {
    let pesticide = catalog.pesticide(pesticide_id)?;
    let acknowledged = ack.into_iter().collect();
    let missing = safety::missing_equipment(pesticide, &acknowledged);
    match safety::warning_message(&missing) {
        Some(message) => println!("⚠ {}", message),
        None => println!("✅ EPI completo para {}", pesticide.name),
    }
    Ok(())
}

fn list(catalog: &Catalog, what: ListTarget) -> Result<()> {
    match what {
        ListTarget::Pesticides { pesticide_type } => {
            let pesticides: Vec<_> = match &pesticide_type {
                Some(t) => catalog.require_pesticides_of_type(t)?,
                None => catalog.pesticides.iter().collect(),
            };
            for p in pesticides {
                println!(
                    "{:>3}  {:<26} {:<12} {:<6} {} {}",
                    p.id,
                    p.name,
                    p.pesticide_type,
                    p.toxicity.as_str(),
                    p.base_dose_rate,
                    p.dose_unit
                );
            }
        }
        ListTarget::Crops => {
            for c in &catalog.crops {
                println!(
                    "{:>3}  {:<12} {:<12} {:<10} factor {}",
                    c.id,
                    c.name,
                    c.category.as_str(),
                    c.family,
                    c.dose_factor
                );
            }
        }
    }
    Ok(())
}
