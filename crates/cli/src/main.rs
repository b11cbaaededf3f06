use chrono::Utc;
use clap::{Parser, Subcommand};
use mediassist_core::roles::navigation_for;
use mediassist_core::{
    AssistResult, BedDirectory, CoreConfig, MedicineDirectory, Role, Services, SymptomService,
};

#[derive(Parser)]
#[command(name = "mediassist")]
#[command(about = "MediAssist demo healthcare CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest possible conditions for a symptom description
    Suggest {
        /// Free-text symptom description (10 to 1000 characters)
        symptoms: String,
    },
    /// List hospital bed availability
    Beds {
        /// Filter by hospital name (case-insensitive substring)
        #[arg(long)]
        search: Option<String>,
        /// Filter by location, or "all"
        #[arg(long)]
        location: Option<String>,
    },
    /// Check medicine availability at nearby pharmacies
    Medicine {
        /// Medicine name (case-insensitive substring)
        term: String,
    },
    /// Show navigation entries for a role
    Nav {
        /// patient, admin or pharmacy; omit for signed-out navigation
        #[arg(long)]
        role: Option<Role>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Suggest { symptoms }) => {
            let configured = CoreConfig::from_env().and_then(|cfg| symptom_service(&cfg));
            let symptoms_service = match configured {
                Ok(service) => service,
                Err(e) => {
                    eprintln!("Error configuring symptom checker: {}", e);
                    std::process::exit(1);
                }
            };
            suggest(&symptoms_service, symptoms).await;
        }
        Some(Commands::Beds { search, location }) => {
            let hospitals = BedDirectory::seeded(Utc::now())
                .list(search.as_deref(), location.as_deref());
            if hospitals.is_empty() {
                println!("No hospitals found.");
            }
            for h in hospitals {
                println!(
                    "{}: {}/{} beds available ({}), {}, updated {}",
                    h.hospital_name,
                    h.available_beds,
                    h.total_beds,
                    h.availability_level().as_str(),
                    h.location.as_deref().unwrap_or("unknown location"),
                    h.last_updated.format("%Y-%m-%d %H:%M UTC"),
                );
            }
        }
        Some(Commands::Medicine { term }) => {
            match MedicineDirectory::seeded(Utc::now()).check_availability(&term) {
                Ok(Some(found)) => {
                    println!("{}", found.medicine.name);
                    for p in found.results {
                        println!(
                            "  {} ({}): {}, {}",
                            p.pharmacy_name,
                            p.distance.as_deref().unwrap_or("distance unknown"),
                            p.availability,
                            p.maps_url
                        );
                    }
                }
                Ok(None) => println!("No medicine matching '{}' was found.", term.trim()),
                Err(e) => eprintln!("Error checking medicine: {}", e),
            }
        }
        Some(Commands::Nav { role }) => {
            for item in navigation_for(role) {
                println!("{:<24} {}", item.href, item.label);
            }
        }
        None => {
            println!("Use 'mediassist --help' for commands");
        }
    }

    Ok(())
}

/// Symptom service backed by the hosted generation API.
///
/// Fails with a configuration error when no generation API key is set.
fn symptom_service(cfg: &CoreConfig) -> AssistResult<SymptomService> {
    Ok(Services::from_config(cfg)?.symptoms)
}

async fn suggest(service: &SymptomService, symptoms: String) {
    match service.suggest_from_form(symptoms).await {
        Ok(output) if output.possible_conditions.is_empty() => {
            println!("No possible conditions were suggested.");
        }
        Ok(output) => {
            println!("Possible conditions:");
            for (i, condition) in output.possible_conditions.iter().enumerate() {
                println!("  {}. {}", i + 1, condition);
            }
            println!("These suggestions are not a diagnosis. Consult a medical professional.");
        }
        Err(e) => eprintln!("Error suggesting conditions: {}", e),
    }
}
