use clap::{Parser, Subcommand, ValueEnum};
use engine::api::{RegenConfig, simulate_regeneration};
use engine::classifier::{DomNode, RenderedApp, classify};
use engine::content::builtin_actors;
use engine::resources::ResourceKey;
use engine::Dice;

#[derive(Copy, Clone, ValueEnum)]
enum Res {
    Lp,
    Ae,
    Ke,
}

impl From<Res> for ResourceKey {
    fn from(value: Res) -> Self {
        match value {
            Res::Lp => ResourceKey::Lp,
            Res::Ae => ResourceKey::Ae,
            Res::Ke => ResourceKey::Ke,
        }
    }
}

#[derive(Subcommand)]
enum Cmd {
    /// Roll plain d6s (the unforced path) for a given seed
    Roll {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Number of rolls
        #[arg(long, default_value_t = 5)]
        rolls: u32,
        /// Use the embedding-boundary LCG roller instead of the engine RNG
        #[arg(long, default_value_t = false)]
        lcg: bool,
    },
    /// Classify an application descriptor: is it the regeneration dialog?
    Classify {
        /// Window title, if the host exposes one
        #[arg(long)]
        title: Option<String>,
        /// Template identifier, if the host exposes one
        #[arg(long)]
        template: Option<String>,
        /// Pretend the DOM carries the campsite form fields
        #[arg(long, default_value_t = false)]
        campsite_form: bool,
    },
    /// Run one full regeneration submission for an actor
    Simulate {
        /// Builtin actor id (warrior, mage, priest, wanderer)
        #[arg(long)]
        id: Option<String>,
        /// Path to an actor JSON/YAML file
        #[arg(long)]
        file: Option<String>,
        /// RNG seed for determinism
        #[arg(long, default_value_t = 2025)]
        seed: u64,
        /// Resources to uncheck before submitting
        #[arg(long, value_enum)]
        decline: Vec<Res>,
        /// Pretty-print the report JSON
        #[arg(long, default_value_t = true)]
        pretty: bool,
    },
    /// Print a builtin actor as JSON (stdout)
    ActorDump {
        /// Builtin actor id
        #[arg(long, default_value = "warrior")]
        id: String,
        /// Pretty-print JSON
        #[arg(long, default_value_t = true)]
        pretty: bool,
    },
}

#[derive(Parser)]
#[command(name = "regen-cli")]
#[command(about = "Masterful regeneration override harness")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Roll { seed, rolls, lcg } => {
            if lcg {
                for i in 0..rolls {
                    println!("{}", ffi::lcg_roll(seed.wrapping_add(u64::from(i)) as i64, 1, 6));
                }
            } else {
                let mut dice = Dice::from_seed(seed);
                for _ in 0..rolls {
                    println!("{}", dice.d6());
                }
            }
        }
        Cmd::Classify {
            title,
            template,
            campsite_form,
        } => {
            let root = if campsite_form {
                DomNode::element("form")
                    .with_child(DomNode::named("select", "campsite"))
                    .with_child(DomNode::named("select", "interruption"))
                    .with_child(DomNode::named("input", "bad"))
                    .with_child(DomNode::named("button", "roll").with_text("Roll"))
            } else {
                DomNode::default()
            };
            let app = RenderedApp {
                title,
                template,
                root,
            };
            match classify(&app) {
                Some(rule) => println!("match: {rule:?}"),
                None => println!("no match"),
            }
        }
        Cmd::Simulate {
            id,
            file,
            seed,
            decline,
            pretty,
        } => {
            let cfg = RegenConfig {
                actor_path: file,
                actor_id: id,
                seed,
                decline: decline.into_iter().map(ResourceKey::from).collect(),
                title: None,
                template: None,
            };
            let report = simulate_regeneration(cfg)?;
            for line in &report.log {
                println!("{line}");
            }
            if pretty {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", serde_json::to_string(&report)?);
            }
        }
        Cmd::ActorDump { id, pretty } => {
            let raw = builtin_actors()
                .get(id.as_str())
                .copied()
                .ok_or_else(|| anyhow::anyhow!("unknown builtin actor '{id}'"))?;
            let actor: engine::Actor = serde_json::from_str(raw)?;
            if pretty {
                println!("{}", serde_json::to_string_pretty(&actor)?);
            } else {
                println!("{}", serde_json::to_string(&actor)?);
            }
        }
    }
    Ok(())
}
